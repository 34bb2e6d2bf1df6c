//! Resonance nodes and the collective aggregator
//!
//! Each node is an independent oscillator; the collective fans a stimulus
//! out to every node and reduces the responses to one scalar. Nodes never
//! talk to each other and no node operation can fail.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single oscillator-like evaluator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResonanceNode {
    pub id: String,
    pub base_frequency: f64,
    /// Current resonance value; written only by the collective.
    pub resonance: f64,
}

impl ResonanceNode {
    pub fn new(id: impl Into<String>, base_frequency: f64) -> Self {
        Self {
            id: id.into(),
            base_frequency,
            resonance: 0.0,
        }
    }

    pub fn update_resonance(&mut self, collective_resonance: f64) {
        self.resonance = collective_resonance;
    }

    /// Response of this node to a wave at its current resonance.
    pub fn resonate(&self, wave: f64) -> f64 {
        (wave + self.base_frequency).sin() * self.resonance
    }
}

/// Set of resonance nodes keyed by id.
///
/// Insertion order is irrelevant. Adding a node with an existing id
/// overwrites the old node silently.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Collective {
    nodes: HashMap<String, ResonanceNode>,
}

impl Collective {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: ResonanceNode) {
        self.nodes.insert(node.id.clone(), node);
    }

    pub fn node(&self, id: &str) -> Option<&ResonanceNode> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &ResonanceNode> {
        self.nodes.values()
    }

    /// Fan a stimulus out to every node, then reduce to the mean.
    ///
    /// Each node's resonance is set to the stimulus itself; the per-node
    /// writes have no ordering between them, and the reduction waits for
    /// all of them. Returns 0.0 for an empty collective, otherwise the
    /// mean of the newly-set values (the stimulus, up to float error).
    pub async fn broadcast(&mut self, stimulus: f64) -> f64 {
        if self.nodes.is_empty() {
            return 0.0;
        }
        let responses = join_all(self.nodes.values_mut().map(|node| async move {
            node.resonance = stimulus;
            node.resonance
        }))
        .await;
        responses.iter().sum::<f64>() / responses.len() as f64
    }

    /// Synchronous reduce-and-feedback: mean of the current resonance
    /// values, written back into every node. Reads-then-writes, unlike
    /// [`broadcast`](Self::broadcast) which writes-then-reads.
    pub fn coordinate(&mut self) -> f64 {
        if self.nodes.is_empty() {
            return 0.0;
        }
        let total: f64 = self.nodes.values().map(|n| n.resonance).sum();
        let collective_resonance = total / self.nodes.len() as f64;
        for node in self.nodes.values_mut() {
            node.update_resonance(collective_resonance);
        }
        collective_resonance
    }
}
