//! The genome - versioned, tamper-evident policy configuration
//!
//! A genome holds the ethics flags, the derived consciousness level, and the
//! collective's node set. Sealing fixes a SHA-256 checksum over those three
//! protected fields; any later mutation makes `verify_integrity` fail until a
//! fresh genome is built. There is no re-seal path after construction.
//!
//! Known limitation, kept on purpose: the checksum covers only the flags, the
//! consciousness level, and the node COUNT. Node identities, node resonance
//! values, and the metadata map are not hashed.

use crate::resonance::{Collective, ResonanceNode};
use crate::types::StateVector;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};

/// Default ethics flags: every principle starts enabled.
fn default_ethics() -> BTreeMap<String, bool> {
    BTreeMap::from([
        ("autonomy_respect".to_string(), true),
        ("no_harm".to_string(), true),
        ("transparency".to_string(), true),
    ])
}

/// Policy configuration protected by a seal checksum.
#[derive(Clone, Debug)]
pub struct Genome {
    ethics: BTreeMap<String, bool>,
    consciousness_level: f64,
    collective: Collective,
    checksum: Option<String>,
    metadata: HashMap<String, serde_json::Value>,
}

impl Default for Genome {
    fn default() -> Self {
        Self {
            ethics: default_ethics(),
            consciousness_level: 0.5,
            collective: Collective::new(),
            checksum: None,
            metadata: HashMap::new(),
        }
    }
}

impl Genome {
    /// Ethics flag by name; absent flags read as enabled.
    pub fn flag(&self, name: &str) -> bool {
        self.ethics.get(name).copied().unwrap_or(true)
    }

    /// Overwrite an ethics flag. After sealing, this invalidates the
    /// checksum - exactly the mutation the integrity guard detects.
    pub fn set_flag(&mut self, name: impl Into<String>, enabled: bool) {
        self.ethics.insert(name.into(), enabled);
    }

    pub fn consciousness_level(&self) -> f64 {
        self.consciousness_level
    }

    /// Recompute the consciousness level from a request's state vector.
    /// The stored checksum goes stale here; the core never re-seals.
    pub fn update_consciousness(&mut self, state: &StateVector) {
        self.consciousness_level = state.presence();
    }

    pub fn collective(&self) -> &Collective {
        &self.collective
    }

    pub fn collective_mut(&mut self) -> &mut Collective {
        &mut self.collective
    }

    pub fn metadata(&self) -> &HashMap<String, serde_json::Value> {
        &self.metadata
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.metadata.insert(key.into(), value);
    }

    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    pub fn is_sealed(&self) -> bool {
        self.checksum.is_some()
    }

    /// Digest over the protected fields: ethics flags (sorted by key),
    /// consciousness level bits, node count.
    fn protected_digest(&self) -> String {
        let mut hasher = Sha256::new();
        for (name, enabled) in &self.ethics {
            hasher.update(name.as_bytes());
            hasher.update([*enabled as u8]);
        }
        hasher.update(self.consciousness_level.to_bits().to_be_bytes());
        hasher.update((self.collective.len() as u64).to_be_bytes());
        hex::encode(hasher.finalize())
    }

    /// Fix the checksum over the current protected fields. One-way: the
    /// builder calls this once at the end of construction.
    pub(crate) fn seal(&mut self) {
        self.checksum = Some(self.protected_digest());
    }

    /// `false` if the genome was never sealed, or if any protected field
    /// changed since sealing. Does not mutate anything.
    pub fn verify_integrity(&self) -> bool {
        match &self.checksum {
            None => false,
            Some(stored) => *stored == self.protected_digest(),
        }
    }

    /// Serializable snapshot for logging and benchmarking. Not covered by
    /// the integrity checksum.
    pub fn snapshot(&self) -> GenomeSnapshot {
        GenomeSnapshot {
            ethics: self.ethics.clone(),
            consciousness_level: self.consciousness_level,
            node_count: self.collective.len(),
            checksum: self.checksum.clone(),
        }
    }
}

/// Exportable view of a genome, safe to log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenomeSnapshot {
    pub ethics: BTreeMap<String, bool>,
    pub consciousness_level: f64,
    pub node_count: usize,
    pub checksum: Option<String>,
}

/// Staged constructor for a sealed genome.
///
/// Flags and nodes are set while unsealed; `build` consumes the builder,
/// seals, and returns the genome. There is no transition back to unsealed.
#[derive(Debug, Default)]
pub struct GenomeBuilder {
    genome: Genome,
}

impl GenomeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sealed genome with default ethics and no nodes.
    pub fn create_default() -> Genome {
        Self::new().build()
    }

    pub fn ethics_principle(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.genome.ethics.insert(name.into(), enabled);
        self
    }

    pub fn resonance_node(mut self, node: ResonanceNode) -> Self {
        self.genome.collective.add_node(node);
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.genome.metadata.insert(key.into(), value);
        self
    }

    pub fn build(mut self) -> Genome {
        self.genome.seal();
        self.genome
    }
}
