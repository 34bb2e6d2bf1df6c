//! Benchmark suites over the core operations
//!
//! Three suites: integrity (seal/verify latency and tamper detection),
//! pipeline (decision latency and verdict mix), collective (broadcast and
//! coordinate scaling over node counts). Each suite returns a serializable
//! result struct for `report::write_report`.

use crate::report::Stats;
use ethos_core::{
    Collective, DecisionContext, GenomeBuilder, ResonanceNode, RiskLevel, StateVector, Verdict,
};
use ethos_runtime::DecisionEngine;
use serde::Serialize;
use serde_json::json;
use std::time::Instant;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct IntegrityResults {
    pub iterations: usize,
    pub seal_ns: Stats,
    pub verify_ns: Stats,
    pub tamper_detected: bool,
}

/// Seal/verify latency plus a tamper-detection sanity check.
pub fn run_integrity(iterations: usize) -> IntegrityResults {
    info!(iterations, "integrity suite");

    let mut seal_ns = Vec::with_capacity(iterations);
    let mut verify_ns = Vec::with_capacity(iterations);

    for _ in 0..iterations {
        let builder = GenomeBuilder::new().resonance_node(ResonanceNode::new("n0", 1.0));
        let start = Instant::now();
        let genome = builder.build();
        seal_ns.push(start.elapsed().as_nanos() as f64);

        let start = Instant::now();
        let ok = genome.verify_integrity();
        verify_ns.push(start.elapsed().as_nanos() as f64);
        assert!(ok);
    }

    let mut tampered = GenomeBuilder::create_default();
    tampered.set_flag("no_harm", false);

    IntegrityResults {
        iterations,
        seal_ns: Stats::from_samples(&seal_ns),
        verify_ns: Stats::from_samples(&verify_ns),
        tamper_detected: !tampered.verify_integrity(),
    }
}

#[derive(Debug, Serialize)]
pub struct PipelineResults {
    pub iterations: usize,
    pub decide_ns: Stats,
    pub allowed: u64,
    pub denied: u64,
    pub escalated: u64,
}

/// Decision latency over a mixed workload.
///
/// Every context either keeps the consciousness level at its sealed value
/// or short-circuits before the stage-6 write, so the genome stays
/// verifiable across the whole run.
pub async fn run_pipeline(iterations: usize) -> PipelineResults {
    info!(iterations, "pipeline suite");

    let mut warm = ResonanceNode::new("n0", 1.0);
    warm.update_resonance(1.0);
    let genome = GenomeBuilder::new().resonance_node(warm).build();
    let engine = DecisionEngine::new(genome, true);

    let neutral = StateVector::new(0.5, 0.5, 0.5);
    let contexts = [
        DecisionContext::new("read_file", "/data/in", "inspect", RiskLevel::Low, neutral),
        DecisionContext::new("write_file", "/data/out", "persist", RiskLevel::Medium, neutral),
        DecisionContext::new("exec", "host", "run command", RiskLevel::Critical, neutral),
        DecisionContext::new(
            "network",
            "api.internal",
            "fetch",
            RiskLevel::Low,
            StateVector::new(0.9, 0.5, 0.5),
        ),
        DecisionContext::new("read_file", "/data/in", "inspect", RiskLevel::High, neutral)
            .with_rule("deny_all", json!(true)),
    ];

    let mut decide_ns = Vec::with_capacity(iterations);
    let (mut allowed, mut denied, mut escalated) = (0u64, 0u64, 0u64);

    for i in 0..iterations {
        let ctx = &contexts[i % contexts.len()];
        let start = Instant::now();
        let verdict = engine.decide(ctx).await.expect("genome stays sealed");
        decide_ns.push(start.elapsed().as_nanos() as f64);
        match verdict {
            Verdict::Allow => allowed += 1,
            Verdict::Deny => denied += 1,
            Verdict::Escalate => escalated += 1,
        }
    }

    PipelineResults {
        iterations,
        decide_ns: Stats::from_samples(&decide_ns),
        allowed,
        denied,
        escalated,
    }
}

#[derive(Debug, Serialize)]
pub struct CollectiveRow {
    pub nodes: usize,
    pub broadcast_ns: Stats,
    pub coordinate_ns: Stats,
    pub broadcast_identity: bool,
}

#[derive(Debug, Serialize)]
pub struct CollectiveResults {
    pub iterations: usize,
    pub rows: Vec<CollectiveRow>,
}

/// Broadcast/coordinate scaling over increasing node counts.
pub async fn run_collective(iterations: usize, max_nodes: usize) -> CollectiveResults {
    info!(iterations, max_nodes, "collective suite");

    let mut rows = Vec::new();
    let mut node_count = 1;
    while node_count <= max_nodes {
        let mut collective = Collective::new();
        for i in 0..node_count {
            collective.add_node(ResonanceNode::new(format!("n{i}"), i as f64 * 0.1));
        }

        let mut broadcast_ns = Vec::with_capacity(iterations);
        let mut coordinate_ns = Vec::with_capacity(iterations);
        let mut identity = true;

        for i in 0..iterations {
            let stimulus = 0.25 + (i % 4) as f64 * 0.2;
            let start = Instant::now();
            let out = collective.broadcast(stimulus).await;
            broadcast_ns.push(start.elapsed().as_nanos() as f64);
            identity &= (out - stimulus).abs() < 1e-9;

            let start = Instant::now();
            collective.coordinate();
            coordinate_ns.push(start.elapsed().as_nanos() as f64);
        }

        rows.push(CollectiveRow {
            nodes: node_count,
            broadcast_ns: Stats::from_samples(&broadcast_ns),
            coordinate_ns: Stats::from_samples(&coordinate_ns),
            broadcast_identity: identity,
        });
        node_count *= 2;
    }

    CollectiveResults { iterations, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrity_suite_detects_tampering() {
        let results = run_integrity(10);
        assert!(results.tamper_detected);
        assert_eq!(results.seal_ns.samples, 10);
    }

    #[tokio::test]
    async fn pipeline_suite_covers_all_verdicts() {
        let results = run_pipeline(50).await;
        assert_eq!(results.allowed + results.denied + results.escalated, 50);
        assert!(results.allowed > 0);
        assert!(results.denied > 0);
        assert!(results.escalated > 0);
    }

    #[tokio::test]
    async fn collective_suite_holds_broadcast_identity() {
        let results = run_collective(5, 8).await;
        assert_eq!(results.rows.len(), 4); // 1, 2, 4, 8
        assert!(results.rows.iter().all(|r| r.broadcast_identity));
    }
}
