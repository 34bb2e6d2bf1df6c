//! Integration tests for ethos-core: genome sealing, guard, resonance

use ethos_core::*;
use serde_json::json;

// ===========================================================================
// Seal / verify round trip
// ===========================================================================

#[test]
fn build_seals_and_verifies() {
    let genome = GenomeBuilder::new()
        .ethics_principle("no_harm", true)
        .resonance_node(ResonanceNode::new("alpha", 1.0))
        .build();
    assert!(genome.is_sealed());
    assert!(genome.verify_integrity());
    assert_eq!(genome.checksum().unwrap().len(), 64); // hex SHA-256
}

#[test]
fn every_protected_field_is_tamper_evident() {
    // Flag flip
    let mut genome = GenomeBuilder::create_default();
    genome.set_flag("transparency", false);
    assert!(!genome.verify_integrity());

    // Consciousness drift
    let mut genome = GenomeBuilder::create_default();
    genome.update_consciousness(&StateVector::new(0.2, 0.2, 0.2));
    assert!(!genome.verify_integrity());

    // Node-count change
    let mut genome = GenomeBuilder::create_default();
    genome.collective_mut().add_node(ResonanceNode::new("late", 1.0));
    assert!(!genome.verify_integrity());
}

#[test]
fn adding_an_unlisted_flag_breaks_the_seal() {
    // New flag names enter the hashed set too, not just the three defaults.
    let mut genome = GenomeBuilder::create_default();
    genome.set_flag("extra_caution", true);
    assert!(!genome.verify_integrity());
}

#[test]
fn never_sealed_genome_fails_guard_and_verify() {
    let genome = Genome::default();
    assert!(!genome.verify_integrity());

    let guard = IntegrityGuard::new();
    let err = guard.verify_or_raise(&genome).unwrap_err();
    assert!(matches!(err, Error::IntegrityViolation { .. }));
    assert_eq!(guard.verification_count(), 1);
}

#[test]
fn distinct_flag_sets_produce_distinct_checksums() {
    let a = GenomeBuilder::create_default();
    let b = GenomeBuilder::new().ethics_principle("no_harm", false).build();
    assert_ne!(a.checksum(), b.checksum());
}

// ===========================================================================
// Snapshot (exportable form)
// ===========================================================================

#[test]
fn snapshot_carries_the_external_contract_fields() {
    let genome = GenomeBuilder::new()
        .resonance_node(ResonanceNode::new("alpha", 1.0))
        .metadata("origin", json!("core_tests"))
        .build();
    let snap = genome.snapshot();

    let value = serde_json::to_value(&snap).unwrap();
    assert_eq!(value["node_count"], json!(1));
    assert_eq!(value["consciousness_level"], json!(0.5));
    assert_eq!(value["ethics"]["no_harm"], json!(true));
    assert!(value["checksum"].is_string());
}

// ===========================================================================
// Broadcast / coordinate (driven without a runtime)
// ===========================================================================

#[test]
fn broadcast_identity_and_empty_set() {
    let mut empty = Collective::new();
    assert_eq!(futures::executor::block_on(empty.broadcast(0.9)), 0.0);

    let mut collective = Collective::new();
    collective.add_node(ResonanceNode::new("a", 0.5));
    collective.add_node(ResonanceNode::new("b", 1.5));
    collective.add_node(ResonanceNode::new("c", 2.5));
    let out = futures::executor::block_on(collective.broadcast(0.9));
    assert!((out - 0.9).abs() < 1e-12);
}

#[test]
fn coordinate_after_mixed_resonance() {
    let mut collective = Collective::new();
    let mut a = ResonanceNode::new("a", 1.0);
    a.update_resonance(0.0);
    let mut b = ResonanceNode::new("b", 1.0);
    b.update_resonance(1.0);
    collective.add_node(a);
    collective.add_node(b);

    assert!((collective.coordinate() - 0.5).abs() < 1e-12);
    // Second pass is a fixed point: everyone already holds the mean.
    assert!((collective.coordinate() - 0.5).abs() < 1e-12);
}
