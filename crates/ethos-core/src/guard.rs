//! Integrity guard - the single gate in front of every decision

use crate::error::{Error, Result};
use crate::genome::Genome;
use std::sync::atomic::{AtomicU64, Ordering};

/// Verifies a genome's seal before it is used, counting every check.
///
/// The counter increments whether the check passes or fails; a failed
/// check is fatal for the calling operation and is never retried here.
#[derive(Debug, Default)]
pub struct IntegrityGuard {
    verifications: AtomicU64,
}

impl IntegrityGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the genome's seal, or fail with an integrity violation.
    pub fn verify_or_raise(&self, genome: &Genome) -> Result<()> {
        self.verifications.fetch_add(1, Ordering::Relaxed);
        if genome.verify_integrity() {
            Ok(())
        } else if !genome.is_sealed() {
            Err(Error::integrity_violation("genome was never sealed"))
        } else {
            Err(Error::integrity_violation(
                "checksum does not match protected fields",
            ))
        }
    }

    /// Number of verifications performed so far, passing or failing.
    pub fn verification_count(&self) -> u64 {
        self.verifications.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::GenomeBuilder;

    #[test]
    fn sealed_genome_passes() {
        let genome = GenomeBuilder::create_default();
        let guard = IntegrityGuard::new();
        assert!(guard.verify_or_raise(&genome).is_ok());
        assert_eq!(guard.verification_count(), 1);
    }

    #[test]
    fn unsealed_genome_raises() {
        let genome = Genome::default();
        let guard = IntegrityGuard::new();
        let err = guard.verify_or_raise(&genome).unwrap_err();
        assert!(matches!(err, Error::IntegrityViolation { .. }));
    }

    #[test]
    fn counter_increments_on_failure_too() {
        let mut genome = GenomeBuilder::create_default();
        genome.set_flag("no_harm", false);
        let guard = IntegrityGuard::new();
        for _ in 0..3 {
            assert!(guard.verify_or_raise(&genome).is_err());
        }
        assert_eq!(guard.verification_count(), 3);
    }
}
