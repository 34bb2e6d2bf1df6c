//! DecisionEngine - the fixed, short-circuiting evaluation pipeline
//!
//! Stage order is not configurable:
//! 1. integrity check (fatal on violation, no verdict)
//! 2. risk assessment        → ESCALATE above 0.75
//! 3. emotional stability    → DENY on high arousal / low valence
//! 4. context rules          → DENY on a truthy `deny_all`
//! 5. ethics flags           → DENY if any core principle is off
//! 6. consciousness update   → ESCALATE below 0.3 (writes the genome)
//! 7. collective coordination (optional) → DENY below 0.5
//! 8. ALLOW
//!
//! All mutable state (consciousness level, node resonances) sits behind one
//! exclusive critical section acquired per decision, so concurrent `decide`
//! calls serialize their reads and writes of the shared genome.

use ethos_core::{is_truthy, DecisionContext, Genome, IntegrityGuard, Result, Verdict};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Risk scores strictly above this escalate at stage 2.
const RISK_ESCALATE_THRESHOLD: f64 = 0.75;

/// Stability gate: deny at `arousal >= 0.8` or `valence <= -0.5`.
/// The valence bound is signed even though valence is treated as
/// [0, 1] elsewhere, so it only fires on callers that pass negative
/// valence. Changing it would change the deny surface.
const AROUSAL_DENY_THRESHOLD: f64 = 0.8;
const VALENCE_DENY_THRESHOLD: f64 = -0.5;

/// Consciousness levels below this escalate at stage 6.
const CONSCIOUSNESS_ESCALATE_THRESHOLD: f64 = 0.3;

/// Collective resonance below this denies at stage 7.
const RESONANCE_DENY_THRESHOLD: f64 = 0.5;

/// Long-lived runtime producing one verdict per request.
pub struct DecisionEngine {
    genome: Mutex<Genome>,
    guard: IntegrityGuard,
    collective_enabled: bool,
    decisions: AtomicU64,
}

impl DecisionEngine {
    /// Build an engine over a (normally sealed) genome. An unsealed or
    /// tampered genome is only rejected at decision time, by the guard.
    pub fn new(genome: Genome, collective_enabled: bool) -> Self {
        Self {
            genome: Mutex::new(genome),
            guard: IntegrityGuard::new(),
            collective_enabled,
            decisions: AtomicU64::new(0),
        }
    }

    /// Run one request through the pipeline.
    ///
    /// Integrity failures propagate without producing a verdict and
    /// without bumping the decision counter; the guard check always runs
    /// first, then the counter, then the stages.
    pub async fn decide(&self, ctx: &DecisionContext) -> Result<Verdict> {
        let mut genome = self.genome.lock().await;
        if let Err(e) = self.guard.verify_or_raise(&genome) {
            warn!(action = %ctx.action_type, "integrity check failed: {}", e);
            return Err(e);
        }
        self.decisions.fetch_add(1, Ordering::Relaxed);

        let verdict = self.run_pipeline(&mut genome, ctx);
        debug!(
            action = %ctx.action_type,
            target = %ctx.target,
            risk = %ctx.risk_level,
            verdict = %verdict,
            "decision"
        );
        Ok(verdict)
    }

    fn run_pipeline(&self, genome: &mut Genome, ctx: &DecisionContext) -> Verdict {
        // Stage 2: risk assessment
        if ctx.risk_level.score() > RISK_ESCALATE_THRESHOLD {
            return Verdict::Escalate;
        }

        // Stage 3: emotional stability
        if ctx.state.arousal >= AROUSAL_DENY_THRESHOLD
            || ctx.state.valence <= VALENCE_DENY_THRESHOLD
        {
            return Verdict::Deny;
        }

        // Stage 4: context rules
        if ctx
            .context_rules
            .get("deny_all")
            .map(is_truthy)
            .unwrap_or(false)
        {
            return Verdict::Deny;
        }

        // Stage 5: ethics flags (absent flags read as enabled)
        for principle in ["no_harm", "autonomy_respect", "transparency"] {
            if !genome.flag(principle) {
                return Verdict::Deny;
            }
        }

        // Stage 6: consciousness update. This writes the genome; the seal
        // checksum is stale from here on and is not re-checked within this
        // call.
        genome.update_consciousness(&ctx.state);
        if genome.consciousness_level() < CONSCIOUSNESS_ESCALATE_THRESHOLD {
            return Verdict::Escalate;
        }

        // Stage 7: collective coordination
        if self.collective_enabled {
            let resonance = genome.collective_mut().coordinate();
            if resonance < RESONANCE_DENY_THRESHOLD {
                return Verdict::Deny;
            }
        }

        Verdict::Allow
    }

    /// Health check: does the genome still verify against its seal?
    pub async fn verify_integrity(&self) -> bool {
        self.genome.lock().await.verify_integrity()
    }

    /// Health check through the guard; counts like any other verification.
    pub async fn verify_or_raise(&self) -> Result<()> {
        let genome = self.genome.lock().await;
        self.guard.verify_or_raise(&genome)
    }

    /// Loggable view of the wrapped genome.
    pub async fn snapshot(&self) -> ethos_core::GenomeSnapshot {
        self.genome.lock().await.snapshot()
    }

    /// Decisions that made it past the guard, across all callers.
    pub fn decision_count(&self) -> u64 {
        self.decisions.load(Ordering::Relaxed)
    }

    /// Integrity verifications performed so far (one per decision, plus
    /// any external health checks).
    pub fn verification_count(&self) -> u64 {
        self.guard.verification_count()
    }

    pub fn collective_enabled(&self) -> bool {
        self.collective_enabled
    }
}
