//! Core types for Ethos - requests, verdicts, and risk ordinals

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Affect profile attached to each request (PAD model).
///
/// Immutable once constructed; the pipeline reads it but never writes it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    pub arousal: f64,
    pub valence: f64,
    pub dominance: f64,
}

impl StateVector {
    pub fn new(arousal: f64, valence: f64, dominance: f64) -> Self {
        Self {
            arousal,
            valence,
            dominance,
        }
    }

    /// Mean of the three dimensions, clamped to [0, 1].
    pub fn presence(&self) -> f64 {
        let mean = (self.arousal + self.valence + self.dominance) / 3.0;
        mean.clamp(0.0, 1.0)
    }
}

impl Default for StateVector {
    fn default() -> Self {
        Self::new(0.5, 0.5, 0.5)
    }
}

/// Ordinal risk classification for a requested action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl RiskLevel {
    /// Ordinal normalized to [0, 1] (ordinal / max ordinal).
    pub fn score(self) -> f64 {
        self as u8 as f64 / 4.0
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RiskLevel::Low => f.write_str("LOW"),
            RiskLevel::Medium => f.write_str("MEDIUM"),
            RiskLevel::High => f.write_str("HIGH"),
            RiskLevel::Critical => f.write_str("CRITICAL"),
        }
    }
}

/// Terminal output of the evaluation pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Allow,
    Deny,
    Escalate,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Verdict::Allow => f.write_str("ALLOW"),
            Verdict::Deny => f.write_str("DENY"),
            Verdict::Escalate => f.write_str("ESCALATE"),
        }
    }
}

/// One intended action, as described by the caller.
///
/// Constructed per decision and never mutated. The core does not validate
/// field contents; malformed inputs are the caller's problem.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecisionContext {
    pub action_type: String,
    pub target: String,
    pub intent: String,
    pub risk_level: RiskLevel,
    pub state: StateVector,
    #[serde(default)]
    pub context_rules: HashMap<String, serde_json::Value>,
}

impl DecisionContext {
    pub fn new(
        action_type: impl Into<String>,
        target: impl Into<String>,
        intent: impl Into<String>,
        risk_level: RiskLevel,
        state: StateVector,
    ) -> Self {
        Self {
            action_type: action_type.into(),
            target: target.into(),
            intent: intent.into(),
            risk_level,
            state,
            context_rules: HashMap::new(),
        }
    }

    pub fn with_rule(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.context_rules.insert(key.into(), value);
        self
    }
}

/// Truthiness of a free-form context-rule value.
///
/// null, false, 0, "" and empty containers are falsy; everything else is
/// truthy. Matches how the rule mapping is interpreted at the gate.
pub fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(a) => !a.is_empty(),
        serde_json::Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn risk_scores_normalize_to_quarter_steps() {
        assert_eq!(RiskLevel::Low.score(), 0.25);
        assert_eq!(RiskLevel::Medium.score(), 0.5);
        assert_eq!(RiskLevel::High.score(), 0.75);
        assert_eq!(RiskLevel::Critical.score(), 1.0);
    }

    #[test]
    fn risk_ordering_is_ordinal() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn verdict_serde_uppercase() {
        assert_eq!(serde_json::to_string(&Verdict::Allow).unwrap(), "\"ALLOW\"");
        let back: Verdict = serde_json::from_str("\"ESCALATE\"").unwrap();
        assert_eq!(back, Verdict::Escalate);
    }

    #[test]
    fn presence_is_clamped_mean() {
        assert_eq!(StateVector::new(0.3, 0.3, 0.3).presence(), 0.3);
        assert_eq!(StateVector::new(2.0, 2.0, 2.0).presence(), 1.0);
        assert_eq!(StateVector::new(-1.0, -1.0, -1.0).presence(), 0.0);
    }

    #[test]
    fn truthiness_table() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("no")));
        assert!(is_truthy(&json!([0])));
        assert!(is_truthy(&json!({"k": 0})));
    }

    #[test]
    fn context_builder_attaches_rules() {
        let ctx = DecisionContext::new(
            "read_file",
            "/etc/hosts",
            "inspect",
            RiskLevel::Low,
            StateVector::default(),
        )
        .with_rule("deny_all", json!(true));
        assert!(is_truthy(&ctx.context_rules["deny_all"]));
    }
}
