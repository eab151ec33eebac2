//! Rule evaluation: metrics bundle in, ordered alerts out.
//!
//! Four independent threshold rules are checked in fixed order A, B, C, D,
//! so Tier 1 (kill switch) alerts always precede Tier 2 (trend watch)
//! alerts. Evaluation is pure: no state survives between calls.

mod conditions;
mod messages;

use serde::{Deserialize, Serialize};
use tracing::debug;

use adpulse_core::{Alert, MetricsBundle, RuleId};

use crate::loader::Result;
use crate::thresholds::RuleThresholds;

pub use messages::currency;

// ── Pure evaluation ─────────────────────────────────────────────────

/// Evaluate all rules against `bundle`.
///
/// Total for any input; callers that cannot vouch for the bundle should go
/// through [`RuleEngine::evaluate`], which validates first.
pub fn evaluate(bundle: &MetricsBundle, thresholds: &RuleThresholds) -> Vec<Alert> {
    RuleId::ALL
        .into_iter()
        .filter(|&rule| conditions::fires(rule, bundle, thresholds))
        .map(|rule| {
            let message = messages::diagnosis(rule, bundle, thresholds);
            debug!(rule = %rule, severity = %rule.severity(), %message, "rule fired");
            Alert::new(rule, message)
        })
        .collect()
}

// ── Evidence ────────────────────────────────────────────────────────

/// Outcome of one rule: what was observed, where the line was, and whether
/// it fired. Renderers use this to draw threshold lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleCheck {
    pub rule: RuleId,
    pub observed: f64,
    pub threshold: f64,
    pub fired: bool,
}

// ── Engine ──────────────────────────────────────────────────────────

/// Rule evaluator bound to a set of thresholds.
///
/// Holds no mutable state; share it freely across threads.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    thresholds: RuleThresholds,
}

impl RuleEngine {
    /// Build an engine, rejecting invalid thresholds.
    pub fn new(thresholds: RuleThresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &RuleThresholds {
        &self.thresholds
    }

    /// Validate `bundle`, then evaluate it.
    pub fn evaluate(&self, bundle: &MetricsBundle) -> Result<Vec<Alert>> {
        bundle.validate()?;
        Ok(evaluate(bundle, &self.thresholds))
    }

    /// Evaluate without validating the bundle.
    pub fn evaluate_unchecked(&self, bundle: &MetricsBundle) -> Vec<Alert> {
        evaluate(bundle, &self.thresholds)
    }

    /// Per-rule observations, in evaluation order.
    pub fn evidence(&self, bundle: &MetricsBundle) -> Vec<RuleCheck> {
        RuleId::ALL
            .into_iter()
            .map(|rule| {
                let (observed, threshold) = conditions::observation(rule, bundle, &self.thresholds);
                RuleCheck {
                    rule,
                    observed,
                    threshold,
                    fired: conditions::fires(rule, bundle, &self.thresholds),
                }
            })
            .collect()
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::RuleError;
    use adpulse_core::{BundleError, Severity, Tier};

    fn nominal() -> MetricsBundle {
        MetricsBundle {
            spend_last_4h: 4000.0,
            conversions_last_4h: 3,
            daily_spend: 40000.0,
            daily_budget: 50000.0,
            current_cpm: 100.0,
            average_cpm: 100.0,
            current_ctr: 2.0,
            average_ctr: 2.0,
        }
    }

    fn rules_of(alerts: &[Alert]) -> Vec<RuleId> {
        alerts.iter().map(|a| a.rule).collect()
    }

    fn run(bundle: MetricsBundle) -> Vec<Alert> {
        evaluate(&bundle, &RuleThresholds::default())
    }

    // ── Reference scenarios ─────────────────────────────────────────

    #[test]
    fn zero_conversions_fires_rule_a_only() {
        let alerts = run(MetricsBundle {
            spend_last_4h: 6000.0,
            conversions_last_4h: 0,
            ..nominal()
        });
        assert_eq!(rules_of(&alerts), vec![RuleId::A]);
        assert_eq!(alerts[0].severity, Severity::Critical);
        assert_eq!(alerts[0].tier, Tier::KillSwitch);
        assert_eq!(
            alerts[0].message,
            "ZERO conversions in last 4h despite spending ₹6,000.00. Possible broken pixel."
        );
        assert_eq!(alerts[0].action, "Check Landing Page / Pixel");
    }

    #[test]
    fn overspend_fires_rule_b_only() {
        let alerts = run(MetricsBundle {
            daily_spend: 61000.0,
            ..nominal()
        });
        assert_eq!(rules_of(&alerts), vec![RuleId::B]);
        assert_eq!(
            alerts[0].message,
            "Daily spend ₹61,000.00 exceeded budget limit (₹50,000.00) by >20%."
        );
        assert_eq!(alerts[0].action, "Pause Campaign / Check Bids");
    }

    #[test]
    fn cpm_spike_fires_rule_c_only() {
        let alerts = run(MetricsBundle {
            current_cpm: 160.0,
            ..nominal()
        });
        assert_eq!(rules_of(&alerts), vec![RuleId::C]);
        assert_eq!(alerts[0].severity, Severity::High);
        assert_eq!(alerts[0].tier, Tier::TrendWatch);
    }

    #[test]
    fn ctr_drop_fires_rule_d_only() {
        let alerts = run(MetricsBundle {
            current_ctr: 0.9,
            ..nominal()
        });
        assert_eq!(rules_of(&alerts), vec![RuleId::D]);
        assert_eq!(alerts[0].severity, Severity::Medium);
        assert_eq!(
            alerts[0].message,
            "Current CTR (0.90%) dropped >50% below average (2.00%)."
        );
    }

    #[test]
    fn nominal_bundle_is_quiet() {
        assert!(run(nominal()).is_empty());
    }

    #[test]
    fn all_four_fire_in_fixed_order() {
        let alerts = run(MetricsBundle {
            spend_last_4h: 9000.0,
            conversions_last_4h: 0,
            daily_spend: 70000.0,
            daily_budget: 50000.0,
            current_cpm: 400.0,
            average_cpm: 100.0,
            current_ctr: 0.1,
            average_ctr: 3.0,
        });
        assert_eq!(
            rules_of(&alerts),
            vec![RuleId::A, RuleId::B, RuleId::C, RuleId::D]
        );
    }

    // ── Boundaries ──────────────────────────────────────────────────

    #[test]
    fn pacing_limit_is_strict() {
        let thresholds = RuleThresholds::default();
        let at_limit = MetricsBundle {
            daily_spend: thresholds.budget_limit(50000.0),
            ..nominal()
        };
        assert!(run(at_limit).is_empty());
    }

    #[test]
    fn spend_floor_is_strict() {
        let alerts = run(MetricsBundle {
            spend_last_4h: 5000.0,
            conversions_last_4h: 0,
            ..nominal()
        });
        assert!(alerts.is_empty());
    }

    #[test]
    fn single_conversion_silences_rule_a() {
        let alerts = run(MetricsBundle {
            spend_last_4h: 1_000_000.0,
            conversions_last_4h: 1,
            ..nominal()
        });
        assert!(alerts.is_empty());
    }

    #[test]
    fn cpm_and_ctr_boundaries_are_strict() {
        assert!(run(MetricsBundle { current_cpm: 150.0, ..nominal() }).is_empty());
        assert!(run(MetricsBundle { current_ctr: 1.0, ..nominal() }).is_empty());
    }

    // ── Degenerate baselines ────────────────────────────────────────

    #[test]
    fn zero_average_cpm_fires_for_any_positive_cpm() {
        let alerts = run(MetricsBundle {
            current_cpm: 0.01,
            average_cpm: 0.0,
            ..nominal()
        });
        assert_eq!(rules_of(&alerts), vec![RuleId::C]);

        let quiet = run(MetricsBundle {
            current_cpm: 0.0,
            average_cpm: 0.0,
            ..nominal()
        });
        assert!(quiet.is_empty());
    }

    #[test]
    fn zero_average_ctr_never_fires() {
        let alerts = run(MetricsBundle {
            current_ctr: 0.0,
            average_ctr: 0.0,
            ..nominal()
        });
        assert!(alerts.is_empty());
    }

    // ── Engine ──────────────────────────────────────────────────────

    #[test]
    fn engine_rejects_invalid_bundle() {
        let engine = RuleEngine::default();
        let bad = MetricsBundle {
            daily_budget: 0.0,
            ..nominal()
        };
        match engine.evaluate(&bad) {
            Err(RuleError::InvalidBundle(BundleError::NonPositiveBudget(_))) => {}
            other => panic!("expected invalid bundle error, got {:?}", other),
        }
        // Engine is unaffected by the rejected call.
        assert!(engine.evaluate(&nominal()).unwrap().is_empty());
    }

    #[test]
    fn engine_rejects_invalid_thresholds() {
        let bad = RuleThresholds {
            cpm_spike_multiplier: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(RuleEngine::new(bad), Err(RuleError::Validation(_))));
    }

    #[test]
    fn custom_thresholds_move_the_lines() {
        let engine = RuleEngine::new(RuleThresholds {
            zero_conversion_spend_floor: 8000.0,
            overspend_tolerance: 0.0,
            ..Default::default()
        })
        .unwrap();
        let alerts = engine
            .evaluate(&MetricsBundle {
                spend_last_4h: 6000.0,
                conversions_last_4h: 0,
                daily_spend: 50001.0,
                ..nominal()
            })
            .unwrap();
        assert_eq!(rules_of(&alerts), vec![RuleId::B]);
        assert!(alerts[0].message.ends_with("by >0%."));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let engine = RuleEngine::default();
        let bundle = MetricsBundle {
            current_cpm: 500.0,
            current_ctr: 0.2,
            ..nominal()
        };
        assert_eq!(
            engine.evaluate(&bundle).unwrap(),
            engine.evaluate(&bundle).unwrap()
        );
    }

    #[test]
    fn evidence_matches_alerts() {
        let engine = RuleEngine::default();
        let bundle = MetricsBundle {
            daily_spend: 61000.0,
            current_ctr: 0.5,
            ..nominal()
        };
        let evidence = engine.evidence(&bundle);
        assert_eq!(evidence.len(), 4);
        assert_eq!(
            evidence.iter().map(|c| c.rule).collect::<Vec<_>>(),
            RuleId::ALL.to_vec()
        );

        let fired: Vec<RuleId> = evidence.iter().filter(|c| c.fired).map(|c| c.rule).collect();
        assert_eq!(fired, rules_of(&engine.evaluate(&bundle).unwrap()));

        let pacing = evidence[1];
        assert_eq!(pacing.observed, 61000.0);
        assert_eq!(pacing.threshold, 60000.0);
    }

    #[test]
    fn concurrent_callers_share_one_engine() {
        let engine = std::sync::Arc::new(RuleEngine::default());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    let bundle = MetricsBundle {
                        current_cpm: 100.0 + i as f64 * 20.0,
                        ..nominal()
                    };
                    engine.evaluate(&bundle).unwrap().len()
                })
            })
            .collect();
        let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        // CPM 160 and above (i >= 3) crosses 150.
        assert_eq!(counts, vec![0, 0, 0, 1, 1, 1, 1, 1]);
    }
}
