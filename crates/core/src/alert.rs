//! Alert types emitted by the rule engine.
//!
//! Tier and severity are fixed per rule; see [`RuleId`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Alert tier. Kill-switch conditions always precede trend conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "Tier 1: Kill Switch")]
    KillSwitch,
    #[serde(rename = "Tier 2: Trend Watch")]
    TrendWatch,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::KillSwitch => write!(f, "Tier 1: Kill Switch"),
            Tier::TrendWatch => write!(f, "Tier 2: Trend Watch"),
        }
    }
}

/// Alert severity, P0 being the most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "Critical (P0)")]
    Critical,
    #[serde(rename = "High (P1)")]
    High,
    #[serde(rename = "Medium (P2)")]
    Medium,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "Critical (P0)"),
            Severity::High => write!(f, "High (P1)"),
            Severity::Medium => write!(f, "Medium (P2)"),
        }
    }
}

/// Stable identifier of each rule. Declaration order is evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RuleId {
    A,
    B,
    C,
    D,
}

impl RuleId {
    /// All rules in evaluation order.
    pub const ALL: [RuleId; 4] = [RuleId::A, RuleId::B, RuleId::C, RuleId::D];

    /// Short condition name, e.g. "Zero Conversions".
    pub fn name(self) -> &'static str {
        match self {
            RuleId::A => "Zero Conversions",
            RuleId::B => "Pacing Breach",
            RuleId::C => "CPM Spike",
            RuleId::D => "CTR Drop",
        }
    }

    /// Display label, e.g. "Rule A (Zero Conversions)".
    pub fn label(self) -> String {
        format!("Rule {self} ({})", self.name())
    }

    pub fn tier(self) -> Tier {
        match self {
            RuleId::A | RuleId::B => Tier::KillSwitch,
            RuleId::C | RuleId::D => Tier::TrendWatch,
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            RuleId::A | RuleId::B => Severity::Critical,
            RuleId::C => Severity::High,
            RuleId::D => Severity::Medium,
        }
    }

    /// Recommended remediation for this rule.
    pub fn action(self) -> &'static str {
        match self {
            RuleId::A => "Check Landing Page / Pixel",
            RuleId::B => "Pause Campaign / Check Bids",
            RuleId::C => "Check Auction Competition",
            RuleId::D => "Check Creative Fatigue",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            RuleId::A => "A",
            RuleId::B => "B",
            RuleId::C => "C",
            RuleId::D => "D",
        };
        f.write_str(letter)
    }
}

impl FromStr for RuleId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(RuleId::A),
            "B" => Ok(RuleId::B),
            "C" => Ok(RuleId::C),
            "D" => Ok(RuleId::D),
            other => Err(format!("unknown rule id: '{}'", other)),
        }
    }
}

/// One triggered rule with its diagnosis and recommended action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub tier: Tier,
    pub rule: RuleId,
    pub severity: Severity,
    /// Diagnosis embedding the values that triggered the rule.
    pub message: String,
    pub action: String,
}

impl Alert {
    /// Build an alert for `rule`, taking tier, severity and action from the rule.
    pub fn new(rule: RuleId, message: impl Into<String>) -> Self {
        Self {
            tier: rule.tier(),
            rule,
            severity: rule.severity(),
            message: message.into(),
            action: rule.action().to_string(),
        }
    }
}
