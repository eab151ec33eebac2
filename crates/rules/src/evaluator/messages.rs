//! Diagnosis text for each rule.

use adpulse_core::{MetricsBundle, RuleId};

use crate::thresholds::RuleThresholds;

pub(crate) const CURRENCY: &str = "₹";

/// Diagnosis message for a fired rule, embedding the compared values.
pub(super) fn diagnosis(
    rule: RuleId,
    bundle: &MetricsBundle,
    thresholds: &RuleThresholds,
) -> String {
    match rule {
        RuleId::A => format!(
            "ZERO conversions in last 4h despite spending {}. Possible broken pixel.",
            currency(bundle.spend_last_4h)
        ),
        RuleId::B => format!(
            "Daily spend {} exceeded budget limit ({}) by >{}%.",
            currency(bundle.daily_spend),
            currency(bundle.daily_budget),
            percent(thresholds.overspend_tolerance * 100.0)
        ),
        RuleId::C => format!(
            "Current CPM ({CURRENCY}{:.2}) is >{}% above average ({CURRENCY}{:.2}).",
            bundle.current_cpm,
            percent((thresholds.cpm_spike_multiplier - 1.0) * 100.0),
            bundle.average_cpm
        ),
        RuleId::D => format!(
            "Current CTR ({:.2}%) dropped >{}% below average ({:.2}%).",
            bundle.current_ctr,
            percent((1.0 - thresholds.ctr_drop_multiplier) * 100.0),
            bundle.average_ctr
        ),
    }
}

/// Currency with thousands separators and two decimals, e.g. `₹9,600.00`.
pub fn currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{CURRENCY}{grouped}.{frac_part}")
}

/// Percentage without trailing zeros: `20`, `12.5`.
fn percent(value: f64) -> String {
    let rounded = format!("{:.2}", value);
    rounded
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(currency(9600.0), "₹9,600.00");
        assert_eq!(currency(1_234_567.891), "₹1,234,567.89");
        assert_eq!(currency(999.5), "₹999.50");
        assert_eq!(currency(0.0), "₹0.00");
        assert_eq!(currency(100_000.0), "₹100,000.00");
    }

    #[test]
    fn percent_trims_zeros() {
        assert_eq!(percent(20.000000000000004), "20");
        assert_eq!(percent(12.5), "12.5");
        assert_eq!(percent(50.0), "50");
    }

    #[test]
    fn cost_spike_message_embeds_both_values() {
        let bundle = MetricsBundle {
            spend_last_4h: 0.0,
            conversions_last_4h: 1,
            daily_spend: 0.0,
            daily_budget: 1.0,
            current_cpm: 160.0,
            average_cpm: 100.0,
            current_ctr: 2.0,
            average_ctr: 2.0,
        };
        let msg = diagnosis(RuleId::C, &bundle, &RuleThresholds::default());
        assert_eq!(msg, "Current CPM (₹160.00) is >50% above average (₹100.00).");
    }
}
