// SPDX-License-Identifier: MIT

use serde_json::Value;

use super::compare::display_value;
use super::rule::Rule;

/// Human-readable description of a rule, used in the failure warning.
///
/// A truthy label wins; otherwise `"<path> <op> <value>"`, each field shown
/// as written, with `unknown` standing in for a missing path and `?` for a
/// missing operator or value.
pub fn describe(rule: &Rule) -> String {
    if let Some(label) = rule.label() {
        return label;
    }
    let path = shown(rule.path.as_ref(), "unknown");
    let op = shown(rule.op.as_ref(), "?");
    let value = shown(rule.expected(), "?");
    format!("{} {} {}", path, op, value)
}

fn shown(field: Option<&Value>, fallback: &str) -> String {
    field
        .filter(|v| !v.is_null())
        .map_or_else(|| fallback.to_string(), display_value)
}

/// The aggregated warning shown when a creation is blocked
pub fn failure_message(actor: &str, item: &str, failures: &[String]) -> String {
    format!(
        "{} does not meet prerequisites for {}: {}",
        actor,
        item,
        failures.join(", ")
    )
}
