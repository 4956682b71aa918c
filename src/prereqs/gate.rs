// SPDX-License-Identifier: MIT

//! The pre-create-item gate
//!
//! One synchronous pass over the item's rules: every rule is checked against
//! the parent actor and the creation is vetoed with a single warning when any
//! of them fails. Missing data never lets a rule pass.

use serde_json::Value;

use super::compare;
use super::config::PrereqConfig;
use super::format::{describe, failure_message};
use super::path::FieldPath;
use super::rule::{rules_from_value, Rule};
use crate::host::document::flag_in;
use crate::host::{Actor, HookOutcome, Notifier, PreCreateItem, PreCreateItemHook};

const FALLBACK_ACTOR_NAME: &str = "Actor";
const FALLBACK_ITEM_NAME: &str = "Item";

/// Why the gate did not look at any rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Item is not being created on an actor
    NoParent,
    /// Acting user is a GM and GMs are exempt
    GmBypass,
    /// No rule array, or an empty one
    NoRules,
    /// Rule flag holds something other than an array
    NotAnArray,
}

/// Outcome of evaluating one creation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateReport {
    Skipped(SkipReason),
    Passed {
        checked: usize,
    },
    Failed {
        actor: String,
        item: String,
        /// Descriptions of the failed rules, in rule order
        failures: Vec<String>,
    },
}

impl GateReport {
    pub fn allows_creation(&self) -> bool {
        !matches!(self, GateReport::Failed { .. })
    }

    /// The warning to show, if the creation is blocked
    pub fn message(&self) -> Option<String> {
        match self {
            GateReport::Failed {
                actor,
                item,
                failures,
            } => Some(failure_message(actor, item, failures)),
            _ => None,
        }
    }
}

/// Prerequisite hook for the pre-create-item event
#[derive(Debug, Clone, Default)]
pub struct PrereqGate {
    config: PrereqConfig,
}

impl PrereqGate {
    pub const NAME: &'static str = "theia-prereqs";

    pub fn new(config: PrereqConfig) -> Self {
        Self { config }
    }

    /// Evaluate a creation attempt without notifying anyone
    pub fn evaluate(&self, event: &PreCreateItem<'_>) -> GateReport {
        let Some(actor) = event.item.parent() else {
            return GateReport::Skipped(SkipReason::NoParent);
        };

        if event.user.is_gm && !self.config.enforce_for_gm {
            log::debug!("Skipping prerequisites for GM user {}", event.user.id);
            return GateReport::Skipped(SkipReason::GmBypass);
        }

        let Some(raw) = self.rule_source(event) else {
            return GateReport::Skipped(SkipReason::NoRules);
        };
        let Some(rules) = rules_from_value(raw) else {
            log::warn!(
                "Ignoring flags.{}.{}: expected an array of rules",
                self.config.flag_scope,
                self.config.flag_key
            );
            return GateReport::Skipped(SkipReason::NotAnArray);
        };
        if rules.is_empty() {
            return GateReport::Skipped(SkipReason::NoRules);
        }

        let failures = check_rules(actor, &rules);
        if failures.is_empty() {
            return GateReport::Passed {
                checked: rules.len(),
            };
        }

        GateReport::Failed {
            actor: actor.name().unwrap_or(FALLBACK_ACTOR_NAME).to_string(),
            item: item_name(event).to_string(),
            failures,
        }
    }

    /// Payload rules take precedence over the item's stored rules
    fn rule_source<'a>(&self, event: &PreCreateItem<'a>) -> Option<&'a Value> {
        let (scope, key) = (&self.config.flag_scope, &self.config.flag_key);
        flag_in(event.data, scope, key).or_else(|| event.item.flag(scope, key))
    }
}

impl PreCreateItemHook for PrereqGate {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn on_pre_create_item(
        &self,
        event: &PreCreateItem<'_>,
        notifier: &dyn Notifier,
    ) -> HookOutcome {
        let report = self.evaluate(event);
        match report.message() {
            Some(message) => {
                log::warn!("Blocked item creation: {}", message);
                notifier.warn(&message);
                HookOutcome::Veto
            }
            None => HookOutcome::Proceed,
        }
    }
}

/// Check every rule against the actor and describe the ones that fail
pub fn check_rules(actor: &Actor, rules: &[Rule]) -> Vec<String> {
    rules
        .iter()
        .filter(|rule| !rule_passes(actor, rule))
        .map(describe)
        .collect()
}

/// Whether a single rule holds. Malformed rules and absent data fail.
pub fn rule_passes(actor: &Actor, rule: &Rule) -> bool {
    let (Some(path), Some(op)) = (rule.path(), rule.op()) else {
        log::debug!("Rule {:?} is missing its path or operator", rule);
        return false;
    };

    let path = match FieldPath::parse(path) {
        Ok(path) => path,
        Err(e) => {
            log::debug!("Rule path rejected: {}", e);
            return false;
        }
    };

    let Some(actual) = path.resolve(actor.data()) else {
        log::debug!("No value at {} on actor", path);
        return false;
    };

    let passed = compare::check(&actual, op, rule.value.as_ref());
    log::debug!("{} {} {:?} (actual {}): {}", path, op, rule.value, actual, passed);
    passed
}

fn item_name<'a>(event: &PreCreateItem<'a>) -> &'a str {
    event
        .data
        .get("name")
        .and_then(Value::as_str)
        .or_else(|| event.item.name())
        .unwrap_or(FALLBACK_ITEM_NAME)
}
