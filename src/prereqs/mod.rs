// SPDX-License-Identifier: MIT

//! Prerequisite checks for items created on actors
//!
//! Items carry rules like `{path: "system.abilities.cha.value", op: ">=", value: 13}`
//! under `flags.theia.prereqs`. `PrereqGate` checks them when the item is
//! about to be created on an actor and blocks the creation if any fails.

pub mod compare;
pub mod config;
pub mod format;
pub mod gate;
pub mod loader;
pub mod path;
pub mod rule;

pub use compare::{check, compare, CompareOp, Operand};
pub use config::PrereqConfig;
pub use format::describe;
pub use gate::{GateReport, PrereqGate, SkipReason};
pub use loader::DocumentLoader;
pub use path::{resolve, FieldPath, PathError};
pub use rule::{rule_schema, rules_from_value, Rule, RuleIssue, RuleSpec};
