// SPDX-License-Identifier: MIT

use serde_json::Value;

use super::document::{Item, User};
use super::notify::Notifier;

/// Arguments of the host's pre-create-item lifecycle event
#[derive(Debug, Clone, Copy)]
pub struct PreCreateItem<'a> {
    /// The item about to be created (its parent is the target actor)
    pub item: &'a Item,
    /// Creation payload supplied by the caller
    pub data: &'a Value,
    /// Creation options
    pub options: &'a Value,
    /// The acting user
    pub user: &'a User,
}

/// What the host should do with the pending creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    Proceed,
    Veto,
}

impl HookOutcome {
    pub fn is_veto(self) -> bool {
        matches!(self, HookOutcome::Veto)
    }
}

/// Trait for callbacks bound to the pre-create-item extension point.
///
/// Hooks run synchronously on the host's thread and may only read the
/// documents they are given; user-facing output goes through the notifier.
pub trait PreCreateItemHook: Send + Sync {
    /// Returns the hook name (must be unique within a registry)
    fn name(&self) -> &str;

    /// Inspect the pending creation and decide whether it may proceed
    fn on_pre_create_item(
        &self,
        event: &PreCreateItem<'_>,
        notifier: &dyn Notifier,
    ) -> HookOutcome;
}
