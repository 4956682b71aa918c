// SPDX-License-Identifier: MIT

use super::hook::{HookOutcome, PreCreateItem, PreCreateItemHook};
use super::notify::Notifier;
use std::sync::{Arc, PoisonError, RwLock};

/// Hooks bound to the pre-create-item extension point, in registration order.
///
/// Clones share the same hook list.
#[derive(Clone)]
pub struct HookRegistry {
    hooks: Arc<RwLock<Vec<Arc<dyn PreCreateItemHook>>>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self {
            hooks: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a hook. A hook with the same name is replaced in place.
    pub fn register(&self, hook: Arc<dyn PreCreateItemHook>) {
        let mut hooks = self.hooks.write().unwrap_or_else(PoisonError::into_inner);
        match hooks.iter().position(|h| h.name() == hook.name()) {
            Some(idx) => hooks[idx] = hook,
            None => hooks.push(hook),
        }
    }

    /// Remove a hook by name, returning whether it was registered
    pub fn unregister(&self, name: &str) -> bool {
        let mut hooks = self.hooks.write().unwrap_or_else(PoisonError::into_inner);
        let before = hooks.len();
        hooks.retain(|h| h.name() != name);
        hooks.len() != before
    }

    pub fn len(&self) -> usize {
        self.hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run hooks in order; the first veto stops the chain and cancels the creation
    pub fn fire_pre_create_item(
        &self,
        event: &PreCreateItem<'_>,
        notifier: &dyn Notifier,
    ) -> HookOutcome {
        // Snapshot so a hook may touch the registry without deadlocking
        let hooks: Vec<Arc<dyn PreCreateItemHook>> = self
            .hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        for hook in hooks {
            if hook.on_pre_create_item(event, notifier).is_veto() {
                log::debug!("Item creation vetoed by hook '{}'", hook.name());
                return HookOutcome::Veto;
            }
        }
        HookOutcome::Proceed
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
