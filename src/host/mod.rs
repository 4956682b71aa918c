// SPDX-License-Identifier: MIT

//! Typed view of the host application's extension points
//!
//! This module provides:
//! - `Actor`, `Item`, `User` - the documents a hook receives
//! - `PreCreateItemHook` - callback bound to the pre-create-item event
//! - `HookRegistry` - explicit hook registration and dispatch
//! - `Notifier` - warnings shown to the user

pub mod document;
pub mod hook;
pub mod notify;
pub mod registry;

pub use document::{Actor, Item, User};
pub use hook::{HookOutcome, PreCreateItem, PreCreateItemHook};
pub use notify::{LogNotifier, Notifier, RecordingNotifier};
pub use registry::HookRegistry;
