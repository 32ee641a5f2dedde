//! Core UI functionality for launchdeck.
//!
//! This module contains the building blocks the components are assembled
//! from: the action and event plumbing, the background task manager, and the
//! two lifecycle state machines the whole application hangs off.
//!
//! # Module Components
//!
//! - [`actions`] - Action definitions routed through the component tree
//! - [`change`] - Structural change detection over material fields
//! - [`component`] - Base component trait for key handling and rendering
//! - [`composer`] - Gated composition of child views behind async preconditions
//! - [`event_handler`] - Terminal event polling with tick cadence
//! - [`notifier`] - Listener registries with guard-based unsubscription
//! - [`reconciler`] - Configuration-driven fetching with staleness protection
//! - [`task_manager`] - Background task ownership and completion delivery
//!
//! # Architecture
//!
//! All component logic runs synchronously on the event loop. Asynchronous
//! work (backend calls) is described by tickets, executed by the
//! [`TaskManager`], and reported back as [`Action`]s carrying the generation
//! of the request that produced them. The reconciler and composer check that
//! generation before mutating any visible state, which is what keeps late
//! responses from overwriting newer ones.

pub mod actions;
pub mod change;
pub mod component;
pub mod composer;
pub mod event_handler;
pub mod notifier;
pub mod reconciler;
pub mod task_manager;

pub use actions::{Action, MainView};
pub use component::Component;
pub use event_handler::{EventHandler, EventType};
pub use task_manager::{TaskId, TaskManager};
