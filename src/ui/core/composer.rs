//! Gated composition of a child view behind an asynchronous precondition.
//!
//! A [`GatedComposer`] owns at most one child view. Navigation names a gate
//! key (the saved filter the child depends on); until the gate resolves the
//! composer suspends child construction and forwards nothing. The sentinel
//! key [`FILTER_KEY_ALL`] needs no gate and activates synchronously. A stale
//! child is always disposed before its replacement is built, and teardown
//! runs in a fixed order: listeners first, then the child, then the owning
//! container's content, then the remaining bindings.

use log::{debug, info, warn};

use super::notifier::{Notifier, Subscription};
use super::reconciler::Generation;
use crate::constants::FILTER_KEY_ALL;

/// Where the remaining navigation state is routed once the gate is open.
pub trait ChildView {
    fn forward(&mut self, path: &[String], query: Option<&str>);

    /// Release everything the view holds. Called at most once, always
    /// before any replacement view is constructed.
    fn dispose(&mut self);
}

/// Constructs child views on demand, one per successful gate. The key a
/// child is built for stays fixed for its whole lifetime; a different key
/// always means a fresh child.
pub trait ChildBuilder {
    type View: ChildView;

    fn build(&mut self, key: &str) -> Self::View;
}

/// Owner-provided surface the composer clears as the third teardown step.
pub trait Container {
    fn clear(&mut self);
}

/// Navigation state addressed to the composer: the gate key plus whatever
/// remains of the route below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavTarget {
    pub key: String,
    pub path: Vec<String>,
    pub query: Option<String>,
}

impl NavTarget {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            path: Vec::new(),
            query: None,
        }
    }

    pub fn with_path(mut self, path: Vec<String>) -> Self {
        self.path = path;
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

/// A gate the caller must run. The outcome must be reported back through
/// [`GatedComposer::gate_complete`] with the same generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateTicket {
    pub generation: Generation,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Uninitialized,
    /// Gate outcome pending for this key; nothing is forwarded yet.
    Activating { key: String },
    /// Gate satisfied; forwards flow to the child.
    Active { key: String },
    /// Torn down. Every input is ignored from here on.
    Destroyed,
}

/// Owns a gated child view and the listener registrations around it.
pub struct GatedComposer<B: ChildBuilder, C: Container> {
    state: GateState,
    generation: Generation,
    builder: B,
    container: C,
    child: Option<B::View>,
    nav: Option<NavTarget>,
    last_forwarded: Option<NavTarget>,
    fallback_key: String,
    child_level: Option<usize>,
    removals: Option<Subscription<String>>,
    levels: Option<Subscription<usize>>,
}

impl<B: ChildBuilder, C: Container> GatedComposer<B, C> {
    pub fn new(builder: B, container: C, fallback_key: impl Into<String>) -> Self {
        Self {
            state: GateState::Uninitialized,
            generation: 0,
            builder,
            container,
            child: None,
            nav: None,
            last_forwarded: None,
            fallback_key: fallback_key.into(),
            child_level: None,
            removals: None,
            levels: None,
        }
    }

    /// Listen for external removal of gate keys. Released on destroy.
    pub fn watch_removals(&mut self, notifier: &Notifier<String>) {
        self.removals = Some(notifier.subscribe());
    }

    /// Listen for level changes bubbled by the child. Released on destroy.
    pub fn watch_levels(&mut self, notifier: &Notifier<usize>) {
        self.levels = Some(notifier.subscribe());
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn active_key(&self) -> Option<&str> {
        match &self.state {
            GateState::Active { key } => Some(key),
            _ => None,
        }
    }

    pub fn is_activating(&self) -> bool {
        matches!(self.state, GateState::Activating { .. })
    }

    pub fn child(&self) -> Option<&B::View> {
        self.child.as_ref()
    }

    pub fn child_mut(&mut self) -> Option<&mut B::View> {
        self.child.as_mut()
    }

    pub fn child_level(&self) -> Option<usize> {
        self.child_level
    }

    pub fn nav(&self) -> Option<&NavTarget> {
        self.nav.as_ref()
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    /// Apply a navigation change; the most recent navigation always wins.
    /// The returned gate, if any, must be run and reported back via
    /// [`gate_complete`](Self::gate_complete).
    pub fn navigate(&mut self, target: NavTarget) -> Option<GateTicket> {
        if self.state == GateState::Destroyed {
            return None;
        }

        let same_key = match &self.state {
            GateState::Activating { key } | GateState::Active { key } => *key == target.key,
            _ => false,
        };

        if same_key {
            let active = matches!(self.state, GateState::Active { .. });
            self.nav = Some(target);
            if active {
                self.forward_if_needed();
            }
            return None;
        }

        // Key change: the stale child goes away before anything replaces it.
        self.dispose_child();
        self.nav = Some(target.clone());

        if target.key == FILTER_KEY_ALL {
            // No selection required, no suspension.
            debug!("composer: '{}' needs no gate, going active", target.key);
            self.state = GateState::Active { key: target.key };
            self.forward_if_needed();
            return None;
        }

        self.generation += 1;
        info!("composer: gating on filter '{}' (gate {})", target.key, self.generation);
        self.state = GateState::Activating {
            key: target.key.clone(),
        };
        Some(GateTicket {
            generation: self.generation,
            key: target.key,
        })
    }

    /// Report a gate outcome. Outcomes for superseded gates are inert, as is
    /// any outcome arriving after the composer left the activating state.
    /// On success the child is built (if absent) and the most recent
    /// navigation is forwarded exactly once. A failure parks the composer:
    /// it stays activating and forwards nothing.
    ///
    /// Returns whether the gate actually opened, so owners can tell a real
    /// activation from an inert or failed completion.
    pub fn gate_complete(&mut self, generation: Generation, outcome: Result<(), String>) -> bool {
        if self.state == GateState::Destroyed {
            return false;
        }
        if generation != self.generation {
            debug!("composer: ignoring superseded gate {}", generation);
            return false;
        }
        let key = match &self.state {
            GateState::Activating { key } => key.clone(),
            _ => return false,
        };
        match outcome {
            Ok(()) => {
                info!("composer: filter '{}' active", key);
                self.state = GateState::Active { key };
                self.forward_if_needed();
                true
            }
            Err(err) => {
                warn!("composer: activation of '{}' failed: {}", key, err);
                false
            }
        }
    }

    /// Drain subscribed events. Returned gates must be run exactly like
    /// those returned from [`navigate`](Self::navigate).
    ///
    /// Level events are applied before removals so a level reported by a
    /// child the same removal is about to dispose does not outlive it.
    pub fn pump(&mut self) -> Vec<GateTicket> {
        if self.state == GateState::Destroyed {
            return Vec::new();
        }

        let levels: Vec<usize> = match self.levels.as_mut() {
            Some(subscription) => subscription.drain(),
            None => Vec::new(),
        };
        if let Some(level) = levels.into_iter().last() {
            self.child_level = Some(level);
        }

        let removed: Vec<String> = match self.removals.as_mut() {
            Some(subscription) => subscription.drain(),
            None => Vec::new(),
        };
        let mut tickets = Vec::new();
        for key in removed {
            if let Some(ticket) = self.key_removed(&key) {
                tickets.push(ticket);
            }
        }

        tickets
    }

    /// External removal of the key this composer is on, active or still
    /// activating, falls back to the configured key. The route below the
    /// key does not survive the fallback.
    fn key_removed(&mut self, removed: &str) -> Option<GateTicket> {
        let affected = match &self.state {
            GateState::Activating { key } | GateState::Active { key } => key == removed,
            _ => false,
        };
        if !affected {
            return None;
        }

        let fallback = if self.fallback_key == removed {
            // The fallback itself disappeared; the sentinel always exists.
            FILTER_KEY_ALL.to_string()
        } else {
            self.fallback_key.clone()
        };
        info!("composer: filter '{}' removed, falling back to '{}'", removed, fallback);
        self.navigate(NavTarget::new(fallback))
    }

    fn forward_if_needed(&mut self) {
        let nav = match self.nav.clone() {
            Some(nav) => nav,
            None => return,
        };
        if self.last_forwarded.as_ref() == Some(&nav) {
            return;
        }
        if self.child.is_none() {
            self.child = Some(self.builder.build(&nav.key));
        }
        if let Some(child) = self.child.as_mut() {
            child.forward(&nav.path, nav.query.as_deref());
        }
        self.last_forwarded = Some(nav);
    }

    fn dispose_child(&mut self) {
        if let Some(mut child) = self.child.take() {
            child.dispose();
        }
        self.last_forwarded = None;
        self.child_level = None;
    }

    /// Tear down in order: listeners, then the child, then the container's
    /// content, then the remaining bindings. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.state == GateState::Destroyed {
            return;
        }
        if let Some(subscription) = self.removals.take() {
            subscription.guard.release();
        }
        if let Some(subscription) = self.levels.take() {
            subscription.guard.release();
        }
        self.dispose_child();
        self.container.clear();
        self.nav = None;
        self.last_forwarded = None;
        self.state = GateState::Destroyed;
        debug!("composer: destroyed");
    }
}

impl<B: ChildBuilder, C: Container> Drop for GatedComposer<B, C> {
    fn drop(&mut self) {
        // Teardown net for owners that never called destroy explicitly.
        self.destroy();
    }
}
