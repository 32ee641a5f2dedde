//! Configuration-driven fetching with staleness protection.
//!
//! A [`Reconciler`] owns the latest configuration for one derived artifact
//! and decides, on every configuration update, whether a refetch is
//! warranted. Fetches are handed back to the caller as tickets; the caller
//! runs them (normally through the task manager) and reports the outcome via
//! [`Reconciler::complete`] with the ticket's generation. Only the single
//! outstanding generation may mutate installed state, so a response that was
//! superseded while in flight can never overwrite a newer one.

use log::{debug, warn};

use super::change::{materially_differs, Material};

pub type Generation = u64;

/// Identity and readiness contract for configurations that drive fetches.
pub trait Reconcilable: Material + Clone {
    /// Identity of the entity the artifact belongs to. When it changes, the
    /// derived state is reset instead of refetched.
    type OwnerId: PartialEq + Clone + std::fmt::Debug;

    fn owner_id(&self) -> Self::OwnerId;

    /// Whether the configuration has enough in it to fetch anything at all.
    fn is_ready(&self) -> bool;
}

/// A fetch the caller must execute. The outcome must be reported back with
/// the same generation.
#[derive(Debug, Clone)]
pub struct FetchTicket<C> {
    pub generation: Generation,
    pub config: C,
}

/// An artifact kept together with the configuration snapshot that produced
/// it, so consumers never see a result paired with a newer configuration.
#[derive(Debug, Clone)]
pub struct Installed<C, A> {
    pub config: C,
    pub artifact: A,
}

/// What [`Reconciler::complete`] did with a reported outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result was current and is now installed.
    Installed,
    /// The fetch failed while still current; derived state was dropped.
    Cleared,
    /// The fetch had been superseded; nothing changed.
    Stale,
}

#[derive(Debug)]
struct PendingFetch<C> {
    generation: Generation,
    config: C,
}

/// Owns the current configuration and the artifact derived from it.
#[derive(Debug)]
pub struct Reconciler<C: Reconcilable, A> {
    config: C,
    generation: Generation,
    pending: Option<PendingFetch<C>>,
    installed: Option<Installed<C, A>>,
    loading: bool,
}

impl<C: Reconcilable, A> Reconciler<C, A> {
    /// Store the initial configuration. No fetch is issued for it.
    pub fn new(config: C) -> Self {
        Self {
            config,
            generation: 0,
            pending: None,
            installed: None,
            loading: false,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn installed(&self) -> Option<&Installed<C, A>> {
        self.installed.as_ref()
    }

    pub fn artifact(&self) -> Option<&A> {
        self.installed.as_ref().map(|i| &i.artifact)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Apply a new configuration version. Returns the fetch the caller must
    /// run, if the change warrants one.
    ///
    /// An owner change resets derived state without fetching. A change that
    /// leaves the material view untouched does nothing. A material change
    /// that fails the readiness predicate cannot fetch, so it supersedes the
    /// outstanding fetch and drops the installed artifact instead.
    pub fn update(&mut self, next: C) -> Option<FetchTicket<C>> {
        if next.owner_id() != self.config.owner_id() {
            debug!("reconciler: owner changed to {:?}, resetting", next.owner_id());
            self.config = next;
            self.reset();
            return None;
        }

        let changed = materially_differs(&self.config, &next);
        self.config = next;
        if !changed {
            return None;
        }

        if !self.config.is_ready() {
            debug!("reconciler: material change cannot fetch, clearing derived state");
            self.pending = None;
            self.loading = false;
            self.installed = None;
            return None;
        }

        self.generation += 1;
        self.loading = true;
        self.pending = Some(PendingFetch {
            generation: self.generation,
            config: self.config.clone(),
        });
        debug!("reconciler: issued fetch {}", self.generation);
        Some(FetchTicket {
            generation: self.generation,
            config: self.config.clone(),
        })
    }

    /// Report a fetch outcome. Outcomes whose generation does not match the
    /// sole outstanding fetch are inert.
    ///
    /// A failure that is still current degrades to "nothing installed"; it
    /// is never retried and never surfaces as an error to the owner.
    pub fn complete(&mut self, generation: Generation, result: Result<A, String>) -> Completion {
        let current = self.pending.as_ref().map(|p| p.generation) == Some(generation);
        if !current {
            debug!("reconciler: discarding superseded completion {}", generation);
            return Completion::Stale;
        }

        let pending = match self.pending.take() {
            Some(pending) => pending,
            None => return Completion::Stale,
        };
        self.loading = false;

        match result {
            Ok(artifact) => {
                self.installed = Some(Installed {
                    config: pending.config,
                    artifact,
                });
                debug!("reconciler: installed result of fetch {}", generation);
                Completion::Installed
            }
            Err(err) => {
                warn!("reconciler: fetch {} failed: {}", generation, err);
                self.installed = None;
                Completion::Cleared
            }
        }
    }

    /// Drop derived state and the outstanding fetch without touching the
    /// configuration. Generations are never reused, so completions issued
    /// before a reset stay inert afterwards.
    pub fn reset(&mut self) {
        self.pending = None;
        self.loading = false;
        self.installed = None;
    }
}
