//! Background task ownership for backend calls.
//!
//! Every asynchronous backend operation runs as a spawned task that reports
//! its outcome as an [`Action`] on the shared channel; nothing awaits inside
//! component code. The manager keeps the join handles so superseded or
//! abandoned work can be aborted wholesale on shutdown. Note that aborting
//! is not part of the staleness story: late completions are discarded by the
//! generation checks in the reconciler and composer, not by cancellation.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::debug;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::actions::Action;
use super::composer::GateTicket;
use super::reconciler::FetchTicket;
use crate::backend::ReportBackend;
use crate::widgets::PreviewConfig;

pub type TaskId = u64;

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub handle: JoinHandle<()>,
    pub description: String,
    pub started_at: DateTime<Utc>,
}

pub struct TaskManager {
    tasks: HashMap<TaskId, BackgroundTask>,
    next_task_id: TaskId,
    action_sender: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                tasks: HashMap::new(),
                next_task_id: 1,
                action_sender: tx,
            },
            rx,
        )
    }

    fn spawn<F>(&mut self, description: String, future: F) -> TaskId
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        let task = BackgroundTask {
            id: task_id,
            handle: tokio::spawn(future),
            description,
            started_at: Utc::now(),
        };
        self.tasks.insert(task_id, task);
        task_id
    }

    /// Load the saved filters for the sidebar.
    pub fn spawn_load_filters(&mut self, backend: Arc<dyn ReportBackend>) -> TaskId {
        let sender = self.action_sender.clone();
        self.spawn("Loading saved filters".to_string(), async move {
            let action = match backend.fetch_filters().await {
                Ok(filters) => Action::FiltersLoaded(filters),
                Err(e) => Action::FiltersLoadFailed(e.to_string()),
            };
            let _ = sender.send(action);
        })
    }

    /// Run a gate ticket returned by the launches page. The completion
    /// carries the ticket's generation so stale gates stay inert.
    pub fn spawn_activate_filter(&mut self, backend: Arc<dyn ReportBackend>, ticket: GateTicket) -> TaskId {
        let sender = self.action_sender.clone();
        let description = format!("Activating filter '{}'", ticket.key);
        self.spawn(description, async move {
            let outcome = backend
                .activate_filter(&ticket.key)
                .await
                .map_err(|e| e.to_string());
            let _ = sender.send(Action::FilterActivated {
                generation: ticket.generation,
                key: ticket.key,
                outcome,
            });
        })
    }

    /// Run a fetch ticket returned by the preview reconciler.
    pub fn spawn_fetch_preview(&mut self, backend: Arc<dyn ReportBackend>, ticket: FetchTicket<PreviewConfig>) -> TaskId {
        let sender = self.action_sender.clone();
        let generation = ticket.generation;
        let description = format!("Fetching widget preview (request {})", generation);
        self.spawn(description, async move {
            // Readiness gating upstream guarantees a template; a ticket
            // without one can only fail, which degrades to an empty preview.
            let result = match ticket.config.template_id.as_deref() {
                Some(template_id) => backend
                    .fetch_widget_preview(template_id, &ticket.config.settings)
                    .await
                    .map_err(|e| e.to_string()),
                None => Err("no widget template selected".to_string()),
            };
            let _ = sender.send(Action::PreviewFetched { generation, result });
        })
    }

    /// Load the launch rows for one route of the launches body.
    pub fn spawn_load_launches(&mut self, backend: Arc<dyn ReportBackend>, key: String, path: Vec<String>) -> TaskId {
        let sender = self.action_sender.clone();
        let description = if path.is_empty() {
            format!("Loading launches for '{}'", key)
        } else {
            format!("Loading launches for '{}' under {}", key, path.join("/"))
        };
        self.spawn(description, async move {
            let result = backend
                .fetch_launches(&key, &path)
                .await
                .map_err(|e| e.to_string());
            let _ = sender.send(Action::LaunchesLoaded { key, path, result });
        })
    }

    /// Delete a saved filter on the server.
    pub fn spawn_delete_filter(&mut self, backend: Arc<dyn ReportBackend>, filter_id: String) -> TaskId {
        let sender = self.action_sender.clone();
        let description = format!("Deleting filter '{}'", filter_id);
        self.spawn(description, async move {
            let result = backend
                .delete_filter(&filter_id)
                .await
                .map_err(|e| e.to_string());
            let _ = sender.send(Action::FilterDeleted { id: filter_id, result });
        })
    }

    /// Drop the records of tasks that have finished. Their outcomes already
    /// arrived through the action channel.
    pub fn cleanup_finished_tasks(&mut self) -> Vec<TaskId> {
        let finished: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.handle.is_finished())
            .map(|(id, _)| *id)
            .collect();

        for task_id in &finished {
            if let Some(task) = self.tasks.remove(task_id) {
                let elapsed = Utc::now().signed_duration_since(task.started_at);
                debug!(
                    "task {} done after {}ms: {}",
                    task.id,
                    elapsed.num_milliseconds(),
                    task.description
                );
            }
        }

        finished
    }

    /// Abort everything still running.
    pub fn cancel_all_tasks(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }

    /// Number of tasks spawned and not yet cleaned up.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.cancel_all_tasks();
    }
}
