//! Cooperative timer loop driving periodic tasks.
//!
//! Each task runs on its own tokio timer: a tick fully awaits the task body
//! before the next tick of that task is scheduled, so two invocations of
//! the same task never run in parallel. Different tasks interleave freely.
//! A failing tick is logged and the loop continues; scheduling failures are
//! never fatal to the process.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use crate::error::Result;

/// A unit of periodic work. Implementations are driven by the
/// [`Scheduler`] in production and directly by tests.
#[async_trait]
pub trait PeriodicTask: Send + Sync + 'static {
    fn name(&self) -> &'static str;
    async fn tick(&self) -> Result<()>;
}

struct ScheduledTask {
    task: Arc<dyn PeriodicTask>,
    every: Duration,
}

/// Drives registered tasks on independent, cancellable timer loops.
pub struct Scheduler {
    tasks: Vec<ScheduledTask>,
    handles: RwLock<Vec<JoinHandle<()>>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            handles: RwLock::new(Vec::new()),
        }
    }

    pub fn add(&mut self, task: Arc<dyn PeriodicTask>, every: Duration) {
        self.tasks.push(ScheduledTask { task, every });
    }

    /// Spawn one loop per task. The first tick fires immediately, then
    /// every `every` after the prior invocation completed.
    pub async fn start(&self) {
        let mut handles = self.handles.write().await;
        for scheduled in &self.tasks {
            let task = scheduled.task.clone();
            let every = scheduled.every;

            info!(task = task.name(), interval_secs = every.as_secs(), "scheduling task");

            let handle = tokio::spawn(async move {
                let mut ticker = interval(every);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    if let Err(e) = task.tick().await {
                        error!(task = task.name(), error = %e, "scheduled tick failed");
                    }
                }
            });
            handles.push(handle);
        }
    }

    /// Cancel all task loops.
    pub async fn stop(&self) {
        let mut handles = self.handles.write().await;
        for handle in handles.drain(..) {
            handle.abort();
        }
        info!("scheduler stopped");
    }

    pub async fn is_running(&self) -> bool {
        !self.handles.read().await.is_empty()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
