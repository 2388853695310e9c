// src/report.rs

//! Plain-text status display driven by periodic snapshots.

use std::fmt::Write as _;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::engine::PoolHandle;
use crate::scheduler::Snapshot;

/// Render a snapshot as a block of text, one line per worker.
///
/// ```text
/// workers: 2 (1 busy)  tasks: 3 (1 running, 2 waiting)
///   Worker 1    00:07       Task 1
///   Worker 2    waiting...
/// ```
pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "workers: {} ({} busy)  tasks: {} ({} running, {} waiting)",
        snapshot.workers.len(),
        snapshot.busy_workers(),
        snapshot.tasks.len(),
        snapshot.running_tasks(),
        snapshot.waiting_tasks(),
    );

    for worker in &snapshot.workers {
        let task_name = worker
            .task
            .and_then(|id| snapshot.task(id))
            .map(|t| t.name.as_str())
            .unwrap_or("");
        let line = format!(
            "  {:<10}  {:<10}  {}",
            worker.name, worker.display_text, task_name
        );
        out.push('\n');
        out.push_str(line.trim_end());
    }

    out
}

/// Poll snapshots every `refresh` and print the rendering when it changes.
///
/// Stops once the runtime is gone.
pub fn spawn_reporter(handle: PoolHandle, refresh: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_rendered = String::new();

        loop {
            interval.tick().await;

            let snapshot = match handle.snapshot().await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    debug!(error = %e, "status reporter stopping");
                    break;
                }
            };

            let rendered = render(&snapshot);
            if rendered != last_rendered {
                println!("{rendered}");
                last_rendered = rendered;
            }
        }
    })
}
