// src/lib.rs

pub mod cli;
pub mod clock;
pub mod config;
pub mod console;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod pool;
pub mod report;
pub mod scheduler;
pub mod types;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::clock::{Clock, SystemClock};
use crate::config::{load_or_default, ConfigFile, PoolSettings};
use crate::engine::{CoreRuntime, PoolHandle, Runtime, RuntimeOptions};
use crate::errors::WorkpoolError;
use crate::pool::MAX_ENQUEUE_BATCH;
use crate::scheduler::Scheduler;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (+ CLI overrides)
/// - scheduler seeded with the initial workers and tasks
/// - the runtime that owns the scheduler and drives the tick
/// - the status reporter and the stdin console
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_or_default(args.config.as_deref().map(Path::new))?;
    let cfg = apply_cli_overrides(cfg, &args)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mut scheduler = Scheduler::new(cfg.scheduler, clock);
    seed_pool(&mut scheduler, &cfg.pool)?;

    let options = RuntimeOptions {
        tick_interval: cfg.scheduler.tick_interval,
        exit_when_idle: args.once,
    };

    let core = CoreRuntime::new(scheduler, options);
    let (handle, request_rx) = PoolHandle::channel(64);
    let runtime = Runtime::new(core, request_rx);

    let reporter = report::spawn_reporter(handle.clone(), cfg.display.refresh_interval);

    if !args.no_console {
        console::spawn_console(handle.clone());
        println!("{}", console::HELP_TEXT);
    }

    // Ctrl-C → graceful shutdown.
    {
        let handle = handle.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = handle.shutdown().await;
        });
    }
    drop(handle);

    runtime.run().await?;

    if let Err(e) = reporter.await {
        debug!(error = %e, "status reporter task ended abnormally");
    }

    Ok(())
}

/// Apply `--workers` / `--tasks` on top of the loaded config.
fn apply_cli_overrides(mut cfg: ConfigFile, args: &CliArgs) -> errors::Result<ConfigFile> {
    if let Some(workers) = args.workers {
        if workers > cfg.pool.max_workers {
            return Err(WorkpoolError::ConfigError(format!(
                "--workers {} exceeds max_workers ({})",
                workers, cfg.pool.max_workers
            )));
        }
        cfg.pool.initial_workers = workers;
    }

    if let Some(tasks) = args.tasks {
        if tasks > MAX_ENQUEUE_BATCH {
            return Err(WorkpoolError::ConfigError(format!(
                "--tasks {} exceeds the batch limit ({})",
                tasks, MAX_ENQUEUE_BATCH
            )));
        }
        cfg.pool.initial_tasks = tasks;
    }

    Ok(cfg)
}

/// Add the initial workers and tasks before the runtime starts ticking.
fn seed_pool(scheduler: &mut Scheduler, pool: &PoolSettings) -> errors::Result<()> {
    for _ in 0..pool.initial_workers {
        scheduler.add_worker()?;
    }
    scheduler.enqueue_tasks(pool.initial_tasks);

    info!(
        workers = scheduler.workers().len(),
        tasks = scheduler.tasks().len(),
        "pool seeded"
    );
    Ok(())
}

/// Simple dry-run output: print the effective configuration.
fn print_dry_run(cfg: &ConfigFile) {
    println!("workpool dry-run");
    println!("  pool.max_workers = {}", cfg.pool.max_workers);
    println!("  pool.initial_workers = {}", cfg.pool.initial_workers);
    println!("  pool.initial_tasks = {}", cfg.pool.initial_tasks);
    println!(
        "  scheduler.tick_interval = {:?}",
        cfg.scheduler.tick_interval
    );
    println!(
        "  scheduler.completion_threshold = {:?}",
        cfg.scheduler.completion_threshold
    );
    println!(
        "  display.refresh_interval = {:?}",
        cfg.display.refresh_interval
    );

    debug!("dry-run complete (pool not started)");
}
