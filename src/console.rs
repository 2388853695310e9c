// src/console.rs

//! Line-oriented command input on stdin.
//!
//! Each line is one command:
//!
//! ```text
//! add            add a worker
//! remove         remove the most recently added idle worker
//! enqueue 5      enqueue five tasks (alias: tasks 5)
//! status         print the current snapshot
//! help           list commands
//! quit           stop the pool (alias: exit)
//! ```

use std::io::BufRead;
use std::str::FromStr;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::engine::PoolHandle;
use crate::errors::{Result, WorkpoolError};
use crate::pool::MAX_ENQUEUE_BATCH;
use crate::report::render;

pub const HELP_TEXT: &str = "commands: add | remove | enqueue <n> | status | help | quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    AddWorker,
    RemoveWorker,
    Enqueue(i64),
    Status,
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let line = s.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "add" | "+" => Ok(ConsoleCommand::AddWorker),
            "remove" | "-" => Ok(ConsoleCommand::RemoveWorker),
            "enqueue" | "tasks" => Ok(ConsoleCommand::Enqueue(parse_task_count(rest))),
            "status" => Ok(ConsoleCommand::Status),
            "help" | "?" => Ok(ConsoleCommand::Help),
            "quit" | "exit" => Ok(ConsoleCommand::Quit),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command '{other}'")),
        }
    }
}

/// Read a task count the way a numeric input field would: anything that is
/// not an integer counts as zero, which enqueues nothing.
pub fn parse_task_count(input: &str) -> i64 {
    input.trim().parse().unwrap_or(0)
}

/// Apply one command and return the text to show the user.
///
/// A full pool is reported in the returned text rather than as an error.
pub async fn execute(handle: &PoolHandle, command: ConsoleCommand) -> Result<String> {
    match command {
        ConsoleCommand::AddWorker => match handle.add_worker().await {
            Ok(id) => Ok(format!("added worker {id}")),
            Err(WorkpoolError::Capacity(e)) => Ok(format!("cannot add worker: {e}")),
            Err(e) => Err(e),
        },
        ConsoleCommand::RemoveWorker => Ok(match handle.remove_worker().await? {
            Some(id) => format!("removed worker {id}"),
            None => "no idle worker to remove".to_string(),
        }),
        ConsoleCommand::Enqueue(count) if count > MAX_ENQUEUE_BATCH => Ok(format!(
            "cannot enqueue {count} tasks: max {MAX_ENQUEUE_BATCH} per batch"
        )),
        ConsoleCommand::Enqueue(count) => {
            let ids = handle.enqueue_tasks(count).await?;
            Ok(format!("enqueued {} task(s)", ids.len()))
        }
        ConsoleCommand::Status => Ok(render(&handle.snapshot().await?)),
        ConsoleCommand::Help => Ok(HELP_TEXT.to_string()),
        ConsoleCommand::Quit => {
            handle.shutdown().await?;
            Ok("shutting down".to_string())
        }
    }
}

/// Start reading commands from stdin.
///
/// Stdin is read on a dedicated OS thread so a pending read never holds up
/// runtime shutdown; parsed commands are forwarded to an async task that
/// applies them through `handle`.
pub fn spawn_console(handle: PoolHandle) -> tokio::task::JoinHandle<()> {
    let (tx, mut rx) = mpsc::channel::<ConsoleCommand>(16);

    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, "failed to read stdin; console stopped");
                    return;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<ConsoleCommand>() {
                Ok(command) => {
                    if tx.blocking_send(command).is_err() {
                        return;
                    }
                }
                Err(e) => println!("{e}; {HELP_TEXT}"),
            }
        }
        debug!("stdin closed; console stopped");
    });

    tokio::spawn(async move {
        while let Some(command) = rx.recv().await {
            match execute(&handle, command).await {
                Ok(text) => println!("{text}"),
                Err(WorkpoolError::RuntimeStopped) => break,
                Err(e) => warn!(error = %e, ?command, "console command failed"),
            }

            if command == ConsoleCommand::Quit {
                break;
            }
        }
    })
}
