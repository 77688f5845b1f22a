//! Parallel command dispatch
//!
//! Launches every (command, replica) pair as its own task before joining
//! any of them. There is no concurrency cap.

use std::future::Future;
use tokio::task::JoinSet;
use tracing::{debug, info};

use super::runner::{invoke, InvokeError};
use crate::models::{CommandSpec, InvocationResult};
use crate::utils::Timer;

/// Fan-out executor for a set of commands
#[derive(Clone, Copy, Debug)]
pub struct Dispatcher {
    parallelism: usize,
}

impl Dispatcher {
    pub fn new(parallelism: usize) -> Self {
        Self { parallelism }
    }

    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// Number of invocations a run over `commands` launches, or `None` if
    /// that does not fit in a `usize`
    pub fn task_count(&self, commands: &[CommandSpec]) -> Option<usize> {
        commands.len().checked_mul(self.parallelism)
    }

    /// Run every command `parallelism` times concurrently.
    ///
    /// Slot `i` of the returned vector belongs to the `i`-th task in
    /// command-major order. A fatal invocation error is returned as soon as
    /// it is observed; tasks still running are abandoned.
    pub async fn run(&self, commands: &[CommandSpec]) -> Result<Vec<InvocationResult>, InvokeError> {
        self.run_with(commands, |command| async move { invoke(&command).await })
            .await
    }

    /// Same as [`Dispatcher::run`], with each invocation produced by `invoker`
    pub(crate) async fn run_with<F, Fut>(
        &self,
        commands: &[CommandSpec],
        invoker: F,
    ) -> Result<Vec<InvocationResult>, InvokeError>
    where
        F: Fn(CommandSpec) -> Fut,
        Fut: Future<Output = Result<InvocationResult, InvokeError>> + Send + 'static,
    {
        let too_many = || InvokeError::TooManyTasks {
            commands: commands.len(),
            parallelism: self.parallelism,
        };
        let count = self.task_count(commands).ok_or_else(|| too_many())?;

        let mut slots = Vec::new();
        slots.try_reserve_exact(count).map_err(|_| too_many())?;
        slots.resize(count, InvocationResult::default());

        info!(
            "Dispatching {} command(s) x {} = {} invocation(s)",
            commands.len(),
            self.parallelism(),
            count
        );

        let timer = Timer::start("dispatch");
        let mut tasks = JoinSet::new();
        let mut index = 0;

        for command in commands {
            for _ in 0..self.parallelism {
                let invocation = invoker(command.clone());
                let slot = index;
                tasks.spawn(async move { (slot, invocation.await) });
                index += 1;
            }
        }

        debug!("All {} task(s) launched", index);

        while let Some(joined) = tasks.join_next().await {
            let (slot, outcome) = joined?;
            match outcome {
                Ok(result) => {
                    debug!("Slot {}: {}", slot, result);
                    slots[slot] = result;
                }
                Err(err) => {
                    debug!("Abandoning {} running task(s)", tasks.len());
                    return Err(err);
                }
            }
        }

        info!("Dispatch completed in {}ms", timer.stop().as_millis());

        Ok(slots)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(1)
    }
}
