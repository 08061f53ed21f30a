//! Generic "decide, then maybe iterate" loop.
//!
//! A [`ThreadLoop`] is asked before every iteration whether to run, skip or
//! stop. Skips are cooperative: the loop yields and asks again right away.

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Answer to "should this iteration run?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipOption {
    Run,
    SkipAndYield,
    Stop,
}

/// How a loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopOutcome {
    /// The loop reported [`SkipOption::Stop`].
    Finished,
    /// The stop flag was raised from outside.
    Cancelled,
}

/// Work driven by [`run_thread_loop`].
pub trait ThreadLoop {
    type Error;

    /// Called once on the loop thread before the first decision.
    fn thread_setup(&mut self) {}

    /// Decide what the next iteration does. May block.
    fn should_skip(&mut self) -> SkipOption;

    fn one_iteration(&mut self) -> Result<(), Self::Error>;
}

/// Drive `looper` until it stops, fails, or `stop` is raised.
///
/// The stop flag is only checked between iterations; a blocking decision is
/// not interrupted.
pub fn run_thread_loop<L>(looper: &mut L, stop: &AtomicBool) -> Result<LoopOutcome, L::Error>
where
    L: ThreadLoop + ?Sized,
{
    looper.thread_setup();

    loop {
        if stop.load(Ordering::Relaxed) {
            debug!("Thread loop cancelled");
            return Ok(LoopOutcome::Cancelled);
        }

        match looper.should_skip() {
            SkipOption::Run => looper.one_iteration()?,
            SkipOption::SkipAndYield => std::thread::yield_now(),
            SkipOption::Stop => return Ok(LoopOutcome::Finished),
        }
    }
}
