//! Effect execution.
//!
//! [`EffectRunner`] is the boundary where deferred work actually runs. Each
//! future is spawned on the tokio runtime and its resulting event is sent
//! back over an unbounded channel, which the run loop drains between
//! dispatches. Results therefore re-enter dispatch one at a time, in the
//! order they complete.

use std::ops::ControlFlow;

use tokio::sync::mpsc;
use tracing::trace;

use crate::effect::Effect;
use crate::event::Event;

/// Spawns effects and forwards their outcomes.
#[derive(Debug, Clone)]
pub struct EffectRunner {
    tx: mpsc::UnboundedSender<Event>,
}

impl EffectRunner {
    /// Creates a runner sending outcomes to `tx`.
    #[must_use]
    pub fn new(tx: mpsc::UnboundedSender<Event>) -> Self {
        Self { tx }
    }

    /// Creates a runner together with the receiving end of its channel.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Starts `effect`.
    ///
    /// Returns [`ControlFlow::Break`] as soon as a quit is found; effects
    /// batched after it are not started.
    ///
    /// Must be called from within a tokio runtime.
    pub fn run(&self, effect: Effect) -> ControlFlow<()> {
        match effect {
            Effect::Quit => ControlFlow::Break(()),
            Effect::Perform(future) => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let event = future.await;
                    trace!(?event, "effect completed");
                    // The receiver is gone once the app has exited.
                    let _ = tx.send(event);
                });
                ControlFlow::Continue(())
            }
            Effect::Batch(effects) => {
                for effect in effects {
                    if self.run(effect).is_break() {
                        return ControlFlow::Break(());
                    }
                }
                ControlFlow::Continue(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::event::TaskEvent;

    fn loaded() -> Event {
        Event::Tasks(TaskEvent::Loaded(Vec::new()))
    }

    #[tokio::test]
    async fn performed_future_is_delivered() {
        let (runner, mut rx) = EffectRunner::channel();
        assert!(runner.run(Effect::perform(async { loaded() })).is_continue());
        assert_eq!(rx.recv().await, Some(loaded()));
    }

    #[tokio::test]
    async fn batch_delivers_every_outcome() {
        let (runner, mut rx) = EffectRunner::channel();
        let failed = Event::Tasks(TaskEvent::Failed("x".to_string()));
        let effect = Effect::Batch(vec![
            Effect::perform(async { loaded() }),
            Effect::after(Duration::from_millis(5), failed.clone()),
        ]);

        assert!(runner.run(effect).is_continue());
        let mut received = vec![rx.recv().await, rx.recv().await];
        received.sort_by_key(|event| matches!(event, Some(Event::Tasks(TaskEvent::Failed(_)))));
        assert_eq!(received, vec![Some(loaded()), Some(failed)]);
    }

    #[tokio::test]
    async fn quit_breaks() {
        let (runner, mut rx) = EffectRunner::channel();
        assert!(runner.run(Effect::Quit).is_break());

        let effect = Effect::Batch(vec![Effect::Quit, Effect::perform(async { loaded() })]);
        assert!(runner.run(effect).is_break());

        drop(runner);
        assert_eq!(rx.recv().await, None);
    }
}
