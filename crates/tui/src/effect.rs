//! Deferred work requested by widgets.
//!
//! Dispatch never blocks. A widget that needs I/O or a timer returns an
//! [`Effect`]; the runtime executes it off the dispatch path and feeds the
//! resulting [`Event`] back into the same queue.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::event::Event;

/// A boxed future resolving to the event that reports its outcome.
pub type EffectFuture = Pin<Box<dyn Future<Output = Event> + Send + 'static>>;

/// A description of work for the runtime to carry out.
pub enum Effect {
    /// Stop the application.
    Quit,
    /// Run a future and dispatch the event it resolves to.
    Perform(EffectFuture),
    /// Run several effects.
    Batch(Vec<Effect>),
}

impl Effect {
    /// Wraps a future whose output is dispatched when it completes.
    pub fn perform<F>(future: F) -> Self
    where
        F: Future<Output = Event> + Send + 'static,
    {
        Self::Perform(Box::pin(future))
    }

    /// Dispatches `event` once `delay` has elapsed.
    #[must_use]
    pub fn after(delay: Duration, event: Event) -> Self {
        Self::perform(async move {
            tokio::time::sleep(delay).await;
            event
        })
    }

    /// Combines optional effects, flattening nested batches.
    ///
    /// Returns `None` when nothing is left and the effect itself when only
    /// one remains.
    ///
    /// # Examples
    ///
    /// ```
    /// use dashboard_tui::Effect;
    ///
    /// assert!(Effect::batch([None, None]).is_none());
    /// assert!(Effect::batch([None, Some(Effect::Quit)]).is_some_and(|e| e.is_quit()));
    /// ```
    pub fn batch(effects: impl IntoIterator<Item = Option<Effect>>) -> Option<Self> {
        let mut flat = Vec::new();
        for effect in effects.into_iter().flatten() {
            match effect {
                Self::Batch(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }

        match flat.len() {
            0 => None,
            1 => flat.pop(),
            _ => Some(Self::Batch(flat)),
        }
    }

    /// Returns `true` if this effect, or any batched effect, quits.
    #[must_use]
    pub fn is_quit(&self) -> bool {
        match self {
            Self::Quit => true,
            Self::Perform(_) => false,
            Self::Batch(effects) => effects.iter().any(Self::is_quit),
        }
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quit => f.write_str("Quit"),
            Self::Perform(_) => f.write_str("Perform(..)"),
            Self::Batch(effects) => f.debug_tuple("Batch").field(effects).finish(),
        }
    }
}
