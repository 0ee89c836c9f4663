//! The focus ring: which widget receives keyboard input.
//!
//! The ring only tracks an index. The container mirrors every
//! [`FocusChange`] onto its entries, so exactly one entry is focused whenever
//! the ring is non-empty.

/// A move of focus from one index to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusChange {
    /// Index that lost focus, if any.
    pub previous: Option<usize>,
    /// Index that gained focus.
    pub next: usize,
}

/// Cyclic pointer over `len` widgets.
///
/// # Examples
///
/// ```
/// use dashboard_tui::FocusRing;
///
/// let mut ring = FocusRing::default();
/// ring.push();
/// ring.push();
/// ring.push();
///
/// for _ in 0..5 {
///     ring.advance_forward();
/// }
/// assert_eq!(ring.current(), Some(2));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusRing {
    current: Option<usize>,
    len: usize,
}

impl FocusRing {
    /// Returns the focused index, or `None` while the ring is empty.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the ring has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds a member at the end. The first member is focused.
    pub fn push(&mut self) -> Option<FocusChange> {
        self.len += 1;
        if self.current.is_some() {
            return None;
        }
        self.current = Some(0);
        Some(FocusChange {
            previous: None,
            next: 0,
        })
    }

    /// Moves focus to the next member, wrapping at the end.
    pub fn advance_forward(&mut self) -> Option<FocusChange> {
        let current = self.current?;
        self.move_to((current + 1) % self.len)
    }

    /// Moves focus to the previous member, wrapping at the start.
    pub fn advance_backward(&mut self) -> Option<FocusChange> {
        let current = self.current?;
        self.move_to((current + self.len - 1) % self.len)
    }

    /// Moves focus to `index` if it is a member.
    pub fn focus(&mut self, index: usize) -> Option<FocusChange> {
        if index >= self.len {
            return None;
        }
        self.move_to(index)
    }

    fn move_to(&mut self, next: usize) -> Option<FocusChange> {
        let previous = self.current.replace(next);
        Some(FocusChange { previous, next })
    }
}
