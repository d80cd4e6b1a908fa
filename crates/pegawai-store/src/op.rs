//! Async operation lifecycle.

/// Lifecycle of one named unit of work. Operations are re-runnable: a
/// settled operation transitions back to `Pending` on re-dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op<T> {
    Idle,
    Pending,
    Succeeded(T),
    Failed(String),
}

impl<T> Default for Op<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> Op<T> {
    /// Marks the operation in flight, clearing any prior outcome.
    pub fn start(&mut self) {
        *self = Self::Pending;
    }

    /// Records the operation's outcome.
    pub fn settle(&mut self, result: Result<T, String>) {
        *self = match result {
            Ok(value) => Self::Succeeded(value),
            Err(error) => Self::Failed(error),
        };
    }

    /// Returns the operation to `Idle`, dropping any outcome.
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub const fn has_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    /// Drops a failure outcome, keeping success and pending states.
    pub fn clear_error(&mut self) {
        if matches!(self, Self::Failed(_)) {
            *self = Self::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let op: Op<()> = Op::default();
        assert_eq!(op, Op::Idle);
        assert!(!op.is_pending());
        assert_eq!(op.error(), None);
    }

    #[test]
    fn settles_to_success_or_failure() {
        let mut op: Op<u32> = Op::default();
        op.start();
        assert!(op.is_pending());

        op.settle(Ok(7));
        assert!(op.has_succeeded());
        assert_eq!(op.value(), Some(&7));

        op.start();
        op.settle(Err("boom".to_string()));
        assert_eq!(op.error(), Some("boom"));
    }

    /// Re-dispatch after settling is allowed; there is no terminal state.
    #[test]
    fn is_rerunnable_after_settling() {
        let mut op: Op<()> = Op::default();
        op.settle(Err("first".to_string()));
        op.start();
        assert!(op.is_pending());
        assert_eq!(op.error(), None);
    }

    #[test]
    fn clear_error_only_drops_failures() {
        let mut op: Op<u32> = Op::default();
        op.settle(Ok(1));
        op.clear_error();
        assert!(op.has_succeeded());

        op.settle(Err("boom".to_string()));
        op.clear_error();
        assert_eq!(op, Op::Idle);
    }
}
