//! Engine output port.

use crate::snapshot::StateSnapshot;

/// Single-subscriber listener for engine state changes.
///
/// Invoked synchronously from the engine's execution context on every
/// state-affecting operation. Implementations must return quickly and must
/// not call back into the engine.
pub trait StateObserver {
    fn on_state_change(&mut self, snapshot: &StateSnapshot<'_>);
}

impl<F> StateObserver for F
where
    F: FnMut(&StateSnapshot<'_>),
{
    fn on_state_change(&mut self, snapshot: &StateSnapshot<'_>) {
        self(snapshot)
    }
}
