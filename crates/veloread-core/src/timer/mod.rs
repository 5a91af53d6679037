//! One-shot tick scheduling abstraction.

pub mod mock;

/// Single-shot delayed-callback port.
///
/// The engine keeps at most one tick armed at any time: one while playing,
/// none while paused. Arming replaces any previously armed tick. The host
/// delivers a fired tick by calling [`RsvpEngine::tick`]; a fire that races a
/// `cancel` must not be delivered (the engine additionally ignores ticks
/// while paused).
///
/// [`RsvpEngine::tick`]: crate::engine::RsvpEngine::tick
pub trait TickScheduler {
    /// Arm the one-shot tick to fire after `delay_ms` milliseconds.
    fn schedule(&mut self, delay_ms: u64);

    /// Disarm the armed tick. Calling with nothing armed is a no-op.
    fn cancel(&mut self);
}
