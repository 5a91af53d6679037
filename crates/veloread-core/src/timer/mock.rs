use super::TickScheduler;

/// No-clock scheduler used during bring-up and in tests.
///
/// Records the armed delay so a driver can fire ticks by hand and assert on
/// the delays the engine computed.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualScheduler {
    armed: Option<u64>,
    cancels: u32,
}

impl ManualScheduler {
    pub const fn new() -> Self {
        Self {
            armed: None,
            cancels: 0,
        }
    }

    /// Delay of the armed tick in milliseconds, if any.
    pub const fn armed_delay_ms(&self) -> Option<u64> {
        self.armed
    }

    pub const fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Number of cancels that actually disarmed a tick.
    pub const fn cancel_count(&self) -> u32 {
        self.cancels
    }

    /// Consume the armed tick, as a real one-shot does when it fires.
    /// Returns the delay it had been armed with.
    pub fn fire(&mut self) -> Option<u64> {
        self.armed.take()
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, delay_ms: u64) {
        self.armed = Some(delay_ms);
    }

    fn cancel(&mut self) {
        if self.armed.take().is_some() {
            self.cancels += 1;
        }
    }
}
