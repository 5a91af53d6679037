//! Platform-agnostic RSVP playback engine.
//!
//! The engine owns a word sequence, the playback position and rate, and a
//! self-renewing one-shot tick loop. Everything platform-specific enters
//! through trait seams: a [`timer::TickScheduler`] supplies the delayed
//! callback primitive and a [`observer::StateObserver`] receives immutable
//! state snapshots. The crate performs no I/O and never renders.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod content;
pub mod engine;
pub mod observer;
pub mod settings;
pub mod snapshot;
pub mod timer;
