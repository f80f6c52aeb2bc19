//! Speaker peripheral: rate-limited, network-synchronized sound emission
//!
//! Each speaker instance owns a small state machine driven by two events:
//! the per-tick [`Speaker::update`] call from the main simulation thread,
//! and emission requests arriving synchronously from scripting threads.
//! Admission is serialized per instance; dispatch is deferred onto the
//! main thread through a [`MainThreadQueue`] and never awaited.

pub mod broadcast;
pub mod limiter;
pub mod peripheral;
pub mod queue;
pub mod sound;

pub use broadcast::{PositionBroadcaster, BROADCAST_DISTANCE, BROADCAST_INTERVAL_TICKS};
pub use limiter::{EmissionKind, EmitterState, MIN_TICKS_BETWEEN_SOUNDS};
pub use peripheral::{
    MoveMessage, NoteMessage, SoundMessage, SoundNetwork, Speaker, SpeakerConfig, SpeakerHost,
    PERIPHERAL_TYPE,
};
pub use queue::{task_channel, MainThreadQueue, MainThreadTask, TaskChannel, TaskRunner};
pub use sound::{semitone_to_speed, Instrument, SoundId};
