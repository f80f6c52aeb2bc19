//! Programmable turtle and speaker peripheral core
//!
//! Implements the two stateful cores of an in-game robotics mod: the turtle
//! upgrade & identity model, and the speaker peripheral's rate-limited,
//! network-synchronized sound emission.
//!
//! # Features
//! - Persisted turtle identity codec with omit-defaults encoding and
//!   tolerant, absence-safe decoding
//! - Explicit upgrade capability table injected into the codec
//! - Per-tick note budget plus a hard 1-tick cooldown between arbitrary
//!   sounds, enforced per speaker instance
//! - Threshold- and interval-gated position broadcast to tracking observers
//! - Deferred, fire-and-forget sound dispatch over a main-thread task queue
//!
//! # Quick start
//! ## Identity round trip
//! ```
//! use turtleworks::{TurtleFamily, TurtleIdentity, TurtleUpgrade, UpgradeRegistry};
//!
//! let mut registry = UpgradeRegistry::new();
//! registry.register(TurtleUpgrade::new("turtleworks:drill", "Drilling"));
//!
//! let drill = registry.resolve("turtleworks:drill").cloned();
//! let identity = TurtleIdentity::create(
//!     TurtleFamily::Normal,
//!     42,
//!     Some("Toolbot"),
//!     None,
//!     drill,
//!     None,
//!     80,
//!     None,
//! );
//!
//! let record = identity.encode();
//! let decoded = TurtleIdentity::decode(&record, TurtleFamily::Normal, &registry);
//! assert_eq!(decoded.id(), Some(42));
//! assert_eq!(decoded.fuel_level(), 80);
//! ```
//!
//! ## Speaker
//! ```no_run
//! use glam::DVec3;
//! use std::sync::Arc;
//! use turtleworks::speaker::{task_channel, SoundNetwork, Speaker, SpeakerHost};
//! use uuid::Uuid;
//!
//! struct StaticHost;
//!
//! impl SpeakerHost for StaticHost {
//!     fn source(&self) -> Uuid {
//!         Uuid::nil()
//!     }
//!     fn position(&self) -> DVec3 {
//!         DVec3::ZERO
//!     }
//!     fn network(&self) -> Option<Arc<dyn SoundNetwork>> {
//!         None
//!     }
//! }
//!
//! let (queue, runner) = task_channel();
//! let speaker = Speaker::new(Arc::new(StaticHost), Arc::new(queue));
//!
//! speaker.update(); // once per game tick, on the main thread
//! speaker.play_note("harp", None, Some(12.0)).unwrap();
//! runner.run_pending(); // dispatch deferred work on the main thread
//! ```

#![warn(missing_docs)]

pub mod identity;
pub mod speaker;

/// Error types for turtle and speaker operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Sound name does not satisfy the namespaced identifier grammar
    #[error("Malformed sound name '{0}'")]
    MalformedSoundName(String),

    /// Note instrument name does not match any known instrument
    #[error("Invalid instrument '{0}'")]
    InvalidInstrument(String),

    /// A numeric argument was NaN or infinite
    #[error("bad argument #{index} (number expected, got {value})")]
    NonFiniteArgument {
        /// 1-based position of the offending argument
        index: usize,
        /// The rejected value
        value: f64,
    },
}

/// Result type for turtle and speaker operations
pub type Result<T> = std::result::Result<T, Error>;

// Public API exports
pub use identity::{
    stock_variants, DisplayName, ItemRecord, TagValue, TurtleFamily, TurtleIdentity, TurtleSide,
    TurtleUpgrade, UpgradeRegistry,
};
pub use speaker::{
    task_channel, Instrument, MainThreadQueue, SoundId, SoundNetwork, Speaker, SpeakerConfig,
    SpeakerHost, TaskChannel, TaskRunner,
};
