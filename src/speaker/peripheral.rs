//! Speaker peripheral
//!
//! A speaker is driven from two sides: the main simulation thread calls
//! [`Speaker::update`] once per tick, and scripting threads call
//! [`Speaker::play_sound`] / [`Speaker::play_note`] at will. Admission is
//! decided synchronously under the speaker's lock; the actual network
//! dispatch is deferred onto the main thread and never awaited, so the
//! caller's boolean reflects admission only, not delivery.

use crate::speaker::broadcast::PositionBroadcaster;
use crate::speaker::limiter::{EmissionKind, EmitterState};
use crate::speaker::queue::MainThreadQueue;
use crate::speaker::sound::{semitone_to_speed, Instrument, SoundId};
use crate::{Error, Result};
use glam::DVec3;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Peripheral type string exposed to scripts.
pub const PERIPHERAL_TYPE: &str = "speaker";

/// Upper volume clamp applied on admission.
const MAX_VOLUME: f64 = 3.0;
/// Broadcast range in distance units per unit of clamped volume.
const RANGE_PER_VOLUME: f64 = 16.0;

/// Speaker tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerConfig {
    /// Notes admitted per speaker per tick before further notes are refused
    pub max_notes_per_tick: u32,
}

impl Default for SpeakerConfig {
    fn default() -> Self {
        SpeakerConfig {
            max_notes_per_tick: 8,
        }
    }
}

/// Position update sent to observers tracking the speaker's region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveMessage {
    /// Identity of the speaker that moved
    pub source: Uuid,
    /// Its new position
    pub position: DVec3,
}

/// An arbitrary sound for observers in range, tagged with the emitting
/// speaker so clients can stop it if the speaker is destroyed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundMessage {
    /// Identity of the emitting speaker
    pub source: Uuid,
    /// Position the sound plays at
    pub position: DVec3,
    /// Resolved sound identifier
    pub sound: SoundId,
    /// Clamped volume
    pub volume: f32,
    /// Unmodified pitch multiplier
    pub pitch: f32,
}

/// A note-block note for observers in range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteMessage {
    /// Position the note plays at
    pub position: DVec3,
    /// Sound event of the note's instrument
    pub sound: SoundId,
    /// Clamped volume
    pub volume: f32,
    /// Playback-speed multiplier derived from the semitone pitch
    pub speed: f32,
}

/// Where the speaker lives: its identity, position, and (while the server
/// is up) the network used to reach observers.
pub trait SpeakerHost: Send + Sync {
    /// Stable identity of this speaker, carried in outgoing messages
    fn source(&self) -> Uuid;

    /// Current world position
    fn position(&self) -> DVec3;

    /// Live network handle, or `None` once the server has shut down
    fn network(&self) -> Option<Arc<dyn SoundNetwork>>;
}

/// Outbound fan-out to observers.
pub trait SoundNetwork: Send + Sync {
    /// Notify observers tracking the speaker's region of a position change
    fn broadcast_move(&self, message: MoveMessage);

    /// Play an arbitrary sound for observers within `range` of its position
    fn broadcast_sound(&self, message: SoundMessage, range: f64);

    /// Play a note for observers within `range` of its position
    fn broadcast_note(&self, message: NoteMessage, range: f64);
}

enum Emission {
    Sound { sound: SoundId, volume: f64, pitch: f64 },
    Note { sound: SoundId, volume: f64, speed: f64 },
}

impl Emission {
    fn kind(&self) -> EmissionKind {
        match self {
            Emission::Sound { .. } => EmissionKind::Sound,
            Emission::Note { .. } => EmissionKind::Note,
        }
    }
}

struct SpeakerInner {
    emitter: EmitterState,
    broadcaster: PositionBroadcaster,
}

/// Rate-limited, network-synchronized sound emitter.
pub struct Speaker {
    host: Arc<dyn SpeakerHost>,
    tasks: Arc<dyn MainThreadQueue>,
    config: SpeakerConfig,
    inner: Mutex<SpeakerInner>,
}

impl Speaker {
    /// Create a speaker with the default configuration
    pub fn new(host: Arc<dyn SpeakerHost>, tasks: Arc<dyn MainThreadQueue>) -> Self {
        Speaker::with_config(host, tasks, SpeakerConfig::default())
    }

    /// Create a speaker with an explicit configuration
    pub fn with_config(
        host: Arc<dyn SpeakerHost>,
        tasks: Arc<dyn MainThreadQueue>,
        config: SpeakerConfig,
    ) -> Self {
        Speaker {
            host,
            tasks,
            config,
            inner: Mutex::new(SpeakerInner {
                emitter: EmitterState::new(),
                broadcaster: PositionBroadcaster::new(),
            }),
        }
    }

    /// Peripheral type string exposed to scripts
    pub fn peripheral_type(&self) -> &'static str {
        PERIPHERAL_TYPE
    }

    /// Active configuration
    pub fn config(&self) -> SpeakerConfig {
        self.config
    }

    /// Advance the tick clock. Called exactly once per simulation tick by
    /// the main thread.
    ///
    /// Pushes a position update to observers tracking the speaker once it
    /// has ever played a sound, has not had a position update in the last
    /// second, and has moved a non-trivial amount since the last one.
    pub fn update(&self) {
        let mut inner = self.inner.lock();
        inner.emitter.begin_tick();

        let clock = inner.emitter.clock();
        if !inner.emitter.has_played() || !inner.broadcaster.due(clock) {
            return;
        }

        let position = self.host.position();
        let Some(position) = inner.broadcaster.try_advance(clock, position) else {
            return;
        };
        drop(inner);

        if let Some(network) = self.host.network() {
            let source = self.host.source();
            log::debug!("speaker {source} moved to {position}");
            network.broadcast_move(MoveMessage { source, position });
        }
    }

    /// True if the speaker emitted a sound within the last `ticks` ticks
    pub fn made_sound_within(&self, ticks: u64) -> bool {
        self.inner.lock().emitter.played_within(ticks)
    }

    /// Play an arbitrary sound through the speaker.
    ///
    /// `volume` and `pitch` default to 1.0. Returns `Ok(false)` when the
    /// emission was refused by the rate limiter; a malformed `name` or a
    /// non-finite argument is an error, rejected before any rate-limit
    /// state is touched.
    pub fn play_sound(&self, name: &str, volume: Option<f64>, pitch: Option<f64>) -> Result<bool> {
        let volume = check_finite(1, volume.unwrap_or(1.0))?;
        let pitch = check_finite(2, pitch.unwrap_or(1.0))?;
        let sound = SoundId::parse(name)?;

        Ok(self.emit(Emission::Sound {
            sound,
            volume,
            pitch,
        }))
    }

    /// Play a note-block note through the speaker.
    ///
    /// `instrument` names one of the sixteen note-block instruments.
    /// `volume` and `pitch` default to 1.0; `pitch` is in semitones, with
    /// 12 playing the instrument at its recorded speed. Returns
    /// `Ok(false)` when the emission was refused by the rate limiter.
    pub fn play_note(
        &self,
        instrument: &str,
        volume: Option<f64>,
        pitch: Option<f64>,
    ) -> Result<bool> {
        let volume = check_finite(1, volume.unwrap_or(1.0))?;
        let pitch = check_finite(2, pitch.unwrap_or(1.0))?;
        let instrument = Instrument::from_name(instrument)?;

        Ok(self.emit(Emission::Note {
            sound: instrument.sound(),
            volume,
            speed: semitone_to_speed(pitch),
        }))
    }

    /// Admit one emission and, on success, defer its dispatch to the main
    /// thread. The caller's result reflects admission only.
    fn emit(&self, emission: Emission) -> bool {
        let position;
        {
            let mut inner = self.inner.lock();
            if !inner.emitter.admit(emission.kind(), self.config.max_notes_per_tick) {
                return false;
            }
            // Position is captured at admission time; network liveness is
            // re-checked at dispatch time.
            position = self.host.position();
        }

        let source = self.host.source();
        let host = Arc::clone(&self.host);
        match emission {
            Emission::Sound {
                sound,
                volume,
                pitch,
            } => {
                let volume = volume.clamp(0.0, MAX_VOLUME);
                let range = volume * RANGE_PER_VOLUME;
                let message = SoundMessage {
                    source,
                    position,
                    sound,
                    volume: volume as f32,
                    pitch: pitch as f32,
                };
                self.tasks.enqueue(Box::new(move || {
                    let Some(network) = host.network() else {
                        log::debug!("sound dispatch dropped: server is gone");
                        return;
                    };
                    network.broadcast_sound(message, range);
                }));
            }
            Emission::Note {
                sound,
                volume,
                speed,
            } => {
                let volume = volume.clamp(0.0, MAX_VOLUME);
                let range = volume * RANGE_PER_VOLUME;
                let message = NoteMessage {
                    position,
                    sound,
                    volume: volume as f32,
                    speed: speed as f32,
                };
                self.tasks.enqueue(Box::new(move || {
                    let Some(network) = host.network() else {
                        log::debug!("note dispatch dropped: server is gone");
                        return;
                    };
                    network.broadcast_note(message, range);
                }));
            }
        }
        true
    }
}

fn check_finite(index: usize, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFiniteArgument { index, value })
    }
}
