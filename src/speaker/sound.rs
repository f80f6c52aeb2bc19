//! Sound identifiers and note-block instruments
//!
//! Sound names follow the `namespace:path` identifier grammar; a bare path
//! defaults the namespace to `minecraft`. Note requests name one of the
//! sixteen note-block instruments and carry a pitch in semitones, which is
//! converted to a playback-speed multiplier before dispatch.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

const DEFAULT_NAMESPACE: &str = "minecraft";

/// A validated, namespaced sound identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundId {
    namespace: String,
    path: String,
}

impl SoundId {
    /// Parse a `namespace:path` sound name.
    ///
    /// The namespace part accepts `[a-z0-9_.-]`, the path additionally
    /// accepts `/`. A name without a `:` is given the `minecraft`
    /// namespace. Anything else is a [`Error::MalformedSoundName`].
    pub fn parse(name: &str) -> Result<Self> {
        let (namespace, path) = match name.split_once(':') {
            Some((namespace, path)) => (namespace, path),
            None => (DEFAULT_NAMESPACE, name),
        };
        let namespace = if namespace.is_empty() {
            DEFAULT_NAMESPACE
        } else {
            namespace
        };

        if path.is_empty()
            || !namespace.chars().all(is_namespace_char)
            || !path.chars().all(is_path_char)
        {
            return Err(Error::MalformedSoundName(name.to_string()));
        }

        Ok(SoundId {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Namespace part of the identifier
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Path part of the identifier
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

fn is_namespace_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-')
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

/// The sixteen note-block instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    /// Harp (the default note-block sound)
    Harp,
    /// Bass drum
    Basedrum,
    /// Snare drum
    Snare,
    /// Hi-hat
    Hat,
    /// Bass
    Bass,
    /// Flute
    Flute,
    /// Bell
    Bell,
    /// Guitar
    Guitar,
    /// Chime
    Chime,
    /// Xylophone
    Xylophone,
    /// Iron xylophone
    IronXylophone,
    /// Cow bell
    CowBell,
    /// Didgeridoo
    Didgeridoo,
    /// Bit (square wave)
    Bit,
    /// Banjo
    Banjo,
    /// Pling
    Pling,
}

impl Instrument {
    /// Every instrument, in note-block order
    pub const ALL: [Instrument; 16] = [
        Instrument::Harp,
        Instrument::Basedrum,
        Instrument::Snare,
        Instrument::Hat,
        Instrument::Bass,
        Instrument::Flute,
        Instrument::Bell,
        Instrument::Guitar,
        Instrument::Chime,
        Instrument::Xylophone,
        Instrument::IronXylophone,
        Instrument::CowBell,
        Instrument::Didgeridoo,
        Instrument::Bit,
        Instrument::Banjo,
        Instrument::Pling,
    ];

    /// Instrument name as used by scripts
    pub fn name(&self) -> &'static str {
        match self {
            Instrument::Harp => "harp",
            Instrument::Basedrum => "basedrum",
            Instrument::Snare => "snare",
            Instrument::Hat => "hat",
            Instrument::Bass => "bass",
            Instrument::Flute => "flute",
            Instrument::Bell => "bell",
            Instrument::Guitar => "guitar",
            Instrument::Chime => "chime",
            Instrument::Xylophone => "xylophone",
            Instrument::IronXylophone => "iron_xylophone",
            Instrument::CowBell => "cow_bell",
            Instrument::Didgeridoo => "didgeridoo",
            Instrument::Bit => "bit",
            Instrument::Banjo => "banjo",
            Instrument::Pling => "pling",
        }
    }

    /// Case-insensitive lookup by script name.
    ///
    /// Unknown names are a [`Error::InvalidInstrument`].
    pub fn from_name(name: &str) -> Result<Self> {
        Instrument::ALL
            .iter()
            .copied()
            .find(|instrument| instrument.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::InvalidInstrument(name.to_string()))
    }

    /// Sound event played when this instrument triggers
    pub fn sound(&self) -> SoundId {
        SoundId {
            namespace: DEFAULT_NAMESPACE.to_string(),
            path: format!("block.note_block.{}", self.name()),
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Convert a note-block semitone (0..=24) to a playback-speed multiplier.
///
/// Semitone 12 maps to unity speed; 0 and 24 are one octave below and
/// above it, so the 24-step range spans exactly two octaves.
pub fn semitone_to_speed(semitone: f64) -> f64 {
    2.0_f64.powf((semitone - 12.0) / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_namespaced_name() {
        let id = SoundId::parse("minecraft:block.note_block.harp").unwrap();
        assert_eq!(id.namespace(), "minecraft");
        assert_eq!(id.path(), "block.note_block.harp");
        assert_eq!(id.to_string(), "minecraft:block.note_block.harp");
    }

    #[test]
    fn test_parse_defaults_namespace() {
        let id = SoundId::parse("entity.creeper.primed").unwrap();
        assert_eq!(id.namespace(), "minecraft");
        assert_eq!(id.path(), "entity.creeper.primed");
    }

    #[test]
    fn test_parse_rejects_bad_grammar() {
        for name in ["", "UPPER:case", "name with spaces", "ns:", "bad!chars:x", "a:b:c"] {
            let err = SoundId::parse(name).unwrap_err();
            assert!(
                matches!(err, Error::MalformedSoundName(_)),
                "expected malformed-name error for {name:?}"
            );
        }
    }

    #[test]
    fn test_path_allows_slashes() {
        let id = SoundId::parse("mymod:music/overworld/day").unwrap();
        assert_eq!(id.path(), "music/overworld/day");
    }

    #[test]
    fn test_instrument_lookup_is_case_insensitive() {
        assert_eq!(Instrument::from_name("harp").unwrap(), Instrument::Harp);
        assert_eq!(Instrument::from_name("HARP").unwrap(), Instrument::Harp);
        assert_eq!(
            Instrument::from_name("Iron_Xylophone").unwrap(),
            Instrument::IronXylophone
        );
        assert!(matches!(
            Instrument::from_name("kazoo"),
            Err(Error::InvalidInstrument(_))
        ));
    }

    #[test]
    fn test_instrument_sound_mapping() {
        assert_eq!(
            Instrument::Basedrum.sound().to_string(),
            "minecraft:block.note_block.basedrum"
        );
    }

    #[test]
    fn test_semitone_twelve_is_unity() {
        assert_relative_eq!(semitone_to_speed(12.0), 1.0);
    }

    #[test]
    fn test_semitone_range_spans_two_octaves() {
        let low = semitone_to_speed(0.0);
        let high = semitone_to_speed(24.0);
        assert_relative_eq!(low, 0.5);
        assert_relative_eq!(high, 2.0);
        assert_relative_eq!(high / low, 4.0);
    }
}
