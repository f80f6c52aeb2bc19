//! Turtle identity codec
//!
//! Serializes a turtle's persistent identity into an [`ItemRecord`] and
//! back. Only non-default fields are written, so a freshly crafted turtle
//! encodes to an empty record. Decoding never fails: each field is read
//! independently and absence means "default", while upgrade keys that no
//! longer resolve in the registry decode to no upgrade at all.

use crate::identity::display::{derive_display_name, DisplayName};
use crate::identity::record::ItemRecord;
use crate::identity::upgrade::{TurtleFamily, TurtleSide, TurtleUpgrade, UpgradeRegistry};

const TAG_ID: &str = "computer_id";
const TAG_LABEL: &str = "label";
const TAG_COLOUR: &str = "colour";
const TAG_FUEL: &str = "fuel";
const TAG_OVERLAY: &str = "overlay";
const TAG_LEFT_UPGRADE: &str = "left_upgrade";
const TAG_RIGHT_UPGRADE: &str = "right_upgrade";

/// Persistent identity of a single turtle item.
///
/// The numeric id, overlay and upgrades are fixed when the identity is
/// built; label, colour and fuel level change over the item's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurtleIdentity {
    family: TurtleFamily,
    id: Option<i32>,
    label: Option<String>,
    colour: Option<u32>,
    fuel_level: u32,
    overlay: Option<String>,
    left_upgrade: Option<TurtleUpgrade>,
    right_upgrade: Option<TurtleUpgrade>,
}

impl TurtleIdentity {
    /// Create a blank identity: no id, label, colour, fuel, upgrades or overlay
    pub fn new(family: TurtleFamily) -> Self {
        TurtleIdentity {
            family,
            id: None,
            label: None,
            colour: None,
            fuel_level: 0,
            overlay: None,
            left_upgrade: None,
            right_upgrade: None,
        }
    }

    /// Build a fully specified identity.
    ///
    /// A negative `id` means "unassigned"; 0 is a valid assigned id.
    /// `colour` is a packed RGB value, with `None` (not black) meaning unset.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        family: TurtleFamily,
        id: i32,
        label: Option<&str>,
        colour: Option<u32>,
        left_upgrade: Option<TurtleUpgrade>,
        right_upgrade: Option<TurtleUpgrade>,
        fuel_level: u32,
        overlay: Option<&str>,
    ) -> Self {
        TurtleIdentity {
            family,
            id: if id >= 0 { Some(id) } else { None },
            label: label.map(str::to_string),
            colour,
            fuel_level,
            overlay: overlay.map(str::to_string),
            left_upgrade,
            right_upgrade,
        }
    }

    /// Item tier this identity belongs to
    pub fn family(&self) -> TurtleFamily {
        self.family
    }

    /// Assigned numeric id, if any. 0 is a valid assigned id.
    pub fn id(&self) -> Option<i32> {
        self.id
    }

    /// User-assigned display label, if any
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Cosmetic colour tint as packed RGB, if set
    pub fn colour(&self) -> Option<u32> {
        self.colour
    }

    /// Remaining fuel units
    pub fn fuel_level(&self) -> u32 {
        self.fuel_level
    }

    /// Cosmetic overlay skin reference, if any
    pub fn overlay(&self) -> Option<&str> {
        self.overlay.as_deref()
    }

    /// Upgrade mounted on `side`, if any
    pub fn upgrade(&self, side: TurtleSide) -> Option<&TurtleUpgrade> {
        match side {
            TurtleSide::Left => self.left_upgrade.as_ref(),
            TurtleSide::Right => self.right_upgrade.as_ref(),
        }
    }

    /// Replace the display label
    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    /// Replace the colour tint (`None` clears it)
    pub fn set_colour(&mut self, colour: Option<u32>) {
        self.colour = colour;
    }

    /// Replace the fuel level
    pub fn set_fuel_level(&mut self, fuel_level: u32) {
        self.fuel_level = fuel_level;
    }

    /// Serialize into a persisted record, omitting unset/default fields
    pub fn encode(&self) -> ItemRecord {
        let mut record = ItemRecord::new();
        if let Some(id) = self.id {
            record.put_int(TAG_ID, id);
        }
        if let Some(label) = &self.label {
            record.put_string(TAG_LABEL, label.as_str());
        }
        if let Some(colour) = self.colour {
            record.put_int(TAG_COLOUR, colour as i32);
        }
        if self.fuel_level > 0 {
            record.put_int(TAG_FUEL, self.fuel_level as i32);
        }
        if let Some(overlay) = &self.overlay {
            record.put_string(TAG_OVERLAY, overlay.as_str());
        }
        if let Some(upgrade) = &self.left_upgrade {
            record.put_string(TAG_LEFT_UPGRADE, upgrade.key());
        }
        if let Some(upgrade) = &self.right_upgrade {
            record.put_string(TAG_RIGHT_UPGRADE, upgrade.key());
        }
        record
    }

    /// Rebuild an identity from a persisted record.
    ///
    /// Absent keys decode to the field's default. Upgrade keys are resolved
    /// through `registry`; keys that no longer resolve decode to no upgrade
    /// rather than failing the whole item.
    pub fn decode(record: &ItemRecord, family: TurtleFamily, registry: &UpgradeRegistry) -> Self {
        TurtleIdentity {
            family,
            id: record.get_int(TAG_ID),
            label: record.get_string(TAG_LABEL).map(str::to_string),
            colour: record.get_int(TAG_COLOUR).map(|c| c as u32),
            fuel_level: record.get_int(TAG_FUEL).unwrap_or(0).max(0) as u32,
            overlay: record.get_string(TAG_OVERLAY).map(str::to_string),
            left_upgrade: record
                .get_string(TAG_LEFT_UPGRADE)
                .and_then(|key| registry.resolve(key))
                .cloned(),
            right_upgrade: record
                .get_string(TAG_RIGHT_UPGRADE)
                .and_then(|key| registry.resolve(key))
                .cloned(),
        }
    }

    /// Rebuild this identity for a different item tier, preserving every
    /// other field verbatim. Used when a turtle is crafted into a new tier.
    pub fn with_family(&self, family: TurtleFamily) -> Self {
        TurtleIdentity {
            family,
            ..self.clone()
        }
    }

    /// Select the display-name template for this identity
    pub fn display_name(&self) -> DisplayName {
        derive_display_name(self)
    }
}

/// Identities stocked in the creative listing for `family`: one plain
/// turtle plus one per suitable upgrade, mounted on the right side, in
/// registry order.
pub fn stock_variants(family: TurtleFamily, registry: &UpgradeRegistry) -> Vec<TurtleIdentity> {
    let mut variants = vec![TurtleIdentity::new(family)];
    variants.extend(
        registry
            .iter()
            .filter(|upgrade| registry.suitable_for(family, upgrade))
            .map(|upgrade| {
                TurtleIdentity::create(family, -1, None, None, None, Some(upgrade.clone()), 0, None)
            }),
    );
    variants
}
