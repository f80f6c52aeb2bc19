//! Upgrade capability table
//!
//! Upgrades are identified by a stable string key and resolved through an
//! [`UpgradeRegistry`] owned by the embedding application. The registry is
//! passed explicitly wherever keys must be resolved; there is no ambient
//! global table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which side of the turtle an upgrade is mounted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurtleSide {
    /// The turtle's left side
    Left,
    /// The turtle's right side
    Right,
}

/// Item tier a turtle identity belongs to.
///
/// The family determines the base translation key used by display names
/// and which upgrades are offered in the stock listing. It places no
/// constraint on which upgrades may be mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TurtleFamily {
    /// Base tier
    #[default]
    Normal,
    /// Advanced tier
    Advanced,
}

impl TurtleFamily {
    /// Base translation key for display names of this family
    pub fn translation_key(&self) -> &'static str {
        match self {
            TurtleFamily::Normal => "item.turtleworks.turtle_normal",
            TurtleFamily::Advanced => "item.turtleworks.turtle_advanced",
        }
    }
}

/// A pluggable turtle capability, identified by a stable string key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurtleUpgrade {
    key: String,
    adjective: String,
    restricted_to: Option<TurtleFamily>,
}

impl TurtleUpgrade {
    /// Create an upgrade usable by every family
    ///
    /// `adjective` is the unlocalised adjective substituted into upgraded
    /// display-name templates (e.g. "Drilling").
    pub fn new(key: impl Into<String>, adjective: impl Into<String>) -> Self {
        TurtleUpgrade {
            key: key.into(),
            adjective: adjective.into(),
            restricted_to: None,
        }
    }

    /// Create an upgrade only stocked for `family`
    pub fn restricted(
        key: impl Into<String>,
        adjective: impl Into<String>,
        family: TurtleFamily,
    ) -> Self {
        TurtleUpgrade {
            key: key.into(),
            adjective: adjective.into(),
            restricted_to: Some(family),
        }
    }

    /// Stable key this upgrade is registered and persisted under
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Unlocalised display-name adjective
    pub fn adjective(&self) -> &str {
        &self.adjective
    }
}

/// Registry of known upgrades: stable string key to upgrade record.
///
/// Iteration order is registration order.
#[derive(Debug, Clone, Default)]
pub struct UpgradeRegistry {
    upgrades: Vec<TurtleUpgrade>,
    index: HashMap<String, usize>,
}

impl UpgradeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        UpgradeRegistry::default()
    }

    /// Register an upgrade, replacing any previous entry under the same key
    pub fn register(&mut self, upgrade: TurtleUpgrade) {
        match self.index.get(upgrade.key()) {
            Some(&slot) => self.upgrades[slot] = upgrade,
            None => {
                self.index.insert(upgrade.key().to_string(), self.upgrades.len());
                self.upgrades.push(upgrade);
            }
        }
    }

    /// Resolve a stable key to its upgrade record
    pub fn resolve(&self, key: &str) -> Option<&TurtleUpgrade> {
        self.index.get(key).map(|&slot| &self.upgrades[slot])
    }

    /// Whether `upgrade` is suitable for a turtle of `family`
    pub fn suitable_for(&self, family: TurtleFamily, upgrade: &TurtleUpgrade) -> bool {
        match upgrade.restricted_to {
            Some(restricted) => restricted == family,
            None => true,
        }
    }

    /// All registered upgrades, in registration order
    pub fn iter(&self) -> impl Iterator<Item = &TurtleUpgrade> {
        self.upgrades.iter()
    }

    /// Number of registered upgrades
    pub fn len(&self) -> usize {
        self.upgrades.len()
    }

    /// True if no upgrades are registered
    pub fn is_empty(&self) -> bool {
        self.upgrades.is_empty()
    }
}
