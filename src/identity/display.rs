//! Display-name template selection
//!
//! A turtle's display name is one of four translation templates chosen by
//! which upgrade sides are occupied. The both-sides template takes the
//! right adjective before the left one; that ordering is a fixed naming
//! convention, not alphabetical.

use crate::identity::codec::TurtleIdentity;
use crate::identity::upgrade::TurtleSide;

/// Selected display-name template for a turtle identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayName {
    /// No upgrades: the family's base name
    Plain {
        /// Base translation key of the family
        base: &'static str,
    },
    /// Exactly one upgrade, on either side
    Upgraded {
        /// Base translation key of the family
        base: &'static str,
        /// Adjective of the single mounted upgrade
        adjective: String,
    },
    /// Both sides upgraded
    UpgradedTwice {
        /// Base translation key of the family
        base: &'static str,
        /// Adjective of the right-side upgrade (substituted first)
        right_adjective: String,
        /// Adjective of the left-side upgrade (substituted second)
        left_adjective: String,
    },
}

impl DisplayName {
    /// Translation key of the selected template
    pub fn template_key(&self) -> String {
        match self {
            DisplayName::Plain { base } => (*base).to_string(),
            DisplayName::Upgraded { base, .. } => format!("{base}.upgraded"),
            DisplayName::UpgradedTwice { base, .. } => format!("{base}.upgraded_twice"),
        }
    }

    /// Template arguments in substitution order
    pub fn arguments(&self) -> Vec<&str> {
        match self {
            DisplayName::Plain { .. } => Vec::new(),
            DisplayName::Upgraded { adjective, .. } => vec![adjective.as_str()],
            DisplayName::UpgradedTwice {
                right_adjective,
                left_adjective,
                ..
            } => vec![right_adjective.as_str(), left_adjective.as_str()],
        }
    }
}

pub(crate) fn derive_display_name(identity: &TurtleIdentity) -> DisplayName {
    let base = identity.family().translation_key();
    match (
        identity.upgrade(TurtleSide::Left),
        identity.upgrade(TurtleSide::Right),
    ) {
        (Some(left), Some(right)) => DisplayName::UpgradedTwice {
            base,
            right_adjective: right.adjective().to_string(),
            left_adjective: left.adjective().to_string(),
        },
        (Some(single), None) | (None, Some(single)) => DisplayName::Upgraded {
            base,
            adjective: single.adjective().to_string(),
        },
        (None, None) => DisplayName::Plain { base },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::upgrade::{TurtleFamily, TurtleUpgrade};

    fn drill() -> TurtleUpgrade {
        TurtleUpgrade::new("turtleworks:drill", "Drilling")
    }

    fn crane() -> TurtleUpgrade {
        TurtleUpgrade::new("turtleworks:crane", "Lifting")
    }

    #[test]
    fn test_plain_variant() {
        let identity = TurtleIdentity::new(TurtleFamily::Normal);
        let name = identity.display_name();
        assert_eq!(name.template_key(), "item.turtleworks.turtle_normal");
        assert!(name.arguments().is_empty());
    }

    #[test]
    fn test_single_upgrade_either_side() {
        let left_only = TurtleIdentity::create(
            TurtleFamily::Normal,
            -1,
            None,
            None,
            Some(drill()),
            None,
            0,
            None,
        );
        let right_only = TurtleIdentity::create(
            TurtleFamily::Normal,
            -1,
            None,
            None,
            None,
            Some(drill()),
            0,
            None,
        );

        for identity in [left_only, right_only] {
            let name = identity.display_name();
            assert_eq!(
                name.template_key(),
                "item.turtleworks.turtle_normal.upgraded"
            );
            assert_eq!(name.arguments(), vec!["Drilling"]);
        }
    }

    #[test]
    fn test_both_upgraded_orders_right_before_left() {
        let identity = TurtleIdentity::create(
            TurtleFamily::Advanced,
            -1,
            None,
            None,
            Some(drill()),
            Some(crane()),
            0,
            None,
        );

        let name = identity.display_name();
        assert_eq!(
            name.template_key(),
            "item.turtleworks.turtle_advanced.upgraded_twice"
        );
        assert_eq!(name.arguments(), vec!["Lifting", "Drilling"]);
    }
}
