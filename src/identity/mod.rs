//! Turtle upgrade & identity model
//!
//! Encodes and decodes which upgrade (if any) occupies each of a turtle's
//! two attachment sides, together with the auxiliary persistent attributes
//! (numeric id, label, colour tint, fuel level, overlay skin).
//!
//! Encoding writes only the fields that are set; decoding reads each field
//! independently and treats absence as the field's default, never as an
//! error. Upgrade keys are resolved against an [`UpgradeRegistry`] injected
//! by the caller, and keys that no longer resolve decode to "no upgrade"
//! so items survive upgrade mods being removed.

pub mod codec;
pub mod display;
pub mod record;
pub mod upgrade;

pub use codec::{stock_variants, TurtleIdentity};
pub use display::DisplayName;
pub use record::{ItemRecord, TagValue};
pub use upgrade::{TurtleFamily, TurtleSide, TurtleUpgrade, UpgradeRegistry};
