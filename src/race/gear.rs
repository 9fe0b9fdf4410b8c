//! Gear resolver - ski/wax choices collapsed into two race-wide scalars.

use serde::{Deserialize, Serialize};

use crate::domain::EquipmentInventory;

/// Neutral grip/glide used when an item is unset or not in the inventory.
const NEUTRAL_VALUE: f32 = 70.0;

/// The two gear scalars applied uniformly for a whole race.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GearModifiers {
    /// Per-tick energy penalty; lower is better.
    pub grip_mod: f32,
    /// Speed multiplier in [0.9, 1.1].
    pub glide_mod: f32,
}

/// Resolves the chosen ski and wax into [`GearModifiers`]. Missing or
/// unknown ids fall back to neutral 70/70 values; this never errors.
pub fn resolve_gear(
    inventory: Option<&EquipmentInventory>,
    ski_id: Option<&str>,
    wax_id: Option<&str>,
) -> GearModifiers {
    let ski = inventory.and_then(|inv| inv.find(ski_id));
    let wax = inventory.and_then(|inv| inv.find(wax_id));

    let ski_grip = ski.map_or(NEUTRAL_VALUE, |item| item.grip);
    let ski_glide = ski.map_or(NEUTRAL_VALUE, |item| item.glide);
    let wax_grip = wax.map_or(NEUTRAL_VALUE, |item| item.grip);
    let wax_glide = wax.map_or(NEUTRAL_VALUE, |item| item.glide);

    let grip_mod = (140.0 - (ski_grip + wax_grip)) / 500.0;
    let glide_mod = (0.9 + ((ski_glide + wax_glide) / 200.0) * 0.2).clamp(0.9, 1.1);

    GearModifiers { grip_mod, glide_mod }
}
