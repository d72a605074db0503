//! Semantic action IDs for clickable UI regions.
//!
//! Registered during render, dispatched as `InputEvent::Click`.

// ── Start screen ────────────────────────────────────────────────
/// Base + difficulty index (0 = Easy, 1 = Medium, 2 = Hard).
pub const SELECT_DIFFICULTY_BASE: u16 = 10;

// ── Game screen ─────────────────────────────────────────────────
pub const CLICK_DROPLET: u16 = 0;

/// Base + catalog index of the upgrade row.
pub const BUY_UPGRADE_BASE: u16 = 100;
