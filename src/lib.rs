//! Tapkeeper - a lane-serving bartender arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, patrons, mugs, scoring)
//! - `engine`: Command/hook wrapper that drives the simulation per frame
//! - `persistence`: High-score storage port (LocalStorage on web)
//! - `tuning`: Data-driven game balance
//! - `web`: wasm-bindgen surface for the browser shell

pub mod engine;
pub mod persistence;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use engine::{Command, Engine, Hooks, LaneShift};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical playfield dimensions (4:3, render scaling is external)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Lane geometry: 3 horizontal tracks, patrons travel right-to-left
    pub const LANE_COUNT: usize = 3;
    pub const LANE_HEIGHT: f32 = 100.0;
    pub const LANE_Y_OFFSET: f32 = 50.0;

    /// Bartender stands at the near (left) end of every lane
    pub const BARTENDER_X: f32 = 100.0;
    /// Served mugs leave the tap this far ahead of the bartender
    pub const MUG_LAUNCH_OFFSET: f32 = 80.0;

    /// Patrons enter this far inside the far edge
    pub const SPAWN_MARGIN: f32 = 60.0;
    /// Served patrons are retired once they pass the far edge by this much
    pub const EXIT_MARGIN: f32 = 50.0;
    /// Unserved patrons are retired once they pass the bartender by this much
    pub const NEAR_EXIT_MARGIN: f32 = 30.0;
    /// A patron within this band of the bartender has breached the bar
    pub const BREACH_MARGIN: f32 = 20.0;

    /// Hit window around a patron's x for a forward mug
    pub const HIT_WINDOW_BEHIND: f32 = 20.0;
    pub const HIT_WINDOW_AHEAD: f32 = 40.0;
    /// A forward mug this close to the far edge has fallen off the bar
    pub const FAR_EDGE_MARGIN: f32 = 30.0;

    /// Knockback on a successful serve: base + min(cap, fill) px
    pub const KNOCKBACK_BASE: f32 = 60.0;
    pub const KNOCKBACK_FILL_CAP: f32 = 40.0;
    /// Minimum spacing preserved between queued patrons in a lane
    pub const MIN_PATRON_SPACING: f32 = 48.0;

    /// Catch band for returning mugs: [bartender_x - reach, bartender_x + range]
    pub const CATCH_RANGE: f32 = 45.0;
    pub const CATCH_REACH_BEHIND: f32 = 20.0;
    /// A returning mug past this line behind the bartender is lost
    pub const CATCH_MISS_X: f32 = 40.0;
    /// Vertical tolerance for catching in the bartender's current lane
    pub const CATCH_LANE_TOLERANCE: f32 = 30.0;

    /// How long failure notices stay visible to the renderer (seconds)
    pub const NOTICE_TTL: f64 = 2.0;

    /// Combo counts that raise a milestone event
    pub const COMBO_MILESTONES: [u32; 3] = [5, 10, 20];
}

/// Vertical center of a lane
#[inline]
pub fn lane_y(lane: usize) -> f32 {
    consts::LANE_Y_OFFSET + lane as f32 * consts::LANE_HEIGHT + consts::LANE_HEIGHT / 2.0
}
