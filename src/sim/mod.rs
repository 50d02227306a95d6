//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time is handed in; no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (store order; mugs resolve newest-first)
//! - No rendering or platform dependencies

pub mod bartender;
pub mod collision;
pub mod difficulty;
pub mod motion;
pub mod round;
pub mod spawn;
pub mod state;
pub mod tick;

pub use bartender::LaneShift;
pub use collision::Resolution;
pub use state::{
    Bartender, BartenderState, FailureKind, FailureNotice, GameEvent, GameState, Mug, MugId,
    MugState, Patron, PatronId, PatronState, Phase,
};
pub use tick::{TickInput, tick};
