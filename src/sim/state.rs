//! Game state and core simulation types
//!
//! Everything the renderer snapshots or a test inspects lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::lane_y;
use crate::tuning::Tuning;

pub type PatronId = u32;
pub type MugId = u32;

/// Current phase of the simulation loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the start trigger
    Ready,
    /// Active gameplay
    Playing,
    /// Frozen mid-level; all game-rule timers hold
    Paused,
    /// Terminal until an explicit restart
    GameOver,
}

/// Patron life stages, one active at a time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PatronState {
    /// Walking toward the bartender in discrete steps
    Approaching { step_timer: f32 },
    /// Standing still, burning patience
    Waiting { waited: f32 },
    /// Mug in hand, progress toward finishing the drink
    Drinking { progress: f32 },
    /// Done (happily or not), drifting off the far edge
    Served,
}

/// One arriving customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patron {
    pub id: PatronId,
    pub pos: Vec2,
    pub lane: usize,
    /// Walking speed, difficulty-scaled and jittered at spawn
    pub speed: f32,
    /// Waiting beyond this long is a timeout failure
    pub patience: f32,
    /// Cosmetic: which sprite the renderer picks
    pub sprite_index: u8,
    pub state: PatronState,
}

impl Patron {
    pub fn is_served(&self) -> bool {
        matches!(self.state, PatronState::Served)
    }

    pub fn is_drinking(&self) -> bool {
        matches!(self.state, PatronState::Drinking { .. })
    }

    /// Can still be hit by a forward mug (and still counts for lane gating)
    pub fn awaiting_service(&self) -> bool {
        !self.is_served() && !self.is_drinking()
    }
}

/// Mug travel stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MugState {
    /// Sliding down the bar toward the patrons
    SlidingForward,
    /// Parked with its target patron until they leave the screen
    AtPatron,
    /// Empty, sliding back toward the bartender
    SlidingBack,
    /// Drained and inert; does not block its lane
    Empty,
}

/// One serving vessel, engine-owned from pour to removal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mug {
    pub id: MugId,
    pub pos: Vec2,
    pub lane: usize,
    /// Forward slide speed, fixed at creation
    pub speed: f32,
    /// 0-100, set once from the bartender's pour; reset to 0 on return
    pub fill_level: f32,
    pub state: MugState,
    pub is_empty: bool,
    /// Relation only: the mug reads this patron's position while following it
    pub target_patron: Option<PatronId>,
}

impl Mug {
    /// Whether this mug still occupies its lane for spawn gating
    pub fn blocks_lane(&self) -> bool {
        self.state != MugState::Empty
    }
}

/// Bartender activity states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BartenderState {
    Idle,
    Filling,
    /// Just released a mug; recovering before the next action
    SlidingMug,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bartender {
    pub lane: usize,
    pub state: BartenderState,
    /// Accumulated pour, 0-100
    pub fill_level: f32,
    /// Countdown from SlidingMug back to Idle
    pub recover_timer: f32,
}

impl Default for Bartender {
    fn default() -> Self {
        Self {
            lane: 1,
            state: BartenderState::Idle,
            fill_level: 0.0,
            recover_timer: 0.0,
        }
    }
}

/// The three game-rule failures (not faults; see the notice queue)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// A waiting patron ran out of patience
    Timeout,
    /// A forward mug slid off the far edge
    Miss,
    /// A returning mug slipped past the catch window
    CatchMiss,
}

/// Transient, timestamped failure notification for the renderer
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FailureNotice {
    pub kind: FailureKind,
    /// Sim-clock time the failure occurred
    pub at: f64,
}

/// Events raised by a tick, drained to lifecycle hooks by the engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelComplete { level: u32, score: i64 },
    GameOver { score: i64, level: u32 },
    ComboMilestone { combo: u32 },
    Paused,
    Resumed,
}

/// Complete simulation state: the per-tick snapshot handed to the renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: Phase,
    pub score: i64,
    pub high_score: i64,
    /// 0-100; 0 is game over
    pub health: f32,
    pub level: u32,
    /// Accumulated sim time (seconds); advances only while playing
    pub clock: f64,
    /// Time spent in the current level window
    pub level_elapsed: f32,
    /// Remaining time in the current level window
    pub time_left: f32,
    pub combo: u32,
    pub max_combo: u32,
    /// Sim-clock time of the last successful serve
    pub last_serve_at: f64,
    pub total_serves: u32,
    pub perfect_serves: u32,
    pub patrons: Vec<Patron>,
    pub mugs: Vec<Mug>,
    pub bartender: Bartender,
    /// Shared spawn accumulator (per-lane gating happens at spawn time)
    pub spawn_acc: f32,
    pub notices: Vec<FailureNotice>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    next_patron_id: PatronId,
    next_mug_id: MugId,
}

impl GameState {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            phase: Phase::Ready,
            score: 0,
            high_score: 0,
            health: 100.0,
            level: 1,
            clock: 0.0,
            level_elapsed: 0.0,
            time_left: tuning.level_time,
            combo: 0,
            max_combo: 0,
            last_serve_at: 0.0,
            total_serves: 0,
            perfect_serves: 0,
            patrons: Vec::new(),
            mugs: Vec::new(),
            bartender: Bartender::default(),
            spawn_acc: 0.0,
            notices: Vec::new(),
            events: Vec::new(),
            next_patron_id: 1,
            next_mug_id: 1,
        }
    }

    /// Allocate a new patron ID
    pub fn alloc_patron_id(&mut self) -> PatronId {
        let id = self.next_patron_id;
        self.next_patron_id += 1;
        id
    }

    /// Allocate a new mug ID
    pub fn alloc_mug_id(&mut self) -> MugId {
        let id = self.next_mug_id;
        self.next_mug_id += 1;
        id
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Lane gate: an unserved patron already holds this lane
    pub fn lane_has_open_patron(&self, lane: usize) -> bool {
        self.patrons.iter().any(|p| p.lane == lane && !p.is_served())
    }

    /// Lane gate: a mug is still out (forward, parked, or returning) here
    pub fn lane_has_live_mug(&self, lane: usize) -> bool {
        self.mugs.iter().any(|m| m.lane == lane && m.blocks_lane())
    }

    /// First waiting, unserved patron in a lane (serve targeting)
    pub fn waiting_patron_in_lane(&self, lane: usize) -> Option<&Patron> {
        self.patrons
            .iter()
            .find(|p| p.lane == lane && matches!(p.state, PatronState::Waiting { .. }))
    }

    pub fn patron_by_id(&self, id: PatronId) -> Option<&Patron> {
        self.patrons.iter().find(|p| p.id == id)
    }

    /// Record a failure: timestamped notice plus combo reset. The health
    /// penalty is the caller's to route through its resolution pass.
    pub fn record_failure(&mut self, kind: FailureKind) {
        self.combo = 0;
        self.notices.push(FailureNotice {
            kind,
            at: self.clock,
        });
    }

    /// Clamp health into [0, 100] after applying a delta
    pub fn apply_health(&mut self, delta: f32) {
        self.health = (self.health + delta).clamp(0.0, 100.0);
    }

    /// Spawn position for a new patron entering a lane
    pub fn spawn_pos(lane: usize) -> Vec2 {
        Vec2::new(PLAYFIELD_WIDTH - SPAWN_MARGIN, lane_y(lane))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(7, &Tuning::default())
    }

    #[test]
    fn test_health_clamps_both_ends() {
        let mut s = state();
        s.apply_health(50.0);
        assert_eq!(s.health, 100.0);
        s.apply_health(-250.0);
        assert_eq!(s.health, 0.0);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut s = state();
        let a = s.alloc_patron_id();
        let b = s.alloc_patron_id();
        assert_ne!(a, b);
        let m = s.alloc_mug_id();
        let n = s.alloc_mug_id();
        assert_ne!(m, n);
    }

    #[test]
    fn test_lane_gates() {
        let mut s = state();
        assert!(!s.lane_has_open_patron(0));
        let id = s.alloc_patron_id();
        s.patrons.push(Patron {
            id,
            pos: GameState::spawn_pos(0),
            lane: 0,
            speed: 40.0,
            patience: 2.8,
            sprite_index: 0,
            state: PatronState::Waiting { waited: 0.0 },
        });
        assert!(s.lane_has_open_patron(0));
        assert!(!s.lane_has_open_patron(1));

        s.patrons[0].state = PatronState::Served;
        assert!(!s.lane_has_open_patron(0));

        let mid = s.alloc_mug_id();
        s.mugs.push(Mug {
            id: mid,
            pos: Vec2::new(200.0, crate::lane_y(0)),
            lane: 0,
            speed: 216.0,
            fill_level: 90.0,
            state: MugState::SlidingBack,
            is_empty: true,
            target_patron: None,
        });
        assert!(s.lane_has_live_mug(0));
        s.mugs[0].state = MugState::Empty;
        assert!(!s.lane_has_live_mug(0));
    }

    #[test]
    fn test_record_failure_resets_combo_and_stamps_notice() {
        let mut s = state();
        s.combo = 6;
        s.clock = 12.5;
        s.record_failure(FailureKind::Miss);
        assert_eq!(s.combo, 0);
        assert_eq!(s.notices.len(), 1);
        assert_eq!(s.notices[0].kind, FailureKind::Miss);
        assert_eq!(s.notices[0].at, 12.5);
    }
}
