/// Movement tuning constants and runtime-tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovementConfig {
    /// Speed rating that yields exactly one action per turn.
    pub quantum: u32,
    /// Live neighbours at which an actor stops moving and only fights.
    ///
    /// Inclusive: with the default of 6, six or more adjacent actors
    /// (player included) leave only attack candidates.
    pub crowd_threshold: u32,
    /// Radius in which companions look for objects worth fetching.
    pub pet_search_radius: u32,
    /// Companions step onto a known harmful trap once in this many decisions
    /// when nothing safer is available.
    pub trap_risk_odds: u32,
    /// Maximum distance a leashed actor may stray from its anchor.
    pub leash_tether: u32,
    /// Hit point percentage below which hostile actors retreat.
    pub flee_hp_percent: u32,
    /// Denominator of the first tie replacement (2 means a fair coin).
    pub tie_break_base: u32,
    /// Squared distance from the player at which companions come back.
    pub companion_follow_distance_sq: u32,
    /// A calm companion heads for the player once in this many decisions.
    pub companion_whim_odds: u32,
    /// Companions refuse to attack targets this many levels above their own.
    pub companion_level_margin: u8,
    /// Tunnellers do not dig while approaching a goal this close.
    pub dig_suppress_range: u32,
    /// A peaceful actor notices the player once in this many decisions.
    pub peaceful_notice_odds: u32,
}

impl MovementConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_LEAP_RADIUS: u32 = 3;
    /// Every cell within the maximum leap radius except the centre.
    pub const MAX_CANDIDATES: usize = 48;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_QUANTUM: u32 = 12;
    pub const DEFAULT_CROWD_THRESHOLD: u32 = 6;
    pub const DEFAULT_PET_SEARCH_RADIUS: u32 = 5;
    pub const DEFAULT_TRAP_RISK_ODDS: u32 = 40;
    pub const DEFAULT_LEASH_TETHER: u32 = 2;
    pub const DEFAULT_FLEE_HP_PERCENT: u32 = 25;
    pub const DEFAULT_TIE_BREAK_BASE: u32 = 2;
    pub const DEFAULT_COMPANION_FOLLOW_DISTANCE_SQ: u32 = 9;
    pub const DEFAULT_COMPANION_WHIM_ODDS: u32 = 4;
    pub const DEFAULT_COMPANION_LEVEL_MARGIN: u8 = 2;
    pub const DEFAULT_DIG_SUPPRESS_RANGE: u32 = 2;
    pub const DEFAULT_PEACEFUL_NOTICE_ODDS: u32 = 10;

    pub fn new() -> Self {
        Self {
            quantum: Self::DEFAULT_QUANTUM,
            crowd_threshold: Self::DEFAULT_CROWD_THRESHOLD,
            pet_search_radius: Self::DEFAULT_PET_SEARCH_RADIUS,
            trap_risk_odds: Self::DEFAULT_TRAP_RISK_ODDS,
            leash_tether: Self::DEFAULT_LEASH_TETHER,
            flee_hp_percent: Self::DEFAULT_FLEE_HP_PERCENT,
            tie_break_base: Self::DEFAULT_TIE_BREAK_BASE,
            companion_follow_distance_sq: Self::DEFAULT_COMPANION_FOLLOW_DISTANCE_SQ,
            companion_whim_odds: Self::DEFAULT_COMPANION_WHIM_ODDS,
            companion_level_margin: Self::DEFAULT_COMPANION_LEVEL_MARGIN,
            dig_suppress_range: Self::DEFAULT_DIG_SUPPRESS_RANGE,
            peaceful_notice_odds: Self::DEFAULT_PEACEFUL_NOTICE_ODDS,
        }
    }

    pub fn with_quantum(mut self, quantum: u32) -> Self {
        self.quantum = quantum;
        self
    }

    pub fn with_tie_break_base(mut self, base: u32) -> Self {
        self.tie_break_base = base;
        self
    }

    pub fn with_trap_risk_odds(mut self, odds: u32) -> Self {
        self.trap_risk_odds = odds;
        self
    }

    pub fn with_peaceful_notice_odds(mut self, odds: u32) -> Self {
        self.peaceful_notice_odds = odds;
        self
    }
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self::new()
    }
}
