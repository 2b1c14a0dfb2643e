//! Balloon Level Table
//!
//! Fixed configuration for the ten fairground levels. Read-only, indexed by
//! level number; every other balloon-game parameter derives from these rows.

/// Movement pattern applied to balloons while a level is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementPattern {
    /// Slow vertical rise and fall
    Float,
    /// Sideways wander
    Drift,
    /// Reflects off the spawn-area edges
    Bounce,
    /// Sharp alternating diagonals
    Zigzag,
    /// Circular orbit around the spawn point
    Spiral,
    /// Large horizontal sine sweep
    Wave,
    /// Fast combination of bounce and spiral
    Frenzy,
}

/// One row of the level table.
#[derive(Debug, Clone, Copy)]
pub struct LevelSpec {
    /// Level number (1-based)
    pub level: u32,
    /// Balloons to pop before the timer runs out
    pub balloon_count: u32,
    /// Balloon radius in logical pixels
    pub balloon_size: f32,
    /// Movement speed in logical pixels per second
    pub balloon_speed: f32,
    /// Movement pattern for every balloon this level
    pub pattern: MovementPattern,
    /// Time limit in whole seconds
    pub time_limit: u32,
}

/// Number of levels in the game.
pub const LEVEL_COUNT: u32 = 10;

const LEVELS: [LevelSpec; LEVEL_COUNT as usize] = [
    LevelSpec { level: 1, balloon_count: 6, balloon_size: 60.0, balloon_speed: 40.0, pattern: MovementPattern::Float, time_limit: 60 },
    LevelSpec { level: 2, balloon_count: 9, balloon_size: 56.0, balloon_speed: 50.0, pattern: MovementPattern::Drift, time_limit: 55 },
    LevelSpec { level: 3, balloon_count: 12, balloon_size: 52.0, balloon_speed: 60.0, pattern: MovementPattern::Bounce, time_limit: 50 },
    LevelSpec { level: 4, balloon_count: 15, balloon_size: 48.0, balloon_speed: 70.0, pattern: MovementPattern::Zigzag, time_limit: 45 },
    LevelSpec { level: 5, balloon_count: 18, balloon_size: 44.0, balloon_speed: 80.0, pattern: MovementPattern::Spiral, time_limit: 40 },
    LevelSpec { level: 6, balloon_count: 21, balloon_size: 40.0, balloon_speed: 90.0, pattern: MovementPattern::Bounce, time_limit: 35 },
    LevelSpec { level: 7, balloon_count: 24, balloon_size: 36.0, balloon_speed: 100.0, pattern: MovementPattern::Zigzag, time_limit: 30 },
    LevelSpec { level: 8, balloon_count: 27, balloon_size: 32.0, balloon_speed: 110.0, pattern: MovementPattern::Spiral, time_limit: 25 },
    LevelSpec { level: 9, balloon_count: 30, balloon_size: 28.0, balloon_speed: 120.0, pattern: MovementPattern::Wave, time_limit: 20 },
    LevelSpec { level: 10, balloon_count: 33, balloon_size: 24.0, balloon_speed: 130.0, pattern: MovementPattern::Frenzy, time_limit: 15 },
];

/// Look up a level row. Levels outside 1..=10 clamp to the nearest end so a
/// bad caller cannot index out of bounds.
pub fn level_spec(level: u32) -> &'static LevelSpec {
    let idx = level.clamp(1, LEVEL_COUNT) as usize - 1;
    &LEVELS[idx]
}

/// Points the player earns per balloon at the given level.
pub fn player_points(level: u32) -> u32 {
    10 * level
}

/// Points the opposing guard earns per balloon at the given level.
pub fn guard_points(level: u32) -> u32 {
    (8.0 * level as f32).round() as u32
}

/// Probability that a guard strike pops its target at the given level.
/// Starts at 0.6 and grows 0.04 per level, capped at 0.95.
pub fn guard_hit_probability(level: u32) -> f32 {
    (0.6 + 0.04 * (level.saturating_sub(1)) as f32).min(0.95)
}

/// Seconds between opposing-guard strikes. Shrinks with level, floored so the
/// guard never becomes a machine gun.
pub fn guard_interval(level: u32) -> f32 {
    (2.5 - 0.2 * (level.saturating_sub(1)) as f32).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_ten_levels() {
        assert_eq!(LEVELS.len(), 10);
        for (i, spec) in LEVELS.iter().enumerate() {
            assert_eq!(spec.level, i as u32 + 1);
        }
    }

    #[test]
    fn test_level_three_row() {
        let spec = level_spec(3);
        assert_eq!(spec.balloon_count, 12);
        assert_eq!(spec.time_limit, 50);
        assert_eq!(spec.pattern, MovementPattern::Bounce);
    }

    #[test]
    fn test_counts_and_times_are_monotone() {
        for pair in LEVELS.windows(2) {
            assert!(pair[1].balloon_count > pair[0].balloon_count);
            assert!(pair[1].time_limit < pair[0].time_limit);
            assert!(pair[1].balloon_speed > pair[0].balloon_speed);
            assert!(pair[1].balloon_size < pair[0].balloon_size);
        }
    }

    #[test]
    fn test_scoring_formulas() {
        assert_eq!(player_points(3), 30);
        assert_eq!(player_points(10), 100);
        assert_eq!(guard_points(3), 24);
        assert_eq!(guard_points(1), 8);
    }

    #[test]
    fn test_hit_probability_scaling() {
        assert!((guard_hit_probability(1) - 0.6).abs() < 1e-6);
        assert!((guard_hit_probability(2) - 0.64).abs() < 1e-6);
        // Monotone non-decreasing and capped
        let mut prev = 0.0;
        for level in 1..=20 {
            let p = guard_hit_probability(level);
            assert!(p >= prev);
            assert!(p <= 0.95);
            prev = p;
        }
        assert!((guard_hit_probability(15) - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_guard_interval_floor() {
        assert!(guard_interval(1) > guard_interval(5));
        for level in 1..=30 {
            assert!(guard_interval(level) >= 1.0);
        }
    }

    #[test]
    fn test_level_spec_clamps() {
        assert_eq!(level_spec(0).level, 1);
        assert_eq!(level_spec(99).level, 10);
    }
}
