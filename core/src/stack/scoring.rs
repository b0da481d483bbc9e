//! Line-clear points and the level/speed curve.

use super::*;

/// Base points by number of rows cleared at once, multiplied by the level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

pub const SOFT_DROP_POINTS_PER_CELL: u32 = 1;
pub const HARD_DROP_POINTS_PER_CELL: u32 = 2;

pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0) * level
}

/// Levels start at 1 and go up every `lines_per_level` cleared rows.
pub fn level_for_lines(total_lines: u32, lines_per_level: u32) -> u32 {
    total_lines / lines_per_level.max(1) + 1
}

/// `max(floor, initial * factor^(level - 1))`. The floor never drops under
/// [`MIN_DROP_SPEED_MS`], even for configs that skipped validation.
pub fn drop_speed_ms(config: &StackConfig, level: u32) -> u64 {
    let exponent = i32::try_from(level.saturating_sub(1)).unwrap_or(i32::MAX);
    let speed = config.initial_speed_ms as f64 * config.speed_increase_factor.powi(exponent);
    (speed.round() as u64).max(config.min_speed_ms.max(MIN_DROP_SPEED_MS))
}
