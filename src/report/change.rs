//! Change classification between two survey waves.
//!
//! Significance is never computed here: it is a flag supplied by the dataset.
//! This module only decides the direction of a change and how to print it.

use serde::Serialize;

/// Changes within this many percentage points either way are `Neutral`.
pub const NEUTRAL_BAND: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Neutral,
}

impl Direction {
    /// Arrow glyph; empty for `Neutral`.
    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Up => "↑",
            Direction::Down => "↓",
            Direction::Neutral => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Change {
    /// `current - previous`, in percentage points.
    pub change: f64,
    pub direction: Direction,
}

pub fn calculate_change(current: f64, previous: f64) -> Change {
    let change = current - previous;
    let direction = if change > NEUTRAL_BAND {
        Direction::Up
    } else if change < -NEUTRAL_BAND {
        Direction::Down
    } else {
        Direction::Neutral
    };
    Change { change, direction }
}

/// `"↑ 3.7%"` for a significant, non-neutral change; `""` otherwise.
pub fn format_change_indicator(change: f64, direction: Direction, is_significant: bool) -> String {
    if !is_significant || direction == Direction::Neutral {
        return String::new();
    }
    format!("{} {:.1}%", direction.arrow(), change.abs())
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_uses_neutral_band() {
        let c = calculate_change(23.9, 20.2);
        assert!((c.change - 3.7).abs() < 1e-9);
        assert_eq!(c.direction, Direction::Up);

        assert_eq!(calculate_change(20.0, 20.05).direction, Direction::Neutral);
        assert_eq!(calculate_change(20.0, 19.95).direction, Direction::Neutral);
        assert_eq!(calculate_change(6.5, 9.0).direction, Direction::Down);
        assert_eq!(calculate_change(10.0, 10.0).direction, Direction::Neutral);
    }

    #[test]
    fn indicator_only_for_significant_moves() {
        assert_eq!(format_change_indicator(3.7, Direction::Up, true), "↑ 3.7%");
        assert_eq!(format_change_indicator(-1.2, Direction::Down, true), "↓ 1.2%");
        assert_eq!(format_change_indicator(3.7, Direction::Up, false), "");
        assert_eq!(format_change_indicator(0.05, Direction::Neutral, true), "");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(23.94), "23.9%");
        assert_eq!(format_percent(5.0), "5.0%");
    }
}
