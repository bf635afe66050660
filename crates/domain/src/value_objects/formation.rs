//! Spawn formations - how a batch of NPCs is laid out around a center point.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Vec3;
use crate::error::DomainError;

/// Distance between neighbours in `line` and `square` formations.
pub const FORMATION_SPACING: f64 = 2.0;

/// Radius of the `circle` formation.
pub const CIRCLE_RADIUS: f64 = 2.0;

/// Half-width of the square area `scattered` spawns land in.
pub const SCATTER_EXTENT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Formation {
    #[default]
    Circle,
    Line,
    Square,
    Scattered,
}

impl Formation {
    pub fn all() -> &'static [Formation] {
        &[
            Formation::Circle,
            Formation::Line,
            Formation::Square,
            Formation::Scattered,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Formation::Circle => "circle",
            Formation::Line => "line",
            Formation::Square => "square",
            Formation::Scattered => "scattered",
        }
    }

    /// Compute the spawn position of member `index` out of `total`.
    ///
    /// `sample` draws a uniform value from `[min, max]`; only `scattered`
    /// calls it. The `z` coordinate of `center` is always preserved.
    pub fn position<F>(&self, center: Vec3, index: usize, total: usize, mut sample: F) -> Vec3
    where
        F: FnMut(f64, f64) -> f64,
    {
        if total == 0 {
            return center;
        }

        let i = index as f64;
        let n = total as f64;

        match self {
            Formation::Circle => {
                let angle = 2.0 * PI * i / n;
                center.offset(CIRCLE_RADIUS * angle.cos(), CIRCLE_RADIUS * angle.sin(), 0.0)
            }
            Formation::Line => center.offset((i - n / 2.0) * FORMATION_SPACING, 0.0, 0.0),
            Formation::Square => {
                let side = n.sqrt().ceil() as usize;
                let row = (index / side) as f64;
                let col = (index % side) as f64;
                let half = side as f64 / 2.0;
                center.offset(
                    (col - half) * FORMATION_SPACING,
                    (row - half) * FORMATION_SPACING,
                    0.0,
                )
            }
            Formation::Scattered => {
                let dx = sample(-SCATTER_EXTENT, SCATTER_EXTENT);
                let dy = sample(-SCATTER_EXTENT, SCATTER_EXTENT);
                center.offset(dx, dy, 0.0)
            }
        }
    }

    /// Positions for a whole batch, in index order.
    pub fn layout<F>(&self, center: Vec3, total: usize, mut sample: F) -> Vec<Vec3>
    where
        F: FnMut(f64, f64) -> f64,
    {
        (0..total)
            .map(|index| self.position(center, index, total, &mut sample))
            .collect()
    }
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Formation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "circle" => Ok(Formation::Circle),
            "line" => Ok(Formation::Line),
            "square" => Ok(Formation::Square),
            "scattered" => Ok(Formation::Scattered),
            _ => Err(DomainError::parse(format!("Unknown formation: {}", s))),
        }
    }
}
