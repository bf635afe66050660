//! Three-component world positions and lenient free-text parsing.
//!
//! Game clients paste coordinates in whatever shape their tooling prints:
//! `vector3(12.5, -3, 30.0)`, `vec3(1,2,3)`, `{x=1 y=2 z=3}`, `1 2 3`.
//! [`Vec3::parse_lenient`] extracts the first three numbers in order and
//! falls back to the origin when that is not possible.

use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

// Leading `name(` of a functional wrapper; its digits are not coordinates.
static WRAPPER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_]\w*\s*\(").expect("valid regex"));

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("valid regex"));

/// A position in game world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// Returns this position shifted by the given offset.
    pub fn offset(&self, dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Parse the first three numeric tokens of arbitrary text into x, y, z.
    ///
    /// Never fails: empty input, fewer than three numbers, or a number that
    /// does not fit an `f64` all yield [`Vec3::ZERO`].
    pub fn parse_lenient(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::ZERO;
        }

        let body = match WRAPPER_RE.find(trimmed) {
            Some(wrapper) => &trimmed[wrapper.end()..],
            None => trimmed,
        };

        let mut numbers = NUMBER_RE
            .find_iter(body)
            .take(3)
            .map(|m| m.as_str().parse::<f64>());

        match (numbers.next(), numbers.next(), numbers.next()) {
            (Some(Ok(x)), Some(Ok(y)), Some(Ok(z))) if x.is_finite() && y.is_finite() && z.is_finite() => {
                Self { x, y, z }
            }
            _ => Self::ZERO,
        }
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vector3({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_functional_wrapper() {
        let v = Vec3::parse_lenient("vector3(125.5, -842.25, 30.0)");
        assert_eq!(v, Vec3::new(125.5, -842.25, 30.0));
    }

    #[test]
    fn test_parse_ignores_punctuation_and_labels() {
        assert_eq!(
            Vec3::parse_lenient("{x = 1, y = -2, z = 3.5}"),
            Vec3::new(1.0, -2.0, 3.5)
        );
        assert_eq!(Vec3::parse_lenient("  10 20 30  "), Vec3::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn test_parse_takes_first_three_numbers() {
        let v = Vec3::parse_lenient("vec4(1, 2, 3, 4)");
        assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_parse_numbers_glued_to_labels() {
        assert_eq!(
            Vec3::parse_lenient("X1.5 Y2.5 Z3.5"),
            Vec3::new(1.5, 2.5, 3.5)
        );
    }

    #[test]
    fn test_parse_dash_separated_numbers_keep_sign() {
        assert_eq!(
            Vec3::parse_lenient("10-20-30"),
            Vec3::new(10.0, -20.0, -30.0)
        );
    }

    #[test]
    fn test_parse_malformed_yields_origin() {
        assert_eq!(Vec3::parse_lenient(""), Vec3::ZERO);
        assert_eq!(Vec3::parse_lenient("   "), Vec3::ZERO);
        assert_eq!(Vec3::parse_lenient("vector3(1, 2)"), Vec3::ZERO);
        assert_eq!(Vec3::parse_lenient("no numbers here"), Vec3::ZERO);
    }

    #[test]
    fn test_display_round_trips() {
        for v in [
            Vec3::new(100.0, 200.0, 30.0),
            Vec3::new(-1.5, 0.25, -1000.125),
            Vec3::new(0.0, -0.5, 7.0),
        ] {
            let parsed = Vec3::parse_lenient(&v.to_string());
            assert!((parsed.x - v.x).abs() < 1e-9);
            assert!((parsed.y - v.y).abs() < 1e-9);
            assert!((parsed.z - v.z).abs() < 1e-9);
        }
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(Vec3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(json, serde_json::json!({"x": 1.0, "y": 2.0, "z": 3.0}));
    }
}
