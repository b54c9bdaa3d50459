//! Orbit geometry: node slot → absolute tree coordinates.

use std::f64::consts::PI;

use crate::raw::RawConstants;

/// Coordinate space of the scaled tree (group coordinates times the zoom scale).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeSpace;

pub type Point = euclid::Point2D<f64, TreeSpace>;
pub type Size = euclid::Size2D<f64, TreeSpace>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn size(width: f64, height: f64) -> Size {
    euclid::size2(width, height)
}

// Orbits with these slot counts are not evenly spaced.
const ORBIT_16_DEGREES: [f64; 16] = [
    0.0, 30.0, 45.0, 60.0, 90.0, 120.0, 135.0, 150.0, 180.0, 210.0, 225.0, 240.0, 270.0, 300.0,
    315.0, 330.0,
];
const ORBIT_40_DEGREES: [f64; 40] = [
    0.0, 10.0, 20.0, 30.0, 40.0, 45.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0, 120.0, 130.0,
    135.0, 140.0, 150.0, 160.0, 170.0, 180.0, 190.0, 200.0, 210.0, 220.0, 225.0, 230.0, 240.0,
    250.0, 260.0, 270.0, 280.0, 290.0, 300.0, 310.0, 315.0, 320.0, 330.0, 340.0, 350.0,
];

/// Per-orbit slot angles (radians) derived from the number of slots on each orbit.
pub fn orbit_angles_from_skills_per_orbit(skills_per_orbit: &[usize]) -> Vec<Vec<f64>> {
    skills_per_orbit
        .iter()
        .map(|&n| match n {
            16 => ORBIT_16_DEGREES.iter().map(|d| d.to_radians()).collect(),
            40 => ORBIT_40_DEGREES.iter().map(|d| d.to_radians()).collect(),
            0 => Vec::new(),
            n => (0..n).map(|i| 2.0 * PI * i as f64 / n as f64).collect(),
        })
        .collect()
}

/// Orbit radius and angle tables shared by every group of a tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrbitTable {
    radii: Vec<f64>,
    angles: Vec<Vec<f64>>,
}

impl OrbitTable {
    pub fn new(radii: Vec<f64>, angles: Vec<Vec<f64>>) -> Self {
        Self { radii, angles }
    }

    pub fn from_constants(constants: &RawConstants) -> Self {
        let angles = match &constants.orbit_angles {
            Some(explicit) => explicit.clone(),
            None => orbit_angles_from_skills_per_orbit(&constants.skills_per_orbit),
        };
        Self::new(constants.orbit_radii.clone(), angles)
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    pub fn radius(&self, orbit: usize) -> Option<f64> {
        self.radii.get(orbit).copied()
    }

    /// Slot angle in radians; `0` when the orbit or slot is not in the table.
    pub fn arc(&self, orbit: usize, orbit_index: usize) -> f64 {
        self.angles
            .get(orbit)
            .and_then(|slots| slots.get(orbit_index))
            .copied()
            .unwrap_or(0.0)
    }

    /// Absolute position of slot `orbit_index` on `orbit` around `group`.
    ///
    /// Resolves to the origin when the node has no group or the orbit has no radius.
    pub fn position(
        &self,
        group: Option<Point>,
        orbit: usize,
        orbit_index: usize,
        scale: f64,
    ) -> Point {
        let (Some(group), Some(radius)) = (group, self.radius(orbit)) else {
            return Point::origin();
        };
        let arc = self.arc(orbit, orbit_index);
        point(
            group.x * scale - radius * scale * (-arc).sin(),
            group.y * scale - radius * scale * (-arc).cos(),
        )
    }
}
