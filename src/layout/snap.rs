use crate::geometry::{Bounds, Point, Viewport};
use crate::window::SnapRegion;

/// Screen edge a drag release docks against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapZone {
    Top,
    Left,
    Right,
}

impl SnapZone {
    /// The half-screen region for side zones; `None` for the maximize zone.
    pub fn region(self) -> Option<SnapRegion> {
        match self {
            SnapZone::Top => None,
            SnapZone::Left => Some(SnapRegion::LeftHalf),
            SnapZone::Right => Some(SnapRegion::RightHalf),
        }
    }
}

/// Zone and target geometry shown while a drag hovers over a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapPreview {
    pub zone: SnapZone,
    pub bounds: Bounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapEngine {
    threshold: u32,
}

impl SnapEngine {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    /// First matching zone, checked top, then left, then right.
    pub fn zone_at(&self, pointer: Point, viewport: &Viewport) -> Option<SnapZone> {
        let threshold = self.threshold.min(i32::MAX as u32) as i32;
        if threshold == 0 {
            return None;
        }
        let width = viewport.width.min(i32::MAX as u32) as i32;
        if pointer.y < threshold {
            Some(SnapZone::Top)
        } else if pointer.x < threshold {
            Some(SnapZone::Left)
        } else if pointer.x > width.saturating_sub(threshold) {
            Some(SnapZone::Right)
        } else {
            None
        }
    }

    pub fn preview(&self, pointer: Point, viewport: &Viewport) -> Option<SnapPreview> {
        self.zone_at(pointer, viewport).map(|zone| SnapPreview {
            zone,
            bounds: zone_bounds(zone, viewport),
        })
    }
}

pub fn zone_bounds(zone: SnapZone, viewport: &Viewport) -> Bounds {
    match zone.region() {
        Some(region) => region_bounds(region, viewport),
        None => viewport.usable_bounds(),
    }
}

/// Geometry of a docked half. The right half takes the odd unit so the two
/// halves always tile the full width.
pub fn region_bounds(region: SnapRegion, viewport: &Viewport) -> Bounds {
    let half = viewport.width / 2;
    let height = viewport.usable_height();
    match region {
        SnapRegion::LeftHalf => Bounds::new(0, 0, half, height),
        SnapRegion::RightHalf => Bounds::new(
            half.min(i32::MAX as u32) as i32,
            0,
            viewport.width - half,
            height,
        ),
    }
}
