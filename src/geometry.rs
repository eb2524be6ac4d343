//! Rectangle math shared by the registry, the interaction controller and the
//! snap engine.
//!
//! All coordinates are layout units. Origins are signed so a window may sit
//! partially off-screen; sizes are unsigned.

use ratatui::layout::Rect;

/// A point in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Signed offset from `origin` to `self`.
    pub fn delta_from(self, origin: Point) -> (i32, i32) {
        (
            self.x.saturating_sub(origin.x),
            self.y.saturating_sub(origin.y),
        )
    }
}

/// Signed rectangle origin with unsigned size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(clamp_dim(self.width))
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(clamp_dim(self.height))
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, point: Point) -> bool {
        if self.is_empty() {
            return false;
        }
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn intersection(&self, other: &Bounds) -> Option<Bounds> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Bounds::new(x, y, (right - x) as u32, (bottom - y) as u32))
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Bounds {
        Bounds {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// Grow the size up to the given floor, keeping the origin.
    pub fn with_min_size(&self, min_width: u32, min_height: u32) -> Bounds {
        Bounds {
            width: self.width.max(min_width),
            height: self.height.max(min_height),
            ..*self
        }
    }

    /// Portion of these bounds visible inside `area`, as a terminal rect.
    pub fn visible_in(&self, area: Rect) -> Option<Rect> {
        let area_bounds = Bounds::from(area);
        let visible = self.intersection(&area_bounds)?;
        Some(Rect {
            x: visible.x as u16,
            y: visible.y as u16,
            width: visible.width.min(u16::MAX as u32) as u16,
            height: visible.height.min(u16::MAX as u32) as u16,
        })
    }
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        Bounds::new(
            rect.x as i32,
            rect.y as i32,
            rect.width as u32,
            rect.height as u32,
        )
    }
}

fn clamp_dim(value: u32) -> i32 {
    value.min(i32::MAX as u32) as i32
}

/// The visible desktop surface and the strip reserved for the taskbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub taskbar_height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32, taskbar_height: u32) -> Self {
        Self {
            width,
            height,
            taskbar_height,
        }
    }

    /// Height left for windows once the taskbar is reserved.
    pub fn usable_height(&self) -> u32 {
        self.height.saturating_sub(self.taskbar_height)
    }

    /// Region a maximized window occupies.
    pub fn usable_bounds(&self) -> Bounds {
        Bounds::new(0, 0, self.width, self.usable_height())
    }

    /// Strip along the bottom edge where the taskbar is drawn.
    pub fn taskbar_bounds(&self) -> Bounds {
        Bounds::new(
            0,
            clamp_dim(self.usable_height()),
            self.width,
            self.height.min(self.taskbar_height),
        )
    }
}
