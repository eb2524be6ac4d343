use crate::geometry::{Bounds, Point};
use crate::window::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    /// Compass name of the handle (`n`, `se`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            ResizeEdge::Top => "n",
            ResizeEdge::Bottom => "s",
            ResizeEdge::Left => "w",
            ResizeEdge::Right => "e",
            ResizeEdge::TopLeft => "nw",
            ResizeEdge::TopRight => "ne",
            ResizeEdge::BottomLeft => "sw",
            ResizeEdge::BottomRight => "se",
        }
    }

    pub fn from_sides(top: bool, bottom: bool, left: bool, right: bool) -> Option<Self> {
        match (top, bottom, left, right) {
            (true, _, true, _) => Some(ResizeEdge::TopLeft),
            (true, _, _, true) => Some(ResizeEdge::TopRight),
            (_, true, true, _) => Some(ResizeEdge::BottomLeft),
            (_, true, _, true) => Some(ResizeEdge::BottomRight),
            (true, _, _, _) => Some(ResizeEdge::Top),
            (_, true, _, _) => Some(ResizeEdge::Bottom),
            (_, _, true, _) => Some(ResizeEdge::Left),
            (_, _, _, true) => Some(ResizeEdge::Right),
            _ => None,
        }
    }

    fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeEdge::Left | ResizeEdge::TopLeft | ResizeEdge::BottomLeft
        )
    }

    fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeEdge::Right | ResizeEdge::TopRight | ResizeEdge::BottomRight
        )
    }

    fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeEdge::Top | ResizeEdge::TopLeft | ResizeEdge::TopRight
        )
    }

    fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeEdge::Bottom | ResizeEdge::BottomLeft | ResizeEdge::BottomRight
        )
    }
}

/// State captured when a resize handle is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDrag {
    pub id: WindowId,
    pub edge: ResizeEdge,
    pub start_pointer: Point,
    pub start_bounds: Bounds,
    pub min_width: u32,
    pub min_height: u32,
}

impl ResizeDrag {
    pub fn bounds_at(&self, pointer: Point) -> Bounds {
        let (dx, dy) = pointer.delta_from(self.start_pointer);
        apply_resize_drag(
            self.start_bounds,
            self.edge,
            dx,
            dy,
            self.min_width,
            self.min_height,
        )
    }
}

/// State captured when a window header is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderDrag {
    pub id: WindowId,
    pub start_pointer: Point,
    pub initial: Point,
    pub moved: bool,
}

impl HeaderDrag {
    /// Origin for the window when the pointer is at `pointer`. The header may
    /// not rise above the top of the viewport; horizontal travel is free.
    pub fn origin_at(&self, pointer: Point) -> Point {
        let (dx, dy) = pointer.delta_from(self.start_pointer);
        Point::new(
            self.initial.x.saturating_add(dx),
            self.initial.y.saturating_add(dy).max(0),
        )
    }
}

/// New bounds after dragging `edge` by `(dx, dy)` from `start`.
///
/// Near edges (top, left) move the origin so the opposite edge stays put;
/// far edges only change the size. Sizes floor at the minimums and a near
/// edge stops moving once its floor is reached.
pub fn apply_resize_drag(
    start: Bounds,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    min_width: u32,
    min_height: u32,
) -> Bounds {
    let min_w = min_width.max(1) as i64;
    let min_h = min_height.max(1) as i64;
    let start_w = start.width as i64;
    let start_h = start.height as i64;
    let mut x = start.x as i64;
    let mut y = start.y as i64;
    let mut width = start_w;
    let mut height = start_h;

    if edge.moves_right() {
        width = (start_w + dx as i64).max(min_w);
    } else if edge.moves_left() {
        width = (start_w - dx as i64).max(min_w);
        x += start_w - width;
    }
    if edge.moves_bottom() {
        height = (start_h + dy as i64).max(min_h);
    } else if edge.moves_top() {
        height = (start_h - dy as i64).max(min_h);
        y += start_h - height;
    }

    Bounds {
        x: x.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        y: y.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        width: width.min(u32::MAX as i64) as u32,
        height: height.min(u32::MAX as i64) as u32,
    }
}
