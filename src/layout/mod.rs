pub mod floating;
pub mod snap;

pub use floating::{HeaderDrag, ResizeDrag, ResizeEdge, apply_resize_drag};
pub use snap::{SnapEngine, SnapPreview, SnapZone, region_bounds, zone_bounds};
