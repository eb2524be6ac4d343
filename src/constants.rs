//! Shared crate-wide constants.
//!
//! Defaults are expressed in layout units. The desktop simulation this crate
//! models used pixels, so the defaults are pixel-scale; the terminal front end
//! swaps in cell-scale values through [`crate::config::DesktopConfig::terminal`].

/// Distance from a viewport edge inside which a drag release docks the
/// window.
pub const DEFAULT_SNAP_THRESHOLD: u32 = 20;

/// Height reserved at the bottom of the viewport for the taskbar.
pub const DEFAULT_TASKBAR_HEIGHT: u32 = 60;

/// Height of the window header, measured from the top of the window bounds.
pub const DEFAULT_HEADER_HEIGHT: u32 = 32;

/// Thickness of the resize grip along each window edge.
pub const DEFAULT_HANDLE_THICKNESS: u32 = 4;

/// Width of each header control button (minimize, maximize, close).
pub const DEFAULT_CONTROL_WIDTH: u32 = 40;

/// Position of the first cascaded window on both axes.
pub const CASCADE_ORIGIN: i32 = 100;

/// Offset added per already-open window when cascading.
pub const CASCADE_STEP: i32 = 30;

pub const DEFAULT_WINDOW_WIDTH: u32 = 600;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 400;
pub const DEFAULT_MIN_WIDTH: u32 = 300;
pub const DEFAULT_MIN_HEIGHT: u32 = 200;

/// Two header presses on the same window within this many milliseconds
/// count as a double-click.
pub const DOUBLE_CLICK_MS: u64 = 500;

/// Lifetime of a notification toast before it dismisses itself.
pub const NOTIFICATION_LIFETIME_MS: u64 = 5000;
