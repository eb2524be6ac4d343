//! A floating desktop window manager.
//!
//! [`WindowManager`] owns every window record, the pointer gesture in
//! flight, the taskbar and the event subscribers. Rendering lives in [`ui`]
//! and draws onto a ratatui buffer; the `desk-wm` binary wires it to a
//! crossterm terminal.

pub mod actions;
pub mod config;
pub mod constants;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod events;
pub mod geometry;
pub mod input;
pub mod keybindings;
pub mod layout;
pub mod taskbar;
pub mod timers;
pub mod tracing_sub;
pub mod ui;
pub mod window;

pub use config::DesktopConfig;
pub use error::{ConfigError, WmError, WmResult};
pub use events::{SubscriptionId, WindowEvent, WindowEventKind};
pub use geometry::{Bounds, Point, Viewport};
pub use window::{
    AppDescriptor, Dock, PointerEvent, SnapRegion, WindowId, WindowManager, WindowRecord,
    WindowState, WindowStateKind,
};
