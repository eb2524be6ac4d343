pub mod decorator;
pub mod interaction;
pub mod registry;

mod transitions;
mod window_manager;

use std::fmt;

use crate::geometry::{Bounds, Point};

pub use decorator::{Chrome, DefaultDecorator, HeaderAction, HitZone, WindowDecorator, WindowView};
pub use interaction::{InteractionContext, InteractionController, PointerEvent, PointerKind};
pub use registry::{WindowRegistry, ZOrder};
pub use window_manager::WindowManager;

/// Identifier handed out by a [`WindowRegistry`]. Never reissued by the
/// registry that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl WindowId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

/// Screen half a window can dock to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapRegion {
    LeftHalf,
    RightHalf,
}

/// Docked layout a window can hold, and return to after being minimized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dock {
    Maximized,
    Snapped(SnapRegion),
}

impl Dock {
    pub fn state(self) -> WindowState {
        match self {
            Dock::Maximized => WindowState::Maximized,
            Dock::Snapped(region) => WindowState::Snapped(region),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowState {
    Normal,
    /// Hidden. `docked` remembers the layout the window was minimized from.
    Minimized { docked: Option<Dock> },
    Maximized,
    Snapped(SnapRegion),
}

impl WindowState {
    pub fn kind(self) -> WindowStateKind {
        match self {
            WindowState::Normal => WindowStateKind::Normal,
            WindowState::Minimized { .. } => WindowStateKind::Minimized,
            WindowState::Maximized => WindowStateKind::Maximized,
            WindowState::Snapped(_) => WindowStateKind::Snapped,
        }
    }

    /// Maximized or snapped: geometry is owned by the viewport, not the user.
    pub fn is_docked(self) -> bool {
        matches!(self, WindowState::Maximized | WindowState::Snapped(_))
    }

    pub fn is_minimized(self) -> bool {
        matches!(self, WindowState::Minimized { .. })
    }

    /// The docked layout this state holds, directly or behind a minimize.
    pub fn dock(self) -> Option<Dock> {
        match self {
            WindowState::Maximized => Some(Dock::Maximized),
            WindowState::Snapped(region) => Some(Dock::Snapped(region)),
            WindowState::Minimized { docked } => docked,
            WindowState::Normal => None,
        }
    }
}

/// Payload-free view of [`WindowState`] used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowStateKind {
    Normal,
    Minimized,
    Maximized,
    Snapped,
}

impl fmt::Display for WindowStateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WindowStateKind::Normal => "normal",
            WindowStateKind::Minimized => "minimized",
            WindowStateKind::Maximized => "maximized",
            WindowStateKind::Snapped => "snapped",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    pub min_width: u32,
    pub min_height: u32,
    pub resizable: bool,
    pub maximizable: bool,
    pub minimizable: bool,
    pub closable: bool,
}

impl Constraints {
    pub fn new(min_width: u32, min_height: u32) -> Self {
        Self {
            min_width,
            min_height,
            resizable: true,
            maximizable: true,
            minimizable: true,
            closable: true,
        }
    }

    /// Effective floors; a window is never narrower or shorter than one unit.
    pub fn min_size(&self) -> (u32, u32) {
        (self.min_width.max(1), self.min_height.max(1))
    }

    pub fn satisfied_by(&self, bounds: &Bounds) -> bool {
        let (min_w, min_h) = self.min_size();
        bounds.width >= min_w && bounds.height >= min_h
    }

    pub fn clamp(&self, bounds: Bounds) -> Bounds {
        let (min_w, min_h) = self.min_size();
        bounds.with_min_size(min_w, min_h)
    }
}

/// What the hosting application hands to [`WindowManager::open`].
#[derive(Debug, Clone)]
pub struct AppDescriptor<C> {
    pub title: String,
    pub icon: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub position: Option<Point>,
    pub min_width: Option<u32>,
    pub min_height: Option<u32>,
    pub resizable: bool,
    pub maximizable: bool,
    pub minimizable: bool,
    pub closable: bool,
    pub content: C,
}

impl<C> AppDescriptor<C> {
    pub fn new(title: impl Into<String>, content: C) -> Self {
        Self {
            title: title.into(),
            icon: None,
            width: None,
            height: None,
            position: None,
            min_width: None,
            min_height: None,
            resizable: true,
            maximizable: true,
            minimizable: true,
            closable: true,
            content,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_min_size(mut self, min_width: u32, min_height: u32) -> Self {
        self.min_width = Some(min_width);
        self.min_height = Some(min_height);
        self
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = Some(Point::new(x, y));
        self
    }

    pub fn resizable(mut self, value: bool) -> Self {
        self.resizable = value;
        self
    }

    pub fn maximizable(mut self, value: bool) -> Self {
        self.maximizable = value;
        self
    }

    pub fn minimizable(mut self, value: bool) -> Self {
        self.minimizable = value;
        self
    }

    pub fn closable(mut self, value: bool) -> Self {
        self.closable = value;
        self
    }
}

/// Fully resolved creation request for [`WindowRegistry::create`].
#[derive(Debug, Clone)]
pub struct InitialWindow<C> {
    pub title: String,
    pub icon: Option<String>,
    pub bounds: Bounds,
    pub constraints: Constraints,
    pub content: C,
}

#[derive(Debug, Clone)]
pub struct WindowRecord<C> {
    id: WindowId,
    title: String,
    icon: Option<String>,
    bounds: Bounds,
    z_index: u64,
    state: WindowState,
    constraints: Constraints,
    restore_bounds: Option<Bounds>,
    content: C,
}

impl<C> WindowRecord<C> {
    pub(crate) fn new(id: WindowId, initial: InitialWindow<C>, z_index: u64) -> Self {
        Self {
            id,
            title: initial.title,
            icon: initial.icon,
            bounds: initial.bounds,
            z_index,
            state: WindowState::Normal,
            constraints: initial.constraints,
            restore_bounds: None,
            content: initial.content,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn z_index(&self) -> u64 {
        self.z_index
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Geometry saved the last time the window left `Normal`. `None` until
    /// the window has been docked once.
    pub fn restore_bounds(&self) -> Option<Bounds> {
        self.restore_bounds
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn is_minimized(&self) -> bool {
        self.state.is_minimized()
    }

    /// Resize handles are live only on normal, resizable windows.
    pub fn can_resize(&self) -> bool {
        self.constraints.resizable && self.state == WindowState::Normal
    }

    pub fn can_drag(&self) -> bool {
        self.state == WindowState::Normal
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub(crate) fn set_content(&mut self, content: C) {
        self.content = content;
    }

    pub(crate) fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub(crate) fn set_z_index(&mut self, z_index: u64) {
        self.z_index = z_index;
    }

    pub(crate) fn set_state(&mut self, state: WindowState) {
        self.state = state;
    }

    pub(crate) fn set_restore_bounds(&mut self, bounds: Bounds) {
        self.restore_bounds = Some(bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraints_floor_is_at_least_one() {
        let c = Constraints::new(0, 0);
        assert_eq!(c.min_size(), (1, 1));
        assert_eq!(c.clamp(Bounds::new(5, 5, 0, 0)), Bounds::new(5, 5, 1, 1));
    }

    #[test]
    fn descriptor_builder_sets_flags() {
        let d = AppDescriptor::new("Calculator", ())
            .with_size(320, 480)
            .with_min_size(200, 300)
            .resizable(false)
            .maximizable(false);
        assert_eq!(d.width, Some(320));
        assert_eq!(d.min_height, Some(300));
        assert!(!d.resizable);
        assert!(!d.maximizable);
        assert!(d.closable);
    }

    #[test]
    fn docked_states() {
        assert!(WindowState::Maximized.is_docked());
        assert!(WindowState::Snapped(SnapRegion::LeftHalf).is_docked());
        let hidden = WindowState::Minimized {
            docked: Some(Dock::Snapped(SnapRegion::LeftHalf)),
        };
        assert!(!hidden.is_docked());
        assert!(hidden.is_minimized());
        assert_eq!(hidden.dock().map(Dock::state), Some(WindowState::Snapped(SnapRegion::LeftHalf)));
        assert_eq!(WindowState::Normal.dock(), None);
        assert_eq!(
            WindowState::Snapped(SnapRegion::RightHalf).kind().to_string(),
            "snapped"
        );
    }
}
