//! Window state machine.
//!
//! ```text
//! Normal    -> Minimized | Maximized | Snapped(region)
//! Minimized -> the state it was minimized from
//! Maximized -> Normal | Minimized | Snapped(region)
//! Snapped   -> Normal | Minimized | Maximized | Snapped(other region)
//! ```
//!
//! `restore_bounds` is written only when leaving `Normal`, so a chain of
//! dockings always restores to the geometry the window had before the first.
//! It is kept after a restore and replaced on the next docking.

use super::{Dock, SnapRegion, WindowId, WindowRegistry, WindowState};
use crate::error::{WmError, WmResult};
use crate::events::WindowEventKind;
use crate::geometry::Viewport;
use crate::layout::region_bounds;

fn invalid(id: WindowId, state: WindowState, operation: &'static str) -> WmError {
    WmError::InvalidTransition {
        id,
        state: state.kind(),
        operation,
    }
}

impl<C> WindowRegistry<C> {
    /// Hides the window. Bounds and any docked layout are kept for restore;
    /// focus moves on.
    pub fn minimize(&mut self, id: WindowId) -> WmResult<()> {
        let record = self.record_mut(id)?;
        let state = record.state();
        if state.is_minimized() || !record.constraints().minimizable {
            return Err(invalid(id, state, "minimize"));
        }
        let docked = state.dock();
        record.set_state(WindowState::Minimized { docked });
        tracing::debug!(window_id = %id, ?docked, "minimized window");
        self.emit(id, WindowEventKind::Minimized);
        self.release_focus(id);
        Ok(())
    }

    /// Fills the usable viewport. Focus is left alone.
    pub fn maximize(&mut self, id: WindowId, viewport: &Viewport) -> WmResult<()> {
        let record = self.record_mut(id)?;
        let state = record.state();
        let allowed = record.constraints().maximizable
            && matches!(state, WindowState::Normal | WindowState::Snapped(_));
        if !allowed {
            return Err(invalid(id, state, "maximize"));
        }
        if state == WindowState::Normal {
            let current = record.bounds();
            record.set_restore_bounds(current);
        }
        let bounds = viewport.usable_bounds();
        record.set_state(WindowState::Maximized);
        record.set_bounds(bounds);
        tracing::debug!(window_id = %id, bounds = ?bounds, "maximized window");
        self.emit(id, WindowEventKind::Maximized);
        Ok(())
    }

    /// Docks the window to one half of the usable viewport.
    pub fn snap(&mut self, id: WindowId, region: SnapRegion, viewport: &Viewport) -> WmResult<()> {
        let record = self.record_mut(id)?;
        let state = record.state();
        if state.is_minimized() || state == WindowState::Snapped(region) {
            return Err(invalid(id, state, "snap"));
        }
        if state == WindowState::Normal {
            let current = record.bounds();
            record.set_restore_bounds(current);
        }
        let bounds = region_bounds(region, viewport);
        record.set_state(WindowState::Snapped(region));
        record.set_bounds(bounds);
        tracing::debug!(window_id = %id, ?region, bounds = ?bounds, "snapped window");
        self.emit(id, WindowEventKind::Snapped(region));
        Ok(())
    }

    /// Focuses the window and undoes its current state. A minimized window
    /// returns to the layout it was minimized from with its bounds untouched;
    /// a docked window goes back to `Normal` at its saved geometry.
    pub fn restore(&mut self, id: WindowId) -> WmResult<()> {
        let record = self.record_mut(id)?;
        let state = record.state();
        let next = match state {
            WindowState::Normal => return Err(invalid(id, state, "restore")),
            WindowState::Minimized { docked } => docked.map_or(WindowState::Normal, Dock::state),
            WindowState::Maximized | WindowState::Snapped(_) => {
                let saved = record.restore_bounds().unwrap_or(record.bounds());
                let bounds = record.constraints().clamp(saved);
                record.set_bounds(bounds);
                WindowState::Normal
            }
        };
        record.set_state(next);
        tracing::debug!(window_id = %id, from = %state.kind(), "restored window");
        self.emit(id, WindowEventKind::Restored);
        self.focus(id)
    }

    /// Header double-click: maximize a normal window, restore a docked one.
    pub fn toggle_maximize(&mut self, id: WindowId, viewport: &Viewport) -> WmResult<()> {
        let state = self.record(id)?.state();
        match state {
            WindowState::Normal => self.maximize(id, viewport),
            WindowState::Maximized | WindowState::Snapped(_) => self.restore(id),
            WindowState::Minimized { .. } => Err(invalid(id, state, "toggle maximize")),
        }
    }

    pub fn close(&mut self, id: WindowId) -> WmResult<()> {
        self.remove(id).map(|_| ()).ok_or(WmError::NotFound(id))
    }

    /// Recomputes docked geometry after the viewport changed, including for
    /// windows minimized out of a dock.
    pub(crate) fn redock(&mut self, id: WindowId, viewport: &Viewport) -> WmResult<()> {
        let record = self.record_mut(id)?;
        let bounds = match record.state().dock() {
            Some(Dock::Maximized) => viewport.usable_bounds(),
            Some(Dock::Snapped(region)) => region_bounds(region, viewport),
            None => return Ok(()),
        };
        if record.bounds() == bounds {
            return Ok(());
        }
        record.set_bounds(bounds);
        self.emit(id, WindowEventKind::Resized(bounds));
        Ok(())
    }
}
