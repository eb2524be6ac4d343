use std::collections::BTreeMap;
use std::collections::btree_map;

use super::{InitialWindow, WindowId, WindowRecord, WindowState};
use crate::error::{WmError, WmResult};
use crate::events::{WindowEvent, WindowEventKind};
use crate::geometry::{Bounds, Point};

/// Owns the live window records and the stacking counter.
///
/// Every mutation queues a [`WindowEvent`]; callers drain them with
/// [`WindowRegistry::drain_events`]. The [`super::WindowManager`] does this at
/// the end of every operation.
#[derive(Debug)]
pub struct WindowRegistry<C> {
    windows: BTreeMap<WindowId, WindowRecord<C>>,
    // z value -> window; z values are unique because the counter only grows
    stacking: BTreeMap<u64, WindowId>,
    focused: Option<WindowId>,
    next_id: u64,
    z_counter: u64,
    pending: Vec<WindowEvent>,
}

impl<C> Default for WindowRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> WindowRegistry<C> {
    pub fn new() -> Self {
        Self {
            windows: BTreeMap::new(),
            stacking: BTreeMap::new(),
            focused: None,
            next_id: 1,
            z_counter: 0,
            pending: Vec::new(),
        }
    }

    pub fn create(&mut self, initial: InitialWindow<C>) -> WindowId {
        let id = WindowId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);

        let mut initial = initial;
        if !initial.constraints.satisfied_by(&initial.bounds) {
            let (min_width, min_height) = initial.constraints.min_size();
            let violation = WmError::ConstraintViolation {
                id,
                width: initial.bounds.width,
                height: initial.bounds.height,
                min_width,
                min_height,
            };
            tracing::debug!(error = %violation, "clamping initial bounds");
            initial.bounds = initial.constraints.clamp(initial.bounds);
        }

        let z = self.next_z();
        tracing::debug!(window_id = %id, z, bounds = ?initial.bounds, "created window");
        self.windows.insert(id, WindowRecord::new(id, initial, z));
        self.stacking.insert(z, id);
        self.emit(id, WindowEventKind::Created);
        id
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowRecord<C>> {
        self.windows.get(&id)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    pub(crate) fn record_mut(&mut self, id: WindowId) -> WmResult<&mut WindowRecord<C>> {
        self.windows.get_mut(&id).ok_or(WmError::NotFound(id))
    }

    pub(crate) fn record(&self, id: WindowId) -> WmResult<&WindowRecord<C>> {
        self.windows.get(&id).ok_or(WmError::NotFound(id))
    }

    /// Deletes the record. Unknown ids are ignored. When the removed window
    /// held focus, focus passes to the top-most remaining non-minimized window.
    pub fn remove(&mut self, id: WindowId) -> Option<WindowRecord<C>> {
        let record = self.windows.remove(&id)?;
        self.stacking.remove(&record.z_index());
        tracing::debug!(window_id = %id, "removed window");
        self.emit(id, WindowEventKind::Closed);
        if self.focused == Some(id) {
            self.focused = None;
            self.focus_fallback();
        }
        Some(record)
    }

    /// Raises the window to the top of the stack and gives it focus.
    pub fn focus(&mut self, id: WindowId) -> WmResult<()> {
        let state = self.record(id)?.state();
        if state.is_minimized() {
            return Err(WmError::InvalidTransition {
                id,
                state: state.kind(),
                operation: "focus",
            });
        }
        let z = self.next_z();
        self.restack(id, z);
        self.focused = Some(id);
        tracing::trace!(window_id = %id, z, "focused window");
        self.emit(id, WindowEventKind::Focused);
        Ok(())
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    /// Records bottom-to-top. The iterator is lazy and can be cloned to
    /// restart from the bottom.
    pub fn list_ordered_by_z(&self) -> ZOrder<'_, C> {
        ZOrder {
            order: self.stacking.values(),
            windows: &self.windows,
        }
    }

    /// Records in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &WindowRecord<C>> + '_ {
        self.windows.values()
    }

    pub fn ids(&self) -> Vec<WindowId> {
        self.windows.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Highest window that can take focus.
    pub fn topmost_focusable(&self) -> Option<WindowId> {
        self.list_ordered_by_z()
            .rev()
            .find(|record| !record.is_minimized())
            .map(|record| record.id())
    }

    /// Highest non-minimized window whose bounds contain `point`.
    pub fn topmost_at(&self, point: Point) -> Option<&WindowRecord<C>> {
        self.list_ordered_by_z()
            .rev()
            .find(|record| !record.is_minimized() && record.bounds().contains(point))
    }

    pub fn drain_events(&mut self) -> Vec<WindowEvent> {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn emit(&mut self, id: WindowId, kind: WindowEventKind) {
        self.pending.push(WindowEvent::new(id, kind));
    }

    /// Drops focus from `id` if it holds it and hands it to the next
    /// candidate.
    pub(crate) fn release_focus(&mut self, id: WindowId) {
        if self.focused == Some(id) {
            self.focused = None;
            self.focus_fallback();
        }
    }

    fn focus_fallback(&mut self) {
        if let Some(next) = self.topmost_focusable() {
            // Candidates are never minimized, so this cannot fail.
            let _ = self.focus(next);
        }
    }

    /// Moves the window without changing its size. Emits only when the
    /// origin actually changed.
    pub(crate) fn move_to(&mut self, id: WindowId, x: i32, y: i32) -> WmResult<()> {
        let record = self.record_mut(id)?;
        let current = record.bounds();
        if current.x == x && current.y == y {
            return Ok(());
        }
        let bounds = Bounds { x, y, ..current };
        record.set_bounds(bounds);
        self.emit(id, WindowEventKind::Moved(bounds));
        Ok(())
    }

    /// Replaces the bounds of a normal window, clamped to its minimum size.
    pub(crate) fn resize_to(&mut self, id: WindowId, bounds: Bounds) -> WmResult<()> {
        let record = self.record_mut(id)?;
        let bounds = record.constraints().clamp(bounds);
        if record.bounds() == bounds {
            return Ok(());
        }
        record.set_bounds(bounds);
        self.emit(id, WindowEventKind::Resized(bounds));
        Ok(())
    }

    fn next_z(&mut self) -> u64 {
        self.z_counter = self.z_counter.saturating_add(1);
        self.z_counter
    }

    fn restack(&mut self, id: WindowId, z: u64) {
        let Some(record) = self.windows.get_mut(&id) else {
            return;
        };
        self.stacking.remove(&record.z_index());
        record.set_z_index(z);
        self.stacking.insert(z, id);
    }
}

/// Bottom-to-top walk over a registry's windows.
pub struct ZOrder<'a, C> {
    order: btree_map::Values<'a, u64, WindowId>,
    windows: &'a BTreeMap<WindowId, WindowRecord<C>>,
}

impl<C> Clone for ZOrder<'_, C> {
    fn clone(&self) -> Self {
        Self {
            order: self.order.clone(),
            windows: self.windows,
        }
    }
}

impl<'a, C> Iterator for ZOrder<'a, C> {
    type Item = &'a WindowRecord<C>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.order.next()?;
        self.windows.get(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<C> DoubleEndedIterator for ZOrder<'_, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = self.order.next_back()?;
        self.windows.get(id)
    }
}

impl<C> ExactSizeIterator for ZOrder<'_, C> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::Constraints;

    fn initial(title: &str, bounds: Bounds) -> InitialWindow<()> {
        InitialWindow {
            title: title.to_string(),
            icon: None,
            bounds,
            constraints: Constraints::new(10, 10),
            content: (),
        }
    }

    fn registry_with(titles: &[&str]) -> (WindowRegistry<()>, Vec<WindowId>) {
        let mut reg = WindowRegistry::new();
        let ids: Vec<WindowId> = titles
            .iter()
            .map(|t| reg.create(initial(t, Bounds::new(0, 0, 50, 50))))
            .collect();
        (reg, ids)
    }

    fn titles_by_z(reg: &WindowRegistry<()>) -> Vec<String> {
        reg.list_ordered_by_z()
            .map(|r| r.title().to_string())
            .collect()
    }

    #[test]
    fn focus_raises_above_later_windows() {
        let (mut reg, ids) = registry_with(&["A", "B"]);
        assert_eq!(titles_by_z(&reg), vec!["A", "B"]);
        reg.focus(ids[0]).unwrap();
        let a = reg.get(ids[0]).unwrap().z_index();
        let b = reg.get(ids[1]).unwrap().z_index();
        assert!(a > b);
        assert_eq!(titles_by_z(&reg), vec!["B", "A"]);
        assert_eq!(reg.focused(), Some(ids[0]));
    }

    #[test]
    fn z_order_iterator_restarts_when_cloned() {
        let (reg, _) = registry_with(&["A", "B", "C"]);
        let order = reg.list_ordered_by_z();
        let first: Vec<_> = order.clone().map(|r| r.id()).collect();
        let second: Vec<_> = order.map(|r| r.id()).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn remove_is_idempotent_and_ids_are_not_reused() {
        let (mut reg, ids) = registry_with(&["A"]);
        reg.drain_events();
        assert!(reg.remove(ids[0]).is_some());
        assert!(reg.remove(ids[0]).is_none());
        assert_eq!(
            reg.drain_events(),
            vec![WindowEvent::new(ids[0], WindowEventKind::Closed)]
        );
        let next = reg.create(initial("B", Bounds::new(0, 0, 20, 20)));
        assert_ne!(next, ids[0]);
    }

    #[test]
    fn focus_rejects_minimized_windows() {
        let (mut reg, ids) = registry_with(&["A", "B"]);
        reg.record_mut(ids[0])
            .unwrap()
            .set_state(WindowState::Minimized { docked: None });
        let before = reg.get(ids[0]).unwrap().z_index();
        let err = reg.focus(ids[0]).unwrap_err();
        assert!(matches!(err, WmError::InvalidTransition { .. }));
        assert_eq!(reg.get(ids[0]).unwrap().z_index(), before);
        assert!(matches!(
            reg.focus(WindowId::new(99)),
            Err(WmError::NotFound(_))
        ));
    }

    #[test]
    fn removing_focused_window_focuses_topmost_visible() {
        let (mut reg, ids) = registry_with(&["A", "B", "C"]);
        reg.record_mut(ids[1])
            .unwrap()
            .set_state(WindowState::Minimized { docked: None });
        reg.focus(ids[2]).unwrap();
        reg.remove(ids[2]);
        // B sits above A but is minimized.
        assert_eq!(reg.focused(), Some(ids[0]));
        reg.remove(ids[0]);
        assert_eq!(reg.focused(), None);
    }

    #[test]
    fn create_clamps_to_minimum_size() {
        let mut reg: WindowRegistry<()> = WindowRegistry::new();
        let id = reg.create(initial("tiny", Bounds::new(4, 4, 2, 30)));
        assert_eq!(reg.get(id).unwrap().bounds(), Bounds::new(4, 4, 10, 30));
    }

    #[test]
    fn topmost_at_skips_minimized() {
        let (mut reg, ids) = registry_with(&["A", "B"]);
        let p = Point::new(5, 5);
        assert_eq!(reg.topmost_at(p).map(|r| r.id()), Some(ids[1]));
        reg.record_mut(ids[1])
            .unwrap()
            .set_state(WindowState::Minimized { docked: None });
        assert_eq!(reg.topmost_at(p).map(|r| r.id()), Some(ids[0]));
        assert!(reg.topmost_at(Point::new(500, 500)).is_none());
    }
}
