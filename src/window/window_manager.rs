use std::time::Instant;

use super::decorator::Chrome;
use super::interaction::{InteractionContext, InteractionController, PointerEvent, PointerKind};
use super::{
    AppDescriptor, Constraints, InitialWindow, SnapRegion, WindowId, WindowRecord,
    WindowRegistry, ZOrder,
};
use crate::config::DesktopConfig;
use crate::error::WmResult;
use crate::events::{EventBus, SubscriptionId, WindowEvent, WindowEventKind, WindowObserver};
use crate::geometry::{Bounds, Point, Viewport};
use crate::layout::{SnapEngine, SnapPreview};
use crate::taskbar::{Taskbar, TaskbarAction};
use crate::timers::{NotificationId, Notifications};

/// The desktop: window records, the pointer gesture in flight, the taskbar
/// and the event subscribers.
///
/// Every operation runs to completion synchronously. Events queued by the
/// registry are delivered to the taskbar first and then to subscribers
/// before the operation returns.
///
/// The plain operations (`close`, `focus`, ...) log and ignore failures such
/// as stale ids; their `try_*` counterparts return the [`crate::WmError`].
#[derive(Debug)]
pub struct WindowManager<C> {
    config: DesktopConfig,
    registry: WindowRegistry<C>,
    interaction: InteractionController,
    chrome: Chrome,
    snap: SnapEngine,
    viewport: Viewport,
    taskbar: Taskbar,
    notifications: Notifications,
    bus: EventBus,
}

impl<C> WindowManager<C> {
    pub fn new(config: DesktopConfig, width: u32, height: u32) -> Self {
        let viewport = Viewport::new(width, height, config.taskbar_height);
        Self {
            chrome: Chrome::from(config.chrome),
            snap: SnapEngine::new(config.snap_threshold),
            notifications: Notifications::new(config.notification_lifetime()),
            registry: WindowRegistry::new(),
            interaction: InteractionController::new(),
            taskbar: Taskbar::new(),
            bus: EventBus::new(),
            viewport,
            config,
        }
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn chrome(&self) -> &Chrome {
        &self.chrome
    }

    pub fn registry(&self) -> &WindowRegistry<C> {
        &self.registry
    }

    pub fn taskbar(&self) -> &Taskbar {
        &self.taskbar
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowRecord<C>> {
        self.registry.get(id)
    }

    /// Open windows bottom-to-top.
    pub fn windows(&self) -> ZOrder<'_, C> {
        self.registry.list_ordered_by_z()
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.registry.focused()
    }

    pub fn snap_preview(&self) -> Option<SnapPreview> {
        self.interaction.snap_preview()
    }

    pub fn is_capturing(&self) -> bool {
        self.interaction.is_capturing()
    }

    /// Creates, raises and focuses a window for `descriptor`.
    pub fn open(&mut self, descriptor: AppDescriptor<C>) -> WindowId {
        let placement = self.config.placement;
        let width = descriptor.width.unwrap_or(placement.window_width);
        let height = descriptor.height.unwrap_or(placement.window_height);
        let origin = descriptor
            .position
            .unwrap_or_else(|| self.cascade_origin(width, height));
        let constraints = Constraints {
            min_width: descriptor
                .min_width
                .unwrap_or_else(|| placement.min_width.min(width)),
            min_height: descriptor
                .min_height
                .unwrap_or_else(|| placement.min_height.min(height)),
            resizable: descriptor.resizable,
            maximizable: descriptor.maximizable,
            minimizable: descriptor.minimizable,
            closable: descriptor.closable,
        };
        let title = descriptor.title.clone();
        let id = self.registry.create(InitialWindow {
            title: descriptor.title,
            icon: descriptor.icon,
            bounds: Bounds::new(origin.x, origin.y, width, height),
            constraints,
            content: descriptor.content,
        });
        tracing::info!(window_id = %id, %title, "opened window");
        report("focus", self.registry.focus(id));
        self.flush();
        id
    }

    /// Each new window steps down and right from the last one without
    /// leaving the usable viewport.
    fn cascade_origin(&self, width: u32, height: u32) -> Point {
        let placement = &self.config.placement;
        let step = placement.cascade_step as i64 * self.registry.len() as i64;
        let start = placement.cascade_origin as i64 + step;
        let max_x = self.viewport.width as i64 - width as i64;
        let max_y = self.viewport.usable_height() as i64 - height as i64;
        let x = start.min(max_x).max(0);
        let y = start.min(max_y).max(0);
        Point::new(
            x.min(i32::MAX as i64) as i32,
            y.min(i32::MAX as i64) as i32,
        )
    }

    pub fn close(&mut self, id: WindowId) {
        report("close", self.try_close(id));
    }

    pub fn try_close(&mut self, id: WindowId) -> WmResult<()> {
        tracing::debug!(window_id = %id, "closing window");
        let result = self.registry.close(id);
        self.flush();
        result
    }

    pub fn minimize(&mut self, id: WindowId) {
        report("minimize", self.try_minimize(id));
    }

    pub fn try_minimize(&mut self, id: WindowId) -> WmResult<()> {
        let result = self.registry.minimize(id);
        self.flush();
        result
    }

    pub fn maximize(&mut self, id: WindowId) {
        report("maximize", self.try_maximize(id));
    }

    pub fn try_maximize(&mut self, id: WindowId) -> WmResult<()> {
        let result = self.registry.maximize(id, &self.viewport);
        self.flush();
        result
    }

    pub fn restore(&mut self, id: WindowId) {
        report("restore", self.try_restore(id));
    }

    pub fn try_restore(&mut self, id: WindowId) -> WmResult<()> {
        let result = self.registry.restore(id);
        self.flush();
        result
    }

    pub fn toggle_maximize(&mut self, id: WindowId) {
        report("toggle maximize", self.try_toggle_maximize(id));
    }

    pub fn try_toggle_maximize(&mut self, id: WindowId) -> WmResult<()> {
        let result = self.registry.toggle_maximize(id, &self.viewport);
        self.flush();
        result
    }

    pub fn focus(&mut self, id: WindowId) {
        report("focus", self.try_focus(id));
    }

    pub fn try_focus(&mut self, id: WindowId) -> WmResult<()> {
        let result = self.registry.focus(id);
        self.flush();
        result
    }

    pub fn snap(&mut self, id: WindowId, region: SnapRegion) {
        report("snap", self.try_snap(id, region));
    }

    pub fn try_snap(&mut self, id: WindowId, region: SnapRegion) -> WmResult<()> {
        let result = self.registry.snap(id, region, &self.viewport);
        self.flush();
        result
    }

    pub fn update_title(&mut self, id: WindowId, title: impl Into<String>) {
        report("update title", self.try_update_title(id, title));
    }

    pub fn try_update_title(&mut self, id: WindowId, title: impl Into<String>) -> WmResult<()> {
        self.registry.record_mut(id)?.set_title(title.into());
        self.registry.emit(id, WindowEventKind::TitleUpdated);
        self.flush();
        Ok(())
    }

    pub fn update_content(&mut self, id: WindowId, content: C) {
        report("update content", self.try_update_content(id, content));
    }

    pub fn try_update_content(&mut self, id: WindowId, content: C) -> WmResult<()> {
        self.registry.record_mut(id)?.set_content(content);
        self.registry.emit(id, WindowEventKind::ContentUpdated);
        self.flush();
        Ok(())
    }

    /// Keyboard close. Respects the window's `closable` flag like the header
    /// button does.
    pub fn close_focused(&mut self) -> Option<WindowId> {
        let id = self.registry.focused()?;
        let closable = self
            .registry
            .get(id)
            .is_some_and(|record| record.constraints().closable);
        if !closable {
            tracing::debug!(window_id = %id, "focused window is not closable");
            return None;
        }
        self.close(id);
        Some(id)
    }

    /// Moves focus to the next window in open order, restoring it if it was
    /// minimized.
    pub fn cycle_focus(&mut self, forward: bool) -> Option<WindowId> {
        let ids = self.registry.ids();
        if ids.is_empty() {
            return None;
        }
        let len = ids.len();
        let next = match self
            .registry
            .focused()
            .and_then(|current| ids.iter().position(|id| *id == current))
        {
            Some(idx) if forward => (idx + 1) % len,
            Some(idx) => (idx + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        report("cycle focus", self.try_activate(ids[next]));
        self.registry.focused()
    }

    /// Brings the window forward: restores it when minimized, focuses it
    /// otherwise.
    pub fn activate(&mut self, id: WindowId) {
        report("activate", self.try_activate(id));
    }

    pub fn try_activate(&mut self, id: WindowId) -> WmResult<()> {
        let result = if self.registry.record(id)?.is_minimized() {
            self.registry.restore(id)
        } else {
            self.registry.focus(id)
        };
        self.flush();
        result
    }

    /// Oldest open window whose record matches.
    pub fn find<P>(&self, mut predicate: P) -> Option<WindowId>
    where
        P: FnMut(&WindowRecord<C>) -> bool,
    {
        self.registry
            .iter()
            .find(|record| predicate(record))
            .map(|record| record.id())
    }

    pub fn taskbar_click(&mut self, id: WindowId) {
        report("taskbar click", self.try_taskbar_click(id));
    }

    pub fn try_taskbar_click(&mut self, id: WindowId) -> WmResult<()> {
        let record = self.registry.record(id)?;
        let action = Taskbar::click_action(record, self.registry.focused());
        tracing::debug!(window_id = %id, ?action, "taskbar click");
        let result = match action {
            TaskbarAction::Restore => self.registry.restore(id),
            TaskbarAction::Focus => self.registry.focus(id),
            TaskbarAction::Minimize => self.registry.minimize(id),
        };
        self.flush();
        result
    }

    /// Routes a pointer signal to the taskbar or the window under it.
    /// Returns true when the desktop consumed the event.
    pub fn handle_pointer(&mut self, event: PointerEvent, now: Instant) -> bool {
        if event.kind == PointerKind::Press
            && !self.interaction.is_capturing()
            && self.viewport.taskbar_bounds().contains(event.position)
        {
            if let Some(id) = self.taskbar.hit_test(event.position, &self.viewport) {
                self.taskbar_click(id);
            }
            return true;
        }
        let ctx = InteractionContext {
            viewport: self.viewport,
            chrome: &self.chrome,
            snap: &self.snap,
            double_click: self.config.double_click_window(),
        };
        let consumed = self
            .interaction
            .handle(&mut self.registry, &ctx, event, now);
        self.flush();
        consumed
    }

    /// The surface lost focus: any drag or resize stops where it is.
    pub fn blur(&mut self) {
        if self.interaction.blur() {
            tracing::debug!("pointer capture cancelled by blur");
        }
        self.flush();
    }

    /// Adopts a new surface size. Docked windows follow it.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        let viewport = Viewport::new(width, height, self.config.taskbar_height);
        if viewport == self.viewport {
            return;
        }
        tracing::debug!(width, height, "viewport resized");
        self.viewport = viewport;
        for id in self.registry.ids() {
            report("redock", self.registry.redock(id, &viewport));
        }
        self.flush();
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&WindowEvent) + 'static,
    {
        self.bus.subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn notify(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        now: Instant,
    ) -> NotificationId {
        self.notifications.push(title, message, now)
    }

    pub fn dismiss_notification(&mut self, id: NotificationId) -> bool {
        self.notifications.dismiss(id)
    }

    /// Housekeeping between input bursts.
    pub fn tick(&mut self, now: Instant) {
        let expired = self.notifications.expire(now);
        if expired > 0 {
            tracing::trace!(expired, "notifications expired");
        }
    }

    fn flush(&mut self) {
        self.interaction.revalidate(&self.registry);
        for event in self.registry.drain_events() {
            tracing::trace!(window_id = %event.id, kind = ?event.kind, "window event");
            self.taskbar.on_window_event(&event, &self.registry);
            self.bus.publish(&event);
        }
    }
}

fn report(operation: &'static str, result: WmResult<()>) {
    if let Err(err) = result {
        tracing::debug!(operation, error = %err, "ignored window operation");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowState;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn manager() -> WindowManager<&'static str> {
        WindowManager::new(DesktopConfig::default(), 1280, 800)
    }

    #[test]
    fn open_cascades_and_focuses() {
        let mut wm = manager();
        let a = wm.open(AppDescriptor::new("Files", "files"));
        let b = wm.open(AppDescriptor::new("Editor", "editor"));
        assert_eq!(wm.get(a).unwrap().bounds(), Bounds::new(100, 100, 600, 400));
        assert_eq!(wm.get(b).unwrap().bounds(), Bounds::new(130, 130, 600, 400));
        assert_eq!(wm.focused(), Some(b));
        assert_eq!(wm.taskbar().items().len(), 2);
    }

    #[test]
    fn cascade_stays_inside_viewport() {
        let mut wm: WindowManager<()> = WindowManager::new(DesktopConfig::default(), 800, 600);
        for _ in 0..10 {
            wm.open(AppDescriptor::new("w", ()));
        }
        let last = wm.windows().last().unwrap().bounds();
        assert_eq!(last.origin(), Point::new(200, 140));
        let huge = wm.open(AppDescriptor::new("big", ()).with_size(2000, 2000));
        assert_eq!(wm.get(huge).unwrap().bounds().origin(), Point::new(0, 0));
    }

    #[test]
    fn explicit_position_and_small_sizes_are_kept() {
        let mut wm = manager();
        let id = wm.open(AppDescriptor::new("Calculator", "calc").with_size(250, 180).at(40, 50));
        let record = wm.get(id).unwrap();
        assert_eq!(record.bounds(), Bounds::new(40, 50, 250, 180));
        assert_eq!(record.constraints().min_size(), (250, 180));
    }

    #[test]
    fn events_reach_subscribers_in_order() {
        let mut wm = manager();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        wm.subscribe(move |event| sink.borrow_mut().push(event.kind));
        let id = wm.open(AppDescriptor::new("Files", "files"));
        wm.update_title(id, "Files - docs");
        wm.close(id);
        assert_eq!(
            *seen.borrow(),
            vec![
                WindowEventKind::Created,
                WindowEventKind::Focused,
                WindowEventKind::TitleUpdated,
                WindowEventKind::Closed,
            ]
        );
    }

    #[test]
    fn cycle_focus_wraps_and_restores() {
        let mut wm = manager();
        let a = wm.open(AppDescriptor::new("A", "a"));
        let b = wm.open(AppDescriptor::new("B", "b"));
        let c = wm.open(AppDescriptor::new("C", "c"));
        wm.minimize(a);
        assert_eq!(wm.focused(), Some(c));
        assert_eq!(wm.cycle_focus(true), Some(a));
        assert!(!wm.get(a).unwrap().is_minimized());
        assert_eq!(wm.cycle_focus(false), Some(c));
        assert_eq!(wm.cycle_focus(false), Some(b));
    }

    #[test]
    fn close_focused_respects_flag() {
        let mut wm = manager();
        let a = wm.open(AppDescriptor::new("A", "a"));
        let b = wm.open(AppDescriptor::new("Pinned", "b").closable(false));
        assert_eq!(wm.close_focused(), None);
        assert!(wm.get(b).is_some());
        wm.focus(a);
        assert_eq!(wm.close_focused(), Some(a));
        assert_eq!(wm.focused(), Some(b));
        // the API close is unconditional
        wm.close(b);
        assert!(wm.registry().is_empty());
    }

    #[test]
    fn taskbar_click_toggles_window() {
        let mut wm = manager();
        let a = wm.open(AppDescriptor::new("A", "a"));
        let b = wm.open(AppDescriptor::new("B", "b"));
        wm.taskbar_click(b);
        assert!(wm.get(b).unwrap().is_minimized());
        assert_eq!(wm.focused(), Some(a));
        wm.taskbar_click(b);
        assert!(!wm.get(b).unwrap().is_minimized());
        assert_eq!(wm.focused(), Some(b));
        wm.taskbar_click(a);
        assert_eq!(wm.focused(), Some(a));
    }

    #[test]
    fn keyboard_maximize_ends_drag_at_once() {
        let mut wm = manager();
        let id = wm.open(AppDescriptor::new("A", "a"));
        let origin = wm.get(id).unwrap().bounds().origin();
        let now = Instant::now();
        wm.handle_pointer(PointerEvent::press(origin.x + 50, origin.y + 10), now);
        wm.handle_pointer(PointerEvent::moved(5, 400), now);
        assert!(wm.is_capturing());
        assert!(wm.snap_preview().is_some());

        wm.maximize(id);
        assert!(!wm.is_capturing());
        assert_eq!(wm.snap_preview(), None);
        wm.handle_pointer(PointerEvent::release(5, 400), now);
        assert_eq!(wm.get(id).unwrap().state(), WindowState::Maximized);
        assert_eq!(wm.get(id).unwrap().bounds(), Bounds::new(0, 0, 1280, 740));
    }

    #[test]
    fn taskbar_click_minimizes_and_restores_maximized_window() {
        let mut wm = manager();
        let id = wm.open(AppDescriptor::new("A", "a"));
        let floating = wm.get(id).unwrap().bounds();
        wm.maximize(id);
        wm.taskbar_click(id);
        assert!(wm.get(id).unwrap().is_minimized());
        wm.taskbar_click(id);
        let record = wm.get(id).unwrap();
        assert_eq!(record.state(), WindowState::Maximized);
        assert_eq!(record.bounds(), Bounds::new(0, 0, 1280, 740));
        wm.restore(id);
        assert_eq!(wm.get(id).unwrap().bounds(), floating);
    }

    #[test]
    fn find_and_activate_reuse_open_window() {
        let mut wm = manager();
        let settings = wm.open(AppDescriptor::new("Settings", "settings"));
        let files = wm.open(AppDescriptor::new("Files", "files"));
        wm.open(AppDescriptor::new("Files", "files"));
        assert_eq!(wm.find(|r| *r.content() == "settings"), Some(settings));
        assert_eq!(wm.find(|r| *r.content() == "files"), Some(files));
        assert_eq!(wm.find(|r| *r.content() == "calculator"), None);

        wm.minimize(settings);
        wm.activate(settings);
        assert!(!wm.get(settings).unwrap().is_minimized());
        assert_eq!(wm.focused(), Some(settings));
        wm.activate(files);
        assert_eq!(wm.focused(), Some(files));
        assert_eq!(wm.registry().len(), 3);
    }

    #[test]
    fn taskbar_strip_takes_presses() {
        let mut wm: WindowManager<()> = WindowManager::new(DesktopConfig::terminal(), 80, 24);
        let a = wm.open(AppDescriptor::new("Files", ()));
        let b = wm.open(AppDescriptor::new("Edit", ()));
        assert_eq!(wm.focused(), Some(b));
        // taskbar row is y=23; "Files" entry spans x 0..7
        assert!(wm.handle_pointer(PointerEvent::press(2, 23), Instant::now()));
        assert_eq!(wm.focused(), Some(a));
    }

    #[test]
    fn viewport_change_redocks() {
        let mut wm = manager();
        let a = wm.open(AppDescriptor::new("A", "a"));
        let b = wm.open(AppDescriptor::new("B", "b"));
        wm.maximize(a);
        wm.snap(b, SnapRegion::RightHalf);
        wm.set_viewport(1000, 700);
        assert_eq!(wm.get(a).unwrap().bounds(), Bounds::new(0, 0, 1000, 640));
        assert_eq!(wm.get(b).unwrap().bounds(), Bounds::new(500, 0, 500, 640));
        wm.restore(b);
        assert_eq!(wm.get(b).unwrap().bounds(), Bounds::new(130, 130, 600, 400));
    }

    #[test]
    fn notifications_tick_away() {
        let mut wm = manager();
        let start = Instant::now();
        let id = wm.notify("Saved", "notes.txt", start);
        wm.tick(start + std::time::Duration::from_secs(1));
        assert_eq!(wm.notifications().len(), 1);
        wm.tick(start + wm.config().notification_lifetime());
        assert!(wm.notifications().is_empty());
        assert!(!wm.dismiss_notification(id));
    }
}
