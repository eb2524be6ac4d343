use std::time::{Duration, Instant};

use super::decorator::{Chrome, HeaderAction, HitZone};
use super::{WindowId, WindowRegistry};
use crate::error::{WmError, WmResult};
use crate::geometry::{Point, Viewport};
use crate::layout::{HeaderDrag, ResizeDrag, SnapEngine, SnapPreview, SnapZone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Press,
    Move,
    Release,
}

/// Primary-button pointer signal in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
}

impl PointerEvent {
    pub fn press(x: i32, y: i32) -> Self {
        Self {
            kind: PointerKind::Press,
            position: Point::new(x, y),
        }
    }

    pub fn moved(x: i32, y: i32) -> Self {
        Self {
            kind: PointerKind::Move,
            position: Point::new(x, y),
        }
    }

    pub fn release(x: i32, y: i32) -> Self {
        Self {
            kind: PointerKind::Release,
            position: Point::new(x, y),
        }
    }
}

/// Desktop metrics the controller reads while handling a gesture.
#[derive(Debug, Clone, Copy)]
pub struct InteractionContext<'a> {
    pub viewport: Viewport,
    pub chrome: &'a Chrome,
    pub snap: &'a SnapEngine,
    pub double_click: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Drag(HeaderDrag),
    Resize(ResizeDrag),
}

impl Capture {
    fn window(&self) -> WindowId {
        match self {
            Capture::Drag(drag) => drag.id,
            Capture::Resize(resize) => resize.id,
        }
    }
}

/// Turns press / move / release sequences into geometry changes on the one
/// window chosen at press time.
#[derive(Debug, Default)]
pub struct InteractionController {
    capture: Option<Capture>,
    preview: Option<SnapPreview>,
    last_header_click: Option<(WindowId, Instant)>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    pub fn captured_window(&self) -> Option<WindowId> {
        self.capture.map(|capture| capture.window())
    }

    pub fn snap_preview(&self) -> Option<SnapPreview> {
        self.preview
    }

    /// Returns true when the event was consumed by the desktop.
    pub fn handle<C>(
        &mut self,
        registry: &mut WindowRegistry<C>,
        ctx: &InteractionContext<'_>,
        event: PointerEvent,
        now: Instant,
    ) -> bool {
        match event.kind {
            PointerKind::Press => self.press(registry, ctx, event.position, now),
            PointerKind::Move => self.pointer_move(registry, ctx, event.position),
            PointerKind::Release => self.release(registry, ctx, event.position),
        }
    }

    pub fn press<C>(
        &mut self,
        registry: &mut WindowRegistry<C>,
        ctx: &InteractionContext<'_>,
        position: Point,
        now: Instant,
    ) -> bool {
        if self.capture.is_some() {
            tracing::trace!(?position, "press ignored during active capture");
            return true;
        }
        let Some(record) = registry.topmost_at(position) else {
            return false;
        };
        let id = record.id();
        let bounds = record.bounds();
        let (min_width, min_height) = record.constraints().min_size();
        let can_drag = record.can_drag();
        let Some(zone) = ctx.chrome.hit_test(record, position) else {
            return false;
        };

        log_ignored(registry.focus(id));

        match zone {
            HitZone::Control(action) => {
                self.last_header_click = None;
                let result = match action {
                    HeaderAction::Minimize => registry.minimize(id),
                    HeaderAction::Maximize => registry.toggle_maximize(id, &ctx.viewport),
                    HeaderAction::Close => registry.close(id),
                };
                tracing::debug!(window_id = %id, ?action, "header control");
                log_ignored(result);
            }
            HitZone::Resize(edge) => {
                self.last_header_click = None;
                tracing::trace!(window_id = %id, edge = edge.as_str(), "begin resize");
                self.capture = Some(Capture::Resize(ResizeDrag {
                    id,
                    edge,
                    start_pointer: position,
                    start_bounds: bounds,
                    min_width,
                    min_height,
                }));
            }
            HitZone::Header => {
                if self.is_double_click(id, now, ctx.double_click) {
                    self.last_header_click = None;
                    log_ignored(registry.toggle_maximize(id, &ctx.viewport));
                    return true;
                }
                self.last_header_click = Some((id, now));
                if can_drag {
                    tracing::trace!(window_id = %id, "begin drag");
                    self.capture = Some(Capture::Drag(HeaderDrag {
                        id,
                        start_pointer: position,
                        initial: bounds.origin(),
                        moved: false,
                    }));
                }
            }
            HitZone::Body => {
                self.last_header_click = None;
            }
        }
        true
    }

    pub fn pointer_move<C>(
        &mut self,
        registry: &mut WindowRegistry<C>,
        ctx: &InteractionContext<'_>,
        position: Point,
    ) -> bool {
        if !self.revalidate(registry) {
            return false;
        }
        let Some(capture) = self.capture.as_mut() else {
            return true;
        };
        let result = match capture {
            Capture::Drag(drag) => {
                if position != drag.start_pointer {
                    drag.moved = true;
                }
                let origin = drag.origin_at(position);
                self.preview = if drag.moved {
                    ctx.snap.preview(position, &ctx.viewport)
                } else {
                    None
                };
                registry.move_to(drag.id, origin.x, origin.y)
            }
            Capture::Resize(resize) => registry.resize_to(resize.id, resize.bounds_at(position)),
        };
        if let Err(err) = result {
            // window went away under the pointer
            tracing::debug!(error = %err, "dropping capture");
            self.cancel();
        }
        true
    }

    pub fn release<C>(
        &mut self,
        registry: &mut WindowRegistry<C>,
        ctx: &InteractionContext<'_>,
        position: Point,
    ) -> bool {
        if self.capture.is_none() {
            return false;
        }
        self.pointer_move(registry, ctx, position);
        let Some(capture) = self.capture.take() else {
            return true;
        };
        self.preview = None;
        if let Capture::Drag(drag) = capture
            && drag.moved
        {
            let result = match ctx.snap.zone_at(position, &ctx.viewport) {
                Some(SnapZone::Top) => registry.maximize(drag.id, &ctx.viewport),
                Some(zone) => match zone.region() {
                    Some(region) => registry.snap(drag.id, region, &ctx.viewport),
                    None => Ok(()),
                },
                None => Ok(()),
            };
            log_ignored(result);
        }
        tracing::trace!(window_id = %capture.window(), "end capture");
        true
    }

    /// Drops the capture once its window can no longer take the gesture,
    /// e.g. it was maximized or minimized from the keyboard mid-drag.
    /// Returns false when no gesture was in progress.
    pub fn revalidate<C>(&mut self, registry: &WindowRegistry<C>) -> bool {
        let Some(capture) = self.capture else {
            return false;
        };
        let live = registry.get(capture.window()).is_some_and(|record| match capture {
            Capture::Drag(_) => record.can_drag(),
            Capture::Resize(_) => record.can_resize(),
        });
        if !live {
            tracing::debug!(window_id = %capture.window(), "dropping capture");
            self.cancel();
        }
        true
    }

    /// The pointer left the surface; any gesture ends where it is.
    pub fn blur(&mut self) -> bool {
        let had_capture = self.capture.is_some();
        self.cancel();
        had_capture
    }

    fn cancel(&mut self) {
        self.capture = None;
        self.preview = None;
    }

    fn is_double_click(&self, id: WindowId, now: Instant, window: Duration) -> bool {
        match self.last_header_click {
            Some((last, at)) => last == id && now.saturating_duration_since(at) <= window,
            None => false,
        }
    }
}

fn log_ignored(result: WmResult<()>) {
    if let Err(err) = result {
        log_error(&err);
    }
}

fn log_error(err: &WmError) {
    tracing::debug!(error = %err, "ignored pointer action");
}
