use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

use crate::events::{WindowEvent, WindowEventKind, WindowObserver};
use crate::geometry::{Bounds, Point, Viewport};
use crate::ui::{UiFrame, display_width, safe_set_string, truncate_to_width};
use crate::window::{WindowId, WindowRecord, WindowRegistry};

const MAX_LABEL: usize = 18;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarItem {
    pub id: WindowId,
    pub title: String,
    pub icon: Option<String>,
    pub minimized: bool,
    pub active: bool,
}

impl TaskbarItem {
    fn from_record<C>(record: &WindowRecord<C>) -> Self {
        Self {
            id: record.id(),
            title: record.title().to_string(),
            icon: record.icon().map(str::to_string),
            minimized: record.is_minimized(),
            active: false,
        }
    }

    pub fn label(&self) -> String {
        let label = match &self.icon {
            Some(icon) => format!("{icon} {}", self.title),
            None => self.title.clone(),
        };
        truncate_to_width(&label, MAX_LABEL)
    }

    /// Label columns plus one cell of padding on each side.
    fn width(&self) -> u32 {
        display_width(&self.label()) as u32 + 2
    }
}

/// What a click on a taskbar entry should do to its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarAction {
    Restore,
    Focus,
    Minimize,
}

/// One entry per open window, kept in sync through [`WindowObserver`].
#[derive(Debug, Default)]
pub struct Taskbar {
    items: Vec<TaskbarItem>,
}

impl Taskbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[TaskbarItem] {
        &self.items
    }

    pub fn item(&self, id: WindowId) -> Option<&TaskbarItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn item_mut(&mut self, id: WindowId) -> Option<&mut TaskbarItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn click_action<C>(record: &WindowRecord<C>, focused: Option<WindowId>) -> TaskbarAction {
        if record.is_minimized() {
            TaskbarAction::Restore
        } else if focused == Some(record.id()) {
            TaskbarAction::Minimize
        } else {
            TaskbarAction::Focus
        }
    }

    /// Entry geometry inside the taskbar strip, left to right in open order.
    pub fn layout(&self, viewport: &Viewport) -> Vec<(WindowId, Bounds)> {
        let strip = viewport.taskbar_bounds();
        let mut x = strip.x;
        let mut out = Vec::with_capacity(self.items.len());
        for item in &self.items {
            let width = item.width();
            if x.saturating_add(width as i32) > strip.right() {
                break;
            }
            out.push((item.id, Bounds::new(x, strip.y, width, strip.height)));
            x = x.saturating_add(width as i32 + 1);
        }
        out
    }

    pub fn hit_test(&self, point: Point, viewport: &Viewport) -> Option<WindowId> {
        self.layout(viewport)
            .into_iter()
            .find(|(_, area)| area.contains(point))
            .map(|(id, _)| id)
    }

    pub fn render(&self, frame: &mut UiFrame<'_>, viewport: &Viewport) {
        let Some(area) = viewport.taskbar_bounds().visible_in(frame.area()) else {
            return;
        };
        let buffer = frame.buffer_mut();
        let bar_style = Style::default().bg(Color::Black).fg(Color::Gray);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = buffer.cell_mut((x, y)) {
                    cell.set_symbol(" ");
                    cell.set_style(bar_style);
                }
            }
        }
        for (id, bounds) in self.layout(viewport) {
            let Some(item) = self.item(id) else {
                continue;
            };
            let style = if item.active {
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else if item.minimized {
                Style::default()
                    .bg(Color::Black)
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM)
            } else {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            };
            let chunk = format!(" {} ", item.label());
            let (Ok(x), Ok(y)) = (u16::try_from(bounds.x), u16::try_from(bounds.y)) else {
                continue;
            };
            safe_set_string(buffer, area, x, y, &chunk, style);
        }
    }
}

impl<C> WindowObserver<C> for Taskbar {
    fn on_window_event(&mut self, event: &WindowEvent, registry: &WindowRegistry<C>) {
        match event.kind {
            WindowEventKind::Created => {
                if let Some(record) = registry.get(event.id)
                    && self.item(event.id).is_none()
                {
                    self.items.push(TaskbarItem::from_record(record));
                }
            }
            WindowEventKind::Closed => self.items.retain(|item| item.id != event.id),
            WindowEventKind::Minimized | WindowEventKind::Restored => {
                let minimized = registry.get(event.id).is_some_and(|r| r.is_minimized());
                if let Some(item) = self.item_mut(event.id) {
                    item.minimized = minimized;
                }
            }
            WindowEventKind::TitleUpdated => {
                if let (Some(record), Some(item)) = (registry.get(event.id), self.item_mut(event.id)) {
                    item.title = record.title().to_string();
                }
            }
            _ => {}
        }
        let focused = registry.focused();
        for item in &mut self.items {
            item.active = focused == Some(item.id);
        }
    }
}
