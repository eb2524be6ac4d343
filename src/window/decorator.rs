use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

use super::{WindowRecord, WindowState};
use crate::config::ChromeConfig;
use crate::geometry::{Bounds, Point};
use crate::layout::ResizeEdge;

/// Buttons drawn in a window header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderAction {
    Minimize,
    Maximize,
    Close,
}

/// What a pointer press lands on inside a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitZone {
    Resize(ResizeEdge),
    Control(HeaderAction),
    Header,
    Body,
}

/// Window frame metrics in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chrome {
    pub header_height: u32,
    pub handle_thickness: u32,
    pub control_width: u32,
}

impl From<ChromeConfig> for Chrome {
    fn from(config: ChromeConfig) -> Self {
        Self {
            header_height: config.header_height.max(1),
            handle_thickness: config.handle_thickness,
            control_width: config.control_width.max(1),
        }
    }
}

impl Chrome {
    pub fn header_bounds(&self, bounds: Bounds) -> Bounds {
        Bounds {
            height: bounds.height.min(self.header_height),
            ..bounds
        }
    }

    /// Area left for application content inside the frame.
    pub fn content_bounds(&self, bounds: Bounds) -> Bounds {
        let inset = self.handle_thickness;
        let header = self.header_height.min(bounds.height);
        Bounds {
            x: bounds.x.saturating_add(inset as i32),
            y: bounds.y.saturating_add(header as i32),
            width: bounds.width.saturating_sub(inset.saturating_mul(2)),
            height: bounds.height.saturating_sub(header).saturating_sub(inset),
        }
    }

    /// Header buttons laid out right to left: close, maximize, minimize.
    /// Buttons the window's flags forbid are left out.
    pub fn header_controls<C>(&self, record: &WindowRecord<C>) -> Vec<(HeaderAction, Bounds)> {
        let constraints = record.constraints();
        let bounds = record.bounds();
        let header = self.header_bounds(bounds);
        let width = self.control_width;
        let mut right = bounds.right().saturating_sub(self.handle_thickness as i32);
        let mut controls = Vec::with_capacity(3);
        let wanted = [
            (HeaderAction::Close, constraints.closable),
            (HeaderAction::Maximize, constraints.maximizable),
            (HeaderAction::Minimize, constraints.minimizable),
        ];
        for (action, enabled) in wanted {
            if !enabled {
                continue;
            }
            let x = right.saturating_sub(width as i32);
            if x < bounds.x {
                break;
            }
            controls.push((action, Bounds::new(x, header.y, width, header.height)));
            right = x;
        }
        controls
    }

    /// Classifies `point` against the window frame, or `None` when the point
    /// is outside the window.
    pub fn hit_test<C>(&self, record: &WindowRecord<C>, point: Point) -> Option<HitZone> {
        let bounds = record.bounds();
        if !bounds.contains(point) {
            return None;
        }
        if record.can_resize()
            && let Some(edge) = self.resize_edge(bounds, point)
        {
            return Some(HitZone::Resize(edge));
        }
        if let Some((action, _)) = self
            .header_controls(record)
            .into_iter()
            .find(|(_, area)| area.contains(point))
        {
            return Some(HitZone::Control(action));
        }
        if self.header_bounds(bounds).contains(point) {
            return Some(HitZone::Header);
        }
        Some(HitZone::Body)
    }

    fn resize_edge(&self, bounds: Bounds, point: Point) -> Option<ResizeEdge> {
        let t = self.handle_thickness.min(i32::MAX as u32) as i32;
        if t == 0 {
            return None;
        }
        let top = point.y < bounds.y.saturating_add(t);
        let bottom = point.y >= bounds.bottom().saturating_sub(t);
        let left = point.x < bounds.x.saturating_add(t);
        let right = point.x >= bounds.right().saturating_sub(t);
        ResizeEdge::from_sides(top, bottom, left, right)
    }
}

/// Everything a decorator needs to paint one window frame.
#[derive(Debug, Clone)]
pub struct WindowView<'a> {
    pub bounds: Bounds,
    pub title: &'a str,
    pub focused: bool,
    pub state: WindowState,
    pub controls: Vec<(HeaderAction, Bounds)>,
}

impl<'a> WindowView<'a> {
    pub fn new<C>(record: &'a WindowRecord<C>, chrome: &Chrome, focused: bool) -> Self {
        Self {
            bounds: record.bounds(),
            title: record.title(),
            focused,
            state: record.state(),
            controls: chrome.header_controls(record),
        }
    }
}

pub trait WindowDecorator: std::fmt::Debug {
    /// Paints the frame of `view`, clipped to `clip`. Content is drawn by
    /// the caller afterwards.
    fn render_window(&self, buffer: &mut Buffer, clip: Rect, view: &WindowView<'_>, chrome: &Chrome);
}

#[derive(Debug, Default)]
pub struct DefaultDecorator;

impl DefaultDecorator {
    fn control_symbol(action: HeaderAction, state: WindowState) -> &'static str {
        match action {
            HeaderAction::Minimize => "_",
            HeaderAction::Maximize if state.is_docked() => "❐",
            HeaderAction::Maximize => "□",
            HeaderAction::Close => "×",
        }
    }
}

impl WindowDecorator for DefaultDecorator {
    fn render_window(&self, buffer: &mut Buffer, clip: Rect, view: &WindowView<'_>, chrome: &Chrome) {
        let bounds = view.bounds;
        if bounds.is_empty() {
            return;
        }
        let clip = clip.intersection(buffer.area);

        let header_style = if view.focused {
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        };
        let border_style = if view.focused {
            Style::default().fg(Color::Blue)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let body_style = Style::default().bg(Color::Reset).fg(Color::Reset);

        let left = bounds.x;
        let top = bounds.y;
        let right = bounds.right() - 1;
        let bottom = bounds.bottom() - 1;

        let Some(visible) = bounds.visible_in(clip) else {
            return;
        };
        // windows below must not show through
        for y in visible.top()..visible.bottom() {
            for x in visible.left()..visible.right() {
                if let Some(cell) = buffer.cell_mut((x, y)) {
                    cell.set_symbol(" ");
                    cell.set_style(body_style);
                }
            }
        }

        for x in left..=right {
            let (top_sym, bottom_sym) = if x == left {
                ("┌", "└")
            } else if x == right {
                ("┐", "┘")
            } else {
                ("─", "─")
            };
            put(buffer, clip, x, top, top_sym, border_style);
            put(buffer, clip, x, bottom, bottom_sym, border_style);
        }
        for y in (top + 1)..bottom {
            put(buffer, clip, left, y, "│", border_style);
            put(buffer, clip, right, y, "│", border_style);
        }

        // Title row is the last header row; with a one-row header it
        // replaces the top border.
        let header = chrome.header_bounds(bounds);
        let title_y = header.bottom() - 1;
        let inner_left = if chrome.header_height > 1 { left + 1 } else { left };
        let inner_right = if chrome.header_height > 1 { right - 1 } else { right };
        for x in inner_left..=inner_right {
            put(buffer, clip, x, title_y, " ", header_style);
        }

        let controls_left = view
            .controls
            .iter()
            .map(|(_, area)| area.x)
            .min()
            .unwrap_or(inner_right + 1);
        let available = (controls_left - inner_left - 1).max(0) as usize;
        let title: String = view.title.chars().take(available).collect();
        for (idx, ch) in title.chars().enumerate() {
            let x = inner_left + 1 + idx as i32;
            put(buffer, clip, x, title_y, &ch.to_string(), header_style);
        }

        for (action, area) in &view.controls {
            let x = area.x + (area.width / 2) as i32;
            put(
                buffer,
                clip,
                x,
                title_y,
                Self::control_symbol(*action, view.state),
                header_style,
            );
        }
    }
}

fn put(buffer: &mut Buffer, clip: Rect, x: i32, y: i32, symbol: &str, style: Style) {
    if x < clip.x as i32
        || y < clip.y as i32
        || x >= clip.right() as i32
        || y >= clip.bottom() as i32
    {
        return;
    }
    if let Some(cell) = buffer.cell_mut((x as u16, y as u16)) {
        cell.set_symbol(symbol);
        cell.set_style(style);
    }
}
