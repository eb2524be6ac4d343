//! Desktop rendering on top of a ratatui buffer.
//!
//! `UiFrame` clamps every draw call to the visible area so window geometry
//! that drifts off-screen (negative origins, windows wider than the
//! terminal) never writes out of bounds. The desktop is painted bottom-to-top:
//! wallpaper, windows in z order, the snap preview, the taskbar, toasts and
//! finally the help overlay.

use indoc::indoc;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

use crate::geometry::Bounds;
use crate::keybindings::KeyBindings;
use crate::layout::SnapPreview;
use crate::timers::Notifications;
use crate::window::decorator::{WindowDecorator, WindowView};
use crate::window::{WindowManager, WindowRecord};

const HELP_INTRO: &str = indoc! {"
    Drag a title bar to move a window. Drop it on the left or right
    edge to snap it to that half, or on the top edge to maximize.
    Double-click a title bar to maximize or restore.
    Drag any border or corner to resize.
    Click a taskbar entry to focus, minimize or restore its window.
"};

/// Wrapper around `ratatui::Frame` that clamps drawing to the visible area.
pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    buffer.set_stringn(x, y, text, available as usize, style);
}

/// Terminal columns `value` occupies.
pub(crate) fn display_width(value: &str) -> usize {
    Span::raw(value).width()
}

/// Longest prefix of `value` that fits in `width` columns.
pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in value.chars() {
        let mut utf8 = [0; 4];
        let w = display_width(ch.encode_utf8(&mut utf8));
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

/// Paints the whole desktop. `render_content` draws a window's body into the
/// visible part of its content area.
pub fn render_desktop<C, F>(
    frame: &mut UiFrame<'_>,
    wm: &WindowManager<C>,
    decorator: &dyn WindowDecorator,
    mut render_content: F,
) where
    F: FnMut(&mut UiFrame<'_>, Rect, &WindowRecord<C>, bool),
{
    let area = frame.area();
    let desktop = wm.viewport().usable_bounds();
    if let Some(wallpaper) = desktop.visible_in(area) {
        let style = Style::default().bg(Color::Rgb(0, 60, 90));
        fill(frame.buffer_mut(), wallpaper, " ", style);
    }

    let chrome = *wm.chrome();
    let focused = wm.focused();
    for record in wm.windows().filter(|record| !record.is_minimized()) {
        let is_focused = focused == Some(record.id());
        let view = WindowView::new(record, &chrome, is_focused);
        decorator.render_window(frame.buffer_mut(), area, &view, &chrome);
        if let Some(content) = chrome.content_bounds(record.bounds()).visible_in(area) {
            render_content(frame, content, record, is_focused);
        }
    }

    if let Some(preview) = wm.snap_preview() {
        render_snap_preview(frame, &preview);
    }
    wm.taskbar().render(frame, &wm.viewport());
    render_notifications(frame, wm.notifications());
}

/// Dotted outline of where the dragged window would dock.
pub fn render_snap_preview(frame: &mut UiFrame<'_>, preview: &SnapPreview) {
    let area = frame.area();
    let bounds = preview.bounds;
    if bounds.visible_in(area).is_none() {
        return;
    }
    let style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let buffer = frame.buffer_mut();
    let (left, top) = (bounds.x, bounds.y);
    let (right, bottom) = (bounds.right() - 1, bounds.bottom() - 1);
    for x in left..=right {
        put(buffer, area, x, top, "┄", style);
        put(buffer, area, x, bottom, "┄", style);
    }
    for y in top..=bottom {
        put(buffer, area, left, y, "┆", style);
        put(buffer, area, right, y, "┆", style);
    }
}

/// Toasts stacked in the top-right corner, newest last.
pub fn render_notifications(frame: &mut UiFrame<'_>, notifications: &Notifications) {
    let area = frame.area();
    let width = 32u16.min(area.width);
    if width < 4 {
        return;
    }
    let x = area.right().saturating_sub(width);
    let mut y = area.y;
    for toast in notifications.iter() {
        let rect = Rect::new(x, y, width, 4);
        if rect.bottom() > area.bottom() {
            break;
        }
        frame.render_widget(Clear, rect);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(toast.title.as_str())
            .border_style(Style::default().fg(Color::Yellow));
        let body = Paragraph::new(toast.message.as_str())
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(body, rect);
        y = y.saturating_add(4);
    }
}

pub fn help_lines(bindings: &KeyBindings) -> Vec<String> {
    let mut lines: Vec<String> = HELP_INTRO.lines().map(str::to_string).collect();
    lines.push(String::new());
    for (action, combos) in bindings.help_entries() {
        lines.push(format!("{:<24} {}", action.to_string(), combos.join(", ")));
    }
    lines
}

pub fn render_help_overlay(frame: &mut UiFrame<'_>, bindings: &KeyBindings) {
    let area = frame.area();
    let lines = help_lines(bindings);
    let height = (lines.len() as u16).saturating_add(2).min(area.height);
    let width = lines
        .iter()
        .map(|l| l.chars().count() as u16)
        .max()
        .unwrap_or(0)
        .saturating_add(4)
        .min(area.width);
    let rect = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    frame.render_widget(Clear, rect);
    let title = format!("{} - help", env!("CARGO_PKG_NAME"));
    let text: Vec<Line> = lines.into_iter().map(Line::from).collect();
    let body = Paragraph::new(text).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(body, rect);
}

fn fill(buffer: &mut Buffer, rect: Rect, symbol: &str, style: Style) {
    for y in rect.top()..rect.bottom() {
        for x in rect.left()..rect.right() {
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.set_symbol(symbol);
                cell.set_style(style);
            }
        }
    }
}

fn put(buffer: &mut Buffer, clip: Rect, x: i32, y: i32, symbol: &str, style: Style) {
    if Bounds::from(clip).contains(crate::geometry::Point::new(x, y))
        && let Some(cell) = buffer.cell_mut((x as u16, y as u16))
    {
        cell.set_symbol(symbol);
        cell.set_style(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DesktopConfig;
    use crate::layout::SnapZone;
    use crate::window::AppDescriptor;
    use crate::window::decorator::DefaultDecorator;
    use std::time::Instant;

    fn render(wm: &WindowManager<&'static str>, area: Rect) -> Buffer {
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        render_desktop(&mut frame, wm, &DefaultDecorator, |frame, rect, record, _| {
            safe_set_string(
                frame.buffer_mut(),
                rect,
                rect.x,
                rect.y,
                record.content(),
                Style::default(),
            );
        });
        buffer
    }

    #[test]
    fn truncate_to_width_short_and_long() {
        assert_eq!(truncate_to_width("abc", 5), "abc");
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
        // wide glyphs take two columns and are never split
        assert_eq!(truncate_to_width("日本語", 5), "日本");
        assert_eq!(display_width("日本語"), 6);
    }

    #[test]
    fn safe_set_string_stops_at_right_edge_for_wide_text() {
        let bounds = Rect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(bounds);
        safe_set_string(&mut buf, bounds, 1, 0, "日本語", Style::default());
        assert_eq!(buf[(1, 0)].symbol(), "日");
        assert_eq!(buf[(3, 0)].symbol(), "本");
        // only half of the third glyph would fit
        assert_eq!(buf[(4, 0)].symbol(), " ");
    }

    #[test]
    fn safe_set_string_writes_within_bounds() {
        let bounds = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(bounds);
        safe_set_string(&mut buf, bounds, 8, 0, "hello", Style::default());
        assert_eq!(buf[(8, 0)].symbol(), "h");
        assert_eq!(buf[(9, 0)].symbol(), "e");
        safe_set_string(&mut buf, bounds, 12, 0, "x", Style::default());
    }

    #[test]
    fn render_widget_clips_to_frame_area() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        frame.render_widget(Paragraph::new("abcdefgh"), Rect::new(2, 0, 10, 5));
        assert_eq!(buffer[(2, 0)].symbol(), "a");
        assert_eq!(buffer[(3, 0)].symbol(), "b");
    }

    #[test]
    fn top_window_paints_over_lower_one() {
        let mut wm = WindowManager::new(DesktopConfig::terminal(), 60, 20);
        wm.open(AppDescriptor::new("Lower", "lower").at(2, 2).with_size(30, 10));
        wm.open(AppDescriptor::new("Upper", "upper").at(10, 4).with_size(30, 10));
        let buffer = render(&wm, Rect::new(0, 0, 60, 20));
        // content origin is one cell in from the left, below the two-row header
        assert_eq!(buffer[(11, 6)].symbol(), "u");
        assert_eq!(buffer[(3, 4)].symbol(), "l");
        assert_eq!(buffer[(10, 4)].symbol(), "┌");
        // taskbar on the last row
        assert_eq!(buffer[(1, 19)].symbol(), "L");
    }

    #[test]
    fn minimized_windows_are_not_drawn() {
        let mut wm = WindowManager::new(DesktopConfig::terminal(), 60, 20);
        let id = wm.open(AppDescriptor::new("Gone", "gone").at(2, 2).with_size(30, 10));
        wm.minimize(id);
        let buffer = render(&wm, Rect::new(0, 0, 60, 20));
        assert_eq!(buffer[(3, 4)].symbol(), " ");
        assert_eq!(buffer[(2, 2)].symbol(), " ");
    }

    #[test]
    fn snap_preview_outlines_target() {
        let area = Rect::new(0, 0, 20, 10);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        let preview = SnapPreview {
            zone: SnapZone::Left,
            bounds: Bounds::new(0, 0, 10, 9),
        };
        render_snap_preview(&mut frame, &preview);
        assert_eq!(buffer[(4, 0)].symbol(), "┄");
        assert_eq!(buffer[(0, 4)].symbol(), "┆");
        assert_eq!(buffer[(9, 4)].symbol(), "┆");
        assert_eq!(buffer[(12, 4)].symbol(), " ");
    }

    #[test]
    fn notifications_render_top_right() {
        let mut wm: WindowManager<&'static str> =
            WindowManager::new(DesktopConfig::terminal(), 60, 20);
        wm.notify("Saved", "notes.txt", Instant::now());
        let buffer = render(&wm, Rect::new(0, 0, 60, 20));
        assert_eq!(buffer[(28, 0)].symbol(), "┌");
        assert_eq!(buffer[(29, 1)].symbol(), "n");
    }

    #[test]
    fn help_lists_bindings() {
        let lines = help_lines(&KeyBindings::desktop());
        assert!(lines[0].starts_with("Drag a title bar"));
        assert!(lines.iter().any(|l| l.contains("Alt+F4")));
    }
}
