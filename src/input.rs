//! Maps raw crossterm events onto desktop signals.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};

use crate::window::PointerEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopInput {
    Pointer(PointerEvent),
    Key(KeyEvent),
    /// The terminal lost focus; in-flight gestures must stop.
    Blur,
    Resize { width: u16, height: u16 },
}

/// Returns `None` for events the desktop does not react to, such as key
/// releases, wheel scrolls and non-primary buttons.
pub fn translate(event: Event) -> Option<DesktopInput> {
    match event {
        Event::Mouse(mouse) => {
            let (x, y) = (i32::from(mouse.column), i32::from(mouse.row));
            let pointer = match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => PointerEvent::press(x, y),
                MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                    PointerEvent::moved(x, y)
                }
                MouseEventKind::Up(MouseButton::Left) => PointerEvent::release(x, y),
                _ => return None,
            };
            Some(DesktopInput::Pointer(pointer))
        }
        Event::Key(key) => normalize_key(key).map(DesktopInput::Key),
        Event::FocusLost => Some(DesktopInput::Blur),
        Event::Resize(width, height) => Some(DesktopInput::Resize { width, height }),
        _ => None,
    }
}

/// Drops release and repeat reports and folds Shift+Tab into BackTab so
/// terminals that report either form bind the same way.
fn normalize_key(mut key: KeyEvent) -> Option<KeyEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
        key.code = KeyCode::BackTab;
    }
    if key.code == KeyCode::BackTab {
        key.modifiers.remove(KeyModifiers::SHIFT);
    }
    Some(key)
}
