use std::fmt;

/// Keyboard-driven desktop commands. Window commands apply to the focused
/// window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    ToggleHelp,
    NewWindow,
    CloseFocused,
    MinimizeFocused,
    ToggleMaximize,
    SnapLeft,
    SnapRight,
    RestoreFocused,
    CycleNextWindow,
    CyclePrevWindow,
}

impl Action {
    /// Display order for the help overlay.
    pub const ALL: [Action; 11] = [
        Action::NewWindow,
        Action::CloseFocused,
        Action::MinimizeFocused,
        Action::ToggleMaximize,
        Action::SnapLeft,
        Action::SnapRight,
        Action::RestoreFocused,
        Action::CycleNextWindow,
        Action::CyclePrevWindow,
        Action::ToggleHelp,
        Action::Quit,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::ToggleHelp => "Toggle help",
            Action::NewWindow => "Open next app",
            Action::CloseFocused => "Close window",
            Action::MinimizeFocused => "Minimize window",
            Action::ToggleMaximize => "Maximize / restore",
            Action::SnapLeft => "Snap to left half",
            Action::SnapRight => "Snap to right half",
            Action::RestoreFocused => "Restore window",
            Action::CycleNextWindow => "Cycle next window",
            Action::CyclePrevWindow => "Cycle previous window",
        };
        write!(f, "{}", s)
    }
}
