use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};
use tracing::Level;

use desk_wm::actions::Action;
use desk_wm::drivers::OutputDriver;
use desk_wm::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use desk_wm::event_loop::{ControlFlow, EventLoop};
use desk_wm::input::{DesktopInput, translate};
use desk_wm::keybindings::KeyBindings;
use desk_wm::timers::Debouncer;
use desk_wm::tracing_sub;
use desk_wm::ui::{UiFrame, render_desktop, render_help_overlay};
use desk_wm::window::DefaultDecorator;
use desk_wm::{AppDescriptor, DesktopConfig, SnapRegion, WindowManager, WindowRecord};

/// Terminal resizes arrive in bursts while the user drags the emulator edge.
const RESIZE_SETTLE: Duration = Duration::from_millis(120);

#[derive(Debug, Parser)]
#[command(name = "desk-wm", version, about = "A floating desktop in your terminal.")]
struct Cli {
    /// TOML file with desktop tunables, in terminal cells.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append log output to this file. Logging is off without it.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,

    /// Overrides the edge distance that docks a dragged window.
    #[arg(long)]
    snap_threshold: Option<u32>,

    /// Number of demo apps to open at startup.
    #[arg(long, default_value_t = 3)]
    windows: usize,
}

/// Demo applications hosted by the desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToyApp {
    Calculator,
    Files,
    Editor,
    Terminal,
    Browser,
    Settings,
}

impl ToyApp {
    const ALL: [ToyApp; 6] = [
        ToyApp::Calculator,
        ToyApp::Files,
        ToyApp::Editor,
        ToyApp::Terminal,
        ToyApp::Browser,
        ToyApp::Settings,
    ];

    fn title(self) -> &'static str {
        match self {
            ToyApp::Calculator => "Calculator",
            ToyApp::Files => "Files",
            ToyApp::Editor => "Text Editor",
            ToyApp::Terminal => "Terminal",
            ToyApp::Browser => "Browser",
            ToyApp::Settings => "Settings",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ToyApp::Calculator => "=",
            ToyApp::Files => "#",
            ToyApp::Editor => "~",
            ToyApp::Terminal => ">",
            ToyApp::Browser => "@",
            ToyApp::Settings => "*",
        }
    }

    /// Launching again brings the open window forward instead.
    fn single_instance(self) -> bool {
        matches!(self, ToyApp::Calculator | ToyApp::Settings)
    }

    fn descriptor(self) -> AppDescriptor<ToyApp> {
        let descriptor = AppDescriptor::new(self.title(), self).with_icon(self.icon());
        match self {
            ToyApp::Calculator => descriptor.with_size(24, 10).resizable(false).maximizable(false),
            ToyApp::Settings => descriptor.with_size(40, 10).closable(false),
            _ => descriptor,
        }
    }

    fn body(self) -> Vec<Line<'static>> {
        let lines: &[&'static str] = match self {
            ToyApp::Calculator => &["        0", "", " 7  8  9  /", " 4  5  6  *", " 1  2  3  -", " 0  .  =  +"],
            ToyApp::Files => &["Documents/", "Pictures/", "notes.txt", "todo.md"],
            ToyApp::Editor => &["Drag me by the title bar.", "Drop me on a screen edge to snap."],
            ToyApp::Terminal => &["$ uptime", " up 3 days, 2 users", "$ _"],
            ToyApp::Browser => &["[ https://example.org ]", "", "Example Domain"],
            ToyApp::Settings => &["Theme: dark", "Snap assist: on", "This window cannot be closed."],
        };
        lines.iter().map(|l| Line::from(*l)).collect()
    }
}

fn render_toy(frame: &mut UiFrame<'_>, area: Rect, record: &WindowRecord<ToyApp>, focused: bool) {
    let style = if focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };
    let body = Paragraph::new(record.content().body())
        .style(style)
        .wrap(Wrap { trim: false });
    frame.render_widget(body, area);
}

struct Desktop {
    wm: WindowManager<ToyApp>,
    bindings: KeyBindings,
    decorator: DefaultDecorator,
    show_help: bool,
    next_app: usize,
    resize: Debouncer<()>,
    pending_size: Option<(u16, u16)>,
}

impl Desktop {
    fn new(wm: WindowManager<ToyApp>) -> Self {
        Self {
            wm,
            bindings: KeyBindings::desktop(),
            decorator: DefaultDecorator,
            show_help: false,
            next_app: 0,
            resize: Debouncer::new(RESIZE_SETTLE),
            pending_size: None,
        }
    }

    fn open_next(&mut self, now: Instant) {
        let app = ToyApp::ALL[self.next_app % ToyApp::ALL.len()];
        self.next_app += 1;
        if app.single_instance()
            && let Some(id) = self.wm.find(|record| *record.content() == app)
        {
            tracing::debug!(window_id = %id, app = app.title(), "app already open");
            self.wm.activate(id);
            return;
        }
        let id = self.wm.open(app.descriptor());
        self.wm.notify("Opened", format!("{} ({id})", app.title()), now);
    }

    fn apply(&mut self, action: Action, now: Instant) -> ControlFlow {
        let focused = self.wm.focused();
        match action {
            Action::Quit => return ControlFlow::Quit,
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::NewWindow => self.open_next(now),
            Action::CloseFocused => {
                self.wm.close_focused();
            }
            Action::CycleNextWindow => {
                self.wm.cycle_focus(true);
            }
            Action::CyclePrevWindow => {
                self.wm.cycle_focus(false);
            }
            Action::MinimizeFocused | Action::ToggleMaximize | Action::SnapLeft
            | Action::SnapRight | Action::RestoreFocused => {
                let Some(id) = focused else {
                    return ControlFlow::Continue;
                };
                match action {
                    Action::MinimizeFocused => self.wm.minimize(id),
                    Action::ToggleMaximize => self.wm.toggle_maximize(id),
                    Action::SnapLeft => self.wm.snap(id, SnapRegion::LeftHalf),
                    Action::SnapRight => self.wm.snap(id, SnapRegion::RightHalf),
                    _ => self.wm.restore(id),
                }
            }
        }
        ControlFlow::Continue
    }

    fn handle(&mut self, input: DesktopInput, now: Instant) -> ControlFlow {
        match input {
            DesktopInput::Pointer(pointer) => {
                self.wm.handle_pointer(pointer, now);
            }
            DesktopInput::Blur => self.wm.blur(),
            DesktopInput::Resize { width, height } => {
                self.pending_size = Some((width, height));
                self.resize.schedule((), now);
            }
            DesktopInput::Key(key) => {
                if self.show_help && key.code == KeyCode::Esc {
                    self.show_help = false;
                    return ControlFlow::Continue;
                }
                if let Some(action) = self.bindings.action_for_key(&key) {
                    tracing::debug!(%action, "key action");
                    return self.apply(action, now);
                }
            }
        }
        ControlFlow::Continue
    }

    fn tick(&mut self, now: Instant) {
        if !self.resize.take_due(now).is_empty()
            && let Some((width, height)) = self.pending_size.take()
        {
            self.wm.set_viewport(u32::from(width), u32::from(height));
        }
        self.wm.tick(now);
    }

    fn draw(&self, mut frame: UiFrame<'_>) {
        render_desktop(&mut frame, &self.wm, &self.decorator, render_toy);
        if self.show_help {
            render_help_overlay(&mut frame, &self.bindings);
        }
    }
}

fn load_config(cli: &Cli) -> io::Result<DesktopConfig> {
    let mut config = match &cli.config {
        Some(path) => DesktopConfig::read(path).map_err(io::Error::other)?,
        None => DesktopConfig::terminal(),
    };
    if let Some(threshold) = cli.snap_threshold {
        config.snap_threshold = threshold;
    }
    Ok(config)
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    tracing_sub::init_default(cli.log_file.as_deref(), cli.log_level)?;
    let config = load_config(&cli)?;

    let mut output = ConsoleOutputDriver::new()?;
    let (width, height) = output.size()?;
    let mut desktop = Desktop::new(WindowManager::new(
        config,
        u32::from(width),
        u32::from(height),
    ));
    let now = Instant::now();
    for _ in 0..cli.windows {
        desktop.open_next(now);
    }
    tracing::info!(width, height, windows = cli.windows, "desktop started");

    output.enter()?;
    let mut events = EventLoop::new(ConsoleInputDriver::new(), Duration::from_millis(16));
    let result = events.run(|_, event| {
        let now = Instant::now();
        match event {
            None => {
                desktop.tick(now);
                output.draw(|frame| desktop.draw(frame))?;
                Ok(ControlFlow::Continue)
            }
            Some(event) => Ok(match translate(event) {
                Some(input) => desktop.handle(input, now),
                None => ControlFlow::Continue,
            }),
        }
    });
    output.exit()?;
    tracing::info!("desktop stopped");
    result
}
