mod cli;
mod logging;

use std::io::stdout;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Size},
    style::Stylize,
    text::Line,
};
use stardrift_background::{
    HostEvent, MountOptions, MountedStarfield, PixelCanvas, RandomSource, SeededRandom, Shell,
    SystemClock, ThreadRandom,
};
use stardrift_config::Config;
use stardrift_core::{Point, Viewport};
use tracing::{debug, info, warn};

use crate::cli::Cli;

/// Canvas pixels per terminal cell, horizontally.
const CELL_WIDTH_PX: f32 = 8.0;
/// Canvas pixels per terminal cell, vertically.
const CELL_HEIGHT_PX: f32 = 16.0;
/// Canvas pixels per stored pixel; two stored pixels stack in each cell.
const PIXEL_SIZE: f32 = CELL_WIDTH_PX;
/// Scroll distance per mouse wheel notch (three rows).
const SCROLL_STEP_PX: f32 = 3.0 * CELL_HEIGHT_PX;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(fps) = cli.fps {
        config.fps = fps;
    }

    let _log_guard = logging::init(&config.log)?;
    info!(fps = config.fps, seed = ?cli.seed, "starting stardrift");

    let terminal = ratatui::init();
    let result = execute!(stdout(), EnableMouseCapture)
        .map_err(color_eyre::Report::from)
        .and_then(|()| match cli.seed {
            Some(seed) => App::new(config).run(terminal, SeededRandom::new(seed)),
            None => App::new(config).run(terminal, ThreadRandom::new()),
        });
    // Best effort: the terminal is being torn down either way.
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

/// Map a terminal size in cells to the canvas viewport.
fn viewport_for(size: Size) -> Viewport {
    Viewport::new(
        size.width as f32 * CELL_WIDTH_PX,
        size.height as f32 * CELL_HEIGHT_PX,
    )
}

/// Canvas position of the center of a terminal cell.
fn cell_center(column: u16, row: u16) -> Point {
    Point::new(
        (column as f32 + 0.5) * CELL_WIDTH_PX,
        (row as f32 + 0.5) * CELL_HEIGHT_PX,
    )
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Loaded configuration.
    config: Config,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        Self {
            running: false,
            config,
        }
    }

    /// Duration of one frame at the configured rate.
    fn frame_period(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.config.fps.max(1)))
    }

    /// Run the application's main loop.
    pub fn run<R: RandomSource + 'static>(
        mut self,
        mut terminal: DefaultTerminal,
        random: R,
    ) -> color_eyre::Result<()> {
        let viewport = viewport_for(terminal.size()?);
        let mut shell = Shell::new(viewport);

        let surface = match PixelCanvas::acquire(viewport, PIXEL_SIZE) {
            Ok(canvas) => Some(canvas),
            Err(err) => {
                debug!(%err, "no canvas for starfield");
                None
            }
        };
        let starfield = MountedStarfield::mount(
            &mut shell,
            surface,
            SystemClock::new(),
            random,
            MountOptions {
                tuning: self.config.tuning,
                accent: self.config.accent.clone(),
            },
        );

        self.running = true;
        let result = self.event_loop(&mut terminal, &mut shell, &starfield);
        starfield.unmount(&mut shell);
        result
    }

    fn event_loop<R: RandomSource + 'static>(
        &mut self,
        terminal: &mut DefaultTerminal,
        shell: &mut Shell,
        starfield: &MountedStarfield<PixelCanvas, SystemClock, R>,
    ) -> color_eyre::Result<()> {
        let period = self.frame_period();
        while self.running {
            let frame_start = Instant::now();
            shell.run_frame();
            terminal.draw(|frame| self.render(frame, starfield))?;

            // Drain input until the next frame is due.
            loop {
                let remaining = period.saturating_sub(frame_start.elapsed());
                if remaining.is_zero() || !event::poll(remaining)? {
                    break;
                }
                self.handle_event(event::read()?, shell);
                if !self.running {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Renders the user interface.
    fn render<R: RandomSource + 'static>(
        &self,
        frame: &mut Frame,
        starfield: &MountedStarfield<PixelCanvas, SystemClock, R>,
    ) {
        let area = frame.area();
        if let Some(canvas) = starfield.surface() {
            frame.render_widget(&*canvas, area);
        }

        let [_, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        let help = Line::from(vec![
            "q".bold().light_magenta(),
            " quit  ".dark_gray(),
            "mouse".bold().light_magenta(),
            " glow  ".dark_gray(),
            "wheel".bold().light_magenta(),
            " drift".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, help_area);
    }

    /// Translate a crossterm event into host input.
    fn handle_event(&mut self, event: Event, shell: &mut Shell) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Mouse(mouse) => on_mouse_event(mouse, shell),
            Event::Resize(width, height) => {
                let viewport = viewport_for(Size::new(width, height));
                if viewport.is_empty() {
                    warn!(width, height, "ignoring resize to an empty terminal");
                    return;
                }
                shell.dispatch(HostEvent::Resize(viewport));
            }
            _ => {}
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            _ => {}
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Pointer motion and wheel scrolling.
fn on_mouse_event(mouse: MouseEvent, shell: &mut Shell) {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            shell.dispatch(HostEvent::PointerMove(cell_center(mouse.column, mouse.row)));
        }
        MouseEventKind::ScrollDown => shell.scroll_by(SCROLL_STEP_PX),
        MouseEventKind::ScrollUp => shell.scroll_by(-SCROLL_STEP_PX),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use stardrift_background::{EventKind, EventSource};

    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_viewport_for_cells() {
        assert_eq!(
            viewport_for(Size::new(80, 24)),
            Viewport::new(640.0, 384.0)
        );
    }

    #[test]
    fn test_cell_center() {
        assert_eq!(cell_center(0, 0), Point::new(4.0, 8.0));
        assert_eq!(cell_center(10, 2), Point::new(84.0, 40.0));
    }

    #[test]
    fn test_wheel_scrolls_shell() {
        let mut app = App::new(Config::default());
        let mut shell = Shell::new(Viewport::new(640.0, 384.0));

        app.handle_event(mouse(MouseEventKind::ScrollDown, 0, 0), &mut shell);
        app.handle_event(mouse(MouseEventKind::ScrollDown, 0, 0), &mut shell);
        assert_eq!(shell.scroll_y(), 2.0 * SCROLL_STEP_PX);
        app.handle_event(mouse(MouseEventKind::ScrollUp, 0, 0), &mut shell);
        app.handle_event(mouse(MouseEventKind::ScrollUp, 0, 0), &mut shell);
        app.handle_event(mouse(MouseEventKind::ScrollUp, 0, 0), &mut shell);
        assert_eq!(shell.scroll_y(), 0.0);
    }

    #[test]
    fn test_mouse_move_dispatches_pointer() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let mut app = App::new(Config::default());
        let mut shell = Shell::new(Viewport::new(640.0, 384.0));
        let seen = Rc::new(RefCell::new(None));
        let log = seen.clone();
        shell.add_listener(
            EventKind::PointerMove,
            Box::new(move |event| *log.borrow_mut() = Some(*event)),
        );

        app.handle_event(mouse(MouseEventKind::Moved, 3, 1), &mut shell);
        assert_eq!(
            *seen.borrow(),
            Some(HostEvent::PointerMove(Point::new(28.0, 24.0)))
        );
    }

    #[test]
    fn test_resize_updates_shell_and_ignores_empty() {
        let mut app = App::new(Config::default());
        let mut shell = Shell::new(Viewport::new(640.0, 384.0));

        app.handle_event(Event::Resize(100, 30), &mut shell);
        assert_eq!(shell.viewport(), Viewport::new(800.0, 480.0));
        app.handle_event(Event::Resize(0, 30), &mut shell);
        assert_eq!(shell.viewport(), Viewport::new(800.0, 480.0));
    }

    #[test]
    fn test_quit_keys() {
        for (code, modifiers) in [
            (KeyCode::Char('q'), KeyModifiers::NONE),
            (KeyCode::Esc, KeyModifiers::NONE),
            (KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = App::new(Config::default());
            app.running = true;
            let mut shell = Shell::new(Viewport::new(640.0, 384.0));
            let key = KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press);
            app.handle_event(Event::Key(key), &mut shell);
            assert!(!app.running);
        }
    }

    #[test]
    fn test_frame_period() {
        let app = App::new(Config {
            fps: 50,
            ..Config::default()
        });
        assert_eq!(app.frame_period(), Duration::from_millis(20));
    }
}
