/// Terminal host for the cube viewer: mouse-driven interaction and ASCII output
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use cubeview_core::{Button, DrawnLine, Mode, ViewDefaults, Viewer, ViewerError};
use std::io::{self, stdout, Write};
use std::time::Duration;

pub mod renderer;

pub use renderer::AsciiCanvas;

/// Rows above the viewport used for the mode and near/far labels
pub const HEADER_ROWS: u16 = 2;

/// Map core errors onto the io errors the front end reports
pub fn to_io(err: ViewerError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err)
}

/// Mode selected by a key, following the menu accelerators
pub fn mode_for_key(c: char) -> Option<Mode> {
    match c {
        'o' => Some(Mode::ViewRotate),
        'n' => Some(Mode::ViewTranslate),
        'p' => Some(Mode::ViewPerspective),
        'r' => Some(Mode::ModelRotate),
        't' => Some(Mode::ModelTranslate),
        's' => Some(Mode::ModelScale),
        'v' => Some(Mode::Viewport),
        _ => None,
    }
}

pub fn button_for(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::One,
        MouseButton::Middle => Button::Two,
        MouseButton::Right => Button::Three,
    }
}

/// Print replayed frames as `frame <n>` headers followed by one `line` per segment
pub fn write_frames<W: Write>(writer: &mut W, frames: &[Vec<DrawnLine>]) -> io::Result<()> {
    for (n, frame) in frames.iter().enumerate() {
        writeln!(writer, "frame {}", n)?;
        for line in frame {
            let (r, g, b) = line.colour.to_rgb8();
            writeln!(
                writer,
                "line {} {} {} {:.3} {:.3} {:.3} {:.3}",
                r, g, b, line.p.x, line.p.y, line.q.x, line.q.y
            )?;
        }
    }
    Ok(())
}

/// Main application struct for the interactive terminal viewer
pub struct TerminalApp {
    viewer: Viewer,
    canvas: AsciiCanvas,
    running: bool,
    error: Option<String>,
}

impl TerminalApp {
    pub fn new() -> io::Result<Self> {
        Self::with_defaults(ViewDefaults::default())
    }

    pub fn with_defaults(defaults: ViewDefaults) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let height = height.saturating_sub(HEADER_ROWS);
        let viewer = Viewer::new(defaults, width as u32, height as u32).map_err(to_io)?;

        Ok(Self {
            viewer,
            canvas: AsciiCanvas::new(width as usize, height as usize),
            running: true,
            error: None,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let poll_interval = Duration::from_millis(1000 / 60);

        while self.running {
            if event::poll(poll_interval)? {
                self.handle_event(event::read()?)?;
            }

            if self.viewer.take_redraw_request() {
                self.render()?;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Key(key) => self.handle_key(key)?,
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                self.viewer
                    .resize(width as u32, height.saturating_sub(HEADER_ROWS) as u32);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, KeyEvent { code, kind, .. }: KeyEvent) -> io::Result<()> {
        if kind != KeyEventKind::Press {
            return Ok(());
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('a') => {
                self.viewer.reset_view().map_err(to_io)?;
            }
            KeyCode::Char(c) => {
                if let Some(mode) = mode_for_key(c) {
                    self.viewer.set_mode(mode);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_mouse(&mut self, MouseEvent { kind, column, row, .. }: MouseEvent) {
        let x = column as f64;
        let y = row.saturating_sub(HEADER_ROWS) as f64;
        match kind {
            MouseEventKind::Down(button) => self.viewer.on_button_press(button_for(button), x, y),
            MouseEventKind::Up(button) => self.viewer.on_button_release(button_for(button), x, y),
            MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                if let Err(err) = self.viewer.on_motion(x, y) {
                    self.error = Some(err.to_string());
                    self.viewer.invalidate();
                }
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        match self.viewer.render(&mut self.canvas) {
            Ok(_) => self.error = None,
            Err(err) => self.error = Some(err.to_string()),
        }

        let mut stdout = stdout();
        let labels = self.viewer.labels();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(labels.mode.replace('\t', " ")),
            cursor::MoveTo(0, 1),
            Clear(ClearType::CurrentLine),
            Print(labels.near_far.replace('\t', " ")),
            ResetColor
        )?;
        if let Some(err) = &self.error {
            queue!(
                stdout,
                Print("  "),
                SetForegroundColor(Color::Red),
                Print(err),
                ResetColor
            )?;
        }

        self.canvas.draw(&mut stdout, HEADER_ROWS)?;

        stdout.flush()?;
        Ok(())
    }
}
