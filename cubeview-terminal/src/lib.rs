/// Terminal front end for the cube viewer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use cubeview_core::{
    CameraController, CancellationToken, FrameTicker, KeyOutcome, Mesh, RenderDriver, RenderError,
    Scheme, ViewerConfig,
};
use std::io::{stdout, Write};
use std::time::Instant;

pub mod logging;
pub mod renderer;

pub use renderer::AsciiRenderer;

/// What a terminal event asks the loop to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    Quit,
    Key(char),
    Resize(u16, u16),
    None,
}

impl InputAction {
    pub fn from_event(event: &Event) -> Self {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) => {
                if *kind == KeyEventKind::Release {
                    return InputAction::None;
                }
                match code {
                    KeyCode::Esc => InputAction::Quit,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        InputAction::Quit
                    }
                    KeyCode::Char('q') | KeyCode::Char('Q') => InputAction::Quit,
                    KeyCode::Char(c) => InputAction::Key(*c),
                    _ => InputAction::None,
                }
            }
            Event::Resize(width, height) => InputAction::Resize(*width, *height),
            _ => InputAction::None,
        }
    }
}

/// Main application struct for terminal cube viewing
pub struct TerminalApp {
    config: ViewerConfig,
    controller: CameraController,
    driver: RenderDriver<AsciiRenderer>,
    ticker: FrameTicker,
    token: CancellationToken,
    last_action: String,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: ViewerConfig) -> Result<Self, RenderError> {
        let (width, height) = terminal::size()?;
        let (grid_width, grid_height) = grid_size(width, height);
        let mesh = Mesh::cube(config.scheme.mesh_scale());
        let driver = RenderDriver::new(AsciiRenderer::new(grid_width, grid_height), &mesh)?;

        Ok(Self {
            controller: CameraController::new(config.scheme),
            driver,
            ticker: FrameTicker::new(config.frame_rate),
            token: CancellationToken::new(),
            last_action: "default view".to_string(),
            last_fps_sample: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            config,
        })
    }

    /// Token that stops the loop when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn run(&mut self) -> Result<(), RenderError> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        log::info!(
            "render loop started: scheme {}, {} fps",
            self.config.scheme,
            self.config.frame_rate
        );

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
        log::info!("render loop stopped after {} frames", self.driver.frames_drawn());

        result
    }

    fn main_loop(&mut self) -> Result<(), RenderError> {
        while !self.token.is_cancelled() {
            // Wait for input until the next frame is due
            if event::poll(self.ticker.remaining())? {
                let event = event::read()?;
                self.handle_action(InputAction::from_event(&event));
                continue;
            }

            self.ticker.tick();
            self.render()?;
            self.update_fps();
        }
        Ok(())
    }

    pub fn handle_action(&mut self, action: InputAction) {
        match action {
            InputAction::Quit => self.token.cancel(),
            InputAction::Key(key) => {
                let outcome = self.controller.handle_key(key);
                if let Some(text) = describe(&outcome) {
                    self.last_action = text;
                }
            }
            InputAction::Resize(width, height) => {
                let (grid_width, grid_height) = grid_size(width, height);
                self.driver.backend_mut().resize(grid_width, grid_height);
            }
            InputAction::None => {}
        }
    }

    pub fn controller(&self) -> &CameraController {
        &self.controller
    }

    fn update_fps(&mut self) {
        self.frame_count += 1;
        let elapsed = self.last_fps_sample.elapsed();
        if elapsed.as_secs() >= 1 {
            self.fps = self.frame_count as f32 / elapsed.as_secs_f32();
            self.frame_count = 0;
            self.last_fps_sample = Instant::now();
        }
    }

    fn render(&mut self) -> Result<(), RenderError> {
        self.driver.frame(&self.controller)?;

        let mut stdout = stdout();
        self.driver.backend().draw(&mut stdout)?;

        // Status line below the grid
        let (_, rows) = self.driver.backend().size();
        queue!(
            stdout,
            cursor::MoveTo(0, rows as u16),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(status_line(self.config.scheme, self.fps, &self.last_action)),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Grid dimensions for a terminal size, keeping one row for the status line
fn grid_size(width: u16, height: u16) -> (usize, usize) {
    (width as usize, height.saturating_sub(1) as usize)
}

fn controls(scheme: Scheme) -> &'static str {
    match scheme {
        Scheme::Orbit => "T/L/F=Views A/D=Orbit Q=Quit",
        Scheme::Ortho => "T/L/F/I=Views A/D=Roll W/S=Zoom Q=Quit",
    }
}

fn status_line(scheme: Scheme, fps: f32, last_action: &str) -> String {
    format!(
        "Cubeview [{}] | FPS: {:.1} | {} | {}",
        scheme,
        fps,
        controls(scheme),
        last_action
    )
}

fn describe(outcome: &KeyOutcome) -> Option<String> {
    match outcome {
        KeyOutcome::ViewSelected(preset) => Some(format!("{} view", preset.name)),
        KeyOutcome::Rotated => Some("rotated".to_string()),
        KeyOutcome::Zoomed => Some("zoomed".to_string()),
        KeyOutcome::ZoomClamped => Some("zoom limit reached".to_string()),
        KeyOutcome::Rejected => Some("degenerate view rejected".to_string()),
        KeyOutcome::Ignored => None,
    }
}
