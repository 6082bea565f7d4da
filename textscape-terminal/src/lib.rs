/// Terminal frontend for the term visualization
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use log::info;
use std::io::{self, stdout, BufRead, Write};
use std::time::{Duration, Instant};
use textscape_core::{
    build_scene, Camera, Color as SceneColor, Orbit, PanelStage, Scene, TermSpec, Turntable,
    VisualizationSpec,
};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Default colors handed to terms entered without one
const TERM_COLORS: &[&str] = &["#aa00ff", "#00ffaa", "#ffaa00"];

/// Main application struct for the camera-control stage
pub struct TerminalApp {
    scene: Scene,
    camera: Camera,
    orbit: Orbit,
    turntable: Turntable,
    renderer: AsciiRenderer,
    running: bool,
    started: Instant,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: Scene) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        let camera = Camera::new(width as u32, height as u32);
        let orbit = Orbit::from_camera(&camera);
        Ok(Self {
            scene,
            camera,
            orbit,
            turntable: Turntable::default(),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            started: Instant::now(),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Update
            self.update();

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('w') | KeyCode::Up => {
                    self.orbit.rotate(0.0, 0.1);
                }
                KeyCode::Char('s') | KeyCode::Down => {
                    self.orbit.rotate(0.0, -0.1);
                }
                KeyCode::Char('a') | KeyCode::Left => {
                    self.orbit.rotate(-0.1, 0.0);
                }
                KeyCode::Char('d') | KeyCode::Right => {
                    self.orbit.rotate(0.1, 0.0);
                }
                KeyCode::Char('e') => {
                    self.orbit.zoom(-1.0);
                }
                KeyCode::Char('r') => {
                    self.orbit.zoom(1.0);
                }
                KeyCode::Char('t') => {
                    self.turntable.enabled = !self.turntable.enabled;
                }
                KeyCode::Char(c @ '1'..='9') => {
                    let index = c as usize - '1' as usize;
                    self.scene.toggle_group(index);
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn update(&mut self) {
        if self.turntable.enabled {
            self.turntable
                .apply(&mut self.camera, self.started.elapsed().as_secs_f32());
        } else {
            self.orbit.apply(&mut self.camera);
        }
    }

    fn render(&mut self) -> io::Result<()> {
        // Clear renderer
        self.renderer.clear();

        // Render the scene
        self.renderer.render_scene(&self.scene, &self.camera);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let groups: Vec<String> = self
            .scene
            .groups
            .iter()
            .enumerate()
            .map(|(i, g)| {
                format!(
                    "{}:{}({})",
                    i + 1,
                    g.name,
                    if g.visible { "on" } else { "off" }
                )
            })
            .collect();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Textscape | FPS: {:.1} | {} | WASD/Arrows=Orbit E/R=Zoom T=Turntable 1-9=Groups Q=Quit",
                self.fps,
                groups.join(" ")
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Walk the panel stages on stdin, then hand the built scene to the app.
///
/// Mirrors the staged panel flow: source-text entry, term entry, an explicit
/// visualize step, then interactive camera control. Runs in cooked terminal
/// mode until the camera stage begins.
pub fn run_interactive() -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut out = stdout();

    let mut stage = PanelStage::default();
    let mut spec = VisualizationSpec {
        source_text: String::new(),
        terms: Vec::new(),
    };
    let mut scene = Scene::default();

    while !stage.is_terminal() {
        match stage {
            PanelStage::SourceText => {
                write!(out, "Source text [default demo sentence]: ")?;
                out.flush()?;
                let line = read_line(&mut lines)?;
                spec.source_text = if line.trim().is_empty() {
                    VisualizationSpec::demo().source_text
                } else {
                    line
                };
            }
            PanelStage::SearchTerms => {
                for (index, default_color) in TERM_COLORS.iter().enumerate() {
                    write!(out, "Term {} (empty to finish): ", index + 1)?;
                    out.flush()?;
                    let term = read_line(&mut lines)?.trim().to_lowercase();
                    if term.is_empty() {
                        break;
                    }
                    let color = SceneColor::parse(default_color)
                        .unwrap_or(SceneColor::new(1.0, 1.0, 1.0));
                    let mut term_spec = TermSpec::new(term, color);
                    term_spec.randomized = true;
                    spec.terms.push(term_spec);
                }
                if spec.terms.is_empty() {
                    spec.terms = VisualizationSpec::demo().terms;
                    writeln!(out, "No terms entered, visualizing the demo terms.")?;
                }
            }
            PanelStage::Visualize => {
                scene = build_scene(&spec, &mut rand::thread_rng());
                info!("visualized {} objects", scene.object_count());
                writeln!(
                    out,
                    "Placed {} objects. Starting camera control (press Q to quit)...",
                    scene.object_count()
                )?;
                out.flush()?;
                std::thread::sleep(Duration::from_secs(1));
            }
            PanelStage::CameraControl => unreachable!("loop exits before the terminal stage"),
        }
        stage = stage.advance();
    }

    TerminalApp::new(scene)?.run()
}

fn read_line(lines: &mut impl Iterator<Item = io::Result<String>>) -> io::Result<String> {
    match lines.next() {
        Some(line) => line,
        None => Ok(String::new()),
    }
}
