mod app;
mod braille;
mod config;
mod recorder;
mod simulation;
mod snapshot;
mod ui;

use app::{App, Focus};
use clap::Parser;
use config::AppConfig;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use simulation::Material;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "sand-toy")]
#[command(about = "Falling sand and water toy in the terminal")]
struct Args {
    /// Grid width in cells
    #[arg(long)]
    width: Option<i32>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<i32>,

    /// Brush radius in cells (1-50)
    #[arg(short = 'r', long)]
    radius: Option<i32>,

    /// Per-cell placement probability inside the brush circle (0.01-1.0)
    #[arg(short = 'd', long)]
    density: Option<f32>,

    /// Initial brush material (sand, water)
    #[arg(short = 'm', long)]
    material: Option<String>,

    /// Simulation ticks per frame (1-20)
    #[arg(long)]
    speed: Option<usize>,

    /// RNG seed for reproducible brush placement
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a JSON config file (defaults to the platform config dir)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

fn parse_material(s: &str) -> Material {
    match s.to_lowercase().as_str() {
        "water" | "w" => Material::Water,
        _ => Material::Sand,
    }
}

/// Load the config file, then layer explicitly-given CLI flags on top
fn build_config(args: &Args) -> Result<AppConfig, String> {
    let mut config = if let Some(path) = &args.config {
        AppConfig::load_from_file(path)?
    } else {
        match AppConfig::default_path() {
            Some(path) if path.exists() => AppConfig::load_from_file(&path)?,
            _ => AppConfig::default(),
        }
    };

    if let Some(width) = args.width {
        config.grid_width = width.clamp(16, 1024);
    }
    if let Some(height) = args.height {
        config.grid_height = height.clamp(16, 1024);
    }
    if let Some(radius) = args.radius {
        config.brush_radius = radius.clamp(1, 50);
    }
    if let Some(density) = args.density {
        config.brush_density = density.clamp(0.01, 1.0);
    }
    if let Some(material) = &args.material {
        config.brush_material = parse_material(material);
    }
    if let Some(speed) = args.speed {
        config.steps_per_frame = speed.clamp(1, 20);
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = build_config(&args)?;
    let mut app = App::new(&config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    // Target ~60fps for smooth animation
    const FRAME_DURATION: Duration = Duration::from_millis(16);

    loop {
        // Render current state
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events with timeout
        if event::poll(FRAME_DURATION)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only process Press events
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }

                    // Handle Ctrl+C
                    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }

                    match key.code {
                        // System controls
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char(' ') => app.toggle_pause(),
                        KeyCode::Char('r') | KeyCode::Char('R') => app.reset(),
                        KeyCode::Char('v') | KeyCode::Char('V') => app.toggle_fullscreen(),
                        KeyCode::Char('h') | KeyCode::Char('H') => app.toggle_help(),

                        // Brush
                        KeyCode::Char('f') | KeyCode::Char('F') => {
                            app.simulation.toggle_material();
                            app.focus = Focus::Material;
                        }
                        KeyCode::Char('[') => {
                            app.simulation.adjust_radius(-1);
                            app.focus = Focus::Radius;
                        }
                        KeyCode::Char(']') => {
                            app.simulation.adjust_radius(1);
                            app.focus = Focus::Radius;
                        }
                        KeyCode::Char('+') | KeyCode::Char('=') => {
                            app.increase_speed();
                            app.focus = Focus::Speed;
                        }
                        KeyCode::Char('-') | KeyCode::Char('_') => {
                            app.decrease_speed();
                            app.focus = Focus::Speed;
                        }

                        // Export
                        KeyCode::Char('x') | KeyCode::Char('X') => app.take_snapshot(),
                        KeyCode::Char('g') | KeyCode::Char('G') => app.toggle_recording(),

                        // Navigation
                        KeyCode::Tab => app.next_focus(),
                        KeyCode::BackTab => app.prev_focus(),
                        KeyCode::Up => {
                            if !app.show_help && app.focus.is_param() {
                                app.adjust_focused_up();
                            }
                        }
                        KeyCode::Down => {
                            if !app.show_help && app.focus.is_param() {
                                app.adjust_focused_down();
                            }
                        }
                        KeyCode::Esc => {
                            if app.show_help {
                                app.toggle_help();
                            } else if app.focus.is_param() {
                                app.focus = Focus::Controls;
                            }
                        }
                        KeyCode::Char('j') | KeyCode::Char('J') => {
                            if app.show_help {
                                app.scroll_help_down(ui::HELP_CONTENT_LINES);
                            }
                        }
                        KeyCode::Char('k') | KeyCode::Char('K') => {
                            if app.show_help {
                                app.scroll_help_up();
                            }
                        }
                        _ => {}
                    }
                }
                Event::Mouse(mouse) => {
                    // Map the pointer into grid coordinates whenever it is
                    // over the canvas interior
                    let size = terminal.size()?;
                    let frame_rect = ratatui::layout::Rect {
                        x: 0,
                        y: 0,
                        width: size.width,
                        height: size.height,
                    };
                    let (canvas_width, canvas_height) =
                        ui::get_canvas_size(frame_rect, app.fullscreen_mode);
                    let (origin_x, origin_y) = ui::canvas_origin(app.fullscreen_mode);

                    if mouse.column >= origin_x && mouse.row >= origin_y {
                        let cell_x = mouse.column - origin_x;
                        let cell_y = mouse.row - origin_y;
                        if cell_x < canvas_width && cell_y < canvas_height {
                            let (gx, gy) = braille::cell_to_grid(
                                &app.simulation,
                                canvas_width,
                                canvas_height,
                                cell_x,
                                cell_y,
                            );
                            app.pointer_moved(gx, gy);
                        }
                    }

                    match mouse.kind {
                        MouseEventKind::Down(MouseButton::Left) => app.press_brush(),
                        MouseEventKind::Up(MouseButton::Left) => app.release_brush(),
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        // Run simulation tick
        app.tick();
    }
}
