use crate::config::AppConfig;
use crate::recorder::Recorder;
use crate::simulation::Simulation;
use crate::snapshot;
use std::path::Path;
use std::time::Instant;

/// Focus state for parameter editing in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Focus {
    #[default]
    None,
    Material,
    Radius,
    Density,
    Speed,
    Controls,
}

impl Focus {
    /// Tab cycles through the brush parameters
    pub fn next(&self) -> Focus {
        match self {
            Focus::None | Focus::Controls => Focus::Material,
            Focus::Material => Focus::Radius,
            Focus::Radius => Focus::Density,
            Focus::Density => Focus::Speed,
            Focus::Speed => Focus::Material, // Loop back
        }
    }

    /// Shift+Tab cycles in reverse
    pub fn prev(&self) -> Focus {
        match self {
            Focus::None | Focus::Controls => Focus::Speed,
            Focus::Material => Focus::Speed, // Loop back
            Focus::Radius => Focus::Material,
            Focus::Density => Focus::Radius,
            Focus::Speed => Focus::Density,
        }
    }

    /// Check if focus is on a parameter (not Controls or None)
    pub fn is_param(&self) -> bool {
        !matches!(self, Focus::None | Focus::Controls)
    }
}

/// Main application state
pub struct App {
    pub simulation: Simulation,
    pub recorder: Recorder,
    /// Pointer position in grid coordinates, fed by mouse events
    pub cursor: (i32, i32),
    /// Held while the left button is down; the brush stamps every tick
    pub brush_active: bool,
    pub focus: Focus,
    pub fullscreen_mode: bool,
    pub steps_per_frame: usize,
    pub show_help: bool,
    pub help_scroll: u16,
    /// Last export/record outcome shown in the status box
    pub status_message: Option<String>,
    /// Measured frame time for the FPS readout (diagnostic only)
    pub frame_ms: f32,
    last_frame: Instant,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let mut simulation = match config.seed {
            Some(seed) => Simulation::with_seed(config.grid_width, config.grid_height, seed),
            None => Simulation::new(config.grid_width, config.grid_height),
        };
        simulation.brush_material = config.brush_material;
        simulation.brush_radius = config.brush_radius.clamp(1, 50);
        simulation.brush_density = config.brush_density.clamp(0.01, 1.0);

        let recorder = Recorder::new(simulation.width, simulation.height);
        Self {
            simulation,
            recorder,
            cursor: (config.grid_width / 2, config.grid_height / 2),
            brush_active: false,
            focus: Focus::Controls,
            fullscreen_mode: false,
            steps_per_frame: config.steps_per_frame.clamp(1, 20),
            show_help: false,
            help_scroll: 0,
            status_message: None,
            frame_ms: 0.0,
            last_frame: Instant::now(),
        }
    }

    /// Run simulation ticks for the current frame. When the brush is active
    /// it stamps before each tick, matching the per-tick control flow.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.frame_ms = now.duration_since(self.last_frame).as_secs_f32() * 1000.0;
        self.last_frame = now;

        if self.simulation.paused {
            return;
        }
        for _ in 0..self.steps_per_frame {
            if self.brush_active {
                let (x, y) = self.cursor;
                self.simulation.paint(x, y);
            }
            self.simulation.step();
        }
        self.recorder.capture(&self.simulation);
    }

    pub fn fps(&self) -> f32 {
        if self.frame_ms > 0.0 {
            1000.0 / self.frame_ms
        } else {
            0.0
        }
    }

    pub fn pointer_moved(&mut self, x: i32, y: i32) {
        self.cursor = (x, y);
    }

    pub fn press_brush(&mut self) {
        self.brush_active = true;
    }

    pub fn release_brush(&mut self) {
        self.brush_active = false;
    }

    /// Handle adjusting the currently focused parameter
    pub fn adjust_focused_up(&mut self) {
        match self.focus {
            Focus::None | Focus::Controls => {}
            Focus::Material => self.simulation.toggle_material(),
            Focus::Radius => self.simulation.adjust_radius(1),
            Focus::Density => self.simulation.adjust_density(0.01),
            Focus::Speed => self.increase_speed(),
        }
    }

    /// Handle adjusting the currently focused parameter
    pub fn adjust_focused_down(&mut self) {
        match self.focus {
            Focus::None | Focus::Controls => {}
            Focus::Material => self.simulation.toggle_material(),
            Focus::Radius => self.simulation.adjust_radius(-1),
            Focus::Density => self.simulation.adjust_density(-0.01),
            Focus::Speed => self.decrease_speed(),
        }
    }

    /// Cycle to next focus
    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// Navigate to previous parameter (Shift+Tab)
    pub fn prev_focus(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        self.simulation.toggle_pause();
    }

    /// Reset simulation to an empty grid
    pub fn reset(&mut self) {
        self.simulation.reset();
        self.status_message = None;
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen_mode = !self.fullscreen_mode;
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0; // Reset scroll when opening
        }
    }

    /// Scroll help content up
    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }

    /// Scroll help content down
    pub fn scroll_help_down(&mut self, max_scroll: u16) {
        self.help_scroll = (self.help_scroll + 1).min(max_scroll);
    }

    /// Increase simulation speed
    pub fn increase_speed(&mut self) {
        self.steps_per_frame = (self.steps_per_frame + 1).min(20);
    }

    /// Decrease simulation speed
    pub fn decrease_speed(&mut self) {
        self.steps_per_frame = self.steps_per_frame.saturating_sub(1).max(1);
    }

    /// Export the current grid as a PNG next to the working directory
    pub fn take_snapshot(&mut self) {
        let filename = snapshot::snapshot_filename(&self.simulation);
        self.status_message = match snapshot::save_png(&self.simulation, Path::new(&filename)) {
            Ok(()) => Some(format!("Saved {}", filename)),
            Err(e) => Some(e),
        };
    }

    /// Start recording, or stop and encode the buffered frames
    pub fn toggle_recording(&mut self) {
        if self.recorder.is_recording() {
            self.recorder.stop();
            let filename = Recorder::filename(&self.simulation);
            self.status_message = match self.recorder.save(Path::new(&filename)) {
                Ok(()) => Some(format!("Saved {}", filename)),
                Err(e) => Some(e),
            };
        } else {
            self.recorder.start();
            self.status_message = Some("Recording...".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Material;

    fn seeded_app() -> App {
        let config = AppConfig {
            grid_width: 40,
            grid_height: 40,
            brush_radius: 3,
            brush_density: 1.0,
            seed: Some(11),
            ..Default::default()
        };
        App::new(&config)
    }

    #[test]
    fn active_brush_stamps_before_each_tick() {
        let mut app = seeded_app();
        app.pointer_moved(20, 5);
        app.press_brush();
        app.tick();
        assert_eq!(app.simulation.particle_count(), 29);
        assert_eq!(app.simulation.ticks, 1);

        app.release_brush();
        let count = app.simulation.particle_count();
        app.tick();
        assert_eq!(app.simulation.particle_count(), count);
        assert_eq!(app.simulation.ticks, 2);
    }

    #[test]
    fn pause_stops_the_clock() {
        let mut app = seeded_app();
        app.press_brush();
        app.toggle_pause();
        app.tick();
        assert_eq!(app.simulation.ticks, 0);
        assert_eq!(app.simulation.particle_count(), 0);
    }

    #[test]
    fn steps_per_frame_runs_multiple_ticks() {
        let mut app = seeded_app();
        app.steps_per_frame = 4;
        app.tick();
        assert_eq!(app.simulation.ticks, 4);
    }

    #[test]
    fn focus_cycle_visits_every_parameter() {
        let mut focus = Focus::Controls;
        let mut seen = Vec::new();
        for _ in 0..4 {
            focus = focus.next();
            assert!(focus.is_param());
            seen.push(focus);
        }
        assert!(seen.contains(&Focus::Material));
        assert!(seen.contains(&Focus::Radius));
        assert!(seen.contains(&Focus::Density));
        assert!(seen.contains(&Focus::Speed));
        // prev undoes next
        assert_eq!(Focus::Radius.next().prev(), Focus::Radius);
    }

    #[test]
    fn focused_adjustments_reach_the_brush() {
        let mut app = seeded_app();
        app.focus = Focus::Radius;
        app.adjust_focused_up();
        assert_eq!(app.simulation.brush_radius, 4);
        app.focus = Focus::Material;
        app.adjust_focused_up();
        assert_eq!(app.simulation.brush_material, Material::Water);
    }

    #[test]
    fn config_values_apply_clamped() {
        let config = AppConfig {
            grid_width: 30,
            grid_height: 30,
            brush_radius: 500,
            brush_density: 7.0,
            steps_per_frame: 100,
            seed: Some(1),
            ..Default::default()
        };
        let app = App::new(&config);
        assert_eq!(app.simulation.brush_radius, 50);
        assert_eq!(app.simulation.brush_density, 1.0);
        assert_eq!(app.steps_per_frame, 20);
    }
}
