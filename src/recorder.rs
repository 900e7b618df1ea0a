use crate::simulation::Simulation;
use crate::snapshot;
use gif::{Encoder, Frame, Repeat};
use std::fs::File;
use std::path::Path;

/// Per-frame delay in hundredths of a second; 3 approximates the 60 fps
/// frame clock closely enough for playback
const FRAME_DELAY: u16 = 3;

/// Collects RGB frames while active and encodes them to an animated GIF
/// when recording stops.
pub struct Recorder {
    width: u16,
    height: u16,
    frames: Vec<Vec<u8>>,
    recording: bool,
}

impl Recorder {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width as u16,
            height: height as u16,
            frames: Vec::new(),
            recording: false,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn start(&mut self) {
        self.frames.clear();
        self.recording = true;
    }

    /// Stop recording; captured frames stay buffered until `save` or `start`
    pub fn stop(&mut self) {
        self.recording = false;
    }

    /// Capture the current grid as one frame (no-op unless recording)
    pub fn capture(&mut self, simulation: &Simulation) {
        if self.recording {
            self.frames.push(snapshot::frame_rgb(simulation));
        }
    }

    /// Encode the buffered frames to an animated GIF
    pub fn save(&self, path: &Path) -> Result<(), String> {
        if self.frames.is_empty() {
            return Err("No frames recorded".to_string());
        }

        let file =
            File::create(path).map_err(|e| format!("Failed to create recording file: {}", e))?;
        let mut encoder = Encoder::new(file, self.width, self.height, &[])
            .map_err(|e| format!("Failed to start GIF encoder: {}", e))?;
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| format!("Failed to set GIF repeat: {}", e))?;

        for rgb in &self.frames {
            let mut frame = Frame::from_rgb(self.width, self.height, rgb);
            frame.delay = FRAME_DELAY;
            encoder
                .write_frame(&frame)
                .map_err(|e| format!("Failed to write GIF frame: {}", e))?;
        }

        Ok(())
    }

    /// Default recording filename, numbered by tick at save time
    pub fn filename(simulation: &Simulation) -> String {
        format!("sand-toy-{:06}.gif", simulation.ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Material;
    use tempfile::tempdir;

    #[test]
    fn capture_is_gated_on_recording() {
        let sim = Simulation::with_seed(8, 8, 1);
        let mut recorder = Recorder::new(sim.width, sim.height);

        recorder.capture(&sim);
        assert_eq!(recorder.frame_count(), 0);

        recorder.start();
        recorder.capture(&sim);
        recorder.capture(&sim);
        assert_eq!(recorder.frame_count(), 2);

        recorder.stop();
        recorder.capture(&sim);
        assert_eq!(recorder.frame_count(), 2);
    }

    #[test]
    fn starting_again_discards_old_frames() {
        let sim = Simulation::with_seed(8, 8, 1);
        let mut recorder = Recorder::new(sim.width, sim.height);
        recorder.start();
        recorder.capture(&sim);
        recorder.stop();

        recorder.start();
        assert_eq!(recorder.frame_count(), 0);
    }

    #[test]
    fn save_without_frames_is_an_error() {
        let recorder = Recorder::new(8, 8);
        let dir = tempdir().unwrap();
        assert!(recorder.save(&dir.path().join("empty.gif")).is_err());
    }

    #[test]
    fn recording_round_trips_through_the_decoder() {
        let mut sim = Simulation::with_seed(12, 12, 1);
        let mut recorder = Recorder::new(sim.width, sim.height);
        recorder.start();

        sim.place_circle(6, 2, 2, Material::Sand, 1.0);
        recorder.capture(&sim);
        sim.step();
        recorder.capture(&sim);
        recorder.stop();

        let dir = tempdir().unwrap();
        let path = dir.path().join("run.gif");
        recorder.save(&path).unwrap();

        let mut options = gif::DecodeOptions::new();
        options.set_color_output(gif::ColorOutput::RGBA);
        let mut decoder = options.read_info(File::open(&path).unwrap()).unwrap();
        assert_eq!(decoder.width(), 12);
        assert_eq!(decoder.height(), 12);

        let mut frames = 0;
        while decoder.read_next_frame().unwrap().is_some() {
            frames += 1;
        }
        assert_eq!(frames, 2);
    }
}
