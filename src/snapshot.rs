use crate::simulation::{Material, Simulation};
use image::{Rgb, RgbImage};
use std::path::Path;

/// Flatten the grid into packed RGB bytes, one pixel per cell, row-major by
/// screen rows. Shared by the PNG snapshot and the GIF recorder.
pub fn frame_rgb(simulation: &Simulation) -> Vec<u8> {
    let mut data = Vec::with_capacity((simulation.width * simulation.height * 3) as usize);
    for y in 0..simulation.height {
        for x in 0..simulation.width {
            let material = simulation.cell(x, y).unwrap_or(Material::Empty);
            data.extend_from_slice(&material.rgb());
        }
    }
    data
}

/// Export the current grid as a PNG image using the fixed material palette
pub fn save_png(simulation: &Simulation, path: &Path) -> Result<(), String> {
    let mut img = RgbImage::new(simulation.width as u32, simulation.height as u32);
    for y in 0..simulation.height {
        for x in 0..simulation.width {
            let material = simulation.cell(x, y).unwrap_or(Material::Empty);
            img.put_pixel(x as u32, y as u32, Rgb(material.rgb()));
        }
    }
    img.save(path)
        .map_err(|e| format!("Failed to write snapshot: {}", e))
}

/// Default snapshot filename, numbered by tick so repeated exports don't clobber
pub fn snapshot_filename(simulation: &Simulation) -> String {
    format!("sand-toy-{:06}.png", simulation.ticks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn snapshot_encodes_the_palette() {
        let mut sim = Simulation::with_seed(16, 16, 1);
        sim.place_circle(3, 4, 0, Material::Sand, 1.0);
        sim.place_circle(10, 12, 0, Material::Water, 1.0);

        let dir = tempdir().unwrap();
        let path = dir.path().join("frame.png");
        save_png(&sim, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (16, 16));
        assert_eq!(img.get_pixel(3, 4), &Rgb([0xf6, 0xd7, 0xb0]));
        assert_eq!(img.get_pixel(10, 12), &Rgb([0, 0, 0xff]));
        assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn frame_rgb_matches_grid_layout() {
        let mut sim = Simulation::with_seed(4, 3, 1);
        sim.place_circle(2, 1, 0, Material::Water, 1.0);

        let data = frame_rgb(&sim);
        assert_eq!(data.len(), 4 * 3 * 3);
        // Row-major by screen rows: pixel (2, 1) starts at (1 * 4 + 2) * 3
        let offset = (1 * 4 + 2) * 3;
        assert_eq!(&data[offset..offset + 3], &[0, 0, 0xff]);
    }

    #[test]
    fn snapshot_filename_tracks_ticks() {
        let mut sim = Simulation::with_seed(8, 8, 1);
        assert_eq!(snapshot_filename(&sim), "sand-toy-000000.png");
        sim.step();
        sim.step();
        assert_eq!(snapshot_filename(&sim), "sand-toy-000002.png");
    }

    #[test]
    fn snapshot_fails_on_unwritable_path() {
        let sim = Simulation::with_seed(8, 8, 1);
        let result = save_png(&sim, Path::new("/nonexistent/dir/frame.png"));
        assert!(result.is_err());
    }
}
