use crate::simulation::{Material, Simulation};
use ratatui::style::Color;

/// Braille character rendering for high-resolution terminal graphics.
/// Each Braille character represents a 2x4 grid of dots (8 dots total).
///
/// Dot positions and their bit values:
/// ```
/// (0,0)=0x01  (1,0)=0x08
/// (0,1)=0x02  (1,1)=0x10
/// (0,2)=0x04  (1,2)=0x20
/// (0,3)=0x40  (1,3)=0x80
/// ```
///
/// Unicode Braille patterns: U+2800 to U+28FF (256 patterns)
const BRAILLE_BASE: u32 = 0x2800;

/// Dot position to bit mapping for Braille characters
const BRAILLE_DOTS: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40], // Left column (x=0): rows 0,1,2,3
    [0x08, 0x10, 0x20, 0x80], // Right column (x=1): rows 0,1,2,3
];

/// A single rendered Braille cell with position and color
#[derive(Clone, Copy)]
pub struct BrailleCell {
    pub x: u16,
    pub y: u16,
    pub char: char,
    pub color: Color,
}

fn material_color(material: Material) -> Color {
    let [r, g, b] = material.rgb();
    Color::Rgb(r, g, b)
}

/// Render the occupancy grid to Braille characters. A cell's color is the
/// majority material among its set dots.
pub fn render_to_braille(
    simulation: &Simulation,
    canvas_width: u16,
    canvas_height: u16,
) -> Vec<BrailleCell> {
    // Braille effective resolution
    let braille_width = canvas_width as usize * 2;
    let braille_height = canvas_height as usize * 4;

    // Scale factors (pre-calculated once)
    let scale_x = simulation.width as f32 / braille_width.max(1) as f32;
    let scale_y = simulation.height as f32 / braille_height.max(1) as f32;

    let mut cells = Vec::with_capacity((canvas_width * canvas_height) as usize);

    for cy in 0..canvas_height {
        for cx in 0..canvas_width {
            let mut pattern: u8 = 0;
            let mut sand_dots: usize = 0;
            let mut water_dots: usize = 0;

            // Sample the 2x4 dots for this Braille character
            let base_bx = cx as usize * 2;
            let base_by = cy as usize * 4;

            for dx in 0..2 {
                for dy in 0..4 {
                    let sim_x = ((base_bx + dx) as f32 * scale_x) as i32;
                    let sim_y = ((base_by + dy) as f32 * scale_y) as i32;

                    match simulation.cell(sim_x, sim_y) {
                        Some(Material::Sand) => {
                            pattern |= BRAILLE_DOTS[dx][dy];
                            sand_dots += 1;
                        }
                        Some(Material::Water) => {
                            pattern |= BRAILLE_DOTS[dx][dy];
                            water_dots += 1;
                        }
                        _ => {}
                    }
                }
            }

            // Only emit cells that have at least one dot
            if pattern != 0 {
                let braille_char = char::from_u32(BRAILLE_BASE + pattern as u32).unwrap_or(' ');
                let color = if sand_dots >= water_dots {
                    material_color(Material::Sand)
                } else {
                    material_color(Material::Water)
                };

                cells.push(BrailleCell {
                    x: cx,
                    y: cy,
                    char: braille_char,
                    color,
                });
            }
        }
    }

    cells
}

/// Map a terminal canvas cell to grid coordinates, using the same scale
/// factors as the renderer. Samples the center dot of the character so the
/// pointer lands where the eye expects.
pub fn cell_to_grid(
    simulation: &Simulation,
    canvas_width: u16,
    canvas_height: u16,
    cell_x: u16,
    cell_y: u16,
) -> (i32, i32) {
    let braille_width = canvas_width as usize * 2;
    let braille_height = canvas_height as usize * 4;

    let scale_x = simulation.width as f32 / braille_width.max(1) as f32;
    let scale_y = simulation.height as f32 / braille_height.max(1) as f32;

    let gx = ((cell_x as usize * 2 + 1) as f32 * scale_x) as i32;
    let gy = ((cell_y as usize * 4 + 2) as f32 * scale_y) as i32;

    (
        gx.clamp(0, simulation.width - 1),
        gy.clamp(0, simulation.height - 1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_braille_pattern() {
        // Test that single dot patterns work correctly
        assert_eq!(BRAILLE_DOTS[0][0], 0x01); // Top-left
        assert_eq!(BRAILLE_DOTS[1][0], 0x08); // Top-right
        assert_eq!(BRAILLE_DOTS[0][3], 0x40); // Bottom-left
        assert_eq!(BRAILLE_DOTS[1][3], 0x80); // Bottom-right

        // All dots should give 0xFF
        let all_dots: u8 = BRAILLE_DOTS[0].iter().sum::<u8>() + BRAILLE_DOTS[1].iter().sum::<u8>();
        assert_eq!(all_dots, 0xFF);
    }

    #[test]
    fn test_braille_char_generation() {
        // Empty pattern
        let empty = char::from_u32(BRAILLE_BASE).unwrap();
        assert_eq!(empty, '\u{2800}');

        // Full pattern (all 8 dots)
        let full = char::from_u32(BRAILLE_BASE + 0xFF).unwrap();
        assert_eq!(full, '\u{28FF}');
    }

    #[test]
    fn empty_grid_renders_no_cells() {
        let sim = Simulation::with_seed(40, 40, 1);
        let cells = render_to_braille(&sim, 20, 10);
        assert!(cells.is_empty());
    }

    #[test]
    fn occupied_cells_render_with_material_colors() {
        // 1:1 dot-to-grid mapping: 10x10 canvas covers a 20x40 grid
        let mut sim = Simulation::with_seed(20, 40, 1);
        sim.place_circle(0, 0, 0, Material::Sand, 1.0);
        sim.place_circle(10, 20, 0, Material::Water, 1.0);

        let cells = render_to_braille(&sim, 10, 10);
        assert_eq!(cells.len(), 2);

        let sand = cells.iter().find(|c| c.x == 0 && c.y == 0).unwrap();
        assert_eq!(sand.color, Color::Rgb(0xf6, 0xd7, 0xb0));
        assert_eq!(sand.char, '\u{2801}'); // single top-left dot

        let water = cells.iter().find(|c| c.x == 5 && c.y == 5).unwrap();
        assert_eq!(water.color, Color::Rgb(0, 0, 0xff));
    }

    #[test]
    fn pointer_mapping_stays_in_grid_bounds() {
        let sim = Simulation::with_seed(200, 200, 1);
        let (x0, y0) = cell_to_grid(&sim, 50, 25, 0, 0);
        assert!(x0 >= 0 && y0 >= 0);
        let (x1, y1) = cell_to_grid(&sim, 50, 25, 49, 24);
        assert!(x1 < 200 && y1 < 200);
        // Lower-right corner maps near the lower-right of the grid
        assert!(x1 > 190 && y1 > 190);
    }

    #[test]
    fn pointer_mapping_is_monotonic() {
        let sim = Simulation::with_seed(200, 200, 1);
        let (a, _) = cell_to_grid(&sim, 50, 25, 10, 10);
        let (b, _) = cell_to_grid(&sim, 50, 25, 30, 10);
        assert!(a < b);
    }
}
