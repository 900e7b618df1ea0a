use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Material occupying a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Material {
    #[default]
    Empty,
    Sand,
    Water,
}

impl Material {
    pub fn name(&self) -> &str {
        match self {
            Material::Empty => "Empty",
            Material::Sand => "Sand",
            Material::Water => "Water",
        }
    }

    /// Fixed palette: background, tan, blue
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            Material::Empty => [0, 0, 0],
            Material::Sand => [0xf6, 0xd7, 0xb0],
            Material::Water => [0x00, 0x00, 0xff],
        }
    }

    /// Toggle between the two placeable materials
    pub fn toggled(&self) -> Material {
        match self {
            Material::Water => Material::Sand,
            _ => Material::Water,
        }
    }
}

/// A tracked movable entity, one per occupied cell
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub material: Material,
    pub x: i32,
    pub y: i32,
}

/// Falling-sand simulation state
///
/// The grid is a denormalized index over the particle store: for every
/// particle, `grid[index(p.x, p.y)] == p.material` at tick boundaries. It is
/// transiently broken mid-tick while a particle's old cell is cleared before
/// its new one is written, which is safe only because updates are strictly
/// sequential.
pub struct Simulation {
    pub width: i32,
    pub height: i32,
    grid: Vec<Material>,
    particles: Vec<Particle>,
    pub brush_material: Material,
    pub brush_radius: i32,
    pub brush_density: f32,
    pub paused: bool,
    pub ticks: u64,
    rng: StdRng,
}

impl Simulation {
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    /// Seeded constructor for reproducible brush placement
    pub fn with_seed(width: i32, height: i32, seed: u64) -> Self {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: i32, height: i32, rng: StdRng) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            grid: vec![Material::Empty; (width * height) as usize],
            particles: Vec::new(),
            brush_material: Material::Sand,
            brush_radius: 20,
            brush_density: 0.02,
            paused: false,
            ticks: 0,
            rng,
        }
    }

    /// Column-contiguous flat index; callers must pass in-range coordinates
    fn index(&self, x: i32, y: i32) -> usize {
        (x * self.height + y) as usize
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Bounds-checked cell read; `None` for out-of-range coordinates.
    /// Every coordinate access in the movement rules and the brush goes
    /// through here, so the grid boundary acts as an implicit wall.
    pub fn cell(&self, x: i32, y: i32) -> Option<Material> {
        if self.in_bounds(x, y) {
            Some(self.grid[self.index(x, y)])
        } else {
            None
        }
    }

    /// In-bounds and unoccupied; out-of-range counts as blocked
    fn is_empty(&self, x: i32, y: i32) -> bool {
        self.cell(x, y) == Some(Material::Empty)
    }

    /// Bounds-checked cell write; returns false without touching the grid
    /// when the coordinates are out of range
    pub fn set(&mut self, x: i32, y: i32, material: Material) -> bool {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.grid[idx] = material;
            true
        } else {
            false
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Sand tries down, then down-left, then down-right. Left before right
    /// at every level, keeping the rule fully deterministic.
    fn sand_target(&self, x: i32, y: i32) -> (i32, i32) {
        if self.is_empty(x, y + 1) {
            (x, y + 1)
        } else if self.is_empty(x - 1, y + 1) {
            (x - 1, y + 1)
        } else if self.is_empty(x + 1, y + 1) {
            (x + 1, y + 1)
        } else {
            (x, y)
        }
    }

    /// Water adds lateral flow after the falling options
    fn water_target(&self, x: i32, y: i32) -> (i32, i32) {
        if self.is_empty(x, y + 1) {
            (x, y + 1)
        } else if self.is_empty(x - 1, y + 1) {
            (x - 1, y + 1)
        } else if self.is_empty(x + 1, y + 1) {
            (x + 1, y + 1)
        } else if self.is_empty(x - 1, y) {
            (x - 1, y)
        } else if self.is_empty(x + 1, y) {
            (x + 1, y)
        } else {
            (x, y)
        }
    }

    /// Execute one simulation tick over the whole particle store.
    ///
    /// Particles are processed in insertion order; each sees the grid as
    /// already updated by earlier particles this tick. The cleared cell is
    /// always re-written, even when the particle does not move.
    pub fn step(&mut self) {
        for i in 0..self.particles.len() {
            let Particle { material, x, y } = self.particles[i];
            self.set(x, y, Material::Empty);

            let (nx, ny) = match material {
                Material::Sand => self.sand_target(x, y),
                Material::Water => self.water_target(x, y),
                Material::Empty => (x, y),
            };

            self.set(nx, ny, material);
            self.particles[i].x = nx;
            self.particles[i].y = ny;
        }
        self.ticks += 1;
    }

    /// Stamp new particles of `material` inside a circular region.
    ///
    /// Iterates the bounding square outer-x inner-y, skips offsets outside
    /// the Euclidean radius, then runs one Bernoulli trial per cell with
    /// success probability `density`. Occupied and out-of-range cells are
    /// never touched.
    pub fn place_circle(
        &mut self,
        center_x: i32,
        center_y: i32,
        radius: i32,
        material: Material,
        density: f32,
    ) {
        for ox in -radius..=radius {
            for oy in -radius..=radius {
                if ox * ox + oy * oy > radius * radius {
                    continue;
                }
                if self.rng.gen::<f32>() > density {
                    continue;
                }
                let nx = center_x + ox;
                let ny = center_y + oy;
                if self.cell(nx, ny) != Some(Material::Empty) {
                    continue;
                }
                self.set(nx, ny, material);
                self.particles.push(Particle {
                    material,
                    x: nx,
                    y: ny,
                });
            }
        }
    }

    /// Stamp with the current brush selection
    pub fn paint(&mut self, x: i32, y: i32) {
        self.place_circle(x, y, self.brush_radius, self.brush_material, self.brush_density);
    }

    /// Switch the brush between sand and water
    pub fn toggle_material(&mut self) {
        self.brush_material = self.brush_material.toggled();
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Clear all particles and start over
    pub fn reset(&mut self) {
        self.grid.fill(Material::Empty);
        self.particles.clear();
        self.ticks = 0;
        self.paused = false;
    }

    /// Adjust brush radius (clamped to 1-50)
    pub fn adjust_radius(&mut self, delta: i32) {
        self.brush_radius = (self.brush_radius + delta).clamp(1, 50);
    }

    /// Adjust brush density (clamped to 0.01-1.0)
    pub fn adjust_density(&mut self, delta: f32) {
        self.brush_density = (self.brush_density + delta).clamp(0.01, 1.0);
    }
}
