use crate::simulation::Material;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Complete application configuration for export/import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version field for future compatibility
    pub version: u32,
    /// Grid dimensions, fixed at initialization
    pub grid_width: i32,
    pub grid_height: i32,
    /// Brush stamp radius in cells
    pub brush_radius: i32,
    /// Bernoulli success probability per eligible brush cell
    pub brush_density: f32,
    /// Initial brush material
    pub brush_material: Material,
    /// Simulation ticks per rendered frame
    pub steps_per_frame: usize,
    /// Optional RNG seed for reproducible brush placement
    pub seed: Option<u64>,
}

impl AppConfig {
    /// Export config to a JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        fs::write(path, json).map_err(|e| format!("Failed to write config file: {}", e))?;
        Ok(())
    }

    /// Import config from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;
        serde_json::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Default config location under the platform config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sand-toy").join("config.json"))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            grid_width: 200,
            grid_height: 200,
            brush_radius: 20,
            brush_density: 0.02,
            brush_material: Material::Sand,
            steps_per_frame: 1,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = AppConfig {
            version: 1,
            grid_width: 120,
            grid_height: 80,
            brush_radius: 7,
            brush_density: 0.5,
            brush_material: Material::Water,
            steps_per_frame: 3,
            seed: Some(1234),
        };

        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.version, config.version);
        assert_eq!(parsed.grid_width, 120);
        assert_eq!(parsed.grid_height, 80);
        assert_eq!(parsed.brush_radius, 7);
        assert_eq!(parsed.brush_density, 0.5);
        assert_eq!(parsed.brush_material, Material::Water);
        assert_eq!(parsed.steps_per_frame, 3);
        assert_eq!(parsed.seed, Some(1234));
    }

    #[test]
    fn test_config_file_save_and_load() {
        let config = AppConfig::default();

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();

        config.save_to_file(&path).unwrap();
        let loaded = AppConfig::load_from_file(&path).unwrap();

        assert_eq!(loaded.version, config.version);
        assert_eq!(loaded.grid_width, 200);
        assert_eq!(loaded.grid_height, 200);
        assert_eq!(loaded.brush_radius, 20);
        assert_eq!(loaded.brush_material, Material::Sand);
        assert_eq!(loaded.seed, None);
    }

    #[test]
    fn test_invalid_config_file() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "not valid json").unwrap();

        let result = AppConfig::load_from_file(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let result = AppConfig::load_from_file(Path::new("/nonexistent/path/config.json"));
        assert!(result.is_err());
    }
}
