use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tunables for a viewer instance. Every field has a default, so a partial
/// JSON object (or `{}`) is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Background color, RGBA in `0.0..=1.0`.
    pub clear_color: [f32; 4],
    /// Distance between neighbouring objects on the layout grid.
    pub object_spacing: f32,
    /// Uniform scale applied to each object's unit cube.
    pub object_scale: f32,
    /// Camera distance from the scene center, before fitting the grid.
    pub camera_distance: f32,
    /// Vertical field of view in degrees.
    pub field_of_view: f32,
    /// Object spin in degrees per second. Zero disables spinning.
    pub spin_speed: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.1, 0.1, 0.12, 1.0],
            object_spacing: 2.5,
            object_scale: 0.5,
            camera_distance: 6.0,
            field_of_view: 45.0,
            spin_speed: 30.0,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Camera distance that keeps a grid of the given half-extent in view.
    pub fn fitted_camera_distance(&self, extent: f32) -> f32 {
        let half_fov = (self.field_of_view.clamp(1.0, 179.0) * 0.5).to_radians();
        let fit = (extent + self.object_scale) / half_fov.tan();
        self.camera_distance.max(fit + self.object_scale * 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewerError;

    #[test]
    fn empty_object_is_default() {
        let config = ViewerConfig::from_json("{}").unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = ViewerConfig::from_json(r#"{ "spin_speed": 0.0, "object_spacing": 4.0 }"#)
            .unwrap();
        assert_eq!(config.spin_speed, 0.0);
        assert_eq!(config.object_spacing, 4.0);
        assert_eq!(config.field_of_view, ViewerConfig::default().field_of_view);
    }

    #[test]
    fn invalid_json_is_rejected() {
        let err = ViewerConfig::from_json("{ spin_speed: ").unwrap_err();
        assert!(matches!(err, ViewerError::Config(_)));
    }

    #[test]
    fn single_object_keeps_configured_distance() {
        let config = ViewerConfig::default();
        assert_eq!(config.fitted_camera_distance(0.0), config.camera_distance);
    }

    #[test]
    fn wide_grid_pushes_camera_back() {
        let config = ViewerConfig::default();
        assert!(config.fitted_camera_distance(20.0) > config.camera_distance);
    }
}
