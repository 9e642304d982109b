//! Runtime options, read from `casteljau.toml` next to the binary when present.

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::Resource;
use serde::Deserialize;

pub const WINDOW_WIDTH: u32 = 1044;
pub const WINDOW_HEIGHT: u32 = 800;
/// Parameter step between curve samples.
pub const SAMPLE_STEP: f64 = 0.01;
/// Pick radius around 2D points, in pixels.
pub const HIT_RADIUS: f64 = 10.0;
pub const POINT_RADIUS: f64 = 10.0;
pub const CURVE_WIDTH: f64 = 5.0;
/// Radius of 3D control spheres, in world units. Also their pick radius.
pub const SPHERE_RADIUS: f64 = 0.5;
/// Camera rotation per arrow key press, in radians.
pub const ORBIT_SPEED: f64 = 0.1;

const SAMPLE_STEP_RANGE: (f64, f64) = (0.001, 0.5);

#[derive(Resource, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoOptions {
    pub window_width: u32,
    pub window_height: u32,
    pub sample_step: f64,
    pub hit_radius: f64,
    pub point_radius: f64,
    pub curve_width: f64,
    pub sphere_radius: f64,
    pub orbit_speed: f64,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            sample_step: SAMPLE_STEP,
            hit_radius: HIT_RADIUS,
            point_radius: POINT_RADIUS,
            curve_width: CURVE_WIDTH,
            sphere_radius: SPHERE_RADIUS,
            orbit_speed: ORBIT_SPEED,
        }
    }
}

impl DemoOptions {
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| PathBuf::from("casteljau"))
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("casteljau.toml")
    }

    /// Missing or malformed files fall back to defaults.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content).unwrap_or_else(|e| {
                log::warn!("Options file {} is malformed, using defaults: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => {
                log::info!("No options file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let opts: Self = toml::from_str(content)?;
        Ok(opts.sanitized())
    }

    /// Clamps every value into a range the demo can draw with.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !self.sample_step.is_finite()
            || !(SAMPLE_STEP_RANGE.0..=SAMPLE_STEP_RANGE.1).contains(&self.sample_step)
        {
            log::warn!("sample_step {} out of range, using {}", self.sample_step, defaults.sample_step);
            self.sample_step = defaults.sample_step;
        }
        if self.window_width == 0 || self.window_height == 0 {
            log::warn!("Window size must be non-zero, using {}x{}", defaults.window_width, defaults.window_height);
            self.window_width = defaults.window_width;
            self.window_height = defaults.window_height;
        }

        let positive = |value: f64, fallback: f64, name: &str| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                log::warn!("{} must be positive, using {}", name, fallback);
                fallback
            }
        };
        self.hit_radius = positive(self.hit_radius, defaults.hit_radius, "hit_radius");
        self.point_radius = positive(self.point_radius, defaults.point_radius, "point_radius");
        self.curve_width = positive(self.curve_width, defaults.curve_width, "curve_width");
        self.sphere_radius = positive(self.sphere_radius, defaults.sphere_radius, "sphere_radius");
        self.orbit_speed = positive(self.orbit_speed, defaults.orbit_speed, "orbit_speed");

        self
    }
}
