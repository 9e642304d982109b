use std::f64::consts::{FRAC_PI_2, TAU};

use bevy_ecs::prelude::Resource;
use nalgebra::{Isometry3, Perspective3, Point3, Vector2, Vector3};

use crate::math::geometry::Ray;

const Z_NEAR: f64 = 0.01;
const Z_FAR: f64 = 1000.0;
// keeps look_at away from a degenerate up vector
const PITCH_LIMIT: f64 = FRAC_PI_2 - 0.05;

/// Size of the drawing surface in physical pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f64 {
        self.width.max(1.0) / self.height.max(1.0)
    }
}

/// Perspective camera circling `target` at a fixed distance.
#[derive(Resource, Clone, Debug)]
pub struct OrbitCamera {
    pub target: Point3<f64>,
    pub distance: f64,
    pub yaw: f64,
    pub pitch: f64,
    pub up: Vector3<f64>,
    /// Vertical field of view in radians.
    pub fovy: f64,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_at(Point3::new(10.0, 10.0, 10.0), Point3::origin(), 45f64.to_radians())
    }
}

impl OrbitCamera {
    pub fn looking_at(position: Point3<f64>, target: Point3<f64>, fovy: f64) -> Self {
        let offset = position - target;
        let distance = offset.norm();
        Self {
            target,
            distance,
            yaw: offset.z.atan2(offset.x),
            pitch: (offset.y / distance).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT),
            up: Vector3::y(),
            fovy,
        }
    }

    pub fn position(&self) -> Point3<f64> {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vector3::new(cp * cy, sp, cp * sy) * self.distance
    }

    pub fn orbit(&mut self, dyaw: f64, dpitch: f64) {
        self.yaw = (self.yaw + dyaw).rem_euclid(TAU);
        self.pitch = (self.pitch + dpitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    fn view(&self) -> Isometry3<f64> {
        Isometry3::look_at_rh(&self.position(), &self.target, &self.up)
    }

    fn projection(&self, viewport: &Viewport) -> Perspective3<f64> {
        Perspective3::new(viewport.aspect(), self.fovy, Z_NEAR, Z_FAR)
    }

    /// Screen position and view depth of a world point, `None` behind the near plane.
    pub fn project(&self, point: &Point3<f64>, viewport: &Viewport) -> Option<(Vector2<f64>, f64)> {
        let eye = self.view().transform_point(point);
        let depth = -eye.z;
        if depth <= Z_NEAR {
            return None;
        }
        let ndc = self.projection(viewport).project_point(&eye);
        let screen = Vector2::new(
            (ndc.x + 1.0) * 0.5 * viewport.width,
            (1.0 - ndc.y) * 0.5 * viewport.height,
        );
        Some((screen, depth))
    }

    /// Ray from the eye through a screen position.
    pub fn ray(&self, screen: &Vector2<f64>, viewport: &Viewport) -> Ray {
        let ndc_x = 2.0 * screen.x / viewport.width.max(1.0) - 1.0;
        let ndc_y = 1.0 - 2.0 * screen.y / viewport.height.max(1.0);
        let far = self
            .projection(viewport)
            .unproject_point(&Point3::new(ndc_x, ndc_y, 1.0));
        let eye = self.position();
        let far = self.view().inverse_transform_point(&far);
        Ray::new(eye, far - eye)
    }

    /// Screen pixels covered by one world unit at the given view depth.
    pub fn pixels_per_unit(&self, depth: f64, viewport: &Viewport) -> f64 {
        0.5 * viewport.height / ((0.5 * self.fovy).tan() * depth.max(Z_NEAR))
    }
}
