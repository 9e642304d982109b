use bevy_ecs::component::Component;
use nalgebra::{Point3, SVector, Vector2};

use crate::math::geometry::{point_in_circle, Ray};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPoint<const D: usize> {
    pub position: SVector<f64, D>,
    pub dragging: bool,
}

impl<const D: usize> ControlPoint<D> {
    pub fn new(position: SVector<f64, D>) -> Self {
        Self {
            position,
            dragging: false,
        }
    }
}

/// Ordered control polygon of one curve. Insertion order is curve order.
///
/// At most one point is dragged at a time: starting a drag releases any other.
#[derive(Component, Clone, Debug, Default)]
pub struct ControlPoints<const D: usize> {
    points: Vec<ControlPoint<D>>,
}

impl<const D: usize> ControlPoints<D> {
    pub fn from_positions(positions: impl IntoIterator<Item = SVector<f64, D>>) -> Self {
        Self {
            points: positions.into_iter().map(ControlPoint::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_slice(&self) -> &[ControlPoint<D>] {
        &self.points
    }

    pub fn positions(&self) -> Vec<SVector<f64, D>> {
        self.points.iter().map(|p| p.position).collect()
    }

    pub fn add(&mut self, position: SVector<f64, D>) {
        self.points.push(ControlPoint::new(position));
    }

    /// Marks `index` as the dragged point. Indices past the end are ignored.
    pub fn begin_drag(&mut self, index: usize) {
        if index >= self.points.len() {
            return;
        }
        for (i, point) in self.points.iter_mut().enumerate() {
            point.dragging = i == index;
        }
    }

    pub fn end_drag_all(&mut self) {
        self.points.iter_mut().for_each(|p| p.dragging = false);
    }

    pub fn dragged(&self) -> Option<usize> {
        self.points.iter().position(|p| p.dragging)
    }

    /// Moves every dragged point to `target(current_position)`; `None` leaves it in place.
    pub fn update_drag_positions<F>(&mut self, mut target: F)
    where
        F: FnMut(&SVector<f64, D>) -> Option<SVector<f64, D>>,
    {
        for point in self.points.iter_mut().filter(|p| p.dragging) {
            if let Some(position) = target(&point.position) {
                point.position = position;
            }
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl ControlPoints<2> {
    /// Topmost point whose hit circle contains `pointer`. Later points draw over earlier ones.
    pub fn hit(&self, pointer: &Vector2<f64>, radius: f64) -> Option<usize> {
        self.points
            .iter()
            .rposition(|p| point_in_circle(pointer, &p.position, radius))
    }
}

impl ControlPoints<3> {
    /// Point whose hit sphere the ray meets first.
    pub fn hit_ray(&self, ray: &Ray, radius: f64) -> Option<usize> {
        self.points
            .iter()
            .enumerate()
            .filter_map(|(i, p)| {
                ray.intersect_sphere(&Point3::from(p.position), radius)
                    .map(|distance| (i, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}
