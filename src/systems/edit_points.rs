use bevy_ecs::system::{Query, Res};
use nalgebra::{Point3, Vector3};

use crate::components::camera::{OrbitCamera, Viewport};
use crate::components::input::{Button, FrameInput};
use crate::components::options::DemoOptions;
use crate::components::shapes::points::ControlPoints;

pub fn sys_edit_flat_points(
    input: Res<FrameInput>,
    options: Res<DemoOptions>,
    mut query: Query<&mut ControlPoints<2>>,
) {
    let pointer = input.pointer;

    for mut points in query.iter_mut() {
        if input.released(Button::Primary) {
            points.add(pointer);
            log::debug!("Added point {} at ({:.1}, {:.1})", points.len() - 1, pointer.x, pointer.y);
        }
        if input.pressed(Button::Secondary) {
            if let Some(index) = points.hit(&pointer, options.hit_radius) {
                points.begin_drag(index);
                log::debug!("Dragging point {}", index);
            }
        }
        if input.released(Button::Secondary) {
            if let Some(index) = points.dragged() {
                log::debug!("Released point {}", index);
            }
            points.end_drag_all();
        }

        points.update_drag_positions(|_| Some(pointer));
    }
}

/// 3D points are dragged across the plane through their own depth, normal to world Z.
pub fn sys_edit_spatial_points(
    input: Res<FrameInput>,
    options: Res<DemoOptions>,
    camera: Res<OrbitCamera>,
    viewport: Res<Viewport>,
    mut query: Query<&mut ControlPoints<3>>,
) {
    let ray = camera.ray(&input.pointer, &viewport);

    for mut points in query.iter_mut() {
        if input.released(Button::Primary) {
            if let Some(hit) = ray.intersect_plane(&Point3::origin(), &Vector3::z()) {
                points.add(hit.coords);
                log::debug!("Added point {} at {:?}", points.len() - 1, hit);
            }
        }
        if input.pressed(Button::Secondary) {
            if let Some(index) = points.hit_ray(&ray, options.sphere_radius) {
                points.begin_drag(index);
                log::debug!("Dragging point {}", index);
            }
        }
        if input.released(Button::Secondary) {
            if let Some(index) = points.dragged() {
                log::debug!("Released point {}", index);
            }
            points.end_drag_all();
        }

        points.update_drag_positions(|position| {
            ray.intersect_plane(&Point3::from(*position), &Vector3::z())
                .map(|hit| hit.coords)
        });
    }
}
