//! Per-frame update, run in a fixed order: commands, point editing, curve sampling.

use bevy_ecs::system::RunSystemOnce;
use bevy_ecs::world::World;
use nalgebra::Vector3;

use crate::components::camera::{OrbitCamera, Viewport};
use crate::components::input::FrameInput;
use crate::components::options::DemoOptions;
use crate::components::shapes::curve::Curve;
use crate::components::shapes::points::ControlPoints;
use crate::components::view::{ViewMode, ViewToggles};

pub mod commands;
pub mod edit_points;
pub mod update_curve;

#[cfg(test)]
mod tests;

use commands::sys_apply_commands;
use edit_points::{sys_edit_flat_points, sys_edit_spatial_points};
use update_curve::sys_update_curve;

/// Control polygon the 3D scene starts with.
pub fn seed_points() -> [Vector3<f64>; 4] {
    [
        Vector3::new(-4.0, 0.0, -2.0),
        Vector3::new(-2.0, 4.0, 0.0),
        Vector3::new(2.0, -4.0, 1.0),
        Vector3::new(4.0, 0.0, 2.0),
    ]
}

/// A world holding every resource plus one entity per scene.
pub fn init_world(options: DemoOptions, viewport: Viewport) -> World {
    let mut world = World::default();
    world.insert_resource(options);
    world.insert_resource(viewport);
    world.insert_resource(FrameInput::default());
    world.insert_resource(ViewToggles::default());
    world.insert_resource(OrbitCamera::default());

    world.spawn((ControlPoints::<2>::default(), Curve::<2>::with_random_color()));
    world.spawn((
        ControlPoints::from_positions(seed_points()),
        Curve::<3>::with_random_color(),
    ));
    world
}

/// Applies this frame's input. Input edges stay set until the caller ends the frame.
pub fn run_frame(world: &mut World) {
    world.run_system_once(sys_apply_commands);

    match world.resource::<ViewToggles>().mode {
        ViewMode::Flat => {
            world.run_system_once(sys_edit_flat_points);
            world.run_system_once(sys_update_curve::<2>);
        }
        ViewMode::Spatial => {
            world.run_system_once(sys_edit_spatial_points);
            world.run_system_once(sys_update_curve::<3>);
        }
    }
}
