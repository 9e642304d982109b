use bevy_ecs::system::{Query, Res, ResMut};

use crate::components::camera::OrbitCamera;
use crate::components::input::{Command, FrameInput};
use crate::components::options::DemoOptions;
use crate::components::shapes::curve::{random_color, Curve};
use crate::components::shapes::points::ControlPoints;
use crate::components::view::{ViewMode, ViewToggles};

pub fn sys_apply_commands(
    input: Res<FrameInput>,
    options: Res<DemoOptions>,
    mut view: ResMut<ViewToggles>,
    mut camera: ResMut<OrbitCamera>,
    mut flat: Query<(&mut ControlPoints<2>, &mut Curve<2>)>,
    mut spatial: Query<(&mut ControlPoints<3>, &mut Curve<3>)>,
) {
    let speed = options.orbit_speed;

    for &command in input.commands() {
        if view.apply(command) {
            log::debug!("{:?}: {:?}", command, *view);
            if command == Command::SwitchView {
                log::info!("Switched to {:?} view", view.mode);
            }
            continue;
        }

        match command {
            Command::Reset => match view.mode {
                ViewMode::Flat => reset(&mut flat),
                ViewMode::Spatial => reset(&mut spatial),
            },
            Command::OrbitLeft => camera.orbit(-speed, 0.0),
            Command::OrbitRight => camera.orbit(speed, 0.0),
            Command::OrbitUp => camera.orbit(0.0, speed),
            Command::OrbitDown => camera.orbit(0.0, -speed),
            _ => {}
        }
    }
}

fn reset<const D: usize>(query: &mut Query<(&mut ControlPoints<D>, &mut Curve<D>)>) {
    for (mut points, mut curve) in query.iter_mut() {
        if !points.is_empty() {
            log::info!("Cleared {} control points", points.len());
        }
        points.clear();
        curve.samples.clear();
        curve.color = random_color();
    }
}
