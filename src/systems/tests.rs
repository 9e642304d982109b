use approx::assert_relative_eq;
use bevy_ecs::world::World;
use nalgebra::{Point3, Vector2};

use super::*;
use crate::components::input::{Button, Command};

fn world() -> World {
    init_world(DemoOptions::default(), Viewport::new(800.0, 600.0))
}

fn frame(world: &mut World, edit: impl FnOnce(&mut FrameInput)) {
    {
        let mut input = world.resource_mut::<FrameInput>();
        edit(&mut *input);
    }
    run_frame(world);
    world.resource_mut::<FrameInput>().end_frame();
}

fn flat(world: &mut World) -> (ControlPoints<2>, Curve<2>) {
    let mut query = world.query::<(&ControlPoints<2>, &Curve<2>)>();
    let (points, curve) = query.single(world);
    (points.clone(), curve.clone())
}

fn spatial(world: &mut World) -> (ControlPoints<3>, Curve<3>) {
    let mut query = world.query::<(&ControlPoints<3>, &Curve<3>)>();
    let (points, curve) = query.single(world);
    (points.clone(), curve.clone())
}

fn add_flat_points(world: &mut World, positions: &[(f64, f64)]) {
    for &(x, y) in positions {
        frame(world, |input| {
            input.move_pointer(x, y);
            input.release(Button::Primary);
        });
    }
}

#[test]
fn primary_release_adds_point() {
    let mut world = world();
    add_flat_points(&mut world, &[(10.0, 20.0)]);

    let (points, _) = flat(&mut world);
    assert_eq!(points.len(), 1);
    let point = points.as_slice()[0];
    assert_eq!(point.position, Vector2::new(10.0, 20.0));
    assert!(!point.dragging);
}

#[test]
fn secondary_drag_moves_point_until_release() {
    let mut world = world();
    add_flat_points(&mut world, &[(0.0, 0.0)]);

    frame(&mut world, |input| {
        input.move_pointer(0.0, 0.0);
        input.press(Button::Secondary);
    });
    assert!(flat(&mut world).0.as_slice()[0].dragging);

    frame(&mut world, |input| input.move_pointer(5.0, 5.0));
    assert_eq!(flat(&mut world).0.as_slice()[0].position, Vector2::new(5.0, 5.0));

    frame(&mut world, |input| input.release(Button::Secondary));
    frame(&mut world, |input| input.move_pointer(50.0, 50.0));

    let (points, _) = flat(&mut world);
    let point = points.as_slice()[0];
    assert!(!point.dragging);
    assert_eq!(point.position, Vector2::new(5.0, 5.0));
}

#[test]
fn secondary_press_off_target_drags_nothing() {
    let mut world = world();
    add_flat_points(&mut world, &[(0.0, 0.0)]);

    frame(&mut world, |input| {
        input.move_pointer(30.0, 0.0);
        input.press(Button::Secondary);
    });
    assert_eq!(flat(&mut world).0.dragged(), None);
}

#[test]
fn press_and_release_in_one_frame_leaves_nothing_dragged() {
    let mut world = world();
    add_flat_points(&mut world, &[(0.0, 0.0)]);

    frame(&mut world, |input| {
        input.move_pointer(0.0, 0.0);
        input.release(Button::Secondary);
        input.press(Button::Secondary);
    });
    frame(&mut world, |input| input.move_pointer(40.0, 40.0));

    let (points, _) = flat(&mut world);
    assert_eq!(points.dragged(), None);
    assert_eq!(points.as_slice()[0].position, Vector2::new(0.0, 0.0));
}

#[test]
fn reset_clears_points_and_curve() {
    let mut world = world();
    add_flat_points(&mut world, &[(0.0, 0.0), (100.0, 100.0)]);
    assert!(!flat(&mut world).1.samples.is_empty());

    frame(&mut world, |input| input.push_command(Command::Reset));

    let (points, curve) = flat(&mut world);
    assert!(points.is_empty());
    assert!(curve.samples.is_empty());
    // the other scene is untouched
    assert_eq!(spatial(&mut world).0.len(), seed_points().len());
}

#[test]
fn curve_tracks_drag_in_the_same_frame() {
    let mut world = world();
    add_flat_points(&mut world, &[(0.0, 0.0), (100.0, 0.0)]);

    frame(&mut world, |input| {
        input.move_pointer(100.0, 0.0);
        input.press(Button::Secondary);
    });
    frame(&mut world, |input| input.move_pointer(100.0, 50.0));

    let (_, curve) = flat(&mut world);
    assert_eq!(curve.samples.len(), 101);
    assert_relative_eq!(*curve.samples.last().unwrap(), Vector2::new(100.0, 50.0), epsilon = 1e-9);
}

#[test]
fn single_point_draws_no_curve() {
    let mut world = world();
    add_flat_points(&mut world, &[(10.0, 10.0)]);
    assert!(flat(&mut world).1.samples.is_empty());
}

#[test]
fn degree_cap_samples_a_prefix() {
    let mut world = world();
    add_flat_points(&mut world, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);

    frame(&mut world, |input| input.push_command(Command::DegreeCap(Some(1))));
    let (_, curve) = flat(&mut world);
    assert_relative_eq!(*curve.samples.last().unwrap(), Vector2::new(10.0, 0.0), epsilon = 1e-9);

    // a cap above the available degree hides the curve
    frame(&mut world, |input| input.push_command(Command::DegreeCap(Some(5))));
    assert!(flat(&mut world).1.samples.is_empty());

    frame(&mut world, |input| input.push_command(Command::DegreeCap(None)));
    let (_, curve) = flat(&mut world);
    assert_relative_eq!(*curve.samples.last().unwrap(), Vector2::new(0.0, 10.0), epsilon = 1e-9);
}

#[test]
fn toggled_off_curve_is_not_sampled() {
    let mut world = world();
    add_flat_points(&mut world, &[(0.0, 0.0), (10.0, 0.0)]);
    frame(&mut world, |input| input.push_command(Command::ToggleCurve));
    assert!(flat(&mut world).1.samples.is_empty());
}

#[test]
fn long_polygons_sample_the_same_curve() {
    let mut world = world();
    let positions: Vec<_> = (0..12).map(|i| (i as f64 * 10.0, (i % 3) as f64 * 20.0)).collect();
    add_flat_points(&mut world, &positions);

    let (points, curve) = flat(&mut world);
    assert_eq!(curve.samples.len(), 101);
    assert_relative_eq!(curve.samples[0], points.as_slice()[0].position);
    assert_relative_eq!(
        *curve.samples.last().unwrap(),
        points.as_slice()[11].position,
        epsilon = 1e-9
    );
}

#[test]
fn spatial_drag_stays_on_z_plane() {
    let mut world = world();
    let viewport = *world.resource::<Viewport>();
    let camera = world.resource::<OrbitCamera>().clone();

    let seed = seed_points()[1];
    let (grab, _) = camera.project(&Point3::from(seed), &viewport).unwrap();

    frame(&mut world, |input| {
        input.push_command(Command::SwitchView);
        input.move_pointer(grab.x, grab.y);
        input.press(Button::Secondary);
    });
    assert_eq!(spatial(&mut world).0.dragged(), Some(1));

    let target = grab + Vector2::new(40.0, 25.0);
    frame(&mut world, |input| input.move_pointer(target.x, target.y));
    frame(&mut world, |input| input.release(Button::Secondary));

    let (points, curve) = spatial(&mut world);
    let moved = points.as_slice()[1];
    assert!(!moved.dragging);
    assert_relative_eq!(moved.position.z, seed.z, epsilon = 1e-9);
    assert!((moved.position - seed).norm() > 0.1);

    let (screen, _) = camera.project(&Point3::from(moved.position), &viewport).unwrap();
    assert_relative_eq!(screen, target, epsilon = 1e-6);
    assert_eq!(curve.samples.len(), 101);
}

#[test]
fn spatial_primary_release_adds_on_ground_plane() {
    let mut world = world();
    frame(&mut world, |input| {
        input.push_command(Command::SwitchView);
        input.move_pointer(400.0, 300.0);
        input.release(Button::Primary);
    });

    let (points, _) = spatial(&mut world);
    assert_eq!(points.len(), seed_points().len() + 1);
    let added = points.as_slice()[points.len() - 1];
    assert_relative_eq!(added.position.z, 0.0, epsilon = 1e-9);
    // flat scene ignores input while hidden
    assert!(flat(&mut world).0.is_empty());
}

#[test]
fn arrow_commands_orbit_the_camera() {
    let mut world = world();
    let before = world.resource::<OrbitCamera>().yaw;
    frame(&mut world, |input| input.push_command(Command::OrbitRight));
    let after = world.resource::<OrbitCamera>().yaw;
    assert_relative_eq!(after - before, DemoOptions::default().orbit_speed, epsilon = 1e-12);
}
