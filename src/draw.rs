use bevy_ecs::world::World;
use nalgebra::{Point3, Vector2, Vector3};
use vello::kurbo::{Affine, BezPath, Circle, Point, Stroke};
use vello::peniko::{Color, Fill};
use vello::Scene;

use crate::components::camera::{OrbitCamera, Viewport};
use crate::components::options::DemoOptions;
use crate::components::shapes::curve::Curve;
use crate::components::shapes::points::ControlPoints;
use crate::components::view::ViewToggles;

const POLYGON_WIDTH: f64 = 1.0;
const GUIDE_WIDTH: f64 = 1.0;
const REFERENCE_CUBE: f64 = 2.0;
const AXIS_LENGTH: f64 = 3.0;

fn to_point(v: &Vector2<f64>) -> Point {
    Point::new(v.x, v.y)
}

fn point_color(dragging: bool) -> Color {
    if dragging {
        Color::YELLOW
    } else {
        Color::WHITE
    }
}

/// Strokes consecutive points; a `None` lifts the pen until the next visible point.
fn stroke_polyline(
    scene: &mut Scene,
    points: impl IntoIterator<Item = Option<Point>>,
    width: f64,
    color: Color,
) {
    let mut path = BezPath::new();
    let mut pen_down = false;
    for point in points {
        match point {
            Some(p) if pen_down => path.line_to(p),
            Some(p) => {
                path.move_to(p);
                pen_down = true;
            }
            None => pen_down = false,
        }
    }
    scene.stroke(&Stroke::new(width), Affine::IDENTITY, color, None, &path);
}

fn fill_circle(scene: &mut Scene, center: Point, radius: f64, color: Color) {
    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        color,
        None,
        &Circle::new(center, radius),
    );
}

fn draw_samples(
    scene: &mut Scene,
    samples: impl IntoIterator<Item = Option<Point>>,
    connect: bool,
    width: f64,
    color: Color,
) {
    if connect {
        stroke_polyline(scene, samples, width, color);
    } else {
        for p in samples.into_iter().flatten() {
            fill_circle(scene, p, width * 0.5, color);
        }
    }
}

pub fn draw_flat(scene: &mut Scene, world: &mut World) {
    let options = world.resource::<DemoOptions>().clone();
    let view = *world.resource::<ViewToggles>();

    let mut query = world.query::<(&ControlPoints<2>, &Curve<2>)>();
    for (points, curve) in query.iter(world) {
        if view.show_polygon {
            stroke_polyline(
                scene,
                points.as_slice().iter().map(|p| Some(to_point(&p.position))),
                POLYGON_WIDTH,
                Color::GRAY,
            );
        }
        draw_samples(
            scene,
            curve.samples.iter().map(|s| Some(to_point(s))),
            view.connect_samples,
            options.curve_width,
            curve.color,
        );
        for p in points.as_slice().iter() {
            fill_circle(scene, to_point(&p.position), options.point_radius, point_color(p.dragging));
        }
    }
}

/// Edges of an axis-aligned cube, each as a pair of corners.
pub fn cube_edges(center: Point3<f64>, size: f64) -> Vec<(Point3<f64>, Point3<f64>)> {
    let h = size * 0.5;
    let corner = |i: usize| {
        let pick = |bit: usize| if i & bit == 0 { -h } else { h };
        center + Vector3::new(pick(1), pick(2), pick(4))
    };

    let mut edges = Vec::with_capacity(12);
    for i in 0..8 {
        for bit in [1, 2, 4] {
            if i & bit == 0 {
                edges.push((corner(i), corner(i | bit)));
            }
        }
    }
    edges
}

pub fn draw_spatial(scene: &mut Scene, world: &mut World) {
    let options = world.resource::<DemoOptions>().clone();
    let view = *world.resource::<ViewToggles>();
    let camera = world.resource::<OrbitCamera>().clone();
    let viewport = *world.resource::<Viewport>();

    let project = |p: &Point3<f64>| camera.project(p, &viewport).map(|(s, _)| to_point(&s));

    for (a, b) in cube_edges(Point3::origin(), REFERENCE_CUBE) {
        stroke_polyline(scene, [project(&a), project(&b)], GUIDE_WIDTH, Color::DIM_GRAY);
    }
    for (axis, color) in [
        (Vector3::x(), Color::RED),
        (Vector3::y(), Color::GREEN),
        (Vector3::z(), Color::BLUE),
    ] {
        let tip = Point3::from(axis * AXIS_LENGTH);
        stroke_polyline(scene, [project(&Point3::origin()), project(&tip)], GUIDE_WIDTH, color);
    }

    let mut query = world.query::<(&ControlPoints<3>, &Curve<3>)>();
    for (points, curve) in query.iter(world) {
        if view.show_polygon {
            stroke_polyline(
                scene,
                points.as_slice().iter().map(|p| project(&Point3::from(p.position))),
                POLYGON_WIDTH,
                Color::GRAY,
            );
        }
        draw_samples(
            scene,
            curve.samples.iter().map(|s| project(&Point3::from(*s))),
            view.connect_samples,
            options.curve_width,
            curve.color,
        );

        // painter's order: far spheres first
        let mut spheres: Vec<_> = points
            .as_slice()
            .iter()
            .filter_map(|p| {
                camera
                    .project(&Point3::from(p.position), &viewport)
                    .map(|(screen, depth)| (screen, depth, p.dragging))
            })
            .collect();
        spheres.sort_by(|a, b| b.1.total_cmp(&a.1));
        for (screen, depth, dragging) in spheres {
            let radius = options.sphere_radius * camera.pixels_per_unit(depth, &viewport);
            fill_circle(scene, to_point(&screen), radius, point_color(dragging));
        }
    }
}
