use bevy_ecs::system::{Query, Res};

use crate::components::options::DemoOptions;
use crate::components::shapes::curve::Curve;
use crate::components::shapes::points::ControlPoints;
use crate::components::view::ViewToggles;
use crate::math::casteljau::{sample_par, samples};

// below this degree a sequential walk beats spreading work over the pool
const PARALLEL_DEGREE: usize = 8;

// runs after point editing so the curve never trails a drag by a frame
pub fn sys_update_curve<const D: usize>(
    view: Res<ViewToggles>,
    options: Res<DemoOptions>,
    mut query: Query<(&ControlPoints<D>, &mut Curve<D>)>,
) {
    for (points, mut curve) in query.iter_mut() {
        let Some(degree) = view.curve_degree(points.len()) else {
            curve.samples.clear();
            continue;
        };

        let positions = points.positions();
        let polygon = &positions[..=degree];
        curve.samples = if degree >= PARALLEL_DEGREE {
            sample_par(polygon, degree, options.sample_step)
        } else {
            samples(polygon, degree, options.sample_step).collect()
        };
    }
}
