use bevy_ecs::component::Component;
use nalgebra::SVector;
use rand::Rng;
use vello::peniko::Color;

/// Sampled polyline of the curve for the current frame, plus its stroke color.
#[derive(Component, Clone, Debug)]
pub struct Curve<const D: usize> {
    pub samples: Vec<SVector<f64, D>>,
    pub color: Color,
}

impl<const D: usize> Curve<D> {
    pub fn new(color: Color) -> Self {
        Self {
            samples: Vec::new(),
            color,
        }
    }

    pub fn with_random_color() -> Self {
        Self::new(random_color())
    }
}

pub fn random_color() -> Color {
    let mut rng = rand::thread_rng();
    Color::rgb8(
        rng.gen_range(64..=255),
        rng.gen_range(64..=255),
        rng.gen_range(64..=255),
    )
}
