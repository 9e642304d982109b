use std::sync::Arc;
use std::time::{Duration, Instant};

use vello::util::RenderSurface;
use winit::window::Window;

// Simple struct to hold the state of the renderer
pub struct ActiveRenderState<'s> {
    pub surface: RenderSurface<'s>,
    pub window: Arc<Window>,
}

pub enum RenderState<'s> {
    Active(ActiveRenderState<'s>),
    Suspended(Option<Arc<Window>>),
}

const FPS_WINDOW: Duration = Duration::from_secs(1);

/// Counts presented frames and reports the rate once per second.
pub struct FrameCounter {
    frames: u32,
    since: Instant,
}

impl FrameCounter {
    pub fn new(now: Instant) -> Self {
        Self { frames: 0, since: now }
    }

    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        self.frames += 1;
        let elapsed = now.duration_since(self.since);
        if elapsed < FPS_WINDOW {
            return None;
        }
        let fps = self.frames as f64 / elapsed.as_secs_f64();
        self.frames = 0;
        self.since = now;
        Some(fps)
    }
}
