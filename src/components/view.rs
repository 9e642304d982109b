use bevy_ecs::prelude::Resource;

use super::input::Command;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Flat,
    Spatial,
}

/// Display switches flipped from the keyboard.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewToggles {
    pub mode: ViewMode,
    pub show_curve: bool,
    pub show_polygon: bool,
    /// Join samples with segments instead of drawing them as dots.
    pub connect_samples: bool,
    pub degree_cap: Option<usize>,
}

impl Default for ViewToggles {
    fn default() -> Self {
        Self {
            mode: ViewMode::Flat,
            show_curve: true,
            show_polygon: false,
            connect_samples: true,
            degree_cap: None,
        }
    }
}

impl ViewToggles {
    /// Applies a display command; returns `false` for commands this type does not own.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::ToggleCurve => self.show_curve = !self.show_curve,
            Command::TogglePolygon => self.show_polygon = !self.show_polygon,
            Command::ToggleConnect => self.connect_samples = !self.connect_samples,
            Command::DegreeCap(cap) => self.degree_cap = cap,
            Command::SwitchView => {
                self.mode = match self.mode {
                    ViewMode::Flat => ViewMode::Spatial,
                    ViewMode::Spatial => ViewMode::Flat,
                }
            }
            _ => return false,
        }
        true
    }

    /// Degree of the curve drawn from `count` points, `None` when nothing should be drawn.
    pub fn curve_degree(&self, count: usize) -> Option<usize> {
        if !self.show_curve || count < 2 {
            return None;
        }
        let full = count - 1;
        match self.degree_cap {
            Some(cap) if cap > full => None,
            Some(cap) => Some(cap),
            None => Some(full),
        }
    }
}
