use bevy_ecs::prelude::Resource;
use nalgebra::Vector2;
use winit::event::MouseButton;
use winit::keyboard::{Key, NamedKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    /// Adds points.
    Primary,
    /// Starts and stops drags.
    Secondary,
}

impl Button {
    pub fn from_mouse(button: MouseButton) -> Option<Self> {
        match button {
            MouseButton::Left => Some(Button::Primary),
            MouseButton::Right => Some(Button::Secondary),
            _ => None,
        }
    }

    fn slot(self) -> usize {
        match self {
            Button::Primary => 0,
            Button::Secondary => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Reset,
    ToggleCurve,
    TogglePolygon,
    ToggleConnect,
    /// `None` evaluates every point, `Some(k)` only the first `k + 1`.
    DegreeCap(Option<usize>),
    SwitchView,
    OrbitLeft,
    OrbitRight,
    OrbitUp,
    OrbitDown,
}

impl Command {
    pub fn from_key(key: &Key) -> Option<Self> {
        match key {
            Key::Named(NamedKey::Tab) => Some(Command::SwitchView),
            Key::Named(NamedKey::ArrowLeft) => Some(Command::OrbitLeft),
            Key::Named(NamedKey::ArrowRight) => Some(Command::OrbitRight),
            Key::Named(NamedKey::ArrowUp) => Some(Command::OrbitUp),
            Key::Named(NamedKey::ArrowDown) => Some(Command::OrbitDown),
            Key::Character(ch) => match ch.as_str() {
                "r" | "R" => Some(Command::Reset),
                "c" | "C" => Some(Command::ToggleCurve),
                "p" | "P" => Some(Command::TogglePolygon),
                "l" | "L" => Some(Command::ToggleConnect),
                "0" => Some(Command::DegreeCap(None)),
                digit => digit
                    .parse::<usize>()
                    .ok()
                    .filter(|d| (1..=9).contains(d))
                    .map(|d| Command::DegreeCap(Some(d))),
            },
            _ => None,
        }
    }

    /// Whether holding the key down keeps issuing the command.
    pub fn repeats(&self) -> bool {
        matches!(
            self,
            Command::OrbitLeft | Command::OrbitRight | Command::OrbitUp | Command::OrbitDown
        )
    }
}

/// Input observed since the previous frame. Edges are cleared by [`FrameInput::end_frame`].
///
/// Edges are flags, not an event queue: a press and a release of one button in the same
/// frame are handled press first, whatever order they arrived in.
#[derive(Resource, Clone, Debug, Default)]
pub struct FrameInput {
    pub pointer: Vector2<f64>,
    pressed: [bool; 2],
    released: [bool; 2],
    commands: Vec<Command>,
}

impl FrameInput {
    pub fn move_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Vector2::new(x, y);
    }

    pub fn press(&mut self, button: Button) {
        self.pressed[button.slot()] = true;
    }

    pub fn release(&mut self, button: Button) {
        self.released[button.slot()] = true;
    }

    pub fn pressed(&self, button: Button) -> bool {
        self.pressed[button.slot()]
    }

    pub fn released(&self, button: Button) -> bool {
        self.released[button.slot()]
    }

    pub fn push_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn end_frame(&mut self) {
        self.pressed = [false; 2];
        self.released = [false; 2];
        self.commands.clear();
    }
}
