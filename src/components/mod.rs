pub mod camera;
pub mod input;
pub mod options;
pub mod shapes;
pub mod view;
