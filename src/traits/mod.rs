pub mod controller;
pub mod navigation_mode;
pub mod scene;

pub use controller::*;
pub use navigation_mode::*;
pub use scene::*;
