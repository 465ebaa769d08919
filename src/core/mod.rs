pub mod input_adapter;
pub mod input_surface;
pub mod key_state;
pub mod pointer;

pub use input_adapter::WinitInputAdapter;
pub use input_surface::{InputEvent, InputSurface, SharedInputSurface};
pub use key_state::KeyState;
pub use pointer::DragTracker;
