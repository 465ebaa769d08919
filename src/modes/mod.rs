pub mod coordinator;
pub mod fly;
pub mod handle;
pub mod walk;

pub use coordinator::ModeCoordinator;
pub use fly::FlyMode;
pub use handle::ModeHandle;
pub use walk::WalkMode;
