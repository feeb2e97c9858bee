pub mod definition;
pub mod plugin;
pub mod registry;
pub mod stack;

pub use definition::*;
pub use plugin::FluidPlugin;
pub use registry::*;
pub use stack::*;
