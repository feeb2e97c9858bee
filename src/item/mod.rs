pub mod definition;
pub mod energy;
pub mod plugin;
pub mod registry;
pub mod stack;

pub use definition::*;
pub use plugin::ItemPlugin;
pub use registry::*;
pub use stack::*;
