pub mod components;
pub mod managers;
pub mod plugin;
pub mod process;

pub use components::*;
pub use managers::*;
pub use plugin::MachinePlugin;
pub use process::*;
