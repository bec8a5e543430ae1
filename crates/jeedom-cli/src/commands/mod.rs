//! Command implementations for jeedom-cli

pub mod actions;
pub mod full_data;
pub mod objects;

pub use actions::{cmd, message, scenario};
pub use full_data::full_data;
pub use objects::{commands, equipment, objects};
