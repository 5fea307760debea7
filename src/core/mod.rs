// Core pipeline components

pub(crate) mod loader;
pub mod overlay;
pub mod session;
pub mod skeleton;
pub mod status;
