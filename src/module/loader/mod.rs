//! Module loading
//!
//! Opens a module image and hands it to the kernel through the selected
//! mechanism.

pub mod loader;

pub use loader::{LoadRequest, ModuleLoader};
