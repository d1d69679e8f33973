//! Kernel module loading
//!
//! Loads a module image into the running kernel through `init_module(2)`
//! or `finit_module(2)`, tagging the load so the test module can report
//! which mechanism was used.

pub mod image;
pub mod kernel;
pub mod loader;
pub mod mode;
pub mod traits;

pub use image::ModuleImage;
pub use kernel::LinuxKernelApi;
pub use loader::{LoadRequest, ModuleLoader};
pub use mode::{LoadMode, LOAD_TYPE_PARAM};
pub use traits::{KernelApi, LoadError, FAILURE_EXIT_CODE};
