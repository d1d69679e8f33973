//! evmtest-modload - kernel module loading harness
//!
//! Loads a kernel module image through either `init_module(2)` (image passed
//! by buffer) or `finit_module(2)` (image passed by file descriptor), so
//! module signature appraisal can be exercised on both paths. Each load
//! passes `evmtest_load_type=<syscall>` to the module, which echoes it into
//! the kernel log.
//!
//! ## Layout
//!
//! 1. `module` - load modes, kernel boundary, loader
//! 2. `cli` - getopt-compatible argument handling for the `modloader` binary
//! 3. `config` / `utils` - configuration and logging

pub mod cli;
pub mod config;
pub mod module;
pub mod utils;

pub use cli::{parse_request, run_with, Args};
pub use config::{LoaderConfig, LoggingConfig};
pub use module::{
    KernelApi, LinuxKernelApi, LoadError, LoadMode, LoadRequest, ModuleImage, ModuleLoader,
    FAILURE_EXIT_CODE,
};
