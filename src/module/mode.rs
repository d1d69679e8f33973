//! Load mechanism selection
//!
//! Maps each load mechanism to the parameter blob handed to the kernel.
//! The loaded test module echoes `evmtest_load_type` into the kernel log,
//! so the tag is how a test run tells which syscall loaded the module.

use std::ffi::CStr;
use std::fmt;

/// Kernel module parameter set by every load
pub const LOAD_TYPE_PARAM: &str = "evmtest_load_type";

/// Kernel mechanism used to load a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadMode {
    /// `init_module(2)`: the image is read into memory and passed by buffer
    Legacy,
    /// `finit_module(2)`: the kernel reads the image from a file descriptor
    Modern,
}

impl LoadMode {
    /// Name of the syscall backing this mode
    pub fn syscall_name(self) -> &'static str {
        match self {
            LoadMode::Legacy => "init_module",
            LoadMode::Modern => "finit_module",
        }
    }

    /// Parameter blob passed to the kernel for this mode
    pub fn diagnostic_tag(self) -> &'static CStr {
        match self {
            LoadMode::Legacy => c"evmtest_load_type=init_module",
            LoadMode::Modern => c"evmtest_load_type=finit_module",
        }
    }
}

impl fmt::Display for LoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.syscall_name())
    }
}
