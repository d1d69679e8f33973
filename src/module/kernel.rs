//! Linux implementation of the kernel boundary
//!
//! Thin wrappers over `init_module(2)`, `finit_module(2)` and `geteuid(2)`
//! through the `nix` crate.

use nix::errno::Errno;
use nix::kmod::{self, ModuleInitFlags};
use nix::unistd::geteuid;
use std::ffi::CStr;
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::debug;

use crate::module::traits::KernelApi;

/// Kernel API backed by real syscalls
#[derive(Debug, Default, Clone, Copy)]
pub struct LinuxKernelApi;

impl LinuxKernelApi {
    pub fn new() -> Self {
        Self
    }
}

impl KernelApi for LinuxKernelApi {
    fn is_superuser(&self) -> bool {
        geteuid().is_root()
    }

    fn open_module(&self, path: &Path) -> io::Result<File> {
        File::open(path)
    }

    fn init_module(&self, image: &[u8], params: &CStr) -> Result<(), Errno> {
        debug!("init_module({} bytes, {:?})", image.len(), params);
        kmod::init_module(image, params)
    }

    fn finit_module(&self, file: File, params: &CStr) -> Result<(), Errno> {
        debug!("finit_module({:?}, {:?})", file, params);
        kmod::finit_module(&file, params, ModuleInitFlags::empty())
    }
}
