//! Kernel boundary traits and load errors
//!
//! Defines the interface the loader uses to reach the kernel, so the load
//! flow can be driven without privileges in tests.

use nix::errno::Errno;
use std::ffi::CStr;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Exit status reported for every failed invocation
///
/// Matches the `-1` a raw syscall wrapper returns, truncated to a byte.
pub const FAILURE_EXIT_CODE: u8 = 255;

/// Kernel API trait - operations the loader needs from the OS
///
/// Implemented by [`crate::module::kernel::LinuxKernelApi`] for real loads.
pub trait KernelApi {
    /// Whether the effective caller is the superuser
    fn is_superuser(&self) -> bool;

    /// Open a module image read-only
    fn open_module(&self, path: &Path) -> io::Result<File>;

    /// Load a module from an in-memory image (`init_module(2)`)
    fn init_module(&self, image: &[u8], params: &CStr) -> Result<(), Errno>;

    /// Load a module from an open file (`finit_module(2)`)
    ///
    /// Takes ownership of the handle; it is closed once the call returns.
    fn finit_module(&self, file: File, params: &CStr) -> Result<(), Errno>;
}

impl<K: KernelApi + ?Sized> KernelApi for &K {
    fn is_superuser(&self) -> bool {
        (**self).is_superuser()
    }

    fn open_module(&self, path: &Path) -> io::Result<File> {
        (**self).open_module(path)
    }

    fn init_module(&self, image: &[u8], params: &CStr) -> Result<(), Errno> {
        (**self).init_module(image, params)
    }

    fn finit_module(&self, file: File, params: &CStr) -> Result<(), Errno> {
        (**self).finit_module(file, params)
    }
}

/// Module load errors
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid arguments: {0}")]
    Usage(String),

    #[error("must be run as root")]
    PermissionDenied,

    #[error("could not open {} for read: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to stat module image: {0}")]
    Stat(#[source] io::Error),

    #[error("failed to allocate {0} bytes for module image")]
    Allocation(usize),

    #[error("failed to read module image: {0}")]
    Read(#[source] io::Error),

    #[error("kernel rejected module: {:?} ({})", .0, .0.desc())]
    KernelRejected(Errno),
}

impl LoadError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        FAILURE_EXIT_CODE
    }

    /// Whether the failure happened before the kernel was asked to load anything
    pub fn is_pre_load(&self) -> bool {
        !matches!(self, LoadError::KernelRejected(_))
    }
}
