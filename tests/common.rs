//! Shared fixtures for loader integration tests

#![allow(dead_code)]

use evmtest_modload::KernelApi;
use nix::errno::Errno;
use std::cell::{Cell, RefCell};
use std::ffi::CStr;
use std::fs::File;
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Recorded `init_module` call
#[derive(Debug, Clone)]
pub struct InitCall {
    pub image: Vec<u8>,
    pub params: String,
}

/// Recorded `finit_module` call
#[derive(Debug, Clone)]
pub struct FinitCall {
    /// Inode of the handle the kernel received
    pub inode: u64,
    pub len: u64,
    pub params: String,
}

/// Kernel API double that records every call instead of loading anything
pub struct MockKernel {
    pub superuser: bool,
    pub result: Result<(), Errno>,
    pub opens: Cell<usize>,
    pub init_calls: RefCell<Vec<InitCall>>,
    pub finit_calls: RefCell<Vec<FinitCall>>,
}

impl MockKernel {
    /// Root caller whose loads succeed
    pub fn root() -> Self {
        Self {
            superuser: true,
            result: Ok(()),
            opens: Cell::new(0),
            init_calls: RefCell::new(Vec::new()),
            finit_calls: RefCell::new(Vec::new()),
        }
    }

    /// Unprivileged caller
    pub fn unprivileged() -> Self {
        Self {
            superuser: false,
            ..Self::root()
        }
    }

    /// Root caller whose loads the kernel rejects with `errno`
    pub fn rejecting(errno: Errno) -> Self {
        Self {
            result: Err(errno),
            ..Self::root()
        }
    }

    pub fn kernel_calls(&self) -> usize {
        self.init_calls.borrow().len() + self.finit_calls.borrow().len()
    }
}

impl KernelApi for MockKernel {
    fn is_superuser(&self) -> bool {
        self.superuser
    }

    fn open_module(&self, path: &Path) -> io::Result<File> {
        self.opens.set(self.opens.get() + 1);
        File::open(path)
    }

    fn init_module(&self, image: &[u8], params: &CStr) -> Result<(), Errno> {
        self.init_calls.borrow_mut().push(InitCall {
            image: image.to_vec(),
            params: params.to_string_lossy().into_owned(),
        });
        self.result
    }

    fn finit_module(&self, file: File, params: &CStr) -> Result<(), Errno> {
        let metadata = file.metadata().expect("finit_module received a closed handle");
        self.finit_calls.borrow_mut().push(FinitCall {
            inode: metadata.ino(),
            len: metadata.len(),
            params: params.to_string_lossy().into_owned(),
        });
        self.result
    }
}

/// Temporary directory holding a fake module image
pub struct ModuleFixture {
    pub temp_dir: TempDir,
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

impl ModuleFixture {
    /// Create `mod.ko` with an ELF magic followed by `size` filler bytes
    pub fn new(size: usize) -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("mod.ko");
        let mut contents = b"\x7fELF".to_vec();
        contents.extend((0..size).map(|i| (i % 251) as u8));
        std::fs::write(&path, &contents)?;
        Ok(Self {
            temp_dir,
            path,
            contents,
        })
    }

    pub fn path_str(&self) -> &str {
        self.path.to_str().expect("temp path is UTF-8")
    }

    pub fn inode(&self) -> u64 {
        std::fs::metadata(&self.path).map(|m| m.ino()).unwrap_or(0)
    }
}
