//! Module loader implementation
//!
//! Runs one load attempt: privilege check, open, then dispatch to the
//! selected kernel mechanism. Every failure is terminal; nothing is retried.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::module::image::ModuleImage;
use crate::module::mode::LoadMode;
use crate::module::traits::{KernelApi, LoadError};

/// A validated load invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Module image to load
    pub path: PathBuf,
    /// Kernel mechanism to use
    pub mode: LoadMode,
}

impl LoadRequest {
    pub fn new<P: AsRef<Path>>(path: P, mode: LoadMode) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            mode,
        }
    }
}

/// Module loader driving a [`KernelApi`]
pub struct ModuleLoader<K: KernelApi> {
    kernel: K,
}

impl<K: KernelApi> ModuleLoader<K> {
    pub fn new(kernel: K) -> Self {
        Self { kernel }
    }

    /// Load the requested module into the kernel
    pub fn load(&self, request: &LoadRequest) -> Result<(), LoadError> {
        // Loading kernel code requires root; check before touching the file.
        if !self.kernel.is_superuser() {
            debug!("Refusing to load {}: euid is not 0", request.path.display());
            return Err(LoadError::PermissionDenied);
        }

        let file = self
            .kernel
            .open_module(&request.path)
            .map_err(|source| LoadError::FileAccess {
                path: request.path.clone(),
                source,
            })?;

        info!(
            "Loading module {} via {}",
            request.path.display(),
            request.mode
        );
        let params = request.mode.diagnostic_tag();

        let result = match request.mode {
            LoadMode::Legacy => {
                let image = ModuleImage::read_from(file)?;
                debug!("Passing {} byte image to kernel", image.len());
                self.kernel.init_module(image.as_bytes(), params)
            }
            LoadMode::Modern => self.kernel.finit_module(file, params),
        };

        match result {
            Ok(()) => {
                info!("Module {} loaded", request.path.display());
                Ok(())
            }
            Err(errno) => {
                debug!(
                    "Kernel rejected {} ({}): {}",
                    request.path.display(),
                    request.mode,
                    errno
                );
                Err(LoadError::KernelRejected(errno))
            }
        }
    }
}
