//! In-memory module images for buffer-based loading

use std::fs::File;
use std::io::Read;
use tracing::debug;

use crate::module::traits::LoadError;

/// Raw bytes of a module file
///
/// The buffer is owned, so it is released exactly once when the image is
/// dropped, whatever the outcome of the load.
#[derive(Debug)]
pub struct ModuleImage {
    bytes: Vec<u8>,
}

impl ModuleImage {
    /// Read a whole module file into memory and close it
    ///
    /// The buffer is sized from `fstat` on the open handle before any byte is
    /// read. The file is closed before this returns, on every branch.
    pub fn read_from(mut file: File) -> Result<Self, LoadError> {
        let metadata = file.metadata().map_err(LoadError::Stat)?;
        let size = usize::try_from(metadata.len())
            .map_err(|_| LoadError::Allocation(usize::MAX))?;

        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(size)
            .map_err(|_| LoadError::Allocation(size))?;
        bytes.resize(size, 0);

        file.read_exact(&mut bytes).map_err(LoadError::Read)?;
        drop(file);

        debug!("Read {} byte module image", size);
        Ok(Self { bytes })
    }

    /// Image contents
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Image length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
