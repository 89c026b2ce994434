//! @ai:module:intent Request-scoped scratch file holding submitted source
//! @ai:module:layer infrastructure
//! @ai:module:public_api ScratchFile
//! @ai:module:stateless true

use crate::error::{AnalysisError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::TempPath;

const SCRATCH_PREFIX: &str = "analysis-";
const SCRATCH_SUFFIX: &str = ".c";

/// @ai:intent Uniquely named `.c` file removed when this value is dropped
#[derive(Debug)]
pub struct ScratchFile {
    path: TempPath,
}

impl ScratchFile {
    /// @ai:intent Create a scratch file containing exactly `contents`
    /// @ai:post file handle is closed; the path is readable by another process
    /// @ai:post on write failure the partially created file is already removed
    /// @ai:effects fs:write
    pub fn create(dir: Option<&Path>, contents: &str) -> Result<Self> {
        Self::create_with(dir, contents, write_contents)
    }

    /// @ai:intent Create the file and fill it through `write`
    /// @ai:effects fs:write
    fn create_with<F>(dir: Option<&Path>, contents: &str, write: F) -> Result<Self>
    where
        F: FnOnce(&mut dyn Write, &str) -> std::io::Result<()>,
    {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX).suffix(SCRATCH_SUFFIX);

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(AnalysisError::StorageCreate)?;

        // On error `file` drops here, which removes the partial file.
        write(&mut file, contents).map_err(AnalysisError::StorageWrite)?;

        let path = file.into_temp_path();
        tracing::debug!("Wrote {} bytes to {}", contents.len(), path.display());

        Ok(Self { path })
    }

    /// @ai:intent Location of the scratch file
    /// @ai:effects pure
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// @ai:intent Write all of `contents` and flush
/// @ai:effects fs:write
fn write_contents(writer: &mut dyn Write, contents: &str) -> std::io::Result<()> {
    writer.write_all(contents.as_bytes())?;
    writer.flush()
}
