//! Output writers. Every file is staged in a temp file next to its
//! destination and renamed into place, so a failed run never leaves a
//! partial file at the output path.
pub mod metadata;
pub mod png;

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Fully written temp file waiting to be renamed onto `target`.
///
/// Dropping it without `commit` deletes the temp file.
#[derive(Debug)]
pub struct StagedFile {
    tmp: NamedTempFile,
    target: PathBuf,
}

impl StagedFile {
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Rename into place; returns the final path.
    pub fn commit(self) -> Result<PathBuf> {
        let Self { tmp, target } = self;
        tmp.persist(&target)
            .map_err(|e| Error::write(&target, e.error))?;
        Ok(target)
    }
}

/// Write the full contents of `output` into a temp file in the same directory.
pub fn stage<F>(output: &Path, write: F) -> Result<StagedFile>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::write(output, e))?;

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write(&mut writer)?;
        writer.flush().map_err(|e| Error::write(output, e))?;
    }

    Ok(StagedFile {
        tmp,
        target: output.to_path_buf(),
    })
}

pub fn write_atomically<F>(output: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    stage(output, write)?.commit()?;
    Ok(())
}
