use std::fs::{self, File, OpenOptions};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::trace::error::TraceError;
use crate::trace::format::TraceHeader;
use crate::trace::sample::Sample;
use crate::trace::writer::TraceWriter;

/// A trace being written to disk.
///
/// Data goes to a hidden sibling of the destination and only replaces the
/// destination on [`TraceFile::commit`]. Dropping an uncommitted file deletes
/// the partial data.
pub struct TraceFile {
    destination: PathBuf,
    partial: PartialPath,
    writer: TraceWriter<BufWriter<File>>,
}

impl TraceFile {
    pub fn create(destination: &Path, header: TraceHeader) -> Result<Self, TraceError> {
        let file_name = destination
            .file_name()
            .ok_or_else(|| TraceError::InvalidDestination(destination.display().to_string()))?
            .to_string_lossy();
        let path = destination.with_file_name(format!(
            ".{}.{}.partial",
            file_name,
            Uuid::new_v4()
        ));

        let file = OpenOptions::new().write(true).create_new(true).open(&path)?;
        let partial = PartialPath { path, keep: false };

        let writer = TraceWriter::new(BufWriter::new(file), header)?;
        Ok(Self {
            destination: destination.to_path_buf(),
            partial,
            writer,
        })
    }

    pub fn partial_path(&self) -> &Path {
        &self.partial.path
    }

    pub fn write_record(&mut self, catalog_id: u32, samples: &[Sample]) -> Result<(), TraceError> {
        self.writer.write_record(catalog_id, samples)
    }

    /// Finish the trace and move it into place. Returns the number of bytes written.
    pub fn commit(self) -> Result<u64, TraceError> {
        let TraceFile {
            destination,
            mut partial,
            writer,
        } = self;

        let file = writer
            .finish()?
            .into_inner()
            .map_err(|e| TraceError::Io(e.into_error()))?;
        file.sync_all()?;
        let len = file.metadata()?.len();
        drop(file);

        fs::rename(&partial.path, &destination)?;
        partial.keep = true;
        Ok(len)
    }
}

struct PartialPath {
    path: PathBuf,
    keep: bool,
}

impl Drop for PartialPath {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => log::debug!("Discarded partial trace {}", self.path.display()),
            Err(e) => log::warn!("Failed to remove partial trace {}: {}", self.path.display(), e),
        }
    }
}
