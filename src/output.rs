use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::OutputError;
use crate::source::SourceDescriptor;

pub const PLACEMENTS_FILE: &str = "extracted-placements.json";
pub const RAW_CONTENT_FILE: &str = "raw-content.txt";

pub fn graduates_file_name(source: &SourceDescriptor) -> String {
    format!("placement-data-{}.json", source.slug())
}

/// Output file opened before any fetching starts, so an unwritable path
/// fails the run up front.
pub struct OutputFile {
    path: PathBuf,
    file: File,
}

impl OutputFile {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, OutputError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|source| OutputError::Open {
                path: path.clone(),
                source,
            })?;
        Ok(OutputFile { path, file })
    }

    /// Pretty-printed UTF-8 JSON, non-ASCII characters left unescaped.
    pub fn write_json<T: Serialize + ?Sized>(self, value: &T) -> Result<PathBuf, OutputError> {
        let mut writer = BufWriter::new(self.file);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(self.path)
    }

    pub fn write_text(self, text: &str) -> Result<PathBuf, OutputError> {
        let mut writer = BufWriter::new(self.file);
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(self.path)
    }
}
