use crate::domain::format::LotoKind;
use crate::domain::model::Draw;
use crate::domain::ports::HistorySource;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A history file layout, keyed by file suffix.
#[derive(Debug)]
pub struct FileFormat {
    pub suffix: &'static str,
    pub delimiter: u8,
}

pub static SUPPORTED_FORMATS: [FileFormat; 1] = [FileFormat {
    suffix: ".csv",
    delimiter: b';',
}];

pub fn supported_suffixes() -> Vec<&'static str> {
    SUPPORTED_FORMATS.iter().map(|f| f.suffix).collect()
}

pub fn file_format(path: &Path) -> Option<&'static FileFormat> {
    let extension = path.extension()?.to_str()?;
    SUPPORTED_FORMATS
        .iter()
        .find(|f| f.suffix.strip_prefix('.') == Some(extension))
}

/// Supported files directly inside `dir`, sorted by path.
pub fn collect_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && file_format(&path).is_some() {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        tracing::warn!(
            "no file found for accepted format: {}",
            supported_suffixes().join(", ")
        );
    }
    Ok(files)
}

/// Draws of one history file, with the game detected from its header.
///
/// `Ok(None)` when no game matches the header.
pub fn parse_history_file(path: &Path, format: &FileFormat) -> Result<Option<(LotoKind, Vec<Draw>)>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(format.delimiter)
        .flexible(true)
        .from_path(path)?;

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let Some(kind) = LotoKind::detect(&header) else {
        tracing::warn!(
            "No format found to process {} with header={:?}",
            path.display(),
            header
        );
        return Ok(None);
    };
    tracing::debug!("{} detected as {}", path.display(), kind.format());

    let mut draws = Vec::new();
    for row in reader.deserialize::<HashMap<String, String>>() {
        draws.extend(kind.format().extract(&row?)?);
    }
    Ok(Some((kind, draws)))
}

/// Like [`parse_history_file`] but never fails: a broken or unknown file
/// contributes no draws.
pub fn read_history_file(path: &Path) -> Vec<Draw> {
    let Some(format) = file_format(path) else {
        tracing::warn!("Unsupported history file {}", path.display());
        return Vec::new();
    };

    match parse_history_file(path, format) {
        Ok(Some((_, draws))) => {
            tracing::info!("{} draws read from {}", draws.len(), path.display());
            draws
        }
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::error!(
                "An error occur when processing {} with {:?}: {}",
                path.display(),
                format,
                e
            );
            Vec::new()
        }
    }
}

#[derive(Debug, Clone)]
pub struct CsvHistory {
    files: Vec<PathBuf>,
}

impl CsvHistory {
    pub fn from_files(files: Vec<PathBuf>) -> Self {
        Self { files }
    }

    pub fn from_repository(dir: &Path) -> Result<Self> {
        Ok(Self::from_files(collect_files(dir)?))
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

impl HistorySource for CsvHistory {
    fn load(&self) -> Result<Vec<Draw>> {
        Ok(self
            .files
            .iter()
            .flat_map(|file| read_history_file(file))
            .collect())
    }
}
