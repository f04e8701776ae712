//! Locating the CSV pair inside an asset folder.

use std::path::{Path, PathBuf};

use crate::error::AssetError;

pub const FEATURE_FILE: &str = "feature.csv";
pub const TARGET_FILE: &str = "target.csv";

/// Which side of the data an individual CSV upload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CsvKind {
    Feature,
    Target,
}

impl CsvKind {
    /// `file_type` form value.
    pub fn as_str(self) -> &'static str {
        match self {
            CsvKind::Feature => "feature",
            CsvKind::Target => "target",
        }
    }
}

/// The two files of an asset folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFiles {
    pub folder: PathBuf,
    pub feature: PathBuf,
    pub target: PathBuf,
}

impl AssetFiles {
    /// Name shown next to the folder button.
    pub fn folder_name(&self) -> String {
        self.folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.folder.display().to_string())
    }
}

/// Find `feature.csv` and `target.csv` (any letter case) directly inside `folder`.
pub fn find_asset_files(folder: &Path) -> Result<AssetFiles, AssetError> {
    let entries = std::fs::read_dir(folder).map_err(|source| AssetError::Io {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut feature = None;
    let mut target = None;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_lowercase()) else {
            continue;
        };
        if name == FEATURE_FILE {
            feature = Some(path);
        } else if name == TARGET_FILE {
            target = Some(path);
        }
    }

    match (feature, target) {
        (Some(feature), Some(target)) => Ok(AssetFiles {
            folder: folder.to_path_buf(),
            feature,
            target,
        }),
        _ => Err(AssetError::MissingFiles(folder.to_path_buf())),
    }
}
