//! Helpers for reading device attributes from `/sys`

use std::path::Path;
use std::path::PathBuf;

/// Failure to read a device from sysfs
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SysfsError {
    #[error("Failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid value {value:?} in {}", .path.display())]
    InvalidValue { path: PathBuf, value: String },
}

/// True if the device directory has the attribute
pub(crate) fn has_attribute(dir: &Path, attribute: &str) -> bool {
    dir.join(attribute).is_file()
}

/// Read a hexadecimal attribute, with or without a `0x` prefix
pub(crate) fn read_hex<T: TryFrom<u32>>(dir: &Path, attribute: &str) -> Result<T, SysfsError> {
    let path = dir.join(attribute);
    let raw = std::fs::read_to_string(&path).map_err(|source| SysfsError::Io {
        path: path.clone(),
        source,
    })?;
    let value = raw.trim();
    let digits = value.strip_prefix("0x").unwrap_or(value);
    u32::from_str_radix(digits, 16)
        .ok()
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(|| SysfsError::InvalidValue {
            path,
            value: value.to_owned(),
        })
}

/// All entries of a sysfs bus directory, sorted by name
pub(crate) fn device_dirs(root: &Path) -> Result<Vec<PathBuf>, SysfsError> {
    let io_err = |source: std::io::Error| SysfsError::Io {
        path: root.to_owned(),
        source,
    };
    let mut dirs = vec![];
    for entry in std::fs::read_dir(root).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        dirs.push(entry.path());
    }
    dirs.sort();
    Ok(dirs)
}
