use crate::utils::error::{LotoError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let raw = path.to_string_lossy();
    if raw.is_empty() {
        return Err(LotoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if raw.contains('\0') {
        return Err(LotoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_existing_dir(field_name: &str, path: &Path) -> Result<()> {
    validate_path(field_name, path)?;
    if !path.is_dir() {
        return Err(LotoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.display().to_string(),
            reason: "Directory does not exist".to_string(),
        });
    }
    Ok(())
}

pub fn validate_existing_file(field_name: &str, path: &Path) -> Result<()> {
    validate_path(field_name, path)?;
    if !path.is_file() {
        return Err(LotoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.display().to_string(),
            reason: "File does not exist".to_string(),
        });
    }
    Ok(())
}

/// `allowed_suffixes` are written with their leading dot, e.g. `.csv`.
pub fn validate_file_suffixes<P: AsRef<Path>>(
    field_name: &str,
    files: &[P],
    allowed_suffixes: &[&str],
) -> Result<()> {
    for file in files {
        let file = file.as_ref();
        let suffix = file
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext));

        let supported = suffix
            .as_deref()
            .is_some_and(|s| allowed_suffixes.contains(&s));
        if !supported {
            return Err(LotoError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: file.display().to_string(),
                reason: format!("{} must be one of {}", field_name, allowed_suffixes.join(", ")),
            });
        }
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(LotoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}
