use std::{fs, path::Path};

use located_error::LocatedError;

use log::trace;
use anyhow::Result;

mod error;
pub use error::ParseError;

/// Attempt to create the parent directories of a path (if needed) and return an error if it failed.
///
/// # Errors
/// - `CreateParentDirectory` if the user lacks the permissions to create the directory.
pub fn create_parent_directory(path: &Path) -> Result<()> {
    use ParseError::CreateParentDirectory;
    let parent_dir = path.parent().unwrap_or(path);
    let loc_msg = || format!("While attempting to create output directory '{}'", path.display());
    fs::create_dir_all(parent_dir).map_err(CreateParentDirectory).with_loc(loc_msg)?;
    Ok(())
}

/// Check if a given file already exists ; raise an error if such is the case, and the user did not explicitly
/// allow file overwriting.
///
/// # Errors
/// - `OverwriteDisallowed` if `path` already exists and `overwrite` is off.
pub fn can_write_file(overwrite: bool, path: &Path) -> Result<()> {
    let loc_msg = "While ensuring that file permissions were appropriate";
    if !overwrite && path.exists() {
        return Err(ParseError::OverwriteDisallowed{path: path.to_path_buf()}).loc(loc_msg)
    }
    Ok(())
}

/// Ensure `path` can be written: create its parent directory, and check for overwrites.
///
/// # Errors
/// - see [`create_parent_directory`] and [`can_write_file`]
pub fn prepare_output_file(overwrite: bool, path: &Path) -> Result<()> {
    create_parent_directory(path)?;
    can_write_file(overwrite, path)?;
    trace!("Output file: {}", path.display());
    Ok(())
}
