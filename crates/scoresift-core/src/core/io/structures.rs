use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const STRUCTURE_EXTENSION: &str = ".pdb";

/// Outcome of looking up one entry's structure file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureCopy {
    Copied { source: PathBuf, destination: PathBuf },
    Missing { source: PathBuf },
}

/// File name of the structure belonging to `identifier`, adding `extension` unless present.
pub fn structure_file_name(identifier: &str, extension: &str) -> String {
    if identifier.ends_with(extension) {
        identifier.to_string()
    } else {
        format!("{}{}", identifier, extension)
    }
}

/// Copies the structure file for `identifier` from `source_dir` into `destination_dir`.
///
/// A missing source file is not an error; it is reported as
/// [`StructureCopy::Missing`] so the caller can warn and carry on. The copy
/// keeps only the file name, so identifiers containing directories land
/// directly in `destination_dir`.
pub fn copy_structure(
    identifier: &str,
    extension: &str,
    source_dir: &Path,
    destination_dir: &Path,
) -> io::Result<StructureCopy> {
    let file_name = structure_file_name(identifier, extension);
    let source = source_dir.join(&file_name);
    if !source.is_file() {
        return Ok(StructureCopy::Missing { source });
    }

    let base_name = Path::new(&file_name)
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&file_name));
    let destination = destination_dir.join(base_name);
    if destination != source {
        fs::copy(&source, &destination)?;
    }
    Ok(StructureCopy::Copied {
        source,
        destination,
    })
}
