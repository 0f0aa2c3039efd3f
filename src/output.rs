use crate::error::RppError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Write `contents` to every path in `destinations`.
///
/// Every destination is first staged as a temp file next to it. Nothing is
/// renamed into place until all of them are written, so a failure while
/// staging leaves every destination as it was.
pub fn write_all(contents: &str, destinations: &[PathBuf]) -> Result<(), RppError> {
    let mut staged = Vec::with_capacity(destinations.len());
    for dest in destinations {
        staged.push((stage(contents, dest)?, dest));
    }

    for (file, dest) in staged {
        file.persist(dest)
            .map_err(|e| RppError::io(dest.clone(), e.error))?;
        info!(path = %dest.display(), "wrote");
    }
    Ok(())
}

fn stage(contents: &str, dest: &Path) -> Result<NamedTempFile, RppError> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| RppError::io(&dir, e))?;

    let mut file = NamedTempFile::new_in(&dir).map_err(|e| RppError::io(&dir, e))?;
    file.write_all(contents.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| RppError::io(file.path(), e))?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_identical_content_everywhere() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("templates").join("a.rpp");
        let b = temp_dir.path().join("b.rpp");

        write_all("<REAPER_PROJECT\n>\n", &[a.clone(), b.clone()]).unwrap();

        assert_eq!(fs::read_to_string(&a).unwrap(), "<REAPER_PROJECT\n>\n");
        assert_eq!(fs::read_to_string(&b).unwrap(), "<REAPER_PROJECT\n>\n");
        // Only the destinations remain in the top directory
        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_replaces_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("song.rpp");
        fs::write(&target, "old").unwrap();

        write_all("new", &[target.clone()]).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn test_staging_failure_leaves_destinations_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.rpp");
        fs::write(&good, "old").unwrap();

        // A regular file where a directory is needed makes staging fail
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let bad = blocker.join("nested").join("bad.rpp");

        let result = write_all("new", &[good.clone(), bad]);
        assert!(matches!(result, Err(RppError::Io { .. })));
        assert_eq!(fs::read_to_string(&good).unwrap(), "old");
    }
}
