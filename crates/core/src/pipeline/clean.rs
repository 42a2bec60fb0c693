use std::{fs::remove_dir_all, path::Path};

use anyhow::{Context, Result};

/// Remove the working and output directories. Returns how many were removed.
pub fn clean(work_dir: &Path, output_dir: &Path) -> Result<usize> {
    let mut removed = 0;

    for dir in [work_dir, output_dir] {
        if dir.exists() {
            remove_dir_all(dir).with_context(|| format!("Failed to remove {}", dir.display()))?;
            println!("Removed {}", dir.display());
            removed += 1;
        } else {
            println!("Skipped {} (not found)", dir.display());
        }
    }

    println!("Cleaned {removed} directories");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use std::fs::create_dir_all;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_clean_removes_existing_only() {
        let dir = tempdir().unwrap();
        let work = dir.path().join("work");
        let output = dir.path().join("output");
        create_dir_all(work.join("downloads")).unwrap();

        assert_eq!(clean(&work, &output).unwrap(), 1);
        assert!(!work.exists());
        assert_eq!(clean(&work, &output).unwrap(), 0);
    }
}
