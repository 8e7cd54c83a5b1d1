//! Log file rotation

use std::fs;
use std::path::{Path, PathBuf};

use jiff::Zoned;
use jiff::civil::Date;

use crate::logger::config::{RotationConfig, RotationPolicy};
use crate::logger::error::LoggerError;

/// Decides when the active log file rolls over and prunes old files.
///
/// Rotated files are renamed to `<stem>.<YYYYmmdd_HHMMSS>_<NNNN>.<ext>` next
/// to the active file. The sequence number always exceeds that of every
/// surviving file with the same stamp, so lexicographic order equals age order
/// even after pruning.
pub struct RotationManager {
    config: RotationConfig,
    opened_on: Date,
}

impl RotationManager {
    pub fn new(config: RotationConfig) -> Self {
        Self {
            config,
            opened_on: Zoned::now().date(),
        }
    }

    pub fn should_rotate(&self, current_size: u64) -> bool {
        match self.config.policy {
            RotationPolicy::Size => current_size >= self.config.max_size,
            RotationPolicy::Daily => Zoned::now().date() != self.opened_on,
        }
    }

    /// Renames the active file aside and removes rotated files beyond
    /// `max_files`. The caller reopens `active`.
    pub fn rotate(&mut self, active: &Path) -> Result<PathBuf, LoggerError> {
        let rotated = rotated_path(active, &Zoned::now().strftime("%Y%m%d_%H%M%S").to_string())?;

        if active.exists() {
            fs::rename(active, &rotated).map_err(|e| {
                LoggerError::rotation(format!(
                    "Failed to rename {} to {}: {}",
                    active.display(),
                    rotated.display(),
                    e
                ))
            })?;
        }

        self.opened_on = Zoned::now().date();
        self.prune(active)?;
        Ok(rotated)
    }

    fn prune(&self, active: &Path) -> Result<(), LoggerError> {
        let mut rotated = rotated_siblings(active)?;
        rotated.sort();

        let excess = rotated.len().saturating_sub(self.config.max_files);
        for old in rotated.into_iter().take(excess) {
            fs::remove_file(&old)?;
        }
        Ok(())
    }
}

/// Builds the next rotated name for `stamp`, numbered after the highest
/// sequence already on disk for that stamp.
fn rotated_path(active: &Path, stamp: &str) -> Result<PathBuf, LoggerError> {
    let stem = active.file_stem().unwrap_or_default().to_string_lossy();
    let ext = active.extension().map(|e| e.to_string_lossy());
    let stamped = format!("{}.{}_", stem, stamp);

    let next = rotated_siblings(active)?
        .iter()
        .filter_map(|path| {
            let name = path.file_name()?.to_string_lossy().into_owned();
            let rest = name.strip_prefix(&stamped)?;
            rest.split('.').next()?.parse::<u32>().ok()
        })
        .max()
        .map_or(1, |seq| seq + 1);

    let name = match &ext {
        Some(ext) => format!("{}{:04}.{}", stamped, next, ext),
        None => format!("{}{:04}", stamped, next),
    };
    Ok(active.with_file_name(name))
}

fn rotated_siblings(active: &Path) -> Result<Vec<PathBuf>, LoggerError> {
    let parent = match active.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let prefix = format!(
        "{}.",
        active.file_stem().unwrap_or_default().to_string_lossy()
    );
    let active_name = active.file_name().unwrap_or_default();

    let files = fs::read_dir(parent)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            let name = path.file_name().unwrap_or_default();
            name != active_name && name.to_string_lossy().starts_with(&prefix)
        })
        .collect();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn size_config(max_size: u64, max_files: usize) -> RotationConfig {
        RotationConfig::new(RotationPolicy::Size, max_size, max_files).unwrap()
    }

    #[test]
    fn test_size_policy_threshold() {
        let manager = RotationManager::new(size_config(100, 3));
        assert!(!manager.should_rotate(99));
        assert!(manager.should_rotate(100));
    }

    #[test]
    fn test_daily_policy_same_day() {
        let config = RotationConfig::new(RotationPolicy::Daily, 0, 3).unwrap();
        let manager = RotationManager::new(config);
        assert!(!manager.should_rotate(u64::MAX));
    }

    #[test]
    fn test_rotate_moves_active_file() {
        let dir = tempdir().unwrap();
        let active = dir.path().join("app.log");
        fs::write(&active, "line\n").unwrap();

        let mut manager = RotationManager::new(size_config(1, 3));
        let rotated = manager.rotate(&active).unwrap();

        assert!(!active.exists());
        assert_eq!(fs::read_to_string(&rotated).unwrap(), "line\n");
        let name = rotated.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("app."));
        assert!(name.ends_with(".log"));
    }

    #[test]
    fn test_rotate_keeps_at_most_max_files() {
        let dir = tempdir().unwrap();
        let active = dir.path().join("app.log");
        let mut manager = RotationManager::new(size_config(1, 2));

        for i in 0..4 {
            fs::write(&active, format!("round {}\n", i)).unwrap();
            manager.rotate(&active).unwrap();
        }

        let remaining = rotated_siblings(&active).unwrap();
        assert_eq!(remaining.len(), 2);

        // The newest rotation survives
        let contents: Vec<String> = remaining
            .iter()
            .map(|p| fs::read_to_string(p).unwrap())
            .collect();
        assert!(contents.contains(&"round 3\n".to_string()));
    }

    #[test]
    fn test_prune_removes_oldest_within_same_second() {
        let dir = tempdir().unwrap();
        let active = dir.path().join("app.log");
        let manager = RotationManager::new(size_config(1, 2));

        for (seq, body) in [(1, "oldest"), (2, "middle"), (3, "newest")] {
            let rotated = active.with_file_name(format!("app.20260101_120000_{:04}.log", seq));
            fs::write(rotated, body).unwrap();
        }
        manager.prune(&active).unwrap();

        let mut contents: Vec<String> = rotated_siblings(&active)
            .unwrap()
            .iter()
            .map(|p| fs::read_to_string(p).unwrap())
            .collect();
        contents.sort();
        assert_eq!(contents, vec!["middle", "newest"]);

        // Numbering continues after the survivors rather than reusing a freed slot
        let next = rotated_path(&active, "20260101_120000").unwrap();
        assert_eq!(
            next.file_name().unwrap().to_string_lossy(),
            "app.20260101_120000_0004.log"
        );
    }

    #[test]
    fn test_unrelated_files_untouched() {
        let dir = tempdir().unwrap();
        let active = dir.path().join("app.log");
        let other = dir.path().join("other.log");
        fs::write(&other, "keep").unwrap();
        fs::write(&active, "x").unwrap();

        let mut manager = RotationManager::new(size_config(1, 1));
        manager.rotate(&active).unwrap();

        assert!(other.exists());
    }
}
