use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::macros::format_description;

/// Ordered list of media paths, loaded once and fixed for the whole session.
#[derive(Debug, Clone)]
pub struct Playlist {
    source: PathBuf,
    entries: Vec<PathBuf>,
}

impl Playlist {
    /// Reads the playlist file, one path per line. Blank lines are dropped so
    /// a trailing newline does not turn into a phantom entry.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read playlist {}", path.display()))?;
        Ok(Self::parse(path.to_path_buf(), &raw))
    }

    pub fn parse(source: PathBuf, raw: &str) -> Self {
        let entries = raw
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(PathBuf::from)
            .collect();
        Self { source, entries }
    }

    pub fn from_entries(source: PathBuf, entries: Vec<PathBuf>) -> Self {
        Self { source, entries }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.entries.get(index).map(PathBuf::as_path)
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }
}

/// The entry opens as a file right now. Checked at visit time, never cached.
pub fn entry_opens(path: &Path) -> bool {
    File::open(path).is_ok()
}

/// Writes a copy of the playlist at `source` with entries that no longer
/// open removed. The copy lands next to the original, its name extended with
/// a timestamp, and the original is left untouched.
pub fn write_fixed_copy(source: &Path) -> Result<PathBuf> {
    let playlist = Playlist::load(source)?;
    let kept: Vec<String> = playlist
        .entries()
        .iter()
        .filter(|path| entry_opens(path))
        .map(|path| path.display().to_string())
        .collect();

    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let stamp = now
        .format(format_description!(
            "[year][month][day][hour][minute][second]"
        ))
        .context("failed to format the fixed playlist timestamp")?;

    let target = PathBuf::from(format!("{}-{stamp}", source.display()));
    fs::write(&target, kept.join("\n"))
        .with_context(|| format!("failed to write fixed playlist {}", target.display()))?;
    Ok(target)
}
