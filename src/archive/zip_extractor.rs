use crate::error::{BashUtilsError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read, Seek};
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, Instant};
use zip::result::ZipError;
use zip::ZipArchive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// Whole archive in a single call
    Bulk,
    /// Entry by entry, skipping the ones that fail
    PerEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub index: usize,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct ExtractionProgress {
    pub entries_processed: usize,
    pub total_entries: usize,
    pub current_entry: Option<String>,
    pub start_time: Instant,
    pub skipped: Vec<SkippedEntry>,
}

impl ExtractionProgress {
    pub fn new(total_entries: usize) -> Self {
        Self {
            entries_processed: 0,
            total_entries,
            current_entry: None,
            start_time: Instant::now(),
            skipped: Vec::new(),
        }
    }

    pub fn record_extracted(&mut self, name: String) {
        self.entries_processed += 1;
        self.current_entry = Some(name);
    }

    pub fn record_skipped(&mut self, entry: SkippedEntry) {
        self.entries_processed += 1;
        self.current_entry = Some(entry.name.clone());
        self.skipped.push(entry);
    }

    pub fn extracted(&self) -> usize {
        self.entries_processed - self.skipped.len()
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub archive: PathBuf,
    pub destination: PathBuf,
    pub mode: ExtractionMode,
    pub total_entries: usize,
    pub extracted_entries: usize,
    pub skipped_entries: Vec<SkippedEntry>,
    pub elapsed: Duration,
}

impl ExtractionReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped_entries.len()
    }

    pub fn is_complete(&self) -> bool {
        self.skipped_entries.is_empty() && self.extracted_entries == self.total_entries
    }
}

pub struct ZipExtractor {
    destination: PathBuf,
    show_progress: bool,
}

impl ZipExtractor {
    pub fn new<P: Into<PathBuf>>(destination: P) -> Self {
        Self {
            destination: destination.into(),
            show_progress: false,
        }
    }

    /// Extracts into the current working directory.
    pub fn in_current_dir() -> Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn shows_progress(&self) -> bool {
        self.show_progress
    }

    pub fn extract<P: AsRef<Path>>(
        &self,
        archive_path: P,
        progress_callback: Option<&dyn Fn(&ExtractionProgress)>,
    ) -> Result<ExtractionReport> {
        let archive_path = archive_path.as_ref();
        let start_time = Instant::now();
        // Opening comes first so a bad archive leaves the destination untouched
        let mut archive = open_archive(archive_path)?;
        let total_entries = archive.len();

        log::info!(
            "extracting {} ({} entries) into {}",
            archive_path.display(),
            total_entries,
            self.destination.display()
        );

        fs::create_dir_all(&self.destination)?;

        let mut progress = ExtractionProgress::new(total_entries);
        progress.start_time = start_time;

        let mode = if self.show_progress {
            self.extract_entries(&mut archive, &mut progress, progress_callback);
            ExtractionMode::PerEntry
        } else {
            archive
                .extract(&self.destination)
                .map_err(|source| BashUtilsError::ArchiveExtract {
                    path: archive_path.display().to_string(),
                    source,
                })?;

            progress.entries_processed = total_entries;
            ExtractionMode::Bulk
        };

        Ok(ExtractionReport {
            archive: archive_path.to_path_buf(),
            destination: self.destination.clone(),
            mode,
            total_entries,
            extracted_entries: progress.extracted(),
            skipped_entries: progress.skipped.clone(),
            elapsed: progress.elapsed(),
        })
    }

    fn extract_entries<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        progress: &mut ExtractionProgress,
        progress_callback: Option<&dyn Fn(&ExtractionProgress)>,
    ) {
        for index in 0..archive.len() {
            match self.extract_entry(archive, index) {
                Ok(name) => {
                    log::debug!("extracted {}", name);
                    progress.record_extracted(name);
                }
                Err(skipped) => {
                    log::warn!("skipping {}: {}", skipped.name, skipped.reason);
                    progress.record_skipped(skipped);
                }
            }

            if let Some(callback) = progress_callback {
                callback(progress);
            }
        }
    }

    fn extract_entry<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        index: usize,
    ) -> std::result::Result<String, SkippedEntry> {
        let mut entry = archive.by_index(index).map_err(|e| SkippedEntry {
            index,
            name: format!("entry_{}", index),
            reason: e.to_string(),
        })?;

        let name = entry.name().to_string();
        let skip = |reason: String| SkippedEntry {
            index,
            name: name.clone(),
            reason,
        };

        let relative = match entry.enclosed_name() {
            Some(relative) => relative,
            None => return Err(skip("entry path escapes the destination".to_string())),
        };
        let out_path = self.destination.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| skip(e.to_string()))?;
            return Ok(name);
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| skip(e.to_string()))?;
        }

        if entry.is_symlink() {
            let mut target = String::new();
            entry
                .read_to_string(&mut target)
                .map_err(|e| skip(e.to_string()))?;

            if !link_stays_inside(&relative, Path::new(&target)) {
                return Err(skip(format!("symlink target {} escapes the destination", target)));
            }

            make_symlink(Path::new(&target), &out_path).map_err(|e| skip(e.to_string()))?;
            return Ok(name);
        }

        let mut outfile = fs::File::create(&out_path).map_err(|e| skip(e.to_string()))?;
        if let Err(e) = io::copy(&mut entry, &mut outfile) {
            drop(outfile);
            let _ = fs::remove_file(&out_path);
            return Err(skip(e.to_string()));
        }

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&out_path, fs::Permissions::from_mode(mode))
                .map_err(|e| skip(e.to_string()))?;
        }

        Ok(name)
    }
}

/// True when `target`, resolved from the directory holding `link`, never
/// climbs above the extraction root.
fn link_stays_inside(link: &Path, target: &Path) -> bool {
    let mut depth = link
        .parent()
        .map(|parent| {
            parent
                .components()
                .filter(|c| matches!(c, Component::Normal(_)))
                .count()
        })
        .unwrap_or(0);

    for component in target.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => match depth.checked_sub(1) {
                Some(up) => depth = up,
                None => return false,
            },
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }

    true
}

#[cfg(unix)]
fn make_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

// Without symlink support the link becomes a file holding its target
#[cfg(not(unix))]
fn make_symlink(target: &Path, link: &Path) -> io::Result<()> {
    fs::write(link, target.to_string_lossy().as_bytes())
}

fn open_archive(path: &Path) -> Result<ZipArchive<fs::File>> {
    let open_error = |source: ZipError| BashUtilsError::ArchiveOpen {
        path: path.display().to_string(),
        source,
    };

    let file = fs::File::open(path).map_err(|e| open_error(ZipError::Io(e)))?;
    ZipArchive::new(file).map_err(open_error)
}
