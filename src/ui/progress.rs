use crate::archive::ExtractionProgress;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Bar showing `label [####>---] pos/len current-entry`.
    pub fn create_entry_progress(&self, total_entries: u64, label: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::with_draw_target(Some(total_entries), ProgressDrawTarget::stderr());
        pb.set_style(
            ProgressStyle::with_template(
                "{prefix} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>7}/{len:7} {wide_msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );
        pb.set_prefix(label.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

pub fn update_entry_progress(pb: &ProgressBar, progress: &ExtractionProgress) {
    pb.set_length(progress.total_entries as u64);
    pb.set_position(progress.entries_processed as u64);

    match progress.current_entry {
        Some(ref entry) => pb.set_message(entry.clone()),
        None => pb.set_message(""),
    }
}

pub fn finish_progress_with_summary(pb: &ProgressBar, duration: Duration, skipped: usize) {
    let message = if skipped == 0 {
        format!("done in {}", format_duration(duration))
    } else {
        format!("done in {}, {} skipped", format_duration(duration), skipped)
    };
    pb.finish_with_message(message);
}

pub(crate) fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_progress_bar_is_hidden() {
        let manager = ProgressManager::new(false);
        let pb = manager.create_entry_progress(10, "Extracting");
        assert!(pb.is_hidden());
    }

    #[test]
    fn test_entry_progress_tracks_position() {
        let manager = ProgressManager::new(true);
        let pb = manager.create_entry_progress(0, "Extracting");
        assert_eq!(pb.prefix(), "Extracting");

        let mut progress = ExtractionProgress::new(3);
        progress.record_extracted("a.txt".to_string());
        update_entry_progress(&pb, &progress);

        assert_eq!(pb.length(), Some(3));
        assert_eq!(pb.position(), 1);
        assert_eq!(pb.message(), "a.txt");

        finish_progress_with_summary(&pb, progress.elapsed(), progress.skipped.len());
        assert!(pb.is_finished());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(75)), "1m 15s");
        assert_eq!(format_duration(Duration::from_millis(20)), "20ms");
    }
}
