pub mod zip_extractor;

pub use zip_extractor::{ExtractionMode, ExtractionProgress, ExtractionReport, SkippedEntry, ZipExtractor};
