//! Batch orchestration: turns a list of paths into ordered gallery items.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::{Config, ProcessingConfig};
use crate::error::{PipelineError, PipelineResult};
use crate::types::GalleryItem;

use super::discovery::FileDiscovery;
use super::hash::ContentIdentity;
use super::progress::{ProgressSink, ProgressTracker};
use super::scheduler::ConcurrencyScheduler;
use super::thumbnail::ThumbnailGenerator;
use super::validate::Validator;

/// Builds gallery items for a batch of image files.
///
/// Each file is validated, digested, then thumbnailed, all inside one
/// scheduler slot. Results come back in input order regardless of which
/// file finished first.
pub struct BatchImageProcessor {
    processing: ProcessingConfig,
    discovery: FileDiscovery,
    validator: Validator,
    identity: ContentIdentity,
    thumbnails: ThumbnailGenerator,
}

impl BatchImageProcessor {
    pub fn new(config: &Config) -> Self {
        Self {
            processing: config.processing.clone(),
            discovery: FileDiscovery::new(&config.processing),
            validator: Validator::new(config.limits.clone()),
            identity: ContentIdentity::new(config.hash.algorithm),
            thumbnails: ThumbnailGenerator::new(config.thumbnail.clone(), config.limits.clone()),
        }
    }

    /// True if the file extension is one of the configured image formats.
    pub fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.processing.is_supported_extension(ext))
    }

    /// Keep only paths with a recognized image extension, preserving order.
    pub fn filter_supported(&self, paths: Vec<PathBuf>) -> Vec<PathBuf> {
        paths.into_iter().filter(|p| self.is_supported(p)).collect()
    }

    /// List the files in `dir` (not yet filtered by extension).
    pub fn discover(&self, dir: &Path) -> Vec<PathBuf> {
        self.discovery.discover(dir)
    }

    /// Process every supported file in `paths` with at most `concurrency`
    /// files in flight.
    ///
    /// Unsupported extensions are dropped before any work starts and do not
    /// count towards the progress total. The first failure aborts the batch:
    /// no further files are started and the error is returned.
    pub async fn process<S: ProgressSink>(
        &self,
        paths: Vec<PathBuf>,
        concurrency: usize,
        sink: S,
    ) -> PipelineResult<Vec<GalleryItem>> {
        let eligible = self.filter_supported(paths);
        let scheduler = ConcurrencyScheduler::new(concurrency)?;
        let labels = progress_labels(&eligible);
        let mut tracker = ProgressTracker::new(eligible.len(), sink);

        tracing::debug!(
            "Processing {} files with concurrency {} ({} ids)",
            eligible.len(),
            scheduler.limit(),
            self.identity.algorithm()
        );
        let start = Instant::now();

        let items = scheduler
            .run(
                eligible,
                move |path: PathBuf, _index: usize| self.process_one(path),
                |index, _item: &GalleryItem| {
                    tracker.on_task_completed(&labels[index]);
                },
            )
            .await?;

        tracing::info!("Processed {} files in {:?}", items.len(), start.elapsed());
        Ok(items)
    }

    /// Like [`process`](Self::process), but every file runs and each slot
    /// holds that file's own result.
    ///
    /// Only an invalid `concurrency` fails the call as a whole.
    pub async fn process_settled<S: ProgressSink>(
        &self,
        paths: Vec<PathBuf>,
        concurrency: usize,
        sink: S,
    ) -> PipelineResult<Vec<PipelineResult<GalleryItem>>> {
        let eligible = self.filter_supported(paths);
        let scheduler = ConcurrencyScheduler::new(concurrency)?;
        let labels = progress_labels(&eligible);
        let mut tracker = ProgressTracker::new(eligible.len(), sink);
        let start = Instant::now();

        let results = scheduler
            .run_settled(
                eligible,
                move |path: PathBuf, _index: usize| self.process_one(path),
                |index, _outcome: &PipelineResult<GalleryItem>| {
                    tracker.on_task_completed(&labels[index]);
                },
            )
            .await;

        assert!(tracker.is_finished(), "settled run skipped a file");
        let failed = results.iter().filter(|r| r.is_err()).count();
        tracing::info!(
            "Settled {} files ({} failed) in {:?}",
            tracker.snapshot().completed,
            failed,
            start.elapsed()
        );
        Ok(results)
    }

    /// List `dir` and process the supported files in it.
    pub async fn process_directory<S: ProgressSink>(
        &self,
        dir: &Path,
        concurrency: usize,
        sink: S,
    ) -> PipelineResult<Vec<GalleryItem>> {
        let files = self.discover(dir);
        tracing::debug!("Found {} files in {:?}", files.len(), dir);
        self.process(files, concurrency, sink).await
    }

    async fn process_one(&self, path: PathBuf) -> PipelineResult<GalleryItem> {
        let start = Instant::now();
        tracing::debug!("Processing: {:?}", path);

        self.validator.validate(&path).await?;
        tracing::trace!("  Validate: {:?}", start.elapsed());

        let hash_start = Instant::now();
        let id = self.identity.identify_file(&path).await?;
        tracing::trace!("  Content id: {:?}", hash_start.elapsed());

        let thumb_start = Instant::now();
        let thumbnail = self
            .thumbnails
            .generate_data_uri(&path, self.thumbnails.size())
            .await?;
        tracing::trace!("  Thumbnail: {:?}", thumb_start.elapsed());

        let display_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| PipelineError::InvalidArgument(format!("no file name in {:?}", path)))?;

        tracing::debug!("Processed {:?} in {:?}", display_name, start.elapsed());

        Ok(GalleryItem {
            id,
            path: path.to_string_lossy().into_owned(),
            display_name,
            thumbnail,
        })
    }
}

/// File names shown as the progress `current` label.
fn progress_labels(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.to_string_lossy().into_owned())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DigestAlgorithm;
    use crate::pipeline::progress::NoProgress;
    use crate::testutil::write_image;
    use crate::types::ProgressSnapshot;
    use std::sync::{Arc, Mutex};

    fn processor() -> BatchImageProcessor {
        BatchImageProcessor::new(&Config::default())
    }

    #[tokio::test]
    async fn test_results_follow_input_order() {
        let dir = tempfile::tempdir().unwrap();
        // Larger images first so they tend to finish last
        let paths = vec![
            write_image(dir.path(), "c.png", 900, 700),
            write_image(dir.path(), "a.jpg", 40, 40),
            write_image(dir.path(), "b.gif", 20, 20),
        ];

        let items = processor()
            .process(paths.clone(), 3, NoProgress)
            .await
            .unwrap();

        let got: Vec<&str> = items.iter().map(|i| i.path.as_str()).collect();
        let want: Vec<String> = paths
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        assert_eq!(got, want);
        assert_eq!(items[0].display_name, "c");
        assert_eq!(items[1].display_name, "a");
        assert!(items[0].thumbnail.starts_with("data:image/jpeg;base64,"));
        assert_eq!(items[0].id.len(), 64);
    }

    #[tokio::test]
    async fn test_unsupported_extensions_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let notes = dir.path().join("notes.txt");
        std::fs::write(&notes, b"hello").unwrap();
        let upper = write_image(dir.path(), "LOUD.PNG", 10, 10);
        let bmp = write_image(dir.path(), "legacy.bmp", 10, 10);

        let mut seen = Vec::new();
        let items = processor()
            .process(
                vec![notes, upper.clone(), bmp],
                2,
                |s: &ProgressSnapshot| seen.push(s.clone()),
            )
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].display_name, "LOUD");
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].total, 1);
        assert_eq!(seen[0].current.as_deref(), Some("LOUD.PNG"));
    }

    #[tokio::test]
    async fn test_progress_is_monotonic() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = (0..6)
            .map(|i| write_image(dir.path(), &format!("img{i}.png"), 30 + i * 20, 30))
            .collect();

        let mut seen = Vec::new();
        processor()
            .process(paths, 2, |s: &ProgressSnapshot| seen.push(s.clone()))
            .await
            .unwrap();

        let counts: Vec<usize> = seen.iter().map(|s| s.completed).collect();
        assert_eq!(counts, vec![1, 2, 3, 4, 5, 6]);
        assert!(seen.iter().all(|s| s.total == 6));
        let mut labels: Vec<String> = seen.into_iter().filter_map(|s| s.current).collect();
        labels.sort();
        assert_eq!(
            labels,
            vec!["img0.png", "img1.png", "img2.png", "img3.png", "img4.png", "img5.png"]
        );
    }

    #[tokio::test]
    async fn test_empty_input() {
        let mut calls = 0;
        let items = processor()
            .process(Vec::new(), 5, |_: &ProgressSnapshot| calls += 1)
            .await
            .unwrap();
        assert!(items.is_empty());
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn test_zero_concurrency_rejected() {
        let err = processor()
            .process(Vec::new(), 0, NoProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_corrupt_image_fails_batch() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_image(dir.path(), "good.png", 10, 10);
        let bad = dir.path().join("bad.jpg");
        std::fs::write(&bad, b"this is not a jpeg").unwrap();

        let err = processor()
            .process(vec![good, bad], 1, NoProgress)
            .await
            .unwrap_err();
        assert!(err.is_decode(), "unexpected error: {err}");
        assert!(err.path().unwrap().ends_with("bad.jpg"));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = processor()
            .process(vec![dir.path().join("gone.png")], 2, NoProgress)
            .await
            .unwrap_err();
        assert!(err.is_io(), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn test_settled_keeps_successes() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_image(dir.path(), "good.png", 10, 10);
        let bad = dir.path().join("bad.gif");
        std::fs::write(&bad, b"GIF89a but nothing else").unwrap();
        let other = write_image(dir.path(), "other.jpg", 12, 12);

        let mut seen = 0;
        let results = processor()
            .process_settled(vec![good, bad, other], 2, |_: &ProgressSnapshot| seen += 1)
            .await
            .unwrap();

        assert_eq!(seen, 3);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().display_name, "good");
        assert!(results[1].as_ref().unwrap_err().is_decode());
        assert_eq!(results[2].as_ref().unwrap().display_name, "other");
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_settled_failures_are_left_to_the_caller() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_image(dir.path(), "good.png", 10, 10);
        let bad = dir.path().join("bad.gif");
        std::fs::write(&bad, b"GIF89a but nothing else").unwrap();

        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let results = processor()
            .process_settled(vec![good, bad], 2, NoProgress)
            .await
            .unwrap();
        assert!(results[1].is_err());

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Settled 2 files (1 failed)"), "{output}");
        assert!(!output.contains("bad.gif"), "{output}");
    }

    #[tokio::test]
    async fn test_identical_content_shares_id() {
        let dir = tempfile::tempdir().unwrap();
        let original = write_image(dir.path(), "original.png", 16, 16);
        let copy = dir.path().join("copy.png");
        std::fs::copy(&original, &copy).unwrap();
        let different = write_image(dir.path(), "different.png", 16, 16);

        let items = processor()
            .process(vec![original, copy, different], 3, NoProgress)
            .await
            .unwrap();
        assert_eq!(items[0].id, items[1].id);
        assert_ne!(items[0].id, items[2].id);
    }

    #[tokio::test]
    async fn test_crc32_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_image(dir.path(), "a.png", 8, 8);

        let mut config = Config::default();
        config.hash.algorithm = DigestAlgorithm::Crc32;
        let items = BatchImageProcessor::new(&config)
            .process(vec![path], 1, NoProgress)
            .await
            .unwrap();
        assert_eq!(items[0].id.len(), 8);
    }

    #[tokio::test]
    async fn test_process_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "b.png", 10, 10);
        write_image(dir.path(), "a.jpeg", 10, 10);
        std::fs::write(dir.path().join("readme.md"), b"# photos").unwrap();

        let items = processor()
            .process_directory(dir.path(), 5, NoProgress)
            .await
            .unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.display_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_is_supported() {
        let p = processor();
        assert!(p.is_supported(Path::new("x/photo.JPG")));
        assert!(p.is_supported(Path::new("anim.gif")));
        assert!(!p.is_supported(Path::new("scan.tiff")));
        assert!(!p.is_supported(Path::new("no_extension")));
    }
}
