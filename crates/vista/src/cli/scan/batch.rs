//! Running a scan: progress bar, output, and summary.

use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use vista_core::{
    BatchImageProcessor, BatchStats, Config, GalleryItem, OutputFormat, OutputWriter,
    ProgressSink, ProgressSnapshot,
};

use super::ScanArgs;

/// Process the scan input and write the gallery.
pub async fn run_scan(
    args: &ScanArgs,
    config: &Config,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let processor = BatchImageProcessor::new(config);
    let concurrency = config.processing.concurrency;

    let listed = processor.discover(&args.input);
    let listed_count = listed.len();
    let files = processor.filter_supported(listed);
    let ignored = listed_count - files.len();

    if files.is_empty() {
        tracing::warn!("No supported images found in {:?}", args.input);
    } else {
        tracing::info!(
            "Scanning {} images ({} other files ignored) with concurrency {}",
            files.len(),
            ignored,
            concurrency
        );
    }

    let progress = create_progress_bar(files.len() as u64);
    let sink = BarSink::new(progress.clone());
    let start = Instant::now();

    let mut stats = BatchStats {
        ignored,
        ..BatchStats::default()
    };

    let items = if args.keep_going {
        let results = processor
            .process_settled(files, concurrency, sink)
            .await?;
        let mut items = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(item) => items.push(item),
                Err(e) => {
                    stats.failed += 1;
                    tracing::error!("Failed: {}", e);
                }
            }
        }
        items
    } else {
        match processor.process(files, concurrency, sink).await {
            Ok(items) => items,
            Err(e) => {
                progress.abandon_with_message("aborted");
                return Err(e).context("Scan aborted; rerun with --keep-going to skip bad images");
            }
        }
    };

    stats.succeeded = items.len();
    stats.total_seconds = start.elapsed().as_secs_f64();
    progress.finish_and_clear();

    write_gallery(args, &items, format, config.output.pretty)?;
    print_summary(&stats);

    Ok(())
}

/// Write the gallery to the output file, or stdout.
fn write_gallery(
    args: &ScanArgs,
    items: &[GalleryItem],
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<()> {
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Cannot create output file {}", path.display()))?;
            let mut writer = OutputWriter::new(BufWriter::new(file), format, pretty);
            writer.write_batch(items)?;
            writer.finish()?;
            tracing::info!("Output written to {:?}", path);
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = OutputWriter::new(stdout.lock(), format, pretty);
            writer.write_batch(items)?;
            writer.finish()?;
        }
    }
    Ok(())
}

/// Drives an `indicatif` bar from pipeline progress snapshots.
struct BarSink {
    bar: ProgressBar,
    start: Instant,
}

impl BarSink {
    fn new(bar: ProgressBar) -> Self {
        Self {
            bar,
            start: Instant::now(),
        }
    }
}

impl ProgressSink for BarSink {
    fn on_progress(&mut self, snapshot: &ProgressSnapshot) {
        self.bar.set_position(snapshot.completed as u64);

        let elapsed = self.start.elapsed().as_secs_f64();
        let rate = if elapsed > 0.0 {
            snapshot.completed as f64 / elapsed
        } else {
            0.0
        };
        let current = snapshot.current.as_deref().unwrap_or("");
        self.bar.set_message(format!("{:.1} img/sec  {}", rate, current));
    }
}

/// Create a progress bar for a scan. Drawn on stderr.
fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    ) {
        pb.set_style(style.progress_chars("##-"));
    }
    pb.set_message("starting...");
    pb
}

/// Print a formatted summary table after a scan.
fn print_summary(stats: &BatchStats) {
    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Succeeded:    {:>8}", stats.succeeded);
    if stats.failed > 0 {
        eprintln!("    Failed:       {:>8}", stats.failed);
    }
    if stats.ignored > 0 {
        eprintln!("    Ignored:      {:>8}", stats.ignored);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Duration:     {:>7.1}s", stats.total_seconds);
    eprintln!("    Rate:         {:>7.1} img/sec", stats.rate());
    eprintln!("  ====================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_png(dir: &Path, name: &str) {
        image::RgbImage::from_pixel(32, 24, image::Rgb([200, 100, 50]))
            .save(dir.join(name))
            .unwrap();
    }

    #[test]
    fn test_bar_sink_tracks_position() {
        let bar = ProgressBar::hidden();
        bar.set_length(3);
        let mut sink = BarSink::new(bar.clone());

        sink.on_progress(&ProgressSnapshot {
            completed: 2,
            total: 3,
            current: Some("b.png".into()),
        });

        assert_eq!(bar.position(), 2);
        assert!(bar.message().ends_with("b.png"));
    }

    #[tokio::test]
    async fn test_scan_writes_gallery_file() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "b.png");
        write_png(dir.path(), "a.png");
        std::fs::write(dir.path().join("notes.txt"), b"skip me").unwrap();
        let output = dir.path().join("gallery.json");

        let args = ScanArgs {
            input: dir.path().to_path_buf(),
            output: Some(output.clone()),
            ..ScanArgs::default()
        };
        let config = Config::default();
        run_scan(&args, &config, OutputFormat::Json).await.unwrap();

        let items: Vec<GalleryItem> =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.display_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_scan_aborts_on_bad_image() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "good.png");
        std::fs::write(dir.path().join("bad.png"), b"nope").unwrap();
        let output = dir.path().join("gallery.json");

        let args = ScanArgs {
            input: dir.path().to_path_buf(),
            output: Some(output.clone()),
            ..ScanArgs::default()
        };
        let err = run_scan(&args, &Config::default(), OutputFormat::Json)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("--keep-going"));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_scan_keep_going_writes_survivors() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "good.png");
        std::fs::write(dir.path().join("bad.png"), b"nope").unwrap();
        let output = dir.path().join("gallery.jsonl");

        let args = ScanArgs {
            input: dir.path().to_path_buf(),
            output: Some(output.clone()),
            keep_going: true,
            ..ScanArgs::default()
        };
        run_scan(&args, &Config::default(), OutputFormat::JsonLines)
            .await
            .unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 1);
        let item: GalleryItem = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(item.display_name, "good");
    }
}
