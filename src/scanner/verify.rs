use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use parser_scanner::Scanner;
use rayon::prelude::*;

use crate::types::{FileOutcome, FileReport, ScanConfig, VerifyReport};

/// Check that `fix(content, parse(content))` gives `content` back
pub fn verify_text(scanner: &Scanner, content: &str) -> FileOutcome {
    let value = match scanner.parse(content) {
        Ok(value) => value,
        Err(e) => return FileOutcome::ParseFailed(e.to_string()),
    };
    let fixed = match scanner.fix(content, &value) {
        Ok(fixed) => fixed,
        Err(e) => return FileOutcome::FixFailed(e.to_string()),
    };

    if fixed == content {
        FileOutcome::Passed
    } else {
        let offset = content
            .bytes()
            .zip(fixed.bytes())
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| content.len().min(fixed.len()));
        FileOutcome::Mismatch { offset }
    }
}

/// Round-trip a single file
pub fn verify_file(scanner: &Scanner, path: &Path) -> FileOutcome {
    match fs::read_to_string(path) {
        Ok(content) => verify_text(scanner, &content),
        Err(e) => FileOutcome::Unreadable(e.to_string()),
    }
}

fn progress_bar(len: usize, config: &ScanConfig) -> Result<ProgressBar> {
    if !config.show_progress {
        return Ok(ProgressBar::hidden());
    }

    let progress = ProgressBar::new(len as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    progress.set_message("Verifying resource files");
    Ok(progress)
}

/// Round-trip every file in parallel, sharing one scanner
pub fn verify_files(scanner: &Scanner, files: &[PathBuf], config: &ScanConfig) -> Result<VerifyReport> {
    info!("Verifying {} files with {} threads", files.len(), config.max_threads);
    let start_time = Instant::now();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.max_threads)
        .build()?;
    let progress = progress_bar(files.len(), config)?;

    let reports: Vec<FileReport> = pool.install(|| {
        files
            .par_iter()
            .progress_with(progress.clone())
            .map(|path| {
                let outcome = verify_file(scanner, path);
                debug!("{}: {}", path.display(), outcome);
                FileReport { path: path.clone(), outcome }
            })
            .collect()
    });

    let report = VerifyReport { files: reports };
    progress.finish_with_message(format!("Verified {} files", report.total()));

    for failure in report.failures() {
        warn!("{}: {}", failure.path.display(), failure.outcome);
    }
    info!(
        "{} of {} files survived the round trip in {} ms",
        report.passed(),
        report.total(),
        start_time.elapsed().as_millis()
    );

    Ok(report)
}
