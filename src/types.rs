use std::fmt;
use std::path::PathBuf;

/// Configuration for a verification run
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// File extensions to collect, without the leading dot
    pub extensions: Vec<String>,
    /// Whether to descend into subdirectories
    pub recursive: bool,
    /// Maximum number of threads to use for verification
    pub max_threads: usize,
    /// Whether to draw a progress bar
    pub show_progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["inc".to_string()],
            recursive: true,
            max_threads: num_cpus::get(),
            show_progress: true,
        }
    }
}

/// What happened to a single file during verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// `fix(parse(text))` gave the text back
    Passed,
    /// The file could not be read
    Unreadable(String),
    /// The scanner rejected the file
    ParseFailed(String),
    /// The scanner could not write the parsed value back
    FixFailed(String),
    /// The rewritten text differs from the file, starting at `offset`
    Mismatch { offset: usize },
}

impl FileOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, FileOutcome::Passed)
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Passed => write!(f, "ok"),
            FileOutcome::Unreadable(reason) => write!(f, "unreadable: {}", reason),
            FileOutcome::ParseFailed(reason) => write!(f, "parse failed: {}", reason),
            FileOutcome::FixFailed(reason) => write!(f, "fix failed: {}", reason),
            FileOutcome::Mismatch { offset } => write!(f, "round trip differs at byte {}", offset),
        }
    }
}

/// Verification result of one file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

/// Result of verifying a set of files
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    /// Reports, in the order the files were collected
    pub files: Vec<FileReport>,
}

impl VerifyReport {
    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn passed(&self) -> usize {
        self.files.iter().filter(|file| file.outcome.is_passed()).count()
    }

    /// Files that did not survive the round trip
    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|file| !file.outcome.is_passed())
    }

    pub fn is_success(&self) -> bool {
        self.files.iter().all(|file| file.outcome.is_passed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let report = VerifyReport {
            files: vec![
                FileReport { path: "a.inc".into(), outcome: FileOutcome::Passed },
                FileReport { path: "b.inc".into(), outcome: FileOutcome::Mismatch { offset: 3 } },
            ],
        };

        assert_eq!(report.total(), 2);
        assert_eq!(report.passed(), 1);
        assert!(!report.is_success());
        let failed: Vec<_> = report.failures().map(|file| file.path.clone()).collect();
        assert_eq!(failed, vec![PathBuf::from("b.inc")]);
    }

    #[test]
    fn test_empty_report_is_success() {
        assert!(VerifyReport::default().is_success());
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(FileOutcome::Mismatch { offset: 12 }.to_string(), "round trip differs at byte 12");
        assert_eq!(FileOutcome::ParseFailed("no token".into()).to_string(), "parse failed: no token");
    }
}
