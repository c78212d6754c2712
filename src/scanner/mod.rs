
mod collector;
mod parser_integration;
mod verify;

use std::path::Path;

use anyhow::Result;
use log::info;
use parser_scanner::Scanner;

use crate::types::{ScanConfig, VerifyReport};

pub use collector::{collect_resource_files, has_allowed_extension};
pub use parser_integration::{fix_resource_file, parse_resource_file, write_resource_file};
pub use verify::{verify_file, verify_files, verify_text};

/// Round-trip verifier for a directory of resource files
pub struct ResourceScanner<'a> {
    /// Directory containing the files to verify
    input_dir: &'a Path,
    /// Scanner shared by every file
    scanner: &'a Scanner,
    /// Configuration options
    config: ScanConfig,
}

impl<'a> ResourceScanner<'a> {
    pub fn new(input_dir: &'a Path, scanner: &'a Scanner) -> Self {
        Self::with_config(input_dir, scanner, ScanConfig::default())
    }

    pub fn with_config(input_dir: &'a Path, scanner: &'a Scanner, config: ScanConfig) -> Self {
        Self {
            input_dir,
            scanner,
            config,
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Collect the files of the input directory and verify them
    pub fn verify(&self) -> Result<VerifyReport> {
        let files = collect_resource_files(self.input_dir, &self.config)?;
        if files.is_empty() {
            info!(
                "No files with extensions {:?} in {}",
                self.config.extensions,
                self.input_dir.display()
            );
        }
        verify_files(self.scanner, &files, &self.config)
    }
}
