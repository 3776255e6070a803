use std::path::Path;

use crate::args::{Config, Quality, Target};
use crate::classify::Classifier;
use crate::converter::{convert_file, Outcome};
use crate::discovery::VideoFiles;
use crate::error::Result;
use crate::report;
use crate::transcoder::Transcoder;

pub const NOTHING_TO_CONVERT: &str = "Couldn't find any files to convert.";

/// Drives one run: resolves the target, finds videos and converts them one by one.
///
/// Processing is strictly sequential and stops at the first error. Outputs written
/// before the error stay on disk.
pub struct Processor<C, T> {
    classifier: C,
    transcoder: T,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// Files handed to the converter
    pub files: usize,
    pub converted: usize,
    pub skipped_existing: usize,
    pub skipped_results: usize,
}

impl RunStats {
    fn record(&mut self, outcome: &Outcome) {
        self.files += 1;
        match outcome {
            Outcome::Converted { .. } => self.converted += 1,
            Outcome::SkippedExisting { .. } => self.skipped_existing += 1,
            Outcome::SkippedResult => self.skipped_results += 1,
        }
    }
}

impl<C: Classifier, T: Transcoder> Processor<C, T> {
    pub fn new(classifier: C, transcoder: T) -> Self {
        Processor {
            classifier,
            transcoder,
        }
    }

    pub fn run(&mut self, config: &Config) -> Result<RunStats> {
        match Target::resolve(&config.target)? {
            Target::Directory => self.process_directory(&config.target, config.quality),
            Target::File => self.process_file(&config.target, config.quality),
        }
    }

    pub fn process_directory(&mut self, root: &Path, quality: Quality) -> Result<RunStats> {
        let mut stats = RunStats::default();

        for video in VideoFiles::new(root, &mut self.classifier) {
            let video = video?;
            let outcome = convert_file(&video, quality, &mut self.transcoder)?;
            stats.record(&outcome);
        }

        if stats.files == 0 {
            report::hint(NOTHING_TO_CONVERT);
        } else {
            print_summary(&stats);
        }

        Ok(stats)
    }

    pub fn process_file(&mut self, file: &Path, quality: Quality) -> Result<RunStats> {
        let mut stats = RunStats::default();
        let outcome = convert_file(file, quality, &mut self.transcoder)?;
        stats.record(&outcome);
        Ok(stats)
    }
}

fn print_summary(stats: &RunStats) {
    report::plain("");
    report::plain(format!("Videos found: {}", stats.files));
    report::plain(format!("Converted: {}", stats.converted));
    if stats.skipped_existing > 0 {
        report::plain(format!("Skipped (already converted): {}", stats.skipped_existing));
    }
    if stats.skipped_results > 0 {
        report::plain(format!("Skipped (conversion results): {}", stats.skipped_results));
    }
}
