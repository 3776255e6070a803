use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

use crate::args::Quality;
use crate::error::Result;
use crate::filename::{is_conversion_result, output_path};
use crate::report;
use crate::transcoder::Transcoder;

/// What happened to a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Converted { output: PathBuf },
    /// The input is itself a `_conv.mov` result
    SkippedResult,
    /// An output already exists. Only its presence matters, never its age.
    SkippedExisting {
        output: PathBuf,
        modified: Option<DateTime<Local>>,
    },
}

/// Convert one file unless it is a previous result or was already converted.
///
/// A transcoder failure is returned as is; nothing is retried or cleaned up.
pub fn convert_file<T: Transcoder + ?Sized>(
    input: &Path,
    quality: Quality,
    transcoder: &mut T,
) -> Result<Outcome> {
    let output = output_path(input);

    if is_conversion_result(input) {
        report::hint(format!(
            "Skipping {}: it is already a converted file.",
            input.display()
        ));
        return Ok(Outcome::SkippedResult);
    }

    if output.exists() {
        let modified = fs::metadata(&output)
            .and_then(|meta| meta.modified())
            .ok()
            .map(DateTime::<Local>::from);
        report::hint(format!(
            "Skipping {}: {} already exists{}.",
            input.display(),
            output.display(),
            describe_modified(modified.as_ref())
        ));
        return Ok(Outcome::SkippedExisting { output, modified });
    }

    report::action(format!(
        "Converting {} -> {} (quality {})",
        input.display(),
        output.display(),
        quality
    ));
    transcoder.transcode(input, &output, quality)?;

    Ok(Outcome::Converted { output })
}

fn describe_modified(modified: Option<&DateTime<Local>>) -> String {
    match modified {
        Some(time) => format!(" (written {})", time.format("%Y-%m-%d %H:%M")),
        None => String::new(),
    }
}
