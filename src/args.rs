use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, UsageError};

pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 31;

pub const USAGE: &str = "\
Usage: convert-footage [-h] [-e] [-q N] [-c BACKEND] <file-or-folder>

Creates an editing-friendly copy (MPEG-4 video, PCM audio, .mov) next to each
video. Folders are searched recursively and only files detected as video/* are
converted. The copy is named <file>_conv.mov and is never overwritten.

Options:
  -h          Show this help and exit
  -e          Show usage examples and exit
  -q N        Quality from 1 (best) to 31 (smallest file), default 1
  -c BACKEND  File type detection: 'file' (default) or 'exiftool'";

pub const EXAMPLES: &str = "\
Examples:
  Convert a single clip at the best quality:
    convert-footage clip.mp4

  Convert every video below a folder:
    convert-footage ~/Footage/2024-06-Trip

  Trade quality for smaller files:
    convert-footage -q 5 ~/Footage/2024-06-Trip

  Detect file types with exiftool instead of file(1):
    convert-footage -c exiftool ~/Footage";

/// Quality knob handed to the transcoder, 1 (best) to 31
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quality(u8);

impl Quality {
    /// Parse a quality literal. Only plain decimal digits in range are accepted.
    pub fn parse(raw: &str) -> Result<Self, UsageError> {
        let invalid = || UsageError::InvalidQuality(raw.to_string());

        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        // Overflowing literals are out of range anyway
        let value: u32 = raw.parse().map_err(|_| invalid())?;
        if value < MIN_QUALITY as u32 || value > MAX_QUALITY as u32 {
            return Err(invalid());
        }

        Ok(Quality(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Quality(MIN_QUALITY)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Backend used to sniff MIME types during folder scans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierKind {
    #[default]
    File,
    ExifTool,
}

impl ClassifierKind {
    pub fn parse(raw: &str) -> Result<Self, UsageError> {
        match raw {
            "file" => Ok(ClassifierKind::File),
            "exiftool" => Ok(ClassifierKind::ExifTool),
            other => Err(UsageError::InvalidClassifier(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub target: PathBuf,
    pub quality: Quality,
    pub classifier: ClassifierKind,
}

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Examples,
    Convert(Config),
}

/// What the target path turned out to be on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    File,
    Directory,
}

impl Target {
    pub fn resolve(path: &Path) -> Result<Self, ConvertError> {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => Ok(Target::Directory),
            Ok(meta) if meta.is_file() => Ok(Target::File),
            _ => Err(ConvertError::NotFound(path.to_path_buf())),
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "convert-footage",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct RawArgs {
    #[arg(short = 'h', action = ArgAction::SetTrue)]
    help: bool,

    #[arg(short = 'e', action = ArgAction::SetTrue)]
    examples: bool,

    #[arg(short = 'q', value_name = "N", allow_hyphen_values = true)]
    quality: Option<String>,

    #[arg(short = 'c', value_name = "BACKEND", allow_hyphen_values = true)]
    classifier: Option<String>,

    #[arg(value_name = "FILE_OR_FOLDER")]
    targets: Vec<PathBuf>,
}

/// Parse the full argument list (program name first) into an invocation
pub fn parse_args<I, T>(argv: I) -> Result<Invocation, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let raw = RawArgs::try_parse_from(argv).map_err(translate_clap_error)?;

    let quality = match raw.quality.as_deref() {
        Some(q) => Quality::parse(q)?,
        None => Quality::default(),
    };
    let classifier = match raw.classifier.as_deref() {
        Some(c) => ClassifierKind::parse(c)?,
        None => ClassifierKind::default(),
    };

    if raw.help {
        return Ok(Invocation::Help);
    }
    if raw.examples {
        return Ok(Invocation::Examples);
    }

    let mut targets = raw.targets.into_iter();
    let target = targets.next().ok_or(UsageError::MissingTarget)?;
    if let Some(extra) = targets.next() {
        return Err(UsageError::UnexpectedArgument(extra.display().to_string()));
    }

    Ok(Invocation::Convert(Config {
        target,
        quality,
        classifier,
    }))
}

fn translate_clap_error(err: clap::Error) -> UsageError {
    let invalid_arg = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => arg.split_whitespace().next().map(str::to_string),
        _ => None,
    };

    match (err.kind(), invalid_arg) {
        (ErrorKind::UnknownArgument, Some(arg)) => UsageError::InvalidOption(arg),
        (ErrorKind::InvalidValue, Some(arg)) => UsageError::MissingValue(arg),
        _ => {
            let rendered = err.to_string();
            let first_line = rendered.lines().next().unwrap_or_default();
            UsageError::Other(first_line.trim_start_matches("error: ").to_string())
        }
    }
}
