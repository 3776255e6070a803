use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::args::Quality;
use crate::error::{ConvertError, Result};

/// MPEG-4 Part 2 video, quality expressed as qscale 1..=31
const VIDEO_CODEC: &str = "mpeg4";
/// Uncompressed PCM audio
const AUDIO_CODEC: &str = "pcm_s16le";

/// Performs the actual re-encoding of one file
pub trait Transcoder {
    fn transcode(&mut self, input: &Path, output: &Path, quality: Quality) -> Result<()>;
}

/// Runs the external `ffmpeg` binary, one blocking process per file
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    program: PathBuf,
}

impl Ffmpeg {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Ffmpeg {
            program: program.into(),
        }
    }

    /// Build the full ffmpeg command line for one conversion
    pub fn command(&self, input: &Path, output: &Path, quality: Quality) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-nostdin")
            .arg("-i")
            .arg(input)
            .args(["-c:v", VIDEO_CODEC])
            .arg("-q:v")
            .arg(quality.to_string())
            .args(["-c:a", AUDIO_CODEC])
            .arg(output);
        cmd
    }
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Ffmpeg::new("ffmpeg")
    }
}

impl Transcoder for Ffmpeg {
    fn transcode(&mut self, input: &Path, output: &Path, quality: Quality) -> Result<()> {
        let status = self
            .command(input, output, quality)
            .status()
            .map_err(|source| ConvertError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        check_status(input, status)
    }
}

fn check_status(input: &Path, status: ExitStatus) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(ConvertError::TranscoderFailed {
            input: input.to_path_buf(),
            code: status.code(),
        })
    }
}
