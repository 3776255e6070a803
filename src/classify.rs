use exiftool::ExifTool;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::args::ClassifierKind;
use crate::error::{ConvertError, Result};

/// Reported when a backend has no opinion about a file
pub const UNKNOWN_MIME: &str = "application/octet-stream";

/// Maps a file to its MIME type
pub trait Classifier {
    fn classify(&mut self, path: &Path) -> Result<String>;
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn classify(&mut self, path: &Path) -> Result<String> {
        (**self).classify(path)
    }
}

pub fn is_video(mime: &str) -> bool {
    mime.starts_with("video/")
}

/// Build the classifier backend selected on the command line
pub fn from_kind(kind: ClassifierKind) -> Box<dyn Classifier> {
    match kind {
        ClassifierKind::File => Box::new(FileCommand::default()),
        ClassifierKind::ExifTool => Box::new(ExifToolClassifier::default()),
    }
}

/// Content sniffing through `file --brief --mime-type`
#[derive(Debug, Clone)]
pub struct FileCommand {
    program: PathBuf,
}

impl FileCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        FileCommand {
            program: program.into(),
        }
    }
}

impl Default for FileCommand {
    fn default() -> Self {
        FileCommand::new("file")
    }
}

impl Classifier for FileCommand {
    fn classify(&mut self, path: &Path) -> Result<String> {
        let output = Command::new(&self.program)
            .arg("--brief")
            .arg("--mime-type")
            .arg(path)
            .output()
            .map_err(|source| ConvertError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(ConvertError::Classify {
                path: path.to_path_buf(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Content sniffing through a persistent exiftool process.
///
/// The process is started on first use so that single-file runs never need exiftool.
#[derive(Default)]
pub struct ExifToolClassifier {
    exiftool: Option<ExifTool>,
}

#[derive(Debug, Deserialize)]
struct MimeRecord {
    #[serde(rename = "MIMEType")]
    mime_type: Option<String>,
}

impl Classifier for ExifToolClassifier {
    fn classify(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_str().ok_or_else(|| ConvertError::Classify {
            path: path.to_path_buf(),
            reason: "path contains invalid UTF-8".to_string(),
        })?;

        if self.exiftool.is_none() {
            let tool = ExifTool::new().map_err(|e| ConvertError::ExifTool(e.to_string()))?;
            self.exiftool = Some(tool);
        }
        let exiftool = match self.exiftool.as_mut() {
            Some(tool) => tool,
            None => return Err(ConvertError::ExifTool("exiftool is not running".to_string())),
        };

        let args = vec!["-MIMEType", path_str];
        let output = exiftool
            .json_execute(&args)
            .map_err(|e| ConvertError::Classify {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        mime_from_exiftool_json(output).map_err(|reason| ConvertError::Classify {
            path: path.to_path_buf(),
            reason,
        })
    }
}

/// Pull the MIME type out of exiftool's JSON array (one object per file)
fn mime_from_exiftool_json(output: Value) -> std::result::Result<String, String> {
    let records: Vec<MimeRecord> = serde_json::from_value(output)
        .map_err(|e| format!("Failed to parse exiftool JSON output: {}", e))?;

    Ok(records
        .into_iter()
        .next()
        .and_then(|record| record.mime_type)
        .unwrap_or_else(|| UNKNOWN_MIME.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_video() {
        assert!(is_video("video/mp4"));
        assert!(is_video("video/quicktime"));
        assert!(!is_video("audio/mpeg"));
        assert!(!is_video("image/jpeg"));
        assert!(!is_video("application/octet-stream"));
        assert!(!is_video("Video/mp4"));
        assert!(!is_video(""));
    }

    #[test]
    fn test_mime_from_exiftool_json() {
        let output = json!([{ "SourceFile": "clip.mp4", "MIMEType": "video/mp4" }]);
        assert_eq!(mime_from_exiftool_json(output).unwrap(), "video/mp4");
    }

    #[test]
    fn test_mime_from_exiftool_json_without_type() {
        let output = json!([{ "SourceFile": "notes.bin" }]);
        assert_eq!(mime_from_exiftool_json(output).unwrap(), UNKNOWN_MIME);
        assert_eq!(mime_from_exiftool_json(json!([])).unwrap(), UNKNOWN_MIME);
    }

    #[test]
    fn test_mime_from_exiftool_json_garbage() {
        assert!(mime_from_exiftool_json(json!({ "error": true })).is_err());
    }

    #[test]
    fn test_file_command_missing_program() {
        let mut classifier = FileCommand::new("/nonexistent/file-command");
        let err = classifier.classify(Path::new("clip.mp4")).unwrap_err();
        assert!(matches!(err, ConvertError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_command_failure_status() {
        let mut classifier = FileCommand::new("false");
        let err = classifier.classify(Path::new("clip.mp4")).unwrap_err();
        assert!(matches!(err, ConvertError::Classify { .. }));
    }
}
