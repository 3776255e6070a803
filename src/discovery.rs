use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::classify::{is_video, Classifier};
use crate::error::Result;

/// Lazily walks a folder tree and yields the files classified as video.
///
/// Only regular files are classified; symlinks are not followed. Entries are
/// visited in file-name order within each directory. Errors from the walk or the
/// classifier are yielded as they happen and the caller is expected to stop there.
pub struct VideoFiles<'a, C: ?Sized> {
    walker: walkdir::IntoIter,
    classifier: &'a mut C,
}

impl<'a, C: Classifier + ?Sized> VideoFiles<'a, C> {
    pub fn new(root: &Path, classifier: &'a mut C) -> Self {
        VideoFiles {
            walker: WalkDir::new(root).sort_by_file_name().into_iter(),
            classifier,
        }
    }
}

impl<C: Classifier + ?Sized> Iterator for VideoFiles<'_, C> {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(err.into())),
            };

            if !entry.file_type().is_file() {
                continue;
            }

            match self.classifier.classify(entry.path()) {
                Ok(mime) if is_video(&mime) => return Some(Ok(entry.into_path())),
                Ok(_) => continue,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::ConvertError;
    use std::fs;

    /// Classifies by extension and remembers every path it was asked about
    #[derive(Default)]
    pub(crate) struct ExtensionClassifier {
        pub seen: Vec<PathBuf>,
        pub fail_on: Option<String>,
    }

    impl Classifier for ExtensionClassifier {
        fn classify(&mut self, path: &Path) -> Result<String> {
            self.seen.push(path.to_path_buf());

            let name = path.file_name().unwrap().to_string_lossy().to_string();
            if self.fail_on.as_deref() == Some(name.as_str()) {
                return Err(ConvertError::Classify {
                    path: path.to_path_buf(),
                    reason: "permission denied".to_string(),
                });
            }

            let mime = match path.extension().and_then(|e| e.to_str()) {
                Some("mp4") => "video/mp4",
                Some("mov") => "video/quicktime",
                Some("mkv") => "video/x-matroska",
                Some("jpg") => "image/jpeg",
                Some("wav") => "audio/x-wav",
                _ => "text/plain",
            };
            Ok(mime.to_string())
        }
    }

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    fn names(root: &Path, paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_finds_videos_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("b.mp4"));
        touch(&root.join("a.jpg"));
        touch(&root.join("notes.txt"));
        touch(&root.join("day1/c.mov"));
        touch(&root.join("day1/deep/d.mkv"));
        touch(&root.join("day1/deep/e.wav"));

        let mut classifier = ExtensionClassifier::default();
        let videos: Vec<PathBuf> = VideoFiles::new(root, &mut classifier)
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(
            names(root, &videos),
            vec!["b.mp4", "day1/c.mov", "day1/deep/d.mkv"]
        );
        // Directories are never handed to the classifier
        assert_eq!(classifier.seen.len(), 6);
    }

    #[test]
    fn test_empty_folder() {
        let dir = tempfile::tempdir().unwrap();
        let mut classifier = ExtensionClassifier::default();

        assert_eq!(VideoFiles::new(dir.path(), &mut classifier).count(), 0);
        assert!(classifier.seen.is_empty());
    }

    #[test]
    fn test_classifier_error_is_yielded() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.mp4"));
        touch(&dir.path().join("b.mp4"));

        let mut classifier = ExtensionClassifier {
            fail_on: Some("a.mp4".to_string()),
            ..Default::default()
        };
        let first = VideoFiles::new(dir.path(), &mut classifier).next().unwrap();

        assert!(matches!(first, Err(ConvertError::Classify { .. })));
    }

    #[test]
    fn test_missing_root_is_a_walk_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut classifier = ExtensionClassifier::default();
        let first = VideoFiles::new(&dir.path().join("gone"), &mut classifier)
            .next()
            .unwrap();

        assert!(matches!(first, Err(ConvertError::Walk(_))));
    }
}
