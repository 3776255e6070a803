use std::path::{Path, PathBuf};

/// Appended to the full source path to name the converted copy
pub const OUTPUT_SUFFIX: &str = "_conv.mov";

/// Derive the output path for a source file: `<source>_conv.mov`.
///
/// The suffix is appended to the whole path, the original extension stays in place.
pub fn output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(OUTPUT_SUFFIX);
    PathBuf::from(name)
}

/// Check whether a path looks like something this tool produced
pub fn is_conversion_result(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().ends_with(OUTPUT_SUFFIX))
        .unwrap_or(false)
}
