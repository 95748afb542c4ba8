use std::path::Path;

/// Name seed for chunk and splitfile names: the final component of the
/// input path, so derived files always land inside the output directory.
pub fn main_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Chunk filename for the zero-based index `n`. Padding is at least three
/// digits and widens naturally past index 999. The format is parsed by
/// other tools; keep it stable.
pub fn chunk_filename(main: &str, n: usize) -> String {
    format!("{}.split-{:03}", main, n)
}

/// Splitfile (manifest) filename for a main file.
pub fn splitfile_filename(main: &str) -> String {
    format!("{}.split", main)
}
