use crate::domain::models::FileContent;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Reads every listed file through `file_reader`.
///
/// A failed read never aborts the run: the entry gets an
/// `Error reading file: ...` placeholder instead of its content.
pub fn load_file_contents(
    root: &Path,
    files: &[String],
    file_reader: impl Fn(&PathBuf) -> anyhow::Result<String>,
) -> Vec<FileContent> {
    info!("Loading contents of {} files", files.len());

    let contents: Vec<FileContent> = files
        .iter()
        .map(|name| {
            let path = root.join(name);
            debug!("Reading file: {}", path.display());
            let content = match file_reader(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!("Error reading file {}: {}", path.display(), e);
                    format!("Error reading file: {}", e)
                }
            };

            FileContent {
                name: name.clone(),
                content,
            }
        })
        .collect();

    info!("Loaded {} files", contents.len());
    contents
}
