use crate::domain::models::FileContent;
use log::debug;

const HEADER: &str =
    "Below is the context of the project files that will be used to answer the following question:\n\n";
const TREE_LABEL: &str = "===== Project File Tree =====\n";
const CONTENTS_LABEL: &str = "===== File Contents =====\n";
const FILE_SEPARATOR: &str = "..........................................................";

/// Assembles the prompt document from the rendered tree and file contents.
///
/// Contents are embedded verbatim, in the order given.
pub fn format_output(file_tree: &str, files: &[FileContent]) -> String {
    debug!("Formatting prompt with {} files", files.len());
    let mut result = String::new();

    result.push_str(HEADER);
    result.push_str(TREE_LABEL);
    result.push_str(file_tree);
    result.push('\n');
    result.push_str(CONTENTS_LABEL);

    for file in files {
        result.push_str(&format!("\n--- File: {} ---\n", file.name));
        result.push_str(&file.content);
        result.push('\n');
        result.push_str(FILE_SEPARATOR);
        result.push('\n');
    }

    result
}
