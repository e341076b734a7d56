use std::path::PathBuf;

/// Extensions the operator asked for, each stored with its leading dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionAllowList {
    extensions: Vec<String>,
}

impl ExtensionAllowList {
    /// Parses a comma separated list such as `"ts, .tsx,,  css "`.
    ///
    /// Tokens are trimmed, empty tokens are dropped and a missing leading
    /// dot is added.
    pub fn parse(input: &str) -> Self {
        let extensions = input
            .split(',')
            .map(str::trim)
            .filter(|ext| !ext.is_empty())
            .map(|ext| {
                if ext.starts_with('.') {
                    ext.to_string()
                } else {
                    format!(".{}", ext)
                }
            })
            .collect();

        Self { extensions }
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.extensions.iter().any(|ext| ext == extension)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.extensions
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

/// Extension of a file name: everything from the last `.`, dot included.
///
/// Dot-files such as `.gitignore` have no extension.
pub fn file_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[idx..],
        _ => "",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct ContextConfig {
    pub root_path: PathBuf,
    pub extensions: ExtensionAllowList,
}
