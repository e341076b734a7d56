use anyhow::Context;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use log::{debug, info, warn};
use std::fs;
use std::path::Path;

/// Compiled `.gitignore` rules of the scan root.
///
/// Paths handed to [`IgnoreRuleSet::is_ignored`] are relative to the root
/// and use `/` as separator.
pub struct IgnoreRuleSet {
    matcher: Gitignore,
}

impl IgnoreRuleSet {
    /// A rule set that excludes nothing.
    pub fn empty() -> Self {
        Self {
            matcher: Gitignore::empty(),
        }
    }

    /// Compiles gitignore text as if it lived in `root/.gitignore`.
    pub fn from_content(root: &Path, content: &str) -> anyhow::Result<Self> {
        let source = root.join(".gitignore");
        let mut builder = GitignoreBuilder::new(root);

        // Git never rejects a pattern; a glob that fails to compile just matches nothing
        for line in content.lines() {
            if let Err(e) = builder.add_line(Some(source.clone()), line) {
                warn!("Skipping invalid .gitignore pattern {:?}: {}", line, e);
            }
        }

        let matcher = builder.build()?;
        Ok(Self { matcher })
    }

    pub fn len(&self) -> usize {
        self.matcher.num_ignores() as usize + self.matcher.num_whitelists() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.matcher.is_empty()
    }

    /// Whether `rel_path` or any of its parent directories is excluded.
    pub fn is_ignored(&self, rel_path: &str, is_dir: bool) -> bool {
        if rel_path.is_empty() || self.matcher.is_empty() {
            return false;
        }

        let ignored = self
            .matcher
            .matched_path_or_any_parents(rel_path, is_dir)
            .is_ignore();
        if ignored {
            debug!("Path {} matches .gitignore", rel_path);
        }
        ignored
    }
}

/// Loads `<root>/.gitignore`, or an empty rule set when there is none.
pub fn load_gitignore(root: &Path) -> anyhow::Result<IgnoreRuleSet> {
    let gitignore_path = root.join(".gitignore");

    if !gitignore_path.exists() {
        debug!("No .gitignore file found at: {}", gitignore_path.display());
        return Ok(IgnoreRuleSet::empty());
    }

    debug!("Parsing .gitignore file at: {}", gitignore_path.display());
    let content = fs::read_to_string(&gitignore_path)
        .with_context(|| format!("Failed to read {}", gitignore_path.display()))?;

    let rules = IgnoreRuleSet::from_content(root, &content)?;
    info!("Loaded {} patterns from .gitignore", rules.len());
    Ok(rules)
}
