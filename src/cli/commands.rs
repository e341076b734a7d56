use crate::core::content_loader::load_file_contents;
use crate::core::context_generator::format_output;
use crate::core::file_tree::build_tree;
use crate::domain::models::{ContextConfig, ExtensionAllowList};
use crate::infra::file_system::{list_code_files, read_file_contents};
use crate::infra::ignore_rules::{IgnoreRuleSet, load_gitignore};
use crate::infra::logger::setup_logger;
use crate::infra::output::write_output;
use crate::infra::prompt::{ConsolePrompter, Prompter};
use anyhow::Context;
use clap::Parser;
use log::{debug, info, warn};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_EXTENSIONS: &str = ".tsx, .ts, .css, .scss";
pub const EXTENSIONS_QUESTION: &str =
    "Enter file extensions to process (comma separated, e.g., .tsx, .ts, .css, .scss):";

#[derive(Parser)]
#[command(name = "context-cli")]
#[command(
    about = "Bundle the current project's file tree and sources into one prompt",
    long_about = None
)]
pub struct Cli {
    /// Comma separated extensions; skips the interactive question
    #[arg(long)]
    pub ext: Option<String>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logger(cli.verbose)?;

    info!("Starting context generation");
    debug!("Command parameters: ext={:?}, verbose={}", cli.ext, cli.verbose);

    let root_path = std::env::current_dir().context("Failed to determine the current directory")?;
    let mut prompter = ConsolePrompter::stdio();
    let mut stdout = io::stdout().lock();

    generate_context(&root_path, cli.ext.as_deref(), &mut prompter, &mut stdout)
}

/// Runs the whole pipeline for `root_path` and writes the document to `out`.
///
/// The extension list comes from `ext` when given, otherwise from the
/// operator through `prompter`.
pub fn generate_context(
    root_path: &Path,
    ext: Option<&str>,
    prompter: &mut impl Prompter,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let rules = load_gitignore(root_path)?;

    let extensions_input = match ext {
        Some(ext) => ext.to_string(),
        None => prompter.ask(EXTENSIONS_QUESTION, DEFAULT_EXTENSIONS)?,
    };

    let config = ContextConfig {
        root_path: root_path.to_path_buf(),
        extensions: ExtensionAllowList::parse(&extensions_input),
    };

    let document = build_prompt(&config, &rules)?;

    info!("Writing output");
    write_output(out, &document)
}

fn build_prompt(config: &ContextConfig, rules: &IgnoreRuleSet) -> anyhow::Result<String> {
    info!("Scanning for files in {}", config.root_path.display());
    if config.extensions.is_empty() {
        warn!("No extensions given, no file will match");
    }
    let files = list_code_files(&config.root_path, &config.extensions, rules)?;

    if files.is_empty() {
        info!("No files found with the specified extensions");
    }

    info!("Generating file tree");
    let file_tree = build_tree(&files);

    let contents = load_file_contents(&config.root_path, &files, |path: &PathBuf| {
        read_file_contents(path)
    });

    info!("Building prompt output");
    Ok(format_output(&file_tree, &contents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct ScriptedPrompter {
        answer: Option<String>,
        questions: Vec<(String, String)>,
    }

    impl ScriptedPrompter {
        fn answering(answer: Option<&str>) -> Self {
            Self {
                answer: answer.map(str::to_string),
                questions: Vec::new(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn ask(&mut self, question: &str, default: &str) -> anyhow::Result<String> {
            self.questions
                .push((question.to_string(), default.to_string()));
            Ok(self.answer.clone().unwrap_or_else(|| default.to_string()))
        }
    }

    fn write_file(root: &Path, rel_path: &str, content: &str) {
        let path = root.join(rel_path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn run_pipeline(root: &Path, prompter: &mut ScriptedPrompter) -> String {
        let mut out = Vec::new();
        generate_context(root, None, prompter, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["context-cli", "--ext", "rs,toml", "-vv"]).unwrap();

        assert_eq!(cli.ext, Some("rs,toml".to_string()));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_parsing_without_arguments() {
        let cli = Cli::try_parse_from(["context-cli"]).unwrap();

        assert_eq!(cli.ext, None);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_generate_context_with_default_extensions() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "src/index.ts", "export const a = 1;");
        write_file(temp_dir.path(), "README.md", "# ignored by extension");

        let mut prompter = ScriptedPrompter::answering(None);
        let output = run_pipeline(temp_dir.path(), &mut prompter);

        assert_eq!(
            prompter.questions,
            vec![(EXTENSIONS_QUESTION.to_string(), DEFAULT_EXTENSIONS.to_string())]
        );

        let expected = "\
Below is the context of the project files that will be used to answer the following question:

===== Project File Tree =====
└── src
    └── index.ts

===== File Contents =====

--- File: src/index.ts ---
export const a = 1;
..........................................................

";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_generate_context_respects_gitignore() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), ".gitignore", "dist/\n");
        write_file(temp_dir.path(), "dist/out.ts", "compiled");
        write_file(temp_dir.path(), "main.ts", "source");

        let mut prompter = ScriptedPrompter::answering(Some("ts"));
        let output = run_pipeline(temp_dir.path(), &mut prompter);

        assert!(output.contains("└── main.ts\n"));
        assert!(output.contains("--- File: main.ts ---\nsource\n"));
        assert!(!output.contains("dist"));
        assert!(!output.contains("compiled"));
    }

    #[test]
    fn test_generate_context_skips_invalid_gitignore_patterns() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), ".gitignore", "dist/\n[z-a]\n{a\n");
        write_file(temp_dir.path(), "dist/out.ts", "compiled");
        write_file(temp_dir.path(), "main.ts", "source");

        let mut prompter = ScriptedPrompter::answering(Some(".ts"));
        let output = run_pipeline(temp_dir.path(), &mut prompter);

        assert!(output.contains("└── main.ts\n"));
        assert!(output.contains("--- File: main.ts ---\nsource\n"));
        assert!(!output.contains("compiled"));
    }

    #[test]
    fn test_generate_context_with_no_matches() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "notes.txt", "plain text");

        let mut prompter = ScriptedPrompter::answering(None);
        let output = run_pipeline(temp_dir.path(), &mut prompter);

        assert_eq!(
            output,
            "Below is the context of the project files that will be used to answer the following question:\n\n\
             ===== Project File Tree =====\n\n\
             ===== File Contents =====\n\n"
        );
    }

    #[test]
    fn test_generate_context_ext_argument_skips_prompt() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "lib.rs", "pub fn f() {}");

        let mut prompter = ScriptedPrompter::answering(Some(".ts"));
        let mut out = Vec::new();
        generate_context(temp_dir.path(), Some("rs"), &mut prompter, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(prompter.questions.is_empty());
        assert!(output.contains("--- File: lib.rs ---\npub fn f() {}\n"));
    }

    #[test]
    fn test_generate_context_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "a/b/c.ts", "c");
        write_file(temp_dir.path(), "a/d.tsx", "d");
        write_file(temp_dir.path(), "e.css", "e");

        let first = run_pipeline(temp_dir.path(), &mut ScriptedPrompter::answering(None));
        let second = run_pipeline(temp_dir.path(), &mut ScriptedPrompter::answering(None));

        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_context_unreadable_gitignore_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(".gitignore")).unwrap();

        let mut prompter = ScriptedPrompter::answering(None);
        let mut out = Vec::new();
        let result = generate_context(temp_dir.path(), None, &mut prompter, &mut out);

        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_file_deleted_after_listing() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "gone.ts", "soon deleted");
        write_file(temp_dir.path(), "kept.ts", "still here");

        let extensions = ExtensionAllowList::parse(".ts");
        let files =
            list_code_files(temp_dir.path(), &extensions, &IgnoreRuleSet::empty()).unwrap();
        fs::remove_file(temp_dir.path().join("gone.ts")).unwrap();

        let contents = load_file_contents(temp_dir.path(), &files, |path: &PathBuf| {
            read_file_contents(path)
        });
        let output = format_output(&build_tree(&files), &contents);

        let gone = contents.iter().find(|f| f.name == "gone.ts").unwrap();
        assert!(gone.content.starts_with("Error reading file: "));
        let kept = contents.iter().find(|f| f.name == "kept.ts").unwrap();
        assert_eq!(kept.content, "still here");
        assert!(output.contains("--- File: kept.ts ---\nstill here\n"));
    }
}
