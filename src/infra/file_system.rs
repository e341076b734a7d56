use crate::domain::models::{ExtensionAllowList, file_extension};
use crate::infra::ignore_rules::IgnoreRuleSet;
use anyhow::Context;
use crossterm::{
    ExecutableCommand, cursor,
    terminal::{Clear, ClearType},
};
use log::{debug, info, warn};
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::time::{Duration, Instant};
use walkdir::{DirEntry, WalkDir};

// Progress indicator for file scanning, drawn on stderr so stdout stays clean.
// Drawing failures are logged and never abort the scan.
struct ScanProgress {
    output: Box<dyn Write>,
    enabled: bool,
    start_time: Instant,
    update_interval: Duration,
    last_update: Instant,
    scanned_count: usize,
    matched_count: usize,
}

impl ScanProgress {
    fn new() -> Self {
        Self::with_output(Box::new(io::stderr()), io::stderr().is_terminal())
    }

    fn with_output(output: Box<dyn Write>, enabled: bool) -> Self {
        Self {
            output,
            enabled,
            start_time: Instant::now(),
            update_interval: Duration::from_millis(250),
            last_update: Instant::now(),
            scanned_count: 0,
            matched_count: 0,
        }
    }

    fn files_per_sec(&self, elapsed: f32) -> f32 {
        if elapsed > 0.0 {
            self.scanned_count as f32 / elapsed
        } else {
            0.0
        }
    }

    fn update(&mut self, matched: bool) {
        self.scanned_count += 1;
        if matched {
            self.matched_count += 1;
        }

        if !self.enabled {
            return;
        }

        let now = Instant::now();
        if now.duration_since(self.last_update) >= self.update_interval {
            self.last_update = now;
            if let Err(e) = self.draw(now) {
                debug!("Failed to draw scan progress: {}", e);
            }
        }
    }

    fn draw(&mut self, now: Instant) -> io::Result<()> {
        let elapsed = now.duration_since(self.start_time);
        let files_per_sec = self.files_per_sec(elapsed.as_secs_f32());

        let spinner_chars = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
        let spinner_idx = ((elapsed.as_millis() / 100) % spinner_chars.len() as u128) as usize;

        self.output.execute(cursor::SavePosition)?;
        self.output.execute(Clear(ClearType::CurrentLine))?;
        write!(
            self.output,
            "{} Scanning files: {} scanned, {} matched ({:.1} files/sec)",
            spinner_chars[spinner_idx], self.scanned_count, self.matched_count, files_per_sec
        )?;
        self.output.flush()?;
        self.output.execute(cursor::RestorePosition)?;
        Ok(())
    }

    fn finish(&mut self) {
        if !self.enabled {
            return;
        }

        if let Err(e) = self.draw_summary() {
            debug!("Failed to draw scan summary: {}", e);
        }
    }

    fn draw_summary(&mut self) -> io::Result<()> {
        let elapsed = self.start_time.elapsed().as_secs_f32();
        let files_per_sec = self.files_per_sec(elapsed);
        self.output.execute(Clear(ClearType::CurrentLine))?;
        writeln!(
            self.output,
            "✓ Scan complete: {} files scanned, {} files matched in {:.1}s ({:.1} files/sec)",
            self.scanned_count, self.matched_count, elapsed, files_per_sec
        )?;
        Ok(())
    }
}

/// Root-relative path of `path`, always joined with `/`.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel_path = path.strip_prefix(root).unwrap_or(path);
    rel_path
        .components()
        .map(|comp| comp.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_included_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    if !file_type.is_symlink() {
        return false;
    }

    // Symlinks are never descended; only links to regular files count
    match fs::metadata(entry.path()) {
        Ok(metadata) if metadata.is_file() => true,
        Ok(_) => {
            debug!("Not following symlinked directory: {}", entry.path().display());
            false
        }
        Err(e) => {
            warn!("Skipping dangling symlink {}: {}", entry.path().display(), e);
            false
        }
    }
}

/// Lists every file under `root` whose extension is allowed and which is not
/// excluded by `rules`, in filesystem enumeration order.
///
/// Ignored directories are pruned before they are read. Any error while
/// listing a directory aborts the walk.
pub fn list_code_files(
    root: &Path,
    extensions: &ExtensionAllowList,
    rules: &IgnoreRuleSet,
) -> anyhow::Result<Vec<String>> {
    info!("Listing code files in: {}", root.display());
    debug!("Extensions: {:?}", extensions.as_slice());

    let mut result = Vec::new();
    let mut progress = ScanProgress::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || !rules.is_ignored(&relative_path(root, e.path()), e.file_type().is_dir())
        })
    {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;

        if entry.depth() == 0 || !is_included_file(&entry) {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        let matched = extensions.contains(file_extension(&file_name));
        progress.update(matched);

        if matched {
            let rel_path = relative_path(root, entry.path());
            debug!("Found matching file: {}", rel_path);
            result.push(rel_path);
        }
    }

    progress.finish();
    info!("Found {} matching files", result.len());
    Ok(result)
}

pub fn read_file_contents(path: &Path) -> anyhow::Result<String> {
    debug!("Reading file contents: {}", path.display());
    let contents = fs::read_to_string(path)?;
    debug!("Read {} bytes from file", contents.len());
    Ok(contents)
}
