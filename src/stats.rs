//! Walk statistics collection and display
//!
//! A walk always completes; whatever degraded along the way (unreadable
//! directories, excluded paths) is surfaced here instead of through errors.

use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Counters accumulated over one traversal.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WalkStats {
    /// Files the walker reached (after directory-level pruning)
    pub files_visited: usize,
    /// Files retained in the filtered tree
    pub files_included: usize,
    /// Files the filter rejected
    pub files_excluded: usize,
    /// Directories the walker reached
    pub dirs_visited: usize,
    /// Directories the filter rejected (descent skipped)
    pub dirs_excluded: usize,
    /// Directories dropped because filtering left them empty
    pub dirs_pruned: usize,
    /// Directories that could not be listed (permissions, transient I/O)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unreadable_dirs: Vec<String>,
}

impl WalkStats {
    pub fn record_unreadable(&mut self, path: String) {
        self.unreadable_dirs.push(path);
    }

    /// One-line summary for the end of a normal run.
    pub fn summary(&self) -> String {
        let mut s = format!(
            "{} files documented, {} excluded",
            self.files_included, self.files_excluded
        );
        if !self.unreadable_dirs.is_empty() {
            s.push_str(&format!(
                ", {} unreadable directories",
                self.unreadable_dirs.len()
            ));
        }
        s
    }
}

/// Print statistics to stdout with optional color.
pub fn print_stats(stats: &WalkStats, use_color: bool) -> io::Result<()> {
    let color_choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(color_choice);

    let mut bold = ColorSpec::new();
    bold.set_bold(true);
    stdout.set_color(&bold)?;
    writeln!(stdout, "Walk Statistics")?;
    stdout.reset()?;
    writeln!(stdout, "───────────────")?;

    writeln!(stdout, "Files visited:     {}", stats.files_visited)?;
    writeln!(stdout, "Files included:    {}", stats.files_included)?;
    writeln!(stdout, "Files excluded:    {}", stats.files_excluded)?;
    writeln!(stdout, "Dirs visited:      {}", stats.dirs_visited)?;
    writeln!(stdout, "Dirs excluded:     {}", stats.dirs_excluded)?;
    writeln!(stdout, "Dirs pruned empty: {}", stats.dirs_pruned)?;

    if !stats.unreadable_dirs.is_empty() {
        let mut warn = ColorSpec::new();
        warn.set_fg(Some(Color::Yellow));
        stdout.set_color(&warn)?;
        writeln!(
            stdout,
            "Unreadable dirs:   {}",
            stats.unreadable_dirs.len()
        )?;
        stdout.reset()?;
        for path in &stats.unreadable_dirs {
            writeln!(stdout, "  {}", path)?;
        }
    }

    Ok(())
}
