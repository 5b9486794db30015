//! Per-file stage bars, collapsing to a single counter for large batches

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, STAGES_PER_FILE};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Steps every file passes through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading and decoding the source image
    Decode,
    /// Rendering the low resolution preview
    Preview,
    /// Rendering the full resolution output
    Full,
    /// Writing PNG files
    Export,
}

impl Stage {
    /// Label shown next to the bar
    pub const fn label(self) -> &'static str {
        match self {
            Self::Decode => "decode",
            Self::Preview => "preview",
            Self::Full => "full",
            Self::Export => "export",
        }
    }

    /// Stages completed once this stage has started
    pub const fn completed_before(self) -> usize {
        match self {
            Self::Decode => 0,
            Self::Preview => 1,
            Self::Full => 2,
            Self::Export => 3,
        }
    }
}

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg:>8} [{bar:24.green/white}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
});

static COUNTER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] rendered {pos}/{len} [{bar:40.green/white}] eta {eta}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// One row in the rolling display
#[derive(Debug, Clone, Default)]
struct FileLine {
    name: String,
    done: usize,
    label: &'static str,
}

/// Terminal progress for a run over one or more files
///
/// Up to [`MAX_INDIVIDUAL_PROGRESS_BARS`] stage bars show the most recently
/// started files. Larger runs also get a file counter above them.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    counter: Option<ProgressBar>,
    rows: Vec<ProgressBar>,
    file_count: usize,
    settled: usize,
    lines: Vec<FileLine>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager with nothing on screen
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            counter: None,
            rows: Vec::new(),
            file_count: 0,
            settled: 0,
            lines: Vec::new(),
        }
    }

    /// Lay out bars for `file_count` files
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;

        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let counter = ProgressBar::new(file_count as u64).with_style(COUNTER_STYLE.clone());
            self.counter = Some(self.multi_progress.add(counter));
        }

        self.rows = (0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS))
            .map(|_| {
                let row = ProgressBar::new(STAGES_PER_FILE as u64).with_style(STAGE_STYLE.clone());
                self.multi_progress.add(row)
            })
            .collect();
    }

    /// Number of files announced in [`Self::initialize`]
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Show `path` as the file at `index`, starting at the decode stage
    pub fn start_file(&mut self, index: usize, path: &Path) {
        if self.lines.len() <= index {
            self.lines.resize_with(index + 1, FileLine::default);
        }
        if let Some(line) = self.lines.get_mut(index) {
            *line = FileLine {
                name: path.file_name().map_or_else(String::new, |name| {
                    name.to_string_lossy().into_owned()
                }),
                done: 0,
                label: Stage::Decode.label(),
            };
        }
        self.redraw();
    }

    /// Move the file at `index` to `stage`
    pub fn enter_stage(&mut self, index: usize, stage: Stage) {
        if let Some(line) = self.lines.get_mut(index) {
            line.done = stage.completed_before();
            line.label = stage.label();
        }
        self.redraw();
    }

    /// Fill the file's bar and advance the counter
    pub fn complete_file(&mut self, index: usize, elapsed: Duration) {
        self.settle(index, "done", &format!("{elapsed:.1?}"));
    }

    /// Close out a file that produced no output
    pub fn skip_file(&mut self, index: usize, reason: &str) {
        self.settle(index, "skipped", reason);
    }

    /// Files completed or skipped so far
    pub const fn settled_count(&self) -> usize {
        self.settled
    }

    fn settle(&mut self, index: usize, label: &'static str, note: &str) {
        self.settled += 1;
        if let Some(counter) = &self.counter {
            counter.inc(1);
        }
        if let Some(line) = self.lines.get_mut(index) {
            line.done = STAGES_PER_FILE;
            line.label = label;
            line.name = format!("{} ({note})", line.name);
        }
        self.redraw();
    }

    /// Remove every bar from the terminal
    pub fn finish(&self) {
        if let Some(counter) = &self.counter {
            counter.finish();
        }
        for row in &self.rows {
            row.finish_and_clear();
        }
        let _ = self.multi_progress.clear();
    }

    fn redraw(&self) {
        let started: Vec<&FileLine> = self
            .lines
            .iter()
            .filter(|line| !line.name.is_empty())
            .collect();
        let first_shown = started.len().saturating_sub(self.rows.len());
        let shown = started.get(first_shown..).unwrap_or_default();

        for (position, row) in self.rows.iter().enumerate() {
            match shown.get(position) {
                Some(line) => {
                    row.set_position(line.done as u64);
                    row.set_message(line.label);
                    row.set_prefix(line.name.clone());
                }
                None => {
                    row.set_position(0);
                    row.set_message("");
                    row.set_prefix("");
                }
            }
        }
    }
}
