// UI layer: everything the operator sees on the terminal. Report lines
// go to stdout; the `indicatif` bar lives on stderr and is hidden when
// stderr is not a terminal. Colour is only used when stdout is a tty.

use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use reqwest::StatusCode;

use crate::api::SiteSession;
use crate::content::fmt_size;
use crate::upload::UploadResult;

/// Shared handle for printing upload progress. Clones draw to the same
/// bar, so each upload task can hold its own copy.
#[derive(Clone)]
pub struct Reporter {
    bar: ProgressBar,
    color: bool,
}

impl Reporter {
    /// Reporter with a progress bar on stderr.
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} files")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        Reporter {
            bar,
            color: std::io::stdout().is_tty(),
        }
    }

    /// Reporter that prints plain report lines and never draws a bar.
    pub fn hidden() -> Self {
        Reporter {
            bar: ProgressBar::hidden(),
            color: false,
        }
    }

    /// Announce the new site and how many files are about to go up.
    pub fn site_created(&self, session: &SiteSession, files: usize) {
        self.bar.set_length(files as u64);
        for line in site_created_lines(session, files) {
            self.line(line);
        }
    }

    pub fn uploaded(&self, result: &UploadResult) {
        self.line(uploaded_line(result));
        self.bar.inc(1);
    }

    pub fn failed(&self, path: &str, status: StatusCode, body: &str) {
        self.line(failed_line(path, status, body, self.color));
    }

    /// Clear the bar and print the closing lines.
    pub fn finished(&self, session: &SiteSession, total_site_size: Option<u64>) {
        self.bar.finish_and_clear();
        for line in finished_lines(session, total_site_size, self.color) {
            println!("{line}");
        }
    }

    /// Stop drawing without printing anything, used when a run fails.
    pub fn abandon(&self) {
        self.bar.abandon();
    }

    /// Print above the bar so lines never tear it.
    fn line(&self, line: String) {
        self.bar.suspend(|| println!("{line}"));
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

fn site_created_lines(session: &SiteSession, files: usize) -> Vec<String> {
    let mut lines = vec![format!(
        "Site created with root {}, uploading {} files...",
        session.upload_root, files
    )];
    if let (Some(upload), Some(site)) = (&session.upload_expiration, &session.site_expiration) {
        lines.push(format!("uploads allowed until {upload}, site expires {site}"));
    }
    lines
}

fn uploaded_line(result: &UploadResult) -> String {
    format!(
        "    {} ct={} size={}",
        result.rel_path,
        result.content_type.unwrap_or("-"),
        fmt_size(result.size)
    )
}

fn failed_line(path: &str, status: StatusCode, body: &str, color: bool) -> String {
    let marker = if color {
        "ERROR!".red().bold().to_string()
    } else {
        "ERROR!".to_string()
    };
    format!("    {marker} {path} status={} response={body}", status.as_u16())
}

fn finished_lines(session: &SiteSession, total_site_size: Option<u64>, color: bool) -> [String; 2] {
    let tick = if color {
        "✓".green().to_string()
    } else {
        "✓".to_string()
    };
    let complete = match total_site_size {
        Some(total) => format!("upload complete {tick} site size {}", fmt_size(total)),
        None => format!("upload complete {tick} no files uploaded"),
    };
    [complete, format!("go to {}", session.upload_root)]
}
