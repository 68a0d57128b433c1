//! CLI progress display
//!
//! Step lines with emoji, a spinner while WADs are scanned, and a closing
//! summary.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

use crate::operations::{ExtractPhase, ExtractProgress, ExtractionSummary};

/// Magnifying glass - scanning
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Link - resolving the request
pub static LINK: Emoji<'_, '_> = Emoji("🔗 ", "");
/// Package - extraction
pub static PACKAGE: Emoji<'_, '_> = Emoji("📦 ", "");
/// Floppy disk - writing
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Sparkles - completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");

/// Number of step lines a run prints
const STEPS: usize = 4;

/// Print a step indicator: `[1/4] 🔍 Message...`
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

/// Print what was written
pub fn print_summary(summary: &ExtractionSummary) {
    println!(
        "    {} textures, {} patches, {} flats, {} namespace textures",
        style(summary.textures).bold(),
        style(summary.patches).bold(),
        style(summary.flats).bold(),
        style(summary.namespace_textures).bold()
    );
    if summary.animated > 0 || summary.switches > 0 {
        println!(
            "    {} ANIMATED entries, {} SWITCHES entries",
            style(summary.animated).bold(),
            style(summary.switches).bold()
        );
    }
}

/// Spinner style for indeterminate progress
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{prefix:.bold.dim} {spinner} {wide_msg}")
        .expect("valid template")
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
}

/// Create a simple spinner
#[must_use]
pub fn simple_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(spinner_style());
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Turns pipeline progress updates into step lines and a scan spinner
pub struct StepReporter {
    spinner: Option<ProgressBar>,
}

impl StepReporter {
    /// `quiet` suppresses all output
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        let spinner = (!quiet).then(|| {
            print_step(1, STEPS, LOOKING_GLASS, "Scanning WADs...");
            simple_spinner("")
        });
        Self { spinner }
    }

    pub fn update(&self, progress: &ExtractProgress) {
        let Some(spinner) = &self.spinner else {
            return;
        };
        match progress.phase {
            ExtractPhase::Scanning => {
                let file = progress.current_file.as_deref().unwrap_or_default();
                spinner.set_message(format!(
                    "{} ({}/{}) {file}",
                    progress.phase.as_str(),
                    progress.current,
                    progress.total
                ));
            }
            ExtractPhase::Expanding => {
                spinner.finish_and_clear();
                print_step(2, STEPS, LINK, "Expanding request...");
            }
            ExtractPhase::Extracting => {
                print_step(3, STEPS, PACKAGE, &format!("Extracting {} names...", progress.total));
            }
            ExtractPhase::Writing => {
                let file = progress.current_file.as_deref().unwrap_or_default();
                print_step(4, STEPS, DISK, &format!("Writing {file}..."));
            }
            ExtractPhase::Complete => {}
        }
    }

    /// Clear the spinner if the run stopped early
    pub fn finish(&self) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }
    }
}
