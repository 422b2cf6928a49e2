use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

/// Conversion stages and the share of work done when each one starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Reading,
    Validating,
    Analyzing,
    Cleaning,
    Building,
    Generating,
    Saving,
    Done,
}

impl Stage {
    pub fn percent(&self) -> u64 {
        match self {
            Stage::Reading => 10,
            Stage::Validating => 30,
            Stage::Analyzing => 40,
            Stage::Cleaning => 50,
            Stage::Building => 70,
            Stage::Generating => 85,
            Stage::Saving => 95,
            Stage::Done => 100,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Stage::Reading => "Reading spreadsheet data...",
            Stage::Validating => "Validating columns...",
            Stage::Analyzing => "Analyzing structure...",
            Stage::Cleaning => "Cleaning data...",
            Stage::Building => "Building bookmark tree...",
            Stage::Generating => "Generating HTML...",
            Stage::Saving => "Saving file...",
            Stage::Done => "Done!",
        }
    }
}

/// Stage progress shown as a terminal bar and mirrored to the log
pub struct ConversionProgress {
    bar: ProgressBar,
}

impl ConversionProgress {
    pub fn new(visible: bool) -> Self {
        let bar = if visible {
            create_stage_progress_bar()
        } else {
            ProgressBar::hidden()
        };
        Self { bar }
    }

    pub fn update(&self, stage: Stage) {
        info!("[Progress {}%] {}", stage.percent(), stage.message());
        self.bar.set_position(stage.percent());
        self.bar.set_message(stage.message());
    }

    /// Finish progress bar with success message
    pub fn finish_with_success(&self, message: &str) {
        self.bar.set_position(Stage::Done.percent());
        self.bar.finish_with_message(format!("✅ {}", message));
    }

    /// Finish progress bar with error message
    pub fn finish_with_error(&self, message: &str) {
        self.bar.abandon_with_message(format!("❌ {}", message));
    }
}

/// Create a percentage bar for the conversion stages
fn create_stage_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(100);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-");
    pb.set_style(style);
    pb
}
