use anyhow::anyhow;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::app_config::Config;
use crate::deck_processor::{DeckProcessor, ProcessingStats};
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::translation::{GatewayStats, TranslationGateway};

// @module: Application controller for deck translation jobs

/// Result of one translated deck
#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    /// Short job id used in log lines
    pub job_id: String,
    /// Source deck
    pub input: PathBuf,
    /// Written deck
    pub output: PathBuf,
    /// Walker counters and contained errors
    pub stats: ProcessingStats,
    /// Gateway statistics for this job
    pub translator: GatewayStats,
    /// Wall time of the job in milliseconds
    pub elapsed_ms: u64,
}

/// What a single run did
#[derive(Debug, Clone)]
pub enum JobOutcome {
    /// The deck was translated and saved
    Translated(JobReport),
    /// The output already existed and overwriting was not requested
    Skipped {
        /// Existing output
        output: PathBuf,
    },
}

/// Totals of a folder run
#[derive(Debug, Default)]
pub struct FolderSummary {
    /// Reports of translated decks
    pub translated: Vec<JobReport>,
    /// Decks whose output already existed
    pub skipped: usize,
    /// Decks whose job failed, with the error message
    pub failed: Vec<(PathBuf, String)>,
}

/// Main application controller for deck translation
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Progress bars of this controller
    multi_progress: MultiProgress,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            config,
            multi_progress: MultiProgress::new(),
        })
    }

    /// Hide all progress bars (tests, piped output)
    pub fn without_progress(mut self) -> Self {
        self.multi_progress = MultiProgress::with_draw_target(indicatif::ProgressDrawTarget::hidden());
        self
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Output path of a deck for the configured target language
    pub fn output_path_for(&self, input_file: &Path, output_dir: &Path) -> PathBuf {
        let language = language_utils::normalize_target_language(&self.config.target_language);
        FileManager::generate_output_path(input_file, output_dir, &language)
    }

    /// Translate one deck into `output_dir` with a gateway built from the configuration
    pub async fn run(&self, input_file: &Path, output_dir: &Path, force_overwrite: bool) -> Result<JobOutcome, AppError> {
        self.ensure_supported_language()?;
        let gateway = TranslationGateway::from_config(&self.config.translation, &self.config.target_language);
        self.run_with_gateway(input_file, output_dir, force_overwrite, gateway).await
    }

    /// Translate one deck with the given gateway.
    ///
    /// The gateway, and with it its cache, is owned by this job only.
    pub async fn run_with_gateway(
        &self,
        input_file: &Path,
        output_dir: &Path,
        force_overwrite: bool,
        gateway: TranslationGateway,
    ) -> Result<JobOutcome, AppError> {
        let start_time = Instant::now();
        let job_id = Self::new_job_id();

        if !FileManager::file_exists(input_file) {
            return Err(AppError::Load {
                path: input_file.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "input file does not exist").into(),
            });
        }

        FileManager::ensure_dir(output_dir).map_err(|e| AppError::File(e.to_string()))?;

        let output_path = self.output_path_for(input_file, output_dir);
        if output_path.exists() && !force_overwrite {
            warn!("[{}] Skipping {:?}, translation already exists (use -f to force overwrite)", job_id, input_file);
            return Ok(JobOutcome::Skipped { output: output_path });
        }

        info!(
            "[{}] Translating {:?} to {} ({})",
            job_id,
            input_file,
            gateway.target_language(),
            if gateway.has_premium() { "premium + secondary" } else { "secondary only" }
        );

        let gateway = Arc::new(gateway);
        let progress = self.multi_progress.add(ProgressBar::new(0));
        progress.set_style(Self::progress_style("slides"));

        let mut processor = DeckProcessor::new(gateway.clone()).with_progress(progress);
        let stats = processor.process_file(input_file, &output_path).await?;

        for message in &stats.errors {
            debug!("[{}] {}", job_id, message);
        }

        let elapsed = start_time.elapsed();
        let report = JobReport {
            job_id,
            input: input_file.to_path_buf(),
            output: output_path,
            translator: gateway.stats(),
            stats,
            elapsed_ms: elapsed.as_millis() as u64,
        };

        info!(
            "[{}] Translation complete in {}: {}",
            report.job_id,
            Self::format_duration(elapsed),
            report.stats.summary()
        );

        Ok(JobOutcome::Translated(report))
    }

    /// Translate every deck under a directory, next to its source.
    ///
    /// Existing outputs are skipped; a failed deck does not stop the run.
    pub async fn run_folder(&self, input_dir: &Path, force_overwrite: bool) -> anyhow::Result<FolderSummary> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }
        self.ensure_supported_language()?;

        let language = language_utils::normalize_target_language(&self.config.target_language);
        let decks: Vec<PathBuf> = FileManager::find_decks(input_dir)?
            .into_iter()
            .filter(|path| !FileManager::is_translated_output(path, &language))
            .collect();

        if decks.is_empty() {
            return Err(anyhow!("No decks found in directory: {:?}", input_dir));
        }

        let folder_pb = self.multi_progress.add(ProgressBar::new(decks.len() as u64));
        folder_pb.set_style(Self::progress_style("files"));
        folder_pb.set_message("Processing files");

        let mut summary = FolderSummary::default();

        for deck in &decks {
            let file_name = deck
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let output_dir = match deck.parent() {
                Some(parent) => parent.to_path_buf(),
                None => input_dir.to_path_buf(),
            };

            match self.run(deck, &output_dir, force_overwrite).await {
                Ok(JobOutcome::Translated(report)) => summary.translated.push(report),
                Ok(JobOutcome::Skipped { .. }) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    summary.failed.push((deck.clone(), e.to_string()));
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        info!(
            "Folder processing completed: {} processed, {} skipped, {} errors",
            summary.translated.len(),
            summary.skipped,
            summary.failed.len()
        );

        Ok(summary)
    }

    fn ensure_supported_language(&self) -> Result<(), AppError> {
        if language_utils::is_supported_language(&self.config.target_language) {
            Ok(())
        } else {
            Err(AppError::Config(format!(
                "Unsupported target language '{}'. Supported: {}",
                self.config.target_language,
                language_utils::supported_language_names()
            )))
        }
    }

    fn new_job_id() -> String {
        Uuid::new_v4().simple().to_string()[..8].to_string()
    }

    fn progress_style(unit: &str) -> ProgressStyle {
        let template = format!(
            "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}}",
            unit
        );
        ProgressStyle::default_bar()
            .template(&template)
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░")
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
