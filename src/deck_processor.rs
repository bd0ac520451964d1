/*!
 * Deck processing: walks every slide's shape tree and translates text in place.
 *
 * Each paragraph is translated as one unit and the result is spread back
 * over the paragraph's original runs, so run formatting survives. Shapes,
 * tables and notes are never created, removed or reordered, which keeps
 * shape ids and anything bound to them (animations) intact.
 *
 * Failures are contained at the smallest enclosing node: a shape, table
 * or notes failure is recorded and the walk continues with the next node;
 * a slide whose shapes cannot be listed is recorded and skipped.
 */

use futures::future::{BoxFuture, FutureExt};
use indicatif::ProgressBar;
use log::{debug, error, info, warn};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use crate::document::{
    DeckSession, Presentation, ShapeContent, ShapeNode, SlideNode, TableContent, TextContainer,
    TextParagraph,
};
use crate::errors::{AppError, DocumentError};
use crate::translation::{redistribute, Translate};

/// Counters and error messages collected during one processing pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessingStats {
    /// Slides whose shapes could be walked
    pub slides_processed: usize,
    /// Non-group, non-table shapes processed without error
    pub shapes_processed: usize,
    /// Runs rewritten with translated text
    pub text_runs_translated: usize,
    /// Tables whose cells were all processed
    pub tables_processed: usize,
    /// Slides whose notes were processed
    pub notes_translated: usize,
    /// Group shapes entered
    pub groups_traversed: usize,
    /// Human-readable descriptions of contained failures, in order
    pub errors: Vec<String>,
}

impl ProcessingStats {
    /// Whether any node failed
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "{} slides, {} shapes, {} tables, {} groups, {} notes, {} runs translated, {} errors",
            self.slides_processed,
            self.shapes_processed,
            self.tables_processed,
            self.groups_traversed,
            self.notes_translated,
            self.text_runs_translated,
            self.errors.len()
        )
    }
}

/// Walks a presentation and translates its text through a `Translate` implementation
pub struct DeckProcessor {
    // @field: Text translator
    translator: Arc<dyn Translate>,

    // @field: Counters for the current pass
    stats: ProcessingStats,

    // @field: Slide progress
    progress: ProgressBar,

    // @field: 1-based number of the slide being walked
    current_slide: usize,
}

impl DeckProcessor {
    /// Create a processor without visible progress
    pub fn new(translator: Arc<dyn Translate>) -> Self {
        Self {
            translator,
            stats: ProcessingStats::default(),
            progress: ProgressBar::hidden(),
            current_slide: 0,
        }
    }

    /// Report slide progress on the given bar
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Stats of the last pass
    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }

    /// Translate a loaded presentation in place.
    ///
    /// Never fails; contained failures are listed in the returned stats.
    pub async fn process<D: Presentation + ?Sized>(&mut self, deck: &mut D) -> ProcessingStats {
        self.stats = ProcessingStats::default();

        let slides = deck.slides_mut();
        let total = slides.len();
        self.progress.set_length(total as u64);
        self.progress.set_position(0);

        for (index, slide) in slides.into_iter().enumerate() {
            self.current_slide = index + 1;
            self.progress.set_message(format!("slide {}/{}", index + 1, total));
            debug!("Processing slide {}/{}", index + 1, total);

            match self.process_slide(slide).await {
                Ok(()) => self.stats.slides_processed += 1,
                Err(e) => {
                    let message = format!("Error on slide {}: {}", index + 1, e);
                    error!("{}", message);
                    self.stats.errors.push(message);
                }
            }

            self.progress.inc(1);
        }

        self.progress.finish_and_clear();
        info!("Processed deck: {}", self.stats.summary());
        self.stats.clone()
    }

    /// Load a deck, translate it and save the result.
    ///
    /// Load and save failures are fatal for the job; everything in between
    /// is contained in the returned stats.
    pub async fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(&mut self, input: P, output: Q) -> Result<ProcessingStats, AppError> {
        let input = input.as_ref();
        let output = output.as_ref();

        let mut deck = DeckSession::load(input).map_err(|source| AppError::Load {
            path: input.to_path_buf(),
            source,
        })?;

        let stats = self.process(&mut deck).await;

        DeckSession::save(&deck, output).map_err(|source| AppError::Save {
            path: output.to_path_buf(),
            source,
        })?;

        info!("Success: {}", output.display());
        Ok(stats)
    }

    async fn process_slide(&mut self, slide: &mut dyn SlideNode) -> Result<(), DocumentError> {
        for shape in slide.shapes_mut()? {
            self.process_shape(shape).await;
        }

        self.process_notes(slide).await;
        Ok(())
    }

    async fn process_notes(&mut self, slide: &mut dyn SlideNode) {
        let result = match slide.notes_mut() {
            Ok(Some(notes)) => self.process_text_container(notes).await.map(|_| true),
            Ok(None) => Ok(false),
            Err(e) => Err(e),
        };

        match result {
            Ok(true) => self.stats.notes_translated += 1,
            Ok(false) => {},
            Err(e) => self.record(format!("Error processing notes on slide {}: {}", self.current_slide, e)),
        }
    }

    // Boxed because groups recurse
    fn process_shape<'a>(&'a mut self, shape: &'a mut dyn ShapeNode) -> BoxFuture<'a, ()> {
        async move {
            let label = format!("'{}' (id {})", shape.name(), shape.shape_id());

            if let Err(e) = self.visit_shape(shape, &label).await {
                self.record(format!(
                    "Error processing shape {} on slide {}: {}",
                    label, self.current_slide, e
                ));
            }
        }
        .boxed()
    }

    async fn visit_shape(&mut self, shape: &mut dyn ShapeNode, label: &str) -> Result<(), DocumentError> {
        match shape.content_mut()? {
            ShapeContent::Group(children) => {
                self.stats.groups_traversed += 1;
                debug!("Entering group {} with {} shape(s)", label, children.len());
                for child in children {
                    self.process_shape(child).await;
                }
            },
            ShapeContent::Table(table) => {
                match self.process_table(table).await {
                    Ok(()) => self.stats.tables_processed += 1,
                    Err(e) => self.record(format!(
                        "Error processing table {} on slide {}: {}",
                        label, self.current_slide, e
                    )),
                }
            },
            ShapeContent::Text(frame) => {
                self.process_text_container(frame).await?;
                self.stats.shapes_processed += 1;
            },
            ShapeContent::Other => {
                self.stats.shapes_processed += 1;
            },
        }

        Ok(())
    }

    async fn process_table(&mut self, table: &mut dyn TableContent) -> Result<(), DocumentError> {
        for cell in table.cells_mut()? {
            self.process_text_container(cell).await?;
        }
        Ok(())
    }

    async fn process_text_container(&mut self, container: &mut dyn TextContainer) -> Result<(), DocumentError> {
        for paragraph in container.paragraphs_mut()? {
            self.process_paragraph(paragraph).await?;
        }
        Ok(())
    }

    /// Translate one paragraph as a unit and spread the result over its runs
    async fn process_paragraph(&mut self, paragraph: &mut dyn TextParagraph) -> Result<(), DocumentError> {
        let mut runs = paragraph.runs_mut();
        if runs.is_empty() {
            return Ok(());
        }

        let originals: Vec<String> = runs.iter().map(|run| run.text().to_string()).collect();
        let combined = originals.concat();

        let translated = self.translator.translate(&combined).await;
        if translated == combined {
            return Ok(());
        }

        let pieces = redistribute(&originals[..], &translated);

        // All runs accept their piece or none is written
        for (run, piece) in runs.iter().zip(pieces.iter()) {
            run.validate_text(piece)?;
        }
        for (run, piece) in runs.iter_mut().zip(pieces.iter()) {
            run.set_text(piece)?;
        }

        self.stats.text_runs_translated += runs.len();
        Ok(())
    }

    fn record(&mut self, message: String) {
        warn!("{}", message);
        self.stats.errors.push(message);
    }
}
