/*!
 * Common test utilities for the slidelingo test suite
 */

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use slidelingo::app_config::Config;
use slidelingo::document::{
    Deck, DeckSession, Paragraph, Presentation, Run, Shape, ShapeContent, ShapeId, ShapeKind, ShapeNode,
    Slide, SlideNode, TextFrame,
};
use slidelingo::providers::mock::MockProvider;
use slidelingo::translation::{RetryPolicy, Translate, TranslationGateway};


/// Endpoint nothing listens on; connections are refused immediately
pub const UNREACHABLE_ENDPOINT: &str = "http://127.0.0.1:9";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Saves a deck into the directory
pub fn write_deck(dir: &Path, filename: &str, deck: &Deck) -> Result<PathBuf> {
    let path = dir.join(filename);
    DeckSession::save(deck, &path)?;
    Ok(path)
}

/// A deck exercising every node kind:
///
/// slide 1: title with two formatted runs, a 2x2 table, a picture, notes
/// slide 2: a group holding a text box and a nested group, plus animations
pub fn sample_deck() -> Deck {
    let title = TextFrame::from_paragraphs(vec![Paragraph::from_runs(vec![
        Run::colored("Red ", "C00000"),
        Run::bold("House"),
    ])]);

    let slide_one = Slide::new(1, vec![
        Shape::text_box(2, "Title 1", title),
        Shape::table(3, "Table 2", vec![vec!["Name", "Price"], vec!["Apple", "12"]]),
        Shape::picture(4, "Picture 3"),
    ])
    .with_notes(TextFrame::from_text("Speaker notes"));

    let slide_two = Slide::new(2, vec![Shape::group(10, "Group 1", vec![
        Shape::text_box(11, "Caption", TextFrame::from_text("Good morning")),
        Shape::group(12, "Inner", vec![Shape::text_box(13, "Label", TextFrame::from_text("Thank you"))]),
    ])])
    .with_animation(ShapeId(11), "fade")
    .with_animation(ShapeId(13), "fly-in");

    Deck::new(vec![slide_one, slide_two])
}

/// Scripted translations for `sample_deck`
pub fn sample_translations() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Red House", "Casa Roja"),
        ("Name", "Nombre"),
        ("Price", "Precio"),
        ("Apple", "Manzana"),
        ("Speaker notes", "Notas del orador"),
        ("Good morning", "Buenos días"),
        ("Thank you", "Gracias"),
    ]
}

/// Translator double answering from a table and recording every call.
///
/// Texts missing from the table come back unchanged.
#[derive(Default)]
pub struct RecordingTranslator {
    table: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl RecordingTranslator {
    pub fn with_pairs<I, K, V>(pairs: I) -> Arc<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Arc::new(Self {
            table: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Texts passed to `translate`, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Translate for RecordingTranslator {
    async fn translate(&self, text: &str) -> String {
        self.calls.lock().push(text.to_string());
        self.table.get(text).cloned().unwrap_or_else(|| text.to_string())
    }
}

/// Gateway backed by a scripted mock provider, without waits between tries
pub fn mock_gateway(target_language: &str, provider: MockProvider) -> TranslationGateway {
    TranslationGateway::new(target_language, Box::new(provider))
        .with_retry_policy(RetryPolicy::immediate(3))
}

/// Configuration whose providers cannot be reached
pub fn offline_config(target_language: &str) -> Config {
    let mut config = Config::default();
    config.target_language = target_language.to_string();
    config.translation.premium.enabled = false;
    config.translation.secondary.endpoint = UNREACHABLE_ENDPOINT.to_string();
    config.translation.secondary.timeout_secs = 2;
    config.translation.common.retry_count = 1;
    config.translation.common.retry_backoff_ms = 0;
    config
}

/// Collects the ids of a presentation's shapes through the document traits
pub fn walk_shape_ids<D: Presentation + ?Sized>(deck: &mut D) -> Vec<ShapeId> {
    fn visit(shape: &mut dyn ShapeNode, ids: &mut Vec<ShapeId>) {
        ids.push(shape.shape_id());
        if let Ok(ShapeContent::Group(children)) = shape.content_mut() {
            for child in children {
                visit(child, ids);
            }
        }
    }

    let mut ids = Vec::new();
    for slide in deck.slides_mut() {
        if let Ok(shapes) = slide.shapes_mut() {
            for shape in shapes {
                visit(shape, &mut ids);
            }
        }
    }
    ids
}

/// Texts of all runs of a text frame
pub fn run_texts(frame: &TextFrame) -> Vec<Vec<String>> {
    frame
        .paragraphs
        .iter()
        .map(|p| p.runs.iter().map(|r| r.text.clone()).collect())
        .collect()
}

/// Cell texts of a table shape, rows first
pub fn table_texts(shape: &Shape) -> Vec<String> {
    match &shape.kind {
        ShapeKind::Table { table } => table
            .rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter_map(|cell| cell.text_frame.as_ref().map(TextFrame::text))
            .collect(),
        _ => Vec::new(),
    }
}
