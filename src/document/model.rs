/*!
 * In-memory deck model.
 *
 * A JSON-serializable representation of a presentation's shape tree:
 * slides hold shapes, shapes are text boxes, tables, groups or pictures,
 * and text is stored as paragraphs of formatted runs. Speaker notes and
 * animation bindings (which reference shapes by id) travel with each slide.
 */

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::DocumentError;
use super::{
    Presentation, ShapeContent, ShapeId, ShapeNode, SlideNode, TableContent, TextContainer,
    TextParagraph, TextRun,
};

/// Complete deck document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    /// Deck title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Slides in presentation order
    #[serde(default)]
    pub slides: Vec<Slide>,
}

/// A slide with its shapes, notes and animations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Slide id
    pub id: u32,

    /// Top-level shapes in z-order
    #[serde(default)]
    pub shapes: Vec<Shape>,

    /// Speaker notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<TextFrame>,

    /// Animation timeline entries bound to shapes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub animations: Vec<Animation>,
}

/// One animation effect bound to a shape by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Target shape
    pub shape_id: ShapeId,

    /// Effect name (e.g. "fade", "fly-in")
    pub effect: String,

    /// Delay before the effect starts
    #[serde(default)]
    pub delay_ms: u32,
}

/// A shape on a slide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Stable id
    pub id: ShapeId,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// What the shape holds
    #[serde(flatten)]
    pub kind: ShapeKind,
}

/// Shape variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeKind {
    /// Text box or placeholder
    Text { text_frame: TextFrame },
    /// Table
    Table { table: Table },
    /// Group of shapes
    Group { shapes: Vec<Shape> },
    /// Picture
    Picture {
        #[serde(default)]
        description: String,
    },
    /// Connector, chart, media or anything else without text
    Other,
}

/// Ordered paragraphs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextFrame {
    /// Paragraphs in order
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

/// Ordered runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Indentation level
    #[serde(default)]
    pub level: u8,

    /// Runs in order
    #[serde(default)]
    pub runs: Vec<Run>,
}

/// Formatted text span
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Text content
    pub text: String,

    /// Character formatting
    #[serde(default)]
    pub format: RunFormat,
}

/// Character formatting of a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunFormat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_pt: Option<f32>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    /// Hex RGB, e.g. "C00000"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Table rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub rows: Vec<TableRow>,
}

/// Table cells of one row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(default)]
    pub cells: Vec<TableCell>,
}

/// One table cell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell text; merged-away cells have none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_frame: Option<TextFrame>,
}

impl Deck {
    /// Create a deck from slides
    pub fn new(slides: Vec<Slide>) -> Self {
        Self { title: None, slides }
    }

    /// Ids of every shape, depth-first in document order
    pub fn shape_ids(&self) -> Vec<ShapeId> {
        let mut ids = Vec::new();
        for slide in &self.slides {
            for shape in &slide.shapes {
                shape.collect_ids(&mut ids);
            }
        }
        ids
    }

    /// Animation bindings whose target shape no longer exists
    pub fn dangling_animations(&self) -> Vec<(u32, ShapeId)> {
        let mut dangling = Vec::new();
        for slide in &self.slides {
            let mut ids = Vec::new();
            for shape in &slide.shapes {
                shape.collect_ids(&mut ids);
            }
            let ids: HashSet<ShapeId> = ids.into_iter().collect();

            for animation in &slide.animations {
                if !ids.contains(&animation.shape_id) {
                    dangling.push((slide.id, animation.shape_id));
                }
            }
        }
        dangling
    }
}

impl Slide {
    /// Create a slide
    pub fn new(id: u32, shapes: Vec<Shape>) -> Self {
        Self {
            id,
            shapes,
            notes: None,
            animations: Vec::new(),
        }
    }

    /// Attach speaker notes
    pub fn with_notes(mut self, notes: TextFrame) -> Self {
        self.notes = Some(notes);
        self
    }

    /// Bind an animation effect to a shape
    pub fn with_animation(mut self, shape_id: ShapeId, effect: impl Into<String>) -> Self {
        self.animations.push(Animation {
            shape_id,
            effect: effect.into(),
            delay_ms: 0,
        });
        self
    }
}

impl Shape {
    /// Text box shape
    pub fn text_box(id: u32, name: impl Into<String>, text_frame: TextFrame) -> Self {
        Self {
            id: ShapeId(id),
            name: name.into(),
            kind: ShapeKind::Text { text_frame },
        }
    }

    /// Table shape built from plain cell texts
    pub fn table<R, C>(id: u32, name: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|cells| TableRow {
                cells: cells
                    .into_iter()
                    .map(|text| TableCell {
                        text_frame: Some(TextFrame::from_text(text)),
                    })
                    .collect(),
            })
            .collect();

        Self {
            id: ShapeId(id),
            name: name.into(),
            kind: ShapeKind::Table { table: Table { rows } },
        }
    }

    /// Group shape
    pub fn group(id: u32, name: impl Into<String>, shapes: Vec<Shape>) -> Self {
        Self {
            id: ShapeId(id),
            name: name.into(),
            kind: ShapeKind::Group { shapes },
        }
    }

    /// Picture shape
    pub fn picture(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: ShapeId(id),
            name: name.into(),
            kind: ShapeKind::Picture { description: String::new() },
        }
    }

    /// Child shapes when this is a group
    pub fn children(&self) -> &[Shape] {
        match &self.kind {
            ShapeKind::Group { shapes } => shapes,
            _ => &[],
        }
    }

    /// Text frame when this is a text shape
    pub fn text_frame(&self) -> Option<&TextFrame> {
        match &self.kind {
            ShapeKind::Text { text_frame } => Some(text_frame),
            _ => None,
        }
    }

    fn collect_ids(&self, ids: &mut Vec<ShapeId>) {
        ids.push(self.id);
        for child in self.children() {
            child.collect_ids(ids);
        }
    }
}

impl TextFrame {
    /// One paragraph per line, one unformatted run per paragraph
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            paragraphs: text.split('\n').map(|line| Paragraph::from_runs(vec![Run::new(line)])).collect(),
        }
    }

    /// Frame from paragraphs
    pub fn from_paragraphs(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }

    /// Paragraph texts joined by newlines
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Paragraph {
    /// Paragraph from runs
    pub fn from_runs(runs: Vec<Run>) -> Self {
        Self { level: 0, runs }
    }

    /// Concatenated run texts
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

impl Run {
    /// Unformatted run
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: RunFormat::default(),
        }
    }

    /// Bold run
    pub fn bold(text: impl Into<String>) -> Self {
        let mut run = Self::new(text);
        run.format.bold = true;
        run
    }

    /// Run with a font color
    pub fn colored(text: impl Into<String>, color: impl Into<String>) -> Self {
        let mut run = Self::new(text);
        run.format.color = Some(color.into());
        run
    }
}

/// Characters that cannot be stored in a presentation (not allowed in XML 1.0)
fn first_invalid_char(text: &str) -> Option<char> {
    text.chars().find(|c| {
        let code = *c as u32;
        (code < 0x20 && !matches!(c, '\t' | '\n' | '\r')) || code == 0xFFFE || code == 0xFFFF
    })
}

impl TextRun for Run {
    fn text(&self) -> &str {
        &self.text
    }

    fn validate_text(&self, text: &str) -> Result<(), DocumentError> {
        match first_invalid_char(text) {
            Some(c) => Err(DocumentError::InvalidText {
                reason: format!("character U+{:04X} is not allowed in run text", c as u32),
            }),
            None => Ok(()),
        }
    }

    fn set_text(&mut self, text: &str) -> Result<(), DocumentError> {
        self.validate_text(text)?;
        self.text = text.to_string();
        Ok(())
    }
}

impl TextParagraph for Paragraph {
    fn runs_mut(&mut self) -> Vec<&mut dyn TextRun> {
        self.runs.iter_mut().map(|run| run as &mut dyn TextRun).collect()
    }
}

impl TextContainer for TextFrame {
    fn paragraphs_mut(&mut self) -> Result<Vec<&mut dyn TextParagraph>, DocumentError> {
        Ok(self.paragraphs.iter_mut().map(|p| p as &mut dyn TextParagraph).collect())
    }
}

impl TableContent for Table {
    fn cells_mut(&mut self) -> Result<Vec<&mut dyn TextContainer>, DocumentError> {
        Ok(self
            .rows
            .iter_mut()
            .flat_map(|row| row.cells.iter_mut())
            .filter_map(|cell| cell.text_frame.as_mut())
            .map(|frame| frame as &mut dyn TextContainer)
            .collect())
    }
}

impl ShapeNode for Shape {
    fn shape_id(&self) -> ShapeId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn content_mut(&mut self) -> Result<ShapeContent<'_>, DocumentError> {
        Ok(match &mut self.kind {
            ShapeKind::Group { shapes } => {
                ShapeContent::Group(shapes.iter_mut().map(|s| s as &mut dyn ShapeNode).collect())
            },
            ShapeKind::Table { table } => ShapeContent::Table(table),
            ShapeKind::Text { text_frame } => ShapeContent::Text(text_frame),
            ShapeKind::Picture { .. } | ShapeKind::Other => ShapeContent::Other,
        })
    }
}

impl SlideNode for Slide {
    fn shapes_mut(&mut self) -> Result<Vec<&mut dyn ShapeNode>, DocumentError> {
        Ok(self.shapes.iter_mut().map(|s| s as &mut dyn ShapeNode).collect())
    }

    fn notes_mut(&mut self) -> Result<Option<&mut dyn TextContainer>, DocumentError> {
        Ok(self.notes.as_mut().map(|notes| notes as &mut dyn TextContainer))
    }
}

impl Presentation for Deck {
    fn slides_mut(&mut self) -> Vec<&mut dyn SlideNode> {
        self.slides.iter_mut().map(|s| s as &mut dyn SlideNode).collect()
    }
}
