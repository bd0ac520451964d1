/*!
 * Document tree access for translation.
 *
 * The processor never owns the document. It walks it through the traits in
 * this module, which hand out exclusive, call-scoped borrows of the nodes:
 * shapes, tables and text containers can be read, and only run text can be
 * written. Nothing here allows adding, removing or reordering nodes.
 *
 * - `model`: in-memory deck model implementing these traits
 * - `session`: loading and saving decks
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DocumentError;

pub use self::model::{
    Animation, Deck, Paragraph, Run, RunFormat, Shape, ShapeKind, Slide, Table, TableCell, TableRow,
    TextFrame,
};
pub use self::session::DeckSession;

pub mod model;
pub mod session;

/// Identifier of a shape, stable for the lifetime of a document.
///
/// External references such as animation bindings point at shapes by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(pub u32);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A formatting-homogeneous span of text
pub trait TextRun: Send {
    /// Current text
    fn text(&self) -> &str;

    /// Check that `text` could be stored in this run without changing it
    fn validate_text(&self, _text: &str) -> Result<(), DocumentError> {
        Ok(())
    }

    /// Replace the text, keeping the run and its formatting
    fn set_text(&mut self, text: &str) -> Result<(), DocumentError>;
}

/// An ordered sequence of runs
pub trait TextParagraph: Send {
    /// The runs in document order
    fn runs_mut(&mut self) -> Vec<&mut dyn TextRun>;
}

/// An ordered sequence of paragraphs (text frame, table cell, notes)
pub trait TextContainer: Send {
    /// The paragraphs in document order
    fn paragraphs_mut(&mut self) -> Result<Vec<&mut dyn TextParagraph>, DocumentError>;
}

/// Tabular content of a shape
pub trait TableContent: Send {
    /// Text containers of all cells, rows first, then cells in each row.
    ///
    /// Cells without a text container are skipped.
    fn cells_mut(&mut self) -> Result<Vec<&mut dyn TextContainer>, DocumentError>;
}

/// What a shape holds, borrowed for the duration of one visit
pub enum ShapeContent<'a> {
    /// Child shapes of a group, in their original order
    Group(Vec<&'a mut dyn ShapeNode>),
    /// A table
    Table(&'a mut dyn TableContent),
    /// A text frame
    Text(&'a mut dyn TextContainer),
    /// Anything without translatable text (pictures, connectors, media)
    Other,
}

/// A node of a slide's shape tree
pub trait ShapeNode: Send {
    /// Stable shape id
    fn shape_id(&self) -> ShapeId;

    /// Display name of the shape
    fn name(&self) -> &str;

    /// Borrow the shape's content
    fn content_mut(&mut self) -> Result<ShapeContent<'_>, DocumentError>;
}

/// One slide
pub trait SlideNode: Send {
    /// Top-level shapes in z-order
    fn shapes_mut(&mut self) -> Result<Vec<&mut dyn ShapeNode>, DocumentError>;

    /// Speaker notes, if the slide has any
    fn notes_mut(&mut self) -> Result<Option<&mut dyn TextContainer>, DocumentError>;
}

/// A whole presentation
pub trait Presentation: Send {
    /// Slides in presentation order
    fn slides_mut(&mut self) -> Vec<&mut dyn SlideNode>;
}
