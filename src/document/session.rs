use log::debug;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::errors::DocumentError;
use super::model::Deck;

// @module: Loading and saving deck documents

/// Deck file access
pub struct DeckSession;

impl DeckSession {
    // @method: Load a deck from a JSON document file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Deck, DocumentError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let deck: Deck = serde_json::from_str(&content)
            .map_err(|e| DocumentError::Malformed(format!("{}: {}", path.display(), e)))?;

        let dangling = deck.dangling_animations();
        if !dangling.is_empty() {
            debug!("{} animation binding(s) in {:?} point at unknown shapes", dangling.len(), path);
        }

        debug!("Loaded {} slide(s) from {:?}", deck.slides.len(), path);
        Ok(deck)
    }

    /// Save a deck.
    ///
    /// The document is written to a temporary file next to the destination
    /// and moved into place, so a failed save never leaves a partial file.
    pub fn save<P: AsRef<Path>>(deck: &Deck, path: P) -> Result<(), DocumentError> {
        let path = path.as_ref();

        let json = serde_json::to_string_pretty(deck)
            .map_err(|e| DocumentError::Malformed(e.to_string()))?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(json.as_bytes())?;
        temp.flush()?;
        temp.persist(path).map_err(|e| DocumentError::Io(e.error))?;

        debug!("Saved {} slide(s) to {:?}", deck.slides.len(), path);
        Ok(())
    }
}
