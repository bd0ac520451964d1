/*!
 * # slidelingo - formatting-preserving presentation translator
 *
 * A Rust library for translating the text of presentation decks while
 * keeping their structure and run formatting intact.
 *
 * ## Features
 *
 * - Translates text boxes, table cells, grouped shapes and speaker notes
 * - Paragraph-level translation with the result redistributed over the
 *   original runs, so fonts, sizes and colors stay where they were
 * - Premium (DeepL) and keyless (Google) providers with bounded retries,
 *   exponential backoff and fallback to the original text
 * - Per-job translation cache
 * - Node-local error containment with per-job statistics
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: Document tree traits, the deck model and deck files
 * - `deck_processor`: Shape tree walker and processing statistics
 * - `translation`: Translation gateway:
 *   - `translation::gateway`: Filtering, caching, retries and provider fallback
 *   - `translation::cache`: Translation cache
 *   - `translation::redistribution`: Splitting a translation across runs
 * - `providers`: Translation service clients:
 *   - `providers::deepl`: DeepL API client
 *   - `providers::google`: Google Translate client
 *   - `providers::mock`: Scriptable provider for tests
 * - `app_controller`: Job boundary and folder mode
 * - `language_utils`: Target language table and ISO code utilities
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod deck_processor;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, JobOutcome, JobReport};
pub use deck_processor::{DeckProcessor, ProcessingStats};
pub use document::{Deck, DeckSession};
pub use errors::{AppError, DocumentError, ErrorKind, ProviderError};
pub use language_utils::{get_language_name, normalize_target_language};
pub use translation::{Translate, TranslationGateway};
