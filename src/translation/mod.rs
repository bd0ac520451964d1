/*!
 * Text translation for deck content.
 *
 * - `gateway`: single-text translation with caching, retries and provider fallback
 * - `cache`: per-gateway translation cache
 * - `redistribution`: splitting a translated paragraph back across its runs
 */

// Re-export main types for easier usage
pub use self::gateway::{GatewayStats, RetryPolicy, Translate, TranslationGateway};
pub use self::redistribution::redistribute;

// Submodules
pub mod cache;
pub mod gateway;
pub mod redistribution;
