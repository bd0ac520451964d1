//! Language utilities for target language handling
//!
//! Target languages are given by English name ("slovenian") or by ISO code.
//! Names in the supported table map to their ISO 639-1 code; anything else
//! passes through lower-cased so providers can still try it.

use anyhow::{Result, anyhow};
use isolang::Language;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Supported target languages, in display order
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("slovenian", "sl"),
    ("croatian", "hr"),
    ("serbian", "sr"),
    ("english", "en"),
    ("german", "de"),
    ("french", "fr"),
    ("spanish", "es"),
    ("italian", "it"),
];

static LANGUAGE_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    SUPPORTED_LANGUAGES.iter().copied().collect()
});

/// Language code type
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-3 (3-letter) code
    Part3,
}

/// Normalize a target language name to the code sent to providers.
///
/// `"Slovenian"` becomes `"sl"`; unknown values are trimmed and lower-cased.
pub fn normalize_target_language(language: &str) -> String {
    let lowered = language.trim().to_lowercase();
    match LANGUAGE_CODES.get(lowered.as_str()) {
        Some(code) => (*code).to_string(),
        None => lowered,
    }
}

/// Check whether a language name or code is in the supported table
pub fn is_supported_language(language: &str) -> bool {
    let lowered = language.trim().to_lowercase();
    SUPPORTED_LANGUAGES
        .iter()
        .any(|(name, code)| *name == lowered || *code == lowered)
}

/// Comma separated list of supported language names
pub fn supported_language_names() -> String {
    SUPPORTED_LANGUAGES
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-3 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 && Language::from_639_1(&normalized_code).is_some() {
        return Ok(LanguageCodeType::Part1);
    }

    if normalized_code.len() == 3 && Language::from_639_3(&normalized_code).is_some() {
        return Ok(LanguageCodeType::Part3);
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Get the English language name for a target language name or code
pub fn get_language_name(language: &str) -> Result<String> {
    let code = normalize_target_language(language);

    let lang = match code.len() {
        2 => Language::from_639_1(&code),
        3 => Language::from_639_3(&code),
        _ => None,
    }
    .ok_or_else(|| anyhow!("Unknown language: {}", language))?;

    Ok(lang.to_name().to_string())
}
