use derive_new::new;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure modes of a section history request
///
/// Ambiguity is surfaced distinctly from not-found: the caller can retry
/// with a linkname hint, while a not-found reference is a dead end. Callers
/// should present any of these as "history temporarily unavailable";
/// diagnostics are for logs only.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("no section matches reference `{reference}` in {repro}")]
    SectionNotFound { reference: String, repro: String },

    #[error(
        "reference `{reference}` is ambiguous across output languages: {}",
        .languages.join(", ")
    )]
    AmbiguousReference {
        reference: String,
        languages: Vec<String>,
    },

    #[error("initial snapshot unavailable")]
    MissingSnapshot(#[source] anyhow::Error),

    #[error("content store unavailable")]
    StoreUnavailable(#[source] anyhow::Error),
}

/// One per-language candidate a human-facing section reference can map to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct SectionCandidate {
    pub language: String,
    pub content_id: String,
    pub file_name: String,
    pub linkname: String,
}

/// Outcome of reference resolution
///
/// `used_default_language` is true when narrowing could not isolate a single
/// language and the project default was taken as a last resort; the caller
/// must be informed of that fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSection {
    pub candidate: SectionCandidate,
    pub used_default_language: bool,
}

/// Map a human-facing section reference onto exactly one candidate
///
/// A single candidate is used directly. Multiple candidates are narrowed by
/// a case-insensitive linkname match first; if exactly one survives it is
/// used automatically. Otherwise the project's default output language is
/// tried as a last resort (flagged to the caller); when the default language
/// is not among the candidates either, the ambiguity is surfaced with the
/// languages found as a disambiguation hint.
pub fn resolve_section(
    reference: &str,
    repro: &str,
    linkname_hint: Option<&str>,
    candidates: Vec<SectionCandidate>,
    default_language: &str,
) -> Result<ResolvedSection, HistoryError> {
    if candidates.is_empty() {
        return Err(HistoryError::SectionNotFound {
            reference: reference.to_string(),
            repro: repro.to_string(),
        });
    }

    if let [only] = candidates.as_slice() {
        return Ok(ResolvedSection {
            candidate: only.clone(),
            used_default_language: false,
        });
    }

    let narrowed: Vec<&SectionCandidate> = match linkname_hint {
        Some(hint) => candidates
            .iter()
            .filter(|candidate| candidate.linkname.to_lowercase() == hint.to_lowercase())
            .collect(),
        None => Vec::new(),
    };

    if let [only] = narrowed.as_slice() {
        return Ok(ResolvedSection {
            candidate: (*only).clone(),
            used_default_language: false,
        });
    }

    // Narrowing failed to isolate one language; fall back to the project
    // default if it is among the remaining candidates.
    let pool: Vec<&SectionCandidate> = if narrowed.is_empty() {
        candidates.iter().collect()
    } else {
        narrowed
    };

    if let Some(default) = pool
        .iter()
        .find(|candidate| candidate.language == default_language)
    {
        tracing::info!(
            reference,
            default_language,
            "ambiguous section reference resolved via default output language"
        );
        return Ok(ResolvedSection {
            candidate: (*default).clone(),
            used_default_language: true,
        });
    }

    Err(HistoryError::AmbiguousReference {
        reference: reference.to_string(),
        languages: pool
            .iter()
            .map(|candidate| candidate.language.clone())
            .collect(),
    })
}
