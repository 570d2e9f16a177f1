//! Note list query construction.
//!
//! # Responsibility
//! - Translate list parameters into one immutable filter/projection/sort value.
//!
//! # Invariants
//! - Building a query never fails; missing or empty parameters mean "no
//!   constraint".
//! - A non-empty search term always filters, selects the relevance score and
//!   sorts by it, even when it holds no searchable words.
//! - Without a text search, notes sort by creation time, oldest first.
//! - `folder_id` and `tag_id` are compared verbatim, never validated.

use crate::search::fts::build_match_expression;
use serde::Deserialize;

/// Raw list parameters as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteListParams {
    pub search_term: Option<String>,
    pub folder_id: Option<String>,
    pub tag_id: Option<String>,
}

/// Full-text predicate over title and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextMatch {
    /// FTS5 match expression.
    Expression(String),
    /// The search term holds no indexable words, so no note can match.
    Nothing,
}

/// Conjunctive note predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub text_match: Option<TextMatch>,
    pub folder_id: Option<String>,
    pub tag_id: Option<String>,
}

/// Computed fields to select in addition to the stored ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoteProjection {
    pub relevance_score: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteSort {
    /// Oldest first; ties keep insertion order.
    CreatedAscending,
    /// Best match first; ties fall back to creation order.
    RelevanceDescending,
}

/// Fully-formed list query consumed by the note repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteQuery {
    pub filter: NoteFilter,
    pub projection: NoteProjection,
    pub sort: NoteSort,
}

impl Default for NoteQuery {
    fn default() -> Self {
        build_note_query(&NoteListParams::default())
    }
}

/// Builds the note list query for the given parameters.
///
/// Empty parameter values are treated as absent.
pub fn build_note_query(params: &NoteListParams) -> NoteQuery {
    let text_match = match params.search_term.as_deref() {
        None | Some("") => None,
        Some(term) => Some(
            build_match_expression(term).map_or(TextMatch::Nothing, TextMatch::Expression),
        ),
    };

    let (projection, sort) = match text_match {
        Some(_) => (
            NoteProjection {
                relevance_score: true,
            },
            NoteSort::RelevanceDescending,
        ),
        None => (NoteProjection::default(), NoteSort::CreatedAscending),
    };

    NoteQuery {
        filter: NoteFilter {
            text_match,
            folder_id: non_empty_lowercase(params.folder_id.as_deref()),
            tag_id: non_empty_lowercase(params.tag_id.as_deref()),
        },
        projection,
        sort,
    }
}

// Stored ids are lowercase; anything else is compared as-is and simply
// matches nothing.
fn non_empty_lowercase(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.is_empty())
        .map(str::to_ascii_lowercase)
}
