//! SQLite FTS5 match-expression helpers for note search.
//!
//! # Invariants
//! - Every user term is quoted, so search text never raises FTS syntax errors.
//! - A note matches when any term matches; ranking favors notes matching more.

/// FTS5 table indexing note `title` and `content`.
pub(crate) const NOTES_FTS_TABLE: &str = "notes_fts";

/// Relevance expression; higher is more relevant.
///
/// `bm25` returns smaller values for better matches, hence the negation.
pub(crate) const RELEVANCE_SCORE_SQL: &str = "-bm25(notes_fts)";

/// Builds an FTS5 match expression from free-form search text.
///
/// Terms without letters or digits are dropped: the tokenizer would index
/// nothing for them. Returns `None` when no searchable term remains; callers
/// treat that as a search nothing can match.
pub fn build_match_expression(text: &str) -> Option<String> {
    let terms = text
        .split_whitespace()
        .filter(|term| term.chars().any(char::is_alphanumeric))
        .map(escape_fts_term)
        .collect::<Vec<_>>();

    if terms.is_empty() {
        return None;
    }

    Some(terms.join(" OR "))
}

fn escape_fts_term(raw: &str) -> String {
    let escaped = raw.replace('"', "\"\"");
    format!("\"{escaped}\"")
}
