//! CQL clause composition and encoding.
//!
//! # Query shape
//!
//! ```text
//! alma.authority_id=<id> AND alma.creator=<name> AND (alma.main_pub_date=<y-40> OR ... OR alma.main_pub_date=<y>) sortBy alma.main_pub_date/sort.descending
//! ```
//!
//! Every part is optional. Present clauses keep the order above and are
//! joined with ` AND ` without outer parentheses. The sort suffix is appended
//! to whatever was joined, even an empty string, which leaves a leading space.
//!
//! Values containing a space are wrapped in double quotes verbatim. Embedded
//! quote characters are not escaped, so a value such as `Mock "Jr"` yields a
//! malformed CQL fragment.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;

use crate::SearchCriteria;

/// Context set prefix shared by every Alma index.
pub const TERM_SET: &str = "alma";
pub const AUTHORITY_ID_INDEX: &str = "authority_id";
pub const CREATOR_INDEX: &str = "creator";
pub const PUBLICATION_DATE_INDEX: &str = "main_pub_date";
pub const SORT_MODIFIER: &str = "sort.descending";
/// Number of publication years covered by the recency filter, current year included.
pub const RECENCY_WINDOW_YEARS: i32 = 41;

const TERM_PATH_SEPARATOR: &str = ".";
const MODIFIER_SEPARATOR: &str = "/";
const RELATION: &str = "=";
const STRING_DELIMITER: char = '"';
const LOGICAL_AND: &str = " AND ";
const LOGICAL_OR: &str = " OR ";
const SORT_BY: &str = " sortBy ";

/// Characters escaped when the query is embedded in a URL path segment.
///
/// Unreserved characters plus `! $ ' * , . : = @ - _ ~` pass through; anything
/// that is structural in a URL (slash, query and fragment markers, parameter
/// separators) or unsafe in one (space, quotes, brackets) is escaped.
/// Non-ASCII input is always UTF-8 percent-encoded.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'(')
    .add(b')')
    .add(b'+')
    .add(b'/')
    .add(b';')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Fully qualified index name, e.g. `alma.creator`.
pub fn index(field: &str) -> String {
    [TERM_SET, field].join(TERM_PATH_SEPARATOR)
}

/// Builds the CQL query text for `criteria` as of `today`.
pub fn build(criteria: &SearchCriteria, today: NaiveDate) -> String {
    let mut clauses = Vec::with_capacity(3);

    if let Some(authority_id) = criteria.authority_id.as_deref() {
        clauses.push(term_clause(&index(AUTHORITY_ID_INDEX), authority_id));
    }
    if let Some(creator) = criteria.creator.as_deref() {
        clauses.push(term_clause(&index(CREATOR_INDEX), creator));
    }
    if criteria.recency_filter {
        clauses.push(date_clause(today.year()));
    }

    let mut query = clauses.join(LOGICAL_AND);

    if criteria.sort_descending_by_date {
        query.push_str(SORT_BY);
        query.push_str(&index(PUBLICATION_DATE_INDEX));
        query.push_str(MODIFIER_SEPARATOR);
        query.push_str(SORT_MODIFIER);
    }

    query
}

/// Builds the query and escapes it for use as a URL path segment.
pub fn encode(criteria: &SearchCriteria, today: NaiveDate) -> String {
    escape_path_segment(&build(criteria, today))
}

fn escape_path_segment(text: &str) -> String {
    utf8_percent_encode(text, PATH_SEGMENT).to_string()
}

fn term_clause(index: &str, value: &str) -> String {
    let mut clause = String::with_capacity(index.len() + value.len() + 3);
    clause.push_str(index);
    clause.push_str(RELATION);
    if value.contains(' ') {
        clause.push(STRING_DELIMITER);
        clause.push_str(value);
        clause.push(STRING_DELIMITER);
    } else {
        clause.push_str(value);
    }
    clause
}

fn date_clause(current_year: i32) -> String {
    let index = index(PUBLICATION_DATE_INDEX);
    let first_year = current_year - (RECENCY_WINDOW_YEARS - 1);
    let years: Vec<String> = (first_year..=current_year)
        .map(|year| term_clause(&index, &year.to_string()))
        .collect();

    format!("({})", years.join(LOGICAL_OR))
}

/// A finished query in both its plain and URL-encoded forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CqlQuery {
    text: String,
    encoded: String,
}

impl CqlQuery {
    pub fn new(criteria: &SearchCriteria, today: NaiveDate) -> Self {
        let text = build(criteria, today);
        let encoded = escape_path_segment(&text);
        Self { text, encoded }
    }

    /// Plain CQL text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Path-segment-escaped CQL text, ready to splice into a request URL.
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for CqlQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
