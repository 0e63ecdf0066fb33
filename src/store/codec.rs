//! Line codec for the catalog file.
//!
//! One record per line: `AUTHOR;TITLE;AVAILABLE`. Decoding is tolerant:
//! anything that doesn't split into exactly three fields is dropped. Encoding
//! always writes author-major, so a file whose lines interleave authors is
//! normalized on the next save.

use thiserror::Error;

use crate::domain::AuthorGroup;

/// Separator between the fields of a line
pub const FIELD_SEPARATOR: char = ';';

/// Reasons a string cannot be stored as an author or title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("value is empty")]
    Empty,

    #[error("value contains the field separator '{}'", FIELD_SEPARATOR)]
    Separator,

    #[error("value contains a line break")]
    LineBreak,

    #[error("value has leading or trailing whitespace, which is lost on reload")]
    Whitespace,
}

/// Decode file contents into author groups (first-seen author order)
pub fn decode(contents: &str) -> Vec<AuthorGroup> {
    let mut groups: Vec<AuthorGroup> = Vec::new();

    for line in contents.lines() {
        let Some((author, title, available)) = parse_line(line) else {
            continue;
        };

        match groups.iter_mut().find(|g| g.author() == author) {
            Some(group) => group.push(title, available),
            None => groups.push(AuthorGroup::new(author, title, available)),
        }
    }

    groups
}

/// Encode author groups as file contents, one terminated line per record
pub fn encode(groups: &[AuthorGroup]) -> String {
    let mut out = String::new();

    for group in groups {
        for record in group.records() {
            out.push_str(&format!(
                "{}{sep}{}{sep}{}\n",
                group.author(),
                record.title(),
                record.is_available(),
                sep = FIELD_SEPARATOR,
            ));
        }
    }

    out
}

/// Check that a value survives an encode/decode cycle unchanged
pub fn check_field(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Empty);
    }
    if value.contains(FIELD_SEPARATOR) {
        return Err(FieldError::Separator);
    }
    if value.contains(['\n', '\r']) {
        return Err(FieldError::LineBreak);
    }
    if value.trim() != value {
        return Err(FieldError::Whitespace);
    }
    Ok(())
}

/// Split a line into (author, title, available)
fn parse_line(line: &str) -> Option<(&str, &str, bool)> {
    let mut fields = line.split(FIELD_SEPARATOR);

    let author = fields.next()?.trim();
    let title = fields.next()?.trim();
    let available = fields.next()?.trim();

    if fields.next().is_some() {
        return None;
    }

    Some((author, title, available.eq_ignore_ascii_case("true")))
}
