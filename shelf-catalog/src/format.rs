//! Canonical row format.
//!
//! Columns are `id,title,status,tags,image`. The title is always wrapped in
//! double quotes and any `"` inside it becomes `'`, so a title never needs
//! escaping. Every other field is written raw unless it contains a comma,
//! quote or line break, in which case it gets standard CSV quoting. Line
//! breaks are flattened to spaces so each row is one physical line.

use std::borrow::Cow;

use shelf_core::Record;

pub const HEADER: &str = "id,title,status,tags,image";

/// Separator used to store the tag list in a single column.
pub const TAG_SEPARATOR: &str = ";";

/// Character that replaces `"` inside titles.
const TITLE_QUOTE_REPLACEMENT: &str = "'";

/// Render a record as one catalog line, without the trailing newline.
pub fn format_row(record: &Record) -> String {
    format_fields(
        &record.id,
        &record.title,
        record.status.as_str(),
        &record.tags.join(TAG_SEPARATOR),
        &record.image,
    )
}

pub(crate) fn format_fields(id: &str, title: &str, status: &str, tags: &str, image: &str) -> String {
    [
        quote_if_needed(id),
        Cow::Owned(quote_title(title)),
        quote_if_needed(status),
        quote_if_needed(tags),
        quote_if_needed(image),
    ]
    .join(",")
}

/// Wrap a title in quotes, replacing inner quotes rather than escaping them.
pub fn quote_title(title: &str) -> String {
    let clean = single_line(title).replace('"', TITLE_QUOTE_REPLACEMENT);
    format!("\"{clean}\"")
}

/// Quote a field only when it would otherwise break column alignment.
pub fn quote_if_needed(field: &str) -> Cow<'_, str> {
    let field = single_line(field);
    if field.contains([',', '"']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        field
    }
}

fn single_line(s: &str) -> Cow<'_, str> {
    if s.contains(['\r', '\n']) {
        Cow::Owned(s.replace("\r\n", " ").replace(['\r', '\n'], " "))
    } else {
        Cow::Borrowed(s)
    }
}

/// Split one physical catalog line into fields.
///
/// Returns `None` when the line has an odd number of `"`, since a quoted
/// field would otherwise swallow the following lines.
pub(crate) fn parse_line(line: &str) -> Option<Vec<String>> {
    if line.matches('"').count() % 2 != 0 {
        return None;
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    let record = reader.byte_records().next()?.ok()?;
    Some(
        record
            .iter()
            .map(|field| String::from_utf8_lossy(field).into_owned())
            .collect(),
    )
}

/// The id column of one physical line, tolerating unbalanced quotes.
pub(crate) fn first_field(line: &str) -> Option<String> {
    let id = match parse_line(line) {
        Some(fields) => fields.into_iter().next()?,
        None => line.split(',').next()?.trim().trim_matches('"').to_string(),
    };
    let id = id.trim();
    (!id.is_empty()).then(|| id.to_string())
}
