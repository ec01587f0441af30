//! CSV serialization for note exports.
//!
//! Builds the full document in memory; a learner's note history is small by
//! construction (single-user tool), so streaming would buy nothing.

use tutorlog_core::{Learner, Note};

/// Fixed header row for note exports.
pub const CSV_HEADER: &str = "learner,language,level,note_id,note_created_at,tags,content";

/// Quote a field per RFC 4180: fields containing a comma, double quote, or
/// line break are wrapped in quotes with embedded quotes doubled.
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Serialize a learner's notes to a CSV document, one row per note in
/// stored (creation) order. Absent level/tags render as empty fields.
pub fn notes_csv(learner: &Learner, notes: &[Note]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + notes.len() * 64);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for note in notes {
        let row = [
            csv_field(&learner.name),
            csv_field(&learner.language),
            csv_field(learner.level.as_deref().unwrap_or("")),
            note.id.to_string(),
            note.created_at_utc.to_rfc3339(),
            csv_field(note.tags.as_deref().unwrap_or("")),
            csv_field(&note.content),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// Attachment filename for a learner's export: spaces become underscores,
/// suffixed `_notes.csv`. Double quotes are stripped — they would close the
/// quoted-string in the `Content-Disposition` header early.
pub fn export_filename(learner_name: &str) -> String {
    format!(
        "{}_notes.csv",
        learner_name.replace('"', "").replace(' ', "_")
    )
}
