use crate::entry::FitnessEntry;
use std::borrow::Cow;
use std::fmt::Write;

pub const CSV_HEADER: &str = "date,steps,calories,distance,active_minutes";
pub const CSV_FILE_NAME: &str = "fitness_data.csv";

#[inline]
fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// renders the entries as csv with a header row, in stored order
pub fn to_csv(entries: &[FitnessEntry]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + entries.len() * 48);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for e in entries {
        // writing into a String cannot fail
        let _ = writeln!(
            out,
            "{},{},{},{},{}",
            escape(&e.date),
            e.steps,
            e.calories,
            e.distance,
            e.active_minutes
        );
    }
    out
}
