//! CSV header normalization.

use std::collections::HashSet;

/// Normalizes raw header names.
///
/// Names are trimmed, a leading byte order mark is dropped, blank names become
/// `Unnamed: <idx>` and repeated names get a `.1`, `.2`, … suffix so every
/// column of the frame has a distinct name.
pub fn normalize_headers<'a, I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut headers = Vec::new();

    for (idx, value) in raw.into_iter().enumerate() {
        let cleaned = value.trim_start_matches('\u{feff}').trim();
        let base = if cleaned.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            cleaned.to_string()
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(name.clone());
        headers.push(name);
    }

    headers
}
