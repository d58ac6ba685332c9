//! Worksheet naming.

use std::collections::HashSet;

/// Longest worksheet name spreadsheet applications accept.
pub const MAX_SHEET_NAME_CHARS: usize = 31;

const FORBIDDEN: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Makes a rule name usable as a worksheet name.
///
/// Spaces and forbidden characters become `_`, then the name is cut to
/// [`MAX_SHEET_NAME_CHARS`] characters.
pub fn sanitize_sheet_name(rule: &str) -> String {
    let cleaned: String = rule
        .chars()
        .map(|c| {
            if c.is_whitespace() || FORBIDDEN.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .take(MAX_SHEET_NAME_CHARS)
        .collect();
    // Names may not start or end with an apostrophe.
    let trimmed = cleaned.trim_matches('\'');
    if trimmed.is_empty() {
        "regle".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Hands out unique worksheet names for one workbook.
///
/// Names are compared case-insensitively; a collision gets a `~2`, `~3`, …
/// suffix, cutting the base further so the result still fits.
#[derive(Debug, Default)]
pub struct SheetNames {
    used: HashSet<String>,
}

impl SheetNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, rule: &str) -> String {
        let base = sanitize_sheet_name(rule);
        if self.used.insert(base.to_lowercase()) {
            return base;
        }
        let mut n = 2usize;
        loop {
            let suffix = format!("~{n}");
            let keep = MAX_SHEET_NAME_CHARS.saturating_sub(suffix.chars().count());
            let candidate: String = base.chars().take(keep).chain(suffix.chars()).collect();
            if self.used.insert(candidate.to_lowercase()) {
                return candidate;
            }
            n += 1;
        }
    }
}
