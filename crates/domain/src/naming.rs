//! Directory naming for persisted objects.

/// Name used when a title sanitizes to nothing (e.g. `"!!!"`).
pub const FALLBACK_DIRECTORY_NAME: &str = "untitled";

/// Derives a filesystem-safe directory name from an object title.
///
/// The title is lowercased, whitespace becomes `-`, and every character that is
/// not an ASCII letter, digit or hyphen is dropped. Collision suffixes (`-2`,
/// `-3`, ...) are the store's job, not this function's.
#[must_use]
pub fn directory_name(title: &str) -> String {
    let name: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();

    if name.is_empty() {
        FALLBACK_DIRECTORY_NAME.to_string()
    } else {
        name
    }
}

/// Returns the `n`-th collision candidate for a base name.
///
/// `1` is the base name itself; `2` and above append `-n`.
#[must_use]
pub fn numbered_name(base: &str, n: u32) -> String {
    if n <= 1 {
        base.to_string()
    } else {
        format!("{base}-{n}")
    }
}
