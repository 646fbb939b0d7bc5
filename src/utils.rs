//! Shared helpers for the command implementations

use std::path::Path;

use recipe_reader::{ReaderError, Result};
use url::Url;

/// Truncate a string to max_len characters (not bytes), adding "..." if truncated.
/// Safe for non-ASCII content (emoji, CJK, etc).
pub fn truncate_str(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        chars[..max_len].iter().collect()
    } else {
        format!("{}...", chars[..max_len - 3].iter().collect::<String>())
    }
}

/// Parse a page URL from user input, adding https:// to bare domains
pub fn parse_page_url(input: &str) -> Result<Url> {
    let input = input.trim();
    match Url::parse(input) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) if input.contains('.') => {
            Ok(Url::parse(&format!("https://{}", input))?)
        }
        Err(e) => Err(e.into()),
    }
}

/// Read a saved HTML file, rejecting empty ones
pub fn read_markup_file(path: &Path) -> Result<String> {
    let markup = std::fs::read_to_string(path)?;
    if markup.trim().is_empty() {
        return Err(ReaderError::MarkupError(format!("{} is empty", path.display())));
    }
    Ok(markup)
}
