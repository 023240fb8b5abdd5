//! Free-text helpers: email shape check, capitalisation, truncation.

/// Unicode white space plus the byte-order mark, which browsers also treat
/// as a space in form input.
fn is_space(c: char) -> bool { c.is_whitespace() || c == '\u{feff}' }

/// Minimal email shape check: `local@domain.tld` where no part is empty and
/// none contains whitespace or a second `@`. Not RFC 5322.
pub fn validate_email(value: &str) -> bool {
  if value.chars().any(is_space) {
    return false;
  }
  let Some((local, domain)) = value.split_once('@') else {
    return false;
  };
  if local.is_empty() || domain.contains('@') {
    return false;
  }
  // Needs a dot with at least one character on each side.
  domain
    .char_indices()
    .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Lower-case the whole text, then upper-case the first character of every
/// space-separated word. Runs of spaces are preserved.
pub fn capitalize_words(text: &str) -> String {
  text
    .to_lowercase()
    .split(' ')
    .map(|word| {
      let mut chars = word.chars();
      match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
      }
    })
    .collect::<Vec<_>>()
    .join(" ")
}

/// Cut `text` to at most `max_length` characters, ending in `...` when cut.
pub fn truncate_text(text: &str, max_length: usize) -> String {
  if text.chars().count() <= max_length {
    return text.to_owned();
  }
  if max_length <= 3 {
    return "...".to_owned();
  }
  let mut out: String = text.chars().take(max_length - 3).collect();
  out.push_str("...");
  out
}
