//! Digit stripping and display formatting.
//!
//! Every `format_*` helper strips its input to digits first, so it is
//! idempotent on already-formatted values and returns the original input
//! untouched when the digit count does not match.

/// Remove every character that is not an ASCII decimal digit.
pub fn strip_non_digits(value: &str) -> String {
  value.chars().filter(char::is_ascii_digit).collect()
}

/// `12345678909` → `123.456.789-09`.
pub fn format_national_id(value: &str) -> String {
  let d = strip_non_digits(value);
  if d.len() == 11 {
    format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..])
  } else {
    value.to_owned()
  }
}

/// `11999999999` → `(11) 99999-9999`, `1199999999` → `(11) 9999-9999`.
pub fn format_phone(value: &str) -> String {
  let d = strip_non_digits(value);
  match d.len() {
    11 => format!("({}) {}-{}", &d[0..2], &d[2..7], &d[7..]),
    10 => format!("({}) {}-{}", &d[0..2], &d[2..6], &d[6..]),
    _ => value.to_owned(),
  }
}

/// `01310100` → `01310-100`.
pub fn format_postal_code(value: &str) -> String {
  let d = strip_non_digits(value);
  if d.len() == 8 {
    format!("{}-{}", &d[0..5], &d[5..])
  } else {
    value.to_owned()
  }
}

/// A postal code is usable for lookup when it has exactly eight digits,
/// regardless of punctuation.
pub fn is_valid_postal_code(value: &str) -> bool {
  strip_non_digits(value).len() == 8
}

/// `YYYY-MM-DD` → `DD/MM/YYYY`. Anything that does not split into exactly
/// three hyphen-separated parts is returned unchanged.
pub fn format_date_display(iso: &str) -> String {
  if iso.is_empty() {
    return String::new();
  }
  let parts: Vec<&str> = iso.split('-').collect();
  match parts.as_slice() {
    [year, month, day] => format!("{day}/{month}/{year}"),
    _ => iso.to_owned(),
  }
}

/// `DD/MM/YYYY` → `YYYY-MM-DD`, zero-padding day and month to two digits.
/// Missing parts are treated as empty.
pub fn parse_date_display(display: &str) -> String {
  if display.is_empty() {
    return String::new();
  }
  let mut parts = display.split('/');
  let day = parts.next().unwrap_or_default();
  let month = parts.next().unwrap_or_default();
  let year = parts.next().unwrap_or_default();
  format!("{year}-{month:0>2}-{day:0>2}")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strip_keeps_only_digits() {
    assert_eq!(strip_non_digits("(11) 99999-9999"), "11999999999");
    assert_eq!(strip_non_digits("abc"), "");
    assert_eq!(strip_non_digits(""), "");
  }

  #[test]
  fn national_id_formatting() {
    assert_eq!(format_national_id("12345678901"), "123.456.789-01");
    assert_eq!(format_national_id("123.456.789-01"), "123.456.789-01");
    assert_eq!(format_national_id("123"), "123");
    assert_eq!(format_national_id("123456789012"), "123456789012");
    assert_eq!(format_national_id(""), "");
  }

  #[test]
  fn phone_formatting() {
    assert_eq!(format_phone("11999999999"), "(11) 99999-9999");
    assert_eq!(format_phone("1199999999"), "(11) 9999-9999");
    assert_eq!(format_phone("(11) 99999-9999"), "(11) 99999-9999");
    assert_eq!(format_phone("123"), "123");
    assert_eq!(format_phone("123456789012"), "123456789012");
    assert_eq!(format_phone(""), "");
  }

  #[test]
  fn postal_code_formatting() {
    assert_eq!(format_postal_code("01310100"), "01310-100");
    assert_eq!(format_postal_code("01310-100"), "01310-100");
    assert_eq!(format_postal_code("123"), "123");
    assert_eq!(format_postal_code("123456789"), "123456789");
    assert!(is_valid_postal_code("01310-100"));
    assert!(!is_valid_postal_code("0131-100"));
  }

  #[test]
  fn date_display() {
    assert_eq!(format_date_display("1990-05-15"), "15/05/1990");
    assert_eq!(format_date_display(""), "");
    assert_eq!(format_date_display("invalid"), "invalid");
    assert_eq!(format_date_display("1990-05"), "1990-05");
  }

  #[test]
  fn date_parsing_pads() {
    assert_eq!(parse_date_display("15/05/1990"), "1990-05-15");
    assert_eq!(parse_date_display("5/5/1990"), "1990-05-05");
    assert_eq!(parse_date_display(""), "");
    assert_eq!(parse_date_display("garbage"), "-00-garbage");
  }

  mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
      #[test]
      fn national_id_format_strip_roundtrip(digits in "[0-9]{11}") {
        prop_assert_eq!(strip_non_digits(&format_national_id(&digits)), digits);
      }

      #[test]
      fn date_display_roundtrip(y in 1000u32..=9999, m in 1u32..=12, d in 1u32..=31) {
        let iso = format!("{y:04}-{m:02}-{d:02}");
        prop_assert_eq!(parse_date_display(&format_date_display(&iso)), iso);
      }
    }
  }
}
