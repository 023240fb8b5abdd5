//! Check-digit validation for the 11-digit national identification number.
//!
//! The last two digits are check digits computed over the preceding nine
//! (and then ten) digits with descending weights, modulo 11.

/// Check digit over `digits` with weights `first_weight, first_weight - 1, …`.
/// A remainder of 10 maps to 0.
fn check_digit(digits: &[u32], first_weight: u32) -> u32 {
  let sum: u32 = digits
    .iter()
    .zip((0..=first_weight).rev())
    .map(|(d, w)| d * w)
    .sum();
  match (sum * 10) % 11 {
    10 => 0,
    r => r,
  }
}

/// Whether `value` (formatted or bare) is a valid national id: exactly 11
/// digits, not all identical, and both check digits matching.
pub fn validate_national_id(value: &str) -> bool {
  let digits: Vec<u32> = value.chars().filter_map(|c| c.to_digit(10)).collect();

  if digits.len() != 11 {
    return false;
  }
  if digits.iter().all(|&d| d == digits[0]) {
    return false;
  }

  check_digit(&digits[..9], 10) == digits[9]
    && check_digit(&digits[..10], 11) == digits[10]
}
