//! Turning what the user typed into something the sorts accept.

use rand::Rng;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("no numbers in {text:?}, expected a comma-separated list such as \"64, 34, 25\"")]
    NoNumbers { text: String },
    #[error("{len} numbers given, at most {max} can be traced")]
    TooLong { len: usize, max: usize },
}

/// Splits `text` on commas and keeps the leading integer of every token.
///
/// Surrounding whitespace is ignored. A token contributes its optional sign and the digits
/// right after it, so `"4.5"` gives 4 and `"12abc"` gives 12. Tokens without leading digits
/// and values outside `i32` are dropped.
pub fn parse_sequence(text: &str) -> Vec<i32> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| match leading_int(token) {
            Some(value) => Some(value),
            None => {
                debug!(token, "dropping token");
                None
            }
        })
        .collect()
}

fn leading_int(token: &str) -> Option<i32> {
    let sign_len = usize::from(token.starts_with(|c: char| c == '+' || c == '-'));
    let digit_len = token[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digit_len == 0 {
        return None;
    }

    let prefix = &token[..sign_len + digit_len];
    if prefix.len() != token.len() {
        debug!(token, prefix, "ignoring trailing characters");
    }

    prefix.parse().ok()
}

/// Rejects inputs longer than `max`.
pub fn check_len(values: &[i32], max: usize) -> Result<(), InputError> {
    if values.len() > max {
        return Err(InputError::TooLong {
            len: values.len(),
            max,
        });
    }

    Ok(())
}

/// Like [`parse_sequence`], but nothing usable is an error.
pub fn parse_nonempty(text: &str) -> Result<Vec<i32>, InputError> {
    let values = parse_sequence(text);

    if values.is_empty() {
        return Err(InputError::NoNumbers {
            text: text.to_owned(),
        });
    }

    Ok(values)
}

/// `len` values drawn uniformly from `0..max`. A non-positive `max` yields all zeros.
pub fn random_sequence<R>(len: usize, max: i32, rng: &mut R) -> Vec<i32>
where
    R: Rng + ?Sized,
{
    let max = max.max(1);

    (0..len).map(|_| rng.gen_range(0..max)).collect()
}
