//! Lenient number parsing for script arguments.
//!
//! Script numbers are read from the longest valid numeric prefix of a token,
//! so `"0.5)"` reads as `0.5` and `"12px"` as `12`.

/// Parses the leading floating point literal of `token`, or NaN if there is none.
pub(crate) fn parse_float(token: &str) -> f32 {
    let token = token.trim_start();
    let bytes = token.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if token[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f32::NEG_INFINITY
        } else {
            f32::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return f32::NAN;
    }

    // Only take the exponent if digits follow it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    token[..end].parse().unwrap_or(f32::NAN)
}

/// Parses the leading base-10 integer of `token`.
pub(crate) fn parse_int(token: &str) -> Option<i32> {
    let token = token.trim_start();
    let bytes = token.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = count_digits(&bytes[sign..]);
    if digits == 0 {
        return None;
    }
    token[..sign + digits].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
