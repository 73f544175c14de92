//! Text scanning helpers for value parsing.
//!
//! Text boxes hand us whatever the user has typed so far, so none of these
//! helpers fail loudly. They either find a number or report `None` and let the
//! caller choose the fallback.

/// Scan a float from the very start of `s`.
///
/// Accepts an optional sign, digits, a single decimal separator (`.` or `,`)
/// and an optional exponent. Returns the value and the number of bytes consumed,
/// or `None` if no digit was found.
fn scan_float(s: &str) -> Option<(f32, usize)> {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut literal = String::with_capacity(bytes.len() + 1);

    if let Some(&sign) = bytes.first() {
        if sign == b'+' || sign == b'-' {
            literal.push(sign as char);
            i += 1;
        }
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = &s[int_start..i];

    let mut frac_digits = "";
    if i < bytes.len() && (bytes[i] == b'.' || bytes[i] == b',') {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > frac_start || !int_digits.is_empty() {
            frac_digits = &s[frac_start..j];
            i = j;
        }
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    if int_digits.is_empty() {
        literal.push('0');
    } else {
        literal.push_str(int_digits);
    }
    if !frac_digits.is_empty() {
        literal.push('.');
        literal.push_str(frac_digits);
    }

    // Exponent only counts when at least one digit follows it.
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_digits_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_digits_start {
            literal.push('e');
            literal.push_str(&s[i + 1..j]);
            i = j;
        }
    }

    let value: f32 = literal.parse().ok()?;
    if value.is_finite() {
        Some((value, i))
    } else {
        None
    }
}

/// Extract the number at the start of `s`, ignoring whatever follows it.
///
/// Leading whitespace is skipped. Both `.` and `,` are accepted as the
/// decimal separator. Returns `None` when the text does not start with a
/// number.
///
/// # Examples
///
/// ```
/// use dialkit_utils::leading_float;
///
/// assert_eq!(leading_float("  -12.5 dB"), Some(-12.5));
/// assert_eq!(leading_float("3,25"), Some(3.25));
/// assert_eq!(leading_float("abc"), None);
/// ```
pub fn leading_float(s: &str) -> Option<f32> {
    scan_float(s.trim_start()).map(|(value, _)| value)
}

/// Parse `s` as a number only if the whole trimmed string is that number.
///
/// Unlike [`leading_float`], trailing garbage such as a second decimal point
/// makes the parse fail.
///
/// # Examples
///
/// ```
/// use dialkit_utils::exact_float;
///
/// assert_eq!(exact_float(" 30 "), Some(30.0));
/// assert_eq!(exact_float("1.2.3"), None);
/// ```
pub fn exact_float(s: &str) -> Option<f32> {
    let s = s.trim();
    match scan_float(s) {
        Some((value, consumed)) if consumed == s.len() => Some(value),
        _ => None,
    }
}

/// Strip `suffix` from the end of `s`, comparing ASCII case-insensitively.
pub fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    if !s.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = s.split_at(split);
    if tail.eq_ignore_ascii_case(suffix) {
        Some(head)
    } else {
        None
    }
}

/// Strip `prefix` from the start of `s`, comparing ASCII case-insensitively.
pub fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.len() < prefix.len() || !s.is_char_boundary(prefix.len()) {
        return None;
    }
    let (head, tail) = s.split_at(prefix.len());
    if head.eq_ignore_ascii_case(prefix) {
        Some(tail)
    } else {
        None
    }
}
