//! Number formatting and permissive arithmetic helpers.
//!
//! These helpers sit behind form inputs, so they never fail: text that is
//! not a number yields an empty string. Zero is a number like any other.

/// Largest number of fractional digits the helpers will render.
pub const MAX_FRACTION_DIGITS: usize = 20;

/// Insert a `,` every three digits in the integer part of `n`.
///
/// ```
/// use browser_utils::thousands;
///
/// assert_eq!(thousands(1234567.0), "1,234,567");
/// assert_eq!(thousands(-9876.5), "-9,876.5");
/// ```
pub fn thousands(n: f64) -> String {
    thousands_str(&n.to_string())
}

/// Group the first run of digits in `s` by thousands. Everything else in
/// the string (sign, fraction, suffix) is left untouched.
pub fn thousands_str(s: &str) -> String {
    let Some(start) = s.find(|c: char| c.is_ascii_digit()) else {
        return s.to_string();
    };
    let len = s[start..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len() - start);
    let digits = &s[start..start + len];

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}{}{}", &s[..start], grouped, &s[start + len..])
}

/// Keep only ASCII digits and `.` characters, prefixed with `-` when the
/// input itself starts with `-`.
///
/// A minus sign anywhere else is dropped like any other noise.
///
/// ```
/// use browser_utils::filter_numeric;
///
/// assert_eq!(filter_numeric("-12a.3b4"), "-12.34");
/// assert_eq!(filter_numeric("a-1-2"), "12");
/// ```
pub fn filter_numeric(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    if s.starts_with('-') {
        out.push('-');
    }
    out.extend(s.chars().filter(|c| c.is_ascii_digit() || *c == '.'));
    out
}

/// Parse trimmed text as a finite number. Empty text is not a number.
pub fn parse_numeric(s: &str) -> Option<f64> {
    let n = s.trim().parse::<f64>().ok()?;
    n.is_finite().then_some(n)
}

/// Divisor or multiplier used when the caller does not give one.
pub const DEFAULT_FACTOR: f64 = 100.0;

/// Fractional digits used when the caller does not give a count.
pub const DEFAULT_DIGITS: usize = 2;

/// `value / divisor` as a plain number, with no fixed digit count.
///
/// Returns `""` if `value` is not numeric, is zero, or `divisor` is zero.
///
/// ```
/// use browser_utils::divide;
///
/// assert_eq!(divide("12345", 100.0), "123.45");
/// assert_eq!(divide("500", 100.0), "5");
/// assert_eq!(divide("0", 100.0), "");
/// assert_eq!(divide("abc", 100.0), "");
/// ```
pub fn divide(value: &str, divisor: f64) -> String {
    match parse_numeric(value) {
        Some(n) if n != 0.0 && divisor != 0.0 => plain(n / divisor),
        _ => String::new(),
    }
}

/// `value * multiplier` with `digits` fractional digits.
///
/// Returns `""` if `value` is not numeric. Zero is accepted.
///
/// ```
/// use browser_utils::multiply;
///
/// assert_eq!(multiply("1.5", 100.0, 2), "150.00");
/// assert_eq!(multiply("0", 100.0, 2), "0.00");
/// ```
pub fn multiply(value: &str, multiplier: f64, digits: usize) -> String {
    match parse_numeric(value) {
        Some(n) => to_fixed(n * multiplier, digits),
        None => String::new(),
    }
}

/// `value / divisor` with `digits` fractional digits.
///
/// Returns `""` if `value` is not numeric or `divisor` is zero. Zero is
/// accepted as a value.
///
/// ```
/// use browser_utils::keep_decimals;
///
/// assert_eq!(keep_decimals("12345", 100.0, 2), "123.45");
/// assert_eq!(keep_decimals("0", 100.0, 2), "0.00");
/// ```
pub fn keep_decimals(value: &str, divisor: f64, digits: usize) -> String {
    match parse_numeric(value) {
        Some(n) if divisor != 0.0 => to_fixed(n / divisor, digits),
        _ => String::new(),
    }
}

/// Shortest text that reads back as `n`, with `-0` shown as `0`.
fn plain(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// Render `n` with exactly `digits` fractional digits, rounding half away
/// from zero where the scaled value is exactly representable.
fn to_fixed(n: f64, digits: usize) -> String {
    let digits = digits.min(MAX_FRACTION_DIGITS);
    if digits <= 15 {
        let scale = 10f64.powi(digits as i32);
        let rounded = (n * scale).round() / scale;
        if rounded.is_finite() {
            return format!("{:.*}", digits, rounded);
        }
    }
    format!("{:.*}", digits, n)
}
