//! Number helpers, IE detection, dedup-by-key and UUIDs.
use browser_utils::{
    dedup_by_key, divide, filter_numeric, ie_version, keep_decimals, multiply, parse_numeric,
    thousands, thousands_str, uuid, IeVersion, DEFAULT_DIGITS, DEFAULT_FACTOR,
};
use serde_json::json;
use std::collections::HashSet;

// ============================================================================
// 1. Thousands separators
// ============================================================================

#[test]
fn thousands_groups_integer_part() {
    assert_eq!(thousands(1234567.0), "1,234,567");
    assert_eq!(thousands(999.0), "999");
    assert_eq!(thousands(1000.0), "1,000");
    assert_eq!(thousands(0.0), "0");
}

#[test]
fn thousands_leaves_fraction_alone() {
    assert_eq!(thousands(1234.5678), "1,234.5678");
    assert_eq!(thousands_str("1234567.1234567"), "1,234,567.1234567");
}

#[test]
fn thousands_keeps_sign() {
    assert_eq!(thousands(-1234567.0), "-1,234,567");
}

// ============================================================================
// 2. Numeric filtering
// ============================================================================

#[test]
fn filter_numeric_strips_noise() {
    assert_eq!(filter_numeric("-12a.3b4"), "-12.34");
    assert_eq!(filter_numeric("$1,299.00"), "1299.00");
    assert_eq!(filter_numeric("abc"), "");
}

#[test]
fn filter_numeric_sign_comes_from_first_char_only() {
    assert_eq!(filter_numeric("--5"), "-5");
    assert_eq!(filter_numeric("5-3"), "53");
    assert_eq!(filter_numeric("a-1-2"), "12");
    assert_eq!(filter_numeric(" -7"), "7");
    assert_eq!(filter_numeric("-"), "-");
}

#[test]
fn filter_numeric_accepts_number_text() {
    assert_eq!(filter_numeric(&(-3.25f64).to_string()), "-3.25");
}

// ============================================================================
// 3. Divide / multiply / keep decimals
// ============================================================================

#[test]
fn defaults_are_hundred_and_two_digits() {
    assert_eq!(DEFAULT_FACTOR, 100.0);
    assert_eq!(DEFAULT_DIGITS, 2);
    assert_eq!(keep_decimals("12345", DEFAULT_FACTOR, DEFAULT_DIGITS), "123.45");
}

#[test]
fn divide_returns_the_raw_quotient() {
    assert_eq!(divide("12345", 100.0), "123.45");
    assert_eq!(divide("500", 100.0), "5");
    assert_eq!(divide("1", 4.0), "0.25");
    assert_eq!(divide("-250", 100.0), "-2.5");
}

#[test]
fn divide_treats_zero_like_missing_input() {
    assert_eq!(divide("0", 100.0), "");
    assert_eq!(divide("", 100.0), "");
    assert_eq!(divide("abc", 100.0), "");
    assert_eq!(divide("5", 0.0), "");
}

#[test]
fn zero_is_a_valid_number_for_fixed_helpers() {
    assert_eq!(parse_numeric("0"), Some(0.0));
    assert_eq!(multiply("0", 100.0, 0), "0");
    assert_eq!(keep_decimals("0", 100.0, 2), "0.00");
}

#[test]
fn non_numeric_input_yields_empty_string() {
    assert_eq!(multiply("", 10.0, 2), "");
    assert_eq!(keep_decimals("1.2.3", 100.0, 2), "");
    assert_eq!(keep_decimals("5", 0.0, 2), "");
    assert_eq!(parse_numeric("Infinity"), None);
}

#[test]
fn keep_decimals_divides_then_fixes_digits() {
    assert_eq!(keep_decimals("12345", 100.0, 2), "123.45");
    assert_eq!(keep_decimals("1", 3.0, 4), "0.3333");
    assert_eq!(keep_decimals("10", 4.0, 0), "3");
    assert_eq!(keep_decimals("-125", 100.0, 1), "-1.3");
}

#[test]
fn multiply_formats_fraction_digits() {
    assert_eq!(multiply("1.23", 100.0, 0), "123");
    assert_eq!(multiply(" 2.5 ", 3.0, 2), "7.50");
    assert_eq!(multiply("0.015", DEFAULT_FACTOR, DEFAULT_DIGITS), "1.50");
}

// ============================================================================
// 4. IE detection
// ============================================================================

const IE7: &str = "Mozilla/4.0 (compatible; MSIE 7.0; Windows NT 6.0)";
const IE8: &str = "Mozilla/4.0 (compatible; MSIE 8.0; Windows NT 6.1; Trident/4.0)";
const IE10: &str = "Mozilla/5.0 (compatible; MSIE 10.0; Windows NT 6.2; Trident/6.0)";
const IE6: &str = "Mozilla/4.0 (compatible; MSIE 6.0; Windows NT 5.1)";
const IE11: &str = "Mozilla/5.0 (Windows NT 10.0; WOW64; Trident/7.0; rv:11.0) like Gecko";
const EDGE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/70.0.3538.102 Safari/537.36 Edge/18.18362";
const CHROME: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[test]
fn legacy_ie_versions() {
    assert_eq!(ie_version(IE7), IeVersion::Version(7));
    assert_eq!(ie_version(IE8), IeVersion::Version(8));
    assert_eq!(ie_version(IE10), IeVersion::Version(10));
}

#[test]
fn old_or_unknown_msie_reports_six() {
    assert_eq!(ie_version(IE6), IeVersion::Version(6));
    assert_eq!(ie_version("Mozilla/4.0 (compatible; MSIE; Windows)"), IeVersion::Version(6));
}

#[test]
fn ie11_edge_and_others() {
    assert_eq!(ie_version(IE11), IeVersion::Version(11));
    assert_eq!(ie_version(EDGE), IeVersion::Edge);
    assert_eq!(ie_version(CHROME), IeVersion::NotIe);
    assert_eq!(ie_version(""), IeVersion::NotIe);
}

#[test]
fn sentinel_values() {
    assert_eq!(IeVersion::Version(9).sentinel(), json!(9));
    assert_eq!(IeVersion::Edge.sentinel(), json!("edge"));
    assert_eq!(IeVersion::NotIe.sentinel(), json!(-1));
}

#[test]
fn sentinel_text_is_valid_json_for_the_wasm_export() {
    assert_eq!(IeVersion::Version(11).sentinel().to_string(), "11");
    assert_eq!(IeVersion::Edge.sentinel().to_string(), "\"edge\"");
    assert_eq!(IeVersion::NotIe.sentinel().to_string(), "-1");
}

// ============================================================================
// 5. Dedup by key
// ============================================================================

#[test]
fn dedup_keeps_first_occurrence() {
    let items = vec![
        json!({"id": 1, "v": "a"}),
        json!({"id": 2, "v": "b"}),
        json!({"id": 1, "v": "c"}),
    ];
    assert_eq!(
        dedup_by_key(&items, "id"),
        vec![json!({"id": 1, "v": "a"}), json!({"id": 2, "v": "b"})]
    );
}

#[test]
fn dedup_treats_missing_keys_as_one_group() {
    let items = vec![json!({"v": 1}), json!({"id": "x"}), json!({"v": 2}), json!(5)];
    assert_eq!(
        dedup_by_key(&items, "id"),
        vec![json!({"v": 1}), json!({"id": "x"})]
    );
}

#[test]
fn dedup_coerces_keys_like_property_names() {
    let items = vec![
        json!({"id": 1, "v": "int"}),
        json!({"id": 1.0, "v": "float"}),
        json!({"id": [1, 2], "v": "array"}),
        json!({"id": "1,2", "v": "text"}),
        json!({"id": {"a": 1}, "v": "obj"}),
        json!({"id": {"b": 2}, "v": "other obj"}),
    ];
    let kept: Vec<_> = dedup_by_key(&items, "id")
        .into_iter()
        .map(|item| item["v"].clone())
        .collect();
    assert_eq!(kept, vec![json!("int"), json!("array"), json!("obj")]);
}

#[test]
fn dedup_of_empty_input_is_empty() {
    assert!(dedup_by_key(&[], "id").is_empty());
}

// ============================================================================
// 6. UUID
// ============================================================================

#[test]
fn uuid_is_36_char_hyphenated_hex() {
    let id = uuid();
    assert_eq!(id.len(), 36);
    for (i, c) in id.chars().enumerate() {
        if [8, 13, 18, 23].contains(&i) {
            assert_eq!(c, '-');
        } else {
            assert!(c.is_ascii_hexdigit() && !c.is_ascii_uppercase());
        }
    }
}

#[test]
fn uuids_do_not_repeat() {
    let ids: HashSet<String> = (0..1000).map(|_| uuid()).collect();
    assert_eq!(ids.len(), 1000);
}
