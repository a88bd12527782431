use objdiff::{impl_record, ConfigError, DecimalPolicy, DiffSettings, LaxObjectDiff, StrictObjectDiff};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
struct Invoice {
    net: Decimal,
    tax: Option<Decimal>,
    rates: Vec<Decimal>,
}

impl_record!(Invoice { net, tax, rates });

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn invoice(net: &str) -> Invoice {
    Invoice {
        net: dec(net),
        tax: Some(dec("0.20")),
        rates: vec![dec("1.0"), dec("2.50")],
    }
}

#[test]
fn test_trailing_zeros_ignored_by_default() {
    let diff = LaxObjectDiff::new();
    let mut b = invoice("10.5");
    b.tax = Some(dec("0.2"));
    b.rates = vec![dec("1"), dec("2.5")];

    assert!(diff.compare(&invoice("10.50"), &b).unwrap().is_empty());
}

#[test]
fn test_exact_comparison_reports_raw_values() {
    let diff = LaxObjectDiff::builder()
        .with_trailing_zeros_ignored(false)
        .build()
        .unwrap();

    let diffs = diff.compare(&invoice("10.50"), &invoice("10.5")).unwrap();

    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].path_string(), "net");
    assert_eq!((diffs[0].value1(), diffs[0].value2()), ("10.50", "10.5"));
}

#[test]
fn test_max_scale_rounds_half_up() {
    let diff = StrictObjectDiff::builder()
        .with_descend_into::<Invoice>()
        .with_max_decimal_scale(2)
        .build()
        .unwrap();

    assert!(diff.compare(&invoice("1.005"), &invoice("1.01")).unwrap().is_empty());
    assert!(diff.compare(&invoice("1.999"), &invoice("2.00")).unwrap().is_empty());

    let diffs = diff.compare(&invoice("1.004"), &invoice("1.01")).unwrap();
    assert_eq!(diffs.len(), 1);
    assert_eq!((diffs[0].value1(), diffs[0].value2()), ("1.004", "1.01"));
}

#[test]
fn test_decimals_need_no_registration_in_strict_mode() {
    let diff = StrictObjectDiff::new();
    let mut b = invoice("3");
    b.rates.push(dec("4"));

    let diffs = diff.compare(&invoice("3"), &b).unwrap();

    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].path_string(), "rates.size()");
}

#[test]
fn test_absent_decimal() {
    let diff = LaxObjectDiff::new();
    let mut b = invoice("3");
    b.tax = None;

    let diffs = diff.compare(&invoice("3"), &b).unwrap();

    assert_eq!(diffs.len(), 1);
    assert_eq!((diffs[0].value1(), diffs[0].value2()), ("0.20", "null"));
}

#[test]
fn test_decimals_equal_uses_comparator_policy() {
    let mut diff = LaxObjectDiff::new();
    assert!(diff.decimals_equal(dec("0.50"), dec("0.5")));

    diff.set_ignore_decimal_trailing_zeros(false);
    assert!(!diff.decimals_equal(dec("0.50"), dec("0.5")));

    diff.set_max_decimal_scale(Some(0)).unwrap();
    assert!(diff.decimals_equal(dec("0.50"), dec("0.5")));
    assert!(diff.decimals_equal(dec("0.5"), dec("1")));
}

#[test]
fn test_scale_limit_rejected() {
    let result = LaxObjectDiff::builder().with_max_decimal_scale(40).build();
    assert!(matches!(result, Err(ConfigError::InvalidConfiguration { .. })));

    let mut diff = LaxObjectDiff::new();
    assert!(diff.set_max_decimal_scale(Some(29)).is_err());
    assert_eq!(diff.decimal_policy().max_scale, None);
}

#[test]
fn test_policy_from_settings() {
    let settings =
        DiffSettings::from_json(r#"{ "decimal": { "ignore_trailing_zeros": false, "max_scale": 1 } }"#)
            .unwrap();
    let diff = LaxObjectDiff::builder().with_settings(&settings).build().unwrap();

    assert_eq!(
        *diff.decimal_policy(),
        DecimalPolicy::exact().with_max_scale(Some(1)).unwrap()
    );
    assert!(diff.compare(&invoice("2.04"), &invoice("2.0")).unwrap().is_empty());
}

fn arbitrary_decimal() -> impl Strategy<Value = Decimal> {
    (any::<i64>(), 0u32..10).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Appending zeros to the fraction never changes equality by default.
    #[test]
    fn property_trailing_zeros_irrelevant(value in arbitrary_decimal(), zeros in 0u32..5) {
        let mut padded = value;
        padded.rescale(value.scale() + zeros);

        prop_assert!(DecimalPolicy::default().equal(value, padded));
    }

    /// Equality under any policy is symmetric.
    #[test]
    fn property_symmetric(
        a in arbitrary_decimal(),
        b in arbitrary_decimal(),
        ignore in any::<bool>(),
        scale in prop::option::of(0u32..6),
    ) {
        let policy = DecimalPolicy::new()
            .with_trailing_zeros_ignored(ignore)
            .with_max_scale(scale)
            .unwrap();

        prop_assert_eq!(policy.equal(a, b), policy.equal(b, a));
        prop_assert!(policy.equal(a, a));
    }
}
