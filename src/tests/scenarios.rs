use crate::tests::fixtures::{ann, order, Record};
use crate::{configure, Accessor, AssertionLine, Inspect};

#[test]
fn record_with_default_policy() {
    let code = configure().assertify(&ann(), "r").unwrap();
    insta::assert_snapshot!(code, @r###"
    let _ = &r;
    assert_eq!(r.name(), "Ann");
    "###);
}

#[test]
fn record_with_nulls_and_empty_lists() {
    let code = configure()
        .include_null()
        .include_empty_lists()
        .assertify(&ann(), "r")
        .unwrap();
    insta::assert_snapshot!(code, @r###"
    let _ = &r;
    assert_eq!(r.name(), "Ann");
    assert!(r.age().is_none());
    assert_eq!(r.tags().len(), 0);
    "###);
}

#[test]
fn record_with_values() {
    let record = Record {
        name: "Bo \"the\" Dev".to_string(),
        age: Some(41),
        tags: vec!["admin".to_string(), "ops".to_string()],
    };
    let code = configure().assertify(&record, "r").unwrap();
    insta::assert_snapshot!(code, @r###"
    let _ = &r;
    assert_eq!(r.name(), "Bo \"the\" Dev");
    assert_eq!(r.age().unwrap(), 41u32);
    assert_eq!(r.tags().len(), 2);
    assert_eq!(r.tags()[0], "admin");
    assert_eq!(r.tags()[1], "ops");
    "###);
}

#[test]
fn order_snapshot() {
    let code = configure().assertify(&order(), "order").unwrap();
    insta::assert_snapshot!(code, @r###"
    let _ = &order;
    assert!(matches!(order.status(), Status::Shipped { .. }));
    assert_eq!(order.paid(), true);
    assert_eq!(order.lines().len(), 2);
    assert_eq!(order.lines()[0].sku(), "A-1");
    assert_eq!(order.lines()[0].quantity(), 2u32);
    assert_eq!(order.lines()[1].sku(), "B-7");
    assert_eq!(order.lines()[1].quantity(), 1u32);
    assert_eq!(order.billing().city(), "Lyon");
    assert_eq!(order.audit().author(), "ops");
    assert_eq!(order.total_quantity(), 3i64);
    "###);
}

#[test]
fn optional_root() {
    let code = configure().assertify(&Some(ann()), "r").unwrap();
    insta::assert_snapshot!(code, @r###"
    assert!(r.is_some());
    assert_eq!(r.unwrap().name(), "Ann");
    "###);
}

#[test]
fn repeated_calls_are_identical() {
    let generator = configure().include_null().include_empty_lists();
    let order = order();

    let first = generator.assertify(&order, "order").unwrap();
    let second = generator.assertify(&order, "order").unwrap();
    assert_eq!(first, second);
}

#[test]
fn root_is_always_asserted_first() {
    let assertions = configure().assertions(&42u8, "answer").unwrap();
    assert_eq!(
        assertions.lines(),
        &[
            AssertionLine::NotNull {
                path: "answer".to_string(),
                optional: false,
            },
            AssertionLine::Equals {
                expected: "42u8".to_string(),
                actual: "answer".to_string(),
            },
        ]
    );
}

struct Summary {
    count: u32,
}

crate::inspect_struct!(Summary { count });

struct Report;

impl Inspect for Report {
    fn accessors(&self) -> Vec<Accessor<'_>> {
        vec![
            Accessor::computed("daily", || Summary { count: 4 }),
            Accessor::computed("weekly", || Summary { count: 4 }),
        ]
    }
}

#[test]
fn computed_values_are_never_deduplicated() {
    let code = configure().assertify(&Report, "report").unwrap();
    insta::assert_snapshot!(code, @r###"
    let _ = &report;
    assert_eq!(report.daily().count(), 4u32);
    assert_eq!(report.weekly().count(), 4u32);
    "###);
}

#[test]
fn write_to_buffer() {
    let mut buffer = Vec::new();
    configure().write_to(&ann(), "r", &mut buffer).unwrap();
    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        "let _ = &r;\nassert_eq!(r.name(), \"Ann\");\n"
    );
}

struct Marker;

impl Inspect for Marker {
    fn accessors(&self) -> Vec<Accessor<'_>> {
        vec![Accessor::computed("weight", || 5u32)]
    }
}

struct Empties {
    first: [u8; 0],
    second: [u8; 0],
}

crate::inspect_struct!(Empties { first, second });

#[test]
fn zero_sized_values_are_all_traversed() {
    let markers = vec![Marker, Marker, Marker];
    let code = configure().assertify(&markers, "v").unwrap();
    insta::assert_snapshot!(code, @r###"
    let _ = &v;
    assert_eq!(v.len(), 3);
    assert_eq!(v[0].weight(), 5u32);
    assert_eq!(v[1].weight(), 5u32);
    assert_eq!(v[2].weight(), 5u32);
    "###);

    let empties = Empties {
        first: [],
        second: [],
    };
    let code = configure()
        .include_empty_lists()
        .assertify(&empties, "e")
        .unwrap();
    insta::assert_snapshot!(code, @r###"
    let _ = &e;
    assert_eq!(e.first().len(), 0);
    assert_eq!(e.second().len(), 0);
    "###);
}
