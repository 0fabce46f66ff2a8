use datofiks::{
    FieldStore, Modified, Problem, ReconcileOptions, Record, Rule, Suggester, Suggestion,
    Validator, clean::pre_clean, reconcile, suggest_date, suggest_year, validate_date,
};

#[test]
fn documented_scenarios() {
    assert_eq!(
        suggest_date("30. november 2010 kl. 14:12", None).as_deref(),
        Some("30. november 2010")
    );
    assert_eq!(suggest_date("May 2012", None).as_deref(), Some("mai 2012"));
    assert_eq!(suggest_date("høst 2012", None).as_deref(), Some("høsten 2012"));
    assert_eq!(suggest_date("1942 - 1991", None).as_deref(), Some("1942–1991"));
    assert_eq!(suggest_date("c. 2012", None), None);
    assert_eq!(suggest_year("c. 2012").as_deref(), Some("ca. 2012"));
}

#[test]
fn year_range_in_year_field_becomes_date() {
    let mut record = Record::new().with("utgivelsesår", "1951-53");
    let report = reconcile(&mut record, &ReconcileOptions::default(), None);

    assert_eq!(record, Record::new().with("dato", "1951–1953"));
    assert_eq!(
        report.modified,
        vec![Modified {
            key: "dato".into(),
            old: "1951-53".into(),
            new: "1951–1953".into(),
            complex: true,
            rule: Some(Rule::YearRange),
        }]
    );
    assert!(report.unresolved.is_empty());
}

#[test]
fn hyphen_never_separates_a_range() {
    assert!(validate_date("1. januar 2014 - 1. februar 2015").is_err());
    assert!(validate_date("1. januar 2014 – 1. februar 2015").is_ok());
}

#[test]
fn two_digit_years_pivot_at_twenty() {
    assert_eq!(suggest_date("1.1.11", None).as_deref(), Some("1.1.2011"));
    assert_eq!(suggest_date("1.1.25", None).as_deref(), Some("1.1.1925"));
}

#[test]
fn two_dates_are_ambiguous() {
    let s = Suggester::new(Validator::at_year(2015));
    assert_eq!(
        s.date("utgitt 1.1.2011, revidert 2.2.2012"),
        Suggestion::Ambiguous(vec!["1.1.2011".into(), "2.2.2012".into()])
    );

    let mut record = Record::new().with("dato", "1.1.2011 / 2.2.2012");
    let report = reconcile(&mut record, &ReconcileOptions { current_year: 2015 }, None);
    assert!(report.modified.is_empty());
    assert!(matches!(
        report.unresolved[0].problem,
        Problem::Ambiguous { ref candidates } if candidates.len() == 2
    ));
}

#[test]
fn cleaning_twice_changes_nothing() {
    proptest::proptest!(|(s in r"\PC{0,40}")| {
        let once = pre_clean(&s);
        proptest::prop_assert_eq!(pre_clean(&once), once);
    })
}

#[test]
fn reconciling_twice_changes_nothing() {
    let opts = ReconcileOptions { current_year: 2015 };
    let mut record = Record::new()
        .with("dato", "[[24. oktober]] 2007")
        .with("år", "[[2007]]")
        .with("accessdate", "14 October 2010")
        .with("arkivdato", "Nr 6, 2012");

    let first = reconcile(&mut record, &opts, None);
    assert_eq!(first.modified.len(), 3);
    assert_eq!(first.unresolved.len(), 1);

    let after_first = record.clone();
    let second = reconcile(&mut record, &opts, None);
    assert!(second.modified.is_empty());
    assert_eq!(second.unresolved, first.unresolved);
    assert_eq!(record, after_first);
    assert_eq!(record.fields().len(), 4);
}

#[test]
fn non_ascii_digits_are_left_for_a_person() {
    let opts = ReconcileOptions { current_year: 2015 };
    let mut record = Record::new()
        .with("utgivelsesår", "१९५१-53")
        .with("dato", "१.१.२०११");
    let before = record.clone();

    let report = reconcile(&mut record, &opts, None);
    assert_eq!(record, before);
    assert!(report.modified.is_empty());
    assert_eq!(report.unresolved.len(), 2);
}

#[test]
fn one_valid_reading_among_several_is_not_picked() {
    let mut record = Record::new().with("dato", "1.1.2011 og 31.13.2012");
    let report = reconcile(&mut record, &ReconcileOptions { current_year: 2015 }, None);
    assert_eq!(record.fields()[0].value, "1.1.2011 og 31.13.2012");
    assert!(matches!(
        report.unresolved[0].problem,
        Problem::Ambiguous { ref candidates } if candidates.len() == 2
    ));
}
