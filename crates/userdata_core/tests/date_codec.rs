use userdata_core::{Affiliation, CalendarDate, DateFormatErrorKind};

#[test]
fn every_day_of_a_leap_year_roundtrips() {
    let mut count = 0;
    for month in 1..=12 {
        for day in 1..=31 {
            let Ok(date) = CalendarDate::from_ymd(2024, month, day) else {
                continue;
            };
            let encoded = date.encode();
            assert_eq!(encoded.len(), 10, "{encoded}");
            assert_eq!(CalendarDate::decode(&encoded).unwrap(), date);
            count += 1;
        }
    }
    assert_eq!(count, 366);
}

#[test]
fn boundary_years_roundtrip() {
    for (year, month, day) in [(0, 1, 1), (1, 1, 1), (1970, 1, 1), (9999, 12, 31)] {
        let date = CalendarDate::from_ymd(year, month, day).unwrap();
        assert_eq!(CalendarDate::decode(&date.encode()).unwrap(), date);
    }
}

#[test]
fn decode_rejects_documented_bad_inputs() {
    let cases = [
        ("2020-13-01", DateFormatErrorKind::InvalidDate),
        ("2020-02-30", DateFormatErrorKind::InvalidDate),
        ("not-a-date", DateFormatErrorKind::Pattern),
        ("2020/01/01", DateFormatErrorKind::Pattern),
        (" 2020-01-01", DateFormatErrorKind::Pattern),
    ];
    for (text, kind) in cases {
        let err = CalendarDate::decode(text).unwrap_err();
        assert_eq!(err.kind, kind, "input `{text}`");
        assert_eq!(err.text, text);
    }
}

#[test]
fn affiliation_dates_decode_through_yaml() {
    let affiliation: Affiliation =
        serde_yaml::from_str("organization: Acme\nstart: \"2019-01-01\"\nend: 2020-06-15\n")
            .unwrap();

    assert_eq!(affiliation.start, CalendarDate::from_ymd(2019, 1, 1).unwrap());
    assert_eq!(affiliation.end, CalendarDate::from_ymd(2020, 6, 15).unwrap());
}

#[test]
fn affiliation_rejects_non_string_date() {
    let err = serde_yaml::from_str::<Affiliation>(
        "organization: Acme\nstart: 20190101\nend: 2020-06-15\n",
    )
    .unwrap_err();
    assert!(err.to_string().contains("20190101"), "unexpected error: {err}");
}
