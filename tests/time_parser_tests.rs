use chrono::FixedOffset;
use clockdesk::core::time_parser::{
    TimeParseError, format_minute_of_day, parse_minute_of_day, parse_timestamp,
};

#[test]
fn test_twelve_hour_clock() {
    assert_eq!(parse_minute_of_day("7:45 AM"), Ok(465));
    assert_eq!(parse_minute_of_day("07:45 am"), Ok(465));
    assert_eq!(parse_minute_of_day("7:45PM"), Ok(19 * 60 + 45));
    assert_eq!(parse_minute_of_day("7:45 p.m."), Ok(19 * 60 + 45));
    assert_eq!(parse_minute_of_day("07:45:30 AM"), Ok(465));
}

#[test]
fn test_noon_and_midnight() {
    assert_eq!(parse_minute_of_day("12:00 AM"), Ok(0));
    assert_eq!(parse_minute_of_day("12:15 PM"), Ok(12 * 60 + 15));
    assert_eq!(parse_minute_of_day("11:59 PM"), Ok(1439));
}

#[test]
fn test_twenty_four_hour_clock() {
    assert_eq!(parse_minute_of_day("07:30"), Ok(450));
    assert_eq!(parse_minute_of_day("19:05:00"), Ok(19 * 60 + 5));
    assert_eq!(parse_minute_of_day("0:00"), Ok(0));
}

#[test]
fn test_timestamps_use_their_own_offset() {
    assert_eq!(parse_minute_of_day("2025-03-03T07:50:00+02:00"), Ok(470));
    assert_eq!(parse_minute_of_day("2025-03-03T07:50:00Z"), Ok(470));
    assert_eq!(parse_minute_of_day("2025-03-03 16:45"), Ok(16 * 60 + 45));
}

#[test]
fn test_rejects_malformed_input() {
    assert_eq!(parse_minute_of_day(""), Err(TimeParseError::Empty));
    assert_eq!(parse_minute_of_day("   "), Err(TimeParseError::Empty));
    assert!(matches!(
        parse_minute_of_day("noonish"),
        Err(TimeParseError::Unrecognized(_))
    ));
    assert!(matches!(
        parse_minute_of_day("13:00 PM"),
        Err(TimeParseError::OutOfRange(_))
    ));
    assert!(matches!(
        parse_minute_of_day("0:30 AM"),
        Err(TimeParseError::OutOfRange(_))
    ));
    assert!(matches!(
        parse_minute_of_day("24:00"),
        Err(TimeParseError::OutOfRange(_))
    ));
    assert!(matches!(
        parse_minute_of_day("10:60"),
        Err(TimeParseError::OutOfRange(_))
    ));
}

#[test]
fn test_format_minute_of_day() {
    assert_eq!(format_minute_of_day(465), "7:45 AM");
    assert_eq!(format_minute_of_day(0), "12:00 AM");
    assert_eq!(format_minute_of_day(12 * 60), "12:00 PM");
    assert_eq!(format_minute_of_day(16 * 60 + 45), "4:45 PM");
}

#[test]
fn test_parse_timestamp_naive_gets_default_offset() {
    let offset = FixedOffset::east_opt(2 * 3600).expect("offset");

    let dt = parse_timestamp("2025-03-03 07:50", offset).expect("naive timestamp");
    assert_eq!(dt.to_rfc3339(), "2025-03-03T07:50:00+02:00");

    let dt = parse_timestamp("2025-03-03T07:50:00-05:00", offset).expect("rfc3339");
    assert_eq!(dt.offset().local_minus_utc(), -5 * 3600);

    assert!(parse_timestamp("yesterday", offset).is_err());
}
