mod common;
use common::ev;

use clockdesk::core::calculator::lateness::{
    Lateness, classify_lateness, classify_times, is_notifiable_late, late_minutes,
    summarize_lateness,
};
use clockdesk::core::calculator::timesheet::aggregate;
use clockdesk::models::clock_event::ClockEventKind::{ClockIn, ClockOut};
use clockdesk::models::date_range::DateRange;
use clockdesk::models::schedule::{ExpectedSchedule, ScheduleSource, WorkingHours};

fn schedule(clock_in: &str) -> ExpectedSchedule {
    ExpectedSchedule {
        clock_in_time: clock_in.to_string(),
        clock_out_time: "4:30 PM".to_string(),
        break_start_time: None,
        break_end_time: None,
        source: ScheduleSource::Individual,
    }
}

#[test]
fn test_late_and_exactly_on_time() {
    assert_eq!(classify_times(Some("07:50"), Some("07:30")), Lateness::Late);
    assert_eq!(classify_times(Some("07:30"), Some("07:30")), Lateness::OnTime);
    assert_eq!(classify_times(Some("7:30 AM"), Some("07:30")), Lateness::OnTime);
    assert_eq!(classify_times(Some("07:10"), Some("7:30 AM")), Lateness::OnTime);
}

#[test]
fn test_unparsable_or_missing_is_unknown() {
    assert_eq!(classify_times(None, Some("07:30")), Lateness::Unknown);
    assert_eq!(classify_times(Some("07:50"), None), Lateness::Unknown);
    assert_eq!(classify_times(Some("soon"), Some("07:30")), Lateness::Unknown);
    assert_eq!(classify_times(Some("07:50"), Some("")), Lateness::Unknown);
}

#[test]
fn test_classify_record_against_schedule() {
    let range = DateRange::parse("2025-03").expect("range");
    let days = aggregate(
        &[
            ev("s1", "2025-03-03", "07:50", ClockIn),
            ev("s1", "2025-03-03", "16:30", ClockOut),
            ev("s1", "2025-03-04", "07:30", ClockIn),
        ],
        &range,
    );

    let sched = schedule("7:30 AM");
    assert_eq!(classify_lateness(&days[0], Some(&sched)), Lateness::Late);
    assert_eq!(classify_lateness(&days[1], Some(&sched)), Lateness::OnTime);
    assert_eq!(classify_lateness(&days[0], None), Lateness::Unknown);

    assert_eq!(late_minutes(&days[0], Some(&sched)), Some(20));
    assert_eq!(late_minutes(&days[1], Some(&sched)), Some(0));
    assert_eq!(late_minutes(&days[0], Some(&schedule("garbage"))), None);
}

#[test]
fn test_notifiable_lateness_is_past_grace() {
    assert!(!is_notifiable_late(30, 30));
    assert!(is_notifiable_late(31, 30));
    assert!(!is_notifiable_late(-5, 0));
}

#[test]
fn test_punctuality_excludes_unknown_days() {
    let range = DateRange::parse("2025-03").expect("range");
    let days = aggregate(
        &[
            ev("s1", "2025-03-03", "07:50", ClockIn),
            ev("s1", "2025-03-04", "07:20", ClockIn),
            ev("s1", "2025-03-05", "07:30", ClockIn),
            // no clock-in that day
            ev("s1", "2025-03-06", "16:30", ClockOut),
        ],
        &range,
    );

    let summary = summarize_lateness(&days, Some(&schedule("07:30")));
    assert_eq!(summary.late_days, 1);
    assert_eq!(summary.on_time_days, 2);
    assert_eq!(summary.unknown_days, 1);
    // 2 / 3
    assert_eq!(summary.punctuality_rate_percent, 67);

    let none = summarize_lateness(&days, None);
    assert_eq!(none.unknown_days, 4);
    assert_eq!(none.punctuality_rate_percent, 0);
}

#[test]
fn test_schedule_resolution_order() {
    let individual = WorkingHours::new("08:00", "17:00");
    let host = WorkingHours::new("7:30 AM", "4:30 PM").with_break("12:00 PM", "12:30 PM");
    let half = WorkingHours {
        clock_in_time: Some("08:00".into()),
        ..Default::default()
    };

    let s = ExpectedSchedule::resolve(Some(&individual), Some(&host)).expect("individual");
    assert_eq!(s.source, ScheduleSource::Individual);
    assert_eq!(s.clock_in_time, "08:00");

    let s = ExpectedSchedule::resolve(Some(&half), Some(&host)).expect("host default");
    assert_eq!(s.source, ScheduleSource::HostCompany);
    assert_eq!(s.break_start_time.as_deref(), Some("12:00 PM"));

    assert!(ExpectedSchedule::resolve(None, None).is_none());
    assert!(ExpectedSchedule::resolve(Some(&half), None).is_none());
}
