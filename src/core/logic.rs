use crate::core::calculator::{lateness, stats, timesheet};
use crate::models::clock_event::ClockEvent;
use crate::models::date_range::DateRange;
use crate::models::period_summary::{ClassifiedDay, PeriodSummary};
use crate::models::schedule::ExpectedSchedule;

pub struct Core;

impl Core {
    /// Aggregate a subject's events over `range`, then classify and summarize.
    pub fn build_period_summary(
        subject_id: &str,
        events: &[ClockEvent],
        range: DateRange,
        schedule: Option<ExpectedSchedule>,
    ) -> PeriodSummary {
        let sheet = timesheet::Timesheet::build(subject_id, events, &range);
        let stats = stats::compute_stats(&sheet.days);
        let punctuality = lateness::summarize_lateness(&sheet.days, schedule.as_ref());
        let unattended = stats::unattended_weekdays(&range, &sheet.days, schedule.as_ref());

        let days = sheet
            .days
            .into_iter()
            .map(|record| ClassifiedDay {
                lateness: lateness::classify_lateness(&record, schedule.as_ref()),
                late_minutes: lateness::late_minutes(&record, schedule.as_ref()),
                record,
            })
            .collect();

        PeriodSummary {
            subject_id: subject_id.to_string(),
            range,
            schedule,
            days,
            stats,
            punctuality,
            unattended,
        }
    }
}
