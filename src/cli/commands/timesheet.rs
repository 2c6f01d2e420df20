use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::lateness::{Lateness, is_notifiable_late};
use crate::core::logic::Core;
use crate::db::pool::DbPool;
use crate::db::queries::{load_events_for_subject, load_subject, resolve_schedule};
use crate::errors::AppResult;
use crate::models::period_summary::{ClassifiedDay, PeriodSummary};
use crate::models::schedule::ScheduleSource;
use crate::ui::messages::{header, info, warning};
use crate::utils::colors::{YELLOW, color_for_lateness, colorize_optional, paint};
use crate::utils::formatting::{format_hours, format_stamp, mins2readable};
use crate::utils::date::resolve_range;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Timesheet {
        subject,
        range,
        late_first,
    } = cmd
    {
        let range = resolve_range(range.as_deref())?;
        let pool = DbPool::new(&cfg.database)?;

        let row = load_subject(&pool.conn, subject)?;
        let schedule = resolve_schedule(&pool.conn, &row)?;
        let events = load_events_for_subject(&pool.conn, subject, &range)?;

        let mut summary = Core::build_period_summary(subject, &events, range, schedule);
        if *late_first {
            summary.sort_late_first();
        }

        header(format!(
            "{} ({}) {} → {}",
            row.name, row.id, summary.range.start, summary.range.end
        ));

        match &summary.schedule {
            Some(s) => {
                let source = match s.source {
                    ScheduleSource::Individual => "individual",
                    ScheduleSource::HostCompany => "host company default",
                };
                info(format!(
                    "Expected {} - {} ({source})",
                    s.clock_in_time, s.clock_out_time
                ));
            }
            None => warning("No schedule assigned: lateness cannot be evaluated."),
        }

        if summary.days.is_empty() {
            warning("No clock events in the selected range.");
            return Ok(());
        }

        print!("{}", render_days(&summary, cfg));
        print_totals(&summary);
    }
    Ok(())
}

fn render_days(summary: &PeriodSummary, cfg: &Config) -> String {
    let mut table = Table::new(
        &["Date", "In", "Break", "Resume", "Out", "Hours", "Status", "Lateness"],
        &cfg.separator_char,
    );

    for day in &summary.days {
        let r = &day.record;
        let status = if r.is_complete {
            "complete".to_string()
        } else {
            paint(YELLOW, "incomplete")
        };

        table.add_row(vec![
            r.date_str(),
            colorize_optional(&format_stamp(r.clock_in.as_ref())),
            colorize_optional(&format_stamp(r.break_start.as_ref())),
            colorize_optional(&format_stamp(r.break_end.as_ref())),
            colorize_optional(&format_stamp(r.clock_out.as_ref())),
            format_hours(r.minutes_worked),
            status,
            lateness_cell(day, cfg.late_grace_minutes),
        ]);
    }

    table.render()
}

fn lateness_cell(day: &ClassifiedDay, grace: i64) -> String {
    let mut text = day.lateness.label().to_string();

    if day.lateness == Lateness::Late
        && let Some(m) = day.late_minutes
    {
        text.push_str(&format!(" +{}", mins2readable(m, false, true)));
        if is_notifiable_late(m, grace) {
            text.push_str(" !");
        }
    }

    paint(color_for_lateness(day.lateness), &text)
}

fn print_totals(summary: &PeriodSummary) {
    let s = &summary.stats;
    let p = &summary.punctuality;

    println!();
    println!(
        "Days recorded: {}  complete: {}  incomplete: {}  attendance rate: {}%",
        s.days_recorded, s.complete_days, s.incomplete_days, s.attendance_rate_percent
    );
    println!(
        "Hours worked: {} ({})  average per complete day: {:.2}",
        format_hours(s.total_minutes_worked),
        mins2readable(s.total_minutes_worked, false, false),
        s.average_hours_per_complete_day()
    );

    if summary.schedule.is_some() {
        println!(
            "Late: {}  on time: {}  unknown: {}  punctuality: {}%",
            p.late_days, p.on_time_days, p.unknown_days, p.punctuality_rate_percent
        );

        if !summary.unattended.is_empty() {
            let dates: Vec<String> = summary
                .unattended
                .iter()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .collect();
            warning(format!("Not attended: {}", dates.join(", ")));
        }
    }
}
