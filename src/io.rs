use crate::model::{Person, Roster, Schedule};
use crate::rules::{CalendarRules, WEEKDAY_LABELS};
use anyhow::{bail, Context};
use chrono::{Days, NaiveDate};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de personnes depuis CSV: header `handle,display_name`
pub fn import_people_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Person>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let handle = rec.get(0).context("missing handle")?.trim();
        let display = rec.get(1).context("missing display_name")?.trim();
        if handle.is_empty() || display.is_empty() {
            bail!("invalid people row (empty)");
        }
        if out.iter().any(|p: &Person| p.handle == handle) {
            bail!("duplicate handle: {handle}");
        }
        out.push(Person::new(handle.to_string(), display.to_string()));
    }
    Ok(out)
}

/// Date calendaire du jour `day` (1..=H) si une date de départ est fournie.
pub fn date_for_day(start: NaiveDate, day: u32) -> Option<NaiveDate> {
    start.checked_add_days(Days::new(u64::from(day - 1)))
}

/// Export JSON du planning (jolie mise en forme)
pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(schedule)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV du planning: header `day,date,weekday,shift,required,assigned`
///
/// `assigned` contient les handles joints par `;`. La colonne `date` reste
/// vide sans date de départ.
pub fn export_schedule_csv<P: AsRef<Path>>(
    path: P,
    schedule: &Schedule,
    roster: &Roster,
    rules: &CalendarRules,
    start_date: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["day", "date", "weekday", "shift", "required", "assigned"])?;
    for row in schedule.rows() {
        let date = start_date
            .and_then(|d| date_for_day(d, row.day))
            .map(|d| d.to_string())
            .unwrap_or_default();
        let weekday = WEEKDAY_LABELS[rules.weekday(row.day) as usize];
        let assigned = row
            .people
            .iter()
            .map(|id| roster.handle_of(id).unwrap_or("?"))
            .collect::<Vec<_>>()
            .join(";");
        w.write_record([
            row.day.to_string().as_str(),
            date.as_str(),
            weekday,
            row.shift.label(),
            row.required.to_string().as_str(),
            assigned.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
