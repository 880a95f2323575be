use chrono::{DateTime, Local, TimeZone};

use crate::model::{DaySummary, ForecastSample};

/// How many days are kept after dropping the partially elapsed current day.
const MAX_DAYS: usize = 5;

/// Group 3-hourly samples into per-day summaries, interpreting timestamps in
/// the machine's local time zone.
pub fn summarize(samples: &[ForecastSample]) -> Vec<DaySummary> {
    summarize_in(samples, &Local)
}

/// Time-zone-explicit variant of [`summarize`].
///
/// Samples are grouped by the calendar-day label of their timestamp in `tz`,
/// and groups are kept in first-encountered order (chronological, since the
/// upstream sends samples time-ordered) rather than sorted by key. The first
/// group is "today", already partially elapsed, and is dropped; at most
/// [`MAX_DAYS`] of the remaining groups are summarized.
pub fn summarize_in<Tz>(samples: &[ForecastSample], tz: &Tz) -> Vec<DaySummary>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut groups: Vec<(String, Vec<ForecastSample>)> = Vec::new();

    for sample in samples {
        let Some(when) = sample_time(sample, tz) else {
            // Timestamp outside chrono's range, upstream bug. Skip.
            continue;
        };
        let key = when.format("%b %-d").to_string();

        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, day)) => day.push(sample.clone()),
            None => groups.push((key, vec![sample.clone()])),
        }
    }

    groups
        .into_iter()
        .skip(1)
        .take(MAX_DAYS)
        .filter_map(|(date_label, day)| summarize_day(date_label, day, tz))
        .collect()
}

fn summarize_day<Tz>(date_label: String, samples: Vec<ForecastSample>, tz: &Tz) -> Option<DaySummary>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let first = samples.first()?;

    let mut temp_max = f64::NEG_INFINITY;
    let mut temp_min = f64::INFINITY;
    let mut sum = 0.0;
    for sample in &samples {
        temp_max = temp_max.max(sample.temperature);
        temp_min = temp_min.min(sample.temperature);
        sum += sample.temperature;
    }
    let temp_avg = sum / samples.len() as f64;

    // The midday-ish sample stands in for the whole day's icon; the label
    // still comes from the first sample, so the two can disagree.
    let representative = samples.get(samples.len() / 2).unwrap_or(first);
    let icon = representative.icon.clone();
    let condition = first.condition.clone();
    let weekday = sample_time(first, tz)?.format("%a").to_string();

    Some(DaySummary {
        date_label,
        weekday,
        samples,
        temp_max,
        temp_min,
        temp_avg,
        icon,
        condition,
    })
}

fn sample_time<Tz: TimeZone>(sample: &ForecastSample, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::from_timestamp(sample.dt, 0).map(|utc| utc.with_timezone(tz))
}
