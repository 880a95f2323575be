//! Human-friendly terminal output for search results.

use chrono::Local;
use skycast_core::{CurrentConditions, DaySummary};

/// Print the current-conditions block.
pub fn current(conditions: &CurrentConditions) {
    let observed = conditions.observed_at.with_timezone(&Local);

    println!("{} — {}", conditions.city, conditions.condition);
    if !conditions.description.is_empty() {
        println!("  {}", conditions.description);
    }
    println!(
        "  temperature  {:.0}° (feels like {:.0}°)",
        conditions.temperature, conditions.feels_like
    );
    println!("  humidity     {}%", conditions.humidity);
    println!("  pressure     {} hPa", conditions.pressure);
    println!("  wind         {:.1} m/s", conditions.wind_speed);
    println!("  visibility   {} m", conditions.visibility);
    println!("  observed     {}", observed.format("%Y-%m-%d %H:%M"));
}

/// Print the per-day forecast rows. Temperatures are rounded here, at render
/// time only.
pub fn forecast(days: &[DaySummary]) {
    if days.is_empty() {
        return;
    }

    println!();
    println!("Forecast:");
    for day in days {
        println!(
            "  {} {:<6}  {:>4.0}° / {:<4.0}°  avg {:.1}°  {}",
            day.weekday, day.date_label, day.temp_max, day.temp_min, day.temp_avg, day.condition
        );
    }
}
