use crate::models::{AppData, CategorySlice, StatsResponse, WeekdayPoint};
use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use std::collections::BTreeMap;

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: f64 = 3_600_000.0;

pub fn build_stats(data: &AppData) -> StatsResponse {
    build_stats_at(Utc::now().timestamp_millis(), data)
}

/// Derive the dashboard numbers from a snapshot of the collection. Read-only:
/// running tasks are extrapolated to `now_ms` for the total, but nothing in
/// `data` is touched and the committed per-task counters stay authoritative.
pub fn build_stats_at(now_ms: i64, data: &AppData) -> StatsResponse {
    let active_tasks = data.tasks.iter().filter(|task| task.is_running).count();

    let total_time_ms = data
        .tasks
        .iter()
        .map(|task| {
            let live = match (task.is_running, task.last_start_time) {
                (true, Some(started)) => (now_ms - started).max(0),
                _ => 0,
            };
            task.total_time_spent + live
        })
        .sum();

    // Committed time only. The live extrapolation above is deliberate for the
    // headline total and deliberately absent here.
    let mut by_category: BTreeMap<&str, i64> = BTreeMap::new();
    for task in &data.tasks {
        let category = match task.category.trim() {
            "" => "Uncategorized",
            name => name,
        };
        *by_category.entry(category).or_default() += task.total_time_spent;
    }

    let categories = by_category
        .into_iter()
        .map(|(category, total_ms)| CategorySlice {
            category: category.to_string(),
            total_ms,
        })
        .collect();

    let mut slots = [0.0_f64; 7];
    for task in &data.tasks {
        let Some(started) = task.last_start_time else {
            continue;
        };
        let day_diff = (now_ms - started).div_euclid(MS_PER_DAY);
        if (0..7).contains(&day_diff) {
            slots[(6 - day_diff) as usize] += task.total_time_spent as f64 / MS_PER_HOUR;
        }
    }

    let today = local_date(now_ms);
    let weekday_hours = slots
        .iter()
        .enumerate()
        .map(|(index, &hours)| WeekdayPoint {
            label: weekday_label(today, 6 - index as i64),
            hours,
        })
        .collect();

    StatsResponse {
        total_tasks: data.tasks.len(),
        active_tasks,
        total_time_ms,
        categories,
        weekday_hours,
    }
}

fn local_date(now_ms: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(now_ms).map(|instant| instant.with_timezone(&Local).date_naive())
}

fn weekday_label(today: Option<NaiveDate>, days_ago: i64) -> String {
    match today {
        Some(today) => (today - Duration::days(days_ago)).format("%a").to_string(),
        None => String::new(),
    }
}
