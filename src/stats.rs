use crate::calendar::{is_same_day, today};
use crate::models::{DailyPoint, DailySummary, Snapshot, StatsResponse, WeightProgress};
use chrono::{Duration, NaiveDate};

pub fn daily_summary(snapshot: &Snapshot) -> DailySummary {
    daily_summary_at(today(), snapshot)
}

/// Totals over the entries created on `day`. A NaN amount makes its total NaN.
pub fn daily_summary_at(day: NaiveDate, snapshot: &Snapshot) -> DailySummary {
    let consumed_today = snapshot
        .food
        .iter()
        .filter(|entry| is_same_day(entry.timestamp, day));
    let (calories_consumed, protein) = consumed_today.fold((0.0_f64, 0.0_f64), |(kcal, grams), entry| {
        (kcal + entry.calories, grams + entry.protein)
    });

    let calories_burned: f64 = snapshot
        .exercise
        .iter()
        .filter(|entry| is_same_day(entry.timestamp, day))
        .map(|entry| entry.calories_burned)
        .sum();

    DailySummary {
        date: day,
        calories_consumed,
        calories_burned,
        protein,
        net: calories_consumed - calories_burned,
    }
}

pub fn build_stats(snapshot: &Snapshot) -> StatsResponse {
    build_stats_at(today(), snapshot)
}

pub fn build_stats_at(today: NaiveDate, snapshot: &Snapshot) -> StatsResponse {
    let last_7_days = (0..7)
        .rev()
        .map(|offset| {
            let summary = daily_summary_at(today - Duration::days(offset), snapshot);
            DailyPoint {
                date: summary.date,
                calories_consumed: summary.calories_consumed,
                calories_burned: summary.calories_burned,
                net: summary.net,
            }
        })
        .collect();

    StatsResponse {
        last_7_days,
        weight: WeightProgress {
            latest_recorded: snapshot.weight.last().map(|record| record.weight),
            current: snapshot.current,
            goal: snapshot.goal,
            remaining: snapshot.current - snapshot.goal,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExerciseEntry, FoodEntry};
    use chrono::{TimeZone, Utc};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    fn food_at(calories: f64, hour: u32, day_offset: i64) -> FoodEntry {
        let timestamp = Utc.with_ymd_and_hms(2026, 1, 5, hour, 0, 0).unwrap() + Duration::days(day_offset);
        FoodEntry {
            id: timestamp.timestamp_millis().to_string(),
            name: "meal".into(),
            calories,
            protein: 10.0,
            timestamp,
        }
    }

    fn exercise_at(burned: f64, day_offset: i64) -> ExerciseEntry {
        let timestamp = Utc.with_ymd_and_hms(2026, 1, 5, 7, 0, 0).unwrap() + Duration::days(day_offset);
        ExerciseEntry {
            id: timestamp.timestamp_millis().to_string(),
            name: "Run".into(),
            duration: 30.0,
            calories_burned: burned,
            timestamp,
        }
    }

    #[test]
    fn consumed_counts_only_today() {
        let snapshot = Snapshot {
            food: vec![food_at(500.0, 12, 0), food_at(300.0, 12, -1)],
            ..Snapshot::default()
        };

        let summary = daily_summary_at(day(), &snapshot);
        assert_eq!(summary.calories_consumed, 500.0);
        assert_eq!(summary.protein, 10.0);
        assert_eq!(summary.date, day());
    }

    #[test]
    fn burned_counts_only_today() {
        let snapshot = Snapshot {
            exercise: vec![exercise_at(300.0, 0), exercise_at(120.0, 0), exercise_at(999.0, 1)],
            ..Snapshot::default()
        };

        let summary = daily_summary_at(day(), &snapshot);
        assert_eq!(summary.calories_burned, 420.0);
        assert_eq!(summary.net, -420.0);
    }

    #[test]
    fn empty_lists_sum_to_zero() {
        let summary = daily_summary_at(day(), &Snapshot::default());
        assert_eq!(summary.calories_consumed, 0.0);
        assert_eq!(summary.calories_burned, 0.0);
    }

    #[test]
    fn nan_entry_poisons_the_day() {
        let snapshot = Snapshot {
            food: vec![food_at(500.0, 9, 0), food_at(f64::NAN, 10, 0), food_at(200.0, 9, -1)],
            ..Snapshot::default()
        };

        assert!(daily_summary_at(day(), &snapshot).calories_consumed.is_nan());
        let yesterday = day() - Duration::days(1);
        assert_eq!(daily_summary_at(yesterday, &snapshot).calories_consumed, 200.0);
    }

    #[test]
    fn stats_last_7_days_oldest_first() {
        let snapshot = Snapshot {
            food: vec![food_at(400.0, 12, -2), food_at(100.0, 8, 0)],
            exercise: vec![exercise_at(250.0, -2)],
            ..Snapshot::default()
        };

        let stats = build_stats_at(day(), &snapshot);
        assert_eq!(stats.last_7_days.len(), 7);
        assert_eq!(stats.last_7_days[0].date, day() - Duration::days(6));
        assert_eq!(stats.last_7_days[6].date, day());

        let two_days_ago = &stats.last_7_days[4];
        assert_eq!(two_days_ago.calories_consumed, 400.0);
        assert_eq!(two_days_ago.calories_burned, 250.0);
        assert_eq!(two_days_ago.net, 150.0);
        assert_eq!(stats.last_7_days[6].calories_consumed, 100.0);
    }

    #[test]
    fn weight_progress_tracks_goal() {
        let stats = build_stats_at(day(), &Snapshot::default());
        assert_eq!(stats.weight.latest_recorded, None);
        assert_eq!(stats.weight.remaining, 5.0);
    }
}
