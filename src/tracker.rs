//! State transitions over a [`Snapshot`]. Nothing here touches storage; the
//! session wrapper in `state` persists whatever these functions return.

use crate::calendar::calendar_day;
use crate::models::{ExerciseDraft, ExerciseEntry, FoodDraft, FoodEntry, Snapshot, WeightRecord};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddFood(FoodDraft),
    AddExercise(ExerciseDraft),
    RecordWeight,
    SetGoal(f64),
    SetCurrentWeight(f64),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddFood(_) => "add_food",
            Action::AddExercise(_) => "add_exercise",
            Action::RecordWeight => "record_weight",
            Action::SetGoal(_) => "set_goal",
            Action::SetCurrentWeight(_) => "set_current_weight",
        }
    }
}

/// Returns the next snapshot, or `None` when the action is rejected and the
/// snapshot stays as it was.
pub fn apply(snapshot: &Snapshot, action: &Action, now: DateTime<Utc>) -> Option<Snapshot> {
    match action {
        Action::AddFood(draft) => add_food_entry(snapshot, draft, now),
        Action::AddExercise(draft) => add_exercise_entry(snapshot, draft, now),
        Action::RecordWeight => Some(record_weight(snapshot, now)),
        Action::SetGoal(value) => Some(set_goal(snapshot, *value)),
        Action::SetCurrentWeight(value) => Some(set_current_weight(snapshot, *value)),
    }
}

pub fn add_food_entry(snapshot: &Snapshot, draft: &FoodDraft, now: DateTime<Utc>) -> Option<Snapshot> {
    if draft.name.is_empty() || !(draft.calories > 0.0) {
        return None;
    }

    let last_id = snapshot.food.last().map(|entry| entry.id.as_str());
    let mut next = snapshot.clone();
    next.food.push(FoodEntry {
        id: next_entry_id(last_id, now),
        name: draft.name.clone(),
        calories: draft.calories,
        protein: draft.protein,
        timestamp: now,
    });
    Some(next)
}

pub fn add_exercise_entry(
    snapshot: &Snapshot,
    draft: &ExerciseDraft,
    now: DateTime<Utc>,
) -> Option<Snapshot> {
    if draft.name.is_empty() || !(draft.duration > 0.0) {
        return None;
    }

    let last_id = snapshot.exercise.last().map(|entry| entry.id.as_str());
    let mut next = snapshot.clone();
    next.exercise.push(ExerciseEntry {
        id: next_entry_id(last_id, now),
        name: draft.name.clone(),
        duration: draft.duration,
        calories_burned: draft.calories_burned,
        timestamp: now,
    });
    Some(next)
}

pub fn record_weight(snapshot: &Snapshot, now: DateTime<Utc>) -> Snapshot {
    let mut next = snapshot.clone();
    next.weight.push(WeightRecord {
        date: calendar_day(now),
        weight: snapshot.current,
    });
    next
}

pub fn set_goal(snapshot: &Snapshot, value: f64) -> Snapshot {
    Snapshot {
        goal: value,
        ..snapshot.clone()
    }
}

pub fn set_current_weight(snapshot: &Snapshot, value: f64) -> Snapshot {
    Snapshot {
        current: value,
        ..snapshot.clone()
    }
}

/// Epoch milliseconds of creation, bumped past the previous id when two
/// entries land in the same millisecond (or the clock steps back).
fn next_entry_id(last_id: Option<&str>, now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis();
    let floor = last_id
        .and_then(|id| id.parse::<i64>().ok())
        .map(|last| last.saturating_add(1))
        .unwrap_or(i64::MIN);
    millis.max(floor).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap()
    }

    fn food(name: &str, calories: f64) -> FoodDraft {
        FoodDraft {
            name: name.into(),
            calories,
            protein: 0.0,
        }
    }

    #[test]
    fn defaults_hold_75_and_70() {
        let snapshot = Snapshot::default();
        assert_eq!(snapshot.current, 75.0);
        assert_eq!(snapshot.goal, 70.0);
        assert!(snapshot.food.is_empty());
        assert!(snapshot.exercise.is_empty());
        assert!(snapshot.weight.is_empty());
    }

    #[test]
    fn valid_food_appends_one_entry_each() {
        let mut snapshot = Snapshot::default();
        let names = ["Apple", "Bread", "Cheese", "Dates"];
        for (index, name) in names.iter().enumerate() {
            snapshot = add_food_entry(&snapshot, &food(name, 100.0 + index as f64), now()).unwrap();
            assert_eq!(snapshot.food.len(), index + 1);
        }

        for (entry, name) in snapshot.food.iter().zip(names) {
            assert_eq!(entry.name, name);
            assert_eq!(entry.timestamp, now());
        }
        assert_eq!(snapshot.food[2].calories, 102.0);
    }

    #[test]
    fn ids_increase_within_one_millisecond() {
        let mut snapshot = Snapshot::default();
        for _ in 0..3 {
            snapshot = add_food_entry(&snapshot, &food("Apple", 95.0), now()).unwrap();
        }
        let ids: Vec<i64> = snapshot.food.iter().map(|e| e.id.parse().unwrap()).collect();
        assert_eq!(ids[0], now().timestamp_millis());
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn ids_stay_ahead_when_clock_steps_back() {
        let snapshot = add_food_entry(&Snapshot::default(), &food("Apple", 95.0), now()).unwrap();
        let earlier = now() - Duration::seconds(10);
        let snapshot = add_food_entry(&snapshot, &food("Pear", 60.0), earlier).unwrap();
        let first: i64 = snapshot.food[0].id.parse().unwrap();
        let second: i64 = snapshot.food[1].id.parse().unwrap();
        assert_eq!(second, first + 1);
    }

    #[test]
    fn food_rejected_without_name_or_calories() {
        let snapshot = Snapshot::default();
        assert!(add_food_entry(&snapshot, &food("", 95.0), now()).is_none());
        assert!(add_food_entry(&snapshot, &food("Apple", 0.0), now()).is_none());
        assert!(add_food_entry(&snapshot, &food("Apple", -5.0), now()).is_none());
        assert!(add_food_entry(&snapshot, &food("Apple", f64::NAN), now()).is_none());
    }

    #[test]
    fn exercise_keyed_on_duration() {
        let snapshot = Snapshot::default();
        let run = ExerciseDraft {
            name: "Run".into(),
            duration: 30.0,
            calories_burned: 300.0,
        };
        let next = add_exercise_entry(&snapshot, &run, now()).unwrap();
        assert_eq!(next.exercise.len(), 1);
        assert_eq!(next.exercise[0].calories_burned, 300.0);

        let idle = ExerciseDraft {
            duration: 0.0,
            ..run.clone()
        };
        assert!(add_exercise_entry(&snapshot, &idle, now()).is_none());

        // Burned calories are not checked, only duration.
        let free = ExerciseDraft {
            calories_burned: 0.0,
            ..run
        };
        assert!(add_exercise_entry(&snapshot, &free, now()).is_some());
    }

    #[test]
    fn record_weight_twice_same_day_keeps_both() {
        let snapshot = set_current_weight(&Snapshot::default(), 80.0);
        let snapshot = record_weight(&snapshot, now());
        let snapshot = record_weight(&snapshot, now() + Duration::hours(2));

        let day = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(
            snapshot.weight,
            vec![
                WeightRecord { date: day, weight: 80.0 },
                WeightRecord { date: day, weight: 80.0 },
            ]
        );
    }

    #[test]
    fn goal_and_current_accept_any_value() {
        let snapshot = set_goal(&Snapshot::default(), -3.0);
        let snapshot = set_current_weight(&snapshot, 0.0);
        assert_eq!(snapshot.goal, -3.0);
        assert_eq!(snapshot.current, 0.0);
    }

    #[test]
    fn apply_dispatches_and_leaves_input_untouched() {
        let snapshot = Snapshot::default();
        let next = apply(&snapshot, &Action::AddFood(food("Apple", 95.0)), now()).unwrap();
        assert_eq!(next.food.len(), 1);
        assert!(snapshot.food.is_empty());
        assert!(apply(&snapshot, &Action::AddFood(food("", 95.0)), now()).is_none());
        assert!(apply(&snapshot, &Action::RecordWeight, now()).is_some());
    }
}
