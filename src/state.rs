use crate::errors::AppError;
use crate::models::{
    Drafts, ExerciseDraft, ExerciseDraftPatch, FoodDraft, FoodDraftPatch, Snapshot, StateResponse,
};
use crate::stats::daily_summary;
use crate::storage::persist_snapshot;
use crate::tracker::{self, Action};
use chrono::Utc;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::sync::Mutex;
use tracing::debug;

/// The in-memory session: the persisted snapshot plus unsubmitted drafts.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub snapshot: Snapshot,
    pub drafts: Drafts,
}

impl Session {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            drafts: Drafts::default(),
        }
    }

    pub fn view(&self) -> StateResponse {
        StateResponse {
            snapshot: self.snapshot.clone(),
            drafts: self.drafts.clone(),
            today: daily_summary(&self.snapshot),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, snapshot: Snapshot) -> Self {
        Self {
            data_path,
            session: Arc::new(Mutex::new(Session::new(snapshot))),
        }
    }

    /// Applies `action`, writes the resulting snapshot out and only then
    /// commits it in memory. Returns whether the action was accepted.
    pub async fn dispatch(&self, action: Action) -> Result<bool, AppError> {
        let mut session = self.session.lock().await;
        commit(&self.data_path, &mut session, action).await
    }

    /// Sets the current weight and records it without releasing the lock in
    /// between, so the recorded value is the one given here.
    pub async fn update_weight(&self, value: f64) -> Result<(), AppError> {
        let mut session = self.session.lock().await;
        commit(&self.data_path, &mut session, Action::SetCurrentWeight(value)).await?;
        commit(&self.data_path, &mut session, Action::RecordWeight).await?;
        Ok(())
    }

    /// Submits the current food draft, clearing it when accepted.
    pub async fn submit_food(&self) -> Result<bool, AppError> {
        let mut session = self.session.lock().await;
        let action = Action::AddFood(session.drafts.food.clone());
        let accepted = commit(&self.data_path, &mut session, action).await?;
        if accepted {
            session.drafts.food = FoodDraft::default();
        }
        Ok(accepted)
    }

    pub async fn submit_exercise(&self) -> Result<bool, AppError> {
        let mut session = self.session.lock().await;
        let action = Action::AddExercise(session.drafts.exercise.clone());
        let accepted = commit(&self.data_path, &mut session, action).await?;
        if accepted {
            session.drafts.exercise = ExerciseDraft::default();
        }
        Ok(accepted)
    }

    pub async fn edit_food_draft(&self, patch: FoodDraftPatch) {
        self.session.lock().await.drafts.food.apply_patch(patch);
    }

    pub async fn edit_exercise_draft(&self, patch: ExerciseDraftPatch) {
        self.session.lock().await.drafts.exercise.apply_patch(patch);
    }

    pub async fn set_food_draft(&self, draft: FoodDraft) {
        self.session.lock().await.drafts.food = draft;
    }

    pub async fn set_exercise_draft(&self, draft: ExerciseDraft) {
        self.session.lock().await.drafts.exercise = draft;
    }

    pub async fn view(&self) -> StateResponse {
        self.session.lock().await.view()
    }
}

async fn commit(data_path: &Path, session: &mut Session, action: Action) -> Result<bool, AppError> {
    let Some(next) = tracker::apply(&session.snapshot, &action, Utc::now()) else {
        debug!(action = action.name(), "rejected");
        return Ok(false);
    };

    persist_snapshot(data_path, &next).await?;
    session.snapshot = next;
    debug!(action = action.name(), "committed");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NumberInput;
    use crate::storage::load_snapshot;
    use tempfile::TempDir;

    fn state_in(dir: &TempDir) -> AppState {
        AppState::new(dir.path().join("fitnessData.json"), Snapshot::default())
    }

    fn food_patch(name: &str, calories: &str) -> FoodDraftPatch {
        FoodDraftPatch {
            name: Some(name.into()),
            calories: Some(NumberInput::Text(calories.into())),
            protein: None,
        }
    }

    #[tokio::test]
    async fn accepted_food_persists_and_clears_draft() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);

        state.edit_food_draft(food_patch("Apple", "95")).await;
        assert!(state.submit_food().await.unwrap());

        let view = state.view().await;
        assert_eq!(view.snapshot.food.len(), 1);
        assert_eq!(view.snapshot.food[0].name, "Apple");
        assert_eq!(view.today.calories_consumed, 95.0);
        assert_eq!(view.drafts.food, FoodDraft::default());

        let stored = load_snapshot(&state.data_path).await.unwrap().unwrap();
        assert_eq!(stored, view.snapshot);
    }

    #[tokio::test]
    async fn rejected_food_keeps_draft_and_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);

        state.edit_food_draft(food_patch("Apple", "0")).await;
        assert!(!state.submit_food().await.unwrap());

        let view = state.view().await;
        assert!(view.snapshot.food.is_empty());
        assert_eq!(view.drafts.food.name, "Apple");
        assert!(!state.data_path.exists());
    }

    #[tokio::test]
    async fn exercise_scenario_updates_burned_total() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);

        state
            .edit_exercise_draft(ExerciseDraftPatch {
                name: Some("Run".into()),
                duration: Some(NumberInput::Number(30.0)),
                calories_burned: Some(NumberInput::Number(300.0)),
            })
            .await;
        assert!(state.submit_exercise().await.unwrap());

        let view = state.view().await;
        assert_eq!(view.snapshot.exercise.len(), 1);
        assert_eq!(view.today.calories_burned, 300.0);
        assert_eq!(view.drafts.exercise.name, "");
    }

    #[tokio::test]
    async fn record_weight_uses_current_value() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);

        assert!(state.dispatch(Action::SetCurrentWeight(80.0)).await.unwrap());
        assert!(state.dispatch(Action::RecordWeight).await.unwrap());

        let view = state.view().await;
        assert_eq!(view.snapshot.weight.len(), 1);
        assert_eq!(view.snapshot.weight[0].weight, 80.0);
        assert_eq!(view.snapshot.weight[0].date, view.today.date);

        let stored = load_snapshot(&state.data_path).await.unwrap().unwrap();
        assert_eq!(stored.current, 80.0);
        assert_eq!(stored.weight.len(), 1);
    }

    #[tokio::test]
    async fn update_weight_is_not_split_by_other_writers() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);

        let updater = {
            let state = state.clone();
            tokio::spawn(async move { state.update_weight(82.0).await })
        };
        let setter = {
            let state = state.clone();
            tokio::spawn(async move { state.dispatch(Action::SetCurrentWeight(90.0)).await })
        };
        updater.await.unwrap().unwrap();
        setter.await.unwrap().unwrap();

        let view = state.view().await;
        assert_eq!(view.snapshot.weight.len(), 1);
        assert_eq!(view.snapshot.weight[0].weight, 82.0);

        let stored = load_snapshot(&state.data_path).await.unwrap().unwrap();
        assert_eq!(stored.weight, view.snapshot.weight);
        assert_eq!(stored.current, view.snapshot.current);
    }

    #[tokio::test]
    async fn failed_write_leaves_memory_unchanged() {
        let dir = TempDir::new().unwrap();
        let state = AppState::new(
            dir.path().join("missing").join("fitnessData.json"),
            Snapshot::default(),
        );

        assert!(state.dispatch(Action::SetGoal(60.0)).await.is_err());
        assert_eq!(state.view().await.snapshot.goal, 70.0);
    }
}
