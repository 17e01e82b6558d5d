use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_CURRENT_WEIGHT: f64 = 75.0;
pub const DEFAULT_WEIGHT_GOAL: f64 = 70.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "stored_number")]
    pub calories: f64,
    #[serde(default, deserialize_with = "stored_number")]
    pub protein: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseEntry {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "stored_number")]
    pub duration: f64,
    #[serde(default, deserialize_with = "stored_number")]
    pub calories_burned: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord {
    pub date: NaiveDate,
    #[serde(deserialize_with = "stored_number")]
    pub weight: f64,
}

/// Everything that survives a restart, stored as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub food: Vec<FoodEntry>,
    pub exercise: Vec<ExerciseEntry>,
    pub weight: Vec<WeightRecord>,
    #[serde(deserialize_with = "stored_number")]
    pub goal: f64,
    #[serde(deserialize_with = "stored_number")]
    pub current: f64,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            food: Vec::new(),
            exercise: Vec::new(),
            weight: Vec::new(),
            goal: DEFAULT_WEIGHT_GOAL,
            current: DEFAULT_CURRENT_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FoodDraft {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDraft {
    pub name: String,
    pub duration: f64,
    pub calories_burned: f64,
}

/// Unsubmitted form values. Held in memory only.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Drafts {
    pub food: FoodDraft,
    pub exercise: ExerciseDraft,
}

/// A numeric field as it arrives from a client: a number, some text, or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
    Null,
}

impl NumberInput {
    pub fn coerce(&self) -> f64 {
        match self {
            NumberInput::Number(value) => *value,
            NumberInput::Text(text) => coerce_number(text),
            NumberInput::Null => f64::NAN,
        }
    }
}

/// Converts free text to a number the way a browser number field does:
/// blank is zero, anything unparseable is NaN.
pub fn coerce_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let unsigned = trimmed.trim_start_matches(['+', '-']);
    if unsigned == "Infinity" {
        return if trimmed.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    // Rust accepts "inf" and "nan" spellings that a number field does not.
    if unsigned
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }

    trimmed.parse().unwrap_or(f64::NAN)
}

/// JSON has no NaN or infinity, so serde_json writes them as `null`. A
/// stored `null` reads back as 0, the value it takes in a browser sum, so a
/// total poisoned by a bad entry recovers once the snapshot is reloaded.
fn stored_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    NumberInput::deserialize(deserializer).map(|input| match input {
        NumberInput::Null => 0.0,
        other => other.coerce(),
    })
}

#[derive(Debug, Deserialize)]
pub struct ValueRequest {
    pub value: NumberInput,
}

#[derive(Debug, Deserialize, Default)]
pub struct FoodDraftPatch {
    pub name: Option<String>,
    pub calories: Option<NumberInput>,
    pub protein: Option<NumberInput>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDraftPatch {
    pub name: Option<String>,
    pub duration: Option<NumberInput>,
    pub calories_burned: Option<NumberInput>,
}

impl FoodDraft {
    pub fn apply_patch(&mut self, patch: FoodDraftPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(calories) = patch.calories {
            self.calories = calories.coerce();
        }
        if let Some(protein) = patch.protein {
            self.protein = protein.coerce();
        }
    }
}

impl ExerciseDraft {
    pub fn apply_patch(&mut self, patch: ExerciseDraftPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration.coerce();
        }
        if let Some(burned) = patch.calories_burned {
            self.calories_burned = burned.coerce();
        }
    }
}

/// Plain HTML form posts carry every field as text.
#[derive(Debug, Deserialize)]
pub struct FoodForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub calories: String,
    #[serde(default)]
    pub protein: String,
}

impl From<FoodForm> for FoodDraft {
    fn from(form: FoodForm) -> Self {
        Self {
            name: form.name,
            calories: coerce_number(&form.calories),
            protein: coerce_number(&form.protein),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExerciseForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub calories_burned: String,
}

impl From<ExerciseForm> for ExerciseDraft {
    fn from(form: ExerciseForm) -> Self {
        Self {
            name: form.name,
            duration: coerce_number(&form.duration),
            calories_burned: coerce_number(&form.calories_burned),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ValueForm {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub calories_consumed: f64,
    pub calories_burned: f64,
    pub protein: f64,
    pub net: f64,
}

#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub snapshot: Snapshot,
    pub drafts: Drafts,
    pub today: DailySummary,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub accepted: bool,
    pub state: StateResponse,
}

#[derive(Debug, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub calories_consumed: f64,
    pub calories_burned: f64,
    pub net: f64,
}

#[derive(Debug, Serialize)]
pub struct WeightProgress {
    pub latest_recorded: Option<f64>,
    pub current: f64,
    pub goal: f64,
    pub remaining: f64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub last_7_days: Vec<DailyPoint>,
    pub weight: WeightProgress,
}
