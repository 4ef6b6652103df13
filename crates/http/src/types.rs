//! Wire types shared by the OAuth2 provider and the workout plan API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Token endpoint response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// OIDC identity token (JWT)
    pub id_token: String,
    /// Opaque access token
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    /// Returned by some providers; never used, refresh is not supported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl TokenPair {
    pub fn new(id_token: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            id_token: id_token.into(),
            access_token: access_token.into(),
            token_type: None,
            expires_in: None,
            refresh_token: None,
        }
    }
}

/// Message body returned by the mutating API endpoints
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Workout plan as returned by the plan API
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub plan_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub sessions: Vec<WorkoutSession>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// One training session inside a plan
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<ExerciseItem>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl WorkoutSession {
    /// Exercises in display order with groups (supersets, circuits) expanded
    pub fn flattened_exercises(&self) -> Vec<&Exercise> {
        self.exercises
            .iter()
            .flat_map(|item| match item {
                ExerciseItem::Group(group) => group.exercises.iter().collect::<Vec<_>>(),
                ExerciseItem::Single(exercise) => vec![exercise],
            })
            .collect()
    }
}

/// Either a single exercise or a group of exercises performed together
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExerciseItem {
    Group(ExerciseGroup),
    Single(Exercise),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_type: Option<String>,
    pub exercises: Vec<Exercise>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(alias = "exerciseId")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Prescription fields (sets, reps, rest, ...) kept as sent
    #[serde(flatten)]
    pub details: Map<String, JsonValue>,
}
