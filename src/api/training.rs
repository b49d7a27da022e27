//! Training Exercises API
//! Mission: Mock clinical-case exercises for the training dashboard
//!
//! Exercises live in memory only: a read-mostly list seeded with the
//! built-in cases, appended to by profs/admins. Attempts are scored on the
//! spot and never persisted.

use crate::auth::models::Identity;
use crate::auth::policy::{self, Action};
use crate::errors::ApiError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Zone of interest on the case image, in percent of image dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetZone {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// A clinical case: image, target zone, and reviewer feedback
#[derive(Debug, Clone, Serialize)]
pub struct Exercise {
    pub id: String,
    pub modality: String, // "Radiography", "MRI", "CT"
    pub title: String,
    pub level: String,
    pub description: String,
    pub image: String,
    pub target: TargetZone,
    pub feedback: String,
}

/// Listing entry as students see it: the answer key (target zone and
/// feedback) is withheld until an attempt is scored.
#[derive(Debug, Serialize)]
pub struct ExerciseSummary {
    pub id: String,
    pub modality: String,
    pub title: String,
    pub level: String,
    pub description: String,
    pub image: String,
}

impl ExerciseSummary {
    fn from_exercise(e: &Exercise) -> Self {
        Self {
            id: e.id.clone(),
            modality: e.modality.clone(),
            title: e.title.clone(),
            level: e.level.clone(),
            description: e.description.clone(),
            image: e.image.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateExerciseRequest {
    pub modality: String,
    pub title: String,
    pub level: String,
    pub description: String,
    pub image: String,
    pub target: TargetZone,
    pub feedback: String,
}

/// Marker placed by the student, in percent coordinates
#[derive(Debug, Deserialize)]
pub struct AttemptRequest {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Serialize)]
pub struct AttemptResult {
    pub score: u32,
    pub hit: bool,
    pub feedback: String,
}

/// Shared training state
#[derive(Clone)]
pub struct TrainingState {
    exercises: Arc<RwLock<Vec<Exercise>>>,
}

impl TrainingState {
    /// Seed the in-memory list with the built-in reference cases.
    pub fn with_builtin_cases() -> Self {
        Self {
            exercises: Arc::new(RwLock::new(builtin_cases())),
        }
    }
}

fn builtin_cases() -> Vec<Exercise> {
    vec![
        Exercise {
            id: "radio-thorax".to_string(),
            modality: "Radiography".to_string(),
            title: "Chest, frontal view".to_string(),
            level: "Beginner".to_string(),
            description: "Suspected right basal pneumonia.".to_string(),
            image: "https://placehold.co/800x800/1e293b/FFFFFF/png?text=Chest+X-ray+Case+1"
                .to_string(),
            target: TargetZone {
                x: 65.0,
                y: 70.0,
                radius: 10.0,
            },
            feedback: "The pneumonia is visible in the right lower lobe as an alveolar opacity."
                .to_string(),
        },
        Exercise {
            id: "irm-cerveau".to_string(),
            modality: "MRI".to_string(),
            title: "Brain, axial T2".to_string(),
            level: "Intermediate".to_string(),
            description: "Chronic headaches. Rule out an expansive process.".to_string(),
            image: "https://placehold.co/800x800/0f172a/FFFFFF/png?text=Brain+MRI+Case+2"
                .to_string(),
            target: TargetZone {
                x: 45.0,
                y: 40.0,
                radius: 8.0,
            },
            feedback: "A hyperintense lesion is visible in the left parietal region.".to_string(),
        },
        Exercise {
            id: "scan-abdo".to_string(),
            modality: "CT".to_string(),
            title: "Abdomen and pelvis".to_string(),
            level: "Advanced".to_string(),
            description: "Right iliac fossa pain. Suspected appendicitis.".to_string(),
            image: "https://placehold.co/800x800/334155/FFFFFF/png?text=Abdominal+CT+Case+3"
                .to_string(),
            target: TargetZone {
                x: 30.0,
                y: 60.0,
                radius: 5.0,
            },
            feedback: "The appendix is dilated with peri-appendiceal fat stranding.".to_string(),
        },
    ]
}

/// Score a marker against the target zone. Closer is better; a marker
/// within the target radius counts as a hit.
fn score_attempt(target: &TargetZone, x: f64, y: f64) -> (u32, bool) {
    let dist = ((x - target.x).powi(2) + (y - target.y).powi(2)).sqrt();
    let score = (100.0 - dist * 2.0).round().max(0.0) as u32;
    (score, dist <= target.radius)
}

/// List exercises - GET /api/training/exercises (Student/Admin)
pub async fn list_exercises(
    State(state): State<TrainingState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<ExerciseSummary>>, ApiError> {
    policy::authorize(&identity, Action::ViewTraining)?;

    let exercises = state.exercises.read();
    let response: Vec<ExerciseSummary> =
        exercises.iter().map(ExerciseSummary::from_exercise).collect();

    Ok(Json(response))
}

/// Submit an attempt - POST /api/training/exercises/:id/attempt (Student/Admin)
pub async fn submit_attempt(
    State(state): State<TrainingState>,
    Extension(identity): Extension<Identity>,
    Path(exercise_id): Path<String>,
    Json(payload): Json<AttemptRequest>,
) -> Result<Json<AttemptResult>, ApiError> {
    policy::authorize(&identity, Action::SubmitTraining)?;

    let exercises = state.exercises.read();
    let exercise = exercises
        .iter()
        .find(|e| e.id == exercise_id)
        .ok_or(ApiError::NotFound)?;

    let (score, hit) = score_attempt(&exercise.target, payload.x, payload.y);

    info!(
        student = %identity.id,
        exercise = %exercise.id,
        score,
        hit,
        "Attempt scored"
    );

    Ok(Json(AttemptResult {
        score,
        hit,
        feedback: exercise.feedback.clone(),
    }))
}

/// Create an exercise - POST /api/training/exercises (Prof/Admin)
pub async fn create_exercise(
    State(state): State<TrainingState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<CreateExerciseRequest>,
) -> Result<(StatusCode, Json<Exercise>), ApiError> {
    policy::authorize(&identity, Action::CreateTraining)?;

    let exercise = Exercise {
        id: Uuid::new_v4().to_string(),
        modality: payload.modality,
        title: payload.title,
        level: payload.level,
        description: payload.description,
        image: payload.image,
        target: payload.target,
        feedback: payload.feedback,
    };

    info!(author = %identity.id, exercise = %exercise.id, "Exercise created");

    state.exercises.write().push(exercise.clone());

    Ok((StatusCode::CREATED, Json(exercise)))
}
