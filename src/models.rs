//! Core data model - perfil, registros de entrenamiento, rutina IA, chat

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Biological gender used for AI personalization
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
pub enum Gender {
    #[serde(rename = "Masculino")]
    Male,
    #[serde(rename = "Femenino")]
    Female,
    #[serde(rename = "Otro")]
    Other,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Masculino",
            Gender::Female => "Femenino",
            Gender::Other => "Otro",
        }
    }

    pub fn all() -> &'static [Gender] {
        &[Gender::Male, Gender::Female, Gender::Other]
    }
}

/// Training experience level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
pub enum ExperienceLevel {
    #[serde(rename = "Principiante")]
    Beginner,
    #[serde(rename = "Intermedio")]
    Intermediate,
    #[serde(rename = "Avanzado")]
    Advanced,
}

impl ExperienceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "Principiante",
            ExperienceLevel::Intermediate => "Intermedio",
            ExperienceLevel::Advanced => "Avanzado",
        }
    }

    pub fn all() -> &'static [ExperienceLevel] {
        &[
            ExperienceLevel::Beginner,
            ExperienceLevel::Intermediate,
            ExperienceLevel::Advanced,
        ]
    }
}

/// Primary training goal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
pub enum UserGoal {
    #[serde(rename = "Ganar Fuerza")]
    GainStrength,
    #[serde(rename = "Perder Peso")]
    LoseWeight,
    #[serde(rename = "Tonificar")]
    Tone,
    #[serde(rename = "Mantener Forma")]
    Maintain,
}

impl UserGoal {
    pub fn label(&self) -> &'static str {
        match self {
            UserGoal::GainStrength => "Ganar Fuerza",
            UserGoal::LoseWeight => "Perder Peso",
            UserGoal::Tone => "Tonificar",
            UserGoal::Maintain => "Mantener Forma",
        }
    }

    pub fn all() -> &'static [UserGoal] {
        &[
            UserGoal::GainStrength,
            UserGoal::LoseWeight,
            UserGoal::Tone,
            UserGoal::Maintain,
        ]
    }
}

/// User profile driving AI personalization. Replaced as a whole on edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub experience: ExperienceLevel,
    pub goal: UserGoal,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Atleta".to_string(),
            age: 30,
            gender: Gender::Male,
            height_cm: 180.0,
            weight_kg: 80.0,
            experience: ExperienceLevel::Intermediate,
            goal: UserGoal::GainStrength,
        }
    }
}

/// One performed set
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSet {
    pub reps: u32,
    pub weight_kg: f64,
}

/// One exercise inside a workout log.
///
/// `exercise` holds the exercise *name* (AI plans produce names, not catalog
/// ids); history rendering resolves it against the catalog by name and falls
/// back to the stored string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggedExercise {
    pub exercise: String,
    pub sets: Vec<WorkoutSet>,
    pub notes: Option<String>,
}

/// Permanent record of a completed workout. History is a pure append log:
/// a WorkoutLog is never edited after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutLog {
    pub id: String,
    pub date: DateTime<Utc>,
    pub name: String,
    pub exercises: Vec<LoggedExercise>,
}

impl WorkoutLog {
    /// Create a log stamped with `now` as both id and date
    pub fn new(name: impl Into<String>, exercises: Vec<LoggedExercise>, now: DateTime<Utc>) -> Self {
        Self {
            id: now.to_rfc3339(),
            date: now,
            name: name.into(),
            exercises,
        }
    }
}

/// One exercise slot of an AI plan. Sets and reps arrive as range text
/// ("3-4", "8-12") exactly as the model produced them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiRoutineExercise {
    pub name: String,
    pub sets: String,
    pub reps: String,
}

/// One day of an AI weekly plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiRoutineDay {
    pub day: u32,
    pub name: String,
    pub focus: String,
    pub exercises: Vec<AiRoutineExercise>,
}

/// AI-generated weekly plan. Transient: cleared once finished or regenerated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiRoutine {
    pub week: u32,
    pub plan: Vec<AiRoutineDay>,
    pub rationale: String,
}

impl AiRoutine {
    /// Exercise count across all days of the plan
    pub fn total_exercises(&self) -> usize {
        self.plan.iter().map(|day| day.exercises.len()).sum()
    }
}

/// Chat transcript roles, matching the Gemini wire values
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChatRole {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "model")]
    Model,
}

/// One turn of the nutrition chat transcript
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = UserProfile::default();
        assert_eq!(profile.name, "Atleta");
        assert_eq!(profile.age, 30);
        assert_eq!(profile.weight_kg, 80.0);
        assert_eq!(profile.goal, UserGoal::GainStrength);
    }

    #[test]
    fn test_goal_serializes_as_spanish_label() {
        let json = serde_json::to_string(&UserGoal::GainStrength).unwrap();
        assert_eq!(json, "\"Ganar Fuerza\"");
        let back: UserGoal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, UserGoal::GainStrength);
    }

    #[test]
    fn test_gender_labels_match_serde() {
        for gender in Gender::all() {
            let json = serde_json::to_string(gender).unwrap();
            assert_eq!(json, format!("\"{}\"", gender.label()));
        }
    }

    #[test]
    fn test_experience_all_covers_three_levels() {
        assert_eq!(ExperienceLevel::all().len(), 3);
    }

    #[test]
    fn test_chat_role_wire_values() {
        assert_eq!(serde_json::to_string(&ChatRole::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&ChatRole::Model).unwrap(), "\"model\"");
    }

    #[test]
    fn test_total_exercises_sums_all_days() {
        let routine = AiRoutine {
            week: 1,
            plan: vec![
                AiRoutineDay {
                    day: 1,
                    name: "Día de Empuje".to_string(),
                    focus: "Pecho".to_string(),
                    exercises: vec![
                        AiRoutineExercise {
                            name: "Press de Banca".to_string(),
                            sets: "3-4".to_string(),
                            reps: "8-12".to_string(),
                        },
                        AiRoutineExercise {
                            name: "Flexiones".to_string(),
                            sets: "3".to_string(),
                            reps: "12".to_string(),
                        },
                    ],
                },
                AiRoutineDay {
                    day: 2,
                    name: "Día de Tracción".to_string(),
                    focus: "Espalda".to_string(),
                    exercises: vec![AiRoutineExercise {
                        name: "Dominadas".to_string(),
                        sets: "4".to_string(),
                        reps: "6-8".to_string(),
                    }],
                },
            ],
            rationale: "Plan equilibrado".to_string(),
        };
        assert_eq!(routine.total_exercises(), 3);
    }

    #[test]
    fn test_total_exercises_empty_plan() {
        let routine = AiRoutine {
            week: 1,
            plan: vec![],
            rationale: String::new(),
        };
        assert_eq!(routine.total_exercises(), 0);
    }

    #[test]
    fn test_workout_log_new_stamps_id_and_date() {
        let now = Utc::now();
        let log = WorkoutLog::new("Pecho y Tríceps", vec![], now);
        assert_eq!(log.id, now.to_rfc3339());
        assert_eq!(log.date, now);
        assert_eq!(log.name, "Pecho y Tríceps");
    }

    #[test]
    fn test_workout_log_roundtrip() {
        let log = WorkoutLog::new(
            "Prueba",
            vec![LoggedExercise {
                exercise: "Flexiones".to_string(),
                sets: vec![WorkoutSet {
                    reps: 10,
                    weight_kg: 0.0,
                }],
                notes: Some("nota".to_string()),
            }],
            Utc::now(),
        );
        let json = serde_json::to_string(&log).unwrap();
        let back: WorkoutLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }
}
