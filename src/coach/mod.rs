//! Coach module - AI routine completion tracking
//!
//! Tracks per-exercise checkmarks over an AI weekly plan and, once every
//! slot is marked done, folds the plan into a permanent workout log with
//! synthesized sets.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AiRoutine, LoggedExercise, WorkoutLog, WorkoutSet};

/// Set count used when the plan's range text has no usable leading integer
pub const DEFAULT_SETS: u32 = 3;
/// Rep count used when the plan's range text has no usable leading integer
pub const DEFAULT_REPS: u32 = 8;

/// Note attached to every exercise logged from a finished routine
pub const AUTO_COMPLETE_NOTE: &str =
    "Completado desde rutina de Coach IA. El peso no fue registrado.";

/// Identifies one exercise slot in the plan's day/exercise grid
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct CompletionKey {
    pub day: usize,
    pub exercise: usize,
}

/// An AI plan plus its completion checkmarks
pub struct RoutineSession {
    routine: AiRoutine,
    completed: BTreeSet<CompletionKey>,
}

impl RoutineSession {
    pub fn new(routine: AiRoutine, completed: BTreeSet<CompletionKey>) -> Self {
        Self { routine, completed }
    }

    pub fn routine(&self) -> &AiRoutine {
        &self.routine
    }

    pub fn completed(&self) -> &BTreeSet<CompletionKey> {
        &self.completed
    }

    pub fn total_exercises(&self) -> usize {
        self.routine.total_exercises()
    }

    pub fn is_done(&self, key: CompletionKey) -> bool {
        self.completed.contains(&key)
    }

    /// Flip one checkmark. Returns the new membership state.
    pub fn toggle(&mut self, key: CompletionKey) -> bool {
        if self.completed.remove(&key) {
            false
        } else {
            self.completed.insert(key);
            true
        }
    }

    /// True iff every exercise slot is checked and the plan is non-empty
    pub fn is_complete(&self) -> bool {
        let total = self.total_exercises();
        total > 0 && self.completed.len() == total
    }

    /// Fold the completed plan into a workout log.
    ///
    /// Only produces a log when `is_complete()` holds; an incomplete or
    /// empty plan returns `None` and the session state is untouched for the
    /// caller to decide next steps. Each plan exercise becomes one logged
    /// exercise with `leading_int(sets)` synthesized sets of
    /// `leading_int(reps)` repetitions at weight 0 (the plan carries no
    /// load data).
    pub fn finish(&self, now: DateTime<Utc>) -> Option<WorkoutLog> {
        if !self.is_complete() {
            return None;
        }

        let mut logged = Vec::with_capacity(self.total_exercises());
        for day in &self.routine.plan {
            for exercise in &day.exercises {
                let num_sets = leading_int(&exercise.sets).unwrap_or(DEFAULT_SETS);
                let reps = leading_int(&exercise.reps).unwrap_or(DEFAULT_REPS);
                let sets = vec![WorkoutSet { reps, weight_kg: 0.0 }; num_sets as usize];

                logged.push(LoggedExercise {
                    exercise: exercise.name.clone(),
                    sets,
                    notes: Some(AUTO_COMPLETE_NOTE.to_string()),
                });
            }
        }

        Some(WorkoutLog::new(
            format!("Rutina de Coach IA - Semana {}", self.routine.week),
            logged,
            now,
        ))
    }
}

/// Parse the leading integer of a range text such as "3-4" or "8-12".
///
/// Takes the segment before the first '-', skips leading whitespace and
/// reads leading ASCII digits. Returns `None` for text with no usable
/// positive integer ("AMRAP", "", "0-5" all fall through to the defaults).
fn leading_int(text: &str) -> Option<u32> {
    let head = text.split('-').next().unwrap_or("").trim_start();
    let digits: String = head.chars().take_while(char::is_ascii_digit).collect();
    match digits.parse::<u32>() {
        Ok(n) if n > 0 => Some(n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AiRoutineDay, AiRoutineExercise};

    fn exercise(name: &str, sets: &str, reps: &str) -> AiRoutineExercise {
        AiRoutineExercise {
            name: name.to_string(),
            sets: sets.to_string(),
            reps: reps.to_string(),
        }
    }

    fn routine(week: u32, days: Vec<Vec<AiRoutineExercise>>) -> AiRoutine {
        AiRoutine {
            week,
            plan: days
                .into_iter()
                .enumerate()
                .map(|(i, exercises)| AiRoutineDay {
                    day: i as u32 + 1,
                    name: format!("Día {}", i + 1),
                    focus: "General".to_string(),
                    exercises,
                })
                .collect(),
            rationale: "Plan de prueba".to_string(),
        }
    }

    fn complete_session(r: AiRoutine) -> RoutineSession {
        let mut session = RoutineSession::new(r, BTreeSet::new());
        for (day, plan_day) in session.routine().plan.clone().iter().enumerate() {
            for exercise in 0..plan_day.exercises.len() {
                session.toggle(CompletionKey { day, exercise });
            }
        }
        session
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let r = routine(1, vec![vec![exercise("Flexiones", "3", "10")]]);
        let mut session = RoutineSession::new(r, BTreeSet::new());
        let key = CompletionKey { day: 0, exercise: 0 };

        assert!(!session.is_done(key));
        assert!(session.toggle(key));
        assert!(session.is_done(key));
        assert!(!session.toggle(key));
        assert!(!session.is_done(key));
    }

    #[test]
    fn test_not_complete_until_every_slot_checked() {
        let r = routine(
            1,
            vec![
                vec![exercise("Flexiones", "3", "10"), exercise("Dominadas", "3", "6")],
                vec![exercise("Sentadillas", "4", "8")],
            ],
        );
        let mut session = RoutineSession::new(r, BTreeSet::new());
        assert!(!session.is_complete());

        session.toggle(CompletionKey { day: 0, exercise: 0 });
        session.toggle(CompletionKey { day: 0, exercise: 1 });
        assert!(!session.is_complete());

        session.toggle(CompletionKey { day: 1, exercise: 0 });
        assert!(session.is_complete());
    }

    #[test]
    fn test_empty_plan_is_never_complete() {
        let session = RoutineSession::new(routine(1, vec![]), BTreeSet::new());
        assert!(!session.is_complete());
    }

    #[test]
    fn test_finish_refused_while_incomplete() {
        let r = routine(1, vec![vec![exercise("Flexiones", "3", "10")]]);
        let session = RoutineSession::new(r, BTreeSet::new());
        assert!(session.finish(Utc::now()).is_none());
    }

    #[test]
    fn test_finish_empty_plan_is_noop() {
        let session = RoutineSession::new(routine(3, vec![]), BTreeSet::new());
        assert!(session.finish(Utc::now()).is_none());
    }

    #[test]
    fn test_finish_synthesizes_sets_from_range_text() {
        let r = routine(1, vec![vec![exercise("Press de Banca", "3-4", "8-12")]]);
        let session = complete_session(r);

        let log = session.finish(Utc::now()).unwrap();
        assert_eq!(log.exercises.len(), 1);
        let logged = &log.exercises[0];
        assert_eq!(logged.exercise, "Press de Banca");
        assert_eq!(logged.sets.len(), 3);
        for set in &logged.sets {
            assert_eq!(set.reps, 8);
            assert_eq!(set.weight_kg, 0.0);
        }
        assert_eq!(logged.notes.as_deref(), Some(AUTO_COMPLETE_NOTE));
    }

    #[test]
    fn test_finish_defaults_unparseable_sets_and_reps() {
        let r = routine(1, vec![vec![exercise("Fondos", "AMRAP", "al fallo")]]);
        let session = complete_session(r);

        let log = session.finish(Utc::now()).unwrap();
        let logged = &log.exercises[0];
        assert_eq!(logged.sets.len(), DEFAULT_SETS as usize);
        assert!(logged.sets.iter().all(|s| s.reps == DEFAULT_REPS));
    }

    #[test]
    fn test_finish_treats_zero_as_unparseable() {
        let r = routine(1, vec![vec![exercise("Plancha", "0-5", "0")]]);
        let session = complete_session(r);

        let log = session.finish(Utc::now()).unwrap();
        let logged = &log.exercises[0];
        assert_eq!(logged.sets.len(), 3);
        assert!(logged.sets.iter().all(|s| s.reps == 8));
    }

    #[test]
    fn test_finish_log_name_carries_week_number() {
        let r = routine(7, vec![vec![exercise("Flexiones", "3", "10")]]);
        let session = complete_session(r);

        let log = session.finish(Utc::now()).unwrap();
        assert_eq!(log.name, "Rutina de Coach IA - Semana 7");
        assert!(log.name.contains('7'));
    }

    #[test]
    fn test_finish_stamps_id_and_date_from_now() {
        let r = routine(1, vec![vec![exercise("Flexiones", "3", "10")]]);
        let session = complete_session(r);

        let now = Utc::now();
        let log = session.finish(now).unwrap();
        assert_eq!(log.id, now.to_rfc3339());
        assert_eq!(log.date, now);
    }

    #[test]
    fn test_finish_preserves_day_then_exercise_order() {
        let r = routine(
            1,
            vec![
                vec![exercise("A", "2", "5"), exercise("B", "2", "5")],
                vec![exercise("C", "2", "5")],
            ],
        );
        let session = complete_session(r);

        let log = session.finish(Utc::now()).unwrap();
        let names: Vec<_> = log.exercises.iter().map(|e| e.exercise.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn test_leading_int_parses_ranges() {
        assert_eq!(leading_int("3-4"), Some(3));
        assert_eq!(leading_int("8-12"), Some(8));
        assert_eq!(leading_int("12"), Some(12));
        assert_eq!(leading_int(" 4 - 6"), Some(4));
        assert_eq!(leading_int("10x"), Some(10));
    }

    #[test]
    fn test_leading_int_rejects_unusable_text() {
        assert_eq!(leading_int("AMRAP"), None);
        assert_eq!(leading_int(""), None);
        assert_eq!(leading_int("0-5"), None);
        assert_eq!(leading_int("-5"), None);
        assert_eq!(leading_int("al fallo"), None);
    }

    #[test]
    fn test_completion_key_ordering_is_day_major() {
        let mut keys = BTreeSet::new();
        keys.insert(CompletionKey { day: 1, exercise: 0 });
        keys.insert(CompletionKey { day: 0, exercise: 2 });
        keys.insert(CompletionKey { day: 0, exercise: 0 });

        let ordered: Vec<_> = keys.into_iter().collect();
        assert_eq!(
            ordered,
            [
                CompletionKey { day: 0, exercise: 0 },
                CompletionKey { day: 0, exercise: 2 },
                CompletionKey { day: 1, exercise: 0 },
            ]
        );
    }
}
