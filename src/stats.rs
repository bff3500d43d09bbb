//! Stats module - workout history analytics for the dashboard

use crate::models::WorkoutLog;

/// History analytics
pub struct Analytics {
    history: Vec<WorkoutLog>,
}

impl Analytics {
    pub fn new(history: Vec<WorkoutLog>) -> Self {
        Self { history }
    }

    /// Total workouts logged
    pub fn total_workouts(&self) -> usize {
        self.history.len()
    }

    /// Last appended workout (history is chronological by construction)
    pub fn last_workout(&self) -> Option<&WorkoutLog> {
        self.history.last()
    }

    /// Total repetitions logged for an exercise, matched case-insensitively
    pub fn total_volume(&self, exercise: &str) -> u32 {
        let needle = exercise.to_lowercase();
        self.history
            .iter()
            .flat_map(|log| &log.exercises)
            .filter(|e| e.exercise.to_lowercase().contains(&needle))
            .flat_map(|e| &e.sets)
            .map(|set| set.reps)
            .sum()
    }

    /// Workout frequency (sessions per week)
    pub fn weekly_frequency(&self) -> f64 {
        if self.history.len() < 2 {
            return 0.0;
        }

        let mut dates: Vec<_> = self.history.iter().map(|log| log.date.date_naive()).collect();
        dates.sort_unstable();

        let first = dates.first().unwrap();
        let last = dates.last().unwrap();
        let days = (*last - *first).num_days() as f64;

        if days == 0.0 {
            return self.history.len() as f64;
        }

        (self.history.len() as f64 / days) * 7.0
    }
}
