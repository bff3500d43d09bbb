//! entrena - Personal fitness tracker with AI coaching

use std::collections::BTreeSet;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{error, warn};

use entrena::ai::{CHAT_FALLBACK, CoachClient, QUOTE_FALLBACK, prompts};
use entrena::coach::{CompletionKey, RoutineSession};
use entrena::exercises::{self, MuscleGroup};
use entrena::models::{
    AiRoutine, ChatMessage, ExperienceLevel, Gender, LoggedExercise, UserGoal, WorkoutLog,
    WorkoutSet,
};
use entrena::stats::Analytics;
use entrena::store::Store;
use entrena::tui::App;

const STORE_PATH: &str = "entrena.db";

#[derive(Parser)]
#[command(name = "entrena")]
#[command(author, version, about = "Entrenador personal con coach de IA")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open TUI dashboard
    Tui,

    /// Show or update the user profile
    Profile {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        age: Option<u32>,

        #[arg(long, value_enum)]
        gender: Option<Gender>,

        /// Height in cm
        #[arg(long)]
        height: Option<f64>,

        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,

        #[arg(long, value_enum)]
        experience: Option<ExperienceLevel>,

        #[arg(long, value_enum)]
        goal: Option<UserGoal>,
    },

    /// Log a workout manually
    Log {
        /// Workout name (e.g. "Pecho y Tríceps")
        name: String,

        /// Exercise name
        exercise: String,

        /// Number of sets
        #[arg(short, long, default_value = "3")]
        sets: u32,

        /// Repetitions per set
        #[arg(short, long, default_value = "10")]
        reps: u32,

        /// Weight in kg
        #[arg(short, long, default_value = "0")]
        weight: f64,

        /// Optional notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List workout history
    History {
        /// Number of workouts to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show workout statistics
    Stats {
        /// Filter by exercise name
        exercise: Option<String>,
    },

    /// Browse the exercise catalog
    Exercises {
        /// Filter by muscle group
        #[arg(short, long, value_enum)]
        muscle: Option<MuscleGroup>,
    },

    /// Generate a new AI weekly routine
    Coach,

    /// Show the routine in progress
    Routine,

    /// Toggle one routine exercise as done (1-based day and exercise)
    Done {
        /// Day number within the plan
        day: usize,

        /// Exercise number within the day
        exercise: usize,
    },

    /// Fold the completed routine into the workout history
    Finish,

    /// Ask the nutrition assistant
    Chat {
        /// Your question
        message: String,
    },

    /// Print a motivational quote
    Quote,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let store = Store::open(STORE_PATH)?;

    match cli.command {
        Some(Commands::Tui) | None => {
            let mut app = App::new(store)?;
            app.run()?;
        }

        Some(Commands::Profile {
            name,
            age,
            gender,
            height,
            weight,
            experience,
            goal,
        }) => {
            let mut profile = store.profile()?;
            let editing = name.is_some()
                || age.is_some()
                || gender.is_some()
                || height.is_some()
                || weight.is_some()
                || experience.is_some()
                || goal.is_some();

            if editing {
                if let Some(name) = name {
                    profile.name = name;
                }
                if let Some(age) = age {
                    profile.age = age;
                }
                if let Some(gender) = gender {
                    profile.gender = gender;
                }
                if let Some(height) = height {
                    profile.height_cm = height;
                }
                if let Some(weight) = weight {
                    profile.weight_kg = weight;
                }
                if let Some(experience) = experience {
                    profile.experience = experience;
                }
                if let Some(goal) = goal {
                    profile.goal = goal;
                }
                store.save_profile(&profile)?;
                println!("Perfil actualizado.\n");
            }

            println!("Nombre: {}", profile.name);
            println!("Edad: {}", profile.age);
            println!("Género: {}", profile.gender.label());
            println!("Altura: {} cm", profile.height_cm);
            println!("Peso: {} kg", profile.weight_kg);
            println!("Experiencia: {}", profile.experience.label());
            println!("Objetivo: {}", profile.goal.label());
        }

        Some(Commands::Log {
            name,
            exercise,
            sets,
            reps,
            weight,
            notes,
        }) => {
            let log = WorkoutLog::new(
                name.clone(),
                vec![LoggedExercise {
                    exercise: exercise.clone(),
                    sets: vec![WorkoutSet { reps, weight_kg: weight }; sets as usize],
                    notes,
                }],
                Utc::now(),
            );
            store.append_log(log)?;
            println!("Registrado: {name} - {exercise} {sets}x{reps} @ {weight} kg");
        }

        Some(Commands::History { limit }) => {
            let catalog = store.catalog()?;
            let mut history = store.history()?;
            history.sort_by(|a, b| b.date.cmp(&a.date));

            if history.is_empty() {
                println!("Aún no has registrado ningún entrenamiento.");
            }

            for log in history.iter().take(limit) {
                println!("{} | {}", log.date.format("%Y-%m-%d"), log.name);
                for logged in &log.exercises {
                    let display_name = exercises::find_by_name(&catalog, &logged.exercise)
                        .map_or(logged.exercise.as_str(), |e| e.name.as_str());
                    println!("  {display_name}");
                    for (i, set) in logged.sets.iter().enumerate() {
                        println!("    Serie {}: {} reps @ {} kg", i + 1, set.reps, set.weight_kg);
                    }
                    if let Some(notes) = &logged.notes {
                        println!("    Nota: {notes}");
                    }
                }
                println!("{:-<60}", "");
            }
        }

        Some(Commands::Stats { exercise }) => {
            let analytics = Analytics::new(store.history()?);

            println!("Estadísticas de Entrenamiento");
            println!("{:-<40}", "");

            if let Some(ex) = exercise {
                println!("Ejercicio: {ex}");
                println!("Volumen total: {} reps", analytics.total_volume(&ex));
            } else {
                println!("Entrenamientos: {}", analytics.total_workouts());
                println!("Frecuencia semanal: {:.1} sesiones/semana", analytics.weekly_frequency());
                if let Some(last) = analytics.last_workout() {
                    println!("Último: {} ({})", last.name, last.date.format("%Y-%m-%d"));
                }
            }
        }

        Some(Commands::Exercises { muscle }) => {
            let catalog = store.catalog()?;
            let selected: Vec<_> = match muscle {
                Some(group) => exercises::by_muscle_group(&catalog, group),
                None => catalog.iter().collect(),
            };

            for ex in selected {
                println!("{} [{}]", ex.name, ex.muscle_group.label());
                println!("  {}", ex.description);
                println!("  Equipo: {}", ex.equipment);
                println!("  Técnica: {}", ex.technique);
                println!();
            }
        }

        Some(Commands::Coach) => {
            let client = CoachClient::from_env()?;
            let profile = store.profile()?;
            let history = store.history()?;

            // A regeneration discards the previous plan and its checkmarks
            store.clear_routine()?;
            store.clear_completed_keys()?;

            println!("Generando rutina...");
            match client.generate_routine(&profile, &history).await {
                Ok(routine) => {
                    store.save_routine(&routine)?;
                    print_routine(&routine, &BTreeSet::new());
                }
                Err(e) => {
                    error!(error = %e, "routine generation failed");
                    println!("No se pudo generar la rutina. Inténtalo de nuevo.");
                }
            }
        }

        Some(Commands::Routine) => match store.routine()? {
            Some(routine) => {
                let completed = store.completed_keys()?;
                print_routine(&routine, &completed);
            }
            None => {
                println!("Tu rutina generada por IA aparecerá aquí.");
                println!("Usa 'entrena coach' para comenzar.");
            }
        },

        Some(Commands::Done { day, exercise }) => {
            let Some(routine) = store.routine()? else {
                println!("No hay ninguna rutina en curso. Usa 'entrena coach' para generar una.");
                return Ok(());
            };

            if day == 0 || day > routine.plan.len() {
                println!("Día fuera de rango: el plan tiene {} días.", routine.plan.len());
                return Ok(());
            }
            let day_exercises = routine.plan[day - 1].exercises.len();
            if exercise == 0 || exercise > day_exercises {
                println!("Ejercicio fuera de rango: el día {day} tiene {day_exercises} ejercicios.");
                return Ok(());
            }

            let mut session = RoutineSession::new(routine, store.completed_keys()?);
            let key = CompletionKey {
                day: day - 1,
                exercise: exercise - 1,
            };
            let name = session.routine().plan[key.day].exercises[key.exercise].name.clone();
            let done = session.toggle(key);
            store.save_completed_keys(session.completed())?;

            if done {
                println!("[x] {name}");
            } else {
                println!("[ ] {name}");
            }
            println!(
                "{}/{} ejercicios completados",
                session.completed().len(),
                session.total_exercises()
            );
        }

        Some(Commands::Finish) => {
            let Some(routine) = store.routine()? else {
                println!("No hay ninguna rutina en curso. Usa 'entrena coach' para generar una.");
                return Ok(());
            };

            let session = RoutineSession::new(routine, store.completed_keys()?);
            match session.finish(Utc::now()) {
                Some(log) => {
                    store.append_log(log)?;
                    store.clear_routine()?;
                    store.clear_completed_keys()?;
                    println!("¡Rutina guardada en tu historial con éxito!");
                }
                None => {
                    println!(
                        "Todavía no puedes finalizar: {}/{} ejercicios completados.",
                        session.completed().len(),
                        session.total_exercises()
                    );
                }
            }
        }

        Some(Commands::Chat { message }) => {
            let profile = store.profile()?;
            let mut transcript = store.chat_history()?;
            if transcript.is_empty() {
                transcript.push(ChatMessage::model(prompts::chat_greeting(&profile)));
            }

            let reply = match CoachClient::from_env() {
                Ok(client) => client.nutrition_advice(&message, &transcript, &profile).await,
                Err(e) => {
                    warn!(error = %e, "nutrition chat unavailable");
                    CHAT_FALLBACK.to_string()
                }
            };

            transcript.push(ChatMessage::user(message));
            transcript.push(ChatMessage::model(reply.clone()));
            store.save_chat_history(&transcript)?;

            println!("{reply}");
        }

        Some(Commands::Quote) => {
            let quote = match CoachClient::from_env() {
                Ok(client) => client.motivational_quote().await,
                Err(e) => {
                    warn!(error = %e, "quote unavailable");
                    QUOTE_FALLBACK.to_string()
                }
            };
            println!("\"{quote}\"");
        }
    }

    Ok(())
}

fn print_routine(routine: &AiRoutine, completed: &BTreeSet<CompletionKey>) {
    println!("Tu Plan Semanal (Semana {})", routine.week);
    println!("\"{}\"", routine.rationale);
    println!();

    for (day_idx, day) in routine.plan.iter().enumerate() {
        println!("Día {} - {} ({})", day.day, day.name, day.focus);
        for (ex_idx, exercise) in day.exercises.iter().enumerate() {
            let key = CompletionKey {
                day: day_idx,
                exercise: ex_idx,
            };
            let mark = if completed.contains(&key) { "x" } else { " " };
            println!(
                "  [{mark}] {}. {}  {} x {}",
                ex_idx + 1,
                exercise.name,
                exercise.sets,
                exercise.reps
            );
        }
    }

    let total: usize = routine.total_exercises();
    println!();
    println!("{}/{} ejercicios completados", completed.len(), total);
}
