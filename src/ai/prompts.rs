//! Prompt construction for the Gemini coach, nutrition chat and quotes

use serde_json::{Value, json};

use crate::models::{UserProfile, WorkoutLog};

/// Placeholder used when the workout history is empty
pub const NO_HISTORY_PLACEHOLDER: &str = "Sin historial reciente.";

/// How many trailing history entries are shared with the coach
pub const HISTORY_WINDOW: usize = 5;

/// Static prompt for the dashboard motivational quote
pub const QUOTE_PROMPT: &str =
    "Dame una cita motivacional corta y poderosa sobre fitness o superación personal, en español.";

/// Weekly-routine generation prompt: profile fields plus the trailing
/// history window, with an explicit placeholder when there is none.
pub fn routine_prompt(profile: &UserProfile, history: &[WorkoutLog]) -> String {
    let recent = &history[history.len().saturating_sub(HISTORY_WINDOW)..];
    let history_lines = if recent.is_empty() {
        NO_HISTORY_PLACEHOLDER.to_string()
    } else {
        recent
            .iter()
            .map(|log| {
                format!(
                    "- {}: {} ({} ejercicios)",
                    log.date.format("%Y-%m-%d"),
                    log.name,
                    log.exercises.len()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Eres un experto entrenador personal de IA. Basado en el siguiente perfil de usuario \
         y su historial de entrenamiento reciente, crea un plan de entrenamiento semanal \
         equilibrado y efectivo de 3 días.\n\n\
         Perfil de Usuario:\n\
         - Edad: {}\n\
         - Género: {}\n\
         - Peso: {} kg\n\
         - Altura: {} cm\n\
         - Experiencia: {}\n\
         - Objetivo: {}\n\n\
         Historial de Entrenamiento Reciente (últimos {}):\n\
         {}\n\n\
         Genera el plan en el formato JSON especificado. Cada día debe tener un nombre \
         (ej. 'Día de Empuje'), un enfoque muscular, y una lista de 5-6 ejercicios. Para cada \
         ejercicio, especifica el nombre, número de series y un rango de repeticiones objetivo. \
         Proporciona una breve justificación de tus elecciones.",
        profile.age,
        profile.gender.label(),
        profile.weight_kg,
        profile.height_cm,
        profile.experience.label(),
        profile.goal.label(),
        HISTORY_WINDOW,
        history_lines,
    )
}

/// JSON schema constraining the routine response to the AiRoutine shape
pub fn routine_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "week": { "type": "INTEGER", "description": "Número de la semana del plan." },
            "plan": {
                "type": "ARRAY",
                "description": "Plan de entrenamiento para la semana.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "day": { "type": "INTEGER" },
                        "name": { "type": "STRING" },
                        "focus": { "type": "STRING" },
                        "exercises": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "name": { "type": "STRING" },
                                    "sets": { "type": "STRING" },
                                    "reps": { "type": "STRING" }
                                },
                                "required": ["name", "sets", "reps"]
                            }
                        }
                    },
                    "required": ["day", "name", "focus", "exercises"]
                }
            },
            "rationale": { "type": "STRING", "description": "Justificación del plan de entrenamiento." }
        },
        "required": ["week", "plan", "rationale"]
    })
}

/// System instruction embedding the Tragón IA nutrition persona
pub fn nutrition_system_prompt(profile: &UserProfile) -> String {
    format!(
        "Eres 'Tragón IA', un experto mundial en nutrición deportiva y alimentación saludable. \
         Tu propósito es proporcionar consejos claros, detallados y prácticos.\n\
         - Personalización: Basa tus respuestas en el perfil del usuario (edad: {}, género: {}, \
         peso: {}kg, altura: {}cm, objetivo: {}, experiencia: {}) para ofrecer recomendaciones \
         personalizadas. No menciones sus datos explícitamente a menos que sea relevante para la consulta.\n\
         - Detalle en Recetas: Cuando recomiendes recetas, incluye una lista clara de ingredientes \
         con cantidades, pasos detallados para la preparación y una explicación de por qué es \
         beneficiosa para el objetivo del usuario.\n\
         - Adaptabilidad: Si el usuario menciona alergias, restricciones (vegano, sin gluten, etc.) \
         o preferencias, adapta tus sugerencias de manera estricta.\n\
         - Claridad Conceptual: Explica conceptos como macronutrientes, calorías, y micronutrientes \
         de forma sencilla y aplicable.\n\
         - Formato: Utiliza markdown simple (negritas con **, listas con -) para que tus respuestas \
         sean fáciles de leer y estructuradas. No uses encabezados (#).\n\
         - Tono: Sé amigable, motivador y profesional. Tu objetivo es empoderar al usuario para que \
         tome mejores decisiones sobre su alimentación.",
        profile.age,
        profile.gender.label(),
        profile.weight_kg,
        profile.height_cm,
        profile.goal.label(),
        profile.experience.label(),
    )
}

/// First transcript message shown when the nutrition chat is empty
pub fn chat_greeting(profile: &UserProfile) -> String {
    format!(
        "¡Hola {}! Soy Tragón IA, tu asistente de nutrición personal. ¿Cómo puedo ayudarte a \
         alcanzar tus objetivos hoy? Puedes pedirme recetas, un plan de comidas, o preguntarme \
         sobre cualquier alimento.",
        profile.name
    )
}
