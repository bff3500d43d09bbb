//! Exercise catalog - catálogo de ejercicios de gimnasio

use serde::{Deserialize, Serialize};

/// Muscle groups for catalog browsing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum MuscleGroup {
    #[serde(rename = "Piernas")]
    Legs,
    #[serde(rename = "Espalda")]
    Back,
    #[serde(rename = "Pecho")]
    Chest,
    #[serde(rename = "Brazos")]
    Arms,
    #[serde(rename = "Hombros")]
    Shoulders,
    #[serde(rename = "Abdomen")]
    Abs,
    #[serde(rename = "Glúteos")]
    Glutes,
    #[serde(rename = "Cuerpo Completo")]
    FullBody,
}

impl MuscleGroup {
    pub fn label(&self) -> &'static str {
        match self {
            MuscleGroup::Legs => "Piernas",
            MuscleGroup::Back => "Espalda",
            MuscleGroup::Chest => "Pecho",
            MuscleGroup::Arms => "Brazos",
            MuscleGroup::Shoulders => "Hombros",
            MuscleGroup::Abs => "Abdomen",
            MuscleGroup::Glutes => "Glúteos",
            MuscleGroup::FullBody => "Cuerpo Completo",
        }
    }

    /// All muscle groups for iteration
    pub fn all() -> &'static [MuscleGroup] {
        &[
            MuscleGroup::Legs,
            MuscleGroup::Back,
            MuscleGroup::Chest,
            MuscleGroup::Arms,
            MuscleGroup::Shoulders,
            MuscleGroup::Abs,
            MuscleGroup::Glutes,
            MuscleGroup::FullBody,
        ]
    }
}

/// Catalog entry. Seed data, never mutated after first load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub description: String,
    pub muscle_group: MuscleGroup,
    pub equipment: String,
    pub technique: String,
    pub image_url: String,
}

fn entry(
    id: &str,
    name: &str,
    description: &str,
    muscle_group: MuscleGroup,
    equipment: &str,
    technique: &str,
    image_seed: &str,
) -> Exercise {
    Exercise {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        muscle_group,
        equipment: equipment.to_string(),
        technique: technique.to_string(),
        image_url: format!("https://picsum.photos/seed/{image_seed}/400/300"),
    }
}

/// Seed catalog - the default value for the persisted `exercises` record
pub fn seed() -> Vec<Exercise> {
    vec![
        // Pecho
        entry(
            "chest_1",
            "Press de Banca con Barra",
            "Ejercicio fundamental para el desarrollo del pectoral, hombros y tríceps.",
            MuscleGroup::Chest,
            "Barra, Banco plano",
            "Acuéstate en el banco, agarra la barra con las manos un poco más anchas que los hombros. Baja la barra al pecho y empuja hacia arriba.",
            "benchpress",
        ),
        entry(
            "chest_2",
            "Flexiones",
            "Ejercicio de peso corporal clásico para el pecho.",
            MuscleGroup::Chest,
            "Ninguno",
            "Manos al ancho de los hombros, cuerpo recto. Baja el pecho hasta casi tocar el suelo y empuja hacia arriba.",
            "pushups",
        ),
        // Espalda
        entry(
            "back_1",
            "Dominadas",
            "Excelente para desarrollar la amplitud de la espalda.",
            MuscleGroup::Back,
            "Barra de dominadas",
            "Agarra la barra con las palmas hacia afuera. Sube el cuerpo hasta que la barbilla pase la barra.",
            "pullups",
        ),
        entry(
            "back_2",
            "Remo con Barra",
            "Ejercicio clave para la densidad de la espalda.",
            MuscleGroup::Back,
            "Barra",
            "Inclina el torso hacia adelante con la espalda recta. Tira de la barra hacia la parte baja del abdomen.",
            "barbellrow",
        ),
        // Piernas
        entry(
            "legs_1",
            "Sentadillas con Barra",
            "El rey de los ejercicios de piernas.",
            MuscleGroup::Legs,
            "Barra, Rack",
            "Coloca la barra sobre los trapecios. Baja como si te sentaras en una silla, manteniendo la espalda recta.",
            "squats",
        ),
        entry(
            "legs_2",
            "Zancadas",
            "Trabaja cuádriceps, glúteos e isquiotibiales de forma unilateral.",
            MuscleGroup::Legs,
            "Mancuernas (opcional)",
            "Da un paso adelante y baja la rodilla trasera casi hasta el suelo. Vuelve a la posición inicial y alterna.",
            "lunges",
        ),
        // Hombros
        entry(
            "shoulders_1",
            "Press Militar con Barra",
            "Ejercicio fundamental para desarrollar la fuerza y el tamaño de los hombros.",
            MuscleGroup::Shoulders,
            "Barra",
            "De pie, con la barra a la altura de la clavícula, empújala por encima de la cabeza hasta extender los brazos por completo.",
            "overheadpress",
        ),
        // Brazos
        entry(
            "arms_1",
            "Curl de Bíceps con Mancuernas",
            "Ejercicio clásico para aislar y desarrollar los bíceps.",
            MuscleGroup::Arms,
            "Mancuernas",
            "De pie o sentado, con una mancuerna en cada mano, flexiona los codos para llevar las pesas hacia los hombros.",
            "bicepcurl",
        ),
        // Abdomen
        entry(
            "abs_1",
            "Plancha Abdominal",
            "Ejercicio isométrico para fortalecer todo el core.",
            MuscleGroup::Abs,
            "Ninguno",
            "Mantén el cuerpo en línea recta, apoyado en los antebrazos y las puntas de los pies. Contrae el abdomen.",
            "plank",
        ),
    ]
}

pub fn find<'a>(catalog: &'a [Exercise], id: &str) -> Option<&'a Exercise> {
    catalog.iter().find(|e| e.id == id)
}

/// Find exercise by name (logged exercises store names, not catalog ids)
pub fn find_by_name<'a>(catalog: &'a [Exercise], name: &str) -> Option<&'a Exercise> {
    catalog.iter().find(|e| e.name == name)
}

pub fn by_muscle_group(catalog: &[Exercise], group: MuscleGroup) -> Vec<&Exercise> {
    catalog.iter().filter(|e| e.muscle_group == group).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalog_size() {
        assert_eq!(seed().len(), 9);
    }

    #[test]
    fn test_seed_ids_unique() {
        let catalog = seed();
        let mut ids: Vec<_> = catalog.iter().map(|e| e.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_find_by_id() {
        let catalog = seed();
        let ex = find(&catalog, "legs_1").unwrap();
        assert_eq!(ex.name, "Sentadillas con Barra");
    }

    #[test]
    fn test_find_unknown_id() {
        let catalog = seed();
        assert!(find(&catalog, "legs_99").is_none());
    }

    #[test]
    fn test_find_by_name() {
        let catalog = seed();
        let ex = find_by_name(&catalog, "Flexiones").unwrap();
        assert_eq!(ex.id, "chest_2");
    }

    #[test]
    fn test_find_by_name_misses_ai_invented_exercise() {
        let catalog = seed();
        assert!(find_by_name(&catalog, "Press Inclinado con Mancuernas").is_none());
    }

    #[test]
    fn test_by_muscle_group() {
        let catalog = seed();
        let chest = by_muscle_group(&catalog, MuscleGroup::Chest);
        assert_eq!(chest.len(), 2);
        assert!(chest.iter().all(|e| e.muscle_group == MuscleGroup::Chest));
    }

    #[test]
    fn test_muscle_group_serializes_as_label() {
        for group in MuscleGroup::all() {
            let json = serde_json::to_string(group).unwrap();
            assert_eq!(json, format!("\"{}\"", group.label()));
        }
    }

    #[test]
    fn test_all_entries_have_technique() {
        for ex in seed() {
            assert!(!ex.technique.is_empty(), "{} missing technique", ex.id);
        }
    }
}
