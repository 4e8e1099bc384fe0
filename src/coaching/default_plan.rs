// ABOUTME: Fixed bodyweight session returned whenever plan generation fails
// ABOUTME: Content matches what the mobile client has always shown as the fallback

use fitcoach_core::models::{Plan, StrengthExercise, TimedExercise};

fn timed(exercise: &str, duration: &str, description: &str) -> TimedExercise {
    TimedExercise {
        exercise: exercise.to_owned(),
        duration: duration.to_owned(),
        description: description.to_owned(),
    }
}

fn strength(exercise: &str, sets: u32, reps: &str, rest: &str, description: &str) -> StrengthExercise {
    StrengthExercise {
        exercise: exercise.to_owned(),
        sets,
        reps: reps.to_owned(),
        rest: rest.to_owned(),
        description: description.to_owned(),
    }
}

/// Build the default plan
#[must_use]
pub fn default_plan() -> Plan {
    Plan {
        session_name: "Séance Personnalisée".to_owned(),
        duration: "50 minutes".to_owned(),
        warmup: vec![
            timed("Jumping Jacks", "3 minutes", "Échauffement cardio"),
            timed("Rotations des bras", "2 minutes", "Mobilité articulaire"),
        ],
        main_workout: vec![
            strength("Squats", 3, "15", "60s", "Travail des jambes"),
            strength("Pompes", 3, "10", "60s", "Travail du haut du corps"),
            strength("Planche", 3, "30s", "45s", "Renforcement du core"),
        ],
        cooldown: vec![
            timed("Étirements quadriceps", "2 minutes", "Étirement des jambes"),
            timed("Étirements dos", "2 minutes", "Relâchement du dos"),
        ],
        tips: vec![
            "Hydratez-vous régulièrement".to_owned(),
            "Respectez les temps de repos".to_owned(),
        ],
        calories_burned: 300,
    }
}
