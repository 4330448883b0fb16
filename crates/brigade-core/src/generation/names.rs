//! Name generation for new hires

use rand::Rng;

/// Generate a display name such as "Cook Yuki"
pub fn generate_name(rng: &mut impl Rng) -> String {
    let given = GIVEN_NAMES[rng.gen_range(0..GIVEN_NAMES.len())];
    format!("Cook {}", given)
}

/// Kitchen title for a hire of the given base efficiency
pub fn role_for(base_efficiency: f32) -> &'static str {
    if base_efficiency >= 0.85 {
        "Sous Chef"
    } else if base_efficiency >= 0.75 {
        "Chef de Partie"
    } else {
        "Line Cook"
    }
}

static GIVEN_NAMES: &[&str] = &[
    "Ana", "Marco", "Yuki", "Priya", "Tomas", "Aisha", "Pavel", "Ingrid", "Carlos", "Fatima",
    "Wei", "Giulia", "Hiro", "Lena", "Omar", "Sofia", "Kwame", "Mei", "Rafael", "Elena",
    "Jonas", "Nadia", "Luca", "Amara", "Diego", "Hana", "Felix", "Zara", "Mateo", "Ines",
];
