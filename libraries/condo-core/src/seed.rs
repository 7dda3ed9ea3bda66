//! Fixed house list seeded into a freshly created remote document.
//!
//! The condominium layout is static: four streets with known house codes.
//! Houses are created here once and never deleted at runtime.

use crate::types::House;

fn house(number: u32, street_letter: char, street: &str) -> House {
    let id = format!("TH{number:02}{street_letter}");
    House {
        name: id.clone(),
        id,
        owner: String::new(),
        balance: 0.0,
        street: street.to_string(),
    }
}

/// Generate the full fixed house list.
///
/// Calle A: TH00A..TH33A plus TH35A and TH37A. Calle B: TH01B..TH32B.
/// Calle C: odd numbers TH01C..TH23C. Calle P: TH01P..TH10P.
pub fn seed_houses() -> Vec<House> {
    let mut houses = Vec::new();

    for i in 0..=33 {
        houses.push(house(i, 'A', "Calle A"));
    }
    houses.push(house(35, 'A', "Calle A"));
    houses.push(house(37, 'A', "Calle A"));

    for i in 1..=32 {
        houses.push(house(i, 'B', "Calle B"));
    }

    for i in (1..=23).step_by(2) {
        houses.push(house(i, 'C', "Calle C"));
    }

    for i in 1..=10 {
        houses.push(house(i, 'P', "Calle P"));
    }

    houses
}
