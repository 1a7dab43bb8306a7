//! Built-in pharmacy catalog used when no catalog is configured.

use crate::catalog::{Catalog, Product};
use crate::error::PharmacyError;
use crate::money::{Currency, Money};

/// (name, price, stock, description, leaflet)
const BUILTIN: &[(&str, i64, u32, &str, &str)] = &[
    (
        "Paracetamol",
        10,
        10,
        "Relieves pain and reduces fever",
        "Paracetamol can relieve pain from many different causes, such as headaches and pain \
         from osteoarthritis. It is also used to reduce fever.",
    ),
    (
        "Chlorpheniramine",
        5,
        5,
        "Manages upper respiratory allergies",
        "Chlorpheniramine is a histamine-H1 receptor antagonist indicated for the management \
         of symptoms associated with upper respiratory allergies.",
    ),
    (
        "Semicon",
        15,
        15,
        "Antiflatulence drug",
        "Semicon (Simethicone) is an antiflatulence drug. It is a non-toxic surface-active \
         substance that is not absorbed by the mucous membranes, and acts as a foam \
         suppressant by lowering the surface tension of gas bubbles in the stomach and \
         intestine.",
    ),
    (
        "Piperazine",
        8,
        20,
        "Expels worms from the body",
        "Piperazine paralyses the muscles of intestinal worms, which are then expelled from \
         the body through the feces.",
    ),
    (
        "Betadine",
        12,
        25,
        "External disinfectant with iodine",
        "Betadine is an iodine-based topical antiseptic. It is effective against bacteria, \
         fungi, viruses, and protozoa.",
    ),
    (
        "Simethicone",
        7,
        12,
        "Relieves bloating and flatulence",
        "Simethicone relieves bloating and flatulence caused by gases such as hydrogen and \
         methane in the stomach and intestines.",
    ),
    (
        "Oral Rehydration Salts",
        18,
        30,
        "Compensates for fluid loss",
        "Oral Rehydration Salts (ORS) compensate for fluid loss from vomiting or diarrhea, \
         restoring electrolytes and fluids during dehydration.",
    ),
    (
        "Dimenhydrinate",
        9,
        18,
        "Prevents nausea and dizziness",
        "Dimenhydrinate is an antihistamine that prevents nausea, vomiting, and dizziness, \
         and is used to treat nausea and vomiting associated with various conditions.",
    ),
    (
        "Normal saline solution",
        14,
        22,
        "Sterile solution for external use",
        "Normal Saline Solution (NSS) is a clear, colorless, sterile solution for external \
         use, suitable for douching, washing, and general cleaning, including rinsing the \
         nasal cavity.",
    ),
    (
        "Calamine Lotion",
        6,
        8,
        "Relieves mild skin irritation",
        "Calamine Lotion is applied topically to relieve mild skin irritation such as \
         itching, rashes, hives, and allergic reactions to plants, chemicals, or cosmetics.",
    ),
];

/// Products of the built-in catalog priced in `currency`.
pub fn builtin_products(currency: Currency) -> Vec<Product> {
    BUILTIN
        .iter()
        .map(|(name, price, stock, description, details)| {
            Product::new(*name, Money::from_major(*price, currency), *stock, *description)
                .with_details(*details)
        })
        .collect()
}

/// The built-in catalog.
pub fn builtin_catalog(currency: Currency) -> Result<Catalog, PharmacyError> {
    Catalog::new(builtin_products(currency))
}
