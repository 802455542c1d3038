//! Grouping of stored application answers for the appointment detail view.

use crate::domain::{choice_label, ApplicationAnswers, FieldKind, FormField};

/// A titled group of answered questions.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailSection {
    pub title: &'static str,
    pub entries: Vec<(String, String)>,
}

const SECTIONS: [(&str, &[FormField]); 8] = [
    (
        "Basic Information",
        &[FormField::FullName, FormField::Address, FormField::PhoneNumber, FormField::EmailAddress],
    ),
    ("Housing", &[FormField::HomeOwnership, FormField::LeaseAllowsPets]),
    ("Household", &[FormField::HouseholdMembers, FormField::Allergies]),
    (
        "Current Pets",
        &[FormField::HasPets, FormField::CurrentPets, FormField::PetsSpayedNeutered],
    ),
    ("Experience", &[FormField::HadCatsBefore, FormField::PreviousCats]),
    (
        "Adoption Details",
        &[FormField::AdoptionReason, FormField::SpecificCat, FormField::PrimaryCaretaker],
    ),
    ("Care Plans", &[FormField::IndoorOutdoor, FormField::HoursAlone, FormField::WhenAway]),
    (
        "Commitment",
        &[FormField::LongTermCommitment, FormField::VeterinaryCare, FormField::VetReference],
    ),
];

/// Builds the detail sections for `answers`, skipping unanswered questions.
pub fn detail_sections(answers: &ApplicationAnswers) -> Vec<DetailSection> {
    SECTIONS
        .iter()
        .map(|&(title, fields)| DetailSection {
            title,
            entries: fields
                .iter()
                .filter_map(|field| {
                    let value = field.read(answers);
                    if value.trim().is_empty() {
                        return None;
                    }
                    let shown = match field.kind() {
                        FieldKind::Choice(_) => choice_label(&value).to_string(),
                        FieldKind::Text => value,
                    };
                    Some((humanize_key(field.key()), shown))
                })
                .collect(),
        })
        .collect()
}

/// Turns a camelCase key into a title: `hadCatsBefore` becomes `Had Cats Before`.
pub fn humanize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_ascii_uppercase() {
            out.push(' ');
            out.push(c);
        } else {
            out.push(c);
        }
    }
    out
}
