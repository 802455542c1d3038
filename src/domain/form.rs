//! The four-step adoption application.
//!
//! [`ApplicationForm`] holds the in-progress answers for one pet, gates
//! forward navigation on per-step validation and turns the answers into an
//! [`AppointmentDraft`] once the last step validates.

use super::errors::{DomainError, DomainResult};
use super::models::{
    ApplicationAnswers, AppointmentDraft, AppointmentStatus, HomeOwnership, IndoorOutdoor, Pet, YesNo, YesNoNa,
};
use chrono::{Local, NaiveDate, NaiveTime};
use std::collections::BTreeMap;

/// One page of the application. Steps are visited in order, without skipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormStep {
    Basics,
    Housing,
    PetHistory,
    CareAndScheduling,
}

impl FormStep {
    pub const COUNT: usize = 4;

    /// One-based position of the step.
    pub fn number(&self) -> usize {
        match self {
            FormStep::Basics => 1,
            FormStep::Housing => 2,
            FormStep::PetHistory => 3,
            FormStep::CareAndScheduling => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            FormStep::Basics => "Basic Information",
            FormStep::Housing => "Housing & Household",
            FormStep::PetHistory => "Pets & Experience",
            FormStep::CareAndScheduling => "Care & Commitment",
        }
    }

    pub fn next(&self) -> Option<FormStep> {
        match self {
            FormStep::Basics => Some(FormStep::Housing),
            FormStep::Housing => Some(FormStep::PetHistory),
            FormStep::PetHistory => Some(FormStep::CareAndScheduling),
            FormStep::CareAndScheduling => None,
        }
    }

    pub fn previous(&self) -> Option<FormStep> {
        match self {
            FormStep::Basics => None,
            FormStep::Housing => Some(FormStep::Basics),
            FormStep::PetHistory => Some(FormStep::Housing),
            FormStep::CareAndScheduling => Some(FormStep::PetHistory),
        }
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }
}

/// How a field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// A fixed set of option keys; the empty string means "not answered".
    Choice(&'static [&'static str]),
}

/// Every question on the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    FullName,
    Address,
    PhoneNumber,
    EmailAddress,
    HomeOwnership,
    LeaseAllowsPets,
    HouseholdMembers,
    Allergies,
    HasPets,
    CurrentPets,
    PetsSpayedNeutered,
    HadCatsBefore,
    PreviousCats,
    AdoptionReason,
    SpecificCat,
    PrimaryCaretaker,
    IndoorOutdoor,
    HoursAlone,
    WhenAway,
    LongTermCommitment,
    VeterinaryCare,
    VetReference,
    Date,
    Time,
}

const YES_NO: &[&str] = YesNo::KEYS;

impl FormField {
    /// The field's name in the stored application record.
    pub fn key(&self) -> &'static str {
        match self {
            FormField::FullName => "fullName",
            FormField::Address => "address",
            FormField::PhoneNumber => "phoneNumber",
            FormField::EmailAddress => "emailAddress",
            FormField::HomeOwnership => "homeOwnership",
            FormField::LeaseAllowsPets => "leaseAllowsPets",
            FormField::HouseholdMembers => "householdMembers",
            FormField::Allergies => "allergies",
            FormField::HasPets => "hasPets",
            FormField::CurrentPets => "currentPets",
            FormField::PetsSpayedNeutered => "petsSpayedNeutered",
            FormField::HadCatsBefore => "hadCatsBefore",
            FormField::PreviousCats => "previousCats",
            FormField::AdoptionReason => "adoptionReason",
            FormField::SpecificCat => "specificCat",
            FormField::PrimaryCaretaker => "primaryCaretaker",
            FormField::IndoorOutdoor => "indoorOutdoor",
            FormField::HoursAlone => "hoursAlone",
            FormField::WhenAway => "whenAway",
            FormField::LongTermCommitment => "longTermCommitment",
            FormField::VeterinaryCare => "veterinaryCare",
            FormField::VetReference => "vetReference",
            FormField::Date => "date",
            FormField::Time => "time",
        }
    }

    /// The question shown to the applicant.
    pub fn label(&self) -> &'static str {
        match self {
            FormField::FullName => "1. Full Name",
            FormField::Address => "2. Address",
            FormField::PhoneNumber => "3. Phone Number",
            FormField::EmailAddress => "4. Email Address",
            FormField::HomeOwnership => "5. Do you own or rent your home?",
            FormField::LeaseAllowsPets => "6. If renting, does your lease allow pets?",
            FormField::HouseholdMembers => "7. How many adults and children live in your home? (Include children's ages)",
            FormField::Allergies => "8. Does anyone in your home have allergies to cats?",
            FormField::HasPets => "9. Do you currently have pets?",
            FormField::CurrentPets => "Current Pets Details (species, age, temperament)",
            FormField::PetsSpayedNeutered => "10. Are your current pets spayed/neutered and up-to-date on vaccinations?",
            FormField::HadCatsBefore => "11. Have you had cats before?",
            FormField::PreviousCats => "Previous Cats Details (what happened to them?)",
            FormField::AdoptionReason => "12. Why do you want to adopt a cat?",
            FormField::SpecificCat => "13. Are you interested in a specific cat? (If so, which one?)",
            FormField::PrimaryCaretaker => "14. Who will be the primary caretaker for the cat?",
            FormField::IndoorOutdoor => "15. Will the cat be kept indoors, outdoors, or both?",
            FormField::HoursAlone => "16. How many hours per day will the cat be alone?",
            FormField::WhenAway => "17. Where will the cat stay when you are not home?",
            FormField::LongTermCommitment => "18. Are you prepared for a long-term (15-20 years) commitment?",
            FormField::VeterinaryCare => "19. Are you able and willing to provide regular and emergency veterinary care?",
            FormField::VetReference => "20. May we contact your veterinarian for a reference?",
            FormField::Date => "Appointment Date (YYYY-MM-DD)",
            FormField::Time => "Appointment Time (HH:MM)",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FormField::HomeOwnership => FieldKind::Choice(HomeOwnership::KEYS),
            FormField::LeaseAllowsPets | FormField::PetsSpayedNeutered => FieldKind::Choice(YesNoNa::KEYS),
            FormField::Allergies
            | FormField::HasPets
            | FormField::HadCatsBefore
            | FormField::LongTermCommitment
            | FormField::VeterinaryCare
            | FormField::VetReference => FieldKind::Choice(YES_NO),
            FormField::IndoorOutdoor => FieldKind::Choice(IndoorOutdoor::KEYS),
            _ => FieldKind::Text,
        }
    }

    /// Required fields are marked with an asterisk in the form.
    pub fn is_required(&self) -> bool {
        !matches!(self, FormField::SpecificCat)
    }

    /// Reads the field's current value as text; unanswered choices read as "".
    pub fn read(&self, answers: &ApplicationAnswers) -> String {
        match self {
            FormField::FullName => answers.full_name.clone(),
            FormField::Address => answers.address.clone(),
            FormField::PhoneNumber => answers.phone_number.clone(),
            FormField::EmailAddress => answers.email_address.clone(),
            FormField::HomeOwnership => choice_key(answers.home_ownership.map(|v| v.as_str())),
            FormField::LeaseAllowsPets => choice_key(answers.lease_allows_pets.map(|v| v.as_str())),
            FormField::HouseholdMembers => answers.household_members.clone(),
            FormField::Allergies => choice_key(answers.allergies.map(|v| v.as_str())),
            FormField::HasPets => choice_key(answers.has_pets.map(|v| v.as_str())),
            FormField::CurrentPets => answers.current_pets.clone(),
            FormField::PetsSpayedNeutered => choice_key(answers.pets_spayed_neutered.map(|v| v.as_str())),
            FormField::HadCatsBefore => choice_key(answers.had_cats_before.map(|v| v.as_str())),
            FormField::PreviousCats => answers.previous_cats.clone(),
            FormField::AdoptionReason => answers.adoption_reason.clone(),
            FormField::SpecificCat => answers.specific_cat.clone(),
            FormField::PrimaryCaretaker => answers.primary_caretaker.clone(),
            FormField::IndoorOutdoor => choice_key(answers.indoor_outdoor.map(|v| v.as_str())),
            FormField::HoursAlone => answers.hours_alone.clone(),
            FormField::WhenAway => answers.when_away.clone(),
            FormField::LongTermCommitment => choice_key(answers.long_term_commitment.map(|v| v.as_str())),
            FormField::VeterinaryCare => choice_key(answers.veterinary_care.map(|v| v.as_str())),
            FormField::VetReference => choice_key(answers.vet_reference.map(|v| v.as_str())),
            FormField::Date => answers.date.clone(),
            FormField::Time => answers.time.clone(),
        }
    }

    /// Writes a raw value into the answers. Choice fields accept their option
    /// keys or "" to clear the answer.
    pub fn write(&self, answers: &mut ApplicationAnswers, raw: &str) -> DomainResult<()> {
        match self {
            FormField::FullName => answers.full_name = raw.to_string(),
            FormField::Address => answers.address = raw.to_string(),
            FormField::PhoneNumber => answers.phone_number = raw.to_string(),
            FormField::EmailAddress => answers.email_address = raw.to_string(),
            FormField::HomeOwnership => answers.home_ownership = self.parse_choice(raw, HomeOwnership::from_key)?,
            FormField::LeaseAllowsPets => answers.lease_allows_pets = self.parse_choice(raw, YesNoNa::from_key)?,
            FormField::HouseholdMembers => answers.household_members = raw.to_string(),
            FormField::Allergies => answers.allergies = self.parse_choice(raw, YesNo::from_key)?,
            FormField::HasPets => answers.has_pets = self.parse_choice(raw, YesNo::from_key)?,
            FormField::CurrentPets => answers.current_pets = raw.to_string(),
            FormField::PetsSpayedNeutered => {
                answers.pets_spayed_neutered = self.parse_choice(raw, YesNoNa::from_key)?
            }
            FormField::HadCatsBefore => answers.had_cats_before = self.parse_choice(raw, YesNo::from_key)?,
            FormField::PreviousCats => answers.previous_cats = raw.to_string(),
            FormField::AdoptionReason => answers.adoption_reason = raw.to_string(),
            FormField::SpecificCat => answers.specific_cat = raw.to_string(),
            FormField::PrimaryCaretaker => answers.primary_caretaker = raw.to_string(),
            FormField::IndoorOutdoor => answers.indoor_outdoor = self.parse_choice(raw, IndoorOutdoor::from_key)?,
            FormField::HoursAlone => answers.hours_alone = raw.to_string(),
            FormField::WhenAway => answers.when_away = raw.to_string(),
            FormField::LongTermCommitment => {
                answers.long_term_commitment = self.parse_choice(raw, YesNo::from_key)?
            }
            FormField::VeterinaryCare => answers.veterinary_care = self.parse_choice(raw, YesNo::from_key)?,
            FormField::VetReference => answers.vet_reference = self.parse_choice(raw, YesNo::from_key)?,
            FormField::Date => answers.date = raw.to_string(),
            FormField::Time => answers.time = raw.to_string(),
        }
        Ok(())
    }

    fn parse_choice<T>(&self, raw: &str, from_key: fn(&str) -> Option<T>) -> DomainResult<Option<T>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        from_key(raw).map(Some).ok_or_else(|| DomainError::InvalidChoice {
            field: self.key().to_string(),
            value: raw.to_string(),
        })
    }
}

fn choice_key(key: Option<&'static str>) -> String {
    key.unwrap_or_default().to_string()
}

/// Human readable text for a choice key.
pub fn choice_label(key: &str) -> &str {
    match key {
        "" => "Select an option",
        "own" => "Own",
        "rent" => "Rent",
        "yes" => "Yes",
        "no" => "No",
        "na" => "N/A",
        "indoor" => "Indoors only",
        "outdoor" => "Outdoors only",
        "both" => "Both indoors and outdoors",
        other => other,
    }
}

/// Basic `local@domain.tld` shape check: some non-whitespace, an `@`, more
/// non-whitespace containing a dot with at least one character on each side.
pub fn is_valid_email(email: &str) -> bool {
    let chars: Vec<char> = email.chars().collect();
    chars.iter().enumerate().any(|(at, &c)| {
        if c != '@' || at == 0 || chars[at - 1].is_whitespace() {
            return false;
        }
        let domain: Vec<char> = chars[at + 1..].iter().take_while(|c| !c.is_whitespace()).copied().collect();
        domain
            .iter()
            .enumerate()
            .any(|(i, &d)| d == '.' && i > 0 && i + 1 < domain.len())
    })
}

/// Builds the notes text stored with the appointment.
pub fn format_notes(answers: &ApplicationAnswers) -> String {
    let mut ownership = FormField::HomeOwnership.read(answers);
    if let Some(lease) = answers.lease_allows_pets {
        ownership.push_str(&format!(", Lease allows pets: {}", lease.as_str()));
    }
    let current_pets = if answers.has_pets == Some(YesNo::Yes) {
        answers.current_pets.as_str()
    } else {
        "No"
    };
    let previous_cats = if answers.had_cats_before == Some(YesNo::Yes) {
        answers.previous_cats.as_str()
    } else {
        "No"
    };

    [
        "Adoption Application Details:".to_string(),
        format!("Address: {}", answers.address),
        format!("Home Ownership: {}", ownership),
        format!("Household: {}", answers.household_members),
        format!("Allergies: {}", FormField::Allergies.read(answers)),
        format!("Current Pets: {}", current_pets),
        format!("Pets Spayed/Neutered: {}", FormField::PetsSpayedNeutered.read(answers)),
        format!("Previous Cats: {}", previous_cats),
        format!("Adoption Reason: {}", answers.adoption_reason),
        format!("Primary Caretaker: {}", answers.primary_caretaker),
        format!("Indoor/Outdoor: {}", FormField::IndoorOutdoor.read(answers)),
        format!("Hours Alone: {}", answers.hours_alone),
        format!("When Away: {}", answers.when_away),
        format!("Long-term Commitment: {}", FormField::LongTermCommitment.read(answers)),
        format!("Veterinary Care: {}", FormField::VeterinaryCare.read(answers)),
        format!("Vet Reference: {}", FormField::VetReference.read(answers)),
    ]
    .join("\n")
}

/// In-progress adoption application for a single pet.
///
/// # Examples
///
/// ```
/// use pawbook::domain::{seed_pets, ApplicationForm, FormField, FormStep};
///
/// let pet = seed_pets().remove(0);
/// let mut form = ApplicationForm::new(pet);
/// assert!(!form.next());
/// assert!(form.error(FormField::EmailAddress).is_some());
/// assert_eq!(form.step(), FormStep::Basics);
/// ```
#[derive(Debug, Clone)]
pub struct ApplicationForm {
    pet: Pet,
    step: FormStep,
    answers: ApplicationAnswers,
    errors: BTreeMap<FormField, String>,
    today: NaiveDate,
}

impl ApplicationForm {
    /// Opens a blank application for `pet`, validating dates against the local date.
    pub fn new(pet: Pet) -> Self {
        Self::with_today(pet, Local::now().date_naive())
    }

    /// Opens a blank application that treats `today` as the current date.
    pub fn with_today(pet: Pet, today: NaiveDate) -> Self {
        let answers = ApplicationAnswers {
            specific_cat: pet.name.clone(),
            ..ApplicationAnswers::default()
        };
        Self {
            pet,
            step: FormStep::Basics,
            answers,
            errors: BTreeMap::new(),
            today,
        }
    }

    pub fn pet(&self) -> &Pet {
        &self.pet
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    pub fn answers(&self) -> &ApplicationAnswers {
        &self.answers
    }

    pub fn value(&self, field: FormField) -> String {
        field.read(&self.answers)
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<FormField, String> {
        &self.errors
    }

    /// Updates one answer and clears any error already shown for it.
    ///
    /// The field is not re-validated; errors are recomputed on the next
    /// [`next`](Self::next) or [`submit`](Self::submit).
    pub fn set(&mut self, field: FormField, value: &str) -> DomainResult<()> {
        field.write(&mut self.answers, value)?;
        self.errors.remove(&field);
        Ok(())
    }

    /// The fields shown on `step`, including conditional follow-up questions
    /// whose condition currently holds.
    pub fn fields_for_step(&self, step: FormStep) -> Vec<FormField> {
        let a = &self.answers;
        let mut fields = Vec::new();
        match step {
            FormStep::Basics => {
                fields.extend([
                    FormField::FullName,
                    FormField::Address,
                    FormField::PhoneNumber,
                    FormField::EmailAddress,
                ]);
            }
            FormStep::Housing => {
                fields.push(FormField::HomeOwnership);
                if a.home_ownership == Some(HomeOwnership::Rent) {
                    fields.push(FormField::LeaseAllowsPets);
                }
                fields.extend([FormField::HouseholdMembers, FormField::Allergies]);
            }
            FormStep::PetHistory => {
                fields.push(FormField::HasPets);
                if a.has_pets == Some(YesNo::Yes) {
                    fields.extend([FormField::CurrentPets, FormField::PetsSpayedNeutered]);
                }
                fields.push(FormField::HadCatsBefore);
                if a.had_cats_before == Some(YesNo::Yes) {
                    fields.push(FormField::PreviousCats);
                }
            }
            FormStep::CareAndScheduling => {
                fields.extend([
                    FormField::AdoptionReason,
                    FormField::SpecificCat,
                    FormField::PrimaryCaretaker,
                    FormField::IndoorOutdoor,
                    FormField::HoursAlone,
                    FormField::WhenAway,
                    FormField::LongTermCommitment,
                    FormField::VeterinaryCare,
                    FormField::VetReference,
                    FormField::Date,
                    FormField::Time,
                ]);
            }
        }
        fields
    }

    pub fn current_fields(&self) -> Vec<FormField> {
        self.fields_for_step(self.step)
    }

    /// Validates the current step and moves forward if it passes.
    ///
    /// Returns `true` if the step changed. On failure the per-field errors
    /// are replaced by the ones found for this step. On the last step a
    /// passing validation leaves the form where it is.
    pub fn next(&mut self) -> bool {
        if !self.validate_current_step() {
            return false;
        }
        match self.step.next() {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }

    /// Goes back one step without validating or clearing anything.
    pub fn previous(&mut self) {
        if let Some(step) = self.step.previous() {
            self.step = step;
        }
    }

    /// Validates the last step and produces the appointment draft.
    ///
    /// Returns `Ok(None)` when validation fails; the errors are attached to
    /// the form and it stays on the last step.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotAtFinalStep`] when called before the last step.
    pub fn submit(&mut self) -> DomainResult<Option<AppointmentDraft>> {
        if !self.step.is_last() {
            return Err(DomainError::NotAtFinalStep);
        }
        if !self.validate_current_step() {
            return Ok(None);
        }

        let answers = &self.answers;
        Ok(Some(AppointmentDraft {
            pet_id: self.pet.id.clone(),
            pet_name: self.pet.name.clone(),
            customer_name: answers.full_name.clone(),
            customer_email: answers.email_address.clone(),
            customer_phone: answers.phone_number.clone(),
            date: answers.date.clone(),
            time: answers.time.clone(),
            status: AppointmentStatus::Scheduled,
            notes: format_notes(answers),
            form_data: Some(answers.clone()),
        }))
    }

    /// Abandons the application. Nothing is persisted.
    pub fn cancel(self) {}

    fn validate_current_step(&mut self) -> bool {
        self.errors = self.validate_step(self.step);
        self.errors.is_empty()
    }

    /// Collects the validation errors for `step` without touching the form.
    pub fn validate_step(&self, step: FormStep) -> BTreeMap<FormField, String> {
        let a = &self.answers;
        let mut errors = BTreeMap::new();
        let mut require_text = |field: FormField, value: &str, message: &str| {
            if value.trim().is_empty() {
                errors.insert(field, message.to_string());
            }
        };

        match step {
            FormStep::Basics => {
                require_text(FormField::FullName, &a.full_name, "Full name is required");
                require_text(FormField::Address, &a.address, "Address is required");
                require_text(FormField::PhoneNumber, &a.phone_number, "Phone number is required");
                require_text(FormField::EmailAddress, &a.email_address, "Email is required");
                if !a.email_address.trim().is_empty() && !is_valid_email(&a.email_address) {
                    errors.insert(FormField::EmailAddress, "Please enter a valid email address".to_string());
                }
            }
            FormStep::Housing => {
                require_text(
                    FormField::HouseholdMembers,
                    &a.household_members,
                    "Please describe household members",
                );
                if a.home_ownership.is_none() {
                    errors.insert(FormField::HomeOwnership, "Please select home ownership status".to_string());
                }
                if a.home_ownership == Some(HomeOwnership::Rent) && a.lease_allows_pets.is_none() {
                    errors.insert(
                        FormField::LeaseAllowsPets,
                        "Please specify if your lease allows pets".to_string(),
                    );
                }
                if a.allergies.is_none() {
                    errors.insert(FormField::Allergies, "Please specify if anyone has allergies".to_string());
                }
            }
            FormStep::PetHistory => {
                if a.has_pets == Some(YesNo::Yes) {
                    require_text(FormField::CurrentPets, &a.current_pets, "Please describe your current pets");
                }
                if a.had_cats_before == Some(YesNo::Yes) {
                    require_text(
                        FormField::PreviousCats,
                        &a.previous_cats,
                        "Please describe what happened to previous cats",
                    );
                }
                if a.has_pets.is_none() {
                    errors.insert(FormField::HasPets, "Please specify if you have current pets".to_string());
                }
                if a.has_pets == Some(YesNo::Yes) && a.pets_spayed_neutered.is_none() {
                    errors.insert(
                        FormField::PetsSpayedNeutered,
                        "Please specify if pets are spayed/neutered".to_string(),
                    );
                }
                if a.had_cats_before.is_none() {
                    errors.insert(
                        FormField::HadCatsBefore,
                        "Please specify if you've had cats before".to_string(),
                    );
                }
            }
            FormStep::CareAndScheduling => {
                require_text(
                    FormField::AdoptionReason,
                    &a.adoption_reason,
                    "Please explain why you want to adopt",
                );
                require_text(
                    FormField::PrimaryCaretaker,
                    &a.primary_caretaker,
                    "Please specify the primary caretaker",
                );
                require_text(FormField::HoursAlone, &a.hours_alone, "Please specify hours cat will be alone");
                require_text(
                    FormField::WhenAway,
                    &a.when_away,
                    "Please specify where cat will stay when away",
                );
                require_text(FormField::Date, &a.date, "Please select a date");
                require_text(FormField::Time, &a.time, "Please select a time");

                let unanswered = [
                    (a.indoor_outdoor.is_none(), FormField::IndoorOutdoor, "Please specify indoor/outdoor preference"),
                    (
                        a.long_term_commitment.is_none(),
                        FormField::LongTermCommitment,
                        "Please confirm long-term commitment",
                    ),
                    (
                        a.veterinary_care.is_none(),
                        FormField::VeterinaryCare,
                        "Please confirm veterinary care commitment",
                    ),
                    (
                        a.vet_reference.is_none(),
                        FormField::VetReference,
                        "Please specify if we can contact your vet",
                    ),
                ];
                for (missing, field, message) in unanswered {
                    if missing {
                        errors.insert(field, message.to_string());
                    }
                }

                if !a.date.trim().is_empty() {
                    let date = a.date.trim();
                    match NaiveDate::parse_from_str(date, "%Y-%m-%d")
                        .ok()
                        .filter(|d| d.format("%Y-%m-%d").to_string() == date)
                    {
                        Some(date) if date < self.today => {
                            errors.insert(FormField::Date, "Please choose today or a later date".to_string());
                        }
                        Some(_) => {}
                        None => {
                            errors.insert(FormField::Date, "Please enter the date as YYYY-MM-DD".to_string());
                        }
                    }
                }
                let time = a.time.trim();
                let time_ok = NaiveTime::parse_from_str(time, "%H:%M")
                    .is_ok_and(|t| t.format("%H:%M").to_string() == time);
                if !time.is_empty() && !time_ok {
                    errors.insert(FormField::Time, "Please enter the time as HH:MM".to_string());
                }
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed::seed_pets;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, 15).unwrap()
    }

    fn create_test_form() -> ApplicationForm {
        ApplicationForm::with_today(seed_pets().remove(2), today())
    }

    fn fill(form: &mut ApplicationForm, values: &[(FormField, &str)]) {
        for (field, value) in values {
            form.set(*field, value).unwrap();
        }
    }

    fn fill_basics(form: &mut ApplicationForm) {
        fill(
            form,
            &[
                (FormField::FullName, "Ada Lovelace"),
                (FormField::Address, "12 Analytical Way"),
                (FormField::PhoneNumber, "555-0100"),
                (FormField::EmailAddress, "ada@example.com"),
            ],
        );
    }

    fn fill_housing(form: &mut ApplicationForm) {
        fill(
            form,
            &[
                (FormField::HomeOwnership, "own"),
                (FormField::HouseholdMembers, "2 adults"),
                (FormField::Allergies, "no"),
            ],
        );
    }

    fn fill_pet_history(form: &mut ApplicationForm) {
        fill(form, &[(FormField::HasPets, "no"), (FormField::HadCatsBefore, "no")]);
    }

    fn fill_care(form: &mut ApplicationForm) {
        fill(
            form,
            &[
                (FormField::AdoptionReason, "Companionship"),
                (FormField::PrimaryCaretaker, "Ada"),
                (FormField::IndoorOutdoor, "indoor"),
                (FormField::HoursAlone, "6"),
                (FormField::WhenAway, "Neighbour visits"),
                (FormField::LongTermCommitment, "yes"),
                (FormField::VeterinaryCare, "yes"),
                (FormField::VetReference, "no"),
                (FormField::Date, "2030-06-20"),
                (FormField::Time, "14:30"),
            ],
        );
    }

    fn form_at_last_step() -> ApplicationForm {
        let mut form = create_test_form();
        fill_basics(&mut form);
        assert!(form.next());
        fill_housing(&mut form);
        assert!(form.next());
        fill_pet_history(&mut form);
        assert!(form.next());
        assert_eq!(form.step(), FormStep::CareAndScheduling);
        form
    }

    #[test]
    fn test_new_form_prefills_specific_cat() {
        let form = create_test_form();
        assert_eq!(form.step(), FormStep::Basics);
        assert_eq!(form.answers().specific_cat, "Luna");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_next_blocked_on_empty_basics() {
        let mut form = create_test_form();
        assert!(!form.next());
        assert_eq!(form.step(), FormStep::Basics);
        assert_eq!(form.errors().len(), 4);
        assert_eq!(form.error(FormField::EmailAddress), Some("Email is required"));
    }

    #[test]
    fn test_invalid_email_blocks_next() {
        let mut form = create_test_form();
        fill_basics(&mut form);
        form.set(FormField::EmailAddress, "not-an-email").unwrap();

        assert!(!form.next());
        assert_eq!(form.error(FormField::EmailAddress), Some("Please enter a valid email address"));
        assert_eq!(form.errors().len(), 1);
    }

    #[test]
    fn test_valid_basics_advance() {
        let mut form = create_test_form();
        fill_basics(&mut form);
        form.set(FormField::EmailAddress, "a@b.com").unwrap();

        assert!(form.next());
        assert_eq!(form.step(), FormStep::Housing);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_editing_clears_only_that_error() {
        let mut form = create_test_form();
        form.next();
        assert!(form.error(FormField::FullName).is_some());

        form.set(FormField::FullName, "   ").unwrap();
        assert!(form.error(FormField::FullName).is_none());
        assert!(form.error(FormField::Address).is_some());
    }

    #[test]
    fn test_rent_requires_lease_answer() {
        let mut form = create_test_form();
        fill_basics(&mut form);
        form.next();
        fill_housing(&mut form);
        form.set(FormField::HomeOwnership, "rent").unwrap();

        assert!(form.current_fields().contains(&FormField::LeaseAllowsPets));
        assert!(!form.next());
        assert_eq!(
            form.error(FormField::LeaseAllowsPets),
            Some("Please specify if your lease allows pets")
        );

        form.set(FormField::LeaseAllowsPets, "no").unwrap();
        assert!(form.next());
        assert_eq!(form.step(), FormStep::PetHistory);
    }

    #[test]
    fn test_pet_history_conditionals() {
        let mut form = create_test_form();
        fill_basics(&mut form);
        form.next();
        fill_housing(&mut form);
        form.next();

        fill(&mut form, &[(FormField::HasPets, "yes"), (FormField::HadCatsBefore, "yes")]);
        assert!(!form.next());
        assert!(form.error(FormField::CurrentPets).is_some());
        assert!(form.error(FormField::PetsSpayedNeutered).is_some());
        assert!(form.error(FormField::PreviousCats).is_some());
        assert!(form.error(FormField::HasPets).is_none());

        fill(
            &mut form,
            &[
                (FormField::CurrentPets, "1 dog"),
                (FormField::PetsSpayedNeutered, "yes"),
                (FormField::PreviousCats, "One lived to 18"),
            ],
        );
        assert!(form.next());
    }

    #[test]
    fn test_previous_keeps_answers() {
        let mut form = create_test_form();
        fill_basics(&mut form);
        form.next();
        form.previous();
        assert_eq!(form.step(), FormStep::Basics);
        assert_eq!(form.value(FormField::FullName), "Ada Lovelace");

        form.previous();
        assert_eq!(form.step(), FormStep::Basics);
    }

    #[test]
    fn test_submit_before_last_step_is_rejected() {
        let mut form = create_test_form();
        assert_eq!(form.submit(), Err(DomainError::NotAtFinalStep));
    }

    #[test]
    fn test_submit_with_missing_answers_stays() {
        let mut form = form_at_last_step();
        assert_eq!(form.submit(), Ok(None));
        assert_eq!(form.step(), FormStep::CareAndScheduling);
        assert_eq!(form.error(FormField::Date), Some("Please select a date"));
        assert!(form.error(FormField::SpecificCat).is_none());
    }

    #[test]
    fn test_past_date_is_rejected() {
        let mut form = form_at_last_step();
        fill_care(&mut form);
        form.set(FormField::Date, "2030-06-14").unwrap();
        assert_eq!(form.submit(), Ok(None));
        assert_eq!(form.error(FormField::Date), Some("Please choose today or a later date"));

        form.set(FormField::Date, "2030-06-15").unwrap();
        assert!(form.submit().unwrap().is_some());
    }

    #[test]
    fn test_malformed_date_and_time() {
        let mut form = form_at_last_step();
        fill_care(&mut form);
        form.set(FormField::Date, "15/06/2030").unwrap();
        form.set(FormField::Time, "half past two").unwrap();
        assert_eq!(form.submit(), Ok(None));
        assert_eq!(form.error(FormField::Date), Some("Please enter the date as YYYY-MM-DD"));
        assert_eq!(form.error(FormField::Time), Some("Please enter the time as HH:MM"));
    }

    #[test]
    fn test_date_and_time_need_zero_padding() {
        let mut form = form_at_last_step();
        fill_care(&mut form);
        for (date, time) in [("2030-7-5", "9:05"), ("+2030-07-05", "14:5")] {
            form.set(FormField::Date, date).unwrap();
            form.set(FormField::Time, time).unwrap();
            assert_eq!(form.submit(), Ok(None));
            assert_eq!(form.error(FormField::Date), Some("Please enter the date as YYYY-MM-DD"));
            assert_eq!(form.error(FormField::Time), Some("Please enter the time as HH:MM"));
        }

        form.set(FormField::Date, "2030-07-05").unwrap();
        form.set(FormField::Time, "09:05").unwrap();
        assert!(form.submit().unwrap().is_some());
    }

    #[test]
    fn test_submit_builds_draft() {
        let mut form = form_at_last_step();
        fill_care(&mut form);

        let draft = form.submit().unwrap().unwrap();
        assert_eq!(draft.pet_id, "3");
        assert_eq!(draft.pet_name, "Luna");
        assert_eq!(draft.customer_name, "Ada Lovelace");
        assert_eq!(draft.customer_email, "ada@example.com");
        assert_eq!(draft.customer_phone, "555-0100");
        assert_eq!(draft.date, "2030-06-20");
        assert_eq!(draft.time, "14:30");
        assert_eq!(draft.status, AppointmentStatus::Scheduled);
        assert_eq!(draft.form_data.as_ref(), Some(form.answers()));
        assert!(draft.notes.starts_with("Adoption Application Details:\nAddress: 12 Analytical Way\n"));
    }

    #[test]
    fn test_notes_format() {
        let mut answers = ApplicationAnswers {
            address: "1 Main St".to_string(),
            home_ownership: Some(HomeOwnership::Rent),
            lease_allows_pets: Some(YesNoNa::Yes),
            has_pets: Some(YesNo::No),
            current_pets: "ignored".to_string(),
            had_cats_before: Some(YesNo::Yes),
            previous_cats: "Two, both rehomed with family".to_string(),
            ..ApplicationAnswers::default()
        };
        let notes = format_notes(&answers);
        let lines: Vec<&str> = notes.lines().collect();
        assert_eq!(lines.len(), 16);
        assert_eq!(lines[2], "Home Ownership: rent, Lease allows pets: yes");
        assert_eq!(lines[5], "Current Pets: No");
        assert_eq!(lines[6], "Pets Spayed/Neutered: ");
        assert_eq!(lines[7], "Previous Cats: Two, both rehomed with family");

        answers.lease_allows_pets = None;
        assert!(format_notes(&answers).contains("Home Ownership: rent\n"));
    }

    #[test]
    fn test_invalid_choice_is_rejected() {
        let mut form = create_test_form();
        let err = form.set(FormField::HomeOwnership, "borrow").unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidChoice { field: "homeOwnership".to_string(), value: "borrow".to_string() }
        );
        assert_eq!(form.value(FormField::HomeOwnership), "");

        form.set(FormField::HomeOwnership, "rent").unwrap();
        form.set(FormField::HomeOwnership, "").unwrap();
        assert!(form.answers().home_ownership.is_none());
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(is_valid_email("x a@b.c"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a @b.com"));
        assert!(!is_valid_email("a@b com"));
    }

    #[test]
    fn test_step_navigation_helpers() {
        assert_eq!(FormStep::Basics.number(), 1);
        assert_eq!(FormStep::CareAndScheduling.number(), FormStep::COUNT);
        assert!(FormStep::CareAndScheduling.is_last());
        assert_eq!(FormStep::Basics.previous(), None);
        assert_eq!(FormStep::PetHistory.next(), Some(FormStep::CareAndScheduling));
    }

    #[test]
    fn test_field_kinds() {
        assert_eq!(FormField::LeaseAllowsPets.kind(), FieldKind::Choice(&["yes", "no", "na"]));
        assert_eq!(FormField::VetReference.kind(), FieldKind::Choice(&["yes", "no"]));
        assert_eq!(FormField::HoursAlone.kind(), FieldKind::Text);
    }
}
