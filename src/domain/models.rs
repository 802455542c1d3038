use serde::{Deserialize, Serialize};

/// Species of an adoptable pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetType {
    Dog,
    Cat,
    Bird,
    Rabbit,
    Other,
}

impl PetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetType::Dog => "dog",
            PetType::Cat => "cat",
            PetType::Bird => "bird",
            PetType::Rabbit => "rabbit",
            PetType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: PetType,
    pub breed: String,
    pub age: u32,
    pub description: String,
    pub image_url: String,
    pub available: bool,
}

/// Lifecycle state of an appointment. Any state may be set from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no-show",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeOwnership {
    Own,
    Rent,
}

impl HomeOwnership {
    pub const KEYS: &'static [&'static str] = &["own", "rent"];

    pub fn as_str(&self) -> &'static str {
        match self {
            HomeOwnership::Own => "own",
            HomeOwnership::Rent => "rent",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "own" => Some(HomeOwnership::Own),
            "rent" => Some(HomeOwnership::Rent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub const KEYS: &'static [&'static str] = &["yes", "no"];

    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::Yes => "yes",
            YesNo::No => "no",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "yes" => Some(YesNo::Yes),
            "no" => Some(YesNo::No),
            _ => None,
        }
    }
}

/// A yes/no answer that may also be "not applicable".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNoNa {
    Yes,
    No,
    Na,
}

impl YesNoNa {
    pub const KEYS: &'static [&'static str] = &["yes", "no", "na"];

    pub fn as_str(&self) -> &'static str {
        match self {
            YesNoNa::Yes => "yes",
            YesNoNa::No => "no",
            YesNoNa::Na => "na",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "yes" => Some(YesNoNa::Yes),
            "no" => Some(YesNoNa::No),
            "na" => Some(YesNoNa::Na),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndoorOutdoor {
    Indoor,
    Outdoor,
    Both,
}

impl IndoorOutdoor {
    pub const KEYS: &'static [&'static str] = &["indoor", "outdoor", "both"];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndoorOutdoor::Indoor => "indoor",
            IndoorOutdoor::Outdoor => "outdoor",
            IndoorOutdoor::Both => "both",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "indoor" => Some(IndoorOutdoor::Indoor),
            "outdoor" => Some(IndoorOutdoor::Outdoor),
            "both" => Some(IndoorOutdoor::Both),
            _ => None,
        }
    }
}

/// Every answer collected by the adoption application, one typed field per
/// question. Unanswered choices are `None`, unanswered text is empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationAnswers {
    pub full_name: String,
    pub address: String,
    pub phone_number: String,
    pub email_address: String,

    pub home_ownership: Option<HomeOwnership>,
    pub lease_allows_pets: Option<YesNoNa>,

    pub household_members: String,
    pub allergies: Option<YesNo>,

    pub has_pets: Option<YesNo>,
    pub current_pets: String,
    pub pets_spayed_neutered: Option<YesNoNa>,

    pub had_cats_before: Option<YesNo>,
    pub previous_cats: String,

    pub adoption_reason: String,
    pub specific_cat: String,
    pub primary_caretaker: String,

    pub indoor_outdoor: Option<IndoorOutdoor>,
    pub hours_alone: String,
    pub when_away: String,

    pub long_term_commitment: Option<YesNo>,
    pub veterinary_care: Option<YesNo>,
    pub vet_reference: Option<YesNo>,

    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub pet_id: String,
    pub pet_name: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_data: Option<ApplicationAnswers>,
}

/// An appointment that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentDraft {
    pub pet_id: String,
    pub pet_name: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub date: String,
    pub time: String,
    pub status: AppointmentStatus,
    pub notes: String,
    pub form_data: Option<ApplicationAnswers>,
}

impl AppointmentDraft {
    pub fn into_appointment(self, id: String) -> Appointment {
        Appointment {
            id,
            pet_id: self.pet_id,
            pet_name: self.pet_name,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            customer_phone: self.customer_phone,
            date: self.date,
            time: self.time,
            status: self.status,
            notes: self.notes,
            form_data: self.form_data,
        }
    }
}

/// Partial update for an appointment. Fields left as `None` are untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentPatch {
    pub pet_id: Option<String>,
    pub pet_name: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
    pub form_data: Option<Option<ApplicationAnswers>>,
}

impl AppointmentPatch {
    pub fn status(status: AppointmentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn apply_to(self, appointment: &mut Appointment) {
        if let Some(pet_id) = self.pet_id {
            appointment.pet_id = pet_id;
        }
        if let Some(pet_name) = self.pet_name {
            appointment.pet_name = pet_name;
        }
        if let Some(name) = self.customer_name {
            appointment.customer_name = name;
        }
        if let Some(email) = self.customer_email {
            appointment.customer_email = email;
        }
        if let Some(phone) = self.customer_phone {
            appointment.customer_phone = phone;
        }
        if let Some(date) = self.date {
            appointment.date = date;
        }
        if let Some(time) = self.time {
            appointment.time = time;
        }
        if let Some(status) = self.status {
            appointment.status = status;
        }
        if let Some(notes) = self.notes {
            appointment.notes = notes;
        }
        if let Some(form_data) = self.form_data {
            appointment.form_data = form_data;
        }
    }
}

/// Appointment totals shown above the appointment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub total: usize,
    pub scheduled: usize,
    pub completed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_appointment() -> Appointment {
        Appointment {
            id: "1700000000000".to_string(),
            pet_id: "3".to_string(),
            pet_name: "Luna".to_string(),
            customer_name: "Ada Lovelace".to_string(),
            customer_email: "ada@example.com".to_string(),
            customer_phone: "555-0100".to_string(),
            date: "2030-01-02".to_string(),
            time: "14:30".to_string(),
            status: AppointmentStatus::NoShow,
            notes: String::new(),
            form_data: None,
        }
    }

    #[test]
    fn test_appointment_serializes_camel_case() {
        let json = serde_json::to_value(sample_appointment()).unwrap();
        assert_eq!(json["petId"], "3");
        assert_eq!(json["customerEmail"], "ada@example.com");
        assert_eq!(json["status"], "no-show");
        assert!(json.get("formData").is_none());
    }

    #[test]
    fn test_pet_type_uses_type_key() {
        let pet = Pet {
            id: "9".to_string(),
            name: "Pip".to_string(),
            pet_type: PetType::Rabbit,
            breed: "Lop".to_string(),
            age: 1,
            description: String::new(),
            image_url: String::new(),
            available: true,
        };
        let json = serde_json::to_value(&pet).unwrap();
        assert_eq!(json["type"], "rabbit");
        assert_eq!(json["imageUrl"], "");
    }

    #[test]
    fn test_missing_status_defaults_to_scheduled() {
        let json = r#"{"id":"1","petId":"1","petName":"Mittens","customerName":"A",
            "customerEmail":"a@b.com","customerPhone":"1","date":"2030-01-01","time":"10:00"}"#;
        let appointment: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
        assert!(appointment.notes.is_empty());
    }

    #[test]
    fn test_patch_only_touches_present_fields() {
        let mut appointment = sample_appointment();
        let before = appointment.clone();

        AppointmentPatch {
            customer_phone: Some("555-0199".to_string()),
            ..AppointmentPatch::default()
        }
        .apply_to(&mut appointment);

        assert_eq!(appointment.customer_phone, "555-0199");
        assert_eq!(appointment.customer_name, before.customer_name);
        assert_eq!(appointment.status, before.status);
        assert_eq!(appointment.id, before.id);
    }

    #[test]
    fn test_choice_keys_round_trip() {
        for key in YesNoNa::KEYS {
            assert_eq!(YesNoNa::from_key(key).unwrap().as_str(), *key);
        }
        for key in IndoorOutdoor::KEYS {
            assert_eq!(IndoorOutdoor::from_key(key).unwrap().as_str(), *key);
        }
        assert!(HomeOwnership::from_key("lease").is_none());
        assert!(YesNo::from_key("").is_none());
    }
}
