//! Person record and form option sets
//!
//! Stored values are plain strings so unknown categories from older data
//! still round-trip. The enums here are the closed sets the form offers.

use serde::{Deserialize, Serialize};

/// One row of the CRUD dataset
///
/// Serialized with camelCase field names. Optional fields are empty strings
/// when absent, and missing fields decode as empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Person {
    /// Opaque unique id, assigned once on add
    pub id: String,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    /// `YYYY-MM-DD` or empty
    pub birthday: String,
    pub nationality: String,
    pub citizen_id: String,
    pub gender: String,
    pub phone: String,
    pub phone_code: String,
    pub passport_no: String,
    /// Decimal string, kept textual to avoid float formatting loss
    pub salary: String,
}

/// Person fields minus the id (input of an add)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonDraft {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub birthday: String,
    pub nationality: String,
    pub citizen_id: String,
    pub gender: String,
    pub phone: String,
    pub phone_code: String,
    pub passport_no: String,
    pub salary: String,
}

impl PersonDraft {
    /// Attach an id, producing a full record
    pub fn with_id(self, id: impl Into<String>) -> Person {
        Person {
            id: id.into(),
            title: self.title,
            first_name: self.first_name,
            last_name: self.last_name,
            birthday: self.birthday,
            nationality: self.nationality,
            citizen_id: self.citizen_id,
            gender: self.gender,
            phone: self.phone,
            phone_code: self.phone_code,
            passport_no: self.passport_no,
            salary: self.salary,
        }
    }
}

impl Person {
    /// Strip the id
    pub fn to_draft(&self) -> PersonDraft {
        PersonDraft {
            title: self.title.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            birthday: self.birthday.clone(),
            nationality: self.nationality.clone(),
            citizen_id: self.citizen_id.clone(),
            gender: self.gender.clone(),
            phone: self.phone.clone(),
            phone_code: self.phone_code.clone(),
            passport_no: self.passport_no.clone(),
            salary: self.salary.clone(),
        }
    }
}

/// Honorific offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Title {
    Mr,
    Mrs,
    Ms,
}

impl Title {
    pub const ALL: [Title; 3] = [Title::Mr, Title::Mrs, Title::Ms];

    pub fn as_str(&self) -> &'static str {
        match self {
            Title::Mr => "mr",
            Title::Mrs => "mrs",
            Title::Ms => "ms",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Title::Mr => "Mr.",
            Title::Mrs => "Mrs.",
            Title::Ms => "Ms.",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mr" => Some(Title::Mr),
            "mrs" => Some(Title::Mrs),
            "ms" => Some(Title::Ms),
            _ => None,
        }
    }
}

/// Gender offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Unspecified,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Unspecified];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unspecified => "unspecified",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Unspecified => "Unspecified",
        }
    }

    /// None for values outside the set
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "unspecified" => Some(Gender::Unspecified),
            _ => None,
        }
    }
}

/// Nationality offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nationality {
    Thai,
    French,
    American,
    Chinese,
    Japanese,
    Korean,
}

impl Nationality {
    pub const ALL: [Nationality; 6] = [
        Nationality::Thai,
        Nationality::French,
        Nationality::American,
        Nationality::Chinese,
        Nationality::Japanese,
        Nationality::Korean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Nationality::Thai => "thai",
            Nationality::French => "french",
            Nationality::American => "american",
            Nationality::Chinese => "chinese",
            Nationality::Japanese => "japanese",
            Nationality::Korean => "korean",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Nationality::Thai => "Thai",
            Nationality::French => "French",
            Nationality::American => "American",
            Nationality::Chinese => "Chinese",
            Nationality::Japanese => "Japanese",
            Nationality::Korean => "Korean",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|n| n.as_str().eq_ignore_ascii_case(s))
    }
}

/// Dialing codes offered next to the phone field
pub const PHONE_CODES: [&str; 7] = ["+66", "+1", "+44", "+81", "+86", "+82", "+33"];
