//! Person edit form state
//!
//! Holds raw field text as typed. Validation turns it into a
//! [`PersonDraft`]; the store never sees a record with missing required fields.

use chrono::NaiveDate;
use thiserror::Error;

use crate::consts::DEFAULT_PHONE_CODE;
use crate::person::{Gender, Nationality, PHONE_CODES, Person, PersonDraft, Title};

/// Form fields, used to report what is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    FirstName,
    LastName,
    Birthday,
    Nationality,
    CitizenId,
    Gender,
    PhoneCode,
    Phone,
    PassportNo,
    Salary,
}

impl FormField {
    /// Fields the form refuses to submit empty
    pub const REQUIRED: [FormField; 5] = [
        FormField::Title,
        FormField::FirstName,
        FormField::LastName,
        FormField::Nationality,
        FormField::Gender,
    ];

    /// Element id / stored field name
    pub fn name(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::FirstName => "firstName",
            FormField::LastName => "lastName",
            FormField::Birthday => "birthday",
            FormField::Nationality => "nationality",
            FormField::CitizenId => "citizenId",
            FormField::Gender => "gender",
            FormField::PhoneCode => "phoneCode",
            FormField::Phone => "phone",
            FormField::PassportNo => "passportNo",
            FormField::Salary => "salary",
        }
    }

    /// `(value, label)` choices of a select field, placeholder first.
    /// None for free-text fields.
    pub fn options(&self) -> Option<Vec<(&'static str, &'static str)>> {
        let with_placeholder = |label, choices: Vec<(&'static str, &'static str)>| {
            let mut options = vec![("", label)];
            options.extend(choices);
            options
        };
        match self {
            FormField::Title => Some(with_placeholder(
                "Title",
                Title::ALL.iter().map(|t| (t.as_str(), t.label())).collect(),
            )),
            FormField::Nationality => Some(with_placeholder(
                "Nationality",
                Nationality::ALL.iter().map(|n| (n.as_str(), n.label())).collect(),
            )),
            FormField::Gender => Some(with_placeholder(
                "Gender",
                Gender::ALL.iter().map(|g| (g.as_str(), g.label())).collect(),
            )),
            // Always has a value, so no placeholder
            FormField::PhoneCode => Some(PHONE_CODES.iter().map(|c| (*c, *c)).collect()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("required fields missing: {}", field_list(.0))]
    MissingFields(Vec<FormField>),
    #[error("birthday {0:?} is not a YYYY-MM-DD date")]
    InvalidBirthday(String),
    #[error("salary {0:?} is not a non-negative number")]
    InvalidSalary(String),
}

fn field_list(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Raw form values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonForm {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub birthday: String,
    pub nationality: String,
    pub citizen_id: String,
    pub gender: String,
    pub phone_code: String,
    pub phone: String,
    pub passport_no: String,
    pub salary: String,
}

impl Default for PersonForm {
    fn default() -> Self {
        Self::with_phone_code(DEFAULT_PHONE_CODE)
    }
}

impl PersonForm {
    /// Empty form with a preselected dialing code
    pub fn with_phone_code(phone_code: &str) -> Self {
        Self {
            title: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            birthday: String::new(),
            nationality: String::new(),
            citizen_id: String::new(),
            gender: String::new(),
            phone_code: phone_code.to_string(),
            phone: String::new(),
            passport_no: String::new(),
            salary: String::new(),
        }
    }

    /// Fill from a stored record (salary shown with separators)
    pub fn from_person(person: &Person) -> Self {
        Self {
            title: person.title.clone(),
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            birthday: person.birthday.clone(),
            nationality: person.nationality.clone(),
            citizen_id: person.citizen_id.clone(),
            gender: person.gender.clone(),
            phone_code: person.phone_code.clone(),
            phone: person.phone.clone(),
            passport_no: person.passport_no.clone(),
            salary: format_salary(&person.salary),
        }
    }

    /// Back to defaults, keeping the current default dialing code
    pub fn reset(&mut self, phone_code: &str) {
        *self = Self::with_phone_code(phone_code);
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Birthday => &self.birthday,
            FormField::Nationality => &self.nationality,
            FormField::CitizenId => &self.citizen_id,
            FormField::Gender => &self.gender,
            FormField::PhoneCode => &self.phone_code,
            FormField::Phone => &self.phone,
            FormField::PassportNo => &self.passport_no,
            FormField::Salary => &self.salary,
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Title => &mut self.title,
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Birthday => &mut self.birthday,
            FormField::Nationality => &mut self.nationality,
            FormField::CitizenId => &mut self.citizen_id,
            FormField::Gender => &mut self.gender,
            FormField::PhoneCode => &mut self.phone_code,
            FormField::Phone => &mut self.phone,
            FormField::PassportNo => &mut self.passport_no,
            FormField::Salary => &mut self.salary,
        };
        *slot = value.into();
    }

    /// Check required fields and formats, producing the record to store
    pub fn validate(&self) -> Result<PersonDraft, FormError> {
        let missing: Vec<FormField> = FormField::REQUIRED
            .into_iter()
            .filter(|f| self.field(*f).trim().is_empty())
            .collect();
        if !missing.is_empty() {
            return Err(FormError::MissingFields(missing));
        }

        let birthday = self.birthday.trim();
        if !birthday.is_empty() && !is_iso_date(birthday) {
            return Err(FormError::InvalidBirthday(birthday.to_string()));
        }

        let salary = parse_salary(&self.salary)?;

        Ok(PersonDraft {
            title: self.title.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            birthday: birthday.to_string(),
            nationality: self.nationality.trim().to_string(),
            citizen_id: self.citizen_id.trim().to_string(),
            gender: self.gender.trim().to_string(),
            phone_code: self.phone_code.trim().to_string(),
            phone: self.phone.trim().to_string(),
            passport_no: self.passport_no.trim().to_string(),
            salary,
        })
    }
}

/// Four-digit year only; chrono's `%Y` also takes signed years
fn is_iso_date(s: &str) -> bool {
    s.len() == 10
        && s.as_bytes()[..4].iter().all(u8::is_ascii_digit)
        && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// Strip thousands separators and check the result is a plain decimal
fn parse_salary(raw: &str) -> Result<String, FormError> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Ok(cleaned);
    }
    let (int_part, frac_part) = match cleaned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (cleaned.as_str(), None),
    };
    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    let valid = digits(int_part) && frac_part.is_none_or(digits);
    if valid {
        Ok(cleaned)
    } else {
        Err(FormError::InvalidSalary(raw.trim().to_string()))
    }
}

/// Insert `,` every three integer digits: `1234567.5` -> `1,234,567.5`
pub fn format_salary(salary: &str) -> String {
    let (int_part, rest) = match salary.find('.') {
        Some(i) => salary.split_at(i),
        None => (salary, ""),
    };
    if !int_part.chars().all(|c| c.is_ascii_digit()) {
        return salary.to_string();
    }

    let mut out = String::with_capacity(salary.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> PersonForm {
        let mut form = PersonForm::default();
        form.title = "mr".into();
        form.first_name = " Ann ".into();
        form.last_name = "Lee".into();
        form.nationality = "thai".into();
        form.gender = "female".into();
        form
    }

    #[test]
    fn test_default_form_preselects_phone_code() {
        let form = PersonForm::default();
        assert_eq!(form.phone_code, "+66");
        assert!(form.title.is_empty());
    }

    #[test]
    fn test_select_options_come_from_option_sets() {
        assert_eq!(
            FormField::Title.options().unwrap(),
            vec![("", "Title"), ("mr", "Mr."), ("mrs", "Mrs."), ("ms", "Ms.")]
        );

        let genders = FormField::Gender.options().unwrap();
        assert_eq!(genders[0], ("", "Gender"));
        assert!(genders[1..].iter().all(|(v, _)| Gender::from_str(v).is_some()));

        let nationalities = FormField::Nationality.options().unwrap();
        assert_eq!(nationalities.len(), Nationality::ALL.len() + 1);

        let codes: Vec<_> = FormField::PhoneCode.options().unwrap().into_iter().map(|(v, _)| v).collect();
        assert_eq!(codes, PHONE_CODES);
        assert_eq!(codes[0], DEFAULT_PHONE_CODE);

        assert!(FormField::FirstName.options().is_none());
        assert!(FormField::Birthday.options().is_none());
    }

    #[test]
    fn test_missing_required_fields_are_all_reported() {
        let form = PersonForm::default();
        assert_eq!(
            form.validate(),
            Err(FormError::MissingFields(FormField::REQUIRED.to_vec()))
        );

        let mut form = filled();
        form.last_name = "   ".into();
        form.gender.clear();
        let err = form.validate().unwrap_err();
        assert_eq!(
            err,
            FormError::MissingFields(vec![FormField::LastName, FormField::Gender])
        );
        assert_eq!(err.to_string(), "required fields missing: lastName, gender");
    }

    #[test]
    fn test_valid_form_produces_trimmed_draft() {
        let mut form = filled();
        form.birthday = "1990-02-28".into();
        form.salary = "25,000.50".into();
        form.phone = "0812345678".into();

        let draft = form.validate().unwrap();
        assert_eq!(draft.first_name, "Ann");
        assert_eq!(draft.birthday, "1990-02-28");
        assert_eq!(draft.salary, "25000.50");
        assert_eq!(draft.phone_code, "+66");
        assert_eq!(draft.passport_no, "");
    }

    #[test]
    fn test_birthday_must_be_calendar_date() {
        for bad in [
            "1990-02-30",
            "1990-2-3",
            "yesterday",
            "02/28/1990",
            "-001-01-01",
            "+990-01-01",
        ] {
            let mut form = filled();
            form.birthday = bad.into();
            assert_eq!(
                form.validate(),
                Err(FormError::InvalidBirthday(bad.to_string())),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_salary_must_be_decimal() {
        for bad in ["-5", "12a", "1.2.3", ".5", "5."] {
            let mut form = filled();
            form.salary = bad.into();
            assert!(matches!(form.validate(), Err(FormError::InvalidSalary(_))), "{bad}");
        }
    }

    #[test]
    fn test_format_salary() {
        assert_eq!(format_salary(""), "");
        assert_eq!(format_salary("999"), "999");
        assert_eq!(format_salary("1000"), "1,000");
        assert_eq!(format_salary("1234567.25"), "1,234,567.25");
        assert_eq!(format_salary("n/a"), "n/a");
    }

    #[test]
    fn test_from_person_and_back() {
        let person = PersonDraft {
            title: "ms".into(),
            first_name: "Bo".into(),
            last_name: "Kim".into(),
            nationality: "korean".into(),
            gender: "female".into(),
            phone_code: "+82".into(),
            salary: "1500000".into(),
            ..Default::default()
        }
        .with_id("9");

        let form = PersonForm::from_person(&person);
        assert_eq!(form.salary, "1,500,000");
        assert_eq!(form.validate().unwrap(), person.to_draft());
    }

    #[test]
    fn test_reset_clears_fields() {
        let mut form = filled();
        form.set_field(FormField::PassportNo, "AA123");
        assert_eq!(form.field(FormField::PassportNo), "AA123");
        form.reset("+1");
        assert_eq!(form, PersonForm::with_phone_code("+1"));
    }
}
