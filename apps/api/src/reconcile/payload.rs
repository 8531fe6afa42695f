//! Loosely-shaped source payloads and their field-mapping tables.
//!
//! Upstream extractors and providers have used several key spellings over time.
//! Each source kind has one explicit table listing every spelling it is known to
//! emit; lookups walk the table in order and take the first usable value. Dotted
//! keys address nested objects. Keys not listed in a table are ignored.

use serde_json::{Map, Value};

use crate::llm_client::strip_json_fences;
use crate::models::profile::{EducationEntry, ExperienceEntry, PartialProfile};
use crate::reconcile::dedup::{dedup_education, dedup_experience};
use crate::reconcile::heuristics::clean_string;

type Keys = &'static [&'static str];

/// Key spellings for every profile field of one source kind.
#[derive(Debug)]
pub struct FieldMap {
    pub full_name: Keys,
    pub email: Keys,
    pub phone: Keys,
    pub location: Keys,
    pub job_title: Keys,
    pub expected_salary: Keys,
    pub skills: Keys,
    pub projects: Keys,
    pub certifications: Keys,
    pub education: Keys,
    pub degree: Keys,
    pub institution: Keys,
    pub year: Keys,
    pub experience: Keys,
    pub role: Keys,
    pub company: Keys,
    pub duration: Keys,
    pub start: Keys,
    pub end: Keys,
    pub achievements: Keys,
}

/// Structured resume-parser output (flat, snake_case, parser-specific names).
pub static STRUCTURED_FIELDS: FieldMap = FieldMap {
    full_name: &["name", "full_name", "fullName"],
    email: &["email"],
    phone: &["phone", "mobile", "mobile_number"],
    location: &["address", "location"],
    job_title: &["designation", "job_title", "title"],
    expected_salary: &["expected_salary", "salary"],
    skills: &["skills"],
    projects: &["projects"],
    certifications: &["certifications"],
    education: &["education"],
    degree: &["degree", "title"],
    institution: &["institution", "school", "college", "college_name"],
    year: &["year", "end_year", "graduation_year"],
    experience: &["experience"],
    role: &["job_title", "title", "position", "designation"],
    company: &["company", "organization", "company_name"],
    duration: &["duration"],
    start: &["start_date", "start"],
    end: &["end_date", "end", "current"],
    achievements: &["description", "responsibilities", "achievements"],
};

/// Generative-provider output: the nested prompt contract, this service's own
/// `CandidateProfile` wire shape, and the flat legacy shape.
pub static PROVIDER_FIELDS: FieldMap = FieldMap {
    full_name: &[
        "personalInformation.fullName",
        "personalInfo.fullName",
        "name",
        "fullName",
    ],
    email: &["personalInformation.email", "personalInfo.email", "email"],
    phone: &["personalInformation.phone", "personalInfo.phone", "phone"],
    location: &[
        "personalInformation.location",
        "personalInfo.location",
        "location",
        "address",
    ],
    job_title: &[
        "professionalInformation.jobTitle",
        "professionalInfo.jobTitle",
        "jobTitle",
    ],
    expected_salary: &[
        "professionalInformation.expectedSalary",
        "professionalInfo.expectedSalary",
        "expectedSalary",
    ],
    skills: &["skills"],
    projects: &["projects"],
    certifications: &["certifications"],
    education: &["education"],
    degree: &["degree"],
    institution: &["institution", "institute"],
    year: &["year", "end_year", "endYear"],
    experience: &["experience"],
    role: &["role", "position", "title", "job_title"],
    company: &["company"],
    duration: &["duration"],
    start: &["start_date"],
    end: &["end_date"],
    achievements: &["achievements", "description"],
};

/// One source payload, tagged by where it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum RawSourcePayload {
    Absent,
    Structured(Map<String, Value>),
    Provider(Map<String, Value>),
}

impl RawSourcePayload {
    /// Structured output must be a JSON object; anything else is treated as absent.
    pub fn structured(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Object(map)) => Self::Structured(map.clone()),
            _ => Self::Absent,
        }
    }

    /// Provider output may be an object or the provider's raw JSON text.
    pub fn provider(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Object(map)) => Self::Provider(map.clone()),
            Some(Value::String(text)) => match parse_object(text) {
                Some(map) => Self::Provider(map),
                None => Self::Absent,
            },
            _ => Self::Absent,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Maps the payload through its source's field table.
    pub fn to_partial(&self) -> PartialProfile {
        match self {
            Self::Absent => PartialProfile::default(),
            Self::Structured(map) => map_fields(map, &STRUCTURED_FIELDS),
            Self::Provider(map) => map_fields(map, &PROVIDER_FIELDS),
        }
    }
}

/// Parses text (optionally fenced) into a JSON object.
pub fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(strip_json_fences(text)) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn map_fields(map: &Map<String, Value>, fields: &FieldMap) -> PartialProfile {
    PartialProfile {
        full_name: scalar(map, fields.full_name),
        email: scalar(map, fields.email),
        phone: scalar(map, fields.phone),
        location: scalar(map, fields.location),
        job_title: scalar(map, fields.job_title),
        expected_salary: scalar(map, fields.expected_salary),
        skills: list(map, fields.skills, true),
        projects: list(map, fields.projects, false),
        certifications: list(map, fields.certifications, false),
        education: dedup_education(
            entries(map, fields.education)
                .map(|item| education_entry(item, fields))
                .collect::<Vec<_>>(),
        ),
        experience: dedup_experience(
            entries(map, fields.experience)
                .map(|item| experience_entry(item, fields))
                .collect::<Vec<_>>(),
        ),
    }
}

fn lookup<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    let mut parts = key.split('.');
    let first = map.get(parts.next()?)?;
    parts.try_fold(first, |value, part| value.get(part))
}

/// Scalars accept strings and numbers (phone numbers often arrive as numbers).
fn as_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => clean_string(s),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn scalar(map: &Map<String, Value>, keys: Keys) -> Option<String> {
    keys.iter()
        .filter_map(|key| lookup(map, key))
        .find_map(as_text)
}

fn field_text(item: &Map<String, Value>, keys: Keys) -> String {
    scalar(item, keys).unwrap_or_default()
}

/// String lists: arrays keep only non-empty strings; a bare string becomes one item,
/// or is split on commas and semicolons when `split_bare` is set.
fn list(map: &Map<String, Value>, keys: Keys, split_bare: bool) -> Vec<String> {
    let Some(value) = keys.iter().find_map(|key| lookup(map, key)) else {
        return Vec::new();
    };
    string_items(value, split_bare)
}

fn string_items(value: &Value, split_bare: bool) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(clean_string)
            .filter(|s| !s.is_empty())
            .collect(),
        Value::String(s) if split_bare => s
            .split([',', ';'])
            .map(clean_string)
            .filter(|s| !s.is_empty())
            .collect(),
        Value::String(s) => Some(clean_string(s))
            .filter(|s| !s.is_empty())
            .into_iter()
            .collect(),
        _ => Vec::new(),
    }
}

/// Entry arrays; non-array values yield nothing.
fn entries<'a>(map: &'a Map<String, Value>, keys: Keys) -> impl Iterator<Item = &'a Value> {
    keys.iter()
        .find_map(|key| lookup(map, key))
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn education_entry(item: &Value, fields: &FieldMap) -> EducationEntry {
    match item {
        Value::Object(obj) => EducationEntry {
            degree: field_text(obj, fields.degree),
            institution: field_text(obj, fields.institution),
            year: field_text(obj, fields.year),
        },
        Value::String(s) => EducationEntry {
            degree: clean_string(s),
            ..Default::default()
        },
        _ => EducationEntry::default(),
    }
}

fn experience_entry(item: &Value, fields: &FieldMap) -> ExperienceEntry {
    match item {
        Value::Object(obj) => {
            let duration = scalar(obj, fields.duration).unwrap_or_else(|| {
                match (scalar(obj, fields.start), scalar(obj, fields.end)) {
                    (Some(start), Some(end)) => format!("{start} - {end}"),
                    (Some(only), None) | (None, Some(only)) => only,
                    (None, None) => String::new(),
                }
            });
            let achievements = fields
                .achievements
                .iter()
                .find_map(|key| obj.get(*key))
                .map(|value| string_items(value, false))
                .unwrap_or_default();
            ExperienceEntry {
                role: field_text(obj, fields.role),
                company: field_text(obj, fields.company),
                duration,
                achievements,
            }
        }
        Value::String(s) => ExperienceEntry {
            role: clean_string(s),
            ..Default::default()
        },
        _ => ExperienceEntry::default(),
    }
}
