use serde::{Deserialize, Serialize};

/// Contact and identity block of a candidate profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfessionalInfo {
    pub job_title: String,
    pub expected_salary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

impl EducationEntry {
    /// Case-insensitive `(degree, institution)` identity used for deduplication.
    pub fn dedup_key(&self) -> (String, String) {
        (self.degree.to_lowercase(), self.institution.to_lowercase())
    }

    pub fn is_blank(&self) -> bool {
        self.degree.is_empty() && self.institution.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    pub duration: String,
    pub achievements: Vec<String>,
}

impl ExperienceEntry {
    /// Case-insensitive `(role, company)` identity used for deduplication.
    pub fn dedup_key(&self) -> (String, String) {
        (self.role.to_lowercase(), self.company.to_lowercase())
    }

    pub fn is_blank(&self) -> bool {
        self.role.is_empty() && self.company.is_empty()
    }
}

/// The reconciled, validated resume record returned to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateProfile {
    pub personal_info: PersonalInfo,
    pub professional_info: ProfessionalInfo,
    pub skills: Vec<String>,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<String>,
    pub certifications: Vec<String>,
}

/// All-optional extraction result produced by a single source.
///
/// Scalars are `None` when the source had nothing usable; collections are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialProfile {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub job_title: Option<String>,
    pub expected_salary: Option<String>,
    pub skills: Vec<String>,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<String>,
    pub certifications: Vec<String>,
}

impl PartialProfile {
    pub fn is_empty(&self) -> bool {
        *self == PartialProfile::default()
    }
}

impl From<PartialProfile> for CandidateProfile {
    fn from(partial: PartialProfile) -> Self {
        Self {
            personal_info: PersonalInfo {
                full_name: partial.full_name.unwrap_or_default(),
                email: partial.email.unwrap_or_default(),
                phone: partial.phone.unwrap_or_default(),
                location: partial.location.unwrap_or_default(),
            },
            professional_info: ProfessionalInfo {
                job_title: partial.job_title.unwrap_or_default(),
                expected_salary: partial.expected_salary.unwrap_or_default(),
            },
            skills: partial.skills,
            education: partial.education,
            experience: partial.experience,
            projects: partial.projects,
            certifications: partial.certifications,
        }
    }
}

/// Outcome of validating a reconciled profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub confidence: u8,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Request input for one reconciliation call. Only `raw_text` is required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceBundle {
    #[serde(default)]
    pub raw_text: String,
    #[serde(default)]
    pub structured_output: Option<serde_json::Value>,
    #[serde(default)]
    pub provider_output: Option<serde_json::Value>,
}

/// Generative-provider record: a candidate profile plus the provider's review extras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiResumeRecord {
    #[serde(flatten)]
    pub profile: CandidateProfile,
    pub recommended_job_titles: Vec<String>,
    pub ats_score: u8,
    pub improvement_tips: Vec<String>,
}

/// ATS score assumed when a provider omits or garbles it.
pub const DEFAULT_ATS_SCORE: u8 = 75;

impl Default for AiResumeRecord {
    fn default() -> Self {
        Self {
            profile: CandidateProfile::default(),
            recommended_job_titles: Vec::new(),
            ats_score: DEFAULT_ATS_SCORE,
            improvement_tips: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_serializes_camel_case() {
        let mut profile = CandidateProfile::default();
        profile.personal_info.full_name = "Jane Smith".to_string();
        profile.professional_info.job_title = "Engineer".to_string();

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["personalInfo"]["fullName"], "Jane Smith");
        assert_eq!(json["professionalInfo"]["jobTitle"], "Engineer");
        assert!(json["skills"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_ai_record_flattens_profile() {
        let record = AiResumeRecord {
            recommended_job_titles: vec!["Backend Engineer".to_string()],
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("personalInfo").is_some());
        assert_eq!(json["atsScore"], 75);
        assert_eq!(json["recommendedJobTitles"][0], "Backend Engineer");
    }

    #[test]
    fn test_source_bundle_optional_fields() {
        let bundle: SourceBundle =
            serde_json::from_str(r#"{"rawText": "Jane Smith"}"#).unwrap();
        assert_eq!(bundle.raw_text, "Jane Smith");
        assert!(bundle.structured_output.is_none());
        assert!(bundle.provider_output.is_none());
    }

    #[test]
    fn test_dedup_keys_ignore_case() {
        let a = ExperienceEntry {
            role: "Engineer".into(),
            company: "Acme".into(),
            ..Default::default()
        };
        let b = ExperienceEntry {
            role: "ENGINEER".into(),
            company: "acme".into(),
            duration: "2020 - 2021".into(),
            ..Default::default()
        };
        assert_eq!(a.dedup_key(), b.dedup_key());
    }
}
