use crate::models::profile::CandidateProfile;

/// Completeness weights for a provider record. Each personal and professional
/// field earns its per-field weight when non-empty; skills and experience earn
/// their weight when at least one item is present.
#[derive(Debug, Clone)]
pub struct ConfidenceWeights {
    pub personal_field: u32,
    pub professional_field: u32,
    pub skills: u32,
    pub experience: u32,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            personal_field: 10,
            professional_field: 10,
            skills: 20,
            experience: 20,
        }
    }
}

/// Confidence 0–100 with the default weights.
pub fn profile_confidence(profile: &CandidateProfile) -> u8 {
    profile_confidence_with(profile, &ConfidenceWeights::default())
}

pub fn profile_confidence_with(profile: &CandidateProfile, weights: &ConfidenceWeights) -> u8 {
    let personal = &profile.personal_info;
    let professional = &profile.professional_info;

    let personal_fields = [
        &personal.full_name,
        &personal.email,
        &personal.phone,
        &personal.location,
    ];
    let professional_fields = [&professional.job_title, &professional.expected_salary];

    let filled = |fields: &[&String]| fields.iter().filter(|f| !f.trim().is_empty()).count() as u32;

    let total = weights.personal_field * personal_fields.len() as u32
        + weights.professional_field * professional_fields.len() as u32
        + weights.skills
        + weights.experience;
    if total == 0 {
        return 0;
    }

    let mut earned = weights.personal_field * filled(&personal_fields[..])
        + weights.professional_field * filled(&professional_fields[..]);
    if !profile.skills.is_empty() {
        earned += weights.skills;
    }
    if !profile.experience.is_empty() {
        earned += weights.experience;
    }

    (f64::from(earned) / f64::from(total) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::ExperienceEntry;

    #[test]
    fn test_empty_profile_scores_zero() {
        assert_eq!(profile_confidence(&CandidateProfile::default()), 0);
    }

    #[test]
    fn test_partial_profile_weights() {
        let mut profile = CandidateProfile::default();
        profile.personal_info.full_name = "Jane".into();
        profile.personal_info.email = "jane@co.com".into();
        profile.skills = vec!["Rust".into()];
        assert_eq!(profile_confidence(&profile), 40);

        profile.experience = vec![ExperienceEntry {
            role: "Engineer".into(),
            ..Default::default()
        }];
        profile.professional_info.job_title = "Engineer".into();
        assert_eq!(profile_confidence(&profile), 70);
    }

    #[test]
    fn test_custom_weights_round() {
        let mut profile = CandidateProfile::default();
        profile.skills = vec!["Rust".into()];
        let weights = ConfidenceWeights {
            personal_field: 0,
            professional_field: 0,
            skills: 1,
            experience: 2,
        };
        assert_eq!(profile_confidence_with(&profile, &weights), 33);
    }
}
