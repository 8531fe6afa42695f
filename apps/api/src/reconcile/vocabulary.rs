//! Fixed vocabularies used by the text heuristics.
//!
//! The lists are data, not code: the service loads them once at startup (built-in
//! defaults or a JSON file) and hands an immutable `Arc<Vocabulary>` to every extractor.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_SKILLS: &[&str] = &[
    "JavaScript",
    "Python",
    "Java",
    "React",
    "Node.js",
    "Angular",
    "Vue.js",
    "HTML",
    "CSS",
    "SQL",
    "MongoDB",
    "PostgreSQL",
    "AWS",
    "Docker",
    "Git",
    "Linux",
    "Agile",
    "Scrum",
    "Machine Learning",
    "Data Analysis",
    "TypeScript",
    "Express",
    "Next.js",
    "GraphQL",
    "Redis",
    "Kubernetes",
];

const DEFAULT_JOB_TITLES: &[&str] = &[
    "Software Engineer",
    "Developer",
    "Programmer",
    "Analyst",
    "Manager",
    "Designer",
    "Consultant",
    "Specialist",
    "Full Stack",
    "Frontend",
    "Backend",
    "DevOps",
    "Data Scientist",
];

const DEFAULT_FALLBACK_TITLE: &str = "Software Developer";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vocabulary {
    pub skills: Vec<String>,
    pub job_titles: Vec<String>,
    /// Title reported by the fallback extractor when no vocabulary title is found.
    pub default_job_title: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(
            DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_JOB_TITLES.iter().map(|s| s.to_string()).collect(),
            DEFAULT_FALLBACK_TITLE.to_string(),
        )
    }
}

impl Vocabulary {
    pub fn new(skills: Vec<String>, job_titles: Vec<String>, default_job_title: String) -> Self {
        Self {
            skills,
            job_titles,
            default_job_title,
        }
    }

    /// Loads a vocabulary from a JSON file shaped like
    /// `{"skills": [...], "jobTitles": [...], "defaultJobTitle": "..."}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vocabulary file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Vocabulary file {} is not valid JSON", path.display()))
    }

    /// Vocabulary skills occurring in `text`, case-insensitive substring match,
    /// in vocabulary order.
    pub fn skills_in(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.skills
            .iter()
            .filter(|skill| !skill.is_empty() && lower.contains(&skill.to_lowercase()))
            .cloned()
            .collect()
    }

    /// First vocabulary job title occurring in `text`.
    pub fn first_title_in(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        self.job_titles
            .iter()
            .find(|title| !title.is_empty() && lower.contains(&title.to_lowercase()))
            .map(String::as_str)
    }
}
