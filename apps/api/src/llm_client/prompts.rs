// Shared prompt constants for the generative resume parse.
// Every provider receives the same system prompt and the same schema contract.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are an expert resume parser. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Resume parse contract. `{raw_text}` is replaced with the resume text.
pub const RESUME_PARSE_PROMPT: &str = r#"Extract ALL information from this resume. Do NOT skip any section.

Return ONLY valid JSON in this EXACT nested format:

{
  "personalInformation": {
    "fullName": "Full name from the top of the resume",
    "email": "Email address",
    "phone": "Phone number with country code if present",
    "location": "City, State, Country"
  },
  "professionalInformation": {
    "jobTitle": "Current or most recent job title",
    "expectedSalary": "Salary if mentioned, else empty string"
  },
  "skills": ["Every skill, technology, tool and framework mentioned"],
  "experience": [
    {
      "role": "Job title",
      "company": "Company name",
      "duration": "MMM YYYY - MMM YYYY or Present",
      "achievements": ["Each responsibility or achievement as a separate item"]
    }
  ],
  "education": [
    {
      "degree": "Degree type and field",
      "institution": "University or college name",
      "year": "Graduation year (YYYY)"
    }
  ],
  "projects": ["Project names with a short description"],
  "certifications": ["Every certification mentioned"],
  "recommendedJobTitles": ["Job titles that fit this experience"],
  "atsScore": 85,
  "improvementTips": ["Concrete improvement suggestions"]
}

Use empty strings or empty arrays for anything the resume does not contain. Do NOT invent values.

Resume text to parse:
{raw_text}"#;

pub fn resume_parse_prompt(raw_text: &str) -> String {
    RESUME_PARSE_PROMPT.replace("{raw_text}", raw_text)
}
