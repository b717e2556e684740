//! # Resume Model
//!
//! The normalized input for the rendering engine. An upstream normalizer
//! (not part of this crate) reconciles legacy field-name variants into
//! this canonical shape; the engine itself never special-cases legacy
//! names. Every section field is optional or defaults to empty, and the
//! adapters treat absence as "render nothing" — never as an error.

use serde::{Deserialize, Serialize};

/// A complete normalized resume ready for rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    /// Who the resume is about. Rendered as the full-width header band.
    #[serde(default)]
    pub identity: Identity,

    /// Objective / professional summary paragraph.
    #[serde(default)]
    pub summary: Option<String>,

    /// Explicit skill list. First choice when present and non-empty.
    #[serde(default)]
    pub skills: Vec<String>,

    /// Comma- or pipe-delimited skills string. Used when `skills` is empty.
    #[serde(default)]
    pub skills_text: Option<String>,

    /// Secondary free-text skills field. Last resort after `skills_text`.
    #[serde(default)]
    pub expertise: Option<String>,

    #[serde(default)]
    pub education: Vec<EducationEntry>,

    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,

    #[serde(default)]
    pub projects: Vec<ProjectEntry>,

    #[serde(default)]
    pub certifications: Vec<CertificationEntry>,

    /// Activities / interests. Loosely shaped: either field may be absent.
    #[serde(default)]
    pub activities: Vec<ActivityEntry>,

    /// Languages as either one string ("English, Hindi") or a list.
    #[serde(default)]
    pub languages: Option<Languages>,

    /// Document metadata embedded in the output (PDF Info dictionary).
    #[serde(default)]
    pub metadata: Metadata,
}

/// Identity block: name, title, ordered contact fields, optional photo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(default)]
    pub name: String,
    /// Professional title shown under the name.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    /// Photo as a data URI, raw base64, or file path.
    #[serde(default)]
    pub photo: Option<String>,
}

impl Identity {
    /// The contact fields that are present, in display order.
    ///
    /// Absence of a field suppresses only that line, never the block.
    pub fn contact_lines(&self) -> Vec<&str> {
        [
            self.email.as_deref(),
            self.phone.as_deref(),
            self.location.as_deref(),
            self.website.as_deref(),
            self.linkedin.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    /// Grade, GPA, or percentage — whatever the source system tracked.
    #[serde(default)]
    pub score: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    /// Free text; newline-separated lines become bullets.
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Languages arrive from the source system as either a plain string or a
/// list of strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Languages {
    List(Vec<String>),
    Text(String),
}

impl Languages {
    /// Flatten to a display list; a plain string splits on commas/pipes.
    pub fn items(&self) -> Vec<String> {
        match self {
            Languages::List(list) => list
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Languages::Text(text) => crate::text::split_delimited(text),
        }
    }
}

/// Document metadata embedded in the output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl Resume {
    /// Resolve the skill list with the fixed source precedence:
    /// explicit array, then delimited `skillsText`, then `expertise`.
    /// The first non-empty source wins; later sources are ignored.
    pub fn resolved_skills(&self) -> Vec<String> {
        let explicit: Vec<String> = self
            .skills
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if !explicit.is_empty() {
            return explicit;
        }

        if let Some(text) = self.skills_text.as_deref() {
            let items = crate::text::split_delimited(text);
            if !items.is_empty() {
                return items;
            }
        }

        if let Some(text) = self.expertise.as_deref() {
            return crate::text::split_delimited(text);
        }

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal() {
        let resume: Resume = serde_json::from_str(r#"{"identity":{"name":"Ada"}}"#).unwrap();
        assert_eq!(resume.identity.name, "Ada");
        assert!(resume.summary.is_none());
        assert!(resume.experience.is_empty());
    }

    #[test]
    fn test_contact_lines_skip_absent() {
        let identity = Identity {
            name: "Ada".into(),
            email: Some("ada@example.com".into()),
            phone: None,
            location: Some("London".into()),
            ..Default::default()
        };
        assert_eq!(identity.contact_lines(), vec!["ada@example.com", "London"]);
    }

    #[test]
    fn test_skills_precedence_array_wins() {
        let resume = Resume {
            skills: vec!["Rust".into(), "SQL".into()],
            skills_text: Some("Ignored, Also ignored".into()),
            expertise: Some("Ignored too".into()),
            ..Default::default()
        };
        assert_eq!(resume.resolved_skills(), vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_skills_precedence_falls_through_empty_sources() {
        let resume = Resume {
            skills: vec!["  ".into()],
            skills_text: Some(" , ".into()),
            expertise: Some("Writing | Editing".into()),
            ..Default::default()
        };
        assert_eq!(resume.resolved_skills(), vec!["Writing", "Editing"]);
    }

    #[test]
    fn test_languages_string_or_list() {
        let from_text: Resume =
            serde_json::from_str(r#"{"languages":"English, Hindi"}"#).unwrap();
        let from_list: Resume =
            serde_json::from_str(r#"{"languages":["English","Hindi"]}"#).unwrap();
        assert_eq!(from_text.languages.unwrap().items(), vec!["English", "Hindi"]);
        assert_eq!(from_list.languages.unwrap().items(), vec!["English", "Hindi"]);
    }
}
