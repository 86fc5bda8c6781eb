use std::fmt;

use serde::Serialize;

use crate::profile::types::Profile;

/// Completeness bucket for a fetched profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataQuality {
    High,
    Medium,
    Low,
}

impl fmt::Display for DataQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// How usable a profile is for personalization, scored over the five fields
/// outreach actually draws on. The suggestions are signals the model cannot
/// derive from the profile text alone, so they ride along in tool results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    pub completeness_score: u8,
    pub data_quality: DataQuality,
    pub missing_fields: Vec<&'static str>,
    pub suggestions: Vec<&'static str>,
}

impl QualityReport {
    pub fn analyze(profile: &Profile) -> Self {
        let mut missing_fields = Vec::new();
        let mut suggestions = Vec::new();
        if profile.first_name.is_none() {
            missing_fields.push("first_name");
            suggestions.push("name not found: verify the URL is correct");
        }
        if profile.experiences.is_empty() {
            missing_fields.push("experiences");
            suggestions.push("no work history: research may need another source");
        } else if profile.experiences.len() < 2 {
            suggestions.push("limited work history: consider supplementing from other sources");
        }
        if profile.headline.is_none() {
            missing_fields.push("headline");
            suggestions.push("no headline: the role may be unclear");
        }
        if profile.education.is_empty() {
            missing_fields.push("education");
        }
        if profile.location().is_none() {
            missing_fields.push("location");
        }

        let present = 5 - missing_fields.len();
        let completeness_score = (present * 100 / 5) as u8;
        let data_quality = if completeness_score >= 80 {
            DataQuality::High
        } else if completeness_score >= 50 {
            DataQuality::Medium
        } else {
            DataQuality::Low
        };
        if data_quality == DataQuality::Low {
            suggestions.push("profile data is incomplete: consider alternative research methods");
        }

        Self {
            completeness_score,
            data_quality,
            missing_fields,
            suggestions,
        }
    }
}
