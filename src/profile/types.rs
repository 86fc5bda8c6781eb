use serde::Deserialize;

/// A person's enriched profile. The enrichment API returns many more fields
/// than this; unknown ones are ignored and every field here may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub headline: Option<String>,
    pub occupation: Option<String>,
    pub industry: Option<String>,
    pub city: Option<String>,
    pub country_full_name: Option<String>,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub company: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Education {
    pub school: Option<String>,
    pub degree_name: Option<String>,
    pub field_of_study: Option<String>,
}

impl Profile {
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.full_name {
            return name.clone();
        }
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => "Unknown".to_string(),
        }
    }

    /// Experiences come back newest first; the head is the current position.
    pub fn current_experience(&self) -> Option<&Experience> {
        self.experiences.first()
    }

    pub fn current_company(&self) -> Option<&str> {
        self.current_experience().and_then(|e| e.company.as_deref())
    }

    pub fn current_title(&self) -> Option<&str> {
        self.current_experience().and_then(|e| e.title.as_deref())
    }

    pub fn location(&self) -> Option<String> {
        match (&self.city, &self.country_full_name) {
            (Some(city), Some(country)) => Some(format!("{city}, {country}")),
            (Some(city), None) => Some(city.clone()),
            (None, Some(country)) => Some(country.clone()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_enrichment_payload_ignoring_extras() {
        let raw = json!({
            "public_identifier": "jenhsunhuang",
            "first_name": "Jensen",
            "last_name": "Huang",
            "full_name": "Jensen Huang",
            "headline": "Founder and CEO at NVIDIA",
            "occupation": "Founder and CEO at NVIDIA",
            "industry": "Computer Hardware",
            "city": "Santa Clara",
            "country_full_name": "United States",
            "experiences": [
                {
                    "company": "NVIDIA",
                    "title": "Founder and CEO",
                    "description": "Accelerated computing.",
                    "starts_at": {"year": 1993, "month": 4},
                    "logo_url": "https://example.com/logo.png"
                }
            ],
            "education": [
                {"school": "Stanford University", "degree_name": "MS", "field_of_study": "EE"}
            ],
            "follower_count": 1000000
        });

        let profile: Profile = serde_json::from_value(raw).unwrap();
        assert_eq!(profile.display_name(), "Jensen Huang");
        assert_eq!(
            profile.occupation.as_deref(),
            Some("Founder and CEO at NVIDIA")
        );
        assert_eq!(profile.current_company(), Some("NVIDIA"));
        assert_eq!(profile.current_title(), Some("Founder and CEO"));
        assert_eq!(
            profile.location().as_deref(),
            Some("Santa Clara, United States")
        );
    }

    #[test]
    fn parses_sparse_payload() {
        let profile: Profile = serde_json::from_value(json!({"first_name": "Ada"})).unwrap();
        assert_eq!(profile.display_name(), "Ada");
        assert!(profile.experiences.is_empty());
        assert!(profile.current_company().is_none());
        assert!(profile.location().is_none());
    }

    #[test]
    fn display_name_falls_back() {
        assert_eq!(Profile::default().display_name(), "Unknown");

        let profile = Profile {
            first_name: Some("Grace".into()),
            last_name: Some("Hopper".into()),
            ..Profile::default()
        };
        assert_eq!(profile.display_name(), "Grace Hopper");
    }

    #[test]
    fn location_joins_what_exists() {
        let city_only = Profile {
            city: Some("London".into()),
            ..Profile::default()
        };
        assert_eq!(city_only.location().as_deref(), Some("London"));

        let country_only = Profile {
            country_full_name: Some("Japan".into()),
            ..Profile::default()
        };
        assert_eq!(country_only.location().as_deref(), Some("Japan"));
    }
}
