use std::fmt;

use serde::{Deserialize, Serialize};

/// Role chosen at registration, also used as the provider label on listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Provider,
    Researcher,
    Innovator,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Provider => "Waste Provider",
            Role::Researcher => "Researcher",
            Role::Innovator => "Innovator",
        }
    }

    /// Heading shown on the profile page.
    pub fn profile_label(self) -> &'static str {
        match self {
            Role::Provider => "Waste Provider",
            Role::Researcher | Role::Innovator => "Researcher / Innovator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Registered user, persisted verbatim in the local store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub full_name: String,
    pub organization: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub location: String,
    pub field_type: String,
    pub user_category: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waste_type: Option<String>,
}

/// Provider summary embedded in a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSummary {
    pub name: String,
    pub role: Role,
}

/// A bio-waste listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteItem {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub category: String,
    pub quantity: String,
    pub location: String,
    pub description: String,
    pub image_url: String,
    pub user: ProviderSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One line in a chat panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Link returned alongside a grounded answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLink {
    pub uri: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroundingSource {
    Web(SourceLink),
    Maps(SourceLink),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EducationAnswer {
    pub text: String,
    pub sources: Vec<GroundingSource>,
}

impl EducationAnswer {
    /// Web citations only; maps chunks are not rendered.
    pub fn web_sources(&self) -> impl Iterator<Item = &SourceLink> {
        self.sources.iter().filter_map(|source| match source {
            GroundingSource::Web(link) => Some(link),
            GroundingSource::Maps(_) => None,
        })
    }
}

/// Fields suggested by image classification. Any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ImageAnalysis {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serializes_role_lowercase_and_skips_missing_optionals() {
        let user = User {
            full_name: "Ada".into(),
            organization: "Lab".into(),
            email: "ada@lab.org".into(),
            phone: None,
            location: "Oslo".into(),
            field_type: "Biotech".into(),
            user_category: "Industry".into(),
            role: Role::Researcher,
            waste_type: None,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "researcher");
        assert_eq!(json["fullName"], "Ada");
        assert!(json.get("phone").is_none());
        assert!(json.get("wasteType").is_none());
    }

    #[test]
    fn web_sources_skip_maps_chunks() {
        let answer = EducationAnswer {
            text: "answer".into(),
            sources: vec![
                GroundingSource::Maps(SourceLink {
                    uri: "https://maps.example/1".into(),
                    title: "Depot".into(),
                }),
                GroundingSource::Web(SourceLink {
                    uri: "https://example.org".into(),
                    title: "Article".into(),
                }),
            ],
        };

        let titles: Vec<_> = answer.web_sources().map(|link| link.title.as_str()).collect();
        assert_eq!(titles, vec!["Article"]);
    }
}
