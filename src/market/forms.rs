use std::path::PathBuf;
use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use thiserror::Error;

use crate::common::{ImageAnalysis, ProviderSummary, Role, User, WasteItem};

pub const FIELD_TYPES: &[&str] = &["Agriculture", "Food", "Biotech", "Research", "Waste Mgmt"];
pub const USER_CATEGORIES: &[&str] = &[
    "Industry",
    "Academic Institution",
    "Individual Researcher",
    "Farmer / SME",
];
pub const WASTE_TYPES: &[&str] = &["Food", "Lab", "Agricultural", "Plastic"];

/// Provider name used when a listing is posted without a signed-in user.
pub const ANONYMOUS_PROVIDER: &str = "Current User";

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

/// Why a form was not submitted. Shown to the user as a notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill out all required fields: {}.", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please fill out all fields and upload an image.")]
    IncompleteListing,
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationForm {
    pub role: Role,
    pub full_name: String,
    pub organization: String,
    pub email: String,
    pub password: String,
    pub show_password: bool,
    pub phone: String,
    pub location: String,
    pub field_type: String,
    pub user_category: String,
    pub waste_type: String,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            role: Role::Provider,
            full_name: String::new(),
            organization: String::new(),
            email: String::new(),
            password: String::new(),
            show_password: false,
            phone: String::new(),
            location: String::new(),
            field_type: String::new(),
            user_category: String::new(),
            waste_type: String::new(),
        }
    }
}

impl RegistrationForm {
    /// Validate and build the user. The password is checked for presence only
    /// and never leaves the form.
    pub fn submit(&self) -> Result<User, FormError> {
        let required = [
            ("Full Name", &self.full_name),
            ("Organization", &self.organization),
            ("Email", &self.email),
            ("Password", &self.password),
            ("Location", &self.location),
            ("Field Type", &self.field_type),
            ("User Category", &self.user_category),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| blank(value))
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(FormError::MissingFields(missing));
        }
        if !EMAIL.is_match(self.email.trim()) {
            return Err(FormError::InvalidEmail);
        }

        let waste_type = match self.role {
            Role::Provider => optional(&self.waste_type),
            Role::Researcher | Role::Innovator => None,
        };

        Ok(User {
            full_name: self.full_name.trim().to_string(),
            organization: self.organization.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional(&self.phone),
            location: self.location.trim().to_string(),
            field_type: self.field_type.clone(),
            user_category: self.user_category.clone(),
            role: self.role,
            waste_type,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingForm {
    pub title: String,
    pub category: String,
    pub quantity: String,
    pub location: String,
    pub description: String,
    /// Path typed or picked by the user, not yet analysed.
    pub image_input: String,
    pub image_path: Option<PathBuf>,
    pub analyzing: bool,
    pub error: Option<String>,
}

impl ListingForm {
    /// Overwrite fields the model filled in; empty suggestions are ignored.
    pub fn apply_analysis(&mut self, analysis: ImageAnalysis) {
        if let Some(title) = analysis.title.filter(|v| !blank(v)) {
            self.title = title;
        }
        if let Some(category) = analysis.category.filter(|v| !blank(v)) {
            self.category = category;
        }
        if let Some(description) = analysis.description.filter(|v| !blank(v)) {
            self.description = description;
        }
    }

    pub fn submit(&self, provider_name: &str, now: DateTime<Utc>) -> Result<WasteItem, FormError> {
        let image = match &self.image_path {
            Some(path) => path,
            None => return Err(FormError::IncompleteListing),
        };
        let fields = [
            &self.title,
            &self.category,
            &self.quantity,
            &self.location,
            &self.description,
        ];
        if fields.iter().any(|value| blank(value)) {
            return Err(FormError::IncompleteListing);
        }

        Ok(WasteItem {
            id: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            title: self.title.trim().to_string(),
            category: self.category.trim().to_string(),
            quantity: self.quantity.trim().to_string(),
            location: self.location.trim().to_string(),
            description: self.description.trim().to_string(),
            image_url: format!("file://{}", image.display()),
            user: ProviderSummary {
                name: provider_name.to_string(),
                role: Role::Provider,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn filled_registration() -> RegistrationForm {
        RegistrationForm {
            full_name: "Ada Lovelace".into(),
            organization: "Analytical Labs".into(),
            email: "ada@labs.example".into(),
            password: "hunter2".into(),
            location: "London".into(),
            field_type: "Biotech".into(),
            user_category: "Industry".into(),
            ..RegistrationForm::default()
        }
    }

    #[test]
    fn registration_defaults_to_provider() {
        assert_eq!(RegistrationForm::default().role, Role::Provider);
    }

    #[test]
    fn registration_builds_user_with_selected_role() {
        let mut form = filled_registration();
        form.role = Role::Researcher;
        form.waste_type = "Food".into();

        let user = form.submit().unwrap();
        assert_eq!(user.role, Role::Researcher);
        assert_eq!(user.full_name, "Ada Lovelace");
        // waste type is a provider-only field
        assert_eq!(user.waste_type, None);
        assert_eq!(user.phone, None);
    }

    #[test]
    fn provider_keeps_waste_type_and_phone() {
        let mut form = filled_registration();
        form.waste_type = "Lab".into();
        form.phone = " 555-0100 ".into();

        let user = form.submit().unwrap();
        assert_eq!(user.role, Role::Provider);
        assert_eq!(user.waste_type.as_deref(), Some("Lab"));
        assert_eq!(user.phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn missing_required_fields_are_listed() {
        let mut form = filled_registration();
        form.organization = "   ".into();
        form.password.clear();

        assert_eq!(
            form.submit(),
            Err(FormError::MissingFields(vec!["Organization", "Password"]))
        );
        assert_eq!(
            form.submit().unwrap_err().to_string(),
            "Please fill out all required fields: Organization, Password."
        );
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut form = filled_registration();
        form.email = "not-an-email".into();
        assert_eq!(form.submit(), Err(FormError::InvalidEmail));
    }

    fn filled_listing() -> ListingForm {
        ListingForm {
            title: "Brewery Spent Grain".into(),
            category: "Food Waste".into(),
            quantity: "1 ton/week".into(),
            location: "Denver, CO".into(),
            description: "Wet barley grain".into(),
            image_path: Some(PathBuf::from("/tmp/grain.jpg")),
            ..ListingForm::default()
        }
    }

    #[test]
    fn listing_requires_image_and_fields() {
        let now = Utc::now();
        let mut form = filled_listing();
        form.image_path = None;
        assert_eq!(
            form.submit("x", now),
            Err(FormError::IncompleteListing)
        );

        let mut form = filled_listing();
        form.quantity = " ".into();
        assert_eq!(
            form.submit("x", now).unwrap_err().to_string(),
            "Please fill out all fields and upload an image."
        );
    }

    #[test]
    fn listing_id_is_timestamp_and_image_is_file_uri() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let item = filled_listing().submit("Ada Lovelace", now).unwrap();

        assert_eq!(item.id, "2024-05-01T12:30:00.000Z");
        assert_eq!(item.image_url, "file:///tmp/grain.jpg");
        assert_eq!(item.user.name, "Ada Lovelace");
        assert_eq!(item.user.role, Role::Provider);
    }

    #[test]
    fn analysis_overwrites_only_non_empty_fields() {
        let mut form = filled_listing();
        form.apply_analysis(ImageAnalysis {
            title: Some("Spent Grain".into()),
            category: Some("".into()),
            description: None,
        });

        assert_eq!(form.title, "Spent Grain");
        assert_eq!(form.category, "Food Waste");
        assert_eq!(form.description, "Wet barley grain");
    }
}
