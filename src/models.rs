//! Document schemas for the three site collections: users, blogs, retreats.
//!
//! Documents are stored as schema-flexible JSON in Sled (Serde-serialized)
//! and keyed by a UUIDv4 string id, serialized as `_id` on the wire.
//! Input payloads carry the field constraints (required fields, max lengths,
//! numeric bounds) and are checked at the handler boundary before anything
//! reaches the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A field-constraint violation, carrying the human-readable message that
/// goes back to the client verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

fn invalid(msg: &str) -> ValidationError {
    ValidationError(msg.to_string())
}

/// Required-string check: missing and empty both fail.
fn require<'a>(value: &'a Option<String>, msg: &str) -> Result<&'a str, ValidationError> {
    match value.as_deref() {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(invalid(msg)),
    }
}

fn check_max_len(value: &str, max: usize, msg: &str) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(invalid(msg));
    }
    Ok(())
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_image() -> String {
    "/images/default-blog.jpg".to_string()
}

fn default_bg_color() -> String {
    "bg-white".to_string()
}

// --- User: subscriber record created by the blog-gate form ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub has_access: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.name, "Please provide a name")?;
        require(&self.email, "Please provide an email")?;
        Ok(())
    }

    /// Builds the stored document. Call after [`NewUser::validate`].
    pub fn into_user(self, now: DateTime<Utc>) -> User {
        User {
            id: new_id(),
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            has_access: true,
            created_at: now,
        }
    }
}

/// Admin toggle payload; the only mutable field on a user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub has_access: bool,
}

// --- Blog: post with ordered sections, admin-managed ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogSection {
    pub heading: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub sections: Vec<BlogSection>,
    pub image: String,
    pub bg_color: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SectionInput {
    pub heading: Option<String>,
    pub content: Option<String>,
}

impl SectionInput {
    fn validate(&self) -> Result<BlogSection, ValidationError> {
        let heading = require(&self.heading, "Please provide a heading")?;
        let content = require(&self.content, "Please provide content")?;
        Ok(BlogSection {
            heading: heading.to_string(),
            content: content.to_string(),
        })
    }
}

/// Create/patch payload for blogs. Every field is optional so the same type
/// serves both full creates (validated with [`BlogInput::validate_new`]) and
/// partial updates (validated with [`BlogInput::validate_patch`]).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogInput {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub sections: Option<Vec<SectionInput>>,
    pub image: Option<String>,
    pub bg_color: Option<String>,
    pub is_published: Option<bool>,
}

impl BlogInput {
    fn check_title(&self) -> Result<(), ValidationError> {
        let title = require(&self.title, "Please provide a title")?;
        check_max_len(title, 100, "Title cannot be more than 100 characters")
    }

    fn check_subtitle(&self) -> Result<(), ValidationError> {
        let subtitle = require(&self.subtitle, "Please provide a subtitle")?;
        check_max_len(subtitle, 150, "Subtitle cannot be more than 150 characters")
    }

    fn check_description(&self) -> Result<(), ValidationError> {
        let description = require(&self.description, "Please provide a description")?;
        check_max_len(
            description,
            300,
            "Description cannot be more than 300 characters",
        )
    }

    fn checked_sections(&self) -> Result<Vec<BlogSection>, ValidationError> {
        self.sections
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(SectionInput::validate)
            .collect()
    }

    pub fn validate_new(&self) -> Result<(), ValidationError> {
        self.check_title()?;
        self.check_subtitle()?;
        self.check_description()?;
        self.checked_sections()?;
        Ok(())
    }

    /// Validates only the fields present in a partial update.
    pub fn validate_patch(&self) -> Result<(), ValidationError> {
        if self.title.is_some() {
            self.check_title()?;
        }
        if self.subtitle.is_some() {
            self.check_subtitle()?;
        }
        if self.description.is_some() {
            self.check_description()?;
        }
        if self.sections.is_some() {
            self.checked_sections()?;
        }
        Ok(())
    }

    /// Builds the stored document with defaults applied. Call after
    /// [`BlogInput::validate_new`].
    pub fn into_blog(self, now: DateTime<Utc>) -> Result<Blog, ValidationError> {
        let sections = self.checked_sections()?;
        Ok(Blog {
            id: new_id(),
            title: self.title.unwrap_or_default(),
            subtitle: self.subtitle.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            sections,
            image: self.image.unwrap_or_else(default_image),
            bg_color: self.bg_color.unwrap_or_else(default_bg_color),
            is_published: self.is_published.unwrap_or(false),
            created_at: now,
            updated_at: now,
        })
    }

    /// Merges the provided fields into an existing document and stamps
    /// `updatedAt`. Call after [`BlogInput::validate_patch`].
    pub fn apply_to(self, blog: &mut Blog, now: DateTime<Utc>) -> Result<(), ValidationError> {
        if self.sections.is_some() {
            blog.sections = self.checked_sections()?;
        }
        if let Some(title) = self.title {
            blog.title = title;
        }
        if let Some(subtitle) = self.subtitle {
            blog.subtitle = subtitle;
        }
        if let Some(description) = self.description {
            blog.description = description;
        }
        if let Some(image) = self.image {
            blog.image = image;
        }
        if let Some(bg_color) = self.bg_color {
            blog.bg_color = bg_color;
        }
        if let Some(is_published) = self.is_published {
            blog.is_published = is_published;
        }
        blog.updated_at = now;
        Ok(())
    }
}

// --- Retreat: offering with price and active flag, admin-managed ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Retreat {
    #[serde(rename = "_id")]
    pub id: String,
    pub label: String,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub bg_color: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetreatInput {
    pub label: Option<String>,
    pub title: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub bg_color: Option<String>,
    pub is_active: Option<bool>,
}

impl RetreatInput {
    fn check_label(&self) -> Result<(), ValidationError> {
        let label = require(&self.label, "Please provide a label")?;
        check_max_len(label, 50, "Label cannot be more than 50 characters")
    }

    fn check_title(&self) -> Result<(), ValidationError> {
        let title = require(&self.title, "Please provide a title")?;
        check_max_len(title, 100, "Title cannot be more than 100 characters")
    }

    fn check_price(&self) -> Result<(), ValidationError> {
        let price = self
            .price
            .ok_or_else(|| invalid("Please provide a price"))?;
        if price < 0.0 {
            return Err(invalid("Price cannot be negative"));
        }
        Ok(())
    }

    fn check_description(&self) -> Result<(), ValidationError> {
        let description = require(&self.description, "Please provide a description")?;
        check_max_len(
            description,
            500,
            "Description cannot be more than 500 characters",
        )
    }

    pub fn validate_new(&self) -> Result<(), ValidationError> {
        self.check_label()?;
        self.check_title()?;
        self.check_price()?;
        self.check_description()?;
        Ok(())
    }

    pub fn validate_patch(&self) -> Result<(), ValidationError> {
        if self.label.is_some() {
            self.check_label()?;
        }
        if self.title.is_some() {
            self.check_title()?;
        }
        if self.price.is_some() {
            self.check_price()?;
        }
        if self.description.is_some() {
            self.check_description()?;
        }
        Ok(())
    }

    pub fn into_retreat(self, now: DateTime<Utc>) -> Retreat {
        Retreat {
            id: new_id(),
            label: self.label.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            bg_color: self.bg_color.unwrap_or_else(default_bg_color),
            is_active: self.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_to(self, retreat: &mut Retreat, now: DateTime<Utc>) {
        if let Some(label) = self.label {
            retreat.label = label;
        }
        if let Some(title) = self.title {
            retreat.title = title;
        }
        if let Some(price) = self.price {
            retreat.price = price;
        }
        if let Some(description) = self.description {
            retreat.description = description;
        }
        if let Some(bg_color) = self.bg_color {
            retreat.bg_color = bg_color;
        }
        if let Some(is_active) = self.is_active {
            retreat.is_active = is_active;
        }
        retreat.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retreat_input() -> RetreatInput {
        RetreatInput {
            label: Some("R1".to_string()),
            title: Some("T".to_string()),
            price: Some(100.0),
            description: Some("D".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn retreat_defaults_applied_on_create() {
        let input = retreat_input();
        input.validate_new().expect("valid input");
        let retreat = input.into_retreat(Utc::now());
        assert!(retreat.is_active);
        assert_eq!(retreat.bg_color, "bg-white");
        assert!(retreat.updated_at >= retreat.created_at);
    }

    #[test]
    fn retreat_rejects_negative_price() {
        let mut input = retreat_input();
        input.price = Some(-1.0);
        let err = input.validate_new().unwrap_err();
        assert_eq!(err.0, "Price cannot be negative");
    }

    #[test]
    fn retreat_requires_price() {
        let mut input = retreat_input();
        input.price = None;
        let err = input.validate_new().unwrap_err();
        assert_eq!(err.0, "Please provide a price");
    }

    #[test]
    fn blog_requires_title_and_bounds_length() {
        let mut input = BlogInput {
            subtitle: Some("s".to_string()),
            description: Some("d".to_string()),
            ..Default::default()
        };
        assert_eq!(
            input.validate_new().unwrap_err().0,
            "Please provide a title"
        );

        input.title = Some("x".repeat(101));
        assert_eq!(
            input.validate_new().unwrap_err().0,
            "Title cannot be more than 100 characters"
        );
    }

    #[test]
    fn blog_defaults_applied_on_create() {
        let input = BlogInput {
            title: Some("Hello".to_string()),
            subtitle: Some("World".to_string()),
            description: Some("A post".to_string()),
            ..Default::default()
        };
        input.validate_new().expect("valid input");
        let blog = input.into_blog(Utc::now()).expect("build blog");
        assert!(!blog.is_published);
        assert_eq!(blog.image, "/images/default-blog.jpg");
        assert_eq!(blog.bg_color, "bg-white");
        assert!(blog.sections.is_empty());
    }

    #[test]
    fn blog_section_requires_heading_and_content() {
        let input = BlogInput {
            title: Some("Hello".to_string()),
            subtitle: Some("World".to_string()),
            description: Some("A post".to_string()),
            sections: Some(vec![SectionInput {
                heading: Some("H".to_string()),
                content: None,
            }]),
            ..Default::default()
        };
        assert_eq!(
            input.validate_new().unwrap_err().0,
            "Please provide content"
        );
    }

    #[test]
    fn blog_patch_validates_only_present_fields() {
        let patch = BlogInput {
            subtitle: Some("new subtitle".to_string()),
            ..Default::default()
        };
        patch.validate_patch().expect("partial payload is fine");

        let bad = BlogInput {
            description: Some("x".repeat(301)),
            ..Default::default()
        };
        assert_eq!(
            bad.validate_patch().unwrap_err().0,
            "Description cannot be more than 300 characters"
        );
    }

    #[test]
    fn blog_patch_merge_stamps_updated_at() {
        let input = BlogInput {
            title: Some("Hello".to_string()),
            subtitle: Some("World".to_string()),
            description: Some("A post".to_string()),
            ..Default::default()
        };
        let created = Utc::now();
        let mut blog = input.into_blog(created).expect("build blog");

        let patch = BlogInput {
            is_published: Some(true),
            ..Default::default()
        };
        let later = Utc::now();
        patch.apply_to(&mut blog, later).expect("apply patch");
        assert!(blog.is_published);
        assert_eq!(blog.title, "Hello");
        assert_eq!(blog.updated_at, later);
        assert!(blog.updated_at >= blog.created_at);
    }

    #[test]
    fn wire_format_uses_camel_case_and_underscore_id() {
        let user = NewUser {
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
        }
        .into_user(Utc::now());
        let json = serde_json::to_value(&user).expect("serialize");
        assert!(json.get("_id").is_some());
        assert_eq!(json["hasAccess"], serde_json::json!(true));
        assert!(json.get("createdAt").is_some());
    }
}
