//! Typed records and form fields for each managed resource

use serde::{Deserialize, Serialize};

use crate::resources::{FieldSet, ImageInput, Resource, ResourceKind};

/// Numeric fields that the backend sometimes returns as strings
mod lenient {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| D::Error::custom(format!("expected a number, got '{}'", s))),
        }
    }

    pub fn opt_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Number(n)) => Ok(Some(n)),
            Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(Raw::Text(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("expected a number, got '{}'", s))),
        }
    }
}

fn non_empty(path: &str) -> Option<&str> {
    if path.trim().is_empty() {
        None
    } else {
        Some(path)
    }
}

// Sliders

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SliderRow")]
pub struct Slider {
    pub id: u64,
    pub project_id: u64,
    pub image: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub category: Option<String>,
}

/// Slider as sent by the backend; joined queries name the key `slider_id`,
/// sometimes next to the project's own `id`.
#[derive(Deserialize)]
struct SliderRow {
    #[serde(default)]
    slider_id: Option<u64>,
    #[serde(default)]
    id: Option<u64>,
    #[serde(deserialize_with = "lenient::number")]
    project_id: u64,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

impl TryFrom<SliderRow> for Slider {
    type Error = String;

    fn try_from(row: SliderRow) -> Result<Self, Self::Error> {
        let id = row
            .slider_id
            .or(row.id)
            .ok_or_else(|| "slider record has neither `slider_id` nor `id`".to_string())?;

        Ok(Self {
            id,
            project_id: row.project_id,
            image: row.image,
            title: row.title,
            text: row.text,
            category: row.category,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SliderFields {
    pub project_id: u64,
}

impl FieldSet for SliderFields {}

impl Resource for Slider {
    const KIND: ResourceKind = ResourceKind::Sliders;
    type Fields = SliderFields;

    fn image_path(&self) -> Option<&str> {
        self.image.as_deref().and_then(non_empty)
    }
}

// About gallery

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: u64,
    pub image: String,
    #[serde(default)]
    pub blog_title_tk: Option<String>,
    #[serde(default)]
    pub blog_title_en: Option<String>,
    #[serde(default)]
    pub blog_title_ru: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GalleryFields {
    #[serde(skip)]
    pub image: Option<ImageInput>,
    pub blog_title_tk: Option<String>,
    pub blog_title_en: Option<String>,
    pub blog_title_ru: Option<String>,
}

impl GalleryFields {
    pub fn with_image(image: ImageInput) -> Self {
        Self {
            image: Some(image),
            ..Self::default()
        }
    }
}

impl FieldSet for GalleryFields {
    fn image(&self) -> Option<&ImageInput> {
        self.image.as_ref()
    }
}

impl Resource for GalleryItem {
    const KIND: ResourceKind = ResourceKind::AboutGallery;
    type Fields = GalleryFields;

    fn image_path(&self) -> Option<&str> {
        non_empty(&self.image)
    }
}

// Projects

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub category_id: Option<u64>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub designer: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Project form. Title, text, director and designer hold rich-text HTML.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ProjectFields {
    pub title: String,
    pub text: String,
    pub category_id: Option<u64>,
    pub director: Option<String>,
    pub designer: Option<String>,
    pub date: Option<String>,
    #[serde(skip)]
    pub image: Option<ImageInput>,
}

impl FieldSet for ProjectFields {
    fn image(&self) -> Option<&ImageInput> {
        self.image.as_ref()
    }
}

impl Resource for Project {
    const KIND: ResourceKind = ResourceKind::Projects;
    type Fields = ProjectFields;

    fn image_path(&self) -> Option<&str> {
        non_empty(&self.image)
    }
}

// Categories

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFields {
    pub category: String,
}

impl FieldSet for CategoryFields {}

impl Resource for Category {
    const KIND: ResourceKind = ResourceKind::Categories;
    type Fields = CategoryFields;
}

// Counter widget

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub id: u64,
    #[serde(deserialize_with = "lenient::number")]
    pub years: u64,
    #[serde(deserialize_with = "lenient::number")]
    pub projects: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterFields {
    pub years: u64,
    pub projects: u64,
}

impl FieldSet for CounterFields {}

impl Resource for Counter {
    const KIND: ResourceKind = ResourceKind::Counters;
    type Fields = CounterFields;
}

// Contact addresses

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAddress {
    pub id: u64,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactAddressFields {
    pub address: String,
}

impl FieldSet for ContactAddressFields {}

impl Resource for ContactAddress {
    const KIND: ResourceKind = ResourceKind::ContactAddresses;
    type Fields = ContactAddressFields;
}

// Social links

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub id: u64,
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLinkFields {
    pub text: String,
    pub url: String,
}

impl FieldSet for SocialLinkFields {}

impl Resource for SocialLink {
    const KIND: ResourceKind = ResourceKind::SocialLinks;
    type Fields = SocialLinkFields;
}
