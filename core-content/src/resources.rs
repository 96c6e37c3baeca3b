//! Resource descriptors
//!
//! Static metadata for every managed content type: where it lives on the
//! backend, how mutations are encoded and which fields the screens treat
//! specially. The catalogue is fixed at compile time.

use bridge_traits::{FilePart, MultipartForm};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::executor::RequestBody;

/// How create/update bodies are put on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    Json,
    Multipart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Sliders,
    AboutGallery,
    Projects,
    Categories,
    Counters,
    ContactAddresses,
    SocialLinks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub kind: ResourceKind,
    /// Collection path relative to the API base, e.g. `/api/sliders`
    pub base_path: &'static str,
    pub encoding: BodyEncoding,
    /// Record fields the backend returns
    pub fields: &'static [&'static str],
    /// Fields holding rich text rendered as HTML by view screens
    pub html_fields: &'static [&'static str],
    /// Fields holding stored image paths
    pub image_fields: &'static [&'static str],
}

impl ResourceDescriptor {
    pub fn collection_path(&self) -> String {
        self.base_path.to_string()
    }

    pub fn item_path(&self, id: u64) -> String {
        format!("{}/{}", self.base_path, id)
    }

    pub fn is_html_field(&self, field: &str) -> bool {
        self.html_fields.contains(&field)
    }
}

static SLIDERS: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Sliders,
    base_path: "/api/sliders",
    encoding: BodyEncoding::Json,
    fields: &["id", "project_id", "image", "title", "text", "category"],
    html_fields: &["title", "text"],
    image_fields: &["image"],
};

static ABOUT_GALLERY: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::AboutGallery,
    base_path: "/api/about-gallery",
    encoding: BodyEncoding::Multipart,
    fields: &[
        "id",
        "image",
        "blog_title_tk",
        "blog_title_en",
        "blog_title_ru",
        "created_at",
        "updated_at",
    ],
    html_fields: &["blog_title_tk", "blog_title_en", "blog_title_ru"],
    image_fields: &["image"],
};

static PROJECTS: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Projects,
    base_path: "/api/projects",
    encoding: BodyEncoding::Multipart,
    fields: &[
        "id",
        "image",
        "title",
        "text",
        "category",
        "category_id",
        "director",
        "designer",
        "date",
    ],
    html_fields: &["title", "text", "director", "designer"],
    image_fields: &["image"],
};

static CATEGORIES: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Categories,
    base_path: "/api/category",
    encoding: BodyEncoding::Json,
    fields: &["id", "category"],
    html_fields: &[],
    image_fields: &[],
};

static COUNTERS: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Counters,
    base_path: "/api/counter",
    encoding: BodyEncoding::Json,
    fields: &["id", "years", "projects"],
    html_fields: &[],
    image_fields: &[],
};

static CONTACT_ADDRESSES: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::ContactAddresses,
    base_path: "/api/contact-address",
    encoding: BodyEncoding::Json,
    fields: &["id", "address"],
    html_fields: &["address"],
    image_fields: &[],
};

static SOCIAL_LINKS: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::SocialLinks,
    base_path: "/api/links",
    encoding: BodyEncoding::Json,
    fields: &["id", "text", "url"],
    html_fields: &[],
    image_fields: &[],
};

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Sliders,
        ResourceKind::AboutGallery,
        ResourceKind::Projects,
        ResourceKind::Categories,
        ResourceKind::Counters,
        ResourceKind::ContactAddresses,
        ResourceKind::SocialLinks,
    ];

    pub fn descriptor(&self) -> &'static ResourceDescriptor {
        match self {
            ResourceKind::Sliders => &SLIDERS,
            ResourceKind::AboutGallery => &ABOUT_GALLERY,
            ResourceKind::Projects => &PROJECTS,
            ResourceKind::Categories => &CATEGORIES,
            ResourceKind::Counters => &COUNTERS,
            ResourceKind::ContactAddresses => &CONTACT_ADDRESSES,
            ResourceKind::SocialLinks => &SOCIAL_LINKS,
        }
    }

    /// Short name used in logs and lookups
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Sliders => "sliders",
            ResourceKind::AboutGallery => "about-gallery",
            ResourceKind::Projects => "projects",
            ResourceKind::Categories => "categories",
            ResourceKind::Counters => "counters",
            ResourceKind::ContactAddresses => "contact-addresses",
            ResourceKind::SocialLinks => "links",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    /// Accepts the short name or the backend path segment
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches("/api/").to_ascii_lowercase();
        match name.as_str() {
            "sliders" | "slider" => Ok(ResourceKind::Sliders),
            "about-gallery" | "gallery" => Ok(ResourceKind::AboutGallery),
            "projects" | "project" => Ok(ResourceKind::Projects),
            "categories" | "category" => Ok(ResourceKind::Categories),
            "counters" | "counter" => Ok(ResourceKind::Counters),
            "contact-addresses" | "contact-address" | "address" => {
                Ok(ResourceKind::ContactAddresses)
            }
            "links" | "social-links" => Ok(ResourceKind::SocialLinks),
            _ => Err(format!("Unknown resource: {}", s)),
        }
    }
}

/// Image value of a create/update form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageInput {
    /// A newly chosen file
    Upload(FilePart),
    /// Keep the image already stored at this path
    Keep(String),
}

/// Fields submitted by create and update.
///
/// Scalars go through `Serialize`; `None` values are left out of the body.
/// The image travels separately because it may be a binary file.
pub trait FieldSet: Serialize + Send + Sync {
    fn image(&self) -> Option<&ImageInput> {
        None
    }
}

/// A managed content type
///
/// ```ignore
/// let sliders = client.list::<Slider>(&scope).await;
/// let created = client.create::<Project>(&fields, &scope).await;
/// ```
pub trait Resource: DeserializeOwned + Send + 'static {
    const KIND: ResourceKind;

    type Fields: FieldSet;

    fn descriptor() -> &'static ResourceDescriptor {
        Self::KIND.descriptor()
    }

    /// Stored image path of this record, if the resource has one
    fn image_path(&self) -> Option<&str> {
        None
    }
}

/// Encode `fields` for `descriptor`'s encoding
pub(crate) fn encode_fields<F: FieldSet + ?Sized>(
    descriptor: &ResourceDescriptor,
    fields: &F,
) -> Result<RequestBody, String> {
    let value = serde_json::to_value(fields)
        .map_err(|e| format!("Failed to serialize {} fields: {}", descriptor.kind, e))?;

    let mut map = match value {
        Value::Object(map) => map,
        other => {
            return Err(format!(
                "{} fields must serialize to an object, got {}",
                descriptor.kind, other
            ))
        }
    };
    map.retain(|_, v| !v.is_null());

    match descriptor.encoding {
        BodyEncoding::Json => {
            match fields.image() {
                Some(ImageInput::Keep(path)) => {
                    map.insert("image".to_string(), Value::String(path.clone()));
                }
                Some(ImageInput::Upload(_)) => {
                    return Err(format!("{} does not accept file uploads", descriptor.kind));
                }
                None => {}
            }
            Ok(RequestBody::Json(Value::Object(map)))
        }
        BodyEncoding::Multipart => {
            let mut form = MultipartForm::new();
            for (name, value) in map {
                let text = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                form = form.text(name, text);
            }
            form = match fields.image() {
                Some(ImageInput::Upload(file)) => form.file("image", file.clone()),
                Some(ImageInput::Keep(path)) => form.text("image", path.clone()),
                None => form,
            };
            Ok(RequestBody::Multipart(form))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::FormValue;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Form {
        title: String,
        category_id: Option<u64>,
        director: Option<String>,
        #[serde(skip)]
        image: Option<ImageInput>,
    }

    impl FieldSet for Form {
        fn image(&self) -> Option<&ImageInput> {
            self.image.as_ref()
        }
    }

    fn form(image: Option<ImageInput>) -> Form {
        Form {
            title: "<p>x</p>".to_string(),
            category_id: Some(3),
            director: None,
            image,
        }
    }

    #[test]
    fn test_catalogue_paths() {
        let paths: Vec<_> = ResourceKind::ALL
            .iter()
            .map(|k| k.descriptor().base_path)
            .collect();
        assert_eq!(
            paths,
            vec![
                "/api/sliders",
                "/api/about-gallery",
                "/api/projects",
                "/api/category",
                "/api/counter",
                "/api/contact-address",
                "/api/links",
            ]
        );

        for kind in ResourceKind::ALL {
            assert_eq!(kind.descriptor().kind, kind);
            assert!(kind.descriptor().fields.contains(&"id"));
        }
    }

    #[test]
    fn test_encodings() {
        assert_eq!(
            ResourceKind::Projects.descriptor().encoding,
            BodyEncoding::Multipart
        );
        assert_eq!(
            ResourceKind::AboutGallery.descriptor().encoding,
            BodyEncoding::Multipart
        );
        assert_eq!(
            ResourceKind::SocialLinks.descriptor().encoding,
            BodyEncoding::Json
        );
        assert!(ResourceKind::Projects.descriptor().is_html_field("text"));
        assert!(!ResourceKind::SocialLinks.descriptor().is_html_field("url"));
    }

    #[test]
    fn test_item_path() {
        assert_eq!(ResourceKind::SocialLinks.descriptor().item_path(5), "/api/links/5");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("sliders".parse::<ResourceKind>(), Ok(ResourceKind::Sliders));
        assert_eq!("/api/category".parse::<ResourceKind>(), Ok(ResourceKind::Categories));
        assert_eq!("contact-address".parse::<ResourceKind>(), Ok(ResourceKind::ContactAddresses));
        assert_eq!("Links".parse::<ResourceKind>(), Ok(ResourceKind::SocialLinks));
        assert!("users".parse::<ResourceKind>().is_err());

        for kind in ResourceKind::ALL {
            assert_eq!(kind.as_str().parse::<ResourceKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_multipart_encoding() {
        let file = FilePart::new("a.png", "image/png", vec![1u8, 2, 3]);
        let body = encode_fields(
            ResourceKind::Projects.descriptor(),
            &form(Some(ImageInput::Upload(file.clone()))),
        )
        .unwrap();

        let RequestBody::Multipart(form) = body else {
            panic!("expected multipart body");
        };
        let parts = form.parts();
        assert!(parts.contains(&("title".to_string(), FormValue::Text("<p>x</p>".to_string()))));
        assert!(parts.contains(&("category_id".to_string(), FormValue::Text("3".to_string()))));
        assert!(parts.contains(&("image".to_string(), FormValue::File(file))));
        assert!(!parts.iter().any(|(name, _)| name == "director"));
    }

    #[test]
    fn test_multipart_keeps_existing_image_path() {
        let body = encode_fields(
            ResourceKind::Projects.descriptor(),
            &form(Some(ImageInput::Keep("uploads\\p.png".to_string()))),
        )
        .unwrap();

        let RequestBody::Multipart(form) = body else {
            panic!("expected multipart body");
        };
        assert!(!form.has_files());
        assert!(form
            .parts()
            .contains(&("image".to_string(), FormValue::Text("uploads\\p.png".to_string()))));
    }

    #[test]
    fn test_json_encoding() {
        let body = encode_fields(ResourceKind::Sliders.descriptor(), &form(None)).unwrap();
        assert_eq!(
            body,
            RequestBody::Json(serde_json::json!({ "title": "<p>x</p>", "category_id": 3 }))
        );
    }

    #[test]
    fn test_json_resource_rejects_upload() {
        let file = FilePart::new("a.png", "image/png", vec![1u8]);
        let result = encode_fields(
            ResourceKind::Counters.descriptor(),
            &form(Some(ImageInput::Upload(file))),
        );
        assert!(result.is_err());
    }
}
