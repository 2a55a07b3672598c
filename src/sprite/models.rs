use serde::Serialize;

/// Sub-rectangle of a sprite sheet, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Crop {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpriteDescriptor {
    /// The whole image is the thumbnail.
    Whole { image_url: String },
    /// A tile of a shared sprite sheet.
    Cropped { image_url: String, crop: Crop },
}

impl SpriteDescriptor {
    pub fn image_url(&self) -> &str {
        match self {
            SpriteDescriptor::Whole { image_url } => image_url,
            SpriteDescriptor::Cropped { image_url, .. } => image_url,
        }
    }

    /// Key used by the prefetch cache; tiles of one sheet share it.
    pub fn dedupe_key(&self) -> &str {
        self.image_url()
    }

    pub fn crop(&self) -> Option<&Crop> {
        match self {
            SpriteDescriptor::Whole { .. } => None,
            SpriteDescriptor::Cropped { crop, .. } => Some(crop),
        }
    }

    pub fn style(&self) -> ThumbnailStyle {
        match self {
            SpriteDescriptor::Whole { image_url } => ThumbnailStyle {
                background: format!("url(\"{image_url}\")"),
                width: None,
                height: None,
            },
            SpriteDescriptor::Cropped { image_url, crop } => ThumbnailStyle {
                background: format!(
                    "url(\"{}\") no-repeat -{}px -{}px",
                    image_url, crop.x, crop.y
                ),
                width: Some(format!("{}px", crop.w)),
                height: Some(format!("{}px", crop.h)),
            },
        }
    }
}

/// CSS properties a sink applies for one descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThumbnailStyle {
    pub background: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}
