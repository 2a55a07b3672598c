use crate::sprite::models::SpriteDescriptor;
use serde::{Deserialize, Serialize};

/// Largest scale factor the engine will ever produce.
pub const MAX_SCALE_LIMIT: f64 = 0.5;

/// Pixel size of the rendered thumbnail element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Target thumbnail width as a share of the track width.
    pub track_fraction: f64,
    pub max_scale: f64,
    /// Lift above the bottom of the progress control, covering the bar's own height.
    pub baseline_lift: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            track_fraction: 0.25,
            max_scale: MAX_SCALE_LIMIT,
            baseline_lift: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeometryResult {
    pub translate_x: f64,
    pub scale: f64,
    pub bottom_offset: f64,
}

impl GeometryResult {
    pub fn transform_css(&self) -> String {
        format!("translateX({}px) scale({})", self.translate_x, self.scale)
    }

    pub fn bottom_css(&self) -> String {
        format!("{}px", self.bottom_offset)
    }

    /// Left edge of the scaled element when the transform origin is its centre.
    pub fn visual_left(&self, width: u32) -> f64 {
        let half = f64::from(width) / 2.0;
        self.translate_x + half - half * self.scale
    }
}

/// Output of [`GeometryEngine::place`] for one pointer sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    /// `None` when the thumbnail size is unknown; only the style applies then.
    pub geometry: Option<GeometryResult>,
    /// False when `descriptor` is the one placed last, so its style is already applied.
    pub style_changed: bool,
}

#[derive(Debug, Default)]
pub struct GeometryEngine {
    config: GeometryConfig,
    last_rendered: Option<SpriteDescriptor>,
}

impl GeometryEngine {
    pub fn new(config: GeometryConfig) -> Self {
        Self {
            config,
            last_rendered: None,
        }
    }

    pub fn config(&self) -> &GeometryConfig {
        &self.config
    }

    pub fn compute(
        &self,
        pointer_fraction: f64,
        track_width: f64,
        size: Option<ThumbnailSize>,
    ) -> Option<GeometryResult> {
        let size = size?;
        let width = f64::from(size.width);
        let height = f64::from(size.height);

        let x_pos = pointer_fraction * track_width;
        let scale = ((track_width * self.config.track_fraction) / width)
            .min(self.config.max_scale)
            .min(MAX_SCALE_LIMIT);
        let half = f64::from(size.width >> 1);
        let margin_right = track_width - (x_pos + half * scale);
        let margin_left = x_pos - half * scale;

        let translate_x = if margin_left > 0.0 && margin_right > 0.0 {
            x_pos - half
        } else if margin_left <= 0.0 {
            (x_pos - half) - margin_left
        } else {
            (track_width - half) - half * scale
        };

        let bottom_offset = -((height - height * scale) / 2.0) + self.config.baseline_lift;

        Some(GeometryResult {
            translate_x,
            scale,
            bottom_offset,
        })
    }

    /// Places `descriptor` for one pointer sample; `None` means hide the thumbnail.
    ///
    /// Cropped descriptors carry their own size. Whole images use `fallback_size`.
    pub fn place(
        &mut self,
        pointer_fraction: f64,
        track_width: f64,
        descriptor: Option<&SpriteDescriptor>,
        fallback_size: Option<ThumbnailSize>,
    ) -> Option<Placement> {
        let descriptor = descriptor?;

        let size = match descriptor.crop() {
            Some(crop) => Some(ThumbnailSize {
                width: crop.w,
                height: crop.h,
            }),
            None => fallback_size,
        };

        let geometry = self.compute(pointer_fraction, track_width, size);
        let style_changed = self.last_rendered.as_ref() != Some(descriptor);
        if style_changed {
            self.last_rendered = Some(descriptor.clone());
        }

        Some(Placement {
            geometry,
            style_changed,
        })
    }

    pub fn reset(&mut self) {
        self.last_rendered = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::models::Crop;

    fn tile(x: u32, w: u32, h: u32) -> SpriteDescriptor {
        SpriteDescriptor::Cropped {
            image_url: "https://x.com/s.jpg".to_string(),
            crop: Crop { x, y: 0, w, h },
        }
    }

    fn size(width: u32, height: u32) -> Option<ThumbnailSize> {
        Some(ThumbnailSize { width, height })
    }

    #[test]
    fn centred_under_pointer_in_the_middle() {
        let engine = GeometryEngine::default();
        let result = engine.compute(0.5, 800.0, size(160, 90)).unwrap();

        assert_eq!(result.scale, 0.5);
        assert_eq!(result.translate_x, 320.0);
        assert_eq!(result.bottom_offset, -22.5 + 50.0);
        assert_eq!(result.transform_css(), "translateX(320px) scale(0.5)");
        assert_eq!(result.bottom_css(), "27.5px");
    }

    #[test]
    fn clamped_to_left_edge_at_start() {
        let engine = GeometryEngine::default();
        let result = engine.compute(0.0, 800.0, size(160, 90)).unwrap();

        // margin_left = 0 - 40 = -40, so tx = -80 + 40
        assert_eq!(result.translate_x, -40.0);
        assert_eq!(result.visual_left(160), 0.0);
    }

    #[test]
    fn clamped_to_right_edge_at_end() {
        let engine = GeometryEngine::default();
        let result = engine.compute(1.0, 800.0, size(160, 90)).unwrap();

        assert_eq!(result.translate_x, 800.0 - 80.0 - 40.0);
        let right = result.visual_left(160) + 160.0 * result.scale;
        assert_eq!(right, 800.0);
    }

    #[test]
    fn scale_targets_a_quarter_of_a_narrow_track() {
        let engine = GeometryEngine::default();
        let result = engine.compute(0.5, 320.0, size(160, 90)).unwrap();
        assert_eq!(result.scale, 0.5);

        let result = engine.compute(0.5, 200.0, size(100, 50)).unwrap();
        assert_eq!(result.scale, 0.5);

        let result = engine.compute(0.5, 160.0, size(160, 90)).unwrap();
        assert_eq!(result.scale, 0.25);
    }

    #[test]
    fn odd_width_halves_with_truncation() {
        let engine = GeometryEngine::default();
        let result = engine.compute(0.5, 800.0, size(161, 90)).unwrap();
        assert_eq!(result.translate_x, 400.0 - 80.0);
    }

    #[test]
    fn baseline_lift_is_configurable() {
        let engine = GeometryEngine::new(GeometryConfig {
            baseline_lift: 0.0,
            ..GeometryConfig::default()
        });
        let result = engine.compute(0.5, 800.0, size(160, 90)).unwrap();
        assert_eq!(result.bottom_offset, -22.5);
    }

    #[test]
    fn scale_never_exceeds_half_even_with_a_looser_cap() {
        let engine = GeometryEngine::new(GeometryConfig {
            max_scale: 0.75,
            ..GeometryConfig::default()
        });
        let result = engine.compute(0.5, 800.0, size(100, 50)).unwrap();
        assert_eq!(result.scale, 0.5);
    }

    #[test]
    fn unknown_size_has_no_geometry() {
        let engine = GeometryEngine::default();
        assert_eq!(engine.compute(0.5, 800.0, None), None);
    }

    #[test]
    fn no_descriptor_means_hide() {
        let mut engine = GeometryEngine::default();
        assert_eq!(engine.place(0.5, 800.0, None, size(160, 90)), None);
    }

    #[test]
    fn style_changes_only_when_descriptor_changes() {
        let mut engine = GeometryEngine::default();
        let a = tile(0, 160, 90);
        let b = tile(160, 160, 90);

        assert!(engine.place(0.1, 800.0, Some(&a), None).unwrap().style_changed);
        assert!(!engine.place(0.2, 800.0, Some(&a), None).unwrap().style_changed);
        assert!(engine.place(0.3, 800.0, Some(&b), None).unwrap().style_changed);

        engine.reset();
        assert!(engine.place(0.3, 800.0, Some(&b), None).unwrap().style_changed);
    }

    #[test]
    fn whole_image_uses_fallback_size() {
        let mut engine = GeometryEngine::default();
        let whole = SpriteDescriptor::Whole {
            image_url: "https://x.com/w.jpg".to_string(),
        };

        let placement = engine.place(0.5, 800.0, Some(&whole), None).unwrap();
        assert_eq!(placement.geometry, None);

        let placement = engine.place(0.5, 800.0, Some(&whole), size(160, 90)).unwrap();
        assert_eq!(placement.geometry.unwrap().translate_x, 320.0);
        assert!(!placement.style_changed);
    }
}
