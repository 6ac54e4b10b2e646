use schemars::JsonSchema;
use serde::{Deserialize, Deserializer};
use util::color::{parse_color, Color};

use crate::shared::Curve;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[schemars(extend("allowTrailingCommas" = true))]
#[serde(rename_all = "kebab-case")]
pub struct FoldConfig {
    /// width of the card, used when the detail face has to be measured again
    #[serde(default = "dt_width")]
    pub width: i32,
    #[serde(default = "dt_cover_height")]
    pub cover_height: i32,

    /// milliseconds
    #[serde(default = "dt_animation_duration")]
    pub animation_duration: u64,
    #[serde(default)]
    pub animation_curve: Curve,
    #[serde(default = "dt_frame_rate")]
    pub frame_rate: u64,

    #[serde(default = "dt_shadow_color")]
    #[serde(deserialize_with = "color_translate")]
    #[schemars(with = "String")]
    pub shadow_color: Color,
}
impl FoldConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.width <= 0 {
            return Err(format!("width must be positive, got {}", self.width));
        }
        if self.cover_height <= 0 {
            return Err(format!(
                "cover-height must be positive, got {}",
                self.cover_height
            ));
        }
        if self.animation_duration == 0 {
            return Err("animation-duration must not be 0".to_string());
        }
        if self.frame_rate == 0 {
            return Err("frame-rate must not be 0".to_string());
        }
        Ok(())
    }
}
impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            width: dt_width(),
            cover_height: dt_cover_height(),
            animation_duration: dt_animation_duration(),
            animation_curve: Curve::default(),
            frame_rate: dt_frame_rate(),
            shadow_color: dt_shadow_color(),
        }
    }
}

fn dt_width() -> i32 {
    320
}
fn dt_cover_height() -> i32 {
    100
}
fn dt_animation_duration() -> u64 {
    600
}
fn dt_frame_rate() -> u64 {
    60
}
fn dt_shadow_color() -> Color {
    Color::BLACK
}

pub fn color_translate<'de, D>(d: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    struct ColorVisitor;
    impl serde::de::Visitor<'_> for ColorVisitor {
        type Value = Color;
        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a hex color string")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            parse_color(v).map_err(serde::de::Error::custom)
        }
    }
    d.deserialize_str(ColorVisitor)
}
