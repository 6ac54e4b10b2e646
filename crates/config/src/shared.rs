use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Curve {
    Linear,
    EaseQuad,
    EaseCubic,
    EaseExpo,
    /// slow at both ends, fastest through the middle
    #[default]
    EaseInOut,
}
