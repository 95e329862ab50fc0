use plinth_base::{Error, ensure_unit_interval};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Normalized RGB color, every channel in `[0, 1]`.
///
/// Deserializes from `[r, g, b]` or from a `"#rrggbb"` string and always
/// serializes as `[r, g, b]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr", into = "[f64; 3]")]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn try_rgb(r: f64, g: f64, b: f64) -> plinth_base::Result<Self> {
        let color = Self::rgb(r, g, b);
        color.validate()?;
        Ok(color)
    }

    pub fn channels(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    pub fn validate(&self) -> plinth_base::Result<()> {
        ensure_unit_interval("color.r", self.r)?;
        ensure_unit_interval("color.g", self.g)?;
        ensure_unit_interval("color.b", self.b)
    }

    pub fn from_hex(text: &str) -> plinth_base::Result<Self> {
        let digits = text.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidParameter(format!(
                "color '{text}' is not of the form #rrggbb"
            )));
        }
        let channel = |i: usize| -> plinth_base::Result<f64> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| f64::from(v) / 255.0)
                .map_err(|err| Error::InvalidParameter(format!("color '{text}': {err}")))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl From<Color> for [f64; 3] {
    fn from(color: Color) -> Self {
        color.channels()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Accepts `r,g,b` channel lists and `#rrggbb` hex strings.
impl FromStr for Color {
    type Err = Error;

    fn from_str(text: &str) -> plinth_base::Result<Self> {
        if text.trim_start().starts_with('#') {
            return Self::from_hex(text);
        }
        let parts: Vec<&str> = text.split(',').collect();
        if parts.len() != 3 {
            return Err(Error::InvalidParameter(format!(
                "color '{text}' expects three comma-separated channels, e.g. 0.25,1.0,0.75"
            )));
        }
        let mut channels = [0.0; 3];
        for (slot, part) in channels.iter_mut().zip(parts) {
            *slot = part
                .trim()
                .parse()
                .map_err(|_| Error::InvalidParameter(format!("invalid color channel '{part}'")))?;
        }
        Self::try_rgb(channels[0], channels[1], channels[2])
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Channels([f64; 3]),
    Hex(String),
}

impl TryFrom<ColorRepr> for Color {
    type Error = Error;

    fn try_from(repr: ColorRepr) -> plinth_base::Result<Self> {
        match repr {
            ColorRepr::Channels([r, g, b]) => Self::try_rgb(r, g, b),
            ColorRepr::Hex(text) => Self::from_hex(&text),
        }
    }
}

/// How a shown object is drawn: its color and its opacity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayStyle {
    pub color: Color,
    /// Opacity in `[0, 1]`; `1` is fully opaque.
    pub alpha: f64,
}

impl DisplayStyle {
    pub const DEFAULT_COLOR: Color = Color::rgb(1.0, 0.8, 0.0);

    pub fn new(color: Color, alpha: f64) -> plinth_base::Result<Self> {
        let style = Self { color, alpha };
        style.validate()?;
        Ok(style)
    }

    pub fn validate(&self) -> plinth_base::Result<()> {
        self.color.validate()?;
        ensure_unit_interval("alpha", self.alpha)
    }

    pub fn is_translucent(&self) -> bool {
        self.alpha < 1.0
    }

    /// Parses a style record such as `{"color": [0.25, 1.0, 0.75], "alpha": 0.5}`.
    /// Missing keys take their defaults; unknown keys are rejected.
    pub fn from_json(text: &str) -> plinth_base::Result<Self> {
        let style: Self = serde_json::from_str(text)
            .map_err(|err| Error::InvalidParameter(format!("display style: {err}")))?;
        style.validate()?;
        Ok(style)
    }
}

impl Default for DisplayStyle {
    fn default() -> Self {
        Self {
            color: Self::DEFAULT_COLOR,
            alpha: 1.0,
        }
    }
}
