use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),
    #[error("custom property name must start with `--`: {0:?}")]
    InvalidVar(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }
}

/// Accepts `#rrggbb`, `rrggbb`, `#rgb` and `rgb`.
impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = palette::Srgb::<u8>::from_str(s.trim())
            .map_err(|_| ColorError::InvalidHex(s.to_string()))?;
        Ok(Self::new(parsed.red, parsed.green, parsed.blue))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Color {
    Rgb(Rgb),
    /// A CSS custom property reference with an optional fallback.
    Var { name: String, fallback: Option<Rgb> },
}

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(Rgb::new(r, g, b))
    }

    pub fn var(name: impl Into<String>, fallback: Option<Rgb>) -> Result<Self, ColorError> {
        let name = name.into();
        if !name.starts_with("--") {
            return Err(ColorError::InvalidVar(name));
        }
        Ok(Self::Var { name, fallback })
    }

    /// The concrete color, if one is known without a cascade.
    pub fn resolved(&self) -> Option<Rgb> {
        match self {
            Self::Rgb(rgb) => Some(*rgb),
            Self::Var { fallback, .. } => *fallback,
        }
    }

    pub fn to_css(&self) -> String {
        match self {
            Self::Rgb(rgb) => rgb.to_string(),
            Self::Var {
                name,
                fallback: Some(fallback),
            } => format!("var({name}, {fallback})"),
            Self::Var {
                name,
                fallback: None,
            } => format!("var({name})"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}
