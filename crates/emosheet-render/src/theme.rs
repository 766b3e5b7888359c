//! Built-in sheet themes.

use crate::text::TextStyle;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `0.0..=1.0`.
    pub a: f64,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0.0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn hex(v: u32) -> Self {
        Self::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// `#rrggbb`, ignoring alpha.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }

    /// WCAG relative luminance of the opaque color, in `0.0..=1.0`.
    pub fn relative_luminance(self) -> f64 {
        fn channel(c: u8) -> f64 {
            let c = f64::from(c) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecorStyle {
    Simple,
    Sharp,
    Rounded,
    Double,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKey {
    #[default]
    Standard,
    Dark,
    Pastel,
    Noir,
}

impl ThemeKey {
    pub const ALL: [ThemeKey; 4] = [
        ThemeKey::Standard,
        ThemeKey::Dark,
        ThemeKey::Pastel,
        ThemeKey::Noir,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeKey::Standard => "standard",
            ThemeKey::Dark => "dark",
            ThemeKey::Pastel => "pastel",
            ThemeKey::Noir => "noir",
        }
    }

    pub fn theme(self) -> &'static Theme {
        match self {
            ThemeKey::Standard => &STANDARD,
            ThemeKey::Dark => &DARK,
            ThemeKey::Pastel => &PASTEL,
            ThemeKey::Noir => &NOIR,
        }
    }
}

impl FromStr for ThemeKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "standard" => Ok(Self::Standard),
            "dark" => Ok(Self::Dark),
            "pastel" => Ok(Self::Pastel),
            "noir" => Ok(Self::Noir),
            other => Err(Error::UnknownTheme {
                key: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ThemeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub key: ThemeKey,
    pub background: Color,
    pub text: Color,
    pub accent: Color,
    pub sub_accent: Color,
    pub chart_fill: Color,
    pub chart_line: Color,
    pub font_main: &'static str,
    pub font_sub: &'static str,
    pub decor: DecorStyle,
}

impl Theme {
    pub fn lookup(key: &str) -> Result<&'static Theme> {
        Ok(key.parse::<ThemeKey>()?.theme())
    }

    pub fn main_font(&self, size: f64) -> TextStyle {
        TextStyle::new(self.font_main, size)
    }

    pub fn sub_font(&self, size: f64) -> TextStyle {
        TextStyle::new(self.font_sub, size)
    }

    pub fn is_light(&self) -> bool {
        self.background.relative_luminance() > 0.5
    }

    /// Faint overlay that reads as a panel on this background: darker on light themes, lighter on
    /// dark ones.
    pub fn panel_overlay(&self) -> Color {
        if self.is_light() {
            Color::BLACK.with_alpha(0.03)
        } else {
            Color::WHITE.with_alpha(0.05)
        }
    }
}

pub static STANDARD: Theme = Theme {
    key: ThemeKey::Standard,
    background: Color::hex(0xf9f9f9),
    text: Color::hex(0x333333),
    accent: Color::hex(0x2c3e50),
    sub_accent: Color::hex(0x546e7a),
    chart_fill: Color::rgba(52, 152, 219, 0.4),
    chart_line: Color::hex(0x2980b9),
    font_main: r#""Shippori Mincho", serif"#,
    font_sub: r#""Noto Sans JP", sans-serif"#,
    decor: DecorStyle::Simple,
};

pub static DARK: Theme = Theme {
    key: ThemeKey::Dark,
    background: Color::hex(0x1a1a1a),
    text: Color::hex(0xecf0f1),
    accent: Color::hex(0xe74c3c),
    sub_accent: Color::hex(0xbdc3c7),
    chart_fill: Color::rgba(231, 76, 60, 0.4),
    chart_line: Color::hex(0xc0392b),
    font_main: r#""Zen Antique", serif"#,
    font_sub: r#""Noto Sans JP", sans-serif"#,
    decor: DecorStyle::Sharp,
};

pub static PASTEL: Theme = Theme {
    key: ThemeKey::Pastel,
    background: Color::hex(0xfff0f5),
    text: Color::hex(0x554455),
    accent: Color::hex(0xffb7b2),
    sub_accent: Color::hex(0x88a09e),
    chart_fill: Color::rgba(255, 159, 243, 0.4),
    chart_line: Color::hex(0xf368e0),
    font_main: r#""Kiwi Maru", serif"#,
    font_sub: r#""Start", sans-serif"#,
    decor: DecorStyle::Rounded,
};

pub static NOIR: Theme = Theme {
    key: ThemeKey::Noir,
    background: Color::hex(0x000000),
    text: Color::hex(0xffffff),
    accent: Color::hex(0xffffff),
    sub_accent: Color::hex(0xbbbbbb),
    chart_fill: Color::rgba(255, 255, 255, 0.2),
    chart_line: Color::hex(0xffffff),
    font_main: r#""Sawarabi Mincho", serif"#,
    font_sub: r#""Noto Sans JP", sans-serif"#,
    decor: DecorStyle::Double,
};
