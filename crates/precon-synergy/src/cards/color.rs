use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One of the five Magic colors. Colorless is the absence of all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl Color {
    /// WUBRG order, used for every rendering of an identity.
    pub const ALL: [Color; 5] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    pub const fn symbol(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Color::White => 1 << 0,
            Color::Blue => 1 << 1,
            Color::Black => 1 << 2,
            Color::Red => 1 << 3,
            Color::Green => 1 << 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color symbol '{0}'")]
pub struct ColorParseError(pub String);

/// Token accepted while parsing an identity: a real color or the colorless marker `C`.
enum ColorToken {
    Color(Color),
    Colorless,
}

fn parse_token(raw: &str) -> Result<ColorToken, ColorParseError> {
    let token = match raw.trim().to_ascii_lowercase().as_str() {
        "w" | "white" => ColorToken::Color(Color::White),
        "u" | "blue" => ColorToken::Color(Color::Blue),
        "b" | "black" => ColorToken::Color(Color::Black),
        "r" | "red" => ColorToken::Color(Color::Red),
        "g" | "green" => ColorToken::Color(Color::Green),
        "c" | "colorless" => ColorToken::Colorless,
        _ => return Err(ColorParseError(raw.to_string())),
    };
    Ok(token)
}

/// Set of colors a card or template is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorIdentity(u8);

impl ColorIdentity {
    pub const COLORLESS: Self = Self(0);

    pub fn from_colors<I: IntoIterator<Item = Color>>(colors: I) -> Self {
        colors
            .into_iter()
            .fold(Self::COLORLESS, |identity, color| identity.with(color))
    }

    /// Parse symbol or color-name entries; `C` is accepted and contributes nothing.
    pub fn from_symbols<I, S>(symbols: I) -> Result<Self, ColorParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut identity = Self::COLORLESS;
        for symbol in symbols {
            if let ColorToken::Color(color) = parse_token(symbol.as_ref())? {
                identity = identity.with(color);
            }
        }
        Ok(identity)
    }

    pub const fn with(self, color: Color) -> Self {
        Self(self.0 | color.bit())
    }

    pub const fn contains(self, color: Color) -> bool {
        self.0 & color.bit() != 0
    }

    pub const fn is_colorless(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_subset_of(self, other: ColorIdentity) -> bool {
        self.0 & other.0 == self.0
    }

    pub fn colors(self) -> impl Iterator<Item = Color> {
        Color::ALL
            .into_iter()
            .filter(move |color| self.contains(*color))
    }

    /// Compact symbol string (`WU`), or `C` for colorless.
    pub fn symbols(self) -> String {
        if self.is_colorless() {
            return "C".to_string();
        }
        self.colors().map(Color::symbol).collect()
    }
}

impl fmt::Display for ColorIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_colorless() {
            f.write_str("Colorless")
        } else {
            f.write_str(&self.symbols())
        }
    }
}

impl FromStr for ColorIdentity {
    type Err = ColorParseError;

    /// Accepts `WU`, `W,U`, `w u` or `colorless`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("colorless") || trimmed.is_empty() {
            return Ok(Self::COLORLESS);
        }

        if trimmed.contains(|c: char| c == ',' || c.is_whitespace()) {
            return Self::from_symbols(
                trimmed
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|part| !part.is_empty()),
            );
        }

        Self::from_symbols(trimmed.chars().map(|c| c.to_string()))
    }
}

impl Serialize for ColorIdentity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let symbols: Vec<String> = self.colors().map(|c| c.symbol().to_string()).collect();
        symbols.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ColorIdentity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let symbols = Vec::<String>::deserialize(deserializer)?;
        Self::from_symbols(&symbols).map_err(D::Error::custom)
    }
}
