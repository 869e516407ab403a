use std::{fmt::Display, str::FromStr};

use anyhow::{anyhow, bail};

/// 24 bit RGB color used for the bar segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Channels widened to 16 bits, as X11 expects them.
    pub fn to_rgb_u16(self) -> (u16, u16, u16) {
        let widen = |v: u8| u16::from(v) * 257;
        (widen(self.red), widen(self.green), widen(self.blue))
    }

    fn from_hex(digits: &str) -> Option<Color> {
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            3 => {
                let mut channels = digits
                    .chars()
                    .map(|c| c.to_digit(16).map(|v| (v * 17) as u8));
                Some(Color::rgb(
                    channels.next()??,
                    channels.next()??,
                    channels.next()??,
                ))
            }
            6 => {
                let channel = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).ok();
                Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
            }
            _ => None,
        }
    }
}

/// Names accepted in the configuration file. Values follow the Tk/web palette, so `gray` and
/// `green` are the darker web variants.
const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::rgb(0x00, 0x00, 0x00)),
    ("white", Color::rgb(0xff, 0xff, 0xff)),
    ("red", Color::rgb(0xff, 0x00, 0x00)),
    ("lime", Color::rgb(0x00, 0xff, 0x00)),
    ("green", Color::rgb(0x00, 0x80, 0x00)),
    ("blue", Color::rgb(0x00, 0x00, 0xff)),
    ("yellow", Color::rgb(0xff, 0xff, 0x00)),
    ("cyan", Color::rgb(0x00, 0xff, 0xff)),
    ("aqua", Color::rgb(0x00, 0xff, 0xff)),
    ("magenta", Color::rgb(0xff, 0x00, 0xff)),
    ("fuchsia", Color::rgb(0xff, 0x00, 0xff)),
    ("gray", Color::rgb(0x80, 0x80, 0x80)),
    ("grey", Color::rgb(0x80, 0x80, 0x80)),
    ("silver", Color::rgb(0xc0, 0xc0, 0xc0)),
    ("lightgray", Color::rgb(0xd3, 0xd3, 0xd3)),
    ("lightgrey", Color::rgb(0xd3, 0xd3, 0xd3)),
    ("darkgray", Color::rgb(0xa9, 0xa9, 0xa9)),
    ("darkgrey", Color::rgb(0xa9, 0xa9, 0xa9)),
    ("dimgray", Color::rgb(0x69, 0x69, 0x69)),
    ("slategray", Color::rgb(0x70, 0x80, 0x90)),
    ("gainsboro", Color::rgb(0xdc, 0xdc, 0xdc)),
    ("whitesmoke", Color::rgb(0xf5, 0xf5, 0xf5)),
    ("maroon", Color::rgb(0x80, 0x00, 0x00)),
    ("purple", Color::rgb(0x80, 0x00, 0x80)),
    ("olive", Color::rgb(0x80, 0x80, 0x00)),
    ("navy", Color::rgb(0x00, 0x00, 0x80)),
    ("teal", Color::rgb(0x00, 0x80, 0x80)),
    ("orange", Color::rgb(0xff, 0xa5, 0x00)),
    ("orangered", Color::rgb(0xff, 0x45, 0x00)),
    ("gold", Color::rgb(0xff, 0xd7, 0x00)),
    ("pink", Color::rgb(0xff, 0xc0, 0xcb)),
    ("brown", Color::rgb(0xa5, 0x2a, 0x2a)),
    ("chocolate", Color::rgb(0xd2, 0x69, 0x1e)),
    ("crimson", Color::rgb(0xdc, 0x14, 0x3c)),
    ("tomato", Color::rgb(0xff, 0x63, 0x47)),
    ("coral", Color::rgb(0xff, 0x7f, 0x50)),
    ("salmon", Color::rgb(0xfa, 0x80, 0x72)),
    ("khaki", Color::rgb(0xf0, 0xe6, 0x8c)),
    ("darkgreen", Color::rgb(0x00, 0x64, 0x00)),
    ("forestgreen", Color::rgb(0x22, 0x8b, 0x22)),
    ("limegreen", Color::rgb(0x32, 0xcd, 0x32)),
    ("seagreen", Color::rgb(0x2e, 0x8b, 0x57)),
    ("springgreen", Color::rgb(0x00, 0xff, 0x7f)),
    ("dodgerblue", Color::rgb(0x1e, 0x90, 0xff)),
    ("royalblue", Color::rgb(0x41, 0x69, 0xe1)),
    ("steelblue", Color::rgb(0x46, 0x82, 0xb4)),
    ("skyblue", Color::rgb(0x87, 0xce, 0xeb)),
    ("indigo", Color::rgb(0x4b, 0x00, 0x82)),
    ("violet", Color::rgb(0xee, 0x82, 0xee)),
];

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(digits) = s.strip_prefix('#') {
            return Color::from_hex(digits)
                .ok_or_else(|| anyhow!("Can't parse {s:?} as a #rgb or #rrggbb color"));
        }

        // Tk and X11 accept "light gray" and "LightGray" for the same color.
        let name = s.replace(' ', "").to_ascii_lowercase();
        if name.is_empty() {
            bail!("Color can't be empty");
        }
        NAMED_COLORS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, color)| *color)
            .ok_or_else(|| anyhow!("Unknown color name {s:?}"))
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}
