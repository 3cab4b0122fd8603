use crate::detent::DETENT_COUNT;
use crate::error::SegmentError;
use derive_more::{AsRef, Deref, Display, From, Into};
use palette::Srgb;
use std::str::FromStr;

/// Blend factor used for the inner ring tint.
pub const INNER_TINT: f64 = 0.4;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct Label(String);

crate::impl_string_newtype!(Label);

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub outer_label: Label,
    pub inner_label: Label,
    pub color: Srgb<u8>,
}

impl Segment {
    pub fn inner_color(&self) -> Srgb<u8> {
        lighten(self.color, INNER_TINT)
    }
}

/// Blends each channel toward white by `factor`, rounding down.
pub fn lighten(color: Srgb<u8>, factor: f64) -> Srgb<u8> {
    let channel = |c: u8| {
        let c = c as f64;
        (c + (255.0 - c) * factor).floor().clamp(0.0, 255.0) as u8
    };
    Srgb::new(channel(color.red), channel(color.green), channel(color.blue))
}

pub fn parse_color(hex: &str) -> Result<Srgb<u8>, SegmentError> {
    Srgb::from_str(hex.trim()).map_err(|_| SegmentError::BadColor(hex.to_string()))
}

/// The fixed, ordered table of twelve segments drawn around the wheel.
#[derive(Debug, Clone, PartialEq)]
pub struct Segments([Segment; DETENT_COUNT]);

impl Segments {
    /// Builds the table from `(outer, inner, color)` entries; index follows order.
    pub fn try_from_iter<I, L>(entries: I) -> Result<Self, SegmentError>
    where
        I: IntoIterator<Item = (L, L, Srgb<u8>)>,
        L: Into<String>,
    {
        let segments: Vec<Segment> = entries
            .into_iter()
            .enumerate()
            .map(|(index, (outer, inner, color))| Segment {
                index,
                outer_label: Label::new(outer),
                inner_label: Label::new(inner),
                color,
            })
            .collect();

        let count = segments.len();
        segments
            .try_into()
            .map(Self)
            .map_err(|_| SegmentError::WrongCount(count))
    }

    /// Major keys around the outside, relative minors inside.
    pub fn circle_of_fifths() -> Self {
        const TABLE: [(&str, &str, [u8; 3]); DETENT_COUNT] = [
            ("C", "Am", [0xB0, 0x50, 0x50]),
            ("G", "Em", [0xDA, 0xAA, 0x56]),
            ("D", "Bm", [0xE9, 0xD1, 0x86]),
            ("A", "F#m", [0xB9, 0xD3, 0x72]),
            ("E", "C#m", [0x79, 0xB4, 0x73]),
            ("B", "G#m", [0x5A, 0x9A, 0x7F]),
            ("F#", "D#m", [0x6B, 0x9A, 0xC4]),
            ("Db", "Bbm", [0x6B, 0x78, 0xB4]),
            ("Ab", "Fm", [0x32, 0x2F, 0x5C]),
            ("Eb", "Cm", [0x63, 0x4D, 0x80]),
            ("Bb", "Gm", [0x8A, 0x5E, 0x97]),
            ("F", "Dm", [0x9A, 0x4D, 0x88]),
        ];

        Self(std::array::from_fn(|index| {
            let (outer, inner, [r, g, b]) = TABLE[index];
            Segment {
                index,
                outer_label: Label::new(outer),
                inner_label: Label::new(inner),
                color: Srgb::new(r, g, b),
            }
        }))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.0.get(index)
    }
}

impl Default for Segments {
    fn default() -> Self {
        Self::circle_of_fifths()
    }
}

impl<'a> IntoIterator for &'a Segments {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
