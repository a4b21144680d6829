use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let invalid = || Error::InvalidStyle(format!("'{hex}' is not a #RRGGBB[AA] color"));
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(invalid());
        }
        let byte = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).map_err(|_| invalid());

        let a = if digits.len() == 8 { byte(6)? } else { 255 };
        Ok(Color::rgba(byte(0)?, byte(2)?, byte(4)?, a))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashPattern {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
}

impl DashPattern {
    /// On/off lengths for a line of the given width. Empty for solid lines.
    pub fn intervals(&self, width: f32) -> Vec<f32> {
        let unit: &[f32] = match self {
            DashPattern::Solid => &[],
            DashPattern::Dash => &[4.0, 2.0],
            DashPattern::Dot => &[1.0, 2.0],
            DashPattern::DashDot => &[4.0, 2.0, 1.0, 2.0],
            DashPattern::DashDotDot => &[4.0, 2.0, 1.0, 2.0, 1.0, 2.0],
        };
        unit.iter().map(|length| length * width).collect()
    }

    fn name(&self) -> &'static str {
        match self {
            DashPattern::Solid => "solid",
            DashPattern::Dash => "dash",
            DashPattern::Dot => "dot",
            DashPattern::DashDot => "dash-dot",
            DashPattern::DashDotDot => "dash-dot-dot",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "solid" => DashPattern::Solid,
            "dash" => DashPattern::Dash,
            "dot" => DashPattern::Dot,
            "dash-dot" => DashPattern::DashDot,
            "dash-dot-dot" => DashPattern::DashDotDot,
            _ => return None,
        })
    }

    // Pen style codes found in legacy configuration files.
    fn from_code(code: u64) -> Option<Self> {
        Some(match code {
            1 => DashPattern::Solid,
            2 => DashPattern::Dash,
            3 => DashPattern::Dot,
            4 => DashPattern::DashDot,
            5 => DashPattern::DashDotDot,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapStyle {
    Flat,
    Square,
    #[default]
    Round,
}

impl CapStyle {
    fn name(&self) -> &'static str {
        match self {
            CapStyle::Flat => "flat",
            CapStyle::Square => "square",
            CapStyle::Round => "round",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "flat" => CapStyle::Flat,
            "square" => CapStyle::Square,
            "round" => CapStyle::Round,
            _ => return None,
        })
    }

    fn from_code(code: u64) -> Option<Self> {
        Some(match code {
            0x00 => CapStyle::Flat,
            0x10 => CapStyle::Square,
            0x20 => CapStyle::Round,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinStyle {
    Miter,
    Bevel,
    #[default]
    Round,
}

impl JoinStyle {
    fn name(&self) -> &'static str {
        match self {
            JoinStyle::Miter => "miter",
            JoinStyle::Bevel => "bevel",
            JoinStyle::Round => "round",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "miter" => JoinStyle::Miter,
            "bevel" => JoinStyle::Bevel,
            "round" => JoinStyle::Round,
            _ => return None,
        })
    }

    fn from_code(code: u64) -> Option<Self> {
        Some(match code {
            0x00 | 0x100 => JoinStyle::Miter,
            0x40 => JoinStyle::Bevel,
            0x80 => JoinStyle::Round,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrokeEntry {
    pub color: Color,
    pub width: f32,
    pub dash: DashPattern,
    pub cap: CapStyle,
    pub join: JoinStyle,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FillEntry {
    pub color: Color,
    pub enabled: bool,
}

/// How features mapped to one style key are painted.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleEntry {
    Stroke(StrokeEntry),
    Fill(FillEntry),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    Stroke,
    Fill,
}

impl StyleEntry {
    pub fn kind(&self) -> StyleKind {
        match self {
            StyleEntry::Stroke(_) => StyleKind::Stroke,
            StyleEntry::Fill(_) => StyleKind::Fill,
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            StyleEntry::Stroke(stroke) => stroke.enabled,
            StyleEntry::Fill(fill) => fill.enabled,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            StyleEntry::Stroke(stroke) => stroke.color,
            StyleEntry::Fill(fill) => fill.color,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        match &mut self {
            StyleEntry::Stroke(stroke) => stroke.enabled = enabled,
            StyleEntry::Fill(fill) => fill.enabled = enabled,
        }
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        match &mut self {
            StyleEntry::Stroke(stroke) => stroke.color = color,
            StyleEntry::Fill(fill) => fill.color = color,
        }
        self
    }

    /// Fails for fills, which have no width.
    pub fn with_width(self, width: f32) -> Result<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(Error::InvalidStyle(format!("width must be positive, got {width}")));
        }
        match self {
            StyleEntry::Stroke(stroke) => Ok(StyleEntry::Stroke(StrokeEntry { width, ..stroke })),
            StyleEntry::Fill(_) => Err(Error::InvalidStyle("fills have no line width".into())),
        }
    }
}

// Persisted as a flat JSON array:
//   ["fill", enabled, r, g, b, a]
//   ["stroke", enabled, r, g, b, a, width, dash, cap, join]
impl Serialize for StyleEntry {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            StyleEntry::Fill(fill) => {
                let mut seq = serializer.serialize_seq(Some(6))?;
                seq.serialize_element("fill")?;
                seq.serialize_element(&fill.enabled)?;
                serialize_color(&mut seq, fill.color)?;
                seq.end()
            }
            StyleEntry::Stroke(stroke) => {
                let mut seq = serializer.serialize_seq(Some(10))?;
                seq.serialize_element("stroke")?;
                seq.serialize_element(&stroke.enabled)?;
                serialize_color(&mut seq, stroke.color)?;
                seq.serialize_element(&stroke.width)?;
                seq.serialize_element(stroke.dash.name())?;
                seq.serialize_element(stroke.cap.name())?;
                seq.serialize_element(stroke.join.name())?;
                seq.end()
            }
        }
    }
}

fn serialize_color<S: SerializeSeq>(
    seq: &mut S,
    color: Color,
) -> std::result::Result<(), S::Error> {
    seq.serialize_element(&color.r)?;
    seq.serialize_element(&color.g)?;
    seq.serialize_element(&color.b)?;
    seq.serialize_element(&color.a)
}

struct StyleEntryVisitor;

impl<'de> Visitor<'de> for StyleEntryVisitor {
    type Value = StyleEntry;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a [kind, enabled, r, g, b, a, ...] style record")
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let kind: String = next(&mut seq, 0, &self)?;
        let enabled: bool = next(&mut seq, 1, &self)?;
        let color = Color::rgba(
            next(&mut seq, 2, &self)?,
            next(&mut seq, 3, &self)?,
            next(&mut seq, 4, &self)?,
            next(&mut seq, 5, &self)?,
        );

        match kind.as_str() {
            "fill" | "QColor" => Ok(StyleEntry::Fill(FillEntry { color, enabled })),
            "stroke" | "QPen" => {
                let width: f32 = next(&mut seq, 6, &self)?;
                let dash: Coded = next(&mut seq, 7, &self)?;
                let cap: Coded = next(&mut seq, 8, &self)?;
                let join: Coded = next(&mut seq, 9, &self)?;
                Ok(StyleEntry::Stroke(StrokeEntry {
                    color,
                    width,
                    dash: dash
                        .decode::<_, A::Error>(DashPattern::from_name, DashPattern::from_code)?,
                    cap: cap.decode::<_, A::Error>(CapStyle::from_name, CapStyle::from_code)?,
                    join: join.decode::<_, A::Error>(JoinStyle::from_name, JoinStyle::from_code)?,
                    enabled,
                }))
            }
            other => Err(de::Error::unknown_variant(other, &["fill", "stroke"])),
        }
    }
}

fn next<'de, A, T>(
    seq: &mut A,
    index: usize,
    visitor: &StyleEntryVisitor,
) -> std::result::Result<T, A::Error>
where
    A: SeqAccess<'de>,
    T: Deserialize<'de>,
{
    seq.next_element()?
        .ok_or_else(|| de::Error::invalid_length(index, visitor))
}

/// A line attribute stored either by name or by its legacy numeric code.
#[derive(Deserialize)]
#[serde(untagged)]
enum Coded {
    Name(String),
    Code(u64),
}

impl Coded {
    fn decode<T, E: de::Error>(
        self,
        by_name: fn(&str) -> Option<T>,
        by_code: fn(u64) -> Option<T>,
    ) -> std::result::Result<T, E> {
        match self {
            Coded::Name(name) => by_name(&name).ok_or_else(|| {
                de::Error::invalid_value(de::Unexpected::Str(&name), &"a line style name")
            }),
            Coded::Code(code) => by_code(code).ok_or_else(|| {
                de::Error::invalid_value(de::Unexpected::Unsigned(code), &"a line style code")
            }),
        }
    }
}

impl<'de> Deserialize<'de> for StyleEntry {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(StyleEntryVisitor)
    }
}
