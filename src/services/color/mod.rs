//! Per-table lecture colour assignment.
//!
//! Colours are a derived view of a table's schedule list: each distinct
//! lecture id gets the next palette entry in order of first appearance,
//! wrapping round once the palette is exhausted.

use std::collections::HashMap;

use crate::error::ConfigError;
use crate::models::schedule::Schedule;
use crate::models::settings::GridSettings;

pub const DEFAULT_PALETTE: [&str; 6] = ["#fdd", "#ffd", "#dff", "#ddf", "#fdf", "#dfd"];
pub const FALLBACK_COLOR: &str = "#ddd";

/// Colour in `#RGB` or `#RRGGBB` form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor {
    raw: String,
    rgb: [u8; 3],
}

impl HexColor {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let invalid = || {
            ConfigError::Invalid(format!(
                "colour '{value}' must be in hex format (#RRGGBB or #RGB)"
            ))
        };

        let digits = value.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        let rgb = match digits.len() {
            3 => {
                let mut rgb = [0u8; 3];
                for (slot, c) in rgb.iter_mut().zip(digits.chars()) {
                    let nibble = channel(&c.to_string())?;
                    *slot = nibble * 17;
                }
                rgb
            }
            6 => [
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            ],
            _ => return Err(invalid()),
        };

        Ok(Self {
            raw: value.to_string(),
            rgb,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }
}

/// Finite, ordered set of block colours plus the neutral fallback
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<HexColor>,
    fallback: HexColor,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE, FALLBACK_COLOR)
            .expect("built-in palette is valid")
    }
}

impl Palette {
    pub fn new<I, S>(colors: I, fallback: &str) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let colors = colors
            .into_iter()
            .map(|c| HexColor::parse(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if colors.is_empty() {
            return Err(ConfigError::Invalid("palette must list at least one colour".into()));
        }

        Ok(Self {
            colors,
            fallback: HexColor::parse(fallback)?,
        })
    }

    pub fn from_settings(settings: &GridSettings) -> Result<Self, ConfigError> {
        Self::new(&settings.palette, &settings.fallback_color)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Round-robin lookup
    pub fn color_at(&self, index: usize) -> &HexColor {
        &self.colors[index % self.colors.len()]
    }

    pub fn fallback(&self) -> &HexColor {
        &self.fallback
    }
}

/// Colour of every distinct lecture in one table
#[derive(Debug, Clone)]
pub struct LectureColorMap {
    assigned: HashMap<String, HexColor>,
    fallback: HexColor,
}

impl LectureColorMap {
    pub fn for_schedules(schedules: &[Schedule], palette: &Palette) -> Self {
        let mut assigned: HashMap<String, HexColor> = HashMap::new();

        for schedule in schedules {
            let id = schedule.lecture_id();
            // Blank ids have no identity to colour by
            if id.is_empty() || assigned.contains_key(id) {
                continue;
            }
            let color = palette.color_at(assigned.len()).clone();
            assigned.insert(id.to_string(), color);
        }

        Self {
            assigned,
            fallback: palette.fallback().clone(),
        }
    }

    pub fn color_for(&self, lecture_id: &str) -> &HexColor {
        self.assigned.get(lecture_id).unwrap_or(&self.fallback)
    }

    /// Number of distinct lectures that received a colour
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
