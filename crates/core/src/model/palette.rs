use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::color::Rgb;
use crate::model::step::{DEFAULT_STEPS, Step, StepError, StepSequence};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown palette: {name} (expected one of midnight, dawn, forest, ocean)")]
pub struct UnknownPalette {
    pub name: String,
}

/// Named look for the exercise screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Palette {
    #[default]
    Midnight,
    Dawn,
    Forest,
    Ocean,
}

struct PaletteSpec {
    step_colors: [Rgb; 5],
    emoji: Option<[&'static str; 5]>,
    accent: Rgb,
    text: Rgb,
}

const SENSE_EMOJI: [&str; 5] = ["👀", "✋", "👂", "👃", "👅"];

impl Palette {
    pub const ALL: [Palette; 4] = [
        Palette::Midnight,
        Palette::Dawn,
        Palette::Forest,
        Palette::Ocean,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Palette::Midnight => "midnight",
            Palette::Dawn => "dawn",
            Palette::Forest => "forest",
            Palette::Ocean => "ocean",
        }
    }

    /// Case-insensitive lookup by name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPalette` for names outside [`Palette::ALL`].
    pub fn from_name(name: &str) -> Result<Self, UnknownPalette> {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|palette| palette.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownPalette {
                name: name.to_string(),
            })
    }

    fn spec(self) -> PaletteSpec {
        match self {
            Palette::Midnight => PaletteSpec {
                step_colors: [
                    Rgb::new(0x11, 0x11, 0x11),
                    Rgb::new(0x1a, 0x1f, 0x2e),
                    Rgb::new(0x22, 0x1a, 0x2e),
                    Rgb::new(0x2e, 0x1f, 0x1a),
                    Rgb::new(0x1a, 0x2e, 0x24),
                ],
                emoji: None,
                accent: Rgb::new(0x4a, 0xde, 0x80),
                text: Rgb::new(0xff, 0xff, 0xff),
            },
            Palette::Dawn => PaletteSpec {
                step_colors: [
                    Rgb::new(0xff, 0xd6, 0xa5),
                    Rgb::new(0xfd, 0xff, 0xb6),
                    Rgb::new(0xca, 0xff, 0xbf),
                    Rgb::new(0x9b, 0xf6, 0xff),
                    Rgb::new(0xbd, 0xb2, 0xff),
                ],
                emoji: Some(SENSE_EMOJI),
                accent: Rgb::new(0xf9, 0x73, 0x16),
                text: Rgb::new(0x1f, 0x29, 0x37),
            },
            Palette::Forest => PaletteSpec {
                step_colors: [
                    Rgb::new(0x1b, 0x43, 0x32),
                    Rgb::new(0x2d, 0x6a, 0x4f),
                    Rgb::new(0x40, 0x91, 0x6c),
                    Rgb::new(0x52, 0xb7, 0x88),
                    Rgb::new(0x74, 0xc6, 0x9d),
                ],
                emoji: Some(["🌿", "🪵", "🐦", "🌸", "🍃"]),
                accent: Rgb::new(0xd8, 0xf3, 0xdc),
                text: Rgb::new(0xf1, 0xfa, 0xee),
            },
            Palette::Ocean => PaletteSpec {
                step_colors: [
                    Rgb::new(0x03, 0x04, 0x5e),
                    Rgb::new(0x02, 0x3e, 0x8a),
                    Rgb::new(0x00, 0x77, 0xb6),
                    Rgb::new(0x00, 0x96, 0xc7),
                    Rgb::new(0x00, 0xb4, 0xd8),
                ],
                emoji: Some(SENSE_EMOJI),
                accent: Rgb::new(0xca, 0xf0, 0xf8),
                text: Rgb::new(0xff, 0xff, 0xff),
            },
        }
    }

    /// Progress bar fill and number color.
    #[must_use]
    pub fn accent(self) -> Rgb {
        self.spec().accent
    }

    #[must_use]
    pub fn text(self) -> Rgb {
        self.spec().text
    }

    /// Color for step `index`, cycling when a custom sequence is longer than the palette.
    #[must_use]
    pub fn step_color(self, index: usize) -> Rgb {
        let colors = self.spec().step_colors;
        colors[index % colors.len()]
    }

    #[must_use]
    pub fn step_emoji(self, index: usize) -> Option<&'static str> {
        self.spec().emoji.map(|set| set[index % set.len()])
    }

    /// The classic 5-4-3-2-1 sequence in this palette.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in table is invalid.
    pub fn default_steps(self) -> Result<StepSequence, StepError> {
        let steps = DEFAULT_STEPS
            .iter()
            .enumerate()
            .map(|(index, (count, label))| {
                Step::new(
                    *count,
                    *label,
                    self.step_color(index),
                    self.step_emoji(index).map(str::to_string),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        StepSequence::new(steps)
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Palette {
    type Err = UnknownPalette;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
