//! Color palette and glyphs for the Virtlab TUI.

use ratatui::style::Color;

use virtlab_engine::UiConfig;
use virtlab_types::Difficulty;

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub panel: Color,
    pub border: Color,
    pub text: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub physics: Color,
    pub chemistry: Color,
    pub biology: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg: Color::Rgb(22, 24, 31),
            panel: Color::Rgb(32, 35, 44),
            border: Color::Rgb(84, 88, 109),
            text: Color::Rgb(219, 221, 230),
            text_muted: Color::Rgb(130, 135, 150),
            accent: Color::Rgb(127, 180, 202),
            success: Color::Rgb(152, 187, 108),
            warning: Color::Rgb(230, 195, 132),
            error: Color::Rgb(255, 93, 98),
            // Subject colors follow the lab branding: physics blue,
            // chemistry orange, biology green.
            physics: Color::Rgb(96, 145, 235),
            chemistry: Color::Rgb(240, 140, 70),
            biology: Color::Rgb(98, 190, 110),
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            panel: Color::Black,
            border: Color::Gray,
            text: Color::White,
            text_muted: Color::Gray,
            accent: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            physics: Color::Blue,
            chemistry: Color::LightRed,
            biology: Color::Green,
        }
    }

    /// Brand color for a subject; unknown subjects fall back to the accent.
    #[must_use]
    pub fn subject(&self, subject: &str) -> Color {
        match subject {
            "physics" => self.physics,
            "chemistry" => self.chemistry,
            "biology" => self.biology,
            _ => self.accent,
        }
    }

    /// Badge color for a difficulty level.
    #[must_use]
    pub fn difficulty(&self, difficulty: Difficulty) -> Color {
        match difficulty {
            Difficulty::Beginner => self.success,
            Difficulty::Intermediate => self.warning,
            Difficulty::Advanced => self.error,
        }
    }
}

#[must_use]
pub fn palette(ui: UiConfig) -> Palette {
    if ui.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

/// Glyph set, with an ASCII fallback for constrained terminals.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub bullet: &'static str,
    pub pointer: &'static str,
    pub step_done: &'static str,
}

impl Glyphs {
    #[must_use]
    pub fn unicode() -> Self {
        Self {
            bullet: "•",
            pointer: "▶",
            step_done: "✓",
        }
    }

    #[must_use]
    pub fn ascii() -> Self {
        Self {
            bullet: "*",
            pointer: ">",
            step_done: "x",
        }
    }
}

#[must_use]
pub fn glyphs(ui: UiConfig) -> Glyphs {
    if ui.ascii_only {
        Glyphs::ascii()
    } else {
        Glyphs::unicode()
    }
}
