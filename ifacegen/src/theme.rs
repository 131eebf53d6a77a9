use colored::Color;
use ifacegen_build::GenerationStatus;
use once_cell::sync::Lazy;

/// Colors of status lines, help text and the `--verbose` key/value dump.
pub struct ColorTheme {
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
    pub highlight: Color,
    pub muted: Color,
    pub primary: Color,
    pub secondary: Color,
    pub key: Color,
    pub value: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Blue,
            highlight: Color::Cyan,
            muted: Color::BrightBlack,
            primary: Color::BrightBlue,
            secondary: Color::Magenta,
            key: Color::BrightCyan,
            value: Color::White,
        }
    }
}

impl ColorTheme {
    /// Glyph and color of the line announcing a generation outcome.
    pub fn for_status(&self, status: GenerationStatus) -> (&'static str, Color) {
        match status {
            GenerationStatus::Written => (ICONS.success, self.success),
            GenerationStatus::Unchanged => (ICONS.info, self.info),
            GenerationStatus::Stale => (ICONS.warning, self.warning),
        }
    }
}

pub static THEME: Lazy<ColorTheme> = Lazy::new(ColorTheme::default);

/// Leading glyphs; printed unchanged under `--no-color`.
pub struct Icons {
    pub success: &'static str,
    pub error: &'static str,
    pub warning: &'static str,
    pub info: &'static str,
    pub arrow: &'static str,
}

pub const ICONS: Icons = Icons {
    success: "✓",
    error: "✗",
    warning: "⚠",
    info: "ℹ",
    arrow: "→",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_is_styled_as_warning() {
        let (icon, color) = THEME.for_status(GenerationStatus::Stale);
        assert_eq!(icon, ICONS.warning);
        assert_eq!(color, THEME.warning);
    }

    #[test]
    fn test_each_status_has_its_own_glyph() {
        let written = THEME.for_status(GenerationStatus::Written).0;
        let unchanged = THEME.for_status(GenerationStatus::Unchanged).0;
        let stale = THEME.for_status(GenerationStatus::Stale).0;
        assert_ne!(written, unchanged);
        assert_ne!(unchanged, stale);
        assert_ne!(written, stale);
    }
}
