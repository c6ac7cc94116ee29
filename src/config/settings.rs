//! Editor settings for Slate
//!
//! This module defines the `Settings` struct that holds the editor's
//! presentation options. These are fixed defaults: there is no settings
//! dialog and no configuration file, so every session starts from
//! `Settings::default()`.
//!
//! `AppState::with_settings` runs `sanitize` on whatever it is given, so a
//! caller building settings in code (tests, a future preferences surface)
//! cannot push the editor outside the supported ranges.

// ─────────────────────────────────────────────────────────────────────────────
// Window Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Initial window dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSize {
    /// Window width in logical pixels
    pub width: f32,
    /// Window height in logical pixels
    pub height: f32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// Editor presentation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Font size for the editor panes (in points)
    pub font_size: f32,
    /// Whether long lines wrap to the pane width
    pub word_wrap: bool,
    /// Whether to draw the line number gutter
    pub show_line_numbers: bool,
    /// Whether to syntax highlight tabs with a known language
    pub highlight_syntax: bool,
    /// Initial window dimensions
    pub window_size: WindowSize,
    /// How long toast messages stay visible (seconds)
    pub toast_duration: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            word_wrap: true,
            show_line_numbers: true,
            highlight_syntax: true,
            window_size: WindowSize::default(),
            toast_duration: 3.0,
        }
    }
}

impl Settings {
    /// Minimum allowed font size.
    pub const MIN_FONT_SIZE: f32 = 8.0;
    /// Maximum allowed font size.
    pub const MAX_FONT_SIZE: f32 = 72.0;
    /// Minimum window dimension.
    pub const MIN_WINDOW_SIZE: f32 = 200.0;
    /// Maximum window dimension.
    pub const MAX_WINDOW_SIZE: f32 = 10000.0;

    /// Clamp values to valid ranges.
    pub fn sanitize(&mut self) {
        self.font_size = self
            .font_size
            .clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);

        self.window_size.width = self
            .window_size
            .width
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
        self.window_size.height = self
            .window_size
            .height
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);

        if !self.toast_duration.is_finite() || self.toast_duration <= 0.0 {
            self.toast_duration = 3.0;
        }
    }

    /// Return a sanitized copy of these settings.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.sanitize();
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.font_size, 14.0);
        assert!(settings.word_wrap);
        assert!(settings.show_line_numbers);
        assert!(settings.highlight_syntax);
        assert_eq!(settings.window_size, WindowSize::default());
    }

    #[test]
    fn test_window_size_default() {
        let size = WindowSize::default();
        assert_eq!(size.width, 1200.0);
        assert_eq!(size.height, 800.0);
    }

    #[test]
    fn test_sanitize_font_size() {
        let mut settings = Settings {
            font_size: 2.0,
            ..Settings::default()
        };
        settings.sanitize();
        assert_eq!(settings.font_size, Settings::MIN_FONT_SIZE);

        settings.font_size = 500.0;
        settings.sanitize();
        assert_eq!(settings.font_size, Settings::MAX_FONT_SIZE);
    }

    #[test]
    fn test_sanitize_window_size() {
        let settings = Settings {
            window_size: WindowSize {
                width: 10.0,
                height: 50_000.0,
            },
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(settings.window_size.width, Settings::MIN_WINDOW_SIZE);
        assert_eq!(settings.window_size.height, Settings::MAX_WINDOW_SIZE);
    }

    #[test]
    fn test_sanitize_toast_duration() {
        let settings = Settings {
            toast_duration: f64::NAN,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(settings.toast_duration, 3.0);
    }
}
