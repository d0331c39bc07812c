use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
    HighContrast,
}

/// Colours the renderer draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub muted: Color,
    pub text: Color,
    pub marker: Color,
    pub now: Color,
    pub standout: Color,
    pub selected_fg: Color,
    pub selected_bg: Color,
}

impl Palette {
    pub fn for_theme(theme: ThemeName) -> Self {
        match theme {
            ThemeName::Dark => Self {
                accent: Color::Cyan,
                muted: Color::Gray,
                text: Color::White,
                marker: Color::Magenta,
                now: Color::Red,
                standout: Color::Yellow,
                selected_fg: Color::Black,
                selected_bg: Color::Blue,
            },
            ThemeName::Light => Self {
                accent: Color::Blue,
                muted: Color::DarkGray,
                text: Color::Black,
                marker: Color::Magenta,
                now: Color::Red,
                standout: Color::Rgb(181, 118, 20),
                selected_fg: Color::White,
                selected_bg: Color::Blue,
            },
            ThemeName::HighContrast => Self {
                accent: Color::LightCyan,
                muted: Color::White,
                text: Color::White,
                marker: Color::LightMagenta,
                now: Color::LightRed,
                standout: Color::LightYellow,
                selected_fg: Color::Black,
                selected_bg: Color::White,
            },
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_theme(ThemeName::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_names_use_kebab_case() -> anyhow::Result<()> {
        #[derive(Deserialize)]
        struct Wrapper {
            theme: ThemeName,
        }
        let parsed: Wrapper = toml::from_str("theme = \"high-contrast\"")?;
        assert_eq!(parsed.theme, ThemeName::HighContrast);
        assert!(toml::from_str::<Wrapper>("theme = \"solarized\"").is_err());
        Ok(())
    }

    #[test]
    fn selection_colours_differ_in_every_theme() {
        for theme in [ThemeName::Dark, ThemeName::Light, ThemeName::HighContrast] {
            let palette = Palette::for_theme(theme);
            assert_ne!(palette.selected_fg, palette.selected_bg);
        }
    }
}
