use crossterm::style::{Color as CrosstermColor, Stylize};
use ratatui::style::{Color as RatatuiColor, Modifier, Style as RatatuiStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub primary: ColorPair,
    pub accent: ColorPair,

    // calendar cells
    pub selected: ColorPair,
    pub in_range: ColorPair,
    pub today: ColorPair,
    pub cursor: ColorPair,
    pub unavailable: ColorPair,
    pub weekend: ColorPair,

    pub border: ColorPair,
    pub header: ColorPair,
    pub dimmed: ColorPair,

    // money
    pub price: ColorPair,
    pub discount: ColorPair,

    pub help_text: ColorPair,
    pub error_text: ColorPair,
}

#[derive(Debug, Clone)]
pub struct ColorPair {
    pub fg: CrosstermColor,
    pub bg: Option<CrosstermColor>,
}

impl ColorPair {
    pub fn new(fg: CrosstermColor) -> Self {
        Self { fg, bg: None }
    }

    pub fn with_bg(fg: CrosstermColor, bg: CrosstermColor) -> Self {
        Self { fg, bg: Some(bg) }
    }

    pub fn to_ratatui(&self) -> RatatuiStyle {
        let mut style = RatatuiStyle::default().fg(crossterm_to_ratatui(self.fg));
        if let Some(bg) = self.bg {
            style = style.bg(crossterm_to_ratatui(bg));
        }
        style
    }

    pub fn to_ratatui_with_modifier(&self, modifier: Modifier) -> RatatuiStyle {
        self.to_ratatui().add_modifier(modifier)
    }

    /// Colored text for plain terminal output.
    pub fn colorize(&self, text: &str) -> String {
        let mut styled = text.with(self.fg);
        if let Some(bg) = self.bg {
            styled = styled.on(bg);
        }
        format!("{}", styled)
    }

    pub fn colorize_bold(&self, text: &str) -> String {
        let mut styled = text.with(self.fg).bold();
        if let Some(bg) = self.bg {
            styled = styled.on(bg);
        }
        format!("{}", styled)
    }
}

pub fn crossterm_to_ratatui(color: CrosstermColor) -> RatatuiColor {
    match color {
        CrosstermColor::Black => RatatuiColor::Black,
        CrosstermColor::DarkRed => RatatuiColor::Red,
        CrosstermColor::DarkGreen => RatatuiColor::Green,
        CrosstermColor::DarkYellow => RatatuiColor::Yellow,
        CrosstermColor::DarkBlue => RatatuiColor::Blue,
        CrosstermColor::DarkMagenta => RatatuiColor::Magenta,
        CrosstermColor::DarkCyan => RatatuiColor::Cyan,
        CrosstermColor::Grey => RatatuiColor::Gray,
        CrosstermColor::DarkGrey => RatatuiColor::DarkGray,
        CrosstermColor::Red => RatatuiColor::LightRed,
        CrosstermColor::Green => RatatuiColor::LightGreen,
        CrosstermColor::Yellow => RatatuiColor::LightYellow,
        CrosstermColor::Blue => RatatuiColor::LightBlue,
        CrosstermColor::Magenta => RatatuiColor::LightMagenta,
        CrosstermColor::Cyan => RatatuiColor::LightCyan,
        CrosstermColor::White => RatatuiColor::White,
        CrosstermColor::Rgb { r, g, b } => RatatuiColor::Rgb(r, g, b),
        CrosstermColor::AnsiValue(v) => RatatuiColor::Indexed(v),
        _ => RatatuiColor::White,
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            colors: ThemeColors {
                primary: ColorPair::new(CrosstermColor::White),
                accent: ColorPair::new(CrosstermColor::Cyan),

                selected: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Cyan),
                in_range: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::Rgb { r: 0, g: 64, b: 80 }),
                today: ColorPair::new(CrosstermColor::Yellow),
                cursor: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::Rgb { r: 60, g: 60, b: 60 }),
                unavailable: ColorPair::new(CrosstermColor::DarkGrey),
                weekend: ColorPair::new(CrosstermColor::Rgb { r: 150, g: 150, b: 150 }),

                border: ColorPair::new(CrosstermColor::DarkCyan),
                header: ColorPair::new(CrosstermColor::DarkCyan),
                dimmed: ColorPair::new(CrosstermColor::DarkGrey),

                price: ColorPair::new(CrosstermColor::White),
                discount: ColorPair::new(CrosstermColor::Green),

                help_text: ColorPair::new(CrosstermColor::DarkCyan),
                error_text: ColorPair::new(CrosstermColor::Red),
            },
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            colors: ThemeColors {
                primary: ColorPair::new(CrosstermColor::Black),
                accent: ColorPair::new(CrosstermColor::DarkBlue),

                selected: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkBlue),
                in_range: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Rgb { r: 210, g: 225, b: 245 }),
                today: ColorPair::new(CrosstermColor::DarkYellow),
                cursor: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Rgb { r: 230, g: 230, b: 230 }),
                unavailable: ColorPair::new(CrosstermColor::Grey),
                weekend: ColorPair::new(CrosstermColor::DarkGrey),

                border: ColorPair::new(CrosstermColor::DarkBlue),
                header: ColorPair::new(CrosstermColor::DarkBlue),
                dimmed: ColorPair::new(CrosstermColor::Grey),

                price: ColorPair::new(CrosstermColor::Black),
                discount: ColorPair::new(CrosstermColor::DarkGreen),

                help_text: ColorPair::new(CrosstermColor::DarkBlue),
                error_text: ColorPair::new(CrosstermColor::DarkRed),
            },
        }
    }

    pub fn minimal() -> Self {
        Self {
            name: "Minimal".to_string(),
            colors: ThemeColors {
                primary: ColorPair::new(CrosstermColor::White),
                accent: ColorPair::new(CrosstermColor::White),

                selected: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::White),
                in_range: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::Rgb { r: 28, g: 28, b: 28 }),
                today: ColorPair::new(CrosstermColor::White),
                cursor: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::Rgb { r: 50, g: 50, b: 50 }),
                unavailable: ColorPair::new(CrosstermColor::DarkGrey),
                weekend: ColorPair::new(CrosstermColor::Grey),

                border: ColorPair::new(CrosstermColor::White),
                header: ColorPair::new(CrosstermColor::White),
                dimmed: ColorPair::new(CrosstermColor::DarkGrey),

                price: ColorPair::new(CrosstermColor::White),
                discount: ColorPair::new(CrosstermColor::White),

                help_text: ColorPair::new(CrosstermColor::Grey),
                error_text: ColorPair::new(CrosstermColor::White),
            },
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "minimal" => Self::minimal(),
            _ => Self::dark(),
        }
    }

    pub fn available_themes() -> Vec<String> {
        vec!["dark".to_string(), "light".to_string(), "minimal".to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_fall_back_to_dark() {
        assert_eq!(Theme::by_name("LIGHT").name, "Light");
        assert_eq!(Theme::by_name("solarized").name, "Dark");
        assert_eq!(Theme::available_themes().len(), 3);
    }

    #[test]
    fn color_pairs_convert_to_ratatui() {
        let pair = ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Cyan);
        let style = pair.to_ratatui();
        assert_eq!(style.fg, Some(RatatuiColor::Black));
        assert_eq!(style.bg, Some(RatatuiColor::LightCyan));
    }
}
