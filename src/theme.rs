use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

/// Styles for each element of a calendar
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CalendarTheme {
    /// Weekday names
    pub header: Style,
    /// Page titles ("March 2024")
    pub title: Style,
    pub rule: Style,
    pub day: Style,
    /// Days shown on a month page that belong to a neighbouring month
    pub outside: Style,
    pub disabled: Style,
    pub today: Style,
    pub selected: Style,
    pub marked: Style,
    pub dot: Style,
    pub cursor: Style,
    pub placeholder: Style,
}

impl CalendarTheme {
    pub const DEFAULT: CalendarTheme = CalendarTheme {
        header: Style::new().add_modifier(Modifier::BOLD),
        title: Style::new().add_modifier(Modifier::BOLD),
        rule: Style::new(),
        day: Style::new(),
        outside: Style::new().fg(Color::DarkGray),
        disabled: Style::new()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT),
        today: Style::new().add_modifier(Modifier::BOLD),
        selected: Style::new().fg(Color::Black).bg(Color::LightBlue),
        marked: Style::new(),
        dot: Style::new().fg(Color::LightYellow),
        cursor: Style::new().add_modifier(Modifier::UNDERLINED),
        placeholder: Style::new()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    };
}

impl Default for CalendarTheme {
    fn default() -> CalendarTheme {
        CalendarTheme::DEFAULT
    }
}

/// A style as written in a configuration file
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StyleSpec {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underlined: bool,
    pub reversed: bool,
}

impl From<StyleSpec> for Style {
    fn from(spec: StyleSpec) -> Style {
        let mut style = Style::new();
        if let Some(fg) = spec.fg {
            style = style.fg(fg);
        }
        if let Some(bg) = spec.bg {
            style = style.bg(bg);
        }
        for (on, modifier) in [
            (spec.bold, Modifier::BOLD),
            (spec.dim, Modifier::DIM),
            (spec.italic, Modifier::ITALIC),
            (spec.underlined, Modifier::UNDERLINED),
            (spec.reversed, Modifier::REVERSED),
        ] {
            if on {
                style = style.add_modifier(modifier);
            }
        }
        style
    }
}

/// Per-element overrides layered on top of [`CalendarTheme::DEFAULT`]
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub header: Option<StyleSpec>,
    pub title: Option<StyleSpec>,
    pub rule: Option<StyleSpec>,
    pub day: Option<StyleSpec>,
    pub outside: Option<StyleSpec>,
    pub disabled: Option<StyleSpec>,
    pub today: Option<StyleSpec>,
    pub selected: Option<StyleSpec>,
    pub marked: Option<StyleSpec>,
    pub dot: Option<StyleSpec>,
    pub cursor: Option<StyleSpec>,
    pub placeholder: Option<StyleSpec>,
}

impl ThemeConfig {
    /// Replaces each element of `theme` that this config overrides
    pub fn apply(&self, mut theme: CalendarTheme) -> CalendarTheme {
        for (spec, slot) in [
            (self.header, &mut theme.header),
            (self.title, &mut theme.title),
            (self.rule, &mut theme.rule),
            (self.day, &mut theme.day),
            (self.outside, &mut theme.outside),
            (self.disabled, &mut theme.disabled),
            (self.today, &mut theme.today),
            (self.selected, &mut theme.selected),
            (self.marked, &mut theme.marked),
            (self.dot, &mut theme.dot),
            (self.cursor, &mut theme.cursor),
            (self.placeholder, &mut theme.placeholder),
        ] {
            if let Some(spec) = spec {
                *slot = spec.into();
            }
        }
        theme
    }
}
