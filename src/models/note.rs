use diesel::Queryable;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use std::time::SystemTime;

pub const DEFAULT_COLOR: &str = "#FFF59D";

#[derive(Clone, Debug, Queryable, Serialize, PartialEq, Eq)]
pub struct Note {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub color: String,
    pub pos_x: i32,
    pub pos_y: i32,
    pub updated_at: SystemTime,
}

/// A `#rrggbb` color. Anything else collapses to [`DEFAULT_COLOR`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Color(String);

impl Color {
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        static HEX_COLOR: OnceLock<Regex> = OnceLock::new();
        let pattern = HEX_COLOR
            .get_or_init(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("hex color pattern compiles"));

        match raw {
            Some(color) if pattern.is_match(color) => Color(color.to_owned()),
            _ => Color(DEFAULT_COLOR.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Title, body and color of a note as accepted from a form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoteInput {
    pub title: String,
    pub body: String,
    pub color: Color,
}

impl NoteInput {
    pub fn new(title: &str, body: &str, color: Option<&str>) -> Self {
        NoteInput {
            title: title.trim().to_owned(),
            body: body.trim().to_owned(),
            color: Color::parse_or_default(color),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#FFF59D")]
    #[case("#a0b1c2")]
    #[case("#000000")]
    fn hex_colors_are_kept(#[case] raw: &str) {
        assert_eq!(Color::parse_or_default(Some(raw)).as_str(), raw);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("#ZZZZZZ"))]
    #[case(Some("FFF59D"))]
    #[case(Some("#FFF"))]
    #[case(Some("#FFF59D0"))]
    #[case(Some("#FFF59D\n"))]
    #[case(Some("red"))]
    fn invalid_colors_fall_back(#[case] raw: Option<&str>) {
        assert_eq!(Color::parse_or_default(raw).as_str(), DEFAULT_COLOR);
    }

    #[test]
    fn input_is_trimmed_but_keeps_inner_newlines() {
        let input = NoteInput::new("  Milk ", "\n Buy milk\nand eggs \n", Some("#123456"));
        assert_eq!(input.title, "Milk");
        assert_eq!(input.body, "Buy milk\nand eggs");
        assert_eq!(input.color.as_str(), "#123456");
    }
}
