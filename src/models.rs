use chrono::{DateTime, Local};
use ratatui::style::Color;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub avatar_color: AvatarColor,
}

impl Contact {
    pub fn new(name: &str, avatar_color: AvatarColor) -> Self {
        Contact {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            avatar_color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AvatarColor {
    Orange,
    Lavender,
    Blue,
}

impl AvatarColor {
    /// Terminal color used for the avatar dot in the contact list
    pub fn to_color(self) -> Color {
        match self {
            AvatarColor::Orange => Color::Rgb(255, 149, 0),
            AvatarColor::Lavender => Color::Rgb(191, 191, 230),
            AvatarColor::Blue => Color::Rgb(0, 122, 255),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub is_sent_by_me: bool,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(text: &str, is_sent_by_me: bool, timestamp: DateTime<Local>) -> Self {
        Message {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            is_sent_by_me,
            timestamp,
        }
    }
}
