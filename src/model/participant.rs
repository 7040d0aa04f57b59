use serde::{Deserialize, Serialize};

use super::group::Group;
use super::ids::Id;

/// Avatar palette. A participant gets the slot matching their roster position
/// when they join, so colors stay stable across reloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvatarColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Pink,
}

impl AvatarColor {
    pub const PALETTE: &'static [AvatarColor] = &[
        AvatarColor::Red,
        AvatarColor::Blue,
        AvatarColor::Green,
        AvatarColor::Yellow,
        AvatarColor::Purple,
        AvatarColor::Pink,
    ];

    /// Palette slot for the participant joining at `position` (0-based).
    pub fn for_position(position: usize) -> Self {
        Self::PALETTE[position % Self::PALETTE.len()]
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "red" => Some(AvatarColor::Red),
            "blue" => Some(AvatarColor::Blue),
            "green" => Some(AvatarColor::Green),
            "yellow" => Some(AvatarColor::Yellow),
            "purple" => Some(AvatarColor::Purple),
            "pink" => Some(AvatarColor::Pink),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            AvatarColor::Red => "red",
            AvatarColor::Blue => "blue",
            AvatarColor::Green => "green",
            AvatarColor::Yellow => "yellow",
            AvatarColor::Purple => "purple",
            AvatarColor::Pink => "pink",
        }
    }
}

/// A member of a group. `secret_friend_*` are filled in from the draw results
/// when the group is loaded; they are never stored on the participant row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: Id<Participant>,
    pub group_id: Id<Group>,
    pub name: String,
    pub phone: String,
    pub avatar_color: Option<AvatarColor>,
    pub secret_friend_id: Option<Id<Participant>>,
    pub secret_friend_name: Option<String>,
}

impl Participant {
    pub fn create(group_id: Id<Group>, name: String, phone: String) -> Self {
        Self {
            id: Id::generate(),
            group_id,
            name,
            phone,
            avatar_color: None,
            secret_friend_id: None,
            secret_friend_name: None,
        }
    }

    pub fn has_secret_friend(&self) -> bool {
        self.secret_friend_id.is_some()
    }

    /// First letter of the name, upper-cased, for avatar badges.
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('?')
    }
}
