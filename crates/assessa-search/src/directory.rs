//! Organization browser: club, then mini-club or position.

use serde::Deserialize;

use assessa_core::models::club::Club;
use assessa_core::models::position::Position;
use assessa_core::models::refs::UserRef;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryQuery {
    pub club: Option<String>,
    pub mini_club: Option<String>,
    pub position: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// What a directory request asks for, most specific first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectorySelection<'a> {
    Everyone,
    Club(&'a str),
    MiniClub { club: &'a str, mini_club: &'a str },
    Position { club: &'a str, position: &'a str },
}

impl DirectoryQuery {
    /// A mini-club or position without a club is ignored; a mini-club wins
    /// over a position when both are given.
    pub fn selection(&self) -> DirectorySelection<'_> {
        let Some(club) = non_blank(&self.club) else {
            return DirectorySelection::Everyone;
        };
        if let Some(mini_club) = non_blank(&self.mini_club) {
            return DirectorySelection::MiniClub { club, mini_club };
        }
        if let Some(position) = non_blank(&self.position) {
            return DirectorySelection::Position { club, position };
        }
        DirectorySelection::Club(club)
    }
}

/// Members of a mini-club as nested in its club. Unknown names yield none.
pub fn mini_club_members(club: &Club, mini_club: &str) -> Vec<UserRef> {
    club.mini_club
        .iter()
        .find(|m| m.name == mini_club)
        .map(|m| m.user.clone())
        .unwrap_or_default()
}

/// Holders of a position who also belong to the club.
pub fn position_members(club: &Club, position: &Position) -> Vec<UserRef> {
    position
        .user
        .iter()
        .filter(|u| club.user.iter().any(|c| c.name == u.name))
        .cloned()
        .collect()
}
