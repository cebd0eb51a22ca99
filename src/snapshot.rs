//! Membership snapshot supplied by the caller
//!
//! Which game sits in which category is decided elsewhere; a snapshot is the
//! frozen result of that decision for one synchronization cycle.

use serde::{Deserialize, Serialize};

use crate::catalog::GameId;

/// One game and the categories it belongs to
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameMembership {
    pub id: GameId,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub favorite: bool,
}

impl GameMembership {
    pub fn new(id: GameId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn in_category(mut self, name: impl Into<String>) -> Self {
        self.categories.push(name.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn favorite(mut self) -> Self {
        self.favorite = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MembershipSnapshot {
    /// Authoritative category list; every entry gets a collection even when empty
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub games: Vec<GameMembership>,
}

impl MembershipSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, name: impl Into<String>) -> Self {
        self.categories.push(name.into());
        self
    }

    pub fn with_game(mut self, game: GameMembership) -> Self {
        self.games.push(game);
        self
    }

    pub fn hidden_games(&self) -> impl Iterator<Item = GameId> + '_ {
        self.games.iter().filter(|g| g.hidden).map(|g| g.id)
    }

    pub fn favorite_games(&self) -> impl Iterator<Item = GameId> + '_ {
        self.games.iter().filter(|g| g.favorite).map(|g| g.id)
    }
}
