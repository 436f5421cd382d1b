use anyhow::{Context, Result};
use fxhash::FxHashMap;
use serde_json::Value;

use crate::util::event::PlayerId;

#[derive(Clone, Debug, Default)]
pub struct Roster {
    names: FxHashMap<PlayerId, String>,
}

impl Roster {
    pub fn from_value(players: &Value) -> Result<Self> {
        let mut roster = Self::default();
        let Some(players) = players.as_array() else { return Ok(roster) };
        for player in players {
            let id = PlayerId::new(player["id"].as_str().context("Could not get player's id")?)?;
            let name = player["name"].as_str().with_context(|| format!("Could not get name of player {id}"))?;
            roster.insert(id, name.to_owned());
        }
        Ok(roster)
    }

    pub fn insert(&mut self, id: PlayerId, name: String) {
        self.names.insert(id, name);
    }

    /// Falls back to the raw id for players missing from the roster.
    pub fn name<'a>(&'a self, id: &'a PlayerId) -> &'a str {
        self.names.get(id).map_or(id.as_str(), String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
