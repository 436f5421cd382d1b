use core::fmt::{Display, Formatter};
use core::num::NonZeroU32;
use core::str::FromStr;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::util::hit_location::HitLocation;
use crate::util::stat::StatType;

#[derive(Debug, Error, PartialEq)]
pub enum EventError {
    #[error("Inning must be at least 1, got {0}")]
    InvalidInning(i64),
    #[error("At-bat number must be at least 1, got {0}")]
    InvalidAtBatNumber(i64),
    #[error("Runs batted in cannot be negative, got {0}")]
    NegativeRunsBattedIn(i64),
    #[error("Unknown stat type '{0}'")]
    UnknownStatType(String),
    #[error("The {0} id cannot be empty")]
    EmptyId(&'static str),
    #[error("Hit location {axis} must be within [0, 1], got {value}")]
    CoordinateOutOfRange { axis: &'static str, value: f64 },
    #[error("Grid resolution must be at least 1")]
    ZeroGridResolution,
}

macro_rules! id_type {
    ($name:ident, $kind:literal) => {
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Result<Self, EventError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(EventError::EmptyId($kind));
                }
                Ok(Self(id))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(EventId, "event");
id_type!(GameId, "game");
id_type!(PlayerId, "player");

#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    id: EventId,
    game_id: GameId,
    player_id: PlayerId,
    inning: Option<NonZeroU32>,
    at_bat_number: Option<NonZeroU32>,
    timestamp: DateTime<Utc>,
    outcome: Option<String>,
    runs_batted_in: Option<u32>,
    stat_type: StatType,
    hit_location: Option<HitLocation>,
}

pub struct EventBuilder {
    id: EventId,
    game_id: GameId,
    player_id: PlayerId,
    stat_type: StatType,
    timestamp: DateTime<Utc>,
    inning: Option<i64>,
    at_bat_number: Option<i64>,
    outcome: Option<String>,
    runs_batted_in: Option<i64>,
    hit_location: Option<HitLocation>,
}

impl EventBuilder {
    pub fn inning(mut self, inning: i64) -> Self {
        self.inning = Some(inning);
        self
    }

    pub fn at_bat_number(mut self, at_bat_number: i64) -> Self {
        self.at_bat_number = Some(at_bat_number);
        self
    }

    pub fn outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = Some(outcome.into());
        self
    }

    pub fn runs_batted_in(mut self, runs_batted_in: i64) -> Self {
        self.runs_batted_in = Some(runs_batted_in);
        self
    }

    pub fn hit_location(mut self, hit_location: HitLocation) -> Self {
        self.hit_location = Some(hit_location);
        self
    }

    pub fn build(self) -> Result<Event, EventError> {
        let inning = self.inning
            .map(|n| u32::try_from(n).ok().and_then(NonZeroU32::new).ok_or(EventError::InvalidInning(n)))
            .transpose()?;
        let at_bat_number = self.at_bat_number
            .map(|n| u32::try_from(n).ok().and_then(NonZeroU32::new).ok_or(EventError::InvalidAtBatNumber(n)))
            .transpose()?;
        let runs_batted_in = self.runs_batted_in
            .map(|n| u32::try_from(n).map_err(|_| EventError::NegativeRunsBattedIn(n)))
            .transpose()?;
        Ok(Event {
            id: self.id,
            game_id: self.game_id,
            player_id: self.player_id,
            inning,
            at_bat_number,
            timestamp: self.timestamp,
            outcome: self.outcome.filter(|outcome| !outcome.trim().is_empty()),
            runs_batted_in,
            stat_type: self.stat_type,
            hit_location: self.hit_location,
        })
    }
}

impl Event {
    pub fn builder(id: EventId, game_id: GameId, player_id: PlayerId, stat_type: StatType, timestamp: DateTime<Utc>) -> EventBuilder {
        EventBuilder {
            id,
            game_id,
            player_id,
            stat_type,
            timestamp,
            inning: None,
            at_bat_number: None,
            outcome: None,
            runs_batted_in: None,
            hit_location: None,
        }
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let id = EventId::new(value["id"].as_str().context("Could not get stat's id")?)?;
        let game_id = GameId::new(value["gameId"].as_str().with_context(|| format!("Could not get game id of stat {id}"))?)?;
        let player_id = PlayerId::new(value["playerId"].as_str().with_context(|| format!("Could not get player id of stat {id}"))?)?;
        let stat_type = value["type"]
            .as_str()
            .with_context(|| format!("Could not get type of stat {id}"))?
            .parse::<StatType>()?;
        let timestamp = parse_timestamp(&value["timestamp"]).with_context(|| format!("Could not get timestamp of stat {id}"))?;

        let mut builder = Event::builder(id, game_id, player_id, stat_type, timestamp);
        if let Some(inning) = optional_i64(&value["inning"]).context("Inning was not an integer")? {
            builder = builder.inning(inning);
        }
        if let Some(at_bat_number) = optional_i64(&value["atBatNumber"]).context("At-bat number was not an integer")? {
            builder = builder.at_bat_number(at_bat_number);
        }
        if let Some(runs_batted_in) = optional_i64(&value["runsBattedIn"]).context("Runs batted in was not an integer")? {
            builder = builder.runs_batted_in(runs_batted_in);
        }
        if let Some(outcome) = value["outcome"].as_str() {
            builder = builder.outcome(outcome);
        }
        if !value["hitLocation"].is_null() {
            builder = builder.hit_location(HitLocation::from_value(&value["hitLocation"])?);
        }
        Ok(builder.build()?)
    }

    pub fn id(&self) -> &EventId {
        &self.id
    }

    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    pub fn inning(&self) -> Option<NonZeroU32> {
        self.inning
    }

    pub fn at_bat_number(&self) -> Option<NonZeroU32> {
        self.at_bat_number
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn outcome(&self) -> Option<&str> {
        self.outcome.as_deref()
    }

    pub fn runs_batted_in(&self) -> Option<u32> {
        self.runs_batted_in
    }

    pub fn stat_type(&self) -> StatType {
        self.stat_type
    }

    pub fn hit_location(&self) -> Option<&HitLocation> {
        self.hit_location.as_ref()
    }

    /// The recorded outcome text, or one derived from the type and RBI count.
    pub fn description(&self) -> String {
        match &self.outcome {
            Some(outcome) => outcome.clone(),
            None => self.stat_type.describe(self.runs_batted_in.unwrap_or(0)),
        }
    }
}

fn optional_i64(value: &Value) -> Result<Option<i64>> {
    if value.is_null() {
        Ok(None)
    } else {
        value.as_i64().map(Some).context("Expected an integer")
    }
}

fn parse_timestamp(value: &Value) -> Result<DateTime<Utc>> {
    if let Some(s) = value.as_str() {
        return Ok(DateTime::<Utc>::from_str(s)?);
    }
    let seconds = value.as_f64().context("Timestamp was neither a string nor a number")?;
    let whole = seconds.floor();
    DateTime::<Utc>::from_timestamp(whole as i64, ((seconds - whole) * 1e9) as u32).context("Timestamp was out of range")
}

/// Orders a player's events for display: by at-bat number when every event has one, otherwise by timestamp.
pub fn sort_for_log(events: &mut [&Event]) {
    if events.iter().all(|event| event.at_bat_number.is_some()) {
        events.sort_by_key(|event| event.at_bat_number);
    } else {
        events.sort_by_key(|event| event.timestamp);
    }
}
