use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::util::event::{Event, GameId, PlayerId};
use crate::util::roster::Roster;

pub trait EventSource {
    fn roster(&self) -> Result<Roster>;

    fn events_for_game(&self, game_id: &GameId) -> Result<Vec<Event>>;

    fn events_for_player_in_game(&self, player_id: &PlayerId, game_id: &GameId) -> Result<Vec<Event>> {
        let mut events = self.events_for_game(game_id)?;
        events.retain(|event| event.player_id() == player_id);
        Ok(events)
    }

    fn events_for_player(&self, player_id: &PlayerId) -> Result<Vec<Event>>;
}

/// Decodes a `{ "players": [...], "stats": [...] }` document.
pub fn parse_document(document: &Value) -> Result<(Roster, Vec<Event>)> {
    let roster = Roster::from_value(&document["players"])?;
    let stats = document["stats"].as_array().context("Document didn't have a list of stats")?;
    let events = stats
        .iter()
        .enumerate()
        .map(|(idx, stat)| Event::from_value(stat).with_context(|| format!("Stat #{idx} was malformed")))
        .collect::<Result<Vec<_>>>()?;
    Ok((roster, events))
}

#[derive(Clone, Debug, Default)]
pub struct MemoryEventSource {
    roster: Roster,
    events: Vec<Event>,
}

impl MemoryEventSource {
    pub fn new(roster: Roster, events: Vec<Event>) -> Self {
        Self { roster, events }
    }

    pub fn from_document(document: &Value) -> Result<Self> {
        let (roster, events) = parse_document(document)?;
        Ok(Self::new(roster, events))
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl EventSource for MemoryEventSource {
    fn roster(&self) -> Result<Roster> {
        Ok(self.roster.clone())
    }

    fn events_for_game(&self, game_id: &GameId) -> Result<Vec<Event>> {
        Ok(self.events.iter().filter(|event| event.game_id() == game_id).cloned().collect())
    }

    fn events_for_player(&self, player_id: &PlayerId) -> Result<Vec<Event>> {
        Ok(self.events.iter().filter(|event| event.player_id() == player_id).cloned().collect())
    }
}

pub struct FileEventSource {
    path: PathBuf,
    inner: MemoryEventSource,
}

impl FileEventSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let raw = std::fs::read_to_string(&path).with_context(|| format!("Could not read events from {}", path.display()))?;
        let document = serde_json::from_str::<Value>(&raw).with_context(|| format!("{} was not valid json", path.display()))?;
        let inner = MemoryEventSource::from_document(&document)?;
        info!(path = %path.display(), stats = inner.events().len(), players = inner.roster.len(), "Loaded stats file");
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSource for FileEventSource {
    fn roster(&self) -> Result<Roster> {
        self.inner.roster()
    }

    fn events_for_game(&self, game_id: &GameId) -> Result<Vec<Event>> {
        self.inner.events_for_game(game_id)
    }

    fn events_for_player(&self, player_id: &PlayerId) -> Result<Vec<Event>> {
        self.inner.events_for_player(player_id)
    }
}

/// A remote data service serving `{base}/roster`, `{base}/games/{id}` and `{base}/players/{id}` documents.
pub struct HttpEventSource {
    base_url: String,
    retry_delay: Duration,
    attempts: usize,
}

impl HttpEventSource {
    pub fn new(base_url: &str, retry_delay: Duration, attempts: usize) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            retry_delay,
            attempts: attempts.max(1),
        }
    }

    pub fn roster_url(&self) -> String {
        format!("{}/roster", self.base_url)
    }

    pub fn game_url(&self, game_id: &GameId) -> String {
        format!("{}/games/{game_id}", self.base_url)
    }

    pub fn player_game_url(&self, player_id: &PlayerId, game_id: &GameId) -> String {
        format!("{}/games/{game_id}/players/{player_id}", self.base_url)
    }

    pub fn player_url(&self, player_id: &PlayerId) -> String {
        format!("{}/players/{player_id}", self.base_url)
    }

    fn events_at(&self, url: &str) -> Result<Vec<Event>> {
        let document = get_with_sleep(url, self.retry_delay, self.attempts)?;
        let (_, events) = parse_document(&document).with_context(|| format!("Could not decode stats from {url}"))?;
        debug!(url, stats = events.len(), "Fetched stats");
        Ok(events)
    }
}

impl EventSource for HttpEventSource {
    fn roster(&self) -> Result<Roster> {
        let document = get_with_sleep(&self.roster_url(), self.retry_delay, self.attempts)?;
        Roster::from_value(&document["players"])
    }

    fn events_for_game(&self, game_id: &GameId) -> Result<Vec<Event>> {
        self.events_at(&self.game_url(game_id))
    }

    fn events_for_player_in_game(&self, player_id: &PlayerId, game_id: &GameId) -> Result<Vec<Event>> {
        self.events_at(&self.player_game_url(player_id, game_id))
    }

    fn events_for_player(&self, player_id: &PlayerId) -> Result<Vec<Event>> {
        self.events_at(&self.player_url(player_id))
    }
}

pub fn get_with_sleep(url: &str, duration: Duration, attempts: usize) -> Result<Value> {
    let mut last_error = None;
    for attempt in 1..=attempts {
        match ureq::get(url).call() {
            Ok(response) => return response.into_json::<Value>().context("Response was not a valid json"),
            Err(e) => {
                warn!(url, attempt, attempts, "Request failed: {e}");
                last_error = Some(e.to_string());
                if attempt < attempts {
                    std::thread::sleep(duration);
                }
            }
        }
    }
    Err(match last_error {
        Some(e) => anyhow!("Could not fetch {url}: {e}"),
        None => anyhow!("Could not fetch {url}"),
    })
}

pub fn open_source(location: &str, retry_delay: Duration, attempts: usize) -> Result<Box<dyn EventSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        info!(base_url = location, "Using remote stats service");
        Ok(Box::new(HttpEventSource::new(location, retry_delay, attempts)))
    } else {
        Ok(Box::new(FileEventSource::open(location)?))
    }
}
