use core::num::NonZeroU32;
use core::ops::{Add, AddAssign};

use fxhash::FxHashMap;

use crate::util::event::{Event, PlayerId};

/// Box-score counters for any slice of events: one player in one game, one inning, a whole team.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BoxLine {
    pub at_bats: usize,
    pub runs: usize,
    pub hits: usize,
    pub rbis: usize,
    pub home_runs: usize,
}

pub type PlayerGameStats = BoxLine;

impl BoxLine {
    pub fn record(&mut self, event: &Event) {
        let contribution = event.stat_type().contribution();
        self.at_bats += contribution.at_bat as usize;
        self.hits += contribution.hit as usize;
        self.runs += contribution.run as usize;
        self.home_runs += contribution.home_run as usize;
        self.rbis += event.runs_batted_in().unwrap_or(0) as usize;
    }

    pub fn batting_average(&self) -> f64 {
        if self.at_bats == 0 {
            0.0
        } else {
            self.hits as f64 / self.at_bats as f64
        }
    }
}

impl Add for BoxLine {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for BoxLine {
    fn add_assign(&mut self, rhs: Self) {
        self.at_bats += rhs.at_bats;
        self.runs += rhs.runs;
        self.hits += rhs.hits;
        self.rbis += rhs.rbis;
        self.home_runs += rhs.home_runs;
    }
}

impl<'a> FromIterator<&'a Event> for BoxLine {
    fn from_iter<I: IntoIterator<Item = &'a Event>>(iter: I) -> Self {
        let mut line = Self::default();
        for event in iter {
            line.record(event);
        }
        line
    }
}

pub fn aggregate_player_stats<'a>(events: impl IntoIterator<Item = &'a Event>) -> PlayerGameStats {
    events.into_iter().collect()
}

/// Team line for one inning. Events without an inning are never counted.
pub fn aggregate_inning_stats<'a>(events: impl IntoIterator<Item = &'a Event>, inning: NonZeroU32) -> BoxLine {
    events.into_iter().filter(|event| event.inning() == Some(inning)).collect()
}

pub fn aggregate_by_player(events: &[Event]) -> Vec<(PlayerId, BoxLine)> {
    let mut index = FxHashMap::<&PlayerId, usize>::default();
    let mut lines = Vec::<(PlayerId, BoxLine)>::new();
    for event in events {
        let idx = *index.entry(event.player_id()).or_insert_with(|| {
            lines.push((event.player_id().clone(), BoxLine::default()));
            lines.len() - 1
        });
        lines[idx].1.record(event);
    }
    lines
}

pub fn innings(events: &[Event]) -> Vec<NonZeroU32> {
    let mut innings = events.iter().filter_map(Event::inning).collect::<Vec<_>>();
    innings.sort_unstable();
    innings.dedup();
    innings
}

pub fn aggregate_by_inning(events: &[Event]) -> Vec<(NonZeroU32, BoxLine)> {
    innings(events)
        .into_iter()
        .map(|inning| (inning, aggregate_inning_stats(events, inning)))
        .collect()
}
