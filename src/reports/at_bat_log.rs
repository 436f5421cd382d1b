use std::fmt::{Display, Formatter};

use crate::util::aggregate::{aggregate_player_stats, BoxLine};
use crate::util::column::format_average;
use crate::util::event::{sort_for_log, Event};
use crate::util::nth;

#[derive(Clone)]
pub struct AtBatLog {
    name: String,
    entries: Vec<(Option<u32>, Option<u32>, String)>,
    line: BoxLine,
    season: Option<BoxLine>,
}

impl AtBatLog {
    /// `events` should already be narrowed to one player.
    pub fn new(name: impl Into<String>, events: &[Event]) -> Self {
        let mut ordered = events.iter().collect::<Vec<_>>();
        sort_for_log(&mut ordered);
        Self {
            name: name.into(),
            entries: ordered
                .iter()
                .map(|event| (
                    event.at_bat_number().map(|n| n.get()),
                    event.inning().map(|n| n.get()),
                    event.description(),
                ))
                .collect(),
            line: aggregate_player_stats(events),
            season: None,
        }
    }

    pub fn with_season(mut self, season: BoxLine) -> Self {
        self.season = Some(season);
        self
    }
}

impl Display for AtBatLog {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Self { name, entries, line, season } = self;
        writeln!(f, "### __{name}'s Game__")?;
        for (number, inning, description) in entries {
            let number = number.map_or_else(|| "-".to_owned(), |n| n.to_string());
            let inning = inning.map_or_else(|| "--".to_owned(), |n| nth(n as usize));
            writeln!(f, "`{number}` | {inning} | {description}")?;
        }
        write!(
            f,
            "> **{hits}**-for-**{at_bats}** | **{runs}** R | **{rbis}** RBI | **{home_runs}** HR | {average} AVG",
            hits = line.hits,
            at_bats = line.at_bats,
            runs = line.runs,
            rbis = line.rbis,
            home_runs = line.home_runs,
            average = format_average(line.batting_average()),
        )?;
        if let Some(season) = season {
            write!(
                f,
                "\n> Season: **{hits}**-for-**{at_bats}** | **{home_runs}** HR | **{rbis}** RBI | {average} AVG",
                hits = season.hits,
                at_bats = season.at_bats,
                home_runs = season.home_runs,
                rbis = season.rbis,
                average = format_average(season.batting_average()),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::event::tests::event;
    use crate::util::stat::StatType;

    #[test]
    fn test_log_is_ordered_and_summarized() {
        let events = [
            event("s2", "p1", StatType::Double, 20).inning(3).at_bat_number(2).runs_batted_in(2).build().unwrap(),
            event("s1", "p1", StatType::StrikeOut, 5).inning(1).at_bat_number(1).build().unwrap(),
        ];
        let expected = "\
### __Jane Doe's Game__
`1` | 1st | Strikeout
`2` | 3rd | 2RBI double
> **1**-for-**2** | **0** R | **2** RBI | **0** HR | .500 AVG";
        assert_eq!(AtBatLog::new("Jane Doe", &events).to_string(), expected);
    }

    #[test]
    fn test_unnumbered_events_are_marked() {
        let events = [
            event("s1", "p1", StatType::Walk, 5).build().unwrap(),
            event("s2", "p1", StatType::Run, 6).inning(2).build().unwrap(),
        ];
        let log = AtBatLog::new("Jane Doe", &events).to_string();
        assert!(log.contains("`-` | -- | Walk"));
        assert!(log.contains("`-` | 2nd | Scored"));
        assert!(log.ends_with("| .000 AVG"));
    }

    #[test]
    fn test_runs_between_numbered_at_bats() {
        let events = [
            event("s1", "p1", StatType::Single, 5).inning(1).at_bat_number(1).build().unwrap(),
            event("s2", "p1", StatType::Run, 8).inning(1).build().unwrap(),
            event("s3", "p1", StatType::Walk, 20).inning(3).at_bat_number(2).build().unwrap(),
            event("s4", "p1", StatType::Run, 22).inning(3).build().unwrap(),
            event("s5", "p1", StatType::FlyOut, 40).inning(5).at_bat_number(3).build().unwrap(),
        ];
        let expected = "\
### __Jane Doe's Game__
`1` | 1st | Single
`-` | 1st | Scored
`2` | 3rd | Walk
`-` | 3rd | Scored
`3` | 5th | Fly out
> **1**-for-**2** | **2** R | **0** RBI | **0** HR | .500 AVG";
        assert_eq!(AtBatLog::new("Jane Doe", &events).to_string(), expected);
    }

    #[test]
    fn test_sample_game_numbers_are_unique() {
        let document = serde_json::from_str::<serde_json::Value>(include_str!("../../demos/sample_game.json")).unwrap();
        let (_, events) = crate::util::source::parse_document(&document).unwrap();
        let jane = events.into_iter().filter(|e| e.player_id().as_str() == "p1" && e.game_id().as_str() == "g1").collect::<Vec<_>>();
        let log = AtBatLog::new("Jane Doe", &jane).to_string();
        let numbers = log
            .lines()
            .filter_map(|line| line.strip_prefix('`')?.split('`').next())
            .filter(|number| *number != "-")
            .collect::<Vec<_>>();
        let mut deduped = numbers.clone();
        deduped.dedup();
        assert_eq!(numbers, deduped);
        assert!(numbers.windows(2).all(|w| w[0].parse::<u32>().unwrap() < w[1].parse::<u32>().unwrap()));
    }

    #[test]
    fn test_season_line() {
        let game = [event("s1", "p1", StatType::Single, 5).build().unwrap()];
        let season = BoxLine { at_bats: 10, runs: 2, hits: 4, rbis: 3, home_runs: 1 };
        let log = AtBatLog::new("Jane Doe", &game).with_season(season).to_string();
        assert!(log.ends_with("\n> Season: **4**-for-**10** | **1** HR | **3** RBI | .400 AVG"));
    }
}
