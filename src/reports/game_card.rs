use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::reports::at_bat_log::AtBatLog;
use crate::reports::box_score::BoxScore;
use crate::reports::line_score::LineScore;
use crate::reports::spray_chart::SprayChart;

#[derive(Clone)]
pub struct GameCard {
    game: String,
    first_pitch: Option<String>,
    box_score: BoxScore,
    line_score: LineScore,
    at_bat_log: Option<AtBatLog>,
    spray_chart: SprayChart,
}

pub fn first_pitch(timestamp: DateTime<Utc>, timezone: Tz) -> String {
    format!("{}", timestamp.with_timezone(&timezone).format("%m/%d/%y %H:%M %Z"))
}

impl GameCard {
    pub fn new(game: String, first_pitch: Option<String>, box_score: BoxScore, line_score: LineScore, at_bat_log: Option<AtBatLog>, spray_chart: SprayChart) -> Self {
        Self {
            game,
            first_pitch,
            box_score,
            line_score,
            at_bat_log,
            spray_chart,
        }
    }
}

impl Display for GameCard {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Self { game, first_pitch, box_score, line_score, at_bat_log, spray_chart } = self;
        writeln!(f, "## Game {game}")?;
        if let Some(first_pitch) = first_pitch {
            writeln!(f, "First Pitch: {first_pitch}")?;
        }
        writeln!(f, "{box_score}")?;
        writeln!(f, "### __Line Score__")?;
        writeln!(f, "{line_score}")?;
        if let Some(at_bat_log) = at_bat_log {
            writeln!(f, "{at_bat_log}")?;
        }
        write!(f, "{spray_chart}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::column::BoxScoreColumn;
    use crate::util::event::tests::{at, event};
    use crate::util::hit_location::HitLocation;
    use crate::util::roster::Roster;
    use crate::util::spray::sequential_hit_numbering;
    use crate::util::stat::StatType;
    use chrono_tz::Tz::America__Toronto;

    #[test]
    fn test_first_pitch_in_zone() {
        assert_eq!(first_pitch(at(5), America__Toronto), "05/01/24 14:05 EDT");
        assert_eq!(first_pitch(at(5), Tz::UTC), "05/01/24 18:05 UTC");
    }

    #[test]
    fn test_card_sections() {
        let events = [
            event("s1", "p1", StatType::Single, 5)
                .inning(1)
                .hit_location(HitLocation::new(0.3, 0.4, 0.0, 40).unwrap())
                .build()
                .unwrap(),
            event("s2", "p1", StatType::FlyOut, 15).inning(3).build().unwrap(),
        ];
        let roster = Roster::default();
        let hits = sequential_hit_numbering(&events);
        let card = GameCard::new(
            "g1".to_owned(),
            Some(first_pitch(at(5), America__Toronto)),
            BoxScore::new("Box Score", &events, &roster, BoxScoreColumn::AVG),
            LineScore::new(&events).unwrap(),
            Some(AtBatLog::new("p1", &events)),
            SprayChart::new("Spray Chart", &hits, &roster, 11, 11),
        )
        .to_string();
        assert!(card.starts_with("## Game g1\nFirst Pitch: 05/01/24 14:05 EDT\n### __Box Score__"));
        assert!(card.contains("### __Line Score__"));
        assert!(card.contains("### __p1's Game__"));
        assert!(card.contains("`1` **p1** Single"));
    }
}
