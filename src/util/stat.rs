use core::fmt::{Display, Formatter};
use core::str::FromStr;

use crate::util::event::EventError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StatType {
    AtBat,
    Hit,
    Run,
    Rbi,
    HomeRun,
    StrikeOut,
    Walk,
    Single,
    Double,
    Triple,
    Error,
    FieldersChoice,
    Sacrifice,
    FlyOut,
}

/// What a single event adds to a box line, before its own runs batted in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Contribution {
    pub at_bat: bool,
    pub hit: bool,
    pub run: bool,
    pub home_run: bool,
}

impl Contribution {
    const NOTHING: Self = Self { at_bat: false, hit: false, run: false, home_run: false };
    const OUT: Self = Self { at_bat: true, ..Self::NOTHING };
    const HIT: Self = Self { at_bat: true, hit: true, ..Self::NOTHING };
}

impl StatType {
    pub const ALL: [Self; 14] = [
        Self::AtBat,
        Self::Hit,
        Self::Run,
        Self::Rbi,
        Self::HomeRun,
        Self::StrikeOut,
        Self::Walk,
        Self::Single,
        Self::Double,
        Self::Triple,
        Self::Error,
        Self::FieldersChoice,
        Self::Sacrifice,
        Self::FlyOut,
    ];

    // Sacrifices are counted as at-bats here even though official scoring does not.
    pub fn contribution(self) -> Contribution {
        match self {
            Self::AtBat => Contribution::OUT,
            Self::Hit | Self::Single | Self::Double | Self::Triple => Contribution::HIT,
            Self::HomeRun => Contribution { at_bat: true, hit: true, run: true, home_run: true },
            Self::StrikeOut => Contribution::OUT,
            Self::Error | Self::FieldersChoice | Self::FlyOut | Self::Sacrifice => Contribution::OUT,
            Self::Run => Contribution { run: true, ..Contribution::NOTHING },
            Self::Walk | Self::Rbi => Contribution::NOTHING,
        }
    }

    pub fn is_charted_hit(self) -> bool {
        matches!(self, Self::Single | Self::Double | Self::Triple | Self::HomeRun)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AtBat => "atBat",
            Self::Hit => "hit",
            Self::Run => "run",
            Self::Rbi => "rbi",
            Self::HomeRun => "homeRun",
            Self::StrikeOut => "strikeOut",
            Self::Walk => "walk",
            Self::Single => "single",
            Self::Double => "double",
            Self::Triple => "triple",
            Self::Error => "error",
            Self::FieldersChoice => "fieldersChoice",
            Self::Sacrifice => "sacrifice",
            Self::FlyOut => "flyOut",
        }
    }

    pub fn describe(self, rbi: u32) -> String {
        let base = match self {
            Self::AtBat => "At bat",
            Self::Hit => "hit",
            Self::Run => return "Scored".to_owned(),
            Self::Rbi => return if rbi > 1 { format!("{rbi} runs batted in") } else { "Run batted in".to_owned() },
            Self::HomeRun => {
                return match rbi {
                    0 | 1 => "Solo home run".to_owned(),
                    4 => "Grand slam".to_owned(),
                    n => format!("{n}-run home run"),
                }
            }
            Self::StrikeOut => "Strikeout",
            Self::Walk => "Walk",
            Self::Single => "single",
            Self::Double => "double",
            Self::Triple => "triple",
            Self::Error => "Error",
            Self::FieldersChoice => "Fielder's choice",
            Self::Sacrifice => "Sacrifice",
            Self::FlyOut => "Fly out",
        };
        match rbi {
            0 if self.contribution().hit => {
                let mut chars = base.chars();
                chars.next().map_or(String::new(), |first| first.to_uppercase().chain(chars).collect())
            }
            0 => base.to_owned(),
            1 => format!("RBI {base}", base = base.to_lowercase()),
            n => format!("{n}RBI {base}", base = base.to_lowercase()),
        }
    }
}

impl FromStr for StatType {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stat_type| stat_type.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| EventError::UnknownStatType(s.to_owned()))
    }
}

impl Display for StatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_rbi_run_never_count_as_at_bats() {
        for stat_type in [StatType::Walk, StatType::Rbi, StatType::Run] {
            assert!(!stat_type.contribution().at_bat, "{stat_type} should not be an at-bat");
        }
    }

    #[test]
    fn test_every_other_type_is_an_at_bat() {
        let at_bats = StatType::ALL
            .into_iter()
            .filter(|stat_type| stat_type.contribution().at_bat)
            .count();
        assert_eq!(at_bats, StatType::ALL.len() - 3);
    }

    #[test]
    fn test_home_run_contribution() {
        let contribution = StatType::HomeRun.contribution();
        assert!(contribution.at_bat && contribution.hit && contribution.run && contribution.home_run);
    }

    #[test]
    fn test_labels_parse_back() {
        for stat_type in StatType::ALL {
            assert_eq!(stat_type.label().parse::<StatType>().unwrap(), stat_type);
        }
        assert_eq!("HOMERUN".parse::<StatType>().unwrap(), StatType::HomeRun);
        assert!(matches!("bunt".parse::<StatType>(), Err(EventError::UnknownStatType(label)) if label == "bunt"));
    }

    #[test]
    fn test_describe() {
        assert_eq!(StatType::Single.describe(0), "Single");
        assert_eq!(StatType::Double.describe(1), "RBI double");
        assert_eq!(StatType::Triple.describe(2), "2RBI triple");
        assert_eq!(StatType::HomeRun.describe(1), "Solo home run");
        assert_eq!(StatType::HomeRun.describe(3), "3-run home run");
        assert_eq!(StatType::HomeRun.describe(4), "Grand slam");
        assert_eq!(StatType::Sacrifice.describe(1), "RBI sacrifice");
        assert_eq!(StatType::StrikeOut.describe(0), "Strikeout");
    }
}
