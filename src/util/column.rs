use core::cmp::Ordering;
use core::fmt::{Display, Formatter};
use core::str::FromStr;

use anyhow::anyhow;

use crate::util::aggregate::BoxLine;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoxScoreColumn {
    AB,
    R,
    H,
    RBI,
    HR,
    AVG,
}

impl BoxScoreColumn {
    pub const ALL: [Self; 6] = [Self::AB, Self::R, Self::H, Self::RBI, Self::HR, Self::AVG];
    pub const MAX_NAME_WIDTH: usize = 4;

    pub fn get(self, line: &BoxLine) -> String {
        match self {
            Self::AB => line.at_bats.to_string(),
            Self::R => line.runs.to_string(),
            Self::H => line.hits.to_string(),
            Self::RBI => line.rbis.to_string(),
            Self::HR => line.home_runs.to_string(),
            Self::AVG => format_average(line.batting_average()),
        }
    }

    pub fn compare(self, a: &BoxLine, b: &BoxLine) -> Ordering {
        match self {
            Self::AB => a.at_bats.cmp(&b.at_bats),
            Self::R => a.runs.cmp(&b.runs),
            Self::H => a.hits.cmp(&b.hits),
            Self::RBI => a.rbis.cmp(&b.rbis),
            Self::HR => a.home_runs.cmp(&b.home_runs),
            Self::AVG => a.batting_average().total_cmp(&b.batting_average()),
        }
    }
}

/// `.333` style, keeping the leading digit only at 1.000.
pub fn format_average(average: f64) -> String {
    let formatted = format!("{average:.3}");
    if formatted.starts_with('0') {
        formatted[1..].to_owned()
    } else {
        formatted
    }
}

impl FromStr for BoxScoreColumn {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|column| column.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow!("Invalid box score column '{s}'"))
    }
}

impl Display for BoxScoreColumn {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", match *self {
            Self::AB => "AB",
            Self::R => "R",
            Self::H => "H",
            Self::RBI => "RBI",
            Self::HR => "HR",
            Self::AVG => "AVG",
        })
    }
}
