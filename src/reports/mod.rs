use std::fmt::Display;

use anyhow::{anyhow, Result};

use crate::reports::at_bat_log::AtBatLog;
use crate::reports::box_score::BoxScore;
use crate::reports::game_card::GameCard;
use crate::reports::line_score::LineScore;
use crate::reports::spray_chart::SprayChart;

pub mod at_bat_log;
pub mod box_score;
pub mod game_card;
pub mod line_score;
pub mod spray_chart;

#[derive(Clone)]
pub enum Report {
    BoxScore(BoxScore),
    LineScore(LineScore),
    SprayChart(SprayChart),
    AtBatLog(AtBatLog),
    GameCard(GameCard),
}

impl Report {
    #[inline]
    pub fn send(&self) -> Result<()> {
        self.send_with_settings(true, false)
    }

    pub fn send_with_settings(&self, stdout: bool, copy: bool) -> Result<()> {
        let text = self.to_string();

        if stdout {
            println!("{text}\n");
            std::io::Write::flush(&mut std::io::stdout())?;
        }

        if copy {
            cli_clipboard::set_contents(text).map_err(|_| anyhow!("Failed to set clipboard"))?;
        }

        Ok(())
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BoxScore(inner) => write!(f, "{inner}"),
            Self::LineScore(inner) => write!(f, "{inner}"),
            Self::SprayChart(inner) => write!(f, "{inner}"),
            Self::AtBatLog(inner) => write!(f, "{inner}"),
            Self::GameCard(inner) => write!(f, "{inner}"),
        }
    }
}
