use std::fmt::{Display, Formatter};

use crate::util::last_name;
use crate::util::roster::Roster;
use crate::util::spray::NumberedHit;

const MARKERS: &[u8] = b"123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Clone, Debug, PartialEq)]
struct Marker {
    sequence: usize,
    batter: String,
    description: String,
    x: f64,
    y: f64,
    height: f64,
}

/// Text spray chart. Home plate sits at the bottom center; `y` grows toward the plate.
#[derive(Clone)]
pub struct SprayChart {
    title: String,
    markers: Vec<Marker>,
    width: usize,
    height: usize,
}

pub fn marker_symbol(sequence: usize) -> char {
    sequence.checked_sub(1).and_then(|idx| MARKERS.get(idx)).map_or('*', |&b| b as char)
}

impl SprayChart {
    pub fn new(title: impl Into<String>, hits: &[NumberedHit], roster: &Roster, width: usize, height: usize) -> Self {
        Self {
            title: title.into(),
            markers: hits
                .iter()
                .map(|hit| Marker {
                    sequence: hit.display_sequence,
                    batter: last_name(roster.name(hit.event.player_id())).to_owned(),
                    description: hit.event.description(),
                    x: hit.location.x(),
                    y: hit.location.y(),
                    height: hit.location.height(),
                })
                .collect(),
            width: width.max(3),
            height: height.max(3),
        }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    fn cell(&self, x: f64, y: f64) -> (usize, usize) {
        let col = (x * (self.width - 1) as f64).round() as usize;
        let row = (y * (self.height - 1) as f64).round() as usize;
        (col.min(self.width - 1), row.min(self.height - 1))
    }

    pub fn grid(&self) -> Vec<String> {
        let mut grid = vec![vec!['.'; self.width]; self.height];
        grid[self.height - 1][self.width / 2] = 'H';
        for marker in &self.markers {
            let (col, row) = self.cell(marker.x, marker.y);
            grid[row][col] = marker_symbol(marker.sequence);
        }
        grid.into_iter().map(|row| row.into_iter().collect()).collect()
    }
}

impl Display for SprayChart {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "### __{}__", self.title)?;
        if self.markers.is_empty() {
            return write!(f, "> No charted hits");
        }
        writeln!(f, "```")?;
        for row in self.grid() {
            writeln!(f, "{row}")?;
        }
        writeln!(f, "```")?;
        let lines = self
            .markers
            .iter()
            .map(|marker| format!(
                "`{symbol}` **{batter}** {description} ({x:.3}, {y:.3}, arc {height:.2})",
                symbol = marker_symbol(marker.sequence),
                batter = marker.batter,
                description = marker.description,
                x = marker.x,
                y = marker.y,
                height = marker.height,
            ))
            .collect::<Vec<_>>();
        write!(f, "{}", lines.join("\n"))
    }
}
