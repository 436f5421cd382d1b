use std::fmt::{Display, Formatter, Write};

use crate::util::aggregate::{aggregate_by_inning, BoxLine};
use crate::util::column::BoxScoreColumn;
use crate::util::event::Event;
use crate::util::width;

const ROWS: [BoxScoreColumn; 5] = [BoxScoreColumn::R, BoxScoreColumn::H, BoxScoreColumn::AB, BoxScoreColumn::RBI, BoxScoreColumn::HR];

/// Team totals inning by inning. Stats without an inning only show up in the box score.
#[derive(Clone)]
pub struct LineScore {
    header: String,
    lines: Vec<String>,
}

impl LineScore {
    pub fn new(events: &[Event]) -> anyhow::Result<Self> {
        let innings = aggregate_by_inning(events);
        let totals = innings.iter().fold(BoxLine::default(), |acc, (_, line)| acc + *line);
        let total_width = width([totals.runs, totals.hits, totals.at_bats, totals.rbis, totals.home_runs]);
        let cell_width = width(innings.iter().map(|(n, _)| n.get() as usize)) + 2;

        let mut header = "**`    ".to_owned();
        for (inning, _) in &innings {
            write!(&mut header, "|{n: ^cell_width$}", n = inning.get())?;
        }
        write!(&mut header, "|| {t: >total_width$} |`**", t = "T")?;

        let mut lines = Vec::with_capacity(ROWS.len());
        for column in ROWS {
            let mut line = format!("`{name: <3} ", name = column.to_string());
            for (_, inning) in &innings {
                write!(&mut line, "|{n: ^cell_width$}", n = column.get(inning))?;
            }
            write!(&mut line, "|| {n: >total_width$} |`", n = column.get(&totals))?;
            lines.push(line);
        }
        Ok(Self { header, lines })
    }
}

impl Display for LineScore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Self { header, lines } = self;
        writeln!(f, "{header}")?;
        write!(f, "{}", lines.join("\n"))
    }
}
