use std::fmt::{Display, Formatter};

use crate::util::aggregate::{aggregate_by_player, BoxLine};
use crate::util::column::BoxScoreColumn;
use crate::util::event::Event;
use crate::util::roster::Roster;

#[derive(Clone)]
pub struct BoxScore {
    title: String,
    rows: Vec<(String, BoxLine)>,
    totals: BoxLine,
}

impl BoxScore {
    pub fn new(title: impl Into<String>, events: &[Event], roster: &Roster, sort: BoxScoreColumn) -> Self {
        let mut rows = aggregate_by_player(events)
            .into_iter()
            .map(|(id, line)| (roster.name(&id).to_owned(), line))
            .collect::<Vec<_>>();
        rows.sort_by(|(_, a), (_, b)| sort.compare(b, a));
        let totals = rows.iter().fold(BoxLine::default(), |acc, (_, line)| acc + *line);
        Self {
            title: title.into(),
            rows,
            totals,
        }
    }

    pub fn rows(&self) -> &[(String, BoxLine)] {
        &self.rows
    }

    pub fn totals(&self) -> &BoxLine {
        &self.totals
    }
}

impl Display for BoxScore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Self { title, rows, totals } = self;
        let name_width = rows.iter().map(|(name, _)| name.chars().count()).chain(["Player".len(), "Totals".len()]).max().unwrap_or(0);
        let cells = rows
            .iter()
            .map(|(_, line)| line)
            .chain(core::iter::once(totals))
            .map(|line| BoxScoreColumn::ALL.map(|column| column.get(line)))
            .collect::<Vec<_>>();
        let widths = BoxScoreColumn::ALL.map(|column| column.to_string().len());
        let widths = core::array::from_fn::<usize, 6, _>(|idx| cells.iter().map(|row| row[idx].len()).fold(widths[idx], usize::max));

        writeln!(f, "### __{title}__")?;
        write!(f, "**`{player: <name_width$}", player = "Player")?;
        for (column, width) in BoxScoreColumn::ALL.iter().zip(widths) {
            write!(f, " | {column: >width$}", column = column.to_string())?;
        }
        writeln!(f, "`**")?;
        for (idx, row) in cells.iter().enumerate() {
            let name = rows.get(idx).map_or("Totals", |(name, _)| name.as_str());
            write!(f, "`{name: <name_width$}")?;
            for (cell, width) in row.iter().zip(widths) {
                write!(f, " | {cell: >width$}")?;
            }
            if idx + 1 < cells.len() {
                writeln!(f, "`")?;
            } else {
                write!(f, "`")?;
            }
        }
        Ok(())
    }
}
