use crate::parsing::blocks::types::TableGrid;
use crate::parsing::inline::format_inline;

/// Pipe table (`| a | b |`).
pub struct PipeTable;

impl PipeTable {
    pub const PIPE: char = '|';

    /// Whether a line can be part of a table: its trimmed form starts with `|`.
    pub fn is_row(line: &str) -> bool {
        line.trim().starts_with(Self::PIPE)
    }

    /// Splits a row into trimmed cells after stripping the outer pipes.
    pub fn cells(line: &str) -> Vec<String> {
        line.trim()
            .trim_matches(Self::PIPE)
            .split(Self::PIPE)
            .map(|cell| cell.trim().to_string())
            .collect()
    }

    /// A divider row (`|---|:--:|`) has nothing left once dashes, colons and
    /// whitespace are removed.
    pub fn is_divider(cells: &[String]) -> bool {
        cells.iter().all(|cell| {
            cell.chars()
                .all(|c| c == '-' || c == ':' || c.is_whitespace())
        })
    }
}

/// Parses the table starting at `start`.
///
/// Collects contiguous table rows; a blank or non-table line ends the run.
/// Fewer than two rows is not a table. The second row is dropped when it is
/// a divider, and every remaining cell is inline formatted. Returns the grid
/// and the index of the first line after the table.
pub fn parse_table<S: AsRef<str>>(lines: &[S], start: usize) -> Option<(TableGrid, usize)> {
    let run: Vec<&str> = lines
        .get(start..)
        .unwrap_or(&[])
        .iter()
        .map(AsRef::as_ref)
        .take_while(|line| PipeTable::is_row(line))
        .collect();

    if run.len() < 2 {
        return None;
    }

    let rows = run
        .iter()
        .map(|line| PipeTable::cells(line))
        .enumerate()
        .filter(|(index, cells)| !(*index == 1 && PipeTable::is_divider(cells)))
        .map(|(_, cells)| cells.iter().map(|cell| format_inline(cell)).collect())
        .collect();

    Some((TableGrid { rows }, start + run.len()))
}
