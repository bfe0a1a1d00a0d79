use std::fmt;
use std::io::{BufRead, Write};

use ndarray::Array2;
use turnsweep_core::*;

use crate::{ProtocolError, Result};

pub const WIN_HEADLINE: &str = "YOU WIN!";
pub const LOSE_HEADLINE: &str = "GAME OVER!";

/// Line source that skips blank lines and trims surrounding whitespace.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    buf: String,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: String::new(),
        }
    }

    /// Next non-blank line, `None` at end of input.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        loop {
            self.buf.clear();
            if self.inner.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            let line = self.buf.trim();
            if !line.is_empty() {
                return Ok(Some(line.to_owned()));
            }
        }
    }

    pub fn expect_line(&mut self) -> Result<String> {
        self.next_line()?.ok_or(ProtocolError::UnexpectedEof)
    }
}

fn parse_numbers<const N: usize>(line: &str) -> Option<[i64; N]> {
    let mut numbers = [0; N];
    let mut tokens = line.split_whitespace();
    for number in &mut numbers {
        *number = tokens.next()?.parse().ok()?;
    }
    tokens.next().is_none().then_some(numbers)
}

/// Parses a `row column` pair that must fit the coordinate range.
pub fn parse_coords(line: &str) -> Result<Coord2> {
    let malformed = || ProtocolError::MalformedCoords(line.to_owned());
    let [row, column] = parse_numbers::<2>(line).ok_or_else(malformed)?;
    Ok((
        row.try_into().map_err(|_| malformed())?,
        column.try_into().map_err(|_| malformed())?,
    ))
}

/// Reads `rows` lines of exactly `columns` characters each, starting with `first_row` when the
/// caller already took it off the stream.
fn read_grid<R: BufRead, T>(
    reader: &mut LineReader<R>,
    (rows, columns): Coord2,
    mut first_row: Option<String>,
    mut decode: impl FnMut(char) -> Option<T>,
) -> Result<Array2<T>> {
    let mut cells = Vec::with_capacity(usize::from(mult(rows, columns)));
    for row in 0..usize::from(rows) {
        let line = match first_row.take() {
            Some(line) => line,
            None => reader.expect_line()?,
        };
        if line.chars().count() != usize::from(columns) {
            return Err(ProtocolError::MalformedRow {
                row,
                expected: columns.into(),
                line,
            });
        }
        for symbol in line.chars() {
            cells.push(decode(symbol).ok_or(ProtocolError::UnknownSymbol { row, symbol })?);
        }
    }
    Array2::from_shape_vec((rows, columns).to_nd_index(), cells)
        .map_err(|_| ProtocolError::Game(GameError::InvalidBoardShape))
}

/// Authority setup: a `rows columns` header followed by the grid, `X` for a mine and `.` for a
/// safe cell.
pub fn read_layout<R: BufRead>(reader: &mut LineReader<R>) -> Result<MineLayout> {
    let size = parse_coords(&reader.expect_line()?)?;
    let mine_mask = read_grid(reader, size, None, |symbol| match symbol {
        'X' => Some(true),
        '.' => Some(false),
        _ => None,
    })?;
    let layout = MineLayout::from_mine_mask(mine_mask)?;
    log::debug!(
        "read {:?} layout with {} mines",
        layout.size(),
        layout.mine_count()
    );
    Ok(layout)
}

/// Agent setup: the `first_row first_column` of the opening reveal.
pub fn read_opening<R: BufRead>(reader: &mut LineReader<R>) -> Result<Coord2> {
    parse_coords(&reader.expect_line()?)
}

pub fn read_rendering<R: BufRead>(reader: &mut LineReader<R>, size: Coord2) -> Result<Rendering> {
    let symbols = read_grid(reader, size, None, Symbol::from_char)?;
    Ok(Rendering::from_symbols(symbols)?)
}

/// Reads the rest of a rendering whose first row was already taken off the stream.
pub fn read_rendering_after<R: BufRead>(
    reader: &mut LineReader<R>,
    first_row: String,
    size: Coord2,
) -> Result<Rendering> {
    let symbols = read_grid(reader, size, Some(first_row), Symbol::from_char)?;
    Ok(Rendering::from_symbols(symbols)?)
}

pub fn format_rendering(rendering: &Rendering) -> String {
    let mut text = String::new();
    for row in rendering.rows() {
        text.extend(row.map(Symbol::to_char));
        text.push('\n');
    }
    text
}

pub fn write_rendering<W: Write>(writer: &mut W, rendering: &Rendering) -> Result<()> {
    writer.write_all(format_rendering(rendering).as_bytes())?;
    Ok(())
}

/// One action as it travels over the wire: `row column kind`.
///
/// Coordinates are kept as read, anything outside the board is simply ignored by the authority.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ActionLine {
    pub row: i64,
    pub column: i64,
    pub kind: ActionKind,
}

impl ActionLine {
    pub fn parse(line: &str) -> Result<Self> {
        let [row, column, code] = parse_numbers::<3>(line)
            .ok_or_else(|| ProtocolError::MalformedAction(line.to_owned()))?;
        let kind = ActionKind::from_code(code).ok_or(ProtocolError::InvalidActionKind(code))?;
        Ok(Self { row, column, kind })
    }

    /// The action on the board, `None` when the coordinates cannot address any cell.
    pub fn to_action(self) -> Option<Action> {
        let row = self.row.try_into().ok()?;
        let column = self.column.try_into().ok()?;
        Some(Action::new((row, column), self.kind))
    }
}

impl From<Action> for ActionLine {
    fn from(action: Action) -> Self {
        Self {
            row: action.coords.0.into(),
            column: action.coords.1.into(),
            kind: action.kind,
        }
    }
}

impl fmt::Display for ActionLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.row, self.column, self.kind.code())
    }
}

pub fn write_action<W: Write>(writer: &mut W, action: Action) -> Result<()> {
    writeln!(writer, "{}", ActionLine::from(action))?;
    writer.flush()?;
    Ok(())
}

/// Terminal state announced by a summary headline.
pub fn summary_headline_state(line: &str) -> Option<GameState> {
    match line {
        WIN_HEADLINE => Some(GameState::Won),
        LOSE_HEADLINE => Some(GameState::Lost),
        _ => None,
    }
}

pub fn write_summary<W: Write>(writer: &mut W, summary: &Summary) -> Result<()> {
    let headline = match summary.state {
        GameState::Won => WIN_HEADLINE,
        _ => LOSE_HEADLINE,
    };
    writeln!(writer, "{}", headline)?;
    writeln!(writer, "{} {}", summary.visited, summary.marked)?;
    writer.flush()?;
    Ok(())
}

/// Reads the counts line that follows `headline`.
pub fn read_summary<R: BufRead>(reader: &mut LineReader<R>, headline: &str) -> Result<Summary> {
    let malformed = |line: &str| ProtocolError::MalformedSummary(line.to_owned());
    let state = summary_headline_state(headline).ok_or_else(|| malformed(headline))?;
    let line = reader.expect_line()?;
    let [visited, marked] = parse_numbers::<2>(&line).ok_or_else(|| malformed(&line))?;
    Ok(Summary {
        state,
        visited: visited.try_into().map_err(|_| malformed(&line))?,
        marked: marked.try_into().map_err(|_| malformed(&line))?,
    })
}
