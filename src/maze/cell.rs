use crossterm::style::{Color, Stylize};

use std::fmt;

/// Represents a cell of the terminal grid, which can be either a path or a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    Path(PathType),
    Wall(WallType),
}

impl GridCell {
    pub const ROOM: GridCell = GridCell::Path(PathType::Room);
    pub const PASSAGE: GridCell = GridCell::Path(PathType::Passage);
    pub const ENTRANCE: GridCell = GridCell::Path(PathType::Entrance);
    pub const EXIT: GridCell = GridCell::Path(PathType::Exit);
    pub const WALL: GridCell = GridCell::Wall(WallType::Wall);
    pub const BORDER: GridCell = GridCell::Wall(WallType::Border);
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;
}

/// Represents different types of path cells in the maze.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathType {
    /// A maze cell.
    #[default]
    Room,
    /// An open passage between two maze cells.
    Passage,
    /// The opening in the outer border above the first cell.
    Entrance,
    /// The opening in the outer border below the last cell.
    Exit,
}

/// Represents different types of wall cells in the maze.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallType {
    /// A wall between two maze cells, or a corner.
    #[default]
    Wall,
    /// Part of the outer boundary.
    Border,
}

impl GridCell {
    /// The characters printed for this cell, without styling.
    pub fn symbol(self) -> &'static str {
        match self {
            GridCell::Path(PathType::Room | PathType::Passage) => "  ",
            GridCell::Path(PathType::Entrance) => "🟩",
            GridCell::Path(PathType::Exit) => "🟥",
            GridCell::Wall(_) => "██",
        }
    }

    fn color(self) -> Color {
        match self {
            GridCell::Path(PathType::Room | PathType::Passage) => Color::Reset,
            GridCell::Path(PathType::Entrance) => Color::Green,
            GridCell::Path(PathType::Exit) => Color::Red,
            GridCell::Wall(WallType::Wall) => Color::Grey,
            GridCell::Wall(WallType::Border) => Color::White,
        }
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = self.symbol().with(self.color());

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            debug_assert_eq!(
                styled_symbol.content().width(),
                GridCell::CELL_WIDTH as usize,
                "Each cell must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}
