use std::io::Write;

use crossterm::{queue, style};

use super::{Orientation, Rectangle, cell::GridCell};

/// Character grid of a maze: `n` cells in each dimension need `n + 1` walls,
/// so the grid is `2n + 1` wide and tall.
pub struct Grid {
    pub data: Box<[GridCell]>,
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize, cell: GridCell) -> Self {
        let data = vec![cell; width * height].into_boxed_slice();
        Grid {
            data,
            width,
            height,
        }
    }

    /// Lays out the passages of `rect`. The entrance sits above the top-left
    /// cell and the exit below the bottom-right one.
    pub fn from_rectangle(rect: &Rectangle) -> Self {
        let mut grid = Grid::new(rect.width() * 2 + 1, rect.height() * 2 + 1, GridCell::WALL);

        for y in 0..grid.height {
            for x in 0..grid.width {
                if grid.is_boundary(x, y) {
                    grid[(x, y)] = GridCell::BORDER;
                }
            }
        }

        for row in 0..rect.height() {
            for col in 0..rect.width() {
                let (x, y) = (col * 2 + 1, row * 2 + 1);
                grid[(x, y)] = GridCell::ROOM;
                if rect.is_passage_after((row, col), Orientation::Vertical) {
                    grid[(x + 1, y)] = GridCell::PASSAGE;
                }
                if rect.is_passage_after((row, col), Orientation::Horizontal) {
                    grid[(x, y + 1)] = GridCell::PASSAGE;
                }
            }
        }

        grid[(1, 0)] = GridCell::ENTRANCE;
        let exit = (grid.width - 2, grid.height - 1);
        grid[exit] = GridCell::EXIT;
        grid
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_boundary(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1
    }

    fn ravel_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Prints the grid row by row.
    pub fn display<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                queue!(out, style::Print(self[(x, y)]))?;
            }
            queue!(out, style::Print("\r\n"))?;
        }
        out.flush()
    }
}

impl std::ops::Index<(usize, usize)> for Grid {
    type Output = GridCell;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.data[self.ravel_index(index.0, index.1)]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Grid {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let idx = self.ravel_index(index.0, index.1);
        &mut self.data[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_layout() {
        // 2x1 maze with its single passage open
        let mut rect = Rectangle::unconnected(2, 1).unwrap();
        rect.connect_after((0, 0), Orientation::Vertical, 0.5).unwrap();

        let grid = Grid::from_rectangle(&rect);
        assert_eq!((grid.width(), grid.height()), (5, 3));
        assert_eq!(grid[(1, 1)], GridCell::ROOM);
        assert_eq!(grid[(2, 1)], GridCell::PASSAGE);
        assert_eq!(grid[(3, 1)], GridCell::ROOM);
        assert_eq!(grid[(1, 0)], GridCell::ENTRANCE);
        assert_eq!(grid[(3, 2)], GridCell::EXIT);
        assert_eq!(grid[(0, 1)], GridCell::BORDER);
        assert_eq!(grid[(4, 1)], GridCell::BORDER);
    }

    #[test]
    fn test_missing_passage_is_wall() {
        let rect = Rectangle::unconnected(2, 2).unwrap();
        let grid = Grid::from_rectangle(&rect);
        assert_eq!(grid[(2, 1)], GridCell::WALL);
        assert_eq!(grid[(1, 2)], GridCell::WALL);
        assert_eq!(grid[(2, 2)], GridCell::WALL);
    }

    #[test]
    fn test_display_writes_every_row() {
        let rect = Rectangle::unconnected(3, 2).unwrap();
        let grid = Grid::from_rectangle(&rect);
        let mut out = Vec::new();
        grid.display(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("\r\n").count(), grid.height());
    }
}
