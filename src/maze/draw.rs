//! Rasterizes a maze into a grayscale image and writes it as PNG.

use std::{io::BufWriter, path::Path};

use thiserror::Error;

use super::{Orientation, Rectangle};

#[derive(Debug, Error)]
pub enum DrawError {
    #[error("graph size {size} does not match dimensions {width}x{height}")]
    SizeMismatch {
        size: usize,
        width: usize,
        height: usize,
    },

    #[error("square size must be positive")]
    InvalidSquareSize,

    #[error("image of {width}x{height} squares is too large to encode")]
    TooLarge { width: usize, height: usize },

    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode image: {0}")]
    Encoding(#[from] png::EncodingError),
}

const WHITE: u8 = 255;
const BLACK: u8 = 0;

/// 8-bit grayscale pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl GrayImage {
    fn blank(width: u32, height: u32) -> Self {
        GrayImage {
            pixels: vec![WHITE; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Paints the half-open rectangle `[x0, x1) × [y0, y1)` black.
    fn fill_black(&mut self, (x0, y0): (u32, u32), (x1, y1): (u32, u32)) {
        for y in y0..y1 {
            let row = y as usize * self.width as usize;
            self.pixels[row + x0 as usize..row + x1 as usize].fill(BLACK);
        }
    }
}

/// Draws `rect` with `square_size` pixels per cell.
///
/// Walls are one pixel wide and drawn on the right or bottom edge of the cell
/// they follow. The outer boundary is closed except for an entrance above the
/// top-left cell and an exit below the bottom-right cell.
pub fn render_image(rect: &Rectangle, square_size: u32) -> Result<GrayImage, DrawError> {
    let (width, height) = (rect.width(), rect.height());
    if rect.graph().size() != width * height {
        return Err(DrawError::SizeMismatch {
            size: rect.graph().size(),
            width,
            height,
        });
    }
    if square_size == 0 {
        return Err(DrawError::InvalidSquareSize);
    }

    let too_large = || DrawError::TooLarge { width, height };
    let img_width = u32::try_from(width)
        .ok()
        .and_then(|w| w.checked_mul(square_size))
        .ok_or_else(too_large)?;
    let img_height = u32::try_from(height)
        .ok()
        .and_then(|h| h.checked_mul(square_size))
        .ok_or_else(too_large)?;
    // Keep the buffer addressable
    (img_width as usize)
        .checked_mul(img_height as usize)
        .ok_or_else(too_large)?;

    let mut img = GrayImage::blank(img_width, img_height);
    let s = square_size;

    for y in 0..height {
        for x in 0..width {
            let (px, py) = (x as u32 * s, y as u32 * s);

            if x == 0 {
                // Left border
                img.fill_black((px, py), (px + 1, py + s));
            }
            if y == 0 && x != 0 {
                // Top border, except for the entrance
                img.fill_black((px, py), (px + s, py + 1));
            }
            if x == width - 1 || !rect.is_passage_after((y, x), Orientation::Vertical) {
                // Right border or wall to the east neighbor
                img.fill_black((px + s - 1, py), (px + s, py + s));
            }
            if (y == height - 1 && x != width - 1)
                || (y < height - 1 && !rect.is_passage_after((y, x), Orientation::Horizontal))
            {
                // Bottom border except for the exit, or wall to the south neighbor
                img.fill_black((px, py + s - 1), (px + s, py + s));
            }
        }
    }

    Ok(img)
}

/// Encodes `img` as an 8-bit grayscale PNG at `path`.
pub fn write_png(img: &GrayImage, path: &Path) -> Result<(), DrawError> {
    let file = std::fs::File::create(path)?;
    let w = BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, img.width, img.height);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&img.pixels)?;
    writer.finish()?;

    tracing::debug!(path = %path.display(), width = img.width, height = img.height, "image written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SparseGraph;

    /// 2x2 maze with passages (0,0)-(0,1), (0,0)-(1,0), (1,0)-(1,1).
    fn small_maze() -> Rectangle {
        let mut rect = Rectangle::unconnected(2, 2).unwrap();
        rect.connect_after((0, 0), Orientation::Vertical, 0.1).unwrap();
        rect.connect_after((0, 0), Orientation::Horizontal, 0.2).unwrap();
        rect.connect_after((1, 0), Orientation::Vertical, 0.3).unwrap();
        rect
    }

    #[test]
    fn test_image_dimensions() {
        let img = render_image(&small_maze(), 10).unwrap();
        assert_eq!((img.width, img.height), (20, 20));
        assert_eq!(img.pixels.len(), 400);
    }

    #[test]
    fn test_walls() {
        let img = render_image(&small_maze(), 10).unwrap();
        // Outer left border
        assert_eq!(img.pixel(0, 5), BLACK);
        // Entrance above the first cell stays open
        assert_eq!(img.pixel(5, 0), WHITE);
        // Top border above the second cell
        assert_eq!(img.pixel(15, 0), BLACK);
        // Passage (0,0)-(0,1): no wall on the right edge of (0,0)
        assert_eq!(img.pixel(9, 5), WHITE);
        // No passage (0,1)-(1,1): wall on the bottom edge of (0,1)
        assert_eq!(img.pixel(15, 9), BLACK);
        // Passage (0,0)-(1,0)
        assert_eq!(img.pixel(5, 9), WHITE);
        // Bottom border below (1,0), exit below (1,1)
        assert_eq!(img.pixel(5, 19), BLACK);
        assert_eq!(img.pixel(15, 19), WHITE);
        // Right border
        assert_eq!(img.pixel(19, 15), BLACK);
        // Cell interiors are white
        assert_eq!(img.pixel(4, 4), WHITE);
        assert_eq!(img.pixel(14, 14), WHITE);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            render_image(&small_maze(), 0),
            Err(DrawError::InvalidSquareSize)
        ));

        let big = Rectangle::with_graph(70_000, 1, SparseGraph::new(70_000, false).unwrap())
            .unwrap();
        assert!(matches!(
            render_image(&big, 70_000),
            Err(DrawError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_write_png() {
        let img = render_image(&small_maze(), 4).unwrap();
        let path = std::env::temp_dir().join(format!("fractmaze-{}.png", std::process::id()));
        write_png(&img, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
