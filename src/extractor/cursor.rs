//! Pixel cursor shared by all strips of one decode

use super::layout::ImageGeometry;

/// What a cursor step completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStep {
    /// Still inside the current row
    ReadingRow,
    /// A row finished and the next row starts
    RowComplete,
    /// A row finished at the bottom of the image; the strip must stop
    StripComplete,
}

/// Current (x, y) position in the output raster
///
/// Moves left to right, then top to bottom. Created fresh for every decode.
#[derive(Debug, Clone)]
pub struct DecodeCursor {
    x: u32,
    y: u32,
    geometry: ImageGeometry,
}

impl DecodeCursor {
    /// Create a cursor at (0, 0)
    pub fn new(geometry: ImageGeometry) -> Self {
        DecodeCursor { x: 0, y: 0, geometry }
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    /// Whether the cursor points at a pixel of the image
    pub fn in_bounds(&self) -> bool {
        self.x < self.geometry.width && self.y < self.geometry.height
    }

    /// Whether every row of the image has been passed
    pub fn is_finished(&self) -> bool {
        self.y >= self.geometry.height
    }

    /// Move to the next pixel
    pub fn advance(&mut self) -> CursorStep {
        self.x += 1;
        if self.x < self.geometry.width {
            return CursorStep::ReadingRow;
        }

        self.x = 0;
        self.y += 1;
        if self.y >= self.geometry.height {
            CursorStep::StripComplete
        } else {
            CursorStep::RowComplete
        }
    }
}
