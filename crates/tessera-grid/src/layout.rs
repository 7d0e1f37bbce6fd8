//! Pixel geometry of the board and constant-speed slide reconciliation.

use std::error::Error;
use std::fmt;

use tessera_core::{Cell, COLS, ROWS};

/// A [`Layout`] field that cannot be rendered or would never settle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// `tile_size` is zero or negative.
    TileSize {
        /// The configured value.
        value: i32,
    },
    /// `spacing` is negative.
    Spacing {
        /// The configured value.
        value: i32,
    },
    /// `slide_speed` is zero or negative, so slides never finish.
    SlideSpeed {
        /// The configured value.
        value: i32,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TileSize { value } => write!(f, "tile_size must be positive, got {value}"),
            Self::Spacing { value } => write!(f, "spacing must be >= 0, got {value}"),
            Self::SlideSpeed { value } => write!(f, "slide_speed must be positive, got {value}"),
        }
    }
}

impl Error for LayoutError {}

/// A pixel position relative to the board's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal offset in pixels.
    pub x: i32,
    /// Vertical offset in pixels.
    pub y: i32,
}

impl Point {
    /// Construct a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Board geometry: tile size, gutter spacing and slide speed.
///
/// Purely a rendering concern. Game logic never reads a tile's visual
/// position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Width and height of a tile in pixels. Default: 80.
    pub tile_size: i32,
    /// Gap between tiles and around the board edge in pixels. Default: 10.
    pub spacing: i32,
    /// Pixels a sliding tile travels per tick on each axis. Default: 20.
    pub slide_speed: i32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            tile_size: 80,
            spacing: 10,
            slide_speed: 20,
        }
    }
}

impl Layout {
    /// Check that the geometry can be rendered and that slides terminate.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.tile_size <= 0 {
            return Err(LayoutError::TileSize {
                value: self.tile_size,
            });
        }
        if self.spacing < 0 {
            return Err(LayoutError::Spacing {
                value: self.spacing,
            });
        }
        if self.slide_speed <= 0 {
            return Err(LayoutError::SlideSpeed {
                value: self.slide_speed,
            });
        }
        Ok(())
    }

    /// Canonical top-left pixel of `cell`.
    pub fn cell_origin(&self, cell: Cell) -> Point {
        let stride = self.tile_size + self.spacing;
        Point::new(
            self.spacing + cell.col() as i32 * stride,
            self.spacing + cell.row() as i32 * stride,
        )
    }

    /// Total board width including the outer gutters.
    pub fn board_width(&self) -> i32 {
        (COLS as i32 + 1) * self.spacing + COLS as i32 * self.tile_size
    }

    /// Total board height including the outer gutters.
    pub fn board_height(&self) -> i32 {
        (ROWS as i32 + 1) * self.spacing + ROWS as i32 * self.tile_size
    }

    /// Advance `current` one tick toward `target`.
    ///
    /// Each axis moves independently by exactly `slide_speed`, or snaps to
    /// the target when the remaining distance is smaller than that. Never
    /// overshoots.
    pub fn step_toward(&self, current: Point, target: Point) -> Point {
        Point::new(
            step_axis(current.x, target.x, self.slide_speed),
            step_axis(current.y, target.y, self.slide_speed),
        )
    }

    /// Upper bound on ticks needed to slide from `from` to `to`.
    pub fn ticks_to_settle(&self, from: Point, to: Point) -> u32 {
        let far = (from.x - to.x).abs().max((from.y - to.y).abs());
        // A remainder shorter than one step is absorbed by the snap.
        (far / self.slide_speed + i32::from(far % self.slide_speed != 0)) as u32
    }
}

fn step_axis(current: i32, target: i32, speed: i32) -> i32 {
    let dist = current - target;
    if dist.abs() < speed {
        target
    } else if dist < 0 {
        current + speed
    } else {
        current - speed
    }
}
