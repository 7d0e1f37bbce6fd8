//! A single numbered tile.

use tessera_core::Cell;

use crate::layout::{Layout, Point};

/// Frames of the spawn "grow" animation (scale 0.1 up to 1.0).
const SPAWN_FRAMES: u8 = 10;
/// Frames of the merge "pop" animation (scale 1.2 down toward 1.0).
const COMBINE_FRAMES: u8 = 3;
const COMBINE_START_SCALE: f32 = 1.2;
const COMBINE_SCALE_STEP: f32 = 0.08;

/// Transient visual effect on a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TileAnimation {
    /// No effect; drawn at scale 1.0.
    #[default]
    Idle,
    /// Growing in after a spawn. `frame` counts up from 0.
    Spawning {
        /// Frames elapsed since the spawn.
        frame: u8,
    },
    /// Popping after a merge. `frame` counts up from 0.
    Combining {
        /// Frames elapsed since the merge.
        frame: u8,
    },
}

impl TileAnimation {
    /// Draw scale for the current frame.
    pub fn scale(self) -> f32 {
        match self {
            TileAnimation::Idle => 1.0,
            TileAnimation::Spawning { frame } => f32::from(frame + 1) / f32::from(SPAWN_FRAMES),
            TileAnimation::Combining { frame } => {
                COMBINE_START_SCALE - COMBINE_SCALE_STEP * f32::from(frame)
            }
        }
    }

    fn advance(self) -> Self {
        match self {
            TileAnimation::Spawning { frame } if frame + 1 < SPAWN_FRAMES => {
                TileAnimation::Spawning { frame: frame + 1 }
            }
            TileAnimation::Combining { frame } if frame + 1 < COMBINE_FRAMES => {
                TileAnimation::Combining { frame: frame + 1 }
            }
            _ => TileAnimation::Idle,
        }
    }
}

/// A numbered tile owned by exactly one grid cell.
///
/// `cell` always equals the coordinates of the cell that owns the tile.
/// `position` is the animated pixel position and converges toward the
/// cell's canonical pixel position one slide step per tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    value: u32,
    cell: Cell,
    position: Point,
    can_combine: bool,
    animation: TileAnimation,
}

impl Tile {
    /// A freshly spawned tile, drawn at its cell and growing in.
    pub(crate) fn spawned(value: u32, cell: Cell, layout: &Layout) -> Self {
        Self {
            value,
            cell,
            position: layout.cell_origin(cell),
            can_combine: true,
            animation: TileAnimation::Spawning { frame: 0 },
        }
    }

    /// Game value of the tile.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// The cell that owns this tile.
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Current animated pixel position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Whether the tile may still absorb a tile during the current move.
    pub fn can_combine(&self) -> bool {
        self.can_combine
    }

    /// Whether the merge "pop" effect is playing.
    pub fn combine_animation_active(&self) -> bool {
        matches!(self.animation, TileAnimation::Combining { .. })
    }

    /// Current visual effect.
    pub fn animation(&self) -> TileAnimation {
        self.animation
    }

    /// Draw scale for the current frame.
    pub fn scale(&self) -> f32 {
        self.animation.scale()
    }

    pub(crate) fn relocate(&mut self, cell: Cell) {
        self.cell = cell;
    }

    /// Absorb an equal tile: double the value and lock out further merges
    /// for the rest of this move. Returns the new value.
    pub(crate) fn absorb(&mut self) -> u32 {
        self.value *= 2;
        self.can_combine = false;
        self.animation = TileAnimation::Combining { frame: 0 };
        self.value
    }

    pub(crate) fn release(&mut self) {
        self.can_combine = true;
    }

    /// One tick of slide and scale animation. Returns whether the tile is
    /// still moving or animating afterward.
    pub(crate) fn advance(&mut self, layout: &Layout) -> bool {
        let target = layout.cell_origin(self.cell);
        self.position = layout.step_toward(self.position, target);
        self.animation = self.animation.advance();
        self.position != target || self.animation != TileAnimation::Idle
    }
}
