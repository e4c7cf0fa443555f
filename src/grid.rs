use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GridError;
use crate::facing::Facing;

/// Scene-space point a renderer can use to draw something on a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPosition {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        WorldPosition { x, y, z }
    }

    /// Linear interpolation, `t` clamped to `[0, 1]`
    pub fn lerp(self, other: WorldPosition, t: f32) -> WorldPosition {
        let t = t.clamp(0.0, 1.0);
        WorldPosition {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }
}

/// One addressable slot of the table.
///
/// `x` and `y` are authoritative; `world_position` is only a rendering hint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    x: i32,
    y: i32,
    world_position: WorldPosition,
}

impl Cell {
    fn new(x: i32, y: i32, world_position: WorldPosition) -> Self {
        Cell { x, y, world_position }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn world_position(&self) -> WorldPosition {
        self.world_position
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// The table: a fixed `width x length` set of cells, immutable once generated.
#[derive(Clone, Debug)]
pub struct Grid {
    width: i32,
    length: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Generate a table whose cells sit one world unit apart
    pub fn generate(width: i32, length: i32) -> Result<Self, GridError> {
        Self::generate_with_cell_size(width, length, 1.0)
    }

    /// Generate a table, mapping cell (i, j) to world position (i * size, 0, j * size)
    pub fn generate_with_cell_size(width: i32, length: i32, cell_size: f32) -> Result<Self, GridError> {
        let count = match width.checked_mul(length) {
            Some(count) if width > 0 && length > 0 => count,
            _ => return Err(GridError::InvalidDimensions { width, length }),
        };

        let mut cells = Vec::with_capacity(count as usize);
        for y in 0..length {
            for x in 0..width {
                let world = WorldPosition::new(x as f32 * cell_size, 0.0, y as f32 * cell_size);
                cells.push(Cell::new(x, y, world));
            }
        }

        Ok(Grid { width, length, cells })
    }

    /// Number of columns (the x extent)
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows (the y extent)
    pub fn length(&self) -> i32 {
        self.length
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Check if (x, y) lies on the table
    pub fn is_valid_cell(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.length
    }

    /// Convert (x, y) coordinates to cell ID
    pub fn get_id(&self, x: i32, y: i32) -> i32 {
        x + y * self.width
    }

    pub fn get_cell(&self, x: i32, y: i32) -> Result<Cell, GridError> {
        if !self.is_valid_cell(x, y) {
            return Err(GridError::OutOfRange { x, y });
        }
        Ok(self.cells[self.get_id(x, y) as usize])
    }

    /// Adjacent cell one step towards `facing`, or `cell` itself when that
    /// step would leave the table.
    pub fn neighbor_in_direction(&self, cell: &Cell, facing: Facing) -> Cell {
        let (dx, dy) = facing.delta();
        self.get_cell(cell.x + dx, cell.y + dy).unwrap_or(*cell)
    }
}
