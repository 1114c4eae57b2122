//! Fixed-size row-major grid shared by every terrain layer.

use serde::{Deserialize, Serialize};

/// Cell position; signed so neighbourhood offsets can step off the edge and
/// be rejected by the bounds check instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Chebyshev distance.
    pub fn ring_distance(self, other: Cell) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    pub fn manhattan_distance(self, other: Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Offsets of the 8-neighbourhood, row by row from the top-left.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Largest width or height a grid supports; cell coordinates are `i32`.
pub const MAX_DIMENSION: usize = i32::MAX as usize;

/// Dimensions above `MAX_DIMENSION` are not representable as `Cell`s and
/// must be rejected before a grid is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self {
            width,
            height,
            data: vec![fill; width * height],
        }
    }
}

impl<T> Grid<T> {
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(Cell) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(Cell::new(x as i32, y as i32)));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    #[inline]
    fn index(&self, cell: Cell) -> Option<usize> {
        if self.in_bounds(cell) {
            Some(cell.y as usize * self.width + cell.x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, cell: Cell) -> Option<&T> {
        self.index(cell).map(|i| &self.data[i])
    }

    /// Writes `value` when `cell` is inside the grid; out-of-bounds writes are
    /// dropped and reported as `false`.
    pub fn set(&mut self, cell: Cell, value: T) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.data[i] = value;
                true
            }
            None => false,
        }
    }

    /// In-bounds members of the 8-neighbourhood, in `NEIGHBOR_OFFSETS` order.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |&(dx, dy)| cell.offset(dx, dy))
            .filter(move |c| self.in_bounds(*c))
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let width = self.width;
        (0..self.data.len()).map(move |i| Cell::new((i % width) as i32, (i / width) as i32))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, &T)> {
        self.cells().zip(self.data.iter())
    }

    pub fn values(&self) -> &[T] {
        &self.data
    }
}

impl<T: Copy> Grid<T> {
    /// Copying read; `None` outside the grid.
    pub fn at(&self, cell: Cell) -> Option<T> {
        self.get(cell).copied()
    }
}
