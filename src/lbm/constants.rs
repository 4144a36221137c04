//! D2Q9 lattice constants.
//!
//! ```text
//!   6   2   5
//!    \  |  /
//!   3 - 0 - 1
//!    /  |  \
//!   7   4   8
//! ```

use crate::Float;

/// Number of discrete velocities.
pub const Q: usize = 9;

pub const C: [[i32; 2]; Q] = [
    [0, 0],
    [1, 0],
    [0, 1],
    [-1, 0],
    [0, -1],
    [1, 1],
    [-1, 1],
    [-1, -1],
    [1, -1],
];

pub const C_F64: [[Float; 2]; Q] = [
    [0., 0.],
    [1., 0.],
    [0., 1.],
    [-1., 0.],
    [0., -1.],
    [1., 1.],
    [-1., 1.],
    [-1., -1.],
    [1., -1.],
];

/// Lattice weights: w0 for the rest population, w1 on the axes, w2 on the diagonals.
pub const T: [Float; Q] = [
    4. / 9.,
    1. / 9.,
    1. / 9.,
    1. / 9.,
    1. / 9.,
    1. / 36.,
    1. / 36.,
    1. / 36.,
    1. / 36.,
];

pub const OPPOSITE_OF: [usize; Q] = [0, 3, 4, 1, 2, 7, 8, 5, 6];

/// Square of the lattice speed of sound.
pub const C_SQ: Float = 1. / 3.;

pub const EAST: usize = 1;
pub const NORTH: usize = 2;
pub const WEST: usize = 3;
pub const SOUTH: usize = 4;
pub const NORTH_EAST: usize = 5;
pub const NORTH_WEST: usize = 6;
pub const SOUTH_WEST: usize = 7;
pub const SOUTH_EAST: usize = 8;
