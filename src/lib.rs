//! D2Q9 lattice Boltzmann flow with BGK collisions on a periodic 2D grid.
//!
//! ```text
//!   6   2   5
//!    \  |  /
//!   3 - 0 - 1
//!    /  |  \
//!   7   4   8
//! ```
//!
//! Every timestep accelerates the flow on the inlet row (`y = ny - 2`), pulls
//! each cell's populations from its neighbours into a scratch lattice, bounces
//! them back at obstacles or relaxes them toward equilibrium elsewhere, and
//! swaps the two lattices.

#![warn(clippy::all, clippy::nursery)]

pub mod error;
pub mod lbm;
pub mod obstacles;
pub mod output;
pub mod params;

pub type Float = f64;

pub use crate::error::{LbmError, Result};
pub use crate::lbm::diagnostics::CellState;
pub use crate::lbm::lattice::{Lattice, ObstacleMask};
pub use crate::lbm::{Simulation, D2Q9};
pub use crate::params::Params;
