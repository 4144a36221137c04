//! Reductions of a lattice to the quantities reported at the end of a run.

use ndarray::Axis;

use crate::lbm::compute_macros;
use crate::lbm::constants::C_SQ;
use crate::lbm::lattice::{Lattice, ObstacleMask};
use crate::Float;

/// Mean speed `|u|` over all fluid cells, `0` if there are none.
pub fn av_velocity(lattice: &Lattice, obstacles: &ObstacleMask) -> Float {
    let blocked = obstacles.view();
    let mut tot_u = 0.;
    let mut tot_cells = 0usize;

    for ((y, x), &solid) in blocked.indexed_iter() {
        if solid {
            continue;
        }
        let (_, ux, uy) = compute_macros(&lattice.cell(x, y));
        tot_u += (ux * ux + uy * uy).sqrt();
        tot_cells += 1;
    }

    if tot_cells == 0 {
        0.
    } else {
        tot_u / tot_cells as Float
    }
}

pub fn kinematic_viscosity(omega: Float) -> Float {
    1. / 6. * (2. / omega - 1.)
}

pub fn reynolds_number(av_velocity: Float, reynolds_dim: Float, omega: Float) -> Float {
    av_velocity * reynolds_dim / kinematic_viscosity(omega)
}

/// Macroscopic state of one cell at the end of a run.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct CellState {
    pub x: usize,
    pub y: usize,
    pub ux: Float,
    pub uy: Float,
    pub speed: Float,
    pub pressure: Float,
    pub blocked: bool,
}

/// Per-cell velocity and pressure, row by row from `y = 0`.
///
/// Obstacle cells report zero velocity and the reference pressure
/// `density * c_sq`.
pub fn final_state(lattice: &Lattice, obstacles: &ObstacleMask, density: Float) -> Vec<CellState> {
    let blocked = obstacles.view();
    let mut states = Vec::with_capacity(blocked.len());

    for (y, row) in blocked.axis_iter(Axis(0)).enumerate() {
        for (x, &solid) in row.iter().enumerate() {
            let state = if solid {
                CellState {
                    x,
                    y,
                    ux: 0.,
                    uy: 0.,
                    speed: 0.,
                    pressure: density * C_SQ,
                    blocked: true,
                }
            } else {
                let (rho, ux, uy) = compute_macros(&lattice.cell(x, y));
                CellState {
                    x,
                    y,
                    ux,
                    uy,
                    speed: (ux * ux + uy * uy).sqrt(),
                    pressure: rho * C_SQ,
                    blocked: false,
                }
            };
            states.push(state);
        }
    }

    states
}
