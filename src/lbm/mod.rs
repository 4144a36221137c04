pub mod boundaries;
pub mod constants;
pub mod diagnostics;
pub mod lattice;

use std::sync::OnceLock;

use log::{debug, info, log_enabled, warn, Level};
use ndarray::prelude::*;
use rayon::prelude::*;

use crate::error::{LbmError, Result};
use crate::lbm::boundaries::bounce_back;
use crate::lbm::constants::{C, C_F64, C_SQ, Q, T};
use crate::lbm::diagnostics::CellState;
use crate::lbm::lattice::{Lattice, ObstacleMask};
use crate::params::Params;
use crate::Float;

pub type D2Q9 = [Float; Q];

const PAR_THRESHOLD_DEFAULT: usize = 16_384;
const PAR_MIN_CELLS_PER_THREAD: usize = 1024;

fn parallel_threshold() -> usize {
    static THRESHOLD: OnceLock<usize> = OnceLock::new();
    *THRESHOLD.get_or_init(|| {
        std::env::var("D2Q9_PAR_THRESHOLD")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(PAR_THRESHOLD_DEFAULT)
    })
}

fn should_parallel(cells: usize) -> bool {
    if cells < parallel_threshold() {
        return false;
    }
    let threads = rayon::current_num_threads().max(1);
    cells / threads >= PAR_MIN_CELLS_PER_THREAD
}

pub fn compute_macros(f: &D2Q9) -> (Float, Float, Float) {
    let upper_line = f[2] + f[5] + f[6];
    let medium_line = f[0] + f[1] + f[3];
    let lower_line = f[4] + f[7] + f[8];
    let rho = upper_line + medium_line + lower_line;
    let ux = (f[1] + f[5] + f[8] - (f[3] + f[6] + f[7])) / rho;
    let uy = (upper_line - lower_line) / rho;

    (rho, ux, uy)
}

pub fn compute_equilibrium(i_pop: usize, rho: Float, ux: Float, uy: Float, u_sqr: Float) -> Float {
    let c_u = C_F64[i_pop][0] * ux + C_F64[i_pop][1] * uy;
    T[i_pop] * rho * (1. + c_u / C_SQ + (c_u * c_u) / (2. * C_SQ * C_SQ) - u_sqr / (2. * C_SQ))
}

pub fn ini_equilibrium(rho: Float, ux: Float, uy: Float) -> D2Q9 {
    let u_sqr = ux * ux + uy * uy;
    std::array::from_fn(|i_pop| compute_equilibrium(i_pop, rho, ux, uy, u_sqr))
}

/// BGK collision of one fluid cell.
///
/// Returns the relaxed populations together with the cell's speed `|u|`, or
/// `None` if the local density is not strictly positive and finite, in which
/// case the velocity is undefined.
pub fn bgk(mut f_pop: D2Q9, omega: Float) -> Option<(D2Q9, Float)> {
    let (rho, ux, uy) = compute_macros(&f_pop);
    if !(rho > 0. && rho.is_finite()) {
        return None;
    }
    let u_sqr = ux * ux + uy * uy;

    for (i_pop, f) in f_pop.iter_mut().enumerate() {
        *f += omega * (compute_equilibrium(i_pop, rho, ux, uy, u_sqr) - *f);
    }

    Some((f_pop, u_sqr.sqrt()))
}

// index of the cell one step against velocity component `c`, periodic in `n`
#[inline]
fn upstream(i: usize, c: i32, n: usize) -> usize {
    match c {
        1 if i == 0 => n - 1,
        1 => i - 1,
        -1 if i + 1 == n => 0,
        -1 => i + 1,
        _ => i,
    }
}

/// Populations arriving at `(x, y)` from its neighbours in one propagation step.
#[inline]
pub fn pull(src: ArrayView3<Float>, x: usize, y: usize) -> D2Q9 {
    let (_, ny, nx) = src.dim();
    std::array::from_fn(|i_pop| {
        let [cx, cy] = C[i_pop];
        src[[i_pop, upstream(y, cy, ny), upstream(x, cx, nx)]]
    })
}

#[derive(Copy, Clone, Default, PartialEq, Debug)]
struct Tally {
    tot_u: Float,
    tot_cells: usize,
}

impl Tally {
    fn merge(self, other: Self) -> Self {
        Tally {
            tot_u: self.tot_u + other.tot_u,
            tot_cells: self.tot_cells + other.tot_cells,
        }
    }

    fn av_velocity(self) -> Float {
        if self.tot_cells == 0 {
            0.
        } else {
            self.tot_u / self.tot_cells as Float
        }
    }
}

// propagate into row `y` of the target, then bounce back or collide in place
fn update_row(
    y: usize,
    mut target: ArrayViewMut2<Float>,
    src: ArrayView3<Float>,
    blocked: ArrayView2<bool>,
    omega: Float,
    iteration: usize,
) -> Result<Tally> {
    let mut tally = Tally::default();

    for x in 0..target.len_of(Axis(1)) {
        let arrived = pull(src, x, y);
        let f_pop = if blocked[[y, x]] {
            bounce_back(arrived)
        } else {
            let (f_pop, speed) = bgk(arrived, omega).ok_or_else(|| LbmError::Instability {
                iteration,
                x,
                y,
                density: arrived.iter().sum(),
            })?;
            tally.tot_u += speed;
            tally.tot_cells += 1;
            f_pop
        };

        for (i_pop, value) in f_pop.into_iter().enumerate() {
            target[[i_pop, x]] = value;
        }
    }

    Ok(tally)
}

/// Two lattice generations plus the obstacle mask, stepped in lockstep.
#[derive(PartialEq, Debug)]
pub struct Simulation {
    pub params: Params,
    pub obstacles: ObstacleMask,
    pub lattice: Lattice,
    tmp_lattice: Lattice,
    iteration: usize,
}

impl Simulation {
    pub fn new(params: Params, obstacles: &[(usize, usize)]) -> Result<Self> {
        params.validate()?;
        let obstacles = ObstacleMask::from_coords(params.nx, params.ny, obstacles)?;
        let lattice = Lattice::uniform(params.nx, params.ny, params.density);
        let tmp_lattice = lattice.clone();

        let fluid_cells = obstacles.fluid_cells();
        info!(
            "initialised {}x{} lattice, {} fluid cells, omega={:.6}",
            params.nx, params.ny, fluid_cells, params.omega
        );
        if fluid_cells == 0 {
            warn!("every cell is an obstacle, average velocity will stay 0");
        }

        Ok(Simulation {
            params,
            obstacles,
            lattice,
            tmp_lattice,
            iteration: 0,
        })
    }

    /// Number of completed propagate/collide steps.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn accelerate_flow(&mut self) {
        boundaries::accelerate_flow(
            &mut self.lattice,
            &self.obstacles,
            self.params.density,
            self.params.accel,
        );
    }

    /// Fused propagation, bounce-back and collision into the scratch lattice,
    /// which then becomes the current one. Returns the average fluid velocity.
    pub fn propagate_collide(&mut self) -> Result<Float> {
        let parallel = should_parallel(self.params.nx * self.params.ny);
        self.propagate_collide_with(parallel)
    }

    fn propagate_collide_with(&mut self, parallel: bool) -> Result<Float> {
        let omega = self.params.omega;
        let iteration = self.iteration;
        let src = self.lattice.speeds();
        let blocked = self.obstacles.view();
        let mut target = self.tmp_lattice.speeds_mut();
        let rows = target.axis_iter_mut(Axis(1));

        let update = |(y, row): (usize, ArrayViewMut2<Float>)| {
            update_row(y, row, src, blocked, omega, iteration)
        };

        let tally = if parallel {
            rows.into_par_iter()
                .enumerate()
                .map(update)
                .try_reduce(Tally::default, |a, b| Ok(a.merge(b)))?
        } else {
            rows.enumerate()
                .map(update)
                .try_fold(Tally::default(), |acc, row| row.map(|row| acc.merge(row)))?
        };

        std::mem::swap(&mut self.tmp_lattice, &mut self.lattice);
        self.iteration += 1;

        Ok(tally.av_velocity())
    }

    /// One timestep: inlet forcing, then propagate/collide.
    pub fn step(&mut self) -> Result<Float> {
        let tt = self.iteration;
        self.accelerate_flow();
        let av_vel = self.propagate_collide()?;

        if log_enabled!(Level::Debug) {
            debug!("==timestep: {}==", tt);
            debug!("av velocity: {:.12E}", av_vel);
            debug!("tot density: {:.12E}", self.lattice.total_density());
        }

        Ok(av_vel)
    }

    /// Runs `max_iters` timesteps and returns the average velocity of each.
    pub fn run(&mut self) -> Result<Vec<Float>> {
        let mut av_vels = Vec::with_capacity(self.params.max_iters);
        for _ in 0..self.params.max_iters {
            av_vels.push(self.step()?);
        }
        info!("completed {} iterations", self.params.max_iters);
        Ok(av_vels)
    }

    pub fn av_velocity(&self) -> Float {
        diagnostics::av_velocity(&self.lattice, &self.obstacles)
    }

    pub fn total_density(&self) -> Float {
        self.lattice.total_density()
    }

    pub fn reynolds_number(&self) -> Float {
        diagnostics::reynolds_number(
            self.av_velocity(),
            self.params.reynolds_dim as Float,
            self.params.omega,
        )
    }

    pub fn final_state(&self) -> Vec<CellState> {
        diagnostics::final_state(&self.lattice, &self.obstacles, self.params.density)
    }
}
