use ndarray::prelude::*;

use crate::error::{LbmError, Result};
use crate::lbm::constants::{Q, T};
use crate::lbm::D2Q9;
use crate::Float;

/// Distribution values of an `nx` x `ny` lattice, one contiguous plane per
/// direction. Shape is `(Q, ny, nx)`, so inside a plane the cell `(x, y)`
/// sits at offset `x + y * nx`.
#[derive(Clone, PartialEq, Debug)]
pub struct Lattice {
    speeds: Array3<Float>,
}

impl Lattice {
    pub fn zeros(nx: usize, ny: usize) -> Self {
        Lattice {
            speeds: Array3::zeros((Q, ny, nx)),
        }
    }

    /// Fluid at rest with the given density in every cell.
    pub fn uniform(nx: usize, ny: usize, density: Float) -> Self {
        Lattice {
            speeds: Array3::from_shape_fn((Q, ny, nx), |(i_pop, _, _)| density * T[i_pop]),
        }
    }

    pub fn nx(&self) -> usize {
        self.speeds.len_of(Axis(2))
    }

    pub fn ny(&self) -> usize {
        self.speeds.len_of(Axis(1))
    }

    pub fn cell(&self, x: usize, y: usize) -> D2Q9 {
        std::array::from_fn(|i_pop| self.speeds[[i_pop, y, x]])
    }

    pub fn set_cell(&mut self, x: usize, y: usize, f_pop: D2Q9) {
        for (i_pop, value) in f_pop.into_iter().enumerate() {
            self.speeds[[i_pop, y, x]] = value;
        }
    }

    pub fn speeds(&self) -> ArrayView3<'_, Float> {
        self.speeds.view()
    }

    pub fn speeds_mut(&mut self) -> ArrayViewMut3<'_, Float> {
        self.speeds.view_mut()
    }

    /// All values of one direction; contiguous, `to_slice` gives the flat
    /// array indexed `x + y * nx`.
    pub fn plane(&self, i_pop: usize) -> ArrayView2<'_, Float> {
        self.speeds.index_axis(Axis(0), i_pop)
    }

    /// Sum of every distribution on the lattice.
    pub fn total_density(&self) -> Float {
        self.speeds.sum()
    }
}

/// Solid cells of the lattice; `true` marks a no-flow cell.
#[derive(Clone, PartialEq, Debug)]
pub struct ObstacleMask {
    blocked: Array2<bool>,
}

impl ObstacleMask {
    pub fn new(nx: usize, ny: usize) -> Self {
        ObstacleMask {
            blocked: Array2::from_elem((ny, nx), false),
        }
    }

    pub fn from_coords(nx: usize, ny: usize, coords: &[(usize, usize)]) -> Result<Self> {
        let mut mask = Self::new(nx, ny);
        for &(x, y) in coords {
            if x >= nx || y >= ny {
                return Err(LbmError::ObstacleOutOfRange { x, y, nx, ny });
            }
            mask.blocked[[y, x]] = true;
        }
        Ok(mask)
    }

    pub fn is_blocked(&self, x: usize, y: usize) -> bool {
        self.blocked[[y, x]]
    }

    pub fn fluid_cells(&self) -> usize {
        self.blocked.iter().filter(|blocked| !**blocked).count()
    }

    /// Mask in `(y, x)` order.
    pub fn view(&self) -> ArrayView2<'_, bool> {
        self.blocked.view()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_uniform_lattice_is_at_rest() {
        let lattice = Lattice::uniform(3, 2, 0.1);

        assert_eq!(lattice.nx(), 3);
        assert_eq!(lattice.ny(), 2);
        let cell = lattice.cell(2, 1);
        for i_pop in 0..Q {
            assert_eq!(cell[i_pop], 0.1 * T[i_pop]);
        }
        approx::assert_relative_eq!(cell.iter().sum::<Float>(), 0.1, epsilon = 1e-15);
    }

    #[test]
    fn test_plane_is_indexed_x_plus_y_nx() {
        let mut lattice = Lattice::zeros(4, 3);
        let mut f_pop = [0.; Q];
        f_pop[5] = 7.;
        lattice.set_cell(1, 2, f_pop);

        let plane = lattice.plane(5).to_slice().unwrap();
        assert_eq!(plane.len(), 12);
        assert_eq!(plane[1 + 2 * 4], 7.);
        assert_eq!(plane.iter().sum::<Float>(), 7.);
        assert_eq!(lattice.plane(4).iter().sum::<Float>(), 0.);
    }

    #[test]
    fn test_total_density() {
        let lattice = Lattice::uniform(5, 4, 0.1);

        approx::assert_relative_eq!(lattice.total_density(), 20. * 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_mask_from_coords() {
        let mask = ObstacleMask::from_coords(3, 2, &[(0, 1), (2, 0)]).unwrap();

        assert!(mask.is_blocked(0, 1));
        assert!(mask.is_blocked(2, 0));
        assert!(!mask.is_blocked(1, 1));
        assert_eq!(mask.fluid_cells(), 4);
    }

    #[test]
    fn test_mask_rejects_out_of_range() {
        let err = ObstacleMask::from_coords(3, 2, &[(3, 0)]).unwrap_err();

        assert!(matches!(err, LbmError::ObstacleOutOfRange { x: 3, y: 0, .. }));
    }
}
