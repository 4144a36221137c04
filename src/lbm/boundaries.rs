use ndarray::Axis;

use crate::lbm::constants::{
    EAST, NORTH_EAST, NORTH_WEST, OPPOSITE_OF, SOUTH_EAST, SOUTH_WEST, WEST,
};
use crate::lbm::lattice::{Lattice, ObstacleMask};
use crate::lbm::D2Q9;
use crate::Float;

/// No-slip wall: every population leaves along its opposite direction.
pub fn bounce_back(f_pop: D2Q9) -> D2Q9 {
    std::array::from_fn(|i_pop| f_pop[OPPOSITE_OF[i_pop]])
}

/// Inlet forcing on the second row from the top (`y = ny - 2`).
///
/// Pushes `density * accel` worth of momentum from the west-side populations
/// into the east-side ones of every fluid cell in the row, weighted like the
/// lattice (1/9 on the axis, 1/36 on the diagonals). A cell is skipped if any
/// of its west-side populations would not stay positive.
pub fn accelerate_flow(lattice: &mut Lattice, obstacles: &ObstacleMask, density: Float, accel: Float) {
    let w1 = density * accel / 9.;
    let w2 = density * accel / 36.;

    let y = lattice.ny() - 2;
    let blocked = obstacles.view();
    let mut row = lattice.speeds_mut().index_axis_move(Axis(1), y);

    for x in 0..row.len_of(Axis(1)) {
        if blocked[[y, x]] {
            continue;
        }
        if row[[WEST, x]] - w1 > 0.
            && row[[NORTH_WEST, x]] - w2 > 0.
            && row[[SOUTH_WEST, x]] - w2 > 0.
        {
            row[[EAST, x]] += w1;
            row[[NORTH_EAST, x]] += w2;
            row[[SOUTH_EAST, x]] += w2;

            row[[WEST, x]] -= w1;
            row[[NORTH_WEST, x]] -= w2;
            row[[SOUTH_WEST, x]] -= w2;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lbm::compute_macros;
    use approx::assert_relative_eq;

    #[test]
    fn test_bounce_back() {
        let mut sample = [0., 1., 2., 3., 4., 5., 6., 7., 8.];

        sample = bounce_back(sample);

        assert_eq!(sample, [0., 3., 4., 1., 2., 7., 8., 5., 6.]);
    }

    #[test]
    fn test_accelerate_flow_only_touches_inlet_row() {
        let (nx, ny) = (4, 5);
        let mut lattice = Lattice::uniform(nx, ny, 0.1);
        let before = lattice.clone();

        accelerate_flow(&mut lattice, &ObstacleMask::new(nx, ny), 0.1, 0.005);

        for y in 0..ny {
            for x in 0..nx {
                let (rho, ux, uy) = compute_macros(&lattice.cell(x, y));
                assert_relative_eq!(rho, 0.1, epsilon = 1e-15);
                if y == ny - 2 {
                    assert!(ux > 0.);
                    assert_relative_eq!(uy, 0., epsilon = 1e-15);
                } else {
                    assert_eq!(lattice.cell(x, y), before.cell(x, y));
                }
            }
        }
    }

    #[test]
    fn test_accelerate_flow_increments() {
        let mut lattice = Lattice::uniform(2, 3, 0.1);
        let before = lattice.cell(0, 1);

        accelerate_flow(&mut lattice, &ObstacleMask::new(2, 3), 0.1, 0.005);

        let after = lattice.cell(0, 1);
        let w1 = 0.1 * 0.005 / 9.;
        let w2 = 0.1 * 0.005 / 36.;
        assert_relative_eq!(after[EAST] - before[EAST], w1, epsilon = 1e-15);
        assert_relative_eq!(before[WEST] - after[WEST], w1, epsilon = 1e-15);
        assert_relative_eq!(after[NORTH_EAST] - before[NORTH_EAST], w2, epsilon = 1e-15);
        assert_relative_eq!(after[SOUTH_EAST] - before[SOUTH_EAST], w2, epsilon = 1e-15);
        assert_relative_eq!(before[NORTH_WEST] - after[NORTH_WEST], w2, epsilon = 1e-15);
        assert_relative_eq!(before[SOUTH_WEST] - after[SOUTH_WEST], w2, epsilon = 1e-15);
    }

    #[test]
    fn test_accelerate_flow_skips_obstacles() {
        let mut lattice = Lattice::uniform(3, 4, 0.1);
        let mask = ObstacleMask::from_coords(3, 4, &[(1, 2)]).unwrap();
        let before = lattice.clone();

        accelerate_flow(&mut lattice, &mask, 0.1, 0.005);

        assert_eq!(lattice.cell(1, 2), before.cell(1, 2));
        assert_ne!(lattice.cell(0, 2), before.cell(0, 2));
        assert_ne!(lattice.cell(2, 2), before.cell(2, 2));
    }

    #[test]
    fn test_accelerate_flow_never_drives_populations_negative() {
        let mut lattice = Lattice::uniform(2, 2, 0.1);
        // accel so large that w1 exceeds the west population
        let before = lattice.clone();

        accelerate_flow(&mut lattice, &ObstacleMask::new(2, 2), 0.1, 2.);

        assert_eq!(lattice, before);
    }
}
