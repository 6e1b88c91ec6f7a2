use log::debug;

use crate::{Error, Matrix3, Vector3D};
use super::UnitCell;

/// A cell shift represents the displacement along cell axis between a
/// particle in the reference cell and one of its periodic images.
///
/// The cell shift can be used to reconstruct the vector between two points,
/// as `position[second] - position[first] + shift.cartesian(cell)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CellShift(pub [i32; 3]);

impl std::ops::Add<CellShift> for CellShift {
    type Output = CellShift;

    fn add(mut self, rhs: CellShift) -> Self::Output {
        self.0[0] += rhs[0];
        self.0[1] += rhs[1];
        self.0[2] += rhs[2];
        return self;
    }
}

impl std::ops::Sub<CellShift> for CellShift {
    type Output = CellShift;

    fn sub(mut self, rhs: CellShift) -> Self::Output {
        self.0[0] -= rhs[0];
        self.0[1] -= rhs[1];
        self.0[2] -= rhs[2];
        return self;
    }
}

impl std::ops::Index<usize> for CellShift {
    type Output = i32;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<[i32; 3]> for CellShift {
    fn from(shift: [i32; 3]) -> CellShift {
        CellShift(shift)
    }
}

impl CellShift {
    /// Compute the shift vector in cartesian coordinates, using the given cell
    /// matrix (stored in row major order).
    pub fn cartesian(&self, cell: &Matrix3) -> Vector3D {
        let x = cell[0][0] * self[0] as f64 + cell[1][0] * self[1] as f64 + cell[2][0] * self[2] as f64;
        let y = cell[0][1] * self[0] as f64 + cell[1][1] * self[1] as f64 + cell[2][1] * self[2] as f64;
        let z = cell[0][2] * self[0] as f64 + cell[1][2] * self[1] as f64 + cell[2][2] * self[2] as f64;
        Vector3D::new(x, y, z)
    }

    /// Is this the shift of the reference cell?
    pub fn is_zero(&self) -> bool {
        self.0 == [0, 0, 0]
    }

    /// Is this shift in the positive half-space of shifts, i.e. is its first
    /// non-zero component positive? Exactly one of `shift` and `-shift` is in
    /// the positive half-space, except for the zero shift which is in neither.
    pub fn is_positive(&self) -> bool {
        for &component in &self.0 {
            if component != 0 {
                return component > 0;
            }
        }
        return false;
    }
}

/// Wrap all the `positions` inside the unit `cell`, returning the wrapped
/// positions and the cell shift applied to each one of them. The fractional
/// coordinates of the wrapped positions are in `[0, 1)`, up to rounding.
pub(crate) fn wrap_positions(cell: &UnitCell, positions: &[Vector3D]) -> (Vec<Vector3D>, Vec<CellShift>) {
    let matrix = cell.matrix();

    let mut wrapped = Vec::with_capacity(positions.len());
    let mut wrap_shifts = Vec::with_capacity(positions.len());
    for &position in positions {
        let fractional = cell.fractional(position);
        let shift = CellShift([
            -f64::floor(fractional[0]) as i32,
            -f64::floor(fractional[1]) as i32,
            -f64::floor(fractional[2]) as i32,
        ]);
        wrapped.push(position + shift.cartesian(&matrix));
        wrap_shifts.push(shift);
    }

    return (wrapped, wrap_shifts);
}

/// The set of periodic images of a unit cell that may contain a neighbor of
/// any particle in the reference cell.
///
/// Images are stored as the full Cartesian product of one inclusive integer
/// range per lattice direction, with the first direction varying slowest.
/// The zero shift is always part of the images.
#[derive(Debug, Clone, PartialEq)]
pub struct CellImages {
    lower: [i32; 3],
    upper: [i32; 3],
    shifts: Vec<CellShift>,
}

impl CellImages {
    /// Find all the images of `cell` containing at least one particle within
    /// `cutoff` of a particle at one of the given `positions`.
    ///
    /// Along each lattice direction `a`, a pair separated by at most `cutoff`
    /// has fractional coordinates separated by at most `cutoff / h_a`, where
    /// `h_a` is the distance between the faces of the cell orthogonal to
    /// `a`. The bounds on the shifts follow from the extent of the fractional
    /// coordinates of the particles, and also work for particles outside of
    /// the cell.
    #[time_graph::instrument(name = "CellImages::new")]
    pub fn new(cell: &UnitCell, positions: &[Vector3D], cutoff: f64) -> Result<CellImages, Error> {
        crate::errors::check_positive("cutoff", cutoff)?;

        let mut min_fractional = [0.0; 3];
        let mut max_fractional = [0.0; 3];
        for (i, &position) in positions.iter().enumerate() {
            let fractional = cell.fractional(position);
            for axis in 0..3 {
                if i == 0 || fractional[axis] < min_fractional[axis] {
                    min_fractional[axis] = fractional[axis];
                }
                if i == 0 || fractional[axis] > max_fractional[axis] {
                    max_fractional[axis] = fractional[axis];
                }
            }
        }

        let faces = cell.distances_between_faces();

        let mut lower = [0; 3];
        let mut upper = [0; 3];
        for axis in 0..3 {
            let repeats = cutoff / faces[axis];
            let extent = max_fractional[axis] - min_fractional[axis];

            let max_shift = f64::floor(extent + repeats);
            if !max_shift.is_finite() || max_shift > f64::from(i32::MAX / 2) {
                return Err(Error::InvalidParameter(format!(
                    "can not enumerate periodic images along cell vector {} \
                    (cutoff = {}, distance between faces = {})",
                    axis, cutoff, faces[axis]
                )));
            }

            // the extent is non-negative, so these always contain 0
            lower[axis] = f64::ceil(-extent - repeats) as i32;
            upper[axis] = max_shift as i32;
        }

        let mut shifts = Vec::new();
        for n_a in lower[0]..=upper[0] {
            for n_b in lower[1]..=upper[1] {
                for n_c in lower[2]..=upper[2] {
                    shifts.push(CellShift([n_a, n_b, n_c]));
                }
            }
        }

        debug!(
            "using {} periodic images for cutoff {} (shifts from {:?} to {:?})",
            shifts.len(), cutoff, lower, upper
        );

        return Ok(CellImages {
            lower: lower,
            upper: upper,
            shifts: shifts,
        });
    }

    /// Get the list of cell shifts for all images
    pub fn shifts(&self) -> &[CellShift] {
        &self.shifts
    }

    /// Get the inclusive lower and upper bounds of the shifts along each
    /// lattice direction
    pub fn bounds(&self) -> ([i32; 3], [i32; 3]) {
        (self.lower, self.upper)
    }

    /// Get the number of images
    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    /// Check if there are no images. This is never the case for images
    /// created with `CellImages::new`, which always contain the zero shift.
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }
}
