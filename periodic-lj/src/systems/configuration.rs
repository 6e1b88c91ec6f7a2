use ndarray::{Array2, ArrayView2};

use crate::{Error, Matrix3, Vector3D};
use super::UnitCell;

/// A set of particles inside a periodically repeated unit cell
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    cell: UnitCell,
    positions: Vec<Vector3D>,
}

impl Configuration {
    /// Create a new empty configuration with the given unit cell
    pub fn new(cell: UnitCell) -> Configuration {
        Configuration {
            cell: cell,
            positions: Vec::new(),
        }
    }

    /// Create a new configuration from arrays containing the Cartesian
    /// `positions` of the particles (with shape `N x 3`) and the `cell`
    /// matrix (with shape `3 x 3`, one lattice vector per row).
    pub fn from_arrays(positions: ArrayView2<'_, f64>, cell: ArrayView2<'_, f64>) -> Result<Configuration, Error> {
        let matrix = matrix_from_array("cell", cell)?;

        if positions.shape()[1] != 3 {
            return Err(Error::InvalidShape(format!(
                "expected the positions to have a shape of [N, 3], got {:?}", positions.shape()
            )));
        }

        let mut configuration = Configuration::new(UnitCell::new(matrix)?);
        for (i, row) in positions.outer_iter().enumerate() {
            let position = Vector3D::new(row[0], row[1], row[2]);
            if !(position[0].is_finite() && position[1].is_finite() && position[2].is_finite()) {
                return Err(Error::InvalidParameter(format!(
                    "the position of particle {} is not finite: {:?}", i, *position
                )));
            }
            configuration.add_particle(position);
        }

        return Ok(configuration);
    }

    /// Add a particle at the given `position` to this configuration
    pub fn add_particle(&mut self, position: Vector3D) {
        self.positions.push(position);
    }

    /// Get the number of particles in this configuration
    pub fn size(&self) -> usize {
        self.positions.len()
    }

    /// Get the unit cell of this configuration
    pub fn cell(&self) -> &UnitCell {
        &self.cell
    }

    /// Get the positions of all the particles in this configuration
    pub fn positions(&self) -> &[Vector3D] {
        &self.positions
    }

    /// Get the positions of all the particles as a `N x 3` array
    pub fn positions_array(&self) -> Array2<f64> {
        let mut array = Array2::zeros((self.positions.len(), 3));
        for (mut row, position) in array.outer_iter_mut().zip(&self.positions) {
            row[0] = position[0];
            row[1] = position[1];
            row[2] = position[2];
        }
        return array;
    }

    /// Get a copy of this configuration deformed by the given `strain`: both
    /// the lattice vectors and the positions `v` become `(I + strain) v`.
    pub fn strained(&self, strain: &Matrix3) -> Result<Configuration, Error> {
        let deformation = Matrix3::one() + strain;
        return Ok(Configuration {
            cell: self.cell.strained(strain)?,
            positions: self.positions.iter().map(|&position| deformation * position).collect(),
        });
    }

    /// Build a supercell of this configuration, containing `repeats[a]`
    /// copies of the cell along the lattice vector `a`.
    ///
    /// Particles are ordered by image first: all the particles of the
    /// original cell come first, followed by their copies translated by the
    /// third lattice vector, and so on, the first lattice vector varying
    /// slowest.
    pub fn repeat(&self, repeats: [usize; 3]) -> Result<Configuration, Error> {
        if repeats.iter().any(|&n| n == 0) {
            return Err(Error::InvalidParameter(format!(
                "repeats must be at least 1 along each cell vector, got {:?}", repeats
            )));
        }

        let [a, b, c] = self.cell.matrix().rows();
        let cell = UnitCell::new(Matrix3::new([
            *(a * repeats[0] as f64),
            *(b * repeats[1] as f64),
            *(c * repeats[2] as f64),
        ]))?;

        let mut supercell = Configuration::new(cell);
        for n_a in 0..repeats[0] {
            for n_b in 0..repeats[1] {
                for n_c in 0..repeats[2] {
                    let translation = n_a as f64 * a + n_b as f64 * b + n_c as f64 * c;
                    for &position in &self.positions {
                        supercell.add_particle(position + translation);
                    }
                }
            }
        }

        return Ok(supercell);
    }
}

/// Convert a `3 x 3` array to a `Matrix3`, using `name` in error messages
pub(crate) fn matrix_from_array(name: &str, array: ArrayView2<'_, f64>) -> Result<Matrix3, Error> {
    if array.shape() != [3, 3] {
        return Err(Error::InvalidShape(format!(
            "expected the {} to have a shape of [3, 3], got {:?}", name, array.shape()
        )));
    }

    let mut matrix = Matrix3::zero();
    for i in 0..3 {
        for j in 0..3 {
            matrix[i][j] = array[[i, j]];
        }
    }
    return Ok(matrix);
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn add_particles() {
        let mut configuration = Configuration::new(UnitCell::cubic(10.0).unwrap());
        configuration.add_particle(Vector3D::new(2.0, 3.0, 4.0));
        configuration.add_particle(Vector3D::new(1.0, 3.0, 4.0));
        configuration.add_particle(Vector3D::new(5.0, 3.0, 4.0));

        assert_eq!(configuration.size(), 3);
        assert_eq!(configuration.positions()[1], Vector3D::new(1.0, 3.0, 4.0));
        assert_eq!(configuration.positions_array()[[2, 0]], 5.0);
        assert_eq!(configuration.cell().volume(), 1000.0);
    }

    #[test]
    fn from_arrays() {
        let positions = array![[0.0, 0.0, 0.0], [1.0, 2.0, 3.0]];
        let cell = array![[4.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 6.0]];

        let configuration = Configuration::from_arrays(positions.view(), cell.view()).unwrap();
        assert_eq!(configuration.size(), 2);
        assert_eq!(configuration.positions()[1], Vector3D::new(1.0, 2.0, 3.0));
        assert_eq!(configuration.positions_array(), positions);
        assert_eq!(configuration.cell().matrix()[1], [0.0, 5.0, 0.0]);
    }

    #[test]
    fn from_arrays_errors() {
        let cell = array![[4.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 6.0]];

        let positions = array![[0.0, 0.0], [1.0, 2.0]];
        let error = Configuration::from_arrays(positions.view(), cell.view()).unwrap_err();
        assert!(matches!(error, Error::InvalidShape(_)));
        assert_eq!(error.to_string(), "invalid shape: expected the positions to have a shape of [N, 3], got [2, 2]");

        let positions = array![[0.0, 0.0, 0.0]];
        let bad_cell = array![[4.0, 0.0, 0.0], [0.0, 5.0, 0.0]];
        let error = Configuration::from_arrays(positions.view(), bad_cell.view()).unwrap_err();
        assert_eq!(error.to_string(), "invalid shape: expected the cell to have a shape of [3, 3], got [2, 3]");

        let singular = array![[4.0, 0.0, 0.0], [0.0, 5.0, 0.0], [4.0, 5.0, 0.0]];
        let error = Configuration::from_arrays(positions.view(), singular.view()).unwrap_err();
        assert!(matches!(error, Error::LinearAlgebra(_)));

        let positions = array![[0.0, f64::NAN, 0.0]];
        let error = Configuration::from_arrays(positions.view(), cell.view()).unwrap_err();
        assert!(matches!(error, Error::InvalidParameter(_)));
    }

    #[test]
    fn strained() {
        let mut configuration = Configuration::new(UnitCell::cubic(2.0).unwrap());
        configuration.add_particle(Vector3D::new(1.0, 1.0, 0.0));

        let strain = Matrix3::new([
            [0.0, 0.5, 0.0],
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
        ]);
        let strained = configuration.strained(&strain).unwrap();
        assert_eq!(strained.positions()[0], Vector3D::new(1.5, 1.0, 0.0));
        assert_eq!(strained.cell().matrix()[1], [1.0, 2.0, 0.0]);

        // the fractional coordinates are unchanged
        assert_relative_eq!(
            strained.cell().fractional(strained.positions()[0]),
            configuration.cell().fractional(configuration.positions()[0]),
            epsilon = 1e-12,
        );
    }

    #[test]
    fn repeat() {
        let mut configuration = Configuration::new(UnitCell::orthorhombic(1.0, 2.0, 3.0).unwrap());
        configuration.add_particle(Vector3D::new(0.0, 0.0, 0.0));
        configuration.add_particle(Vector3D::new(0.5, 0.5, 0.5));

        let supercell = configuration.repeat([2, 1, 3]).unwrap();
        assert_eq!(supercell.size(), 12);
        assert_eq!(supercell.cell().matrix()[0], [2.0, 0.0, 0.0]);
        assert_eq!(supercell.cell().matrix()[2], [0.0, 0.0, 9.0]);

        assert_eq!(supercell.positions()[0], Vector3D::new(0.0, 0.0, 0.0));
        assert_eq!(supercell.positions()[1], Vector3D::new(0.5, 0.5, 0.5));
        assert_eq!(supercell.positions()[2], Vector3D::new(0.0, 0.0, 3.0));
        assert_eq!(supercell.positions()[6], Vector3D::new(1.0, 0.0, 0.0));
        assert_eq!(supercell.positions()[11], Vector3D::new(1.5, 0.5, 6.5));

        assert!(configuration.repeat([1, 0, 1]).is_err());
    }
}
