use log::warn;
use ndarray::{Array3, ArrayView2, Zip};

use crate::errors::{check_positive, check_non_negative};
use crate::Error;

use super::{CellImages, CellShift, Configuration, Pair, PairList};
use super::images::wrap_positions;

/// Dense storage of the distances between all pairs of particles across all
/// the periodic images that could contain neighbors.
///
/// The particles are first wrapped inside the unit cell, so the number of
/// images only depends on the cell and the cutoff, and not on how far the
/// particles are from the reference cell. `distances[[i, j, k]]` is the
/// distance between the wrapped particle `i` and the wrapped particle `j`
/// shifted by `shifts[k]`. Entries beyond the cutoff window, and entries
/// between coincident particles, are set to zero: a zero entry never
/// corresponds to a pair. The shift between the particles before wrapping
/// is `shifts[k] + wrap_shifts[j] - wrap_shifts[i]`.
///
/// Each physical pair appears twice, as `(i, j, shift)` and `(j, i, -shift)`.
#[derive(Debug, Clone)]
pub struct DenseDistances {
    distances: Array3<f64>,
    shifts: Vec<CellShift>,
    wrap_shifts: Vec<CellShift>,
}

impl DenseDistances {
    /// Compute all the distances up to `cutoff + skin` in the given
    /// `configuration`.
    #[time_graph::instrument(name = "DenseDistances::new")]
    pub fn new(configuration: &Configuration, cutoff: f64, skin: f64) -> Result<DenseDistances, Error> {
        check_positive("cutoff", cutoff)?;
        check_non_negative("skin", skin)?;
        let window = cutoff + skin;

        let cell = configuration.cell();
        let (positions, wrap_shifts) = wrap_positions(cell, configuration.positions());

        let images = CellImages::new(cell, &positions, window)?;
        let matrix = cell.matrix();
        let translations = images.shifts().iter()
            .map(|shift| shift.cartesian(&matrix))
            .collect::<Vec<_>>();

        let n_particles = positions.len();
        let mut distances = Array3::zeros((n_particles, n_particles, translations.len()));
        Zip::indexed(&mut distances).par_for_each(|(i, j, k), distance| {
            let vector = positions[j] + translations[k] - positions[i];
            let distance2 = vector * vector;

            // do not take the square root of zero, this entry stays zero
            if distance2 == 0.0 {
                if i != j {
                    warn!("particles {} and {} are at the same position, ignoring this pair", i, j);
                }
                return;
            }

            if super::is_pair(distance2, window) {
                if distance2 < 1e-3 {
                    warn!(
                        "particles {} and {} are very close to one another ({})",
                        i, j, distance2.sqrt()
                    );
                }
                *distance = distance2.sqrt();
            }
        });

        return Ok(DenseDistances {
            distances: distances,
            shifts: images.shifts().to_vec(),
            wrap_shifts: wrap_shifts,
        });
    }

    /// Get the distances array, with shape `N x N x n_images`
    pub fn distances(&self) -> &Array3<f64> {
        &self.distances
    }

    /// Get the distances array, consuming this `DenseDistances`
    pub fn into_distances(self) -> Array3<f64> {
        self.distances
    }

    /// Get the cell shift applied to each particle to wrap it inside the
    /// unit cell
    pub fn wrap_shifts(&self) -> &[CellShift] {
        &self.wrap_shifts
    }

    /// Get the cell shifts associated with the last axis of the distances
    pub fn shifts(&self) -> &[CellShift] {
        &self.shifts
    }

    /// Get the number of neighbors of each particle, i.e. the number of
    /// non-zero distances involving this particle as the first one.
    pub fn neighbor_counts(&self) -> Vec<usize> {
        self.distances.outer_iter()
            .map(|row| row.iter().filter(|&&distance| distance != 0.0).count())
            .collect()
    }

    /// Get the number of physical pairs, counting `i-j` and `j-i` once
    pub fn pair_count(&self) -> usize {
        let entries = self.distances.iter().filter(|&&distance| distance != 0.0).count();
        debug_assert!(entries % 2 == 0);
        return entries / 2;
    }
}

impl PairList for DenseDistances {
    fn pairs(&self) -> Vec<Pair> {
        self.distances.indexed_iter()
            .filter(|(_, &distance)| distance != 0.0)
            .map(|((i, j, k), _)| Pair {
                first: i,
                second: j,
                // shift between the particles before wrapping
                shift: self.shifts[k] + self.wrap_shifts[j] - self.wrap_shifts[i],
            })
            .collect()
    }

    fn pair_weight(&self) -> f64 {
        0.5
    }
}

/// Compute the distances between all particles at `positions` (`N x 3`
/// array) and all the periodic images of the particles in `cell` (`3 x 3`
/// array, one lattice vector per row), for distances up to `cutoff + skin`.
///
/// If a `strain` (`3 x 3` array) is given, both the cell and the positions
/// are deformed by `I + strain` before computing the distances.
///
/// The output has a shape of `N x N x n_images`, where the images are
/// ordered as in [`CellImages`]. See [`DenseDistances`] for the meaning of
/// the entries.
pub fn get_distances(
    positions: ArrayView2<'_, f64>,
    cell: ArrayView2<'_, f64>,
    cutoff: f64,
    skin: f64,
    strain: Option<ArrayView2<'_, f64>>,
) -> Result<Array3<f64>, Error> {
    let mut configuration = Configuration::from_arrays(positions, cell)?;
    if let Some(strain) = strain {
        let strain = super::matrix_from_array("strain", strain)?;
        configuration = configuration.strained(&strain)?;
    }

    let distances = DenseDistances::new(&configuration, cutoff, skin)?;
    return Ok(distances.into_distances());
}
