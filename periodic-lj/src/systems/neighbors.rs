use log::{debug, warn};
use ndarray::ArrayView2;
use rayon::prelude::*;

use crate::errors::{check_positive, check_non_negative};
use crate::{Error, Vector3D};

use super::{CellShift, Configuration, Pair, PairList};
use super::images::wrap_positions;

/// A one-way (or half) neighbor list, where each pair of particles within
/// the cutoff is included exactly once.
///
/// For each particle `i`, the list contains the indices `j` of its
/// neighbors and the cell shift `S` of each neighbor, such that the vector
/// between the particles is `position[j] - position[i] + S.cartesian(cell)`.
/// A pair `i-j` appears either in the neighbors of `i` or in the neighbors
/// of `j`, never both. If a particle is within the cutoff of one of its own
/// periodic images, the pair is included once.
#[derive(Debug, Clone, PartialEq)]
pub struct OneWayNeighbors {
    indices: Vec<Vec<usize>>,
    shifts: Vec<Vec<CellShift>>,
}

impl OneWayNeighbors {
    /// Compute the one-way neighbor list of `configuration` for pairs
    /// separated by at most `cutoff + skin`.
    ///
    /// Particles are first wrapped inside the unit cell. The periodic images
    /// are then visited in order, only looking at the reference cell and at
    /// the images whose first non-zero shift is positive. Inside the
    /// reference cell, only pairs `i-j` with `j > i` are considered.
    #[time_graph::instrument(name = "OneWayNeighbors::new")]
    pub fn new(configuration: &Configuration, cutoff: f64, skin: f64) -> Result<OneWayNeighbors, Error> {
        check_positive("cutoff", cutoff)?;
        check_non_negative("skin", skin)?;
        let window = cutoff + skin;

        let cell = configuration.cell();
        let matrix = cell.matrix();

        let (wrapped, wrap_shifts) = wrap_positions(cell, configuration.positions());

        let faces = cell.distances_between_faces();
        let mut n_search = [0; 3];
        for axis in 0..3 {
            let n = f64::floor(2.0 * window / faces[axis]) + 1.0;
            if !n.is_finite() || n > f64::from(i32::MAX / 2) {
                return Err(Error::InvalidParameter(format!(
                    "can not enumerate periodic images along cell vector {} \
                    (cutoff = {}, distance between faces = {})",
                    axis, window, faces[axis]
                )));
            }
            n_search[axis] = n as i32;
        }

        let n_particles = configuration.size();
        let mut indices = vec![Vec::new(); n_particles];
        let mut shifts = vec![Vec::new(); n_particles];

        for n_a in 0..=n_search[0] {
            for n_b in -n_search[1]..=n_search[1] {
                for n_c in -n_search[2]..=n_search[2] {
                    let image = CellShift([n_a, n_b, n_c]);
                    if !(image.is_zero() || image.is_positive()) {
                        continue;
                    }

                    let translation = image.cartesian(&matrix);
                    let found = (0..n_particles).into_par_iter()
                        .map(|first| find_neighbors(&wrapped, first, image, translation, window))
                        .collect::<Vec<_>>();

                    for (first, neighbors) in found.into_iter().enumerate() {
                        for second in neighbors {
                            indices[first].push(second);
                            shifts[first].push(image + wrap_shifts[second] - wrap_shifts[first]);
                        }
                    }
                }
            }
        }

        let list = OneWayNeighbors {
            indices: indices,
            shifts: shifts,
        };

        debug!("found {} pairs with the one-way neighbor list (cutoff {})", list.pair_count(), window);

        return Ok(list);
    }

    /// Get the indices of the neighbors of each particle
    pub fn indices(&self) -> &[Vec<usize>] {
        &self.indices
    }

    /// Get the cell shifts of the neighbors of each particle
    pub fn shifts(&self) -> &[Vec<CellShift>] {
        &self.shifts
    }

    /// Get the total number of pairs in this list
    pub fn pair_count(&self) -> usize {
        self.indices.iter().map(Vec::len).sum()
    }

    /// Get the number of neighbors of each particle, counting pairs from
    /// both of their particles.
    pub fn neighbor_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.indices.len()];
        for (first, neighbors) in self.indices.iter().enumerate() {
            counts[first] += neighbors.len();
            for &second in neighbors {
                counts[second] += 1;
            }
        }
        return counts;
    }

    /// Get the list of neighbors as plain arrays: the indices of the
    /// neighbors of each particle, and their shifts.
    pub fn into_arrays(self) -> (Vec<Vec<usize>>, Vec<Vec<[i32; 3]>>) {
        let shifts = self.shifts.into_iter()
            .map(|shifts| shifts.into_iter().map(|shift| shift.0).collect())
            .collect();
        return (self.indices, shifts);
    }
}

/// Find the neighbors of the particle `first` in the image of the reference
/// cell translated by `translation`, returning their indices in order.
fn find_neighbors(
    positions: &[Vector3D],
    first: usize,
    image: CellShift,
    translation: Vector3D,
    window: f64,
) -> Vec<usize> {
    // pairs in the reference cell are only considered once
    let start = if image.is_zero() { first + 1 } else { 0 };

    let mut neighbors = Vec::new();
    for second in start..positions.len() {
        let vector = positions[second] + translation - positions[first];
        let distance2 = vector * vector;

        if distance2 == 0.0 {
            warn!("particles {} and {} are at the same position, ignoring this pair", first, second);
            continue;
        }

        if super::is_pair(distance2, window) {
            if distance2 < 1e-3 {
                warn!(
                    "particles {} and {} are very close to one another ({})",
                    first, second, distance2.sqrt()
                );
            }
            neighbors.push(second);
        }
    }
    return neighbors;
}

impl PairList for OneWayNeighbors {
    fn pairs(&self) -> Vec<Pair> {
        let mut pairs = Vec::with_capacity(self.pair_count());
        for (first, (indices, shifts)) in self.indices.iter().zip(&self.shifts).enumerate() {
            for (&second, &shift) in indices.iter().zip(shifts) {
                pairs.push(Pair {
                    first: first,
                    second: second,
                    shift: shift,
                });
            }
        }
        return pairs;
    }

    fn pair_weight(&self) -> f64 {
        1.0
    }
}

/// Compute a one-way neighbor list for the particles at `positions` (`N x
/// 3` array) in the periodic `cell` (`3 x 3` array, one lattice vector per
/// row), including all pairs up to `cutoff + skin`.
///
/// If a `strain` (`3 x 3` array) is given, both the cell and the positions
/// are deformed by `I + strain` before searching for neighbors.
///
/// This returns the indices and cell shifts of the neighbors of each
/// particle, see [`OneWayNeighbors`] for more information.
#[allow(clippy::type_complexity)]
pub fn get_neighbors_oneway(
    positions: ArrayView2<'_, f64>,
    cell: ArrayView2<'_, f64>,
    cutoff: f64,
    skin: f64,
    strain: Option<ArrayView2<'_, f64>>,
) -> Result<(Vec<Vec<usize>>, Vec<Vec<[i32; 3]>>), Error> {
    let mut configuration = Configuration::from_arrays(positions, cell)?;
    if let Some(strain) = strain {
        let strain = super::matrix_from_array("strain", strain)?;
        configuration = configuration.strained(&strain)?;
    }

    let neighbors = OneWayNeighbors::new(&configuration, cutoff, skin)?;
    return Ok(neighbors.into_arrays());
}
