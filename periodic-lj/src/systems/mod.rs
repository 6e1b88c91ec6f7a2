mod cell;
pub use self::cell::UnitCell;

mod configuration;
pub use self::configuration::Configuration;
pub(crate) use self::configuration::matrix_from_array;

mod images;
pub use self::images::{CellShift, CellImages};

mod distances;
pub use self::distances::{DenseDistances, get_distances};

mod neighbors;
pub use self::neighbors::{OneWayNeighbors, get_neighbors_oneway};

#[cfg(test)]
pub(crate) mod test_utils;

/// Pair of particles produced by a pair list. The vector between the
/// particles is `position[second] - position[first] + shift.cartesian(cell)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair {
    /// index of the first particle in the pair
    pub first: usize,
    /// index of the second particle in the pair
    pub second: usize,
    /// number of cell shifts applied to the `second` particle to create this
    /// pair
    pub shift: CellShift,
}

/// A `PairList` enumerates all pairs of particles separated by less than a
/// given cutoff in a periodic configuration. Pairs between two coincident
/// particles are never part of the list.
///
/// Different implementations can count each physical pair a different
/// number of times; sums over the pairs must be scaled by `pair_weight` to
/// count each physical pair once.
pub trait PairList {
    /// Get all the pairs in this list
    fn pairs(&self) -> Vec<Pair>;

    /// Get the weight of each pair in sums over all pairs: `1/2` for lists
    /// containing each pair twice (as `i-j` and `j-i`), `1` for lists
    /// containing each pair once.
    fn pair_weight(&self) -> f64;
}

/// Check if a squared distance `distance2` corresponds to an actual pair for
/// the cutoff `window`: coincident particles are never a pair.
#[inline]
pub(crate) fn is_pair(distance2: f64, window: f64) -> bool {
    distance2 > 0.0 && distance2 <= window * window
}
