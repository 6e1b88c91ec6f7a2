//! Pair potentials, written once generically over the scalar type so that
//! the same expression gives both the energy and its derivative.
use crate::math::{Dual, Real};

mod lennard_jones;
pub use self::lennard_jones::{LennardJones, LennardJonesParameters};

/// A short-ranged pair potential, depending only on the distance between
/// the particles.
pub trait PairPotential: Send + Sync {
    /// Get the cutoff radius of this potential. Pairs further apart than the
    /// cutoff do not interact.
    fn cutoff(&self) -> f64;

    /// Compute the bare (unshifted) energy of a pair of particles at the
    /// squared distance `r2`.
    ///
    /// This must be written generically over `T` to be usable with both
    /// `f64` and `Dual` numbers.
    fn energy<T: Real>(&self, r2: T) -> T;

    /// Compute the energy of a pair of particles at the squared distance
    /// `r2`, shifted to be zero at the cutoff.
    fn shifted_energy<T: Real>(&self, r2: T) -> T {
        let cutoff = self.cutoff();
        let shift = self.energy(cutoff * cutoff);
        return self.energy(r2) - T::from(shift);
    }

    /// Compute the shifted energy of a pair at squared distance `r2`, and the
    /// derivative of this energy with respect to `r2`.
    fn energy_and_derivative(&self, r2: f64) -> (f64, f64) {
        Dual::evaluate(|r2| self.shifted_energy(r2), r2)
    }
}
