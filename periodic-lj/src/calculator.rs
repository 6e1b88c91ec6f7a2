use log::debug;
use ndarray::{Array2, ArrayView2};

use crate::errors::check_non_negative;
use crate::potentials::{PairPotential, LennardJones, LennardJonesParameters};
use crate::systems::{Configuration, DenseDistances, OneWayNeighbors, PairList};
use crate::systems::matrix_from_array;
use crate::{Error, Matrix3, Vector3D};

/// Default skin added to the cutoff when searching for pairs
pub const DEFAULT_SKIN: f64 = 0.01;

/// Strategy used to enumerate the pairs of particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
pub enum NeighborStrategy {
    /// Compute the dense tensor of distances between all particles in all
    /// periodic images (see [`DenseDistances`]). Each pair is included twice.
    #[default]
    Dense,
    /// Compute a one-way neighbor list (see [`OneWayNeighbors`]), where each
    /// pair is included once.
    OneWay,
}

/// Options for energy, forces and stress evaluations
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
pub struct CalculationOptions {
    /// Strategy used to find pairs
    #[serde(default)]
    pub strategy: NeighborStrategy,
    /// Additional distance added to the cutoff of the potential when
    /// searching for pairs
    #[serde(default = "serde_default_skin")]
    pub skin: f64,
}

fn serde_default_skin() -> f64 { DEFAULT_SKIN }

impl Default for CalculationOptions {
    fn default() -> CalculationOptions {
        CalculationOptions {
            strategy: NeighborStrategy::Dense,
            skin: DEFAULT_SKIN,
        }
    }
}

impl CalculationOptions {
    /// Check that these options are valid
    pub fn validate(&self) -> Result<(), Error> {
        check_non_negative("skin", self.skin)
    }
}

/// Result of an evaluation: the energy of a configuration, and its
/// gradients with respect to the positions of the particles and to the
/// strain applied to the configuration.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Potential energy of the configuration
    pub energy: f64,
    /// Gradient of the energy with respect to the (undeformed) positions,
    /// with shape `N x 3`
    pub positions_gradient: Array2<f64>,
    /// Gradient of the energy with respect to the strain
    pub strain_gradient: Matrix3,
    /// Volume of the undeformed cell
    pub volume: f64,
}

impl Evaluation {
    /// Get the forces acting on all particles, with shape `N x 3`
    pub fn forces(&self) -> Array2<f64> {
        -&self.positions_gradient
    }

    /// Get the stress tensor, as the symmetric part of the strain gradient
    /// divided by the volume of the cell
    pub fn stress(&self) -> Matrix3 {
        self.strain_gradient.symmetrized() / self.volume
    }

    /// Get the stress tensor in Voigt notation, `[xx, yy, zz, yz, xz, xy]`
    pub fn voigt_stress(&self) -> [f64; 6] {
        let stress = self.stress();
        return [
            stress[0][0], stress[1][1], stress[2][2],
            stress[1][2], stress[0][2], stress[0][1],
        ];
    }
}

/// The `Calculator` evaluates the energy of periodic configurations with a
/// pair potential, together with the derivatives of the energy.
///
/// The derivatives are obtained by differentiating the expression of the
/// pair energy (see [`PairPotential::energy_and_derivative`]) and applying
/// the chain rule through the pair vectors.
#[derive(Debug, Clone)]
pub struct Calculator<P: PairPotential = LennardJones> {
    potential: P,
    options: CalculationOptions,
}

impl Calculator<LennardJones> {
    /// Create a calculator using the Lennard-Jones potential with the given
    /// `parameters`, formatted as JSON.
    pub fn lennard_jones(parameters: &str, options: CalculationOptions) -> Result<Calculator<LennardJones>, Error> {
        let parameters = LennardJonesParameters::from_json(parameters)?;
        return Calculator::new(LennardJones::new(parameters)?, options);
    }
}

impl<P: PairPotential> Calculator<P> {
    /// Create a new calculator for the given `potential`
    pub fn new(potential: P, options: CalculationOptions) -> Result<Calculator<P>, Error> {
        options.validate()?;
        return Ok(Calculator {
            potential: potential,
            options: options,
        });
    }

    /// Get the potential used by this calculator
    pub fn potential(&self) -> &P {
        &self.potential
    }

    /// Get the options used by this calculator
    pub fn options(&self) -> &CalculationOptions {
        &self.options
    }

    /// Find all pairs in `configuration` within the cutoff of the potential
    /// (plus the skin), using the configured strategy.
    fn pair_list(&self, configuration: &Configuration) -> Result<Box<dyn PairList>, Error> {
        let cutoff = self.potential.cutoff();
        let skin = self.options.skin;

        let list: Box<dyn PairList> = match self.options.strategy {
            NeighborStrategy::Dense => Box::new(DenseDistances::new(configuration, cutoff, skin)?),
            NeighborStrategy::OneWay => Box::new(OneWayNeighbors::new(configuration, cutoff, skin)?),
        };
        return Ok(list);
    }

    /// Evaluate the energy of `configuration` deformed by `strain`, and the
    /// gradients of this energy with respect to the undeformed positions and
    /// to the strain.
    ///
    /// The pairs are searched in the deformed configuration, and kept fixed
    /// when computing the gradients.
    #[time_graph::instrument(name = "Calculator::compute")]
    pub fn compute(&self, configuration: &Configuration, strain: &Matrix3) -> Result<Evaluation, Error> {
        let deformed = configuration.strained(strain)?;
        let pairs = self.pair_list(&deformed)?;
        let weight = pairs.pair_weight();

        let deformation = Matrix3::one() + strain;
        let deformation_t = deformation.transposed();

        let positions = configuration.positions();
        let cell = configuration.cell().matrix();
        let cutoff2 = self.potential.cutoff() * self.potential.cutoff();

        let mut energy = 0.0;
        let mut positions_gradient = vec![Vector3D::zero(); positions.len()];
        let mut strain_gradient = Matrix3::zero();

        let mut n_pairs = 0;
        for pair in pairs.pairs() {
            let undeformed = positions[pair.second] - positions[pair.first] + pair.shift.cartesian(&cell);
            let vector = deformation * undeformed;

            let r2 = vector * vector;
            if !(r2 > 0.0 && r2 <= cutoff2) {
                continue;
            }
            n_pairs += 1;

            let (pair_energy, derivative) = self.potential.energy_and_derivative(r2);
            energy += weight * pair_energy;

            // r2 = |(I + strain) d|^2, with d the undeformed pair vector
            let factor = 2.0 * weight * derivative;
            let gradient = factor * (deformation_t * vector);
            positions_gradient[pair.second] += gradient;
            positions_gradient[pair.first] -= gradient;

            strain_gradient += factor * vector.tensor_product(undeformed);
        }

        debug!("evaluated {} pairs, energy = {}", n_pairs, energy);

        let mut gradient_array = Array2::zeros((positions.len(), 3));
        for (mut row, gradient) in gradient_array.outer_iter_mut().zip(&positions_gradient) {
            row[0] = gradient[0];
            row[1] = gradient[1];
            row[2] = gradient[2];
        }

        return Ok(Evaluation {
            energy: energy,
            positions_gradient: gradient_array,
            strain_gradient: strain_gradient,
            volume: configuration.cell().volume(),
        });
    }

    /// Compute the energy of `configuration` deformed by `strain`
    pub fn energy(&self, configuration: &Configuration, strain: &Matrix3) -> Result<f64, Error> {
        let evaluation = self.compute(configuration, strain)?;
        return Ok(evaluation.energy);
    }

    /// Compute the forces acting on the particles of `configuration`, with
    /// shape `N x 3`
    pub fn forces(&self, configuration: &Configuration) -> Result<Array2<f64>, Error> {
        let evaluation = self.compute(configuration, &Matrix3::zero())?;
        return Ok(evaluation.forces());
    }

    /// Compute the stress of `configuration` deformed by `strain`, in Voigt
    /// notation `[xx, yy, zz, yz, xz, xy]`. The stress is normalized by the
    /// volume of the undeformed cell.
    pub fn stress(&self, configuration: &Configuration, strain: &Matrix3) -> Result<[f64; 6], Error> {
        let evaluation = self.compute(configuration, strain)?;
        return Ok(evaluation.voigt_stress());
    }
}

fn default_calculator(parameters: &LennardJonesParameters) -> Result<Calculator<LennardJones>, Error> {
    let potential = LennardJones::new(*parameters)?;
    return Calculator::new(potential, CalculationOptions::default());
}

fn strain_matrix(strain: Option<ArrayView2<'_, f64>>) -> Result<Matrix3, Error> {
    match strain {
        Some(strain) => matrix_from_array("strain", strain),
        None => Ok(Matrix3::zero()),
    }
}

/// Compute the Lennard-Jones energy of the particles at `positions` (`N x
/// 3` array) in the periodic `cell` (`3 x 3` array, one lattice vector per
/// row), deformed by the optional `strain` (`3 x 3` array).
pub fn energy(
    parameters: &LennardJonesParameters,
    positions: ArrayView2<'_, f64>,
    cell: ArrayView2<'_, f64>,
    strain: Option<ArrayView2<'_, f64>>,
) -> Result<f64, Error> {
    let configuration = Configuration::from_arrays(positions, cell)?;
    let strain = strain_matrix(strain)?;
    return default_calculator(parameters)?.energy(&configuration, &strain);
}

/// Compute the Lennard-Jones forces acting on the particles at `positions`
/// (`N x 3` array) in the periodic `cell` (`3 x 3` array). The forces have
/// the same shape as the positions.
pub fn forces(
    parameters: &LennardJonesParameters,
    positions: ArrayView2<'_, f64>,
    cell: ArrayView2<'_, f64>,
) -> Result<Array2<f64>, Error> {
    let configuration = Configuration::from_arrays(positions, cell)?;
    return default_calculator(parameters)?.forces(&configuration);
}

/// Compute the Lennard-Jones stress of the particles at `positions` (`N x
/// 3` array) in the periodic `cell` (`3 x 3` array), deformed by the
/// optional `strain` (`3 x 3` array). The stress is returned in Voigt
/// notation, `[xx, yy, zz, yz, xz, xy]`.
pub fn stress(
    parameters: &LennardJonesParameters,
    positions: ArrayView2<'_, f64>,
    cell: ArrayView2<'_, f64>,
    strain: Option<ArrayView2<'_, f64>>,
) -> Result<[f64; 6], Error> {
    let configuration = Configuration::from_arrays(positions, cell)?;
    let strain = strain_matrix(strain)?;
    return default_calculator(parameters)?.stress(&configuration, &strain);
}
