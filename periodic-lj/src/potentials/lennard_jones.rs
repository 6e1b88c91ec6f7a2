use crate::errors::{check_positive, check_non_negative};
use crate::math::Real;
use crate::Error;

use super::PairPotential;

/// Parameters of the Lennard-Jones potential
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
pub struct LennardJonesParameters {
    /// Distance at which the pair energy is zero
    #[serde(default = "serde_default_one")]
    pub sigma: f64,
    /// Depth of the potential well
    #[serde(default = "serde_default_one")]
    pub epsilon: f64,
    /// Cutoff radius of the potential, defaults to `3 sigma`
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutoff: Option<f64>,
}

fn serde_default_one() -> f64 { 1.0 }

impl Default for LennardJonesParameters {
    fn default() -> LennardJonesParameters {
        LennardJonesParameters {
            sigma: 1.0,
            epsilon: 1.0,
            cutoff: None,
        }
    }
}

impl LennardJonesParameters {
    /// Parse the parameters from a JSON string. Missing keys take their
    /// default value, and unknown keys are ignored.
    pub fn from_json(json: &str) -> Result<LennardJonesParameters, Error> {
        let parameters = serde_json::from_str::<LennardJonesParameters>(json)?;
        parameters.validate()?;
        return Ok(parameters);
    }

    /// Check that these parameters are valid
    pub fn validate(&self) -> Result<(), Error> {
        check_positive("sigma", self.sigma)?;
        check_non_negative("epsilon", self.epsilon)?;
        if let Some(cutoff) = self.cutoff {
            check_positive("cutoff", cutoff)?;
        }
        return Ok(());
    }

    /// Get the cutoff radius, using the default of `3 sigma` if it was not
    /// set
    pub fn cutoff(&self) -> f64 {
        self.cutoff.unwrap_or(3.0 * self.sigma)
    }
}

/// Lennard-Jones pair potential, `4 epsilon ((sigma/r)^12 - (sigma/r)^6)`,
/// shifted to be zero at the cutoff radius.
#[derive(Debug, Clone)]
pub struct LennardJones {
    parameters: LennardJonesParameters,
    cutoff: f64,
    /// energy of a pair at the cutoff
    shift: f64,
}

impl LennardJones {
    /// Create a new Lennard-Jones potential with the given `parameters`
    pub fn new(parameters: LennardJonesParameters) -> Result<LennardJones, Error> {
        parameters.validate()?;

        let mut potential = LennardJones {
            parameters: parameters,
            cutoff: parameters.cutoff(),
            shift: 0.0,
        };
        let cutoff = potential.cutoff;
        potential.shift = potential.energy(cutoff * cutoff);

        return Ok(potential);
    }

    /// Get the parameters used to create this potential
    pub fn parameters(&self) -> &LennardJonesParameters {
        &self.parameters
    }

    /// Get the energy shift, i.e. the bare energy of a pair at the cutoff
    pub fn shift(&self) -> f64 {
        self.shift
    }
}

impl PairPotential for LennardJones {
    fn cutoff(&self) -> f64 {
        self.cutoff
    }

    fn energy<T: Real>(&self, r2: T) -> T {
        let sigma = self.parameters.sigma;
        let four_epsilon = T::from(4.0 * self.parameters.epsilon);

        let s2 = T::from(sigma * sigma) / r2;
        let c6 = s2 * s2 * s2;
        let c12 = c6 * c6;
        return four_epsilon * (c12 - c6);
    }

    fn shifted_energy<T: Real>(&self, r2: T) -> T {
        self.energy(r2) - T::from(self.shift)
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_relative_eq, assert_ulps_eq};

    use super::*;

    #[test]
    fn parameters() {
        let parameters = LennardJonesParameters::from_json("{}").unwrap();
        assert_eq!(parameters, LennardJonesParameters::default());
        assert_eq!(parameters.cutoff(), 3.0);

        let parameters = LennardJonesParameters::from_json(r#"{"sigma": 2.3, "foo": "bar"}"#).unwrap();
        assert_eq!(parameters.sigma, 2.3);
        assert_eq!(parameters.epsilon, 1.0);
        assert_ulps_eq!(parameters.cutoff(), 6.9);

        let parameters = LennardJonesParameters::from_json(r#"{"epsilon": 0.5, "cutoff": 4.5}"#).unwrap();
        assert_eq!(parameters.sigma, 1.0);
        assert_eq!(parameters.epsilon, 0.5);
        assert_eq!(parameters.cutoff(), 4.5);

        let json = serde_json::to_string(&LennardJonesParameters::default()).unwrap();
        assert_eq!(json, r#"{"sigma":1.0,"epsilon":1.0}"#);
    }

    #[test]
    fn invalid_parameters() {
        let error = LennardJonesParameters::from_json(r#"{"sigma": -1.0}"#).unwrap_err();
        assert!(matches!(error, Error::InvalidParameter(_)));

        let error = LennardJonesParameters::from_json(r#"{"cutoff": 0.0}"#).unwrap_err();
        assert!(matches!(error, Error::InvalidParameter(_)));

        let error = LennardJonesParameters::from_json(r#"{"sigma": "1.0"}"#).unwrap_err();
        assert!(matches!(error, Error::Json(_)));

        let error = LennardJonesParameters::from_json("[").unwrap_err();
        assert!(matches!(error, Error::Json(_)));

        let parameters = LennardJonesParameters { sigma: 1.0, epsilon: -2.0, cutoff: None };
        assert!(LennardJones::new(parameters).is_err());
    }

    #[test]
    fn energy() {
        let potential = LennardJones::new(LennardJonesParameters::default()).unwrap();

        // zero at sigma, minimum of -epsilon at 2^(1/6) sigma
        assert_eq!(potential.energy(1.0), 0.0);
        let r_min = f64::powf(2.0, 1.0 / 6.0);
        assert_relative_eq!(potential.energy(r_min * r_min), -1.0, max_relative = 1e-14);

        // shifted energy is zero at the cutoff
        assert_eq!(potential.cutoff(), 3.0);
        assert_eq!(potential.shifted_energy(9.0), 0.0);
        assert_relative_eq!(potential.shift(), 4.0 * (f64::powi(3.0, -12) - f64::powi(3.0, -6)), max_relative = 1e-14);
        assert_eq!(potential.shifted_energy(1.0), -potential.shift());
    }

    #[test]
    fn derivative() {
        let parameters = LennardJonesParameters { sigma: 1.3, epsilon: 0.7, cutoff: None };
        let potential = LennardJones::new(parameters).unwrap();

        for &r in &[1.1, 1.5, 2.0, 3.5] {
            let (value, derivative) = potential.energy_and_derivative(r * r);
            assert_eq!(value, potential.shifted_energy(r * r));

            // dE/dr = 24 epsilon (sigma^6 / r^7 - 2 sigma^12 / r^13), and
            // dE/d(r^2) = dE/dr / (2 r)
            let s6 = f64::powi(1.3 / r, 6);
            let de_dr = 24.0 * 0.7 * (s6 - 2.0 * s6 * s6) / r;
            assert_relative_eq!(derivative, de_dr / (2.0 * r), max_relative = 1e-12);

            let delta = 1e-6;
            let finite_difference = (
                potential.shifted_energy(r * r + delta) - potential.shifted_energy(r * r - delta)
            ) / (2.0 * delta);
            assert_relative_eq!(derivative, finite_difference, max_relative = 1e-6);
        }
    }
}
