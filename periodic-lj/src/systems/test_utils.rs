use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use crate::{Matrix3, Vector3D};
use super::{UnitCell, Configuration};

/// FCC crystal with the given cubic `lattice` parameter, using a primitive
/// unit cell containing a single particle.
pub fn fcc(lattice: f64) -> Configuration {
    let half = lattice / 2.0;
    let cell = Matrix3::new([[0.0, half, half], [half, 0.0, half], [half, half, 0.0]]);
    let mut configuration = Configuration::new(UnitCell::new(cell).expect("invalid fcc cell"));
    configuration.add_particle(Vector3D::new(0.0, 0.0, 0.0));
    return configuration;
}

/// Small triclinic configuration with particles partially outside of the
/// cell
pub fn triclinic() -> Configuration {
    let cell = UnitCell::triclinic(4.2, 4.6, 5.1, 82.0, 95.0, 103.0).expect("invalid cell");
    let mut configuration = Configuration::new(cell);
    configuration.add_particle(Vector3D::new(0.1, 0.2, 0.3));
    configuration.add_particle(Vector3D::new(1.9, 1.6, 0.4));
    configuration.add_particle(Vector3D::new(-0.8, 3.1, 2.2));
    configuration.add_particle(Vector3D::new(2.5, -0.4, 3.2));
    configuration.add_particle(Vector3D::new(1.4, 2.9, 4.6));
    configuration.add_particle(Vector3D::new(1.2, 1.4, 2.5));
    return configuration;
}

/// Displace all the particles of `configuration` by a random vector with
/// components uniformly distributed in `[-amplitude, amplitude)`, using the
/// given `seed`.
pub fn rattle(configuration: &Configuration, amplitude: f64, seed: u64) -> Configuration {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut rattled = Configuration::new(*configuration.cell());
    for &position in configuration.positions() {
        let displacement = Vector3D::new(
            rng.gen_range(-amplitude..amplitude),
            rng.gen_range(-amplitude..amplitude),
            rng.gen_range(-amplitude..amplitude),
        );
        rattled.add_particle(position + displacement);
    }
    return rattled;
}
