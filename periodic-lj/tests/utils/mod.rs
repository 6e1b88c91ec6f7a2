#![allow(dead_code)]

use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use periodic_lj::{Configuration, Matrix3, UnitCell, Vector3D};

/// FCC crystal with the given cubic lattice parameter `a`, using the
/// primitive cell with a single particle, repeated `repeats` times along
/// each lattice vector.
pub fn fcc(a: f64, repeats: [usize; 3]) -> Configuration {
    let cell = Matrix3::new([
        [0.0, a / 2.0, a / 2.0],
        [a / 2.0, 0.0, a / 2.0],
        [a / 2.0, a / 2.0, 0.0],
    ]);
    let mut configuration = Configuration::new(UnitCell::new(cell).unwrap());
    configuration.add_particle(Vector3D::new(0.0, 0.0, 0.0));
    return configuration.repeat(repeats).unwrap();
}

/// Displace all particles by a random vector with components in
/// `[-amplitude, amplitude)`
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

/// Call `function` with all the vectors between a particle `i` and all
/// periodic images of a particle `j` within `cutoff`, as `function(i, j,
/// vector)`, looping over a generous range of images.
fn for_each_pair(configuration: &Configuration, cutoff: f64, mut function: impl FnMut(usize, usize, Vector3D)) {
    let matrix = configuration.cell().matrix();
    let [a, b, c] = matrix.rows();
    let volume = configuration.cell().volume();

    // distances between opposite faces of the cell
    let heights = [
        volume / (b ^ c).norm(),
        volume / (c ^ a).norm(),
        volume / (a ^ b).norm(),
    ];
    let range = [
        (cutoff / heights[0]).ceil() as i32 + 2,
        (cutoff / heights[1]).ceil() as i32 + 2,
        (cutoff / heights[2]).ceil() as i32 + 2,
    ];

    let positions = configuration.positions();
    for i in 0..positions.len() {
        for j in 0..positions.len() {
            for n_a in -range[0]..=range[0] {
                for n_b in -range[1]..=range[1] {
                    for n_c in -range[2]..=range[2] {
                        let translation = n_a as f64 * a + n_b as f64 * b + n_c as f64 * c;
                        let vector = positions[j] + translation - positions[i];
                        let distance2 = vector * vector;
                        if distance2 > 0.0 && distance2 <= cutoff * cutoff {
                            function(i, j, vector);
                        }
                    }
                }
            }
        }
    }
}

/// Count the neighbors of each particle within `cutoff`
pub fn neighbor_counts(configuration: &Configuration, cutoff: f64) -> Vec<usize> {
    let mut counts = vec![0; configuration.size()];
    for_each_pair(configuration, cutoff, |i, _, _| counts[i] += 1);
    return counts;
}

/// Reference energy, forces and stress (in Voigt notation) for the
/// Lennard-Jones potential, shifted to zero at `cutoff`.
pub struct Reference {
    pub energy: f64,
    /// forces with shape `N x 3`
    pub forces: Array2<f64>,
    pub stress: [f64; 6],
}

pub fn lennard_jones(configuration: &Configuration, sigma: f64, epsilon: f64, cutoff: f64) -> Reference {
    let bare_energy = |r: f64| {
        let s6 = (sigma / r).powi(6);
        4.0 * epsilon * (s6 * s6 - s6)
    };
    let shift = bare_energy(cutoff);

    let mut energy = 0.0;
    let mut forces = vec![Vector3D::zero(); configuration.size()];
    let mut virial = [[0.0; 3]; 3];

    for_each_pair(configuration, cutoff, |i, _, vector| {
        let r = vector.norm();
        // every pair is visited twice
        energy += 0.5 * (bare_energy(r) - shift);

        let s6 = (sigma / r).powi(6);
        // derivative of the energy with respect to r, divided by r
        let de_dr_over_r = 24.0 * epsilon * (s6 - 2.0 * s6 * s6) / (r * r);

        // the vector goes from i to j, the force on i follows it for
        // attractive pairs
        forces[i] += de_dr_over_r * vector;

        for alpha in 0..3 {
            for beta in 0..3 {
                virial[alpha][beta] += 0.5 * de_dr_over_r * vector[alpha] * vector[beta];
            }
        }
    });

    let volume = configuration.cell().volume();
    let stress = [
        virial[0][0] / volume,
        virial[1][1] / volume,
        virial[2][2] / volume,
        virial[1][2] / volume,
        virial[0][2] / volume,
        virial[0][1] / volume,
    ];

    let forces = Array2::from_shape_fn((forces.len(), 3), |(i, alpha)| forces[i][alpha]);

    return Reference { energy, forces, stress };
}
