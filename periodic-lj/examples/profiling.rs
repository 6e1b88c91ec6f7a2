use periodic_lj::{Calculator, CalculationOptions, NeighborStrategy};
use periodic_lj::{Configuration, Matrix3, UnitCell, Vector3D};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let repeats = match std::env::args().nth(1) {
        Some(value) => value.parse::<usize>()?,
        None => 4,
    };

    // enable collection of profiling data
    time_graph::enable_data_collection(true);
    // clear any existing collected data
    time_graph::clear_collected_data();

    // run the calculation
    let configuration = fcc_crystal(repeats)?;
    for strategy in [NeighborStrategy::Dense, NeighborStrategy::OneWay] {
        let energy = time_graph::spanned!("Full calculation", {
            compute_energy(&configuration, strategy)
        })?;
        println!("{:?}: energy = {}", strategy, energy);
    }

    // get the call graph and display it
    let graph = time_graph::get_full_graph();
    // (this requires the "table" feature for the time_graph crate)
    println!("{}", graph.as_short_table());

    // also available for saving profiling data to the disk & future analysis
    // (this requires the "json" feature for the time_graph crate)
    println!("{}", graph.as_json());

    Ok(())
}

/// Copper-like FCC crystal with `n x n x n` conventional cells
fn fcc_crystal(n: usize) -> Result<Configuration, Box<dyn std::error::Error>> {
    let a = 3.61;
    let mut cubic = Configuration::new(UnitCell::cubic(a)?);
    cubic.add_particle(Vector3D::new(0.0, 0.0, 0.0));
    cubic.add_particle(Vector3D::new(0.0, a / 2.0, a / 2.0));
    cubic.add_particle(Vector3D::new(a / 2.0, 0.0, a / 2.0));
    cubic.add_particle(Vector3D::new(a / 2.0, a / 2.0, 0.0));

    Ok(cubic.repeat([n, n, n])?)
}

/// Compute energy, forces and stress with the given `strategy` and return
/// the energy
fn compute_energy(configuration: &Configuration, strategy: NeighborStrategy) -> Result<f64, Box<dyn std::error::Error>> {
    let options = CalculationOptions {
        strategy: strategy,
        ..Default::default()
    };
    let calculator = Calculator::lennard_jones(r#"{"sigma": 2.34, "epsilon": 0.41}"#, options)?;
    let evaluation = calculator.compute(configuration, &Matrix3::zero())?;

    Ok(evaluation.energy)
}
