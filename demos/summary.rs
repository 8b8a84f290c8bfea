// Prints vertex and face counts for a range of subdivision frequencies, and
// optionally dumps a mesh described by a YAML file as JSON.
//
//     RUST_LOG=debug cargo run --example summary [config.yaml]

use anyhow::Result;
use icosphere::{icosphere, Frequency, IcosphereConfig};

fn main() -> Result<()> {
    pretty_env_logger::init();

    // Recursive subdivision only reaches 12, 42, 162, 642, 2562, ... vertices
    for nu in 1..=8 {
        let mesh = icosphere(nu)?;
        let weights = mesh.vertex_weights();
        let min_weight = weights.iter().cloned().fold(f64::INFINITY, f64::min);
        println!(
            "ν = {}: {} vertices, {} faces, {} edges, min. vertex weight {:.3}",
            nu,
            mesh.vertices().len(),
            mesh.faces().len(),
            mesh.edges().len(),
            min_weight
        );
    }

    if let Some(path) = std::env::args().nth(1) {
        let config = IcosphereConfig::from_file(&path)?;
        let nu: Frequency = config.effective_frequency()?;
        log::info!("Building icosphere with {} from {}", nu, path);
        println!("{}", config.build()?.to_json()?);
    }
    Ok(())
}
