use anyhow::Context;
use grain_texture_generator::{generate_to_file, GrainConfig};
use log::debug;

fn main() -> anyhow::Result<()> {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let base_dir = std::env::current_dir().context("Failed to resolve the working directory")?;
    let config = GrainConfig::default().with_base_dir(base_dir);

    debug!("grain texture options: {config:?}");

    let output_path = generate_to_file(&config).with_context(|| {
        format!(
            "Failed to generate grain texture at {}",
            config.resolved_output_path().display()
        )
    })?;

    println!(
        "Film grain overlay generated and saved to: {}",
        output_path.display()
    );

    Ok(())
}
