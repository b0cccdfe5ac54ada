// Validate an NFD Parser config file
//
// Run with: cargo run --example validate_config -- path/to/app.yml
// Set RUST_LOG=debug to see what the loader does.

use nfd_config::{ConfigManager, DocsConfig, default_rules, generate_docs};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let Some(arg) = std::env::args().nth(1) else {
        // No file given: print the reference instead
        let docs = generate_docs(
            default_rules(),
            &nfd_config::default_config(),
            DocsConfig::new().with_title("NFD Parser Configuration"),
        );
        println!("{docs}");
        return Ok(());
    };

    let path = Path::new(&arg);
    let dir = path.parent().unwrap_or(Path::new("."));
    let file = path
        .file_name()
        .ok_or("config path must name a file")?
        .to_string_lossy()
        .into_owned();

    let manager = ConfigManager::builder()
        .config_dir(dir)
        .config_file(file)
        .with_env_prefix("NFD")
        .build()?;

    let loaded = manager.load()?;

    if !loaded.env_overrides.is_empty() {
        println!("Overridden from environment: {}", loaded.env_overrides.join(", "));
    }

    if loaded.is_valid() {
        println!("✅ {} is valid", path.display());
        Ok(())
    } else {
        println!("❌ {} has {} problem(s):", path.display(), loaded.errors.len());
        for error in &loaded.errors {
            println!("   - {error}");
        }
        std::process::exit(1);
    }
}
