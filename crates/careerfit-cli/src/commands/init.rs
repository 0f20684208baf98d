//! The `careerfit init` command.

use std::path::Path;

use anyhow::Result;

use careerfit_core::builtin::CATALOG_ID;
use careerfit_core::catalog::{render_catalog_toml, Catalog};

pub fn execute() -> Result<()> {
    if Path::new("careerfit.toml").exists() {
        println!("careerfit.toml already exists, skipping.");
    } else {
        std::fs::write("careerfit.toml", SAMPLE_CONFIG)?;
        println!("Created careerfit.toml");
    }

    std::fs::create_dir_all("catalogs")?;
    let catalog_path = format!("catalogs/{CATALOG_ID}.toml");
    if Path::new(&catalog_path).exists() {
        println!("{catalog_path} already exists, skipping.");
    } else {
        std::fs::write(&catalog_path, render_catalog_toml(&Catalog::builtin())?)?;
        println!("Created {catalog_path}");
    }

    println!("\nNext steps:");
    println!("  1. Edit {catalog_path} to adapt questions and answer key");
    println!("  2. Run: careerfit validate --catalog {catalog_path}");
    println!("  3. Run: careerfit take --catalog {catalog_path} --save");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# careerfit configuration

# Catalog to use instead of the built-in one
# catalog = "catalogs/environmental-iot.toml"

output_dir = "./careerfit-results"

# json, markdown, all
report_format = "json"
"#;
