//! The `careerfit validate` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Result};

use careerfit_core::catalog::{self, Catalog, ValidationWarning};
use careerfit_core::model::Section;

pub fn execute(catalog_path: PathBuf, strict: bool) -> Result<()> {
    let catalogs = if catalog_path.is_dir() {
        catalog::load_catalog_directory(&catalog_path)?
    } else {
        vec![catalog::parse_catalog(&catalog_path)?]
    };

    let mut total_warnings = 0;
    for c in &catalogs {
        total_warnings += report_catalog(c);
    }

    if total_warnings == 0 {
        println!("All catalogs valid.");
        return Ok(());
    }

    println!("\n{total_warnings} warning(s) found.");
    if strict {
        bail!("{total_warnings} catalog warning(s) with --strict");
    }
    Ok(())
}

/// Print a catalog's section breakdown and its warnings grouped by the
/// section of the question they concern. Returns the warning count.
fn report_catalog(c: &Catalog) -> usize {
    let counts: Vec<String> = Section::ALL
        .iter()
        .map(|s| format!("{} {s}", c.questions_for(*s).len()))
        .collect();
    println!(
        "Catalog: {} [{}] ({} questions: {})",
        c.name,
        c.id,
        c.len(),
        counts.join(", ")
    );

    let warnings = catalog::validate_catalog(c);
    let mut by_section: BTreeMap<Option<Section>, Vec<&ValidationWarning>> = BTreeMap::new();
    for w in &warnings {
        let section = w.question_id.as_deref().and_then(|id| c.section_of(id));
        by_section.entry(section).or_default().push(w);
    }

    for (section, group) in &by_section {
        let title = section.map_or("Catalog", |s| s.title());
        println!("  {title}:");
        for w in group {
            match &w.question_id {
                Some(id) => println!("    [{id}] {}", w.message),
                None => println!("    {}", w.message),
            }
        }
    }

    warnings.len()
}
