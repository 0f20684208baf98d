//! The `careerfit questions` command.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use comfy_table::{Cell, Table};

use careerfit_core::model::Section;

pub fn execute(catalog_path: Option<PathBuf>, section: Option<String>) -> Result<()> {
    let catalog = super::load_catalog(catalog_path.as_deref())?;
    let sections = match section {
        Some(s) => vec![s.parse::<Section>().map_err(|e| anyhow!(e))?],
        None => Section::ALL.to_vec(),
    };

    println!("{} ({} questions)", catalog.name, catalog.len());

    for section in sections {
        let questions = catalog.questions_for(section);
        println!("\n{} ({} questions)", section.title(), questions.len());

        let mut table = Table::new();
        table.set_header(vec!["ID", "Type", "Category", "Question"]);
        for q in questions {
            table.add_row(vec![
                Cell::new(&q.id),
                Cell::new(q.question_type()),
                Cell::new(&q.category),
                Cell::new(&q.text),
            ]);
        }
        println!("{table}");
    }

    Ok(())
}
