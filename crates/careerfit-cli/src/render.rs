//! Terminal rendering of results and reports.

use anyhow::Result;
use comfy_table::{Cell, Table};

use careerfit_core::report::AssessmentReport;
use careerfit_core::results::AssessmentResults;

/// Print a report in the requested format: text, json, markdown.
pub fn print_report(report: &AssessmentReport, format: &str) -> Result<()> {
    match format {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        _ => {
            println!("{} results", report.catalog.name);
            println!(
                "{} of {} questions answered",
                report.answers.len(),
                report.catalog.question_count
            );
            if let Some(secs) = report.duration_secs() {
                println!("Completed in {}m {}s", secs / 60, secs % 60);
            }
            println!();
            print_summary(&report.results);
        }
    }
    Ok(())
}

/// Print the recommendation, score tables and next steps.
pub fn print_summary(results: &AssessmentResults) {
    println!("{}", results.recommendation.headline());
    println!("Overall Confidence Score: {}%", results.overall_confidence);
    println!("{}\n", results.recommendation_reason);

    let mut sections = Table::new();
    sections.set_header(vec!["Section", "Score", "Interpretation"]);
    for (name, section) in [
        ("Psychometric Fit", &results.psychometric_fit),
        ("Technical Readiness", &results.technical_readiness),
    ] {
        sections.add_row(vec![
            Cell::new(name),
            Cell::new(format!("{}%", section.score)),
            Cell::new(&section.interpretation),
        ]);
    }
    println!("{sections}");

    let mut wiscar = Table::new();
    wiscar.set_header(vec!["Dimension", "Score", "Description"]);
    for d in &results.wiscar_dimensions {
        wiscar.add_row(vec![
            Cell::new(&d.label),
            Cell::new(format!("{}%", d.score)),
            Cell::new(&d.description),
        ]);
    }
    println!("\n{wiscar}");

    let psych = &results.psychometric_fit;
    let tech = &results.technical_readiness;
    for (title, items) in [
        ("Strengths", [&psych.strengths, &tech.strengths]),
        ("Areas to develop", [&psych.weaknesses, &tech.weaknesses]),
    ] {
        let items: Vec<&String> = items.into_iter().flatten().collect();
        if !items.is_empty() {
            println!("\n{title}:");
            for item in items {
                println!("  - {item}");
            }
        }
    }

    println!("\nNext steps:");
    for step in &results.next_steps {
        println!("  - {step}");
    }
}
