//! The `careerfit take` command.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use careerfit_core::engine::AssessmentEngine;
use careerfit_core::model::{AnswerValue, Question, QuestionKind, Section};
use careerfit_core::report::AssessmentReport;

use crate::config::load_config_from;
use crate::render;

pub fn execute(
    catalog_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    save: bool,
    output: Option<PathBuf>,
    format: Option<String>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let catalog = super::load_catalog(catalog_path.as_deref().or(config.catalog.as_deref()))?;
    let mut engine = AssessmentEngine::new(catalog);

    {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut out = io::stdout().lock();
        run_session(&mut engine, &mut input, &mut out)?;
    }

    let report = AssessmentReport::from_engine(&engine);
    println!();
    render::print_summary(&report.results);

    if save {
        let output = output.unwrap_or(config.output_dir);
        let format = format.unwrap_or(config.report_format);
        save_report(&report, &output, &format)?;
    }

    Ok(())
}

/// Drive `engine` from `intro` to `results`, prompting on `out` and
/// reading answers from `input`.
pub fn run_session<R: BufRead, W: Write>(
    engine: &mut AssessmentEngine,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    write_intro(engine, out)?;
    write!(out, "Press Enter to begin ")?;
    out.flush()?;
    read_line(input)?;
    engine.start()?;

    while !engine.is_complete() {
        let Some(question) = engine.current_question().cloned() else {
            if let Some(section) = engine.phase().section() {
                writeln!(out, "\n{}\n", section.completion_message())?;
            }
            engine.advance_section();
            continue;
        };

        if let (Some(section), Some(progress)) = (engine.phase().section(), engine.progress()) {
            writeln!(
                out,
                "\n[{}] Question {} of {} ({}%)",
                section.title(),
                progress.current,
                progress.total,
                progress.percentage()
            )?;
        }
        write_question(&question, out)?;
        let value = prompt_answer(&question, input, out)?;
        engine.record_answer(&question.id, value);
        engine.advance_question()?;
    }

    Ok(())
}

fn write_intro<W: Write>(engine: &AssessmentEngine, out: &mut W) -> Result<()> {
    let catalog = engine.catalog();
    writeln!(out, "{} Assessment", catalog.name)?;
    if !catalog.description.is_empty() {
        writeln!(out, "{}", catalog.description)?;
    }
    writeln!(out, "\n{} questions in three sections:", catalog.len())?;
    for section in Section::ALL {
        writeln!(
            out,
            "  - {} ({} questions)",
            section.title(),
            catalog.questions_for(section).len()
        )?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_question<W: Write>(question: &Question, out: &mut W) -> Result<()> {
    writeln!(out, "{}", question.text)?;
    match &question.kind {
        QuestionKind::Likert { scale } | QuestionKind::SelfRating { scale } => {
            writeln!(
                out,
                "  {} = {} ... {} = {}",
                scale.min, scale.min_label, scale.max, scale.max_label
            )?;
        }
        QuestionKind::MultipleChoice { options } => write_options(options, out)?,
        QuestionKind::Scenario {
            context,
            question,
            options,
        } => {
            writeln!(out, "  Scenario: {context}")?;
            writeln!(out, "  {question}")?;
            write_options(options, out)?;
        }
    }
    Ok(())
}

fn write_options<W: Write>(options: &[String], out: &mut W) -> Result<()> {
    for (i, option) in options.iter().enumerate() {
        writeln!(out, "  {}. {option}", i + 1)?;
    }
    Ok(())
}

/// Prompt until the input parses into the question's answer domain.
fn prompt_answer<R: BufRead, W: Write>(
    question: &Question,
    input: &mut R,
    out: &mut W,
) -> Result<AnswerValue> {
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let line = read_line(input)?;
        match parse_answer(question, line.trim()) {
            Ok(value) => return Ok(value),
            Err(hint) => writeln!(out, "{hint}")?,
        }
    }
}

/// Interpret one line of input for `question`. Choice questions accept an
/// option number or the option text; the result must be in the question's
/// domain.
fn parse_answer(question: &Question, input: &str) -> Result<AnswerValue, String> {
    let candidate = match question.kind.options() {
        Some(options) => input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| options.get(i))
            .or_else(|| options.iter().find(|o| o.eq_ignore_ascii_case(input)))
            .map(|o| AnswerValue::Text(o.clone())),
        None => input.parse::<i64>().ok().map(AnswerValue::Number),
    };

    match candidate {
        Some(value) if question.accepts(&value) => Ok(value),
        _ => Err(input_hint(question)),
    }
}

fn input_hint(question: &Question) -> String {
    match (question.kind.scale(), question.kind.options()) {
        (Some(scale), _) => format!("Please enter a number from {} to {}", scale.min, scale.max),
        (None, options) => format!(
            "Please enter an option number from 1 to {}",
            options.map_or(0, |o| o.len())
        ),
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    if read == 0 {
        bail!("input ended before the assessment was complete");
    }
    Ok(line)
}

fn save_report(report: &AssessmentReport, output: &Path, format: &str) -> Result<()> {
    std::fs::create_dir_all(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "markdown"]
    } else {
        format.split(',').collect()
    };

    for fmt in &formats {
        match fmt.trim() {
            "json" => {
                let path = output.join(format!("report-{timestamp}.json"));
                report.save_json(&path)?;
                println!("Saved {}", path.display());
            }
            "markdown" | "md" => {
                let path = output.join(format!("report-{timestamp}.md"));
                std::fs::write(&path, report.to_markdown())
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("Saved {}", path.display());
            }
            other => {
                eprintln!("Unknown format: {other}");
            }
        }
    }

    Ok(())
}
