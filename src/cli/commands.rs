use crate::config;
use crate::core::{ExportOutcome, Session};
use crate::error::{YardError, YardResult};
use crate::excel::ReportImporter;
use crate::parser;
use crate::report::format_report;
use crate::types::{Material, StorageType};
use crate::writer;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Load an input file into a fresh session and run the calculation.
/// Progress goes to stdout only when `verbose`; failures go to stderr.
fn load_and_calculate(file: &Path, verbose: bool) -> YardResult<Session> {
    if verbose {
        println!("{}", "📖 Reading input file...".cyan());
    }
    let inputs = parser::parse_inputs(file)?;
    let mut session = inputs.to_session()?;

    if verbose {
        for form in session.forms() {
            println!(
                "   {}: V = {} m³, storage = {}, q = {:.1}, Kис = {:.2}",
                form.material().name().bright_blue(),
                form.volume_m3,
                form.storage_type()
                    .map(|t| t.label())
                    .unwrap_or("(not selected)"),
                form.q(),
                form.kis()
            );
        }
        println!();
        println!("{}", "🧮 Calculating yard areas...".cyan());
    }

    if let Err(e) = session.calculate() {
        eprintln!("{} {}", "❌".red(), session.status().to_string().bold().red());
        return Err(e);
    }
    Ok(session)
}

/// Export the session's report. With `quiet` nothing is printed to stdout.
fn export_session(session: &mut Session, output: &Path, verbose: bool, quiet: bool) -> YardResult<()> {
    if verbose && !quiet {
        println!("{}", "📊 Exporting to Excel...".cyan());
    }

    match session.export(Some(output)) {
        Ok(ExportOutcome::Saved(path)) => {
            if !quiet {
                println!("{}", "✅ Export Complete!".bold().green());
                println!("   Excel file: {}\n", path.display());
            }
            Ok(())
        }
        Ok(ExportOutcome::Cancelled) => Ok(()),
        Err(e) => {
            eprintln!("{} {}", "❌".red(), session.status().to_string().bold().red());
            Err(e)
        }
    }
}

/// Execute the calculate command. With `json`, stdout carries only the
/// JSON report.
pub fn calculate(
    file: PathBuf,
    json: bool,
    output: Option<PathBuf>,
    verbose: bool,
) -> YardResult<()> {
    if !json {
        println!("{}", "🏗️  Yard - Calculating storage area".bold().green());
        println!("   File: {}\n", file.display());
    }

    let mut session = load_and_calculate(&file, verbose && !json)?;
    let report = session.last_result().ok_or(YardError::NotCalculated)?;

    if json {
        let rendered = serde_json::to_string_pretty(report)
            .map_err(|e| YardError::Export(format!("Failed to render JSON: {}", e)))?;
        println!("{rendered}");
    } else {
        println!("{}\n", format_report(report));
        println!("{}", session.status().to_string().green());
    }

    if let Some(output) = output {
        export_session(&mut session, &output, verbose, json)?;
    }

    Ok(())
}

/// Execute the export command
pub fn export(file: PathBuf, output: Option<PathBuf>, verbose: bool) -> YardResult<()> {
    let output = output.unwrap_or_else(|| {
        PathBuf::from(config::default_report_filename(
            chrono::Local::now().naive_local(),
        ))
    });

    println!("{}", "🏗️  Yard - Excel Export".bold().green());
    println!("   Input:  {}", file.display());
    println!("   Output: {}\n", output.display());

    let mut session = load_and_calculate(&file, verbose)?;
    if let Some(report) = session.last_result() {
        println!("   Total yard area: {}\n", format!("{:.2} m²", report.total_area_m2).bold());
    }

    export_session(&mut session, &output, verbose, false)
}

/// Execute the show command - read an exported report back
pub fn show(file: PathBuf) -> YardResult<()> {
    println!("{}", "🏗️  Yard - Report".bold().green());
    println!("   File: {}\n", file.display());

    let report = ReportImporter::new(&file).import()?;
    println!("{}", format_report(&report));

    Ok(())
}

/// Execute the presets command
pub fn presets() -> YardResult<()> {
    println!("{}", "📋 Materials:".bold().cyan());
    for material in Material::ALL {
        println!("   {}", material.name().bright_blue());
    }

    println!("\n{}", "📋 Storage types:".bold().cyan());
    for storage_type in StorageType::ALL {
        let height = storage_type
            .height_range()
            .map(|h| format!(", stack height {h} m"))
            .unwrap_or_default();
        println!(
            "   {}: q {} m³/m²{}",
            storage_type.label().bright_blue(),
            storage_type.q_range(),
            height
        );
    }

    println!(
        "\n   Kис range: {} (default {:.2})",
        config::KIS_RANGE,
        config::DEFAULT_KIS
    );
    println!(
        "   q before a storage type is chosen: {} (default {:.1})",
        config::Q_UNSELECTED_RANGE,
        config::DEFAULT_Q
    );

    Ok(())
}

/// Execute the init command - write a template input file
pub fn init(file: PathBuf) -> YardResult<()> {
    writer::write_template(&file)?;
    println!("{}", "✅ Template written".bold().green());
    println!("   File: {}", file.display());
    println!("   Fill in the volume for every material, then run 'yard calculate'");
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
