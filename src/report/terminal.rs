use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::{DependencyDescriptor, LicenseReport};

/// Shown in place of the license text when every candidate missed.
pub const NO_LICENSE_PLACEHOLDER: &str = "No license found.";

/// Print the manifest's dependencies as a table.
pub fn render_list(deps: &[DependencyDescriptor], quiet: bool) {
    if !quiet {
        println!(
            "\n {} v{}",
            "license-fetchr".bold(),
            env!("CARGO_PKG_VERSION")
        );
        println!(" {} dependencies\n", deps.len());
    }

    if deps.is_empty() {
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Repository").add_attribute(Attribute::Bold),
            Cell::new("First candidate").add_attribute(Attribute::Bold),
        ]);

    for dep in deps {
        table.add_row(vec![
            Cell::new(&dep.name),
            Cell::new(dep.repository_url.as_str()),
            Cell::new(dep.master_url().as_str()).fg(Color::DarkGrey),
        ]);
    }

    println!("{}", table);
}

/// Print one dependency's license under its name.
pub fn render_license(report: &LicenseReport, quiet: bool) {
    if !quiet {
        println!("\n {}", report.name.bold());
        match &report.license {
            Some(license) => println!(" {}\n", license.source_url.as_str().dimmed()),
            None => println!(),
        }
    }
    println!("{}", license_text(report));
}

fn license_text(report: &LicenseReport) -> &str {
    report
        .license
        .as_ref()
        .map(|l| l.text.as_str())
        .unwrap_or(NO_LICENSE_PLACEHOLDER)
}
