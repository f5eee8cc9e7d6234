//! Teaser Gen - headless driver
//!
//! `teaser-gen [template-id] [company.json] [settings.json]` selects a
//! template, optionally loads company data, previews the page, and exports
//! it as PDF and PNG. `teaser-gen --list` prints the template gallery.

use anyhow::Context;
use std::process::ExitCode;
use store::{ExportFormat, ExportSettings, Exporter};
use teaser_gen::Shell;
use teaser_model::{catalog, CompanyData, Template, TemplateId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let template_id = args
        .next()
        .unwrap_or_else(|| TemplateId::Goldman.as_str().to_string());
    if template_id == "--list" {
        let gallery: Vec<_> = catalog().iter().map(Template::summary).collect();
        println!("{}", serde_json::to_string_pretty(&gallery)?);
        return Ok(ExitCode::SUCCESS);
    }
    let data_path = args.next();
    let settings_path = args.next();

    let settings = match &settings_path {
        Some(path) => ExportSettings::load_async(path)
            .await
            .with_context(|| format!("reading settings from {}", path))?,
        None => ExportSettings::default(),
    };
    let mut shell = Shell::new(Exporter::new(settings));

    if let Some(path) = &data_path {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading company data from {}", path))?;
        let data = CompanyData::from_json(&json)
            .with_context(|| format!("parsing company data from {}", path))?;
        shell.replace_data(data)?;
    }

    let template = shell.select_template(&template_id)?;
    tracing::info!(template = %template.id, company = %shell.data().company_name, "Template selected");
    shell.preview()?;

    let mut failed = false;
    for format in ExportFormat::ALL {
        match shell.export(format).await {
            Ok(output) => println!("{}", output.path.display()),
            Err(e) => {
                tracing::debug!(error = %e, "Export error detail");
                failed = true;
            }
        }
    }

    for notice in shell.take_notices() {
        eprintln!("{}", notice.message);
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
