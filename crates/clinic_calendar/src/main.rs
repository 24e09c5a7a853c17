//! clinic-calendar CLI entry point.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, Utc};
use clap::Parser;
use clinic_calendar::cli::custom::{new_custom_event, CustomAction};
use clinic_calendar::cli::{Cli, Commands, OutputFormat};
use clinic_calendar::output::{format_output, pretty};
use clinic_calendar::storage::JsonFileStore;
use clinic_calendar::{CalendarService, Config, SourceSet};
use clinic_calendar_core::calendar::{EventFilter, HolidayTable, MonthCursor};
use clinic_calendar_core::print::{render_html, Legend, PrintDocument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clinic_calendar=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env();
    if let Some(data_dir) = cli.data_dir.clone() {
        config = config.with_data_dir(data_dir);
    }

    let sources = SourceSet::load(&config.data_dir)
        .with_context(|| format!("loading sources from {}", config.data_dir.display()))?;
    let store = JsonFileStore::new(config.store_path());
    let mut service = CalendarService::new(sources, HolidayTable::builtin(), store)?
        .with_slot_window(config.slot_window());

    let today = Local::now().date_naive();

    match cli.command {
        Commands::Month { year, month, print } => {
            let cursor = match (year, month) {
                (None, None) => MonthCursor::containing(today),
                (year, month) => MonthCursor::new(
                    year.unwrap_or(today.year()),
                    month.map(|m| m - 1).unwrap_or(today.month0()),
                )?,
            };
            let grid = service.month_grid(cursor);
            let summary = service.month_summary(cursor);

            if let Some(path) = print {
                let document = service.print_month(cursor, &Legend::default());
                write_print(&path, &document, cli.quiet)?;
            }

            match cli.format {
                OutputFormat::Json => println!(
                    "{}",
                    format_output(
                        &serde_json::json!({ "summary": summary, "grid": grid }),
                        cli.format
                    )
                ),
                OutputFormat::Pretty => {
                    println!("{}", pretty::format_month(&grid, &summary, today))
                }
            }
        }
        Commands::Week { date } => {
            let grid = service.week_grid(date.unwrap_or(today));
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&grid, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_week(&grid)),
            }
        }
        Commands::Day {
            date,
            types,
            doctor,
            print,
        } => {
            let mut filter = EventFilter::new().with_types(types.into_iter().map(Into::into));
            if let Some(doctor) = doctor {
                filter = filter.with_doctor(doctor);
            }
            let events = service.filtered_events_for_date(date, &filter);

            if let Some(path) = print {
                let title = format!("{} {}", config.print_title, date);
                let document = service.print_events(&title, &events, &Legend::default());
                write_print(&path, &document, cli.quiet)?;
            }

            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&events, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_day(date, &events)),
            }
        }
        Commands::Custom(custom_cmd) => match custom_cmd.action {
            CustomAction::List => {
                let events = service.custom_events();
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&events, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_custom_events(events)),
                }
            }
            CustomAction::Add {
                title,
                date,
                time,
                kind,
                notes,
                created_by,
            } => {
                let request = new_custom_event(title, date, time, kind, notes, created_by);
                let event = service.add_custom_event(request, Utc::now())?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&event, cli.format)),
                    OutputFormat::Pretty => {
                        println!("Created:\n{}", pretty::format_custom_event(&event))
                    }
                }
            }
            CustomAction::Delete { id } => {
                service.delete_custom_event(&id)?;
                if !cli.quiet {
                    println!("Deleted custom event {}", id);
                }
            }
        },
    }

    Ok(())
}

fn write_print(path: &Path, document: &PrintDocument, quiet: bool) -> Result<()> {
    let html = render_html(document).context("rendering print document")?;
    fs::write(path, html)
        .with_context(|| format!("writing print output to {}", path.display()))?;
    tracing::info!(path = %path.display(), events = document.total_events, "Wrote print document");
    if !quiet {
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}
