use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use serde::Serialize;
use std::fmt::{self, Write as _};
use std::io::Stdout;
use std::time::Duration;
use tracing::{debug, info};

use crate::app::{handle_input, App};
use crate::cli::CliArgs;
use crate::ui;
use recipe_browser::catalog::{AreaSelection, Listing, Session};
use recipe_browser::source::RemoteRecipeSource;
use recipe_browser::CanonicalRecipe;

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Everything a headless run prints, in one serializable shape.
#[derive(Debug, Serialize)]
struct HeadlessReport<'a> {
    summary: String,
    warnings: &'a [String],
    area: &'a str,
    search: Option<&'a str>,
    #[serde(flatten)]
    listing: Listing,
}

/// Answers one query without a terminal: `--detail` resolves a single recipe,
/// otherwise the `--area` selection, the `--search` term or the MealDB
/// `--remote-search` results are listed.
pub async fn run_headless<R: RemoteRecipeSource>(session: &Session<R>, args: &CliArgs) -> Result<()> {
    if let Some(id) = &args.detail {
        let recipe = resolve_detail(session, id).await?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&recipe)?);
        } else {
            print!("{}", format_detail(&recipe)?);
        }
        return Ok(());
    }

    let area = args.area.as_deref().unwrap_or_default();
    let selection = AreaSelection::from_label(area);
    let listing = if let Some(term) = &args.remote_search {
        session.engine.remote_search(term).await
    } else if let Some(term) = &args.search {
        Listing::ok(session.engine.search(term, &selection))
    } else {
        session.engine.area_listing(&selection).await
    };
    info!(
        area = selection.label(),
        results = listing.recipes.len(),
        "headless query finished"
    );

    let report = HeadlessReport {
        summary: session.summary(),
        warnings: &session.warnings,
        area: selection.label(),
        search: args.remote_search.as_deref().or(args.search.as_deref()),
        listing,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_report(&report)?);
    }

    Ok(())
}

async fn resolve_detail<R: RemoteRecipeSource>(
    session: &Session<R>,
    id: &str,
) -> Result<CanonicalRecipe> {
    let known = session
        .store()
        .all()
        .iter()
        .find(|recipe| recipe.id == id)
        .cloned();

    let resolved = match known {
        Some(recipe) => session.resolver.resolve(recipe).await,
        None => session.resolver.resolve_id(id).await,
    };

    resolved.map_err(|err| eyre!("Could not load recipe {id}: {err}"))
}

fn format_report(report: &HeadlessReport<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let heading = if report.area.is_empty() {
        "All cuisines"
    } else {
        report.area
    };

    write_heading(&mut out, heading)?;
    writeln!(out, "{}", report.summary)?;
    for warning in report.warnings {
        writeln!(out, "Warning: {warning}")?;
    }
    if let Some(term) = report.search {
        writeln!(out, "Search: {term}")?;
    }
    if let Some(err) = &report.listing.error {
        writeln!(out, "Error: {err}")?;
    }

    writeln!(out, "\nRecipes ({}):", report.listing.recipes.len())?;
    if report.listing.recipes.is_empty() {
        writeln!(out, "No recipes found.")?;
    }
    for recipe in &report.listing.recipes {
        writeln!(
            out,
            "- {} | {} | {} | {} | {}",
            recipe.id,
            recipe.name,
            recipe.region,
            recipe.category,
            recipe.source.label()
        )?;
    }

    Ok(out)
}

fn format_detail(recipe: &CanonicalRecipe) -> Result<String, fmt::Error> {
    let mut out = String::new();

    write_heading(&mut out, &recipe.name)?;
    writeln!(out, "Id: {}", recipe.id)?;
    writeln!(out, "Area: {}", recipe.region)?;
    writeln!(out, "Category: {}", recipe.category)?;
    writeln!(out, "Source: {}", recipe.source.label())?;
    writeln!(out, "Image: {}", recipe.thumbnail_url)?;

    writeln!(out, "\nIngredients:")?;
    for line in recipe.ingredients.display_lines() {
        writeln!(out, "- {line}")?;
    }

    writeln!(out, "\nInstructions:\n{}", recipe.instructions_text())?;
    Ok(out)
}

fn write_heading(out: &mut String, heading: &str) -> fmt::Result {
    writeln!(out, "\n{heading}")?;
    writeln!(out, "{}", "=".repeat(heading.chars().count()))
}

/// Run the main application event loop
pub async fn run<R>(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App<R>) -> Result<()>
where
    R: RemoteRecipeSource + 'static,
{
    loop {
        // Apply finished background queries before drawing
        app.drain_events();
        app.tick();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(eyre!("Terminal draw error: {e}"));
        }

        if !matches!(event::poll(EVENT_POLL_TIMEOUT), Ok(true)) {
            tokio::task::yield_now().await;
            continue;
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                handle_input(app, key.code);
                if !app.running {
                    break;
                }
            }
            Ok(Event::Resize(width, height)) => {
                debug!(width, height, "terminal resized");
            }
            Ok(_) => {}
            Err(e) => return Err(eyre!("Terminal input error: {e}")),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_browser::{Ingredients, SourceKind, RESERVED_AREA};

    fn dosa() -> CanonicalRecipe {
        CanonicalRecipe {
            id: "si-001".to_string(),
            name: "Masala Dosa".to_string(),
            thumbnail_url: String::new(),
            region: RESERVED_AREA.to_string(),
            category: String::new(),
            instructions: Some("Spread batter thin.\nAdd potato filling.".to_string()),
            ingredients: Ingredients::Inline(vec!["rice".to_string(), "potato".to_string()]),
            source: SourceKind::Local,
        }
    }

    #[test]
    fn text_report_lists_each_recipe() -> Result<(), fmt::Error> {
        let warnings = vec!["timed out".to_string()];
        let report = HeadlessReport {
            summary: "Loaded 1 local and 0 MealDB recipes".to_string(),
            warnings: &warnings,
            area: RESERVED_AREA,
            search: None,
            listing: Listing::ok(vec![dosa()]),
        };

        let text = format_report(&report)?;
        assert!(text.contains("Indian\n======"));
        assert!(text.contains("Warning: timed out"));
        assert!(text.contains("- si-001 | Masala Dosa | Indian |  | Local"));
        Ok(())
    }

    #[test]
    fn empty_report_says_so() -> Result<(), fmt::Error> {
        let report = HeadlessReport {
            summary: String::new(),
            warnings: &[],
            area: "",
            search: Some("saffron"),
            listing: Listing::default(),
        };

        let text = format_report(&report)?;
        assert!(text.contains("All cuisines"));
        assert!(text.contains("Search: saffron"));
        assert!(text.contains("No recipes found."));
        Ok(())
    }

    #[test]
    fn json_report_flattens_the_listing() -> Result<()> {
        let report = HeadlessReport {
            summary: String::new(),
            warnings: &[],
            area: "Italian",
            search: None,
            listing: Listing {
                recipes: Vec::new(),
                error: Some("timed out".to_string()),
            },
        };

        let value = serde_json::to_value(&report)?;
        assert_eq!(value["area"], "Italian");
        assert_eq!(value["error"], "timed out");
        assert!(value["recipes"].as_array().is_some_and(Vec::is_empty));
        Ok(())
    }

    #[test]
    fn detail_text_includes_ingredients_and_instructions() -> Result<(), fmt::Error> {
        let text = format_detail(&dosa())?;
        assert!(text.contains("Masala Dosa\n==========="));
        assert!(text.contains("- potato"));
        assert!(text.contains("Add potato filling."));
        Ok(())
    }
}
