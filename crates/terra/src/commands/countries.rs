//! Country command handlers.

use std::sync::Arc;

use tabled::Tabled;

use terra_core::{Country, LoadStatus, Region, Route, SortKey, SortOrder, SortSpec};

use crate::cli::{CountriesArgs, CountriesCommand, CountryListArgs, GlobalOpts, SortField};
use crate::error::CliError;
use crate::output;

use super::Context;
use super::util::{fail_on_error, load_canonical};

// ── Table row ────────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct CountryRow {
    #[tabled(rename = "")]
    pub fav: String,
    #[tabled(rename = "Code")]
    pub code: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Capital")]
    pub capital: String,
    #[tabled(rename = "Region")]
    pub region: String,
    #[tabled(rename = "Population")]
    pub population: String,
    #[tabled(rename = "Area")]
    pub area: String,
}

impl CountryRow {
    pub fn new(country: &Country, favorite: bool, color: bool) -> Self {
        Self {
            fav: output::star(favorite, color),
            code: country.code.clone(),
            name: country.name.clone(),
            capital: country.capital().unwrap_or("-").to_owned(),
            region: country.region.clone(),
            population: output::group_thousands(country.population),
            area: output::format_area(country.area),
        }
    }
}

#[derive(Tabled)]
struct SuggestionRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Capital")]
    capital: String,
}

// ── Detail view ──────────────────────────────────────────────────────

fn join_or_dash<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let joined = items.collect::<Vec<_>>().join(", ");
    if joined.is_empty() { "-".into() } else { joined }
}

fn detail(country: &Country, favorite: bool, color: bool) -> String {
    let heading = if favorite {
        format!("{} {}", country.name, output::star(true, color))
    } else {
        country.name.clone()
    };

    let region = match &country.subregion {
        Some(sub) => format!("{} / {sub}", country.region),
        None => country.region.clone(),
    };
    let currencies: Vec<String> = country
        .currencies
        .iter()
        .map(|(code, c)| match &c.symbol {
            Some(symbol) => format!("{} ({code}, {symbol})", c.name),
            None => format!("{} ({code})", c.name),
        })
        .collect();

    let lines = [
        ("Official name", country.official_name.clone()),
        ("Code", country.code.clone()),
        ("Region", region),
        ("Capital", join_or_dash(country.capitals.iter().map(String::as_str))),
        ("Population", output::group_thousands(country.population)),
        ("Area", output::format_area(country.area)),
        ("Currencies", join_or_dash(currencies.iter().map(String::as_str))),
        ("Languages", join_or_dash(country.languages.values().map(String::as_str))),
        ("Borders", join_or_dash(country.borders.iter().map(String::as_str))),
        (
            "Flag",
            country
                .flags
                .png
                .clone()
                .or_else(|| country.flags.svg.clone())
                .unwrap_or_else(|| "-".into()),
        ),
    ];

    let mut out = output::label(&heading, color);
    for (name, value) in lines {
        out.push_str(&format!("\n  {:<14} {value}", format!("{name}:")));
    }
    out
}

// ── Handler ──────────────────────────────────────────────────────────

pub async fn handle(ctx: &Context, args: CountriesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        CountriesCommand::List(list) => list_countries(ctx, list, global).await,
        CountriesCommand::Show { code } => show(ctx, &code, global).await,
        CountriesCommand::Suggest { query } => suggest(ctx, &query, global).await,
    }
}

fn sort_key(field: SortField) -> SortKey {
    match field {
        SortField::Name => SortKey::Name,
        SortField::Population => SortKey::Population,
        SortField::Area => SortKey::Area,
    }
}

async fn list_countries(
    ctx: &Context,
    args: CountryListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    ctx.require(Route::Home)?;

    let region = match args.region.as_deref() {
        Some(raw) => Region::parse_filter(raw).map_err(|_| CliError::Validation {
            field: "region".into(),
            reason: format!(
                "unknown region '{raw}' (expected one of: all, {})",
                Region::all()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        })?,
        None => None,
    };

    let mut controller = ctx.controller()?;
    if let Some(field) = args.sort {
        let order = if args.desc {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };
        controller.set_sort(SortSpec::new(sort_key(field), order));
    }

    match (args.search.as_deref().map(str::trim), region) {
        (Some(query), _) if !query.is_empty() => controller.search(query).await,
        (_, Some(region)) => controller.filter_by_region(Some(region)).await,
        _ => controller.load_all().await,
    }
    fail_on_error(controller.status())?;
    if matches!(controller.status(), LoadStatus::NoResults) {
        output::notice("No countries found.", global.quiet);
    }

    let color = output::should_color(&global.color);
    let countries: Vec<&Country> = controller.working_set().iter().map(Arc::as_ref).collect();
    let out = output::render_list(
        &global.output,
        &countries,
        |c| CountryRow::new(c, controller.is_favorite(&c.code), color),
        |c| c.code.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

async fn show(ctx: &Context, code: &str, global: &GlobalOpts) -> Result<(), CliError> {
    ctx.require(Route::Country(code.trim().to_ascii_uppercase()))?;

    let controller = ctx.controller()?;
    let country = controller.country(code).await?;
    let favorite = controller.is_favorite(&country.code);
    let color = output::should_color(&global.color);

    let out = output::render_single(
        &global.output,
        country.as_ref(),
        |c| detail(c, favorite, color),
        |c| c.code.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

async fn suggest(ctx: &Context, query: &str, global: &GlobalOpts) -> Result<(), CliError> {
    ctx.require(Route::Home)?;

    let mut controller = ctx.controller()?;
    load_canonical(&mut controller).await?;
    controller.update_suggestions(query);

    let matches: Vec<&Country> = controller.suggestions().iter().map(Arc::as_ref).collect();
    let out = output::render_list(
        &global.output,
        &matches,
        |c| SuggestionRow {
            code: c.code.clone(),
            name: c.name.clone(),
            capital: c.capital().unwrap_or("-").to_owned(),
        },
        |c| c.code.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
