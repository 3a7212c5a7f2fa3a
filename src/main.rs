use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use fanchart::settings::fan_chart::fan_chart_registry;
use fanchart::settings::{Document, SettingsPanel};
use fanchart::{AppConfig, Person, TreeApi};

fn cli() -> Command {
    Command::new("fanchart")
        .version(env!("CARGO_PKG_VERSION"))
        .about("WikiTree fan chart helper: pedigree loader and settings dialog builder")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("JSON config file (api_url, fields, log_filter)")
                .global(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .subcommand(
            Command::new("person")
                .about("Fetch a profile and its ancestors from the WikiTree API")
                .arg(Arg::new("key").required(true).help("WikiTree id or profile name, e.g. Windsor-1"))
                .arg(
                    Arg::new("fields")
                        .long("fields")
                        .value_name("FIELDS")
                        .help("Comma-separated profile fields (defaults to the config's list)")
                        .action(ArgAction::Append)
                        .value_delimiter(','),
                )
                .arg(
                    Arg::new("generations")
                        .long("generations")
                        .value_name("N")
                        .help("Ancestor generations to load")
                        .default_value("3")
                        .value_parser(value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Render the fan chart settings dialog")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_name("FORMAT")
                        .help("html: built dialog, markup: empty dialog shell, defaults: default options as JSON")
                        .default_value("html")
                        .value_parser(["html", "markup", "defaults"]),
                ),
        )
}

fn init_tracing(config: &AppConfig) {
    let filter = match &config.log_filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();

    let config_path = matches.get_one::<PathBuf>("config");
    let config = AppConfig::load(config_path.map(PathBuf::as_path)).context("Failed to load config")?;
    init_tracing(&config);

    match matches.subcommand() {
        Some(("person", sub)) => run_person(&config, sub).await,
        Some(("settings", sub)) => run_settings(sub),
        Some((other, _)) => bail!("Unknown command: {other}"),
        None => bail!("No command given"),
    }
}

async fn run_person(config: &AppConfig, matches: &ArgMatches) -> Result<()> {
    let key = matches
        .get_one::<String>("key")
        .context("Missing profile key")?;
    let fields: Vec<String> = match matches.get_many::<String>("fields") {
        Some(fields) => fields.cloned().collect(),
        None => config.fields.clone(),
    };
    let generations = matches
        .get_one::<usize>("generations")
        .copied()
        .context("Missing generation count")?;

    let api = TreeApi::from_config(config).context("Failed to create WikiTree API client")?;
    tracing::info!("Loading {key} and {generations} generations from {}", api.api_url());

    let person = api
        .get_ancestors(key, &fields, generations)
        .await
        .with_context(|| format!("Failed to load profile {key}"))?;

    println!("{}", describe(&person));
    for (generation, ancestor) in person.ancestors(generations) {
        println!("{}{}", "  ".repeat(generation), describe(ancestor));
    }
    Ok(())
}

/// One pedigree line: name, id and life dates.
fn describe(person: &Person) -> String {
    let name = person
        .display_name()
        .or(person.name())
        .unwrap_or("(unknown)");
    let id = person.id().map(|id| id.to_string()).unwrap_or_default();
    let born = person.birth_date().unwrap_or("?");
    let died = person.death_date().unwrap_or("");
    let mut line = format!("{name} [{id}] ({born} - {died})");
    if let Some(place) = person.birth_location().filter(|p| !p.is_empty()) {
        line.push_str(&format!(", b. {place}"));
    }
    line
}

fn run_settings(matches: &ArgMatches) -> Result<()> {
    let registry = fan_chart_registry().context("Failed to parse the fan chart settings registry")?;
    let mut panel = SettingsPanel::new(registry);
    let format = matches.get_one::<String>("format").map(String::as_str).unwrap_or("html");

    match format {
        "defaults" => {
            let defaults = panel.default_options();
            println!("{}", serde_json::to_string_pretty(&defaults)?);
        }
        "markup" => println!("{}", panel.create_settings_div()),
        _ => {
            let mut doc = Document::new();
            let body = doc.body();
            let dialog = panel.mount_dialog(&mut doc, body);
            panel.build_page(&mut doc);
            if let Some(first) = panel.registry().tabs.first().map(|t| t.name.clone()) {
                panel.active_tab_changed(&mut doc, &first);
            }
            tracing::info!(issues = panel.diagnostics().len(), "Settings dialog built");
            println!("{}", doc.to_html(dialog));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn test_generations_default_comes_from_clap() {
        let matches = cli().try_get_matches_from(["fanchart", "person", "Windsor-1"]).unwrap();
        let (_, person) = matches.subcommand().unwrap();
        assert_eq!(person.get_one::<usize>("generations"), Some(&3));
        assert!(person.get_many::<String>("fields").is_none());
    }

    #[test]
    fn test_fields_are_comma_separated() {
        let matches = cli()
            .try_get_matches_from(["fanchart", "person", "Windsor-1", "--fields", "Id,Name", "--generations", "1"])
            .unwrap();
        let (_, person) = matches.subcommand().unwrap();
        let fields: Vec<&String> = person.get_many::<String>("fields").unwrap().collect();
        assert_eq!(fields, ["Id", "Name"]);
        assert_eq!(person.get_one::<usize>("generations"), Some(&1));
    }
}
