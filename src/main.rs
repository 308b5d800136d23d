//! u-dispatch - multi-depot route planner CLI.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{arg, Arg, Command};
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use u_dispatch::config::RoutingConfig;
use u_dispatch::constructive::normalize_demands;
use u_dispatch::evaluation::ResultChecker;
use u_dispatch::io::{
    format_report, load_instance_or_default, to_document, write_instance_json, write_report,
};
use u_dispatch::planner::{plan_with, Strategy};

fn cli() -> Command {
    Command::new("u-dispatch")
        .about("Plans one delivery route per depot with a greedy nearest-neighbor heuristic")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("PATH")
                .help("Instance JSON; the built-in instance is used if missing or invalid")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("data.json"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .help("Where to write the text report")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("resultado_rutas.txt"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Routing parameters as JSON (minDemandKg, vehicleCapacityKg)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("capacity")
                .long("capacity")
                .value_name("KG")
                .help("Vehicle capacity in kg")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("min-demand")
                .long("min-demand")
                .value_name("KG")
                .help("Minimum customer demand in kg")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("export")
                .long("export")
                .value_name("PATH")
                .help("Write the instance with the planned routes as JSON")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(arg!(--recompute "Ignore routes stored in the instance and construct new ones"))
        .arg(arg!(--check "Log inconsistencies found in the planned routes"))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(
            "u_dispatch=info".parse().unwrap_or_else(|_| LevelFilter::INFO.into()),
        ))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let matches = cli().get_matches();

    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<RoutingConfig>(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => RoutingConfig::default(),
    };
    if let Some(&kg) = matches.get_one::<f64>("capacity") {
        config = config.with_vehicle_capacity(kg);
    }
    if let Some(&kg) = matches.get_one::<f64>("min-demand") {
        config = config.with_min_demand(kg);
    }
    config.validate()?;

    let input = matches
        .get_one::<PathBuf>("input")
        .context("missing --input")?;
    let mut instance = load_instance_or_default(input);

    let strategy = if matches.get_flag("recompute") {
        Strategy::Construct
    } else {
        Strategy::select(&instance)
    };
    let result = plan_with(&instance, &config, strategy).context("planning routes")?;

    normalize_demands(&mut instance, config.min_demand_kg);

    if matches.get_flag("check") {
        for violation in ResultChecker::new(&instance).check(&result) {
            warn!(?violation, "inconsistent route data");
        }
    }

    let report = format_report(&instance, &result);
    println!("{report}");

    let output = matches
        .get_one::<PathBuf>("output")
        .context("missing --output")?;
    write_report(output, &report)
        .with_context(|| format!("writing report to {}", output.display()))?;
    let shown = fs::canonicalize(output).unwrap_or_else(|_| output.clone());
    info!(path = %shown.display(), "report saved");

    if let Some(path) = matches.get_one::<PathBuf>("export") {
        write_instance_json(path, &to_document(&instance, &result))
            .with_context(|| format!("exporting instance to {}", path.display()))?;
        info!(path = %path.display(), "instance exported");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        cli().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let m = cli().get_matches_from(["u-dispatch"]);
        assert_eq!(m.get_one::<PathBuf>("input"), Some(&PathBuf::from("data.json")));
        assert_eq!(m.get_one::<PathBuf>("output"), Some(&PathBuf::from("resultado_rutas.txt")));
        assert!(!m.get_flag("recompute"));
        assert!(m.get_one::<f64>("capacity").is_none());
    }

    #[test]
    fn test_cli_overrides() {
        let m = cli().get_matches_from([
            "u-dispatch",
            "--capacity",
            "5000",
            "--min-demand",
            "100",
            "--recompute",
            "--export",
            "out.json",
        ]);
        assert_eq!(m.get_one::<f64>("capacity"), Some(&5000.0));
        assert_eq!(m.get_one::<f64>("min-demand"), Some(&100.0));
        assert!(m.get_flag("recompute"));
        assert_eq!(m.get_one::<PathBuf>("export"), Some(&PathBuf::from("out.json")));
    }
}
