use clap::Parser;
use knobs_common::ExampleId;
use knobs_mocks::{Catalog, MockSession, MocksConfig};
use std::path::PathBuf;
use tracing::{error, info};

/// knobs-mocks — show a component mock with its knob panel.
#[derive(Parser)]
#[command(name = "knobs-mocks")]
struct Args {
    /// YAML catalog with extra examples.
    #[arg(long, env = "KNOBS_CONFIG")]
    config: Option<PathBuf>,

    /// Example to show.
    #[arg(long, env = "KNOBS_EXAMPLE")]
    example: Option<String>,

    /// URL args from a shared link, e.g. `label:Save;`.
    #[arg(long, env = "KNOBS_ARGS")]
    args: Option<String>,

    /// Preset to apply after the first render.
    #[arg(long)]
    preset: Option<String>,

    /// Set a knob, `label=value`. Repeatable.
    #[arg(long = "set", value_parser = parse_assignment)]
    set: Vec<(String, String)>,

    /// Print the knob snapshot as JSON instead of the panel.
    #[arg(long)]
    json: bool,

    /// List the catalog and exit.
    #[arg(long)]
    list: bool,
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(label, value)| (label.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected label=value, got '{raw}'"))
}

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .with_target(false)
        .with_file(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn load_catalog(args: &Args) -> Catalog {
    let Some(path) = &args.config else {
        return Catalog::builtin();
    };
    let catalog = MocksConfig::load(path).and_then(Catalog::with_config);
    match catalog {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Failed to load {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

fn main() {
    dotenvy::dotenv().ok();
    configure_logging();
    let args = Args::parse();

    let catalog = load_catalog(&args);

    if args.list {
        for example in catalog.examples() {
            println!("{:<16} {}", example.id.as_str(), example.title);
        }
        return;
    }

    let Some(first) = catalog.examples().first() else {
        error!("Catalog is empty");
        std::process::exit(1);
    };
    let example = args
        .example
        .as_deref()
        .map(ExampleId::from)
        .unwrap_or_else(|| first.id.clone());

    let mut session = MockSession::new(catalog);
    if let Some(raw) = &args.args {
        session.registry().apply_url_args(raw);
    }

    if let Err(e) = session.show(&example) {
        error!("{e}");
        std::process::exit(1);
    }
    info!("Showing {example}");

    if let Some(name) = &args.preset {
        if let Err(e) = session.apply_preset(name) {
            error!("{e}");
            std::process::exit(1);
        }
    }
    for (label, value) in &args.set {
        if let Err(e) = session.set(label, value) {
            error!("{e}");
            std::process::exit(1);
        }
    }

    if args.json {
        let printed = session
            .snapshot()
            .map_err(|e| e.to_string())
            .and_then(|snapshot| {
                serde_json::to_string_pretty(&snapshot).map_err(|e| e.to_string())
            });
        match printed {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("Failed to serialize snapshot: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    match session.panel() {
        Ok(panel) => print!("{panel}"),
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
    println!();
    println!("{}", session.preview());
    println!("args: {}", session.registry().build_url_args());
}
