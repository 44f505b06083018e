//! Labyrinth knowledge-base inspector
//!
//! Builds the axiom set of a logical maze and prints it.

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use labyrinth::{LogicalAgent, LogicalConfig, MazeResult, Proposition, TracingSink, Variant};

/// Largest grid whose models may be enumerated.
const MAX_MODEL_GRID: usize = 2;

/// Inspector configuration
struct Config {
    /// Maze configuration
    maze: LogicalConfig,
    /// File to write the clause listing to
    out: Option<PathBuf>,
    /// Print the knowledge base as JSON instead of text
    json: bool,
    /// Enumerate every model
    models: bool,
}

fn usage() {
    println!("labyrinth-kb - dump the axioms of a logical maze");
    println!();
    println!("USAGE:");
    println!("    labyrinth-kb [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --size <N>         Grid side length [default: 6]");
    println!("    -c, --config <FILE>    JSON maze configuration ({{\"variant\": \"logical\", ...}})");
    println!("    -o, --out <FILE>       Also write the clause listing to FILE");
    println!("        --json             Print a JSON snapshot instead of the listing");
    println!("        --models           Enumerate every model (grids up to {MAX_MODEL_GRID}x{MAX_MODEL_GRID})");
    println!("    -h, --help             Print help information");
}

fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}

fn value_of<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    args.get(i + 1)
        .map(String::as_str)
        .unwrap_or_else(|| fail(&format!("{flag} requires a value")))
}

fn load_config(path: &str) -> LogicalConfig {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| fail(&format!("cannot read {path}: {e}")));
    match serde_json::from_str::<Variant>(&text) {
        Ok(Variant::Logical(config)) => config,
        Ok(Variant::Bayesian(_)) => fail("a Bayesian maze has no knowledge base"),
        Err(e) => fail(&format!("invalid configuration in {path}: {e}")),
    }
}

fn parse_args() -> Config {
    let args: Vec<String> = std::env::args().collect();
    let mut config = Config {
        maze: LogicalConfig::default(),
        out: None,
        json: false,
        models: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--size" | "-n" => {
                let value = value_of(&args, i, "--size");
                config.maze.size = value
                    .parse()
                    .unwrap_or_else(|_| fail(&format!("invalid grid size: {value}")));
                i += 2;
            }
            "--config" | "-c" => {
                config.maze = load_config(value_of(&args, i, "--config"));
                i += 2;
            }
            "--out" | "-o" => {
                config.out = Some(PathBuf::from(value_of(&args, i, "--out")));
                i += 2;
            }
            "--json" => {
                config.json = true;
                i += 1;
            }
            "--models" => {
                config.models = true;
                i += 1;
            }
            "--help" | "-h" => {
                usage();
                std::process::exit(0);
            }
            arg => fail(&format!("unknown argument: {arg}")),
        }
    }

    config
}

/// Cause atoms that hold in a model, e.g. `["M(0,1)", "P(1,1)"]`.
fn occupied(model: &[String]) -> Vec<String> {
    model
        .iter()
        .filter_map(|literal| match Proposition::parse_literal(literal) {
            Ok((true, prop @ Proposition::Cause { .. })) => Some(prop.to_string()),
            _ => None,
        })
        .collect()
}

fn run(config: &Config) -> MazeResult<()> {
    let agent = LogicalAgent::with_trace(config.maze, Box::new(TracingSink))?;
    let kb = agent.kb();
    info!(kb = %kb.id(), size = config.maze.size, clauses = kb.len(), "axioms built");

    if config.json {
        println!("{}", kb.snapshot_json()?);
    } else {
        kb.dump(&mut std::io::stdout().lock())?;
    }

    if let Some(path) = &config.out {
        kb.dump_to_file(path)?;
        info!(path = %path.display(), "clause listing written");
    }

    if config.models {
        if config.maze.size > MAX_MODEL_GRID {
            fail(&format!(
                "--models is limited to grids of size {MAX_MODEL_GRID} or less"
            ));
        }
        let models = kb.all_models()?;
        println!("{} models", models.len());
        for (i, model) in models.iter().enumerate() {
            println!("model {i}: {:?}", occupied(model));
        }
    }

    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let config = parse_args();
    if let Err(e) = run(&config) {
        fail(&e.to_string());
    }
}
