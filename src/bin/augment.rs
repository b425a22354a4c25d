//! CLI wrapper for the augment extension methods.
//!
//! Usage:
//!   augment '" padded "' trim                 # => "padded"
//!   augment '{a: 1}' translate '{a: "b"}'     # => { b: 1 }
//!   augment --list                            # List every method per kind

use augment::runner::api::Augment;
use augment::runner::plugin::config::AugmentConfig;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "augment", version, about = "Call extension methods on literal values")]
struct Cli {
    /// Receiver, as a literal (`'"text"'`, `'{a: 1}'`, `'[1, 2]'`)
    #[arg(required_unless_present = "list")]
    receiver: Option<String>,

    /// Method to call on the receiver
    #[arg(required_unless_present = "list")]
    method: Option<String>,

    /// Arguments, each as a literal
    #[arg(allow_hyphen_values = true)]
    args: Vec<String>,

    /// Configuration file (`[extensions]` section)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the extension revision: current or legacy
    #[arg(long)]
    revision: Option<String>,

    /// Override what translate does with unmapped keys: keep, drop or error
    #[arg(long)]
    missing_key: Option<String>,

    /// Override what flip does with repeated values: last_wins or error
    #[arg(long)]
    duplicate_values: Option<String>,

    /// List the methods available on each kind and exit
    #[arg(long)]
    list: bool,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    let mut augment = Augment::with_config(config);

    if cli.list {
        print_methods(&augment);
        return;
    }

    let (receiver, method) = match (&cli.receiver, &cli.method) {
        (Some(receiver), Some(method)) => (receiver, method),
        _ => {
            eprintln!("A receiver and a method are required");
            process::exit(1);
        }
    };

    match augment.call_literals(receiver, method, &cli.args) {
        Ok(value) => println!("{}", value),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_config(cli: &Cli) -> Result<AugmentConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => AugmentConfig::load(path)?,
        None => AugmentConfig::default(),
    };
    if let Some(revision) = &cli.revision {
        config.set("revision", revision)?;
    }
    if let Some(missing_key) = &cli.missing_key {
        config.set("missing_key", missing_key)?;
    }
    if let Some(duplicate_values) = &cli.duplicate_values {
        config.set("duplicate_values", duplicate_values)?;
    }
    Ok(config)
}

fn print_methods(augment: &Augment) {
    let registry = augment.registry();
    println!("revision: {}", augment.config().revision.as_str());
    for kind in &["Object", "Function", "String", "Array", "Number", "Boolean"] {
        if let Some(table) = registry.get_object(kind) {
            println!("{}: {}", kind, table.method_names().join(", "));
        }
    }
    if !registry.skipped().is_empty() {
        println!("kept host versions of: {}", registry.skipped().join(", "));
    }
}
