#![deny(unsafe_code)]
//! CLI binary for the plotlines pattern generators.
//!
//! Subcommands:
//! - `render <generator>` — run a generator pass, write SVG
//! - `list` — print available generators
//! - `schema <generator>` — print a generator's parameter schema

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use plotlines_core::Generator;
use plotlines_generators::{output, GeneratorKind};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "plotlines", about = "Pen-plotter pattern generator CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a generator pass and write an SVG plot file.
    Render {
        /// Generator name (e.g. "maze").
        generator: String,

        /// Canvas width in user units.
        #[arg(short = 'W', long, default_value_t = 800.0)]
        width: f64,

        /// Canvas height in user units.
        #[arg(short = 'H', long, default_value_t = 600.0)]
        height: f64,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output file path. Defaults to "<generator>-<seed>.svg".
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Generator parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List available generators.
    List,
    /// Print a generator's parameter schema.
    Schema {
        /// Generator name (e.g. "maze").
        generator: String,
    },
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let generators = GeneratorKind::list_generators();
            if cli.json {
                let info = serde_json::json!({ "generators": generators });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Generators:");
                for name in generators {
                    println!("  {name}");
                }
            }
        }
        Command::Schema { generator } => {
            let g = GeneratorKind::from_name(&generator, 800.0, 600.0, 0, &serde_json::json!({}))?;
            println!("{}", serde_json::to_string_pretty(&g.param_schema())?);
        }
        Command::Render {
            generator,
            width,
            height,
            seed,
            output,
            params,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;

            let output = output.unwrap_or_else(|| PathBuf::from(format!("{generator}-{seed}.svg")));

            let mut gen = GeneratorKind::from_name(&generator, width, height, seed, &params)?;
            gen.regenerate()?;
            let scene = gen.scene().ok_or(CliError::Generator(
                plotlines_core::GeneratorError::EmptyScene,
            ))?;

            output::write_svg(scene, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "generator": generator,
                    "width": width,
                    "height": height,
                    "seed": seed,
                    "paths": scene.path_count(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {generator} ({width}x{height}, seed {seed}, {} paths) -> {}",
                    scene.path_count(),
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
