use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rppgen::{coverage, qc, seed, Catalog, Layout, RandomGuids, Resolution};

/// Command-line arguments for rppgen
#[derive(Parser, Debug)]
#[command(name = "rppgen")]
#[command(about = "Build and check the standard REAPER track template")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the v01 template from the pilot song project
    Template {
        /// Album project root
        #[arg(short, long, env = "RPPGEN_ROOT", default_value = ".")]
        root: PathBuf,

        /// YAML catalog to use instead of the built-in standard one
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Fail on routing names that match no track instead of skipping them
        #[arg(long)]
        strict: bool,
    },

    /// Generate the per-song seed projects
    Seeds {
        #[arg(short, long, default_value = "reaper")]
        output_dir: PathBuf,
    },

    /// Report missing album project and MIDI files
    Coverage {
        #[arg(short, long, env = "RPPGEN_ROOT", default_value = ".")]
        root: PathBuf,
    },

    /// Print the built-in catalog as YAML
    Catalog,

    /// Run the template QC checks
    Qc {
        #[arg(short, long, env = "RPPGEN_ROOT", default_value = ".")]
        root: PathBuf,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rppgen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let code = match args.command {
        Command::Template {
            root,
            catalog,
            strict,
        } => template(root, catalog, strict),
        Command::Seeds { output_dir } => seeds(output_dir),
        Command::Coverage { root } => check_coverage(root),
        Command::Catalog => print_catalog(),
        Command::Qc { root } => run_qc(root),
    };
    process::exit(code);
}

fn template(root: PathBuf, catalog_path: Option<PathBuf>, strict: bool) -> i32 {
    let catalog = match catalog_path {
        Some(path) => {
            let source = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Error reading catalog '{}': {}", path.display(), e);
                    return 1;
                }
            };
            match Catalog::from_yaml(&source) {
                Ok(catalog) => catalog,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return 1;
                }
            }
        }
        None => Catalog::standard(),
    };

    let mode = if strict {
        Resolution::Strict
    } else {
        Resolution::Lenient
    };
    let layout = Layout::new(root);

    match rppgen::generate_template(&layout, &catalog, mode) {
        Ok(_) => {
            for dest in layout.template_destinations() {
                println!("Wrote {}", dest.display());
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn seeds(output_dir: PathBuf) -> i32 {
    let songs = match seed::load_songs() {
        Ok(songs) => songs,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    if let Err(e) = seed::write_seeds(&songs, &output_dir, &mut RandomGuids) {
        eprintln!("Error: {}", e);
        return 1;
    }
    println!(
        "All {} REAPER .rpp files generated in: {}",
        songs.len(),
        output_dir.display()
    );
    0
}

fn check_coverage(root: PathBuf) -> i32 {
    let songs = match seed::load_songs() {
        Ok(songs) => songs,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let missing = coverage::missing_files(&Layout::new(root), &songs);
    if missing.is_empty() {
        println!("{}", coverage::PASS_MESSAGE);
        return 0;
    }
    println!("Missing files:");
    for item in &missing {
        println!("  - {}", item);
    }
    1
}

fn print_catalog() -> i32 {
    match Catalog::standard().to_yaml() {
        Ok(yaml) => {
            print!("{}", yaml);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn run_qc(root: PathBuf) -> i32 {
    let path = Layout::new(root).template();
    info!(path = %path.display(), "checking template");
    match qc::check_file(&path) {
        Ok(pass) => {
            println!("OK: {}", pass.message());
            0
        }
        Err(failure) => {
            println!("FAIL: {}", failure);
            1
        }
    }
}
