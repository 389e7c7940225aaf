use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use dotenvy::dotenv;

use escritura_backend::logger;
use escritura_backend::pipeline::run_conversion;

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
#[command(about = "Convert scripture source files to the canonical book layout")]
struct Cli {
    /// Input file or directory of source files
    /// (internal JSON, USFM, OSIS XML, simple XML, Zefania XML, SWORD imp)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output root directory; receives manifest.json and books/
    #[arg(value_name = "OUTPUT_ROOT")]
    output: PathBuf,

    /// Suppress the end-of-run summary
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    dotenv().ok();
    logger::init_tracing();

    let cli = Cli::parse();

    if !cli.input.exists() {
        eprintln!("Input path does not exist: {:?}", cli.input);
        exit(2);
    }

    match run_conversion(&cli.input, &cli.output) {
        Ok(summary) => {
            if !cli.quiet {
                println!("{}", summary);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}
