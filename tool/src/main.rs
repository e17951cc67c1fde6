use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;

use cli::eval::{run_eval, EvalOptions};
use cli::ops::OpArg;
use cli::table::{run_table, TableRange};
use cli::vector::run_vector;

const DEFAULT_LOG_FILTER: &str = "qfixed=warn,qfixed_core=warn";

#[derive(Parser)]
#[command(name = "qfixed")]
#[command(about = "Deterministic Q16.16 fixed-point calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one operation on decimal arguments
    Eval {
        #[arg(value_enum)]
        op: OpArg,
        #[arg(allow_negative_numbers = true)]
        args: Vec<String>,
        #[arg(long)]
        json: bool,
        /// Fractional digits of the result, truncated rather than rounded (max 10)
        #[arg(long, value_name = "N")]
        precision: Option<usize>,
        /// Report division by zero and negative sqrt as errors instead of sentinels
        #[arg(long)]
        checked: bool,
    },
    /// Run the determinism vector; exits with 2 on mismatch
    Vector {
        #[arg(long)]
        json: bool,
    },
    /// Tabulate a unary operation over an inclusive range
    Table {
        #[arg(value_enum)]
        op: OpArg,
        #[arg(long, allow_negative_numbers = true)]
        from: String,
        #[arg(long, allow_negative_numbers = true)]
        to: String,
        #[arg(long)]
        step: String,
        #[arg(long)]
        json: bool,
        /// Fractional digits of the y column, truncated rather than rounded (max 10)
        #[arg(long, value_name = "N")]
        precision: Option<usize>,
    },
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Eval {
            op,
            args,
            json,
            precision,
            checked,
        } => {
            let options = EvalOptions {
                json,
                precision,
                checked,
            };
            if let Err(message) = run_eval(op, &args, &options) {
                eprintln!("{}", message);
                std::process::exit(1);
            }
        }
        Commands::Vector { json } => match run_vector(json) {
            Ok(true) => {}
            Ok(false) => std::process::exit(2),
            Err(message) => {
                eprintln!("{}", message);
                std::process::exit(1);
            }
        },
        Commands::Table {
            op,
            from,
            to,
            step,
            json,
            precision,
        } => {
            let range = TableRange {
                from: &from,
                to: &to,
                step: &step,
            };
            if let Err(message) = run_table(op, &range, json, precision) {
                eprintln!("{}", message);
                std::process::exit(1);
            }
        }
    }
}
