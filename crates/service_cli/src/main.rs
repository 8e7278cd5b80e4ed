//! Numkit CLI - Command Line Numerical Solvers
//!
//! This is the operational entry point for the numkit solver library.
//!
//! # Commands
//!
//! - `numkit extremum` - Local minimum of a function of several variables
//! - `numkit linear-system` - Solve a square linear system
//! - `numkit differential` - Integrate a first-order initial value problem
//! - `numkit integral` - Definite integral, optionally a product over several intervals
//! - `numkit interpolation` - Fit an interpolant through sample points
//! - `numkit run <file>` - Solve a problem described in a TOML file
//! - `numkit methods [kind]` - List problem kinds and their methods

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod render;

pub use error::{CliError, Result};

use config::{build_config, CliOverrides, LogLevel, OutputFormat};

/// Numkit numerical solvers CLI
#[derive(Parser)]
#[command(name = "numkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "numkit.toml", env = "NUMKIT_CONFIG")]
    config: PathBuf,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    output: Option<OutputFormat>,

    /// Convergence threshold for extremum and quadrature
    #[arg(long, global = true)]
    precision: Option<f64>,

    /// Iteration cap for extremum and quadrature
    #[arg(long, global = true)]
    max_iterations: Option<usize>,

    /// Monte Carlo seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a local minimum of a function of several variables
    Extremum {
        /// Objective, e.g. "x**2 + y**2"
        #[arg(short, long)]
        function: String,

        /// Comma-separated variable names
        #[arg(long, default_value = "x,y")]
        variables: String,

        /// Start point, one value per variable
        #[arg(short, long, allow_hyphen_values = true)]
        start: String,

        /// Method (gradient, newton)
        #[arg(short, long)]
        method: Option<String>,
    },

    /// Solve a square linear system A·x = b
    LinearSystem {
        /// Matrix rows separated by ';', e.g. "2 1; 1 3"
        #[arg(short = 'a', long, allow_hyphen_values = true)]
        matrix: String,

        /// Right-hand side, e.g. "4 5"
        #[arg(short = 'b', long, allow_hyphen_values = true)]
        vector: String,
    },

    /// Integrate dy/dx = f(x, y) from (x0, y0) to x_end
    Differential {
        /// Right-hand side in x and y, e.g. "x + y"
        #[arg(short, long)]
        equation: String,

        /// Initial abscissa
        #[arg(long, allow_hyphen_values = true)]
        x0: f64,

        /// Initial value
        #[arg(long, allow_hyphen_values = true)]
        y0: f64,

        /// End point
        #[arg(long, allow_hyphen_values = true)]
        x_end: f64,

        /// Method (euler, rk4)
        #[arg(short, long)]
        method: Option<String>,

        /// Nominal step size
        #[arg(long)]
        step: Option<f64>,
    },

    /// Compute a definite integral of f(x)
    Integral {
        /// Integrand in x, e.g. "x**2"
        #[arg(short, long)]
        function: String,

        /// Lower limit
        #[arg(short, long, allow_hyphen_values = true)]
        lower: f64,

        /// Upper limit
        #[arg(short, long, allow_hyphen_values = true)]
        upper: f64,

        /// Extra interval "a:b"; the result is the product over all intervals
        #[arg(long, allow_hyphen_values = true)]
        bounds: Vec<String>,

        /// Method (trapezoid, simpson, monte_carlo)
        #[arg(short, long)]
        method: Option<String>,
    },

    /// Fit an interpolant through sample points
    Interpolation {
        /// Points "x y" separated by ';', e.g. "0 0; 1 1; 2 4"
        #[arg(short, long, allow_hyphen_values = true)]
        points: String,

        /// Method (lagrange, newton, spline)
        #[arg(short, long)]
        method: Option<String>,

        /// Example evaluation point (default: mean of the sample x-values)
        #[arg(long, allow_hyphen_values = true)]
        at: Option<f64>,
    },

    /// Solve a problem described in a TOML file
    Run {
        /// Path to the problem file
        file: PathBuf,
    },

    /// List problem kinds and their methods
    Methods {
        /// Restrict the listing to one kind
        kind: Option<String>,
    },
}

fn init_tracing(log_level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.as_filter_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        verbose: cli.verbose,
        output: cli.output,
        precision: cli.precision,
        max_iterations: cli.max_iterations,
        seed: cli.seed,
    };
    let config = build_config(&cli.config, &overrides)?;

    init_tracing(config.log_level);
    debug!(?config, path = %cli.config.display(), "configuration loaded");

    match cli.command {
        Commands::Extremum {
            function,
            variables,
            start,
            method,
        } => commands::solve::extremum(&function, &variables, &start, method, &config),
        Commands::LinearSystem { matrix, vector } => {
            commands::solve::linear_system(&matrix, &vector, &config)
        }
        Commands::Differential {
            equation,
            x0,
            y0,
            x_end,
            method,
            step,
        } => commands::solve::differential(
            commands::solve::DifferentialArgs {
                equation,
                x0,
                y0,
                x_end,
                method,
                step,
            },
            &config,
        ),
        Commands::Integral {
            function,
            lower,
            upper,
            bounds,
            method,
        } => commands::solve::integral(&function, lower, upper, &bounds, method, &config),
        Commands::Interpolation { points, method, at } => {
            commands::solve::interpolation(&points, method, at, &config)
        }
        Commands::Run { file } => commands::run::run(&file, &config),
        Commands::Methods { kind } => commands::methods::run(kind.as_deref()),
    }
}
