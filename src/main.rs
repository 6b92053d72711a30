use clap::{Args, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

use house_value::credentials::{self, CredentialSources};
use house_value::features::{Preset, FEATURE_COUNT};
use house_value::predict::{predict, PredictionOutcome};
use house_value::scoring::ScoringClient;
use house_value::{config, form, output, telemetry};

const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_RESPONSE: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Enter housing features and get a price prediction (default if no subcommand)
    Predict(PredictArgs),
    /// Describe the model's input features and the presets
    Features,
    /// Create a config file interactively
    Init,
}

#[derive(Args, Debug, Default, Clone)]
struct PredictArgs {
    /// Start from an example district instead of the defaults
    #[arg(long, value_enum)]
    preset: Option<Preset>,

    /// Median income in block group (tens of thousands)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    med_inc: Option<f64>,

    /// Median house age in block group (years)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    house_age: Option<f64>,

    /// Average number of rooms per household
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    ave_rooms: Option<f64>,

    /// Average number of bedrooms per household
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    ave_bedrms: Option<f64>,

    /// Block group population
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    population: Option<f64>,

    /// Average number of household members
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    ave_occup: Option<f64>,

    /// Block group latitude (degrees)
    #[arg(long, value_name = "DEG", allow_negative_numbers = true)]
    latitude: Option<f64>,

    /// Block group longitude (degrees, negative west)
    #[arg(long, value_name = "DEG", allow_negative_numbers = true)]
    longitude: Option<f64>,

    /// Scoring endpoint URL (overrides SCORING_ENDPOINT and the config file)
    #[arg(long)]
    endpoint: Option<String>,

    /// Never prompt; use flags, preset, and defaults
    #[arg(long)]
    no_input: bool,

    /// Print the full JSON response from the scoring service
    #[arg(long)]
    show_response: bool,
}

impl PredictArgs {
    fn overrides(&self) -> [Option<f64>; FEATURE_COUNT] {
        [
            self.med_inc,
            self.house_age,
            self.ave_rooms,
            self.ave_bedrms,
            self.population,
            self.ave_occup,
            self.latitude,
            self.longitude,
        ]
    }
}

#[derive(Parser, Debug)]
#[command(name = "house-value")]
#[command(about = "California housing price prediction from a remote scoring service", long_about = None)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/house-value/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    predict: PredictArgs,
}

/// Map an outcome to the process exit code
fn exit_code(outcome: &PredictionOutcome) -> i32 {
    match outcome {
        PredictionOutcome::Success { .. } => EXIT_SUCCESS,
        PredictionOutcome::HttpError { status: 401 | 403, .. } => EXIT_AUTH,
        PredictionOutcome::Timeout
        | PredictionOutcome::ConnectionFailure { .. }
        | PredictionOutcome::TransportError { .. }
        | PredictionOutcome::HttpError { .. } => EXIT_NETWORK,
        PredictionOutcome::InvalidJson { .. } | PredictionOutcome::Extraction { .. } => {
            EXIT_RESPONSE
        }
        PredictionOutcome::Setup { .. } => EXIT_CONFIG,
    }
}

async fn run_predict(args: PredictArgs, config_path: Option<PathBuf>, verbose: bool) -> i32 {
    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return EXIT_CONFIG;
        }
    };

    let interactive = !args.no_input && std::io::stdin().is_terminal();

    let sources = CredentialSources::from_env(args.endpoint.clone(), config.endpoint.clone());
    let creds = match credentials::resolve(&sources, interactive, credentials::prompt_for_token) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Credential error: {}", e);
            return EXIT_CONFIG;
        }
    };

    let client = match ScoringClient::new(&creds) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create scoring client: {}", e);
            return EXIT_CONFIG;
        }
    };

    if verbose {
        eprintln!("Scoring endpoint: {}", client.endpoint());
    }

    let start = args
        .preset
        .or(config.default_preset)
        .map(|p| p.features())
        .unwrap_or_default();
    let mut features = match start.with_overrides(&args.overrides()) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Invalid feature value: {}", e);
            return EXIT_CONFIG;
        }
    };

    let use_colors = output::should_use_colors();
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();

    loop {
        if interactive {
            features = match form::collect_features(&mut input, &mut out, &features) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("{:#}", e);
                    return EXIT_CONFIG;
                }
            };
        }

        if verbose {
            eprintln!("Submitting:\n{}", output::format_feature_summary(&features));
        }
        eprintln!("Getting prediction from scoring service...");

        let outcome = predict(&client, &features).await;
        println!();
        println!("{}", output::format_outcome(&outcome, use_colors, args.show_response));

        let code = exit_code(&outcome);
        if !interactive {
            return code;
        }

        println!();
        match form::prompt_yes_no(&mut input, &mut out, "Submit another prediction?", false) {
            Ok(true) => println!(),
            Ok(false) | Err(_) => return code,
        }
    }
}

fn run_features() -> i32 {
    println!("{}", output::format_feature_table(output::should_use_colors()));
    EXIT_SUCCESS
}

fn run_init(config_path: Option<PathBuf>) -> i32 {
    match config::run_init_wizard(config_path) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Init failed: {:#}", e);
            EXIT_CONFIG
        }
    }
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        eprintln!("Failed to install rustls crypto provider");
        std::process::exit(EXIT_CONFIG);
    }

    let cli = Cli::parse();

    if let Err(e) = telemetry::init(cli.verbose) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let config_path = cli.config.map(PathBuf::from);

    let code = match cli.command {
        Some(Commands::Predict(args)) => run_predict(args, config_path, cli.verbose).await,
        None => run_predict(cli.predict, config_path, cli.verbose).await,
        Some(Commands::Features) => run_features(),
        Some(Commands::Init) => run_init(config_path),
    };

    std::process::exit(code);
}
