use crate::config::OptimizerConfig;
use crate::errors::{OptimizerError, OptimizerResult};
use crate::inputs::{InputField, RawInputs};
use crate::network::{EnergyOptimizationNetwork, NetworkOptions, NetworkVariant};
use crate::presets::{find_preset, PRESET_LOCATIONS};
use crate::recommender::Recommendation;
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

/// Top-level CLI interface
#[derive(Parser, Debug)]
#[command(
    name = "energy_optimizer",
    version,
    about = "Renewable energy site suitability and solar/wind recommendation"
)]
pub struct Cli {
    /// Configuration file (defaults to energy_optimizer.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate one site and print the recommendation
    Recommend {
        #[command(flatten)]
        site: SiteArgs,
        #[command(flatten)]
        network: NetworkArgs,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
        /// Print every calculation step
        #[arg(long)]
        trace: bool,
    },

    /// Print weights, input ranges and connections as JSON
    Network {
        #[command(flatten)]
        network: NetworkArgs,
    },

    /// List the built-in preset locations
    Presets,

    /// Print the effective configuration as TOML
    Config,

    /// Serve the JSON HTTP API
    Serve {
        /// Host/IP to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to bind
        #[arg(long)]
        port: Option<u16>,
        #[command(flatten)]
        network: NetworkArgs,
    },
}

/// Per-field flags; a preset or input file replaces all of them
const FIELD_FLAGS: [&str; 7] = [
    "latitude",
    "longitude",
    "sunlight_hours",
    "wind_speed",
    "temperature_range",
    "elevation",
    "water_proximity",
];

/// Where the site measurements come from
#[derive(Args, Debug, Default)]
pub struct SiteArgs {
    /// Use a preset location (desert, mountain, coastal)
    #[arg(long, conflicts_with = "input", conflicts_with_all = FIELD_FLAGS)]
    pub preset: Option<String>,
    /// Read inputs from a JSON file
    #[arg(long, conflicts_with_all = FIELD_FLAGS)]
    pub input: Option<PathBuf>,
    #[arg(long, allow_hyphen_values = true)]
    pub latitude: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub longitude: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub sunlight_hours: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub wind_speed: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub temperature_range: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub elevation: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub water_proximity: Option<f64>,
}

impl SiteArgs {
    pub fn resolve(&self) -> OptimizerResult<RawInputs> {
        if let Some(key) = &self.preset {
            return Ok(find_preset(key)?.inputs);
        }

        if let Some(path) = &self.input {
            let content = std::fs::read_to_string(path)
                .map_err(|e| OptimizerError::io(format!("reading {}", path.display()), e))?;
            let value: serde_json::Value = serde_json::from_str(&content)
                .map_err(|e| OptimizerError::serialization(format!("parsing {}", path.display()), e))?;
            return RawInputs::from_json(&value);
        }

        let flags = [
            self.latitude,
            self.longitude,
            self.sunlight_hours,
            self.wind_speed,
            self.temperature_range,
            self.elevation,
            self.water_proximity,
        ];
        let mut values = [0.0; 7];
        for (field, flag) in InputField::ALL.iter().zip(flags) {
            values[field.index()] = flag.ok_or_else(|| {
                OptimizerError::invalid_input(field.name(), "missing value (pass a flag, --preset or --input)")
            })?;
        }

        let inputs = RawInputs::from_values(values);
        inputs.validate()?;
        Ok(inputs)
    }
}

/// Network construction overrides
#[derive(Args, Debug, Default)]
pub struct NetworkArgs {
    /// Seed for weight initialisation
    #[arg(long)]
    pub seed: Option<u64>,
    /// Start with all weights at zero
    #[arg(long)]
    pub zero_weights: bool,
    /// Evaluation rules: detailed or compact
    #[arg(long)]
    pub variant: Option<NetworkVariant>,
}

impl NetworkArgs {
    /// Build the network from config, with flags taking precedence
    pub fn build(&self, config: &OptimizerConfig) -> (EnergyOptimizationNetwork, StdRng) {
        let mut options: NetworkOptions = config.network.options();
        if self.zero_weights {
            options.random_weights = false;
        }
        if let Some(variant) = self.variant {
            options.variant = variant;
        }

        let mut rng = match self.seed.or(config.network.seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        (EnergyOptimizationNetwork::new(options, &mut rng), rng)
    }
}

pub fn dispatch(cli: Cli, config: OptimizerConfig) -> OptimizerResult<()> {
    match cli.command {
        Commands::Recommend {
            site,
            network,
            json,
            trace,
        } => {
            let inputs = site.resolve()?;
            let (network, _) = network.build(&config);
            let recommendation = network.recommend(&inputs)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&recommendation)?);
            } else {
                print!("{}", render_recommendation(&inputs, &recommendation, trace));
            }
        }
        Commands::Network { network } => {
            let (network, _) = network.build(&config);
            println!("{}", serde_json::to_string_pretty(&network.view())?);
        }
        Commands::Presets => {
            for preset in &PRESET_LOCATIONS {
                println!("{:<10} {}", preset.key, preset.name);
                for field in InputField::ALL {
                    println!("    {:<28} {}", field.label(), preset.inputs.get(field));
                }
            }
        }
        Commands::Config => {
            let rendered = config
                .to_toml()
                .map_err(|e| OptimizerError::internal(format!("rendering config: {e}")))?;
            print!("{rendered}");
        }
        Commands::Serve { host, port, network } => {
            let (network, rng) = network.build(&config);
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let state = crate::web::AppState::new(network, rng);

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .map_err(|e| OptimizerError::io("building tokio runtime", e))?;
            runtime.block_on(crate::web::serve(state, &host, port, config.server.allow_cors))?;
        }
    }
    Ok(())
}

/// Plain-text report; scores to two decimals, activations to four
pub fn render_recommendation(inputs: &RawInputs, rec: &Recommendation, trace: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", rec.label));
    out.push_str(&format!("Confidence: {:.1}%\n", rec.confidence));
    out.push_str(&format!(
        "Recommended: {} ({})\n",
        rec.energy_type.energy_type, rec.energy_type.reason
    ));
    out.push_str(&format!(
        "Solar Score: {:.2}  Wind Score: {:.2}\n",
        rec.energy_type.solar_score, rec.energy_type.wind_score
    ));

    out.push_str("Feature importance:\n");
    for (field, score) in rec.feature_importance.ranked() {
        out.push_str(&format!(
            "  {:<28} {:>6.1}%  (input {})\n",
            field.label(),
            score,
            inputs.get(field)
        ));
    }

    if trace {
        out.push_str("Calculations:\n");
        for step in &rec.calculations {
            let fmt = |values: &[f64], precision: usize| {
                values
                    .iter()
                    .map(|v| format!("{v:.precision$}"))
                    .collect::<Vec<_>>()
                    .join(" * ")
            };
            out.push_str(&format!(
                "  {:?} {}: inputs [{}] weights [{}] sum {:.2} activation {:.4}\n",
                step.node,
                step.index,
                fmt(step.input.as_slice(), 2),
                fmt(step.weights.as_slice(), 2),
                step.sum,
                step.activation
            ));
        }
    }

    out
}
