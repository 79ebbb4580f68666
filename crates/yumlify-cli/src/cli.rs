//! Command-line interface for the yumlify utility
//!
//! Reads a JSON type model, prints its yUML class diagram fragment and
//! optionally resolves the fragment to a diagram URL.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::debug;

use yumlify::core::logging::init_logging;
use yumlify::plugins::class::{DiagramFragmentBuilder, LoadedModel, TypeModel};
use yumlify::resolver::{ResolverConfig, YumlResolver};
use yumlify::{
    DetailFlag, DetailLevel, DiagramStyle, Direction, Palette, Scale, TypeMetadataProvider,
};

/// yumlify - Turn type models into yUML class diagrams
#[derive(Parser)]
#[command(name = "yumlify")]
#[command(about = "Render JSON type models as yUML class diagrams")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Member categories to include in class blocks
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum DetailChoice {
    PublicProperties,
    PrivateProperties,
    PublicMethods,
    PrivateMethods,
    /// Every member category
    All,
}

/// Collapse repeated `--detail` flags into one level
pub fn detail_level(choices: &[DetailChoice]) -> DetailLevel {
    choices
        .iter()
        .fold(DetailLevel::none(), |level, choice| match choice {
            DetailChoice::PublicProperties => level.with(DetailFlag::PublicProperties),
            DetailChoice::PrivateProperties => level.with(DetailFlag::PrivateProperties),
            DetailChoice::PublicMethods => level.with(DetailFlag::PublicMethods),
            DetailChoice::PrivateMethods => level.with(DetailFlag::PrivateMethods),
            DetailChoice::All => DetailLevel::all(),
        })
}

/// Apply command-line overrides on top of the environment configuration
pub fn resolver_config(
    mut config: ResolverConfig,
    endpoint: Option<String>,
    image_host: Option<String>,
) -> ResolverConfig {
    if let Some(endpoint) = endpoint {
        config = config.with_endpoint(endpoint);
    }
    if let Some(image_host) = image_host {
        config = config.with_image_host(image_host);
    }
    config
}

/// Drawing palettes
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum PaletteChoice {
    #[default]
    Plain,
    Boring,
    Scruffy,
}

impl From<PaletteChoice> for Palette {
    fn from(value: PaletteChoice) -> Self {
        match value {
            PaletteChoice::Plain => Palette::Plain,
            PaletteChoice::Boring => Palette::Boring,
            PaletteChoice::Scruffy => Palette::Scruffy,
        }
    }
}

/// Layout directions
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum DirectionChoice {
    /// Left to right
    #[default]
    Lr,
    /// Top to bottom
    Tb,
    /// Right to left
    Rl,
}

impl From<DirectionChoice> for Direction {
    fn from(value: DirectionChoice) -> Self {
        match value {
            DirectionChoice::Lr => Direction::LeftToRight,
            DirectionChoice::Tb => Direction::TopToBottom,
            DirectionChoice::Rl => Direction::RightToLeft,
        }
    }
}

/// Image scales
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ScaleChoice {
    Tiny,
    Small,
    #[default]
    Normal,
    Big,
    Huge,
}

impl From<ScaleChoice> for Scale {
    fn from(value: ScaleChoice) -> Self {
        match value {
            ScaleChoice::Tiny => Scale::Tiny,
            ScaleChoice::Small => Scale::Small,
            ScaleChoice::Normal => Scale::Normal,
            ScaleChoice::Big => Scale::Big,
            ScaleChoice::Huge => Scale::Huge,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the yUML fragment for a type model
    Fragment {
        /// Input JSON model (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Member categories to include (repeatable)
        #[arg(short, long, value_enum)]
        detail: Vec<DetailChoice>,
    },

    /// Resolve a type model to a diagram URL
    Resolve {
        /// Input JSON model (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Member categories to include (repeatable)
        #[arg(short, long, value_enum)]
        detail: Vec<DetailChoice>,

        #[arg(long, value_enum, default_value_t = PaletteChoice::Plain)]
        palette: PaletteChoice,

        #[arg(long, value_enum, default_value_t = DirectionChoice::Lr)]
        direction: DirectionChoice,

        #[arg(long, value_enum, default_value_t = ScaleChoice::Normal)]
        scale: ScaleChoice,

        /// Override the service endpoint (also YUMLIFY_ENDPOINT)
        #[arg(long)]
        endpoint: Option<String>,

        /// Override the host prefixed to diagram ids (also YUMLIFY_IMAGE_HOST)
        #[arg(long)]
        image_host: Option<String>,
    },

    /// List the types declared in a model
    Inspect {
        /// Input JSON model (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Main CLI application
#[derive(Default)]
pub struct YumlifyApp;

impl YumlifyApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("YUMLIFY_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));
        let log_format_str = std::env::var("YUMLIFY_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("yumlify v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Fragment {
                input,
                output,
                detail,
            } => {
                let model = self.load_model(input, cli.verbose)?;
                let dsl = self.fragment_text(&model, detail_level(&detail))?;
                self.write_output(output, &dsl)
            }
            Commands::Resolve {
                input,
                detail,
                palette,
                direction,
                scale,
                endpoint,
                image_host,
            } => {
                let model = self.load_model(input, cli.verbose)?;
                let style = DiagramStyle::new(palette.into(), direction.into(), scale.into());
                let dsl = self.fragment_text(&model, detail_level(&detail))?;
                if cli.verbose {
                    eprintln!("Fragment: {}", dsl);
                }

                let config = resolver_config(ResolverConfig::from_env(), endpoint, image_host);
                let url = Self::resolve(&config, &dsl, &style)?;
                println!("{}", url);
                Ok(())
            }
            Commands::Inspect { input, json } => {
                let model = self.load_model(input, cli.verbose)?;
                println!("{}", self.inspect_text(&model, json)?);
                Ok(())
            }
        }
    }

    /// Build the fragment for a loaded model
    pub fn fragment_text(&self, model: &LoadedModel, detail: DetailLevel) -> Result<String> {
        let dsl = DiagramFragmentBuilder::new(&model.registry)
            .build(&model.roots, DiagramStyle::default(), detail)
            .context("Failed to build diagram fragment")?;
        debug!(length = dsl.len(), "Fragment ready");
        Ok(dsl)
    }

    /// Describe the declared types of a model
    pub fn inspect_text(&self, model: &LoadedModel, json: bool) -> Result<String> {
        let rows: Vec<(String, String, bool)> = model
            .registry
            .iter()
            .filter(|(_, descriptor)| descriptor.generic_definition.is_none())
            .map(|(ty, descriptor)| {
                (
                    descriptor.name.clone(),
                    descriptor.kind.to_string(),
                    model.roots.contains(&ty),
                )
            })
            .collect();

        if json {
            let types: Vec<_> = rows
                .iter()
                .map(|(name, kind, drawn)| {
                    serde_json::json!({ "name": name, "kind": kind, "in_diagram": drawn })
                })
                .collect();
            let value = serde_json::json!({ "types": types, "total": rows.len() });
            return Ok(serde_json::to_string_pretty(&value)?);
        }

        let width = rows.iter().map(|(name, _, _)| name.len()).max().unwrap_or(0);
        let mut out = String::new();
        for (name, kind, drawn) in &rows {
            let marker = if *drawn { "*" } else { " " };
            out.push_str(&format!("{} {:<width$}  {}\n", marker, name, kind, width = width));
        }
        out.push_str(&format!("\nTotal: {} types ({} in diagram)", rows.len(), model.roots.len()));
        Ok(out)
    }

    fn resolve(config: &ResolverConfig, dsl: &str, style: &DiagramStyle) -> Result<String> {
        let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
        let resolver = YumlResolver::from_config(config)?;
        runtime
            .block_on(resolver.resolve(dsl, style))
            .context("Failed to resolve diagram URL")
    }

    fn load_model(&self, input: Option<PathBuf>, verbose: bool) -> Result<LoadedModel> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let model = TypeModel::from_json(&content)?;
        let loaded = model.load()?;
        if verbose {
            let drawn = loaded
                .roots
                .iter()
                .filter_map(|ty| loaded.registry.describe(*ty).ok())
                .filter(|d| d.kind.is_class_like())
                .count();
            eprintln!("Loaded {} types, {} class roots", loaded.registry.len(), drawn);
        }
        Ok(loaded)
    }

    /// Read input from file or stdin
    fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_str() != Some("-") => fs::read_to_string(&path)
                .with_context(|| format!("Failed to read input file {}", path.display())),
            _ => {
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read from stdin")?;
                Ok(buffer)
            }
        }
    }

    /// Write output to file or stdout
    fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_str() != Some("-") => fs::write(&path, format!("{}\n", content))
                .with_context(|| format!("Failed to write output file {}", path.display())),
            _ => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", content).context("Failed to write to stdout")?;
                Ok(())
            }
        }
    }
}
