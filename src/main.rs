use anyhow::{Context, Result, bail};
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use mapgen::{Config, DemVrtConfig, Generated, IconSetConfig, StyleConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate DEM VRT descriptors and marker styles", long_about = None)]
struct Cli {
    /// TOML configuration file supplying defaults for all generators
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<Utf8PathBuf>,

    /// Print the document to stdout instead of writing the output file
    /// (`dem-vrt` and `style` only)
    #[arg(long, global = true)]
    stdout: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the OGR virtual dataset for a directory of DEM tiles
    DemVrt(DemVrtArgs),
    /// Write the CartoCSS marker rules for one or two icon directories
    Style(StyleArgs),
    /// Run every generator configured in the configuration file
    All,
}

#[derive(Args, Debug)]
struct DemVrtArgs {
    /// Directory holding the `.xyz` tiles
    #[arg(long, value_name = "DIR")]
    source_dir: Option<Utf8PathBuf>,
    /// Destination `.vrt` file
    #[arg(short, long, value_name = "FILE")]
    output: Option<Utf8PathBuf>,
    /// Spatial reference of the tiles, e.g. EPSG:25832
    #[arg(long)]
    srs: Option<String>,
    /// Name of the union layer
    #[arg(long)]
    union_layer: Option<String>,
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Primary icon directory
    #[arg(long, value_name = "DIR")]
    primary: Option<Utf8PathBuf>,
    /// Secondary icon directory
    #[arg(long, value_name = "DIR")]
    secondary: Option<Utf8PathBuf>,
    /// Destination `.mss` file
    #[arg(short, long, value_name = "FILE")]
    output: Option<Utf8PathBuf>,
    /// Marker width written into every rule
    #[arg(long)]
    marker_width: Option<u32>,
    /// Layer selector wrapping the rules
    #[arg(long)]
    layer: Option<String>,
    /// Fail when two icons derive the same feature identifier
    #[arg(long)]
    reject_duplicates: bool,
}

impl DemVrtArgs {
    fn apply(self, mut config: DemVrtConfig) -> DemVrtConfig {
        if let Some(dir) = self.source_dir {
            config.source_dir = dir;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(srs) = self.srs {
            config.srs = srs;
        }
        if let Some(name) = self.union_layer {
            config.union_layer = name;
        }
        config
    }
}

impl StyleArgs {
    fn apply(self, mut config: StyleConfig) -> StyleConfig {
        if let Some(dir) = self.primary {
            config.primary = IconSetConfig::new(dir);
        }
        if let Some(dir) = self.secondary {
            config.secondary = Some(IconSetConfig::new(dir));
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(width) = self.marker_width {
            config.marker_width = width;
        }
        if let Some(layer) = self.layer {
            config.layer = layer;
        }
        config.reject_duplicates |= self.reject_duplicates;
        config
    }
}

fn emit(generated: Generated, to_stdout: bool) -> Result<()> {
    if to_stdout {
        print!("{}", generated.contents);
        Ok(())
    } else {
        generated
            .write()
            .with_context(|| format!("Failed to write {}", generated.output))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let file_config = match cli.config {
        Some(ref path) => {
            Config::from_file(path).with_context(|| format!("Failed to load {}", path))?
        }
        None => Config::default(),
    };

    match cli.command {
        Command::DemVrt(args) => {
            let config = args.apply(file_config.dem_vrt.unwrap_or_default());
            let generated = mapgen::generate_dem_vrt(&config)
                .with_context(|| format!("Failed to generate {}", config.output))?;
            emit(generated, cli.stdout)?;
        }
        Command::Style(args) => {
            let config = args.apply(file_config.style.unwrap_or_default());
            let generated = mapgen::generate_style(&config)
                .with_context(|| format!("Failed to generate {}", config.output))?;
            emit(generated, cli.stdout)?;
        }
        Command::All => {
            if cli.stdout {
                bail!("--stdout cannot be combined with `all`; run `dem-vrt` or `style` instead");
            }
            if cli.config.is_none() {
                bail!("`all` needs --config to know which generators to run");
            }
            if file_config.dem_vrt.is_none() && file_config.style.is_none() {
                bail!("configuration has neither a [dem_vrt] nor a [style] section");
            }
            if let Some(ref config) = file_config.dem_vrt {
                let generated = mapgen::generate_dem_vrt(config)
                    .with_context(|| format!("Failed to generate {}", config.output))?;
                emit(generated, cli.stdout)?;
            }
            if let Some(ref config) = file_config.style {
                let generated = mapgen::generate_style(config)
                    .with_context(|| format!("Failed to generate {}", config.output))?;
                emit(generated, cli.stdout)?;
            }
        }
    }
    Ok(())
}
