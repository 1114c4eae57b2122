use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use rand::Rng;
use tracing_subscriber::EnvFilter;

use mapforge::{
    generate, Density, Feature, GenerationOptions, GenerationRequest, MapSize, MapSummary,
    RecipeLoader, Theme,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Themed tile-map generator")]
struct Cli {
    /// Recipe YAML file; other generation flags are ignored when given
    #[arg(long)]
    recipe: Option<PathBuf>,

    /// Map theme (medieval, fantasy, farm, winter, volcanic, desert, swamp)
    #[arg(long, default_value = "medieval")]
    theme: String,

    /// Size preset (small, medium, large)
    #[arg(long, default_value = "medium")]
    size: String,

    /// Width override in tiles
    #[arg(long)]
    width: Option<usize>,

    /// Height override in tiles
    #[arg(long)]
    height: Option<usize>,

    /// Noise seed (random when omitted)
    #[arg(long)]
    seed: Option<f64>,

    /// Noise scale (theme default when omitted)
    #[arg(long)]
    smoothness: Option<f64>,

    /// Optional features, comma separated
    #[arg(long, value_delimiter = ',')]
    features: Vec<String>,

    /// Structure density (low, medium, high)
    #[arg(long, default_value = "medium")]
    density: String,

    /// Seed for placement and classification draws
    #[arg(long)]
    rng_seed: Option<u64>,

    /// Smoothing iterations
    #[arg(long, default_value_t = 3)]
    iterations: u32,

    /// Print the census as JSON
    #[arg(long)]
    json: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn request(&self) -> Result<GenerationRequest> {
        if let Some(path) = &self.recipe {
            let loader = RecipeLoader::new(".");
            let recipe = loader.load(path)?;
            let mut request = recipe.to_request();
            if self.rng_seed.is_some() {
                request.options.rng_seed = self.rng_seed;
            }
            return Ok(request);
        }

        let theme = Theme::from_tag(&self.theme);
        let size = MapSize::from_tag(&self.size)
            .ok_or_else(|| anyhow!("unknown map size '{}'", self.size))?;
        let (preset_width, preset_height) = size.dimensions();
        let density = Density::from_tag(&self.density)
            .ok_or_else(|| anyhow!("unknown density '{}'", self.density))?;
        let features = self
            .features
            .iter()
            .map(|tag| Feature::from_tag(tag).ok_or_else(|| anyhow!("unknown feature '{tag}'")))
            .collect::<Result<_>>()?;
        let seed = self
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen_range(0.0..10_000.0));

        let options = GenerationOptions {
            features,
            density,
            rng_seed: self.rng_seed,
            smoothing_iterations: self.iterations,
        };
        Ok(GenerationRequest::new(
            self.width.unwrap_or(preset_width),
            self.height.unwrap_or(preset_height),
            seed,
            self.smoothness
                .unwrap_or_else(|| theme.default_smoothness()),
            theme,
        )
        .with_options(options))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let request = cli.request()?;
    tracing::info!(seed = request.seed, smoothness = request.smoothness, "generating");
    let map = generate(&request)?;

    let summary = MapSummary::from_map(&map);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{summary}");
    }
    Ok(())
}
