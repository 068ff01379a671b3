//! Diagnose a single leaf photo from the command line.
//!
//! ```bash
//! canescan leaf.jpg --model models/canescan_model.json --farm-size 2.5 --locale en
//! ```
//!
//! Prints the diagnosis as JSON on stdout. Logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use canescan::{
    ClassifierAdapter, DenseNetwork, Experience, KnowledgeBase, Locale, NameTable, Pipeline,
    RequestContext, ServiceConfig,
};

#[derive(Parser, Debug)]
#[command(name = "canescan", version)]
#[command(about = "Diagnose sugarcane leaf disease from a photo")]
struct Args {
    /// Leaf image (PNG, JPEG, BMP or GIF).
    image: PathBuf,

    /// Dense model JSON file. Defaults to the service's configured model.
    #[arg(long)]
    model: Option<PathBuf>,

    /// Disease knowledge JSON file.
    #[arg(long)]
    knowledge: Option<PathBuf>,

    /// Area to treat, in acres.
    #[arg(long, default_value_t = canescan::constants::DEFAULT_FARM_SIZE)]
    farm_size: f64,

    /// `en` or `mr`.
    #[arg(long)]
    locale: Option<Locale>,

    /// `beginner` or `experienced`.
    #[arg(long, default_value = "beginner")]
    experience: Experience,

    /// Single-line JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,
}

fn run(args: Args) -> canescan::Result<String> {
    let config = ServiceConfig::load_offline()?;
    let model_path = args.model.unwrap_or(config.model_path);
    let knowledge_path = args.knowledge.unwrap_or(config.knowledge_path);

    // Unlike the server, a missing model is fatal here.
    let network = DenseNetwork::load_json(&model_path)?;
    let names = NameTable::load(&config.class_mapping_path)?;
    let pipeline = Pipeline::new(
        ClassifierAdapter::with_model(Box::new(network)),
        KnowledgeBase::load(&knowledge_path)?.with_names(names),
    );

    let bytes = std::fs::read(&args.image)?;
    let ctx = RequestContext {
        farm_size: args.farm_size,
        locale: args.locale.unwrap_or(config.default_locale),
        experience: args.experience,
    };
    let diagnosis = pipeline.diagnose(&bytes, &ctx)?;

    let json = if args.compact {
        serde_json::to_string(&diagnosis)
    } else {
        serde_json::to_string_pretty(&diagnosis)
    };
    json.map_err(|e| canescan::Error::Io(std::io::Error::other(e)))
}

fn main() -> ExitCode {
    canescan::init_tracing();
    let args = Args::parse();
    let image = args.image.clone();

    match run(args) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(image = %image.display(), code = e.code(), "{}", e);
            ExitCode::FAILURE
        }
    }
}
