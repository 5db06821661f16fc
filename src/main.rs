//! `page-creator` — run one generation against a schema file on disk.
//!
//! Stands in for the page builder host: the file plays the shared schema,
//! stdout plays the dialog's close callback.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use page_creator::creator::{CreatorError, GenerationMode, Generator, PageCreator};
use page_creator::error::ErrorCode;
use page_creator::llm::LlmClient;
use page_creator::llm::config::ApiConfig;
use page_creator::schema::FileSchemaStore;

#[derive(Parser, Debug)]
#[command(name = "page-creator", about = "Generate a page schema or a live component from a description")]
struct Cli {
    /// JSON page schema to read and update.
    #[arg(long)]
    schema: PathBuf,

    /// `page` replaces the schema, `component` appends a Live node.
    #[arg(long, default_value_t = GenerationMode::Page)]
    mode: GenerationMode,

    /// Screenshot or sketch to send along with the description.
    #[arg(long)]
    image: Option<PathBuf>,

    /// What to build.
    #[arg(required = true)]
    prompt: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, code = e.error_code(), retryable = e.retryable(), "page-creator failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CreatorError> {
    let config = ApiConfig::from_env()?;
    let llm = LlmClient::from_config(&config)?;
    let store = FileSchemaStore::new(cli.schema);
    info!(schema = %store.path().display(), mode = %cli.mode, "page-creator starting");

    let generator = Arc::new(Generator::new(Arc::new(llm), Arc::new(store), config));
    let mut creator = PageCreator::new(generator, || println!("closed"));
    creator.set_mode(cli.mode);
    creator.set_prompt(cli.prompt.join(" "));
    if let Some(image) = cli.image {
        creator.select_image_files(&[image]).await?;
    }

    let outcome = creator.submit().await?;
    info!(mode = %outcome.mode, code_len = outcome.code_len, children = outcome.children, "page-creator done");
    Ok(())
}
