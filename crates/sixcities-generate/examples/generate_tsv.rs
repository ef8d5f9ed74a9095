use std::env;
use std::path::PathBuf;

use sixcities_generate::{GenerateOptions, GenerationEngine, parse_record_count, template_source};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut positional = Vec::new();
    let mut seed: Option<u64> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => seed = args.next().map(|value| value.parse()).transpose()?,
            _ => positional.push(arg),
        }
    }

    let [count, output, templates] = <[String; 3]>::try_from(positional)
        .map_err(|_| "usage: generate_tsv <COUNT> <OUTPUT> <TEMPLATES> [--seed N]")?;
    let count = parse_record_count(&count)?;

    let options = GenerateOptions {
        seed,
        ..GenerateOptions::default()
    };
    let source = template_source(&templates, options.template_timeout)?;
    let engine = GenerationEngine::new(options);
    let report = engine
        .run(source.as_ref(), count, &PathBuf::from(output))
        .await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
