use clap::{Parser, ValueEnum};
use petschema::*;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::AsyncReadExt;

#[derive(Parser)]
#[command(name = "pet-validate")]
#[command(about = "Validate Pet records held in a JSON document")]
#[command(version)]
struct Cli {
    /// JSON file with one Pet object or an array of them; reads stdin when omitted or "-"
    file: Option<PathBuf>,

    /// Accept unknown fields (reported as warnings) instead of rejecting them
    #[arg(long)]
    allow_extra: bool,

    /// Report only the first error of each record
    #[arg(long)]
    fail_fast: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Print the Pet JSON Schema and exit
    #[arg(long)]
    schema: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let policy = if cli.allow_extra {
        UnknownFieldPolicy::Ignore
    } else {
        UnknownFieldPolicy::Reject
    };
    let config = ValidationConfig::default()
        .with_unknown_fields(policy)
        .with_fail_fast(cli.fail_fast);

    match run(&cli, config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

/// Returns whether every record in the document was valid.
async fn run(cli: &Cli, config: ValidationConfig) -> Result<bool> {
    if cli.schema {
        let schema = Pet::schema().to_json_schema(&config);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(true);
    }

    let content = read_input(cli.file.as_ref()).await?;
    let document: Value = serde_json::from_str(&content)?;
    let records = match document {
        Value::Array(items) => items,
        other => vec![other],
    };
    tracing::info!(records = records.len(), "validating document");

    let engine = ModelValidationEngine::with_config(config);
    let results = engine.validate_batch(&records, Pet::schema());
    let all_valid = results.iter().all(|result| result.is_valid);

    match cli.format {
        OutputFormat::Json => {
            let report: Vec<Value> = results
                .into_iter()
                .enumerate()
                .map(|(index, result)| {
                    let valid = result.is_valid;
                    let issues = result.issues.clone();
                    let pet = Pet::from_validated(result).ok();
                    json!({
                        "index": index,
                        "valid": valid,
                        "pet": pet,
                        "issues": issues,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            for (index, result) in results.into_iter().enumerate() {
                for warning in result.warnings() {
                    println!("record {index}: warning: {}: {warning}", warning.field);
                }
                match Pet::from_validated(result) {
                    Ok(pet) => println!("record {index}: ok {pet}"),
                    Err(e) => println!("record {index}: invalid\n{e}"),
                }
            }
        }
    }

    Ok(all_valid)
}

async fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => Ok(tokio::fs::read_to_string(path).await?),
        _ => {
            let mut content = String::new();
            tokio::io::stdin().read_to_string(&mut content).await?;
            Ok(content)
        }
    }
}
