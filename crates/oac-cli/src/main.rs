use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use oac_core::config::{
    self, AccessLevel, CONFIG_FILE_NAME, GenerationOptions, OacConfig, SerializationTool,
};
use oac_core::diagnostics::Diagnostics;
use oac_core::error::ReadError;
use oac_core::input::SourceDocument;
use oac_core::ir::{Contract, TypeLink};
use oac_core::parse::{detect_version, parse_document};
use oac_core::pipeline;
use oac_core::transform::build_contract;
use oac_csharp_client::CSharpClientGenerator;

#[derive(Parser)]
#[command(name = "oac", about = "OpenAPI and Swagger to C# client generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a C# client from an OpenAPI or Swagger document
    Generate {
        /// Path to the document (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Path of the generated C# file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Namespace of the generated types
        #[arg(long)]
        namespace: Option<String>,

        /// Name of the client class (defaults to the output file name)
        #[arg(long)]
        class_name: Option<String>,

        /// public, internal, protected or private
        #[arg(long)]
        access: Option<AccessLevel>,

        /// system_text_json or newtonsoft_json
        #[arg(long)]
        serializer: Option<SerializationTool>,
    },

    /// Validate a document without generating code
    Validate {
        /// Path to the document
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Inspect the contract built from a document
    Inspect {
        /// Path to the document
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new oac configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

/// Command-line values that override the project config.
#[derive(Default)]
struct Overrides {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    namespace: Option<String>,
    class_name: Option<String>,
    access: Option<AccessLevel>,
    serializer: Option<SerializationTool>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            namespace,
            class_name,
            access,
            serializer,
        } => cmd_generate(Overrides {
            input,
            output,
            namespace,
            class_name,
            access,
            serializer,
        }),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "oac", &mut io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<OacConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

/// Resolved paths and options for one generation run.
struct Resolved {
    input: PathBuf,
    output: PathBuf,
    options: GenerationOptions,
}

/// Flags override the config file, which overrides the defaults.
fn resolve(cfg: OacConfig, overrides: Overrides) -> Result<Resolved> {
    let input = overrides.input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output = overrides.output.unwrap_or_else(|| PathBuf::from(&cfg.output));

    let class_name = match overrides.class_name.or(cfg.class_name) {
        Some(name) => name,
        None => config::class_name_from_path(&output).with_context(|| {
            format!(
                "cannot derive a class name from {}; pass --class-name",
                output.display()
            )
        })?,
    };

    let options = GenerationOptions::new(overrides.namespace.unwrap_or(cfg.namespace), class_name)
        .with_access(overrides.access.unwrap_or(cfg.access))
        .with_serializer(overrides.serializer.unwrap_or(cfg.serializer));
    options.validate()?;

    Ok(Resolved {
        input,
        output,
        options,
    })
}

/// Read a document. A file that does not exist becomes a missing document so
/// the pipeline reports it like any other input problem.
fn read_source(path: &Path) -> Result<SourceDocument> {
    match SourceDocument::from_path(path) {
        Ok(doc) => Ok(doc),
        Err(ReadError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            Ok(SourceDocument::missing(path.display().to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

fn print_diagnostics(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics {
        eprintln!("{}: {diagnostic}", diagnostics.document());
    }
}

fn cmd_generate(overrides: Overrides) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let resolved = resolve(cfg, overrides)?;

    log::debug!(
        "generating {} -> {} as {}.{} ({}, {})",
        resolved.input.display(),
        resolved.output.display(),
        resolved.options.namespace,
        resolved.options.class_name,
        resolved.options.access,
        resolved.options.serializer
    );

    let document = read_source(&resolved.input)?;
    let generator = CSharpClientGenerator::new(resolved.options.serializer);
    let result = pipeline::run(&document, &resolved.options, &generator);
    print_diagnostics(&result.diagnostics);

    let Some(source) = result.generated_source else {
        anyhow::bail!(
            "generation failed for {} with {} error(s)",
            resolved.input.display(),
            result.diagnostics.errors().count()
        );
    };

    if let Some(parent) = resolved.output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(&resolved.output, &source)
        .with_context(|| format!("failed to write {}", resolved.output.display()))?;

    eprintln!(
        "Generated {} ({}.{}) from {}",
        resolved.output.display(),
        resolved.options.namespace,
        resolved.options.class_name,
        resolved.input.display()
    );
    Ok(())
}

/// Detect, parse and build a contract without emitting code.
fn load_contract(input: &Path) -> Result<(Contract, Diagnostics)> {
    let cfg = try_load_config()?.unwrap_or_default();
    let overrides = Overrides {
        input: Some(input.to_path_buf()),
        ..Overrides::default()
    };
    let resolved = resolve(cfg, overrides)?;

    let text = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let version = detect_version(&text)
        .with_context(|| format!("failed to detect the version of {}", input.display()))?;
    let parsed = parse_document(&text, version)
        .with_context(|| format!("failed to parse {} as {version}", input.display()))?;

    let mut diagnostics = Diagnostics::new(input.display().to_string());
    let contract = build_contract(&resolved.options, &parsed, &mut diagnostics);
    Ok((contract, diagnostics))
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let (contract, diagnostics) = load_contract(&input)?;
    print_diagnostics(&diagnostics);

    eprintln!("Valid {} document: {}", contract.dialect, contract.title);
    eprintln!("  Version: {}", contract.spec_version);
    eprintln!("  Methods: {}", contract.methods.len());
    eprintln!("  Types: {}", contract.types.len());

    if contract.methods.is_empty() {
        anyhow::bail!("{} declares no operations with an operationId", input.display());
    }
    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let (contract, diagnostics) = load_contract(&input)?;
    print_diagnostics(&diagnostics);

    let summary = build_inspect_summary(&contract);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn link_name(link: Option<&TypeLink>) -> Option<&str> {
    link.map(|l| l.name().unwrap_or("object"))
}

fn build_inspect_summary(contract: &Contract) -> serde_json::Value {
    let types: Vec<serde_json::Value> = contract
        .types
        .iter()
        .map(|t| {
            serde_json::json!({
                "name": t.name,
                "properties": t.properties.keys().collect::<Vec<_>>(),
            })
        })
        .collect();

    let methods: Vec<serde_json::Value> = contract
        .methods
        .iter()
        .map(|m| {
            serde_json::json!({
                "name": m.name,
                "method": m.http_verb.as_str(),
                "path": m.path,
                "body": link_name(m.request_body.as_ref()),
                "query": m.request_query,
                "response": link_name(m.response.as_ref()),
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "dialect": contract.dialect.to_string(),
            "title": contract.title,
            "version": contract.spec_version,
            "license": contract.license,
        },
        "methods": methods,
        "types": types,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
