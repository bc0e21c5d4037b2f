use clap::{Args, Parser, Subcommand};
use docmeta_resolver::{
    AnalyzerRegistry, JsonDeclarationSource, MetadataFactory, ObjectProperties, TypeDeclaration,
};
use docmeta_validator::{Instance, ObjectContext, Validator, Value};
use miette::{IntoDiagnostic, MietteHandlerOpts, Result};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "docmeta",
    version,
    about = "Resolve and validate doc-comment type declarations",
    long_about = "Reads a JSON class manifest, resolves the type declarations found in its \
                  doc-comment annotations and checks values against them."
)]
struct Cli {
    /// Log descriptor construction and resolution steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build class descriptors and print them as JSON
    Describe {
        /// Class manifest (use '-' to read from stdin)
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        /// Only describe this class
        #[arg(short, long)]
        class: Option<String>,
    },

    /// Print the fully-qualified form of a declaration written inside a class
    Resolve {
        /// Class manifest (use '-' to read from stdin)
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        /// Class the declaration is written in
        #[arg(short, long)]
        class: String,

        /// Raw declaration, e.g. `Collection|Item[]|null`
        #[arg(value_name = "DECLARATION")]
        declaration: String,
    },

    /// Check a JSON value against a declared property, parameter or return type
    Validate(ValidateArgs),
}

#[derive(Args)]
struct ValidateArgs {
    /// Class manifest (use '-' to read from stdin)
    #[arg(value_name = "MANIFEST")]
    manifest: PathBuf,

    /// Class holding the declaration
    #[arg(short, long)]
    class: String,

    /// Property to check against
    #[arg(short, long, conflicts_with = "method", required_unless_present = "method")]
    property: Option<String>,

    /// Virtual method to check the return value of
    #[arg(short, long)]
    method: Option<String>,

    /// Check a parameter of --method instead of its return value
    #[arg(long, requires = "method", conflicts_with = "property")]
    parameter: Option<String>,

    /// Value as JSON; objects with an "@class" key are instances
    #[arg(long, value_name = "JSON")]
    value: String,

    /// Validate without a receiver instance, as from a static method
    #[arg(long = "static")]
    class_context: bool,
}

fn main() {
    setup_miette_handler();

    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let outcome = match cli.command {
        Some(Commands::Describe { manifest, class }) => {
            handle_describe_command(&manifest, class.as_deref()).map(|()| true)
        }
        Some(Commands::Resolve {
            manifest,
            class,
            declaration,
        }) => handle_resolve_command(&manifest, &class, &declaration).map(|()| true),
        Some(Commands::Validate(args)) => handle_validate_command(&args),
        None => {
            // No subcommand provided, show help
            Cli::parse_from(["docmeta", "--help"]);
            Ok(true)
        }
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{:?}", e);
            process::exit(2);
        }
    }
}

fn setup_miette_handler() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .tab_width(4)
                .with_cause_chain()
                .build(),
        )
    }))
    .ok();
}

fn setup_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_factory(manifest: &Path) -> Result<MetadataFactory<JsonDeclarationSource>> {
    let json = if manifest.to_str() == Some("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).into_diagnostic()?;
        buffer
    } else {
        if !manifest.exists() {
            return Err(miette::miette!("Manifest not found: {}", manifest.display()));
        }
        fs::read_to_string(manifest).into_diagnostic()?
    };

    factory_from_json(&json)
}

fn factory_from_json(json: &str) -> Result<MetadataFactory<JsonDeclarationSource>> {
    let source = JsonDeclarationSource::from_json(json)?;
    let registry = source.registry()?;
    debug!(types = registry.len(), "loaded manifest");

    let analyzers = AnalyzerRegistry::new().with(ObjectProperties);
    Ok(MetadataFactory::new(source, registry, analyzers))
}

fn handle_describe_command(manifest: &Path, class: Option<&str>) -> Result<()> {
    let factory = load_factory(manifest)?;

    let output = match class {
        Some(class) => factory.metadata_for_class(class)?.to_json_pretty()?,
        None => {
            let mut descriptors = serde_json::Map::new();
            for class in factory.source().class_names() {
                let descriptor = factory.metadata_for_class(class)?;
                descriptors.insert(
                    class.to_string(),
                    serde_json::to_value(&*descriptor).into_diagnostic()?,
                );
            }
            serde_json::to_string_pretty(&descriptors).into_diagnostic()?
        }
    };

    println!("{}", output);
    Ok(())
}

fn handle_resolve_command(manifest: &Path, class: &str, declaration: &str) -> Result<()> {
    let factory = load_factory(manifest)?;
    println!("{}", resolve_in_class(&factory, class, declaration)?);
    Ok(())
}

fn resolve_in_class(
    factory: &MetadataFactory<JsonDeclarationSource>,
    class: &str,
    declaration: &str,
) -> Result<TypeDeclaration> {
    let descriptor = factory.metadata_for_class(class)?;
    Ok(descriptor.scope(factory.registry()).resolve(declaration)?)
}

fn handle_validate_command(args: &ValidateArgs) -> Result<bool> {
    let factory = load_factory(&args.manifest)?;
    let descriptor = factory.metadata_for_class(&args.class)?;
    let validator = Validator::new(factory.registry());

    let json: serde_json::Value = serde_json::from_str(&args.value).into_diagnostic()?;
    let value = Value::from(json);
    let context = if args.class_context {
        ObjectContext::class(&args.class)
    } else {
        ObjectContext::from(Instance::new(&args.class))
    };

    let valid = match (&args.property, &args.method, &args.parameter) {
        (Some(property), _, _) => {
            validator.validate_property(&descriptor, property, &value, &context)?
        }
        (None, Some(method), Some(parameter)) => {
            validator.validate_parameter(&descriptor, method, parameter, &value, &context)?
        }
        (None, Some(method), None) => {
            validator.validate_return(&descriptor, method, &value, &context)?
        }
        (None, None, _) => return Err(miette::miette!("Either --property or --method is required")),
    };

    println!("{}", if valid { "valid" } else { "invalid" });
    Ok(valid)
}
