//! soli: command-line access to the SOLI legal ontology

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use serde_json::json;
use soli::config::{DEFAULT_REPO_NAME, DEFAULT_REPO_OWNER};
use soli::ontology::DEFAULT_MAX_DEPTH;
use soli::{GithubSource, Ontology, OwlClass, SoliConfig, SoliType, Triple, TripleStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "soli", version, about = "Query the SOLI legal ontology")]
struct Cli {
    /// Configuration file (defaults to ~/.soli/config.json when present)
    #[arg(long, global = true, env = "SOLI_CONFIG")]
    config: Option<PathBuf>,

    /// Load a local ontology file instead of the configured source
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ClassFormat {
    Json,
    Jsonld,
    Xml,
    Markdown,
}

#[derive(Subcommand)]
enum Commands {
    /// Show ontology title, description and size
    Info,
    /// Show one class by IRI, legacy IRI or short identifier
    Get {
        key: String,

        /// Render the class in a specific serialization
        #[arg(long = "as", value_enum)]
        render: Option<ClassFormat>,
    },
    /// Fuzzy search over labels (or definitions)
    Search {
        query: String,

        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Search definitions instead of labels
        #[arg(long)]
        definition: bool,

        /// Ignore alternative labels
        #[arg(long)]
        no_alt_labels: bool,
    },
    /// Classes whose label or alternative label starts with a prefix
    Prefix { prefix: String },
    /// Direct parents of a class
    Parents { iri: String },
    /// Descendants of a class
    Children {
        iri: String,

        /// Maximum number of hops (unbounded when omitted)
        #[arg(long)]
        depth: Option<usize>,
    },
    /// Classes below a top-level branch such as "Area of Law"
    Category {
        name: String,

        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        depth: usize,
    },
    /// Raw triples filtered by subject, predicate and/or object
    #[command(group(ArgGroup::new("filter").required(true).multiple(true).args(["subject", "predicate", "object"])))]
    Triples {
        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        predicate: Option<String>,

        #[arg(long)]
        object: Option<String>,
    },
    /// Print a new class IRI not used by the ontology
    GenerateIri,
    /// List the ontology versions (branches) published in a GitHub repository
    Branches {
        #[arg(long, default_value = DEFAULT_REPO_OWNER)]
        owner: String,

        #[arg(long, default_value = DEFAULT_REPO_NAME)]
        repo: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Commands::Branches { owner, repo } = &cli.command {
        return run_branches(owner, repo, cli.format);
    }
    let ontology = load(&cli)?;

    match cli.command {
        Commands::Info => run_info(&ontology, cli.format),
        Commands::Get { key, render } => run_get(&ontology, &key, render, cli.format),
        Commands::Search {
            query,
            limit,
            definition,
            no_alt_labels,
        } => {
            let hits = if definition {
                ontology.search_by_definition(&query, limit)?
            } else {
                ontology.search_by_label(&query, limit, !no_alt_labels)?
            };
            print_scored(&hits, cli.format)
        }
        Commands::Prefix { prefix } => print_classes(&ontology.search_by_prefix(&prefix)?, cli.format),
        Commands::Parents { iri } => print_classes(&ontology.parents(&iri)?, cli.format),
        Commands::Children { iri, depth } => print_classes(&ontology.children(&iri, depth)?, cli.format),
        Commands::Category { name, depth } => {
            let kind: SoliType = name.parse()?;
            print_classes(&ontology.category(kind, Some(depth))?, cli.format)
        }
        Commands::Triples {
            subject,
            predicate,
            object,
        } => {
            let snapshot = ontology.snapshot();
            let store = snapshot.triples();
            let triples = select_triples(store, subject.as_deref(), predicate.as_deref(), object.as_deref());
            print_triples(store, &triples, cli.format)
        }
        Commands::GenerateIri => {
            println!("{}", ontology.generate_iri()?);
            Ok(())
        }
        Commands::Branches { .. } => Ok(()),
    }
}

fn load(cli: &Cli) -> Result<Ontology> {
    let config = match (&cli.file, &cli.config) {
        (Some(file), _) => SoliConfig::for_file(file.to_string_lossy()),
        (None, Some(path)) => SoliConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        (None, None) => SoliConfig::load_default().context("loading default configuration")?,
    };

    Ontology::from_config(&config).context("loading ontology")
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header.to_vec());
    table
}

fn run_info(ontology: &Ontology, format: OutputFormat) -> Result<()> {
    let snapshot = ontology.snapshot();
    let title = snapshot.title().unwrap_or("");
    let description = snapshot.description().unwrap_or("");

    match format {
        OutputFormat::Json => {
            let info = json!({
                "source": ontology.source_description(),
                "title": snapshot.title(),
                "description": snapshot.description(),
                "classes": snapshot.len(),
                "triples": snapshot.triples().len(),
                "version": soli::version(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        OutputFormat::Table => {
            println!("Source:      {}", ontology);
            println!("Title:       {}", title);
            println!("Description: {}", description);
            println!("Classes:     {}", snapshot.len());
            println!("Triples:     {}", snapshot.triples().len());
        }
    }
    Ok(())
}

fn run_branches(owner: &str, repo: &str, format: OutputFormat) -> Result<()> {
    let branches = GithubSource::list_branches(owner, repo)
        .with_context(|| format!("listing branches of {owner}/{repo}"))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&branches)?),
        OutputFormat::Table => {
            let mut table = new_table(&["Branch"]);
            for branch in &branches {
                table.add_row(vec![branch.as_str()]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

fn run_get(ontology: &Ontology, key: &str, render: Option<ClassFormat>, format: OutputFormat) -> Result<()> {
    let class = ontology.get(key)?;

    match (render, format) {
        (Some(ClassFormat::Json), _) | (None, OutputFormat::Json) => {
            println!("{}", serde_json::to_string_pretty(&*class)?);
        }
        (Some(ClassFormat::Jsonld), _) => {
            println!("{}", serde_json::to_string_pretty(&class.to_jsonld())?);
        }
        (Some(ClassFormat::Xml), _) => print!("{}", class.to_owl_xml()),
        (Some(ClassFormat::Markdown), _) => print!("{}", class.to_markdown()),
        (None, OutputFormat::Table) => {
            let mut table = new_table(&["Field", "Value"]);
            table.add_row(vec!["IRI".to_string(), class.iri.clone()]);
            table.add_row(vec!["Label".to_string(), class.display_label().to_string()]);
            let optional = [
                ("Definition", &class.definition),
                ("Preferred label", &class.preferred_label),
                ("Identifier", &class.identifier),
                ("Comment", &class.comment),
            ];
            for (name, value) in optional {
                if let Some(value) = value {
                    table.add_row(vec![name.to_string(), value.clone()]);
                }
            }
            let lists = [
                ("Alternative labels", &class.alternative_labels),
                ("Sub class of", &class.sub_class_of),
                ("Parent class of", &class.parent_class_of),
                ("Examples", &class.examples),
            ];
            for (name, values) in lists {
                if !values.is_empty() {
                    table.add_row(vec![name.to_string(), values.join("\n")]);
                }
            }
            if class.deprecated {
                table.add_row(vec!["Deprecated".to_string(), "true".to_string()]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

fn print_classes(classes: &[Arc<OwlClass>], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let records: Vec<&OwlClass> = classes.iter().map(|c| &**c).collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        OutputFormat::Table => {
            if classes.is_empty() {
                println!("(no results)");
                return Ok(());
            }
            let mut table = new_table(&["IRI", "Label"]);
            for class in classes {
                table.add_row(vec![class.iri.clone(), class.display_label().to_string()]);
            }
            println!("{}", table);
            println!("{} class(es)", classes.len());
        }
    }
    Ok(())
}

fn print_scored(hits: &[(Arc<OwlClass>, f64)], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = hits
                .iter()
                .map(|(class, score)| json!({ "iri": class.iri, "label": class.label, "score": score }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Table => {
            if hits.is_empty() {
                println!("(no results)");
                return Ok(());
            }
            let mut table = new_table(&["Score", "IRI", "Label"]);
            for (class, score) in hits {
                table.add_row(vec![
                    format!("{:.3}", score),
                    class.iri.clone(),
                    class.display_label().to_string(),
                ]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

fn select_triples<'a>(
    store: &'a TripleStore,
    subject: Option<&str>,
    predicate: Option<&str>,
    object: Option<&str>,
) -> Vec<&'a Triple> {
    let mut hits = match (subject, predicate, object) {
        (Some(s), _, _) => store.by_subject(s),
        (None, Some(p), _) => store.by_predicate(p),
        (None, None, Some(o)) => store.by_object(o),
        (None, None, None) => store.iter().collect(),
    };

    let namespaces = store.namespaces();
    if let Some(p) = predicate {
        let expanded = namespaces.resolve(p);
        hits.retain(|t| t.predicate.as_str() == p || t.predicate.as_str() == expanded);
    }
    if let Some(o) = object {
        let expanded = namespaces.resolve(o);
        hits.retain(|t| {
            let key = t.object.index_key();
            key == o || key == expanded
        });
    }
    hits
}

fn print_triples(store: &TripleStore, triples: &[&Triple], format: OutputFormat) -> Result<()> {
    let rows: Vec<(String, String, String)> = triples.iter().map(|t| store.compact(t)).collect();

    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = rows
                .iter()
                .map(|(s, p, o)| json!({ "subject": s, "predicate": p, "object": o }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Table => {
            let mut table = new_table(&["Subject", "Predicate", "Object"]);
            for (s, p, o) in rows {
                table.add_row(vec![s, p, o]);
            }
            println!("{}", table);
            println!("{} triple(s)", triples.len());
        }
    }
    Ok(())
}
