use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use datajoin_testing::join::{CombinatorialStrategy, JoinKind, uncovered_pairs};

#[derive(Debug, Parser)]
#[command(name = "datajoin")]
#[command(about = "Join data sources into test tuples")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the joined rows.
    Join {
        /// Join strategy.
        #[arg(long, value_enum, default_value = "combinatorial")]
        strategy: StrategyArg,
        /// Output format.
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
        /// Fail when a value pair of two sources is not covered by any row.
        #[arg(long)]
        verify: bool,
        #[command(flatten)]
        sources: SourceArgs,
    },
    /// Print the number of rows every strategy produces.
    Stats {
        #[command(flatten)]
        sources: SourceArgs,
    },
}

#[derive(Debug, Args)]
struct SourceArgs {
    /// Inline source as `name=v1,v2,...`. Repeat for more sources.
    #[arg(long = "source", value_parser = parse_source, required_unless_present = "input")]
    sources: Vec<Source>,
    /// JSON file holding `[{"name": ..., "values": [...]}, ...]`.
    #[arg(long, conflicts_with = "sources")]
    input: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Full cross product
    Combinatorial,
    /// Positional zip
    Sequential,
    /// All-pairs covering
    Pairwise,
}

impl From<StrategyArg> for JoinKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Combinatorial => JoinKind::Combinatorial,
            StrategyArg::Sequential => JoinKind::Sequential,
            StrategyArg::Pairwise => JoinKind::Pairwise,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// JSON
    Json,
    /// Tab separated values
    Tsv,
    /// Markdown
    Md,
}

#[derive(Debug, Clone, Deserialize)]
struct Source {
    name: String,
    values: Vec<Value>,
}

fn parse_source(raw: &str) -> Result<Source, String> {
    let (name, values) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected `name=v1,v2,...`, got `{raw}`"))?;
    if name.is_empty() {
        return Err("source name must not be empty".to_string());
    }
    let values = values
        .split(',')
        .filter(|value| !value.is_empty())
        .map(|value| Value::String(value.to_string()))
        .collect();
    Ok(Source {
        name: name.to_string(),
        values,
    })
}

impl SourceArgs {
    fn load(self) -> Result<Vec<Source>> {
        let sources = match self.input {
            Some(path) => {
                let raw = fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                serde_json::from_str::<Vec<Source>>(&raw)
                    .with_context(|| format!("failed to parse {}", path.display()))?
            }
            None => self.sources,
        };

        // Names key the JSON rows and the table headers.
        {
            let mut names = HashSet::new();
            for source in &sources {
                if !names.insert(source.name.as_str()) {
                    bail!("duplicate source name `{}`", source.name);
                }
            }
        }
        Ok(sources)
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn render(sources: &[Source], tuples: &[Vec<usize>], format: OutputFormat) -> Result<String> {
    let cell = |source: usize, index: usize| &sources[source].values[index];
    let names: Vec<&str> = sources.iter().map(|source| source.name.as_str()).collect();

    let output = match format {
        OutputFormat::Json => {
            let rows: Vec<Value> = tuples
                .iter()
                .map(|tuple| {
                    let row = tuple
                        .iter()
                        .enumerate()
                        .map(|(source, index)| (names[source].to_string(), cell(source, *index).clone()))
                        .collect();
                    Value::Object(row)
                })
                .collect();
            serde_json::to_string_pretty(&rows)?
        }
        OutputFormat::Tsv => {
            let mut lines = vec![names.join("\t")];
            lines.extend(tuples.iter().map(|tuple| {
                tuple
                    .iter()
                    .enumerate()
                    .map(|(source, index)| render_value(cell(source, *index)))
                    .collect::<Vec<_>>()
                    .join("\t")
            }));
            lines.join("\n")
        }
        OutputFormat::Md => {
            let mut lines = vec![
                format!("| {} |", names.join(" | ")),
                format!("|{}", "---|".repeat(names.len())),
            ];
            lines.extend(tuples.iter().map(|tuple| {
                let cells: Vec<String> = tuple
                    .iter()
                    .enumerate()
                    .map(|(source, index)| render_value(cell(source, *index)))
                    .collect();
                format!("| {} |", cells.join(" | "))
            }));
            lines.join("\n")
        }
    };
    Ok(output)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Join {
            strategy,
            format,
            verify,
            sources,
        } => {
            let sources = sources.load()?;
            let kind = JoinKind::from(strategy);
            let lengths: Vec<usize> = sources.iter().map(|source| source.values.len()).collect();
            let tuples = kind.strategy().join(&lengths)?;
            tracing::info!(strategy = %kind, rows = tuples.len(), "joined sources");

            println!("{}", render(&sources, &tuples, format)?);

            if verify {
                let missing = uncovered_pairs(&lengths, &tuples);
                if !missing.is_empty() {
                    for pair in &missing {
                        eprintln!(
                            "uncovered: {}={} with {}={}",
                            sources[pair.first_source].name,
                            render_value(&sources[pair.first_source].values[pair.first_value]),
                            sources[pair.second_source].name,
                            render_value(&sources[pair.second_source].values[pair.second_value]),
                        );
                    }
                    eprintln!("{} value pairs are not covered by {kind}", missing.len());
                    std::process::exit(1);
                }
            }
        }
        Command::Stats { sources } => {
            let sources = sources.load()?;
            if sources.is_empty() {
                bail!("at least one data source is required");
            }
            let lengths: Vec<usize> = sources.iter().map(|source| source.values.len()).collect();
            for kind in JoinKind::ALL {
                // The cross product covers everything by construction.
                if kind == JoinKind::Combinatorial {
                    let count = CombinatorialStrategy.tuple_count(&lengths)?;
                    println!("{kind}\t{count}\tuncovered=0");
                    continue;
                }
                let tuples = kind.strategy().join(&lengths)?;
                let missing = uncovered_pairs(&lengths, &tuples).len();
                println!("{kind}\t{}\tuncovered={missing}", tuples.len());
            }
        }
    }

    Ok(())
}
