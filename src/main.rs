//! vibegeo - query features in a dump file from the command line

use anyhow::{Context, Result};
use clap::{Args, Parser as ClapParser, Subcommand};
use std::path::{Path, PathBuf};
use vibegeo::access::{DumpSource, FeatureSource};
use vibegeo::feature::Envelope;
use vibegeo::filter;
use vibegeo::{Query, VectorDataset};

/// vibegeo - A vector feature query engine
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show name, bounds and schema of a dataset
    Info {
        /// Dump file
        path: PathBuf,
    },

    /// Count matching features
    Count {
        /// Dump file
        path: PathBuf,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Print matching features
    Query {
        /// Dump file
        path: PathBuf,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Parse a filter and print its normalised form
    Parse {
        /// Filter text
        filter: String,
    },
}

#[derive(Args, Debug)]
struct QueryArgs {
    /// Filter expression, e.g. "P_MALE > P_FEMALE AND SAMP_POP > 200000"
    #[arg(short, long)]
    filter: Option<String>,

    /// Bounding box as minx,miny,maxx,maxy
    #[arg(short, long, value_parser = parse_bounds, allow_hyphen_values = true)]
    bounds: Option<Envelope>,

    /// Maximum number of features
    #[arg(short, long)]
    limit: Option<usize>,

    /// Number of matching features to skip
    #[arg(short, long, default_value = "0")]
    offset: usize,
}

impl QueryArgs {
    fn to_query(&self) -> Result<Query> {
        let mut query = Query::new().offset(self.offset);
        if let Some(bounds) = self.bounds {
            query = query.bounds(bounds);
        }
        if let Some(text) = &self.filter {
            query = query.filter(text).context("Invalid filter")?;
        }
        if let Some(limit) = self.limit {
            query = query.limit(limit);
        }
        Ok(query)
    }
}

fn parse_bounds(text: &str) -> std::result::Result<Envelope, String> {
    let coords = text
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid coordinate: {}", e))?;

    match coords.as_slice() {
        [min_x, min_y, max_x, max_y] => Ok(Envelope::new(*min_x, *min_y, *max_x, *max_y)),
        _ => Err(format!("expected 4 coordinates, got {}", coords.len())),
    }
}

fn open(path: &Path) -> Result<VectorDataset<DumpSource>> {
    let source = DumpSource::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    VectorDataset::open(source).context("Failed to read dataset metadata")
}

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Command::Info { path } => {
            let dataset = open(&path)?;
            println!("Name:   {}", dataset.name());
            println!("Bounds: {}", dataset.bounds());
            if let Some(rows) = dataset.source().row_count() {
                println!("Rows:   {}", rows);
            }
            println!("Fields:");
            let geometry = dataset.schema().geometry_index();
            for (i, field) in dataset.schema().fields().iter().enumerate() {
                let marker = if i == geometry { " (geometry)" } else { "" };
                println!("  {} {}{}", field.name, field.field_type, marker);
            }
        }

        Command::Count { path, query } => {
            let dataset = open(&path)?;
            let count = dataset.count(&query.to_query()?).context("Count failed")?;
            println!("{}", count);
        }

        Command::Query { path, query } => {
            let dataset = open(&path)?;
            let query = query.to_query()?;
            let mut cursor = dataset.cursor(&query).context("Failed to open cursor")?;
            for feature in cursor.features() {
                let feature = feature.context("Query failed")?;
                let attributes: Vec<String> = feature
                    .attributes()
                    .map(|(name, value)| format!("{}={}", name, value))
                    .collect();
                println!("{}\t{}", feature.id(), attributes.join("\t"));
            }
        }

        Command::Parse { filter: text } => {
            let expr = filter::parse(&text).context("Invalid filter")?;
            println!("{}", expr);
            let attributes: Vec<&str> = expr.attributes().into_iter().collect();
            if !attributes.is_empty() {
                println!("Attributes: {}", attributes.join(", "));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bounds() {
        assert_eq!(
            parse_bounds("-106.649513,25.845198,-93.507217,36.493877").unwrap(),
            Envelope::new(-106.649513, 25.845198, -93.507217, 36.493877)
        );
        assert!(parse_bounds("1,2,3").is_err());
        assert!(parse_bounds("a,b,c,d").is_err());
    }

    #[test]
    fn test_query_args() {
        let args = QueryArgs {
            filter: Some("SAMP_POP > 1".to_string()),
            bounds: None,
            limit: Some(3),
            offset: 2,
        };
        let query = args.to_query().unwrap();
        assert_eq!(query.get_limit(), Some(3));
        assert_eq!(query.get_offset(), 2);
        assert!(query.get_filter().is_some());

        let bad = QueryArgs {
            filter: Some("SAMP_POP >".to_string()),
            bounds: None,
            limit: None,
            offset: 0,
        };
        assert!(bad.to_query().is_err());
    }
}
