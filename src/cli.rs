use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::registrar::DEFAULT_ANNOTATION;

#[derive(Debug, Clone, Parser)]
#[command(name = "reflect-registrar", version)]
#[command(about = "Register annotated Java classes (and their nested classes) for reflection")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, value_name = "FQN", default_value = DEFAULT_ANNOTATION)]
    pub annotation: String,

    /// Jar, class directory, or directory of jars. Repeatable.
    #[arg(long = "classpath", value_name = "PATH")]
    pub classpath: Vec<PathBuf>,

    #[arg(long, value_name = "FILE")]
    pub cache: Option<PathBuf>,

    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Build an annotation index from Java sources.
    Index {
        #[arg(short = 's', long = "source", value_name = "DIR", required = true)]
        sources: Vec<PathBuf>,

        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Emit registration records for every marked class.
    Scan {
        #[arg(short = 'i', long = "index", value_name = "FILE")]
        indexes: Vec<PathBuf>,

        #[arg(short = 's', long = "source", value_name = "DIR")]
        sources: Vec<PathBuf>,

        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// List the nested classes the classpath reports for a class.
    Nested { class_name: String },
    /// Show jar catalog cache statistics.
    Stats,
    /// Delete the jar catalog cache.
    Clear,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}
