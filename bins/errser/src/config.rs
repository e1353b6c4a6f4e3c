use clap::{Args, Parser, Subcommand};

use errser_engine::SerializerOptions;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "errser", about = "Convert error-like JSON into plain serialized errors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serialize a JSON document
    Convert(ConvertArgs),
    /// Print the serializer chain the options select
    Plugins(SelectionArgs),
}

#[derive(Args, Clone, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Pretty-print the output
    #[arg(long)]
    pub pretty: bool,

    /// JSON input file, `-` for stdin
    #[arg(default_value = "-")]
    pub input: String,
}

/// Serializer selection. Command-line lists replace the config file's.
#[derive(Args, Clone, Debug, Default)]
pub struct SelectionArgs {
    /// Path to TOML options file (`include` / `exclude`)
    #[arg(long, env = "ERRSER_CONFIG")]
    pub config: Option<String>,

    /// Use only this serializer (repeatable)
    #[arg(long = "include", value_name = "NAME")]
    pub include: Vec<String>,

    /// Skip this serializer (repeatable)
    #[arg(long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Use only the base serializer
    #[arg(long, conflicts_with_all = ["include", "exclude"])]
    pub base_only: bool,
}

impl SelectionArgs {
    /// Merge config file and flags into serializer options.
    pub fn options(&self) -> Result<SerializerOptions, CliError> {
        let from_flags = self.base_only || !self.include.is_empty() || !self.exclude.is_empty();
        if !from_flags {
            return match &self.config {
                Some(path) => Ok(SerializerOptions::load(path)?),
                None => Ok(SerializerOptions::default()),
            };
        }

        let include = (self.base_only || !self.include.is_empty()).then(|| self.include.clone());
        let exclude = (!self.exclude.is_empty()).then(|| self.exclude.clone());
        Ok(SerializerOptions { include, exclude })
    }
}
