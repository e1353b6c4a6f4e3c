use std::io::Read;

use errser_engine::{ErrorSerializer, ErrorValue};

use crate::config::ConvertArgs;
use crate::error::CliError;

pub fn run(args: ConvertArgs) -> Result<(), CliError> {
    let output = render(&args)?;
    println!("{output}");
    Ok(())
}

/// Serialized output for the input named in `args`.
fn render(args: &ConvertArgs) -> Result<String, CliError> {
    let options = args.selection.options()?;
    let serializer = ErrorSerializer::new(&options)?;

    let input = read_input(&args.input)?;
    let document: serde_json::Value = serde_json::from_str(&input)?;
    tracing::debug!(input = %args.input, bytes = input.len(), "parsed input");

    let serialized = serializer.serialize(&ErrorValue::from(document))?;
    let output = if args.pretty {
        serde_json::to_string_pretty(&serialized)?
    } else {
        serde_json::to_string(&serialized)?
    };
    Ok(output)
}

fn read_input(path: &str) -> Result<String, CliError> {
    let read = if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map(|_| buf)
    } else {
        std::fs::read_to_string(path)
    };
    read.map_err(|source| CliError::Input {
        path: path.to_string(),
        source,
    })
}
