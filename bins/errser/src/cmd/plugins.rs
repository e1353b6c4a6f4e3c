use errser_engine::ErrorSerializer;

use crate::config::SelectionArgs;
use crate::error::CliError;

pub fn run(args: SelectionArgs) -> Result<(), CliError> {
    let serializer = ErrorSerializer::new(&args.options()?)?;
    for name in serializer.plugin_names() {
        println!("{name}");
    }
    Ok(())
}
