pub mod convert;
pub mod plugins;
