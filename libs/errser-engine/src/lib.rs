pub mod chain;
pub mod config;
pub mod error;
pub mod registry;
mod serializer;

pub use config::SerializerOptions;
pub use error::EngineError;
pub use serializer::ErrorSerializer;

pub use errser_api::{
    AccessError, ErrorObject, ErrorValue, ObjectRef, PlainValue, SerializeError, SerializerPlugin,
};
