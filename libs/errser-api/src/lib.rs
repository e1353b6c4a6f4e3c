pub mod error;
pub mod serializer;
pub mod value;

pub use error::{AccessError, SerializeError};
pub use serializer::{PlainValue, Recurse, SerializerPlugin, visit};
pub use value::{ErrorObject, ErrorValue, NativeFn, ObjectId, ObjectRef, Slot};
