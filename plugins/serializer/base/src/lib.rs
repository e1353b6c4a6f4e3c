use errser_api::{
    ErrorValue, ObjectRef, PlainValue, Recurse, SerializeError, SerializerPlugin, visit,
};
use serde_json::Map;

/// Reserved output key holding the object's runtime classification.
pub const TYPE_KEY: &str = "type";

/// Catch-all serializer; must end every chain.
///
/// - Arrays: element-wise, order and length preserving.
/// - Scalars: returned unchanged.
/// - Objects: every own property recursively, plus the `type` discriminator.
///   Properties pointing at an object still mid-traversal are skipped.
pub struct BaseSerializer;

impl SerializerPlugin for BaseSerializer {
    fn name(&self) -> &'static str {
        "base"
    }

    fn can_handle(&self, _value: &ErrorValue) -> bool {
        true
    }

    fn serialize(
        &self,
        value: &ErrorValue,
        rec: &mut dyn Recurse,
    ) -> Result<PlainValue, SerializeError> {
        match value {
            // Covers aggregated sub-errors (e.g. an `errors` field): the field
            // lands here and each element re-enters the chain.
            ErrorValue::Array(items) => serialize_array(items, rec),
            ErrorValue::Object(obj) => serialize_object(obj, rec),
            other => Ok(other.as_plain_scalar().unwrap_or(PlainValue::Null)),
        }
    }

    fn is_catch_all(&self) -> bool {
        true
    }
}

fn serialize_array(
    items: &[ErrorValue],
    rec: &mut dyn Recurse,
) -> Result<PlainValue, SerializeError> {
    items
        .iter()
        .map(|item| {
            // Keep the index even when the element is a back-edge.
            if rec.is_back_edge(item) {
                return Ok(PlainValue::Null);
            }
            rec.serialize(item)
        })
        .collect::<Result<Vec<_>, _>>()
        .map(PlainValue::Array)
}

fn serialize_object(obj: &ObjectRef, rec: &mut dyn Recurse) -> Result<PlainValue, SerializeError> {
    if rec.is_visiting(obj) {
        return Ok(PlainValue::Null);
    }

    visit(rec, obj, |rec| {
        let mut serialized = Map::new();
        if let Some(kind) = discriminator(obj)? {
            serialized.insert(TYPE_KEY.to_string(), PlainValue::String(kind));
        }

        for key in obj.keys() {
            if serialized.get(&key).is_some_and(|v| !v.is_null()) {
                continue;
            }

            // Gone if an accessor removed it mid-walk.
            let Some(value) = obj.read(&key)? else {
                continue;
            };
            if rec.is_back_edge(&value) {
                tracing::trace!(key = %key, "skipping circular reference");
                continue;
            }

            let plain = rec.serialize(&value)?;
            if !plain.is_null() {
                serialized.insert(key, plain);
            }
        }

        Ok(PlainValue::Object(serialized))
    })
}

/// Class name, falling back to a string `name` property.
fn discriminator(obj: &ObjectRef) -> Result<Option<String>, SerializeError> {
    if let Some(class) = obj.class() {
        return Ok(Some(class));
    }
    match obj.read("name")? {
        Some(ErrorValue::String(name)) => Ok(Some(name)),
        _ => Ok(None),
    }
}
