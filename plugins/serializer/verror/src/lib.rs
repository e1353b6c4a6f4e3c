use errser_api::{ErrorValue, PlainValue, Recurse, SerializeError, SerializerPlugin, visit};

const CAUSE_KEY: &str = "cause";

/// Chained-cause serializer for errors exposing a `cause()` method.
///
/// Own properties other than `cause` are serialized through the chain from a
/// shallow duplicate; the result of calling `cause()` on the original object
/// becomes the `cause` field. The original stays in the visiting set while
/// both happen, so properties or causes leading back to it are dropped.
pub struct VErrorSerializer;

impl SerializerPlugin for VErrorSerializer {
    fn name(&self) -> &'static str {
        "verror"
    }

    fn can_handle(&self, value: &ErrorValue) -> bool {
        value
            .as_object()
            .and_then(|obj| obj.data(CAUSE_KEY))
            .is_some_and(|cause| matches!(cause, ErrorValue::Function(_)))
    }

    fn serialize(
        &self,
        value: &ErrorValue,
        rec: &mut dyn Recurse,
    ) -> Result<PlainValue, SerializeError> {
        let Some(obj) = value.as_object() else {
            return Err(SerializeError::unsupported(self.name(), value));
        };
        let Some(ErrorValue::Function(cause)) = obj.data(CAUSE_KEY) else {
            return Err(SerializeError::unsupported(self.name(), value));
        };

        visit(rec, obj, |rec| {
            let duplicate = obj.shallow_clone(|key| key != CAUSE_KEY)?;
            let mut serialized = rec.serialize(&ErrorValue::Object(duplicate))?;

            let caused_by = obj
                .call(&cause)
                .map_err(|source| SerializeError::access(CAUSE_KEY, source))?;
            if rec.is_back_edge(&caused_by) {
                tracing::trace!("skipping circular cause");
                return Ok(serialized);
            }

            let plain = rec.serialize(&caused_by)?;
            if let (PlainValue::Object(map), false) = (&mut serialized, plain.is_null()) {
                map.insert(CAUSE_KEY.to_string(), plain);
            }
            Ok(serialized)
        })
    }
}
