use errser_api::{
    ErrorValue, ObjectRef, PlainValue, Recurse, SerializeError, SerializerPlugin, visit,
};
use serde_json::Map;

const MARKER_KEY: &str = "isAxiosError";

const ERROR_FIELDS: &[&str] = &["code", MARKER_KEY];

const CONFIG_FIELDS: &[&str] = &[
    "xsrfCookieName",
    "xsrfHeaderName",
    "timeout",
    "maxContentLength",
    "maxBodyLength",
    "headers",
    "baseURL",
    "method",
    "url",
    "data",
];

const REQUEST_FIELDS: &[&str] = &[
    "finished",
    "method",
    "path",
    "aborted",
    "host",
    "protocol",
    "_hasBody",
    "_headerSent",
];

const RESPONSE_FIELDS: &[&str] = &["status", "statusText", "headers", "data"];

/// HTTP-client error serializer (axios-shaped errors).
///
/// Lossy on purpose: only the allow-listed fields of the error and of its
/// `config`, `request` and `response` sub-objects are kept.
pub struct AxiosSerializer;

impl SerializerPlugin for AxiosSerializer {
    fn name(&self) -> &'static str {
        "axios"
    }

    fn can_handle(&self, value: &ErrorValue) -> bool {
        value
            .as_object()
            .and_then(|obj| obj.data(MARKER_KEY))
            .is_some_and(|marker| matches!(marker, ErrorValue::Bool(true)))
    }

    fn serialize(
        &self,
        value: &ErrorValue,
        rec: &mut dyn Recurse,
    ) -> Result<PlainValue, SerializeError> {
        let Some(err) = value.as_object() else {
            return Err(SerializeError::unsupported(self.name(), value));
        };

        visit(rec, err, |rec| {
            let mut serialized = pick(err, ERROR_FIELDS, rec)?;
            for (key, fields) in [
                ("config", CONFIG_FIELDS),
                ("request", REQUEST_FIELDS),
                ("response", RESPONSE_FIELDS),
            ] {
                let Some(ErrorValue::Object(section)) = err.read(key)? else {
                    continue;
                };
                let picked = visit(rec, &section, |rec| pick(&section, fields, rec))?;
                serialized.insert(key.to_string(), PlainValue::Object(picked));
            }
            Ok(PlainValue::Object(serialized))
        })
    }
}

/// Copy the listed own properties.
///
/// Present `null` fields stay `null`; undefined ones are left out.
fn pick(
    obj: &ObjectRef,
    fields: &[&str],
    rec: &mut dyn Recurse,
) -> Result<Map<String, PlainValue>, SerializeError> {
    let mut picked = Map::new();
    for &field in fields {
        let value = match obj.read(field)? {
            None | Some(ErrorValue::Undefined) | Some(ErrorValue::Function(_)) => continue,
            Some(value) => value,
        };
        if rec.is_back_edge(&value) {
            continue;
        }
        picked.insert(field.to_string(), copy_plain(&value, rec)?);
    }
    Ok(picked)
}

/// Deep copy of plain data: header maps and bodies keep every key,
/// `type` and `name` included. Classified objects go through the chain.
fn copy_plain(value: &ErrorValue, rec: &mut dyn Recurse) -> Result<PlainValue, SerializeError> {
    match value {
        ErrorValue::Array(items) => {
            let mut copied = Vec::with_capacity(items.len());
            for item in items {
                if rec.is_back_edge(item) {
                    copied.push(PlainValue::Null);
                } else {
                    copied.push(copy_plain(item, rec)?);
                }
            }
            Ok(PlainValue::Array(copied))
        }
        ErrorValue::Object(obj) if obj.class().is_none() => visit(rec, obj, |rec| {
            let mut copied = Map::new();
            for key in obj.keys() {
                let value = match obj.read(&key)? {
                    None | Some(ErrorValue::Undefined) | Some(ErrorValue::Function(_)) => continue,
                    Some(value) => value,
                };
                if rec.is_back_edge(&value) {
                    continue;
                }
                copied.insert(key, copy_plain(&value, rec)?);
            }
            Ok(PlainValue::Object(copied))
        }),
        ErrorValue::Object(_) => rec.serialize(value),
        scalar => Ok(scalar.as_plain_scalar().unwrap_or(PlainValue::Null)),
    }
}
