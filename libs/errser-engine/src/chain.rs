use std::collections::HashSet;
use std::sync::Arc;

use errser_api::{
    ErrorValue, ObjectId, ObjectRef, PlainValue, Recurse, SerializeError, SerializerPlugin,
};
use serializer_base::BaseSerializer;

use crate::error::EngineError;

/// Ordered serializer plugins; the last one is always a catch-all.
#[derive(Clone)]
pub struct Chain {
    plugins: Vec<Arc<dyn SerializerPlugin>>,
}

impl Chain {
    /// Validate and wrap an ordered plugin list.
    pub fn new(plugins: Vec<Arc<dyn SerializerPlugin>>) -> Result<Self, EngineError> {
        let last = plugins.last().ok_or(EngineError::EmptyChain)?;
        if !last.is_catch_all() {
            return Err(EngineError::MissingCatchAll {
                last: last.name().to_string(),
            });
        }
        Ok(Self { plugins })
    }

    /// Chain holding only the base serializer.
    pub fn base_only() -> Self {
        Self {
            plugins: vec![Arc::new(BaseSerializer)],
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn plugins(&self) -> &[Arc<dyn SerializerPlugin>] {
        &self.plugins
    }

    /// Serialize one value with a fresh visiting set.
    pub fn serialize(&self, value: &ErrorValue) -> Result<PlainValue, SerializeError> {
        Walker::new(&self.plugins).serialize(value)
    }
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// First plugin in `plugins` whose capability test accepts `value`.
pub fn resolve<'a>(
    value: &ErrorValue,
    plugins: &'a [Arc<dyn SerializerPlugin>],
) -> Result<&'a dyn SerializerPlugin, SerializeError> {
    plugins
        .iter()
        .find(|p| p.can_handle(value))
        .map(|p| p.as_ref())
        .ok_or(SerializeError::Unresolvable { kind: value.kind() })
}

/// Recursion state of one top-level call.
struct Walker<'a> {
    plugins: &'a [Arc<dyn SerializerPlugin>],
    visiting: HashSet<ObjectId>,
}

impl<'a> Walker<'a> {
    fn new(plugins: &'a [Arc<dyn SerializerPlugin>]) -> Self {
        Self {
            plugins,
            visiting: HashSet::new(),
        }
    }
}

impl Recurse for Walker<'_> {
    fn serialize(&mut self, value: &ErrorValue) -> Result<PlainValue, SerializeError> {
        let plugin = resolve(value, self.plugins)?;
        tracing::trace!(serializer = plugin.name(), kind = value.kind(), "resolved serializer");
        plugin.serialize(value, self)
    }

    fn is_visiting(&self, obj: &ObjectRef) -> bool {
        self.visiting.contains(&obj.id())
    }

    fn enter(&mut self, obj: &ObjectRef) -> bool {
        self.visiting.insert(obj.id())
    }

    fn leave(&mut self, obj: &ObjectRef) {
        self.visiting.remove(&obj.id());
    }
}

#[cfg(test)]
mod tests {
    use errser_api::ErrorObject;
    use serde_json::json;

    use super::*;

    /// Accepts strings and upper-cases them.
    struct Shout;

    impl SerializerPlugin for Shout {
        fn name(&self) -> &'static str {
            "shout"
        }

        fn can_handle(&self, value: &ErrorValue) -> bool {
            matches!(value, ErrorValue::String(_))
        }

        fn serialize(
            &self,
            value: &ErrorValue,
            _rec: &mut dyn Recurse,
        ) -> Result<PlainValue, SerializeError> {
            Ok(json!(value.as_str().unwrap_or_default().to_uppercase()))
        }
    }

    /// Also accepts strings, but is registered later.
    struct Whisper;

    impl SerializerPlugin for Whisper {
        fn name(&self) -> &'static str {
            "whisper"
        }

        fn can_handle(&self, value: &ErrorValue) -> bool {
            matches!(value, ErrorValue::String(_))
        }

        fn serialize(
            &self,
            value: &ErrorValue,
            _rec: &mut dyn Recurse,
        ) -> Result<PlainValue, SerializeError> {
            Ok(json!(value.as_str().unwrap_or_default().to_lowercase()))
        }
    }

    #[test]
    fn first_accepting_plugin_wins() {
        let plugins: Vec<Arc<dyn SerializerPlugin>> =
            vec![Arc::new(Shout), Arc::new(Whisper), Arc::new(BaseSerializer)];
        let string = ErrorValue::from("Hi");
        assert_eq!(resolve(&string, &plugins).unwrap().name(), "shout");
        assert_eq!(resolve(&ErrorValue::from(1), &plugins).unwrap().name(), "base");
    }

    #[test]
    fn no_accepting_plugin_is_an_error() {
        let plugins: Vec<Arc<dyn SerializerPlugin>> = vec![Arc::new(Shout)];
        let err = resolve(&ErrorValue::Null, &plugins).err().unwrap();
        assert!(matches!(err, SerializeError::Unresolvable { kind: "null" }));
    }

    #[test]
    fn chain_requires_catch_all_last() {
        assert!(matches!(Chain::new(Vec::new()), Err(EngineError::EmptyChain)));

        let backwards: Vec<Arc<dyn SerializerPlugin>> =
            vec![Arc::new(BaseSerializer), Arc::new(Shout)];
        let err = Chain::new(backwards).unwrap_err();
        assert!(matches!(err, EngineError::MissingCatchAll { ref last } if last == "shout"));

        let ordered: Vec<Arc<dyn SerializerPlugin>> =
            vec![Arc::new(Shout), Arc::new(BaseSerializer)];
        let chain = Chain::new(ordered).unwrap();
        assert_eq!(chain.names(), vec!["shout", "base"]);
    }

    #[test]
    fn nested_values_re_enter_resolution() {
        let plugins: Vec<Arc<dyn SerializerPlugin>> =
            vec![Arc::new(Shout), Arc::new(BaseSerializer)];
        let chain = Chain::new(plugins).unwrap();
        let err = ErrorObject::error("Error", "quiet please")
            .with("tags", vec![ErrorValue::from("a"), ErrorValue::from(2)]);
        assert_eq!(
            chain.serialize(&err.into()).unwrap(),
            json!({ "type": "Error", "message": "QUIET PLEASE", "tags": ["A", 2] })
        );
    }

    #[test]
    fn base_only_chain() {
        let chain = Chain::base_only();
        assert_eq!(chain.names(), vec!["base"]);
        assert_eq!(format!("{chain:?}"), r#"["base"]"#);
    }
}
