use std::sync::Arc;

use errser_api::SerializerPlugin;
use serializer_axios::AxiosSerializer;
use serializer_verror::VErrorSerializer;

use crate::config::SerializerOptions;
use crate::error::EngineError;

/// Every optional serializer, in priority order. The catch-all is not listed.
pub fn known_plugins() -> Vec<Arc<dyn SerializerPlugin>> {
    vec![Arc::new(VErrorSerializer), Arc::new(AxiosSerializer)]
}

/// Pick the optional serializers named by `options`, keeping priority order.
///
/// Fails with [`EngineError::Conflict`] before anything is built when both
/// `include` and `exclude` are set. Unknown names are logged and ignored.
pub fn select(options: &SerializerOptions) -> Result<Vec<Arc<dyn SerializerPlugin>>, EngineError> {
    options.validate()?;

    let known = known_plugins();
    let listed = options.include.as_deref().or(options.exclude.as_deref()).unwrap_or_default();
    for name in listed {
        if !known.iter().any(|p| p.name() == name.as_str()) {
            tracing::warn!(serializer = %name, "unknown serializer name ignored");
        }
    }

    let selected: Vec<_> = match &options.include {
        Some(include) => known
            .into_iter()
            .filter(|p| include.iter().any(|n| n.as_str() == p.name()))
            .collect(),
        None => known
            .into_iter()
            .filter(|p| !listed.iter().any(|n| n.as_str() == p.name()))
            .collect(),
    };

    tracing::debug!(
        serializers = ?selected.iter().map(|p| p.name()).collect::<Vec<_>>(),
        "selected serializers"
    );
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(plugins: &[Arc<dyn SerializerPlugin>]) -> Vec<&'static str> {
        plugins.iter().map(|p| p.name()).collect()
    }

    #[test]
    fn defaults_to_every_known_serializer() {
        let selected = select(&SerializerOptions::default()).unwrap();
        assert_eq!(names(&selected), vec!["verror", "axios"]);
    }

    #[test]
    fn empty_include_selects_nothing() {
        let selected = select(&SerializerOptions::include(Vec::<String>::new())).unwrap();
        assert!(selected.is_empty());
    }

    #[test]
    fn include_keeps_priority_order() {
        let selected = select(&SerializerOptions::include(["axios", "verror"])).unwrap();
        assert_eq!(names(&selected), vec!["verror", "axios"]);
    }

    #[test]
    fn exclude_removes_named() {
        let selected = select(&SerializerOptions::exclude(["verror"])).unwrap();
        assert_eq!(names(&selected), vec!["axios"]);
    }

    #[test]
    fn unknown_names_are_ignored() {
        let included = select(&SerializerOptions::include(["grpc"])).unwrap();
        assert!(included.is_empty());

        let excluded = select(&SerializerOptions::exclude(["grpc"])).unwrap();
        assert_eq!(names(&excluded), vec!["verror", "axios"]);
    }

    #[test]
    fn include_and_exclude_conflict() {
        let options = SerializerOptions {
            include: Some(Vec::new()),
            exclude: Some(vec!["axios".to_string()]),
        };
        assert!(matches!(select(&options), Err(EngineError::Conflict)));
    }
}
