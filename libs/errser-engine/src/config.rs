use serde::Deserialize;

use crate::error::EngineError;

/// Which optional serializers to use, parsed from TOML.
///
/// - `include`: only the named serializers; an empty list leaves just the
///   catch-all.
/// - `exclude`: every known serializer except the named ones.
/// - neither: every known serializer.
///
/// Setting both is rejected by [`validate`](Self::validate). The catch-all
/// is always appended and cannot be excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SerializerOptions {
    #[serde(default)]
    pub include: Option<Vec<String>>,

    #[serde(default)]
    pub exclude: Option<Vec<String>>,
}

impl SerializerOptions {
    pub fn include<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: Some(names.into_iter().map(Into::into).collect()),
            exclude: None,
        }
    }

    pub fn exclude<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: None,
            exclude: Some(names.into_iter().map(Into::into).collect()),
        }
    }

    /// Load options from a TOML file.
    pub fn load(path: &str) -> Result<Self, EngineError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| EngineError::Config(format!("{path}: {e}")))?;
        Self::parse(&content).map_err(|e| e.with_context(path))
    }

    /// Parse options from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, EngineError> {
        toml::from_str(toml_str).map_err(|e| EngineError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.include.is_some() && self.exclude.is_some() {
            return Err(EngineError::Conflict);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_document_selects_everything() {
        let options = SerializerOptions::parse("").unwrap();
        assert_eq!(options, SerializerOptions::default());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn parses_include_list() {
        let options = SerializerOptions::parse(r#"include = ["axios"]"#).unwrap();
        assert_eq!(options, SerializerOptions::include(["axios"]));
    }

    #[test]
    fn parses_empty_include() {
        let options = SerializerOptions::parse("include = []").unwrap();
        assert_eq!(options.include, Some(Vec::new()));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn both_lists_parse_but_fail_validation() {
        let options = SerializerOptions::parse(
            r#"
include = []
exclude = ["verror"]
"#,
        )
        .unwrap();
        assert!(matches!(options.validate(), Err(EngineError::Conflict)));
    }

    #[test]
    fn wrong_type_is_config_error() {
        let err = SerializerOptions::parse(r#"include = "axios""#).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"exclude = ["verror"]"#).unwrap();
        let path = file.path().to_str().unwrap();

        let options = SerializerOptions::load(path).unwrap();
        assert_eq!(options, SerializerOptions::exclude(["verror"]));
    }

    #[test]
    fn load_missing_file_names_path() {
        let err = SerializerOptions::load("/nonexistent/errser.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/errser.toml"));
    }
}
