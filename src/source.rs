//! Data sources feeding samples and a confidence probability into the engine
//!
//! Two implementations:
//! - [`JsonDataSource`]: a JSON document `{"data": [[x, y], ...], "confidence_probability": p}`
//! - [`FixedDataSource`]: an in-memory dataset, including the built-in demo data

use crate::error::{FitError, Result};
use crate::regression::validate_confidence;
use crate::sample::Sample;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Confidence probability of the built-in demo dataset
pub const DEMO_CONFIDENCE: f64 = 0.95;

/// Anything that can supply a dataset and its confidence probability
pub trait DataSource {
    /// Ordered samples
    fn samples(&self) -> Result<Vec<Sample>>;

    /// Confidence probability in (0, 1)
    fn confidence_probability(&self) -> Result<f64>;

    /// Short description for report headers
    fn name(&self) -> String;
}

/// On-disk input document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputDocument {
    pub data: Vec<Sample>,
    pub confidence_probability: f64,
}

/// Dataset parsed from a JSON document
#[derive(Debug, Clone)]
pub struct JsonDataSource {
    name: String,
    document: InputDocument,
}

impl JsonDataSource {
    /// Load and parse a JSON input file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(FitError::MalformedSource(format!(
                "input file not found: {}",
                path_ref.display()
            )));
        }

        let contents = fs::read_to_string(path_ref)?;
        let source = Self::from_json_str(path_ref.display().to_string(), &contents)?;
        tracing::debug!(
            path = %path_ref.display(),
            samples = source.document.data.len(),
            confidence = source.document.confidence_probability,
            "loaded input file"
        );
        Ok(source)
    }

    /// Parse a JSON document held in memory
    pub fn from_json_str(name: impl Into<String>, contents: &str) -> Result<Self> {
        let name = name.into();
        let document: InputDocument = serde_json::from_str(contents)
            .map_err(|e| FitError::MalformedSource(format!("{}: {}", name, e)))?;

        if let Some(idx) = document.data.iter().position(|s| !s.is_finite()) {
            return Err(FitError::MalformedSource(format!(
                "{}: sample {} is not a finite number pair",
                name,
                idx + 1
            )));
        }

        Ok(Self { name, document })
    }
}

impl DataSource for JsonDataSource {
    fn samples(&self) -> Result<Vec<Sample>> {
        Ok(self.document.data.clone())
    }

    fn confidence_probability(&self) -> Result<f64> {
        let p = self.document.confidence_probability;
        validate_confidence(p)?;
        Ok(p)
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Dataset held in memory
#[derive(Debug, Clone)]
pub struct FixedDataSource {
    name: String,
    samples: Vec<Sample>,
    confidence_probability: f64,
}

impl FixedDataSource {
    pub fn new(name: impl Into<String>, samples: Vec<Sample>, confidence_probability: f64) -> Self {
        Self {
            name: name.into(),
            samples,
            confidence_probability,
        }
    }

    /// Six-point demo dataset at 95% confidence
    pub fn demo() -> Self {
        let samples = [
            (1.0, 0.0),
            (-1.0, -2.0),
            (1.0, 1.0),
            (1.0, 0.0),
            (-1.0, -2.0),
            (0.0, -1.0),
        ]
        .into_iter()
        .map(Sample::from)
        .collect();
        Self::new("demo", samples, DEMO_CONFIDENCE)
    }
}

impl DataSource for FixedDataSource {
    fn samples(&self) -> Result<Vec<Sample>> {
        Ok(self.samples.clone())
    }

    fn confidence_probability(&self) -> Result<f64> {
        validate_confidence(self.confidence_probability)?;
        Ok(self.confidence_probability)
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID: &str = r#"{
        "data": [[1.0, 0.0], [-1.0, -2.0], [1, 1]],
        "confidence_probability": 0.95
    }"#;

    #[test]
    fn test_parse_valid_document() {
        let source = JsonDataSource::from_json_str("inline", VALID).unwrap();
        let samples = source.samples().unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[1], Sample::new(-1.0, -2.0));
        assert_eq!(samples[2], Sample::new(1.0, 1.0));
        assert_eq!(source.confidence_probability().unwrap(), 0.95);
        assert_eq!(source.name(), "inline");
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let err = JsonDataSource::from_json_str("x", r#"{"data": [[1, 2]]}"#).unwrap_err();
        assert!(matches!(err, FitError::MalformedSource(_)));
        assert!(err.to_string().contains("confidence_probability"));
    }

    #[test]
    fn test_bad_pair_is_malformed() {
        let doc = r#"{"data": [[1, 2, 3]], "confidence_probability": 0.9}"#;
        assert!(matches!(
            JsonDataSource::from_json_str("x", doc),
            Err(FitError::MalformedSource(_))
        ));
    }

    #[test]
    fn test_not_json_is_malformed() {
        assert!(matches!(
            JsonDataSource::from_json_str("x", "data = 1"),
            Err(FitError::MalformedSource(_))
        ));
    }

    #[test]
    fn test_confidence_out_of_range_reported_on_access() {
        let doc = r#"{"data": [[1, 2]], "confidence_probability": 95}"#;
        let source = JsonDataSource::from_json_str("x", doc).unwrap();
        assert!(matches!(
            source.confidence_probability(),
            Err(FitError::MalformedSource(_))
        ));
    }

    #[test]
    fn test_empty_data_parses() {
        // emptiness is the engine's concern
        let doc = r#"{"data": [], "confidence_probability": 0.95}"#;
        let source = JsonDataSource::from_json_str("x", doc).unwrap();
        assert!(source.samples().unwrap().is_empty());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID.as_bytes()).unwrap();
        let source = JsonDataSource::from_file(file.path()).unwrap();
        assert_eq!(source.samples().unwrap().len(), 3);
        assert_eq!(source.name(), file.path().display().to_string());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            JsonDataSource::from_file("/nonexistent/data.json"),
            Err(FitError::MalformedSource(_))
        ));
    }

    #[test]
    fn test_demo_source() {
        let demo = FixedDataSource::demo();
        assert_eq!(demo.samples().unwrap().len(), 6);
        assert_eq!(demo.confidence_probability().unwrap(), DEMO_CONFIDENCE);
        assert_eq!(demo.name(), "demo");
    }

    #[test]
    fn test_trait_object_dispatch() {
        let sources: Vec<Box<dyn DataSource>> = vec![
            Box::new(FixedDataSource::demo()),
            Box::new(JsonDataSource::from_json_str("inline", VALID).unwrap()),
        ];
        let counts: Vec<usize> = sources.iter().map(|s| s.samples().unwrap().len()).collect();
        assert_eq!(counts, vec![6, 3]);
    }
}
