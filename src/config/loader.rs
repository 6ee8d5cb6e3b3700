//! Load experiment specifications from YAML

use super::schema::ExperimentSpec;
use super::validate::validate_config;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read, parse and validate an experiment file
pub fn load_spec<P: AsRef<Path>>(path: P) -> Result<ExperimentSpec> {
    let path = path.as_ref();
    let yaml = fs::read_to_string(path).map_err(|e| {
        Error::ConfigError(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    parse_spec(&yaml)
}

/// Parse and validate an experiment from a YAML string
pub fn parse_spec(yaml: &str) -> Result<ExperimentSpec> {
    let spec: ExperimentSpec = serde_yaml::from_str(yaml)?;
    validate_config(&spec)?;
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_spec_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "data:\n  samples: 200\ntraining:\n  batch_size: 8\n  epochs: 2").unwrap();

        let spec = load_spec(file.path()).unwrap();
        assert_eq!(spec.data.samples, 200);
        assert_eq!(spec.training.batch_size, Some(8));
        assert_eq!(spec.training.epochs, 2);
    }

    #[test]
    fn test_load_spec_missing_file() {
        let err = load_spec("/nonexistent/experiment.yaml").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
        assert!(err.to_string().contains("/nonexistent/experiment.yaml"));
    }

    #[test]
    fn test_parse_spec_invalid_yaml() {
        let err = parse_spec("training: [not, a, map").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn test_parse_spec_fails_validation() {
        let err = parse_spec("training:\n  epochs: 0\n").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
