use std::fmt;

#[derive(Debug)]
pub enum FormError {
    /// Field name is not one of `fio`, `email`, `phone`
    UnknownField(String),

    /// Action key is not one of `success`, `error`, `progress`
    UnknownResponseKey(String),

    /// Scenario file or directory could not be read
    ScenarioRead { path: String, source: std::io::Error },

    /// Scenario YAML did not match the scenario model
    ScenarioParse { path: String, source: serde_yaml::Error },

    /// Report output could not be written
    ReportWrite { path: String, source: std::io::Error },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::UnknownField(name) => {
                write!(f, "Unknown form field '{}' (expected fio, email or phone)", name)
            }
            FormError::UnknownResponseKey(key) => {
                write!(f, "Unknown action '{}' (expected success, error or progress)", key)
            }
            FormError::ScenarioRead { path, source } => {
                write!(f, "Failed to read scenario {}: {}", path, source)
            }
            FormError::ScenarioParse { path, source } => {
                write!(f, "Invalid scenario {}: {}", path, source)
            }
            FormError::ReportWrite { path, source } => {
                write!(f, "Failed to write report {}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for FormError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormError::ScenarioRead { source, .. } => Some(source),
            FormError::ScenarioParse { source, .. } => Some(source),
            FormError::ReportWrite { source, .. } => Some(source),
            _ => None,
        }
    }
}
