use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::form::error::FormError;

// ============================================================================
// Form data: the three tracked fields and their validation state
// ============================================================================

/// One of the three inputs the form tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Fio,
    Email,
    Phone,
}

impl FieldName {
    /// All fields in validation and display order.
    pub const ALL: [FieldName; 3] = [FieldName::Fio, FieldName::Email, FieldName::Phone];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Fio => "fio",
            FieldName::Email => "email",
            FieldName::Phone => "phone",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fio" => Ok(FieldName::Fio),
            "email" => Ok(FieldName::Email),
            "phone" => Ok(FieldName::Phone),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

/// Current values of the form. Always holds exactly the three known fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub fio: String,
    pub email: String,
    pub phone: String,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Fio => &self.fio,
            FieldName::Email => &self.email,
            FieldName::Phone => &self.phone,
        }
    }

    pub fn get_mut(&mut self, field: FieldName) -> &mut String {
        match field {
            FieldName::Fio => &mut self.fio,
            FieldName::Email => &mut self.email,
            FieldName::Phone => &mut self.phone,
        }
    }

    /// SHA-1 of the three values, used to correlate trace events of one
    /// submission.
    pub fn fingerprint(&self) -> String {
        use sha1::{Digest, Sha1};

        let mut hasher = Sha1::new();
        for field in FieldName::ALL {
            hasher.update(self.get(field).as_bytes());
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }

    /// Merge a patch: non-empty patch values win, everything else keeps the
    /// current value. Phone is not reformatted here.
    pub fn merge(&mut self, patch: &FormPatch) {
        for field in FieldName::ALL {
            if let Some(value) = patch.get(field).filter(|v| !v.is_empty()) {
                *self.get_mut(field) = value.to_string();
            }
        }
    }
}

/// A partial update to the form, e.g. a single keystroke.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPatch {
    pub fio: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl FormPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch touching a single field.
    pub fn field(field: FieldName, value: impl Into<String>) -> Self {
        Self::new().with(field, value)
    }

    pub fn with(mut self, field: FieldName, value: impl Into<String>) -> Self {
        *self.slot(field) = Some(value.into());
        self
    }

    /// Build a patch from loosely named pairs. Unknown names are dropped.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |patch, (name, value)| match name.parse::<FieldName>() {
                Ok(field) => patch.with(field, value),
                Err(_) => {
                    log::debug!("ignoring unknown form field '{}'", name);
                    patch
                }
            })
    }

    pub fn from_map(values: &HashMap<String, String>) -> Self {
        Self::from_pairs(values.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        match field {
            FieldName::Fio => self.fio.as_deref(),
            FieldName::Email => self.email.as_deref(),
            FieldName::Phone => self.phone.as_deref(),
        }
    }

    fn slot(&mut self, field: FieldName) -> &mut Option<String> {
        match field {
            FieldName::Fio => &mut self.fio,
            FieldName::Email => &mut self.email,
            FieldName::Phone => &mut self.phone,
        }
    }
}

/// A field that failed its rule. The only error kind of the form layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    pub field: FieldName,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}' is invalid", self.field)
    }
}

/// Outcome of validating a whole form. Recomputed on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,

    /// Failing fields in `FieldName::ALL` order
    pub error_fields: Vec<FieldName>,
}

impl ValidationResult {
    pub fn from_error_fields(error_fields: Vec<FieldName>) -> Self {
        Self {
            is_valid: error_fields.is_empty(),
            error_fields,
        }
    }

    pub fn is_field_valid(&self, field: FieldName) -> bool {
        !self.error_fields.contains(&field)
    }

    pub fn failures(&self) -> impl Iterator<Item = ValidationFailure> + '_ {
        self.error_fields.iter().map(|&field| ValidationFailure { field })
    }
}
