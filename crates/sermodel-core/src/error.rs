//! Error types shared across the sermodel crates.

use std::error::Error as StdError;
use std::fmt;

/// Result alias used throughout sermodel.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for serialization, deserialization and persistence.
#[derive(Debug)]
pub enum Error {
    /// Input data does not conform to the built serializer definition.
    Validation(ValidationError),
    /// A relation field has a shape the engine cannot wire (or is not a relation).
    UnsupportedRelation {
        model: &'static str,
        field: String,
        reason: &'static str,
    },
    /// Traversal path misuse, e.g. stepping out of the root scope.
    State(String),
    /// Model metadata or payload layout is inconsistent.
    Config(String),
    /// A row referenced by key does not exist.
    NotFound { model: &'static str, key: i64 },
    /// The store refused a write.
    Persistence(String),
    /// JSON encoding or decoding failed.
    Json(serde_json::Error),
}

impl Error {
    /// Returns the validation detail if this is a validation failure.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// True for errors caused by the caller's input rather than by configuration.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(err) => write!(f, "could not deserialize: {}", err),
            Error::UnsupportedRelation {
                model,
                field,
                reason,
            } => write!(f, "unsupported relation {}.{}: {}", model, field, reason),
            Error::State(msg) => write!(f, "invalid traversal state: {}", msg),
            Error::Config(msg) => write!(f, "configuration error: {}", msg),
            Error::NotFound { model, key } => write!(f, "{} with key {} not found", model, key),
            Error::Persistence(msg) => write!(f, "persistence error: {}", msg),
            Error::Json(err) => write!(f, "json error: {}", err),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Validation(err) => Some(err),
            Error::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

/// Category of a single field problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required field was not supplied.
    Required,
    /// `null` supplied for a non-nullable field.
    Null,
    /// Value has the wrong JSON type.
    Type,
    /// Value is not one of the declared choices.
    Choice,
    /// Text is longer than the declared maximum.
    MaxLength,
    /// Text does not match the declared pattern.
    Pattern,
    /// A nested payload is not a mapping (or a list of mappings).
    Shape,
}

impl ValidationErrorKind {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            ValidationErrorKind::Required => "required",
            ValidationErrorKind::Null => "null",
            ValidationErrorKind::Type => "invalid",
            ValidationErrorKind::Choice => "invalid_choice",
            ValidationErrorKind::MaxLength => "max_length",
            ValidationErrorKind::Pattern => "pattern",
            ValidationErrorKind::Shape => "not_a_mapping",
        }
    }
}

/// One problem with one input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidationError {
    /// Dotted path from the root payload, e.g. `endpoints[1].endpoint_name`.
    pub path: String,
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// All field problems found while validating one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Model the payload was validated against.
    pub model: &'static str,
    pub errors: Vec<FieldValidationError>,
}

impl ValidationError {
    pub fn new(model: &'static str) -> Self {
        Self {
            model,
            errors: Vec::new(),
        }
    }

    /// Record a problem at `path`.
    pub fn push(
        &mut self,
        path: impl Into<String>,
        kind: ValidationErrorKind,
        message: impl Into<String>,
    ) {
        self.errors.push(FieldValidationError {
            path: path.into(),
            kind,
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Problems reported for exactly `path`.
    pub fn for_path<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a FieldValidationError> {
        self.errors.iter().filter(move |e| e.path == path)
    }

    /// Structured detail: a JSON object mapping each path to its messages.
    ///
    /// Problems with the payload as a whole are reported under `non_field_errors`.
    #[must_use]
    pub fn detail(&self) -> serde_json::Value {
        let mut detail = serde_json::Map::new();
        for err in &self.errors {
            let key = if err.path.is_empty() {
                "non_field_errors".to_string()
            } else {
                err.path.clone()
            };
            let entry = detail
                .entry(key)
                .or_insert_with(|| serde_json::Value::Array(Vec::new()));
            if let serde_json::Value::Array(messages) = entry {
                messages.push(serde_json::Value::String(err.message.clone()));
            }
        }
        serde_json::Value::Object(detail)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} payload has {} error(s)", self.model, self.errors.len())?;
        for err in &self.errors {
            write!(f, "; {}", err)?;
        }
        Ok(())
    }
}

impl StdError for ValidationError {}
