use crate::field::DataType;
use chrono::Weekday;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("{entity} already has {what}")]
    Capacity { entity: String, what: &'static str },

    #[error("identity error: {message}")]
    Identity { message: String },

    #[error("calendar '{calendar}' marks {day} as DEFAULT but has no base calendar")]
    Resolution { calendar: String, day: Weekday },

    #[error("field {field} holds {expected:?} values, got {found:?}")]
    FieldType {
        field: &'static str,
        expected: DataType,
        found: DataType,
    },

    #[error("{kind} index {index} is out of range")]
    FieldIndex { kind: &'static str, index: usize },

    #[error("{kind} no longer exists")]
    UnknownEntity { kind: &'static str },

    #[error("invalid outline structure: {message}")]
    Structure { message: String },

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProjectError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn identity(message: impl Into<String>) -> Self {
        Self::Identity {
            message: message.into(),
        }
    }

    pub fn structure(message: impl Into<String>) -> Self {
        Self::Structure {
            message: message.into(),
        }
    }
}

pub type ProjectResult<T> = Result<T, ProjectError>;
