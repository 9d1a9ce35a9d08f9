use super::ResolvedSizing;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Field {
    #[strum(to_string = "controllerCount")]
    DeprecatedCount,
    #[strum(to_string = "controller.count")]
    Count,
    #[strum(to_string = "controller.autoScalingGroup.minSize")]
    MinSize,
    #[strum(to_string = "controller.autoScalingGroup.maxSize")]
    MaxSize,
    #[strum(to_string = "controller.autoScalingGroup.rollingUpdateMinInstancesInService")]
    RollingUpdateMinInstancesInService,
}

impl Field {
    // `controller.count` also stands in for the top-level alias
    pub fn with_alias(&self) -> String {
        match self {
            Field::Count => format!("{} (or {})", Field::Count, Field::DeprecatedCount),
            field => field.to_string(),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{} must be zero or greater, but was {value}", .field.with_alias())]
    OutOfRange { field: Field, value: i64 },
    #[error("{} can only be specified without {other}", .field.with_alias())]
    DisjointConfiguration { field: Field, other: Field },
    #[error("{field} must be less than or equal to {bound}, but {reason}")]
    RelationalConstraint {
        field: Field,
        bound: String,
        reason: String,
    },
    #[error("Resolved controller sizing {0:?} violates its invariants")]
    InternalConsistency(ResolvedSizing),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    OutOfRange,
    DisjointConfiguration,
    RelationalConstraint,
    InternalConsistency,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::OutOfRange { .. } => ErrorKind::OutOfRange,
            Error::DisjointConfiguration { .. } => ErrorKind::DisjointConfiguration,
            Error::RelationalConstraint { .. } => ErrorKind::RelationalConstraint,
            Error::InternalConsistency(_) => ErrorKind::InternalConsistency,
        }
    }
}
