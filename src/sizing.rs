pub mod error;

use error::{Error, Field};
use serde::Serialize;
use std::convert::TryFrom;
use tracing::{debug, error};

pub type Result<T> = std::result::Result<T, error::Error>;

pub const DEFAULT_MIN_COUNT: u64 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawSizingInput {
    pub count: Option<i64>,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub min_instances_in_service: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSizing {
    min_count: u64,
    max_count: u64,
    rolling_update_min_instances_in_service: u64,
}

impl ResolvedSizing {
    pub fn min_count(&self) -> u64 {
        self.min_count
    }

    pub fn max_count(&self) -> u64 {
        self.max_count
    }

    pub fn rolling_update_min_instances_in_service(&self) -> u64 {
        self.rolling_update_min_instances_in_service
    }

    fn is_consistent(&self) -> bool {
        self.min_count <= self.max_count
            && self.rolling_update_min_instances_in_service < self.max_count
    }
}

/// `count` excludes every other field. Without it, `minSize` needs a
/// `maxSize`, a lone `maxSize` gets a floor of [`DEFAULT_MIN_COUNT`], and the
/// rolling update floor defaults to one below `maxSize`.
pub fn resolve(input: RawSizingInput) -> Result<ResolvedSizing> {
    if input.count.is_some() {
        let others = [
            (Field::MinSize, input.min),
            (Field::MaxSize, input.max),
            (
                Field::RollingUpdateMinInstancesInService,
                input.min_instances_in_service,
            ),
        ];

        if let Some((other, _)) = others.iter().find(|(_, value)| value.is_some()) {
            return Err(Error::DisjointConfiguration {
                field: Field::Count,
                other: *other,
            });
        }
    }

    let count = non_negative(Field::Count, input.count)?;
    let min = non_negative(Field::MinSize, input.min)?;
    let max = non_negative(Field::MaxSize, input.max)?;
    let min_in_service = non_negative(
        Field::RollingUpdateMinInstancesInService,
        input.min_instances_in_service,
    )?;

    let (min, max) = match (count, min, max) {
        (Some(count), _, _) => (count, count),
        (None, None, None) => (DEFAULT_MIN_COUNT, DEFAULT_MIN_COUNT),
        (None, None, Some(max)) => (DEFAULT_MIN_COUNT, max),
        (None, Some(_), None) => {
            return Err(min_size_error(format!("{} is not specified", Field::MaxSize)));
        }
        (None, Some(min), Some(max)) => (min, max),
    };

    if min > max {
        let reason = match input.min {
            Some(_) => format!("{} > {}", min, max),
            None => format!("the default minimum of {} exceeds {}", min, max),
        };

        return Err(min_size_error(reason));
    }

    let min_in_service = match min_in_service {
        Some(value) if value < max => value,
        Some(value) => {
            return Err(min_in_service_error(format!("{} >= {}", value, max)));
        }
        None => max.checked_sub(1).ok_or_else(|| {
            let source = if count.is_some() {
                Field::Count
            } else {
                Field::MaxSize
            };

            Error::RelationalConstraint {
                field: Field::RollingUpdateMinInstancesInService,
                bound: format!("{} - 1", source),
                reason: format!(
                    "{} is 0, which leaves no room for a rolling update",
                    source.with_alias()
                ),
            }
        })?,
    };

    let resolved = ResolvedSizing {
        min_count: min,
        max_count: max,
        rolling_update_min_instances_in_service: min_in_service,
    };

    if !resolved.is_consistent() {
        error!(?resolved, "Resolved controller sizing violates its invariants");
        return Err(Error::InternalConsistency(resolved));
    }

    debug!(
        min = resolved.min_count,
        max = resolved.max_count,
        min_in_service = resolved.rolling_update_min_instances_in_service,
        "Resolved controller sizing"
    );

    Ok(resolved)
}

fn non_negative(field: Field, value: Option<i64>) -> Result<Option<u64>> {
    value
        .map(|v| u64::try_from(v).map_err(|_| Error::OutOfRange { field, value: v }))
        .transpose()
}

fn min_size_error(reason: String) -> Error {
    Error::RelationalConstraint {
        field: Field::MinSize,
        bound: Field::MaxSize.to_string(),
        reason,
    }
}

fn min_in_service_error(reason: String) -> Error {
    Error::RelationalConstraint {
        field: Field::RollingUpdateMinInstancesInService,
        bound: format!("{} - 1", Field::MaxSize),
        reason,
    }
}
