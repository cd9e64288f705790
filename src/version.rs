//! Version comparison.
//!
//! The installed runtime is "older" than a required version when the
//! host's three-way comparator says so. [`is_older_than`] is a thin
//! mapping over a [`VersionComparator`]; precedence rules belong to the
//! comparator, not to this module.

use std::cmp::Ordering;

use crate::error::{Result, RuntimeError};
use crate::wide::encode_wide;

/// A three-way version comparator.
///
/// Implementations return -1, 0 or 1 when `a` is older than, equal to or
/// newer than `b`. Any other value is treated as a fault by callers.
pub trait VersionComparator {
    /// Compare `a` against `b`.
    fn compare(&self, a: &str, b: &str) -> Result<i32>;
}

/// Returns true if `installed` is older than `required`.
///
/// Both strings must be encodable for a native call, even when the
/// comparator in use is not native, so behaviour does not depend on the
/// host.
pub fn is_older_than(
    comparator: &dyn VersionComparator,
    installed: &str,
    required: &str,
) -> Result<bool> {
    encode_wide(installed, "installed version")?;
    encode_wide(required, "required version")?;

    let result = comparator.compare(installed, required)?;
    tracing::debug!(installed, required, result, "compared runtime versions");

    match result {
        -1 => Ok(true),
        0 | 1 => Ok(false),
        other => Err(RuntimeError::ComparisonFault {
            installed: installed.to_string(),
            required: required.to_string(),
            detail: format!("comparator returned {}", other),
        }),
    }
}

/// Dotted numeric ordering used where no host comparator exists.
///
/// Components are compared left to right as unsigned integers. Missing
/// trailing components count as zero, so `90.0` equals `90.0.0.0`. There
/// are no pre-release or build-metadata rules: a component that is not a
/// plain number makes the version invalid.
#[derive(Debug, Clone, Copy, Default)]
pub struct DottedComparator;

impl DottedComparator {
    fn parse(version: &str) -> Option<Vec<u64>> {
        if version.trim().is_empty() {
            return None;
        }
        version
            .trim()
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    None
                } else {
                    part.parse().ok()
                }
            })
            .collect()
    }

    fn fault(a: &str, b: &str, bad: &str) -> RuntimeError {
        RuntimeError::ComparisonFault {
            installed: a.to_string(),
            required: b.to_string(),
            detail: format!("'{}' is not a dotted numeric version", bad),
        }
    }
}

impl VersionComparator for DottedComparator {
    fn compare(&self, a: &str, b: &str) -> Result<i32> {
        let left = Self::parse(a).ok_or_else(|| Self::fault(a, b, a))?;
        let right = Self::parse(b).ok_or_else(|| Self::fault(a, b, b))?;

        let len = left.len().max(right.len());
        for i in 0..len {
            let l = left.get(i).copied().unwrap_or(0);
            let r = right.get(i).copied().unwrap_or(0);
            match l.cmp(&r) {
                Ordering::Less => return Ok(-1),
                Ordering::Greater => return Ok(1),
                Ordering::Equal => {}
            }
        }
        Ok(0)
    }
}
