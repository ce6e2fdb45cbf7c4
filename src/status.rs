//! # Unit Status
//!
//! Workload status reported for a charm unit.

use crate::descriptor::CharmDescriptor;
use crate::error::DescriptorError;
use std::fmt;

/// Status a unit reports to the orchestration runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitStatus {
    /// The unit is ready and serving
    Active,
    /// Operator intervention is needed before the unit can proceed
    Blocked(String),
    /// Waiting on something outside the unit, such as a relation
    Waiting(String),
    /// The unit is busy with setup or upgrade work
    Maintenance(String),
}

impl UnitStatus {
    /// Status for the outcome of loading the descriptor
    ///
    /// A loaded descriptor is the only precondition for the unit to go active.
    pub fn from_descriptor_check(result: &Result<CharmDescriptor, DescriptorError>) -> Self {
        match result {
            Ok(_) => UnitStatus::Active,
            Err(e) => UnitStatus::Blocked(format!("invalid charm descriptor: {e}")),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            UnitStatus::Active => "active",
            UnitStatus::Blocked(_) => "blocked",
            UnitStatus::Waiting(_) => "waiting",
            UnitStatus::Maintenance(_) => "maintenance",
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            UnitStatus::Active => "",
            UnitStatus::Blocked(message)
            | UnitStatus::Waiting(message)
            | UnitStatus::Maintenance(message) => message,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, UnitStatus::Active)
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message().is_empty() {
            f.write_str(self.name())
        } else {
            write!(f, "{}: {}", self.name(), self.message())
        }
    }
}
