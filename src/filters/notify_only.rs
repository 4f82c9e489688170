//! Filter admitting only records whose message is one of a set of error types.

use std::any::TypeId;
use std::collections::HashSet;

use super::RecordFilter;
use crate::log_record::LogRecord;
use crate::notifiable::Notifiable;

/// Pass records whose message is an error of an allowed runtime type.
///
/// Plain-text records never pass. Membership is by exact type; there is no
/// notion of subtyping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotifyOnlyFilter {
    allowed: HashSet<TypeId>,
}

impl NotifyOnlyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit errors of type `T` as well.
    pub fn allow<T: Notifiable>(mut self) -> Self {
        self.allowed.insert(TypeId::of::<T>());
        self
    }

    pub fn from_type_ids(ids: impl IntoIterator<Item = TypeId>) -> Self {
        Self {
            allowed: ids.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    pub fn admits(&self, err: &dyn Notifiable) -> bool {
        self.allowed.contains(&err.type_key())
    }
}

impl RecordFilter for NotifyOnlyFilter {
    fn should_log(&self, record: &LogRecord) -> bool {
        record
            .message
            .as_notifiable()
            .is_some_and(|err| self.admits(&**err))
    }
}
