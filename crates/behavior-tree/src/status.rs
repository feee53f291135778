//! Status returned by behavior nodes.

/// The result of evaluating a behavior node.
///
/// A tick never suspends: conditions answer immediately and actions either
/// record their intent in the context or decline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The condition held, or the action was committed.
    Success,

    /// The condition did not hold, or the action declined.
    Failure,
}

impl Status {
    /// Maps a boolean outcome onto a status.
    #[inline]
    pub fn from_bool(ok: bool) -> Self {
        if ok { Status::Success } else { Status::Failure }
    }

    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bool_maps_both_ways() {
        assert_eq!(Status::from_bool(true), Status::Success);
        assert_eq!(Status::from_bool(false), Status::Failure);
        assert!(Status::from_bool(false).is_failure());
    }
}
