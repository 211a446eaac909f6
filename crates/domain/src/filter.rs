/// Disposition returned by the query and response filters.
///
/// Malformed packets are reported through `Err(DomainError::MalformedPacket)`
/// rather than a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Leave the packet as it is and let the host continue.
    Pass,
    /// The caller's buffer now holds a complete answer of `len` bytes that
    /// should be sent back directly instead of forwarding the query.
    Replaced { len: usize },
}

impl FilterOutcome {
    pub fn is_replaced(&self) -> bool {
        matches!(self, FilterOutcome::Replaced { .. })
    }
}
