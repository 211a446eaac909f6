use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The packet violates a bound of the DNS wire format. The host must not
    /// forward a packet that produced this error.
    #[error("Malformed DNS packet: {0}")]
    MalformedPacket(&'static str),

    #[error("Failed to allocate {0} bytes for cached response")]
    AllocationFailed(usize),
}

impl DomainError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, DomainError::MalformedPacket(_))
    }
}
