use ferrous_cache_domain::DomainError;

/// A stored response and the second at which it stops being served.
#[derive(Debug)]
pub struct CacheEntry {
    response: Vec<u8>,
    expires_at: u64,
}

impl CacheEntry {
    /// Copies `response` into a buffer of its own. Fails instead of aborting
    /// when the allocator refuses the request.
    pub fn allocate(response: &[u8], expires_at: u64) -> Result<Self, DomainError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(response.len())
            .map_err(|_| DomainError::AllocationFailed(response.len()))?;
        buf.extend_from_slice(response);
        Ok(Self {
            response: buf,
            expires_at,
        })
    }

    /// Replaces the stored response, reusing the current buffer when it is
    /// large enough. On failure the entry is left untouched.
    pub fn overwrite(&mut self, response: &[u8], expires_at: u64) -> Result<(), DomainError> {
        if response.len() > self.response.capacity() {
            let mut grown = Vec::new();
            grown
                .try_reserve_exact(response.len())
                .map_err(|_| DomainError::AllocationFailed(response.len()))?;
            grown.extend_from_slice(response);
            self.response = grown;
        } else {
            self.response.clear();
            self.response.extend_from_slice(response);
        }
        self.expires_at = expires_at;
        Ok(())
    }

    #[inline]
    pub fn response(&self) -> &[u8] {
        &self.response
    }

    #[inline]
    pub fn expires_at(&self) -> u64 {
        self.expires_at
    }

    #[inline]
    pub fn is_fresh(&self, now: u64) -> bool {
        now < self.expires_at
    }
}
