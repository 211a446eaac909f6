use crate::ports::{CacheLookup, ClockPort, ResponseCachePort};
use ferrous_cache_domain::dns_wire::{
    self, next_record, PacketHeader, RecordForm, CLASS_IN, EDNS_DO_BIT, HEADER_LEN,
    TTL_OFFSET_AFTER_NAME, TYPE_OPT,
};
use ferrous_cache_domain::{CacheKey, DomainError, FilterOutcome};
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::debug;

/// Query path: answers a query from the cache when a fresh response exists.
pub struct ServeCachedResponseUseCase {
    cache: Arc<dyn ResponseCachePort>,
    clock: Arc<dyn ClockPort>,
}

impl ServeCachedResponseUseCase {
    pub fn new(cache: Arc<dyn ResponseCachePort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { cache, clock }
    }

    /// Runs the query filter over `buf[..len]`.
    ///
    /// `buf.len()` is the largest answer the caller can send back. On
    /// [`FilterOutcome::Replaced`] the buffer holds the synthesized answer; on
    /// [`FilterOutcome::Pass`] the query is forwarded as it now stands, which
    /// includes the DNSSEC marker written into its question name.
    pub fn execute(&self, buf: &mut [u8], len: usize) -> Result<FilterOutcome, DomainError> {
        if len > buf.len() {
            return Err(DomainError::MalformedPacket(
                "declared length exceeds packet buffer",
            ));
        }

        let query = &buf[..len];
        let header = PacketHeader::parse(query)?;
        if header.qdcount != 1 || header.arcount > 1 {
            return Err(DomainError::MalformedPacket(
                "query must carry one question and at most one additional record",
            ));
        }

        let question = next_record(query, HEADER_LEN, RecordForm::Question)?;
        if question.rclass != CLASS_IN {
            return Ok(FilterOutcome::Pass);
        }

        let name_end = HEADER_LEN + question.name_len;
        let mut key = CacheKey::from_wire_name(&query[HEADER_LEN..name_end], question.rtype);

        if header.arcount == 1 {
            let additional = next_record(query, question.end, RecordForm::ResourceRecord)?;
            if additional.rtype != TYPE_OPT {
                return Ok(FilterOutcome::Pass);
            }
            if additional.ttl & EDNS_DO_BIT != 0 {
                if let Some((idx, marker)) = key.fold_dnssec_ok() {
                    buf[HEADER_LEN + idx] = marker;
                }
            }
        }

        let qname: SmallVec<[u8; 64]> = SmallVec::from_slice(&buf[HEADER_LEN..name_end]);
        let now = self.clock.now_secs();

        match self.cache.copy_fresh(&key, now, buf) {
            CacheLookup::Hit {
                len: answer_len,
                expires_at,
            } => {
                let remaining = u32::try_from(expires_at.saturating_sub(now)).unwrap_or(u32::MAX);
                synthesize_answer(&mut buf[..answer_len], header.id, &qname, remaining)?;
                debug!(key = %key, remaining_ttl = remaining, "Serving response from cache");
                Ok(FilterOutcome::Replaced { len: answer_len })
            }
            CacheLookup::Expired => {
                debug!(key = %key, "Cached response expired");
                Ok(FilterOutcome::Pass)
            }
            CacheLookup::Oversized { len: stored_len } => {
                debug!(
                    key = %key,
                    stored_len,
                    max_len = buf.len(),
                    "Cached response does not fit the packet buffer"
                );
                Ok(FilterOutcome::Pass)
            }
            CacheLookup::Miss => Ok(FilterOutcome::Pass),
        }
    }
}

/// Rewrites a copied response in place so it answers the incoming query:
/// transaction ID, question name bytes, and the TTL of every record after the
/// question. OPT pseudo-records keep their flags.
fn synthesize_answer(
    answer: &mut [u8],
    id: u16,
    qname: &[u8],
    ttl: u32,
) -> Result<(), DomainError> {
    let header = PacketHeader::parse(answer)?;
    if HEADER_LEN + qname.len() > answer.len() {
        return Err(DomainError::MalformedPacket(
            "cached question shorter than query name",
        ));
    }

    dns_wire::write_u16(answer, 0, id);
    answer[HEADER_LEN..HEADER_LEN + qname.len()].copy_from_slice(qname);

    let question = next_record(answer, HEADER_LEN, RecordForm::Question)?;
    let mut pos = question.end;
    for _ in 0..header.record_count() {
        let record = next_record(answer, pos, RecordForm::ResourceRecord)?;
        if record.rtype != TYPE_OPT {
            dns_wire::write_u32(answer, pos + record.name_len + TTL_OFFSET_AFTER_NAME, ttl);
        }
        pos = record.end;
    }

    Ok(())
}
