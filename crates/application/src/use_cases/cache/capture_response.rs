use crate::ports::{ClockPort, ResponseCachePort};
use ferrous_cache_domain::dns_wire::{
    next_record, PacketHeader, RecordForm, CLASS_IN, EDNS_DO_BIT, HEADER_LEN, RCODE_NOERROR,
    RCODE_NXDOMAIN, TYPE_OPT,
};
use ferrous_cache_domain::{CacheKey, DomainError, FilterOutcome};
use std::sync::Arc;
use tracing::{debug, warn};

/// Lifetime ceiling, in seconds. A response without records keeps it.
pub const MAX_TTL: u32 = 86_400;

/// Response path: mirrors cacheable responses into the store.
pub struct CaptureResponseUseCase {
    cache: Arc<dyn ResponseCachePort>,
    clock: Arc<dyn ClockPort>,
}

struct RecordScan {
    min_ttl: u32,
    dnssec_ok: bool,
}

impl CaptureResponseUseCase {
    pub fn new(cache: Arc<dyn ResponseCachePort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { cache, clock }
    }

    /// Runs the response filter. The response itself is never altered, so the
    /// only outcomes are `Pass` and a malformed-packet error.
    pub fn execute(&self, packet: &[u8]) -> Result<FilterOutcome, DomainError> {
        let header = PacketHeader::parse(packet)?;
        if header.qdcount != 1 {
            return Err(DomainError::MalformedPacket(
                "response must carry exactly one question",
            ));
        }
        if header.truncated() {
            return Ok(FilterOutcome::Pass);
        }
        let rcode = header.rcode();
        if rcode != RCODE_NOERROR && rcode != RCODE_NXDOMAIN {
            return Ok(FilterOutcome::Pass);
        }

        let question = next_record(packet, HEADER_LEN, RecordForm::Question)?;
        if question.rclass != CLASS_IN {
            return Ok(FilterOutcome::Pass);
        }

        let scan = scan_records(packet, question.end, header.record_count())?;

        let name_end = HEADER_LEN + question.name_len;
        let mut key = CacheKey::from_wire_name(&packet[HEADER_LEN..name_end], question.rtype);
        if scan.dnssec_ok {
            key.fold_dnssec_ok();
        }

        let lifetime = scan.min_ttl.max(self.cache.min_ttl());
        let now = self.clock.now_secs();
        debug!(key = %key, lifetime, rcode, len = packet.len(), "Capturing response");

        if let Err(e) = self.cache.touch_or_insert(key, packet, lifetime, now) {
            warn!(error = %e, "Response not cached");
        }

        Ok(FilterOutcome::Pass)
    }
}

/// Walks every answer, authority and additional record, keeping the smallest
/// TTL. The OPT pseudo-record contributes its DO bit instead of a TTL.
fn scan_records(packet: &[u8], start: usize, count: usize) -> Result<RecordScan, DomainError> {
    let mut scan = RecordScan {
        min_ttl: MAX_TTL,
        dnssec_ok: false,
    };

    let mut pos = start;
    for _ in 0..count {
        let record = next_record(packet, pos, RecordForm::ResourceRecord)?;
        if record.rtype == TYPE_OPT {
            scan.dnssec_ok |= record.ttl & EDNS_DO_BIT != 0;
        } else {
            scan.min_ttl = scan.min_ttl.min(record.ttl);
        }
        pos = record.end;
    }

    Ok(scan)
}
