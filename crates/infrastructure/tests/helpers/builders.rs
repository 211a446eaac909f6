use ferrous_cache_domain::dns_wire::{next_record, PacketHeader, RecordForm, HEADER_LEN};

pub const TYPE_A: u16 = 1;
pub const TYPE_AAAA: u16 = 28;

pub fn encode_name(domain: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in domain.split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0x00);
    out
}

fn push_opt(buf: &mut Vec<u8>, do_bit: bool) {
    buf.push(0x00);
    buf.extend_from_slice(&[0x00, 41]);
    buf.extend_from_slice(&[0x10, 0x00]);
    let flags: u32 = if do_bit { 0x8000 } else { 0 };
    buf.extend_from_slice(&flags.to_be_bytes());
    buf.extend_from_slice(&[0x00, 0x00]);
}

/// Standard query with RD set. `opt` adds an OPT record with the given DO bit.
pub fn query(id: u16, domain: &str, qtype: u16, opt: Option<bool>) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&id.to_be_bytes());
    buf.extend_from_slice(&[0x01, 0x00]);
    buf.extend_from_slice(&1u16.to_be_bytes());
    buf.extend_from_slice(&0u16.to_be_bytes());
    buf.extend_from_slice(&0u16.to_be_bytes());
    buf.extend_from_slice(&(opt.is_some() as u16).to_be_bytes());
    buf.extend_from_slice(&encode_name(domain));
    buf.extend_from_slice(&qtype.to_be_bytes());
    buf.extend_from_slice(&[0x00, 0x01]);
    if let Some(do_bit) = opt {
        push_opt(&mut buf, do_bit);
    }
    buf
}

/// NOERROR response with one A record per TTL, each pointing at the question
/// name.
pub fn response(id: u16, domain: &str, qtype: u16, ttls: &[u32]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&id.to_be_bytes());
    buf.extend_from_slice(&[0x81, 0x80]);
    buf.extend_from_slice(&1u16.to_be_bytes());
    buf.extend_from_slice(&(ttls.len() as u16).to_be_bytes());
    buf.extend_from_slice(&0u16.to_be_bytes());
    buf.extend_from_slice(&0u16.to_be_bytes());
    buf.extend_from_slice(&encode_name(domain));
    buf.extend_from_slice(&qtype.to_be_bytes());
    buf.extend_from_slice(&[0x00, 0x01]);
    for (i, ttl) in ttls.iter().enumerate() {
        buf.extend_from_slice(&[0xC0, 0x0C]);
        buf.extend_from_slice(&TYPE_A.to_be_bytes());
        buf.extend_from_slice(&[0x00, 0x01]);
        buf.extend_from_slice(&ttl.to_be_bytes());
        buf.extend_from_slice(&4u16.to_be_bytes());
        buf.extend_from_slice(&[198, 51, 100, i as u8 + 1]);
    }
    buf
}

/// `(type, ttl)` of every record after the question.
pub fn read_record_ttls(packet: &[u8]) -> Vec<(u16, u32)> {
    let header = PacketHeader::parse(packet).unwrap();
    let mut pos = next_record(packet, HEADER_LEN, RecordForm::Question)
        .unwrap()
        .end;
    let mut out = Vec::new();
    for _ in 0..header.record_count() {
        let record = next_record(packet, pos, RecordForm::ResourceRecord).unwrap();
        out.push((record.rtype, record.ttl));
        pos = record.end;
    }
    out
}
