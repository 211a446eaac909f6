//! Minimal DNS wire-format cursor.
//!
//! These functions never decode names or record data. They only measure
//! encoded lengths and pull the fixed-width fields the cache needs (type,
//! class, TTL), with every read bounds-checked against the buffer.

use crate::errors::DomainError;

pub const HEADER_LEN: usize = 12;

/// Smallest message that can carry a header plus one question.
pub const MIN_PACKET_LEN: usize = 15;

/// Upper bound on the accumulated label bytes of one encoded name.
pub const MAX_NAME_LEN: usize = 256;

pub const CLASS_IN: u16 = 1;
pub const TYPE_OPT: u16 = 41;

/// "DNSSEC OK" bit inside the OPT record's TTL field (RFC 3225).
pub const EDNS_DO_BIT: u32 = 0x8000;

pub const RCODE_NOERROR: u8 = 0;
pub const RCODE_NXDOMAIN: u8 = 3;

const FLAG_TC: u16 = 0x0200;
const RCODE_MASK: u16 = 0x000F;

/// Byte offset of the TTL field relative to the end of a record's owner name.
pub const TTL_OFFSET_AFTER_NAME: usize = 4;

/// Fixed-width header fields of a DNS message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    pub id: u16,
    pub flags: u16,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl PacketHeader {
    /// Reads the header of a message that is expected to carry a question.
    pub fn parse(buf: &[u8]) -> Result<Self, DomainError> {
        if buf.len() < MIN_PACKET_LEN {
            return Err(DomainError::MalformedPacket(
                "packet shorter than header plus question",
            ));
        }

        Ok(Self {
            id: read_u16(buf, 0),
            flags: read_u16(buf, 2),
            qdcount: read_u16(buf, 4),
            ancount: read_u16(buf, 6),
            nscount: read_u16(buf, 8),
            arcount: read_u16(buf, 10),
        })
    }

    pub fn truncated(&self) -> bool {
        self.flags & FLAG_TC != 0
    }

    pub fn rcode(&self) -> u8 {
        (self.flags & RCODE_MASK) as u8
    }

    /// Number of resource records following the question section.
    pub fn record_count(&self) -> usize {
        self.ancount as usize + self.nscount as usize + self.arcount as usize
    }
}

/// Which field-set follows the owner name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordForm {
    /// QTYPE + QCLASS.
    Question,
    /// TYPE + CLASS + TTL + RDLENGTH + RDATA.
    ResourceRecord,
}

/// Fields extracted while stepping over one question or resource record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFields {
    /// Encoded length of the owner name as it appears on the wire.
    pub name_len: usize,
    /// Offset of the first byte after this record.
    pub end: usize,
    pub rtype: u16,
    pub rclass: u16,
    /// Always zero for questions.
    pub ttl: u32,
}

/// Skips an encoded name starting at `offset` and returns the offset just past it.
///
/// A compression pointer ends the name and is never followed. The name may
/// not end at the very end of the buffer, because fixed fields always follow.
pub fn skip_name(buf: &[u8], offset: usize) -> Result<usize, DomainError> {
    let len = buf.len();
    if len < 1 || offset >= len - 1 {
        return Err(DomainError::MalformedPacket("name starts past end of packet"));
    }

    let mut pos = offset;
    let mut name_len = 0usize;
    loop {
        let label_len = buf[pos] as usize;
        if label_len & 0xC0 == 0xC0 {
            if len - pos < 2 {
                return Err(DomainError::MalformedPacket("truncated compression pointer"));
            }
            pos += 2;
            break;
        }
        if label_len >= len - pos - 1 {
            return Err(DomainError::MalformedPacket("label runs past end of packet"));
        }
        name_len += label_len + 1;
        if name_len > MAX_NAME_LEN {
            return Err(DomainError::MalformedPacket("name exceeds 256 octets"));
        }
        pos += label_len + 1;
        if label_len == 0 {
            break;
        }
    }

    if pos >= len {
        return Err(DomainError::MalformedPacket("name ends at end of packet"));
    }
    Ok(pos)
}

/// Steps over one question or resource record starting at `offset`.
pub fn next_record(
    buf: &[u8],
    offset: usize,
    form: RecordForm,
) -> Result<RecordFields, DomainError> {
    let mut pos = skip_name(buf, offset)?;
    let name_len = pos - offset;

    let fixed_len = match form {
        RecordForm::Question => 4,
        RecordForm::ResourceRecord => 10,
    };
    if fixed_len > buf.len() - pos {
        return Err(DomainError::MalformedPacket("record header runs past end of packet"));
    }

    let rtype = read_u16(buf, pos);
    let rclass = read_u16(buf, pos + 2);
    pos += 4;

    let mut ttl = 0;
    if form == RecordForm::ResourceRecord {
        ttl = read_u32(buf, pos);
        let rdlen = read_u16(buf, pos + 4) as usize;
        pos += 6;
        if rdlen > buf.len() - pos {
            return Err(DomainError::MalformedPacket("record data runs past end of packet"));
        }
        pos += rdlen;
    }

    Ok(RecordFields {
        name_len,
        end: pos,
        rtype,
        rclass,
        ttl,
    })
}

#[inline]
pub fn read_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_be_bytes([buf[at], buf[at + 1]])
}

#[inline]
pub fn read_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

#[inline]
pub fn write_u16(buf: &mut [u8], at: usize, value: u16) {
    buf[at..at + 2].copy_from_slice(&value.to_be_bytes());
}

#[inline]
pub fn write_u32(buf: &mut [u8], at: usize, value: u32) {
    buf[at..at + 4].copy_from_slice(&value.to_be_bytes());
}
