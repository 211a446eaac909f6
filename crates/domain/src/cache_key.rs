use smallvec::SmallVec;
use std::fmt;

/// Cache key: the wire-encoded query name, lower-cased, plus the query type.
///
/// The name keeps its wire encoding (length-prefixed labels, root label or
/// compression pointer included) so that keys compare by exact byte length.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    name: SmallVec<[u8; 64]>,
    record_type: u16,
}

impl CacheKey {
    pub fn from_wire_name(wire_name: &[u8], record_type: u16) -> Self {
        let mut name = SmallVec::from_slice(wire_name);
        name.make_ascii_lowercase();
        Self { name, record_type }
    }

    /// Folds the EDNS0 "DNSSEC OK" bit into the key by upper-casing the byte
    /// just before the name terminator.
    ///
    /// Returns the index and the new value of that byte so the caller can
    /// mirror it into the wire name. Names shorter than two bytes cannot carry
    /// the marker, and neither can a byte that has no upper-case form.
    pub fn fold_dnssec_ok(&mut self) -> Option<(usize, u8)> {
        if self.name.len() < 2 {
            return None;
        }
        let idx = self.name.len() - 2;
        self.name[idx] = self.name[idx].to_ascii_uppercase();
        Some((idx, self.name[idx]))
    }

    pub fn wire_name(&self) -> &[u8] {
        &self.name
    }

    pub fn record_type(&self) -> u16 {
        self.record_type
    }
}

impl fmt::Display for CacheKey {
    /// Renders the name in presentation form followed by the numeric type,
    /// e.g. `example.com./1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.name;
        let mut pos = 0;
        while pos < name.len() {
            let label_len = name[pos] as usize;
            if label_len == 0 {
                break;
            }
            if label_len & 0xC0 == 0xC0 {
                f.write_str("<ptr>")?;
                break;
            }
            let end = (pos + 1 + label_len).min(name.len());
            for &b in &name[pos + 1..end] {
                if b.is_ascii_graphic() && b != b'.' {
                    write!(f, "{}", b as char)?;
                } else {
                    write!(f, "\\{:03}", b)?;
                }
            }
            f.write_str(".")?;
            pos = end;
        }
        if pos == 0 {
            f.write_str(".")?;
        }
        write!(f, "/{}", self.record_type)
    }
}
