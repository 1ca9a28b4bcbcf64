/// DNS wire-format names
///
/// ENS carries names inside `resolve(bytes,bytes)` in DNS wire format: each
/// label is prefixed by its length and the name ends with a zero-length label.
use thiserror::Error;

/// Longest label allowed by the wire format
pub const MAX_LABEL_LEN: usize = 63;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsNameError {
    #[error("encoded name is empty")]
    Empty,

    #[error("label at offset {offset} runs past the end of the name")]
    LabelOverrun { offset: usize },

    #[error("encoded name is not terminated by a zero-length label")]
    MissingTerminator,

    #[error("{0} trailing bytes after the terminating label")]
    TrailingBytes(usize),

    #[error("label at offset {offset} contains a dot")]
    DotInLabel { offset: usize },

    #[error("label at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },

    #[error("name {0:?} contains an empty label")]
    EmptyLabel(String),

    #[error("label {label:?} is {len} bytes long, the limit is 63")]
    LabelTooLong { label: String, len: usize },
}

/// Encode a dotted name into DNS wire format. The empty name encodes to a
/// single zero byte.
pub fn encode(name: &str) -> Result<Vec<u8>, DnsNameError> {
    let mut out = Vec::with_capacity(name.len() + 2);

    if !name.is_empty() {
        for label in name.split('.') {
            if label.is_empty() {
                return Err(DnsNameError::EmptyLabel(name.to_string()));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(DnsNameError::LabelTooLong {
                    label: label.to_string(),
                    len: label.len(),
                });
            }
            out.push(label.len() as u8);
            out.extend_from_slice(label.as_bytes());
        }
    }

    out.push(0);
    Ok(out)
}

/// Decode a DNS wire-format name into its dotted form
pub fn decode(encoded: &[u8]) -> Result<String, DnsNameError> {
    if encoded.is_empty() {
        return Err(DnsNameError::Empty);
    }

    let mut labels: Vec<&str> = Vec::new();
    let mut offset = 0;

    loop {
        let Some(&len) = encoded.get(offset) else {
            return Err(DnsNameError::MissingTerminator);
        };
        let len = len as usize;

        if len == 0 {
            let rest = encoded.len() - offset - 1;
            if rest != 0 {
                return Err(DnsNameError::TrailingBytes(rest));
            }
            break;
        }

        let start = offset + 1;
        let end = start + len;
        let raw = encoded
            .get(start..end)
            .ok_or(DnsNameError::LabelOverrun { offset })?;

        if raw.contains(&b'.') {
            return Err(DnsNameError::DotInLabel { offset });
        }
        let label = std::str::from_utf8(raw).map_err(|_| DnsNameError::InvalidUtf8 { offset })?;

        labels.push(label);
        offset = end;
    }

    Ok(labels.join("."))
}
