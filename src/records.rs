/// Static name records served by the gateway
///
/// Records are loaded once from a JSON document keyed by name:
///
/// ```json
/// {
///   "alice.eth": {
///     "addr": "0x8ba1f109551bD432803012645Ac136ddd64DBA72",
///     "coins": { "0": "0x00143d1e1e3a8cb5b8f3a9ad9b2e6a1f07e0ccd6fa32" },
///     "text": { "url": "https://alice.example" }
///   }
/// }
/// ```
use crate::error::{GatewayError, GatewayResult};
use crate::lookup::Lookup;
use alloy_primitives::{Address, U256};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// SLIP-44 coin type of Ether; served from the `addr` record when no
/// explicit coin entry exists (ENSIP-9)
pub const COIN_TYPE_ETH: u64 = 60;

/// Source of raw lookup results
pub trait RecordSource {
    /// Raw result bytes for a lookup, before ABI encoding
    fn resolve(&self, lookup: &Lookup) -> GatewayResult<Vec<u8>>;
}

/// Records document entry as written in JSON
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNameRecords {
    addr: Option<String>,
    #[serde(default)]
    coins: HashMap<String, String>,
    #[serde(default)]
    text: HashMap<String, String>,
}

/// Validated records of one name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameRecords {
    pub addr: Option<Address>,
    pub coins: HashMap<U256, Vec<u8>>,
    pub text: HashMap<String, String>,
}

impl TryFrom<RawNameRecords> for NameRecords {
    type Error = GatewayError;

    fn try_from(raw: RawNameRecords) -> GatewayResult<Self> {
        let addr = raw
            .addr
            .map(|value| {
                let bytes = decode_record_hex("addr", &value)?;
                if bytes.len() != 20 {
                    return Err(GatewayError::Records(format!(
                        "addr record {} is not a 20-byte address",
                        value
                    )));
                }
                Ok(Address::from_slice(&bytes))
            })
            .transpose()?;

        let mut coins = HashMap::with_capacity(raw.coins.len());
        for (coin_type, value) in raw.coins {
            let parsed: U256 = coin_type.parse().map_err(|_| {
                GatewayError::Records(format!("coin type {} is not a number", coin_type))
            })?;
            coins.insert(parsed, decode_record_hex("coin", &value)?);
        }

        Ok(Self {
            addr,
            coins,
            text: raw.text,
        })
    }
}

fn decode_record_hex(field: &str, value: &str) -> GatewayResult<Vec<u8>> {
    hex::decode(value.strip_prefix("0x").unwrap_or(value)).map_err(|e| {
        GatewayError::Records(format!("{} record {} is not valid hex: {}", field, value, e))
    })
}

/// In-memory record store
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    names: HashMap<String, NameRecords>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a records document
    pub fn from_json(json: &str) -> GatewayResult<Self> {
        let raw: HashMap<String, RawNameRecords> = serde_json::from_str(json)?;

        let mut store = Self::new();
        for (name, records) in raw {
            store.insert(&name, records.try_into()?);
        }
        Ok(store)
    }

    /// Load a records document from disk
    pub fn load(path: &Path) -> GatewayResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            GatewayError::Records(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Add or replace the records of a name. Names are case-insensitive.
    pub fn insert(&mut self, name: &str, records: NameRecords) {
        self.names.insert(name.to_lowercase(), records);
    }

    pub fn get(&self, name: &str) -> Option<&NameRecords> {
        self.names.get(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl RecordSource for RecordStore {
    fn resolve(&self, lookup: &Lookup) -> GatewayResult<Vec<u8>> {
        let records = self
            .get(lookup.name())
            .ok_or_else(|| GatewayError::NameNotFound(lookup.name().to_string()))?;

        let result = match lookup {
            Lookup::Addr(_) => records.addr.unwrap_or(Address::ZERO).to_vec(),
            Lookup::MulticoinAddr(l) => {
                let coin_type = l.coin_type();
                match records.coins.get(&coin_type) {
                    Some(value) => value.clone(),
                    None if coin_type == U256::from(COIN_TYPE_ETH) => {
                        records.addr.map(|a| a.to_vec()).unwrap_or_default()
                    }
                    None => Vec::new(),
                }
            }
            Lookup::Text(l) => records
                .text
                .get(l.key())
                .map(|v| v.as_bytes().to_vec())
                .unwrap_or_default(),
        };

        Ok(result)
    }
}
