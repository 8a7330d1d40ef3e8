use std::fmt;
use std::str::FromStr;

use super::tlv;
use super::{NetworkError, NetworkResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Component {
    pub typ: u64,
    pub value: Vec<u8>,
}

impl Component {
    pub fn generic(value: impl Into<Vec<u8>>) -> Self {
        Self {
            typ: tlv::GENERIC_NAME_COMPONENT,
            value: value.into(),
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.typ != tlv::GENERIC_NAME_COMPONENT {
            write!(f, "{}=", self.typ)?;
        }
        for byte in &self.value {
            if byte.is_ascii_alphanumeric() || b"-._~".contains(byte) {
                write!(f, "{}", *byte as char)?;
            } else {
                write!(f, "%{:02X}", byte)?;
            }
        }
        Ok(())
    }
}

/// Hierarchical NDN name.
///
/// Built from a query name by splitting on `/`; empty components are
/// dropped, so `/data/ryu/` and `/data/ryu` are the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Name {
    components: Vec<Component>,
}

impl Name {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an NDN URI such as `/data/ryu/` or `ndn:/a/b%2Fc`.
    pub fn from_uri(uri: &str) -> NetworkResult<Self> {
        let path = uri.strip_prefix("ndn:").unwrap_or(uri);
        let components = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| percent_decode(segment).map(Component::generic))
            .collect::<NetworkResult<Vec<_>>>()
            .map_err(|_| NetworkError::MalformedName(uri.to_string()))?;
        Ok(Self { components })
    }

    pub fn push(&mut self, component: Component) {
        self.components.push(component);
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Name) -> bool {
        self.len() <= other.len()
            && self
                .components
                .iter()
                .zip(&other.components)
                .all(|(a, b)| a == b)
    }

    /// Full Name TLV.
    pub fn encode(&self) -> Vec<u8> {
        let mut value = Vec::new();
        for component in &self.components {
            tlv::write_element(&mut value, component.typ, &component.value);
        }
        let mut buf = Vec::with_capacity(value.len() + 4);
        tlv::write_element(&mut buf, tlv::NAME, &value);
        buf
    }

    /// Decodes the value of a Name TLV.
    pub fn decode(value: &[u8]) -> NetworkResult<Self> {
        let components = tlv::elements(value)?
            .into_iter()
            .map(|el| Component {
                typ: el.typ,
                value: el.value.to_vec(),
            })
            .collect();
        Ok(Self { components })
    }
}

impl FromStr for Name {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uri(s)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.components.is_empty() {
            return write!(f, "/");
        }
        for component in &self.components {
            write!(f, "/{}", component)?;
        }
        Ok(())
    }
}

fn percent_decode(segment: &str) -> NetworkResult<Vec<u8>> {
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = segment
                .get(i + 1..i + 3)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .ok_or_else(|| NetworkError::MalformedName(segment.to_string()))?;
            out.push(hex);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    Ok(out)
}
