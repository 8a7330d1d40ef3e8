use std::time::Duration;

use super::name::Name;
use super::tlv::{self, Element};
use super::{NetworkError, NetworkResult};

/// Lifetime used when an Interest does not carry one.
pub const DEFAULT_INTEREST_LIFETIME: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interest {
    pub name: Name,
    pub can_be_prefix: bool,
    pub must_be_fresh: bool,
    pub nonce: u32,
    pub lifetime: Duration,
}

impl Interest {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            can_be_prefix: false,
            must_be_fresh: false,
            nonce: rand::random(),
            lifetime: DEFAULT_INTEREST_LIFETIME,
        }
    }

    pub fn with_can_be_prefix(mut self, can_be_prefix: bool) -> Self {
        self.can_be_prefix = can_be_prefix;
        self
    }

    pub fn with_must_be_fresh(mut self, must_be_fresh: bool) -> Self {
        self.must_be_fresh = must_be_fresh;
        self
    }

    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn with_nonce(mut self, nonce: u32) -> Self {
        self.nonce = nonce;
        self
    }

    /// Whether `data` satisfies this Interest.
    pub fn matches(&self, data: &Data) -> bool {
        if self.can_be_prefix {
            self.name.is_prefix_of(&data.name)
        } else {
            self.name == data.name
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut value = self.name.encode();
        if self.can_be_prefix {
            tlv::write_element(&mut value, tlv::CAN_BE_PREFIX, &[]);
        }
        if self.must_be_fresh {
            tlv::write_element(&mut value, tlv::MUST_BE_FRESH, &[]);
        }
        tlv::write_element(&mut value, tlv::NONCE, &self.nonce.to_be_bytes());
        let lifetime = u64::try_from(self.lifetime.as_millis()).unwrap_or(u64::MAX);
        tlv::write_element(
            &mut value,
            tlv::INTEREST_LIFETIME,
            &tlv::non_negative_integer(lifetime),
        );

        let mut buf = Vec::with_capacity(value.len() + 4);
        tlv::write_element(&mut buf, tlv::INTEREST, &value);
        buf
    }

    /// Decodes the value of an Interest TLV. Unknown elements are skipped.
    pub fn decode(value: &[u8]) -> NetworkResult<Self> {
        let mut name = None;
        let mut interest = Interest::new(Name::new());
        for el in tlv::elements(value)? {
            match el.typ {
                tlv::NAME => name = Some(Name::decode(el.value)?),
                tlv::CAN_BE_PREFIX => interest.can_be_prefix = true,
                tlv::MUST_BE_FRESH => interest.must_be_fresh = true,
                tlv::NONCE => {
                    let bytes: [u8; 4] = el.value.try_into().map_err(|_| {
                        NetworkError::Decode("Nonce must be 4 bytes".to_string())
                    })?;
                    interest.nonce = u32::from_be_bytes(bytes);
                }
                tlv::INTEREST_LIFETIME => {
                    interest.lifetime =
                        Duration::from_millis(tlv::read_non_negative_integer(el.value)?);
                }
                _ => {}
            }
        }
        interest.name =
            name.ok_or_else(|| NetworkError::Decode("Interest without Name".to_string()))?;
        Ok(interest)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Data {
    pub name: Name,
    pub freshness_period: Option<Duration>,
    pub content: Vec<u8>,
}

impl Data {
    pub fn new(name: Name, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name,
            freshness_period: None,
            content: content.into(),
        }
    }

    pub fn with_freshness_period(mut self, period: Duration) -> Self {
        self.freshness_period = Some(period);
        self
    }

    /// Encodes the packet with a DigestSha256 signature placeholder; the
    /// signature value is not computed.
    pub fn encode(&self) -> Vec<u8> {
        let mut value = self.name.encode();
        if let Some(period) = self.freshness_period {
            let mut meta = Vec::new();
            let millis = u64::try_from(period.as_millis()).unwrap_or(u64::MAX);
            tlv::write_element(
                &mut meta,
                tlv::FRESHNESS_PERIOD,
                &tlv::non_negative_integer(millis),
            );
            tlv::write_element(&mut value, tlv::META_INFO, &meta);
        }
        tlv::write_element(&mut value, tlv::CONTENT, &self.content);
        let mut signature_info = Vec::new();
        tlv::write_element(&mut signature_info, tlv::SIGNATURE_TYPE, &[0]);
        tlv::write_element(&mut value, tlv::SIGNATURE_INFO, &signature_info);
        tlv::write_element(&mut value, tlv::SIGNATURE_VALUE, &[0; 32]);

        let mut buf = Vec::with_capacity(value.len() + 4);
        tlv::write_element(&mut buf, tlv::DATA, &value);
        buf
    }

    /// Decodes the value of a Data TLV. Signatures are not verified.
    pub fn decode(value: &[u8]) -> NetworkResult<Self> {
        let mut name = None;
        let mut freshness_period = None;
        let mut content = Vec::new();
        for el in tlv::elements(value)? {
            match el.typ {
                tlv::NAME => name = Some(Name::decode(el.value)?),
                tlv::META_INFO => {
                    for field in tlv::elements(el.value)? {
                        if field.typ == tlv::FRESHNESS_PERIOD {
                            freshness_period = Some(Duration::from_millis(
                                tlv::read_non_negative_integer(field.value)?,
                            ));
                        }
                    }
                }
                tlv::CONTENT => content = el.value.to_vec(),
                _ => {}
            }
        }
        let name = name.ok_or_else(|| NetworkError::Decode("Data without Name".to_string()))?;
        Ok(Self {
            name,
            freshness_period,
            content,
        })
    }
}

/// A packet received from the forwarder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    Interest(Interest),
    Data(Data),
    /// NDNLPv2 Nack. `name` is taken from the nacked Interest when present.
    Nack {
        name: Option<Name>,
        reason: Option<u64>,
    },
    /// Anything else, such as an LpPacket carrying only link-layer fields.
    Other(u64),
}

impl Packet {
    pub fn decode(element: &Element<'_>) -> NetworkResult<Self> {
        match element.typ {
            tlv::INTEREST => Ok(Packet::Interest(Interest::decode(element.value)?)),
            tlv::DATA => Ok(Packet::Data(Data::decode(element.value)?)),
            tlv::LP_PACKET => Self::decode_lp(element.value),
            other => Ok(Packet::Other(other)),
        }
    }

    fn decode_lp(value: &[u8]) -> NetworkResult<Self> {
        let mut nack = None;
        let mut fragment = None;
        for field in tlv::elements(value)? {
            match field.typ {
                tlv::LP_NACK => {
                    let reason = tlv::elements(field.value)?
                        .into_iter()
                        .find(|el| el.typ == tlv::LP_NACK_REASON)
                        .map(|el| tlv::read_non_negative_integer(el.value))
                        .transpose()?;
                    nack = Some(reason);
                }
                tlv::LP_FRAGMENT => fragment = Some(field.value),
                _ => {}
            }
        }

        let inner = match fragment {
            Some(bytes) => match tlv::elements(bytes)?.first() {
                Some(el) => Some(Self::decode(el)?),
                None => None,
            },
            None => None,
        };

        match (nack, inner) {
            (Some(reason), Some(Packet::Interest(interest))) => Ok(Packet::Nack {
                name: Some(interest.name),
                reason,
            }),
            (Some(reason), _) => Ok(Packet::Nack { name: None, reason }),
            (None, Some(packet)) => Ok(packet),
            (None, None) => Ok(Packet::Other(tlv::LP_PACKET)),
        }
    }
}
