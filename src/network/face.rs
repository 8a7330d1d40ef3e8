use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use super::packet::{Data, Interest, Packet};
use super::session::{ContentSession, SessionConnector};
use super::tlv;
use super::{NetworkError, NetworkResult};

pub const DEFAULT_FACE: &str = "unix:///run/nfd/nfd.sock";

/// Largest packet a forwarder will send over a stream face.
const MAX_PACKET_SIZE: usize = 8800;

/// Byte stream to the forwarder.
pub trait Transport: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> Transport for T {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaceAddress {
    Unix(PathBuf),
    Tcp(String),
}

impl FromStr for FaceAddress {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(path) = s.strip_prefix("unix://") {
            if path.is_empty() {
                return Err(NetworkError::InvalidAddress(s.to_string()));
            }
            return Ok(FaceAddress::Unix(PathBuf::from(path)));
        }
        let host = s
            .strip_prefix("tcp://")
            .or_else(|| s.strip_prefix("tcp4://"));
        match host {
            Some(host) if host.rsplit_once(':').is_some_and(|(h, p)| {
                !h.is_empty() && p.parse::<u16>().is_ok()
            }) =>
            {
                Ok(FaceAddress::Tcp(host.to_string()))
            }
            // NFD listens on 6363 by default
            Some(host) if !host.is_empty() && !host.contains(':') => {
                Ok(FaceAddress::Tcp(format!("{}:6363", host)))
            }
            _ => Err(NetworkError::InvalidAddress(s.to_string())),
        }
    }
}

impl fmt::Display for FaceAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FaceAddress::Unix(path) => write!(f, "unix://{}", path.display()),
            FaceAddress::Tcp(host) => write!(f, "tcp://{}", host),
        }
    }
}

/// Stream face to a local forwarder.
///
/// Only one Interest is outstanding at a time. Packets that do not answer it
/// are dropped.
pub struct Face {
    transport: Box<dyn Transport>,
    buffer: Vec<u8>,
}

impl Face {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            buffer: Vec::with_capacity(MAX_PACKET_SIZE),
        }
    }

    pub async fn connect(address: &FaceAddress, timeout: Duration) -> NetworkResult<Self> {
        let connect_error = |source| NetworkError::Connect {
            address: address.to_string(),
            source,
        };
        let timed_out = |_| NetworkError::ConnectTimeout {
            address: address.to_string(),
            timeout,
        };

        let face = match address {
            #[cfg(unix)]
            FaceAddress::Unix(path) => {
                let stream = tokio::time::timeout(timeout, tokio::net::UnixStream::connect(path))
                    .await
                    .map_err(timed_out)?
                    .map_err(connect_error)?;
                Face::new(stream)
            }
            #[cfg(not(unix))]
            FaceAddress::Unix(_) => return Err(NetworkError::InvalidAddress(address.to_string())),
            FaceAddress::Tcp(host) => {
                let stream = tokio::time::timeout(timeout, tokio::net::TcpStream::connect(host))
                    .await
                    .map_err(timed_out)?
                    .map_err(connect_error)?;
                stream.set_nodelay(true).map_err(connect_error)?;
                Face::new(stream)
            }
        };
        info!(%address, "connected to forwarder");
        Ok(face)
    }

    /// Reads until one complete TLV element is buffered and decodes it.
    async fn receive(&mut self) -> NetworkResult<Packet> {
        let mut chunk = [0u8; MAX_PACKET_SIZE];
        loop {
            let decoded = match tlv::element(&self.buffer) {
                Ok((rest, el)) => Some((self.buffer.len() - rest.len(), Packet::decode(&el))),
                Err(nom::Err::Incomplete(_)) => None,
                Err(nom::Err::Error(e) | nom::Err::Failure(e)) => {
                    return Err(NetworkError::Decode(format!(
                        "bad TLV framing: {:?}",
                        e.code
                    )))
                }
            };
            if let Some((consumed, packet)) = decoded {
                self.buffer.drain(..consumed);
                return packet;
            }

            let n = self.transport.read(&mut chunk).await?;
            if n == 0 {
                return Err(NetworkError::Closed);
            }
            self.buffer.extend_from_slice(&chunk[..n]);
        }
    }

    async fn wait_for(&mut self, interest: &Interest) -> NetworkResult<Data> {
        loop {
            match self.receive().await? {
                Packet::Data(data) if interest.matches(&data) => return Ok(data),
                Packet::Nack { name, reason } => {
                    let ours = match &name {
                        Some(name) => *name == interest.name,
                        None => true,
                    };
                    if ours {
                        return Err(NetworkError::Nack {
                            name: interest.name.to_string(),
                            reason,
                        });
                    }
                }
                other => debug!(?other, "dropping unsolicited packet"),
            }
        }
    }
}

#[async_trait]
impl ContentSession for Face {
    async fn express_interest(&mut self, interest: &Interest) -> NetworkResult<Data> {
        debug!(name = %interest.name, lifetime = ?interest.lifetime, "expressing interest");
        self.transport.write_all(&interest.encode()).await?;
        self.transport.flush().await?;

        tokio::time::timeout(interest.lifetime, self.wait_for(interest))
            .await
            .map_err(|_| NetworkError::Timeout {
                name: interest.name.to_string(),
                lifetime: interest.lifetime,
            })?
    }

    async fn close(&mut self) -> NetworkResult<()> {
        self.transport.shutdown().await?;
        Ok(())
    }
}

/// Connects a [`Face`] to the configured forwarder address.
#[derive(Debug, Clone)]
pub struct FaceConnector {
    address: String,
    connect_timeout: Duration,
}

impl FaceConnector {
    pub fn new(address: impl Into<String>, connect_timeout: Duration) -> Self {
        Self {
            address: address.into(),
            connect_timeout,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

#[async_trait]
impl SessionConnector for FaceConnector {
    async fn open(&self) -> NetworkResult<Box<dyn ContentSession>> {
        let address: FaceAddress = self.address.parse()?;
        let face = Face::connect(&address, self.connect_timeout).await?;
        Ok(Box::new(face))
    }
}
