//! Wire layout of the bulb control protocol.
//!
//! Only the byte layout lives here: a fixed 36-byte little-endian header
//! followed by up to [`MAX_PAYLOAD_LEN`] payload bytes. Interpreting payloads
//! and answering requests is left to the transport that owns the socket.
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0 | 2 | total size |
//! | 2 | 2 | protocol tag |
//! | 4 | 4 | reserved |
//! | 8 | 6 | bulb address |
//! | 14 | 2 | reserved |
//! | 16 | 6 | site |
//! | 22 | 2 | reserved |
//! | 24 | 8 | timestamp |
//! | 32 | 2 | packet type |
//! | 34 | 2 | reserved |

use heapless::Vec;

/// Header length in bytes.
pub const HEADER_LEN: usize = 36;

/// Largest payload a packet may carry.
pub const MAX_PAYLOAD_LEN: usize = 128;

/// Length of the fixed label and tag label strings.
pub const LABEL_LEN: usize = 32;

/// Length of the tags bitmask.
pub const TAGS_LEN: usize = 8;

/// UDP port bulbs listen on.
pub const LIFX_PORT: u16 = 56700;

/// Protocol tag carried in every header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Protocol {
    /// Broadcast response from a bulb.
    AllBulbsResponse = 0x5400,
    /// Broadcast request to all bulbs.
    AllBulbsRequest = 0x3400,
    /// Command addressed to one bulb.
    BulbCommand = 0x1400,
}

impl TryFrom<u16> for Protocol {
    type Error = PacketError;

    fn try_from(tag: u16) -> Result<Self, Self::Error> {
        match tag {
            0x5400 => Ok(Protocol::AllBulbsResponse),
            0x3400 => Ok(Protocol::AllBulbsRequest),
            0x1400 => Ok(Protocol::BulbCommand),
            other => Err(PacketError::UnknownProtocol(other)),
        }
    }
}

/// Known packet types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum PacketType {
    GetPanGateway = 0x02,
    PanGateway = 0x03,
    GetMeshFirmwareState = 0x0e,
    MeshFirmwareState = 0x0f,
    GetWifiFirmwareState = 0x12,
    WifiFirmwareState = 0x13,
    GetPowerState = 0x14,
    SetPowerState = 0x15,
    PowerState = 0x16,
    GetBulbLabel = 0x17,
    SetBulbLabel = 0x18,
    BulbLabel = 0x19,
    GetTags = 0x1a,
    SetTags = 0x1b,
    Tags = 0x1c,
    GetTagLabels = 0x1d,
    SetTagLabels = 0x1e,
    TagLabels = 0x1f,
    GetVersionState = 0x20,
    VersionState = 0x21,
    GetLightState = 0x65,
    SetLightState = 0x66,
    LightStatus = 0x6b,
}

impl PacketType {
    const ALL: [PacketType; 23] = [
        PacketType::GetPanGateway,
        PacketType::PanGateway,
        PacketType::GetMeshFirmwareState,
        PacketType::MeshFirmwareState,
        PacketType::GetWifiFirmwareState,
        PacketType::WifiFirmwareState,
        PacketType::GetPowerState,
        PacketType::SetPowerState,
        PacketType::PowerState,
        PacketType::GetBulbLabel,
        PacketType::SetBulbLabel,
        PacketType::BulbLabel,
        PacketType::GetTags,
        PacketType::SetTags,
        PacketType::Tags,
        PacketType::GetTagLabels,
        PacketType::SetTagLabels,
        PacketType::TagLabels,
        PacketType::GetVersionState,
        PacketType::VersionState,
        PacketType::GetLightState,
        PacketType::SetLightState,
        PacketType::LightStatus,
    ];

    /// Looks up a packet type code.
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| *kind as u16 == code)
    }
}

/// Packet layout errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Fewer bytes than a header.
    TooShort(usize),

    /// The size field disagrees with the bytes available.
    SizeMismatch { declared: usize, actual: usize },

    /// Payload longer than [`MAX_PAYLOAD_LEN`].
    PayloadTooLarge(usize),

    /// Protocol tag is not one of the known values.
    UnknownProtocol(u16),

    /// Output buffer cannot hold the encoded packet.
    BufferTooSmall { needed: usize, available: usize },

    /// A label field is not valid UTF-8.
    InvalidLabel,
}

impl core::fmt::Display for PacketError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PacketError::TooShort(len) => {
                write!(f, "packet of {} bytes is shorter than the {} byte header", len, HEADER_LEN)
            }
            PacketError::SizeMismatch { declared, actual } => {
                write!(f, "header declares {} bytes but {} are available", declared, actual)
            }
            PacketError::PayloadTooLarge(len) => {
                write!(f, "payload of {} bytes exceeds {} bytes", len, MAX_PAYLOAD_LEN)
            }
            PacketError::UnknownProtocol(tag) => {
                write!(f, "unknown protocol tag {:#06x}", tag)
            }
            PacketError::BufferTooSmall { needed, available } => {
                write!(f, "buffer of {} bytes cannot hold {} bytes", available, needed)
            }
            PacketError::InvalidLabel => {
                write!(f, "label is not valid UTF-8")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PacketError {}

/// Fixed 36-byte packet header. Reserved fields are written as zero and ignored on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PacketHeader {
    /// Total packet size, header included.
    pub size: u16,
    pub protocol: Protocol,
    pub bulb_address: [u8; 6],
    pub site: [u8; 6],
    pub timestamp: u64,
    /// Raw packet type code. See [`PacketHeader::packet_type`].
    pub packet_type: u16,
}

impl PacketHeader {
    /// Decoded packet type, if known.
    pub fn packet_type(&self) -> Option<PacketType> {
        PacketType::from_code(self.packet_type)
    }

    /// Writes the header into the first [`HEADER_LEN`] bytes of `out`.
    pub fn encode(&self, out: &mut [u8; HEADER_LEN]) {
        out.fill(0);
        out[0..2].copy_from_slice(&self.size.to_le_bytes());
        out[2..4].copy_from_slice(&(self.protocol as u16).to_le_bytes());
        out[8..14].copy_from_slice(&self.bulb_address);
        out[16..22].copy_from_slice(&self.site);
        out[24..32].copy_from_slice(&self.timestamp.to_le_bytes());
        out[32..34].copy_from_slice(&self.packet_type.to_le_bytes());
    }

    /// Reads a header from the first [`HEADER_LEN`] bytes of `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self, PacketError> {
        let Some(header) = bytes.first_chunk::<HEADER_LEN>() else {
            return Err(PacketError::TooShort(bytes.len()));
        };

        Ok(Self {
            size: u16::from_le_bytes([header[0], header[1]]),
            protocol: Protocol::try_from(u16::from_le_bytes([header[2], header[3]]))?,
            bulb_address: array(&header[8..14]),
            site: array(&header[16..22]),
            timestamp: u64::from_le_bytes(array(&header[24..32])),
            packet_type: u16::from_le_bytes([header[32], header[33]]),
        })
    }
}

#[inline]
fn array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}

/// A header plus its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub header: PacketHeader,
    pub payload: Vec<u8, MAX_PAYLOAD_LEN>,
}

impl Packet {
    /// Builds a packet with zeroed addresses and timestamp.
    pub fn new(
        protocol: Protocol,
        packet_type: PacketType,
        payload: &[u8],
    ) -> Result<Self, PacketError> {
        let payload: Vec<u8, MAX_PAYLOAD_LEN> = Vec::from_slice(payload)
            .map_err(|_| PacketError::PayloadTooLarge(payload.len()))?;

        Ok(Self {
            header: PacketHeader {
                size: (HEADER_LEN + payload.len()) as u16,
                protocol,
                bulb_address: [0; 6],
                site: [0; 6],
                timestamp: 0,
                packet_type: packet_type as u16,
            },
            payload,
        })
    }

    /// Encoded length in bytes.
    pub fn len(&self) -> usize {
        HEADER_LEN + self.payload.len()
    }

    /// Always false; a packet has at least a header.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Encodes the packet into `out`, returning the number of bytes written.
    ///
    /// The size field is rewritten from the actual payload length.
    pub fn encode(&self, out: &mut [u8]) -> Result<usize, PacketError> {
        let len = self.len();
        if out.len() < len {
            return Err(PacketError::BufferTooSmall {
                needed: len,
                available: out.len(),
            });
        }

        let header = PacketHeader {
            size: len as u16,
            ..self.header
        };
        let Some((head, rest)) = out.split_first_chunk_mut::<HEADER_LEN>() else {
            return Err(PacketError::BufferTooSmall {
                needed: len,
                available: out.len(),
            });
        };
        header.encode(head);
        rest[..self.payload.len()].copy_from_slice(&self.payload);

        Ok(len)
    }

    /// Decodes a packet. Bytes past the declared size are ignored.
    pub fn decode(bytes: &[u8]) -> Result<Self, PacketError> {
        let header = PacketHeader::decode(bytes)?;
        let declared = usize::from(header.size);

        if declared < HEADER_LEN || declared > bytes.len() {
            return Err(PacketError::SizeMismatch {
                declared,
                actual: bytes.len(),
            });
        }

        let body = &bytes[HEADER_LEN..declared];
        let payload: Vec<u8, MAX_PAYLOAD_LEN> =
            Vec::from_slice(body).map_err(|_| PacketError::PayloadTooLarge(body.len()))?;

        Ok(Self { header, payload })
    }
}

/// Packs a label into its fixed, NUL-padded field. Longer labels are cut at a character boundary.
pub fn label_bytes(label: &str) -> [u8; LABEL_LEN] {
    let mut end = label.len().min(LABEL_LEN);
    while !label.is_char_boundary(end) {
        end -= 1;
    }

    let mut out = [0u8; LABEL_LEN];
    out[..end].copy_from_slice(&label.as_bytes()[..end]);
    out
}

/// Reads a NUL-padded label field.
pub fn label_str(bytes: &[u8; LABEL_LEN]) -> Result<&str, PacketError> {
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(LABEL_LEN);
    core::str::from_utf8(&bytes[..end]).map_err(|_| PacketError::InvalidLabel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_fields_land_at_fixed_offsets() {
        let header = PacketHeader {
            size: 38,
            protocol: Protocol::BulbCommand,
            bulb_address: [1, 2, 3, 4, 5, 6],
            site: [7, 8, 9, 10, 11, 12],
            timestamp: 0x0102_0304_0506_0708,
            packet_type: PacketType::SetPowerState as u16,
        };

        let mut out = [0xAAu8; HEADER_LEN];
        header.encode(&mut out);

        assert_eq!(&out[0..2], &[38, 0]);
        assert_eq!(&out[2..4], &[0x00, 0x14]);
        assert_eq!(&out[4..8], &[0; 4]);
        assert_eq!(&out[8..14], &[1, 2, 3, 4, 5, 6]);
        assert_eq!(&out[16..22], &[7, 8, 9, 10, 11, 12]);
        assert_eq!(&out[24..32], &[8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(&out[32..36], &[0x15, 0, 0, 0]);
    }

    #[test]
    fn unknown_type_is_kept_raw() {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0] = HEADER_LEN as u8;
        bytes[3] = 0x34;
        bytes[32] = 0xEE;

        let header = PacketHeader::decode(&bytes).unwrap();
        assert_eq!(header.protocol, Protocol::AllBulbsRequest);
        assert_eq!(header.packet_type, 0xEE);
        assert_eq!(header.packet_type(), None);
    }
}
