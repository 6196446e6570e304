//! `.ggtape` input recordings.
//!
//! Layout (little endian):
//!
//! | offset | size | field |
//! |--------|------|-------|
//! | 0      | 4    | magic `GGTP` |
//! | 4      | 1    | version |
//! | 5      | 3    | reserved, zero |
//! | 8      | 4    | frame count |
//! | 12     | 4*n  | frames: pad mask, gun flags, aim x, aim y |
//! | 12+4n  | 2    | final score |
//! | 14+4n  | 2    | high score |
//! | 16+4n  | 4    | CRC-32 of every preceding byte |

use std::fmt;

use serde::{Deserialize, Serialize};

pub const TAPE_MAGIC: u32 = u32::from_le_bytes(*b"GGTP");
pub const TAPE_VERSION: u8 = 1;
pub const TAPE_HEADER_SIZE: usize = 12;
pub const FRAME_RECORD_SIZE: usize = 4;
pub const TAPE_FOOTER_SIZE: usize = 8;

pub const GUN_TRIGGER: u8 = 0x01;
const GUN_RESERVED_MASK: u8 = !GUN_TRIGGER;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapeFrame {
    pub pad: u8,
    pub trigger: bool,
    pub aim_x: u8,
    pub aim_y: u8,
}

impl TapeFrame {
    pub fn buttons(pad: u8) -> Self {
        Self {
            pad,
            ..Self::default()
        }
    }

    #[inline]
    fn gun_flags(self) -> u8 {
        if self.trigger {
            GUN_TRIGGER
        } else {
            0
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapeFooter {
    pub final_score: u16,
    pub high_score: u16,
    pub checksum: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tape {
    pub version: u8,
    pub frames: Vec<TapeFrame>,
    pub footer: TapeFooter,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TapeError {
    TooShort { actual: usize, min: usize },
    InvalidMagic { found: u32 },
    UnsupportedVersion { found: u8 },
    HeaderReservedNonZero,
    FrameCountOutOfRange { frame_count: u32, max_frames: u32 },
    LengthMismatch { expected: usize, actual: usize },
    ReservedGunBitsNonZero { frame: u32, flags: u8 },
    CrcMismatch { stored: u32, computed: u32 },
}

impl fmt::Display for TapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { actual, min } => {
                write!(f, "tape too short: got {actual} bytes, need at least {min}")
            }
            Self::InvalidMagic { found } => write!(f, "invalid tape magic: 0x{found:08x}"),
            Self::UnsupportedVersion { found } => write!(f, "unsupported tape version: {found}"),
            Self::HeaderReservedNonZero => write!(f, "header reserved bytes are non-zero"),
            Self::FrameCountOutOfRange {
                frame_count,
                max_frames,
            } => write!(
                f,
                "frame count out of range: {frame_count} (allowed 1..={max_frames})"
            ),
            Self::LengthMismatch { expected, actual } => write!(
                f,
                "tape length mismatch: expected {expected} bytes, got {actual}"
            ),
            Self::ReservedGunBitsNonZero { frame, flags } => write!(
                f,
                "gun flags reserved bits set at frame {frame}: 0x{flags:02x}"
            ),
            Self::CrcMismatch { stored, computed } => write!(
                f,
                "crc mismatch: stored=0x{stored:08x}, computed=0x{computed:08x}"
            ),
        }
    }
}

impl std::error::Error for TapeError {}

pub fn parse_tape(bytes: &[u8], max_frames: u32) -> Result<Tape, TapeError> {
    let min_len = TAPE_HEADER_SIZE + TAPE_FOOTER_SIZE;
    if bytes.len() < min_len {
        return Err(TapeError::TooShort {
            actual: bytes.len(),
            min: min_len,
        });
    }

    let magic = read_u32_le(bytes, 0);
    if magic != TAPE_MAGIC {
        return Err(TapeError::InvalidMagic { found: magic });
    }

    let version = bytes[4];
    if version != TAPE_VERSION {
        return Err(TapeError::UnsupportedVersion { found: version });
    }
    if bytes[5..8].iter().any(|&byte| byte != 0) {
        return Err(TapeError::HeaderReservedNonZero);
    }

    let frame_count = read_u32_le(bytes, 8);
    if frame_count == 0 || frame_count > max_frames {
        return Err(TapeError::FrameCountOutOfRange {
            frame_count,
            max_frames,
        });
    }

    let body_end = TAPE_HEADER_SIZE + frame_count as usize * FRAME_RECORD_SIZE;
    let expected_len = body_end + TAPE_FOOTER_SIZE;
    if bytes.len() != expected_len {
        return Err(TapeError::LengthMismatch {
            expected: expected_len,
            actual: bytes.len(),
        });
    }

    let frames = bytes[TAPE_HEADER_SIZE..body_end]
        .chunks_exact(FRAME_RECORD_SIZE)
        .enumerate()
        .map(|(index, record)| {
            let flags = record[1];
            if flags & GUN_RESERVED_MASK != 0 {
                return Err(TapeError::ReservedGunBitsNonZero {
                    frame: index as u32,
                    flags,
                });
            }
            Ok(TapeFrame {
                pad: record[0],
                trigger: flags & GUN_TRIGGER != 0,
                aim_x: record[2],
                aim_y: record[3],
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let final_score = read_u16_le(bytes, body_end);
    let high_score = read_u16_le(bytes, body_end + 2);
    let checksum = read_u32_le(bytes, body_end + 4);

    let computed = crc32(&bytes[..body_end + 4]);
    if checksum != computed {
        return Err(TapeError::CrcMismatch {
            stored: checksum,
            computed,
        });
    }

    Ok(Tape {
        version,
        frames,
        footer: TapeFooter {
            final_score,
            high_score,
            checksum,
        },
    })
}

pub fn serialize_tape(frames: &[TapeFrame], final_score: u16, high_score: u16) -> Vec<u8> {
    let body_end = TAPE_HEADER_SIZE + frames.len() * FRAME_RECORD_SIZE;
    let mut data = vec![0u8; body_end + TAPE_FOOTER_SIZE];

    write_u32_le(&mut data, 0, TAPE_MAGIC);
    data[4] = TAPE_VERSION;
    write_u32_le(&mut data, 8, frames.len() as u32);

    for (record, frame) in data[TAPE_HEADER_SIZE..body_end]
        .chunks_exact_mut(FRAME_RECORD_SIZE)
        .zip(frames)
    {
        record.copy_from_slice(&[frame.pad, frame.gun_flags(), frame.aim_x, frame.aim_y]);
    }

    data[body_end..body_end + 2].copy_from_slice(&final_score.to_le_bytes());
    data[body_end + 2..body_end + 4].copy_from_slice(&high_score.to_le_bytes());

    let checksum = crc32(&data[..body_end + 4]);
    write_u32_le(&mut data, body_end + 4, checksum);

    data
}

#[inline]
fn read_u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

#[inline]
fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[inline]
fn write_u32_le(bytes: &mut [u8], offset: usize, value: u32) {
    bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

const CRC_TABLE: [u32; 256] = build_crc_table();

const fn build_crc_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;

    while i < 256 {
        let mut c = i as u32;
        let mut j = 0;

        while j < 8 {
            c = if (c & 1) != 0 {
                0xEDB8_8320u32 ^ (c >> 1)
            } else {
                c >> 1
            };
            j += 1;
        }

        table[i] = c;
        i += 1;
    }

    table
}

pub fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;

    for byte in data {
        let idx = ((crc ^ (*byte as u32)) & 0xFF) as usize;
        crc = CRC_TABLE[idx] ^ (crc >> 8);
    }

    crc ^ 0xFFFF_FFFFu32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frames() -> Vec<TapeFrame> {
        vec![
            TapeFrame::buttons(0x10),
            TapeFrame {
                pad: 0x01,
                trigger: true,
                aim_x: 64,
                aim_y: 200,
            },
            TapeFrame::default(),
        ]
    }

    #[test]
    fn crc_matches_known_vector() {
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn magic_spells_ggtp() {
        let bytes = serialize_tape(&sample_frames(), 0, 0);
        assert_eq!(&bytes[..4], b"GGTP");
    }

    #[test]
    fn roundtrip_small_tape() {
        let frames = sample_frames();
        let bytes = serialize_tape(&frames, 321, 999);
        assert_eq!(
            bytes.len(),
            TAPE_HEADER_SIZE + frames.len() * FRAME_RECORD_SIZE + TAPE_FOOTER_SIZE
        );

        let tape = parse_tape(&bytes, 100).unwrap();
        assert_eq!(tape.frames, frames);
        assert_eq!(tape.footer.final_score, 321);
        assert_eq!(tape.footer.high_score, 999);
    }

    #[test]
    fn rejects_tape_too_short() {
        let bytes = [0u8; TAPE_HEADER_SIZE + TAPE_FOOTER_SIZE - 1];
        assert!(matches!(
            parse_tape(&bytes, 100),
            Err(TapeError::TooShort { .. })
        ));
    }

    #[test]
    fn rejects_invalid_magic() {
        let mut bytes = serialize_tape(&sample_frames(), 0, 0);
        bytes[0] ^= 0x01;
        assert!(matches!(
            parse_tape(&bytes, 100),
            Err(TapeError::InvalidMagic { .. })
        ));
    }

    #[test]
    fn rejects_unsupported_version() {
        let mut bytes = serialize_tape(&sample_frames(), 0, 0);
        bytes[4] = TAPE_VERSION + 1;
        assert_eq!(
            parse_tape(&bytes, 100),
            Err(TapeError::UnsupportedVersion {
                found: TAPE_VERSION + 1
            })
        );
    }

    #[test]
    fn rejects_reserved_header_bytes() {
        let mut bytes = serialize_tape(&sample_frames(), 0, 0);
        bytes[6] = 1;
        assert_eq!(parse_tape(&bytes, 100), Err(TapeError::HeaderReservedNonZero));
    }

    #[test]
    fn rejects_frame_count_above_limit() {
        let bytes = serialize_tape(&sample_frames(), 0, 0);
        assert_eq!(
            parse_tape(&bytes, 2),
            Err(TapeError::FrameCountOutOfRange {
                frame_count: 3,
                max_frames: 2
            })
        );
    }

    #[test]
    fn rejects_truncated_body() {
        let bytes = serialize_tape(&sample_frames(), 0, 0);
        assert!(matches!(
            parse_tape(&bytes[..bytes.len() - 1], 100),
            Err(TapeError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn rejects_reserved_gun_bits() {
        let mut bytes = serialize_tape(&sample_frames(), 0, 0);
        bytes[TAPE_HEADER_SIZE + FRAME_RECORD_SIZE + 1] |= 0x80;
        assert_eq!(
            parse_tape(&bytes, 100),
            Err(TapeError::ReservedGunBitsNonZero {
                frame: 1,
                flags: 0x81
            })
        );
    }

    #[test]
    fn rejects_corrupted_footer_score() {
        let mut bytes = serialize_tape(&sample_frames(), 5, 5);
        let footer = TAPE_HEADER_SIZE + 3 * FRAME_RECORD_SIZE;
        bytes[footer] ^= 0x02;
        assert!(matches!(
            parse_tape(&bytes, 100),
            Err(TapeError::CrcMismatch { .. })
        ));
    }
}
