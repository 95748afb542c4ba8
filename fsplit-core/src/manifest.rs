use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SplitError;

/// Checksum algorithm applied to every digest in one splitfile.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChecksumAlgo {
    None,
    #[serde(rename = "CRC32")]
    Crc32,
}

impl ChecksumAlgo {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecksumAlgo::None => "None",
            ChecksumAlgo::Crc32 => "CRC32",
        }
    }
}

impl fmt::Display for ChecksumAlgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChecksumAlgo {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(ChecksumAlgo::None),
            "crc32" => Ok(ChecksumAlgo::Crc32),
            _ => Err(SplitError::UnsupportedAlgo(s.to_string())),
        }
    }
}

/// Raw digest bytes. Serialized as lowercase hex, two characters per byte,
/// no separators; empty when the algorithm is `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Checksum(Vec<u8>);

impl Checksum {
    pub fn new(bytes: Vec<u8>) -> Self {
        Checksum(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        const LUT: &[u8; 16] = b"0123456789abcdef";
        let mut s = String::with_capacity(self.0.len() * 2);
        for &b in &self.0 {
            s.push(LUT[(b >> 4) as usize] as char);
            s.push(LUT[(b & 0xF) as usize] as char);
        }
        s
    }

    /// Exact inverse of `to_hex`. Uppercase digits are accepted.
    pub fn from_hex(text: &str) -> Result<Self, SplitError> {
        if text.len() % 2 != 0 {
            return Err(SplitError::MalformedChecksum(format!(
                "odd length {}",
                text.len()
            )));
        }
        let mut bytes = Vec::with_capacity(text.len() / 2);
        for pair in text.as_bytes().chunks(2) {
            match (nibble(pair[0]), nibble(pair[1])) {
                (Some(hi), Some(lo)) => bytes.push((hi << 4) | lo),
                _ => {
                    return Err(SplitError::MalformedChecksum(format!(
                        "invalid hex in {:?}",
                        text
                    )))
                }
            }
        }
        Ok(Checksum(bytes))
    }
}

fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Serialize for Checksum {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Checksum {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let text = String::deserialize(de)?;
        Checksum::from_hex(&text).map_err(de::Error::custom)
    }
}

/// One file, either the main file or a single chunk.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FileEntry {
    /// Original filename at split time, or the derived chunk name.
    pub filename: String,
    pub checksum: Checksum,
    pub size: u64,
}

/// In-memory form of a `.split` file. `chunks` order is the concatenation
/// order needed to recreate the main file.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Manifest {
    pub checksum_algo: ChecksumAlgo,
    pub main_file: FileEntry,
    pub chunks: Vec<FileEntry>,
}
