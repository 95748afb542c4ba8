use std::io::{self, Write};

use crate::manifest::{Checksum, ChecksumAlgo};

/// Streaming checksum accumulator over one span of bytes.
pub trait Checksummer {
    fn update(&mut self, data: &[u8]);
    fn finalize(self: Box<Self>) -> Checksum;
}

/// Constructor yielding a freshly initialized accumulator per call.
/// Accumulators are never shared or reused across distinct spans.
pub type ChecksummerFn = fn() -> Box<dyn Checksummer>;

struct Crc32Checksummer(crc32fast::Hasher);

impl Checksummer for Crc32Checksummer {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> Checksum {
        Checksum::new(self.0.finalize().to_be_bytes().to_vec())
    }
}

fn new_crc32() -> Box<dyn Checksummer> {
    Box::new(Crc32Checksummer(crc32fast::Hasher::new()))
}

/// Map an algorithm to its accumulator constructor. `None` means no hashing
/// was requested and disables all checksum plumbing downstream.
pub fn resolve(algo: ChecksumAlgo) -> Option<ChecksummerFn> {
    match algo {
        ChecksumAlgo::None => None,
        ChecksumAlgo::Crc32 => Some(new_crc32),
    }
}

/// Adapter feeding writes into an accumulator; never fails.
pub struct ChecksumWriter<'a>(pub &'a mut dyn Checksummer);

impl Write for ChecksumWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
