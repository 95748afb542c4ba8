use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::error::SplitError;
use crate::hasher::{resolve, Checksummer};
use crate::manifest::Manifest;

#[derive(Debug, Clone)]
pub struct VerifyReport {
    pub chunks_ok: u64,
    pub chunks_bad: u64,
    /// Digest over all chunk bytes in manifest order matches the main file.
    pub main_ok: bool,
    /// Chunk bytes on disk sum to the recorded main file size.
    pub size_ok: bool,
}

impl VerifyReport {
    pub fn all_ok(&self) -> bool {
        self.chunks_bad == 0 && self.main_ok && self.size_ok
    }
}

/// Check the chunk files under `chunk_dir` against the splitfile at
/// `manifest_path`. Missing or mismatching chunks are counted as bad, not
/// treated as fatal.
pub fn verify(manifest_path: &Path, chunk_dir: &Path) -> Result<VerifyReport, SplitError> {
    let manifest: Manifest = serde_json::from_reader(File::open(manifest_path)?)?;
    verify_manifest(&manifest, chunk_dir)
}

pub fn verify_manifest(manifest: &Manifest, chunk_dir: &Path) -> Result<VerifyReport, SplitError> {
    let new_hasher = resolve(manifest.checksum_algo);
    let mut main_hasher: Option<Box<dyn Checksummer>> = new_hasher.map(|f| f());

    let mut chunks_ok = 0u64;
    let mut chunks_bad = 0u64;
    let mut total: u64 = 0;
    let mut buf = vec![0u8; 64 * 1024];

    for entry in &manifest.chunks {
        let path = chunk_dir.join(&entry.filename);
        let mut chunk_hasher: Option<Box<dyn Checksummer>> = new_hasher.map(|f| f());
        let mut size = 0u64;
        let mut readable = true;

        match File::open(&path) {
            Ok(mut f) => loop {
                let n = match f.read(&mut buf) {
                    Ok(0) => break,
                    Ok(n) => n,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(_) => {
                        readable = false;
                        break;
                    }
                };
                if let Some(h) = main_hasher.as_deref_mut() {
                    h.update(&buf[..n]);
                }
                if let Some(h) = chunk_hasher.as_deref_mut() {
                    h.update(&buf[..n]);
                }
                size += n as u64;
            },
            Err(_) => readable = false,
        }
        total += size;

        let digest_ok = match chunk_hasher {
            Some(h) => h.finalize() == entry.checksum,
            None => true,
        };
        if readable && size == entry.size && digest_ok {
            chunks_ok += 1;
        } else {
            chunks_bad += 1;
        }
    }

    let main_ok = match main_hasher {
        Some(h) => h.finalize() == manifest.main_file.checksum,
        None => true,
    };
    let size_ok = total == manifest.main_file.size;
    Ok(VerifyReport { chunks_ok, chunks_bad, main_ok, size_ok })
}
