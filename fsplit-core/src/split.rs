use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use crate::error::SplitError;
use crate::fanout::FanoutWriter;
use crate::filenames::{chunk_filename, main_name};
use crate::hasher::{resolve, ChecksumWriter, Checksummer};
use crate::manifest::{Checksum, ChecksumAlgo, FileEntry, Manifest};
use crate::pool::BufferPool;
use crate::progress::Progress;

pub struct SplitConfig {
    /// Byte budget per chunk; must be validated > 0 by the caller.
    pub chunk_size: u64,
    pub checksum_algo: ChecksumAlgo,
    pub copy_buffer_size: usize,
}

/// Splitting engine. One instance can process any number of files in
/// sequence; its buffer pool is reused across them.
pub struct Splitter {
    cfg: SplitConfig,
    pool: BufferPool,
}

impl Splitter {
    pub fn new(cfg: SplitConfig) -> Self {
        let pool = BufferPool::new(cfg.copy_buffer_size);
        Splitter { cfg, pool }
    }

    /// Split `input` into chunk files and return the populated manifest.
    /// `out_dir` must already exist. Chunk files written before a failure
    /// are left on disk; no cleanup is attempted.
    pub fn split(
        &self,
        input: &Path,
        out_dir: &Path,
        progress: &Progress,
    ) -> Result<Manifest, SplitError> {
        debug_assert!(self.cfg.chunk_size > 0);

        let mut src = File::open(input).map_err(|e| SplitError::SourceUnreadable {
            path: input.to_path_buf(),
            source: e,
        })?;
        // Size as reported at open time; not recomputed from bytes read.
        let main_size = src
            .metadata()
            .map_err(|e| SplitError::SourceUnreadable {
                path: input.to_path_buf(),
                source: e,
            })?
            .len();
        // The manifest records the path as given; chunk names derive from
        // the final component only, so chunks stay inside `out_dir`.
        let main_path = input.to_string_lossy().to_string();
        let name_seed = main_name(input);

        let new_hasher = resolve(self.cfg.checksum_algo);
        // The whole-file accumulator lives for the entire operation and is
        // fed the same bytes as the per-chunk accumulators, independently.
        let mut main_hasher: Option<Box<dyn Checksummer>> = new_hasher.map(|f| f());

        let mut buf = self.pool.get();
        let mut chunks: Vec<FileEntry> = Vec::new();
        let mut total_written: u64 = 0;
        progress.reset_bytes(main_size);

        // The copy runs before the exit check, so an empty source still
        // yields a single zero-size chunk.
        loop {
            let filename = chunk_filename(&name_seed, chunks.len());
            let path = out_dir.join(&filename);
            let mut chunk_hasher: Option<Box<dyn Checksummer>> = new_hasher.map(|f| f());

            let size = {
                let mut sink = File::create(&path).map_err(|e| SplitError::ChunkCreate {
                    path: path.clone(),
                    source: e,
                })?;
                let mut bounded = (&mut src).take(self.cfg.chunk_size);
                let copied = match (main_hasher.as_deref_mut(), chunk_hasher.as_deref_mut()) {
                    (Some(mh), Some(ch)) => {
                        let mut main_w = ChecksumWriter(mh);
                        let mut chunk_w = ChecksumWriter(ch);
                        let mut fan =
                            FanoutWriter::new(vec![&mut main_w, &mut chunk_w, &mut sink]);
                        copy_buffered(&mut bounded, &mut fan, &mut buf)
                    }
                    _ => copy_buffered(&mut bounded, &mut sink, &mut buf),
                };
                copied.map_err(|e| SplitError::CopyFailed { path: path.clone(), source: e })?
                // sink drops here, closing the chunk file on every exit path
            };

            let checksum = match chunk_hasher {
                Some(h) => h.finalize(),
                None => Checksum::default(),
            };
            chunks.push(FileEntry { filename, checksum, size });
            total_written += size;
            progress.inc_chunk();
            progress.add_bytes(size);

            if total_written == main_size {
                break;
            }
        }

        let main_checksum = match main_hasher {
            Some(h) => h.finalize(),
            None => Checksum::default(),
        };
        Ok(Manifest {
            checksum_algo: self.cfg.checksum_algo,
            main_file: FileEntry {
                filename: main_path,
                checksum: main_checksum,
                size: main_size,
            },
            chunks,
        })
    }
}

/// Copy until EOF through `buf`, returning the byte count.
fn copy_buffered(r: &mut impl Read, w: &mut impl Write, buf: &mut [u8]) -> std::io::Result<u64> {
    let mut total = 0u64;
    loop {
        let n = match r.read(buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        w.write_all(&buf[..n])?;
        total += n as u64;
    }
    Ok(total)
}
