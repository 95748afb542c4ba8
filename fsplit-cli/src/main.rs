use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use fsplit_core::filenames::{main_name, splitfile_filename};
use fsplit_core::manifest::ChecksumAlgo;
use fsplit_core::progress::Progress;
use fsplit_core::split::{SplitConfig, Splitter};
use fsplit_core::verify::verify;

const DEFAULT_BUFFER: usize = 32 * 1024;

#[derive(Parser)]
#[command(
    name = "fsplit",
    version,
    about = "split files into fixed-size chunks with a checksummed manifest"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Split each input into chunk files plus a .split manifest
    Split {
        /// Chunk byte budget, e.g. 512K, 100M, 2G
        #[arg(long, default_value = "100M")]
        size: String,
        /// Copy buffer size in bytes
        #[arg(long, default_value_t = DEFAULT_BUFFER)]
        buffer_size: usize,
        /// Checksum algorithm (CRC32 or None)
        #[arg(long, default_value = "CRC32")]
        checksum: ChecksumAlgo,
        /// Skip checksum computation
        #[arg(long, default_value_t = false)]
        no_checksum: bool,
        /// Skip manifest creation; implies --no-checksum
        #[arg(long, default_value_t = false)]
        no_splitfile: bool,
        /// Output directory, created if missing
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        #[arg(long, default_value_t = false)]
        progress: bool,
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Check chunk files against a .split manifest
    Verify {
        manifest: PathBuf,
        /// Directory holding the chunk files
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Split {
            size,
            buffer_size,
            checksum,
            no_checksum,
            no_splitfile,
            dir,
            progress,
            inputs,
        } => split(
            &size,
            buffer_size,
            checksum,
            no_checksum,
            no_splitfile,
            &dir,
            progress,
            &inputs,
        ),
        Cmd::Verify { manifest, dir } => verify_cmd(&manifest, &dir),
    }
}

/// Parse a human-readable byte count: bare digits or a K/M/G suffix, with
/// an optional trailing B, case-insensitive.
fn parse_size(spec: &str) -> Result<u64> {
    let up = spec.trim().to_uppercase();
    let body = up.strip_suffix('B').unwrap_or(&up);
    let (num, mul) = if let Some(n) = body.strip_suffix('K') {
        (n, 1u64 << 10)
    } else if let Some(n) = body.strip_suffix('M') {
        (n, 1u64 << 20)
    } else if let Some(n) = body.strip_suffix('G') {
        (n, 1u64 << 30)
    } else {
        (body, 1u64)
    };
    let v: u64 = num.trim().parse().map_err(|_| anyhow!("bad size {}", spec))?;
    Ok(v * mul)
}

#[allow(clippy::too_many_arguments)]
fn split(
    size: &str,
    buffer_size: usize,
    checksum: ChecksumAlgo,
    no_checksum: bool,
    no_splitfile: bool,
    dir: &Path,
    show_progress: bool,
    inputs: &[PathBuf],
) -> Result<()> {
    let chunk_size = parse_size(size)?;
    if chunk_size == 0 {
        bail!("chunk size must be > 0");
    }
    if buffer_size == 0 {
        bail!("buffer size must be > 0");
    }

    let algo = if no_checksum || no_splitfile { ChecksumAlgo::None } else { checksum };

    fs::create_dir_all(dir).with_context(|| format!("create output directory {:?}", dir))?;

    let splitter = Splitter::new(SplitConfig {
        chunk_size,
        checksum_algo: algo,
        copy_buffer_size: buffer_size,
    });
    let prog = Progress::new(show_progress);
    prog.set_stage("Splitting");
    prog.start();

    for input in inputs {
        let manifest = splitter
            .split(input, dir, &prog)
            .with_context(|| format!("split {:?}", input))?;

        if !no_splitfile {
            let mpath = dir.join(splitfile_filename(&main_name(input)));
            let mf = File::create(&mpath)
                .with_context(|| format!("create splitfile {:?}", mpath))?;
            serde_json::to_writer_pretty(mf, &manifest)
                .with_context(|| format!("encode splitfile {:?}", mpath))?;
        }
        eprintln!(
            "{}: {} chunk(s), {} bytes",
            input.display(),
            manifest.chunks.len(),
            manifest.main_file.size
        );
    }

    prog.stop();
    Ok(())
}

fn verify_cmd(manifest: &Path, dir: &Path) -> Result<()> {
    let report = verify(manifest, dir).with_context(|| format!("verify {:?}", manifest))?;
    eprintln!(
        "Chunks ok={}, bad={}; main={}; size={}",
        report.chunks_ok,
        report.chunks_bad,
        if report.main_ok { "OK" } else { "MISMATCH" },
        if report.size_ok { "OK" } else { "MISMATCH" },
    );
    if report.all_ok() {
        println!("OK");
    } else {
        println!("BAD");
    }
    Ok(())
}
