//! Trace and IQ record storage
//!
//! Versioned little-endian binary records with bit-exact round-trips,
//! plus CSV export for spreadsheets. Byte-level encode/decode is split
//! from the file wrappers so tests can round-trip in memory.
//!
//! **Trace record layout** (version 1):
//! - u32 format version
//! - u32 sample count
//! - per sample: f64 frequency, f64 amplitude
//!
//! **IQ record layout** (version 1):
//! - u32 format version
//! - f64 sample rate
//! - u32 sample count
//! - per sample: f32 I, f32 Q

use std::fs;
use std::path::Path;

use snafu::ResultExt;

use crate::error::{Error, IoSnafu, Result};
use crate::trace::{IqBlock, SpectrumTrace};
use rustfft::num_complex::Complex;

const FORMAT_VERSION: u32 = 1;

/// Serialize a trace to its binary record.
pub fn trace_to_bytes(trace: &SpectrumTrace) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(8 + trace.len() * 16);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&(trace.len() as u32).to_le_bytes());
    for (&freq, &amp) in trace.frequencies.iter().zip(trace.amplitudes.iter()) {
        bytes.extend_from_slice(&freq.to_le_bytes());
        bytes.extend_from_slice(&amp.to_le_bytes());
    }
    bytes
}

/// Deserialize a trace record, verifying the version tag.
pub fn trace_from_bytes(bytes: &[u8]) -> Result<SpectrumTrace> {
    let mut reader = Reader::new(bytes);
    let version = reader.read_u32()?;
    if version != FORMAT_VERSION {
        return Err(Error::UnsupportedFormat { version });
    }

    let count = reader.read_u32()? as usize;
    // The header count is untrusted; a corrupt record must fail before
    // it drives an allocation.
    reader.check_room(count, 16)?;
    let mut frequencies = Vec::with_capacity(count);
    let mut amplitudes = Vec::with_capacity(count);
    for _ in 0..count {
        frequencies.push(reader.read_f64()?);
        amplitudes.push(reader.read_f64()?);
    }
    Ok(SpectrumTrace::new(frequencies, amplitudes))
}

/// Serialize an IQ block to its binary record.
pub fn iq_to_bytes(block: &IqBlock) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(16 + block.len() * 8);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&block.sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(block.len() as u32).to_le_bytes());
    for sample in &block.samples {
        bytes.extend_from_slice(&sample.re.to_le_bytes());
        bytes.extend_from_slice(&sample.im.to_le_bytes());
    }
    bytes
}

/// Deserialize an IQ record, verifying the version tag.
pub fn iq_from_bytes(bytes: &[u8]) -> Result<IqBlock> {
    let mut reader = Reader::new(bytes);
    let version = reader.read_u32()?;
    if version != FORMAT_VERSION {
        return Err(Error::UnsupportedFormat { version });
    }

    let sample_rate = reader.read_f64()?;
    let count = reader.read_u32()? as usize;
    reader.check_room(count, 8)?;
    let mut samples = Vec::with_capacity(count);
    for _ in 0..count {
        let re = reader.read_f32()?;
        let im = reader.read_f32()?;
        samples.push(Complex::new(re, im));
    }
    Ok(IqBlock::new(samples, sample_rate))
}

pub fn save_trace<P: AsRef<Path>>(path: P, trace: &SpectrumTrace) -> Result<()> {
    fs::write(path, trace_to_bytes(trace)).context(IoSnafu)
}

pub fn load_trace<P: AsRef<Path>>(path: P) -> Result<SpectrumTrace> {
    let bytes = fs::read(path).context(IoSnafu)?;
    trace_from_bytes(&bytes)
}

pub fn save_iq_block<P: AsRef<Path>>(path: P, block: &IqBlock) -> Result<()> {
    fs::write(path, iq_to_bytes(block)).context(IoSnafu)
}

pub fn load_iq_block<P: AsRef<Path>>(path: P) -> Result<IqBlock> {
    let bytes = fs::read(path).context(IoSnafu)?;
    iq_from_bytes(&bytes)
}

/// Render a trace as CSV: frequency to one decimal, amplitude to two.
pub fn trace_to_csv(trace: &SpectrumTrace) -> String {
    let mut csv = String::from("Frequency (Hz),Amplitude (dBm)\n");
    for (&freq, &amp) in trace.frequencies.iter().zip(trace.amplitudes.iter()) {
        csv.push_str(&format!("{:.1},{:.2}\n", freq, amp));
    }
    csv
}

pub fn export_csv<P: AsRef<Path>>(path: P, trace: &SpectrumTrace) -> Result<()> {
    fs::write(path, trace_to_csv(trace)).context(IoSnafu)
}

/// Little-endian cursor over a record's bytes that reports where a
/// truncated record gave out.
struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Reject a sample count that claims more payload than the record
    /// holds.
    fn check_room(&self, count: usize, bytes_per_sample: usize) -> Result<()> {
        let claimed = count.saturating_mul(bytes_per_sample);
        if claimed > self.bytes.len() - self.offset {
            return Err(Error::TruncatedRecord {
                offset: self.offset,
            });
        }
        Ok(())
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let end = self.offset + N;
        let slice = self
            .bytes
            .get(self.offset..end)
            .ok_or(Error::TruncatedRecord {
                offset: self.offset,
            })?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(slice);
        self.offset = end;
        Ok(buf)
    }

    fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take()?))
    }

    fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.take()?))
    }

    fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.take()?))
    }
}
