//! Header-record parsing for DE-family archives.
//!
//! The first record of an archive carries three title lines, the constant
//! name table, the archive time span, the constant count, AU, EMRAT, the IPT
//! layout table, the archive version number and the libration row. The second
//! record carries the constant values. Everything after that is fixed-size
//! data records.
//!
//! Byte order is not tagged in the file. It is detected by reading the
//! archive start epoch with both orderings and keeping the one that lands on
//! a plausible Julian date, cross-checked against the constant count; an
//! implausible sentinel in both orderings is a malformed file, never a silent
//! default.

use std::collections::HashMap;

use camino::Utf8Path;
use nom::multi::count;
use nom::number::complete::{f64 as raw_f64, i32 as raw_i32};
use nom::number::Endianness;

use crate::archive::layout::RecordLayout;
use crate::constants::{JulianDate, JD_SANE_MAX, JD_SANE_MIN, NCON_SANE_MAX};
use crate::errors::EphemeridesError;

/// Title text: 3 lines of 84 characters.
const TTL_BYTES: usize = 3 * 84;
/// Constant name table: 400 names of 6 characters.
const CNAM_COUNT: usize = 400;
/// Offset of the `SS` time-span triple, directly after TTL and CNAM.
const SS_OFFSET: usize = TTL_BYTES + CNAM_COUNT * 6;
/// Bytes of header record #1 that carry data (the rest is padding).
pub const HEADER_MIN_BYTES: usize = SS_OFFSET + 24 + 4 + 8 + 8 + 144 + 4 + 12;

pub(crate) fn malformed(file: &Utf8Path, reason: impl Into<String>) -> EphemeridesError {
    EphemeridesError::MalformedRecord {
        file: file.to_path_buf(),
        reason: reason.into(),
    }
}

/// Parsed header of one archive file.
///
/// Immutable after load; the constant table is parsed once and queried by
/// exact name, with absence reported as `None` rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveHeader {
    pub titles: [String; 3],
    pub constants: HashMap<String, f64>,
    /// Nominal first covered epoch (JD TDB).
    pub start_epoch: JulianDate,
    /// Nominal last covered epoch (JD TDB).
    pub final_epoch: JulianDate,
    /// Span of one data record, in days.
    pub record_span: f64,
    /// Astronomical unit in km, as stated by the archive.
    pub au: f64,
    /// Earth/Moon mass ratio.
    pub emrat: f64,
    /// Archive version number (e.g. 440).
    pub version: i32,
    pub layout: RecordLayout,
}

impl ArchiveHeader {
    /// Parse the two header records out of a whole-file buffer.
    ///
    /// Arguments
    /// -----------------
    /// * `data`: complete file contents.
    /// * `file`: path reported in error conditions.
    ///
    /// Return
    /// ----------
    /// * The parsed header, or [`EphemeridesError::MalformedRecord`] on any
    ///   structural defect.
    pub fn parse(data: &[u8], file: &Utf8Path) -> Result<Self, EphemeridesError> {
        if data.len() < HEADER_MIN_BYTES {
            return Err(malformed(
                file,
                format!("file holds {} bytes, header needs {HEADER_MIN_BYTES}", data.len()),
            ));
        }

        let byte_order = detect_byte_order(data, file)?;
        let truncated = |_: nom::Err<nom::error::Error<&[u8]>>| malformed(file, "truncated header");

        let titles = parse_titles(&data[..TTL_BYTES]);
        let names = parse_constant_names(&data[TTL_BYTES..SS_OFFSET]);

        let mut cursor = &data[SS_OFFSET..];
        let (rest, ss) = count(raw_f64::<_, nom::error::Error<_>>(byte_order), 3)(cursor)
            .map_err(truncated)?;
        cursor = rest;
        let (rest, ncon) = raw_i32::<_, nom::error::Error<_>>(byte_order)(cursor).map_err(truncated)?;
        cursor = rest;
        let (rest, au) = raw_f64::<_, nom::error::Error<_>>(byte_order)(cursor).map_err(truncated)?;
        cursor = rest;
        let (rest, emrat) =
            raw_f64::<_, nom::error::Error<_>>(byte_order)(cursor).map_err(truncated)?;
        cursor = rest;
        let (rest, ipt_flat) = count(raw_i32::<_, nom::error::Error<_>>(byte_order), 36)(cursor)
            .map_err(truncated)?;
        cursor = rest;
        let (rest, version) =
            raw_i32::<_, nom::error::Error<_>>(byte_order)(cursor).map_err(truncated)?;
        cursor = rest;
        let (_, lpt) =
            count(raw_i32::<_, nom::error::Error<_>>(byte_order), 3)(cursor).map_err(truncated)?;

        let (start_epoch, final_epoch, record_span) = (ss[0], ss[1], ss[2]);
        if !(final_epoch > start_epoch) || !(record_span > 0.0) {
            return Err(malformed(
                file,
                format!("inconsistent time span [{start_epoch}, {final_epoch}] step {record_span}"),
            ));
        }
        if ncon <= 0 || ncon > NCON_SANE_MAX {
            return Err(malformed(file, format!("implausible constant count {ncon}")));
        }

        let mut ipt = [[0i32; 3]; 12];
        for (row, chunk) in ipt.iter_mut().zip(ipt_flat.chunks_exact(3)) {
            row.copy_from_slice(chunk);
        }
        let lpt: [i32; 3] = [lpt[0], lpt[1], lpt[2]];

        let layout = RecordLayout::from_ipt(byte_order, ipt, lpt)
            .map_err(|reason| malformed(file, reason))?;
        if layout.record_size < HEADER_MIN_BYTES {
            return Err(malformed(
                file,
                format!(
                    "record size {} is smaller than the header area {HEADER_MIN_BYTES}",
                    layout.record_size
                ),
            ));
        }
        if data.len() < 2 * layout.record_size {
            return Err(malformed(file, "file truncated before the constant-value record"));
        }

        let ncon = ncon as usize;
        if ncon * 8 > layout.record_size {
            return Err(malformed(
                file,
                format!("{ncon} constant values overflow one record"),
            ));
        }
        let cval_bytes = &data[layout.record_size..layout.record_size + ncon * 8];
        let (_, cvals) = count(raw_f64::<_, nom::error::Error<_>>(byte_order), ncon)(cval_bytes)
            .map_err(truncated)?;

        // Values beyond the 400 named slots stay positional-only and are dropped.
        let constants: HashMap<String, f64> = names
            .iter()
            .zip(cvals)
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, value)| (name.clone(), value))
            .collect();

        Ok(ArchiveHeader {
            titles,
            constants,
            start_epoch,
            final_epoch,
            record_span,
            au,
            emrat,
            version,
            layout,
        })
    }

    /// Look up a named constant; absence is an expected case, not an error.
    pub fn constant(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied().or(match name {
            "AU" => Some(self.au),
            "EMRAT" => Some(self.emrat),
            _ => None,
        })
    }
}

fn parse_titles(ttl: &[u8]) -> [String; 3] {
    let mut titles: [String; 3] = Default::default();
    for (title, chunk) in titles.iter_mut().zip(ttl.chunks_exact(84)) {
        *title = String::from_utf8_lossy(chunk).trim().to_string();
    }
    titles
}

fn parse_constant_names(cnam: &[u8]) -> Vec<String> {
    cnam.chunks_exact(6)
        .map(|chunk| String::from_utf8_lossy(chunk).trim().to_string())
        .collect()
}

/// Read the time-span sentinel with both byte orders and keep the plausible one.
fn detect_byte_order(data: &[u8], file: &Utf8Path) -> Result<Endianness, EphemeridesError> {
    let read_f64 = |offset: usize, order: Endianness| -> Option<f64> {
        let bytes: [u8; 8] = data.get(offset..offset + 8)?.try_into().ok()?;
        Some(match order {
            Endianness::Big => f64::from_be_bytes(bytes),
            _ => f64::from_le_bytes(bytes),
        })
    };
    let read_i32 = |offset: usize, order: Endianness| -> Option<i32> {
        let bytes: [u8; 4] = data.get(offset..offset + 4)?.try_into().ok()?;
        Some(match order {
            Endianness::Big => i32::from_be_bytes(bytes),
            _ => i32::from_le_bytes(bytes),
        })
    };
    let plausible = |order: Endianness| -> bool {
        let start = read_f64(SS_OFFSET, order);
        let end = read_f64(SS_OFFSET + 8, order);
        let step = read_f64(SS_OFFSET + 16, order);
        let ncon = read_i32(SS_OFFSET + 24, order);
        match (start, end, step, ncon) {
            (Some(start), Some(end), Some(step), Some(ncon)) => {
                (JD_SANE_MIN..=JD_SANE_MAX).contains(&start)
                    && end > start
                    && step > 0.0
                    && (1..=NCON_SANE_MAX).contains(&ncon)
            }
            _ => false,
        }
    };

    // Little-endian archives vastly outnumber big-endian ones; on the
    // (degenerate) chance both orders look sane, little wins.
    match (plausible(Endianness::Little), plausible(Endianness::Big)) {
        (true, _) => Ok(Endianness::Little),
        (false, true) => Ok(Endianness::Big),
        (false, false) => Err(malformed(
            file,
            "time-span sentinel implausible in both byte orders",
        )),
    }
}

#[cfg(test)]
mod test_header {
    use super::*;

    #[test]
    fn test_header_area_offsets() {
        assert_eq!(SS_OFFSET, 2652);
        assert_eq!(HEADER_MIN_BYTES, 2856);
    }

    #[test]
    fn test_byte_order_rejected_on_garbage() {
        let data = vec![0xFFu8; HEADER_MIN_BYTES];
        let err = detect_byte_order(&data, Utf8Path::new("garbage.bin"));
        assert!(matches!(err, Err(EphemeridesError::MalformedRecord { .. })));
    }

    #[test]
    fn test_byte_order_detected_per_encoding() {
        let mut data = vec![0u8; HEADER_MIN_BYTES];
        let write = |data: &mut [u8], big: bool| {
            let values = [2_451_536.5f64, 2_469_808.5, 32.0];
            for (i, v) in values.iter().enumerate() {
                let bytes = if big { v.to_be_bytes() } else { v.to_le_bytes() };
                data[SS_OFFSET + i * 8..SS_OFFSET + (i + 1) * 8].copy_from_slice(&bytes);
            }
            let ncon = if big {
                4i32.to_be_bytes()
            } else {
                4i32.to_le_bytes()
            };
            data[SS_OFFSET + 24..SS_OFFSET + 28].copy_from_slice(&ncon);
        };

        write(&mut data, false);
        assert_eq!(
            detect_byte_order(&data, Utf8Path::new("le.bin")).unwrap(),
            Endianness::Little
        );
        write(&mut data, true);
        assert_eq!(
            detect_byte_order(&data, Utf8Path::new("be.bin")).unwrap(),
            Endianness::Big
        );
    }
}
