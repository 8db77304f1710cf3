//! Data-record decoding: fixed-size records into per-series segments.
//!
//! Every record past the two header records covers one fixed time span and
//! holds, per series, `n_subintervals` consecutive blocks of
//! `axes × n_coefficients` doubles. Each sub-interval becomes its own
//! [`ChebyshevSegment`] with a proportionally scaled duration. Malformed
//! records (trailing partial record, span not matching the header step,
//! non-monotonic epochs) abort the whole decode; partial data is never
//! accepted.

use std::collections::HashMap;

use camino::Utf8Path;
use log::{debug, trace};
use nom::multi::count;
use nom::number::complete::f64 as raw_f64;

use crate::archive::header::{malformed, ArchiveHeader};
use crate::chebyshev::segment::ChebyshevSegment;
use crate::errors::EphemeridesError;
use crate::ids::EphemerisSeries;

/// Spans are compared against the header step with this tolerance, in days.
const SPAN_TOLERANCE: f64 = 1e-6;

/// Decode every data record of one file into per-series segment lists.
///
/// Arguments
/// -----------------
/// * `data`: complete file contents.
/// * `header`: the parsed header of the same file.
/// * `file`: path reported in error conditions.
///
/// Return
/// ----------
/// * Unmerged segments per served series, in file order.
pub fn decode_records(
    data: &[u8],
    header: &ArchiveHeader,
    file: &Utf8Path,
) -> Result<HashMap<EphemerisSeries, Vec<ChebyshevSegment>>, EphemeridesError> {
    let record_size = header.layout.record_size;
    let payload = &data[2 * record_size..];
    if payload.is_empty() {
        return Err(malformed(file, "archive holds no data records"));
    }
    if payload.len() % record_size != 0 {
        return Err(malformed(
            file,
            format!(
                "{} bytes of record data is not a multiple of the record size {record_size}",
                payload.len()
            ),
        ));
    }

    let n_records = payload.len() / record_size;
    debug!("decoding {n_records} records of {record_size} bytes from {file}");

    let mut segments: HashMap<EphemerisSeries, Vec<ChebyshevSegment>> = HashMap::new();
    for kind in EphemerisSeries::ALL {
        if kind.is_served() && header.layout.series(kind).is_present() {
            segments.insert(kind, Vec::with_capacity(n_records));
        }
    }

    for (index, record) in payload.chunks_exact(record_size).enumerate() {
        let (_, words) = count(
            raw_f64::<_, nom::error::Error<_>>(header.layout.byte_order),
            header.layout.words_per_record(),
        )(record)
        .map_err(|_: nom::Err<nom::error::Error<&[u8]>>| {
            malformed(file, format!("unreadable record {index}"))
        })?;

        let (jd_start, jd_end) = (words[0], words[1]);
        if !(jd_end > jd_start) {
            return Err(malformed(
                file,
                format!("record {index} spans [{jd_start}, {jd_end}]"),
            ));
        }
        if (jd_end - jd_start - header.record_span).abs() > SPAN_TOLERANCE {
            return Err(malformed(
                file,
                format!(
                    "record {index} spans {} days where the header states {}",
                    jd_end - jd_start,
                    header.record_span
                ),
            ));
        }
        trace!("record {index}: [{jd_start}, {jd_end})");

        for (&kind, series_segments) in segments.iter_mut() {
            let layout = header.layout.series(kind);
            let base = layout.pointer - 1;
            let sub_duration = (jd_end - jd_start) / layout.n_subintervals as f64;

            for sub in 0..layout.n_subintervals {
                let offset = base + sub * 3 * layout.n_coefficients;
                let mut axes = words[offset..offset + 3 * layout.n_coefficients]
                    .chunks_exact(layout.n_coefficients)
                    .map(|chunk| chunk.to_vec());
                let (x, y, z) = (
                    axes.next().unwrap_or_default(),
                    axes.next().unwrap_or_default(),
                    axes.next().unwrap_or_default(),
                );

                let segment = ChebyshevSegment::new(
                    kind,
                    jd_start + sub as f64 * sub_duration,
                    sub_duration,
                    x,
                    y,
                    z,
                )
                .map_err(|err| {
                    malformed(file, format!("record {index}, sub-interval {sub}: {err}"))
                })?;
                series_segments.push(segment);
            }
        }
    }

    Ok(segments)
}
