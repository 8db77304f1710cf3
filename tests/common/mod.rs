//! Synthetic DE-family archive files for integration tests.
//!
//! The builder emits byte-exact archives in either endianness. Coefficients
//! are a deterministic function of the sub-interval start epoch, so two files
//! covering overlapping date ranges produce identical bytes over the overlap
//! unless a different `seed` is chosen on purpose.

#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};

/// Span of one data record, in days.
pub const RECORD_SPAN: f64 = 32.0;

/// A start epoch inside the plausible-JD detection window.
pub const START_JD: f64 = 2_451_536.5;

/// Served series written by the builder: (IPT row, pointer, n_coeff, n_sub).
/// Pointers tile the record contiguously; the layout adds up to 359 doubles
/// per record, keeping the header area inside record #1.
pub const SERIES: [(usize, usize, usize, usize); 6] = [
    (0, 3, 8, 4),    // Mercury
    (2, 99, 10, 2),  // Earth-Moon barycenter
    (3, 159, 11, 1), // Mars
    (9, 192, 8, 4),  // Moon (geocentric)
    (10, 288, 9, 2), // Sun
    (12, 342, 6, 1), // Librations (LPT row)
];

/// Doubles per data record implied by [`SERIES`].
pub const WORDS_PER_RECORD: usize = 359;

/// Sun GM in AU³/day² (Gaussian constant squared).
pub const GMS: f64 = 2.959_122_082_855_911_5e-4;
/// Earth-Moon barycenter GM in AU³/day².
pub const GMB: f64 = 8.997_011_390_199_871e-10;
/// Mercury GM in AU³/day².
pub const GM1: f64 = 4.912_500_194_889_318e-11;
/// Venus GM in AU³/day².
pub const GM2: f64 = 7.243_452_332_644_12e-10;
/// Mars GM in AU³/day².
pub const GM4: f64 = 9.549_535_105_779_258e-11;
/// Inverse mass ratio Sun/Jupiter.
pub const IM5: f64 = 1_047.348_6;

pub const TEST_AU: f64 = 149_597_870.7;
pub const TEST_EMRAT: f64 = 81.300_56;

/// Deterministic coefficient value for one (row, sub-interval, axis, degree).
pub fn coefficient(row: usize, sub_start_jd: f64, axis: usize, degree: usize) -> f64 {
    let base = (row as f64 + 1.0) * 10.0 + axis as f64;
    let epoch_term = (sub_start_jd - START_JD) * 1e-3;
    base / (1.0 + degree as f64).powi(2) + epoch_term * ((degree % 3) as f64 - 1.0)
}

/// Builder for one synthetic archive file.
#[derive(Debug, Clone)]
pub struct SyntheticArchive {
    pub start_jd: f64,
    pub n_records: usize,
    pub big_endian: bool,
    pub version: i32,
    pub au: f64,
    pub emrat: f64,
    pub constants: Vec<(String, f64)>,
    /// Added to every coefficient; lets a test fabricate conflicting files.
    pub seed: f64,
}

impl Default for SyntheticArchive {
    fn default() -> Self {
        SyntheticArchive {
            start_jd: START_JD,
            n_records: 4,
            big_endian: false,
            version: 440,
            au: TEST_AU,
            emrat: TEST_EMRAT,
            constants: vec![
                ("GMS".to_string(), GMS),
                ("GMB".to_string(), GMB),
                ("GM1".to_string(), GM1),
                ("GM2".to_string(), GM2),
                ("GM4".to_string(), GM4),
                ("IM5".to_string(), IM5),
                ("DENUM".to_string(), 440.0),
            ],
            seed: 0.0,
        }
    }
}

impl SyntheticArchive {
    pub fn starting_at(start_jd: f64) -> Self {
        SyntheticArchive {
            start_jd,
            ..Default::default()
        }
    }

    pub fn end_jd(&self) -> f64 {
        self.start_jd + self.n_records as f64 * RECORD_SPAN
    }

    fn put_f64(&self, buf: &mut [u8], offset: usize, value: f64) {
        let bytes = if self.big_endian {
            value.to_be_bytes()
        } else {
            value.to_le_bytes()
        };
        buf[offset..offset + 8].copy_from_slice(&bytes);
    }

    fn put_i32(&self, buf: &mut [u8], offset: usize, value: i32) {
        let bytes = if self.big_endian {
            value.to_be_bytes()
        } else {
            value.to_le_bytes()
        };
        buf[offset..offset + 4].copy_from_slice(&bytes);
    }

    /// Serialize the whole archive: header record, constant record, data.
    pub fn bytes(&self) -> Vec<u8> {
        let record_size = WORDS_PER_RECORD * 8;
        let mut data = vec![0u8; (2 + self.n_records) * record_size];

        // --- record #1: titles, constant names, SS, NCON, AU, EMRAT, IPT
        let title = format!("Synthetic DE{} test ephemeris", self.version);
        data[..title.len()].copy_from_slice(title.as_bytes());
        for (index, (name, _)) in self.constants.iter().enumerate() {
            let offset = 252 + index * 6;
            let padded = format!("{name:<6}");
            data[offset..offset + 6].copy_from_slice(&padded.as_bytes()[..6]);
        }
        self.put_f64(&mut data, 2652, self.start_jd);
        self.put_f64(&mut data, 2660, self.end_jd());
        self.put_f64(&mut data, 2668, RECORD_SPAN);
        self.put_i32(&mut data, 2676, self.constants.len() as i32);
        self.put_f64(&mut data, 2680, self.au);
        self.put_f64(&mut data, 2688, self.emrat);
        for &(row, pointer, n_coeff, n_sub) in &SERIES {
            let offset = if row == 12 { 2844 } else { 2696 + row * 12 };
            self.put_i32(&mut data, offset, pointer as i32);
            self.put_i32(&mut data, offset + 4, n_coeff as i32);
            self.put_i32(&mut data, offset + 8, n_sub as i32);
        }
        self.put_i32(&mut data, 2840, self.version);

        // --- record #2: constant values
        for (index, &(_, value)) in self.constants.iter().enumerate() {
            self.put_f64(&mut data, record_size + index * 8, value);
        }

        // --- data records
        for record in 0..self.n_records {
            let record_offset = (2 + record) * record_size;
            let jd_start = self.start_jd + record as f64 * RECORD_SPAN;
            self.put_f64(&mut data, record_offset, jd_start);
            self.put_f64(&mut data, record_offset + 8, jd_start + RECORD_SPAN);

            for &(row, pointer, n_coeff, n_sub) in &SERIES {
                let sub_span = RECORD_SPAN / n_sub as f64;
                for sub in 0..n_sub {
                    let sub_start = jd_start + sub as f64 * sub_span;
                    for axis in 0..3 {
                        for degree in 0..n_coeff {
                            let word =
                                pointer - 1 + sub * 3 * n_coeff + axis * n_coeff + degree;
                            self.put_f64(
                                &mut data,
                                record_offset + word * 8,
                                coefficient(row, sub_start, axis, degree) + self.seed,
                            );
                        }
                    }
                }
            }
        }

        data
    }

    /// Write the archive under `dir` with the given file name.
    pub fn write_to(&self, dir: &Utf8Path, name: &str) -> Utf8PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.bytes()).expect("failed to write synthetic archive");
        path
    }
}

/// A tempdir whose path is valid UTF-8.
pub fn utf8_tempdir() -> (tempfile::TempDir, Utf8PathBuf) {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().expect("failed to create tempdir");
    let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
        .expect("tempdir path is not UTF-8");
    (dir, path)
}
