//! Time-ordered, duplicate-free collection of segments for one series.
//!
//! A [`SegmentSet`] is built once per decoder construction from the segments
//! of every matched file and is immutable afterwards. Spans are ascending and
//! non-overlapping; gaps are allowed and surface as
//! [`EphemeridesError::DateNotCovered`] at query time, never as a silently
//! returned neighboring segment.
//!
//! Merge policy across files (order-independent):
//! * exact duplicates (same start, same duration, same coefficients) collapse
//!   to one segment;
//! * segments whose span is already contained in accepted coverage are
//!   dropped;
//! * a span supplied twice with **different** coefficients, or a partial
//!   overlap that is neither duplication nor containment, is a hard
//!   [`EphemeridesError::MalformedRecord`].

use camino::{Utf8Path, Utf8PathBuf};

use crate::chebyshev::segment::ChebyshevSegment;
use crate::constants::JulianDate;
use crate::errors::EphemeridesError;

/// Tolerance when comparing segment span endpoints, in days (~1 ms).
const SPAN_EPS: f64 = 1e-8;

/// Ascending, non-overlapping sequence of segments for one series.
#[derive(Debug, Clone, Default)]
pub struct SegmentSet {
    segments: Vec<ChebyshevSegment>,
}

impl SegmentSet {
    /// Merge raw per-file segments into one ordered, duplicate-free set.
    ///
    /// Sorting makes the result independent of the order in which the files
    /// were listed and decoded.
    ///
    /// Arguments
    /// -----------------
    /// * `segments`: all segments decoded for one series, any order.
    /// * `origin`: file path reported on merge conflicts.
    ///
    /// Return
    /// ----------
    /// * The merged set, or [`EphemeridesError::MalformedRecord`] on
    ///   conflicting overlap.
    pub fn from_segments(
        mut segments: Vec<ChebyshevSegment>,
        origin: &Utf8Path,
    ) -> Result<Self, EphemeridesError> {
        segments.sort_by(|a, b| {
            a.start()
                .total_cmp(&b.start())
                .then(b.duration().total_cmp(&a.duration()))
        });

        let mut accepted: Vec<ChebyshevSegment> = Vec::with_capacity(segments.len());
        for segment in segments {
            let Some(last) = accepted.last() else {
                accepted.push(segment);
                continue;
            };

            if segment.start() >= last.end() - SPAN_EPS {
                accepted.push(segment);
                continue;
            }

            // Overlapping the accepted coverage: duplicate, contained, or conflict.
            let same_span = (segment.start() - last.start()).abs() <= SPAN_EPS
                && (segment.duration() - last.duration()).abs() <= SPAN_EPS;
            if same_span {
                if segment != *last {
                    return Err(EphemeridesError::MalformedRecord {
                        file: origin.to_path_buf(),
                        reason: format!(
                            "conflicting coefficients for span [{}, {}) of {}",
                            segment.start(),
                            segment.end(),
                            segment.series()
                        ),
                    });
                }
                continue;
            }
            if segment.end() <= last.end() + SPAN_EPS {
                // Fully contained in already-accepted coverage.
                continue;
            }
            return Err(EphemeridesError::MalformedRecord {
                file: origin.to_path_buf(),
                reason: format!(
                    "partially overlapping spans [{}, {}) and [{}, {}) of {}",
                    last.start(),
                    last.end(),
                    segment.start(),
                    segment.end(),
                    segment.series()
                ),
            });
        }

        Ok(SegmentSet { segments: accepted })
    }

    /// The segment whose half-open span contains `jd`.
    ///
    /// Return
    /// ----------
    /// * The covering segment, or [`EphemeridesError::DateNotCovered`] when
    ///   `jd` falls in a gap or outside the overall span.
    pub fn segment_containing(&self, jd: JulianDate) -> Result<&ChebyshevSegment, EphemeridesError> {
        let idx = self.segments.partition_point(|s| s.start() <= jd);
        if idx == 0 {
            return Err(EphemeridesError::DateNotCovered { jd });
        }
        let candidate = &self.segments[idx - 1];
        if candidate.contains(jd) {
            Ok(candidate)
        } else {
            Err(EphemeridesError::DateNotCovered { jd })
        }
    }

    /// Segments in ascending start-epoch order.
    pub fn segments(&self) -> &[ChebyshevSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// First covered epoch, when any segment exists.
    pub fn first_epoch(&self) -> Option<JulianDate> {
        self.segments.first().map(|s| s.start())
    }

    /// Exclusive last covered epoch, when any segment exists.
    pub fn last_epoch(&self) -> Option<JulianDate> {
        self.segments.last().map(|s| s.end())
    }
}

#[cfg(test)]
mod test_segment_set {
    use super::*;
    use crate::ids::EphemerisSeries;

    fn seg(start: f64, duration: f64, seed: f64) -> ChebyshevSegment {
        ChebyshevSegment::new(
            EphemerisSeries::Venus,
            start,
            duration,
            vec![seed, 1.0],
            vec![seed + 1.0, 1.0],
            vec![seed + 2.0, 1.0],
        )
        .unwrap()
    }

    fn origin() -> Utf8PathBuf {
        Utf8PathBuf::from("merged")
    }

    #[test]
    fn test_contiguous_sequence_is_kept_in_order() {
        let set = SegmentSet::from_segments(
            vec![seg(16.0, 8.0, 0.0), seg(0.0, 8.0, 1.0), seg(8.0, 8.0, 2.0)],
            &origin(),
        )
        .unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.first_epoch(), Some(0.0));
        assert_eq!(set.last_epoch(), Some(24.0));
        assert!(set.segments().windows(2).all(|w| w[0].end() <= w[1].start()));
    }

    #[test]
    fn test_exact_duplicates_collapse_regardless_of_order() {
        let a = vec![seg(0.0, 8.0, 1.0), seg(8.0, 8.0, 2.0), seg(8.0, 8.0, 2.0)];
        let mut b = a.clone();
        b.reverse();
        let set_a = SegmentSet::from_segments(a, &origin()).unwrap();
        let set_b = SegmentSet::from_segments(b, &origin()).unwrap();
        assert_eq!(set_a.len(), 2);
        assert_eq!(set_a.segments(), set_b.segments());
    }

    #[test]
    fn test_contained_span_is_dropped() {
        // A coarse 16-day segment already covers the fine 8-day one.
        let set = SegmentSet::from_segments(
            vec![seg(0.0, 16.0, 1.0), seg(4.0, 8.0, 9.0)],
            &origin(),
        )
        .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.segments()[0].duration(), 16.0);
    }

    #[test]
    fn test_conflicting_duplicate_span_is_fatal() {
        let err = SegmentSet::from_segments(
            vec![seg(0.0, 8.0, 1.0), seg(0.0, 8.0, 2.0)],
            &origin(),
        );
        assert!(matches!(err, Err(EphemeridesError::MalformedRecord { .. })));
    }

    #[test]
    fn test_partial_overlap_is_fatal() {
        let err = SegmentSet::from_segments(
            vec![seg(0.0, 8.0, 1.0), seg(4.0, 8.0, 2.0)],
            &origin(),
        );
        assert!(matches!(err, Err(EphemeridesError::MalformedRecord { .. })));
    }

    #[test]
    fn test_gap_reports_date_not_covered() {
        let set = SegmentSet::from_segments(
            vec![seg(0.0, 8.0, 1.0), seg(16.0, 8.0, 2.0)],
            &origin(),
        )
        .unwrap();
        assert!(set.segment_containing(4.0).is_ok());
        assert!(matches!(
            set.segment_containing(12.0),
            Err(EphemeridesError::DateNotCovered { .. })
        ));
        assert!(matches!(
            set.segment_containing(-1.0),
            Err(EphemeridesError::DateNotCovered { .. })
        ));
        assert!(matches!(
            set.segment_containing(24.0),
            Err(EphemeridesError::DateNotCovered { .. })
        ));
    }

    #[test]
    fn test_boundary_instant_belongs_to_later_segment() {
        let set = SegmentSet::from_segments(
            vec![seg(0.0, 8.0, 1.0), seg(8.0, 8.0, 2.0)],
            &origin(),
        )
        .unwrap();
        let covering = set.segment_containing(8.0).unwrap();
        assert_eq!(covering.start(), 8.0);
    }
}
