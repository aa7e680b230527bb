//! Transit-factor curves used by the RF cavity's gap-crossing formulas.
//!
//! Each file tabulates, against reference particle velocity `beta`, the
//! transit-time factor `T`, its derivative `Tp`, the companion sine factor
//! `S` and the nominal gap voltage `V0` for one named multipole element of a
//! cavity type. The backing file format is not shown by any kept source
//! (`TransFacts`/`TransitFacMultipole` are opaque external calls in the
//! original); this loader assumes the same whitespace-table convention as
//! the axis-field and thin-lens files: one header-free, comment-free row per
//! `beta` sample, strictly increasing in `beta`, linearly interpolated.

use std::fs;
use std::path::Path;

use crate::CavDataError;
use crate::Result;

/// One `beta` row of a transit-factor curve.
#[derive(Debug, Clone, Copy)]
struct Row {
    beta: f64,
    t: f64,
    tp: f64,
    s: f64,
    v0: f64,
}

/// A loaded `beta -> (T, Tp, S, V0)` curve for one multipole element.
#[derive(Debug, Clone)]
pub struct MultipoleCurve {
    rows: Vec<Row>,
}

/// Transit-factor values interpolated at a particular `beta`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitFactors {
    pub t: f64,
    pub tp: f64,
    pub s: f64,
    pub v0: f64,
}

impl MultipoleCurve {
    /// Parses a `beta T Tp S V0` table (six columns in the original naming,
    /// `Sp` folded into `S` since no kept source reads it back separately).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str: Box<str> = path.to_string_lossy().into();

        let text = fs::read_to_string(path).map_err(|source| CavDataError::Io {
            path: path_str.clone(),
            source,
        })?;

        let mut rows = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('%') {
                continue;
            }

            let mut fields = line.split_whitespace();
            let parse_f64 = |field: Option<&str>, what: &str| -> Result<f64> {
                field
                    .ok_or_else(|| CavDataError::MalformedLine {
                        path: path_str.clone(),
                        line: idx + 1,
                        detail: format!("missing {what}").into(),
                    })?
                    .parse::<f64>()
                    .map_err(|_| CavDataError::MalformedLine {
                        path: path_str.clone(),
                        line: idx + 1,
                        detail: format!("{what} is not a float").into(),
                    })
            };

            let beta = parse_f64(fields.next(), "beta")?;
            let t = parse_f64(fields.next(), "T")?;
            let tp = parse_f64(fields.next(), "Tp")?;
            let s = parse_f64(fields.next(), "S")?;
            let v0 = parse_f64(fields.next(), "V0")?;

            if let Some(prev) = rows.last().map(|r: &Row| r.beta)
                && beta <= prev
            {
                return Err(CavDataError::NonIncreasingAxis {
                    path: path_str.clone(),
                    line: idx + 1,
                });
            }

            rows.push(Row { beta, t, tp, s, v0 });
        }

        if rows.is_empty() {
            return Err(CavDataError::EmptyTable { path: path_str });
        }

        Ok(Self { rows })
    }

    /// Linearly interpolates the transit factors at `beta`, clamping to the
    /// table's endpoints outside its tabulated range.
    pub fn eval(&self, beta: f64) -> TransitFactors {
        let rows = &self.rows;

        if beta <= rows[0].beta {
            return row_to_factors(&rows[0]);
        }
        let last = rows.len() - 1;
        if beta >= rows[last].beta {
            return row_to_factors(&rows[last]);
        }

        let hi = rows.partition_point(|r| r.beta < beta).max(1);
        let lo = hi - 1;
        let frac = (beta - rows[lo].beta) / (rows[hi].beta - rows[lo].beta);

        TransitFactors {
            t: lerp(rows[lo].t, rows[hi].t, frac),
            tp: lerp(rows[lo].tp, rows[hi].tp, frac),
            s: lerp(rows[lo].s, rows[hi].s, frac),
            v0: lerp(rows[lo].v0, rows[hi].v0, frac),
        }
    }
}

fn row_to_factors(r: &Row) -> TransitFactors {
    TransitFactors {
        t: r.t,
        tp: r.tp,
        s: r.s,
        v0: r.v0,
    }
}

fn lerp(a: f64, b: f64, frac: f64) -> f64 {
    a + (b - a) * frac
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn interpolates_between_rows() {
        let f = write_temp("0.0 1.0 0.0 0.0 100.0\n1.0 0.0 -1.0 1.0 200.0\n");
        let curve = MultipoleCurve::load(f.path()).unwrap();
        let mid = curve.eval(0.5);
        assert!((mid.t - 0.5).abs() < 1e-12);
        assert!((mid.v0 - 150.0).abs() < 1e-12);
    }

    #[test]
    fn clamps_outside_range() {
        let f = write_temp("0.2 1.0 0.0 0.0 100.0\n0.8 0.5 0.0 0.0 150.0\n");
        let curve = MultipoleCurve::load(f.path()).unwrap();
        assert_eq!(curve.eval(0.0), curve.eval(0.2));
        assert_eq!(curve.eval(1.0), curve.eval(0.8));
    }

    #[test]
    fn rejects_non_increasing_beta() {
        let f = write_temp("0.5 1.0 0.0 0.0 100.0\n0.4 0.5 0.0 0.0 150.0\n");
        assert!(matches!(
            MultipoleCurve::load(f.path()).unwrap_err(),
            CavDataError::NonIncreasingAxis { .. }
        ));
    }
}
