//! Tabulated on-axis longitudinal electric field of a cavity type.

use std::fs;
use std::path::Path;

use ndarray::Array1;

use crate::CavDataError;
use crate::Result;

/// Ordered `(s, E_z(s))` samples of a cavity's on-axis field, loaded once per
/// distinct cavity type from `axisData_<label>.txt`.
#[derive(Debug, Clone)]
pub struct AxisField {
    /// Strictly increasing positions \[mm\].
    pub s: Array1<f64>,
    /// On-axis longitudinal field samples, arbitrary units (scaled at use by
    /// the element's `scl_fac`).
    pub e_z: Array1<f64>,
}

impl AxisField {
    /// Loads an axis-field table from a two-column whitespace-separated text
    /// file (`s E_z` per line, no header, no comments).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str: Box<str> = path.to_string_lossy().into();

        let text = fs::read_to_string(path).map_err(|source| CavDataError::Io {
            path: path_str.clone(),
            source,
        })?;

        let mut s = Vec::new();
        let mut e_z = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (Some(s_str), Some(e_str)) = (fields.next(), fields.next()) else {
                return Err(CavDataError::MalformedLine {
                    path: path_str.clone(),
                    line: idx + 1,
                    detail: "expected two whitespace-separated columns".into(),
                });
            };
            let s_val: f64 = s_str.parse().map_err(|_| CavDataError::MalformedLine {
                path: path_str.clone(),
                line: idx + 1,
                detail: "position column is not a float".into(),
            })?;
            let e_val: f64 = e_str.parse().map_err(|_| CavDataError::MalformedLine {
                path: path_str.clone(),
                line: idx + 1,
                detail: "field column is not a float".into(),
            })?;

            if let Some(&prev) = s.last()
                && s_val <= prev
            {
                return Err(CavDataError::NonIncreasingAxis {
                    path: path_str.clone(),
                    line: idx + 1,
                });
            }

            s.push(s_val);
            e_z.push(e_val);
        }

        if s.is_empty() {
            return Err(CavDataError::EmptyTable { path: path_str });
        }

        Ok(Self {
            s: Array1::from_vec(s),
            e_z: Array1::from_vec(e_z),
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.s.is_empty()
    }

    /// Total tabulated length, `s[last] - s[first]` \[mm\].
    pub fn span(&self) -> f64 {
        self.s[self.len() - 1] - self.s[0]
    }
}
