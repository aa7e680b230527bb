//! Per-slice thin-lens multipole description of a cavity's transverse model.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::CavDataError;
use crate::Result;

/// One slice kind recognized in a `thinlenlon_<label>.txt` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceKind {
    Drift,
    EFocus1,
    EFocus2,
    EDipole,
    EQuad,
    HMono,
    HDipole,
    HQuad,
    AccGap,
}

impl FromStr for SliceKind {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "drift" => SliceKind::Drift,
            "EFocus1" => SliceKind::EFocus1,
            "EFocus2" => SliceKind::EFocus2,
            "EDipole" => SliceKind::EDipole,
            "EQuad" => SliceKind::EQuad,
            "HMono" => SliceKind::HMono,
            "HDipole" => SliceKind::HDipole,
            "HQuad" => SliceKind::HQuad,
            "AccGap" => SliceKind::AccGap,
            _ => return Err(()),
        })
    }
}

impl SliceKind {
    /// Whether the on-disk line for this kind carries a leading `E0` field
    /// (everything except `drift` and `AccGap`).
    pub fn has_e0_field(self) -> bool {
        !matches!(self, SliceKind::Drift | SliceKind::AccGap)
    }
}

/// One line of the thin-lens table.
#[derive(Debug, Clone)]
pub struct ThinLensSlice {
    pub kind: SliceKind,
    /// Slice length \[mm\].
    pub length: f64,
    /// Slice aperture \[mm\].
    pub aperture: f64,
    /// Raw field amplitude, present for every kind but `drift`/`AccGap` (zero
    /// otherwise).
    pub e0: f64,
}

/// The ordered thin-lens slice list for one cavity type, parsed from
/// `Multipole<label>/thinlenlon_<label>.txt`.
#[derive(Debug, Clone)]
pub struct ThinLensTable {
    pub slices: Vec<ThinLensSlice>,
}

impl ThinLensTable {
    /// Parses a thin-lens line table. Lines starting with `%` are comments.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str: Box<str> = path.to_string_lossy().into();

        let text = fs::read_to_string(path).map_err(|source| CavDataError::Io {
            path: path_str.clone(),
            source,
        })?;

        let mut slices = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('%') {
                continue;
            }

            let mut fields = line.split_whitespace();
            let elem = fields.next().ok_or_else(|| CavDataError::MalformedLine {
                path: path_str.clone(),
                line: idx + 1,
                detail: "missing element kind".into(),
            })?;
            let _name = fields.next().ok_or_else(|| CavDataError::MalformedLine {
                path: path_str.clone(),
                line: idx + 1,
                detail: "missing element name".into(),
            })?;

            let kind = SliceKind::from_str(elem).map_err(|_| CavDataError::UnknownSliceKind {
                path: path_str.clone(),
                line: idx + 1,
                kind: elem.into(),
            })?;

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

            let length = parse_f64(fields.next(), "length")?;
            let aperture = parse_f64(fields.next(), "aperture")?;
            let e0 = if kind.has_e0_field() {
                parse_f64(fields.next(), "E0")?
            } else {
                0.0
            };

            slices.push(ThinLensSlice {
                kind,
                length,
                aperture,
                e0,
            });
        }

        if slices.is_empty() {
            return Err(CavDataError::EmptyTable { path: path_str });
        }

        Ok(Self { slices })
    }
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
    fn parses_mixed_slice_kinds() {
        let f = write_temp(
            "% comment line\n\
             drift    d1   5.0  10.0\n\
             EFocus1  g1   0.0  10.0  1.5\n\
             AccGap   gap  0.0  10.0\n",
        );
        let table = ThinLensTable::load(f.path()).unwrap();
        assert_eq!(table.slices.len(), 3);
        assert_eq!(table.slices[0].kind, SliceKind::Drift);
        assert_eq!(table.slices[1].e0, 1.5);
        assert_eq!(table.slices[2].kind, SliceKind::AccGap);
    }

    #[test]
    fn rejects_unknown_kind() {
        let f = write_temp("bogus n1 1.0 1.0\n");
        assert!(matches!(
            ThinLensTable::load(f.path()).unwrap_err(),
            CavDataError::UnknownSliceKind { .. }
        ));
    }
}
