use super::{OutputError, ensure_parent_dir};
use nalgebra::Point3;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct XyzAtom {
    pub symbol: String,
    pub position: Point3<f64>,
}

impl XyzAtom {
    pub fn new(symbol: impl Into<String>, position: Point3<f64>) -> Self {
        Self {
            symbol: symbol.into(),
            position,
        }
    }
}

/// Renders atoms in XYZ format: atom count, comment line, then tab-separated coordinates.
pub fn format_xyz(comment: &str, atoms: &[XyzAtom]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", atoms.len());
    let _ = writeln!(out, "{}", comment);
    for atom in atoms {
        let p = &atom.position;
        let _ = writeln!(out, "{}\t{:.6}\t{:.6}\t{:.6}", atom.symbol, p.x, p.y, p.z);
    }
    out
}

pub fn write_xyz(path: &Path, comment: &str, atoms: &[XyzAtom]) -> Result<(), OutputError> {
    ensure_parent_dir(path)?;
    std::fs::write(path, format_xyz(comment, atoms)).map_err(|e| OutputError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("Saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_xyz_writes_count_comment_and_tab_separated_coordinates() {
        let atoms = vec![
            XyzAtom::new("Ar", Point3::origin()),
            XyzAtom::new("Ar", Point3::new(3.816, 0.0, 0.0)),
        ];
        let text = format_xyz("Argon dimer", &atoms);
        assert_eq!(
            text,
            "2\nArgon dimer\nAr\t0.000000\t0.000000\t0.000000\nAr\t3.816000\t0.000000\t0.000000\n"
        );
    }

    #[test]
    fn write_xyz_persists_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("argon.xyz");
        write_xyz(&path, "one", &[XyzAtom::new("Ar", Point3::new(1.0, 2.0, 3.0))]).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.ends_with("Ar\t1.000000\t2.000000\t3.000000\n"));
    }
}
