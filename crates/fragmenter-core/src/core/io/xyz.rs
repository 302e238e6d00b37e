use crate::core::io::traits::MoleculeFile;
use crate::core::models::atom::Atom;
use crate::core::models::element::Element;
use crate::core::models::molecule::Molecule;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Everything in an XYZ file besides the atoms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XyzMetadata {
    pub comment: String,
}

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum XyzParseErrorKind {
    #[error("Invalid atom count '{0}'")]
    InvalidCount(String),
    #[error("Unknown element symbol '{0}'")]
    UnknownElement(String),
    #[error("Invalid coordinate '{0}'")]
    InvalidCoordinate(String),
    #[error("Atom record needs an element and three coordinates")]
    TooFewFields,
}

/// The plain XYZ format: an atom count, a free-form comment line and one
/// `symbol x y z` record per atom, in Angstroms.
///
/// Molecules read from XYZ are neutral; charge and spin are supplied separately.
pub struct XyzFile;

impl XyzFile {
    fn parse_atom(line_num: usize, line: &str) -> Result<Atom, XyzError> {
        let parse_err = |kind| XyzError::Parse {
            line: line_num,
            kind,
        };
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(parse_err(XyzParseErrorKind::TooFewFields));
        }

        let element: Element = fields[0]
            .parse()
            .map_err(|_| parse_err(XyzParseErrorKind::UnknownElement(fields[0].to_string())))?;

        let mut coords = [0.0; 3];
        for (slot, raw) in coords.iter_mut().zip(&fields[1..4]) {
            *slot = raw
                .parse()
                .map_err(|_| parse_err(XyzParseErrorKind::InvalidCoordinate(raw.to_string())))?;
        }

        Ok(Atom::new(element, Point3::from(coords)))
    }
}

impl MoleculeFile for XyzFile {
    type Metadata = XyzMetadata;
    type Error = XyzError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Molecule, Self::Metadata), Self::Error> {
        let mut lines = reader.lines().enumerate();

        let (_, count_line) = lines
            .next()
            .ok_or_else(|| XyzError::MissingRecord("atom count".to_string()))?;
        let count_line = count_line?;
        let expected: usize = count_line.trim().parse().map_err(|_| XyzError::Parse {
            line: 1,
            kind: XyzParseErrorKind::InvalidCount(count_line.trim().to_string()),
        })?;

        let comment = match lines.next() {
            Some((_, line)) => line?.trim_end().to_string(),
            None => return Err(XyzError::MissingRecord("comment line".to_string())),
        };

        // The header is untrusted; grow from the records actually present.
        let mut atoms = Vec::new();
        for (line_idx, line_res) in lines {
            let line = line_res?;
            if line.trim().is_empty() {
                continue;
            }
            if atoms.len() == expected {
                return Err(XyzError::Inconsistency(format!(
                    "Header declares {} atoms but more records follow",
                    expected
                )));
            }
            atoms.push(Self::parse_atom(line_idx + 1, &line)?);
        }

        if atoms.len() != expected {
            return Err(XyzError::Inconsistency(format!(
                "Header declares {} atoms but {} were found",
                expected,
                atoms.len()
            )));
        }

        Ok((Molecule::new(atoms), XyzMetadata { comment }))
    }

    fn write_to(
        molecule: &Molecule,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        writeln!(writer, "{}", molecule.len())?;
        // A newline in the comment would shift every atom record.
        writeln!(writer, "{}", metadata.comment.replace(['\n', '\r'], " "))?;
        for atom in molecule.atoms() {
            writeln!(
                writer,
                "{:<2} {:>14.8} {:>14.8} {:>14.8}",
                atom.element.symbol(),
                atom.position.x,
                atom.position.y,
                atom.position.z
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const WATER: &str = "3\nwater, gas phase\nO 0.000 0.000 0.000\nH 0.9572 0.000 0.000\nh -0.2400 0.9266 0.000 extra\n";

    #[test]
    fn reads_atoms_and_comment() {
        let (molecule, metadata) = XyzFile::read_from(&mut Cursor::new(WATER)).unwrap();
        assert_eq!(metadata.comment, "water, gas phase");
        assert_eq!(molecule.len(), 3);
        assert_eq!(molecule.atoms()[0].element, Element::O);
        assert_eq!(molecule.atoms()[2].element, Element::H);
        assert_eq!(molecule.atoms()[1].position, Point3::new(0.9572, 0.0, 0.0));
        assert_eq!(molecule.charge(), 0);
    }

    #[test]
    fn trailing_blank_lines_are_ignored() {
        let input = format!("{WATER}\n\n");
        let (molecule, _) = XyzFile::read_from(&mut Cursor::new(input)).unwrap();
        assert_eq!(molecule.len(), 3);
    }

    #[test]
    fn atom_count_mismatch_is_an_inconsistency() {
        let input = "4\n\nO 0 0 0\nH 1 0 0\n";
        let result = XyzFile::read_from(&mut Cursor::new(input));
        assert!(matches!(result, Err(XyzError::Inconsistency(_))));

        let input = "1\n\nO 0 0 0\nH 1 0 0\n";
        let result = XyzFile::read_from(&mut Cursor::new(input));
        assert!(matches!(result, Err(XyzError::Inconsistency(_))));
    }

    #[test]
    fn oversized_atom_count_is_an_inconsistency() {
        let input = format!("{}\ncomment\nH 0 0 0\n", usize::MAX);
        let result = XyzFile::read_from(&mut Cursor::new(input));
        assert!(matches!(result, Err(XyzError::Inconsistency(_))));
    }

    #[test]
    fn parse_errors_report_the_line() {
        let input = "2\n\nO 0 0 0\nQq 1 0 0\n";
        match XyzFile::read_from(&mut Cursor::new(input)) {
            Err(XyzError::Parse {
                line: 4,
                kind: XyzParseErrorKind::UnknownElement(symbol),
            }) => assert_eq!(symbol, "Qq"),
            other => panic!("unexpected result: {other:?}"),
        }

        let input = "1\n\nO 0 zero 0\n";
        assert!(matches!(
            XyzFile::read_from(&mut Cursor::new(input)),
            Err(XyzError::Parse {
                line: 3,
                kind: XyzParseErrorKind::InvalidCoordinate(_)
            })
        ));

        let input = "x\n";
        assert!(matches!(
            XyzFile::read_from(&mut Cursor::new(input)),
            Err(XyzError::Parse {
                line: 1,
                kind: XyzParseErrorKind::InvalidCount(_)
            })
        ));
    }

    #[test]
    fn empty_input_is_missing_the_count() {
        let result = XyzFile::read_from(&mut Cursor::new(""));
        assert!(matches!(result, Err(XyzError::MissingRecord(_))));
    }

    #[test]
    fn written_file_reads_back() {
        let (molecule, metadata) = XyzFile::read_from(&mut Cursor::new(WATER)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("water.xyz");
        XyzFile::write_to_path(&molecule, &metadata, &path).unwrap();

        let (reread, reread_meta) = XyzFile::read_from_path(&path).unwrap();
        assert_eq!(reread_meta, metadata);
        assert_eq!(reread.len(), molecule.len());
        for (a, b) in reread.atoms().iter().zip(molecule.atoms()) {
            assert_eq!(a.element, b.element);
            assert!(a.distance_to(b) < 1e-6);
        }
    }
}
