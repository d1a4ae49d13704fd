use crate::core::io::traits::RecordFile;
use crate::core::models::atom::{AtomField, AtomRecord, AtomTable, LineRejection, RejectReason};
use crate::core::models::structure::{Structure, StructureSet, is_terminator};
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;

/// Number of leading tokens kept from each atom line.
pub const ATOM_TOKENS: usize = 9;

/// A token starting with this character ends the atom fields of a line.
pub const ANNOTATION_MARKER: char = '*';

#[derive(Debug, Error)]
pub enum PdbqtError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Input contains no lines")]
    EmptyInput,
    #[error(
        "Input ends without a closing TER record: {trailing} line(s) from line {line} are unterminated"
    )]
    MissingTerminator { line: usize, trailing: usize },
    #[error("Expected a single structure, found {found}")]
    MultipleStructures { found: usize },
}

fn parse_int(token: &str, field: AtomField) -> Result<i64, RejectReason> {
    token.parse().map_err(|_| RejectReason::InvalidInt {
        field,
        value: token.to_string(),
    })
}

fn parse_float(token: &str, field: AtomField) -> Result<f64, RejectReason> {
    let invalid = || RejectReason::InvalidFloat {
        field,
        value: token.to_string(),
    };
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(invalid)
}

/// Parses one whitespace-separated atom line.
///
/// Example of an accepted line (tokens from the one starting with `*` are ignored):
///
/// ```text
/// ATOM      1  N   ILE A 146      57.904  24.527  16.458  *1.00  39.85     0.626 N
/// ```
///
/// Only the first nine tokens are read; extra tokens are ignored. A `*` inside a token,
/// as in the nucleic acid atom label `C1*`, is part of the token. Coordinates must be
/// finite.
pub fn parse_atom_line(line: &str) -> Result<AtomRecord, RejectReason> {
    let tokens: Vec<&str> = line
        .split_whitespace()
        .take_while(|t| !t.starts_with(ANNOTATION_MARKER))
        .take(ATOM_TOKENS)
        .collect();
    if tokens.len() < ATOM_TOKENS {
        return Err(RejectReason::TooFewTokens {
            found: tokens.len(),
        });
    }

    let serial = parse_int(tokens[1], AtomField::Serial)?;
    let residue_number = parse_int(tokens[5], AtomField::ResidueNumber)?;
    let x = parse_float(tokens[6], AtomField::X)?;
    let y = parse_float(tokens[7], AtomField::Y)?;
    let z = parse_float(tokens[8], AtomField::Z)?;

    Ok(AtomRecord {
        atom_name: tokens[0].to_string(),
        serial,
        atom_type: tokens[2].to_string(),
        residue_name: tokens[3].to_string(),
        chain_id: tokens[4].to_string(),
        residue_number,
        position: Point3::new(x, y, z),
    })
}

fn collect_atoms<I, S>(lines: I) -> (usize, AtomTable)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut records = Vec::new();
    let mut rejected = Vec::new();
    let mut count = 0;
    for (idx, line) in lines.into_iter().enumerate() {
        count += 1;
        match parse_atom_line(line.as_ref()) {
            Ok(record) => records.push(record),
            Err(reason) => rejected.push(LineRejection {
                line_number: idx + 1,
                reason,
            }),
        }
    }
    (count, AtomTable::new(records, rejected))
}

impl AtomTable {
    /// Parses every line, keeping accepted atoms and recording rejected lines.
    ///
    /// # Errors
    ///
    /// Returns [`PdbqtError::EmptyInput`] if `lines` is empty. Individual malformed
    /// lines never cause an error.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, PdbqtError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (count, table) = collect_atoms(lines);
        if count == 0 {
            return Err(PdbqtError::EmptyInput);
        }
        Ok(table)
    }

    /// Parses the lines of a single structure. Structures are never empty, so this
    /// cannot fail.
    pub fn from_structure(structure: &Structure) -> Self {
        collect_atoms(structure.lines()).1
    }

    pub fn read_from(reader: &mut impl BufRead) -> Result<Self, PdbqtError> {
        let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
        Self::from_lines(lines)
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, PdbqtError> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_from(&mut reader)
    }
}

impl StructureSet {
    /// Splits lines into structures, closing one at every line that starts with `TER`.
    ///
    /// # Errors
    ///
    /// Returns [`PdbqtError::EmptyInput`] for no lines and
    /// [`PdbqtError::MissingTerminator`] when lines remain after the last terminator.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, PdbqtError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut structures = Vec::new();
        let mut current: Vec<String> = Vec::new();
        let mut current_start = 1;
        let mut total = 0;

        for line in lines {
            let line = line.into();
            total += 1;
            if current.is_empty() {
                current_start = total;
            }
            let closes = is_terminator(&line);
            current.push(line);
            if closes {
                structures.push(Structure::from_terminated(std::mem::take(&mut current)));
            }
        }

        if total == 0 {
            return Err(PdbqtError::EmptyInput);
        }
        if !current.is_empty() {
            return Err(PdbqtError::MissingTerminator {
                line: current_start,
                trailing: current.len(),
            });
        }
        Ok(Self::new(structures))
    }
}

impl RecordFile for StructureSet {
    type Error = PdbqtError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self, Self::Error> {
        let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
        Self::from_lines(lines)
    }

    fn write_to(&self, writer: &mut impl Write) -> Result<(), Self::Error> {
        for structure in self {
            structure.write_lines(writer)?;
        }
        Ok(())
    }
}

impl RecordFile for Structure {
    type Error = PdbqtError;

    /// Reads a file holding exactly one `TER`-terminated structure.
    fn read_from(reader: &mut impl BufRead) -> Result<Self, Self::Error> {
        let set = StructureSet::read_from(reader)?;
        match set.structures() {
            [single] => Ok(single.clone()),
            many => Err(PdbqtError::MultipleStructures { found: many.len() }),
        }
    }

    fn write_to(&self, writer: &mut impl Write) -> Result<(), Self::Error> {
        self.write_lines(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ILE_N: &str =
        "ATOM      1  N   ILE A 146      57.904  24.527  16.458  *1.00  39.85     0.626 N";

    fn three_structure_lines() -> Vec<String> {
        [
            "REMARK  prepared receptor",
            "ATOM      1  N   ILE A 146      57.904  24.527  16.458  1.00 39.85     0.626 N",
            "ATOM      2  CA  ILE A 146      58.336  25.855  16.000  1.00 40.12     0.307 C",
            "TER       3      ILE A 146",
            "ATOM      4  N   GLY B   1      10.000  10.000  10.000  1.00 20.00     0.000 N",
            "TER       5      GLY B   1",
            "HETATM    6  C1  LIG C 900      11.000  11.000  11.000  1.00 20.00     0.100 C",
            "HETATM    7  O1  LIG C 900      12.000  12.000  12.000  1.00 20.00    -0.400 OA",
            "TER       8      LIG C 900",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn parses_documented_example_line() {
        let atom = parse_atom_line(ILE_N).unwrap();
        assert_eq!(atom.atom_name, "ATOM");
        assert_eq!(atom.serial, 1);
        assert_eq!(atom.atom_type, "N");
        assert_eq!(atom.residue_name, "ILE");
        assert_eq!(atom.chain_id, "A");
        assert_eq!(atom.residue_number, 146);
        assert_eq!(atom.position, Point3::new(57.904, 24.527, 16.458));
    }

    #[test]
    fn annotation_token_ends_the_atom_fields() {
        let line = "ATOM 1 N ILE A 146 1.0 2.0 *3.0";
        assert_eq!(
            parse_atom_line(line),
            Err(RejectReason::TooFewTokens { found: 8 })
        );
    }

    #[test]
    fn star_inside_atom_label_is_kept() {
        let line = "ATOM      5  C1* DA  A   1      10.000  20.000  30.000  1.00  0.00     0.000 C";
        let atom = parse_atom_line(line).unwrap();
        assert_eq!(atom.atom_type, "C1*");
        assert_eq!(atom.residue_name, "DA");
        assert_eq!(atom.position, Point3::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        assert_eq!(
            parse_atom_line("ATOM 1 C LIG B 1 nan 50.0 50.0"),
            Err(RejectReason::InvalidFloat {
                field: AtomField::X,
                value: "nan".into()
            })
        );
        assert_eq!(
            parse_atom_line("ATOM 1 C LIG B 1 1.0 inf 50.0"),
            Err(RejectReason::InvalidFloat {
                field: AtomField::Y,
                value: "inf".into()
            })
        );
    }

    #[test]
    fn rejects_short_and_mistyped_lines() {
        assert_eq!(
            parse_atom_line("TER       3      ILE A 146"),
            Err(RejectReason::TooFewTokens { found: 5 })
        );
        assert_eq!(
            parse_atom_line("ATOM x N ILE A 146 1.0 2.0 3.0"),
            Err(RejectReason::InvalidInt {
                field: AtomField::Serial,
                value: "x".into()
            })
        );
        assert_eq!(
            parse_atom_line("ATOM 1 N ILE A 146 1.0 2.0 abc"),
            Err(RejectReason::InvalidFloat {
                field: AtomField::Z,
                value: "abc".into()
            })
        );
    }

    #[test]
    fn atom_table_keeps_rejections_with_line_numbers() {
        let table = AtomTable::from_lines(three_structure_lines()).unwrap();
        assert_eq!(table.len(), 5);
        let rejected_lines: Vec<usize> = table.rejected().iter().map(|r| r.line_number).collect();
        assert_eq!(rejected_lines, vec![1, 4, 6, 9]);
    }

    #[test]
    fn parsing_twice_gives_identical_tables() {
        let lines = three_structure_lines();
        let first = AtomTable::from_lines(&lines).unwrap();
        let second = AtomTable::from_lines(&lines).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn atom_table_rejects_empty_input() {
        let lines: Vec<String> = Vec::new();
        assert!(matches!(
            AtomTable::from_lines(lines),
            Err(PdbqtError::EmptyInput)
        ));
    }

    #[test]
    fn atom_table_with_only_bad_lines_is_empty_not_an_error() {
        let table = AtomTable::from_lines(["ROOT", "ENDROOT", "TORSDOF 0"]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.rejected().len(), 3);
    }

    #[test]
    fn splitting_three_blocks_reconstructs_input() {
        let lines = three_structure_lines();
        let set = StructureSet::from_lines(lines.clone()).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(
            set.structures().iter().map(Structure::len).collect::<Vec<_>>(),
            vec![4, 2, 3]
        );
        let rebuilt: Vec<&str> = set.lines().collect();
        assert_eq!(rebuilt, lines.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn missing_final_terminator_is_reported() {
        let mut lines = three_structure_lines();
        lines.push("END".to_string());
        lines.push("".to_string());
        match StructureSet::from_lines(lines) {
            Err(PdbqtError::MissingTerminator { line, trailing }) => {
                assert_eq!(line, 10);
                assert_eq!(trailing, 2);
            }
            other => panic!("expected MissingTerminator, got {:?}", other),
        }
    }

    #[test]
    fn empty_input_does_not_split() {
        let lines: Vec<String> = Vec::new();
        assert!(matches!(
            StructureSet::from_lines(lines),
            Err(PdbqtError::EmptyInput)
        ));
    }

    #[test]
    fn structure_set_write_round_trips_through_reader() {
        let text = three_structure_lines().join("\n") + "\n";
        let set = StructureSet::read_from(&mut Cursor::new(text.as_bytes())).unwrap();
        let mut out = Vec::new();
        RecordFile::write_to(&set, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), text);
    }

    #[test]
    fn writing_normalizes_line_endings() {
        let crlf = "ATOM 1 C LIG A 1 0.0 0.0 0.0\r\nTER";
        let set = StructureSet::read_from(&mut Cursor::new(crlf.as_bytes())).unwrap();
        assert_eq!(set.structures()[0].lines()[1], "TER");

        let mut out = Vec::new();
        RecordFile::write_to(&set, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ATOM 1 C LIG A 1 0.0 0.0 0.0\nTER\n"
        );
    }

    #[test]
    fn structure_file_must_hold_a_single_structure() {
        let single = "ATOM 1 C LIG A 1 0.0 0.0 0.0\nTER\n";
        let structure = Structure::read_from(&mut Cursor::new(single.as_bytes())).unwrap();
        assert_eq!(structure.len(), 2);

        let double = "ATOM 1\nTER\nATOM 2\nATOM 3\nTER\n";
        assert!(matches!(
            Structure::read_from(&mut Cursor::new(double.as_bytes())),
            Err(PdbqtError::MultipleStructures { found: 2 })
        ));
    }

    #[test]
    fn read_from_path_parses_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lig.pdbqt");
        std::fs::write(&path, three_structure_lines().join("\n")).unwrap();
        let table = AtomTable::read_from_path(&path).unwrap();
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn non_utf8_input_is_an_io_error() {
        let bytes: &[u8] = &[0x41, 0x54, 0xff, 0xfe, b'\n'];
        assert!(matches!(
            AtomTable::read_from(&mut Cursor::new(bytes)),
            Err(PdbqtError::Io(_))
        ));
    }
}
