use crate::core::io::traits::RecordFile;
use nalgebra::{Point3, Vector3};
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use thiserror::Error;

/// An AutoDock Vina configuration: input files, search settings and the search box.
///
/// Serialized as one `key = value` line per field, in the order receptor, ligand,
/// energy_range, exhaustiveness, num_modes, center_x/y/z, size_x/y/z, followed by
/// `cpu` when it is set. Values are neither quoted nor escaped.
#[derive(Debug, Clone, PartialEq)]
pub struct VinaConfig {
    pub receptor: PathBuf,
    pub ligand: PathBuf,
    /// Maximum energy difference between the best and worst binding mode (kcal/mol).
    pub energy_range: f64,
    /// Exhaustiveness of the global search, roughly proportional to run time.
    pub exhaustiveness: u32,
    /// Maximum number of binding modes to generate.
    pub num_modes: u32,
    /// CPU count; Vina detects it when unset.
    pub cpu: Option<u32>,
    pub center: Point3<f64>,
    pub size: Vector3<f64>,
}

#[derive(Debug, Error)]
pub enum VinaConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: VinaParseErrorKind,
    },
    #[error("Missing required key: {0}")]
    MissingKey(&'static str),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VinaParseErrorKind {
    #[error("Expected 'key = value'")]
    MissingSeparator,
    #[error("Unknown key '{0}'")]
    UnknownKey(String),
    #[error("Key '{0}' appears more than once")]
    DuplicateKey(String),
    #[error("Key '{0}' has an empty value")]
    EmptyValue(String),
    #[error("Invalid integer for '{key}' (value: '{value}')")]
    InvalidInt { key: String, value: String },
    #[error("Invalid float for '{key}' (value: '{value}')")]
    InvalidFloat { key: String, value: String },
}

/// Keys in output order. `cpu` is optional and always last.
pub const KEYS: [&str; 12] = [
    "receptor",
    "ligand",
    "energy_range",
    "exhaustiveness",
    "num_modes",
    "center_x",
    "center_y",
    "center_z",
    "size_x",
    "size_y",
    "size_z",
    "cpu",
];

/// Formats a float in its shortest round-trip form, keeping a trailing `.0` on
/// integral values (`70.0`, not `70`).
pub fn format_float(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains(['.', 'e', 'E']) {
        format!("{}.0", text)
    } else {
        text
    }
}

impl VinaConfig {
    /// The serialized `(key, value)` pairs in output order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = vec![
            ("receptor", self.receptor.display().to_string()),
            ("ligand", self.ligand.display().to_string()),
            ("energy_range", format_float(self.energy_range)),
            ("exhaustiveness", self.exhaustiveness.to_string()),
            ("num_modes", self.num_modes.to_string()),
            ("center_x", format_float(self.center.x)),
            ("center_y", format_float(self.center.y)),
            ("center_z", format_float(self.center.z)),
            ("size_x", format_float(self.size.x)),
            ("size_y", format_float(self.size.y)),
            ("size_z", format_float(self.size.z)),
        ];
        if let Some(cpu) = self.cpu {
            entries.push(("cpu", cpu.to_string()));
        }
        entries
    }
}

struct RawEntries {
    values: HashMap<&'static str, (usize, String)>,
}

impl RawEntries {
    fn take(&mut self, key: &'static str) -> Option<(usize, String)> {
        self.values.remove(key)
    }

    fn required(&mut self, key: &'static str) -> Result<(usize, String), VinaConfigError> {
        self.take(key).ok_or(VinaConfigError::MissingKey(key))
    }

    fn float(&mut self, key: &'static str) -> Result<f64, VinaConfigError> {
        let (line, value) = self.required(key)?;
        value.parse().map_err(|_| VinaConfigError::Parse {
            line,
            kind: VinaParseErrorKind::InvalidFloat {
                key: key.to_string(),
                value,
            },
        })
    }

    fn int(&mut self, key: &'static str) -> Result<Option<u32>, VinaConfigError> {
        let Some((line, value)) = self.take(key) else {
            return Ok(None);
        };
        value
            .parse()
            .map(Some)
            .map_err(|_| VinaConfigError::Parse {
                line,
                kind: VinaParseErrorKind::InvalidInt {
                    key: key.to_string(),
                    value,
                },
            })
    }

    fn required_int(&mut self, key: &'static str) -> Result<u32, VinaConfigError> {
        self.int(key)?.ok_or(VinaConfigError::MissingKey(key))
    }
}

impl RecordFile for VinaConfig {
    type Error = VinaConfigError;

    /// Reads a configuration written by [`RecordFile::write_to`]. Blank lines and lines
    /// starting with `#` are skipped.
    fn read_from(reader: &mut impl BufRead) -> Result<Self, Self::Error> {
        let mut values = HashMap::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let parse_error = |kind| VinaConfigError::Parse {
                line: line_num,
                kind,
            };

            let (key, value) = trimmed
                .split_once('=')
                .ok_or_else(|| parse_error(VinaParseErrorKind::MissingSeparator))?;
            let (key, value) = (key.trim(), value.trim());
            let known = KEYS
                .iter()
                .copied()
                .find(|k| *k == key)
                .ok_or_else(|| parse_error(VinaParseErrorKind::UnknownKey(key.to_string())))?;
            if value.is_empty() {
                return Err(parse_error(VinaParseErrorKind::EmptyValue(key.to_string())));
            }
            if values
                .insert(known, (line_num, value.to_string()))
                .is_some()
            {
                return Err(parse_error(VinaParseErrorKind::DuplicateKey(
                    key.to_string(),
                )));
            }
        }

        let mut raw = RawEntries { values };
        let receptor = PathBuf::from(raw.required("receptor")?.1);
        let ligand = PathBuf::from(raw.required("ligand")?.1);
        let energy_range = raw.float("energy_range")?;
        let exhaustiveness = raw.required_int("exhaustiveness")?;
        let num_modes = raw.required_int("num_modes")?;
        let center = Point3::new(
            raw.float("center_x")?,
            raw.float("center_y")?,
            raw.float("center_z")?,
        );
        let size = Vector3::new(
            raw.float("size_x")?,
            raw.float("size_y")?,
            raw.float("size_z")?,
        );
        let cpu = raw.int("cpu")?;

        Ok(Self {
            receptor,
            ligand,
            energy_range,
            exhaustiveness,
            num_modes,
            cpu,
            center,
            size,
        })
    }

    fn write_to(&self, writer: &mut impl Write) -> Result<(), Self::Error> {
        for (key, value) in self.entries() {
            writeln!(writer, "{} = {}", key, value)?;
        }
        Ok(())
    }
}
