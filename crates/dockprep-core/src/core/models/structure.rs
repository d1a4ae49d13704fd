use std::io::{self, Write};

/// Marker that closes a structure. A line starting with it is the last line of the
/// structure it closes.
pub const TERMINATOR: &str = "TER";

/// Returns `true` if `line` closes a structure.
pub fn is_terminator(line: &str) -> bool {
    line.starts_with(TERMINATOR)
}

/// One contiguous run of lines ending at a `TER` line, typically one chain or
/// molecule. Lines are stored without their line terminators; written structures
/// always use `\n`, so CRLF input comes back as LF and the last line always ends
/// with a newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    lines: Vec<String>,
}

impl Structure {
    /// Wraps `lines` as a structure.
    ///
    /// Returns `None` unless the block is non-empty, ends with a terminator line and
    /// contains no earlier terminator.
    pub fn new(lines: Vec<String>) -> Option<Self> {
        let (last, body) = lines.split_last()?;
        if !is_terminator(last) || body.iter().any(|l| is_terminator(l)) {
            return None;
        }
        Some(Self { lines })
    }

    pub(crate) fn from_terminated(lines: Vec<String>) -> Self {
        debug_assert!(lines.last().is_some_and(|l| is_terminator(l)));
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines, terminator included. Used for ordering and file naming.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Writes every line followed by `\n`.
    pub fn write_lines(&self, writer: &mut impl Write) -> io::Result<()> {
        for line in &self.lines {
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }
}

/// The structures of one file in file order. Not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructureSet {
    structures: Vec<Structure>,
}

impl StructureSet {
    pub fn new(structures: Vec<Structure>) -> Self {
        Self { structures }
    }

    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    pub fn get(&self, index: usize) -> Option<&Structure> {
        self.structures.get(index)
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Structure> {
        self.structures.iter()
    }

    /// All lines of all structures in order, i.e. the lines of the source file.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.structures
            .iter()
            .flat_map(|s| s.lines().iter().map(String::as_str))
    }

    /// Index of the longest structure; the first one wins ties.
    pub fn largest_index(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for (idx, structure) in self.structures.iter().enumerate() {
            match best {
                Some((_, len)) if structure.len() <= len => {}
                _ => best = Some((idx, structure.len())),
            }
        }
        best.map(|(idx, _)| idx)
    }
}

impl<'a> IntoIterator for &'a StructureSet {
    type Item = &'a Structure;
    type IntoIter = std::slice::Iter<'a, Structure>;

    fn into_iter(self) -> Self::IntoIter {
        self.structures.iter()
    }
}
