//! Splitting a VEX file into its `$`-headed sectors.

use log::{trace, warn};

/// A `$NAME`-headed block of a VEX file. The header line is the first line.
#[derive(Debug, Clone, PartialEq)]
pub struct Sector<'a> {
    /// The 1-indexed line number of the header within the whole file.
    first_line_num: usize,

    lines: Vec<&'a str>,
}

impl<'a> Sector<'a> {
    /// The `$` line that starts this sector.
    pub fn header(&self) -> &'a str {
        self.lines[0]
    }

    /// All lines of this sector, including the header.
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// All lines of this sector paired with their 1-indexed line numbers in
    /// the whole file.
    pub fn numbered_lines(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, &l)| (self.first_line_num + i, l))
    }

    /// Is this sector named `name`? Any header containing `name` matches.
    pub fn is_named(&self, name: &str) -> bool {
        self.header().contains(name)
    }
}

/// The sectors of a VEX file, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Sectors<'a>(Vec<Sector<'a>>);

impl<'a> Sectors<'a> {
    /// Split the lines of a VEX file into sectors. Lines before the first
    /// line starting with `$` are ignored; every `$` line then starts a new
    /// sector.
    pub fn split<I: IntoIterator<Item = &'a str>>(lines: I) -> Sectors<'a> {
        let mut sectors = vec![];
        let mut current: Option<Sector> = None;
        for (i, line) in lines.into_iter().enumerate() {
            if line.starts_with('$') {
                if let Some(sector) = current.take() {
                    sectors.push(sector);
                }
                trace!("Line {}: new sector {}", i + 1, line.trim_end());
                current = Some(Sector {
                    first_line_num: i + 1,
                    lines: vec![line],
                });
            } else if let Some(sector) = current.as_mut() {
                sector.lines.push(line);
            }
        }
        if let Some(sector) = current {
            sectors.push(sector);
        }

        Sectors(sectors)
    }

    /// Get the first sector with the given name. If there isn't one, a warning
    /// is emitted and `None` is returned.
    pub fn get(&self, name: &str) -> Option<&Sector<'a>> {
        let sector = self.0.iter().find(|s| s.is_named(name));
        if sector.is_none() {
            warn!("No sector named {name}");
        }
        sector
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sector<'a>> {
        self.0.iter()
    }
}
