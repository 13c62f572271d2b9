use std::collections::BTreeMap;

use crate::error::{HuffmanError, Result};

/// Occurrence counts of every distinct symbol in a text.
///
/// Entries are `(count, symbol)` pairs sorted ascending by count, with equal
/// counts ordered by ascending symbol so that everything downstream is
/// reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(usize, char)>,
}

impl FrequencyTable {
    pub fn from_text(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(HuffmanError::EmptyInput("cannot count symbols of empty text"));
        }

        let counts: BTreeMap<char, usize> = text.chars()
            .fold(BTreeMap::new(), |mut acc, symbol| {
                *acc.entry(symbol).or_insert(0) += 1;
                acc
            });

        let mut entries: Vec<(usize, char)> = counts.into_iter()
            .map(|(symbol, count)| (count, symbol))
            .collect();
        entries.sort_unstable();

        Ok(FrequencyTable { entries })
    }

    pub fn entries(&self) -> &[(usize, char)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of symbols in the counted text.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(count, _)| count).sum()
    }

    pub fn count_of(&self, symbol: char) -> Option<usize> {
        self.entries.iter()
            .find(|(_, s)| *s == symbol)
            .map(|(count, _)| *count)
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a (usize, char);
    type IntoIter = std::slice::Iter<'a, (usize, char)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_abracadabra_counts() {
        let table = FrequencyTable::from_text("abracadabra").unwrap();
        assert_eq!(
            table.entries(),
            &[(1, 'c'), (1, 'd'), (2, 'b'), (2, 'r'), (5, 'a')]
        );
        assert_eq!(table.total(), 11);
        assert_eq!(table.count_of('r'), Some(2));
        assert_eq!(table.count_of('z'), None);
    }

    #[test]
    fn test_equal_counts_ordered_by_symbol() {
        let table = FrequencyTable::from_text("zyxxyz").unwrap();
        assert_eq!(table.entries(), &[(2, 'x'), (2, 'y'), (2, 'z')]);
    }

    #[test]
    fn test_multibyte_symbols() {
        let table = FrequencyTable::from_text("ééa").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.count_of('é'), Some(2));
    }

    #[test]
    fn test_empty_text_rejected() {
        assert!(matches!(
            FrequencyTable::from_text(""),
            Err(HuffmanError::EmptyInput(_))
        ));
    }
}
