use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::code_lengths::CodeLengthTable;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::hufftree::HuffmanTree;

/// Canonical prefix-free code: symbol -> string of `'0'`/`'1'`.
///
/// Codes are handed out in `(length, symbol)` order, each one the binary
/// successor of the previous code zero-extended to its own length. Iteration
/// follows ascending symbol order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<char, String>,
}

impl CodeTable {
    /// Frequency count, tree merge, depth walk and canonical assignment in one go.
    pub fn build(text: &str) -> Result<Self> {
        let frequencies = FrequencyTable::from_text(text)?;
        debug!(
            "counted {} symbols over {} distinct",
            frequencies.total(),
            frequencies.len()
        );

        let tree = HuffmanTree::from_frequencies(&frequencies)?;
        let lengths = CodeLengthTable::from_tree(&tree);
        debug!("code lengths: {:?}", lengths.entries());

        let table = CodeTable::from_lengths(&lengths)?;
        let bits = table.encoded_len(&frequencies)?;
        debug!("assigned {} codes, encoded size {} bits", table.len(), bits);
        Ok(table)
    }

    pub fn from_lengths(lengths: &CodeLengthTable) -> Result<Self> {
        let mut entries = lengths.entries().iter();
        let Some(&(first_length, first_symbol)) = entries.next() else {
            return Err(HuffmanError::EmptyInput("cannot assign codes without lengths"));
        };
        if first_length == 0 {
            return Err(HuffmanError::MalformedCode(format!(
                "symbol {:?} has zero code length",
                first_symbol
            )));
        }

        let mut codes = BTreeMap::new();
        let mut code = "0".repeat(first_length);
        codes.insert(first_symbol, code.clone());

        for &(length, symbol) in entries {
            increment(&mut code)?;
            code.push_str(&"0".repeat(length - code.len()));
            if codes.insert(symbol, code.clone()).is_some() {
                return Err(HuffmanError::MalformedCode(format!(
                    "symbol {:?} listed twice",
                    symbol
                )));
            }
        }

        Ok(CodeTable { codes })
    }

    /// Accepts a table from outside the builder, e.g. one read back from
    /// storage, and checks that it is a usable prefix-free code.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, String)>,
    {
        let mut codes = BTreeMap::new();
        for (symbol, code) in pairs {
            if code.is_empty() {
                return Err(HuffmanError::InvalidSubstitution(format!(
                    "empty code for symbol {:?}",
                    symbol
                )));
            }
            if !is_binary(&code) {
                return Err(HuffmanError::MalformedCode(format!(
                    "code {:?} for symbol {:?} is not binary",
                    code, symbol
                )));
            }
            if codes.insert(symbol, code).is_some() {
                return Err(HuffmanError::MalformedCode(format!(
                    "symbol {:?} listed twice",
                    symbol
                )));
            }
        }

        if codes.is_empty() {
            return Err(HuffmanError::EmptyInput("code table has no entries"));
        }

        let table = CodeTable { codes };
        if let Some((shorter, longer)) = table.prefix_violation() {
            return Err(HuffmanError::MalformedCode(format!(
                "code {:?} is a prefix of {:?}",
                shorter, longer
            )));
        }
        Ok(table)
    }

    pub fn get(&self, symbol: char) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    pub fn code_length(&self, symbol: char) -> Option<usize> {
        self.codes.get(&symbol).map(String::len)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> + '_ {
        self.codes.iter().map(|(symbol, code)| (*symbol, code.as_str()))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn max_code_length(&self) -> usize {
        self.codes.values().map(String::len).max().unwrap_or(0)
    }

    pub fn is_prefix_free(&self) -> bool {
        self.prefix_violation().is_none()
    }

    /// code -> symbol, injective because codes are unique.
    pub fn inverse(&self) -> HashMap<&str, char> {
        self.codes.iter()
            .map(|(symbol, code)| (code.as_str(), *symbol))
            .collect()
    }

    /// Bits needed to encode a text with the given counts.
    pub fn encoded_len(&self, frequencies: &FrequencyTable) -> Result<usize> {
        frequencies.into_iter()
            .map(|&(count, symbol)| {
                self.code_length(symbol)
                    .map(|length| count * length)
                    .ok_or(HuffmanError::UnknownSymbol(symbol))
            })
            .sum()
    }

    // After a lexicographic sort any prefix sits directly before a code it prefixes.
    fn prefix_violation(&self) -> Option<(&str, &str)> {
        let mut sorted: Vec<&str> = self.codes.values().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted.windows(2)
            .find(|pair| pair[1].starts_with(pair[0]))
            .map(|pair| (pair[0], pair[1]))
    }
}

impl<'a> IntoIterator for &'a CodeTable {
    type Item = (&'a char, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, char, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}

/// Adds one to a fixed-width big-endian bit string: the trailing run of
/// `'1'` becomes `'0'` and the `'0'` before it becomes `'1'`.
fn increment(code: &mut String) -> Result<()> {
    let Some(pos) = code.rfind('0') else {
        return Err(HuffmanError::MalformedCode(format!(
            "code space exhausted after {:?}",
            code
        )));
    };
    let width = code.len();
    code.truncate(pos);
    code.push('1');
    code.push_str(&"0".repeat(width - pos - 1));
    Ok(())
}

pub(crate) fn is_binary(bits: &str) -> bool {
    bits.bytes().all(|b| b == b'0' || b == b'1')
}

#[cfg(test)]
mod test {
    use super::*;

    fn pairs(table: &CodeTable) -> Vec<(char, &str)> {
        table.iter().collect()
    }

    #[test]
    fn test_increment() {
        let mut code = String::from("0");
        increment(&mut code).unwrap();
        assert_eq!(code, "1");

        let mut code = String::from("1011");
        increment(&mut code).unwrap();
        assert_eq!(code, "1100");

        let mut code = String::from("111");
        assert!(matches!(
            increment(&mut code),
            Err(HuffmanError::MalformedCode(_))
        ));
    }

    #[test]
    fn test_abracadabra_codes() {
        let table = CodeTable::build("abracadabra").unwrap();
        assert_eq!(
            pairs(&table),
            vec![('a', "0"), ('b', "110"), ('c', "1110"), ('d', "1111"), ('r', "10")]
        );
        assert!(table.is_prefix_free());
        assert_eq!(table.max_code_length(), 4);

        let frequencies = FrequencyTable::from_text("abracadabra").unwrap();
        assert_eq!(table.encoded_len(&frequencies).unwrap(), 23);
    }

    #[test]
    fn test_same_length_successors() {
        let lengths = CodeLengthTable::from(vec![(2, 'd'), (2, 'a'), (2, 'c'), (2, 'b')]);
        let table = CodeTable::from_lengths(&lengths).unwrap();
        assert_eq!(
            pairs(&table),
            vec![('a', "00"), ('b', "01"), ('c', "10"), ('d', "11")]
        );
    }

    #[test]
    fn test_degenerate_alphabet() {
        let table = CodeTable::build("aaaa").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get('a'), Some("0"));
    }

    #[test]
    fn test_duplicate_length_symbol_rejected() {
        let lengths = CodeLengthTable::from(vec![(2, 'a'), (2, 'a'), (2, 'b')]);
        assert!(matches!(
            CodeTable::from_lengths(&lengths),
            Err(HuffmanError::MalformedCode(msg)) if msg.contains("listed twice")
        ));

        let lengths = CodeLengthTable::from(vec![(1, 'a'), (1, 'a'), (2, 'b')]);
        assert!(matches!(
            CodeTable::from_lengths(&lengths),
            Err(HuffmanError::MalformedCode(msg)) if msg.contains("listed twice")
        ));
    }

    #[test]
    fn test_oversubscribed_lengths_rejected() {
        let lengths = CodeLengthTable::from(vec![(1, 'a'), (1, 'b'), (2, 'c')]);
        assert!(matches!(
            CodeTable::from_lengths(&lengths),
            Err(HuffmanError::MalformedCode(_))
        ));
    }

    #[test]
    fn test_from_pairs_validation() {
        let ok = CodeTable::from_pairs([('x', "0".to_string()), ('y', "1".to_string())]);
        assert!(ok.is_ok());

        let prefixed = CodeTable::from_pairs([('x', "0".to_string()), ('y', "01".to_string())]);
        assert!(matches!(prefixed, Err(HuffmanError::MalformedCode(_))));

        let duplicate = CodeTable::from_pairs([('x', "10".to_string()), ('y', "10".to_string())]);
        assert!(matches!(duplicate, Err(HuffmanError::MalformedCode(_))));

        let not_binary = CodeTable::from_pairs([('x', "0a".to_string())]);
        assert!(matches!(not_binary, Err(HuffmanError::MalformedCode(_))));

        let empty_code = CodeTable::from_pairs([('x', String::new())]);
        assert!(matches!(empty_code, Err(HuffmanError::InvalidSubstitution(_))));

        let empty = CodeTable::from_pairs(Vec::new());
        assert!(matches!(empty, Err(HuffmanError::EmptyInput(_))));
    }

    #[test]
    fn test_inverse() {
        let table = CodeTable::build("abracadabra").unwrap();
        let inverse = table.inverse();
        assert_eq!(inverse.len(), 5);
        assert_eq!(inverse.get("10"), Some(&'r'));
        assert_eq!(inverse.get("1"), None);
    }

    #[test]
    fn test_empty_text_rejected() {
        assert!(matches!(CodeTable::build(""), Err(HuffmanError::EmptyInput(_))));
    }
}
