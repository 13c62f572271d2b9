use log::debug;

use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};

/// How [`HuffmanCodec::encode`] turns text into bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodeStrategy {
    /// Look every symbol up and append its code.
    #[default]
    Lookup,
    /// Replace every occurrence of each symbol in the whole text, one symbol
    /// at a time in ascending symbol order.
    Substitution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecConfig {
    pub encode_strategy: EncodeStrategy,
}

impl CodecConfig {
    pub fn with_strategy(mut self, strategy: EncodeStrategy) -> Self {
        self.encode_strategy = strategy;
        self
    }
}

/// Encoder/decoder bound to one code table.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    table: CodeTable,
    config: CodecConfig,
}

impl HuffmanCodec {
    pub fn new(table: CodeTable) -> Self {
        Self::with_config(table, CodecConfig::default())
    }

    pub fn with_config(table: CodeTable, config: CodecConfig) -> Self {
        HuffmanCodec { table, config }
    }

    /// Builds the code table from `text` itself.
    pub fn from_text(text: &str) -> Result<Self> {
        Ok(Self::new(CodeTable::build(text)?))
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn config(&self) -> CodecConfig {
        self.config
    }

    pub fn into_table(self) -> CodeTable {
        self.table
    }

    pub fn encode(&self, text: &str) -> Result<String> {
        encode_text(&self.table, text, self.config.encode_strategy)
    }

    pub fn decode(&self, bits: &str) -> Result<String> {
        decode_bits(&self.table, bits)
    }
}

pub(crate) fn encode_text(table: &CodeTable, text: &str, strategy: EncodeStrategy) -> Result<String> {
    if text.is_empty() {
        return Err(HuffmanError::EmptyInput("cannot encode empty text"));
    }

    let encoded = match strategy {
        EncodeStrategy::Lookup => encode_by_lookup(table, text)?,
        EncodeStrategy::Substitution => encode_by_substitution(table, text)?,
    };

    debug!(
        "encoded {} symbols into {} bits ({:?})",
        text.chars().count(),
        encoded.len(),
        strategy
    );
    Ok(encoded)
}

fn encode_by_lookup(table: &CodeTable, text: &str) -> Result<String> {
    let codes = lookup_codes(table, text)?;
    let mut bits = String::with_capacity(codes.iter().map(|code| code.len()).sum());
    for code in codes {
        bits.push_str(code);
    }
    Ok(bits)
}

/// Codes for every symbol of `text`, in text order.
fn lookup_codes<'a>(table: &'a CodeTable, text: &str) -> Result<Vec<&'a str>> {
    text.chars()
        .map(|symbol| table.get(symbol).ok_or(HuffmanError::UnknownSymbol(symbol)))
        .collect()
}

fn encode_by_substitution(table: &CodeTable, text: &str) -> Result<String> {
    // a later pass would rewrite the digits an earlier pass produced
    if let Some(digit) = ['0', '1'].into_iter().find(|d| table.get(*d).is_some()) {
        return Err(HuffmanError::InvalidSubstitution(format!(
            "symbol {:?} collides with code digits",
            digit
        )));
    }
    if let Some(symbol) = text.chars().find(|s| table.get(*s).is_none()) {
        return Err(HuffmanError::UnknownSymbol(symbol));
    }

    let mut encoded = text.to_string();
    let mut buf = [0u8; 4];
    for (symbol, code) in table.iter() {
        replace_substring(&mut encoded, symbol.encode_utf8(&mut buf), code)?;
    }
    Ok(encoded)
}

pub(crate) fn decode_bits(table: &CodeTable, bits: &str) -> Result<String> {
    if table.is_empty() {
        return Err(HuffmanError::EmptyInput("cannot decode without codes"));
    }
    if bits.is_empty() {
        return Err(HuffmanError::EmptyInput("cannot decode empty bit string"));
    }

    let inverse = table.inverse();
    let max_length = table.max_code_length();

    let mut decoded = String::new();
    let mut code = String::with_capacity(max_length);
    for (i, bit) in bits.chars().enumerate() {
        if bit != '0' && bit != '1' {
            return Err(HuffmanError::MalformedCode(format!(
                "unexpected {:?} at position {}",
                bit, i
            )));
        }
        code.push(bit);

        if let Some(symbol) = inverse.get(code.as_str()) {
            decoded.push(*symbol);
            code.clear();
        } else if code.len() >= max_length {
            return Err(HuffmanError::MalformedCode(format!(
                "no code matches {:?} ending at position {}",
                code, i
            )));
        }
    }

    if !code.is_empty() {
        return Err(HuffmanError::MalformedCode(format!(
            "{} leftover bits {:?} after decoding",
            code.len(),
            code
        )));
    }

    debug!("decoded {} bits into {} symbols", bits.len(), decoded.chars().count());
    Ok(decoded)
}

/// Replaces every occurrence of `pattern` in `text`, resuming the search after
/// each inserted replacement.
pub fn replace_substring(text: &mut String, pattern: &str, replacement: &str) -> Result<()> {
    if text.is_empty() || pattern.is_empty() || replacement.is_empty() {
        return Err(HuffmanError::InvalidSubstitution(format!(
            "cannot replace {:?} with {:?} in {} bytes of text",
            pattern,
            replacement,
            text.len()
        )));
    }

    let mut pos = 0;
    while let Some(found) = text[pos..].find(pattern) {
        let start = pos + found;
        text.replace_range(start..start + pattern.len(), replacement);
        pos = start + replacement.len();
    }
    Ok(())
}
