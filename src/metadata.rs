//! Stores a code table next to encoded output.
//!
//! Layout, little endian: entry count (`u32`), then per entry the symbol's
//! scalar value (`u32`), the code length (`u32`) and the code as ASCII
//! `'0'`/`'1'` bytes.

use std::io::{self, Read, Write};

use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};

pub fn write_code_table<W: Write>(writer: &mut W, table: &CodeTable) -> Result<()> {
    let count = u32::try_from(table.len())
        .map_err(|_| HuffmanError::MalformedCode("too many symbols to store".to_string()))?;
    writer.write_all(&count.to_le_bytes())?;

    for (symbol, code) in table.iter() {
        let code_len = u32::try_from(code.len())
            .map_err(|_| HuffmanError::MalformedCode(format!("code for {:?} too long to store", symbol)))?;
        writer.write_all(&u32::from(symbol).to_le_bytes())?;
        writer.write_all(&code_len.to_le_bytes())?;
        writer.write_all(code.as_bytes())?;
    }
    Ok(())
}

pub fn read_code_table<R: Read>(reader: &mut R) -> Result<CodeTable> {
    let count = read_u32(reader)?;

    let mut pairs = Vec::new();
    for _ in 0..count {
        let raw_symbol = read_u32(reader)?;
        let symbol = char::from_u32(raw_symbol).ok_or_else(|| {
            HuffmanError::MalformedCode(format!("{:#x} is not a valid symbol", raw_symbol))
        })?;

        let code_len = read_u32(reader)? as usize;
        let mut code_bytes = Vec::new();
        (&mut *reader).take(code_len as u64).read_to_end(&mut code_bytes)?;
        if code_bytes.len() != code_len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("code for {:?} truncated", symbol),
            ).into());
        }

        let code = String::from_utf8(code_bytes).map_err(|_| {
            HuffmanError::MalformedCode(format!("code for {:?} is not text", symbol))
        })?;
        pairs.push((symbol, code));
    }

    CodeTable::from_pairs(pairs)
}

fn read_u32<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}
