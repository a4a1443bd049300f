//! Line-record codec for the delimiter-encoded backing files.
//!
//! Each record is one `key=value;key=value|` line and a backing file is the
//! concatenation of encoded records. The format has no escaping: keys and
//! values containing a delimiter are rejected at encode time rather than
//! written through corrupted.

use crate::error::{CodecError, StoreError};
use crate::record::{Model, Record};

/// Separates fields within a record.
pub const FIELD_SEPARATOR: char = ';';
/// Separates a key from its value.
pub const KEY_VALUE_SEPARATOR: char = '=';
/// Terminates a record.
pub const RECORD_SEPARATOR: char = '|';

fn check_reserved(field: &str, value: &str) -> Result<(), CodecError> {
    if value
        .chars()
        .any(|c| matches!(c, ';' | '=' | '|' | '\r' | '\n'))
    {
        return Err(CodecError::ReservedCharacter {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Encode one record as a `key=value;key=value|` line, fields in insertion
/// order.
pub fn encode(record: &Record) -> Result<String, CodecError> {
    let mut line = String::new();
    for (i, (key, value)) in record.iter().enumerate() {
        check_reserved(key, key)?;
        check_reserved(key, value)?;
        if i > 0 {
            line.push(FIELD_SEPARATOR);
        }
        line.push_str(key);
        line.push(KEY_VALUE_SEPARATOR);
        line.push_str(value);
    }
    line.push(RECORD_SEPARATOR);
    line.push('\n');
    Ok(line)
}

/// Decode a single record segment. A trailing record separator is accepted
/// and stripped, so `decode(encode(r))` restores `r`.
///
/// Blank chunks are dropped and keys/values are trimmed; a non-blank chunk
/// without a key/value separator fails rather than producing a partial
/// record.
pub fn decode(text: &str) -> Result<Record, CodecError> {
    let text = text.trim();
    let text = text.strip_suffix(RECORD_SEPARATOR).unwrap_or(text);

    let mut record = Record::new();
    for chunk in text.split(FIELD_SEPARATOR) {
        if chunk.trim().is_empty() {
            continue;
        }
        let (key, value) = chunk
            .split_once(KEY_VALUE_SEPARATOR)
            .ok_or_else(|| CodecError::MissingSeparator(chunk.trim().to_string()))?;
        record.set(key.trim(), value.trim());
    }
    Ok(record)
}

/// Split a whole backing file into records. Blank segments and stray
/// carriage returns or newlines between records are tolerated.
pub fn parse(text: &str) -> Result<Vec<Record>, CodecError> {
    text.split(RECORD_SEPARATOR)
        .filter(|segment| !segment.trim().is_empty())
        .map(decode)
        .collect()
}

/// Encode a whole collection of models as a backing-file payload.
pub fn encode_models<'a, M: Model + 'a>(
    models: impl IntoIterator<Item = &'a M>,
) -> Result<String, StoreError> {
    let mut out = String::new();
    for model in models {
        let record = Record::from_model(model)?;
        out.push_str(&encode(&record)?);
    }
    Ok(out)
}

/// Decode a backing-file payload into models.
pub fn parse_models<M: Model>(text: &str) -> Result<Vec<M>, StoreError> {
    parse(text)?.iter().map(|record| record.to_model()).collect()
}
