//! Strict quoting rules on top of the `csv` reader.
//!
//! The `csv` crate recovers silently from malformed quoting (text after a
//! closing quote is glued to the field, an unterminated quote swallows the rest
//! of the file). This pass rejects both before any record is interpreted.

use crate::csv_validator::FormatError;

const DELIMITER: u8 = b',';
const QUOTE: u8 = b'"';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    FieldStart,
    Unquoted,
    Quoted,
    /// A quote was seen inside a quoted field: either an escaped `""` or the closing quote
    QuoteInQuoted,
}

/// Scan raw CSV bytes and fail on the first malformed quoted field.
///
/// A quote inside an unquoted field is taken literally, as the reader does.
pub fn check_strict_quoting(input: &[u8]) -> Result<(), FormatError> {
    let mut state = State::FieldStart;
    let mut line: u64 = 1;
    let mut quote_opened_on: u64 = 1;

    for &byte in input {
        state = match (state, byte) {
            (State::FieldStart, QUOTE) => {
                quote_opened_on = line;
                State::Quoted
            }
            (State::FieldStart | State::Unquoted, DELIMITER) => State::FieldStart,
            (State::FieldStart | State::Unquoted, b'\r') => State::FieldStart,
            (State::FieldStart | State::Unquoted, b'\n') => {
                line += 1;
                State::FieldStart
            }
            (State::FieldStart | State::Unquoted, _) => State::Unquoted,

            (State::Quoted, QUOTE) => State::QuoteInQuoted,
            (State::Quoted, b'\n') => {
                line += 1;
                State::Quoted
            }
            (State::Quoted, _) => State::Quoted,

            (State::QuoteInQuoted, QUOTE) => State::Quoted,
            (State::QuoteInQuoted, DELIMITER | b'\r') => State::FieldStart,
            (State::QuoteInQuoted, b'\n') => {
                line += 1;
                State::FieldStart
            }
            (State::QuoteInQuoted, other) => {
                return Err(FormatError::MalformedRecord {
                    line,
                    message: format!(
                        "'{}' expected after '\"', found {:?}",
                        DELIMITER as char,
                        String::from_utf8_lossy(&[other])
                    ),
                });
            }
        };
    }

    if state == State::Quoted {
        return Err(FormatError::MalformedRecord {
            line: quote_opened_on,
            message: "unexpected end of data inside a quoted field".to_string(),
        });
    }

    Ok(())
}
