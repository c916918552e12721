//! Plain-text extraction from RTF.
//!
//! A small tokenizer plus a group-aware walker. Header destinations (font
//! table, info, stylesheet, `\*` groups) are skipped; `\par`, `\line` and
//! `\row` end a line and `\tab` and `\cell` produce tabs.

use super::error::{RtfError, RtfResult};

/// RTF token.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    OpenBrace,
    CloseBrace,
    Control { word: &'a str, param: Option<i32> },
    /// Escaped character (`\\`, `\{`, `\}`, `\~`, ...)
    Symbol(char),
    /// `\'hh` byte in the document code page
    Hex(u8),
    Text(&'a str),
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    #[inline]
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn next_token(&mut self) -> RtfResult<Option<Token<'a>>> {
        let rest = self.rest();
        let Some(ch) = rest.chars().next() else {
            return Ok(None);
        };

        match ch {
            '{' => {
                self.pos += 1;
                Ok(Some(Token::OpenBrace))
            },
            '}' => {
                self.pos += 1;
                Ok(Some(Token::CloseBrace))
            },
            '\\' => self.parse_control().map(Some),
            '\r' | '\n' => {
                self.pos += 1;
                self.next_token()
            },
            _ => {
                let end = rest
                    .find(['{', '}', '\\', '\r', '\n'])
                    .unwrap_or(rest.len());
                self.pos += end;
                Ok(Some(Token::Text(&rest[..end])))
            },
        }
    }

    fn parse_control(&mut self) -> RtfResult<Token<'a>> {
        self.pos += 1; // '\'
        let rest = self.rest();
        let ch = rest.chars().next().ok_or(RtfError::UnexpectedEof)?;

        if !ch.is_ascii_alphabetic() {
            self.pos += ch.len_utf8();
            return match ch {
                '\'' => {
                    let hex = self.rest().get(..2).ok_or(RtfError::UnexpectedEof)?;
                    let byte = u8::from_str_radix(hex, 16).map_err(|_| {
                        RtfError::InvalidControlWord(format!("bad hex escape \\'{}", hex))
                    })?;
                    self.pos += 2;
                    Ok(Token::Hex(byte))
                },
                '~' => Ok(Token::Symbol('\u{00A0}')),
                '-' => Ok(Token::Symbol('\u{00AD}')),
                '_' => Ok(Token::Symbol('\u{2011}')),
                '\n' | '\r' => Ok(Token::Control {
                    word: "par",
                    param: None,
                }),
                '*' => Ok(Token::Control {
                    word: "*",
                    param: None,
                }),
                other => Ok(Token::Symbol(other)),
            };
        }

        let word_len = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        let word = &rest[..word_len];
        self.pos += word_len;

        let rest = self.rest();
        let sign = usize::from(rest.starts_with('-'));
        let digits = rest[sign..]
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len() - sign);
        let param = if digits > 0 {
            let value = rest[..sign + digits].parse::<i32>()?;
            self.pos += sign + digits;
            Some(value)
        } else {
            None
        };

        // A single space delimits the control word and is not text
        if self.rest().starts_with(' ') {
            self.pos += 1;
        }

        Ok(Token::Control { word, param })
    }
}

/// Destinations whose content is not document text.
const SKIPPED_DESTINATIONS: &[&str] = &[
    "fonttbl",
    "colortbl",
    "stylesheet",
    "info",
    "pict",
    "header",
    "footer",
    "listtable",
    "listoverridetable",
];

#[derive(Debug, Clone, Copy)]
struct GroupState {
    skip: bool,
    /// Fallback characters to drop after `\uN`
    uc: usize,
}

/// Extract the visible text of an RTF document.
///
/// Fails with [`RtfError::InvalidStructure`] when braces are unbalanced.
///
/// ```
/// use studyplan::rtf::plain_text;
/// let text = plain_text(r"{\rtf1 {\b Total}\tab \{\{CORE_TOTAL\}\}\par}").unwrap();
/// assert_eq!(text, "Total\t{{CORE_TOTAL}}\n");
/// ```
pub fn plain_text(rtf: &str) -> RtfResult<String> {
    let mut lexer = Lexer::new(rtf);
    let mut out = String::with_capacity(rtf.len() / 2);
    let mut stack: Vec<GroupState> = Vec::new();
    let mut state = GroupState { skip: false, uc: 1 };
    let mut pending_skip = 0usize;
    let mut pending_high = None;
    let mut group_start = false;
    let mut saw_root = false;

    while let Some(token) = lexer.next_token()? {
        let at_group_start = std::mem::take(&mut group_start);

        match token {
            Token::OpenBrace => {
                if saw_root && stack.is_empty() {
                    return Err(RtfError::InvalidStructure(
                        "content after the closing brace".to_string(),
                    ));
                }
                saw_root = true;
                stack.push(state);
                group_start = true;
                pending_skip = 0;
            },
            Token::CloseBrace => {
                state = stack.pop().ok_or_else(|| {
                    RtfError::InvalidStructure("unmatched closing brace".to_string())
                })?;
                pending_skip = 0;
            },
            Token::Control { word, param } => {
                if at_group_start && (word == "*" || SKIPPED_DESTINATIONS.contains(&word)) {
                    state.skip = true;
                    continue;
                }
                if state.skip {
                    continue;
                }
                match word {
                    "par" | "line" | "row" | "sect" | "page" => out.push('\n'),
                    "tab" | "cell" => out.push('\t'),
                    "uc" => state.uc = param.unwrap_or(1).max(0) as usize,
                    "u" => {
                        if let Some(code) = param {
                            push_utf16_unit(&mut out, &mut pending_high, code);
                            pending_skip = state.uc;
                        }
                    },
                    _ => {},
                }
            },
            Token::Symbol(c) if !state.skip => out.push(c),
            Token::Hex(byte) if !state.skip => {
                if pending_skip > 0 {
                    pending_skip -= 1;
                } else {
                    out.push(cp1252_char(byte));
                }
            },
            Token::Text(text) if !state.skip => {
                let mut chars = text.chars();
                while pending_skip > 0 && chars.next().is_some() {
                    pending_skip -= 1;
                }
                out.push_str(chars.as_str());
            },
            _ => {},
        }
    }

    if !stack.is_empty() {
        return Err(RtfError::InvalidStructure(format!(
            "{} unclosed group(s)",
            stack.len()
        )));
    }

    Ok(out)
}

/// Append one UTF-16 unit written as a signed `\u` parameter.
///
/// A high surrogate is held in `pending_high` until its low half arrives.
fn push_utf16_unit(out: &mut String, pending_high: &mut Option<u16>, code: i32) {
    let unit = code as i16 as u16;
    match unit {
        0xD800..=0xDBFF => *pending_high = Some(unit),
        0xDC00..=0xDFFF => {
            let c = pending_high
                .take()
                .and_then(|high| char::decode_utf16([high, unit]).next()?.ok());
            out.push(c.unwrap_or(char::REPLACEMENT_CHARACTER));
        },
        _ => {
            if pending_high.take().is_some() {
                out.push(char::REPLACEMENT_CHARACTER);
            }
            out.push(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER));
        },
    }
}

/// Windows-1252 byte to char. The 0x80-0x9F block differs from Latin-1.
fn cp1252_char(byte: u8) -> char {
    const HIGH: [char; 32] = [
        '€', '\u{81}', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', '\u{8D}', 'Ž',
        '\u{8F}', '\u{90}', '‘', '’', '“', '”', '•', '–', '—', '˜', '™', 'š', '›', 'œ',
        '\u{9D}', 'ž', 'Ÿ',
    ];
    match byte {
        0x80..=0x9F => HIGH[(byte - 0x80) as usize],
        b => b as char,
    }
}
