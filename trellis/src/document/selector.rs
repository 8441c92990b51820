//! Selector lists used for structural discovery.
//!
//! Supported syntax is deliberately small: compound selectors made of a type
//! (`li`, `*`), classes (`.dropdown`), an id (`#main`), attribute tests
//! (`[href]`, `[role=menu]`, `[data-x="y"]`) and `:has(...)`, joined into a
//! comma-separated list. Combinators are rejected.

use std::fmt;

use thiserror::Error;

/// Error returned when a selector can't be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid selector `{selector}`: {message}")]
pub struct SelectorError {
    /// The selector source.
    pub selector: String,
    /// What went wrong.
    pub message: String,
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Compound>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Compound {
    pub(crate) tag: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attributes: Vec<AttributeTest>,
    pub(crate) has: Vec<Selector>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AttributeTest {
    pub(crate) name: String,
    pub(crate) value: Option<String>,
}

impl Selector {
    /// Parse a selector list.
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let mut parser = Parser {
            chars: source.chars().collect(),
            pos: 0,
        };
        let alternatives = parser.list(false).map_err(|message| SelectorError {
            selector: source.to_string(),
            message,
        })?;
        Ok(Self {
            source: source.trim().to_string(),
            alternatives,
        })
    }

    /// The selector as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn alternatives(&self) -> &[Compound] {
        &self.alternatives
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), String> {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => Err(format!("expected `{expected}`, found `{c}`")),
            None => Err(format!("expected `{expected}`, found end of input")),
        }
    }

    fn list(&mut self, nested: bool) -> Result<Vec<Compound>, String> {
        let mut alternatives = Vec::new();
        loop {
            self.skip_whitespace();
            alternatives.push(self.compound()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(')') if nested => return Ok(alternatives),
                None if !nested => return Ok(alternatives),
                None => return Err("unclosed `:has(`".to_string()),
                Some(c) if c.is_alphanumeric() || matches!(c, '.' | '#' | '[' | '*' | '>' | '+' | '~') => {
                    return Err("combinators are not supported".to_string());
                }
                Some(c) => return Err(format!("unexpected `{c}`")),
            }
        }
    }

    fn compound(&mut self) -> Result<Compound, String> {
        let mut compound = Compound::default();
        let mut empty = true;

        if self.peek() == Some('*') {
            self.pos += 1;
            empty = false;
        } else if self.peek().is_some_and(is_ident_char) {
            compound.tag = Some(self.ident()?.to_ascii_lowercase());
            empty = false;
        }

        loop {
            match self.peek() {
                Some('.') => {
                    self.pos += 1;
                    compound.classes.push(self.ident()?);
                }
                Some('#') => {
                    self.pos += 1;
                    if compound.id.is_some() {
                        return Err("more than one id in a compound selector".to_string());
                    }
                    compound.id = Some(self.ident()?);
                }
                Some('[') => {
                    self.pos += 1;
                    compound.attributes.push(self.attribute()?);
                }
                Some(':') => {
                    self.pos += 1;
                    let name = self.ident()?;
                    if name != "has" {
                        return Err(format!("unsupported pseudo-class `:{name}`"));
                    }
                    self.expect('(')?;
                    let start = self.pos;
                    let alternatives = self.list(true)?;
                    let source: String = self.chars[start..self.pos].iter().collect();
                    self.expect(')')?;
                    compound.has.push(Selector {
                        source: source.trim().to_string(),
                        alternatives,
                    });
                }
                _ => break,
            }
            empty = false;
        }

        if empty {
            return Err(match self.peek() {
                Some(c) => format!("expected a selector, found `{c}`"),
                None => "expected a selector".to_string(),
            });
        }
        Ok(compound)
    }

    fn ident(&mut self) -> Result<String, String> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(match self.peek() {
                Some(c) => format!("expected a name, found `{c}`"),
                None => "expected a name, found end of input".to_string(),
            });
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn attribute(&mut self) -> Result<AttributeTest, String> {
        self.skip_whitespace();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_whitespace();
        let value = if self.peek() == Some('=') {
            self.pos += 1;
            self.skip_whitespace();
            Some(self.attribute_value()?)
        } else {
            None
        };
        self.skip_whitespace();
        self.expect(']')?;
        Ok(AttributeTest { name, value })
    }

    fn attribute_value(&mut self) -> Result<String, String> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let start = self.pos;
                while self.peek().is_some_and(|c| c != quote) {
                    self.pos += 1;
                }
                let value: String = self.chars[start..self.pos].iter().collect();
                self.expect(quote)?;
                Ok(value)
            }
            _ => self.ident(),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
