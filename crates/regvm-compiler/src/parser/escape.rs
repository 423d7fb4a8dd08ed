//! Backslash escapes.

use regvm_bytecode::Anchor;
use regvm_core::CharClass;
use regvm_core::unicode::{self, is_word_char};

use super::ast::Node;
use super::core::{PResult, Parser};

impl Parser<'_> {
    /// Escape outside a character class. `start` is the backslash offset.
    pub(super) fn parse_escape(&mut self, start: usize) -> PResult<Node> {
        let Some(c) = self.peek() else {
            return Err(self.error(start, "illegal \\ at end of pattern"));
        };
        let ecma = self.options.ecma_script();
        let ci = self.options.ignore_case();

        let anchor = match c {
            'b' if ecma => Some(Anchor::EcmaWordBoundary),
            'b' => Some(Anchor::WordBoundary),
            'B' if ecma => Some(Anchor::NonEcmaWordBoundary),
            'B' => Some(Anchor::NonWordBoundary),
            'A' => Some(Anchor::Beginning),
            'G' => Some(Anchor::Start),
            'Z' => Some(Anchor::EndZ),
            'z' => Some(Anchor::End),
            _ => None,
        };
        if let Some(anchor) = anchor {
            self.bump();
            return Ok(Node::Anchor(anchor));
        }

        if let Some((class, folds)) = self.parse_class_escape()? {
            return Ok(Node::Class {
                class,
                ci: ci && folds,
            });
        }

        if c == 'k' {
            self.bump();
            let number = self.parse_named_backref(start)?;
            return Ok(Node::BackRef { number, ci });
        }

        if ('1'..='9').contains(&c)
            && let Some(number) = self.parse_numbered_backref(start)?
        {
            return Ok(Node::BackRef { number, ci });
        }

        let ch = self.parse_char_escape(start, false)?;
        Ok(Node::Char { ch, ci })
    }

    /// `\d \w \s`, their negations and `\p{..}`/`\P{..}`. The flag tells
    /// whether case-insensitive matching should expand the class; the
    /// shorthands are already closed under case mapping.
    pub(super) fn parse_class_escape(&mut self) -> PResult<Option<(CharClass, bool)>> {
        let ecma = self.options.ecma_script();
        let class = match self.peek() {
            Some('d') => unicode::digit_class(ecma),
            Some('D') => unicode::digit_class(ecma).negated(),
            Some('w') => unicode::word_class(ecma),
            Some('W') => unicode::word_class(ecma).negated(),
            Some('s') => unicode::space_class(ecma),
            Some('S') => unicode::space_class(ecma).negated(),
            Some(p @ ('p' | 'P')) => {
                self.bump();
                let class = self.parse_property()?;
                let class = if p == 'P' { class.negated() } else { class };
                return Ok(Some((class, true)));
            }
            _ => return Ok(None),
        };
        self.bump();
        Ok(Some((class, false)))
    }

    /// `{Name}` after `\p`.
    fn parse_property(&mut self) -> PResult<CharClass> {
        let open = self.pos;
        if !self.eat('{') {
            return Err(self.error(open, "incomplete \\p{X} character escape"));
        }
        let Some(len) = self.rest().find('}') else {
            return Err(self.error(open, "incomplete \\p{X} character escape"));
        };
        let name = &self.pattern[self.pos..self.pos + len];
        if name.is_empty() {
            return Err(self.error(open, "malformed \\p{X} character escape"));
        }
        let Some(ranges) = unicode::property_ranges(name) else {
            return Err(self.error(open, format!("unknown property '{name}'")));
        };
        self.pos += len + 1;

        let mut class = CharClass::new();
        class.push_ranges(ranges);
        Ok(class)
    }

    /// `<name>`, `'name'` or `<3>` after `\k`.
    fn parse_named_backref(&mut self, start: usize) -> PResult<u32> {
        let close = match self.bump() {
            Some('<') => '>',
            Some('\'') => '\'',
            _ => return Err(self.error(start, "malformed \\k<...> named back reference")),
        };

        let name_start = self.pos;
        let number = match self.peek() {
            Some(c) if c.is_ascii_digit() => {
                let number = self.scan_decimal()?;
                if let Some(numbering) = self.numbering
                    && !numbering.is_defined(number)
                {
                    return Err(self.error(
                        name_start,
                        format!("reference to undefined group number {number}"),
                    ));
                }
                number
            }
            Some(c) if is_word_char(c) => {
                let name = self.scan_name();
                match self.numbering {
                    None => 0,
                    Some(numbering) => numbering.number_of(name).ok_or_else(|| {
                        let message = format!("reference to undefined group name '{name}'");
                        self.error(name_start, message)
                    })?,
                }
            }
            _ => return Err(self.error(start, "malformed \\k<...> named back reference")),
        };

        if !self.eat(close) {
            return Err(self.error(start, "malformed \\k<...> named back reference"));
        }
        Ok(number)
    }

    /// `\1`..`\99..`. Returns `None` when the digits should be read as an
    /// octal escape instead.
    fn parse_numbered_backref(&mut self, start: usize) -> PResult<Option<u32>> {
        let digits_start = self.pos;

        if self.options.ecma_script() {
            // Longest digit prefix naming a group that opens before the reference.
            let Some(numbering) = self.numbering else {
                return Ok(None);
            };
            let mut number: u32 = 0;
            let mut best = None;
            while let Some(d) = self.peek().and_then(|c| c.to_digit(10)) {
                let Some(next) = number.checked_mul(10).and_then(|n| n.checked_add(d)) else {
                    break;
                };
                if next > numbering.max_number() {
                    break;
                }
                number = next;
                self.bump();
                if numbering.open_offset(number).is_some_and(|open| open < start) {
                    best = Some((number, self.pos));
                }
            }
            return Ok(match best {
                Some((number, end)) => {
                    self.pos = end;
                    Some(number)
                }
                None => {
                    self.pos = digits_start;
                    None
                }
            });
        }

        let number = self.scan_decimal()?;
        match self.numbering {
            None => Ok(Some(number)),
            Some(numbering) if numbering.is_defined(number) => Ok(Some(number)),
            Some(_) if number <= 9 => Err(self.error(
                digits_start,
                format!("reference to undefined group number {number}"),
            )),
            Some(_) => {
                self.pos = digits_start;
                Ok(None)
            }
        }
    }

    /// Single-character escape, after the backslash. Inside a class `\b` is
    /// backspace.
    pub(super) fn parse_char_escape(&mut self, start: usize, in_class: bool) -> PResult<char> {
        let Some(c) = self.bump() else {
            return Err(self.error(start, "illegal \\ at end of pattern"));
        };
        let ch = match c {
            '0'..='7' => {
                self.pos -= 1;
                self.scan_octal()
            }
            'x' => self.scan_hex(start, 2)?,
            'u' => self.scan_hex(start, 4)?,
            'a' => '\x07',
            'b' if in_class => '\x08',
            'e' => '\x1B',
            'f' => '\x0C',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\x0B',
            'c' => self.scan_control(start)?,
            c if !self.options.ecma_script() && is_word_char(c) => {
                return Err(self.error(start, format!("unrecognized escape sequence \\{c}")));
            }
            c => c,
        };
        Ok(ch)
    }

    /// Up to three octal digits, truncated to a byte.
    fn scan_octal(&mut self) -> char {
        let mut value = 0u32;
        for _ in 0..3 {
            let Some(d) = self.peek().and_then(|c| c.to_digit(8)) else {
                break;
            };
            value = value * 8 + d;
            self.bump();
        }
        char::from(u8::try_from(value & 0xFF).unwrap_or_default())
    }

    fn scan_hex(&mut self, start: usize, len: usize) -> PResult<char> {
        let mut value = 0u32;
        for _ in 0..len {
            let Some(d) = self.peek().and_then(|c| c.to_digit(16)) else {
                return Err(self.error(start, "insufficient hex digits"));
            };
            value = value * 16 + d;
            self.bump();
        }
        char::from_u32(value)
            .ok_or_else(|| self.error(start, "escape names a surrogate code point"))
    }

    /// `\cX`: control character from a letter or one of `@[\]^_`.
    fn scan_control(&mut self, start: usize) -> PResult<char> {
        let Some(c) = self.bump() else {
            return Err(self.error(start, "missing control character"));
        };
        let code = c.to_ascii_uppercase() as u32;
        if (0x40..0x60).contains(&code) {
            return Ok(char::from(u8::try_from(code - 0x40).unwrap_or_default()));
        }
        Err(self.error(start, "unrecognized control character"))
    }
}
