//! Bracketed character classes.

use regvm_core::CharClass;

use super::ast::Node;
use super::core::{PResult, Parser};

impl Parser<'_> {
    /// After `[`. `open` is the bracket offset.
    pub(super) fn parse_class(&mut self, open: usize) -> PResult<Node> {
        let class = self.parse_class_body(open)?;
        Ok(Node::Class {
            class,
            ci: self.options.ignore_case(),
        })
    }

    fn parse_class_body(&mut self, open: usize) -> PResult<CharClass> {
        let mut class = CharClass::new();
        if self.eat('^') {
            class.negate();
        }

        let mut first = true;
        loop {
            let item = self.pos;
            let Some(c) = self.bump() else {
                return Err(self.error(open, "unterminated [] set"));
            };
            match c {
                ']' if !first => return Ok(class),
                '-' if !first && self.peek() == Some('[') => {
                    let sub_open = self.pos;
                    self.bump();
                    let sub = self.parse_class_body(sub_open)?;
                    class.set_subtraction(sub);
                    if !self.eat(']') {
                        return Err(self.error(
                            self.pos,
                            "a subtraction must be the last element in a character class",
                        ));
                    }
                    return Ok(class);
                }
                '\\' => match self.parse_class_escape()? {
                    Some((shorthand, _)) => {
                        if self.range_follows() {
                            let text = &self.pattern[item..self.pos];
                            return Err(self.error(
                                item,
                                format!("cannot include class {text} in character range"),
                            ));
                        }
                        class.push_class(&shorthand);
                    }
                    None => {
                        let ch = self.parse_char_escape(item, true)?;
                        self.parse_class_item(&mut class, ch, item)?;
                    }
                },
                c => self.parse_class_item(&mut class, c, item)?,
            }
            first = false;
        }
    }

    /// A `-` that starts a range rather than a subtraction or a literal.
    fn range_follows(&self) -> bool {
        self.peek() == Some('-') && !matches!(self.peek_nth(1), None | Some(']' | '['))
    }

    /// Adds `first` alone or as the start of a range.
    fn parse_class_item(&mut self, class: &mut CharClass, first: char, item: usize) -> PResult<()> {
        if !self.range_follows() {
            class.push_char(first);
            return Ok(());
        }
        self.bump();

        let end = self.pos;
        let last = match self.bump() {
            Some('\\') => {
                if matches!(self.peek(), Some('d' | 'D' | 'w' | 'W' | 's' | 'S' | 'p' | 'P')) {
                    let text = &self.pattern[end..self.pos + 1];
                    return Err(self.error(
                        end,
                        format!("cannot include class {text} in character range"),
                    ));
                }
                self.parse_char_escape(end, true)?
            }
            Some(c) => c,
            None => return Err(self.error(item, "unterminated [] set")),
        };
        if last < first {
            let text = &self.pattern[item..self.pos];
            return Err(self.error(item, format!("[{text}] range in reverse order")));
        }
        class.push_range(first, last);
        Ok(())
    }
}
