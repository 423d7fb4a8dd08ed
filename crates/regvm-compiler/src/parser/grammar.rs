//! Alternation, concatenation, quantifiers and groups.

use regvm_bytecode::{Anchor, INFINITE};
use regvm_core::unicode::is_word_char;
use regvm_core::{CharClass, RegexOptions};

use super::ast::Node;
use super::core::{MAX_NUMBER, PResult, Parser};
use super::numbering::GroupKind;

#[derive(Clone, Copy, Debug)]
struct Quantifier {
    min: u32,
    max: u32,
    lazy: bool,
}

impl Parser<'_> {
    pub(super) fn parse_root(&mut self) -> PResult<Node> {
        let node = self.parse_alternation()?;
        if self.peek() == Some(')') {
            return Err(self.error(self.pos, "too many )'s"));
        }
        Ok(node)
    }

    fn parse_alternation(&mut self) -> PResult<Node> {
        let mut branches = self.parse_branches()?;
        if branches.len() == 1 {
            return Ok(branches.pop().unwrap_or(Node::Empty));
        }
        Ok(Node::Alternate(branches))
    }

    fn parse_branches(&mut self) -> PResult<Vec<Node>> {
        let mut branches = vec![self.parse_concat()?];
        while self.eat('|') {
            branches.push(self.parse_concat()?);
        }
        Ok(branches)
    }

    fn parse_concat(&mut self) -> PResult<Node> {
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if matches!(self.peek(), None | Some('|') | Some(')')) {
                break;
            }

            let start = self.pos;
            let atom = self.parse_atom()?;
            self.skip_trivia()?;

            let quant_start = self.pos;
            let Some(quant) = self.parse_quantifier()? else {
                items.extend(atom);
                continue;
            };
            let Some(atom) = atom else {
                return Err(self.error(quant_start, "quantifier following nothing"));
            };
            items.push(Node::Repeat {
                child: Box::new(atom),
                min: quant.min,
                max: quant.max,
                lazy: quant.lazy,
            });

            self.skip_trivia()?;
            if self.at_quantifier() {
                let text = &self.pattern[start..self.pos];
                return Err(self.error(self.pos, format!("nested quantifier after '{text}'")));
            }
        }

        Ok(match items.len() {
            0 => Node::Empty,
            1 => items.pop().unwrap_or(Node::Empty),
            _ => Node::Concat(items),
        })
    }

    /// One atom. `None` for constructs that match nothing at all, such as
    /// inline option changes.
    fn parse_atom(&mut self) -> PResult<Option<Node>> {
        let start = self.pos;
        let Some(c) = self.bump() else {
            return Ok(None);
        };
        let ci = self.options.ignore_case();

        let node = match c {
            '.' if self.options.singleline() => Node::Class {
                class: CharClass::any(),
                ci: false,
            },
            '.' => Node::NotChar { ch: '\n', ci: false },
            '^' if self.options.multiline() => Node::Anchor(Anchor::LineStart),
            '^' => Node::Anchor(Anchor::Beginning),
            '$' if self.options.multiline() => Node::Anchor(Anchor::LineEnd),
            '$' => Node::Anchor(Anchor::EndZ),
            '[' => self.parse_class(start)?,
            '(' => return self.parse_group(start),
            '\\' => self.parse_escape(start)?,
            '*' | '+' | '?' => return Err(self.error(start, "quantifier following nothing")),
            '{' if brace_quantifier(&self.pattern[start..]).is_some() => {
                return Err(self.error(start, "quantifier following nothing"));
            }
            c => Node::Char { ch: c, ci },
        };
        Ok(Some(node))
    }

    fn at_quantifier(&self) -> bool {
        match self.peek() {
            Some('*' | '+' | '?') => true,
            Some('{') => brace_quantifier(self.rest()).is_some(),
            _ => false,
        }
    }

    fn parse_quantifier(&mut self) -> PResult<Option<Quantifier>> {
        let start = self.pos;
        let (min, max) = match self.peek() {
            Some('*') => (0, INFINITE),
            Some('+') => (1, INFINITE),
            Some('?') => (0, 1),
            Some('{') => {
                let Some(brace) = brace_quantifier(self.rest()) else {
                    return Ok(None);
                };
                let bound = |n: u64| {
                    u32::try_from(n)
                        .ok()
                        .filter(|&n| n <= MAX_NUMBER)
                        .ok_or_else(|| self.error(start, "quantifier bound too large"))
                };
                let min = bound(brace.min)?;
                let max = match brace.max {
                    Some(max) => bound(max)?,
                    None => INFINITE,
                };
                if min > max {
                    return Err(self.error(start, "illegal {x,y} with x > y"));
                }
                self.pos += brace.len - 1;
                (min, max)
            }
            _ => return Ok(None),
        };
        self.bump();
        let lazy = self.eat('?');
        Ok(Some(Quantifier { min, max, lazy }))
    }

    /// After `(`.
    fn parse_group(&mut self, open: usize) -> PResult<Option<Node>> {
        self.enter(open)?;
        let result = self.parse_group_inner(open);
        self.leave();
        result
    }

    fn parse_group_inner(&mut self, open: usize) -> PResult<Option<Node>> {
        let ignore_paren = std::mem::take(&mut self.ignore_next_paren);

        if !self.eat('?') {
            if self.options.explicit_capture() || ignore_paren {
                let body = self.parse_group_body()?;
                return Ok(Some(Node::Group(Box::new(body))));
            }
            let number = self.unnamed_group(open);
            let body = self.parse_group_body()?;
            return Ok(Some(Node::Capture {
                number,
                child: Box::new(body),
            }));
        }

        let construct = self.pos;
        let node = match (self.peek(), self.peek_nth(1)) {
            (Some(':'), _) => {
                self.bump();
                Node::Group(Box::new(self.parse_group_body()?))
            }
            (Some('='), _) => self.parse_look(false, false, 1)?,
            (Some('!'), _) => self.parse_look(false, true, 1)?,
            (Some('<'), Some('=')) => self.parse_look(true, false, 2)?,
            (Some('<'), Some('!')) => self.parse_look(true, true, 2)?,
            (Some('>'), _) => {
                self.bump();
                Node::Atomic(Box::new(self.parse_group_body()?))
            }
            (Some('<' | '\''), _) => self.parse_named_group(open)?,
            (Some('('), _) => self.parse_conditional(open)?,
            _ => return self.parse_option_group(construct),
        };
        Ok(Some(node))
    }

    fn parse_look(&mut self, behind: bool, negate: bool, skip: usize) -> PResult<Node> {
        for _ in 0..skip {
            self.bump();
        }
        let child = self.parse_group_body()?;
        Ok(Node::Look {
            child: Box::new(child),
            behind,
            negate,
        })
    }

    /// `(?<name>..)`, `(?'name'..)` and `(?<7>..)`.
    fn parse_named_group(&mut self, open: usize) -> PResult<Node> {
        let close = if self.bump() == Some('<') { '>' } else { '\'' };
        let name_start = self.pos;

        let kind = match self.peek() {
            Some(c) if c.is_ascii_digit() => {
                let number = self.scan_decimal()?;
                if number == 0 {
                    return Err(self.error(name_start, "capture number cannot be zero"));
                }
                GroupKind::Numbered(number)
            }
            Some(c) if is_word_char(c) => GroupKind::Named(self.scan_name().to_string()),
            _ => {
                return Err(self.error(
                    name_start,
                    "invalid group name: group names must begin with a word character",
                ));
            }
        };
        if self.peek() == Some('-') {
            return Err(self.error(self.pos, "balancing groups are not supported"));
        }
        if !self.eat(close) {
            return Err(self.error(self.pos, "invalid group name"));
        }

        let number = self.explicit_group(kind, open);
        let body = self.parse_group_body()?;
        Ok(Node::Capture {
            number,
            child: Box::new(body),
        })
    }

    /// `(?imnsx-imnsx)` changes the options until the enclosing group ends;
    /// `(?imnsx-imnsx:..)` scopes them to its body.
    fn parse_option_group(&mut self, construct: usize) -> PResult<Option<Node>> {
        let mut options = self.options;
        let mut on = true;
        loop {
            match self.peek() {
                Some('-') => on = false,
                Some('+') => on = true,
                Some(c) => match RegexOptions::from_inline_letter(c) {
                    Some(flag) => options.set(flag, on),
                    None => break,
                },
                None => break,
            }
            self.bump();
        }

        match self.bump() {
            Some(')') => {
                self.options = options;
                Ok(None)
            }
            Some(':') => {
                let saved = std::mem::replace(&mut self.options, options);
                let body = self.parse_group_body();
                self.options = saved;
                Ok(Some(Node::Group(Box::new(body?))))
            }
            _ => Err(self.error(construct, "unrecognized grouping construct")),
        }
    }

    /// `(?(n)yes|no)`, `(?(name)yes|no)` or `(?(expr)yes|no)`, after `(?`.
    fn parse_conditional(&mut self, open: usize) -> PResult<Node> {
        let paren = self.pos;
        self.bump();

        match self.peek() {
            Some(c) if c.is_ascii_digit() => {
                let number_start = self.pos;
                let number = self.scan_decimal()?;
                if !self.eat(')') {
                    return Err(self.error(number_start, "malformed (?(N)...) reference"));
                }
                if let Some(numbering) = self.numbering
                    && !numbering.is_defined(number)
                {
                    return Err(self.error(
                        number_start,
                        format!("reference to undefined group number {number}"),
                    ));
                }
                let (yes, no) = self.parse_conditional_branches(open)?;
                return Ok(Node::CondRef { number, yes, no });
            }
            Some(c) if is_word_char(c) => {
                let name = self.scan_name();
                if self.peek() == Some(')') {
                    let number = match self.numbering {
                        None => Some(0),
                        Some(numbering) => numbering.number_of(name),
                    };
                    if let Some(number) = number {
                        self.bump();
                        let (yes, no) = self.parse_conditional_branches(open)?;
                        return Ok(Node::CondRef { number, yes, no });
                    }
                }
            }
            _ => {}
        }

        self.pos = paren;
        let rest = self.rest();
        let names_group = (rest.starts_with("(?<")
            && !rest.starts_with("(?<=")
            && !rest.starts_with("(?<!"))
            || rest.starts_with("(?'");
        if names_group {
            return Err(self.error(paren, "alternation conditions cannot capture"));
        }

        self.ignore_next_paren = true;
        let test = self.parse_atom()?;
        let Some(test) = test else {
            return Err(self.error(paren, "illegal conditional (?(...)) expression"));
        };
        let (yes, no) = self.parse_conditional_branches(open)?;
        Ok(Node::CondExpr {
            test: Box::new(test),
            yes,
            no,
        })
    }

    fn parse_conditional_branches(&mut self, open: usize) -> PResult<(Box<Node>, Box<Node>)> {
        let saved = self.options;
        let branches = self.parse_branches();
        self.options = saved;
        let mut branches = branches?;

        if !self.eat(')') {
            return Err(self.error(self.pos, "not enough )'s"));
        }
        if branches.len() > 2 {
            return Err(self.error(open, "too many | in (?()|)"));
        }
        let no = if branches.len() == 2 {
            branches.pop().unwrap_or(Node::Empty)
        } else {
            Node::Empty
        };
        let yes = branches.pop().unwrap_or(Node::Empty);
        Ok((Box::new(yes), Box::new(no)))
    }

    /// Group contents up to and including the closing paren.
    fn parse_group_body(&mut self) -> PResult<Node> {
        let saved = self.options;
        let body = self.parse_alternation();
        self.options = saved;
        let body = body?;
        if !self.eat(')') {
            return Err(self.error(self.pos, "not enough )'s"));
        }
        Ok(body)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Brace {
    min: u64,
    /// `None` for `{n,}`.
    max: Option<u64>,
    /// Bytes including both braces.
    len: usize,
}

/// Recognizes `{n}`, `{n,}` and `{n,m}` at the start of `s`.
fn brace_quantifier(s: &str) -> Option<Brace> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'{') {
        return None;
    }
    let mut i = 1;
    let min = digits(bytes, &mut i)?;
    let max = match bytes.get(i)? {
        b'}' => Some(min),
        b',' => {
            i += 1;
            if bytes.get(i) == Some(&b'}') {
                None
            } else {
                Some(digits(bytes, &mut i)?)
            }
        }
        _ => return None,
    };
    if bytes.get(i) != Some(&b'}') {
        return None;
    }
    Some(Brace {
        min,
        max,
        len: i + 1,
    })
}

fn digits(bytes: &[u8], i: &mut usize) -> Option<u64> {
    let start = *i;
    let mut value: u64 = 0;
    while let Some(&b) = bytes.get(*i)
        && b.is_ascii_digit()
    {
        value = value.saturating_mul(10).saturating_add(u64::from(b - b'0'));
        *i += 1;
    }
    (*i > start).then_some(value)
}
