use std::str::Chars;

/// A character cursor that tracks its line and column.
#[derive(Clone, Debug)]
pub(crate) struct Scanner<'a> {
    chars: Chars<'a>,
    line_no: usize,
    col_no: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(text: &'a str, line_no: usize) -> Self {
        Scanner {
            chars: text.chars(),
            line_no,
            col_no: 1,
        }
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.chars.as_str().chars().next()
    }

    pub(crate) fn peek_nth(&self, n: usize) -> Option<char> {
        self.chars.as_str().chars().nth(n)
    }

    pub(crate) fn rest(&self) -> &'a str {
        self.chars.as_str()
    }

    pub(crate) fn position(&self) -> (usize, usize) {
        (self.line_no, self.col_no)
    }

    pub(crate) fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next();
        match ch {
            Some('\n') => {
                self.line_no += 1;
                self.col_no = 1;
            }
            Some(_) => {
                self.col_no += 1;
            }
            None => {}
        }
        ch
    }

    /// Advances past every character matching `pred` and returns them.
    pub(crate) fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> &'a str {
        let substring = self.chars.as_str();
        while self.peek().map_or(false, &mut pred) {
            self.advance();
        }
        &substring[..substring.len() - self.chars.as_str().len()]
    }
}

pub(crate) fn is_word(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Checks whether `name` can be written without quotes.
pub(crate) fn is_plain_ident(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => chars.all(is_word),
        _ => false,
    }
}
