//! Bison grammar files.

use itertools::Itertools;
use log::{debug, trace};

use cfg_rewrite_grammar::{Grammar, Productions, Rule, Symbol};

use crate::error::LoadError;
use crate::scanner::{is_word, Scanner};

pub(crate) fn load(text: &str) -> Result<Grammar, LoadError> {
    let (section, first_line) = rules_section(text);
    let stripped = strip_blocks(section, first_line)?;
    let tokens = Lexer::tokenize(&stripped, first_line)?;
    let productions = group(tokens)?;
    debug!("loaded {} productions", productions.len());
    Ok(Grammar::new(productions)?)
}

/// Returns the text between the first and the last `%%` line, and the line
/// number it starts at.
fn rules_section(text: &str) -> (&str, usize) {
    let mut markers = vec![];
    let mut offset = 0;
    for (idx, line) in text.split_inclusive('\n').enumerate() {
        if line.trim_end_matches(&['\n', '\r'][..]) == "%%" {
            markers.push((idx, offset, offset + line.len()));
        }
        offset += line.len();
    }
    match markers[..] {
        [] => (text, 1),
        [(idx, _, end)] => (&text[end..], idx + 2),
        [(idx, _, end), .., (_, last_start, _)] => (&text[end..last_start], idx + 2),
    }
}

#[derive(Clone, Copy, Debug)]
enum Open {
    Block,
    Comment,
}

impl Open {
    fn describe(self) -> &'static str {
        match self {
            Open::Block => "action block",
            Open::Comment => "comment",
        }
    }
}

/// Blanks out action blocks and comments. Newlines are kept, so positions in
/// the result match the input.
fn strip_blocks(section: &str, first_line: usize) -> Result<String, LoadError> {
    let mut out = String::with_capacity(section.len());
    let mut scanner = Scanner::new(section, first_line);
    let mut stack: Vec<(Open, (usize, usize))> = vec![];

    while let Some(ch) = scanner.peek() {
        let position = scanner.position();
        let rest = scanner.rest();
        match stack.last().map(|&(open, _)| open) {
            None => {
                if rest.starts_with("/*") {
                    stack.push((Open::Comment, position));
                    blank(&mut scanner, &mut out, 2);
                } else if rest.starts_with("//") {
                    blank_line(&mut scanner, &mut out);
                } else if ch == '{' {
                    stack.push((Open::Block, position));
                    blank(&mut scanner, &mut out, 1);
                } else if ch == '\'' || ch == '"' {
                    let quoted = skip_quoted(&mut scanner);
                    out.push_str(quoted);
                } else {
                    scanner.advance();
                    out.push(ch);
                }
            }
            Some(Open::Comment) => {
                if rest.starts_with("/*") {
                    stack.push((Open::Comment, position));
                    blank(&mut scanner, &mut out, 2);
                } else if rest.starts_with("*/") {
                    stack.pop();
                    blank(&mut scanner, &mut out, 2);
                } else {
                    blank(&mut scanner, &mut out, 1);
                }
            }
            Some(Open::Block) => {
                if rest.starts_with("/*") {
                    stack.push((Open::Comment, position));
                    blank(&mut scanner, &mut out, 2);
                } else if rest.starts_with("//") {
                    blank_line(&mut scanner, &mut out);
                } else if ch == '{' {
                    stack.push((Open::Block, position));
                    blank(&mut scanner, &mut out, 1);
                } else if ch == '}' {
                    stack.pop();
                    blank(&mut scanner, &mut out, 1);
                } else if ch == '\'' || ch == '"' {
                    let quoted = skip_quoted(&mut scanner);
                    out.extend(quoted.chars().map(blanked));
                } else {
                    blank(&mut scanner, &mut out, 1);
                }
            }
        }
    }

    match stack.first() {
        Some(&(open, (line, col))) => Err(LoadError::Unbalanced {
            what: open.describe(),
            line,
            col,
        }),
        None => Ok(out),
    }
}

fn blanked(ch: char) -> char {
    if ch == '\n' {
        '\n'
    } else {
        ' '
    }
}

fn blank(scanner: &mut Scanner, out: &mut String, count: usize) {
    for _ in 0..count {
        if let Some(ch) = scanner.advance() {
            out.push(blanked(ch));
        }
    }
}

fn blank_line(scanner: &mut Scanner, out: &mut String) {
    let comment = scanner.eat_while(|ch| ch != '\n');
    out.extend(comment.chars().map(blanked));
}

/// Advances past a quoted character or string, honoring backslash escapes. A
/// quote left open stops at the end of the line.
fn skip_quoted<'a>(scanner: &mut Scanner<'a>) -> &'a str {
    let rest = scanner.rest();
    let quote = scanner.advance();
    let mut escaped = false;
    while let Some(ch) = scanner.peek() {
        if ch == '\n' {
            break;
        }
        scanner.advance();
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if Some(ch) == quote {
            break;
        }
    }
    &rest[..rest.len() - scanner.rest().len()]
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Token {
    Ident(String),
    Literal(String),
    Punct(String),
    Colon,
    Pipe,
    Semicolon,
    Prec,
    Empty,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Ident(name) | Token::Punct(name) => name.clone(),
            Token::Literal(text) => format!("{}", Symbol::literal(text)),
            Token::Colon => ":".to_string(),
            Token::Pipe => "|".to_string(),
            Token::Semicolon => ";".to_string(),
            Token::Prec => "%prec".to_string(),
            Token::Empty => "%empty".to_string(),
        }
    }
}

type Spanned = (Token, (usize, usize));

struct Lexer<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Lexer<'a> {
    fn tokenize(text: &'a str, first_line: usize) -> Result<Vec<Spanned>, LoadError> {
        let mut lexer = Lexer {
            scanner: Scanner::new(text, first_line),
        };
        let mut result = vec![];
        loop {
            lexer.scanner.eat_while(char::is_whitespace);
            let position = lexer.scanner.position();
            match lexer.scanner.peek() {
                Some(ch) => {
                    let token = lexer.eat(ch, position)?;
                    result.push((token, position));
                }
                None => break,
            }
        }
        Ok(result)
    }

    fn eat(&mut self, ch: char, position: (usize, usize)) -> Result<Token, LoadError> {
        let token = match ch {
            ':' => {
                self.scanner.advance();
                Token::Colon
            }
            '|' => {
                self.scanner.advance();
                Token::Pipe
            }
            ';' => {
                self.scanner.advance();
                Token::Semicolon
            }
            '\'' => match self.char_literal_len() {
                Some(len) => {
                    self.scanner.advance();
                    let mut text = String::new();
                    for _ in 2..len {
                        text.extend(self.scanner.advance());
                    }
                    self.scanner.advance();
                    Token::Literal(unescape_char(&text))
                }
                None => self.punct_run(),
            },
            '"' => Token::Literal(self.string_literal(position)?),
            '%' if self.scanner.peek_nth(1).map_or(false, is_word) => {
                self.scanner.advance();
                let directive = self.scanner.eat_while(is_word);
                match directive {
                    "prec" => Token::Prec,
                    "empty" => Token::Empty,
                    other => {
                        return Err(LoadError::parse(
                            "unsupported directive in rules",
                            position,
                            Some(format!("%{}", other)),
                        ))
                    }
                }
            }
            ch if is_word(ch) => Token::Ident(self.scanner.eat_while(is_word).to_string()),
            _ => self.punct_run(),
        };
        Ok(token)
    }

    /// A run of punctuation, up to whitespace, a word, a reserved character or
    /// a character literal.
    fn punct_run(&mut self) -> Token {
        let mut run = String::new();
        while let Some(ch) = self.scanner.peek() {
            let ends_run = ch.is_whitespace()
                || is_word(ch)
                || matches!(ch, ':' | '|' | ';' | '"')
                || (ch == '\'' && self.char_literal_len().is_some());
            if ends_run && !run.is_empty() {
                break;
            }
            self.scanner.advance();
            run.push(ch);
        }
        Token::Punct(run)
    }

    /// The length in characters of a `'c'` or `'\c'` literal at the cursor.
    fn char_literal_len(&self) -> Option<usize> {
        match (
            self.scanner.peek_nth(0),
            self.scanner.peek_nth(1),
            self.scanner.peek_nth(2),
            self.scanner.peek_nth(3),
        ) {
            (Some('\''), Some('\\'), Some(_), Some('\'')) => Some(4),
            (Some('\''), Some(ch), Some('\''), _) if ch != '\n' && ch != '\\' => Some(3),
            _ => None,
        }
    }

    fn string_literal(&mut self, position: (usize, usize)) -> Result<String, LoadError> {
        self.scanner.advance();
        let mut text = String::new();
        loop {
            match self.scanner.advance() {
                Some('"') => return Ok(text),
                Some('\\') => match self.scanner.advance() {
                    Some(ch @ ('"' | '\\')) => text.push(ch),
                    Some(ch) => {
                        text.push('\\');
                        text.push(ch);
                    }
                    None => break,
                },
                Some('\n') | None => break,
                Some(ch) => text.push(ch),
            }
        }
        Err(LoadError::parse("unterminated string literal", position, None))
    }
}

fn unescape_char(text: &str) -> String {
    match text {
        "\\'" => "'".to_string(),
        "\\\\" => "\\".to_string(),
        other => other.to_string(),
    }
}

/// Splits tokens into productions on `;` and into alternatives on `|`.
fn group(tokens: Vec<Spanned>) -> Result<Productions, LoadError> {
    let mut productions = Productions::new();
    let mut tokens = tokens.into_iter().peekable();

    while let Some((token, position)) = tokens.next() {
        let lhs = match token {
            Token::Semicolon => continue,
            Token::Ident(name) => Symbol::name(name),
            other => {
                return Err(LoadError::parse(
                    "expected a production name",
                    position,
                    Some(other.describe()),
                ))
            }
        };
        match tokens.next() {
            Some((Token::Colon, _)) => {}
            Some((other, position)) => {
                return Err(LoadError::parse(
                    format!("expected `:` after `{}`", lhs),
                    position,
                    Some(other.describe()),
                ))
            }
            None => {
                return Err(LoadError::parse(
                    format!("production `{}` is missing `:`", lhs),
                    position,
                    None,
                ))
            }
        }

        let mut rules = vec![];
        let mut syms = vec![];
        loop {
            let (token, position) = match tokens.next() {
                Some(spanned) => spanned,
                None => {
                    return Err(LoadError::parse(
                        format!("production `{}` is missing `;`", lhs),
                        position,
                        None,
                    ))
                }
            };
            match token {
                Token::Ident(name) | Token::Punct(name) => syms.push(Symbol::name(name)),
                Token::Literal(text) => syms.push(Symbol::literal(text)),
                Token::Empty => syms.push(Symbol::empty()),
                Token::Prec => match tokens.next() {
                    Some((Token::Ident(_), _)) | Some((Token::Literal(_), _)) => {}
                    other => {
                        let position = other.as_ref().map_or(position, |&(_, pos)| pos);
                        return Err(LoadError::parse(
                            "expected a symbol after `%prec`",
                            position,
                            other.map(|(token, _)| token.describe()),
                        ));
                    }
                },
                Token::Pipe => rules.push(Rule::new(syms.drain(..))),
                Token::Semicolon => {
                    rules.push(Rule::new(syms.drain(..)));
                    break;
                }
                Token::Colon => {
                    return Err(LoadError::parse(
                        format!("unexpected `:` in production `{}`", lhs),
                        position,
                        None,
                    ))
                }
            }
        }

        trace!("`{}` has {} alternatives", lhs, rules.len());
        productions.entry(lhs).or_default().extend(rules);
    }
    Ok(productions)
}

pub(crate) fn write(grammar: &Grammar) -> String {
    grammar
        .productions()
        .iter()
        .map(|(lhs, rules)| {
            let rules = rules
                .iter()
                .map(|rule| rule.iter().map(write_symbol).join(" "))
                .join("\n  | ");
            format!("{} :\n    {}\n;", lhs, rules)
        })
        .join("\n\n")
}

fn write_symbol(sym: &Symbol) -> String {
    match sym {
        Symbol::Name(name) => name.to_string(),
        Symbol::Literal(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) if ch != '\'' && ch != '\\' && !ch.is_whitespace() => {
                    format!("'{}'", ch)
                }
                _ => format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\"")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_section() {
        let text = "%token A\n%%\na : A ;\n%%\nint main() {}\n";
        assert_eq!(rules_section(text), ("a : A ;\n", 3));
        assert_eq!(rules_section("x\n%%\na : b ;"), ("a : b ;", 3));
        assert_eq!(rules_section("a : b ;"), ("a : b ;", 1));
    }

    #[test]
    fn test_strip_keeps_positions() {
        let stripped = strip_blocks("a : b { x(); } c\n  /* } */ | d ;", 1).unwrap();
        let gap = " ".repeat(10);
        assert_eq!(stripped, format!("a : b{}c\n{}| d ;", gap, gap));
    }

    #[test]
    fn test_strip_nested_and_quoted() {
        let stripped = strip_blocks("a : '{' { if (c == '}') { \"}\"; } } ;", 1).unwrap();
        assert_eq!(stripped.split_whitespace().collect::<Vec<_>>(), ["a", ":", "'{'", ";"]);
    }

    #[test]
    fn test_unbalanced() {
        match strip_blocks("a : b\n { { } ;", 4) {
            Err(LoadError::Unbalanced { what, line, col }) => {
                assert_eq!((what, line, col), ("action block", 5, 2));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            strip_blocks("a : /* /* */ b ;", 1),
            Err(LoadError::Unbalanced { what: "comment", .. })
        ));
    }

    #[test]
    fn test_punctuation_runs() {
        let tokens: Vec<_> = Lexer::tokenize("a : <=> '+' ++'-' ;", 1)
            .unwrap()
            .into_iter()
            .map(|(token, _)| token)
            .collect();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("a".to_string()),
                Token::Colon,
                Token::Punct("<=>".to_string()),
                Token::Literal("+".to_string()),
                Token::Punct("++".to_string()),
                Token::Literal("-".to_string()),
                Token::Semicolon,
            ]
        );
    }
}
