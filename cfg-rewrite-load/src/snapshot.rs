//! Snapshots: a literal map from production names to rule lists.
//!
//! The reader only understands data. Nothing in the input is evaluated.

use std::iter::Peekable;
use std::vec;

use itertools::Itertools;
use log::debug;

use cfg_rewrite_grammar::{Grammar, Productions, Rule, Symbol};

use crate::error::LoadError;
use crate::scanner::{is_plain_ident, is_word, Scanner};

pub(crate) fn load(text: &str) -> Result<Grammar, LoadError> {
    let tokens = Lexer::tokenize(text)?;
    let end = end_position(text);
    let productions = Parser {
        tokens: tokens.into_iter().peekable(),
        end,
    }
    .parse_grammar()?;
    debug!("loaded {} productions from snapshot", productions.len());
    Ok(Grammar::new(productions)?)
}

fn end_position(text: &str) -> (usize, usize) {
    let mut scanner = Scanner::new(text, 1);
    while scanner.advance().is_some() {}
    scanner.position()
}

pub(crate) fn write(grammar: &Grammar) -> String {
    if grammar.productions().is_empty() {
        return "{}".to_string();
    }
    let productions = grammar
        .productions()
        .iter()
        .map(|(lhs, rules)| {
            let rules = rules
                .iter()
                .map(|rule| format!("    [{}]", rule.iter().map(write_symbol).join(", ")))
                .join(",\n");
            format!("  {}: [\n{}\n  ]", write_key(lhs.as_str()), rules)
        })
        .join(",\n\n");
    format!("{{\n{}\n}}", productions)
}

fn write_key(name: &str) -> String {
    if is_plain_ident(name) {
        name.to_string()
    } else {
        quote(name)
    }
}

fn write_symbol(sym: &Symbol) -> String {
    match sym {
        Symbol::Name(name) if is_plain_ident(name) => format!(":{}", name),
        Symbol::Name(name) => format!(":{}", quote(name)),
        Symbol::Literal(text) => quote(text),
    }
}

fn quote(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 2);
    result.push('"');
    for ch in text.chars() {
        match ch {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            ch => result.push(ch),
        }
    }
    result.push('"');
    result
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Token {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Arrow,
    Ident(String),
    Sym(String),
    Str(String),
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::LBrace => "{".to_string(),
            Token::RBrace => "}".to_string(),
            Token::LBracket => "[".to_string(),
            Token::RBracket => "]".to_string(),
            Token::Comma => ",".to_string(),
            Token::Colon => ":".to_string(),
            Token::Arrow => "=>".to_string(),
            Token::Ident(name) => name.clone(),
            Token::Sym(name) => format!(":{}", name),
            Token::Str(text) => quote(text),
        }
    }
}

type Spanned = (Token, (usize, usize));

struct Lexer<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Lexer<'a> {
    fn tokenize(text: &'a str) -> Result<Vec<Spanned>, LoadError> {
        let mut lexer = Lexer {
            scanner: Scanner::new(text, 1),
        };
        let mut result = vec![];
        loop {
            lexer.scanner.eat_while(char::is_whitespace);
            let position = lexer.scanner.position();
            match lexer.scanner.peek() {
                Some('#') => {
                    lexer.scanner.eat_while(|ch| ch != '\n');
                }
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
        let single = match ch {
            '{' => Some(Token::LBrace),
            '}' => Some(Token::RBrace),
            '[' => Some(Token::LBracket),
            ']' => Some(Token::RBracket),
            ',' => Some(Token::Comma),
            _ => None,
        };
        if let Some(token) = single {
            self.scanner.advance();
            return Ok(token);
        }

        match ch {
            '=' if self.scanner.peek_nth(1) == Some('>') => {
                self.scanner.advance();
                self.scanner.advance();
                Ok(Token::Arrow)
            }
            ':' => match self.scanner.peek_nth(1) {
                Some('"') => {
                    self.scanner.advance();
                    Ok(Token::Sym(self.quoted(position)?))
                }
                Some(next) if is_word(next) => {
                    self.scanner.advance();
                    Ok(Token::Sym(self.scanner.eat_while(is_word).to_string()))
                }
                _ => {
                    self.scanner.advance();
                    Ok(Token::Colon)
                }
            },
            '"' | '\'' => Ok(Token::Str(self.quoted(position)?)),
            ch if is_word(ch) => Ok(Token::Ident(self.scanner.eat_while(is_word).to_string())),
            other => Err(LoadError::parse(
                "unexpected character",
                position,
                Some(other.to_string()),
            )),
        }
    }

    /// Reads a string in double or single quotes. In single quotes, only `\'`
    /// and `\\` are escapes.
    fn quoted(&mut self, position: (usize, usize)) -> Result<String, LoadError> {
        let quote = self.scanner.advance();
        let mut text = String::new();
        loop {
            match self.scanner.advance() {
                ch if ch == quote => return Ok(text),
                Some('\\') => {
                    let escaped = match (quote, self.scanner.advance()) {
                        (_, None) => break,
                        (Some('"'), Some('n')) => "\n".to_string(),
                        (Some('"'), Some('t')) => "\t".to_string(),
                        (Some('"'), Some(ch)) => ch.to_string(),
                        (_, Some(ch)) if ch == '\'' || ch == '\\' => ch.to_string(),
                        (_, Some(ch)) => format!("\\{}", ch),
                    };
                    text.push_str(&escaped);
                }
                Some(ch) => text.push(ch),
                None => break,
            }
        }
        Err(LoadError::parse("unterminated string", position, None))
    }
}

struct Parser {
    tokens: Peekable<vec::IntoIter<Spanned>>,
    end: (usize, usize),
}

impl Parser {
    fn parse_grammar(&mut self) -> Result<Productions, LoadError> {
        let mut productions = Productions::new();
        let entries = self.list(Token::LBrace, Token::RBrace, |parser| {
            let lhs = parser.key()?;
            let rules = parser.list(Token::LBracket, Token::RBracket, Parser::rule)?;
            Ok((lhs, rules))
        })?;
        for (lhs, rules) in entries {
            productions.entry(lhs).or_default().extend(rules);
        }
        match self.tokens.next() {
            Some((token, position)) => Err(LoadError::parse(
                "unexpected input after the grammar",
                position,
                Some(token.describe()),
            )),
            None => Ok(productions),
        }
    }

    fn key(&mut self) -> Result<Symbol, LoadError> {
        match self.next("expected a production name")? {
            (Token::Ident(name), _) => {
                self.expect(Token::Colon)?;
                Ok(Symbol::name(name))
            }
            (Token::Str(name), _) => {
                match self.next("expected `:` or `=>`")? {
                    (Token::Colon, _) | (Token::Arrow, _) => {}
                    (other, position) => {
                        return Err(LoadError::parse(
                            "expected `:` or `=>`",
                            position,
                            Some(other.describe()),
                        ))
                    }
                }
                Ok(Symbol::name(name))
            }
            (Token::Sym(name), _) => {
                self.expect(Token::Arrow)?;
                Ok(Symbol::name(name))
            }
            (other, position) => Err(LoadError::parse(
                "expected a production name",
                position,
                Some(other.describe()),
            )),
        }
    }

    fn rule(&mut self) -> Result<Rule, LoadError> {
        let syms = self.list(Token::LBracket, Token::RBracket, |parser| {
            match parser.next("expected a symbol")? {
                (Token::Sym(name), _) => Ok(Symbol::name(name)),
                (Token::Str(text), _) => Ok(Symbol::literal(text)),
                (other, position) => Err(LoadError::parse(
                    "expected a symbol",
                    position,
                    Some(other.describe()),
                )),
            }
        })?;
        Ok(Rule::new(syms))
    }

    /// Parses `open item, item, ... close`, allowing a trailing comma.
    fn list<T>(
        &mut self,
        open: Token,
        close: Token,
        mut item: impl FnMut(&mut Self) -> Result<T, LoadError>,
    ) -> Result<Vec<T>, LoadError> {
        self.expect(open)?;
        let mut items = vec![];
        loop {
            if self.tokens.peek().map(|(token, _)| token) == Some(&close) {
                self.tokens.next();
                return Ok(items);
            }
            items.push(item(self)?);
            match self.next("unexpected end of input")? {
                (Token::Comma, _) => {}
                (token, _) if token == close => return Ok(items),
                (other, position) => {
                    return Err(LoadError::parse(
                        format!("expected `,` or `{}`", close.describe()),
                        position,
                        Some(other.describe()),
                    ))
                }
            }
        }
    }

    fn expect(&mut self, expected: Token) -> Result<(), LoadError> {
        let reason = format!("expected `{}`", expected.describe());
        match self.next(&reason)? {
            (token, _) if token == expected => Ok(()),
            (other, position) => Err(LoadError::parse(reason, position, Some(other.describe()))),
        }
    }

    fn next(&mut self, reason: &str) -> Result<Spanned, LoadError> {
        self.tokens
            .next()
            .ok_or_else(|| LoadError::parse(reason, self.end, None))
    }
}
