//! Command parser for the console.
//!
//! Examples:
//!   "open north"                 -> Verb::Open, direction=North
//!   "open the door to the east"  -> Verb::Open, direction=East
//!   "unlock gate with key"       -> Verb::Unlock, direction=Custom("gate")
//!   "open door"                  -> Verb::Open, direction=Custom("door")
//!   "n" or "go north"            -> Verb::Go, direction=North
//!   "@debug exit out"            -> Verb::Debug, args=["exit", "out"]
//!
//! Usage:
//!   let intent = parse_command("close the door south");
//!   match intent.verb { Verb::Close => { /* intent.dir_arg() */ }, _ => {} }

use crate::models::types::Direction;
use once_cell::sync::Lazy;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Open,
    Close,
    Lock,
    Unlock,
    Go,
    Look,
    Exits,
    Who,
    Help,
    Quit,
    /// `@debug ...`
    Debug,
    /// Unrecognized; the raw verb is kept in `Intent::raw_verb`
    Unknown,
}

impl Verb {
    pub fn as_str(&self) -> &str {
        match self {
            Verb::Open => "open",
            Verb::Close => "close",
            Verb::Lock => "lock",
            Verb::Unlock => "unlock",
            Verb::Go => "go",
            Verb::Look => "look",
            Verb::Exits => "exits",
            Verb::Who => "who",
            Verb::Help => "help",
            Verb::Quit => "quit",
            Verb::Debug => "@debug",
            Verb::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Intent {
    pub verb: Verb,
    /// Normalized input line
    pub original: String,
    /// Tokens after the verb
    pub args: Vec<String>,
    /// Direction for movement and door verbs. Words that are not a compass direction become
    /// `Direction::Custom` (ie: "gate").
    pub direction: Option<Direction>,
    pub raw_verb: Option<String>,
}

impl Intent {
    /// Direction argument as the services expect it; empty when none was given.
    pub fn dir_arg(&self) -> String {
        self.direction.as_ref().map(|d| d.to_string()).unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
struct Token {
    lower: String,
    quoted: bool,
}

pub fn parse_command(input: &str) -> Intent {
    let normalized = normalize(input);
    let tokens = tokenize(&normalized);

    let Some(first) = tokens.first() else {
        return Intent {
            verb: Verb::Unknown,
            original: normalized,
            args: vec![],
            direction: None,
            raw_verb: None,
        };
    };

    // Bare directions: "n", "north", "out"
    if !first.quoted
        && let Some(dir) = Direction::parse(&first.lower)
    {
        return Intent {
            verb: Verb::Go,
            args: vec![],
            original: normalized,
            direction: Some(dir),
            raw_verb: None,
        };
    }

    let (verb, raw_verb) = match VERBS.get(first.lower.as_str()) {
        Some(v) => (*v, None),
        None => (Verb::Unknown, Some(first.lower.clone())),
    };

    let rest = &tokens[1..];
    let direction = match verb {
        Verb::Go | Verb::Open | Verb::Close | Verb::Lock | Verb::Unlock => direction_from(rest),
        _ => None,
    };

    Intent {
        verb,
        args: rest.iter().map(|t| t.lower.clone()).collect(),
        original: normalized,
        direction,
        raw_verb,
    }
}

//
// ---- Normalization & tokenization ----
//

fn normalize(s: &str) -> String {
    // lowercase, trim, collapse spaces
    let mut out = String::with_capacity(s.len());
    let mut last_space = false;
    for ch in s.trim().chars() {
        let c = ch.to_ascii_lowercase();
        if c.is_whitespace() {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(c);
            last_space = false;
        }
    }
    out
}

fn tokenize(s: &str) -> Vec<Token> {
    let mut toks = Vec::new();
    let mut buf = String::new();
    let mut in_quote: Option<char> = None;

    let push_tok = |quoted: bool, buf: &mut String, toks: &mut Vec<Token>| {
        if !buf.is_empty() {
            toks.push(Token { lower: std::mem::take(buf), quoted });
        }
    };

    for ch in s.chars() {
        match in_quote {
            Some(q) if ch == q => {
                push_tok(true, &mut buf, &mut toks);
                in_quote = None;
            }
            Some(_) => buf.push(ch),
            None => match ch {
                '"' | '\'' => {
                    push_tok(false, &mut buf, &mut toks);
                    in_quote = Some(ch);
                }
                ' ' => push_tok(false, &mut buf, &mut toks),
                _ => buf.push(ch),
            },
        }
    }
    push_tok(in_quote.is_some(), &mut buf, &mut toks);
    toks
}

//
// ---- Verbs & directions ----
//

static VERBS: Lazy<HashMap<&'static str, Verb>> = Lazy::new(|| {
    use Verb::*;
    let mut m = HashMap::new();
    m.insert("open", Open);
    m.insert("close", Close);
    m.insert("shut", Close);
    m.insert("lock", Lock);
    m.insert("unlock", Unlock);
    for k in ["go", "walk", "move"] {
        m.insert(k, Go);
    }
    for k in ["look", "l"] {
        m.insert(k, Look);
    }
    m.insert("exits", Exits);
    m.insert("who", Who);
    m.insert("help", Help);
    m.insert("?", Help);
    for k in ["quit", "exit"] {
        m.insert(k, Quit);
    }
    m.insert("@debug", Debug);
    m
});

/// Words that may surround the direction without meaning anything
const FILLER: &[&str] = &["the", "a", "an", "door", "to", "towards"];

/// First meaningful token; anything from "with" onwards is ignored (ie: "with key").
/// When only filler words are left, the last one is the keyword ("open door").
fn direction_from(tokens: &[Token]) -> Option<Direction> {
    let words: Vec<&Token> = tokens.iter().take_while(|t| t.quoted || t.lower != "with").collect();
    words
        .iter()
        .find(|t| t.quoted || !FILLER.contains(&t.lower.as_str()))
        .or_else(|| words.last())
        .and_then(|t| Direction::from_token(&t.lower))
}
