//! Pattern compilation.
//!
//! Turns the declarative `match` string of a route into a [`Matcher`].
//!
//! ```text
//! "*" or "**"               every request
//! "/chat"                   path equals /chat
//! "/rooms/*"                one path segment below /rooms
//! "/static/**"              anything below /static
//! "GET,CONNECT /ws/[a-z]?"  method set plus path glob
//! "example.com/chat"        Host header plus path
//! "example.com"             Host header, any path
//! ```
//!
//! A lone target without `/` is a host, so a lone method name such as
//! `"GET"` is rejected rather than read as host `get`; use `"GET *"`.

use std::iter::Peekable;
use std::str::Chars;
use std::sync::Arc;

use axum::http::Method;
use regex::Regex;

use crate::routing::error::{PatternError, PatternErrorReason};
use crate::routing::matcher::{
    AndMatcher, AnyMatcher, HostMatcher, Matcher, MethodMatcher, PathGlobMatcher,
};

/// Pattern matching every request.
pub const MATCH_ALL: &str = "*";

/// Path glob matching everything, also accepted as a whole target.
const MATCH_ANY_PATH: &str = "**";

const KNOWN_METHODS: [Method; 9] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::HEAD,
    Method::OPTIONS,
    Method::CONNECT,
    Method::TRACE,
];

/// Builds matchers from pattern strings.
pub trait MatcherFactory: Send + Sync + std::fmt::Debug {
    /// Compile `pattern`, rejecting syntactically invalid input.
    fn create(&self, pattern: &str) -> Result<Arc<dyn Matcher>, PatternError>;
}

/// The default factory: optional method list, optional host, path glob.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternMatcherFactory;

impl PatternMatcherFactory {
    pub fn new() -> Self {
        Self
    }
}

impl MatcherFactory for PatternMatcherFactory {
    fn create(&self, pattern: &str) -> Result<Arc<dyn Matcher>, PatternError> {
        let fail = |reason| PatternError::new(pattern, reason);

        let parts: Vec<&str> = pattern.split_whitespace().collect();
        let (methods, target) = match parts.as_slice() {
            [] => return Err(fail(PatternErrorReason::Empty)),
            [target] if is_method(target) => {
                return Err(fail(PatternErrorReason::MissingTarget(target.to_string())));
            }
            [target] => (None, *target),
            [methods, target] => (Some(parse_methods(methods).map_err(fail)?), *target),
            _ => return Err(fail(PatternErrorReason::TooManyParts(parts.len()))),
        };

        let mut matchers: Vec<Box<dyn Matcher>> = Vec::new();
        if let Some(methods) = methods {
            matchers.push(Box::new(MethodMatcher::new(methods)));
        }

        if target != MATCH_ALL && target != MATCH_ANY_PATH {
            let (host, path) = match target.find('/') {
                Some(0) => (None, target),
                Some(i) => (Some(&target[..i]), &target[i..]),
                None => (Some(target), ""),
            };

            if let Some(host) = host {
                validate_host(host).map_err(fail)?;
                matchers.push(Box::new(HostMatcher::new(host)));
            }
            if !path.is_empty() {
                let regex = compile_glob(path).map_err(fail)?;
                matchers.push(Box::new(PathGlobMatcher::new(path, regex)));
            }
        }

        let matcher: Arc<dyn Matcher> = match matchers.len() {
            0 => Arc::new(AnyMatcher),
            1 => Arc::from(matchers.remove(0)),
            _ => Arc::new(AndMatcher::new(matchers)),
        };
        Ok(matcher)
    }
}

fn is_method(token: &str) -> bool {
    KNOWN_METHODS
        .iter()
        .any(|m| m.as_str().eq_ignore_ascii_case(token))
}

fn parse_methods(list: &str) -> Result<Vec<Method>, PatternErrorReason> {
    list.split(',')
        .map(|name| {
            if name.is_empty() {
                return Err(PatternErrorReason::EmptyMethod);
            }
            let upper = name.to_ascii_uppercase();
            KNOWN_METHODS
                .iter()
                .find(|m| m.as_str() == upper)
                .cloned()
                .ok_or_else(|| PatternErrorReason::UnknownMethod(name.to_string()))
        })
        .collect()
}

fn validate_host(host: &str) -> Result<(), PatternErrorReason> {
    let invalid = || PatternErrorReason::InvalidHost(host.to_string());

    let (name, port) = match host.split_once(':') {
        Some((name, port)) => (name, Some(port)),
        None => (host, None),
    };
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(invalid());
    }
    if let Some(port) = port {
        if port.is_empty() || !port.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
    }
    Ok(())
}

/// Translate a path glob into an anchored regex.
fn compile_glob(glob: &str) -> Result<Regex, PatternErrorReason> {
    let mut re = String::with_capacity(glob.len() * 2 + 2);
    re.push('^');

    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if chars.next_if_eq(&'*').is_some() {
                    re.push_str(".*");
                } else {
                    re.push_str("[^/]*");
                }
            }
            '?' => re.push_str("[^/]"),
            '[' => compile_class(&mut chars, &mut re)?,
            _ => push_escaped(&mut re, c),
        }
    }

    re.push('$');
    Ok(Regex::new(&re)?)
}

/// Consume a character class body up to and including its closing `]`.
fn compile_class(chars: &mut Peekable<Chars<'_>>, re: &mut String) -> Result<(), PatternErrorReason> {
    let negated = chars.next_if_eq(&'!').is_some();
    let mut ranges: Vec<(char, char)> = Vec::new();

    loop {
        let start = chars.next().ok_or(PatternErrorReason::UnterminatedClass)?;
        if start == ']' {
            break;
        }

        // `a-z` is a range, a trailing `-` before `]` is literal.
        let mut lookahead = chars.clone();
        if lookahead.next() == Some('-') {
            if let Some(end) = lookahead.next().filter(|&end| end != ']') {
                if end < start {
                    return Err(PatternErrorReason::InvalidRange(start, end));
                }
                chars.next();
                chars.next();
                ranges.push((start, end));
                continue;
            }
        }
        ranges.push((start, start));
    }

    if ranges.is_empty() {
        return Err(PatternErrorReason::EmptyClass);
    }

    re.push('[');
    if negated {
        re.push_str("^/");
    }
    for (start, end) in ranges {
        push_escaped(re, start);
        if start != end {
            re.push('-');
            push_escaped(re, end);
        }
    }
    re.push(']');
    Ok(())
}

fn push_escaped(re: &mut String, c: char) {
    let mut buf = [0u8; 4];
    re.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}
