//! Splits an argument vector into flag and value tokens.

/// One classified argument. Text borrows from the argument vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Argument text after the option prefix.
    Flag(&'a str),
    Value(&'a str),
}

impl<'a> Token<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Self::Flag(text) | Self::Value(text) => text,
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, Self::Flag(_))
    }
}

/// Classify every argument in order.
///
/// An argument starting with `prefix` is a flag; the prefix is stripped once
/// and the rest kept verbatim (`--size` becomes `Flag("-size")`). Everything
/// else is a value, including `""` and the bare prefix (`-`, conventionally
/// "stdin").
pub fn tokenize<S: AsRef<str>>(prefix: char, args: &[S]) -> Vec<Token<'_>> {
    args.iter()
        .map(|arg| classify(prefix, arg.as_ref()))
        .collect()
}

fn classify(prefix: char, arg: &str) -> Token<'_> {
    match arg.strip_prefix(prefix) {
        Some(rest) if !rest.is_empty() => Token::Flag(rest),
        _ => Token::Value(arg),
    }
}

/// A flag together with the values that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence<'a> {
    pub flag: &'a str,
    pub values: Vec<&'a str>,
}

/// Group tokens into occurrences.
///
/// Values before the first flag belong to no occurrence and are returned
/// separately.
pub fn group<'a>(tokens: &[Token<'a>]) -> (Vec<&'a str>, Vec<Occurrence<'a>>) {
    let mut leading = Vec::new();
    let mut occurrences: Vec<Occurrence<'a>> = Vec::new();

    for token in tokens {
        match *token {
            Token::Flag(flag) => occurrences.push(Occurrence {
                flag,
                values: Vec::new(),
            }),
            Token::Value(value) => match occurrences.last_mut() {
                Some(current) => current.values.push(value),
                None => leading.push(value),
            },
        }
    }

    (leading, occurrences)
}
