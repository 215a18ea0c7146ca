use std::collections::{HashMap, HashSet};

use crate::registry::Registry;

#[derive(Debug, Clone)]
pub struct Args {
    pub flags: HashMap<String, bool>,
    pub params: HashMap<String, String>,
    pub commands: Vec<String>,
    pub positionals: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub args: Args,
    pub errors: Vec<ParseError>,
}

#[derive(Debug, Clone)]
pub struct ParseError {
    pub token: String,
    pub kind: ParseErrorKind,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum ParseErrorKind {
    UnknownToken,
    MissingParamValue { param: String },
}

impl ParseError {
    fn unknown(token: String, suggestions: Vec<String>) -> Self {
        Self {
            token,
            kind: ParseErrorKind::UnknownToken,
            suggestions,
        }
    }

    fn missing_param(param: String) -> Self {
        Self {
            token: param.clone(),
            kind: ParseErrorKind::MissingParamValue { param },
            suggestions: Vec::new(),
        }
    }
}

impl Args {
    /// Classify argv tokens into flags, params, one command, and
    /// positionals. Bare tokens after the command are positionals
    /// (lint paths), never a second command.
    pub fn collect(args: Vec<String>, registry: &Registry) -> ParseOutcome {
        let mut flags = HashMap::new();
        let mut params = HashMap::new();
        let mut commands = Vec::new();
        let mut positionals = Vec::new();
        let mut errors = Vec::new();
        let mut flag_tokens: HashSet<&'static str> = HashSet::new();
        let mut param_tokens: HashSet<&'static str> = HashSet::new();
        let suggestion_tokens = registry.suggestion_tokens();

        for flag in registry.flags() {
            flag_tokens.insert(flag.name);
            for alias in flag.aliases {
                flag_tokens.insert(alias);
            }
        }

        for param in registry.params() {
            param_tokens.insert(param.name);
        }

        let mut command_seen = false;
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let arg_str = arg.as_str();
            if flag_tokens.contains(arg_str) {
                flags.insert(arg.clone(), true);
                continue;
            }

            if param_tokens.contains(arg_str) {
                if let Some(value) = iter.next() {
                    params.insert(arg.clone(), value.clone());
                } else {
                    errors.push(ParseError::missing_param(arg.clone()));
                }
                continue;
            }

            if !command_seen {
                if let Some(command) = registry.command_for(arg_str) {
                    commands.push(command.name.to_string());
                    command_seen = true;
                    continue;
                }
            }

            if arg_str.starts_with('-') {
                let suggestions = suggest(arg_str, &suggestion_tokens);
                errors.push(ParseError::unknown(arg.clone(), suggestions));
                continue;
            }

            if command_seen {
                positionals.push(arg.clone());
                continue;
            }

            let suggestions = suggest(arg_str, &suggestion_tokens);
            errors.push(ParseError::unknown(arg.clone(), suggestions));
        }

        ParseOutcome {
            args: Args {
                flags,
                params,
                commands,
                positionals,
            },
            errors,
        }
    }
}

pub fn parse_env(registry: &Registry) -> ParseOutcome {
    let args: Vec<String> = std::env::args().skip(1).collect();
    Args::collect(args, registry)
}

fn suggest(token: &str, candidates: &[String]) -> Vec<String> {
    let threshold = if token.len() <= 4 {
        1
    } else if token.len() <= 7 {
        2
    } else {
        3
    };

    let mut scored: Vec<(usize, &String)> = candidates
        .iter()
        .map(|candidate| (levenshtein(token, candidate), candidate))
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    let mut matches = Vec::new();
    for (distance, candidate) in scored {
        if distance <= threshold {
            matches.push(candidate.clone());
        }
        if matches.len() >= 3 {
            break;
        }
    }

    matches
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a.is_empty() {
        return b.chars().count();
    }
    if b.is_empty() {
        return a.chars().count();
    }

    let b_len = b.chars().count();
    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.chars().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(curr[j] + 1, prev[j + 1] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_len]
}
