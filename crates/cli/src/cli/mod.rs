use std::collections::BTreeMap;

use stdio::{error as stdio_error, raw};

use crate::args::{ParseError, ParseErrorKind, parse_env};
use crate::context::{Context, ContextError};
use crate::registry::{CommandSpec, FlagSpec, ParamSpec, Registry};

pub mod check;
pub mod rules;

pub fn register_global_flags(registry: &mut Registry) {
    registry.add_flag(FlagSpec {
        name: "--help",
        aliases: &["-h", "help"],
        description: "show help",
    });
    registry.add_flag(FlagSpec {
        name: "--version",
        aliases: &["-v", "version"],
        description: "show version and build metadata",
    });
}

pub fn register_global_params(registry: &mut Registry) {
    registry.add_param(ParamSpec {
        name: "--base-class",
        description: "base class whose subclasses are checked (default: LitElement)",
    });
    registry.add_param(ParamSpec {
        name: "--properties-member",
        description: "static member holding property metadata (default: properties)",
    });
}

// provide helpful info if no args are provided
pub fn help(registry: &Registry) {
    raw("");
    raw("Usage: litlint [options] [command] [paths...]");
    raw(&format!(
        "litlint v{} - lint reactive element classes",
        env!("CARGO_PKG_VERSION")
    ));
    raw("");

    let dim = "\x1b[2m";
    let reset = "\x1b[0m";

    let mut grouped: BTreeMap<&str, Vec<&CommandSpec>> = BTreeMap::new();
    for command in registry.commands() {
        grouped.entry(command.category).or_default().push(command);
    }

    for (category, commands) in grouped {
        raw(&format!("{dim}{category}{reset}"));
        for command in commands {
            raw(&format!("  {}\t\t{}", command.name, command.summary));
        }
        raw("");
    }

    if !registry.flags().is_empty() {
        raw(&format!("{dim}flags{reset}"));
        for flag in registry.flags() {
            raw(&format!("  {}\t\t{}", flag.name, flag.description));
        }
        raw("");
    }

    if !registry.params().is_empty() {
        raw(&format!("{dim}params{reset}"));
        for param in registry.params() {
            raw(&format!("  {}\t{}", param.name, param.description));
        }
        raw("");
    }
}

pub fn version() {
    let version = env!("CARGO_PKG_VERSION");
    raw(&format!("litlint [version {}]", version));
    let git_sha = option_env!("LITLINT_GIT_SHA").unwrap_or("unknown");
    let build_unix = option_env!("LITLINT_BUILD_UNIX").unwrap_or("unknown");
    let target = option_env!("LITLINT_TARGET").unwrap_or("unknown");
    raw(&format!("git_sha: {}", git_sha));
    raw(&format!("build_unix: {}", build_unix));
    raw(&format!("target: {}", target));
    raw("");
}

pub fn error(msg: Option<&str>) {
    stdio_error(
        "cli",
        msg.unwrap_or("instructions unclear. try '--help' for guidance"),
    );
}

pub fn execute(registry: &Registry) {
    let parsed = parse_env(registry);
    if !parsed.errors.is_empty() {
        let message = format_parse_errors(&parsed.errors);
        error(Some(message.as_str()));
        std::process::exit(2);
    }

    let args = &parsed.args;
    if args.commands.is_empty() {
        if args.flags.contains_key("--version")
            || args.flags.contains_key("-v")
            || args.flags.contains_key("version")
        {
            version();
            return;
        }
        // help for --help, help, or no arguments at all
        help(registry);
        return;
    }

    let context = match Context::from_env(registry) {
        Ok(context) => context,
        Err(ContextError::Parse(errors)) => {
            let message = format_parse_errors(&errors);
            error(Some(message.as_str()));
            std::process::exit(2);
        }
    };

    let cmd_name = &context.args.commands[0];
    let Some(command) = registry.command_named(cmd_name) else {
        error(None);
        std::process::exit(2);
    };

    (command.handler)(&context);
}

pub fn format_parse_errors(errors: &[ParseError]) -> String {
    let mut output = String::new();
    for error in errors {
        match &error.kind {
            ParseErrorKind::UnknownToken => {
                output.push_str(&format!("unknown argument '{}'", error.token));
                if !error.suggestions.is_empty() {
                    output.push_str(". did you mean ");
                    output.push_str(&format_suggestions(&error.suggestions));
                    output.push('?');
                }
                output.push('\n');
            }
            ParseErrorKind::MissingParamValue { param } => {
                output.push_str(&format!("missing value for '{}'\n", param));
            }
        }
    }
    output
}

fn format_suggestions(suggestions: &[String]) -> String {
    suggestions
        .iter()
        .map(|suggestion| format!("'{}'", suggestion))
        .collect::<Vec<String>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_token_errors_list_suggestions() {
        let errors = vec![ParseError {
            token: "chek".to_string(),
            kind: ParseErrorKind::UnknownToken,
            suggestions: vec!["check".to_string(), "--help".to_string()],
        }];
        let message = format_parse_errors(&errors);
        assert!(message.contains("unknown argument 'chek'"));
        assert!(message.contains("did you mean 'check', '--help'?"));
    }

    #[test]
    fn missing_param_value_is_reported() {
        let errors = vec![ParseError {
            token: "--base-class".to_string(),
            kind: ParseErrorKind::MissingParamValue {
                param: "--base-class".to_string(),
            },
            suggestions: Vec::new(),
        }];
        let message = format_parse_errors(&errors);
        assert!(message.contains("missing value for '--base-class'"));
    }
}
