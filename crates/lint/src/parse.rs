//! Source parsing with the swc TypeScript/JavaScript parser.
//!
//! Syntax is picked from the file extension. Decorators are always
//! enabled so decorated class fields parse in plain .ts files.

use std::path::Path;

use swc_common::{FileName, SourceMap, Spanned, sync::Lrc};
use swc_ecma_ast::{EsVersion, Module};
use swc_ecma_parser::{
    EsSyntax, Parser, StringInput, Syntax, TsSyntax, error::SyntaxError, lexer::Lexer,
};

use crate::diagnostic::extract_span_info;

/// A parse failure, anchored to the offending location
#[derive(Debug, Clone, thiserror::Error)]
#[error("{path}:{line}:{column}: {message}")]
pub struct ParseDiagnostic {
    pub path: String,
    pub line: usize,
    pub column: usize,
    pub underline: usize,
    pub message: String,
    pub hint: String,
}

/// A successfully parsed module plus the source map its spans resolve against
pub struct Parsed {
    pub module: Module,
    pub source_map: Lrc<SourceMap>,
}

impl std::fmt::Debug for Parsed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parsed")
            .field("module", &self.module)
            .finish_non_exhaustive()
    }
}

/// Pick parser syntax from the file extension
pub fn syntax_for_path(path: &str) -> Syntax {
    match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some("ts") | Some("mts") | Some("cts") => Syntax::Typescript(TsSyntax {
            tsx: false,
            decorators: true,
            dts: false,
            no_early_errors: true,
            disallow_ambiguous_jsx_like: true,
        }),
        Some("tsx") => Syntax::Typescript(TsSyntax {
            tsx: true,
            decorators: true,
            dts: false,
            no_early_errors: true,
            disallow_ambiguous_jsx_like: true,
        }),
        Some("jsx") => Syntax::Es(EsSyntax {
            jsx: true,
            decorators: true,
            ..Default::default()
        }),
        _ => Syntax::Es(EsSyntax {
            jsx: false,
            decorators: true,
            ..Default::default()
        }),
    }
}

/// Parse source as a module, reporting the first syntax error
pub fn parse_source(path: &str, source: &str) -> Result<Parsed, ParseDiagnostic> {
    let cm: Lrc<SourceMap> = Default::default();

    let fm = cm.new_source_file(
        FileName::Custom(path.to_string()).into(),
        source.to_string(),
    );

    let lexer = Lexer::new(
        syntax_for_path(path),
        EsVersion::Es2022,
        StringInput::from(&*fm),
        None,
    );

    let mut parser = Parser::new_from(lexer);

    let module = match parser.parse_module() {
        Ok(module) => module,
        Err(err) => return Err(parse_diagnostic(path, &cm, err)),
    };

    Ok(Parsed {
        module,
        source_map: cm,
    })
}

fn parse_diagnostic(
    path: &str,
    cm: &SourceMap,
    err: swc_ecma_parser::error::Error,
) -> ParseDiagnostic {
    let span = err.span();
    let (line, column, underline) = extract_span_info(cm, span);

    let (message, hint) = match err.kind() {
        SyntaxError::Eof => (
            "Unexpected end of file".to_string(),
            "Check for an unclosed block, string, or parenthesis.".to_string(),
        ),
        SyntaxError::UnterminatedStrLit => (
            "Unterminated string literal".to_string(),
            "Add the missing closing quote.".to_string(),
        ),
        SyntaxError::UnterminatedTpl => (
            "Unterminated template literal".to_string(),
            "Add the missing closing backtick or ${} bracket.".to_string(),
        ),
        SyntaxError::UnterminatedRegExp => (
            "Unterminated regular expression".to_string(),
            "Add the missing closing /.".to_string(),
        ),
        SyntaxError::InvalidStrEscape => (
            "Invalid string escape".to_string(),
            "Check backslash escapes like \\n, \\t, or \\\".".to_string(),
        ),
        SyntaxError::InvalidUnicodeEscape => (
            "Invalid unicode escape".to_string(),
            "Use \\uXXXX or \\u{...} for unicode escapes.".to_string(),
        ),
        SyntaxError::ExpectedUnicodeEscape => (
            "Expected unicode escape".to_string(),
            "After \\u, provide four hex digits or \\u{...}.".to_string(),
        ),
        SyntaxError::TopLevelAwaitInScript => (
            "Top-level await is not allowed here".to_string(),
            "Wrap in an async function or use a module context.".to_string(),
        ),
        SyntaxError::Unexpected { got, expected } => (
            format!("Unexpected token {}, expected {}", got, expected),
            "Check for missing punctuation or a stray character.".to_string(),
        ),
        _ => (
            format!("{:?}", err.kind()),
            "Check the syntax near the highlighted location.".to_string(),
        ),
    };

    ParseDiagnostic {
        path: path.to_string(),
        line,
        column,
        underline,
        message,
        hint,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typescript_extensions_use_ts_syntax() {
        assert!(matches!(syntax_for_path("app.ts"), Syntax::Typescript(t) if !t.tsx));
        assert!(matches!(syntax_for_path("app.mts"), Syntax::Typescript(t) if !t.tsx));
        assert!(matches!(syntax_for_path("app.cts"), Syntax::Typescript(t) if !t.tsx));
        assert!(matches!(syntax_for_path("app.tsx"), Syntax::Typescript(t) if t.tsx));
    }

    #[test]
    fn script_extensions_use_es_syntax() {
        assert!(matches!(syntax_for_path("app.js"), Syntax::Es(e) if !e.jsx));
        assert!(matches!(syntax_for_path("app.mjs"), Syntax::Es(e) if !e.jsx));
        assert!(matches!(syntax_for_path("app.cjs"), Syntax::Es(e) if !e.jsx));
        assert!(matches!(syntax_for_path("app.jsx"), Syntax::Es(e) if e.jsx));
    }

    #[test]
    fn unknown_extension_falls_back_to_es() {
        assert!(matches!(syntax_for_path("app"), Syntax::Es(_)));
        assert!(matches!(syntax_for_path("app.svelte"), Syntax::Es(_)));
    }

    #[test]
    fn parses_class_fields_in_plain_js() {
        let source = "class Foo {\n  bar = 1;\n}\n";
        assert!(parse_source("foo.js", source).is_ok());
    }

    #[test]
    fn parses_decorated_fields_in_ts() {
        let source = "class Foo {\n  @property() bar = 1;\n}\n";
        assert!(parse_source("foo.ts", source).is_ok());
    }

    #[test]
    fn rejects_type_annotations_in_js() {
        let source = "class Foo {\n  declare bar: string;\n}\n";
        assert!(parse_source("foo.js", source).is_err());
    }

    #[test]
    fn reports_unterminated_template() {
        let source = "const s = `oops;\n";
        let err = parse_source("foo.ts", source).unwrap_err();
        assert_eq!(err.path, "foo.ts");
        assert!(err.message.contains("Unterminated template"));
        assert!(err.to_string().starts_with("foo.ts:1:"));
    }
}
