use crate::error::ScanErrors;
use crate::scanner::token::Token;

/// How a token list is written out by the driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum DumpFormat {
    #[default]
    Text,
    Json,
}

pub fn render(tokens: &[Token], format: DumpFormat) -> String {
    match format {
        DumpFormat::Text => to_text(tokens),
        DumpFormat::Json => to_json(tokens),
    }
}

/// One token per line, `KIND lexeme literal`.
pub fn to_text(tokens: &[Token]) -> String {
    let mut buf = String::new();
    for token in tokens {
        buf.push_str(&token.to_string());
        buf.push('\n');
    }
    buf
}

pub fn to_json(tokens: &[Token]) -> String {
    let mut json = serde_json::to_string_pretty(tokens).expect("tokens should be serializable");
    json.push('\n');
    json
}

/// Render reported errors, one entry per error. Plain entries use the
/// `[line N] Error: message` form; fancy ones are miette reports with a
/// snippet of `source`.
pub fn render_errors(errors: ScanErrors, name: &str, source: &str, fancy: bool) -> Vec<String> {
    errors
        .into_iter()
        .map(|e| {
            if fancy {
                format!("{:?}", miette::Report::new(e.with_source_code(name, source)))
            } else {
                e.display_with_line()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{ScanOptions, scan_collect};

    fn tokens(source: &str) -> Vec<Token> {
        let (tokens, errors) = scan_collect(source, ScanOptions::default());
        assert!(!errors.had_error());
        tokens
    }

    #[test]
    fn text_dump_lists_every_token() {
        let out = to_text(&tokens("var x = \"hi\";"));
        let expected = "VAR var null\n\
                        IDENTIFIER x null\n\
                        EQUAL = null\n\
                        STRING \"hi\" hi\n\
                        SEMICOLON ; null\n\
                        EOF  null\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn json_dump_has_kinds_and_literals() {
        let out = to_json(&tokens("print 2.5;"));
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
        let array = value.as_array().expect("array of tokens");
        assert_eq!(array.len(), 4);
        assert_eq!(array[0]["kind"], "PRINT");
        assert_eq!(array[1]["kind"], "NUMBER");
        assert_eq!(array[1]["literal"], 2.5);
        assert_eq!(array[1]["span"]["offset"], 6);
        assert_eq!(array[3]["kind"], "EOF");
        assert_eq!(array[3]["lexeme"], "");
    }

    #[test]
    fn plain_errors_use_line_format() {
        let source = "var s = \"open\n@";
        let (_, errors) = scan_collect(source, ScanOptions::default());
        let rendered = render_errors(errors, "test.lox", source, false);
        assert_eq!(rendered, vec!["[line 2] Error: Unterminated string."]);
    }

    #[test]
    fn fancy_errors_carry_message() {
        let source = "print @;";
        let (_, errors) = scan_collect(source, ScanOptions::default());
        let rendered = render_errors(errors, "test.lox", source, true);
        assert_eq!(rendered.len(), 1);
        assert!(rendered[0].contains("Unexpected character: @"));
    }

    #[test]
    fn format_parses_from_cli_spelling() {
        assert_eq!("text".parse::<DumpFormat>().ok(), Some(DumpFormat::Text));
        assert_eq!("json".parse::<DumpFormat>().ok(), Some(DumpFormat::Json));
        assert!("yaml".parse::<DumpFormat>().is_err());
        assert_eq!(DumpFormat::Json.to_string(), "json");
    }

    #[test]
    fn render_dispatches_on_format() {
        let toks = tokens("+");
        assert_eq!(render(&toks, DumpFormat::Text), "PLUS + null\nEOF  null\n");
        assert!(render(&toks, DumpFormat::Json).starts_with('['));
    }
}
