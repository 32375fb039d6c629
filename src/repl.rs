use std::io::{self, Write};

use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::dump::{self, DumpFormat};
use crate::scanner::{self, ScanOptions};

/// Run the interactive prompt. Every line is scanned on its own, so an error
/// on one line never affects the next.
pub fn run_repl(options: ScanOptions, format: DumpFormat, fancy: bool) -> Result<()> {
    let mut editor = DefaultEditor::new().context("start line editor")?;

    loop {
        let line = match editor.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => break, // Ctrl-D / Ctrl-C
            Err(e) => return Err(e).context("read line"),
        };

        if line.trim().is_empty() {
            continue;
        }
        editor
            .add_history_entry(line.as_str())
            .context("record history")?;

        let (output, errors) = scan_line(&line, options, format, fancy);
        print!("{output}");
        io::stdout().flush().context("flush stdout")?;
        for message in errors {
            eprintln!("{message}");
        }
    }
    Ok(())
}

fn scan_line(
    line: &str,
    options: ScanOptions,
    format: DumpFormat,
    fancy: bool,
) -> (String, Vec<String>) {
    let (tokens, errors) = scanner::scan_collect(line, options);
    let output = dump::render(&tokens, format);
    (output, dump::render_errors(errors, "<repl>", line, fancy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_line_prints_tokens() {
        let (output, errors) = scan_line("1 + 2", ScanOptions::default(), DumpFormat::Text, false);
        assert_eq!(output, "NUMBER 1 1.0\nPLUS + null\nNUMBER 2 2.0\nEOF  null\n");
        assert!(errors.is_empty());
    }

    #[test]
    fn errors_do_not_carry_across_lines() {
        let options = ScanOptions::default();
        let (_, first) = scan_line("\"open", options, DumpFormat::Text, false);
        assert_eq!(first, vec!["[line 1] Error: Unterminated string."]);

        let (output, second) = scan_line("print 1;", options, DumpFormat::Text, false);
        assert!(second.is_empty());
        assert!(output.starts_with("PRINT print null\n"));
    }
}
