//! Minic - driver for the mini language.
//!
//! Ties the pipeline together: read source, lex, parse, evaluate. The
//! `mini` binary is a thin argument parser over these functions; embedders
//! and tests call them directly.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;

use ariadne::{Config, IndexType, Label, Report, ReportKind, Source};
use mini_eval::{stdout_handler, EvalError, InterpreterBuilder, SharedPrintHandler, Value};
use mini_ir::{SharedInterner, Span};
use mini_lexer::{LexError, TokenKind};
use mini_parse::ParseError;

/// Anything that can stop a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read `{}`: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl Error {
    /// Source location of the error, when there is one.
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::Io { .. } => None,
            Error::Lex(err) => Some(err.span()),
            Error::Parse(err) => err.span(),
            Error::Eval(err) => err.span,
        }
    }

    /// Render for a terminal: an annotated snippet when the error points
    /// into `source`, otherwise a single `error: ...` line.
    pub fn render(&self, path: &str, source: &str) -> String {
        let Some(span) = self.span() else {
            return format!("error: {self}");
        };
        let range = span.to_range();
        let range = range.start.min(source.len())..range.end.min(source.len());
        let mut out = Vec::new();
        let written = Report::build(ReportKind::Error, path, range.start)
            .with_config(
                Config::default()
                    .with_color(false)
                    .with_index_type(IndexType::Byte),
            )
            .with_message(self.to_string())
            .with_label(Label::new((path, range)).with_message(self.label()))
            .finish()
            .write((path, Source::from(source)), &mut out);
        match written {
            Ok(()) => String::from_utf8_lossy(&out).into_owned(),
            Err(_) => format!("error: {self}"),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Error::Io { .. } => "",
            Error::Lex(_) => "not valid here",
            Error::Parse(_) => "unexpected input",
            Error::Eval(_) => "while evaluating this",
        }
    }
}

/// Knobs for a single run.
#[derive(Clone)]
pub struct RunOptions {
    /// Fail once this many user calls are active. `None` means unlimited.
    pub max_call_depth: Option<usize>,
    /// Where `print` output goes.
    pub print_handler: SharedPrintHandler,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            max_call_depth: None,
            print_handler: stdout_handler(),
        }
    }
}

/// What a successful run produced.
#[derive(Debug)]
pub struct RunOutcome {
    /// `main`'s return value, or `None` if it never returned.
    pub value: Option<Value>,
    /// User globals after the preamble, before `main` was called.
    pub globals_before: Vec<(String, String)>,
    /// User globals after `main` finished.
    pub globals: Vec<(String, String)>,
}

/// Read a source file.
pub fn read_source(path: &Path) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse and run `source`.
pub fn run_source(source: &str, options: &RunOptions) -> Result<RunOutcome, Error> {
    let interner = SharedInterner::new();
    let program = mini_parse::parse_source(source, &interner)?;
    tracing::debug!(preamble = program.preamble.len(), "parsed program");

    let mut builder =
        InterpreterBuilder::new(interner).print_handler(options.print_handler.clone());
    if let Some(depth) = options.max_call_depth {
        builder = builder.max_call_depth(depth);
    }
    let mut interpreter = builder.build();

    interpreter.load(&program)?;
    let globals_before = render_globals(interpreter.globals());
    let value = interpreter.call_main()?;
    let globals = render_globals(interpreter.globals());
    Ok(RunOutcome {
        value,
        globals_before,
        globals,
    })
}

/// Read, parse and run the file at `path`.
pub fn run_file(path: &Path, options: &RunOptions) -> Result<RunOutcome, Error> {
    let source = read_source(path)?;
    run_source(&source, options)
}

fn render_globals(globals: Vec<(String, Value)>) -> Vec<(String, String)> {
    globals
        .into_iter()
        .map(|(name, value)| (name, value.to_string()))
        .collect()
}

/// Token listing, one token per line: `line  start..end  token`.
pub fn lex_source(source: &str) -> Result<String, Error> {
    let interner = SharedInterner::new();
    let tokens = mini_lexer::lex(source, &interner)?;
    let mut out = String::new();
    for token in &tokens {
        let text = match token.kind {
            TokenKind::Ident(name) => format!("identifier `{}`", interner.lookup(name)),
            other => other.describe(),
        };
        out.push_str(&format!("{:>4}  {:?}  {text}\n", token.line, token.span));
    }
    Ok(out)
}

/// S-expression dump of the parsed program.
pub fn parse_to_string(source: &str) -> Result<String, Error> {
    let interner = SharedInterner::new();
    let program = mini_parse::parse_source(source, &interner)?;
    Ok(mini_ir::pretty::dump_program(&program, &interner))
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=mini_eval=debug`; set `MINI_LOG_TREE=1` as well
/// for an indented call tree instead of flat lines. Logs go to stderr.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var_os("MINI_LOG_TREE").is_some() {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(io::stderr),
                )
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;
    use mini_eval::buffer_handler;
    use pretty_assertions::assert_eq;

    fn captured() -> RunOptions {
        RunOptions {
            print_handler: buffer_handler(),
            ..RunOptions::default()
        }
    }

    #[test]
    fn run_reports_value_and_globals() {
        let options = captured();
        let outcome = run_source(
            "total = 0; func main() { total = 5; print(total); return total * 2; }",
            &options,
        )
        .unwrap();
        assert_eq!(outcome.value.unwrap(), Value::Int(10));
        assert_eq!(options.print_handler.output(), "5\n");
        assert_eq!(
            outcome.globals_before,
            vec![
                ("main".to_string(), "<function main>".to_string()),
                ("total".to_string(), "0".to_string()),
            ]
        );
        assert_eq!(outcome.globals[1], ("total".to_string(), "5".to_string()));
    }

    #[test]
    fn max_depth_option_is_applied() {
        let options = RunOptions {
            max_call_depth: Some(3),
            ..captured()
        };
        let source = "func f(n) { return f(n + 1); } func main() { return f(0); }";
        let err = run_source(source, &options).unwrap_err();
        assert!(matches!(
            err,
            Error::Eval(EvalError {
                kind: mini_eval::EvalErrorKind::RecursionLimit { limit: 3 },
                ..
            })
        ));
    }

    #[test]
    fn lex_listing() {
        let listing = lex_source("x = 1;\n# done\n").unwrap();
        assert_eq!(
            listing,
            "   1  0..1  identifier `x`\n   1  2..3  `=`\n   1  4..5  number `1`\n   1  5..6  `;`\n   3  14..14  end of file\n"
        );
    }

    #[test]
    fn parse_dump() {
        let dump = parse_to_string("func main() { return 1 + 2; }").unwrap();
        assert_eq!(dump, "(program\n  (func main ()\n    (return (+ 1 2))\n  )\n)\n");
    }

    #[test]
    fn lex_errors_render_with_a_snippet() {
        let source = "x = 1;\ny = $;\nfunc main() { return x; }";
        let err = run_source(source, &captured()).unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Lex(_))));
        let rendered = err.render("prog.mini", source);
        assert!(rendered.contains("illegal character '$' on line 2"), "{rendered}");
        assert!(rendered.contains("prog.mini"), "{rendered}");
    }

    #[test]
    fn errors_without_location_render_on_one_line() {
        let err = read_source(Path::new("/definitely/not/here.mini")).unwrap_err();
        let rendered = err.render("here.mini", "");
        assert!(rendered.starts_with("error: cannot read `/definitely/not/here.mini`"));
        assert_eq!(rendered.lines().count(), 1);
    }
}
