use std::cell::RefCell;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tree_sitter::{Language, Parser};

/// Coarse language family a source file parses as, independent of framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLang {
    JavaScript,
    TypeScript,
    Tsx,
}

/// Dispatch a file extension to the language tree-sitter should parse it as.
/// `.jsx` is parsed with the JavaScript grammar (it accepts JSX natively);
/// `.tsx` needs the dedicated TSX grammar since plain TypeScript rejects it.
pub fn lang_for_extension(ext: &str) -> Option<SourceLang> {
    match ext {
        "js" | "jsx" => Some(SourceLang::JavaScript),
        "ts" => Some(SourceLang::TypeScript),
        "tsx" => Some(SourceLang::Tsx),
        _ => None,
    }
}

// One Parser per (thread, grammar) pair — rayon workers never contend on a lock
// to get a parser, and never pay grammar-load cost more than once per thread.
thread_local! {
    static PARSER_JS: RefCell<Parser> = RefCell::new({
        let mut p = Parser::new();
        p.set_language(&tree_sitter_javascript::LANGUAGE.into()).unwrap();
        p
    });
    static PARSER_TS: RefCell<Parser> = RefCell::new({
        let mut p = Parser::new();
        p.set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()).unwrap();
        p
    });
    static PARSER_TSX: RefCell<Parser> = RefCell::new({
        let mut p = Parser::new();
        p.set_language(&tree_sitter_typescript::LANGUAGE_TSX.into()).unwrap();
        p
    });
}

pub fn language_for(lang: SourceLang) -> Language {
    match lang {
        SourceLang::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        SourceLang::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        SourceLang::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
    }
}

/// Parse `source` with the thread-local parser for `lang`. Returns `None` on a
/// tree-sitter-internal failure — either the per-file `timeout` elapsed (the
/// analyzer reports this as `ParseFailure::Timeout`) or a grammar-version
/// mismatch. A tree with syntax errors inside it is still returned, since
/// tree-sitter is error-tolerant and partial extraction from a broken file is
/// preferable to discarding it outright.
pub fn parse(lang: SourceLang, source: &str, timeout: Option<Duration>) -> Option<tree_sitter::Tree> {
    match timeout {
        None => parse_now(lang, source),
        Some(deadline) => parse_with_deadline(lang, source, deadline),
    }
}

fn parse_now(lang: SourceLang, source: &str) -> Option<tree_sitter::Tree> {
    match lang {
        SourceLang::JavaScript => PARSER_JS.with(|p| p.borrow_mut().parse(source, None)),
        SourceLang::TypeScript => PARSER_TS.with(|p| p.borrow_mut().parse(source, None)),
        SourceLang::Tsx => PARSER_TSX.with(|p| p.borrow_mut().parse(source, None)),
    }
}

/// This binding exposes no native per-parse timeout, so `deadline` is enforced
/// by racing the parse on a detached worker against a channel recv instead.
/// A parse that outruns its deadline is simply abandoned — the worker thread
/// is never joined, and the caller reports `Timeout` and moves on to the next
/// file.
fn parse_with_deadline(lang: SourceLang, source: &str, deadline: Duration) -> Option<tree_sitter::Tree> {
    let source = source.to_string();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut parser = Parser::new();
        parser.set_language(&language_for(lang)).expect("grammar must load");
        let tree = parser.parse(&source, None);
        let _ = tx.send(tree);
    });
    rx.recv_timeout(deadline).ok().flatten()
}
