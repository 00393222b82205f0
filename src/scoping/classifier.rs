//! Scope classification
//!
//!     A scope's kind comes from the clause in front of its `{`. The classifier finds the start
//!     of that clause (see [header_start]), drops `case` labels, attributes and modifiers, and
//!     looks at the introducing word. Shapes it does not recognize become [`ScopeKind::Other`],
//!     which no rule edits.

use super::boundaries::{header_start, skip_declaration_prefix, top_level};
use super::scope::ScopeKind;
use crate::lexing::keywords::{ACCESSORS, CONTROL_BODIES, TYPE_INTRODUCERS};
use crate::lexing::{next_significant, Token, TokenKind};
use std::ops::Range;

/// Words that may lead an expression followed by a trailing closure.
const EXPRESSION_KEYWORDS: &[&str] = &[
    "self", "super", "Self", "return", "throw", "try", "await", "in", "as", "is",
];

/// Classifies the brace pair `open`/`close`, returning its kind and header range.
pub fn classify(tokens: &[Token], open: usize, close: usize) -> (ScopeKind, Range<usize>) {
    match header_start(tokens, open) {
        Some(start) => {
            let header = start..open;
            (classify_header(tokens, header.clone(), open, close), header)
        }
        None => (ScopeKind::ClosureBody, open..open),
    }
}

fn classify_header(tokens: &[Token], header: Range<usize>, open: usize, close: usize) -> ScopeKind {
    let top = top_level(tokens, header);
    let Some(pos) = skip_labels(tokens, &top) else {
        return ScopeKind::Other;
    };
    let pos = skip_declaration_prefix(tokens, &top, pos);
    let Some(&first) = top.get(pos) else {
        return ScopeKind::Other;
    };

    let introducer = &tokens[first];
    let next = top.get(pos + 1).map(|&index| &tokens[index]);
    let word = introducer.text.as_str();
    let keyword = introducer.kind == TokenKind::Keyword;

    if !matches!(introducer.kind, TokenKind::Keyword | TokenKind::Identifier) {
        return expression(introducer);
    }
    if TYPE_INTRODUCERS.contains(word) && next.is_some_and(|t| t.kind == TokenKind::Identifier) {
        return ScopeKind::TypeDeclaration;
    }

    match word {
        "protocol" if keyword => ScopeKind::Protocol,
        "func" | "init" | "deinit" if keyword => ScopeKind::FunctionBody,
        "subscript" if keyword => {
            if is_accessor_list(tokens, open, close) {
                ScopeKind::AccessorBody
            } else {
                ScopeKind::FunctionBody
            }
        }
        "var" | "let" if keyword => {
            if is_accessor_list(tokens, open, close) {
                ScopeKind::AccessorBody
            } else if top[pos..].iter().any(|&index| tokens[index].is_operator("=")) {
                // `let handler = { ... }`
                ScopeKind::ClosureBody
            } else {
                ScopeKind::FunctionBody
            }
        }
        "switch" if keyword => ScopeKind::SwitchBody,
        _ if keyword && CONTROL_BODIES.contains(word) => ScopeKind::ConditionalBody,
        _ if !keyword && ACCESSORS.contains(word) && is_accessor_clause(tokens, &top[pos + 1..]) => {
            ScopeKind::FunctionBody
        }
        _ => expression(introducer),
    }
}

/// Braces after an expression are trailing closures. Declarations the classifier does not
/// model (`#if`, `import`, `precedencegroup`, ...) are left as Other.
fn expression(introducer: &Token) -> ScopeKind {
    match introducer.kind {
        TokenKind::Identifier
        | TokenKind::Operator
        | TokenKind::Dot
        | TokenKind::Number
        | TokenKind::StringLiteral
        | TokenKind::OpenParen
        | TokenKind::OpenBracket => ScopeKind::ClosureBody,
        TokenKind::Keyword if EXPRESSION_KEYWORDS.contains(&introducer.text.as_str()) => {
            ScopeKind::ClosureBody
        }
        _ => ScopeKind::Other,
    }
}

/// Skips `case ...:`, `default:`, `@unknown default:` and statement labels (`outer:`).
/// `None` when a case label is still open, so the brace belongs to its pattern.
fn skip_labels(tokens: &[Token], top: &[usize]) -> Option<usize> {
    let mut pos = 0;
    loop {
        let Some(&index) = top.get(pos) else {
            return Some(pos);
        };
        let token = &tokens[index];
        let is_kind = |offset: usize, kind: TokenKind| {
            top.get(pos + offset)
                .is_some_and(|&i| tokens[i].kind == kind)
        };

        if token.is_keyword("case")
            || token.is_keyword("default")
            || (token.kind == TokenKind::Attribute && token.text == "@unknown")
        {
            let colon = top[pos..]
                .iter()
                .position(|&i| tokens[i].kind == TokenKind::Colon)?;
            pos += colon + 1;
        } else if token.kind == TokenKind::Identifier
            && is_kind(1, TokenKind::Colon)
            && is_kind(2, TokenKind::Keyword)
        {
            pos += 2;
        } else {
            return Some(pos);
        }
    }
}

/// `{ get set }`, `{ get async throws }`, `{ willSet { ... } didSet { ... } }`
fn is_accessor_list(tokens: &[Token], open: usize, close: usize) -> bool {
    let mut index = open;
    loop {
        let Some(next) = next_significant(tokens, index).filter(|&next| next < close) else {
            return false;
        };
        let token = &tokens[next];
        if token.kind == TokenKind::Attribute
            || token.is_word("mutating")
            || token.is_word("nonmutating")
            || token.is_word("__consuming")
        {
            index = next;
            continue;
        }
        if token.kind != TokenKind::Identifier || !ACCESSORS.contains(token.text.as_str()) {
            return false;
        }
        // `set.insert(x)` is a statement, not a clause
        return next_significant(tokens, next).is_some_and(|after| {
            let after = &tokens[after];
            matches!(
                after.kind,
                TokenKind::OpenBrace | TokenKind::OpenParen | TokenKind::CloseBrace
            ) || ACCESSORS.contains(after.text.as_str())
                || after.is_word("async")
                || after.is_word("throws")
        });
    }
}

/// What may follow an accessor word before its body: `set(newValue)`, `get async throws`.
fn is_accessor_clause(tokens: &[Token], rest: &[usize]) -> bool {
    let words = match rest {
        [open, close, words @ ..]
            if tokens[*open].kind == TokenKind::OpenParen
                && tokens[*close].kind == TokenKind::CloseParen =>
        {
            words
        }
        words => words,
    };
    words
        .iter()
        .all(|&index| tokens[index].is_word("async") || tokens[index].is_word("throws"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::lex;

    /// Kind of the n-th `{` in `source`.
    fn kind_of(source: &str, nth: usize) -> ScopeKind {
        let tokens = lex(source).unwrap();
        let opens: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind == TokenKind::OpenBrace)
            .map(|(i, _)| i)
            .collect();
        let open = opens[nth];
        let mut depth = 0;
        let close = (open..tokens.len())
            .find(|&i| {
                match tokens[i].kind {
                    TokenKind::OpenBrace => depth += 1,
                    TokenKind::CloseBrace => depth -= 1,
                    _ => {}
                }
                depth == 0
            })
            .unwrap();
        classify(&tokens, open, close).0
    }

    #[test]
    fn test_type_declarations() {
        assert_eq!(kind_of("struct A {}", 0), ScopeKind::TypeDeclaration);
        assert_eq!(kind_of("final class A: B {}", 0), ScopeKind::TypeDeclaration);
        assert_eq!(kind_of("@MainActor\npublic actor A {}", 0), ScopeKind::TypeDeclaration);
        assert_eq!(kind_of("extension A.B where C: D {}", 0), ScopeKind::TypeDeclaration);
        assert_eq!(kind_of("indirect enum A<T> {}", 0), ScopeKind::TypeDeclaration);
    }

    #[test]
    fn test_protocols() {
        assert_eq!(kind_of("public protocol A: AnyObject {}", 0), ScopeKind::Protocol);
    }

    #[test]
    fn test_functions() {
        assert_eq!(kind_of("override func a() {}", 0), ScopeKind::FunctionBody);
        assert_eq!(kind_of("class func a() -> Int {}", 0), ScopeKind::FunctionBody);
        assert_eq!(kind_of("required init?(coder: NSCoder) {}", 0), ScopeKind::FunctionBody);
        assert_eq!(kind_of("deinit {}", 0), ScopeKind::FunctionBody);
        assert_eq!(
            kind_of("func a(\n    b: Int\n) throws -> Int\n{\n}", 0),
            ScopeKind::FunctionBody
        );
    }

    #[test]
    fn test_properties() {
        assert_eq!(kind_of("var a: Int { get set }", 0), ScopeKind::AccessorBody);
        assert_eq!(kind_of("var a: Int { 1 }", 0), ScopeKind::FunctionBody);
        assert_eq!(
            kind_of("var a: Int { get { 1 } set { } }", 0),
            ScopeKind::AccessorBody
        );
        assert_eq!(kind_of("var a: Int { get { 1 } }", 1), ScopeKind::FunctionBody);
        assert_eq!(kind_of("var a = 1 { didSet { } }", 0), ScopeKind::AccessorBody);
        assert_eq!(kind_of("var a = 1 { didSet { } }", 1), ScopeKind::FunctionBody);
        assert_eq!(kind_of("var a: Int { set(v) { } }", 1), ScopeKind::FunctionBody);
        assert_eq!(kind_of("let a = { 1 }", 0), ScopeKind::ClosureBody);
        assert_eq!(kind_of("subscript(i: Int) -> Int { 1 }", 0), ScopeKind::FunctionBody);
    }

    #[test]
    fn test_control_flow() {
        assert_eq!(kind_of("if a {}", 0), ScopeKind::ConditionalBody);
        assert_eq!(kind_of("if a {} else {}", 1), ScopeKind::ConditionalBody);
        assert_eq!(kind_of("guard let a else {}", 0), ScopeKind::ConditionalBody);
        assert_eq!(kind_of("for a in b where a {}", 0), ScopeKind::ConditionalBody);
        assert_eq!(kind_of("do {} catch let e {}", 1), ScopeKind::ConditionalBody);
        assert_eq!(kind_of("switch a {}", 0), ScopeKind::SwitchBody);
        assert_eq!(kind_of("outer: while true {}", 0), ScopeKind::ConditionalBody);
    }

    #[test]
    fn test_control_flow_after_case_labels() {
        assert_eq!(kind_of("case .a: if b {}", 0), ScopeKind::ConditionalBody);
        assert_eq!(kind_of("default: for x in y {}", 0), ScopeKind::ConditionalBody);
    }

    #[test]
    fn test_closures() {
        assert_eq!(kind_of("foo.bar { x in }", 0), ScopeKind::ClosureBody);
        assert_eq!(kind_of("foo(a) { }", 0), ScopeKind::ClosureBody);
        assert_eq!(kind_of("foo(a: { })", 0), ScopeKind::ClosureBody);
        assert_eq!(kind_of("return { }", 0), ScopeKind::ClosureBody);
        assert_eq!(kind_of("if a.contains(where: { $0 }) {}", 0), ScopeKind::ClosureBody);
        assert_eq!(kind_of("if a.contains(where: { $0 }) {}", 1), ScopeKind::ConditionalBody);
    }

    #[test]
    fn test_unrecognized_shapes() {
        assert_eq!(kind_of("{ }", 0), ScopeKind::Other);
        assert_eq!(kind_of("precedencegroup A {}", 0), ScopeKind::Other);
    }
}
