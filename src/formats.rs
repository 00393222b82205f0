//! Debug output for tokens and scopes
//!
//! - [token_listing]: one line per token with kind, byte span and escaped text
//! - [scope_outline]: the scope tree, indented by depth, with line ranges and statement counts

use crate::lexing::Token;
use crate::pipeline::Analysis;
use crate::scoping::ScopeId;
use std::fmt::Write;

pub fn token_listing(tokens: &[Token]) -> String {
    let mut output = String::new();
    for token in tokens {
        let kind = format!("{:?}", token.kind);
        let _ = writeln!(
            output,
            "{:<24} {:>5}..{:<5} {:?}",
            kind, token.span.start, token.span.end, token.text
        );
    }
    output
}

/// `Kind first-last (n statements)` per scope, children indented under their parent.
pub fn scope_outline(analysis: &Analysis) -> String {
    let lines = line_starts(&analysis.tokens);
    let mut output = String::new();
    let mut stack: Vec<ScopeId> = analysis.scopes.roots().iter().rev().copied().collect();

    while let Some(id) = stack.pop() {
        let scope = analysis.scopes.get(id);
        let statements = analysis.statements.statements(id).len();
        let _ = writeln!(
            output,
            "{}{} {}-{} ({} statement{})",
            "  ".repeat(scope.depth),
            scope.kind,
            lines[scope.open],
            lines[scope.close],
            statements,
            if statements == 1 { "" } else { "s" }
        );
        stack.extend(analysis.scopes.children(id).iter().rev());
    }
    output
}

/// Line number of every token's first character.
fn line_starts(tokens: &[Token]) -> Vec<usize> {
    let mut line = 1;
    tokens
        .iter()
        .map(|token| {
            let start = line;
            line += token.text.matches('\n').count();
            start
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::lex;
    use crate::pipeline::Formatter;

    #[test]
    fn test_token_listing() {
        let tokens = lex("a\n").unwrap();
        let listing = token_listing(&tokens);
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Identifier"));
        assert!(lines[0].ends_with("\"a\""));
        assert!(lines[1].ends_with("\"\\n\""));
    }

    #[test]
    fn test_scope_outline() {
        let analysis = Formatter::new()
            .analyze("struct A {\n    func b() {\n        c()\n    }\n}\n")
            .unwrap();
        assert_eq!(
            scope_outline(&analysis),
            "TypeDeclaration 1-5 (1 statement)\n  FunctionBody 2-4 (1 statement)\n"
        );
    }
}
