//! Brace tracking
//!
//!     Pairs `{` with `}` using a stack, classifying each scope as it closes, then splits every
//!     switch body into case regions. Literals and comments are whole tokens by now, so only
//!     structural braces reach the stack.

use super::boundaries::ends_statement;
use super::classifier::classify;
use super::scope::{ScopeKind, ScopeRecord, ScopeTree};
use crate::lexing::{SourcePosition, Token, TokenKind};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// Braces that do not pair up. Positions point at the offending brace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
pub enum UnbalancedScopeError {
    #[error("unexpected '}}' at line {}, column {}", .position.line, .position.column)]
    UnexpectedClose {
        offset: usize,
        position: SourcePosition,
    },
    #[error("unclosed '{{' opened at line {}, column {}", .position.line, .position.column)]
    Unclosed {
        offset: usize,
        position: SourcePosition,
    },
}

impl UnbalancedScopeError {
    pub fn offset(&self) -> usize {
        match self {
            UnbalancedScopeError::UnexpectedClose { offset, .. }
            | UnbalancedScopeError::Unclosed { offset, .. } => *offset,
        }
    }
}

/// Builds the scope tree for a lexed token stream.
pub fn build_scope_tree(tokens: &[Token]) -> Result<ScopeTree, UnbalancedScopeError> {
    let mut stack: Vec<usize> = Vec::new();
    let mut records = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::OpenBrace => stack.push(index),
            TokenKind::CloseBrace => {
                let open = stack
                    .pop()
                    .ok_or_else(|| UnbalancedScopeError::UnexpectedClose {
                        offset: token.span.start,
                        position: SourcePosition::of_token(tokens, index),
                    })?;
                let (kind, header) = classify(tokens, open, index);
                records.push(ScopeRecord {
                    kind,
                    open,
                    close: index,
                    header,
                });
            }
            _ => {}
        }
    }

    // innermost unclosed brace
    if let Some(&open) = stack.last() {
        return Err(UnbalancedScopeError::Unclosed {
            offset: tokens[open].span.start,
            position: SourcePosition::of_token(tokens, open),
        });
    }

    let matching: HashMap<usize, usize> = records.iter().map(|r| (r.open, r.close)).collect();
    let cases: Vec<ScopeRecord> = records
        .iter()
        .filter(|record| record.kind == ScopeKind::SwitchBody)
        .flat_map(|record| case_regions(tokens, record.open, record.close, &matching))
        .collect();
    records.extend(cases);

    let tree = ScopeTree::from_records(records);
    tracing::debug!(scopes = tree.len(), "built scope tree");
    Ok(tree)
}

fn is_case_label_start(token: &Token) -> bool {
    token.is_keyword("case")
        || token.is_keyword("default")
        || (token.kind == TokenKind::Attribute && token.text == "@unknown")
}

/// Case regions of the switch body `open..=close`.
///
/// Labels are found at the switch's own level, at the start of a statement. Each region runs
/// from the label's `:` to the next label, or to the closing brace for the last one.
fn case_regions(
    tokens: &[Token],
    open: usize,
    close: usize,
    matching: &HashMap<usize, usize>,
) -> Vec<ScopeRecord> {
    // (label start, colon)
    let mut labels: Vec<(usize, usize)> = Vec::new();
    let mut pending: Option<usize> = None;
    let mut depth = 0usize;
    let mut at_statement_start = true;
    let mut index = open + 1;

    while index < close {
        let token = &tokens[index];

        if token.kind == TokenKind::OpenBrace {
            if let Some(&end) = matching.get(&index) {
                index = end + 1;
                at_statement_start = false;
                continue;
            }
        }
        if !token.is_significant() {
            if token.is_line_end() && depth == 0 && ends_statement(tokens, index) {
                at_statement_start = true;
            }
            index += 1;
            continue;
        }

        if token.opens_group() {
            depth += 1;
        } else if token.closes_group() {
            depth = depth.saturating_sub(1);
        }

        if depth == 0 {
            match pending {
                Some(start) if token.kind == TokenKind::Colon => {
                    labels.push((start, index));
                    pending = None;
                    at_statement_start = true;
                    index += 1;
                    continue;
                }
                None if at_statement_start && is_case_label_start(token) => pending = Some(index),
                _ => {}
            }
            if token.kind == TokenKind::Semicolon {
                at_statement_start = true;
                index += 1;
                continue;
            }
        }

        at_statement_start = false;
        index += 1;
    }

    labels
        .iter()
        .enumerate()
        .map(|(n, &(start, colon))| ScopeRecord {
            kind: ScopeKind::CaseBody,
            open: colon,
            close: labels.get(n + 1).map_or(close, |&(next, _)| next),
            header: start..colon,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::lex;
    use crate::scoping::ScopeId;

    fn tree(source: &str) -> (Vec<Token>, ScopeTree) {
        let tokens = lex(source).unwrap();
        let tree = build_scope_tree(&tokens).unwrap();
        (tokens, tree)
    }

    fn kinds(tree: &ScopeTree) -> Vec<(ScopeKind, usize)> {
        tree.iter().map(|(_, s)| (s.kind, s.depth)).collect()
    }

    #[test]
    fn test_nested_scopes() {
        let (_, tree) = tree("class A {\n    func b() {\n        if c {\n        }\n    }\n}\n");
        assert_eq!(
            kinds(&tree),
            vec![
                (ScopeKind::TypeDeclaration, 0),
                (ScopeKind::FunctionBody, 1),
                (ScopeKind::ConditionalBody, 2),
            ]
        );
        assert_eq!(tree.parent(ScopeId(2)), Some(ScopeId(1)));
    }

    #[test]
    fn test_braces_in_literals_are_ignored() {
        let (_, tree) = tree("func a() {\n    let s = \"{ \\(b) }\"\n    // }\n    /* { */\n}\n");
        assert_eq!(kinds(&tree), vec![(ScopeKind::FunctionBody, 0)]);
    }

    #[test]
    fn test_unexpected_close() {
        let tokens = lex("a()\n}").unwrap();
        let err = build_scope_tree(&tokens).unwrap_err();
        assert_eq!(
            err,
            UnbalancedScopeError::UnexpectedClose {
                offset: 4,
                position: SourcePosition { line: 2, column: 1 },
            }
        );
        assert_eq!(err.to_string(), "unexpected '}' at line 2, column 1");
    }

    #[test]
    fn test_unclosed_reports_innermost() {
        let tokens = lex("struct A {\n  func b() {\n").unwrap();
        let err = build_scope_tree(&tokens).unwrap_err();
        assert_eq!(err.offset(), 22);
        assert_eq!(err.to_string(), "unclosed '{' opened at line 2, column 12");
    }

    #[test]
    fn test_switch_cases() {
        let source = "switch a {\ncase .b:\n    c()\ncase .d, .e:\n    if f {\n    }\n@unknown default:\n    break\n}\n";
        let (tokens, tree) = tree(source);
        assert_eq!(
            kinds(&tree),
            vec![
                (ScopeKind::SwitchBody, 0),
                (ScopeKind::CaseBody, 1),
                (ScopeKind::CaseBody, 1),
                (ScopeKind::ConditionalBody, 2),
                (ScopeKind::CaseBody, 1),
            ]
        );
        let last = tree.get(ScopeId(4));
        assert_eq!(tokens[last.header.start].text, "@unknown");
        assert_eq!(tokens[last.close].kind, TokenKind::CloseBrace);
        assert_eq!(tokens[tree.get(ScopeId(1)).close].text, "case");
    }

    #[test]
    fn test_case_statements_on_label_line() {
        let (_, tree) = tree("switch a {\ncase 1: return 2\ndefault: return 3\n}");
        assert_eq!(tree.of_kind(ScopeKind::CaseBody).count(), 2);
    }

    #[test]
    fn test_case_patterns_in_nested_switch_stay_separate() {
        let (_, tree) = tree("switch a {\ncase 1:\n    switch b {\n    case 2: break\n    }\n}");
        let cases: Vec<usize> = tree
            .of_kind(ScopeKind::CaseBody)
            .map(|(_, s)| s.depth)
            .collect();
        assert_eq!(cases, vec![1, 3]);
    }

    #[test]
    fn test_empty_source() {
        let (_, tree) = tree("");
        assert!(tree.is_empty());
    }
}
