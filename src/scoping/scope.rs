//! Scope records and the scope tree.

use crate::lexing::{next_significant, prev_significant, Token, TokenKind};
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// What introduced a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScopeKind {
    /// `struct`, `class`, `enum`, `extension`, `actor` bodies
    TypeDeclaration,
    Protocol,
    /// Functions, initializers and accessors with a body
    FunctionBody,
    ClosureBody,
    SwitchBody,
    /// A `case ...:` / `default:` region inside a switch. Not brace delimited.
    CaseBody,
    ConditionalBody,
    /// `{ get set }` style accessor lists
    AccessorBody,
    /// Shapes the classifier does not recognize. Never edited.
    Other,
}

impl ScopeKind {
    /// Protocol bodies and accessor lists hold requirements, not statements.
    pub fn is_declaration_only(self) -> bool {
        matches!(self, ScopeKind::Protocol | ScopeKind::AccessorBody)
    }

    pub fn is_executable(self) -> bool {
        matches!(
            self,
            ScopeKind::FunctionBody
                | ScopeKind::ClosureBody
                | ScopeKind::SwitchBody
                | ScopeKind::CaseBody
                | ScopeKind::ConditionalBody
        )
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Index of a scope in its [`ScopeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScopeId(pub usize);

/// A classified region of the token stream.
///
/// For brace scopes `open` and `close` are the indices of the `{` and `}` tokens. For case
/// bodies `open` is the `:` ending the label and `close` is the token that ends the case (the
/// next label, or the switch's `}`), which does not belong to the case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scope {
    pub kind: ScopeKind,
    pub open: usize,
    pub close: usize,
    pub depth: usize,
    pub parent: Option<ScopeId>,
    /// Token range of the clause that introduced the scope (`override func foo()`)
    pub header: Range<usize>,
}

impl Scope {
    pub fn is_brace(&self) -> bool {
        self.kind != ScopeKind::CaseBody
    }

    /// Tokens strictly inside the scope.
    pub fn interior(&self) -> Range<usize> {
        self.open + 1..self.close
    }

    /// Tokens the scope occupies, delimiters included. A case body starts at its label.
    pub fn extent(&self) -> Range<usize> {
        if self.is_brace() {
            self.open..self.close + 1
        } else {
            self.header.start..self.close
        }
    }

    pub fn contains(&self, other: &Scope) -> bool {
        self.open < other.open && other.extent().end <= self.extent().end
    }

    /// Name of the function or initializer whose body this is.
    pub fn declared_name<'t>(&self, tokens: &'t [Token]) -> Option<&'t str> {
        for index in self.header.clone() {
            let token = &tokens[index];
            if token.is_keyword("func") {
                let name = next_significant(tokens, index).filter(|&n| n < self.header.end)?;
                return Some(tokens[name].text.as_str());
            }
            let after_dot = prev_significant(tokens, index)
                .is_some_and(|prev| prev >= self.header.start && tokens[prev].kind == TokenKind::Dot);
            if (token.is_keyword("init") || token.is_keyword("deinit")) && !after_dot {
                return Some(token.text.as_str());
            }
        }
        None
    }
}

/// Unfinished scope as produced by the tracker; parents and depths come from
/// [`ScopeTree::from_records`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScopeRecord {
    pub kind: ScopeKind,
    pub open: usize,
    pub close: usize,
    pub header: Range<usize>,
}

/// Arena of scopes in document order (by `open`), with non-owning parent links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    children: Vec<Vec<ScopeId>>,
    roots: Vec<ScopeId>,
}

impl ScopeTree {
    pub(crate) fn from_records(mut records: Vec<ScopeRecord>) -> Self {
        records.sort_by_key(|record| record.open);

        let mut tree = ScopeTree::default();
        let mut stack: Vec<ScopeId> = Vec::new();

        for record in records {
            let mut scope = Scope {
                kind: record.kind,
                open: record.open,
                close: record.close,
                depth: 0,
                parent: None,
                header: record.header,
            };
            while let Some(&top) = stack.last() {
                if tree.scopes[top.0].contains(&scope) {
                    break;
                }
                stack.pop();
            }

            let id = ScopeId(tree.scopes.len());
            scope.parent = stack.last().copied();
            scope.depth = stack.len();
            match scope.parent {
                Some(parent) => tree.children[parent.0].push(id),
                None => tree.roots.push(id),
            }
            tree.scopes.push(scope);
            tree.children.push(Vec::new());
            stack.push(id);
        }

        tree
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes
            .iter()
            .enumerate()
            .map(|(index, scope)| (ScopeId(index), scope))
    }

    pub fn of_kind(&self, kind: ScopeKind) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.iter().filter(move |(_, scope)| scope.kind == kind)
    }

    /// Direct children, in document order.
    pub fn children(&self, id: ScopeId) -> &[ScopeId] {
        &self.children[id.0]
    }

    pub fn roots(&self) -> &[ScopeId] {
        &self.roots
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.scopes[id.0].parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: ScopeKind, open: usize, close: usize) -> ScopeRecord {
        ScopeRecord {
            kind,
            open,
            close,
            header: open..open,
        }
    }

    #[test]
    fn test_tree_links_parents_and_depths() {
        let tree = ScopeTree::from_records(vec![
            record(ScopeKind::FunctionBody, 4, 8),
            record(ScopeKind::TypeDeclaration, 0, 10),
            record(ScopeKind::TypeDeclaration, 12, 14),
        ]);

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.roots(), &[ScopeId(0), ScopeId(2)]);
        assert_eq!(tree.get(ScopeId(0)).kind, ScopeKind::TypeDeclaration);
        assert_eq!(tree.get(ScopeId(1)).parent, Some(ScopeId(0)));
        assert_eq!(tree.get(ScopeId(1)).depth, 1);
        assert_eq!(tree.children(ScopeId(0)), &[ScopeId(1)]);
        assert_eq!(tree.parent(ScopeId(2)), None);
    }

    #[test]
    fn test_case_bodies_nest_between_braces() {
        // switch { case: { } case: }
        let tree = ScopeTree::from_records(vec![
            record(ScopeKind::SwitchBody, 0, 20),
            record(ScopeKind::CaseBody, 3, 10),
            record(ScopeKind::ClosureBody, 5, 8),
            record(ScopeKind::CaseBody, 12, 20),
        ]);

        assert_eq!(tree.children(ScopeId(0)), &[ScopeId(1), ScopeId(3)]);
        assert_eq!(tree.parent(ScopeId(2)), Some(ScopeId(1)));
        assert_eq!(tree.get(ScopeId(2)).depth, 2);
        assert_eq!(tree.get(ScopeId(3)).depth, 1);
    }

    #[test]
    fn test_extent_and_interior() {
        let brace = Scope {
            kind: ScopeKind::TypeDeclaration,
            open: 2,
            close: 6,
            depth: 0,
            parent: None,
            header: 0..2,
        };
        assert_eq!(brace.interior(), 3..6);
        assert_eq!(brace.extent(), 2..7);

        let case = Scope {
            kind: ScopeKind::CaseBody,
            ..brace.clone()
        };
        assert_eq!(case.interior(), 3..6);
        assert_eq!(case.extent(), 0..6);
    }

    #[test]
    fn test_kind_groups() {
        assert!(ScopeKind::Protocol.is_declaration_only());
        assert!(ScopeKind::AccessorBody.is_declaration_only());
        assert!(!ScopeKind::TypeDeclaration.is_declaration_only());
        assert!(ScopeKind::CaseBody.is_executable());
        assert!(!ScopeKind::Other.is_executable());
        assert_eq!(ScopeKind::FunctionBody.to_string(), "FunctionBody");
    }
}
