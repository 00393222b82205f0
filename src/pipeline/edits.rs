//! Edits and edit application
//!
//!     Rules describe changes as edits against the unmodified token stream. Promotion and
//!     demotion rewrite a single token in place (a LineBreak becomes a BlankLine or the other
//!     way round). Where a line has no break to promote, a new BlankLine is spliced in front of
//!     a token instead. Edits from different rules are merged into one batch and applied in a
//!     single pass, last position first, so a splice never moves a position still to be edited.

use crate::lexing::{Token, TokenKind};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EditOperation {
    /// Promote a LineBreak to a two-break BlankLine.
    InsertBlankLine,
    /// Demote a BlankLine to a single LineBreak.
    RemoveBlankLine,
    /// Splice a new two-break BlankLine in front of a token that does not end a line.
    InsertBlankLineBefore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edit {
    /// Token index in the pre-edit stream
    pub position: usize,
    pub operation: EditOperation,
}

impl Edit {
    pub fn insert_blank_line(position: usize) -> Self {
        Edit {
            position,
            operation: EditOperation::InsertBlankLine,
        }
    }

    pub fn remove_blank_line(position: usize) -> Self {
        Edit {
            position,
            operation: EditOperation::RemoveBlankLine,
        }
    }

    pub fn insert_blank_line_before(position: usize) -> Self {
        Edit {
            position,
            operation: EditOperation::InsertBlankLineBefore,
        }
    }
}

/// Why a set of edits was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum EditViolation {
    #[error("position {position} is out of bounds for {len} tokens")]
    OutOfBounds { position: usize, len: usize },
    #[error("{operation:?} cannot target {found:?} at position {position}")]
    WrongTarget {
        position: usize,
        operation: EditOperation,
        found: TokenKind,
    },
    #[error("conflicting edits at position {position}")]
    Conflict { position: usize },
}

/// A rule whose edits failed validation. Reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rule '{rule}' produced invalid edits: {violation}")]
pub struct InternalError {
    pub rule: String,
    pub violation: EditViolation,
}

/// Checks one rule's edits against the token stream and drops exact duplicates.
///
/// The result is sorted by position.
pub fn validate(edits: Vec<Edit>, tokens: &[Token]) -> Result<Vec<Edit>, EditViolation> {
    let mut accepted: BTreeMap<usize, EditOperation> = BTreeMap::new();

    for edit in edits {
        let token = tokens.get(edit.position).ok_or(EditViolation::OutOfBounds {
            position: edit.position,
            len: tokens.len(),
        })?;
        let targets = match edit.operation {
            EditOperation::InsertBlankLine => token.kind == TokenKind::LineBreak,
            EditOperation::RemoveBlankLine => token.is_blank_line(),
            EditOperation::InsertBlankLineBefore => !token.is_line_end(),
        };
        if !targets {
            return Err(EditViolation::WrongTarget {
                position: edit.position,
                operation: edit.operation,
                found: token.kind,
            });
        }
        if let Some(previous) = accepted.insert(edit.position, edit.operation) {
            if previous != edit.operation {
                return Err(EditViolation::Conflict {
                    position: edit.position,
                });
            }
        }
    }

    Ok(accepted
        .into_iter()
        .map(|(position, operation)| Edit {
            position,
            operation,
        })
        .collect())
}

/// Edits accepted so far, keyed by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBatch {
    edits: BTreeMap<usize, EditOperation>,
}

impl EditBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Adds validated edits, all or nothing. Repeating an accepted edit is fine; a different
    /// operation on an accepted position is a conflict.
    pub fn merge(&mut self, edits: &[Edit]) -> Result<(), EditViolation> {
        if let Some(edit) = edits.iter().find(|edit| {
            self.edits
                .get(&edit.position)
                .is_some_and(|&operation| operation != edit.operation)
        }) {
            return Err(EditViolation::Conflict {
                position: edit.position,
            });
        }
        self.edits
            .extend(edits.iter().map(|edit| (edit.position, edit.operation)));
        Ok(())
    }

    /// Rewrites the targeted tokens, last position first, then renumbers spans.
    ///
    /// Spliced blank lines use the stream's first line ending, or `\n` when it has none.
    pub fn apply(self, mut tokens: Vec<Token>) -> Vec<Token> {
        let newline = line_ending(&tokens);
        for (&position, &operation) in self.edits.iter().rev() {
            if position >= tokens.len() {
                continue;
            }
            tracing::trace!(position, ?operation, "applying edit");
            if operation == EditOperation::InsertBlankLineBefore {
                let blank = Token::new(TokenKind::BlankLine { breaks: 2 }, newline.repeat(2), 0..0);
                tokens.insert(position, blank);
                continue;
            }
            let token = &mut tokens[position];
            match operation {
                EditOperation::InsertBlankLine => {
                    token.text = token.text.repeat(2);
                    token.kind = TokenKind::BlankLine { breaks: 2 };
                }
                EditOperation::RemoveBlankLine => {
                    let first_break = if token.text.starts_with("\r\n") {
                        "\r\n"
                    } else {
                        "\n"
                    };
                    token.text = first_break.to_string();
                    token.kind = TokenKind::LineBreak;
                }
                EditOperation::InsertBlankLineBefore => {}
            }
        }

        let mut offset = 0;
        for token in &mut tokens {
            let end = offset + token.text.len();
            token.span = offset..end;
            offset = end;
        }
        tokens
    }
}

fn line_ending(tokens: &[Token]) -> &'static str {
    match tokens.iter().find(|token| token.is_line_end()) {
        Some(token) if token.text.starts_with("\r\n") => "\r\n",
        _ => "\n",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::{lex, render};

    #[test]
    fn test_validate_sorts_and_collapses_duplicates() {
        let tokens = lex("a\nb\nc").unwrap();
        let edits = vec![
            Edit::insert_blank_line(3),
            Edit::insert_blank_line(1),
            Edit::insert_blank_line(3),
        ];
        assert_eq!(
            validate(edits, &tokens).unwrap(),
            vec![Edit::insert_blank_line(1), Edit::insert_blank_line(3)]
        );
    }

    #[test]
    fn test_validate_rejects_out_of_bounds() {
        let tokens = lex("a\nb").unwrap();
        assert_eq!(
            validate(vec![Edit::insert_blank_line(9)], &tokens),
            Err(EditViolation::OutOfBounds {
                position: 9,
                len: 3
            })
        );
    }

    #[test]
    fn test_validate_rejects_wrong_target() {
        let tokens = lex("a\nb").unwrap();
        assert_eq!(
            validate(vec![Edit::remove_blank_line(1)], &tokens),
            Err(EditViolation::WrongTarget {
                position: 1,
                operation: EditOperation::RemoveBlankLine,
                found: TokenKind::LineBreak,
            })
        );
        assert!(validate(vec![Edit::insert_blank_line(0)], &tokens).is_err());
    }

    #[test]
    fn test_merge_rejects_conflicts_atomically() {
        let tokens = lex("a\n\nb\nc").unwrap();
        let mut batch = EditBatch::new();
        batch.merge(&[Edit::insert_blank_line(3)]).unwrap();
        batch.merge(&[Edit::insert_blank_line(3)]).unwrap();
        assert_eq!(batch.len(), 1);

        let conflicting = [Edit::remove_blank_line(1), Edit::remove_blank_line(3)];
        assert_eq!(
            batch.merge(&conflicting),
            Err(EditViolation::Conflict { position: 3 })
        );
        assert_eq!(batch.len(), 1);
        assert_eq!(render(&batch.apply(tokens)), "a\n\nb\n\nc");
    }

    #[test]
    fn test_apply_promotes_and_demotes() {
        let tokens = lex("a\r\nb\n\n\nc").unwrap();
        let mut batch = EditBatch::new();
        batch
            .merge(&[Edit::insert_blank_line(1), Edit::remove_blank_line(3)])
            .unwrap();
        let tokens = batch.apply(tokens);
        assert_eq!(render(&tokens), "a\r\n\r\nb\nc");
        assert_eq!(tokens[1].kind, TokenKind::BlankLine { breaks: 2 });
        assert_eq!(tokens[3].kind, TokenKind::LineBreak);
        assert_eq!(tokens[4].span, 7..8);
    }

    #[test]
    fn test_splice_blank_lines_before_tokens() {
        let tokens = lex("struct A { var a = 1 }").unwrap();
        let mut batch = EditBatch::new();
        batch
            .merge(&[
                Edit::insert_blank_line_before(5),
                Edit::insert_blank_line_before(13),
            ])
            .unwrap();
        let tokens = batch.apply(tokens);
        assert_eq!(render(&tokens), "struct A {\n\n var a = 1\n\n }");
        assert_eq!(tokens[5].kind, TokenKind::BlankLine { breaks: 2 });
        assert_eq!(tokens[5].span, 10..12);
    }

    #[test]
    fn test_splice_follows_crlf_streams() {
        let tokens = lex("a\r\nstruct B {}").unwrap();
        let mut batch = EditBatch::new();
        batch.merge(&[Edit::insert_blank_line_before(7)]).unwrap();
        assert_eq!(render(&batch.apply(tokens)), "a\r\nstruct B {\r\n\r\n}");
    }

    #[test]
    fn test_splice_cannot_target_line_ends() {
        let tokens = lex("a\nb").unwrap();
        assert_eq!(
            validate(vec![Edit::insert_blank_line_before(1)], &tokens),
            Err(EditViolation::WrongTarget {
                position: 1,
                operation: EditOperation::InsertBlankLineBefore,
                found: TokenKind::LineBreak,
            })
        );
    }

    #[test]
    fn test_internal_error_message() {
        let error = InternalError {
            rule: "broken".to_string(),
            violation: EditViolation::Conflict { position: 4 },
        };
        assert_eq!(
            error.to_string(),
            "rule 'broken' produced invalid edits: conflicting edits at position 4"
        );
    }
}
