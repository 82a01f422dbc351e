//! When does a typed filter value turn into a search?
//!
//! Text filters keep a draft while focused. Losing focus commits the draft
//! only when it differs from the value the field held when it gained focus,
//! and only when focus did not move onto the field's own clear affordance
//! (the clear action commits on its own). Enter ends editing through the same
//! blur path, so there is exactly one way a draft is committed.

use super::FilterField;

/// Where focus went when a field lost it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurTarget {
    Elsewhere,
    ClearAffordance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    Blur {
        field: FilterField,
        value: String,
        toward: BlurTarget,
    },
    Clear {
        field: FilterField,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Promote the value into a search.
    Committed { field: FilterField, value: String },
    /// Nothing changed that warrants a search.
    Discarded,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldEdit {
    #[default]
    Idle,
    Editing {
        field: FilterField,
        snapshot: String,
    },
}

impl FieldEdit {
    pub fn focus(&mut self, field: FilterField, current: &str) {
        *self = Self::Editing {
            field,
            snapshot: current.to_string(),
        };
    }

    pub fn editing(&self) -> Option<FilterField> {
        match self {
            Self::Editing { field, .. } => Some(*field),
            Self::Idle => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    /// Consume the pending snapshot and decide the outcome of `event`.
    pub fn resolve(&mut self, event: FilterEvent) -> CommitOutcome {
        let previous = std::mem::take(self);
        match event {
            FilterEvent::Clear { field } => CommitOutcome::Committed {
                field,
                value: String::new(),
            },
            FilterEvent::Blur {
                field,
                value,
                toward,
            } => {
                let FieldEdit::Editing {
                    field: focused,
                    snapshot,
                } = previous
                else {
                    return CommitOutcome::Discarded;
                };
                if focused != field || toward == BlurTarget::ClearAffordance || snapshot == value {
                    return CommitOutcome::Discarded;
                }
                CommitOutcome::Committed { field, value }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blur(field: FilterField, value: &str, toward: BlurTarget) -> FilterEvent {
        FilterEvent::Blur {
            field,
            value: value.to_string(),
            toward,
        }
    }

    #[test]
    fn changed_value_commits_on_blur() {
        let mut edit = FieldEdit::default();
        edit.focus(FilterField::Subject, "abc");
        let outcome = edit.resolve(blur(FilterField::Subject, "abcd", BlurTarget::Elsewhere));
        assert_eq!(
            outcome,
            CommitOutcome::Committed {
                field: FilterField::Subject,
                value: "abcd".to_string()
            }
        );
        assert_eq!(edit, FieldEdit::Idle);
    }

    #[test]
    fn unchanged_value_is_discarded() {
        let mut edit = FieldEdit::default();
        edit.focus(FilterField::From, "ops@example.com");
        let outcome = edit.resolve(blur(
            FilterField::From,
            "ops@example.com",
            BlurTarget::Elsewhere,
        ));
        assert_eq!(outcome, CommitOutcome::Discarded);
        assert!(!edit.is_editing());
    }

    #[test]
    fn blur_toward_clear_affordance_does_not_commit() {
        let mut edit = FieldEdit::default();
        edit.focus(FilterField::Id, "");
        let outcome = edit.resolve(blur(FilterField::Id, "42", BlurTarget::ClearAffordance));
        assert_eq!(outcome, CommitOutcome::Discarded);
    }

    #[test]
    fn clear_commits_without_focus() {
        let mut edit = FieldEdit::default();
        let outcome = edit.resolve(FilterEvent::Clear {
            field: FilterField::To,
        });
        assert_eq!(
            outcome,
            CommitOutcome::Committed {
                field: FilterField::To,
                value: String::new()
            }
        );
    }

    #[test]
    fn blur_without_focus_is_ignored() {
        let mut edit = FieldEdit::default();
        let outcome = edit.resolve(blur(FilterField::Subject, "x", BlurTarget::Elsewhere));
        assert_eq!(outcome, CommitOutcome::Discarded);
    }
}
