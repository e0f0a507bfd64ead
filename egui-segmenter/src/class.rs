use std::fmt;

use crate::EditorError;

/// Identifier of a single mask class. Anonymous classes (created from a bare
/// count) are small integers, named classes are strings. Class index 0 is the
/// background and never carries a label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ClassLabel {
    Index(usize),
    Name(String),
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassLabel::Index(i) => write!(f, "{i}"),
            ClassLabel::Name(n) => f.write_str(n),
        }
    }
}

impl From<&str> for ClassLabel {
    fn from(value: &str) -> Self {
        ClassLabel::Name(value.to_owned())
    }
}

impl From<String> for ClassLabel {
    fn from(value: String) -> Self {
        ClassLabel::Name(value)
    }
}

/// Accepted inputs for the current-class setter: a label known to the
/// registry, or a 1-based index into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassSelector {
    Index(usize),
    Label(ClassLabel),
}

impl From<usize> for ClassSelector {
    fn from(value: usize) -> Self {
        ClassSelector::Index(value)
    }
}

impl From<ClassLabel> for ClassSelector {
    fn from(value: ClassLabel) -> Self {
        ClassSelector::Label(value)
    }
}

impl From<&str> for ClassSelector {
    fn from(value: &str) -> Self {
        ClassSelector::Label(value.into())
    }
}

impl From<String> for ClassSelector {
    fn from(value: String) -> Self {
        ClassSelector::Label(value.into())
    }
}

/// Construction-time class specification: either how many anonymous classes
/// to create, or an explicit ordered list of labels.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ClassSpec {
    Count(usize),
    Labels(Vec<ClassLabel>),
}

impl Default for ClassSpec {
    fn default() -> Self {
        ClassSpec::Count(1)
    }
}

impl ClassSpec {
    pub fn into_registry(self) -> Result<ClassRegistry, EditorError> {
        match self {
            ClassSpec::Count(n) => ClassRegistry::anonymous(n),
            ClassSpec::Labels(labels) => ClassRegistry::new(labels),
        }
    }
}

/// Ordered, unique class labels. Positions are addressed with 1-based
/// indices so that 0 stays reserved for the background.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassRegistry {
    labels: Vec<ClassLabel>,
}

impl ClassRegistry {
    pub fn new(labels: Vec<ClassLabel>) -> Result<Self, EditorError> {
        if labels.is_empty() {
            return Err(EditorError::EmptyClasses);
        }
        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(EditorError::DuplicateClass(label.clone()));
            }
        }
        Ok(Self { labels })
    }

    /// Anonymous classes `0..count`, as produced by a bare class count.
    pub fn anonymous(count: usize) -> Result<Self, EditorError> {
        Self::new((0..count).map(ClassLabel::Index).collect())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label stored at the given 1-based index. Panics on 0 or > len, which
    /// `resolve` never hands out.
    pub fn label(&self, index: usize) -> &ClassLabel {
        &self.labels[index - 1]
    }

    pub fn labels(&self) -> impl Iterator<Item = &ClassLabel> {
        self.labels.iter()
    }

    /// Resolve a selector to a 1-based index in `[1, len]`. Index 0 denotes
    /// the background and is rejected, as are unknown labels.
    pub fn resolve(&self, selector: &ClassSelector) -> Result<usize, EditorError> {
        match selector {
            ClassSelector::Index(i) => {
                if (1..=self.labels.len()).contains(i) {
                    Ok(*i)
                } else {
                    Err(EditorError::ClassIndexOutOfRange {
                        index: *i,
                        classes: self.labels.len(),
                    })
                }
            }
            ClassSelector::Label(label) => self
                .labels
                .iter()
                .position(|l| l == label)
                .map(|pos| pos + 1)
                .ok_or_else(|| EditorError::UnknownClass {
                    label: label.clone(),
                    known: self.labels.clone(),
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_labels_start_at_zero() {
        let registry = ClassRegistry::anonymous(3).unwrap();
        let labels: Vec<_> = registry.labels().cloned().collect();
        assert_eq!(
            labels,
            vec![ClassLabel::Index(0), ClassLabel::Index(1), ClassLabel::Index(2)]
        );
    }

    #[test]
    fn empty_registry_is_rejected() {
        assert!(matches!(
            ClassRegistry::anonymous(0),
            Err(EditorError::EmptyClasses)
        ));
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let result = ClassRegistry::new(vec!["leaf".into(), "stem".into(), "leaf".into()]);
        assert!(matches!(
            result,
            Err(EditorError::DuplicateClass(ClassLabel::Name(n))) if n == "leaf"
        ));
    }

    #[test]
    fn resolve_label_round_trips_through_index() {
        let registry = ClassRegistry::new(vec!["leaf".into(), "stem".into()]).unwrap();
        for (pos, label) in registry.labels().cloned().enumerate().collect::<Vec<_>>() {
            let idx = registry.resolve(&label.clone().into()).unwrap();
            assert_eq!(idx, pos + 1);
            assert_eq!(registry.label(idx), &label);
        }
    }

    #[test]
    fn resolve_rejects_background_and_out_of_range() {
        let registry = ClassRegistry::anonymous(2).unwrap();
        assert!(matches!(
            registry.resolve(&0.into()),
            Err(EditorError::ClassIndexOutOfRange { index: 0, classes: 2 })
        ));
        assert!(matches!(
            registry.resolve(&3.into()),
            Err(EditorError::ClassIndexOutOfRange { index: 3, classes: 2 })
        ));
        assert_eq!(registry.resolve(&2.into()).unwrap(), 2);
    }

    #[test]
    fn resolve_rejects_unknown_label() {
        let registry = ClassRegistry::new(vec!["leaf".into()]).unwrap();
        assert!(matches!(
            registry.resolve(&"bark".into()),
            Err(EditorError::UnknownClass { .. })
        ));
    }
}
