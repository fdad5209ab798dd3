//! Fitted label encoders for categorical columns.
//!
//! An encoder maps a class label to its position in the fitted class list.
//! Artifacts store the class list in fitted order (sorted at fit time), so the
//! loader keeps that order rather than re-sorting: numeric ids sort
//! differently as numbers than as strings.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::canonical_label;

/// A class label as it appears in an encoder artifact.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ClassLabel {
    Number(f64),
    Text(String),
}

impl ClassLabel {
    fn into_canonical(self) -> String {
        match self {
            ClassLabel::Number(v) => canonical_label(v),
            ClassLabel::Text(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<ClassLabel>")]
pub struct LabelEncoder {
    classes: Vec<String>,
    index: HashMap<String, usize>,
}

impl LabelEncoder {
    /// Fit an encoder on labels: unique values, sorted.
    pub fn fit<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = labels.into_iter().map(Into::into).collect();
        classes.sort();
        classes.dedup();
        Self::build(classes)
    }

    /// Wrap an already-fitted class list. Duplicates are rejected.
    pub fn from_classes(classes: Vec<String>) -> Result<Self, String> {
        let encoder = Self::build(classes);
        if encoder.index.len() != encoder.classes.len() {
            return Err("encoder class list contains duplicates".into());
        }
        Ok(encoder)
    }

    fn build(classes: Vec<String>) -> Self {
        let index = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self { classes, index }
    }

    /// Ordinal code for `label`, if it was seen at fit time.
    pub fn transform(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl TryFrom<Vec<ClassLabel>> for LabelEncoder {
    type Error = String;

    fn try_from(labels: Vec<ClassLabel>) -> Result<Self, Self::Error> {
        Self::from_classes(labels.into_iter().map(ClassLabel::into_canonical).collect())
    }
}
