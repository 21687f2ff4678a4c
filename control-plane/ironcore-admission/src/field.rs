//! Field-path addressed validation errors.
//!
//! Paths render the way the API server reports them, e.g.
//! `spec.providerConfig.machineImages[0].versions[1]`.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn new(root: &str) -> Self {
        Self(root.to_string())
    }

    pub fn child(&self, name: &str) -> Self {
        Self(format!("{}.{}", self.0, name))
    }

    pub fn index(&self, idx: usize) -> Self {
        Self(format!("{}[{}]", self.0, idx))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorType {
    Forbidden,
    Required,
    Invalid,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Forbidden => "Forbidden",
            ErrorType::Required => "Required value",
            ErrorType::Invalid => "Invalid value",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    pub field: FieldPath,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bad_value: Option<String>,
}

impl FieldError {
    pub fn forbidden(field: FieldPath, detail: impl Into<String>) -> Self {
        Self {
            error_type: ErrorType::Forbidden,
            field,
            detail: detail.into(),
            bad_value: None,
        }
    }

    pub fn required(field: FieldPath, detail: impl Into<String>) -> Self {
        Self {
            error_type: ErrorType::Required,
            field,
            detail: detail.into(),
            bad_value: None,
        }
    }

    pub fn invalid(
        field: FieldPath,
        bad_value: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            error_type: ErrorType::Invalid,
            field,
            detail: detail.into(),
            bad_value: Some(bad_value.into()),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.error_type)?;
        if let Some(bad) = &self.bad_value {
            write!(f, ": {:?}", bad)?;
        }
        if !self.detail.is_empty() {
            write!(f, ": {}", self.detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldError {}

/// Ordered findings of one validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrorList(Vec<FieldError>);

impl FieldErrorList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, err: FieldError) {
        self.0.push(err);
    }

    pub fn append(&mut self, other: FieldErrorList) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }
}

impl From<FieldError> for FieldErrorList {
    fn from(err: FieldError) -> Self {
        Self(vec![err])
    }
}

impl From<Vec<FieldError>> for FieldErrorList {
    fn from(errs: Vec<FieldError>) -> Self {
        Self(errs)
    }
}

impl FromIterator<FieldError> for FieldErrorList {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for FieldErrorList {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrorList {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// Aggregate rendering: a single error prints as itself, several as `[a, b]`.
impl fmt::Display for FieldErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => Ok(()),
            [only] => write!(f, "{only}"),
            errs => {
                f.write_str("[")?;
                for (i, err) in errs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{err}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl std::error::Error for FieldErrorList {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_rendering() {
        let path = FieldPath::new("spec")
            .child("providerConfig")
            .child("machineImages")
            .index(0)
            .child("versions")
            .index(2);
        assert_eq!(
            path.as_str(),
            "spec.providerConfig.machineImages[0].versions[2]"
        );
    }

    #[test]
    fn messages() {
        let path = FieldPath::new("spec").child("parent").child("kind");
        assert_eq!(
            FieldError::forbidden(path.clone(), "nope").to_string(),
            "spec.parent.kind: Forbidden: nope"
        );
        assert_eq!(
            FieldError::required(path.clone(), "missing").to_string(),
            "spec.parent.kind: Required value: missing"
        );
        assert_eq!(
            FieldError::invalid(path, "image-1@1.1", "bad").to_string(),
            "spec.parent.kind: Invalid value: \"image-1@1.1\": bad"
        );
    }

    #[test]
    fn aggregate_rendering() {
        let a = FieldError::required(FieldPath::new("a"), "x");
        let b = FieldError::forbidden(FieldPath::new("b"), "y");

        let single = FieldErrorList::from(a.clone());
        assert_eq!(single.to_string(), "a: Required value: x");

        let both: FieldErrorList = vec![a, b].into();
        assert_eq!(both.len(), 2);
        assert_eq!(
            both.to_string(),
            "[a: Required value: x, b: Forbidden: y]"
        );
    }

    #[test]
    fn json_shape() {
        let err = FieldError::invalid(
            FieldPath::new("spec").child("machineImages").index(1),
            "image-1@1.1",
            "bad",
        );
        let value = serde_json::to_value(FieldErrorList::from(err)).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "type": "Invalid",
                "field": "spec.machineImages[1]",
                "detail": "bad",
                "badValue": "image-1@1.1"
            }])
        );
    }
}
