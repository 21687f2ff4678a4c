use crate::codec::DecodeError;
use crate::field::FieldErrorList;
use crate::lookup::LookupError;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("could not decode providerConfig of {owner}: {source}")]
    Decode {
        owner: String,
        #[source]
        source: DecodeError,
    },

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("{0}")]
    Invalid(FieldErrorList),

    #[error("validation cancelled")]
    Cancelled,
}

impl ValidationError {
    pub fn decode(owner: impl Into<String>, source: DecodeError) -> Self {
        Self::Decode {
            owner: owner.into(),
            source,
        }
    }

    /// Findings carried by this error, if it is a field-level rejection.
    pub fn field_errors(&self) -> Option<&FieldErrorList> {
        match self {
            Self::Invalid(errs) => Some(errs),
            _ => None,
        }
    }
}

impl From<FieldErrorList> for ValidationError {
    fn from(errs: FieldErrorList) -> Self {
        Self::Invalid(errs)
    }
}
