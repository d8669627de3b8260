use super::Error;

/// A value or column type that has no mapping between pgbind and the
/// database.
#[derive(Debug)]
pub(super) struct UnsupportedType {
    ty: Box<str>,
    context: Box<str>,
}

impl std::error::Error for UnsupportedType {}

impl core::fmt::Display for UnsupportedType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported type `{}` ({})", self.ty, self.context)
    }
}

impl Error {
    /// Creates an error for a type that cannot be converted.
    ///
    /// `context` names where the type was met, e.g. `column "created_at"`.
    pub fn unsupported_type(ty: impl Into<String>, context: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedType(UnsupportedType {
            ty: ty.into().into_boxed_str(),
            context: context.into().into_boxed_str(),
        }))
    }

    /// Returns `true` if this error is an unsupported type error.
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedType(_))
    }
}
