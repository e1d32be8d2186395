//! Accessor registration and lookup errors.

use crate::accessor::factory::AccessorFactory;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Boxed error produced by an accessor factory.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// An attribute with the requested name already exists on the host kind.
///
/// Carries the rejected factory so the caller can retry under another name.
pub struct RegistrationConflict<H> {
    pub kind: &'static str,
    pub name: String,
    pub factory: AccessorFactory<H>,
}

impl<H> Debug for RegistrationConflict<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationConflict")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("factory", &self.factory)
            .finish()
    }
}

impl<H> Display for RegistrationConflict<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "cannot register accessor `{}` under name `{}` for type `{}` because an attribute with that name already exists",
            self.factory.accessor_type_name(),
            self.name,
            self.kind
        )
    }
}

impl<H> Error for RegistrationConflict<H> {}

/// Registration-time errors.
pub enum AccessorRegistrationError<H> {
    InvalidName(String),
    Conflict(RegistrationConflict<H>),
}

impl<H> AccessorRegistrationError<H> {
    /// Returns the conflict details when this is a name collision.
    pub fn as_conflict(&self) -> Option<&RegistrationConflict<H>> {
        match self {
            Self::Conflict(conflict) => Some(conflict),
            Self::InvalidName(_) => None,
        }
    }
}

impl<H> Debug for AccessorRegistrationError<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(name) => f.debug_tuple("InvalidName").field(name).finish(),
            Self::Conflict(conflict) => f.debug_tuple("Conflict").field(conflict).finish(),
        }
    }
}

impl<H> Display for AccessorRegistrationError<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(name) => write!(
                f,
                "accessor name is invalid: `{name}`; expected an identifier like `geo`"
            ),
            Self::Conflict(conflict) => Display::fmt(conflict, f),
        }
    }
}

impl<H> Error for AccessorRegistrationError<H> {}

impl<H> From<RegistrationConflict<H>> for AccessorRegistrationError<H> {
    fn from(value: RegistrationConflict<H>) -> Self {
        Self::Conflict(value)
    }
}

/// Instance-level accessor lookup errors.
#[derive(Debug)]
pub enum AccessorError {
    /// No accessor is registered under `name` for `kind`.
    NotRegistered { kind: &'static str, name: String },
    /// The registered accessor is not of the requested Rust type.
    TypeMismatch {
        kind: &'static str,
        name: String,
        expected: &'static str,
        registered: &'static str,
    },
    /// The factory failed; `source` is the factory's own error.
    Construction {
        kind: &'static str,
        name: String,
        source: BoxError,
    },
}

impl Display for AccessorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotRegistered { kind, name } => {
                write!(f, "`{kind}` has no accessor named `{name}`")
            }
            Self::TypeMismatch {
                kind,
                name,
                expected,
                registered,
            } => write!(
                f,
                "accessor `{name}` on `{kind}` is `{registered}`, not `{expected}`"
            ),
            Self::Construction { source, .. } => Display::fmt(source, f),
        }
    }
}

impl Error for AccessorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Construction { source, .. } => Some(source.as_ref()),
            Self::NotRegistered { .. } | Self::TypeMismatch { .. } => None,
        }
    }
}
