use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn index_out_of_range(index: usize, size: usize) -> Error {
        Error(ErrorKind::IndexOutOfRange { index, size }.into())
    }

    pub fn sub_range_out_of_range(from: usize, to: usize, size: usize) -> Error {
        Error(ErrorKind::IndexOutOfRange {
            index: if to > size { to } else { from },
            size,
        }
        .into())
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn unsupported_operation(name: impl Into<String>) -> Error {
        Error(ErrorKind::UnsupportedOperation { name: name.into() }.into())
    }

    pub fn use_after_release(name: impl Into<String>) -> Error {
        Error(ErrorKind::UseAfterRelease { name: name.into() }.into())
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("index {index} out of range for size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("unsupported operation {name}")]
    UnsupportedOperation { name: String },

    #[error("{name} accessed after its native buffer was released")]
    UseAfterRelease { name: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
