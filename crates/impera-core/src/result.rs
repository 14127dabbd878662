use crate::error::ImperaError;

pub type ImperaResult<T> = Result<T, ImperaError>;
