pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// Returns early with [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument)
/// when the condition does not hold.
///
/// The argument name and the failed condition are both captured verbatim
/// in the error message.
///
/// ```
/// use emplace_common::{verify_arg, Result};
///
/// fn check_len(src: &[u8]) -> Result<()> {
///     verify_arg!(src, src.len() == 4);
///     Ok(())
/// }
///
/// assert!(check_len(&[1, 2, 3, 4]).is_ok());
/// let err = check_len(&[1, 2]).unwrap_err();
/// assert_eq!(err.to_string(), "invalid argument src: src.len() == 4");
/// ```
#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_arg(name, condition)
    }
}

#[cold]
pub fn invalid_arg(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::Error::invalid_arg(name, condition))
}
