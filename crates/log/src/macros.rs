//! Convenience macros for structured logging

/// Build a `Vec` of structured [`Field`](crate::Field)s.
///
/// ```
/// use svclog::fields;
///
/// let fields = fields!["attempt" => 2, "peer" => "10.0.0.7"];
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        ::std::vec::Vec::<$crate::Field>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Field::new($key, $value)),+]
    };
}

/// Log an error-valued expression at `ERROR` and hand it back, for use in
/// tail position.
///
/// ```
/// use svclog::{log_error, Logger};
///
/// # fn fallible() -> Result<(), std::io::Error> { Ok(()) }
/// # let log = Logger::new("billing", []).unwrap();
/// if let Err(err) = fallible() {
///     let _err = log_error!(log, err);
/// }
/// ```
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $err:expr) => {{
        let err = $err;
        $logger.error(&err.to_string(), &[]);
        err
    }};
    ($logger:expr, $err:expr, $($key:expr => $value:expr),+ $(,)?) => {{
        let err = $err;
        $logger.error(&err.to_string(), &$crate::fields![$($key => $value),+]);
        err
    }};
}
