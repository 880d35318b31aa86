#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

use std::fmt::Display;

use error_stack::{Context, Report, Result, ResultExt};

pub mod text;

pub trait IntoReportFromString {
    type Ok;
    type Err: Display;

    #[track_caller]
    fn into_error_string<C: Context>(self, context: C) -> Result<Self::Ok, C>;
}

impl<Ok, Err: Display> IntoReportFromString for std::result::Result<Ok, Err> {
    type Ok = Ok;
    type Err = Err;

    fn into_error_string<C: Context>(
        self,
        context: C,
    ) -> Result<<Self as IntoReportFromString>::Ok, C> {
        match self {
            Ok(ok) => Ok(ok),
            Err(err) => Err(context.report()).attach_printable(err.to_string()),
        }
    }
}

pub trait ContextExt: Context + Sized {
    #[track_caller]
    fn report(self) -> Report<Self> {
        error_stack::report!(self)
    }
}

impl<E: Context + Sized> ContextExt for E {}

pub fn current_unix_time() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(thiserror::Error, Debug)]
    enum TestError {
        #[error("Test error")]
        Test,
    }

    #[test]
    fn error_string_is_attached_to_report() {
        let result: std::result::Result<(), String> = Err("parse failed at 3".to_string());
        let report = result.into_error_string(TestError::Test).unwrap_err();
        let printed = format!("{:?}", report);
        assert!(printed.contains("parse failed at 3"));
        assert!(matches!(report.current_context(), TestError::Test));
    }

    #[test]
    fn ok_value_passes_through() {
        let result: std::result::Result<u8, String> = Ok(4);
        assert_eq!(result.into_error_string(TestError::Test).unwrap(), 4);
    }
}
