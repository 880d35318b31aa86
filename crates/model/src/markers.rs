//! Values which error reports may print when debug mode is disabled.

use std::fmt::{self, Debug};

use super::*;

/// Printing for error report attachments. Personal data is replaced
/// with `-`.
pub trait IsLoggingAllowed: Debug {
    fn fmt_loggable(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

macro_rules! logging_policy {
    (print: [$($print:ty),* $(,)?], hide: [$($hide:ty),* $(,)?] $(,)?) => {
        $(
            impl IsLoggingAllowed for $print {
                fn fmt_loggable(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{:?}", self)
                }
            }
        )*
        $(
            impl IsLoggingAllowed for $hide {
                fn fmt_loggable(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str("-")
                }
            }
        )*
    };
}

logging_policy!(
    print: [
        UserId,
        ReportId,
        VendorId,
        StaffId,
        AssignmentId,
        NotificationId,
        RewardId,
        TransactionId,
        CollectedWasteId,
        ReportStatus,
        AssignmentStatus,
        VendorStatus,
        TransactionKind,
        NotificationKind,
        CollectedWasteStatus,
        UserRole,
        str,
        (),
    ],
    hide: [
        Identity,
        String,
        RegisterVendor,
        NewStaff,
        i64,
    ],
);

impl<T: IsLoggingAllowed + ?Sized> IsLoggingAllowed for &T {
    fn fmt_loggable(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt_loggable(f)
    }
}

impl<T: IsLoggingAllowed> IsLoggingAllowed for Option<T> {
    fn fmt_loggable(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(value) => {
                f.write_str("Some(")?;
                value.fmt_loggable(f)?;
                f.write_str(")")
            }
            None => f.write_str("None"),
        }
    }
}

macro_rules! tuple_logging {
    ($($name:ident: $index:tt),+) => {
        impl<$($name: IsLoggingAllowed),+> IsLoggingAllowed for ($($name,)+) {
            fn fmt_loggable(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let mut list = f.debug_tuple("");
                $(
                    list.field(&Loggable(&self.$index));
                )+
                list.finish()
            }
        }
    };
}

tuple_logging!(A: 0, B: 1);
tuple_logging!(A: 0, B: 1, C: 2);

/// Formats the inner value with [IsLoggingAllowed::fmt_loggable].
pub struct Loggable<'a, T: ?Sized>(pub &'a T);

impl<T: IsLoggingAllowed + ?Sized> Debug for Loggable<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_loggable(f)
    }
}

impl<T: IsLoggingAllowed + ?Sized> fmt::Display for Loggable<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_loggable(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_printed_and_personal_data_is_hidden() {
        assert_eq!(Loggable(&ReportId::new(3)).to_string(), "ReportId(3)");
        assert_eq!(Loggable(&"a@example.com".to_string()).to_string(), "-");
        assert_eq!(
            Loggable(&(UserId::new(1), "x".to_string())).to_string(),
            "(UserId(1), -)"
        );
        assert_eq!(
            Loggable(&Some(VendorId::new(2))).to_string(),
            "Some(VendorId(2))"
        );
    }
}
