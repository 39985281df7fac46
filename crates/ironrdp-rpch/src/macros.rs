/// Creates a `BindError` with `General` kind.
#[macro_export]
macro_rules! general_err {
    ( $context:expr $(,)? ) => {{
        <$crate::BindError as $crate::BindErrorExt>::general($context)
    }};
}

/// Creates a `BindError` with `Reason` kind.
#[macro_export]
macro_rules! reason_err {
    ( $context:expr, $($arg:tt)* ) => {{
        <$crate::BindError as $crate::BindErrorExt>::reason($context, format!($($arg)*))
    }};
}

/// Creates a `BindError` with `Custom` kind and a source error attached to it.
#[macro_export]
macro_rules! custom_err {
    ( $context:expr, $source:expr $(,)? ) => {{
        <$crate::BindError as $crate::BindErrorExt>::custom($context, $source)
    }};
}
