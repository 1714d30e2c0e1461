// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Test utility functions for use with the storage tests and the controller
pub use ::serde_json;
pub use pretty_assertions::assert_eq;

#[cfg(feature = "database")]
pub mod database;

/// Helper macro to compare a `[Serialize]` implementor with a JSON literal
///
/// Asserts that the left expression equals the right JSON literal when serialized.
///
/// # Examples
///
/// ```
/// use meetbase_test_util::assert_eq_json;
/// use serde::Serialize;
///
/// #[derive(Debug, Serialize)]
/// struct Guest {
///     name: String,
///     status: &'static str,
/// }
///
/// let ada = Guest {
///     name: "Ada".into(),
///     status: "pending",
/// };
///
/// assert_eq_json!(
///     ada,
///     {
///         "name": "Ada",
///         "status": "pending",
///     }
/// );
/// ```
#[macro_export]
macro_rules! assert_eq_json {
    ($val:expr,$($json:tt)+) => {
        let val: $crate::serde_json::Value = $crate::serde_json::to_value(&$val).expect("Expected value to be serializable");

        $crate::assert_eq!(val, $crate::serde_json::json!($($json)+));
    };
}
