//! Macro for implementing Display and FromStr for unit-only enums
//!
//! Used for the string forms of error kinds and config enums so that
//! log output, config files and serialized errors agree on one spelling.
//!
//! # Example
//!
//! ```rust
//! use vocawik_domain::impl_domain_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Stable,
//!     Beta,
//! }
//!
//! impl_domain_enum_conversions!(Channel {
//!     Stable => "stable",
//!     Beta => "beta",
//! });
//! ```

/// Implements Display and FromStr traits for unit-only enums
///
/// - Display writes the lowercase string form
/// - FromStr parses case-insensitively and reports the enum name on failure
#[macro_export]
macro_rules! impl_domain_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
