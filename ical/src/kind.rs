// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Define a fieldless enum whose variants map one-to-one onto RFC 5545
/// keywords.
///
/// Generates `name()`, a case-insensitive `FromStr` and a `Display` that
/// writes the keyword.
macro_rules! keyword_kind {
    (
        $(#[$attr:meta])*
        enum $ty:ident {
            $(
                $(#[$vattr:meta])*
                $variant:ident => $kw:ident
            ),+ $(,)?
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $(#[$attr])*
        pub enum $ty {
            $(
                $(#[$vattr])*
                $variant,
            )+
        }

        impl $ty {
            /// Returns the RFC 5545 keyword of this kind.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $kw,
                    )+
                }
            }
        }

        impl std::str::FromStr for $ty {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Keywords are case-insensitive per RFC 5545
                match s.to_ascii_uppercase().as_str() {
                    $(
                        $kw => Ok(Self::$variant),
                    )+
                    _ => Err(()),
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

pub(crate) use keyword_kind;
