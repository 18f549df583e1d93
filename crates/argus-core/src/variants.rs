//! Closed string-enum vocabularies for parameter validation.
//!
//! An [`EnumSpec`] names the accepted wire variants for a parameter; the
//! [`StringEnum`] trait ties such a vocabulary to a concrete Rust enum so
//! handlers can move from the wire string to a typed variant and back.

use crate::error::SpecError;
use serde::Serialize;

/// A closed set of accepted string variants.
///
/// Declared per parameter at startup; the binder rejects any supplied value
/// outside the set with an `enum_violation`.
///
/// # Example
///
/// ```rust
/// use argus_core::EnumSpec;
///
/// let spec = EnumSpec::new("model_name", ["alexnet", "resnet", "lenet"]).unwrap();
/// assert!(spec.contains("resnet"));
/// assert!(!spec.contains("vgg"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumSpec {
    name: String,
    variants: Vec<String>,
}

impl EnumSpec {
    /// Creates an enum vocabulary from a name and its accepted variants.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::EmptyEnum`] when no variants are given and
    /// [`SpecError::DuplicateVariant`] when a variant repeats.
    pub fn new<I, S>(name: impl Into<String>, variants: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let variants: Vec<String> = variants.into_iter().map(Into::into).collect();

        if variants.is_empty() {
            return Err(SpecError::EmptyEnum { name });
        }
        for (idx, variant) in variants.iter().enumerate() {
            if variants[..idx].contains(variant) {
                return Err(SpecError::DuplicateVariant {
                    name,
                    variant: variant.clone(),
                });
            }
        }

        Ok(Self { name, variants })
    }

    /// Creates the vocabulary declared by a [`StringEnum`] implementation.
    ///
    /// # Errors
    ///
    /// Returns a [`SpecError`] when the implementation declares no variants
    /// or repeats one.
    pub fn of<T: StringEnum>() -> Result<Self, SpecError> {
        Self::new(T::NAME, T::VARIANTS.iter().copied())
    }

    /// Returns the vocabulary name used in error messages.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the accepted variants in declaration order.
    #[must_use]
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// Returns true when `value` is an accepted variant.
    ///
    /// Matching is exact; no case folding.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.variants.iter().any(|v| v == value)
    }

    /// Renders the accepted variants for an error message.
    #[must_use]
    pub fn expected_one_of(&self) -> String {
        self.variants.join(", ")
    }
}

/// A Rust enum with a fixed wire vocabulary.
///
/// Implementations declare their wire name and variant strings as constants,
/// mirroring how typed headers declare a `NAME`. The binder validates against
/// [`EnumSpec::of`]; handlers recover the typed variant with
/// [`from_variant`](StringEnum::from_variant).
///
/// # Example
///
/// ```rust
/// use argus_core::StringEnum;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Color {
///     Red,
///     Blue,
/// }
///
/// impl StringEnum for Color {
///     const NAME: &'static str = "color";
///     const VARIANTS: &'static [&'static str] = &["red", "blue"];
///
///     fn from_variant(value: &str) -> Option<Self> {
///         match value {
///             "red" => Some(Self::Red),
///             "blue" => Some(Self::Blue),
///             _ => None,
///         }
///     }
///
///     fn as_variant(&self) -> &'static str {
///         match self {
///             Self::Red => "red",
///             Self::Blue => "blue",
///         }
///     }
/// }
///
/// assert_eq!(Color::from_variant("red"), Some(Color::Red));
/// assert_eq!(Color::Red.as_variant(), "red");
/// ```
pub trait StringEnum: Sized {
    /// The vocabulary name used in error messages.
    const NAME: &'static str;

    /// The accepted wire variants, in declaration order.
    const VARIANTS: &'static [&'static str];

    /// Parses a wire string into a variant, or `None` if it is not accepted.
    fn from_variant(value: &str) -> Option<Self>;

    /// Returns the wire string for this variant.
    fn as_variant(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Fruit {
        Apple,
        Pear,
    }

    impl StringEnum for Fruit {
        const NAME: &'static str = "fruit";
        const VARIANTS: &'static [&'static str] = &["apple", "pear"];

        fn from_variant(value: &str) -> Option<Self> {
            match value {
                "apple" => Some(Self::Apple),
                "pear" => Some(Self::Pear),
                _ => None,
            }
        }

        fn as_variant(&self) -> &'static str {
            match self {
                Self::Apple => "apple",
                Self::Pear => "pear",
            }
        }
    }

    #[test]
    fn test_contains_is_exact() {
        let spec = EnumSpec::new("model", ["alexnet", "resnet", "lenet"]).unwrap();
        assert!(spec.contains("alexnet"));
        assert!(!spec.contains("Alexnet"));
        assert!(!spec.contains("vgg"));
    }

    #[test]
    fn test_empty_enum_rejected() {
        let err = EnumSpec::new("model", Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, SpecError::EmptyEnum { .. }));
    }

    #[test]
    fn test_duplicate_variant_rejected() {
        let err = EnumSpec::new("model", ["a", "b", "a"]).unwrap_err();
        assert!(matches!(
            err,
            SpecError::DuplicateVariant { ref variant, .. } if variant == "a"
        ));
    }

    #[test]
    fn test_of_string_enum() {
        let spec = EnumSpec::of::<Fruit>().unwrap();
        assert_eq!(spec.name(), "fruit");
        assert_eq!(spec.variants(), ["apple", "pear"]);
        assert!(spec.contains("pear"));
    }

    #[test]
    fn test_expected_one_of() {
        let spec = EnumSpec::new("model", ["alexnet", "resnet"]).unwrap();
        assert_eq!(spec.expected_one_of(), "alexnet, resnet");
    }

    #[test]
    fn test_round_trip_variants() {
        for variant in Fruit::VARIANTS {
            let parsed = Fruit::from_variant(variant).unwrap();
            assert_eq!(parsed.as_variant(), *variant);
        }
        assert_eq!(Fruit::from_variant("mango"), None);
    }
}
