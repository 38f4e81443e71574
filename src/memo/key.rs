//! Memo Key Module
//!
//! Structural cache keys derived from a computation's inputs.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CacheError, Result};

// == Key Part ==
/// One encoded input value.
///
/// Each variant is tagged by kind, so inputs of different shapes never
/// compare equal: `(1, "2")` and `(12, "")` produce distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyPart {
    Unit,
    Bool(bool),
    Int(i128),
    /// IEEE-754 bits with `-0.0` folded into `0.0`
    Float(u64),
    Char(char),
    Str(String),
    Opt(Option<Box<KeyPart>>),
    Seq(Vec<KeyPart>),
}

impl KeyPart {
    /// Encodes a float, rejecting NaN since it has no structural equality.
    pub fn float(value: f64) -> Result<Self> {
        if value.is_nan() {
            return Err(CacheError::KeyDerivation(
                "NaN cannot be used as a memo input".to_string(),
            ));
        }
        let normalized = if value == 0.0 { 0.0 } else { value };
        Ok(Self::Float(normalized.to_bits()))
    }
}

// == Memo Key ==
/// Cache key for one memoized call.
///
/// Holds the function name, the positional inputs in order, and the named
/// inputs ordered by name. Two calls with structurally equal inputs always
/// derive equal keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemoKey {
    function: String,
    positional: Vec<KeyPart>,
    named: BTreeMap<String, KeyPart>,
}

impl MemoKey {
    /// Derives the key for calling `function` with `inputs`.
    ///
    /// # Errors
    /// Returns `CacheError::KeyDerivation` if any input cannot be encoded.
    pub fn derive<T: MemoInput + ?Sized>(function: &str, inputs: &T) -> Result<Self> {
        let mut args = MemoArgs::default();
        inputs.append_to(&mut args)?;
        Ok(Self {
            function: function.to_string(),
            positional: args.positional,
            named: args.named,
        })
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn positional(&self) -> &[KeyPart] {
        &self.positional
    }

    pub fn named(&self) -> &BTreeMap<String, KeyPart> {
        &self.named
    }
}

impl fmt::Display for MemoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.function)?;
        let mut first = true;
        for part in &self.positional {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{part:?}")?;
            first = false;
        }
        for (name, part) in &self.named {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{name}={part:?}")?;
            first = false;
        }
        write!(f, ")")
    }
}

// == Memo Args ==
/// Accumulates the positional and named inputs of one call.
#[derive(Debug, Default)]
pub struct MemoArgs {
    positional: Vec<KeyPart>,
    named: BTreeMap<String, KeyPart>,
}

impl MemoArgs {
    /// Appends a positional input.
    pub fn arg<T: MemoInput + ?Sized>(&mut self, value: &T) -> Result<&mut Self> {
        let part = value.to_key_part()?;
        self.positional.push(part);
        Ok(self)
    }

    /// Sets a named input. Supplying the same name twice is an error.
    pub fn named<T: MemoInput + ?Sized>(&mut self, name: &str, value: &T) -> Result<&mut Self> {
        let part = value.to_key_part()?;
        if self.named.insert(name.to_string(), part).is_some() {
            return Err(CacheError::KeyDerivation(format!(
                "named input '{name}' supplied more than once"
            )));
        }
        Ok(self)
    }
}

// == Memo Input ==
/// Types that can be encoded into a [`MemoKey`].
///
/// Implementations must encode every value that affects the memoized
/// computation's output; leaving one out lets different calls share a key.
pub trait MemoInput {
    /// Encodes the value as a single key part.
    fn to_key_part(&self) -> Result<KeyPart>;

    /// Adds this value to a call's inputs.
    ///
    /// By default the value is one positional input. Tuples spread their
    /// elements as separate positional inputs; custom types may add named
    /// inputs through [`MemoArgs::named`].
    fn append_to(&self, args: &mut MemoArgs) -> Result<()> {
        args.arg(self)?;
        Ok(())
    }
}

impl<T: MemoInput + ?Sized> MemoInput for &T {
    fn to_key_part(&self) -> Result<KeyPart> {
        (**self).to_key_part()
    }

    fn append_to(&self, args: &mut MemoArgs) -> Result<()> {
        (**self).append_to(args)
    }
}

impl<T: MemoInput + ?Sized> MemoInput for Box<T> {
    fn to_key_part(&self) -> Result<KeyPart> {
        (**self).to_key_part()
    }

    fn append_to(&self, args: &mut MemoArgs) -> Result<()> {
        (**self).append_to(args)
    }
}

macro_rules! impl_int_input {
    ($($ty:ty),*) => {
        $(
            impl MemoInput for $ty {
                fn to_key_part(&self) -> Result<KeyPart> {
                    Ok(KeyPart::Int(i128::from(*self)))
                }
            }
        )*
    };
}

impl_int_input!(i8, i16, i32, i64, u8, u16, u32, u64);

impl MemoInput for i128 {
    fn to_key_part(&self) -> Result<KeyPart> {
        Ok(KeyPart::Int(*self))
    }
}

impl MemoInput for isize {
    fn to_key_part(&self) -> Result<KeyPart> {
        Ok(KeyPart::Int(*self as i128))
    }
}

impl MemoInput for usize {
    fn to_key_part(&self) -> Result<KeyPart> {
        Ok(KeyPart::Int(*self as i128))
    }
}

impl MemoInput for bool {
    fn to_key_part(&self) -> Result<KeyPart> {
        Ok(KeyPart::Bool(*self))
    }
}

impl MemoInput for char {
    fn to_key_part(&self) -> Result<KeyPart> {
        Ok(KeyPart::Char(*self))
    }
}

impl MemoInput for f64 {
    fn to_key_part(&self) -> Result<KeyPart> {
        KeyPart::float(*self)
    }
}

impl MemoInput for f32 {
    fn to_key_part(&self) -> Result<KeyPart> {
        KeyPart::float(f64::from(*self))
    }
}

impl MemoInput for str {
    fn to_key_part(&self) -> Result<KeyPart> {
        Ok(KeyPart::Str(self.to_string()))
    }
}

impl MemoInput for String {
    fn to_key_part(&self) -> Result<KeyPart> {
        Ok(KeyPart::Str(self.clone()))
    }
}

impl MemoInput for () {
    fn to_key_part(&self) -> Result<KeyPart> {
        Ok(KeyPart::Unit)
    }

    fn append_to(&self, _args: &mut MemoArgs) -> Result<()> {
        Ok(())
    }
}

impl<T: MemoInput> MemoInput for Option<T> {
    fn to_key_part(&self) -> Result<KeyPart> {
        match self {
            Some(value) => Ok(KeyPart::Opt(Some(Box::new(value.to_key_part()?)))),
            None => Ok(KeyPart::Opt(None)),
        }
    }
}

impl<T: MemoInput> MemoInput for [T] {
    fn to_key_part(&self) -> Result<KeyPart> {
        self.iter()
            .map(|item| item.to_key_part())
            .collect::<Result<Vec<_>>>()
            .map(KeyPart::Seq)
    }
}

impl<T: MemoInput> MemoInput for Vec<T> {
    fn to_key_part(&self) -> Result<KeyPart> {
        self.as_slice().to_key_part()
    }
}

macro_rules! impl_tuple_input {
    ($($name:ident),+) => {
        impl<$($name: MemoInput),+> MemoInput for ($($name,)+) {
            #[allow(non_snake_case)]
            fn to_key_part(&self) -> Result<KeyPart> {
                let ($($name,)+) = self;
                Ok(KeyPart::Seq(vec![$($name.to_key_part()?),+]))
            }

            #[allow(non_snake_case)]
            fn append_to(&self, args: &mut MemoArgs) -> Result<()> {
                let ($($name,)+) = self;
                $(args.arg($name)?;)+
                Ok(())
            }
        }
    };
}

impl_tuple_input!(A);
impl_tuple_input!(A, B);
impl_tuple_input!(A, B, C);
impl_tuple_input!(A, B, C, D);
impl_tuple_input!(A, B, C, D, E);
impl_tuple_input!(A, B, C, D, E, F);
