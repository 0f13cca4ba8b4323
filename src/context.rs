use serde_json::Value;
use std::fmt;

use crate::errors::{BemError, Result};

/// A modifier value: `true` for a bare flag, or a scalar rendered after `modValue`.
#[derive(Debug, Clone, PartialEq)]
pub enum ModValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Null,
}

impl ModValue {
    /// `false`, zero, NaN, the empty string and null are skipped when rendering.
    pub fn is_truthy(&self) -> bool {
        match self {
            ModValue::Bool(b) => *b,
            ModValue::Int(i) => *i != 0,
            ModValue::Float(f) => *f != 0.0 && !f.is_nan(),
            ModValue::Str(s) => !s.is_empty(),
            ModValue::Null => false,
        }
    }
}

impl fmt::Display for ModValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModValue::Bool(b) => write!(f, "{b}"),
            ModValue::Int(i) => write!(f, "{i}"),
            ModValue::Float(x) if x.is_infinite() => {
                f.write_str(if *x > 0.0 { "Infinity" } else { "-Infinity" })
            }
            ModValue::Float(x) if x.is_nan() => f.write_str("NaN"),
            ModValue::Float(x) if *x != 0.0 && (x.abs() >= 1e21 || x.abs() < 1e-6) => {
                // Exponent layout of JS numbers: `1e+21`, `1.5e-7`.
                let sci = format!("{x:e}");
                match sci.split_once('e') {
                    Some((mantissa, exp)) if !exp.starts_with('-') => {
                        write!(f, "{mantissa}e+{exp}")
                    }
                    _ => f.write_str(&sci),
                }
            }
            ModValue::Float(x) => write!(f, "{x}"),
            ModValue::Str(s) => f.write_str(s),
            ModValue::Null => f.write_str("null"),
        }
    }
}

impl From<bool> for ModValue {
    fn from(b: bool) -> Self {
        ModValue::Bool(b)
    }
}

impl From<&str> for ModValue {
    fn from(s: &str) -> Self {
        ModValue::Str(s.to_string())
    }
}

impl From<String> for ModValue {
    fn from(s: String) -> Self {
        ModValue::Str(s)
    }
}

impl From<&String> for ModValue {
    fn from(s: &String) -> Self {
        ModValue::Str(s.clone())
    }
}

impl From<f32> for ModValue {
    fn from(x: f32) -> Self {
        // Widening would expose binary noise (`0.1f32` → `0.10000000149011612`).
        ModValue::Float(x.to_string().parse().unwrap_or(x as f64))
    }
}

impl From<f64> for ModValue {
    fn from(x: f64) -> Self {
        ModValue::Float(x)
    }
}

macro_rules! int_mod_value {
    ($($t:ty),*) => {
        $(impl From<$t> for ModValue {
            fn from(i: $t) -> Self {
                ModValue::Int(i as i64)
            }
        })*
    };
}

int_mod_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for ModValue {
    fn from(i: u64) -> Self {
        i64::try_from(i).map_or(ModValue::Float(i as f64), ModValue::Int)
    }
}

impl From<usize> for ModValue {
    fn from(i: usize) -> Self {
        ModValue::from(i as u64)
    }
}

impl<T: Into<ModValue>> From<Option<T>> for ModValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(ModValue::Null, Into::into)
    }
}

impl TryFrom<Value> for ModValue {
    type Error = BemError;

    fn try_from(v: Value) -> Result<Self> {
        match v {
            Value::Null => Ok(ModValue::Null),
            Value::Bool(b) => Ok(ModValue::Bool(b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(ModValue::Int(i)),
                None => Ok(ModValue::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            Value::String(s) => Ok(ModValue::Str(s)),
            other => Err(BemError::InvalidModifier(format!(
                "expected a scalar value, got {other}"
            ))),
        }
    }
}

/// One modifier spec: an ordered `key → value` map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mods {
    entries: Vec<(String, ModValue)>,
}

impl Mods {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Mods::insert`].
    pub fn set(mut self, key: impl Into<String>, value: impl Into<ModValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Overwrites an existing key in place, otherwise appends.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ModValue>) {
        upsert(&mut self.entries, key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ModValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a JSON object such as `{"theme": "dark", "active": true}`.
    ///
    /// Keys keep document order; integer-like keys are not moved to the front.
    pub fn from_json(json: &str) -> Result<Self> {
        Mods::try_from(serde_json::from_str::<Value>(json)?)
    }
}

impl<K: Into<String>, V: Into<ModValue>> FromIterator<(K, V)> for Mods {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mods = Mods::new();
        for (k, v) in iter {
            mods.insert(k, v);
        }
        mods
    }
}

impl<K: Into<String>, V: Into<ModValue>, const N: usize> From<[(K, V); N]> for Mods {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl TryFrom<Value> for Mods {
    type Error = BemError;

    fn try_from(v: Value) -> Result<Self> {
        match v {
            Value::Object(map) => {
                let mut mods = Mods::new();
                for (k, v) in map {
                    mods.insert(k, ModValue::try_from(v)?);
                }
                Ok(mods)
            }
            other => Err(BemError::InvalidModifier(format!(
                "expected an object, got {other}"
            ))),
        }
    }
}

/// State flags in first-insertion order; later writes overwrite the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct States {
    entries: Vec<(String, bool)>,
}

impl States {
    pub fn insert(&mut self, key: impl Into<String>, on: bool) {
        upsert(&mut self.entries, key.into(), on);
    }

    pub fn get(&self, key: &str) -> Option<bool> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, on)| *on)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(k, on)| (k.as_str(), *on))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn upsert<V>(entries: &mut Vec<(String, V)>, key: String, value: V) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = value,
        None => entries.push((key, value)),
    }
}

/// Everything a block has accumulated so far. Never mutated once wrapped in a `Block`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    pub(crate) name: String,
    pub(crate) mods: Vec<Mods>,
    pub(crate) mixes: Vec<String>,
    pub(crate) states: States,
}

impl Context {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Block name plus every appended element, without the namespace.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mods(&self) -> &[Mods] {
        &self.mods
    }

    pub fn mixes(&self) -> &[String] {
        &self.mixes
    }

    pub fn states(&self) -> &States {
        &self.states
    }
}
