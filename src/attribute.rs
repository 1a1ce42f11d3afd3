//! Values of variable and global attributes

use std::fmt;

use super::error;

/// Holds the contents of an attribute
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Int(i32),
    Ints(Vec<i32>),
    Double(f64),
    Doubles(Vec<f64>),
    Str(String),
}

impl AttributeValue {
    /// Number of values, a string counts as one
    pub fn len(&self) -> usize {
        match self {
            Self::Int(_) | Self::Double(_) | Self::Str(_) => 1,
            Self::Ints(x) => x.len(),
            Self::Doubles(x) => x.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Integer contents, a scalar becomes a vector of length one
    pub fn as_ints(&self) -> Option<Vec<i32>> {
        match self {
            Self::Int(x) => Some(vec![*x]),
            Self::Ints(x) => Some(x.clone()),
            _ => None,
        }
    }

    pub fn as_doubles(&self) -> Option<Vec<f64>> {
        match self {
            Self::Double(x) => Some(vec![*x]),
            Self::Doubles(x) => Some(x.clone()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, values: &[T]) -> fmt::Result {
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", v)?;
    }
    Ok(())
}

/// The textual form reported by the attribute value getters,
/// numbers are separated by single spaces
impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(x) => write!(f, "{}", x),
            Self::Ints(x) => join(f, x),
            Self::Double(x) => write!(f, "{}", x),
            Self::Doubles(x) => join(f, x),
            Self::Str(x) => write!(f, "{}", x),
        }
    }
}

// Boring implementations
impl From<i32> for AttributeValue {
    fn from(x: i32) -> Self {
        Self::Int(x)
    }
}
impl From<Vec<i32>> for AttributeValue {
    fn from(x: Vec<i32>) -> Self {
        Self::Ints(x)
    }
}
impl From<&[i32]> for AttributeValue {
    fn from(x: &[i32]) -> Self {
        Self::Ints(x.to_vec())
    }
}
impl From<f64> for AttributeValue {
    fn from(x: f64) -> Self {
        Self::Double(x)
    }
}
impl From<Vec<f64>> for AttributeValue {
    fn from(x: Vec<f64>) -> Self {
        Self::Doubles(x)
    }
}
impl From<&[f64]> for AttributeValue {
    fn from(x: &[f64]) -> Self {
        Self::Doubles(x.to_vec())
    }
}
impl From<&str> for AttributeValue {
    fn from(x: &str) -> Self {
        Self::Str(x.to_string())
    }
}
impl From<String> for AttributeValue {
    fn from(x: String) -> Self {
        Self::Str(x)
    }
}

impl TryFrom<AttributeValue> for i32 {
    type Error = error::Error;
    fn try_from(attr: AttributeValue) -> Result<Self, Self::Error> {
        match attr {
            AttributeValue::Int(x) => Ok(x),
            AttributeValue::Ints(x) if x.len() == 1 => Ok(x[0]),
            _ => Err("Conversion not supported".into()),
        }
    }
}

impl TryFrom<AttributeValue> for f64 {
    type Error = error::Error;
    fn try_from(attr: AttributeValue) -> Result<Self, Self::Error> {
        match attr {
            AttributeValue::Double(x) => Ok(x),
            AttributeValue::Doubles(x) if x.len() == 1 => Ok(x[0]),
            AttributeValue::Int(x) => Ok(x.into()),
            _ => Err("Conversion not supported".into()),
        }
    }
}

impl TryFrom<AttributeValue> for String {
    type Error = error::Error;
    fn try_from(attr: AttributeValue) -> Result<Self, Self::Error> {
        match attr {
            AttributeValue::Str(s) => Ok(s),
            _ => Err("Conversion not supported".into()),
        }
    }
}

#[test]
fn conversion() {
    let attr: AttributeValue = 3.into();
    assert_eq!(i32::try_from(attr.clone()).unwrap(), 3);
    assert_eq!(f64::try_from(attr).unwrap(), 3.0);

    let attr: AttributeValue = "EPSG:0".into();
    assert_eq!(String::try_from(attr.clone()).unwrap(), "EPSG:0");
    assert!(i32::try_from(attr).is_err());

    let attr: AttributeValue = vec![1, 2].into();
    assert!(i32::try_from(attr).is_err());
}

#[test]
fn stringified() {
    assert_eq!(AttributeValue::Ints(vec![1, 2, 3]).to_string(), "1 2 3");
    assert_eq!(AttributeValue::Doubles(vec![6378137.0]).to_string(), "6378137");
    assert_eq!(AttributeValue::Double(0.5).to_string(), "0.5");
    assert_eq!(AttributeValue::Str("mesh_topology".into()).to_string(), "mesh_topology");
}
