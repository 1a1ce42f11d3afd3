//! Helpers shared by the writers of the UGRID convention

use crate::attribute::AttributeValue;
use crate::dataset::{Dataset, ValueKind, Values};
use crate::error::{self, Error};
use crate::text;

/// Dimension of connectivity pairs
pub(crate) const TWO: &str = "Two";
/// Dimension of id fields
pub(crate) const STR_LENGTH_IDS: &str = "strLengthIds";
/// Dimension of long name fields
pub(crate) const STR_LENGTH_LONG_NAMES: &str = "strLengthLongNames";

pub(crate) const CF_ROLE: &str = "cf_role";
pub(crate) const MESH_TOPOLOGY: &str = "mesh_topology";
pub(crate) const MESH_TOPOLOGY_CONTACT: &str = "mesh_topology_contact";
pub(crate) const FILL_VALUE: &str = "_FillValue";
pub(crate) const START_INDEX: &str = "start_index";
pub(crate) const INT_FILL_VALUE: &str = "int_fill_value";
pub(crate) const DOUBLE_FILL_VALUE: &str = "double_fill_value";
pub(crate) const IS_SPHERICAL: &str = "is_spherical";

/// Attributes of a variable about to be declared
pub(crate) type Attributes = Vec<(&'static str, AttributeValue)>;

/// Record-wide settings of a mesh, kept on its topology variable so they
/// are found whichever optional arrays the mesh has
pub(crate) fn mesh_settings(
    start_index: i32,
    int_fill_value: i32,
    double_fill_value: f64,
    spherical: bool,
) -> Attributes {
    vec![
        (DOUBLE_FILL_VALUE, double_fill_value.into()),
        (INT_FILL_VALUE, int_fill_value.into()),
        (IS_SPHERICAL, i32::from(spherical).into()),
        (START_INDEX, start_index.into()),
    ]
}

/// Declares a dimension, or checks the length of an existing one.
/// Zero-length dimensions are never declared, a length of zero marks an
/// unlimited dimension in NetCDF.
pub(crate) fn ensure_dimension(ds: &mut dyn Dataset, name: &str, len: usize) -> error::Result<()> {
    match ds.dimension_len(name) {
        Some(existing) if existing == len => Ok(()),
        Some(existing) => Err(Error::Consistency(format!(
            "dimension {} has length {}, not {}",
            name, existing, len
        ))),
        None if len == 0 => Ok(()),
        None => ds.add_dimension(name, len),
    }
}

/// Declares a text width dimension unless the file already has one,
/// names are re-padded to whatever width the file uses
pub(crate) fn ensure_text_dimension(ds: &mut dyn Dataset, name: &str, len: usize) -> error::Result<()> {
    if ds.dimension_len(name).is_some() {
        return Ok(());
    }
    ds.add_dimension(name, len)
}

/// Length of a dimension, missing dimensions have length zero
pub(crate) fn dimension_or_zero(ds: &dyn Dataset, name: &str) -> usize {
    ds.dimension_len(name).unwrap_or(0)
}

pub(crate) fn define_variable(
    ds: &mut dyn Dataset,
    name: &str,
    kind: ValueKind,
    dimensions: &[&str],
    attributes: Attributes,
) -> error::Result<()> {
    ds.add_variable(name, kind, dimensions)?;
    for (attribute, value) in attributes {
        ds.add_attribute(Some(name), attribute, value)?;
    }
    Ok(())
}

/// Declares the fixed-width text variable `name` over `dimension`
pub(crate) fn define_names(
    ds: &mut dyn Dataset,
    name: &str,
    dimension: &str,
    width_dimension: &str,
    long_name: &str,
) -> error::Result<()> {
    define_variable(
        ds,
        name,
        ValueKind::Char,
        &[dimension, width_dimension],
        vec![("long_name", long_name.into())],
    )
}

/// Standard name and units of horizontal coordinates
pub(crate) fn coordinate_attributes(
    axis: char,
    is_spherical: bool,
    long_name: &str,
) -> Attributes {
    let (standard_name, units) = match (axis, is_spherical) {
        ('x', false) => ("projection_x_coordinate", "m"),
        ('y', false) => ("projection_y_coordinate", "m"),
        ('x', true) => ("longitude", "degrees_east"),
        _ => ("latitude", "degrees_north"),
    };
    vec![
        ("standard_name", standard_name.into()),
        ("long_name", long_name.into()),
        ("units", units.into()),
    ]
}

/// Whether the coordinates in `variable` are longitudes or latitudes
pub(crate) fn is_spherical(ds: &dyn Dataset, variable: &str) -> bool {
    matches!(
        str_attribute(ds, Some(variable), "standard_name").as_deref(),
        Some("longitude") | Some("latitude")
    )
}

pub(crate) fn str_attribute(ds: &dyn Dataset, variable: Option<&str>, name: &str) -> Option<String> {
    match ds.attribute_value(variable, name)? {
        AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

pub(crate) fn int_attribute(ds: &dyn Dataset, variable: Option<&str>, name: &str) -> Option<i32> {
    ds.attribute_value(variable, name)
        .and_then(|v| i32::try_from(v).ok())
}

pub(crate) fn double_attribute(
    ds: &dyn Dataset,
    variable: Option<&str>,
    name: &str,
) -> Option<f64> {
    ds.attribute_value(variable, name)
        .and_then(|v| f64::try_from(v).ok())
}

/// First integer attribute `name` found on any of `variables`
pub(crate) fn first_int_attribute(ds: &dyn Dataset, variables: &[String], name: &str) -> Option<i32> {
    variables
        .iter()
        .filter(|v| ds.has_variable(v))
        .find_map(|v| int_attribute(ds, Some(v.as_str()), name))
}

pub(crate) fn first_double_attribute(
    ds: &dyn Dataset,
    variables: &[String],
    name: &str,
) -> Option<f64> {
    variables
        .iter()
        .filter(|v| ds.has_variable(v))
        .find_map(|v| double_attribute(ds, Some(v.as_str()), name))
}

pub(crate) fn put_ints(ds: &mut dyn Dataset, name: &str, values: &[i32]) -> error::Result<()> {
    if values.is_empty() {
        return Ok(());
    }
    ds.put_values(name, Values::Int(values.to_vec()))
}

pub(crate) fn put_doubles(ds: &mut dyn Dataset, name: &str, values: &[f64]) -> error::Result<()> {
    if values.is_empty() {
        return Ok(());
    }
    ds.put_values(name, Values::Double(values.to_vec()))
}

/// Writes `count` names of `buffer` into a text variable, re-padding them
/// to the width the variable was declared with
pub(crate) fn put_names(
    ds: &mut dyn Dataset,
    name: &str,
    buffer: &[u8],
    count: usize,
) -> error::Result<()> {
    if count == 0 {
        return Ok(());
    }
    let stored = text_width(ds, name)?;
    let names = text::decode(buffer, count, buffer.len() / count)?;
    ds.put_values(name, Values::Char(text::encode(&names, stored)))
}

fn text_width(ds: &dyn Dataset, name: &str) -> error::Result<usize> {
    ds.variable_dimensions(name)?
        .last()
        .map(|(_, len)| *len)
        .ok_or_else(|| Error::Consistency(format!("{} is not a text variable", name)))
}

pub(crate) fn get_ints(ds: &dyn Dataset, name: &str) -> error::Result<Vec<i32>> {
    match ds.get_values(name)? {
        Values::Int(x) => Ok(x),
        _ => Err(Error::TypeMismatch),
    }
}

/// Reads a numeric variable as doubles, integers are widened
pub(crate) fn get_doubles(ds: &dyn Dataset, name: &str) -> error::Result<Vec<f64>> {
    match ds.get_values(name)? {
        Values::Double(x) => Ok(x),
        Values::Int(x) => Ok(x.into_iter().map(f64::from).collect()),
        Values::Char(_) => Err(Error::TypeMismatch),
    }
}

/// Reads a text variable and re-pads every name to `width`
pub(crate) fn get_names(ds: &dyn Dataset, name: &str, count: usize, width: usize) -> error::Result<Vec<u8>> {
    let stored = text_width(ds, name)?;
    let buffer = match ds.get_values(name)? {
        Values::Char(x) => x,
        _ => return Err(Error::TypeMismatch),
    };
    let names = text::decode(&buffer, count, stored)?;
    Ok(text::encode(&names, width))
}

/// Copies `source` into a caller buffer of exactly the same length
pub(crate) fn copy_into<T: Copy>(what: &str, target: &mut [T], source: &[T]) -> error::Result<()> {
    if target.len() != source.len() {
        return Err(Error::Consistency(format!(
            "{} holds {} values, the buffer has room for {}",
            what,
            source.len(),
            target.len()
        )));
    }
    target.copy_from_slice(source);
    Ok(())
}

/// Fills a required integer buffer, a missing variable is only accepted
/// for an empty buffer
pub(crate) fn fill_ints(ds: &dyn Dataset, name: &str, target: &mut [i32]) -> error::Result<()> {
    if !ds.has_variable(name) {
        return copy_into(name, target, &[]);
    }
    copy_into(name, target, &get_ints(ds, name)?)
}

pub(crate) fn fill_doubles(ds: &dyn Dataset, name: &str, target: &mut [f64]) -> error::Result<()> {
    if !ds.has_variable(name) {
        return copy_into(name, target, &[]);
    }
    copy_into(name, target, &get_doubles(ds, name)?)
}

/// Fills an optional buffer, clearing it when the file does not hold
/// the variable. A buffer the caller left out stays out.
pub(crate) fn fill_optional_ints(
    ds: &dyn Dataset,
    name: &str,
    target: &mut Option<Vec<i32>>,
) -> error::Result<()> {
    match target {
        Some(buffer) if ds.has_variable(name) => copy_into(name, buffer, &get_ints(ds, name)?),
        Some(_) => {
            *target = None;
            Ok(())
        }
        None => Ok(()),
    }
}

pub(crate) fn fill_optional_doubles(
    ds: &dyn Dataset,
    name: &str,
    target: &mut Option<Vec<f64>>,
) -> error::Result<()> {
    match target {
        Some(buffer) if ds.has_variable(name) => copy_into(name, buffer, &get_doubles(ds, name)?),
        Some(_) => {
            *target = None;
            Ok(())
        }
        None => Ok(()),
    }
}

pub(crate) fn fill_names(
    ds: &dyn Dataset,
    name: &str,
    target: &mut Option<Vec<u8>>,
    count: usize,
) -> error::Result<()> {
    match target {
        Some(buffer) if ds.has_variable(name) && count > 0 => {
            let width = buffer.len() / count;
            copy_into(name, buffer, &get_names(ds, name, count, width)?)
        }
        Some(_) if !ds.has_variable(name) => {
            *target = None;
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Writes an optional array that must have been declared by define
pub(crate) fn put_optional_ints(
    ds: &mut dyn Dataset,
    name: &str,
    values: Option<&Vec<i32>>,
) -> error::Result<()> {
    match values {
        Some(values) if !values.is_empty() => {
            if !ds.has_variable(name) {
                return Err(Error::Consistency(format!("{} was not defined", name)));
            }
            put_ints(ds, name, values)
        }
        _ => Ok(()),
    }
}

pub(crate) fn put_optional_doubles(
    ds: &mut dyn Dataset,
    name: &str,
    values: Option<&Vec<f64>>,
) -> error::Result<()> {
    match values {
        Some(values) if !values.is_empty() => {
            if !ds.has_variable(name) {
                return Err(Error::Consistency(format!("{} was not defined", name)));
            }
            put_doubles(ds, name, values)
        }
        _ => Ok(()),
    }
}

pub(crate) fn put_optional_names(
    ds: &mut dyn Dataset,
    name: &str,
    values: Option<&Vec<u8>>,
    count: usize,
) -> error::Result<()> {
    match values {
        Some(values) if count > 0 => {
            if !ds.has_variable(name) {
                return Err(Error::Consistency(format!("{} was not defined", name)));
            }
            put_names(ds, name, values, count)
        }
        _ => Ok(()),
    }
}

/// Decodes a name field of a record, its width is the buffer length
pub(crate) fn record_name(buffer: &[u8]) -> error::Result<String> {
    text::decode_one(buffer, buffer.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::MemoryDataset;

    #[test]
    fn zero_length_dimensions_are_skipped() {
        let mut ds = MemoryDataset::new();
        ensure_dimension(&mut ds, "mesh2d_nFaces", 0).unwrap();
        assert_eq!(ds.dimension_len("mesh2d_nFaces"), None);
        assert_eq!(dimension_or_zero(&ds, "mesh2d_nFaces"), 0);

        ensure_dimension(&mut ds, TWO, 2).unwrap();
        ensure_dimension(&mut ds, TWO, 2).unwrap();
        assert!(ensure_dimension(&mut ds, TWO, 3).is_err());
    }

    #[test]
    fn names_are_repadded() {
        let mut ds = MemoryDataset::new();
        ensure_dimension(&mut ds, "n", 2).unwrap();
        ensure_dimension(&mut ds, STR_LENGTH_IDS, 6).unwrap();
        define_names(&mut ds, "ids", "n", STR_LENGTH_IDS, "ids").unwrap();

        put_names(&mut ds, "ids", &text::encode(&["a", "bc"], 3), 2).unwrap();
        assert_eq!(
            ds.get_values("ids").unwrap(),
            Values::Char(b"a     bc    ".to_vec())
        );
        assert_eq!(get_names(&ds, "ids", 2, 4).unwrap(), b"a   bc  ".to_vec());
    }

    #[test]
    fn optional_fill_clears_missing() {
        let ds = MemoryDataset::new();
        let mut target = Some(vec![0.0; 3]);
        fill_optional_doubles(&ds, "mesh2d_face_x", &mut target).unwrap();
        assert!(target.is_none());

        let mut names = Some(text::blank(2, 4));
        fill_names(&ds, "mesh2d_node_id", &mut names, 2).unwrap();
        assert!(names.is_none());

        assert!(fill_doubles(&ds, "missing", &mut []).is_ok());
        assert!(fill_doubles(&ds, "missing", &mut [0.0]).is_err());
    }
}
