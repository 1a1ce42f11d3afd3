//! Auxiliary variables and attributes
//!
//! Anything in a file besides topologies: data variables attached to a
//! mesh location, coordinate reference systems and global metadata.

use super::convention::{get_doubles, get_ints, str_attribute};
use crate::attribute::AttributeValue;
use crate::dataset::{Dataset, ValueKind};
use crate::error::{self, expect_len, Error};
use crate::types::Location;

/// Variables holding values at `location` of `topology`
pub(super) fn data_variables(ds: &dyn Dataset, topology: &str, location: Location) -> Vec<String> {
    ds.variable_names()
        .into_iter()
        .filter(|v| {
            str_attribute(ds, Some(v.as_str()), "mesh").as_deref() == Some(topology)
                && str_attribute(ds, Some(v.as_str()), "location").as_deref()
                    == Some(location.name())
        })
        .collect()
}

fn require(ds: &dyn Dataset, variable: &str) -> error::Result<()> {
    if ds.has_variable(variable) {
        Ok(())
    } else {
        Err(Error::NotFound(format!("variable {}", variable)))
    }
}

/// Attribute names and stringified values of a variable, sorted by name
pub(super) fn attributes(ds: &dyn Dataset, variable: &str) -> error::Result<Vec<(String, String)>> {
    require(ds, variable)?;
    let mut names = ds.attribute_names(Some(variable))?;
    names.sort();
    Ok(names
        .into_iter()
        .map(|name| {
            let value = ds
                .attribute_value(Some(variable), &name)
                .map(|v| v.to_string())
                .unwrap_or_default();
            (name, value)
        })
        .collect())
}

/// Lengths of the dimensions of a variable, outermost first
pub(super) fn dimensions(ds: &dyn Dataset, variable: &str) -> error::Result<Vec<usize>> {
    Ok(ds
        .variable_dimensions(variable)?
        .into_iter()
        .map(|(_, len)| len)
        .collect())
}

/// Number of values of a variable, a scalar holds one
fn data_len(ds: &dyn Dataset, variable: &str) -> error::Result<usize> {
    Ok(dimensions(ds, variable)?.iter().product())
}

/// Values of a numeric variable as doubles, integers are widened
pub(super) fn data_double(ds: &dyn Dataset, variable: &str) -> error::Result<Vec<f64>> {
    require(ds, variable)?;
    let values = get_doubles(ds, variable)?;
    expect_len(variable, values.len(), data_len(ds, variable)?)?;
    Ok(values)
}

/// Values of an integer variable, doubles are never narrowed
pub(super) fn data_int(ds: &dyn Dataset, variable: &str) -> error::Result<Vec<i32>> {
    require(ds, variable)?;
    let values = get_ints(ds, variable)?;
    expect_len(variable, values.len(), data_len(ds, variable)?)?;
    Ok(values)
}

pub(super) fn define_int(ds: &mut dyn Dataset, variable: &str) -> error::Result<()> {
    ds.add_variable(variable, ValueKind::Int, &[])
}

pub(super) fn define_attribute(
    ds: &mut dyn Dataset,
    variable: &str,
    attribute: &str,
    value: AttributeValue,
) -> error::Result<()> {
    require(ds, variable)?;
    ds.add_attribute(Some(variable), attribute, value)
}

pub(super) fn define_global_attribute(
    ds: &mut dyn Dataset,
    attribute: &str,
    value: &str,
) -> error::Result<()> {
    ds.add_attribute(None, attribute, value.into())
}
