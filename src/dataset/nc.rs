//! NetCDF-4 files through the `netcdf` crate

use std::path::Path;

use netcdf::types::NcVariableType;

use super::{Backend, Dataset, ValueKind, Values};
use crate::attribute::AttributeValue;
use crate::error;
use crate::types::Mode;

#[derive(Debug)]
enum Handle {
    Read(netcdf::File),
    Write(netcdf::FileMut),
}

/// An open NetCDF file
#[derive(Debug)]
pub struct NetcdfDataset {
    handle: Handle,
}

fn kind_of(vartype: &NcVariableType) -> ValueKind {
    match vartype {
        NcVariableType::Char => ValueKind::Char,
        NcVariableType::Float(_) => ValueKind::Double,
        _ => ValueKind::Int,
    }
}

fn from_nc(value: netcdf::AttributeValue) -> Option<AttributeValue> {
    use netcdf::AttributeValue as Nc;
    match value {
        Nc::Schar(x) => Some(AttributeValue::Int(x.into())),
        Nc::Uchar(x) => Some(AttributeValue::Int(x.into())),
        Nc::Short(x) => Some(AttributeValue::Int(x.into())),
        Nc::Ushort(x) => Some(AttributeValue::Int(x.into())),
        Nc::Int(x) => Some(AttributeValue::Int(x)),
        Nc::Ints(x) => Some(AttributeValue::Ints(x)),
        Nc::Float(x) => Some(AttributeValue::Double(x.into())),
        Nc::Floats(x) => Some(AttributeValue::Doubles(
            x.into_iter().map(f64::from).collect(),
        )),
        Nc::Double(x) => Some(AttributeValue::Double(x)),
        Nc::Doubles(x) => Some(AttributeValue::Doubles(x)),
        Nc::Str(x) => Some(AttributeValue::Str(x)),
        Nc::Strs(x) => Some(AttributeValue::Str(x.join(" "))),
        _ => None,
    }
}

fn to_nc(value: AttributeValue) -> netcdf::AttributeValue {
    use netcdf::AttributeValue as Nc;
    match value {
        AttributeValue::Int(x) => Nc::Int(x),
        AttributeValue::Ints(x) => Nc::Ints(x),
        AttributeValue::Double(x) => Nc::Double(x),
        AttributeValue::Doubles(x) => Nc::Doubles(x),
        AttributeValue::Str(x) => Nc::Str(x),
    }
}

fn missing(name: &str) -> error::Error {
    error::Error::NotFound(format!("variable {}", name))
}

impl NetcdfDataset {
    fn file(&self) -> &netcdf::File {
        match &self.handle {
            Handle::Read(file) => file,
            Handle::Write(file) => file,
        }
    }

    fn file_mut(&mut self) -> error::Result<&mut netcdf::FileMut> {
        match &mut self.handle {
            Handle::Write(file) => Ok(file),
            Handle::Read(_) => Err("file is opened read-only".into()),
        }
    }
}

impl Dataset for NetcdfDataset {
    fn add_dimension(&mut self, name: &str, len: usize) -> error::Result<()> {
        self.file_mut()?.add_dimension(name, len)?;
        Ok(())
    }

    fn dimension_len(&self, name: &str) -> Option<usize> {
        self.file().dimension_len(name)
    }

    fn add_variable(
        &mut self,
        name: &str,
        kind: ValueKind,
        dimensions: &[&str],
    ) -> error::Result<()> {
        let file = self.file_mut()?;
        match kind {
            ValueKind::Int => {
                file.add_variable::<i32>(name, dimensions)?;
            }
            ValueKind::Double => {
                file.add_variable::<f64>(name, dimensions)?;
            }
            ValueKind::Char => {
                file.add_variable_with_type(name, dimensions, &NcVariableType::Char)?;
            }
        }
        Ok(())
    }

    fn variable_names(&self) -> Vec<String> {
        self.file().variables().map(|v| v.name()).collect()
    }

    fn variable_kind(&self, name: &str) -> Option<ValueKind> {
        self.file().variable(name).map(|v| kind_of(&v.vartype()))
    }

    fn variable_dimensions(&self, name: &str) -> error::Result<Vec<(String, usize)>> {
        let var = self.file().variable(name).ok_or_else(|| missing(name))?;
        Ok(var
            .dimensions()
            .iter()
            .map(|d| (d.name(), d.len()))
            .collect())
    }

    fn put_values(&mut self, name: &str, values: Values) -> error::Result<()> {
        let mut var = self
            .file_mut()?
            .variable_mut(name)
            .ok_or_else(|| missing(name))?;
        match values {
            Values::Int(x) => var.put_values(&x, ..)?,
            Values::Double(x) => var.put_values(&x, ..)?,
            #[allow(unused_unsafe)]
            Values::Char(x) => unsafe {
                var.put_raw_values(&x, ..)?;
            },
        }
        Ok(())
    }

    fn get_values(&self, name: &str) -> error::Result<Values> {
        let var = self.file().variable(name).ok_or_else(|| missing(name))?;
        Ok(match kind_of(&var.vartype()) {
            ValueKind::Int => Values::Int(var.get_values::<i32, _>(..)?),
            ValueKind::Double => Values::Double(var.get_values::<f64, _>(..)?),
            ValueKind::Char => Values::Char(var.get_raw_values(..)?),
        })
    }

    fn add_attribute(
        &mut self,
        variable: Option<&str>,
        name: &str,
        value: AttributeValue,
    ) -> error::Result<()> {
        let file = self.file_mut()?;
        match variable {
            Some(variable) => {
                let mut var = file.variable_mut(variable).ok_or_else(|| missing(variable))?;
                var.add_attribute(name, to_nc(value))?;
            }
            None => {
                file.add_attribute(name, to_nc(value))?;
            }
        }
        Ok(())
    }

    fn attribute_value(&self, variable: Option<&str>, name: &str) -> Option<AttributeValue> {
        let value = match variable {
            Some(variable) => self.file().variable(variable)?.attribute(name)?.value(),
            None => self.file().attribute(name)?.value(),
        };
        value.ok().and_then(from_nc)
    }

    fn attribute_names(&self, variable: Option<&str>) -> error::Result<Vec<String>> {
        Ok(match variable {
            Some(variable) => self
                .file()
                .variable(variable)
                .ok_or_else(|| missing(variable))?
                .attributes()
                .map(|a| a.name().to_string())
                .collect(),
            None => self
                .file()
                .attributes()
                .map(|a| a.name().to_string())
                .collect(),
        })
    }
}

/// Files on disk in the NetCDF-4 format
#[derive(Debug, Default, Clone, Copy)]
pub struct NetcdfBackend;

impl Backend for NetcdfBackend {
    type Dataset = NetcdfDataset;

    fn name(&self) -> String {
        "netcdf".to_string()
    }

    fn open(&self, path: &Path, mode: Mode) -> error::Result<NetcdfDataset> {
        let handle = match mode {
            Mode::Read => Handle::Read(netcdf::open(path)?),
            Mode::Write => Handle::Write(netcdf::create_with(
                path,
                netcdf::Options::NETCDF4 | netcdf::Options::NOCLOBBER,
            )?),
            Mode::Replace => Handle::Write(netcdf::create(path)?),
        };
        Ok(NetcdfDataset { handle })
    }

    fn close(&self, _path: &Path, dataset: NetcdfDataset, _mode: Mode) -> error::Result<()> {
        match dataset.handle {
            Handle::Read(file) => file.close()?,
            Handle::Write(file) => file.close()?,
        }
        Ok(())
    }
}
