//! A dataset recording additions on top of a read-only one
//!
//! Definitions run against a [`Staged`] dataset first, so a definition
//! failing half way leaves the real dataset untouched.

use super::{Dataset, MemoryDataset, ValueKind, Values};
use crate::attribute::AttributeValue;
use crate::error::{self, Error};

pub(crate) struct Staged<'a> {
    base: &'a dyn Dataset,
    added: MemoryDataset,
    /// Attributes set on variables of `base` or on the file
    attributes: Vec<(Option<String>, String, AttributeValue)>,
}

impl<'a> Staged<'a> {
    pub(crate) fn new(base: &'a dyn Dataset) -> Self {
        Self {
            base,
            added: MemoryDataset::new(),
            attributes: Vec::new(),
        }
    }

    fn is_added(&self, variable: &str) -> bool {
        self.added.has_variable(variable)
    }
}

impl Dataset for Staged<'_> {
    fn add_dimension(&mut self, name: &str, len: usize) -> error::Result<()> {
        if self.base.dimension_len(name).is_some() {
            return Err(Error::AlreadyExists(format!("dimension {}", name)));
        }
        self.added.add_dimension(name, len)
    }

    fn dimension_len(&self, name: &str) -> Option<usize> {
        self.added
            .dimension_len(name)
            .or_else(|| self.base.dimension_len(name))
    }

    fn add_variable(
        &mut self,
        name: &str,
        kind: ValueKind,
        dimensions: &[&str],
    ) -> error::Result<()> {
        if self.base.has_variable(name) {
            return Err(Error::AlreadyExists(format!("variable {}", name)));
        }
        for dim in dimensions {
            if self.added.dimension_len(dim).is_none() {
                if let Some(len) = self.base.dimension_len(dim) {
                    self.added.add_dimension(dim, len)?;
                }
            }
        }
        self.added.add_variable(name, kind, dimensions)
    }

    fn variable_names(&self) -> Vec<String> {
        let mut names = self.base.variable_names();
        names.extend(self.added.variable_names());
        names
    }

    fn variable_kind(&self, name: &str) -> Option<ValueKind> {
        self.added
            .variable_kind(name)
            .or_else(|| self.base.variable_kind(name))
    }

    fn variable_dimensions(&self, name: &str) -> error::Result<Vec<(String, usize)>> {
        if self.is_added(name) {
            return self.added.variable_dimensions(name);
        }
        self.base.variable_dimensions(name)
    }

    fn put_values(&mut self, name: &str, values: Values) -> error::Result<()> {
        if self.is_added(name) {
            return self.added.put_values(name, values);
        }
        let current = self.base.get_values(name)?;
        if current.kind() != values.kind() {
            return Err(Error::TypeMismatch);
        }
        if current.len() != values.len() {
            return Err(Error::BufferLen {
                wanted: current.len(),
                actual: values.len(),
            });
        }
        Ok(())
    }

    fn get_values(&self, name: &str) -> error::Result<Values> {
        if self.is_added(name) {
            return self.added.get_values(name);
        }
        self.base.get_values(name)
    }

    fn add_attribute(
        &mut self,
        variable: Option<&str>,
        name: &str,
        value: AttributeValue,
    ) -> error::Result<()> {
        match variable {
            Some(v) if self.is_added(v) => self.added.add_attribute(variable, name, value),
            Some(v) if !self.base.has_variable(v) => {
                Err(Error::NotFound(format!("variable {}", v)))
            }
            _ => {
                let owner = variable.map(str::to_string);
                self.attributes
                    .retain(|(o, n, _)| !(o == &owner && n == name));
                self.attributes.push((owner, name.to_string(), value));
                Ok(())
            }
        }
    }

    fn attribute_value(&self, variable: Option<&str>, name: &str) -> Option<AttributeValue> {
        match variable {
            Some(v) if self.is_added(v) => self.added.attribute_value(variable, name),
            _ => self
                .attributes
                .iter()
                .find(|(o, n, _)| o.as_deref() == variable && n == name)
                .map(|(_, _, value)| value.clone())
                .or_else(|| self.base.attribute_value(variable, name)),
        }
    }

    fn attribute_names(&self, variable: Option<&str>) -> error::Result<Vec<String>> {
        if let Some(v) = variable {
            if self.is_added(v) {
                return self.added.attribute_names(variable);
            }
        }
        let mut names = self.base.attribute_names(variable)?;
        for (_, name, _) in self.attributes.iter().filter(|(o, _, _)| o.as_deref() == variable) {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> MemoryDataset {
        let mut ds = MemoryDataset::new();
        ds.add_dimension("nNodes", 3).unwrap();
        ds.add_variable("node_x", ValueKind::Double, &["nNodes"]).unwrap();
        ds
    }

    #[test]
    fn additions_stay_out_of_the_base() {
        let base = base();
        let mut staged = Staged::new(&base);
        staged.add_dimension("nEdges", 2).unwrap();
        staged
            .add_variable("edge_nodes", ValueKind::Int, &["nEdges", "nNodes"])
            .unwrap();
        staged.add_attribute(Some("edge_nodes"), "start_index", 0.into()).unwrap();
        staged.add_attribute(Some("node_x"), "units", "m".into()).unwrap();
        staged.add_attribute(None, "title", "staged".into()).unwrap();

        assert_eq!(
            staged.variable_dimensions("edge_nodes").unwrap(),
            vec![("nEdges".to_string(), 2), ("nNodes".to_string(), 3)]
        );
        assert_eq!(staged.variable_names(), vec!["node_x", "edge_nodes"]);
        assert_eq!(
            staged.attribute_value(Some("node_x"), "units"),
            Some("m".into())
        );
        assert_eq!(staged.attribute_names(None).unwrap(), vec!["title"]);

        assert!(base.dimension_len("nEdges").is_none());
        assert!(!base.has_variable("edge_nodes"));
        assert!(base.attribute_value(Some("node_x"), "units").is_none());
    }

    #[test]
    fn collisions_with_the_base_fail() {
        let base = base();
        let mut staged = Staged::new(&base);
        assert!(matches!(
            staged.add_dimension("nNodes", 3),
            Err(Error::AlreadyExists(_))
        ));
        assert!(matches!(
            staged.add_variable("node_x", ValueKind::Double, &["nNodes"]),
            Err(Error::AlreadyExists(_))
        ));
        assert!(matches!(
            staged.put_values("node_x", Values::Double(vec![0.0; 2])),
            Err(Error::BufferLen { wanted: 3, actual: 2 })
        ));
    }
}
