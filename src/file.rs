//! Sessions on open files of a store

use std::path::{Path, PathBuf};

use super::attribute::AttributeValue;
use super::error::{self, checked, Error};
use super::store::{native_library_name, FileId, Status, Store};
use super::text::{self, BoundedName, NameWidths};
use super::topology::{Encoding, Topology};
use super::types::{Location, Mode, StoreEnums, TopologyKind};

/// Element types the values of a variable can be read as
pub trait Numeric: Copy + Default {
    #[doc(hidden)]
    fn get_data<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        variable: &[u8],
        data: &mut [Self],
    ) -> Status;
}

impl Numeric for f64 {
    fn get_data<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        variable: &[u8],
        data: &mut [Self],
    ) -> Status {
        store.variable_get_data_double(file, variable, data)
    }
}

impl Numeric for i32 {
    fn get_data<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        variable: &[u8],
        data: &mut [Self],
    ) -> Status {
        store.variable_get_data_int(file, variable, data)
    }
}

/// An open file
///
/// Name widths and the integer values of the store's enumerations are
/// fetched once when the file is opened and used for every record of the
/// session. Dropping the session closes the file, use [`UGridFile::close`]
/// to see whether closing succeeded.
pub struct UGridFile<'s, S: Store + ?Sized> {
    store: &'s S,
    id: FileId,
    path: PathBuf,
    mode: Mode,
    encoding: Encoding,
    closed: bool,
}

impl<'s, S: Store + ?Sized> UGridFile<'s, S> {
    /// Opens `path` in `mode`
    pub fn open_with<P: AsRef<Path>>(store: &'s S, path: P, mode: Mode) -> error::Result<Self> {
        let path = path.as_ref();
        if store.is_native() {
            let library = native_library_name()?;
            log::debug!("store runs {}", library);
        }
        let encoding = Encoding {
            widths: widths(store)?,
            enums: enums(store)?,
        };
        let mut mode_value = 0;
        checked(store, store.file_mode(mode, &mut mode_value))?;
        let mut id = 0;
        checked(store, store.open(path, mode_value, &mut id))?;
        log::debug!("opened {} ({:?}) as file {}", path.display(), mode, id);
        Ok(Self {
            store,
            id,
            path: path.to_path_buf(),
            mode,
            encoding,
            closed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Handle of the file inside the store
    pub fn id(&self) -> FileId {
        self.id
    }

    /// Widths names are padded to in this session
    pub fn widths(&self) -> NameWidths {
        self.encoding.widths
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Value the store uses for `location`
    pub fn location_value(&self, location: Location) -> i32 {
        self.encoding.enums.location(location)
    }

    /// Implementation version of the store, not of this crate
    pub fn store_version(&self) -> error::Result<String> {
        let mut version = String::new();
        checked(self.store, self.store.version(&mut version))?;
        Ok(version)
    }

    fn topology_value(&self, kind: TopologyKind) -> i32 {
        self.encoding.enums.topology(kind)
    }

    /// Pads a variable or attribute name to the long width
    fn field(&self, name: &str) -> Vec<u8> {
        let bounded = BoundedName::new(name, self.encoding.widths.long_name);
        if bounded.is_truncated() {
            log::warn!("{:?} is truncated to {:?}", name, bounded.value());
        }
        bounded.to_bytes()
    }

    /// Number of topologies of `kind` in the file
    pub fn count_of(&self, kind: TopologyKind) -> error::Result<usize> {
        let mut count = 0;
        checked(
            self.store,
            self.store
                .topology_count(self.id, self.topology_value(kind), &mut count),
        )?;
        Ok(count)
    }

    /// Number of topologies of type `T` in the file
    pub fn count<T: Topology>(&self) -> error::Result<usize> {
        self.count_of(T::KIND)
    }

    /// Names of the topologies of `kind`, in index order
    pub fn topology_names(&self, kind: TopologyKind) -> error::Result<Vec<String>> {
        let width = self.encoding.widths.name;
        (0..self.count_of(kind)?)
            .map(|index| {
                let mut name = text::blank(1, width);
                checked(
                    self.store,
                    self.store
                        .topology_name(self.id, self.topology_value(kind), index, &mut name),
                )?;
                text::decode_one(&name, width)
            })
            .collect()
    }

    /// Dimensions of topology `index` of type `T`
    pub fn inquire<T: Topology>(&self, index: usize) -> error::Result<T::Dimensions> {
        let count = self.count::<T>()?;
        if index >= count {
            return Err(Error::NotFound(format!(
                "{} {}, the file holds {}",
                T::KIND,
                index,
                count
            )));
        }
        let mut dimensions = T::Dimensions::default();
        checked(
            self.store,
            T::inquire(self.store, self.id, index, &mut dimensions),
        )?;
        Ok(dimensions)
    }

    /// Fills a record allocated with [`Topology::allocate`] from the
    /// dimensions of an earlier [`UGridFile::inquire`]
    pub fn fill<T: Topology>(&self, index: usize, record: &mut T::Record) -> error::Result<()> {
        let dimensions = self.inquire::<T>(index)?;
        let allocated = T::record_dimensions(record);
        if allocated != dimensions {
            return Err(Error::Consistency(format!(
                "record allocated for {:?}, {} {} has {:?}",
                allocated,
                T::KIND,
                index,
                dimensions
            )));
        }
        checked(self.store, T::fill(self.store, self.id, index, record))
    }

    /// Reads topology `index` of type `T`
    pub fn get<T: Topology>(&self, index: usize) -> error::Result<T> {
        let dimensions = self.inquire::<T>(index)?;
        let mut record = T::allocate(dimensions, self.encoding);
        self.fill::<T>(index, &mut record)?;
        log::debug!("read {} {} of {}", T::KIND, index, self.path.display());
        T::from_record(&record, self.encoding)
    }

    /// Declares a topology, returns its index among topologies of its kind
    pub fn define<T: Topology>(&mut self, topology: &T) -> error::Result<usize> {
        topology.validate()?;
        topology.check_references(self)?;
        let name = BoundedName::new(topology.name(), self.encoding.widths.name);
        if name.is_truncated() {
            log::warn!(
                "{} name {:?} is truncated to {:?}",
                T::KIND,
                topology.name(),
                name.value()
            );
        }
        let record = topology.to_record(self.encoding);
        let mut index = 0;
        checked(
            self.store,
            T::define(self.store, self.id, &record, &mut index),
        )?;
        log::debug!("defined {} {:?} as {}", T::KIND, name.value(), index);
        Ok(index)
    }

    /// Writes the arrays of a topology declared by [`UGridFile::define`]
    pub fn put<T: Topology>(&mut self, index: usize, topology: &T) -> error::Result<()> {
        topology.validate()?;
        let declared = self.inquire::<T>(index)?;
        let dimensions = topology.dimensions();
        if declared != dimensions {
            return Err(Error::Consistency(format!(
                "{} {} was defined with {:?}, not {:?}",
                T::KIND,
                index,
                declared,
                dimensions
            )));
        }
        let record = topology.to_record(self.encoding);
        checked(self.store, T::put(self.store, self.id, index, &record))
    }

    /// Names of the variables holding values at `location` of a topology
    pub fn topology_data_variables(
        &self,
        kind: TopologyKind,
        index: usize,
        location: Location,
    ) -> error::Result<Vec<String>> {
        let kind_value = self.topology_value(kind);
        let location_value = self.location_value(location);
        let mut count = 0;
        checked(
            self.store,
            self.store.topology_count_data_variables(
                self.id,
                kind_value,
                index,
                location_value,
                &mut count,
            ),
        )?;
        let width = self.encoding.widths.long_name;
        let mut names = text::blank(count, width);
        checked(
            self.store,
            self.store.topology_get_data_variables(
                self.id,
                kind_value,
                index,
                location_value,
                &mut names,
            ),
        )?;
        text::decode(&names, count, width)
    }

    /// Declares a scalar integer variable, as used for coordinate systems
    pub fn define_int_variable(&mut self, name: &str) -> error::Result<()> {
        checked(
            self.store,
            self.store.variable_int_define(self.id, &self.field(name)),
        )
    }

    pub fn define_attribute<V: Into<AttributeValue>>(
        &mut self,
        variable: &str,
        name: &str,
        value: V,
    ) -> error::Result<()> {
        let variable = self.field(variable);
        let name = self.field(name);
        let status = match value.into() {
            AttributeValue::Int(x) => {
                self.store
                    .attribute_int_define(self.id, &variable, &name, &[x])
            }
            AttributeValue::Ints(x) => {
                self.store
                    .attribute_int_define(self.id, &variable, &name, &x)
            }
            AttributeValue::Double(x) => {
                self.store
                    .attribute_double_define(self.id, &variable, &name, &[x])
            }
            AttributeValue::Doubles(x) => {
                self.store
                    .attribute_double_define(self.id, &variable, &name, &x)
            }
            AttributeValue::Str(x) => {
                self.store
                    .attribute_char_define(self.id, &variable, &name, x.as_bytes())
            }
        };
        checked(self.store, status)
    }

    /// Declares a scalar integer variable together with its attributes
    pub fn define_int_variable_with_attributes(
        &mut self,
        name: &str,
        attributes: &[(&str, AttributeValue)],
    ) -> error::Result<()> {
        self.define_int_variable(name)?;
        for (attribute, value) in attributes {
            self.define_attribute(name, attribute, value.clone())?;
        }
        Ok(())
    }

    pub fn define_global_attribute(&mut self, name: &str, value: &str) -> error::Result<()> {
        checked(
            self.store,
            self.store
                .attribute_global_char_define(self.id, &self.field(name), value.as_bytes()),
        )
    }

    pub fn define_global_attributes(&mut self, attributes: &[(&str, &str)]) -> error::Result<()> {
        for (name, value) in attributes {
            self.define_global_attribute(name, value)?;
        }
        Ok(())
    }

    fn attribute_count(&self, variable: &[u8]) -> error::Result<usize> {
        let mut count = 0;
        checked(
            self.store,
            self.store
                .variable_count_attributes(self.id, variable, &mut count),
        )?;
        Ok(count)
    }

    /// Attribute names of a variable, in the order of
    /// [`UGridFile::variable_attribute_values`]
    pub fn variable_attribute_names(&self, variable: &str) -> error::Result<Vec<String>> {
        let variable = self.field(variable);
        let count = self.attribute_count(&variable)?;
        let width = self.encoding.widths.long_name;
        let mut names = text::blank(count, width);
        checked(
            self.store,
            self.store
                .variable_get_attributes_names(self.id, &variable, &mut names),
        )?;
        text::decode(&names, count, width)
    }

    /// Attribute values of a variable as text, numbers separated by spaces
    pub fn variable_attribute_values(&self, variable: &str) -> error::Result<Vec<String>> {
        let variable = self.field(variable);
        let count = self.attribute_count(&variable)?;
        let width = self.encoding.widths.long_name;
        let mut values = text::blank(count, width);
        checked(
            self.store,
            self.store
                .variable_get_attributes_values(self.id, &variable, &mut values),
        )?;
        text::decode(&values, count, width)
    }

    /// Pairs of attribute names and values of a variable
    pub fn variable_attributes(&self, variable: &str) -> error::Result<Vec<(String, String)>> {
        let names = self.variable_attribute_names(variable)?;
        let values = self.variable_attribute_values(variable)?;
        Ok(names.into_iter().zip(values).collect())
    }

    /// Lengths of the dimensions of a variable, empty for a scalar
    pub fn variable_dimensions(&self, variable: &str) -> error::Result<Vec<usize>> {
        let variable = self.field(variable);
        let mut count = 0;
        checked(
            self.store,
            self.store
                .variable_count_dimensions(self.id, &variable, &mut count),
        )?;
        let mut dimensions = vec![0; count];
        checked(
            self.store,
            self.store
                .variable_get_data_dimensions(self.id, &variable, &mut dimensions),
        )?;
        Ok(dimensions)
    }

    /// All values of a variable, flattened
    ///
    /// Integer variables can be read as `f64`, double variables can not be
    /// read as `i32`.
    pub fn variable_data<T: Numeric>(&self, variable: &str) -> error::Result<Vec<T>> {
        let len = self.variable_dimensions(variable)?.iter().product();
        let mut data = vec![T::default(); len];
        checked(
            self.store,
            T::get_data(self.store, self.id, &self.field(variable), &mut data),
        )?;
        Ok(data)
    }

    /// All values of a variable, shaped by its dimensions
    #[cfg(feature = "ndarray")]
    pub fn variable_data_arr<T: Numeric>(
        &self,
        variable: &str,
    ) -> error::Result<ndarray::ArrayD<T>> {
        let shape = self.variable_dimensions(variable)?;
        let data = self.variable_data::<T>(variable)?;
        ndarray::ArrayD::from_shape_vec(ndarray::IxDyn(&shape), data)
            .map_err(|e| Error::Str(e.to_string()))
    }

    /// Closes the file, reporting errors of the final flush
    pub fn close(mut self) -> error::Result<()> {
        self.closed = true;
        log::debug!("closing {}", self.path.display());
        checked(self.store, self.store.close(self.id))
    }
}

impl<S: Store + ?Sized> std::fmt::Debug for UGridFile<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UGridFile")
            .field("id", &self.id)
            .field("path", &self.path)
            .field("mode", &self.mode)
            .field("encoding", &self.encoding)
            .finish()
    }
}

impl<S: Store + ?Sized> Drop for UGridFile<'_, S> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        // Errors can only be logged here
        if let Err(e) = checked(self.store, self.store.close(self.id)) {
            log::warn!("could not close {}: {}", self.path.display(), e);
        }
    }
}

fn widths<S: Store + ?Sized>(store: &S) -> error::Result<NameWidths> {
    let mut name = 0;
    let mut long_name = 0;
    checked(store, store.name_length(&mut name))?;
    checked(store, store.name_long_length(&mut long_name))?;
    Ok(NameWidths { name, long_name })
}

fn enums<S: Store + ?Sized>(store: &S) -> error::Result<StoreEnums> {
    let mut enums = StoreEnums {
        topologies: [0; 4],
        locations: [0; 3],
    };
    for (kind, value) in TopologyKind::ALL.iter().zip(enums.topologies.iter_mut()) {
        checked(store, store.topology_enum(*kind, value))?;
    }
    for (location, value) in Location::ALL.iter().zip(enums.locations.iter_mut()) {
        checked(store, store.location_enum(*location, value))?;
    }
    Ok(enums)
}
