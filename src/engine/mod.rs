//! A [`Store`] implemented on top of a [`Backend`]
//!
//! The engine writes topologies following the UGRID-1.0 convention: every
//! topology is a scalar integer variable whose attributes (`cf_role`,
//! `topology_dimension`, `node_coordinates`, ...) name the dimensions and
//! variables holding its arrays. When a file is opened the engine scans
//! these variables to find the topologies already present.
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use ugrid::engine::MemoryStore;
//! use ugrid::{Mesh2d, Mode};
//!
//! let store = MemoryStore::in_memory();
//! let mut file = ugrid::open_with(&store, "mesh.nc", Mode::Write)?;
//! let mesh = Mesh2d {
//!     name: "mesh2d".into(),
//!     node_x: vec![0.0, 1.0, 1.0],
//!     node_y: vec![0.0, 0.0, 1.0],
//!     edge_node: vec![0, 1, 1, 2, 2, 0],
//!     face_node: Some(vec![0, 1, 2]),
//!     num_face_nodes_max: 3,
//!     ..Default::default()
//! };
//! let index = file.define(&mesh)?;
//! file.put(index, &mesh)?;
//! file.close()?;
//!
//! let file = ugrid::open_with(&store, "mesh.nc", Mode::Read)?;
//! assert_eq!(file.get::<Mesh2d>(0)?, mesh);
//! # Ok(()) }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::attribute::AttributeValue;
use super::dataset::staged::Staged;
use super::dataset::{Backend, Dataset, MemoryBackend};
#[cfg(feature = "netcdf")]
use super::dataset::NetcdfBackend;
use super::error::{self, Error};
use super::store::{FileId, Status, Store};
use super::text::{self, NameWidths};
use super::topology::{
    Contacts, ContactsDimensions, ContactsRecord, Mesh1d, Mesh1dDimensions, Mesh1dRecord, Mesh2d,
    Mesh2dDimensions, Mesh2dRecord, Network1d, Network1dDimensions, Network1dRecord, Topology,
};
use super::types::{Location, Mode, StoreEnums, TopologyKind};

mod contacts;
mod convention;
mod mesh1d;
mod mesh2d;
mod network1d;
mod variables;

/// Version of the engine, reported by [`Store::version`]
pub const ENGINE_VERSION: &str = "1.0.0";

const ENUMS: StoreEnums = StoreEnums {
    topologies: [0, 1, 2, 3],
    locations: [0, 1, 2],
};

const MODES: [(Mode, i32); 3] = [(Mode::Read, 0), (Mode::Write, 1), (Mode::Replace, 2)];

/// Settings of an [`Engine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Width of names and ids
    pub name_length: usize,
    /// Width of long names, variable names and attribute values
    pub name_long_length: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            name_length: 40,
            name_long_length: 80,
        }
    }
}

impl EngineOptions {
    fn widths(&self) -> NameWidths {
        NameWidths {
            name: self.name_length,
            long_name: self.name_long_length,
        }
    }
}

/// Names of the topologies of one file, per kind in definition order
#[derive(Debug, Default)]
struct Registry {
    topologies: [Vec<String>; 4],
}

impl Registry {
    fn scan(ds: &dyn Dataset) -> Self {
        let mut registry = Self::default();
        for variable in ds.variable_names() {
            let role = convention::str_attribute(ds, Some(variable.as_str()), convention::CF_ROLE);
            let kind = match role.as_deref() {
                Some(convention::MESH_TOPOLOGY_CONTACT) => TopologyKind::Contacts,
                Some(convention::MESH_TOPOLOGY) => {
                    match convention::int_attribute(ds, Some(variable.as_str()), "topology_dimension") {
                        Some(2) => TopologyKind::Mesh2d,
                        Some(1) if network1d::is_network(ds, &variable) => TopologyKind::Network1d,
                        Some(1) => TopologyKind::Mesh1d,
                        _ => continue,
                    }
                }
                _ => continue,
            };
            log::trace!("found {} {:?}", kind, variable);
            registry.topologies[kind.index()].push(variable);
        }
        registry
    }

    fn names(&self, kind: TopologyKind) -> &[String] {
        &self.topologies[kind.index()]
    }

    fn name(&self, kind: TopologyKind, index: usize) -> error::Result<String> {
        self.names(kind).get(index).cloned().ok_or_else(|| {
            Error::NotFound(format!(
                "{} {} of {}",
                kind,
                index,
                self.names(kind).len()
            ))
        })
    }

    fn contains(&self, name: &str) -> bool {
        self.topologies.iter().flatten().any(|n| n == name)
    }

    /// Fails unless `name` is a topology of one of `kinds`
    fn require(&self, kinds: &[TopologyKind], name: &str) -> error::Result<()> {
        if kinds.iter().any(|&k| self.names(k).iter().any(|n| n == name)) {
            return Ok(());
        }
        let kinds: Vec<_> = kinds.iter().map(|k| k.name()).collect();
        Err(Error::Schema(format!(
            "no {} named {:?} in the file",
            kinds.join(" or "),
            name
        )))
    }
}

struct OpenFile<D> {
    path: PathBuf,
    mode: Mode,
    dataset: D,
    registry: Registry,
}

impl<D: Dataset> OpenFile<D> {
    fn view(&self) -> &dyn Dataset {
        &self.dataset
    }

    fn writable(&mut self) -> error::Result<&mut D> {
        if !self.mode.is_writable() {
            return Err(Error::Str(format!(
                "{} is opened read-only",
                self.path.display()
            )));
        }
        Ok(&mut self.dataset)
    }

    fn define(
        &mut self,
        kind: TopologyKind,
        name: &[u8],
        define: impl Fn(&mut dyn Dataset) -> error::Result<String>,
    ) -> error::Result<usize> {
        let name = convention::record_name(name)?;
        if name.is_empty() {
            return Err(Error::Consistency(format!("{} without a name", kind)));
        }
        if self.registry.contains(&name) || self.dataset.has_variable(&name) {
            return Err(Error::AlreadyExists(format!("topology {}", name)));
        }
        self.writable()?;
        // A rehearsal on a staged view fails before anything is written
        define(&mut Staged::new(&self.dataset))?;
        let ds: &mut dyn Dataset = self.writable()?;
        let defined = define(ds)?;
        let names = &mut self.registry.topologies[kind.index()];
        names.push(defined);
        log::debug!("defined {} {:?} in {}", kind, name, self.path.display());
        Ok(names.len() - 1)
    }

    fn put<T: PartialEq + std::fmt::Debug>(
        &mut self,
        kind: TopologyKind,
        topology: usize,
        wanted: T,
        inquire: impl FnOnce(&dyn Dataset, &str) -> T,
        put: impl FnOnce(&mut dyn Dataset, &str) -> error::Result<()>,
    ) -> error::Result<()> {
        let name = self.registry.name(kind, topology)?;
        let declared = inquire(self.view(), name.as_str());
        if declared != wanted {
            return Err(Error::Consistency(format!(
                "{} {:?} was defined with {:?}, not {:?}",
                kind, name, declared, wanted
            )));
        }
        let ds: &mut dyn Dataset = self.writable()?;
        put(ds, name.as_str())?;
        log::debug!("put {} {:?} in {}", kind, name, self.path.display());
        Ok(())
    }

    fn get<T: PartialEq + std::fmt::Debug>(
        &self,
        kind: TopologyKind,
        topology: usize,
        wanted: T,
        inquire: impl FnOnce(&dyn Dataset, &str) -> T,
        get: impl FnOnce(&dyn Dataset, &str) -> error::Result<()>,
    ) -> error::Result<()> {
        let name = self.registry.name(kind, topology)?;
        let stored = inquire(self.view(), name.as_str());
        if stored != wanted {
            return Err(Error::Consistency(format!(
                "{} {:?} has {:?}, the record was allocated for {:?}",
                kind, name, stored, wanted
            )));
        }
        get(self.view(), name.as_str())
    }

    fn inquire<T>(
        &self,
        kind: TopologyKind,
        topology: usize,
        inquire: impl FnOnce(&dyn Dataset, &str) -> T,
    ) -> error::Result<T> {
        let name = self.registry.name(kind, topology)?;
        Ok(inquire(self.view(), name.as_str()))
    }

    /// Name of the topology a data variable query refers to
    fn data_topology(&self, kind: i32, topology: usize) -> error::Result<String> {
        self.registry.name(topology_kind(kind)?, topology)
    }
}

struct State<D> {
    next_file: FileId,
    files: HashMap<FileId, OpenFile<D>>,
    last_error: String,
}

fn topology_kind(value: i32) -> error::Result<TopologyKind> {
    TopologyKind::ALL
        .iter()
        .copied()
        .find(|&k| ENUMS.topology(k) == value)
        .ok_or_else(|| Error::NotFound(format!("topology kind {}", value)))
}

fn mode(value: i32) -> error::Result<Mode> {
    MODES
        .iter()
        .find(|(_, v)| *v == value)
        .map(|(m, _)| *m)
        .ok_or_else(|| Error::InvalidMode(value.to_string()))
}

/// Variable and attribute names arrive padded to some width
fn field(buffer: &[u8]) -> error::Result<String> {
    text::decode_one(buffer, buffer.len())
}

/// Attribute values keep their blanks, only NUL padding is dropped
fn attribute_text(buffer: &[u8]) -> String {
    let end = buffer.iter().rposition(|&b| b != 0).map_or(0, |last| last + 1);
    String::from_utf8_lossy(&buffer[..end]).into_owned()
}

/// A single number is stored as a scalar attribute
fn number_value<T: Copy>(
    values: &[T],
    one: fn(T) -> AttributeValue,
    many: fn(Vec<T>) -> AttributeValue,
) -> AttributeValue {
    match values {
        [value] => one(*value),
        values => many(values.to_vec()),
    }
}

/// Keeps files of a [`Backend`] open and serves the [`Store`] calls on them
pub struct Engine<B: Backend> {
    backend: B,
    options: EngineOptions,
    state: Mutex<State<B::Dataset>>,
}

/// An engine keeping its files in memory
pub type MemoryStore = Engine<MemoryBackend>;
/// An engine reading and writing NetCDF files
#[cfg(feature = "netcdf")]
pub type NetcdfStore = Engine<NetcdfBackend>;

impl Engine<MemoryBackend> {
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }
}

#[cfg(feature = "netcdf")]
impl Engine<NetcdfBackend> {
    pub fn netcdf() -> Self {
        Self::new(NetcdfBackend)
    }
}

impl<B: Backend> std::fmt::Debug for Engine<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("backend", &self.backend.name())
            .field("options", &self.options)
            .field("open_files", &self.state.lock().files.len())
            .finish()
    }
}

impl<B: Backend> Engine<B> {
    pub fn new(backend: B) -> Self {
        Self::with_options(backend, EngineOptions::default())
    }

    pub fn with_options(backend: B, options: EngineOptions) -> Self {
        Self {
            backend,
            options,
            state: Mutex::new(State {
                next_file: 0,
                files: HashMap::new(),
                last_error: String::new(),
            }),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Turns the outcome of a call into a status, remembering the message
    /// of a failure
    fn status(&self, result: error::Result<()>) -> Status {
        match result {
            Ok(()) => Status::Success,
            Err(e) => {
                log::debug!("store call failed: {}", e);
                self.state.lock().last_error = e.to_string();
                Status::Failure
            }
        }
    }

    fn assign<T>(&self, result: error::Result<T>, out: &mut T) -> Status {
        self.status(result.map(|value| *out = value))
    }

    fn with_file<T>(
        &self,
        file: FileId,
        f: impl FnOnce(&mut OpenFile<B::Dataset>) -> error::Result<T>,
    ) -> error::Result<T> {
        let mut state = self.state.lock();
        let open = state
            .files
            .get_mut(&file)
            .ok_or_else(|| Error::NotFound(format!("file handle {}", file)))?;
        f(open)
    }

    fn open_file(&self, path: &Path, mode: Mode) -> error::Result<FileId> {
        let dataset = self.backend.open(path, mode)?;
        let registry = Registry::scan(&dataset);
        let mut state = self.state.lock();
        state.next_file += 1;
        let file = state.next_file;
        log::debug!("opened {} as file {} ({:?})", path.display(), file, mode);
        state.files.insert(
            file,
            OpenFile {
                path: path.to_path_buf(),
                mode,
                dataset,
                registry,
            },
        );
        Ok(file)
    }

    fn close_file(&self, file: FileId) -> error::Result<()> {
        let open = self
            .state
            .lock()
            .files
            .remove(&file)
            .ok_or_else(|| Error::NotFound(format!("file handle {}", file)))?;
        log::debug!("closing file {} ({})", file, open.path.display());
        self.backend.close(&open.path, open.dataset, open.mode)
    }

    /// Pads names to the long width into a caller buffer
    fn copy_names(&self, names: &[String], buffer: &mut [u8]) -> error::Result<()> {
        let encoded = text::encode(names, self.options.name_long_length);
        convention::copy_into("names", buffer, &encoded)
    }

    fn define_attribute(
        &self,
        file: FileId,
        variable: &[u8],
        attribute: &[u8],
        value: AttributeValue,
    ) -> Status {
        self.status(self.with_file(file, |open| {
            let ds = open.writable()?;
            variables::define_attribute(ds, &field(variable)?, &field(attribute)?, value)
        }))
    }
}

impl<B: Backend> Store for Engine<B> {
    fn last_error(&self) -> String {
        self.state.lock().last_error.clone()
    }

    fn version(&self, version: &mut String) -> Status {
        *version = format!("{} ({})", ENGINE_VERSION, self.backend.name());
        Status::Success
    }

    fn name_length(&self, length: &mut usize) -> Status {
        *length = self.options.name_length;
        Status::Success
    }

    fn name_long_length(&self, length: &mut usize) -> Status {
        *length = self.options.name_long_length;
        Status::Success
    }

    fn file_mode(&self, mode: Mode, value: &mut i32) -> Status {
        match MODES.iter().find(|(m, _)| *m == mode) {
            Some((_, v)) => {
                *value = *v;
                Status::Success
            }
            None => self.status(Err(Error::InvalidMode(format!("{:?}", mode)))),
        }
    }

    fn topology_enum(&self, kind: TopologyKind, value: &mut i32) -> Status {
        *value = ENUMS.topology(kind);
        Status::Success
    }

    fn location_enum(&self, location: Location, value: &mut i32) -> Status {
        *value = ENUMS.location(location);
        Status::Success
    }

    fn open(&self, path: &Path, mode: i32, file: &mut FileId) -> Status {
        let result = self::mode(mode).and_then(|mode| self.open_file(path, mode));
        self.assign(result, file)
    }

    fn close(&self, file: FileId) -> Status {
        self.status(self.close_file(file))
    }

    fn topology_count(&self, file: FileId, kind: i32, count: &mut usize) -> Status {
        let result = self.with_file(file, |open| {
            Ok(open.registry.names(topology_kind(kind)?).len())
        });
        self.assign(result, count)
    }

    fn topology_name(&self, file: FileId, kind: i32, topology: usize, name: &mut [u8]) -> Status {
        self.status(self.with_file(file, |open| {
            let found = open.registry.name(topology_kind(kind)?, topology)?;
            let width = name.len();
            convention::copy_into("name", name, &text::encode_one(&found, width))
        }))
    }

    fn network1d_inquire(
        &self,
        file: FileId,
        topology: usize,
        dimensions: &mut Network1dDimensions,
    ) -> Status {
        let result = self.with_file(file, |open| {
            open.inquire(TopologyKind::Network1d, topology, network1d::inquire)
        });
        self.assign(result, dimensions)
    }

    fn network1d_get(&self, file: FileId, topology: usize, record: &mut Network1dRecord) -> Status {
        let wanted = Network1d::record_dimensions(record);
        self.status(self.with_file(file, |open| {
            open.get(
                TopologyKind::Network1d,
                topology,
                wanted,
                network1d::inquire,
                |ds, name| network1d::get(ds, name, record),
            )
        }))
    }

    fn network1d_define(
        &self,
        file: FileId,
        record: &Network1dRecord,
        topology: &mut usize,
    ) -> Status {
        let widths = self.options.widths();
        let result = self.with_file(file, |open| {
            open.define(TopologyKind::Network1d, &record.name, |ds| {
                network1d::define(ds, widths, record)
            })
        });
        self.assign(result, topology)
    }

    fn network1d_put(&self, file: FileId, topology: usize, record: &Network1dRecord) -> Status {
        self.status(self.with_file(file, |open| {
            open.put(
                TopologyKind::Network1d,
                topology,
                Network1d::record_dimensions(record),
                network1d::inquire,
                |ds, name| network1d::put(ds, name, record),
            )
        }))
    }

    fn mesh1d_inquire(
        &self,
        file: FileId,
        topology: usize,
        dimensions: &mut Mesh1dDimensions,
    ) -> Status {
        let result = self.with_file(file, |open| {
            open.inquire(TopologyKind::Mesh1d, topology, mesh1d::inquire)
        });
        self.assign(result, dimensions)
    }

    fn mesh1d_get(&self, file: FileId, topology: usize, record: &mut Mesh1dRecord) -> Status {
        let wanted = Mesh1d::record_dimensions(record);
        self.status(self.with_file(file, |open| {
            open.get(
                TopologyKind::Mesh1d,
                topology,
                wanted,
                mesh1d::inquire,
                |ds, name| mesh1d::get(ds, name, record),
            )
        }))
    }

    fn mesh1d_define(&self, file: FileId, record: &Mesh1dRecord, topology: &mut usize) -> Status {
        let widths = self.options.widths();
        let result = self.with_file(file, |open| {
            let network = convention::record_name(&record.network_name)?;
            open.registry.require(&[TopologyKind::Network1d], &network)?;
            open.define(TopologyKind::Mesh1d, &record.name, |ds| {
                mesh1d::define(ds, widths, record)
            })
        });
        self.assign(result, topology)
    }

    fn mesh1d_put(&self, file: FileId, topology: usize, record: &Mesh1dRecord) -> Status {
        self.status(self.with_file(file, |open| {
            open.put(
                TopologyKind::Mesh1d,
                topology,
                Mesh1d::record_dimensions(record),
                mesh1d::inquire,
                |ds, name| mesh1d::put(ds, name, record),
            )
        }))
    }

    fn mesh2d_inquire(
        &self,
        file: FileId,
        topology: usize,
        dimensions: &mut Mesh2dDimensions,
    ) -> Status {
        let result = self.with_file(file, |open| {
            open.inquire(TopologyKind::Mesh2d, topology, mesh2d::inquire)
        });
        self.assign(result, dimensions)
    }

    fn mesh2d_get(&self, file: FileId, topology: usize, record: &mut Mesh2dRecord) -> Status {
        let wanted = Mesh2d::record_dimensions(record);
        self.status(self.with_file(file, |open| {
            open.get(
                TopologyKind::Mesh2d,
                topology,
                wanted,
                mesh2d::inquire,
                |ds, name| mesh2d::get(ds, name, record),
            )
        }))
    }

    fn mesh2d_define(&self, file: FileId, record: &Mesh2dRecord, topology: &mut usize) -> Status {
        let result = self.with_file(file, |open| {
            open.define(TopologyKind::Mesh2d, &record.name, |ds| {
                mesh2d::define(ds, record)
            })
        });
        self.assign(result, topology)
    }

    fn mesh2d_put(&self, file: FileId, topology: usize, record: &Mesh2dRecord) -> Status {
        self.status(self.with_file(file, |open| {
            open.put(
                TopologyKind::Mesh2d,
                topology,
                Mesh2d::record_dimensions(record),
                mesh2d::inquire,
                |ds, name| mesh2d::put(ds, name, record),
            )
        }))
    }

    fn contacts_inquire(
        &self,
        file: FileId,
        topology: usize,
        dimensions: &mut ContactsDimensions,
    ) -> Status {
        let result = self.with_file(file, |open| {
            open.inquire(TopologyKind::Contacts, topology, contacts::inquire)
        });
        self.assign(result, dimensions)
    }

    fn contacts_get(&self, file: FileId, topology: usize, record: &mut ContactsRecord) -> Status {
        let wanted = Contacts::record_dimensions(record);
        self.status(self.with_file(file, |open| {
            open.get(
                TopologyKind::Contacts,
                topology,
                wanted,
                contacts::inquire,
                |ds, name| contacts::get(ds, name, &ENUMS, record),
            )
        }))
    }

    fn contacts_define(
        &self,
        file: FileId,
        record: &ContactsRecord,
        topology: &mut usize,
    ) -> Status {
        let widths = self.options.widths();
        let result = self.with_file(file, |open| {
            let meshes = [TopologyKind::Mesh1d, TopologyKind::Mesh2d];
            open.registry
                .require(&meshes, &convention::record_name(&record.mesh_from_name)?)?;
            open.registry
                .require(&meshes, &convention::record_name(&record.mesh_to_name)?)?;
            open.define(TopologyKind::Contacts, &record.name, |ds| {
                contacts::define(ds, widths, &ENUMS, record)
            })
        });
        self.assign(result, topology)
    }

    fn contacts_put(&self, file: FileId, topology: usize, record: &ContactsRecord) -> Status {
        self.status(self.with_file(file, |open| {
            open.put(
                TopologyKind::Contacts,
                topology,
                Contacts::record_dimensions(record),
                contacts::inquire,
                |ds, name| contacts::put(ds, name, record),
            )
        }))
    }

    fn topology_count_data_variables(
        &self,
        file: FileId,
        kind: i32,
        topology: usize,
        location: i32,
        count: &mut usize,
    ) -> Status {
        let result = self.with_file(file, |open| {
            let name = open.data_topology(kind, topology)?;
            let location = ENUMS.location_from_value(location)?;
            Ok(variables::data_variables(open.view(), &name, location).len())
        });
        self.assign(result, count)
    }

    fn topology_get_data_variables(
        &self,
        file: FileId,
        kind: i32,
        topology: usize,
        location: i32,
        names: &mut [u8],
    ) -> Status {
        let result = self.with_file(file, |open| {
            let name = open.data_topology(kind, topology)?;
            let location = ENUMS.location_from_value(location)?;
            Ok(variables::data_variables(open.view(), &name, location))
        });
        self.status(result.and_then(|found| self.copy_names(&found, names)))
    }

    fn variable_count_attributes(
        &self,
        file: FileId,
        variable: &[u8],
        count: &mut usize,
    ) -> Status {
        let result = self.with_file(file, |open| {
            Ok(variables::attributes(open.view(), &field(variable)?)?.len())
        });
        self.assign(result, count)
    }

    fn variable_get_attributes_names(
        &self,
        file: FileId,
        variable: &[u8],
        names: &mut [u8],
    ) -> Status {
        let result = self.with_file(file, |open| {
            variables::attributes(open.view(), &field(variable)?)
        });
        self.status(result.and_then(|attributes| {
            let found: Vec<String> = attributes.into_iter().map(|(name, _)| name).collect();
            self.copy_names(&found, names)
        }))
    }

    fn variable_get_attributes_values(
        &self,
        file: FileId,
        variable: &[u8],
        values: &mut [u8],
    ) -> Status {
        let result = self.with_file(file, |open| {
            variables::attributes(open.view(), &field(variable)?)
        });
        self.status(result.and_then(|attributes| {
            let found: Vec<String> = attributes.into_iter().map(|(_, value)| value).collect();
            self.copy_names(&found, values)
        }))
    }

    fn variable_count_dimensions(
        &self,
        file: FileId,
        variable: &[u8],
        count: &mut usize,
    ) -> Status {
        let result = self.with_file(file, |open| {
            Ok(variables::dimensions(open.view(), &field(variable)?)?.len())
        });
        self.assign(result, count)
    }

    fn variable_get_data_dimensions(
        &self,
        file: FileId,
        variable: &[u8],
        dimensions: &mut [usize],
    ) -> Status {
        self.status(self.with_file(file, |open| {
            let variable = field(variable)?;
            let found = variables::dimensions(open.view(), &variable)?;
            convention::copy_into(&variable, dimensions, &found)
        }))
    }

    fn variable_get_data_double(&self, file: FileId, variable: &[u8], data: &mut [f64]) -> Status {
        self.status(self.with_file(file, |open| {
            let variable = field(variable)?;
            let values = variables::data_double(open.view(), &variable)?;
            convention::copy_into(&variable, data, &values)
        }))
    }

    fn variable_get_data_int(&self, file: FileId, variable: &[u8], data: &mut [i32]) -> Status {
        self.status(self.with_file(file, |open| {
            let variable = field(variable)?;
            let values = variables::data_int(open.view(), &variable)?;
            convention::copy_into(&variable, data, &values)
        }))
    }

    fn variable_int_define(&self, file: FileId, variable: &[u8]) -> Status {
        self.status(self.with_file(file, |open| {
            let variable = field(variable)?;
            log::debug!("defining variable {:?} in {}", variable, open.path.display());
            variables::define_int(open.writable()?, &variable)
        }))
    }

    fn attribute_int_define(
        &self,
        file: FileId,
        variable: &[u8],
        attribute: &[u8],
        values: &[i32],
    ) -> Status {
        let value = number_value(values, AttributeValue::Int, AttributeValue::Ints);
        self.define_attribute(file, variable, attribute, value)
    }

    fn attribute_double_define(
        &self,
        file: FileId,
        variable: &[u8],
        attribute: &[u8],
        values: &[f64],
    ) -> Status {
        let value = number_value(values, AttributeValue::Double, AttributeValue::Doubles);
        self.define_attribute(file, variable, attribute, value)
    }

    fn attribute_char_define(
        &self,
        file: FileId,
        variable: &[u8],
        attribute: &[u8],
        value: &[u8],
    ) -> Status {
        self.define_attribute(file, variable, attribute, attribute_text(value).into())
    }

    fn attribute_global_char_define(&self, file: FileId, attribute: &[u8], value: &[u8]) -> Status {
        self.status(self.with_file(file, |open| {
            let ds = open.writable()?;
            variables::define_global_attribute(ds, &field(attribute)?, &attribute_text(value))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ValueKind;

    fn padded(name: &str) -> Vec<u8> {
        text::encode_one(name, 80)
    }

    #[test]
    fn failures_set_last_error() {
        let store = MemoryStore::in_memory();
        let mut file = 0;
        assert_eq!(
            store.open(Path::new("missing.nc"), 0, &mut file),
            Status::Failure
        );
        assert!(store.last_error().contains("missing.nc"));
        assert_eq!(store.open(Path::new("a.nc"), 7, &mut file), Status::Failure);
        assert_eq!(
            store.last_error(),
            Error::InvalidMode("7".into()).to_string()
        );

        assert_eq!(store.close(42), Status::Failure);
        assert!(store.last_error().contains("42"));
    }

    #[test]
    fn read_only_files_reject_writes() {
        let store = MemoryStore::in_memory();
        let mut file = 0;
        assert!(store.open(Path::new("a.nc"), 1, &mut file).is_success());
        assert!(store.close(file).is_success());

        assert!(store.open(Path::new("a.nc"), 0, &mut file).is_success());
        assert_eq!(
            store.variable_int_define(file, &padded("crs")),
            Status::Failure
        );
        assert!(store.last_error().contains("read-only"));
        assert!(store.close(file).is_success());
    }

    #[test]
    fn registry_scan() {
        let mut ds = crate::dataset::MemoryDataset::new();
        for (name, dimension, extra) in [
            ("network", 1, Some("network_geometry")),
            ("mesh1d", 1, None),
            ("mesh2d", 2, None),
        ] {
            ds.add_variable(name, ValueKind::Int, &[]).unwrap();
            ds.add_attribute(Some(name), "cf_role", "mesh_topology".into())
                .unwrap();
            ds.add_attribute(Some(name), "topology_dimension", dimension.into())
                .unwrap();
            if let Some(geometry) = extra {
                ds.add_attribute(Some(name), "edge_geometry", geometry.into())
                    .unwrap();
            }
        }
        ds.add_variable("links", ValueKind::Int, &[]).unwrap();
        ds.add_attribute(Some("links"), "cf_role", "mesh_topology_contact".into())
            .unwrap();
        ds.add_variable("crs", ValueKind::Int, &[]).unwrap();

        let registry = Registry::scan(&ds);
        assert_eq!(registry.names(TopologyKind::Network1d), ["network"]);
        assert_eq!(registry.names(TopologyKind::Mesh1d), ["mesh1d"]);
        assert_eq!(registry.names(TopologyKind::Mesh2d), ["mesh2d"]);
        assert_eq!(registry.names(TopologyKind::Contacts), ["links"]);
        assert!(matches!(
            registry.name(TopologyKind::Mesh2d, 1),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            registry.require(&[TopologyKind::Network1d], "mesh1d"),
            Err(Error::Schema(_))
        ));
    }

    #[test]
    fn attributes_are_sorted_and_padded() {
        let store = MemoryStore::in_memory();
        let mut file = 0;
        assert!(store.open(Path::new("a.nc"), 2, &mut file).is_success());
        let crs = padded("projected_coordinate_system");
        assert!(store.variable_int_define(file, &crs).is_success());
        assert!(store
            .attribute_char_define(file, &crs, &padded("name"), b"Amersfoort")
            .is_success());
        assert!(store
            .attribute_int_define(file, &crs, &padded("epsg"), &[28992])
            .is_success());

        let mut count = 0;
        assert!(store
            .variable_count_attributes(file, &crs, &mut count)
            .is_success());
        assert_eq!(count, 2);
        let mut names = vec![0; count * 80];
        assert!(store
            .variable_get_attributes_names(file, &crs, &mut names)
            .is_success());
        assert_eq!(text::decode(&names, 2, 80).unwrap(), vec!["epsg", "name"]);
        let mut values = vec![0; count * 80];
        assert!(store
            .variable_get_attributes_values(file, &crs, &mut values)
            .is_success());
        assert_eq!(
            text::decode(&values, 2, 80).unwrap(),
            vec!["28992", "Amersfoort"]
        );

        let mut short = vec![0; 80];
        assert_eq!(
            store.variable_get_attributes_names(file, &crs, &mut short),
            Status::Failure
        );
        assert!(store.close(file).is_success());
    }

    #[test]
    fn attribute_values_keep_their_blanks() {
        let store = MemoryStore::in_memory();
        let mut file = 0;
        assert!(store.open(Path::new("a.nc"), 2, &mut file).is_success());
        let crs = padded("crs");
        assert!(store.variable_int_define(file, &crs).is_success());
        assert!(store
            .attribute_char_define(file, &crs, &padded("wkt"), b"LOCAL_CS  ")
            .is_success());
        assert!(store
            .attribute_global_char_define(file, &padded("title"), b" indented \0\0")
            .is_success());
        assert!(store.close(file).is_success());

        let ds = store.backend().snapshot(Path::new("a.nc")).unwrap();
        assert_eq!(
            ds.attribute_value(Some("crs"), "wkt"),
            Some("LOCAL_CS  ".into())
        );
        assert_eq!(ds.attribute_value(None, "title"), Some(" indented ".into()));
    }
}
