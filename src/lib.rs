//! Reading and writing UGRID topologies
//!
//! A UGRID file describes unstructured meshes through the variables and
//! attributes of a NetCDF-style container. This crate exchanges four kinds of
//! topology with such files:
//!
//! * [`Network1d`]: a graph of branches with their polyline geometry
//! * [`Mesh1d`]: a discretisation of a network into nodes and edges
//! * [`Mesh2d`]: an unstructured 2D (optionally layered) mesh
//! * [`Contacts`]: links between the locations of two meshes
//!
//! Files are reached through a [`Store`]. Every call on a store is
//! status-returning and exchanges fixed-layout records: names padded to
//! widths the store reports, arrays sized by a previous inquire. The
//! [`UGridFile`] session hides this protocol behind entity types.
//! [`engine::Engine`] is the store shipped with the crate, keeping files in
//! memory or, with the `netcdf` feature, on disk.
//!
//! # Examples
//!
//! Write:
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use ugrid::Network1d;
//!
//! let store = ugrid::engine::MemoryStore::in_memory();
//! let mut file = ugrid::create(&store, "network.nc")?;
//! let network = Network1d {
//!     name: "network".into(),
//!     node_x: vec![293.78, 538.89],
//!     node_y: vec![27.48, 956.75],
//!     edge_node: vec![0, 1],
//!     edge_length: vec![1165.29],
//!     geometry_nodes_x: vec![293.78, 538.89],
//!     geometry_nodes_y: vec![27.48, 956.75],
//!     num_edge_geometry_nodes: vec![2],
//!     ..Default::default()
//! };
//! let index = file.define(&network)?;
//! file.put(index, &network)?;
//! file.define_global_attribute("institution", "Deltares")?;
//! file.close()?;
//! # Ok(()) }
//! ```
//!
//! Read:
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let store = ugrid::engine::MemoryStore::in_memory();
//! use ugrid::{Location, Mesh2d, TopologyKind};
//!
//! let file = ugrid::open(&store, "mesh.nc")?;
//! for index in 0..file.count::<Mesh2d>()? {
//!     // Inquire first, the counts size every array of the record
//!     let dimensions = file.inquire::<Mesh2d>(index)?;
//!     println!("{:?}", dimensions);
//!     let mesh: Mesh2d = file.get(index)?;
//!     for variable in file.topology_data_variables(TopologyKind::Mesh2d, index, Location::Face)? {
//!         let values: Vec<f64> = file.variable_data(&variable)?;
//!         println!("{} on {}: {:?}", variable, mesh.name, values);
//!     }
//! }
//! # Ok(()) }
//! ```

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::wildcard_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

use std::path::Path;

pub mod attribute;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod file;
pub mod store;
pub mod text;
pub mod topology;
pub mod types;

pub use attribute::AttributeValue;
pub use file::{Numeric, UGridFile};
pub use store::{FileId, Status, Store};
pub use text::NameWidths;
pub use topology::*;
pub use types::{Location, Mode, StoreEnums, TopologyKind};

/// Opens `path` of `store` in `mode`
pub fn open_with<S, P>(store: &S, path: P, mode: Mode) -> error::Result<UGridFile<'_, S>>
where
    S: Store + ?Sized,
    P: AsRef<Path>,
{
    UGridFile::open_with(store, path, mode)
}

/// Opens an existing file for reading
pub fn open<S, P>(store: &S, path: P) -> error::Result<UGridFile<'_, S>>
where
    S: Store + ?Sized,
    P: AsRef<Path>,
{
    open_with(store, path, Mode::Read)
}

/// Creates a new file, failing if it exists
pub fn create<S, P>(store: &S, path: P) -> error::Result<UGridFile<'_, S>>
where
    S: Store + ?Sized,
    P: AsRef<Path>,
{
    open_with(store, path, Mode::Write)
}

/// Creates a file, truncating an existing one
pub fn replace<S, P>(store: &S, path: P) -> error::Result<UGridFile<'_, S>>
where
    S: Store + ?Sized,
    P: AsRef<Path>,
{
    open_with(store, path, Mode::Replace)
}

/// Version of this crate
///
/// The version of the implementation behind a store is reported by
/// [`UGridFile::store_version`].
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
