#![cfg(feature = "netcdf")]

use ugrid::engine::NetcdfStore;
use ugrid::{Contacts, Mesh1d, Mesh2d, Network1d};

mod common;
use common::{contacts, mesh1d, mesh2d, network};

#[test]
fn all_topologies_on_disk() {
    let d = tempfile::tempdir().expect("Could not create tempdir");
    let path = d.path().join("all_topologies.nc");
    let store = NetcdfStore::netcdf();

    let mut file = ugrid::create(&store, &path).unwrap();
    let network = network();
    let index = file.define(&network).unwrap();
    file.put(index, &network).unwrap();
    let mesh = mesh1d();
    let index = file.define(&mesh).unwrap();
    file.put(index, &mesh).unwrap();
    let mesh = mesh2d();
    let index = file.define(&mesh).unwrap();
    file.put(index, &mesh).unwrap();
    let links = contacts();
    let index = file.define(&links).unwrap();
    file.put(index, &links).unwrap();
    file.define_global_attribute("institution", "Deltares").unwrap();
    file.close().unwrap();

    let file = ugrid::open(&store, &path).unwrap();
    assert_eq!(file.store_version().unwrap(), "1.0.0 (netcdf)");
    assert_eq!(file.get::<Network1d>(0).unwrap(), network);
    assert_eq!(file.get::<Mesh1d>(0).unwrap(), mesh1d());
    assert_eq!(file.get::<Mesh2d>(0).unwrap(), mesh2d());
    assert_eq!(file.get::<Contacts>(0).unwrap(), links);
}

#[test]
fn write_mode_does_not_clobber() {
    let d = tempfile::tempdir().expect("Could not create tempdir");
    let path = d.path().join("noclobber.nc");
    let store = NetcdfStore::netcdf();

    ugrid::create(&store, &path).unwrap().close().unwrap();
    assert!(ugrid::create(&store, &path).is_err());
    ugrid::replace(&store, &path).unwrap().close().unwrap();
}

#[test]
fn layered_mesh_on_disk() {
    let d = tempfile::tempdir().expect("Could not create tempdir");
    let path = d.path().join("layered.nc");
    let store = NetcdfStore::netcdf();

    let mut mesh = mesh2d();
    mesh.num_layers = 2;
    mesh.layer_zs = Some(vec![-2.0, -1.0]);
    mesh.interface_zs = Some(vec![-1.5]);
    mesh.volume_coordinates = Some(vec![-1.0; 18]);

    let mut file = ugrid::create(&store, &path).unwrap();
    let index = file.define(&mesh).unwrap();
    file.put(index, &mesh).unwrap();
    file.close().unwrap();

    let file = ugrid::open(&store, &path).unwrap();
    assert_eq!(file.get::<Mesh2d>(0).unwrap(), mesh);
}
