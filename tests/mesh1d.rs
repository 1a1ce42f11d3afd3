use ugrid::engine::MemoryStore;
use ugrid::error::Error;
use ugrid::{Mesh1d, Mesh1dDimensions, Network1d};

mod common;
use common::{mesh1d, network};

fn with_network<'a>(store: &'a MemoryStore, path: &str) -> ugrid::UGridFile<'a, MemoryStore> {
    let mut file = ugrid::create(store, path).unwrap();
    let network = network();
    let index = file.define(&network).unwrap();
    file.put(index, &network).unwrap();
    file
}

#[test]
fn mesh1d_round_trip() {
    let store = MemoryStore::in_memory();
    let expected = mesh1d();
    let mut file = with_network(&store, "mesh1d.nc");
    let index = file.define(&expected).unwrap();
    file.put(index, &expected).unwrap();
    file.close().unwrap();

    let file = ugrid::open(&store, "mesh1d.nc").unwrap();
    assert_eq!(file.count::<Network1d>().unwrap(), 1);
    assert_eq!(file.count::<Mesh1d>().unwrap(), 1);
    assert_eq!(
        file.inquire::<Mesh1d>(0).unwrap(),
        Mesh1dDimensions {
            num_nodes: 5,
            num_edges: 4,
        }
    );
    let read: Mesh1d = file.get(0).unwrap();
    assert_eq!(read.network_name, "network1d");
    assert_eq!(read.node_x, None);
    assert_eq!(read, expected);
}

#[test]
fn coordinates_are_optional_one_by_one() {
    let store = MemoryStore::in_memory();
    let mut expected = mesh1d();
    expected.node_x = Some(vec![293.78, 355.0, 416.0, 477.0, 538.89]);
    expected.edge_y = Some(vec![100.0, 300.0, 500.0, 700.0]);
    let mut file = with_network(&store, "mesh1d.nc");
    let index = file.define(&expected).unwrap();
    file.put(index, &expected).unwrap();

    let read: Mesh1d = file.get(index).unwrap();
    assert_eq!(read.node_y, None);
    assert_eq!(read.edge_x, None);
    assert_eq!(read, expected);
}

#[test]
fn unknown_network() {
    let store = MemoryStore::in_memory();
    let mut file = with_network(&store, "mesh1d.nc");
    let mut mesh = mesh1d();
    mesh.network_name = "elsewhere".into();
    assert!(matches!(file.define(&mesh), Err(Error::Schema(_))));
    assert_eq!(file.count::<Mesh1d>().unwrap(), 0);
    assert!(file.variable_dimensions("mesh1d_node_branch").is_err());
}

#[test]
fn nodes_must_lie_on_branches() {
    let store = MemoryStore::in_memory();
    let mut file = with_network(&store, "mesh1d.nc");
    let mut mesh = mesh1d();
    mesh.node_edge_id[2] = 1;
    assert!(matches!(file.define(&mesh), Err(Error::Consistency(_))));

    mesh.node_edge_id[2] = mesh.int_fill_value;
    file.define(&mesh).unwrap();
}

#[test]
fn one_based_indices() {
    let store = MemoryStore::in_memory();
    let mut expected = mesh1d();
    expected.start_index = 1;
    expected.node_edge_id = vec![1; 5];
    expected.edge_edge_id = Some(vec![1; 4]);
    expected.edge_node = vec![1, 2, 2, 3, 3, 4, 4, 5];
    let mut file = with_network(&store, "mesh1d.nc");
    let index = file.define(&expected).unwrap();
    file.put(index, &expected).unwrap();

    let read: Mesh1d = file.get(index).unwrap();
    assert_eq!(read.start_index, 1);
    assert_eq!(read.edge_node, expected.edge_node);
}

#[test]
fn settings_without_optional_arrays() {
    let store = MemoryStore::in_memory();
    let mut expected = mesh1d();
    expected.edge_edge_id = None;
    expected.edge_edge_offset = None;
    expected.is_spherical = true;
    expected.double_fill_value = -1.0;
    expected.int_fill_value = -5;
    let mut file = with_network(&store, "mesh1d.nc");
    let index = file.define(&expected).unwrap();
    file.put(index, &expected).unwrap();
    file.close().unwrap();

    let file = ugrid::open(&store, "mesh1d.nc").unwrap();
    let read: Mesh1d = file.get(index).unwrap();
    assert_eq!(read.node_x, None);
    assert!(read.is_spherical);
    assert!(!file.get::<Network1d>(0).unwrap().is_spherical);
    assert_eq!(read.double_fill_value, -1.0);
    assert_eq!(read.int_fill_value, -5);
    assert_eq!(read, expected);
}
