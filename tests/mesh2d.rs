use ugrid::engine::MemoryStore;
use ugrid::error::Error;
use ugrid::{Mesh2d, Mesh2dDimensions, Topology};

mod common;
use common::mesh2d;

fn round_trip(mesh: &Mesh2d) -> Mesh2d {
    let store = MemoryStore::in_memory();
    let mut file = ugrid::create(&store, "mesh2d.nc").unwrap();
    let index = file.define(mesh).unwrap();
    file.put(index, mesh).unwrap();
    file.close().unwrap();

    let file = ugrid::open(&store, "mesh2d.nc").unwrap();
    file.get(index).unwrap()
}

#[test]
fn grid_round_trip() {
    let store = MemoryStore::in_memory();
    let expected = mesh2d();
    let mut file = ugrid::create(&store, "mesh2d.nc").unwrap();
    let index = file.define(&expected).unwrap();
    file.put(index, &expected).unwrap();
    file.close().unwrap();

    let file = ugrid::open(&store, "mesh2d.nc").unwrap();
    let dimensions = file.inquire::<Mesh2d>(0).unwrap();
    assert_eq!(
        dimensions,
        Mesh2dDimensions {
            num_nodes: 16,
            num_edges: 24,
            num_faces: 9,
            num_face_nodes_max: 4,
            num_layers: 0,
            num_boundary_edges: 0,
        }
    );

    let read: Mesh2d = file.get(0).unwrap();
    let face_node = read.face_node.as_ref().unwrap();
    assert_eq!(face_node.len(), 36);
    let start = read.start_index;
    assert!(face_node
        .iter()
        .all(|&n| n == read.int_fill_value || (start..start + 16).contains(&n)));
    assert_eq!(read, expected);
}

#[test]
fn mixed_faces_are_padded() {
    let mesh = Mesh2d {
        name: "mixed".into(),
        node_x: vec![0.0, 1.0, 1.0, 0.0, 2.0],
        node_y: vec![0.0, 0.0, 1.0, 1.0, 0.5],
        edge_node: vec![0, 1, 1, 2, 2, 3, 3, 0, 1, 4, 4, 2],
        face_node: Some(vec![0, 1, 2, 3, 1, 4, 2, -999]),
        face_edge: Some(vec![0, 1, 2, 3, 4, 5, 1, -999]),
        face_face: Some(vec![-999, 1, -999, -999, 0, -999, -999, -999]),
        edge_face: Some(vec![0, -999, 0, 1, 0, -999, 0, -999, 1, -999, 1, -999]),
        num_face_nodes_max: 4,
        ..Default::default()
    };
    assert_eq!(round_trip(&mesh), mesh);
}

#[test]
fn single_layer_has_no_interfaces() {
    let mut mesh = mesh2d();
    mesh.num_layers = 1;
    mesh.layer_zs = Some(vec![-5.0]);
    mesh.interface_zs = Some(vec![-2.5]);
    mesh.volume_coordinates = Some(vec![-5.0; 9]);

    let read = round_trip(&mesh);
    assert_eq!(read.num_layers, 1);
    assert_eq!(read.layer_zs, Some(vec![-5.0]));
    assert_eq!(read.interface_zs, None);
    assert_eq!(read.volume_coordinates, mesh.volume_coordinates);
}

#[test]
fn layers_and_interfaces() {
    let mut mesh = mesh2d();
    mesh.num_layers = 3;
    mesh.layer_zs = Some(vec![-5.0, -3.0, -1.0]);
    mesh.interface_zs = Some(vec![-4.0, -2.0]);
    mesh.volume_coordinates = Some((0..27).map(|i| -(i as f64)).collect());
    assert_eq!(mesh.dimensions().num_interfaces(), 2);
    assert_eq!(round_trip(&mesh), mesh);
}

#[test]
fn elevations_keep_their_fill_value() {
    let mut mesh = mesh2d();
    mesh.double_fill_value = -9999.0;
    let mut node_z: Vec<f64> = (0..16).map(|n| n as f64 / 10.0).collect();
    node_z[5] = -9999.0;
    mesh.node_z = Some(node_z);
    mesh.face_z = Some(vec![1.5; 9]);

    let read = round_trip(&mesh);
    assert_eq!(read.double_fill_value, -9999.0);
    assert_eq!(read, mesh);
}

#[test]
fn boundaries_and_centres() {
    let mut mesh = mesh2d();
    let boundary: Vec<i32> = vec![0, 1, 1, 2, 2, 3, 3, 7, 7, 11, 11, 15];
    mesh.boundary_node_connectivity = Some(boundary);
    mesh.edge_x = Some((0..24).map(|e| e as f64).collect());
    mesh.edge_y = Some(vec![0.0; 24]);
    mesh.edge_z = Some(vec![2.0; 24]);

    let read = round_trip(&mesh);
    assert_eq!(
        read.dimensions().num_boundary_edges,
        mesh.dimensions().num_boundary_edges
    );
    assert_eq!(read, mesh);
}

#[test]
fn invalid_meshes_are_rejected() {
    let store = MemoryStore::in_memory();
    let mut file = ugrid::create(&store, "mesh2d.nc").unwrap();

    let mut mesh = mesh2d();
    mesh.face_node.as_mut().unwrap()[3] = 16;
    assert!(matches!(file.define(&mesh), Err(Error::Consistency(_))));

    let mut mesh = mesh2d();
    mesh.start_index = 2;
    assert!(matches!(file.define(&mesh), Err(Error::Consistency(_))));

    let mut mesh = mesh2d();
    mesh.face_x = Some(vec![0.5; 8]);
    assert!(matches!(file.define(&mesh), Err(Error::Consistency(_))));

    let mut mesh = mesh2d();
    mesh.name = String::new();
    assert!(file.define(&mesh).is_err());
    assert_eq!(file.count::<Mesh2d>().unwrap(), 0);
}

#[test]
fn read_only_files() {
    let store = MemoryStore::in_memory();
    let mesh = mesh2d();
    ugrid::create(&store, "mesh2d.nc").unwrap().close().unwrap();

    let mut file = ugrid::open(&store, "mesh2d.nc").unwrap();
    let err = file.define(&mesh).unwrap_err();
    assert!(err.to_string().contains("read-only"));
}

#[test]
fn settings_without_optional_arrays() {
    let mesh = Mesh2d {
        name: "bare".into(),
        node_x: vec![4.0, 4.5, 4.5],
        node_y: vec![52.0, 52.0, 52.5],
        edge_node: vec![0, 1, 1, 2],
        is_spherical: true,
        double_fill_value: -1.0,
        int_fill_value: -5,
        ..Default::default()
    };

    let read = round_trip(&mesh);
    assert_eq!(read.double_fill_value, -1.0);
    assert_eq!(read.int_fill_value, -5);
    assert!(read.is_spherical);
    assert_eq!(read, mesh);

    let mut grid = mesh2d();
    grid.double_fill_value = -1.0;
    assert_eq!(round_trip(&grid).double_fill_value, -1.0);
}

#[test]
fn nodes_only_keep_their_int_fill_value() {
    let mesh = Mesh2d {
        name: "points".into(),
        node_x: vec![0.0, 1.0, 2.0],
        node_y: vec![0.0, 0.0, 0.0],
        start_index: 1,
        int_fill_value: -5,
        ..Default::default()
    };
    assert_eq!(mesh.dimensions().num_edges, 0);

    let read = round_trip(&mesh);
    assert_eq!(read.int_fill_value, -5);
    assert_eq!(read.start_index, 1);
    assert_eq!(read, mesh);
}

#[test]
fn failed_define_leaves_nothing_behind() {
    let store = MemoryStore::in_memory();
    let mut mesh = mesh2d();
    let mut file = ugrid::create(&store, "mesh2d.nc").unwrap();
    file.define_int_variable("mesh2d_face_x").unwrap();

    let err = file.define(&mesh).unwrap_err();
    assert!(err.to_string().contains("mesh2d_face_x"));
    assert_eq!(file.count::<Mesh2d>().unwrap(), 0);
    assert!(file.variable_dimensions("mesh2d_node_x").is_err());
    assert!(file.variable_dimensions("mesh2d").is_err());

    mesh.face_x = None;
    mesh.face_y = None;
    let index = file.define(&mesh).unwrap();
    file.put(index, &mesh).unwrap();
    assert_eq!(file.get::<Mesh2d>(index).unwrap(), mesh);
}
