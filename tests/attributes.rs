use ugrid::engine::MemoryStore;
use ugrid::{AttributeValue, Location, Mesh2d, TopologyKind};

mod common;
use common::mesh2d;

#[test]
fn coordinate_system() {
    let store = MemoryStore::in_memory();
    let mut file = ugrid::create(&store, "crs.nc").unwrap();
    file.define_int_variable_with_attributes(
        "projected_coordinate_system",
        &[
            ("name", "Unknown projected".into()),
            ("epsg", AttributeValue::Int(0)),
            ("grid_mapping_name", "Unknown projected".into()),
            ("longitude_of_prime_meridian", 0.0.into()),
            ("semi_major_axis", 6378137.0.into()),
            ("semi_minor_axis", 6356752.314245.into()),
            ("inverse_flattening", 6356752.314245.into()),
            ("EPSG_code", "EPSG:0".into()),
            ("value", "value is equal to EPSG code".into()),
        ],
    )
    .unwrap();
    file.close().unwrap();

    let file = ugrid::open(&store, "crs.nc").unwrap();
    let names = file
        .variable_attribute_names("projected_coordinate_system")
        .unwrap();
    assert_eq!(
        names,
        vec![
            "EPSG_code",
            "epsg",
            "grid_mapping_name",
            "inverse_flattening",
            "longitude_of_prime_meridian",
            "name",
            "semi_major_axis",
            "semi_minor_axis",
            "value",
        ]
    );
    let values = file
        .variable_attribute_values("projected_coordinate_system")
        .unwrap();
    assert_eq!(values.len(), names.len());
    assert_eq!(values[0], "EPSG:0");
    assert_eq!(values[1], "0");
    assert_eq!(values[6], "6378137");

    assert!(file
        .variable_dimensions("projected_coordinate_system")
        .unwrap()
        .is_empty());
    assert_eq!(
        file.variable_data::<i32>("projected_coordinate_system")
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn attributes_of_missing_variables() {
    let store = MemoryStore::in_memory();
    let mut file = ugrid::create(&store, "crs.nc").unwrap();
    assert!(file.define_attribute("nowhere", "name", "x").is_err());
    assert!(file.variable_attribute_names("nowhere").is_err());
}

#[test]
fn global_attributes() {
    let store = MemoryStore::in_memory();
    let mut file = ugrid::create(&store, "global.nc").unwrap();
    file.define_global_attributes(&[
        ("institution", "Deltares"),
        ("source", "ugrid tests"),
        ("Conventions", "CF-1.8 UGRID-1.0"),
    ])
    .unwrap();
    file.close().unwrap();

    let ds = store.backend().snapshot("global.nc".as_ref()).unwrap();
    let conventions = ugrid::dataset::Dataset::attribute_value(&ds, None, "Conventions");
    assert_eq!(conventions, Some("CF-1.8 UGRID-1.0".into()));
}

#[test]
fn data_variables() {
    let store = MemoryStore::in_memory();
    let mut mesh = mesh2d();
    mesh.face_z = Some((0..9).map(|f| f as f64).collect());
    let mut file = ugrid::create(&store, "data.nc").unwrap();
    let index = file.define(&mesh).unwrap();
    file.put(index, &mesh).unwrap();

    file.define_int_variable_with_attributes(
        "mesh2d_face_flag",
        &[("mesh", "mesh2d".into()), ("location", "face".into())],
    )
    .unwrap();

    let on_faces = file
        .topology_data_variables(TopologyKind::Mesh2d, index, Location::Face)
        .unwrap();
    assert!(on_faces.contains(&"mesh2d_face_z".to_string()));
    assert!(on_faces.contains(&"mesh2d_face_flag".to_string()));
    let on_edges = file
        .topology_data_variables(TopologyKind::Mesh2d, index, Location::Edge)
        .unwrap();
    assert!(!on_edges.contains(&"mesh2d_face_z".to_string()));
    assert!(file
        .topology_data_variables(TopologyKind::Mesh2d, 1, Location::Face)
        .is_err());

    let face_z: Vec<f64> = file.variable_data("mesh2d_face_z").unwrap();
    assert_eq!(face_z, mesh.face_z.clone().unwrap());
    assert!(file.variable_data::<i32>("mesh2d_face_z").is_err());

    let face_nodes: Vec<f64> = file.variable_data("mesh2d_face_nodes").unwrap();
    assert_eq!(face_nodes.len(), 36);
    assert_eq!(file.variable_dimensions("mesh2d_face_nodes").unwrap(), vec![9, 4]);
}

#[cfg(feature = "ndarray")]
#[test]
fn shaped_data() {
    let store = MemoryStore::in_memory();
    let mesh = mesh2d();
    let mut file = ugrid::create(&store, "data.nc").unwrap();
    let index = file.define(&mesh).unwrap();
    file.put(index, &mesh).unwrap();

    let face_nodes = file.variable_data_arr::<i32>("mesh2d_face_nodes").unwrap();
    assert_eq!(face_nodes.shape(), &[9, 4]);
    assert_eq!(face_nodes[[4, 0]], 5);
    assert_eq!(file.get::<Mesh2d>(index).unwrap(), mesh);
}
