//! Mesh2d topology variables

use super::convention::*;
use crate::dataset::{Dataset, ValueKind};
use crate::error::{self, expect_len};
use crate::text;
use crate::topology::{Mesh2dDimensions, Mesh2dRecord};
use crate::types::Location;

struct Names {
    topology: String,
    nodes: String,
    edges: String,
    faces: String,
    max_face_nodes: String,
    layers: String,
    interfaces: String,
    boundary_edges: String,
    node_x: String,
    node_y: String,
    node_z: String,
    edge_nodes: String,
    edge_x: String,
    edge_y: String,
    edge_z: String,
    edge_faces: String,
    face_nodes: String,
    face_edges: String,
    face_links: String,
    face_x: String,
    face_y: String,
    face_z: String,
    layer_z: String,
    interface_z: String,
    boundary_nodes: String,
    volume_z: String,
}

impl Names {
    fn new(topology: &str) -> Self {
        let name = |suffix: &str| format!("{}_{}", topology, suffix);
        Self {
            topology: topology.to_string(),
            nodes: name("nNodes"),
            edges: name("nEdges"),
            faces: name("nFaces"),
            max_face_nodes: name("nMax_face_nodes"),
            layers: name("nLayers"),
            interfaces: name("nInterfaces"),
            boundary_edges: name("nBoundaryEdges"),
            node_x: name("node_x"),
            node_y: name("node_y"),
            node_z: name("node_z"),
            edge_nodes: name("edge_nodes"),
            edge_x: name("edge_x"),
            edge_y: name("edge_y"),
            edge_z: name("edge_z"),
            edge_faces: name("edge_faces"),
            face_nodes: name("face_nodes"),
            face_edges: name("face_edges"),
            face_links: name("face_links"),
            face_x: name("face_x"),
            face_y: name("face_y"),
            face_z: name("face_z"),
            layer_z: name("layer_z"),
            interface_z: name("interface_z"),
            boundary_nodes: name("boundary_nodes"),
            volume_z: name("volume_z"),
        }
    }

    /// Index variables, in the order their attributes are looked up on read
    fn indexed(&self) -> [String; 5] {
        [
            self.edge_nodes.clone(),
            self.face_nodes.clone(),
            self.face_edges.clone(),
            self.face_links.clone(),
            self.edge_faces.clone(),
        ]
    }
}

fn present<T>(values: &Option<Vec<T>>) -> bool {
    values.as_ref().map_or(false, |v| !v.is_empty())
}

fn check_optional<T>(what: &str, values: &Option<Vec<T>>, wanted: usize) -> error::Result<()> {
    match values {
        Some(values) if !values.is_empty() => expect_len(what, values.len(), wanted),
        _ => Ok(()),
    }
}

fn check_record(record: &Mesh2dRecord) -> error::Result<()> {
    let face_width = record.num_faces * record.num_face_nodes_max;
    expect_len("node_x", record.node_x.len(), record.num_nodes)?;
    expect_len("node_y", record.node_y.len(), record.num_nodes)?;
    expect_len("edge_node", record.edge_node.len(), 2 * record.num_edges)?;
    check_optional("face_node", &record.face_node, face_width)?;
    check_optional("face_edge", &record.face_edge, face_width)?;
    check_optional("face_face", &record.face_face, face_width)?;
    check_optional("edge_face", &record.edge_face, 2 * record.num_edges)?;
    check_optional("edge_x", &record.edge_x, record.num_edges)?;
    check_optional("edge_y", &record.edge_y, record.num_edges)?;
    check_optional("face_x", &record.face_x, record.num_faces)?;
    check_optional("face_y", &record.face_y, record.num_faces)?;
    check_optional("node_z", &record.node_z, record.num_nodes)?;
    check_optional("edge_z", &record.edge_z, record.num_edges)?;
    check_optional("face_z", &record.face_z, record.num_faces)?;
    check_optional("layer_zs", &record.layer_zs, record.num_layers)?;
    check_optional(
        "interface_zs",
        &record.interface_zs,
        record.num_layers.saturating_sub(1),
    )?;
    check_optional(
        "boundary_node_connectivity",
        &record.boundary_node_connectivity,
        2 * record.num_boundary_edges,
    )?;
    check_optional(
        "volume_coordinates",
        &record.volume_coordinates,
        record.num_faces * record.num_layers,
    )
}

fn connectivity(cf_role: &'static str, long_name: &'static str, record: &Mesh2dRecord) -> Attributes {
    vec![
        (CF_ROLE, cf_role.into()),
        ("long_name", long_name.into()),
        ("start_index", record.start_index.into()),
        (FILL_VALUE, record.int_fill_value.into()),
    ]
}

/// Attributes of a vertical coordinate held per location of the mesh
fn elevation(
    topology: &str,
    location: Location,
    coordinates: String,
    long_name: &'static str,
    fill_value: f64,
) -> Attributes {
    vec![
        ("mesh", topology.into()),
        ("location", location.name().into()),
        ("coordinates", coordinates.into()),
        ("standard_name", "altitude".into()),
        ("long_name", long_name.into()),
        ("units", "m".into()),
        (FILL_VALUE, fill_value.into()),
    ]
}

pub(super) fn define(ds: &mut dyn Dataset, record: &Mesh2dRecord) -> error::Result<String> {
    check_record(record)?;
    let n = Names::new(&text::decode_one(&record.name, record.name.len())?);
    let spherical = record.is_spherical != 0;
    let fill = record.double_fill_value;

    ensure_dimension(ds, &n.nodes, record.num_nodes)?;
    ensure_dimension(ds, &n.edges, record.num_edges)?;
    ensure_dimension(ds, &n.faces, record.num_faces)?;
    ensure_dimension(ds, &n.max_face_nodes, record.num_face_nodes_max)?;
    ensure_dimension(ds, &n.layers, record.num_layers)?;
    ensure_dimension(ds, &n.interfaces, record.num_layers.saturating_sub(1))?;
    ensure_dimension(ds, &n.boundary_edges, record.num_boundary_edges)?;

    let mut topology: Attributes = vec![
        (CF_ROLE, MESH_TOPOLOGY.into()),
        ("edge_dimension", n.edges.as_str().into()),
        ("long_name", "Topology data of 2D mesh".into()),
        (
            "node_coordinates",
            format!("{} {}", n.node_x, n.node_y).into(),
        ),
        ("node_dimension", n.nodes.as_str().into()),
        ("topology_dimension", 2.into()),
    ];
    topology.extend(mesh_settings(
        record.start_index,
        record.int_fill_value,
        fill,
        spherical,
    ));

    if record.num_nodes > 0 {
        define_variable(
            ds,
            &n.node_x,
            ValueKind::Double,
            &[n.nodes.as_str()],
            coordinate_attributes('x', spherical, "x-coordinate of mesh nodes"),
        )?;
        define_variable(
            ds,
            &n.node_y,
            ValueKind::Double,
            &[n.nodes.as_str()],
            coordinate_attributes('y', spherical, "y-coordinate of mesh nodes"),
        )?;
        if present(&record.node_z) {
            define_variable(
                ds,
                &n.node_z,
                ValueKind::Double,
                &[n.nodes.as_str()],
                elevation(
                    &n.topology,
                    Location::Node,
                    format!("{} {}", n.node_x, n.node_y),
                    "z-coordinate of mesh nodes",
                    fill,
                ),
            )?;
        }
    }

    if record.num_edges > 0 {
        ensure_dimension(ds, TWO, 2)?;
        define_variable(
            ds,
            &n.edge_nodes,
            ValueKind::Int,
            &[n.edges.as_str(), TWO],
            connectivity(
                "edge_node_connectivity",
                "Start and end nodes of mesh edges",
                record,
            ),
        )?;
        topology.push(("edge_node_connectivity", n.edge_nodes.as_str().into()));
        for (axis, name, values) in [
            ('x', &n.edge_x, &record.edge_x),
            ('y', &n.edge_y, &record.edge_y),
        ] {
            if present(values) {
                let long_name = format!("Characteristic {}-coordinate of the mesh edge", axis);
                define_variable(
                    ds,
                    name,
                    ValueKind::Double,
                    &[n.edges.as_str()],
                    coordinate_attributes(axis, spherical, &long_name),
                )?;
            }
        }
        if present(&record.edge_x) && present(&record.edge_y) {
            topology.push((
                "edge_coordinates",
                format!("{} {}", n.edge_x, n.edge_y).into(),
            ));
        }
        if present(&record.edge_face) {
            define_variable(
                ds,
                &n.edge_faces,
                ValueKind::Int,
                &[n.edges.as_str(), TWO],
                connectivity(
                    "edge_face_connectivity",
                    "Neighboring faces of mesh edges",
                    record,
                ),
            )?;
            topology.push(("edge_face_connectivity", n.edge_faces.as_str().into()));
        }
        if present(&record.edge_z) {
            define_variable(
                ds,
                &n.edge_z,
                ValueKind::Double,
                &[n.edges.as_str()],
                elevation(
                    &n.topology,
                    Location::Edge,
                    format!("{} {}", n.edge_x, n.edge_y),
                    "z-coordinate of mesh edges",
                    fill,
                ),
            )?;
        }
    }

    if record.num_faces > 0 {
        topology.push(("face_dimension", n.faces.as_str().into()));
        let face_nodes = [n.faces.as_str(), n.max_face_nodes.as_str()];
        if present(&record.face_node) {
            define_variable(
                ds,
                &n.face_nodes,
                ValueKind::Int,
                &face_nodes,
                connectivity(
                    "face_node_connectivity",
                    "Vertex nodes of mesh faces (counterclockwise)",
                    record,
                ),
            )?;
            topology.push(("face_node_connectivity", n.face_nodes.as_str().into()));
            topology.push(("max_face_nodes_dimension", n.max_face_nodes.as_str().into()));
        }
        if present(&record.face_edge) {
            define_variable(
                ds,
                &n.face_edges,
                ValueKind::Int,
                &face_nodes,
                connectivity("face_edge_connectivity", "Side edges of mesh faces", record),
            )?;
            topology.push(("face_edge_connectivity", n.face_edges.as_str().into()));
        }
        if present(&record.face_face) {
            define_variable(
                ds,
                &n.face_links,
                ValueKind::Int,
                &face_nodes,
                connectivity(
                    "face_face_connectivity",
                    "Neighboring faces of mesh faces",
                    record,
                ),
            )?;
            topology.push(("face_face_connectivity", n.face_links.as_str().into()));
        }
        for (axis, name, values) in [
            ('x', &n.face_x, &record.face_x),
            ('y', &n.face_y, &record.face_y),
        ] {
            if present(values) {
                let long_name = format!("Characteristic {}-coordinate of mesh face", axis);
                define_variable(
                    ds,
                    name,
                    ValueKind::Double,
                    &[n.faces.as_str()],
                    coordinate_attributes(axis, spherical, &long_name),
                )?;
            }
        }
        if present(&record.face_x) && present(&record.face_y) {
            topology.push((
                "face_coordinates",
                format!("{} {}", n.face_x, n.face_y).into(),
            ));
        }
        if present(&record.face_z) {
            define_variable(
                ds,
                &n.face_z,
                ValueKind::Double,
                &[n.faces.as_str()],
                elevation(
                    &n.topology,
                    Location::Face,
                    format!("{} {}", n.face_x, n.face_y),
                    "z-coordinate of mesh faces",
                    fill,
                ),
            )?;
        }
    }

    if record.num_layers > 0 {
        topology.push(("layer_dimension", n.layers.as_str().into()));
        if present(&record.layer_zs) {
            define_variable(
                ds,
                &n.layer_z,
                ValueKind::Double,
                &[n.layers.as_str()],
                vec![
                    ("long_name", "Vertical coordinate of layer centres".into()),
                    ("positive", "up".into()),
                    ("units", "m".into()),
                ],
            )?;
            topology.push(("layer_coordinates", n.layer_z.as_str().into()));
        }
        if record.num_layers > 1 {
            topology.push(("interface_dimension", n.interfaces.as_str().into()));
            if present(&record.interface_zs) {
                define_variable(
                    ds,
                    &n.interface_z,
                    ValueKind::Double,
                    &[n.interfaces.as_str()],
                    vec![
                        ("long_name", "Vertical coordinate of layer interfaces".into()),
                        ("positive", "up".into()),
                        ("units", "m".into()),
                    ],
                )?;
                topology.push(("interface_coordinates", n.interface_z.as_str().into()));
            }
        }
        if record.num_faces > 0 && present(&record.volume_coordinates) {
            define_variable(
                ds,
                &n.volume_z,
                ValueKind::Double,
                &[n.faces.as_str(), n.layers.as_str()],
                elevation(
                    &n.topology,
                    Location::Face,
                    format!("{} {}", n.face_x, n.face_y),
                    "z-coordinate of mesh volumes",
                    fill,
                ),
            )?;
        }
    }

    if record.num_boundary_edges > 0 && present(&record.boundary_node_connectivity) {
        ensure_dimension(ds, TWO, 2)?;
        define_variable(
            ds,
            &n.boundary_nodes,
            ValueKind::Int,
            &[n.boundary_edges.as_str(), TWO],
            connectivity(
                "boundary_node_connectivity",
                "Start and end nodes of mesh boundary edges",
                record,
            ),
        )?;
        topology.push(("boundary_node_connectivity", n.boundary_nodes.as_str().into()));
    }

    define_variable(ds, &n.topology, ValueKind::Int, &[], topology)?;
    Ok(n.topology)
}

pub(super) fn put(ds: &mut dyn Dataset, topology: &str, record: &Mesh2dRecord) -> error::Result<()> {
    check_record(record)?;
    let n = Names::new(topology);
    put_doubles(ds, &n.node_x, &record.node_x)?;
    put_doubles(ds, &n.node_y, &record.node_y)?;
    put_ints(ds, &n.edge_nodes, &record.edge_node)?;
    put_optional_ints(ds, &n.face_nodes, record.face_node.as_ref())?;
    put_optional_ints(ds, &n.face_edges, record.face_edge.as_ref())?;
    put_optional_ints(ds, &n.face_links, record.face_face.as_ref())?;
    put_optional_ints(ds, &n.edge_faces, record.edge_face.as_ref())?;
    put_optional_doubles(ds, &n.edge_x, record.edge_x.as_ref())?;
    put_optional_doubles(ds, &n.edge_y, record.edge_y.as_ref())?;
    put_optional_doubles(ds, &n.face_x, record.face_x.as_ref())?;
    put_optional_doubles(ds, &n.face_y, record.face_y.as_ref())?;
    put_optional_doubles(ds, &n.node_z, record.node_z.as_ref())?;
    put_optional_doubles(ds, &n.edge_z, record.edge_z.as_ref())?;
    put_optional_doubles(ds, &n.face_z, record.face_z.as_ref())?;
    put_optional_doubles(ds, &n.layer_z, record.layer_zs.as_ref())?;
    if record.num_layers > 1 {
        put_optional_doubles(ds, &n.interface_z, record.interface_zs.as_ref())?;
    }
    put_optional_ints(
        ds,
        &n.boundary_nodes,
        record.boundary_node_connectivity.as_ref(),
    )?;
    put_optional_doubles(ds, &n.volume_z, record.volume_coordinates.as_ref())
}

pub(super) fn inquire(ds: &dyn Dataset, topology: &str) -> Mesh2dDimensions {
    let n = Names::new(topology);
    Mesh2dDimensions {
        num_nodes: dimension_or_zero(ds, &n.nodes),
        num_edges: dimension_or_zero(ds, &n.edges),
        num_faces: dimension_or_zero(ds, &n.faces),
        num_face_nodes_max: dimension_or_zero(ds, &n.max_face_nodes),
        num_layers: dimension_or_zero(ds, &n.layers),
        num_boundary_edges: dimension_or_zero(ds, &n.boundary_edges),
    }
}

pub(super) fn get(ds: &dyn Dataset, topology: &str, record: &mut Mesh2dRecord) -> error::Result<()> {
    let n = Names::new(topology);
    let width = record.name.len();
    copy_into("name", &mut record.name, &text::encode_one(topology, width))?;
    fill_doubles(ds, &n.node_x, &mut record.node_x)?;
    fill_doubles(ds, &n.node_y, &mut record.node_y)?;
    fill_ints(ds, &n.edge_nodes, &mut record.edge_node)?;
    fill_optional_ints(ds, &n.face_nodes, &mut record.face_node)?;
    fill_optional_ints(ds, &n.face_edges, &mut record.face_edge)?;
    fill_optional_ints(ds, &n.face_links, &mut record.face_face)?;
    fill_optional_ints(ds, &n.edge_faces, &mut record.edge_face)?;
    fill_optional_doubles(ds, &n.edge_x, &mut record.edge_x)?;
    fill_optional_doubles(ds, &n.edge_y, &mut record.edge_y)?;
    fill_optional_doubles(ds, &n.face_x, &mut record.face_x)?;
    fill_optional_doubles(ds, &n.face_y, &mut record.face_y)?;
    fill_optional_doubles(ds, &n.node_z, &mut record.node_z)?;
    fill_optional_doubles(ds, &n.edge_z, &mut record.edge_z)?;
    fill_optional_doubles(ds, &n.face_z, &mut record.face_z)?;
    fill_optional_doubles(ds, &n.layer_z, &mut record.layer_zs)?;
    if record.num_layers > 1 {
        fill_optional_doubles(ds, &n.interface_z, &mut record.interface_zs)?;
    } else {
        record.interface_zs = None;
    }
    fill_optional_ints(
        ds,
        &n.boundary_nodes,
        &mut record.boundary_node_connectivity,
    )?;
    fill_optional_doubles(ds, &n.volume_z, &mut record.volume_coordinates)?;

    let indexed = n.indexed();
    record.start_index = int_attribute(ds, Some(topology), START_INDEX)
        .or_else(|| first_int_attribute(ds, &indexed, START_INDEX))
        .unwrap_or(0);
    if let Some(fill) = int_attribute(ds, Some(topology), INT_FILL_VALUE)
        .or_else(|| first_int_attribute(ds, &indexed, FILL_VALUE))
    {
        record.int_fill_value = fill;
    }
    let elevations = [
        n.node_z.clone(),
        n.edge_z.clone(),
        n.face_z.clone(),
        n.volume_z.clone(),
    ];
    if let Some(fill) = double_attribute(ds, Some(topology), DOUBLE_FILL_VALUE)
        .or_else(|| first_double_attribute(ds, &elevations, FILL_VALUE))
    {
        record.double_fill_value = fill;
    }
    let spherical = match int_attribute(ds, Some(topology), IS_SPHERICAL) {
        Some(flag) => flag != 0,
        None => is_spherical(ds, &n.node_x),
    };
    record.is_spherical = i32::from(spherical);
    Ok(())
}
