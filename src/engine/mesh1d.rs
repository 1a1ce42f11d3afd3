//! Mesh1d topology variables
//!
//! Nodes of a mesh `M` are located by the branch and offset variables
//! `M_node_branch` and `M_node_offset`; the network they refer to is named by
//! the `coordinate_space` attribute of `M`.

use super::convention::*;
use crate::dataset::{Dataset, ValueKind};
use crate::error::{self, expect_len};
use crate::text::{self, NameWidths};
use crate::topology::{Mesh1dDimensions, Mesh1dRecord};

struct Names {
    topology: String,
    nodes: String,
    edges: String,
    node_branch: String,
    node_offset: String,
    node_x: String,
    node_y: String,
    node_id: String,
    node_long_name: String,
    edge_nodes: String,
    edge_branch: String,
    edge_offset: String,
    edge_x: String,
    edge_y: String,
}

impl Names {
    fn new(topology: &str) -> Self {
        let name = |suffix: &str| format!("{}_{}", topology, suffix);
        Self {
            topology: topology.to_string(),
            nodes: name("nNodes"),
            edges: name("nEdges"),
            node_branch: name("node_branch"),
            node_offset: name("node_offset"),
            node_x: name("node_x"),
            node_y: name("node_y"),
            node_id: name("node_id"),
            node_long_name: name("node_long_name"),
            edge_nodes: name("edge_nodes"),
            edge_branch: name("edge_branch"),
            edge_offset: name("edge_offset"),
            edge_x: name("edge_x"),
            edge_y: name("edge_y"),
        }
    }
}

fn check_optional<T>(what: &str, values: &Option<Vec<T>>, wanted: usize) -> error::Result<()> {
    match values {
        Some(values) if !values.is_empty() => expect_len(what, values.len(), wanted),
        _ => Ok(()),
    }
}

fn check_record(record: &Mesh1dRecord) -> error::Result<()> {
    expect_len("node_edge_id", record.node_edge_id.len(), record.num_nodes)?;
    expect_len(
        "node_edge_offset",
        record.node_edge_offset.len(),
        record.num_nodes,
    )?;
    expect_len("edge_node", record.edge_node.len(), 2 * record.num_edges)?;
    check_optional("node_x", &record.node_x, record.num_nodes)?;
    check_optional("node_y", &record.node_y, record.num_nodes)?;
    check_optional("edge_edge_id", &record.edge_edge_id, record.num_edges)?;
    check_optional("edge_edge_offset", &record.edge_edge_offset, record.num_edges)?;
    check_optional("edge_x", &record.edge_x, record.num_edges)?;
    check_optional("edge_y", &record.edge_y, record.num_edges)
}

fn present<T>(values: &Option<Vec<T>>) -> bool {
    values.as_ref().map_or(false, |v| !v.is_empty())
}

/// Name of the network a mesh1d lies on
pub(super) fn network_name(ds: &dyn Dataset, topology: &str) -> Option<String> {
    str_attribute(ds, Some(topology), "coordinate_space")
}

pub(super) fn define(
    ds: &mut dyn Dataset,
    widths: NameWidths,
    record: &Mesh1dRecord,
) -> error::Result<String> {
    check_record(record)?;
    let n = Names::new(&record_name(&record.name)?);
    let network = record_name(&record.network_name)?;
    let spherical = record.is_spherical != 0;

    ensure_dimension(ds, &n.nodes, record.num_nodes)?;
    ensure_dimension(ds, &n.edges, record.num_edges)?;

    let mut topology: Attributes = vec![
        (CF_ROLE, MESH_TOPOLOGY.into()),
        ("long_name", "Topology data of 1D mesh".into()),
        ("topology_dimension", 1.into()),
        ("coordinate_space", network.into()),
        ("node_dimension", n.nodes.as_str().into()),
        ("edge_dimension", n.edges.as_str().into()),
        (
            "node_coordinates",
            format!("{} {}", n.node_branch, n.node_offset).into(),
        ),
    ];
    topology.extend(mesh_settings(
        record.start_index,
        record.int_fill_value,
        record.double_fill_value,
        spherical,
    ));

    if record.num_nodes > 0 {
        define_variable(
            ds,
            &n.node_branch,
            ValueKind::Int,
            &[n.nodes.as_str()],
            vec![
                ("long_name", "Index of branch on which mesh nodes are located".into()),
                ("start_index", record.start_index.into()),
                (FILL_VALUE, record.int_fill_value.into()),
            ],
        )?;
        define_variable(
            ds,
            &n.node_offset,
            ValueKind::Double,
            &[n.nodes.as_str()],
            vec![
                ("long_name", "Offset along branch of mesh nodes".into()),
                ("units", "m".into()),
                (FILL_VALUE, record.double_fill_value.into()),
            ],
        )?;
        if present(&record.node_x) {
            define_variable(
                ds,
                &n.node_x,
                ValueKind::Double,
                &[n.nodes.as_str()],
                coordinate_attributes('x', spherical, "x-coordinate of mesh nodes"),
            )?;
        }
        if present(&record.node_y) {
            define_variable(
                ds,
                &n.node_y,
                ValueKind::Double,
                &[n.nodes.as_str()],
                coordinate_attributes('y', spherical, "y-coordinate of mesh nodes"),
            )?;
        }
        if record.node_id.is_some() {
            ensure_text_dimension(ds, STR_LENGTH_IDS, widths.name)?;
            define_names(ds, &n.node_id, &n.nodes, STR_LENGTH_IDS, "ID of mesh nodes")?;
            topology.push(("node_id", n.node_id.as_str().into()));
        }
        if record.node_long_name.is_some() {
            ensure_text_dimension(ds, STR_LENGTH_LONG_NAMES, widths.long_name)?;
            define_names(
                ds,
                &n.node_long_name,
                &n.nodes,
                STR_LENGTH_LONG_NAMES,
                "Long name of mesh nodes",
            )?;
            topology.push(("node_long_name", n.node_long_name.as_str().into()));
        }
    }

    if record.num_edges > 0 {
        ensure_dimension(ds, TWO, 2)?;
        define_variable(
            ds,
            &n.edge_nodes,
            ValueKind::Int,
            &[n.edges.as_str(), TWO],
            vec![
                (CF_ROLE, "edge_node_connectivity".into()),
                ("long_name", "Start and end nodes of mesh edges".into()),
                ("start_index", record.start_index.into()),
            ],
        )?;
        topology.push(("edge_node_connectivity", n.edge_nodes.as_str().into()));

        let mut edge_coordinates = Vec::new();
        if present(&record.edge_edge_id) {
            define_variable(
                ds,
                &n.edge_branch,
                ValueKind::Int,
                &[n.edges.as_str()],
                vec![
                    ("long_name", "Index of branch on which mesh edges are located".into()),
                    ("start_index", record.start_index.into()),
                    (FILL_VALUE, record.int_fill_value.into()),
                ],
            )?;
            edge_coordinates.push(n.edge_branch.as_str());
        }
        if present(&record.edge_edge_offset) {
            define_variable(
                ds,
                &n.edge_offset,
                ValueKind::Double,
                &[n.edges.as_str()],
                vec![
                    ("long_name", "Offset along branch of mesh edges".into()),
                    ("units", "m".into()),
                    (FILL_VALUE, record.double_fill_value.into()),
                ],
            )?;
            edge_coordinates.push(n.edge_offset.as_str());
        }
        if present(&record.edge_x) {
            define_variable(
                ds,
                &n.edge_x,
                ValueKind::Double,
                &[n.edges.as_str()],
                coordinate_attributes('x', spherical, "Characteristic x-coordinate of the mesh edge"),
            )?;
            edge_coordinates.push(n.edge_x.as_str());
        }
        if present(&record.edge_y) {
            define_variable(
                ds,
                &n.edge_y,
                ValueKind::Double,
                &[n.edges.as_str()],
                coordinate_attributes('y', spherical, "Characteristic y-coordinate of the mesh edge"),
            )?;
            edge_coordinates.push(n.edge_y.as_str());
        }
        if !edge_coordinates.is_empty() {
            topology.push(("edge_coordinates", edge_coordinates.join(" ").into()));
        }
    }

    define_variable(ds, &n.topology, ValueKind::Int, &[], topology)?;
    Ok(n.topology)
}

pub(super) fn put(ds: &mut dyn Dataset, topology: &str, record: &Mesh1dRecord) -> error::Result<()> {
    check_record(record)?;
    let n = Names::new(topology);
    put_ints(ds, &n.node_branch, &record.node_edge_id)?;
    put_doubles(ds, &n.node_offset, &record.node_edge_offset)?;
    put_optional_doubles(ds, &n.node_x, record.node_x.as_ref())?;
    put_optional_doubles(ds, &n.node_y, record.node_y.as_ref())?;
    put_optional_names(ds, &n.node_id, record.node_id.as_ref(), record.num_nodes)?;
    put_optional_names(
        ds,
        &n.node_long_name,
        record.node_long_name.as_ref(),
        record.num_nodes,
    )?;
    put_ints(ds, &n.edge_nodes, &record.edge_node)?;
    put_optional_ints(ds, &n.edge_branch, record.edge_edge_id.as_ref())?;
    put_optional_doubles(ds, &n.edge_offset, record.edge_edge_offset.as_ref())?;
    put_optional_doubles(ds, &n.edge_x, record.edge_x.as_ref())?;
    put_optional_doubles(ds, &n.edge_y, record.edge_y.as_ref())
}

pub(super) fn inquire(ds: &dyn Dataset, topology: &str) -> Mesh1dDimensions {
    let n = Names::new(topology);
    Mesh1dDimensions {
        num_nodes: dimension_or_zero(ds, &n.nodes),
        num_edges: dimension_or_zero(ds, &n.edges),
    }
}

pub(super) fn get(ds: &dyn Dataset, topology: &str, record: &mut Mesh1dRecord) -> error::Result<()> {
    let n = Names::new(topology);
    let network = network_name(ds, topology).unwrap_or_default();
    let width = record.name.len();
    copy_into("name", &mut record.name, &text::encode_one(topology, width))?;
    let width = record.network_name.len();
    copy_into(
        "network_name",
        &mut record.network_name,
        &text::encode_one(&network, width),
    )?;

    fill_ints(ds, &n.node_branch, &mut record.node_edge_id)?;
    fill_doubles(ds, &n.node_offset, &mut record.node_edge_offset)?;
    fill_optional_doubles(ds, &n.node_x, &mut record.node_x)?;
    fill_optional_doubles(ds, &n.node_y, &mut record.node_y)?;
    fill_names(ds, &n.node_id, &mut record.node_id, record.num_nodes)?;
    fill_names(ds, &n.node_long_name, &mut record.node_long_name, record.num_nodes)?;
    fill_ints(ds, &n.edge_nodes, &mut record.edge_node)?;
    fill_optional_ints(ds, &n.edge_branch, &mut record.edge_edge_id)?;
    fill_optional_doubles(ds, &n.edge_offset, &mut record.edge_edge_offset)?;
    fill_optional_doubles(ds, &n.edge_x, &mut record.edge_x)?;
    fill_optional_doubles(ds, &n.edge_y, &mut record.edge_y)?;

    let indexed = [n.edge_nodes.clone(), n.node_branch.clone(), n.edge_branch.clone()];
    record.start_index = int_attribute(ds, Some(topology), START_INDEX)
        .or_else(|| first_int_attribute(ds, &indexed, START_INDEX))
        .unwrap_or(0);
    if let Some(fill) = int_attribute(ds, Some(topology), INT_FILL_VALUE)
        .or_else(|| first_int_attribute(ds, &indexed[1..], FILL_VALUE))
    {
        record.int_fill_value = fill;
    }
    let offsets = [n.node_offset.clone(), n.edge_offset.clone()];
    if let Some(fill) = double_attribute(ds, Some(topology), DOUBLE_FILL_VALUE)
        .or_else(|| first_double_attribute(ds, &offsets, FILL_VALUE))
    {
        record.double_fill_value = fill;
    }
    let spherical = match int_attribute(ds, Some(topology), IS_SPHERICAL) {
        Some(flag) => flag != 0,
        None if ds.has_variable(&n.node_x) => is_spherical(ds, &n.node_x),
        None => is_spherical(ds, &format!("{}_node_x", network)),
    };
    record.is_spherical = i32::from(spherical);
    Ok(())
}
