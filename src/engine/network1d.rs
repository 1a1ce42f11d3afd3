//! Network topology variables
//!
//! A network `N` is written as the topology variable `N`, the dimensions
//! `N_nNodes`, `N_nEdges` and `N_nGeometryNodes`, and a `N_geometry`
//! container describing the branch polylines.

use super::convention::*;
use crate::dataset::{Dataset, ValueKind};
use crate::error::{self, expect_len};
use crate::text::{self, NameWidths};
use crate::topology::{Network1dDimensions, Network1dRecord};

struct Names {
    topology: String,
    nodes: String,
    edges: String,
    geometry_nodes: String,
    node_x: String,
    node_y: String,
    node_id: String,
    node_long_name: String,
    edge_nodes: String,
    edge_length: String,
    branch_order: String,
    branch_id: String,
    branch_long_name: String,
    geometry: String,
    geometry_node_count: String,
    geometry_x: String,
    geometry_y: String,
}

impl Names {
    fn new(topology: &str) -> Self {
        let name = |suffix: &str| format!("{}_{}", topology, suffix);
        Self {
            topology: topology.to_string(),
            nodes: name("nNodes"),
            edges: name("nEdges"),
            geometry_nodes: name("nGeometryNodes"),
            node_x: name("node_x"),
            node_y: name("node_y"),
            node_id: name("node_id"),
            node_long_name: name("node_long_name"),
            edge_nodes: name("edge_nodes"),
            edge_length: name("edge_length"),
            branch_order: name("branch_order"),
            branch_id: name("branch_id"),
            branch_long_name: name("branch_long_name"),
            geometry: name("geometry"),
            geometry_node_count: name("geom_node_count"),
            geometry_x: name("geom_x"),
            geometry_y: name("geom_y"),
        }
    }
}

fn check_record(record: &Network1dRecord) -> error::Result<()> {
    expect_len("node_x", record.node_x.len(), record.num_nodes)?;
    expect_len("node_y", record.node_y.len(), record.num_nodes)?;
    expect_len("edge_node", record.edge_node.len(), 2 * record.num_edges)?;
    expect_len("edge_length", record.edge_length.len(), record.num_edges)?;
    expect_len(
        "num_edge_geometry_nodes",
        record.num_edge_geometry_nodes.len(),
        record.num_edges,
    )?;
    expect_len(
        "geometry_nodes_x",
        record.geometry_nodes_x.len(),
        record.num_geometry_nodes,
    )?;
    expect_len(
        "geometry_nodes_y",
        record.geometry_nodes_y.len(),
        record.num_geometry_nodes,
    )
}

pub(super) fn define(
    ds: &mut dyn Dataset,
    widths: NameWidths,
    record: &Network1dRecord,
) -> error::Result<String> {
    check_record(record)?;
    let n = Names::new(&record_name(&record.name)?);
    let spherical = record.is_spherical != 0;

    ensure_dimension(ds, &n.nodes, record.num_nodes)?;
    ensure_dimension(ds, &n.edges, record.num_edges)?;
    ensure_dimension(ds, &n.geometry_nodes, record.num_geometry_nodes)?;

    let mut topology: Attributes = vec![
        (CF_ROLE, MESH_TOPOLOGY.into()),
        ("long_name", "Topology data of 1D network".into()),
        ("topology_dimension", 1.into()),
        (
            "node_coordinates",
            format!("{} {}", n.node_x, n.node_y).into(),
        ),
        ("node_dimension", n.nodes.as_str().into()),
        ("edge_dimension", n.edges.as_str().into()),
        ("edge_geometry", n.geometry.as_str().into()),
    ];

    if record.num_nodes > 0 {
        define_variable(
            ds,
            &n.node_x,
            ValueKind::Double,
            &[n.nodes.as_str()],
            coordinate_attributes('x', spherical, "x-coordinate of network nodes"),
        )?;
        define_variable(
            ds,
            &n.node_y,
            ValueKind::Double,
            &[n.nodes.as_str()],
            coordinate_attributes('y', spherical, "y-coordinate of network nodes"),
        )?;
        if record.node_id.is_some() {
            ensure_text_dimension(ds, STR_LENGTH_IDS, widths.name)?;
            define_names(ds, &n.node_id, &n.nodes, STR_LENGTH_IDS, "ID of network nodes")?;
            topology.push(("node_id", n.node_id.as_str().into()));
        }
        if record.node_long_name.is_some() {
            ensure_text_dimension(ds, STR_LENGTH_LONG_NAMES, widths.long_name)?;
            define_names(
                ds,
                &n.node_long_name,
                &n.nodes,
                STR_LENGTH_LONG_NAMES,
                "Long name of network nodes",
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
                ("long_name", "Start and end nodes of network edges".into()),
                ("start_index", record.start_index.into()),
            ],
        )?;
        topology.push(("edge_node_connectivity", n.edge_nodes.as_str().into()));
        define_variable(
            ds,
            &n.edge_length,
            ValueKind::Double,
            &[n.edges.as_str()],
            vec![
                ("long_name", "Real length of branch geometries".into()),
                ("units", "m".into()),
            ],
        )?;
        topology.push(("edge_length", n.edge_length.as_str().into()));
        if record.edge_order.is_some() {
            define_variable(
                ds,
                &n.branch_order,
                ValueKind::Int,
                &[n.edges.as_str()],
                vec![("long_name", "Order of branches for interpolation".into())],
            )?;
            topology.push(("branch_order", n.branch_order.as_str().into()));
        }
        if record.edge_id.is_some() {
            ensure_text_dimension(ds, STR_LENGTH_IDS, widths.name)?;
            define_names(ds, &n.branch_id, &n.edges, STR_LENGTH_IDS, "ID of branch geometries")?;
            topology.push(("branch_id", n.branch_id.as_str().into()));
        }
        if record.edge_long_name.is_some() {
            ensure_text_dimension(ds, STR_LENGTH_LONG_NAMES, widths.long_name)?;
            define_names(
                ds,
                &n.branch_long_name,
                &n.edges,
                STR_LENGTH_LONG_NAMES,
                "Long name of branch geometries",
            )?;
            topology.push(("branch_long_name", n.branch_long_name.as_str().into()));
        }
        define_variable(
            ds,
            &n.geometry_node_count,
            ValueKind::Int,
            &[n.edges.as_str()],
            vec![("long_name", "Number of geometry nodes per branch".into())],
        )?;
    }

    let mut geometry: Attributes = vec![
        ("geometry_type", "line".into()),
        ("long_name", "1D Geometry".into()),
        ("node_count", n.geometry_node_count.as_str().into()),
    ];
    if record.num_geometry_nodes > 0 {
        define_variable(
            ds,
            &n.geometry_x,
            ValueKind::Double,
            &[n.geometry_nodes.as_str()],
            coordinate_attributes('x', spherical, "x-coordinate of branch geometry nodes"),
        )?;
        define_variable(
            ds,
            &n.geometry_y,
            ValueKind::Double,
            &[n.geometry_nodes.as_str()],
            coordinate_attributes('y', spherical, "y-coordinate of branch geometry nodes"),
        )?;
        geometry.push((
            "node_coordinates",
            format!("{} {}", n.geometry_x, n.geometry_y).into(),
        ));
    }
    define_variable(ds, &n.geometry, ValueKind::Int, &[], geometry)?;
    define_variable(ds, &n.topology, ValueKind::Int, &[], topology)?;
    Ok(n.topology)
}

pub(super) fn put(ds: &mut dyn Dataset, topology: &str, record: &Network1dRecord) -> error::Result<()> {
    check_record(record)?;
    let n = Names::new(topology);
    put_doubles(ds, &n.node_x, &record.node_x)?;
    put_doubles(ds, &n.node_y, &record.node_y)?;
    put_optional_names(ds, &n.node_id, record.node_id.as_ref(), record.num_nodes)?;
    put_optional_names(
        ds,
        &n.node_long_name,
        record.node_long_name.as_ref(),
        record.num_nodes,
    )?;
    put_ints(ds, &n.edge_nodes, &record.edge_node)?;
    put_doubles(ds, &n.edge_length, &record.edge_length)?;
    put_optional_ints(ds, &n.branch_order, record.edge_order.as_ref())?;
    put_optional_names(ds, &n.branch_id, record.edge_id.as_ref(), record.num_edges)?;
    put_optional_names(
        ds,
        &n.branch_long_name,
        record.edge_long_name.as_ref(),
        record.num_edges,
    )?;
    put_ints(ds, &n.geometry_node_count, &record.num_edge_geometry_nodes)?;
    put_doubles(ds, &n.geometry_x, &record.geometry_nodes_x)?;
    put_doubles(ds, &n.geometry_y, &record.geometry_nodes_y)
}

pub(super) fn inquire(ds: &dyn Dataset, topology: &str) -> Network1dDimensions {
    let n = Names::new(topology);
    Network1dDimensions {
        num_nodes: dimension_or_zero(ds, &n.nodes),
        num_edges: dimension_or_zero(ds, &n.edges),
        num_geometry_nodes: dimension_or_zero(ds, &n.geometry_nodes),
    }
}

pub(super) fn get(ds: &dyn Dataset, topology: &str, record: &mut Network1dRecord) -> error::Result<()> {
    let n = Names::new(topology);
    let width = record.name.len();
    copy_into("name", &mut record.name, &text::encode_one(topology, width))?;
    fill_doubles(ds, &n.node_x, &mut record.node_x)?;
    fill_doubles(ds, &n.node_y, &mut record.node_y)?;
    fill_names(ds, &n.node_id, &mut record.node_id, record.num_nodes)?;
    fill_names(ds, &n.node_long_name, &mut record.node_long_name, record.num_nodes)?;
    fill_ints(ds, &n.edge_nodes, &mut record.edge_node)?;
    fill_doubles(ds, &n.edge_length, &mut record.edge_length)?;
    fill_optional_ints(ds, &n.branch_order, &mut record.edge_order)?;
    fill_names(ds, &n.branch_id, &mut record.edge_id, record.num_edges)?;
    fill_names(
        ds,
        &n.branch_long_name,
        &mut record.edge_long_name,
        record.num_edges,
    )?;
    fill_ints(ds, &n.geometry_node_count, &mut record.num_edge_geometry_nodes)?;
    fill_doubles(ds, &n.geometry_x, &mut record.geometry_nodes_x)?;
    fill_doubles(ds, &n.geometry_y, &mut record.geometry_nodes_y)?;
    record.start_index = int_attribute(ds, Some(&n.edge_nodes), "start_index").unwrap_or(0);
    record.is_spherical = i32::from(is_spherical(ds, &n.node_x));
    Ok(())
}

/// Networks are the only one dimensional topologies with branch geometry
pub(super) fn is_network(ds: &dyn Dataset, variable: &str) -> bool {
    str_attribute(ds, Some(variable), "edge_geometry").is_some()
}
