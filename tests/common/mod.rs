#![allow(dead_code)]

use ugrid::{Contacts, Location, Mesh1d, Mesh2d, Network1d};

pub(crate) const NETWORK: &str = "network1d";
pub(crate) const MESH1D: &str = "mesh1d";
pub(crate) const MESH2D: &str = "mesh2d";
pub(crate) const CONTACTS: &str = "contacts";

/// Evenly spaced values from `start` to `end`, both included
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| start + (end - start) * i as f64 / (n - 1) as f64)
        .collect()
}

/// A single straight branch, with 25 vertices along it
pub(crate) fn network() -> Network1d {
    Network1d {
        name: NETWORK.into(),
        node_x: vec![293.78, 538.89],
        node_y: vec![27.48, 956.75],
        node_id: vec!["nodesids".into(), "nodesids".into()],
        node_long_name: vec!["nodeslongNames".into(), "nodeslongNames".into()],
        edge_node: vec![0, 1],
        edge_length: vec![1165.29],
        edge_order: Some(vec![1]),
        edge_id: vec!["branchids".into()],
        edge_long_name: vec!["branchlongNames".into()],
        geometry_nodes_x: linspace(293.78, 538.89, 25),
        geometry_nodes_y: linspace(27.48, 956.75, 25),
        num_edge_geometry_nodes: vec![25],
        ..Default::default()
    }
}

/// Five nodes spread over the branch of [`network`]
pub(crate) fn mesh1d() -> Mesh1d {
    let offsets = linspace(0.0, 1165.29, 5);
    let edge_offsets = offsets.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect();
    Mesh1d {
        name: MESH1D.into(),
        network_name: NETWORK.into(),
        node_edge_id: vec![0; 5],
        node_edge_offset: offsets,
        node_id: (0..5).map(|i| format!("meshnode{}", i)).collect(),
        node_long_name: (0..5).map(|i| format!("mesh node {}", i)).collect(),
        edge_node: vec![0, 1, 1, 2, 2, 3, 3, 4],
        edge_edge_id: Some(vec![0; 4]),
        edge_edge_offset: Some(edge_offsets),
        ..Default::default()
    }
}

/// A 4 by 4 grid of nodes, 24 edges and 9 quadrilateral faces
pub(crate) fn mesh2d() -> Mesh2d {
    let node = |i: usize, j: usize| (j * 4 + i) as i32;
    let mut edge_node = Vec::new();
    for j in 0..4 {
        for i in 0..3 {
            edge_node.extend([node(i, j), node(i + 1, j)]);
        }
    }
    for j in 0..3 {
        for i in 0..4 {
            edge_node.extend([node(i, j), node(i, j + 1)]);
        }
    }
    let mut face_node = Vec::new();
    let mut face_x = Vec::new();
    let mut face_y = Vec::new();
    for j in 0..3 {
        for i in 0..3 {
            face_node.extend([node(i, j), node(i + 1, j), node(i + 1, j + 1), node(i, j + 1)]);
            face_x.push(i as f64 + 0.5);
            face_y.push(j as f64 + 0.5);
        }
    }
    Mesh2d {
        name: MESH2D.into(),
        node_x: (0..16).map(|n| (n % 4) as f64).collect(),
        node_y: (0..16).map(|n| (n / 4) as f64).collect(),
        edge_node,
        face_node: Some(face_node),
        face_x: Some(face_x),
        face_y: Some(face_y),
        num_face_nodes_max: 4,
        ..Default::default()
    }
}

/// 23 links from the faces of [`mesh2d`] to the nodes of [`mesh1d`]
pub(crate) fn contacts() -> Contacts {
    Contacts {
        name: CONTACTS.into(),
        mesh_from_name: MESH2D.into(),
        mesh_to_name: MESH1D.into(),
        mesh_from_location: Location::Face,
        mesh_to_location: Location::Node,
        edges: (0..23).flat_map(|k| [k % 9, k % 5]).collect(),
        contact_type: Some(vec![3; 23]),
        contact_id: (0..23).map(|k| format!("link{}", k)).collect(),
        contact_long_name: (0..23).map(|k| format!("link number {}", k)).collect(),
    }
}
