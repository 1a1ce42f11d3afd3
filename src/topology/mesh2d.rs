use super::{check_indices, check_start_index, Encoding, Topology};
use crate::error::{self, expect_len};
use crate::store::{FileId, Status, Store};
use crate::text;
use crate::types::TopologyKind;

/// A 2D unstructured mesh, optionally extruded into layers
///
/// Arrays left at `None` are not written. Faces with fewer than
/// `num_face_nodes_max` nodes pad `face_node` with `int_fill_value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh2d {
    pub name: String,
    pub node_x: Vec<f64>,
    pub node_y: Vec<f64>,
    pub edge_node: Vec<i32>,
    pub face_node: Option<Vec<i32>>,
    pub edge_x: Option<Vec<f64>>,
    pub edge_y: Option<Vec<f64>>,
    pub face_x: Option<Vec<f64>>,
    pub face_y: Option<Vec<f64>>,
    /// Pair of faces next to every edge
    pub edge_face: Option<Vec<i32>>,
    pub face_edge: Option<Vec<i32>>,
    pub face_face: Option<Vec<i32>>,
    pub node_z: Option<Vec<f64>>,
    pub edge_z: Option<Vec<f64>>,
    pub face_z: Option<Vec<f64>>,
    /// One value per layer
    pub layer_zs: Option<Vec<f64>>,
    /// One value per interior layer interface, only with more than one layer
    pub interface_zs: Option<Vec<f64>>,
    /// Pair of nodes per boundary edge
    pub boundary_node_connectivity: Option<Vec<i32>>,
    /// One value per face and layer, face major
    pub volume_coordinates: Option<Vec<f64>>,
    pub start_index: i32,
    pub num_face_nodes_max: usize,
    pub num_layers: usize,
    pub is_spherical: bool,
    pub double_fill_value: f64,
    pub int_fill_value: i32,
}

impl Default for Mesh2d {
    fn default() -> Self {
        Self {
            name: String::new(),
            node_x: Vec::new(),
            node_y: Vec::new(),
            edge_node: Vec::new(),
            face_node: None,
            edge_x: None,
            edge_y: None,
            face_x: None,
            face_y: None,
            edge_face: None,
            face_edge: None,
            face_face: None,
            node_z: None,
            edge_z: None,
            face_z: None,
            layer_zs: None,
            interface_zs: None,
            boundary_node_connectivity: None,
            volume_coordinates: None,
            start_index: 0,
            num_face_nodes_max: 4,
            num_layers: 0,
            is_spherical: false,
            double_fill_value: -999.0,
            int_fill_value: -999,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mesh2dDimensions {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub num_faces: usize,
    pub num_face_nodes_max: usize,
    pub num_layers: usize,
    pub num_boundary_edges: usize,
}

impl Default for Mesh2dDimensions {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            num_edges: 0,
            num_faces: 0,
            num_face_nodes_max: 4,
            num_layers: 0,
            num_boundary_edges: 0,
        }
    }
}

impl Mesh2dDimensions {
    /// Interfaces between layers, zero for a single layer
    pub fn num_interfaces(&self) -> usize {
        self.num_layers.saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh2dRecord {
    pub name: Vec<u8>,
    pub node_x: Vec<f64>,
    pub node_y: Vec<f64>,
    pub edge_node: Vec<i32>,
    pub face_node: Option<Vec<i32>>,
    pub edge_x: Option<Vec<f64>>,
    pub edge_y: Option<Vec<f64>>,
    pub face_x: Option<Vec<f64>>,
    pub face_y: Option<Vec<f64>>,
    pub edge_face: Option<Vec<i32>>,
    pub face_edge: Option<Vec<i32>>,
    pub face_face: Option<Vec<i32>>,
    pub node_z: Option<Vec<f64>>,
    pub edge_z: Option<Vec<f64>>,
    pub face_z: Option<Vec<f64>>,
    pub layer_zs: Option<Vec<f64>>,
    pub interface_zs: Option<Vec<f64>>,
    pub boundary_node_connectivity: Option<Vec<i32>>,
    pub volume_coordinates: Option<Vec<f64>>,
    pub num_nodes: usize,
    pub num_edges: usize,
    pub num_faces: usize,
    pub num_face_nodes_max: usize,
    pub num_layers: usize,
    pub num_boundary_edges: usize,
    pub is_spherical: i32,
    pub start_index: i32,
    pub double_fill_value: f64,
    pub int_fill_value: i32,
}

fn check_optional<T>(what: &str, values: &Option<Vec<T>>, wanted: usize) -> error::Result<()> {
    match values {
        Some(values) => expect_len(what, values.len(), wanted),
        None => Ok(()),
    }
}

fn check_optional_indices(
    what: &str,
    values: &Option<Vec<i32>>,
    start_index: i32,
    count: usize,
    fill_value: i32,
) -> error::Result<()> {
    match values {
        Some(values) => check_indices(what, values, start_index, count, Some(fill_value)),
        None => Ok(()),
    }
}

impl Mesh2d {
    fn num_faces(&self) -> usize {
        if let Some(face_node) = &self.face_node {
            if self.num_face_nodes_max > 0 {
                return face_node.len() / self.num_face_nodes_max;
            }
        }
        self.face_x
            .as_ref()
            .or(self.face_z.as_ref())
            .map_or(0, Vec::len)
    }
}

impl Topology for Mesh2d {
    const KIND: TopologyKind = TopologyKind::Mesh2d;
    type Dimensions = Mesh2dDimensions;
    type Record = Mesh2dRecord;

    fn name(&self) -> &str {
        &self.name
    }

    fn dimensions(&self) -> Mesh2dDimensions {
        Mesh2dDimensions {
            num_nodes: self.node_x.len(),
            num_edges: self.edge_node.len() / 2,
            num_faces: self.num_faces(),
            num_face_nodes_max: self.num_face_nodes_max,
            num_layers: self.num_layers,
            num_boundary_edges: self
                .boundary_node_connectivity
                .as_ref()
                .map_or(0, |b| b.len() / 2),
        }
    }

    fn validate(&self) -> error::Result<()> {
        let dims = self.dimensions();
        let fill = self.int_fill_value;
        check_start_index(self.start_index)?;
        expect_len("node_y", self.node_y.len(), dims.num_nodes)?;
        if self.edge_node.len() % 2 != 0 {
            return Err(error::Error::Consistency(
                "edge_node must hold pairs of nodes".into(),
            ));
        }
        let face_width = dims.num_faces * dims.num_face_nodes_max;
        if let Some(face_node) = &self.face_node {
            if dims.num_face_nodes_max == 0 {
                return Err(error::Error::Consistency(
                    "num_face_nodes_max must be positive when faces are given".into(),
                ));
            }
            expect_len("face_node", face_node.len(), face_width)?;
        }
        check_optional("edge_x", &self.edge_x, dims.num_edges)?;
        check_optional("edge_y", &self.edge_y, dims.num_edges)?;
        check_optional("edge_z", &self.edge_z, dims.num_edges)?;
        check_optional("edge_face", &self.edge_face, 2 * dims.num_edges)?;
        check_optional("node_z", &self.node_z, dims.num_nodes)?;
        check_optional("face_x", &self.face_x, dims.num_faces)?;
        check_optional("face_y", &self.face_y, dims.num_faces)?;
        check_optional("face_z", &self.face_z, dims.num_faces)?;
        check_optional("face_edge", &self.face_edge, face_width)?;
        check_optional("face_face", &self.face_face, face_width)?;
        check_optional("layer_zs", &self.layer_zs, dims.num_layers)?;
        if dims.num_layers > 1 {
            check_optional("interface_zs", &self.interface_zs, dims.num_interfaces())?;
        }
        if let Some(boundary) = &self.boundary_node_connectivity {
            if boundary.len() % 2 != 0 {
                return Err(error::Error::Consistency(
                    "boundary_node_connectivity must hold pairs of nodes".into(),
                ));
            }
        }
        check_optional(
            "volume_coordinates",
            &self.volume_coordinates,
            dims.num_faces * dims.num_layers,
        )?;

        check_indices(
            "edge_node",
            &self.edge_node,
            self.start_index,
            dims.num_nodes,
            None,
        )?;
        check_optional_indices(
            "face_node",
            &self.face_node,
            self.start_index,
            dims.num_nodes,
            fill,
        )?;
        check_optional_indices(
            "face_edge",
            &self.face_edge,
            self.start_index,
            dims.num_edges,
            fill,
        )?;
        check_optional_indices(
            "face_face",
            &self.face_face,
            self.start_index,
            dims.num_faces,
            fill,
        )?;
        check_optional_indices(
            "edge_face",
            &self.edge_face,
            self.start_index,
            dims.num_faces,
            fill,
        )?;
        check_optional_indices(
            "boundary_node_connectivity",
            &self.boundary_node_connectivity,
            self.start_index,
            dims.num_nodes,
            fill,
        )
    }

    fn to_record(&self, encoding: Encoding) -> Mesh2dRecord {
        let dims = self.dimensions();
        let interface_zs = if dims.num_layers > 1 {
            self.interface_zs.clone()
        } else {
            None
        };
        Mesh2dRecord {
            name: text::encode_one(&self.name, encoding.widths.name),
            node_x: self.node_x.clone(),
            node_y: self.node_y.clone(),
            edge_node: self.edge_node.clone(),
            face_node: self.face_node.clone(),
            edge_x: self.edge_x.clone(),
            edge_y: self.edge_y.clone(),
            face_x: self.face_x.clone(),
            face_y: self.face_y.clone(),
            edge_face: self.edge_face.clone(),
            face_edge: self.face_edge.clone(),
            face_face: self.face_face.clone(),
            node_z: self.node_z.clone(),
            edge_z: self.edge_z.clone(),
            face_z: self.face_z.clone(),
            layer_zs: self.layer_zs.clone(),
            interface_zs,
            boundary_node_connectivity: self.boundary_node_connectivity.clone(),
            volume_coordinates: self.volume_coordinates.clone(),
            num_nodes: dims.num_nodes,
            num_edges: dims.num_edges,
            num_faces: dims.num_faces,
            num_face_nodes_max: dims.num_face_nodes_max,
            num_layers: dims.num_layers,
            num_boundary_edges: dims.num_boundary_edges,
            is_spherical: i32::from(self.is_spherical),
            start_index: self.start_index,
            double_fill_value: self.double_fill_value,
            int_fill_value: self.int_fill_value,
        }
    }

    fn allocate(dims: Mesh2dDimensions, encoding: Encoding) -> Mesh2dRecord {
        let defaults = Mesh2d::default();
        let face_width = dims.num_faces * dims.num_face_nodes_max;
        Mesh2dRecord {
            name: text::blank(1, encoding.widths.name),
            node_x: vec![0.0; dims.num_nodes],
            node_y: vec![0.0; dims.num_nodes],
            edge_node: vec![0; 2 * dims.num_edges],
            face_node: Some(vec![0; face_width]),
            edge_x: Some(vec![0.0; dims.num_edges]),
            edge_y: Some(vec![0.0; dims.num_edges]),
            face_x: Some(vec![0.0; dims.num_faces]),
            face_y: Some(vec![0.0; dims.num_faces]),
            edge_face: Some(vec![0; 2 * dims.num_edges]),
            face_edge: Some(vec![0; face_width]),
            face_face: Some(vec![0; face_width]),
            node_z: Some(vec![0.0; dims.num_nodes]),
            edge_z: Some(vec![0.0; dims.num_edges]),
            face_z: Some(vec![0.0; dims.num_faces]),
            layer_zs: Some(vec![0.0; dims.num_layers]),
            interface_zs: (dims.num_layers > 1).then(|| vec![0.0; dims.num_interfaces()]),
            boundary_node_connectivity: Some(vec![0; 2 * dims.num_boundary_edges]),
            volume_coordinates: Some(vec![0.0; dims.num_faces * dims.num_layers]),
            num_nodes: dims.num_nodes,
            num_edges: dims.num_edges,
            num_faces: dims.num_faces,
            num_face_nodes_max: dims.num_face_nodes_max,
            num_layers: dims.num_layers,
            num_boundary_edges: dims.num_boundary_edges,
            is_spherical: 0,
            start_index: 0,
            double_fill_value: defaults.double_fill_value,
            int_fill_value: defaults.int_fill_value,
        }
    }

    fn record_dimensions(record: &Mesh2dRecord) -> Mesh2dDimensions {
        Mesh2dDimensions {
            num_nodes: record.num_nodes,
            num_edges: record.num_edges,
            num_faces: record.num_faces,
            num_face_nodes_max: record.num_face_nodes_max,
            num_layers: record.num_layers,
            num_boundary_edges: record.num_boundary_edges,
        }
    }

    fn from_record(record: &Mesh2dRecord, encoding: Encoding) -> error::Result<Self> {
        Ok(Mesh2d {
            name: text::decode_one(&record.name, encoding.widths.name)?,
            node_x: record.node_x.clone(),
            node_y: record.node_y.clone(),
            edge_node: record.edge_node.clone(),
            face_node: record.face_node.clone(),
            edge_x: record.edge_x.clone(),
            edge_y: record.edge_y.clone(),
            face_x: record.face_x.clone(),
            face_y: record.face_y.clone(),
            edge_face: record.edge_face.clone(),
            face_edge: record.face_edge.clone(),
            face_face: record.face_face.clone(),
            node_z: record.node_z.clone(),
            edge_z: record.edge_z.clone(),
            face_z: record.face_z.clone(),
            layer_zs: record.layer_zs.clone(),
            interface_zs: if record.num_layers > 1 {
                record.interface_zs.clone()
            } else {
                None
            },
            boundary_node_connectivity: record.boundary_node_connectivity.clone(),
            volume_coordinates: record.volume_coordinates.clone(),
            start_index: record.start_index,
            num_face_nodes_max: record.num_face_nodes_max,
            num_layers: record.num_layers,
            is_spherical: record.is_spherical != 0,
            double_fill_value: record.double_fill_value,
            int_fill_value: record.int_fill_value,
        })
    }

    fn inquire<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        topology: usize,
        dimensions: &mut Mesh2dDimensions,
    ) -> Status {
        store.mesh2d_inquire(file, topology, dimensions)
    }

    fn fill<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        topology: usize,
        record: &mut Mesh2dRecord,
    ) -> Status {
        store.mesh2d_get(file, topology, record)
    }

    fn define<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        record: &Mesh2dRecord,
        topology: &mut usize,
    ) -> Status {
        store.mesh2d_define(file, record, topology)
    }

    fn put<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        topology: usize,
        record: &Mesh2dRecord,
    ) -> Status {
        store.mesh2d_put(file, topology, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::NameWidths;
    use crate::types::StoreEnums;

    fn encoding() -> Encoding {
        Encoding {
            widths: NameWidths {
                name: 40,
                long_name: 80,
            },
            enums: StoreEnums {
                topologies: [0, 1, 2, 3],
                locations: [0, 1, 2],
            },
        }
    }

    // two triangles sharing an edge
    fn triangles() -> Mesh2d {
        Mesh2d {
            name: "mesh2d".into(),
            node_x: vec![0.0, 1.0, 0.0, 1.0],
            node_y: vec![0.0, 0.0, 1.0, 1.0],
            edge_node: vec![0, 1, 1, 3, 3, 2, 2, 0, 0, 3],
            face_node: Some(vec![0, 1, 3, -999, 0, 3, 2, -999]),
            ..Default::default()
        }
    }

    #[test]
    fn padded_faces() {
        let mesh = triangles();
        assert!(mesh.validate().is_ok());
        let dims = mesh.dimensions();
        assert_eq!(dims.num_faces, 2);
        assert_eq!(dims.num_edges, 5);

        let mut mesh = triangles();
        mesh.face_node = Some(vec![0, 1, 3, 4, 0, 3, 2, -999]);
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn single_layer_has_no_interfaces() {
        let mut mesh = triangles();
        mesh.num_layers = 1;
        mesh.layer_zs = Some(vec![-1.0]);
        mesh.interface_zs = Some(vec![]);
        assert!(mesh.validate().is_ok());

        let record = mesh.to_record(encoding());
        assert!(record.interface_zs.is_none());
        let allocated = Mesh2d::allocate(mesh.dimensions(), encoding());
        assert!(allocated.interface_zs.is_none());
        assert_eq!(allocated.layer_zs.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn layered_volumes() {
        let mut mesh = triangles();
        mesh.num_layers = 3;
        mesh.layer_zs = Some(vec![-3.0, -2.0, -1.0]);
        mesh.interface_zs = Some(vec![-2.5, -1.5]);
        mesh.volume_coordinates = Some(vec![0.0; 6]);
        assert!(mesh.validate().is_ok());

        mesh.interface_zs = Some(vec![-2.5]);
        assert!(mesh.validate().is_err());
    }
}
