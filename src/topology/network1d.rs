use super::{
    check_indices, check_optional_len, check_start_index, decode_names, encode_names, Encoding,
    Topology,
};
use crate::error::{self, expect_len};
use crate::store::{FileId, Status, Store};
use crate::text;
use crate::types::TopologyKind;

/// A 1D network of branches with polyline geometry
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Network1d {
    pub name: String,
    pub node_x: Vec<f64>,
    pub node_y: Vec<f64>,
    /// Per node, or empty
    pub node_id: Vec<String>,
    /// Per node, or empty
    pub node_long_name: Vec<String>,
    /// Start and end node of every branch
    pub edge_node: Vec<i32>,
    pub edge_length: Vec<f64>,
    pub edge_order: Option<Vec<i32>>,
    pub edge_id: Vec<String>,
    pub edge_long_name: Vec<String>,
    /// Vertices of all branch polylines, branch after branch
    pub geometry_nodes_x: Vec<f64>,
    pub geometry_nodes_y: Vec<f64>,
    /// How many geometry vertices belong to each branch
    pub num_edge_geometry_nodes: Vec<i32>,
    pub is_spherical: bool,
    pub start_index: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Network1dDimensions {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub num_geometry_nodes: usize,
}

impl Network1dDimensions {
    /// Edges of a network are called branches
    pub fn num_branches(&self) -> usize {
        self.num_edges
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Network1dRecord {
    pub name: Vec<u8>,
    pub node_x: Vec<f64>,
    pub node_y: Vec<f64>,
    pub node_id: Option<Vec<u8>>,
    pub node_long_name: Option<Vec<u8>>,
    pub edge_node: Vec<i32>,
    pub edge_length: Vec<f64>,
    pub edge_order: Option<Vec<i32>>,
    pub edge_id: Option<Vec<u8>>,
    pub edge_long_name: Option<Vec<u8>>,
    pub geometry_nodes_x: Vec<f64>,
    pub geometry_nodes_y: Vec<f64>,
    pub num_edge_geometry_nodes: Vec<i32>,
    pub num_nodes: usize,
    pub num_edges: usize,
    pub num_geometry_nodes: usize,
    pub is_spherical: i32,
    pub start_index: i32,
}

impl Topology for Network1d {
    const KIND: TopologyKind = TopologyKind::Network1d;
    type Dimensions = Network1dDimensions;
    type Record = Network1dRecord;

    fn name(&self) -> &str {
        &self.name
    }

    fn dimensions(&self) -> Network1dDimensions {
        Network1dDimensions {
            num_nodes: self.node_x.len(),
            num_edges: self.edge_node.len() / 2,
            num_geometry_nodes: self.geometry_nodes_x.len(),
        }
    }

    fn validate(&self) -> error::Result<()> {
        let dims = self.dimensions();
        check_start_index(self.start_index)?;
        expect_len("node_y", self.node_y.len(), dims.num_nodes)?;
        check_optional_len("node_id", self.node_id.len(), dims.num_nodes)?;
        check_optional_len("node_long_name", self.node_long_name.len(), dims.num_nodes)?;
        if self.edge_node.len() % 2 != 0 {
            return Err(error::Error::Consistency(
                "edge_node must hold pairs of nodes".into(),
            ));
        }
        expect_len("edge_length", self.edge_length.len(), dims.num_edges)?;
        if let Some(order) = &self.edge_order {
            expect_len("edge_order", order.len(), dims.num_edges)?;
        }
        check_optional_len("edge_id", self.edge_id.len(), dims.num_edges)?;
        check_optional_len("edge_long_name", self.edge_long_name.len(), dims.num_edges)?;
        expect_len(
            "geometry_nodes_y",
            self.geometry_nodes_y.len(),
            dims.num_geometry_nodes,
        )?;
        if self.num_edge_geometry_nodes.is_empty() {
            expect_len("geometry_nodes_x", dims.num_geometry_nodes, 0)?;
        } else {
            expect_len(
                "num_edge_geometry_nodes",
                self.num_edge_geometry_nodes.len(),
                dims.num_edges,
            )?;
            if self.num_edge_geometry_nodes.iter().any(|&n| n < 0) {
                return Err(error::Error::Consistency(
                    "num_edge_geometry_nodes has negative counts".into(),
                ));
            }
            let total: i64 = self.num_edge_geometry_nodes.iter().map(|&n| i64::from(n)).sum();
            expect_len(
                "geometry_nodes_x",
                dims.num_geometry_nodes,
                total as usize,
            )?;
        }
        check_indices(
            "edge_node",
            &self.edge_node,
            self.start_index,
            dims.num_nodes,
            None,
        )
    }

    fn to_record(&self, encoding: Encoding) -> Network1dRecord {
        let dims = self.dimensions();
        let widths = encoding.widths;
        let num_edge_geometry_nodes = if self.num_edge_geometry_nodes.is_empty() {
            vec![0; dims.num_edges]
        } else {
            self.num_edge_geometry_nodes.clone()
        };
        Network1dRecord {
            name: text::encode_one(&self.name, widths.name),
            node_x: self.node_x.clone(),
            node_y: self.node_y.clone(),
            node_id: encode_names(&self.node_id, widths.name),
            node_long_name: encode_names(&self.node_long_name, widths.long_name),
            edge_node: self.edge_node.clone(),
            edge_length: self.edge_length.clone(),
            edge_order: self.edge_order.clone(),
            edge_id: encode_names(&self.edge_id, widths.name),
            edge_long_name: encode_names(&self.edge_long_name, widths.long_name),
            geometry_nodes_x: self.geometry_nodes_x.clone(),
            geometry_nodes_y: self.geometry_nodes_y.clone(),
            num_edge_geometry_nodes,
            num_nodes: dims.num_nodes,
            num_edges: dims.num_edges,
            num_geometry_nodes: dims.num_geometry_nodes,
            is_spherical: i32::from(self.is_spherical),
            start_index: self.start_index,
        }
    }

    fn allocate(dims: Network1dDimensions, encoding: Encoding) -> Network1dRecord {
        let widths = encoding.widths;
        Network1dRecord {
            name: text::blank(1, widths.name),
            node_x: vec![0.0; dims.num_nodes],
            node_y: vec![0.0; dims.num_nodes],
            node_id: Some(text::blank(dims.num_nodes, widths.name)),
            node_long_name: Some(text::blank(dims.num_nodes, widths.long_name)),
            edge_node: vec![0; 2 * dims.num_edges],
            edge_length: vec![0.0; dims.num_edges],
            edge_order: Some(vec![0; dims.num_edges]),
            edge_id: Some(text::blank(dims.num_edges, widths.name)),
            edge_long_name: Some(text::blank(dims.num_edges, widths.long_name)),
            geometry_nodes_x: vec![0.0; dims.num_geometry_nodes],
            geometry_nodes_y: vec![0.0; dims.num_geometry_nodes],
            num_edge_geometry_nodes: vec![0; dims.num_edges],
            num_nodes: dims.num_nodes,
            num_edges: dims.num_edges,
            num_geometry_nodes: dims.num_geometry_nodes,
            is_spherical: 0,
            start_index: 0,
        }
    }

    fn record_dimensions(record: &Network1dRecord) -> Network1dDimensions {
        Network1dDimensions {
            num_nodes: record.num_nodes,
            num_edges: record.num_edges,
            num_geometry_nodes: record.num_geometry_nodes,
        }
    }

    fn from_record(record: &Network1dRecord, encoding: Encoding) -> error::Result<Self> {
        let widths = encoding.widths;
        Ok(Network1d {
            name: text::decode_one(&record.name, widths.name)?,
            node_x: record.node_x.clone(),
            node_y: record.node_y.clone(),
            node_id: decode_names(record.node_id.as_ref(), record.num_nodes, widths.name)?,
            node_long_name: decode_names(
                record.node_long_name.as_ref(),
                record.num_nodes,
                widths.long_name,
            )?,
            edge_node: record.edge_node.clone(),
            edge_length: record.edge_length.clone(),
            edge_order: record.edge_order.clone(),
            edge_id: decode_names(record.edge_id.as_ref(), record.num_edges, widths.name)?,
            edge_long_name: decode_names(
                record.edge_long_name.as_ref(),
                record.num_edges,
                widths.long_name,
            )?,
            geometry_nodes_x: record.geometry_nodes_x.clone(),
            geometry_nodes_y: record.geometry_nodes_y.clone(),
            num_edge_geometry_nodes: record.num_edge_geometry_nodes.clone(),
            is_spherical: record.is_spherical != 0,
            start_index: record.start_index,
        })
    }

    fn inquire<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        topology: usize,
        dimensions: &mut Network1dDimensions,
    ) -> Status {
        store.network1d_inquire(file, topology, dimensions)
    }

    fn fill<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        topology: usize,
        record: &mut Network1dRecord,
    ) -> Status {
        store.network1d_get(file, topology, record)
    }

    fn define<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        record: &Network1dRecord,
        topology: &mut usize,
    ) -> Status {
        store.network1d_define(file, record, topology)
    }

    fn put<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        topology: usize,
        record: &Network1dRecord,
    ) -> Status {
        store.network1d_put(file, topology, record)
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
                name: 8,
                long_name: 16,
            },
            enums: StoreEnums {
                topologies: [0, 1, 2, 3],
                locations: [0, 1, 2],
            },
        }
    }

    fn branch() -> Network1d {
        Network1d {
            name: "network1d".into(),
            node_x: vec![0.0, 10.0],
            node_y: vec![0.0, 0.0],
            node_id: vec!["n1".into(), "n2".into()],
            edge_node: vec![0, 1],
            edge_length: vec![10.0],
            geometry_nodes_x: vec![0.0, 5.0, 10.0],
            geometry_nodes_y: vec![0.0, 1.0, 0.0],
            num_edge_geometry_nodes: vec![3],
            ..Default::default()
        }
    }

    #[test]
    fn dimensions() {
        let dims = branch().dimensions();
        assert_eq!(dims.num_nodes, 2);
        assert_eq!(dims.num_branches(), 1);
        assert_eq!(dims.num_geometry_nodes, 3);
    }

    #[test]
    fn validation() {
        assert!(branch().validate().is_ok());

        let mut network = branch();
        network.num_edge_geometry_nodes = vec![2];
        assert!(matches!(
            network.validate(),
            Err(error::Error::Consistency(_))
        ));

        let mut network = branch();
        network.edge_node = vec![0, 2];
        assert!(network.validate().is_err());

        let mut network = branch();
        network.start_index = 1;
        network.edge_node = vec![1, 2];
        assert!(network.validate().is_ok());
    }

    #[test]
    fn record_omits_missing_lists() {
        let record = branch().to_record(encoding());
        assert!(record.node_id.is_some());
        assert!(record.node_long_name.is_none());
        assert!(record.edge_order.is_none());
        assert_eq!(record.name, b"network1".to_vec());

        let back = Network1d::from_record(&record, encoding()).unwrap();
        assert_eq!(back.name, "network1");
        assert_eq!(back.node_id, vec!["n1", "n2"]);
        assert!(back.node_long_name.is_empty());
    }

    #[test]
    fn allocation_matches_dimensions() {
        let dims = branch().dimensions();
        let record = Network1d::allocate(dims, encoding());
        assert_eq!(Network1d::record_dimensions(&record), dims);
        assert_eq!(record.edge_node.len(), 2);
        assert_eq!(record.node_long_name.as_ref().map(Vec::len), Some(32));
    }
}
