use super::{
    check_indices, check_optional_len, check_start_index, decode_names, encode_names, Encoding,
    Network1d, Topology,
};
use crate::error::{self, expect_len};
use crate::file::UGridFile;
use crate::store::{FileId, Status, Store};
use crate::text;
use crate::types::TopologyKind;

/// A 1D computational mesh positioned along the branches of a [`Network1d`]
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh1d {
    pub name: String,
    /// Name of the network the mesh lies on
    pub network_name: String,
    pub node_x: Option<Vec<f64>>,
    pub node_y: Option<Vec<f64>>,
    /// Network branch of every node
    pub node_edge_id: Vec<i32>,
    /// Distance of every node from the start of its branch
    pub node_edge_offset: Vec<f64>,
    pub node_id: Vec<String>,
    pub node_long_name: Vec<String>,
    pub edge_node: Vec<i32>,
    pub edge_edge_id: Option<Vec<i32>>,
    pub edge_edge_offset: Option<Vec<f64>>,
    pub edge_x: Option<Vec<f64>>,
    pub edge_y: Option<Vec<f64>>,
    pub is_spherical: bool,
    pub start_index: i32,
    pub double_fill_value: f64,
    pub int_fill_value: i32,
}

impl Default for Mesh1d {
    fn default() -> Self {
        Self {
            name: String::new(),
            network_name: String::new(),
            node_x: None,
            node_y: None,
            node_edge_id: Vec::new(),
            node_edge_offset: Vec::new(),
            node_id: Vec::new(),
            node_long_name: Vec::new(),
            edge_node: Vec::new(),
            edge_edge_id: None,
            edge_edge_offset: None,
            edge_x: None,
            edge_y: None,
            is_spherical: false,
            start_index: 0,
            double_fill_value: -999.0,
            int_fill_value: -999,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mesh1dDimensions {
    pub num_nodes: usize,
    pub num_edges: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh1dRecord {
    pub name: Vec<u8>,
    pub network_name: Vec<u8>,
    pub node_x: Option<Vec<f64>>,
    pub node_y: Option<Vec<f64>>,
    pub node_edge_id: Vec<i32>,
    pub node_edge_offset: Vec<f64>,
    pub node_id: Option<Vec<u8>>,
    pub node_long_name: Option<Vec<u8>>,
    pub edge_node: Vec<i32>,
    pub edge_edge_id: Option<Vec<i32>>,
    pub edge_edge_offset: Option<Vec<f64>>,
    pub edge_x: Option<Vec<f64>>,
    pub edge_y: Option<Vec<f64>>,
    pub num_nodes: usize,
    pub num_edges: usize,
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

impl Topology for Mesh1d {
    const KIND: TopologyKind = TopologyKind::Mesh1d;
    type Dimensions = Mesh1dDimensions;
    type Record = Mesh1dRecord;

    fn name(&self) -> &str {
        &self.name
    }

    fn dimensions(&self) -> Mesh1dDimensions {
        Mesh1dDimensions {
            num_nodes: self.node_edge_id.len(),
            num_edges: self.edge_node.len() / 2,
        }
    }

    fn validate(&self) -> error::Result<()> {
        let dims = self.dimensions();
        check_start_index(self.start_index)?;
        expect_len(
            "node_edge_offset",
            self.node_edge_offset.len(),
            dims.num_nodes,
        )?;
        check_optional("node_x", &self.node_x, dims.num_nodes)?;
        check_optional("node_y", &self.node_y, dims.num_nodes)?;
        check_optional_len("node_id", self.node_id.len(), dims.num_nodes)?;
        check_optional_len("node_long_name", self.node_long_name.len(), dims.num_nodes)?;
        if self.edge_node.len() % 2 != 0 {
            return Err(error::Error::Consistency(
                "edge_node must hold pairs of nodes".into(),
            ));
        }
        check_optional("edge_edge_id", &self.edge_edge_id, dims.num_edges)?;
        check_optional("edge_edge_offset", &self.edge_edge_offset, dims.num_edges)?;
        check_optional("edge_x", &self.edge_x, dims.num_edges)?;
        check_optional("edge_y", &self.edge_y, dims.num_edges)?;
        check_indices(
            "edge_node",
            &self.edge_node,
            self.start_index,
            dims.num_nodes,
            None,
        )
    }

    fn check_references<S: Store + ?Sized>(&self, file: &UGridFile<'_, S>) -> error::Result<()> {
        let wanted = text::fit(&self.network_name, file.widths().name);
        let networks = file.topology_names(TopologyKind::Network1d)?;
        let index = networks
            .iter()
            .position(|name| name == wanted)
            .ok_or_else(|| {
                error::Error::Schema(format!(
                    "mesh1d {:?} refers to missing network {:?}",
                    self.name, self.network_name
                ))
            })?;
        let num_branches = file.inquire::<Network1d>(index)?.num_branches();
        let fill = Some(self.int_fill_value);
        check_indices(
            "node_edge_id",
            &self.node_edge_id,
            self.start_index,
            num_branches,
            fill,
        )?;
        if let Some(edge_edge_id) = &self.edge_edge_id {
            check_indices(
                "edge_edge_id",
                edge_edge_id,
                self.start_index,
                num_branches,
                fill,
            )?;
        }
        Ok(())
    }

    fn to_record(&self, encoding: Encoding) -> Mesh1dRecord {
        let dims = self.dimensions();
        let widths = encoding.widths;
        Mesh1dRecord {
            name: text::encode_one(&self.name, widths.name),
            network_name: text::encode_one(&self.network_name, widths.name),
            node_x: self.node_x.clone(),
            node_y: self.node_y.clone(),
            node_edge_id: self.node_edge_id.clone(),
            node_edge_offset: self.node_edge_offset.clone(),
            node_id: encode_names(&self.node_id, widths.name),
            node_long_name: encode_names(&self.node_long_name, widths.long_name),
            edge_node: self.edge_node.clone(),
            edge_edge_id: self.edge_edge_id.clone(),
            edge_edge_offset: self.edge_edge_offset.clone(),
            edge_x: self.edge_x.clone(),
            edge_y: self.edge_y.clone(),
            num_nodes: dims.num_nodes,
            num_edges: dims.num_edges,
            is_spherical: i32::from(self.is_spherical),
            start_index: self.start_index,
            double_fill_value: self.double_fill_value,
            int_fill_value: self.int_fill_value,
        }
    }

    fn allocate(dims: Mesh1dDimensions, encoding: Encoding) -> Mesh1dRecord {
        let widths = encoding.widths;
        let defaults = Mesh1d::default();
        Mesh1dRecord {
            name: text::blank(1, widths.name),
            network_name: text::blank(1, widths.name),
            node_x: Some(vec![0.0; dims.num_nodes]),
            node_y: Some(vec![0.0; dims.num_nodes]),
            node_edge_id: vec![0; dims.num_nodes],
            node_edge_offset: vec![0.0; dims.num_nodes],
            node_id: Some(text::blank(dims.num_nodes, widths.name)),
            node_long_name: Some(text::blank(dims.num_nodes, widths.long_name)),
            edge_node: vec![0; 2 * dims.num_edges],
            edge_edge_id: Some(vec![0; dims.num_edges]),
            edge_edge_offset: Some(vec![0.0; dims.num_edges]),
            edge_x: Some(vec![0.0; dims.num_edges]),
            edge_y: Some(vec![0.0; dims.num_edges]),
            num_nodes: dims.num_nodes,
            num_edges: dims.num_edges,
            is_spherical: 0,
            start_index: 0,
            double_fill_value: defaults.double_fill_value,
            int_fill_value: defaults.int_fill_value,
        }
    }

    fn record_dimensions(record: &Mesh1dRecord) -> Mesh1dDimensions {
        Mesh1dDimensions {
            num_nodes: record.num_nodes,
            num_edges: record.num_edges,
        }
    }

    fn from_record(record: &Mesh1dRecord, encoding: Encoding) -> error::Result<Self> {
        let widths = encoding.widths;
        Ok(Mesh1d {
            name: text::decode_one(&record.name, widths.name)?,
            network_name: text::decode_one(&record.network_name, widths.name)?,
            node_x: record.node_x.clone(),
            node_y: record.node_y.clone(),
            node_edge_id: record.node_edge_id.clone(),
            node_edge_offset: record.node_edge_offset.clone(),
            node_id: decode_names(record.node_id.as_ref(), record.num_nodes, widths.name)?,
            node_long_name: decode_names(
                record.node_long_name.as_ref(),
                record.num_nodes,
                widths.long_name,
            )?,
            edge_node: record.edge_node.clone(),
            edge_edge_id: record.edge_edge_id.clone(),
            edge_edge_offset: record.edge_edge_offset.clone(),
            edge_x: record.edge_x.clone(),
            edge_y: record.edge_y.clone(),
            is_spherical: record.is_spherical != 0,
            start_index: record.start_index,
            double_fill_value: record.double_fill_value,
            int_fill_value: record.int_fill_value,
        })
    }

    fn inquire<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        topology: usize,
        dimensions: &mut Mesh1dDimensions,
    ) -> Status {
        store.mesh1d_inquire(file, topology, dimensions)
    }

    fn fill<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        topology: usize,
        record: &mut Mesh1dRecord,
    ) -> Status {
        store.mesh1d_get(file, topology, record)
    }

    fn define<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        record: &Mesh1dRecord,
        topology: &mut usize,
    ) -> Status {
        store.mesh1d_define(file, record, topology)
    }

    fn put<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        topology: usize,
        record: &Mesh1dRecord,
    ) -> Status {
        store.mesh1d_put(file, topology, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_values_default() {
        let mesh = Mesh1d::default();
        assert_eq!(mesh.double_fill_value, -999.0);
        assert_eq!(mesh.int_fill_value, -999);
    }

    #[test]
    fn offsets_follow_nodes() {
        let mut mesh = Mesh1d {
            name: "1dmesh".into(),
            network_name: "network".into(),
            node_edge_id: vec![0, 0, 0],
            node_edge_offset: vec![0.0, 5.0, 10.0],
            edge_node: vec![0, 1, 1, 2],
            ..Default::default()
        };
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.dimensions().num_edges, 2);

        mesh.node_edge_offset.pop();
        assert!(matches!(mesh.validate(), Err(error::Error::Consistency(_))));
    }
}
