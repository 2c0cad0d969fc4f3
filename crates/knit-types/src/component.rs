use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::edge::Edge;
use crate::error::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeType {
    Cylinder,
    Trapezoid,
    Rectangle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Handedness {
    Left,
    Right,
    None,
}

/// A single garment piece's topology: its shape, dimensions, and edges.
///
/// Construction rejects duplicate edge names and a non-positive
/// `instantiation_count`; both checks run in [`ComponentSpec::new`] so an
/// invalid spec can never be observed downstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub name: String,
    pub shape_type: ShapeType,
    pub dimensions: BTreeMap<String, f64>,
    pub edges: Vec<Edge>,
    pub handedness: Handedness,
    pub instantiation_count: i64,
}

impl ComponentSpec {
    pub fn new(
        name: impl Into<String>,
        shape_type: ShapeType,
        dimensions: BTreeMap<String, f64>,
        edges: Vec<Edge>,
        handedness: Handedness,
        instantiation_count: i64,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::EmptyComponentName);
        }
        if instantiation_count < 1 {
            return Err(DomainError::NonPositiveInstantiationCount {
                component: name,
                count: instantiation_count,
            });
        }

        let mut seen = std::collections::HashSet::with_capacity(edges.len());
        for edge in &edges {
            if !seen.insert(edge.name.as_str()) {
                return Err(DomainError::DuplicateEdgeName {
                    component: name,
                    name: edge.name.clone(),
                });
            }
        }

        Ok(Self {
            name,
            shape_type,
            dimensions,
            edges,
            handedness,
            instantiation_count,
        })
    }

    pub fn edge(&self, name: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.name == name)
    }
}
