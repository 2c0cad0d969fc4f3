use crate::component::ComponentSpec;
use crate::error::DomainError;
use crate::join::Join;

/// The top-level garment topology: every component and every declared join
/// between them.
///
/// [`ShapeManifest::new`] enforces referential integrity: every join's
/// `edge_a_ref`/`edge_b_ref` must resolve to a real `"component.edge"` pair
/// in `components`. This is the only cross-cutting invariant the Data Model
/// enforces at construction time; everything else about join validity is
/// the checker's job, not the manifest's.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeManifest {
    pub components: Vec<ComponentSpec>,
    pub joins: Vec<Join>,
}

impl ShapeManifest {
    pub fn new(components: Vec<ComponentSpec>, joins: Vec<Join>) -> Result<Self, DomainError> {
        for join in &joins {
            Self::resolve(&components, &join.id, &join.edge_a_ref)?;
            Self::resolve(&components, &join.id, &join.edge_b_ref)?;
        }
        Ok(Self { components, joins })
    }

    fn resolve<'a>(
        components: &'a [ComponentSpec],
        join_id: &str,
        edge_ref: &str,
    ) -> Result<(), DomainError> {
        let component_name = Join::component_of(edge_ref);
        let edge_name = edge_ref
            .strip_prefix(component_name)
            .and_then(|rest| rest.strip_prefix('.'));

        let found = edge_name.is_some_and(|edge_name| {
            components
                .iter()
                .any(|c| c.name == component_name && c.edge(edge_name).is_some())
        });

        if found {
            Ok(())
        } else {
            Err(DomainError::UnresolvedEdgeRef {
                join_id: join_id.to_string(),
                edge_ref: edge_ref.to_string(),
            })
        }
    }

    pub fn component(&self, name: &str) -> Option<&ComponentSpec> {
        self.components.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Handedness, ShapeType};
    use crate::edge::{Edge, EdgeType};
    use crate::join::JoinType;
    use std::collections::BTreeMap;

    fn component(name: &str, edges: Vec<Edge>) -> ComponentSpec {
        ComponentSpec::new(
            name,
            ShapeType::Rectangle,
            BTreeMap::new(),
            edges,
            Handedness::None,
            1,
        )
        .unwrap()
    }

    #[test]
    fn accepts_joins_whose_refs_resolve() {
        let yoke = component("yoke", vec![Edge::new("body_join", EdgeType::LiveStitch)]);
        let body = component("body", vec![Edge::new("top", EdgeType::LiveStitch)]);
        let join = Join::new("j1", JoinType::Continuation, "yoke.body_join", "body.top");

        let manifest = ShapeManifest::new(vec![yoke, body], vec![join]).unwrap();
        assert_eq!(manifest.components.len(), 2);
    }

    #[test]
    fn rejects_join_with_unresolved_ref() {
        let body = component("body", vec![Edge::new("top", EdgeType::LiveStitch)]);
        let join = Join::new("j1", JoinType::Continuation, "body.top", "sleeve.cuff");

        let err = ShapeManifest::new(vec![body], vec![join]).unwrap_err();
        assert_eq!(
            err,
            DomainError::UnresolvedEdgeRef {
                join_id: "j1".into(),
                edge_ref: "sleeve.cuff".into(),
            }
        );
    }
}
