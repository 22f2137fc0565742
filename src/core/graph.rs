//! Dependency graph - resolves constituents into part-to-part edges
//!
//! Parts are kept in an arena sorted by part number and addressed by
//! [`PartId`]. Forward edges (`dependencies`) and reverse edges
//! (`dependents`) live in separate adjacency tables built in one pass.

use std::collections::HashMap;
use tracing::{debug, info};

use crate::core::catalog::Catalog;
use crate::core::error::BomError;
use crate::core::part::Part;

/// Revision at which a part is considered mature. A mature part may not
/// consume a pre-mature dash roll of its constituent.
pub const MATURE_REVISION: u32 = 50;

/// Index of a part in a [`BomGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(usize);

/// Resolved bill-of-materials line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Resolved constituent (always the root part for dash-roll references)
    pub target: PartId,

    /// Reference string as written in the consuming part's document
    pub reference: String,

    pub quantity: u32,
}

#[derive(Debug)]
pub struct BomGraph {
    parts: Vec<Part>,
    index: HashMap<String, PartId>,
    dependencies: Vec<Vec<Edge>>,
    dependents: Vec<Vec<PartId>>,
}

impl BomGraph {
    /// Resolve and validate: edge construction followed by the cycle check
    pub fn build(catalog: Catalog) -> Result<Self, BomError> {
        let graph = Self::resolve(catalog)?;
        graph.check_acyclic()?;
        info!(
            parts = graph.len(),
            edges = graph.edge_count(),
            top_level = graph.top_level().len(),
            "dependency graph resolved"
        );
        Ok(graph)
    }

    /// Resolve every part's constituents into edges, without the cycle check
    pub fn resolve(catalog: Catalog) -> Result<Self, BomError> {
        let parts = catalog.into_parts();
        let index: HashMap<String, PartId> = parts
            .iter()
            .enumerate()
            .map(|(i, p)| (p.part_number.clone(), PartId(i)))
            .collect();

        let mut dependencies = vec![Vec::new(); parts.len()];
        let mut dependents = vec![Vec::new(); parts.len()];

        for (i, part) in parts.iter().enumerate() {
            for (reference, &quantity) in &part.constituents {
                let target = resolve_reference(&parts, &index, part, reference)?;
                debug!(
                    part = %part.part_number,
                    reference = %reference,
                    target = %parts[target.0].part_number,
                    quantity,
                    "resolved constituent"
                );
                dependencies[i].push(Edge {
                    target,
                    reference: reference.clone(),
                    quantity,
                });
                dependents[target.0].push(PartId(i));
            }
        }

        Ok(Self {
            parts,
            index,
            dependencies,
            dependents,
        })
    }

    /// Fail on the first part (in part-number order) that can reach itself
    pub fn check_acyclic(&self) -> Result<(), BomError> {
        for start in self.ids() {
            if let Some(cycle) = self.find_cycle(start) {
                return Err(BomError::CircularDependency {
                    part: self.part(start).part_number.clone(),
                    path: cycle
                        .into_iter()
                        .map(|id| self.part(id).part_number.clone())
                        .collect(),
                });
            }
        }
        Ok(())
    }

    /// Depth-first search for a path from `start` back to itself
    fn find_cycle(&self, start: PartId) -> Option<Vec<PartId>> {
        let mut visited = vec![false; self.parts.len()];
        let mut path = vec![start];
        if self.walk_back_to(start, start, &mut visited, &mut path) {
            Some(path)
        } else {
            None
        }
    }

    fn walk_back_to(
        &self,
        start: PartId,
        node: PartId,
        visited: &mut [bool],
        path: &mut Vec<PartId>,
    ) -> bool {
        for edge in &self.dependencies[node.0] {
            if edge.target == start {
                path.push(start);
                return true;
            }
            if visited[edge.target.0] {
                continue;
            }
            visited[edge.target.0] = true;
            path.push(edge.target);
            if self.walk_back_to(start, edge.target, visited, path) {
                return true;
            }
            path.pop();
        }
        false
    }

    /// Top-level systems: parts nothing else consumes, in part-number order
    pub fn top_level(&self) -> Vec<PartId> {
        self.ids().filter(|id| self.dependents[id.0].is_empty()).collect()
    }

    /// Every part that consumes `id` directly or through intermediate
    /// assemblies, each listed once, nearest first
    pub fn transitive_dependents(&self, id: PartId) -> Vec<PartId> {
        let mut seen = vec![false; self.parts.len()];
        let mut order = Vec::new();
        let mut frontier = vec![id];

        while !frontier.is_empty() {
            let mut next = Vec::new();
            for node in frontier {
                for &dependent in &self.dependents[node.0] {
                    if !seen[dependent.0] {
                        seen[dependent.0] = true;
                        order.push(dependent);
                        next.push(dependent);
                    }
                }
            }
            frontier = next;
        }

        order
    }

    pub fn part(&self, id: PartId) -> &Part {
        &self.parts[id.0]
    }

    pub fn lookup(&self, part_number: &str) -> Option<PartId> {
        self.index.get(part_number).copied()
    }

    /// All part ids in part-number order
    pub fn ids(&self) -> impl Iterator<Item = PartId> {
        (0..self.parts.len()).map(PartId)
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn dependencies(&self, id: PartId) -> &[Edge] {
        &self.dependencies[id.0]
    }

    pub fn dependents(&self, id: PartId) -> &[PartId] {
        &self.dependents[id.0]
    }

    pub fn edge_count(&self) -> usize {
        self.dependencies.iter().map(Vec::len).sum()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Resolve one constituent reference of `referrer`.
///
/// An exact part number wins. Otherwise the reference must be
/// `ROOT-FAMILY-ROLL` where `ROOT-FAMILY` is a known part currently at dash
/// roll `ROLL`, and the revision gate must pass.
fn resolve_reference(
    parts: &[Part],
    index: &HashMap<String, PartId>,
    referrer: &Part,
    reference: &str,
) -> Result<PartId, BomError> {
    if let Some(&id) = index.get(reference) {
        return Ok(id);
    }

    let taxa: Vec<&str> = reference.split('-').collect();
    if taxa.len() < 3 {
        return Err(BomError::UnresolvableReference {
            part: referrer.part_number.clone(),
            reference: reference.to_string(),
        });
    }
    if taxa.len() > 3 {
        return Err(BomError::MalformedReference {
            part: referrer.part_number.clone(),
            reference: reference.to_string(),
        });
    }

    let root_pn = format!("{}-{}", taxa[0], taxa[1]);
    let root_id = index
        .get(&root_pn)
        .copied()
        .ok_or_else(|| BomError::UnresolvableRoot {
            part: referrer.part_number.clone(),
            reference: reference.to_string(),
            root: root_pn.clone(),
        })?;
    let root = &parts[root_id.0];

    if root.dash_roll.as_deref() != Some(taxa[2]) {
        return Err(BomError::DashRollMismatch {
            part: referrer.part_number.clone(),
            reference: reference.to_string(),
            root: root_pn,
            current: root.dash_roll.clone(),
        });
    }

    let root_immature = root.revision.map_or(true, |rev| rev < MATURE_REVISION);
    if let Some(revision) = referrer.revision.filter(|&rev| rev >= MATURE_REVISION) {
        if root_immature {
            return Err(BomError::RevisionIncompatible {
                part: referrer.part_number.clone(),
                revision,
                root: root_pn,
                root_revision: root.revision,
            });
        }
    }

    Ok(root_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(parts: Vec<Part>) -> Result<BomGraph, BomError> {
        BomGraph::build(Catalog::from_parts(parts).unwrap())
    }

    fn pns(graph: &BomGraph, ids: &[PartId]) -> Vec<String> {
        ids.iter()
            .map(|&id| graph.part(id).part_number.clone())
            .collect()
    }

    fn dependency_pns(graph: &BomGraph, pn: &str) -> Vec<String> {
        let id = graph.lookup(pn).unwrap();
        let targets: Vec<PartId> = graph.dependencies(id).iter().map(|e| e.target).collect();
        pns(graph, &targets)
    }

    #[test]
    fn test_dash_roll_reference_resolves_to_root() {
        let g = graph(vec![
            Part::new("A-100")
                .rolled("1", Some(60))
                .with_constituent("B-100-1", 2),
            Part::new("B-100").rolled("1", Some(60)),
        ])
        .unwrap();

        let a = g.lookup("A-100").unwrap();
        let b = g.lookup("B-100").unwrap();
        assert_eq!(
            g.dependencies(a),
            &[Edge {
                target: b,
                reference: "B-100-1".to_string(),
                quantity: 2
            }]
        );
        assert_eq!(g.dependents(b), &[a]);
        assert_eq!(pns(&g, &g.top_level()), ["A-100"]);
    }

    #[test]
    fn test_exact_part_number_resolves_directly() {
        // B-100-7 exists as its own unrolled part, so no dash-roll parsing
        let g = graph(vec![
            Part::new("A-100").with_constituent("B-100-7", 1),
            Part::new("B-100-7"),
            Part::new("B-100").rolled("3", Some(10)),
        ])
        .unwrap();

        assert_eq!(dependency_pns(&g, "A-100"), ["B-100-7"]);
        assert!(g.dependents(g.lookup("B-100").unwrap()).is_empty());
    }

    #[test]
    fn test_dependencies_keep_declaration_order() {
        let g = graph(vec![
            Part::new("A-100")
                .with_constituent("C-100", 1)
                .with_constituent("B-100", 4),
            Part::new("B-100"),
            Part::new("C-100"),
        ])
        .unwrap();

        assert_eq!(dependency_pns(&g, "A-100"), ["C-100", "B-100"]);
    }

    #[test]
    fn test_dash_roll_mismatch() {
        let err = graph(vec![
            Part::new("A-100").with_constituent("R-100-3", 1),
            Part::new("R-100").rolled("2", Some(60)),
        ])
        .unwrap_err();

        assert!(matches!(
            err,
            BomError::DashRollMismatch { ref root, ref current, .. }
                if root == "R-100" && current.as_deref() == Some("2")
        ));
    }

    #[test]
    fn test_dash_roll_compares_text_exactly() {
        let root: Part = serde_json::from_str(r#"{ "pn": "R-100", "dashroll": 1 }"#).unwrap();
        let err = graph(vec![
            Part::new("A-100").with_constituent("R-100-01", 1),
            root,
        ])
        .unwrap_err();

        assert!(matches!(
            err,
            BomError::DashRollMismatch { ref current, .. } if current.as_deref() == Some("1")
        ));
    }

    #[test]
    fn test_dash_roll_reference_to_unrolled_root() {
        let err = graph(vec![
            Part::new("A-100").with_constituent("R-100-3", 1),
            Part::new("R-100"),
        ])
        .unwrap_err();

        assert!(matches!(err, BomError::DashRollMismatch { current: None, .. }));
    }

    #[test]
    fn test_revision_gate() {
        let parts = |rev| {
            vec![
                Part::new("A-100")
                    .rolled("1", Some(rev))
                    .with_constituent("B-100-1", 1),
                Part::new("B-100").rolled("1", Some(12)),
            ]
        };

        let err = graph(parts(60)).unwrap_err();
        assert!(matches!(
            err,
            BomError::RevisionIncompatible { revision: 60, root_revision: Some(12), .. }
        ));

        assert!(graph(parts(49)).is_ok());
    }

    #[test]
    fn test_revision_gate_boundary_and_missing_revisions() {
        // Root exactly at the maturity threshold is acceptable
        assert!(graph(vec![
            Part::new("A-100")
                .rolled("1", Some(50))
                .with_constituent("B-100-1", 1),
            Part::new("B-100").rolled("1", Some(50)),
        ])
        .is_ok());

        // Root without a revision counts as immature
        let err = graph(vec![
            Part::new("A-100")
                .rolled("1", Some(50))
                .with_constituent("B-100-1", 1),
            Part::new("B-100").rolled("1", None),
        ])
        .unwrap_err();
        assert!(matches!(err, BomError::RevisionIncompatible { root_revision: None, .. }));

        // Referrer without a revision is never gated
        assert!(graph(vec![
            Part::new("A-100").with_constituent("B-100-1", 1),
            Part::new("B-100").rolled("1", None),
        ])
        .is_ok());
    }

    #[test]
    fn test_two_component_reference_unresolvable() {
        let err = graph(vec![Part::new("A-100").with_constituent("R-100", 1)]).unwrap_err();
        assert!(matches!(err, BomError::UnresolvableReference { ref reference, .. } if reference == "R-100"));
    }

    #[test]
    fn test_four_component_reference_malformed() {
        let err = graph(vec![
            Part::new("A-100").with_constituent("R-100-3-X", 1),
            Part::new("R-100").rolled("3", Some(60)),
        ])
        .unwrap_err();
        assert!(matches!(err, BomError::MalformedReference { .. }));
    }

    #[test]
    fn test_missing_root() {
        let err = graph(vec![Part::new("A-100").with_constituent("R-100-3", 1)]).unwrap_err();
        assert!(matches!(err, BomError::UnresolvableRoot { ref root, .. } if root == "R-100"));
    }

    #[test]
    fn test_cycle_detected() {
        let err = graph(vec![
            Part::new("A-100").with_constituent("B-100", 1),
            Part::new("B-100").with_constituent("C-100", 1),
            Part::new("C-100").with_constituent("A-100", 1),
        ])
        .unwrap_err();

        match err {
            BomError::CircularDependency { part, path } => {
                assert_eq!(part, "A-100");
                assert_eq!(path, ["A-100", "B-100", "C-100", "A-100"]);
            }
            other => panic!("expected CircularDependency, got {:?}", other),
        }
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let err = graph(vec![Part::new("A-100").with_constituent("A-100", 1)]).unwrap_err();
        assert!(matches!(err, BomError::CircularDependency { ref part, .. } if part == "A-100"));
    }

    #[test]
    fn test_cycle_not_through_first_part_terminates() {
        // A feeds into a B <-> C loop; A itself is not on the cycle
        let err = graph(vec![
            Part::new("A-100").with_constituent("B-100", 1),
            Part::new("B-100").with_constituent("C-100", 1),
            Part::new("C-100").with_constituent("B-100", 1),
        ])
        .unwrap_err();
        assert!(matches!(err, BomError::CircularDependency { ref part, .. } if part == "B-100"));
    }

    #[test]
    fn test_resolve_without_validation_allows_inspection_of_cycles() {
        let catalog = Catalog::from_parts([
            Part::new("A-100").with_constituent("B-100", 1),
            Part::new("B-100").with_constituent("A-100", 1),
        ])
        .unwrap();
        let g = BomGraph::resolve(catalog).unwrap();
        assert_eq!(g.edge_count(), 2);
        assert!(g.top_level().is_empty());
        assert!(g.check_acyclic().is_err());
    }

    #[test]
    fn test_dependents_are_inverse_of_dependencies() {
        let g = graph(vec![
            Part::new("SYS-001")
                .with_constituent("ASM-001", 2)
                .with_constituent("CMP-001", 8),
            Part::new("SYS-002").with_constituent("ASM-001-2", 1),
            Part::new("ASM-001")
                .rolled("2", Some(3))
                .with_constituent("CMP-001", 4)
                .with_constituent("CMP-002", 1),
            Part::new("CMP-001"),
            Part::new("CMP-002"),
        ])
        .unwrap();

        for p in g.ids() {
            for q in g.ids() {
                let q_in_p_dependents = g.dependents(p).contains(&q);
                let p_in_q_dependencies = g.dependencies(q).iter().any(|e| e.target == p);
                assert_eq!(q_in_p_dependents, p_in_q_dependencies);
            }
        }

        assert_eq!(pns(&g, &g.top_level()), ["SYS-001", "SYS-002"]);
        let cmp = g.lookup("CMP-001").unwrap();
        assert_eq!(pns(&g, g.dependents(cmp)), ["ASM-001", "SYS-001"]);
        assert_eq!(
            pns(&g, &g.transitive_dependents(cmp)),
            ["ASM-001", "SYS-001", "SYS-002"]
        );
    }

    #[test]
    fn test_new_dependent_removes_part_from_top_level() {
        let before = graph(vec![Part::new("A-100"), Part::new("B-100")]).unwrap();
        assert_eq!(pns(&before, &before.top_level()), ["A-100", "B-100"]);

        let after = graph(vec![
            Part::new("A-100"),
            Part::new("B-100"),
            Part::new("C-100").with_constituent("A-100", 1),
        ])
        .unwrap();
        assert_eq!(pns(&after, &after.top_level()), ["B-100", "C-100"]);
        assert_eq!(after.top_level(), after.top_level());
    }
}
