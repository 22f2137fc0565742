//! JSON rendering of the resolved graph

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::core::bom::Bom;
use crate::core::graph::{BomGraph, PartId};
use crate::core::part::Part;

#[derive(Serialize)]
struct GraphReport<'a> {
    top_level: Vec<&'a str>,
    parts: Vec<PartEntry<'a>>,
}

#[derive(Serialize)]
struct PartEntry<'a> {
    id: &'a str,
    full_part_number: String,
    manufacturer_name: &'a str,
    #[serde(flatten)]
    part: &'a Part,
    dependencies: Vec<DependencyEntry<'a>>,
    dependents: Vec<&'a str>,
}

#[derive(Serialize)]
struct DependencyEntry<'a> {
    part_number: &'a str,
    reference: &'a str,
    quantity: u32,
}

fn part_number(graph: &BomGraph, id: PartId) -> &str {
    &graph.part(id).part_number
}

pub(super) fn render(bom: &Bom) -> Result<String> {
    let graph = &bom.graph;

    let mut parts = Vec::with_capacity(graph.len());
    for id in graph.ids() {
        let part = graph.part(id);
        parts.push(PartEntry {
            id: &part.id,
            full_part_number: part.full_part_number(),
            manufacturer_name: &bom.manufacturer_of(part)?.name,
            part,
            dependencies: graph
                .dependencies(id)
                .iter()
                .map(|edge| DependencyEntry {
                    part_number: part_number(graph, edge.target),
                    reference: &edge.reference,
                    quantity: edge.quantity,
                })
                .collect(),
            dependents: graph
                .dependents(id)
                .iter()
                .map(|&d| part_number(graph, d))
                .collect(),
        });
    }

    let report = GraphReport {
        top_level: graph
            .top_level()
            .into_iter()
            .map(|id| part_number(graph, id))
            .collect(),
        parts,
    };

    let mut json = serde_json::to_string_pretty(&report).into_diagnostic()?;
    json.push('\n');
    Ok(json)
}
