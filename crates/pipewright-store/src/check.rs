//! Document-level referential integrity checks
//!
//! References between entities are by name and soft; a document with a
//! dangling reference still loads and serializes. These checks report the
//! problems as advisory strings so a caller can surface them.

use pipewright_core::{Document, ExternalType, Process};

/// Report every dangling or mistyped reference in the document
pub fn check_references(document: &Document) -> Vec<String> {
    let mut problems = Vec::new();

    for pipeline in &document.pipelines {
        for step in &pipeline.processes {
            if document.find_process(&step.process_ref).is_none() {
                problems.push(format!(
                    "pipeline '{}' references unknown process '{}'",
                    pipeline.name, step.process_ref
                ));
            }
        }
        if let Some(connector_ref) = &pipeline.checkpoint_connector_ref {
            if document.find_external(connector_ref).is_none() {
                problems.push(format!(
                    "pipeline '{}' checkpoints to unknown external '{}'",
                    pipeline.name, connector_ref
                ));
            }
        }
    }

    for process in &document.processes {
        match process {
            Process::Aggregator(p) => {
                check_external_ref(document, &mut problems, &p.name, "state store", &p.aggregation.state_store);
            }
            Process::Completer(p) => {
                check_external_ref(document, &mut problems, &p.name, "state store", &p.state_store);
            }
            Process::Tee(p) => {
                check_external_ref(document, &mut problems, &p.name, "output connector", &p.output_connector);
                if !p.transformer_ref.is_empty() {
                    match document.find_process(&p.transformer_ref) {
                        Some(Process::Transformer(_)) => {}
                        Some(_) => problems.push(format!(
                            "process '{}' transformer ref '{}' is not a transformer",
                            p.name, p.transformer_ref
                        )),
                        None => problems.push(format!(
                            "process '{}' references unknown transformer '{}'",
                            p.name, p.transformer_ref
                        )),
                    }
                }
            }
            Process::Entwine(p) => {
                check_typed_external_ref(
                    document,
                    &mut problems,
                    &p.name,
                    "stream state store",
                    &p.stream_state_store_ref,
                    ExternalType::KVStore,
                );
                check_typed_external_ref(
                    document,
                    &mut problems,
                    &p.name,
                    "object store",
                    &p.object_store_ref,
                    ExternalType::ObjectStore,
                );
            }
            _ => {}
        }
    }

    problems
}

fn check_external_ref(
    document: &Document,
    problems: &mut Vec<String>,
    process: &str,
    role: &str,
    external_ref: &str,
) {
    if document.find_external(external_ref).is_none() {
        problems.push(format!(
            "process '{process}' {role} references unknown external '{external_ref}'"
        ));
    }
}

fn check_typed_external_ref(
    document: &Document,
    problems: &mut Vec<String>,
    process: &str,
    role: &str,
    external_ref: &str,
    expected: ExternalType,
) {
    match document.find_external(external_ref) {
        None => problems.push(format!(
            "process '{process}' {role} references unknown external '{external_ref}'"
        )),
        Some(external) if external.external_type != expected => problems.push(format!(
            "process '{process}' {role} external '{external_ref}' is not a {}",
            expected.as_str()
        )),
        Some(_) => {}
    }
}
