//! Projections from response trees to canonical records.

use crate::error::{NormalizeError, Result};
use crate::models::{CollectionRecord, EntityRecord, EntityRef, TaskStartRecord};
use crate::xml::Element;
use gmp_registry::{EntityField, Keyword, ResponseField};

/// Parse a raw response document.
pub fn parse_response(xml: &str) -> Result<Element> {
    Element::parse(xml)
}

/// The root element's `status` attribute.
pub fn extract_status(root: &Element) -> Option<String> {
    root.attr(ResponseField::Status.canonical_name())
        .map(str::to_owned)
}

/// The root element's `status_text` attribute.
pub fn extract_status_text(root: &Element) -> Option<String> {
    root.attr(ResponseField::StatusText.canonical_name())
        .map(str::to_owned)
}

/// A single entity, read from the root's first child element.
///
/// # Errors
///
/// [`NormalizeError::Structure`] if the root has no child element.
pub fn extract_entity(root: &Element) -> Result<EntityRecord> {
    let entity = root.first_child().ok_or_else(|| {
        NormalizeError::Structure(format!("<{}> carries no entity element", root.name()))
    })?;

    Ok(EntityRecord {
        status: extract_status(root),
        name: entity_name(entity).map(str::to_owned),
        id: entity_id(entity).map(str::to_owned),
    })
}

/// Every immediate child whose name and id both resolve, in document order.
///
/// Children missing either member are dropped, which also filters out
/// bookkeeping elements such as `<filters>` or `<sort>` that accompany
/// collection responses.
pub fn extract_collection(root: &Element) -> CollectionRecord {
    let data = root
        .children()
        .iter()
        .filter_map(|child| {
            Some(EntityRef {
                name: entity_name(child)?.to_owned(),
                id: entity_id(child)?.to_owned(),
            })
        })
        .collect();

    CollectionRecord {
        status: extract_status(root),
        data,
    }
}

/// The identifier of a newly created entity, reported on the response root.
pub fn extract_created(root: &Element) -> EntityRecord {
    EntityRecord {
        status: extract_status(root),
        name: None,
        id: entity_id(root).map(str::to_owned),
    }
}

/// The report created by starting a task.
pub fn extract_task_start(root: &Element) -> TaskStartRecord {
    TaskStartRecord {
        status: extract_status(root),
        report_id: root
            .child_text(EntityField::ReportId.wire_name())
            .filter(|id| !id.is_empty())
            .map(str::to_owned),
    }
}

fn entity_id(element: &Element) -> Option<&str> {
    element
        .attr(ResponseField::Id.canonical_name())
        .filter(|id| !id.is_empty())
}

fn entity_name(element: &Element) -> Option<&str> {
    element
        .child_text(ResponseField::Name.canonical_name())
        .filter(|name| !name.is_empty())
}
