use std::borrow::Cow;

use crate::model::{MetadataRecord, TextField};

/// Flatten the searchable fields of a record into one space-joined blob.
///
/// Field order is fixed: the scalar fields, then tags, then each resource's
/// description followed by its name. Empty values are skipped and nothing
/// is normalized; the classifier matches case-insensitively on its own.
pub fn extract_text(record: &MetadataRecord) -> String {
    let scalar_fields = [
        &record.title,
        &record.name,
        &record.notes,
        &record.dataset_source,
        &record.organization,
        &record.methodology_other,
        &record.caveats,
    ];

    let mut parts = Vec::<Cow<'_, str>>::new();
    for field in scalar_fields {
        push_field(&mut parts, field.as_ref());
    }

    for tag in record.tags.iter().flatten() {
        if let Some(text) = tag.as_text() {
            parts.push(Cow::Borrowed(text));
        }
    }

    for resource in record.resources.iter().flatten() {
        push_field(&mut parts, resource.description.as_ref());
        push_field(&mut parts, resource.name.as_ref());
    }

    parts.join(" ")
}

fn push_field<'a>(parts: &mut Vec<Cow<'a, str>>, field: Option<&'a TextField>) {
    if let Some(text) = field.and_then(TextField::as_text) {
        parts.push(text);
    }
}
