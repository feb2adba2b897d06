use crate::error::app_error::AppError;
use crate::models::field_mapping::{
    FieldCatalogResponse, FieldMapping, MappedField, MappingCount, MappingExport, MappingExportRequest, MappingStatus, SYSTEM_FIELDS, UnmappedField,
    find_system_field, required_fields,
};
use chrono::{DateTime, Utc};

/// One unmapped entry per catalog field, required fields first, then by name.
pub fn default_mappings() -> Vec<FieldMapping> {
    let mut fields: Vec<_> = SYSTEM_FIELDS.iter().collect();
    fields.sort_by(|a, b| b.required.cmp(&a.required).then_with(|| a.name.cmp(b.name)));
    fields.into_iter().map(FieldMapping::unmapped).collect()
}

pub fn catalog() -> FieldCatalogResponse {
    FieldCatalogResponse {
        fields: SYSTEM_FIELDS.to_vec(),
        default_mappings: default_mappings(),
    }
}

/// Rejects mappings that target a field outside the catalog.
pub fn ensure_known_fields(mappings: &[FieldMapping]) -> Result<(), AppError> {
    let unknown: Vec<&str> = mappings
        .iter()
        .filter(|mapping| find_system_field(&mapping.central_field).is_none())
        .map(|mapping| mapping.central_field.as_str())
        .collect();

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!("Unknown system field(s): {}", unknown.join(", "))))
    }
}

/// Whether the catalog marks this mapping's field as required. The catalog
/// wins over the `isRequired` flag sent by the caller.
fn is_required(mapping: &FieldMapping) -> bool {
    find_system_field(&mapping.central_field).map_or(mapping.is_required, |field| field.required)
}

fn is_field_mapped(mappings: &[FieldMapping], name: &str) -> bool {
    mappings.iter().any(|mapping| mapping.central_field == name && mapping.is_mapped())
}

/// Readiness of a mapping set: ready exactly when every required catalog
/// field has a non-placeholder feed field.
pub fn mapping_status(mappings: &[FieldMapping]) -> Result<MappingStatus, AppError> {
    ensure_known_fields(mappings)?;

    let missing_required: Vec<String> = required_fields()
        .filter(|field| !is_field_mapped(mappings, field.name))
        .map(|field| field.name.to_string())
        .collect();
    let required_total = required_fields().count();

    let optional_unmapped = SYSTEM_FIELDS
        .iter()
        .filter(|field| !field.required && !is_field_mapped(mappings, field.name))
        .count();

    let hint = match optional_unmapped {
        0 => None,
        1 => Some("1 optional field unmapped".to_string()),
        n => Some(format!("{} optional fields unmapped", n)),
    };

    Ok(MappingStatus {
        ready: missing_required.is_empty(),
        required_total,
        required_mapped: required_total - missing_required.len(),
        missing_required,
        optional_unmapped,
        hint,
    })
}

/// Export document for a confirmed mapping set.
pub fn export_mapping(request: MappingExportRequest, timestamp: DateTime<Utc>) -> Result<MappingExport, AppError> {
    ensure_known_fields(&request.field_mappings)?;

    let (mapped, unmapped): (Vec<&FieldMapping>, Vec<&FieldMapping>) = request.field_mappings.iter().partition(|mapping| mapping.is_mapped());

    let mapping_count = MappingCount {
        total: request.field_mappings.len(),
        mapped: mapped.len(),
        unmapped: unmapped.len(),
        required_mapped: mapped.iter().filter(|mapping| is_required(mapping)).count(),
        required_total: request.field_mappings.iter().filter(|mapping| is_required(mapping)).count(),
    };

    let field_mappings = mapped
        .iter()
        .map(|mapping| MappedField {
            centriq_field: mapping.central_field.clone(),
            feed_node: mapping.feed_field.trim().to_string(),
            is_required: is_required(mapping),
        })
        .collect();
    let unmapped_fields = unmapped
        .iter()
        .map(|mapping| UnmappedField {
            centriq_field: mapping.central_field.clone(),
            is_required: is_required(mapping),
        })
        .collect();

    Ok(MappingExport {
        client_info: request.client_info,
        validation_info: request.validation_info,
        field_mappings,
        unmapped_fields,
        mapping_count,
        timestamp,
    })
}
