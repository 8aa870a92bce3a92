use crate::domain::{
    entity::{Auditable, EntityRef},
    error::AuditError,
};

/// Owner of an audit record: the entity itself, or whatever `association`
/// currently points at. Never falls back to the entity when the named
/// association is missing.
pub fn resolve_owner<E>(entity: &E, association: Option<&str>) -> Result<EntityRef, AuditError>
where
    E: Auditable + ?Sized,
{
    match association {
        None | Some("") => Ok(entity.entity_ref()),
        Some(name) => entity
            .association(name)
            .ok_or_else(|| AuditError::AssociationNotFound {
                entity: entity.entity_ref().to_string(),
                association: name.to_string(),
            }),
    }
}
