//! Folder/tag use-case service.
//!
//! Same contract for both collections: `name` is required on create and
//! update, ids are validated before lookups, and duplicates are client errors.

use crate::model::named::NamedRecord;
use crate::repo::named_repo::NamedRecordRepository;
use crate::service::note_service::parse_path_id;
use crate::service::{ServiceError, ServiceResult};
use log::info;
use serde::Deserialize;

/// Folder/tag fields as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NamedPayload {
    pub name: Option<String>,
}

pub struct NamedRecordService<R: NamedRecordRepository> {
    repo: R,
}

impl<R: NamedRecordRepository> NamedRecordService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list(&self) -> ServiceResult<Vec<NamedRecord>> {
        Ok(self.repo.list()?)
    }

    pub fn get(&self, id: &str) -> ServiceResult<Option<NamedRecord>> {
        let id = parse_path_id(id)?;
        Ok(self.repo.get(&id)?)
    }

    pub fn create(&self, payload: NamedPayload) -> ServiceResult<NamedRecord> {
        let name = require_name(payload.name)?;
        let record = self.repo.create(&name)?;
        info!(
            "event={}_create module=service status=ok id={}",
            self.repo.collection().label(),
            record.id
        );
        Ok(record)
    }

    /// Renames a record. Checks `name` before the id.
    pub fn update(&self, id: &str, payload: NamedPayload) -> ServiceResult<Option<NamedRecord>> {
        let name = require_name(payload.name)?;
        let id = parse_path_id(id)?;
        Ok(self.repo.rename(&id, &name)?)
    }

    /// Returns whether a record was removed; malformed ids remove nothing.
    pub fn delete(&self, id: &str) -> ServiceResult<bool> {
        let Ok(id) = parse_path_id(id) else {
            return Ok(false);
        };

        let deleted = self.repo.delete(&id)?;
        if deleted {
            info!(
                "event={}_delete module=service status=ok id={id}",
                self.repo.collection().label()
            );
        }
        Ok(deleted)
    }
}

fn require_name(name: Option<String>) -> ServiceResult<String> {
    name.filter(|name| !name.is_empty())
        .ok_or(ServiceError::MissingRequiredField { field: "name" })
}
