use redb::ReadableTable;

use super::db::{Database, DatabaseError};
use super::models::ApplicationRecord;
use super::tables::*;

impl Database {
    /// Store an application record keyed by its generated id. Overwrites any
    /// existing record with the same id; ids are fresh UUIDs per request so
    /// collisions do not occur in practice.
    pub fn put_application(&self, application: &ApplicationRecord) -> Result<(), DatabaseError> {
        debug_assert!(
            !application.application_id.is_empty(),
            "application id must not be empty"
        );

        let write_txn = self.begin_write()?;
        {
            let mut table = write_txn.open_table(APPLICATIONS)?;
            let data = rmp_serde::to_vec_named(application)?;
            table.insert(application.application_id.as_str(), data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Get an application by its id
    pub fn get_application(&self, id: &str) -> Result<Option<ApplicationRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(APPLICATIONS)?;

        match table.get(id)? {
            Some(data) => {
                let application: ApplicationRecord = rmp_serde::from_slice(data.value())?;
                Ok(Some(application))
            }
            None => Ok(None),
        }
    }
}
