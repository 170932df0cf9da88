use redb::TableDefinition;

/// Application records: application_id -> ApplicationRecord (msgpack)
pub const APPLICATIONS: TableDefinition<&str, &[u8]> = TableDefinition::new("applications");
