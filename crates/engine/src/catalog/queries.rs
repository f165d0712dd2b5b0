//! Default Oracle catalog queries
//!
//! All queries read `user_objects` of the connected principal, keep only
//! `VALID` objects and order them by creation time so that generated scripts
//! replay objects in the order they were originally built.

/// Object names of one type (`INDEX`, `TABLE`, `SEQUENCE`)
pub fn object_names(object_type: &str) -> String {
    format!(
        "SELECT object_name FROM user_objects WHERE status = 'VALID' AND object_type = '{}' ORDER BY CREATED, TIMESTAMP\n",
        object_type
    )
}

/// Creation time, last DDL time and full DDL of every object of one type
pub fn object_ddl(object_type: &str, source_principal: &str) -> String {
    format!(
        "SELECT CREATED, LAST_DDL_TIME, DBMS_METADATA.GET_DDL(object_type, object_name, '{}') val FROM user_objects WHERE status = 'VALID' AND object_type = '{}' ORDER BY CREATED, TIMESTAMP\n",
        source_principal, object_type
    )
}

/// Table names, for copying rows
pub fn table_names() -> String {
    "SELECT object_name val FROM user_objects WHERE status = 'VALID' AND object_type = 'TABLE' ORDER BY CREATED, TIMESTAMP\n".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_names_filters_type() {
        let q = object_names("INDEX");
        assert!(q.contains("object_type = 'INDEX'"));
        assert!(q.ends_with("ORDER BY CREATED, TIMESTAMP\n"));
    }

    #[test]
    fn test_object_ddl_names_source_principal() {
        let q = object_ddl("SEQUENCE", "HR");
        assert!(q.contains("DBMS_METADATA.GET_DDL(object_type, object_name, 'HR')"));
        assert!(q.contains("object_type = 'SEQUENCE'"));
    }
}
