//! Built-in row transformers
//!
//! Each [`TransformKind`] knows its default catalog query and connection
//! role, and builds a transformer that captures the principal names it
//! needs.
//!
//! | Kind | Row layout | Output |
//! |---|---|---|
//! | `drop_index` / `drop_table` / `drop_sequence` | `[name]` | `DROP <TYPE> <dest>.<name>;` |
//! | `copy_table_ddl` / `copy_index_ddl` | `[created, last_ddl, ddl]` | retargeted DDL, tablespace stripped |
//! | `copy_sequence_ddl` | `[created, last_ddl, ddl]` | retargeted DDL, tablespace kept |
//! | `copy_rows` | `[name]` | `INSERT INTO <dest>.<name> SELECT * FROM <src>.<name>;` |

use porter_core::Row;
use porter_plan::{ConnectionRole, SharedTransformer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::Principals;
use super::queries;
use crate::rewrite::IdentifierRewrite;

/// Names of the built-in transformers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    DropIndex,
    DropTable,
    DropSequence,
    CopyTableDdl,
    CopyIndexDdl,
    CopySequenceDdl,
    CopyRows,
}

impl TransformKind {
    /// Every kind, in catalog order
    pub fn all() -> [TransformKind; 7] {
        [
            TransformKind::DropIndex,
            TransformKind::DropTable,
            TransformKind::DropSequence,
            TransformKind::CopyTableDdl,
            TransformKind::CopyRows,
            TransformKind::CopySequenceDdl,
            TransformKind::CopyIndexDdl,
        ]
    }

    /// Name used in settings files
    pub fn name(&self) -> &'static str {
        match self {
            TransformKind::DropIndex => "drop_index",
            TransformKind::DropTable => "drop_table",
            TransformKind::DropSequence => "drop_sequence",
            TransformKind::CopyTableDdl => "copy_table_ddl",
            TransformKind::CopyIndexDdl => "copy_index_ddl",
            TransformKind::CopySequenceDdl => "copy_sequence_ddl",
            TransformKind::CopyRows => "copy_rows",
        }
    }

    /// Oracle object type the kind works on
    pub fn object_type(&self) -> &'static str {
        match self {
            TransformKind::DropIndex | TransformKind::CopyIndexDdl => "INDEX",
            TransformKind::DropTable | TransformKind::CopyTableDdl | TransformKind::CopyRows => {
                "TABLE"
            }
            TransformKind::DropSequence | TransformKind::CopySequenceDdl => "SEQUENCE",
        }
    }

    /// Connection the default query runs against
    pub fn default_role(&self) -> ConnectionRole {
        match self {
            TransformKind::DropIndex | TransformKind::DropTable | TransformKind::DropSequence => {
                ConnectionRole::Destination
            }
            _ => ConnectionRole::Source,
        }
    }

    /// Default catalog query
    pub fn default_query(&self, principals: &Principals) -> String {
        match self {
            TransformKind::DropIndex | TransformKind::DropTable | TransformKind::DropSequence => {
                queries::object_names(self.object_type())
            }
            TransformKind::CopyTableDdl
            | TransformKind::CopyIndexDdl
            | TransformKind::CopySequenceDdl => {
                queries::object_ddl(self.object_type(), &principals.source)
            }
            TransformKind::CopyRows => queries::table_names(),
        }
    }

    /// Build the transformer for a pair of principals
    pub fn build(&self, principals: &Principals) -> SharedTransformer {
        let dest = principals.destination.clone();
        let source = principals.source.clone();

        match self {
            TransformKind::DropIndex | TransformKind::DropTable | TransformKind::DropSequence => {
                let object_type = self.object_type();
                Arc::new(move |row: &Row| -> anyhow::Result<String> {
                    Ok(format!("DROP {} {}.{};\n", object_type, dest, row.text(0)?))
                })
            }
            TransformKind::CopyTableDdl | TransformKind::CopyIndexDdl => {
                let rewrite = IdentifierRewrite::new(source, dest);
                Arc::new(move |row: &Row| copy_ddl(row, &rewrite, ";\n\n"))
            }
            // Sequence DDL is copied with its clauses intact.
            TransformKind::CopySequenceDdl => {
                let rewrite = IdentifierRewrite::new(source, dest).keep_tablespace();
                Arc::new(move |row: &Row| copy_ddl(row, &rewrite, ";\n"))
            }
            TransformKind::CopyRows => Arc::new(move |row: &Row| -> anyhow::Result<String> {
                let table = row.text(0)?;
                Ok(format!(
                    "INSERT INTO {}.{} \nSELECT * FROM {}.{};\n\n",
                    dest, table, source, table
                ))
            }),
        }
    }
}

/// Timestamp comment followed by the retargeted DDL statement
fn copy_ddl(row: &Row, rewrite: &IdentifierRewrite, terminator: &str) -> anyhow::Result<String> {
    let created = row.text(0)?;
    let last_ddl = row.text(1)?;
    let ddl = row.text(2)?;
    if ddl.trim().is_empty() {
        anyhow::bail!("DDL column is empty");
    }

    Ok(format!(
        "-- original create time: {}, last ddl time: {}\n{}{}",
        created,
        last_ddl,
        rewrite.apply(&ddl),
        terminator
    ))
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for TransformKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransformKind::all()
            .into_iter()
            .find(|kind| kind.name() == s.trim())
            .ok_or_else(|| format!("unknown transformer '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use porter_core::RowTransformer;
    use pretty_assertions::assert_eq;

    fn principals() -> Principals {
        Principals::new("HR", "HR_COPY")
    }

    fn row(values: &[&str]) -> Row {
        values.iter().copied().collect()
    }

    #[test]
    fn test_parse_names() {
        for kind in TransformKind::all() {
            assert_eq!(kind.name().parse::<TransformKind>().unwrap(), kind);
        }
        assert!("drop_view".parse::<TransformKind>().is_err());
    }

    #[test]
    fn test_drop_transformers() {
        let drop_index = TransformKind::DropIndex.build(&principals());
        assert_eq!(
            drop_index.transform(&row(&["EMP_IDX"])).unwrap(),
            "DROP INDEX HR_COPY.EMP_IDX;\n"
        );

        let drop_seq = TransformKind::DropSequence.build(&principals());
        assert_eq!(
            drop_seq.transform(&row(&["EMP_SEQ"])).unwrap(),
            "DROP SEQUENCE HR_COPY.EMP_SEQ;\n"
        );
    }

    #[test]
    fn test_copy_rows() {
        let copy = TransformKind::CopyRows.build(&principals());
        assert_eq!(
            copy.transform(&row(&["EMPLOYEES"])).unwrap(),
            "INSERT INTO HR_COPY.EMPLOYEES \nSELECT * FROM HR.EMPLOYEES;\n\n"
        );
    }

    #[test]
    fn test_copy_table_ddl_strips_tablespace() {
        let copy = TransformKind::CopyTableDdl.build(&principals());
        let out = copy
            .transform(&row(&[
                "2020-01-01",
                "2021-06-30",
                "\n  CREATE TABLE \"HR\".\"EMPLOYEES\" (\"ID\" NUMBER)\n  TABLESPACE \"USERS\"",
            ]))
            .unwrap();
        assert_eq!(
            out,
            "-- original create time: 2020-01-01, last ddl time: 2021-06-30\n\
             CREATE TABLE \"HR_COPY\".\"EMPLOYEES\" (\"ID\" NUMBER);\n\n"
        );
    }

    #[test]
    fn test_copy_sequence_ddl_keeps_clauses() {
        let copy = TransformKind::CopySequenceDdl.build(&principals());
        let out = copy
            .transform(&row(&[
                "2020-01-01",
                "2020-01-01",
                "CREATE SEQUENCE \"HR\".\"EMP_SEQ\"\n  TABLESPACE \"USERS\"",
            ]))
            .unwrap();
        assert!(out.ends_with("CREATE SEQUENCE \"HR_COPY\".\"EMP_SEQ\"\n  TABLESPACE \"USERS\";\n"));
    }

    #[test]
    fn test_copy_ddl_rejects_short_rows() {
        let copy = TransformKind::CopyIndexDdl.build(&principals());
        assert!(copy.transform(&row(&["2020-01-01"])).is_err());
        assert!(copy.transform(&row(&["a", "b", "  "])).is_err());
    }

    #[test]
    fn test_default_roles_and_queries() {
        assert_eq!(TransformKind::DropTable.default_role(), ConnectionRole::Destination);
        assert_eq!(TransformKind::CopyRows.default_role(), ConnectionRole::Source);
        assert!(TransformKind::CopyIndexDdl
            .default_query(&principals())
            .contains("'HR'"));
    }
}
