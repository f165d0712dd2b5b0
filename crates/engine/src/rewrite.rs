//! # Identifier Rewrite
//!
//! Textual helpers used by the `make` transformers to retarget DDL extracted
//! from the source catalog:
//!
//! - [`rewrite_principal`] replaces every quoted occurrence of the source
//!   principal (`"HR"`) with the destination principal (`"HR_COPY"`).
//! - [`strip_tablespace`] removes `TABLESPACE "<name>"` clauses emitted on
//!   their own line.
//!
//! Both operate on text, not on parsed SQL. A quoted identifier that happens
//! to equal the source principal (a column named `"HR"`, say) is rewritten
//! too, and tablespace clauses laid out differently are left in place.

use regex::Regex;
use std::sync::LazyLock;

/// Tablespace clause as laid out by `DBMS_METADATA.GET_DDL`
const TABLESPACE_PATTERN: &str = r#"\n  TABLESPACE "[^"]*""#;

static TABLESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TABLESPACE_PATTERN).expect("valid regex"));

/// Replace quoted occurrences of `from` with quoted `to`
pub fn rewrite_principal(ddl: &str, from: &str, to: &str) -> String {
    ddl.replace(&format!("\"{}\"", from), &format!("\"{}\"", to))
}

/// Remove line-leading `TABLESPACE "<name>"` clauses
pub fn strip_tablespace(ddl: &str) -> String {
    TABLESPACE_RE.replace_all(ddl, "").into_owned()
}

/// Source-to-destination rewrite applied to extracted DDL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierRewrite {
    /// Source principal
    pub from: String,
    /// Destination principal
    pub to: String,
    /// Whether tablespace clauses are removed
    pub strip_tablespace: bool,
}

impl IdentifierRewrite {
    /// Rewrite principals and strip tablespace clauses
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            strip_tablespace: true,
        }
    }

    /// Rewrite principals only
    pub fn keep_tablespace(mut self) -> Self {
        self.strip_tablespace = false;
        self
    }

    /// Apply to a DDL statement; surrounding whitespace is trimmed first
    pub fn apply(&self, ddl: &str) -> String {
        let rewritten = rewrite_principal(ddl.trim(), &self.from, &self.to);
        if self.strip_tablespace {
            strip_tablespace(&rewritten)
        } else {
            rewritten
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TABLE_DDL: &str = "\n  CREATE TABLE \"HR\".\"EMPLOYEES\" \n   (\t\"ID\" NUMBER\n   ) SEGMENT CREATION IMMEDIATE\n  TABLESPACE \"USERS\"  ";

    #[test]
    fn test_rewrite_principal() {
        assert_eq!(
            rewrite_principal("CREATE INDEX \"HR\".\"I\" ON \"HR\".\"T\"", "HR", "HR_COPY"),
            "CREATE INDEX \"HR_COPY\".\"I\" ON \"HR_COPY\".\"T\""
        );
    }

    #[test]
    fn test_unquoted_principal_is_untouched() {
        assert_eq!(rewrite_principal("SELECT HR FROM dual", "HR", "X"), "SELECT HR FROM dual");
    }

    #[test]
    fn test_quoted_column_named_like_principal_is_rewritten() {
        assert_eq!(
            rewrite_principal("(\"HR\" NUMBER)", "HR", "HR_COPY"),
            "(\"HR_COPY\" NUMBER)"
        );
    }

    #[test]
    fn test_strip_tablespace() {
        assert_eq!(
            strip_tablespace("CREATE TABLE T (ID NUMBER)\n  TABLESPACE \"USERS\""),
            "CREATE TABLE T (ID NUMBER)"
        );
        assert_eq!(
            strip_tablespace("CREATE TABLE T TABLESPACE \"USERS\""),
            "CREATE TABLE T TABLESPACE \"USERS\""
        );
    }

    #[test]
    fn test_apply() {
        let rewrite = IdentifierRewrite::new("HR", "HR_COPY");
        assert_eq!(
            rewrite.apply(TABLE_DDL),
            "CREATE TABLE \"HR_COPY\".\"EMPLOYEES\" \n   (\t\"ID\" NUMBER\n   ) SEGMENT CREATION IMMEDIATE"
        );

        let kept = IdentifierRewrite::new("HR", "HR_COPY").keep_tablespace();
        assert!(kept.apply(TABLE_DDL).ends_with("TABLESPACE \"USERS\""));
    }
}
