//! Loop-marker table: the only state shared between trigger firings
//!
//! One synchronization round moves through these states:
//!
//! | state            | loop rows          | entered when                                        |
//! |------------------|--------------------|-----------------------------------------------------|
//! | idle             | none               | start, or the cross-schema function finished        |
//! | emitting         | `2`                | a staging trigger saw an empty table and emitted    |
//! | fan-out complete | `2, 2`             | the join function wrote the sentinel before the last table |
//! | absorbing        | `2, 2` plus `-1`   | the cross-schema function inserted into the other side |
//!
//! Staging triggers emit only when the table is empty and absorb otherwise.
//! The cross-schema function proceeds only when the table is non-empty and
//! every row's absolute value equals the row count, which holds for `2, 2`
//! and fails for any partial or absorbing state. It always ends by clearing
//! the table. A join function whose translation yields no rows clears it too,
//! so a change with no counterpart on the other side ends its round.
//!
//! Two rounds interleaving in one transaction are not told apart.

/// Unqualified loop table name
pub const LOOP_TABLE: &str = "_loop";

/// Marker value for one round: the emit marker plus the fan-out sentinel
pub const FAN_OUT_MARKER: i32 = 2;

/// Marker flagging that propagated rows are being absorbed
pub const ABSORB_MARKER: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopTable {
    schema: String,
}

impl LoopTable {
    pub fn new(schema: &str) -> Self {
        Self {
            schema: schema.to_string(),
        }
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, LOOP_TABLE)
    }

    pub fn create_sql(&self) -> String {
        format!(
            "CREATE TABLE {} (loop_start INT NOT NULL);",
            self.qualified_name()
        )
    }

    /// Condition true while any round is in flight
    pub fn active_condition(&self) -> String {
        format!("EXISTS (SELECT 1 FROM {})", self.qualified_name())
    }

    /// Condition true until the fan-out of the current round is complete
    pub fn incomplete_condition(&self) -> String {
        let name = self.qualified_name();
        format!(
            "EXISTS (SELECT 1 FROM {name} WHERE ABS(loop_start) <> (SELECT COUNT(*) FROM {name}))"
        )
    }

    /// Condition under which the cross-schema function must not run yet:
    /// no round is in flight, or its fan-out is incomplete
    pub fn waiting_condition(&self) -> String {
        format!(
            "NOT {} OR {}",
            self.active_condition(),
            self.incomplete_condition()
        )
    }

    /// Statement recording an emitted change
    pub fn emit_sql(&self) -> String {
        self.insert_marker(FAN_OUT_MARKER)
    }

    /// Statement recording a fully fanned-out change
    pub fn sentinel_sql(&self) -> String {
        self.insert_marker(FAN_OUT_MARKER)
    }

    /// Statement switching the round to absorb mode
    pub fn absorb_sql(&self) -> String {
        self.insert_marker(ABSORB_MARKER)
    }

    /// Statement a staging trigger runs when it absorbs an echo
    pub fn clear_absorb_sql(&self) -> String {
        format!("DELETE FROM {} WHERE loop_start < 0;", self.qualified_name())
    }

    /// Statement resetting the table to idle
    pub fn clear_sql(&self) -> String {
        format!("DELETE FROM {};", self.qualified_name())
    }

    fn insert_marker(&self, value: i32) -> String {
        format!("INSERT INTO {} VALUES ({});", self.qualified_name(), value)
    }
}

#[cfg(test)]
#[path = "loop_table_test.rs"]
mod tests;
