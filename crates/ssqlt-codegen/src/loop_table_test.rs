use super::*;

#[test]
fn test_create_sql() {
    assert_eq!(
        LoopTable::new("transducer").create_sql(),
        "CREATE TABLE transducer._loop (loop_start INT NOT NULL);"
    );
}

#[test]
fn test_markers() {
    let table = LoopTable::new("sync");
    assert_eq!(table.emit_sql(), "INSERT INTO sync._loop VALUES (2);");
    assert_eq!(table.sentinel_sql(), "INSERT INTO sync._loop VALUES (2);");
    assert_eq!(table.absorb_sql(), "INSERT INTO sync._loop VALUES (-1);");
    assert_eq!(table.clear_absorb_sql(), "DELETE FROM sync._loop WHERE loop_start < 0;");
    assert_eq!(table.clear_sql(), "DELETE FROM sync._loop;");
}

#[test]
fn test_conditions() {
    let table = LoopTable::new("sync");
    assert_eq!(table.active_condition(), "EXISTS (SELECT 1 FROM sync._loop)");
    assert_eq!(
        table.incomplete_condition(),
        "EXISTS (SELECT 1 FROM sync._loop WHERE ABS(loop_start) <> (SELECT COUNT(*) FROM sync._loop))"
    );
}

#[test]
fn test_waiting_condition() {
    assert_eq!(
        LoopTable::new("s").waiting_condition(),
        "NOT EXISTS (SELECT 1 FROM s._loop) OR EXISTS (SELECT 1 FROM s._loop WHERE ABS(loop_start) <> (SELECT COUNT(*) FROM s._loop))"
    );
}

/// Evaluate the guard over an in-memory loop table
fn fan_out_complete(rows: &[i32]) -> bool {
    let count = rows.len() as i32;
    rows.iter().all(|v| v.abs() == count)
}

#[test]
fn test_guard_protocol_states() {
    let emit = [FAN_OUT_MARKER];
    let complete = [FAN_OUT_MARKER, FAN_OUT_MARKER];
    let absorbing = [FAN_OUT_MARKER, FAN_OUT_MARKER, ABSORB_MARKER];

    assert!(!fan_out_complete(&emit));
    assert!(fan_out_complete(&complete));
    assert!(!fan_out_complete(&absorbing));
}
