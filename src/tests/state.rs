use super::state_cell;

#[test]
fn test_readers_see_writes_immediately() {
    let (mut writer, reader) = state_cell(Some("hero".to_string()));
    let other = reader.clone();

    assert!(writer.set(Some("about".to_string())));

    assert_eq!(reader.get().as_deref(), Some("about"));
    assert_eq!(other.get().as_deref(), Some("about"));
    assert_eq!(reader.version(), 1);
}

#[test]
fn test_identical_set_does_not_bump_version() {
    let (mut writer, reader) = state_cell(3_u8);

    assert!(!writer.set(3));
    assert_eq!(reader.version(), 0);

    assert!(writer.set(4));
    assert!(!writer.set(4));
    assert_eq!(reader.version(), 1);
}

#[test]
fn test_update_always_publishes() {
    let (mut writer, reader) = state_cell(vec![1, 2]);
    writer.update(|v| v.push(3));

    assert_eq!(*reader.borrow(), vec![1, 2, 3]);
    assert_eq!(writer.reader().version(), 1);
}
