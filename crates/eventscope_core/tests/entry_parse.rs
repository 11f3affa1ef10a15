use eventscope_core::{parse_entries, SemiStructuredEntry, CALLER_LABELS, PARTY_LABELS};

fn entry(role: Option<&str>, name: Option<&str>, phone: Option<&str>, id_card: Option<&str>) -> SemiStructuredEntry {
    SemiStructuredEntry {
        role: role.map(str::to_string),
        name: name.map(str::to_string),
        phone: phone.map(str::to_string),
        id_card: id_card.map(str::to_string),
    }
}

#[test]
fn party_entry_with_role_name_phone() {
    let entries = parse_entries("角色:报警人|姓名:张三|电话:13800000000", &PARTY_LABELS);
    assert_eq!(
        entries,
        vec![entry(Some("报警人"), Some("张三"), Some("13800000000"), None)]
    );
}

#[test]
fn caller_entries_keep_source_order() {
    let entries = parse_entries("姓名:甲|电话:111;姓名:乙|电话:222", &CALLER_LABELS);
    assert_eq!(
        entries,
        vec![
            entry(None, Some("甲"), Some("111"), None),
            entry(None, Some("乙"), Some("222"), None),
        ]
    );
}

#[test]
fn empty_or_absent_input_yields_no_entries() {
    assert!(parse_entries("", &CALLER_LABELS).is_empty());
    assert!(parse_entries("  ;  ; ", &PARTY_LABELS).is_empty());
    assert!(CALLER_LABELS.parse(None).is_empty());
}

#[test]
fn labels_in_any_order_and_missing_labels_are_tolerated() {
    let entries = parse_entries(
        " 身份证: 330102199001011234 | 姓名: 王五 ",
        &CALLER_LABELS,
    );
    assert_eq!(
        entries,
        vec![entry(None, Some("王五"), None, Some("330102199001011234"))]
    );
}

#[test]
fn unknown_pieces_are_ignored() {
    let entries = parse_entries("地址:某街道|姓名:赵六|备注", &PARTY_LABELS);
    assert_eq!(entries, vec![entry(None, Some("赵六"), None, None)]);
}

#[test]
fn caller_variant_does_not_read_roles() {
    let entries = parse_entries("角色:当事人|姓名:甲", &CALLER_LABELS);
    assert_eq!(entries[0].role, None);
    assert_eq!(CALLER_LABELS.role_of(&entries[0]), Some("报警人"));
}

#[test]
fn party_entries_can_have_heterogeneous_roles() {
    let entries = parse_entries(
        "角色:报警人|姓名:甲;角色:对方|姓名:乙|电话:139****0000",
        &PARTY_LABELS,
    );
    let roles: Vec<_> = entries
        .iter()
        .map(|entry| PARTY_LABELS.role_of(entry))
        .collect();
    assert_eq!(roles, vec![Some("报警人"), Some("对方")]);
}

#[test]
fn repeated_label_keeps_last_value_and_empty_value_sets_nothing() {
    let entries = parse_entries("姓名:甲|姓名:乙|电话:", &CALLER_LABELS);
    assert_eq!(entries, vec![entry(None, Some("乙"), None, None)]);
}

#[test]
fn display_follows_table_order() {
    let entries = parse_entries("电话:111|角色:对方|姓名:乙", &PARTY_LABELS);
    assert_eq!(PARTY_LABELS.display(&entries[0]), "角色: 对方 | 姓名: 乙 | 电话: 111");
}
