use crate::*;

#[test]
fn parse_character_reads_full_export() {
    let text = r#"{
        "kind": "character",
        "data": {
            "name": "田中 太郎",
            "memo": "ふりがな：たなか たろう\n共鳴感情・表：友情",
            "params": [
                { "label": "身体", "value": "3" },
                { "label": "運勢", "value": "8" }
            ],
            "commands": "2DM<=5 〈剣術〉\n1DM<=3 〈∞共鳴〉",
            "status": []
        }
    }"#;
    let model = parse_character(text).unwrap();
    assert_eq!(model.name, "田中 太郎");
    assert_eq!(model.furigana.as_deref(), Some("たなか たろう"));
    assert_eq!(model.stats[0].value, 3);
    // Raw value survives extraction; clamping happens when the chart is drawn.
    assert_eq!(model.stats[7].value, 8);
    assert_eq!(model.skills.len(), 2);
    assert_eq!(model.resonance.front, "友情");
}

#[test]
fn parse_character_tolerates_sparse_data() {
    let model = parse_character(r#"{"data":{"params":null}}"#).unwrap();
    assert_eq!(model, CharacterModel::default());
}

#[test]
fn parse_character_rejects_malformed_json_with_parser_message() {
    let err = parse_character(r#"{"data": {"name": "x",}"#).unwrap_err();
    let Error::InputJson { message } = &err else {
        panic!("expected InputJson, got {err:?}");
    };
    assert!(message.contains("line 1"), "message: {message}");
    assert!(err.to_string().starts_with("Character JSON parse error: "));
}

#[test]
fn parse_character_requires_data_object() {
    let err = parse_character(r#"{"name": "x"}"#).unwrap_err();
    assert!(err.to_string().contains("missing field `data`"), "{err}");
}

#[test]
fn parse_document_rejects_blank_input() {
    assert!(matches!(parse_document("  \n "), Err(Error::EmptyInput)));
}

#[test]
fn parse_character_defaults_mistyped_sub_fields() {
    let model = parse_character(
        r#"{"data":{"name":"太郎","params":[{"label":null,"value":"3"},"junk",7,{"label":"身体","value":"4"}]}}"#,
    )
    .unwrap();
    assert_eq!(model.name, "太郎");
    assert_eq!(model.stats[0].label, "身体");
    assert_eq!(model.stats[0].value, 4);
    assert!(model.stats[1..].iter().all(|s| s.value == 0));

    let model = parse_character(r#"{"data":{"name":42}}"#).unwrap();
    assert_eq!(model.name, "42");

    let model = parse_character(
        r#"{"data":{"name":["x"],"memo":{"a":1},"params":{"身体":3},"commands":["2DM<=5 〈剣術〉"]}}"#,
    )
    .unwrap();
    assert_eq!(model, CharacterModel::default());

    let doc = parse_document(r#"{"data":{"params":[{"label":false,"value":"3"}]}}"#).unwrap();
    assert_eq!(doc.data.params.len(), 1);
    assert_eq!(doc.data.params[0].label, "");
}
