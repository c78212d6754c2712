#[cfg(test)]
mod integration_tests {
    use env_logger;
    use log::debug;
    use parser_scanner::{
        either, identity, list, list_either, pack, sequential, Error, Scanner, Value,
    };
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn init() {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Trace)
            .is_test(true)
            .try_init();
    }

    const TEXT_CLIENT: &str = "\
// colors are ARGB
TID_GAME_CONNECTING  0xffffffff { IDS_TEXTCLIENT_INC_000000 }
TID_GAME_LOGIN       0xff00ff00 { IDS_TEXTCLIENT_INC_000001 }

TID_GAME_QUIT\t0xffff0000\t{\tIDS_TEXTCLIENT_INC_000002\t}
";

    const PROP_ITEM_ETC: &str = "\
Piercing II_SYS_SYS_SCR_PIERCE
{
    DST_STR 1
    DST_DEX 2
}

SetItem 1 IDS_PROPITEMETC_TXT_000001
{
    Elem
    {
        II_ARM_M_CHR_DARKNESS01HAT  PARTS_CAP
        II_ARM_M_CHR_DARKNESS01SUIT PARTS_UPPER_BODY
    }
    Avail
    {
        DST_HP_MAX 100 2
        DST_STR    5   4
    }
}
";

    fn text_client() -> Scanner {
        list(pack(5), None, None, Some("\nTID_NEW 0xffffffff { IDS_NEW }"))
    }

    fn prop_item_etc() -> Scanner {
        let bonus_pairs = list(pack(2), Some("{"), Some("}"), Some("\n    DST_NONE 0"));
        let set_block = list_either(
            Some("{"),
            [
                ("Elem", list(pack(2), Some("{"), Some("}"), Some("\n        II_NONE PARTS_NONE"))),
                ("Avail", list(sequential![pack(2), identity()], Some("{"), Some("}"), Some("\n        DST_NONE 0 0"))),
            ],
            Some("}"),
            Some("\n    Elem { }"),
            &[("Elem", " { }"), ("Avail", " { }")],
        );

        list(
            either(
                [
                    ("Piercing", sequential![identity(), bonus_pairs.clone()]),
                    ("SetItem", sequential![identity(), identity(), set_block]),
                    ("RandomOptItem", sequential![identity(), identity(), identity(), identity(), bonus_pairs]),
                ],
                &[],
            ),
            None,
            None,
            None,
        )
    }

    fn strip_comments(content: &str) -> String {
        content
            .lines()
            .filter(|line| !line.trim_start().starts_with("//"))
            .map(|line| format!("{}\n", line))
            .collect()
    }

    #[test]
    fn test_text_client_parse() {
        init();
        let content = strip_comments(TEXT_CLIENT);
        let parsed = text_client().parse(&content).unwrap();
        let rows = parsed.as_seq().unwrap();
        debug!("text client rows: {}", parsed);

        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[2],
            Value::tokens(["TID_GAME_QUIT", "0xffff0000", "{", "IDS_TEXTCLIENT_INC_000002", "}"])
        );
    }

    #[test]
    fn test_text_client_edit_single_color() {
        init();
        let content = strip_comments(TEXT_CLIENT);
        let scanner = text_client();
        let mut value = scanner.parse(&content).unwrap();
        *value.get_mut(1).unwrap().get_mut(1).unwrap() = Value::token("0xff0000ff");

        let fixed = scanner.fix(&content, &value).unwrap();
        assert_eq!(fixed, content.replace("0xff00ff00", "0xff0000ff"));
    }

    #[test]
    fn test_text_client_append_row() {
        init();
        let content = strip_comments(TEXT_CLIENT);
        let scanner = text_client();
        let mut value = scanner.parse(&content).unwrap();
        if let Value::Seq(rows) = &mut value {
            rows.push(Value::tokens(["TID_GAME_BYE", "0xff000000", "{", "IDS_BYE", "}"]));
        }

        let fixed = scanner.fix(&content, &value).unwrap();
        assert!(fixed.ends_with("\t}\nTID_GAME_BYE 0xff000000 { IDS_BYE }\n"));
        assert_eq!(scanner.parse(&fixed).unwrap(), value);
    }

    #[test]
    fn test_prop_item_etc_parse() {
        init();
        let parsed = prop_item_etc().parse(PROP_ITEM_ETC).unwrap();
        let records = parsed.as_seq().unwrap();
        assert_eq!(records.len(), 2);

        let (kind, data) = records[1].as_tagged().unwrap();
        assert_eq!(kind, "SetItem");
        let blocks = data.as_seq().unwrap()[2].as_seq().unwrap();
        assert_eq!(
            blocks[1],
            Value::tagged(
                "Avail",
                Value::seq([
                    Value::seq([Value::tokens(["DST_HP_MAX", "100"]), Value::token("2")]),
                    Value::seq([Value::tokens(["DST_STR", "5"]), Value::token("4")]),
                ])
            )
        );
    }

    #[test]
    fn test_prop_item_etc_edit_keeps_layout() {
        init();
        let scanner = prop_item_etc();
        let mut value = scanner.parse(PROP_ITEM_ETC).unwrap();

        // Change the piercing bonus value and drop the last set bonus
        let piercing = value.get_mut(0).unwrap();
        if let Value::Tagged { data, .. } = piercing {
            *data.get_mut(1).unwrap().get_mut(1).unwrap() =
                Value::tokens(["DST_DEX", "3"]);
        }
        let set_item = value.get_mut(1).unwrap();
        if let Value::Tagged { data, .. } = set_item {
            let avail = data.get_mut(2).unwrap().get_mut(1).unwrap();
            if let Value::Tagged { data, .. } = avail {
                if let Value::Seq(bonuses) = data.as_mut() {
                    bonuses.pop();
                }
            }
        }

        let fixed = scanner.fix(PROP_ITEM_ETC, &value).unwrap();
        let expected = PROP_ITEM_ETC
            .replace("DST_DEX 2", "DST_DEX 3")
            .replace("        DST_HP_MAX 100 2\n        DST_STR    5   4\n", "        DST_HP_MAX 100 2\n");
        assert_eq!(fixed, expected);
        assert_eq!(scanner.parse(&fixed).unwrap(), value);
    }

    #[test_case("PACK1_1 PACK1_2 IDENTITY1" ; "pack then identity")]
    #[test_case("  PACK1_1\tPACK1_2\n\nIDENTITY1  \n" ; "odd whitespace")]
    #[test_case("\"quoted pack\" \"second one\" last" ; "quoted tokens")]
    fn test_round_trip_sequential(content: &str) {
        let scanner = sequential![pack(2), identity()];
        let parsed = scanner.parse(content).unwrap();
        assert_eq!(scanner.fix(content, &parsed).unwrap(), content);
    }

    #[test_case(text_client(), TEXT_CLIENT ; "text client")]
    #[test_case(prop_item_etc(), PROP_ITEM_ETC ; "prop item etc")]
    #[test_case(text_client(), "" ; "empty text client")]
    #[test_case(prop_item_etc(), "\n\n   \n" ; "only whitespace")]
    fn test_round_trip_files(scanner: Scanner, content: &str) {
        init();
        let content = strip_comments(content);
        let parsed = scanner.parse(&content).unwrap();
        assert_eq!(scanner.fix(&content, &parsed).unwrap(), content);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let scanner = prop_item_etc();
        let first = scanner.parse(PROP_ITEM_ETC).unwrap();
        for _ in 0..5 {
            assert_eq!(scanner.parse(PROP_ITEM_ETC).unwrap(), first);
        }
    }

    #[test]
    fn test_pack_exactness() {
        for quantity in 0..6 {
            let content = "a b c d";
            let result = sequential![pack(quantity), list(identity(), None, None, None)].parse(content);
            if quantity <= 4 {
                let value = result.unwrap();
                assert_eq!(value.as_seq().unwrap()[0].as_seq().unwrap().len(), quantity);
            } else {
                assert_eq!(result, Err(Error::NotEnoughTokens { found: 4, expected: quantity }));
            }
        }
    }

    #[test]
    fn test_either_example() {
        let scanner = either([("DOG", pack(2)), ("CAT", identity())], &[]);
        assert_eq!(
            scanner.parse("CAT felix").unwrap(),
            Value::tagged("CAT", Value::token("felix"))
        );
        assert!(scanner.parse("FISH nemo").is_err());
    }

    #[test]
    fn test_list_growth_needs_template() {
        let bare = list(identity(), None, None, None);
        assert!(bare.fix("a", &Value::tokens(["a", "b"])).is_err());

        let templated = list(identity(), None, None, Some(" x"));
        assert_eq!(templated.fix("a", &Value::tokens(["a", "b"])).unwrap(), "a b");
    }

    #[test]
    fn test_value_from_json() {
        let scanner = sequential![identity(), "is", identity()];
        let value: Value = serde_json::from_str(r#"["tata", "is", "old"]"#).unwrap();
        assert_eq!(scanner.fix("toto is young", &value).unwrap(), "tata is old");
    }

    #[test]
    fn test_shared_across_threads() {
        let scanner = std::sync::Arc::new(text_client());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let scanner = scanner.clone();
                std::thread::spawn(move || {
                    let content = format!("TID_{i} 0x0 {{ IDS_{i} }}");
                    let parsed = scanner.parse(&content).unwrap();
                    scanner.fix(&content, &parsed).unwrap() == content
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
