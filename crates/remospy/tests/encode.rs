//! Argument encoding: local names, table layout, host templates and failures.

use pretty_assertions::assert_eq;
use remospy::{
    CapturedValue, Color3, ColorSequenceKeypoint, EncodeError, Encoded, Encoder, FormattingOptions, GenerationSettings,
    HierarchyResolver, InstanceRef, InstanceRegistry, InstanceRole, MAX_TABLE_DEPTH, NumberSequenceKeypoint, Statement,
    Vector3, render_statements,
};

fn part() -> InstanceRef {
    InstanceRef::new("0x10", "Part", "Part").child_of(
        InstanceRef::new("0x03", "Workspace", "Workspace")
            .with_role(InstanceRole::Workspace)
            .child_of(InstanceRef::game()),
    )
}

/// Encodes `value` as argument `index` and renders the produced statements
/// (hoisted locals first).
fn encode_text(index: usize, value: &CapturedValue, settings: &GenerationSettings) -> (String, String) {
    let mut registry = InstanceRegistry::new();
    let mut encoder = Encoder::new(settings, &mut registry, &HierarchyResolver);
    let encoded = encoder.encode(index, value).expect("value encodes");
    let mut statements = encoder.take_hoisted();
    let name = encoded.name().to_owned();
    if let Encoded::Bound { statement, .. } = encoded {
        statements.push(statement);
    }
    (render_statements(&statements, FormattingOptions::default()), name)
}

fn by_path() -> GenerationSettings {
    GenerationSettings::by_path()
}

#[test]
fn scalar_locals_are_named_by_kind_and_position() {
    let settings = by_path();
    assert_eq!(
        encode_text(1, &CapturedValue::from("hello"), &settings),
        ("local _4lveString1 = \"hello\";\n".to_owned(), "_4lveString1".to_owned())
    );
    assert_eq!(
        encode_text(2, &CapturedValue::from(42), &settings),
        ("local _4lveNumber2 = 42;\n".to_owned(), "_4lveNumber2".to_owned())
    );
    assert_eq!(
        encode_text(3, &CapturedValue::from(false), &settings),
        ("local _4lveBoolean3 = false;\n".to_owned(), "_4lveBoolean3".to_owned())
    );
    assert_eq!(
        encode_text(4, &CapturedValue::Nil, &settings),
        ("local _4lveNil4 = nil;\n".to_owned(), "_4lveNil4".to_owned())
    );
}

#[test]
fn sequential_keys_are_positional() {
    let value = CapturedValue::array(["a", "b", "c"].map(CapturedValue::from));
    let (text, _) = encode_text(1, &value, &by_path());
    assert_eq!(text, "local _4lveTable1 = {\n  \"a\",\n  \"b\",\n  \"c\"\n};\n");
}

#[test]
fn gaps_and_out_of_order_keys_are_computed() {
    let value = CapturedValue::table([
        (CapturedValue::from(1), CapturedValue::from("a")),
        (CapturedValue::from(2), CapturedValue::from("b")),
        (CapturedValue::from(4), CapturedValue::from("d")),
        (CapturedValue::from(0.5), CapturedValue::from("half")),
    ]);
    let (text, _) = encode_text(1, &value, &by_path());
    assert_eq!(
        text,
        "local _4lveTable1 = {\n  \"a\",\n  \"b\",\n  [4] = \"d\",\n  [0.5] = \"half\"\n};\n"
    );

    // the slot counter only advances on positional entries
    let shuffled = CapturedValue::table([
        (CapturedValue::from(2), CapturedValue::from("x")),
        (CapturedValue::from(1), CapturedValue::from("y")),
    ]);
    let (text, _) = encode_text(1, &shuffled, &by_path());
    assert_eq!(text, "local _4lveTable1 = {\n  [2] = \"x\",\n  \"y\"\n};\n");
}

#[test]
fn string_keys() {
    let value = CapturedValue::table([
        (CapturedValue::from("name"), CapturedValue::from("sword")),
        (CapturedValue::from("my key"), CapturedValue::from(1)),
        (CapturedValue::from("end"), CapturedValue::from(2)),
        (CapturedValue::from(true), CapturedValue::from(3)),
    ]);
    let (text, _) = encode_text(1, &value, &by_path());
    assert_eq!(
        text,
        "local _4lveTable1 = {\n  name = \"sword\",\n  [\"my key\"] = 1,\n  [\"end\"] = 2,\n  [true] = 3\n};\n"
    );
}

#[test]
fn nested_tables_are_hoisted() {
    let value = CapturedValue::table([
        (
            CapturedValue::from("a"),
            CapturedValue::array([CapturedValue::from(1), CapturedValue::from(2)]),
        ),
        (CapturedValue::from("b"), CapturedValue::from(3)),
    ]);
    let (text, name) = encode_text(1, &value, &by_path());
    assert_eq!(name, "_4lveTable1");
    assert_eq!(
        text,
        "local _4lveTable1_1 = {
  1,
  2
};
local _4lveTable1 = {
  a = _4lveTable1_1,
  b = 3
};
"
    );
}

#[test]
fn sibling_tables_get_distinct_names() {
    let value = CapturedValue::array([
        CapturedValue::array([CapturedValue::array([CapturedValue::from(1)])]),
        CapturedValue::array([CapturedValue::from(2)]),
    ]);
    let (text, _) = encode_text(5, &value, &by_path());
    assert_eq!(
        text,
        "local _4lveTable5_1 = {
  1
};
local _4lveTable5_2 = {
  _4lveTable5_1
};
local _4lveTable5_3 = {
  2
};
local _4lveTable5 = {
  _4lveTable5_2,
  _4lveTable5_3
};
"
    );
}

#[test]
fn sorted_keys() {
    let settings = GenerationSettings {
        sort_table_keys: true,
        ..by_path()
    };
    let value = CapturedValue::table([
        (CapturedValue::from("b"), CapturedValue::from(1)),
        (CapturedValue::from("a"), CapturedValue::from(2)),
        (CapturedValue::from(2), CapturedValue::from("y")),
        (CapturedValue::from(1), CapturedValue::from("x")),
    ]);
    let (text, _) = encode_text(1, &value, &settings);
    assert_eq!(
        text,
        "local _4lveTable1 = {\n  \"x\",\n  \"y\",\n  a = 2,\n  b = 1\n};\n"
    );
}

#[test]
fn instances_by_path() {
    let (text, name) = encode_text(1, &CapturedValue::from(part()), &by_path());
    assert_eq!(text, "local _4lveInstance1 = workspace.Part;\n");
    assert_eq!(name, "_4lveInstance1");
}

#[test]
fn instances_by_id_are_deferred_and_deduplicated() {
    let settings = GenerationSettings::default();
    let mut registry = InstanceRegistry::new();
    let mut encoder = Encoder::new(&settings, &mut registry, &HierarchyResolver);

    let first = encoder.encode(1, &CapturedValue::from(part())).unwrap();
    let second = encoder.encode(2, &CapturedValue::from(part())).unwrap();
    let nested = encoder
        .encode(3, &CapturedValue::array([CapturedValue::from(part())]))
        .unwrap();
    let other = encoder
        .encode(
            4,
            &CapturedValue::array([CapturedValue::from(InstanceRef::new("0x11", "Other", "Part"))]),
        )
        .unwrap();

    assert_eq!(first, Encoded::Deferred("_4lveInstance1".to_owned()));
    assert_eq!(second, Encoded::Deferred("_4lveInstance1".to_owned()));
    let Encoded::Bound { statement, .. } = nested else {
        panic!("tables are bound to a local");
    };
    assert_eq!(
        render_statements(&[statement], FormattingOptions::default()),
        "local _4lveTable3 = {\n  _4lveInstance1\n};\n"
    );
    assert_eq!(other.name(), "_4lveTable4");

    let names: Vec<&str> = registry.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["_4lveInstance1", "_4lveInstance4_2"]);
    assert_eq!(registry.get("_4lveInstance4_2").unwrap().debug_id, "0x11");
}

#[test]
fn host_value_templates() {
    let settings = GenerationSettings {
        use_now_date_time: false,
        ..by_path()
    };
    let cases = [
        (
            CapturedValue::DateTime {
                unix_timestamp_millis: 1_700_000_000_000,
            },
            "local _4lveDateTime1 = DateTime.fromUnixTimestampMillis(1700000000000);\n",
        ),
        (
            CapturedValue::PathWaypoint {
                position: Vector3::new(1.0, 2.0, 3.0),
                action: "Enum.PathWaypointAction.Jump".to_owned(),
            },
            "local _4lvePathWaypoint1 = PathWaypoint.new(Vector3.new(1, 2, 3), Enum.PathWaypointAction.Jump);\n",
        ),
        (
            CapturedValue::Ray {
                origin: Vector3::new(0.0, 10.0, 0.0),
                direction: Vector3::new(0.0, -1.5, 0.0),
            },
            "local _4lveRay1 = Ray.new(Vector3.new(0, 10, 0), Vector3.new(0, -1.5, 0));\n",
        ),
        (
            CapturedValue::Region3 {
                position: Vector3::new(0.0, 5.0, 0.0),
                size: Vector3::new(4.0, 2.0, 4.0),
            },
            "local _4lveRegion3_1 = Region3.new(Vector3.new(-2, 4, -2), Vector3.new(2, 6, 2));\n",
        ),
        (
            CapturedValue::ColorSequence(vec![
                ColorSequenceKeypoint {
                    time: 0.0,
                    value: Color3::new(1.0, 0.0, 0.0),
                },
                ColorSequenceKeypoint {
                    time: 1.0,
                    value: Color3::new(0.0, 0.5, 1.0),
                },
            ]),
            "local _4lveColorSequence1 = ColorSequence.new({ColorSequenceKeypoint.new(0, Color3.fromRGB(255, 0, 0)), \
             ColorSequenceKeypoint.new(1, Color3.fromRGB(0, 128, 255))});\n",
        ),
        (
            CapturedValue::NumberSequence(vec![
                NumberSequenceKeypoint {
                    time: 0.0,
                    value: 1.0,
                    envelope: 0.0,
                },
                NumberSequenceKeypoint {
                    time: 1.0,
                    value: 0.25,
                    envelope: 0.1,
                },
            ]),
            "local _4lveNumberSequence1 = NumberSequence.new({NumberSequenceKeypoint.new(0, 1, 0), \
             NumberSequenceKeypoint.new(1, 0.25, 0.1)});\n",
        ),
        (
            CapturedValue::Other {
                type_name: "UDim2".to_owned(),
                text: "{0, 10}, {0, 20}".to_owned(),
            },
            "local _4lveUDim2_1 = UDim2.new({0, 10}, {0, 20});\n",
        ),
    ];
    for (value, expected) in cases {
        assert_eq!(encode_text(1, &value, &settings).0, expected);
    }
}

#[test]
fn date_time_now() {
    let value = CapturedValue::DateTime {
        unix_timestamp_millis: 5,
    };
    assert_eq!(
        encode_text(2, &value, &GenerationSettings::default()).0,
        "local _4lveDateTime2 = DateTime.now();\n"
    );
}

#[test]
fn invalid_keys_fail_and_roll_back() {
    let settings = GenerationSettings::default();
    let mut registry = InstanceRegistry::new();
    let mut encoder = Encoder::new(&settings, &mut registry, &HierarchyResolver);

    let bad = CapturedValue::table([
        (
            CapturedValue::from(1),
            CapturedValue::array([CapturedValue::from(part())]),
        ),
        (CapturedValue::Nil, CapturedValue::from(1)),
    ]);
    assert_eq!(encoder.encode(1, &bad), Err(EncodeError::NilKey));
    assert_eq!(encoder.take_hoisted(), Vec::<Statement>::new());

    let nan = CapturedValue::table([(CapturedValue::from(f64::NAN), CapturedValue::from(1))]);
    assert_eq!(encoder.encode(2, &nan), Err(EncodeError::NanKey));

    let good = encoder.encode(3, &CapturedValue::from("ok")).unwrap();
    assert_eq!(good.name(), "_4lveString3");
    assert!(registry.is_empty());
}

#[test]
fn nesting_limit() {
    let mut value = CapturedValue::array([]);
    for _ in 0..MAX_TABLE_DEPTH + 10 {
        value = CapturedValue::array([value]);
    }
    let settings = by_path();
    let mut registry = InstanceRegistry::new();
    let mut encoder = Encoder::new(&settings, &mut registry, &HierarchyResolver);
    assert_eq!(
        encoder.encode(1, &value),
        Err(EncodeError::TooDeep {
            limit: MAX_TABLE_DEPTH
        })
    );
    assert!(encoder.take_hoisted().is_empty());

    let mut shallow = CapturedValue::array([]);
    for _ in 1..MAX_TABLE_DEPTH {
        shallow = CapturedValue::array([shallow]);
    }
    assert!(encoder.encode(2, &shallow).is_ok());
    assert_eq!(encoder.take_hoisted().len(), MAX_TABLE_DEPTH - 1);
}

#[test]
fn error_messages_fit_in_a_block_comment() {
    for error in [
        EncodeError::NilKey,
        EncodeError::NanKey,
        EncodeError::TooDeep { limit: 3 },
    ] {
        assert!(!error.to_string().contains("]]"));
    }
}
