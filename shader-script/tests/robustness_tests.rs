use proptest::prelude::*;
use shader_core::Sort;
use shader_script::{parse_shader, split_script, ShaderLibrary};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Tokens the grammar reacts to, mixed with filler.
fn token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("{".to_owned()),
        Just("}".to_owned()),
        Just("map".to_owned()),
        Just("animMap".to_owned()),
        Just("blendFunc".to_owned()),
        Just("tcMod".to_owned()),
        Just("rgbGen".to_owned()),
        Just("wave".to_owned()),
        Just("skyparms".to_owned()),
        Just("deformVertexes".to_owned()),
        Just("sort".to_owned()),
        Just("$lightmap".to_owned()),
        "[a-z0-9_./-]{1,8}",
        "-?[0-9]{1,3}(\\.[0-9]{1,2})?",
    ]
}

proptest! {
    #[test]
    fn arbitrary_bodies_never_panic(
        tokens in prop::collection::vec(token(), 0..40),
        lightmap_index in -2i32..4,
    ) {
        init_logger();
        let text = format!("fuzz/shader {{ {} }}", tokens.join(" "));
        if let Ok(shader) = parse_shader(&text, lightmap_index) {
            prop_assert!(!shader.sort.is_unset());
            prop_assert_eq!(shader.name, "fuzz/shader");
        }
    }

    #[test]
    fn split_finds_every_top_level_name(
        names in prop::collection::btree_set("[a-z]{1,6}/[a-z]{1,6}", 1..8),
    ) {
        let script: String = names
            .iter()
            .map(|name| format!("{name}\n{{\n  {{ map {name}.tga }}\n}}\n"))
            .collect();

        let bodies = split_script(&script);
        prop_assert_eq!(bodies.keys().cloned().collect::<Vec<_>>(), names.iter().cloned().collect::<Vec<_>>());
    }
}

#[test]
fn parse_all_matches_single_parses() {
    init_logger();
    let mut library = ShaderLibrary::new();
    library.add_script(
        "a { sort 6 } b { { map b.tga blendFunc add } } c { polygonOffset } d { fogparms }",
    );

    for (name, result) in library.parse_all(0) {
        let single = library.parse(&name, 0).expect("shader is in the library");
        assert_eq!(result.as_ref().ok(), Some(&single));
    }

    let sorts: Vec<Sort> = library
        .parse_all(0)
        .into_iter()
        .map(|(_, result)| result.expect("all bodies parse").sort)
        .collect();
    assert_eq!(sorts, vec![Sort::BANNER, Sort::BLEND0, Sort::DECAL, Sort::FOG]);
}
