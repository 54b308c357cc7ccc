use shader_core::{ParseError, Sort};
use shader_script::loader::{find_script_files, load_script_file, load_skin_file};
use shader_script::{split_script, LoadError, ShaderLibrary};
use std::fs;
use tempfile::tempdir;

const BASE_SCRIPT: &str = r#"
// base wall textures
textures/base/wall
{
    surfaceparm nomarks
    {
        map $lightmap
    }
    {
        map textures/base/wall.tga
        blendFunc GL_DST_COLOR GL_ZERO
    }
}

textures/base/Fence
{
    cull none
    {
        map textures/base/fence.tga
        alphaFunc GE128
        depthWrite
    }
}
"#;

#[test]
fn split_has_one_entry_per_name() {
    let bodies = split_script(BASE_SCRIPT);
    let names: Vec<&str> = bodies.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["textures/base/fence", "textures/base/wall"]);
    assert!(bodies["textures/base/fence"].starts_with("textures/base/fence { cull none {"));
}

#[test]
fn split_keys_on_last_occurrence() {
    let script = format!("{BASE_SCRIPT}\nTEXTURES/BASE/WALL {{ sort banner }}");
    let bodies = split_script(&script);
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies["textures/base/wall"], "textures/base/wall { sort banner } ");
}

#[test]
fn load_script_from_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("base.shader");
    fs::write(&path, BASE_SCRIPT).expect("Failed to write script");

    let bodies = load_script_file(&path).expect("Failed to load script");
    assert_eq!(bodies.len(), 2);
}

#[test]
fn load_file_not_found() {
    let dir = tempdir().unwrap();
    let result = load_script_file(&dir.path().join("missing.shader"));
    match result {
        Err(LoadError::Io(_)) => { /* Expected */ }
        other => panic!("Expected Io error for non-existent file, got {other:?}"),
    }
}

#[test]
fn directory_scan_only_picks_shader_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.shader"), "b { }").unwrap();
    fs::write(dir.path().join("a.SHADER"), "a { }").unwrap();
    fs::write(dir.path().join("notes.txt"), "c { }").unwrap();

    let files = find_script_files(dir.path()).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.SHADER", "b.shader"]);

    match find_script_files(&dir.path().join("notes.txt")) {
        Err(LoadError::InvalidData(msg)) => assert!(msg.contains("Not a directory")),
        other => panic!("Expected InvalidData, got {other:?}"),
    }
}

#[test]
fn library_loads_directory_and_later_files_override() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.shader"), BASE_SCRIPT).unwrap();
    fs::write(
        dir.path().join("z_override.shader"),
        "textures/base/fence { sort nearest }",
    )
    .unwrap();

    let mut library = ShaderLibrary::new();
    let loaded = library.load_dir(dir.path()).unwrap();
    assert_eq!(loaded, 3);
    assert_eq!(library.len(), 2);

    let fence = library.parse("textures/base/fence", 0).unwrap();
    assert_eq!(fence.sort, Sort::NEAREST);
    assert!(fence.stages.is_empty());

    let wall = library.parse("textures/base/wall", 0).unwrap();
    assert_eq!(wall.stages.len(), 2);
    assert_eq!(wall.sort, Sort::OPAQUE);
    assert!(wall.stages[0].is_lightmap);
}

#[test]
fn library_surfaces_fatal_parse_errors() {
    let mut library = ShaderLibrary::new();
    library.add_script("textures/bad { { map } }");
    // `map` swallows the closing brace as its filename, so this parses.
    assert!(library.parse("textures/bad", 0).is_ok());

    library.add_script("textures/worse { { map");
    match library.parse("textures/worse", 0) {
        Err(LoadError::Parse(ParseError::MissingArgument { shader, keyword })) => {
            assert_eq!(shader, "textures/worse");
            assert_eq!(keyword, "map");
        }
        other => panic!("Expected MissingArgument, got {other:?}"),
    }
}

#[test]
fn load_skin_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("head_default.skin");
    fs::write(
        &path,
        "tag_head,\r\nh_head,models/players/visor/head.tga\r\n",
    )
    .unwrap();

    let skin = load_skin_file(&path).unwrap();
    assert_eq!(skin.surfaces.len(), 1);
    assert_eq!(skin.surfaces[0].name, "h_head");
}
