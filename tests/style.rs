use camino::Utf8PathBuf;
use mapgen::{GenError, IconSetConfig, StyleConfig, generate_style};
use std::fs::{self, File};

fn setup() -> (tempfile::TempDir, Utf8PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
    (tmp, root)
}

fn touch(root: &Utf8PathBuf, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    File::create(path).unwrap();
}

fn config(root: &Utf8PathBuf, secondary: bool) -> StyleConfig {
    StyleConfig {
        output: root.join("tfis-points.mss"),
        primary: IconSetConfig::new(root.join("primary")),
        secondary: secondary.then(|| IconSetConfig::new(root.join("secondary"))),
        ..StyleConfig::default()
    }
}

fn features(mss: &str) -> Vec<String> {
    mss.lines()
        .filter_map(|l| l.trim().strip_prefix("[feature = '"))
        .filter_map(|l| l.strip_suffix("'] {"))
        .map(str::to_string)
        .collect()
}

#[test]
fn primary_and_secondary_identifiers() {
    let (_tmp, root) = setup();
    touch(&root, "primary/R_Rundwege/R1.svg");
    touch(&root, "primary/A_Andere/A2.svg");
    touch(&root, "secondary/ParentA_B_99/marker_01.svg");

    let generated = generate_style(&config(&root, true)).unwrap();
    assert_eq!(generated.entries, 3);
    assert_eq!(
        features(&generated.contents),
        vec!["A-A2", "R-R1", "ParentAB-marker"]
    );
    assert!(generated.contents.contains(&format!(
        "marker-file: url('{}');",
        root.join("secondary/ParentA_B_99/marker_01.svg")
    )));
}

#[test]
fn every_rule_has_file_and_width() {
    let (_tmp, root) = setup();
    for rel in ["primary/X_a/1.svg", "primary/Y_b/2.svg", "primary/Y_b/skip.png"] {
        touch(&root, rel);
    }
    let cfg = StyleConfig {
        marker_width: 16,
        ..config(&root, false)
    };
    let generated = generate_style(&cfg).unwrap();
    let text = &generated.contents;

    assert!(text.starts_with("#tfis-points {\n"));
    assert!(text.ends_with("\n}\n"));
    assert_eq!(text.matches('{').count(), text.matches('}').count());
    assert_eq!(features(text).len(), 2);
    assert_eq!(text.matches("marker-file: url(").count(), 2);
    assert_eq!(text.matches("marker-width: 16;").count(), 2);
}

#[test]
fn written_output_is_deterministic() {
    let (_tmp, root) = setup();
    for rel in ["primary/Z_z/9.svg", "primary/B_b/1.svg", "primary/B_b/0.svg"] {
        touch(&root, rel);
    }
    let cfg = config(&root, false);
    generate_style(&cfg).unwrap().write().unwrap();
    let first = fs::read_to_string(&cfg.output).unwrap();
    generate_style(&cfg).unwrap().write().unwrap();
    assert_eq!(first, fs::read_to_string(&cfg.output).unwrap());
    assert_eq!(features(&first), vec!["B-0", "B-1", "Z-9"]);
}

#[test]
fn empty_icon_directory_yields_layer_block_only() {
    let (_tmp, root) = setup();
    fs::create_dir_all(root.join("primary")).unwrap();
    let generated = generate_style(&config(&root, false)).unwrap();
    assert_eq!(generated.entries, 0);
    assert_eq!(generated.contents, "#tfis-points {\n\n}\n");
}

#[test]
fn missing_secondary_directory_fails_without_output() {
    let (_tmp, root) = setup();
    touch(&root, "primary/R_x/1.svg");
    let cfg = config(&root, true);

    match generate_style(&cfg) {
        Err(GenError::DirectoryNotFound { path }) => assert_eq!(path, root.join("secondary")),
        other => panic!("expected DirectoryNotFound, got {:?}", other),
    }
    assert!(!cfg.output.exists());
}

#[test]
fn duplicate_identifiers_are_kept_unless_rejected() {
    let (_tmp, root) = setup();
    touch(&root, "primary/R_one/1.svg");
    touch(&root, "primary/R_two/1.svg");

    let generated = generate_style(&config(&root, false)).unwrap();
    assert_eq!(features(&generated.contents), vec!["R-1", "R-1"]);

    let strict = StyleConfig {
        reject_duplicates: true,
        ..config(&root, false)
    };
    assert!(matches!(
        generate_style(&strict),
        Err(GenError::DuplicateIdentifier { .. })
    ));
}

#[test]
fn secondary_name_without_tokens_is_malformed() {
    let (_tmp, root) = setup();
    fs::create_dir_all(root.join("primary")).unwrap();
    touch(&root, "secondary/Flat/marker.svg");

    assert!(matches!(
        generate_style(&config(&root, true)),
        Err(GenError::MalformedInputName { .. })
    ));
}

#[test]
fn layer_name_with_css_syntax_is_rejected_before_scanning() {
    let (_tmp, root) = setup();
    touch(&root, "primary/R_x/1.svg");
    for layer in ["a b", "x{"] {
        let cfg = StyleConfig {
            layer: layer.to_string(),
            ..config(&root, false)
        };
        match generate_style(&cfg) {
            Err(GenError::InvalidLayerName { layer: got }) => assert_eq!(got, layer),
            other => panic!("expected InvalidLayerName, got {:?}", other),
        }
        assert!(!cfg.output.exists());
    }
}

#[cfg(unix)]
#[test]
fn symlinked_icons_get_rules() {
    use std::os::unix::fs::symlink;

    let (_tmp, root) = setup();
    touch(&root, "shared/a.svg");
    fs::create_dir_all(root.join("primary/R_x")).unwrap();
    symlink(root.join("shared/a.svg"), root.join("primary/R_x/a.svg")).unwrap();

    let generated = generate_style(&config(&root, false)).unwrap();
    assert_eq!(generated.entries, 1);
    assert_eq!(features(&generated.contents), vec!["R-a"]);
}
