//! End-to-end dependency collection over real asset trees on disk

use mdlsplit_tracer::{
    DependencyCollector, FileRole, LogicalPath, MaterialCache, MaterialParser, MaterialResolver,
    PathIndex,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// `models/chair.mdl` -> `materials/wood.vmt` -> include `materials/shared/base.vmt`.
fn chair_tree(with_bump: bool) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    let mut mdl = b"IDST\x31\x00\x00\x00".to_vec();
    mdl.extend_from_slice(b"models/chair\0\0\0\0");
    mdl.extend_from_slice(&[0x12, 0x00, 0x7f, 0xff]);
    mdl.extend_from_slice(b"materials/wood.vmt\0");
    write(root, "models/chair.mdl", &mdl);
    write(root, "models/chair.vvd", b"IDSV");
    write(root, "models/chair.dx90.vtx", b"\x07\x00");

    write(
        root,
        "materials/wood.vmt",
        b"\"VertexLitGeneric\"\n{\n\t$basetexture \"wood/diffuse\"\n\tinclude \"materials/shared/base.vmt\"\n}\n",
    );
    write(
        root,
        "materials/shared/base.vmt",
        b"\"VertexLitGeneric\"\n{\n\t$bumpmap \"wood/bump\"\n}\n",
    );
    write(root, "materials/wood/diffuse.vtf", b"VTF\0");
    if with_bump {
        write(root, "materials/wood/bump.vtf", b"VTF\0");
    }
    tmp
}

fn logical(files: impl Iterator<Item = LogicalPath>) -> Vec<String> {
    files.map(|p| p.as_str().to_string()).collect()
}

#[test]
fn test_chair_closure_is_complete() {
    let tmp = chair_tree(true);
    let index = PathIndex::build(tmp.path()).unwrap();
    let mut collector = DependencyCollector::new(&index);

    let result = collector.collect(&LogicalPath::new("models/chair.mdl")).unwrap();

    assert_eq!(
        logical(result.resolved_files.iter().map(|f| f.logical_path.clone())),
        vec![
            "models/chair.mdl",
            "models/chair.dx90.vtx",
            "models/chair.vvd",
            "materials/shared/base.vmt",
            "materials/wood.vmt",
            "materials/wood/bump.vtf",
            "materials/wood/diffuse.vtf",
        ]
    );
    assert_eq!(result.files_with_role(FileRole::Model).count(), 1);
    assert_eq!(result.sidecars().count(), 2);
    assert_eq!(result.materials().count(), 2);
    assert_eq!(result.textures().count(), 2);
    assert!(result.missing_refs.is_empty());

    let model = &result.resolved_files[0];
    assert_eq!(model.real_path, tmp.path().join("models/chair.mdl"));
    assert_eq!(model.relative_path, Path::new("models/chair.mdl"));
}

#[test]
fn test_chair_missing_bump_is_reported_once() {
    let tmp = chair_tree(false);
    let index = PathIndex::build(tmp.path()).unwrap();
    let mut collector = DependencyCollector::new(&index);

    let result = collector.collect(&LogicalPath::new("models/chair.mdl")).unwrap();

    assert_eq!(result.missing_refs.len(), 1);
    let missing = &result.missing_refs[0];
    assert_eq!(missing.logical_path.as_str(), "materials/wood/bump.vtf");
    assert_eq!(missing.referenced_by.as_str(), "materials/shared/base.vmt");

    assert!(result.contains("models/chair.mdl"));
    assert!(result.contains("materials/wood.vmt"));
    assert!(result.contains("materials/shared/base.vmt"));
    assert!(result.contains("materials/wood/diffuse.vtf"));
    assert!(!result.contains("materials/wood/bump.vtf"));
}

#[test]
fn test_unresolved_scanner_noise_is_not_missing() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "models/lamp.mdl",
        b"\0models/lamp\0materials/nowhere/at_all.vmt\0some/random/path\0",
    );
    let index = PathIndex::build(tmp.path()).unwrap();

    let result = DependencyCollector::new(&index)
        .collect(&LogicalPath::new("models/lamp.mdl"))
        .unwrap();
    assert_eq!(result.resolved_files.len(), 1);
    assert!(result.is_complete());
}

#[test]
fn test_model_without_candidates_keeps_model_and_sidecars() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "models/rock.mdl", &[0u8, 1, 2, 3, 0xfe, 0xff]);
    write(tmp.path(), "models/rock.phy", b"");
    let index = PathIndex::build(tmp.path()).unwrap();

    let result = DependencyCollector::new(&index)
        .collect(&LogicalPath::new("models/rock.mdl"))
        .unwrap();
    assert_eq!(result.resolved_files.len(), 2);
    assert_eq!(result.sidecars().count(), 1);
    assert_eq!(result.materials().count(), 0);
    assert_eq!(result.textures().count(), 0);
    assert!(result.is_complete());
}

#[test]
fn test_case_variation_resolves() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "Models/Barrel.MDL", b"\0Models\\Barrel_Skin.vmt\0");
    write(
        tmp.path(),
        "materials/models/barrel_skin.vmt",
        b"x { $BaseTexture \"Models\\Barrel_Diffuse\" }",
    );
    write(tmp.path(), "materials/models/BARREL_DIFFUSE.vtf", b"");
    let index = PathIndex::build(tmp.path()).unwrap();

    let result = DependencyCollector::new(&index)
        .collect(&LogicalPath::new("models/barrel.mdl"))
        .unwrap();
    assert!(result.contains("materials/models/barrel_skin.vmt"));
    let texture = result.textures().next().unwrap();
    assert_eq!(
        texture.relative_path,
        Path::new("materials/models/BARREL_DIFFUSE.vtf")
    );
}

#[test]
fn test_reference_case_differs_from_disk() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "models/foo.vmt", b"x {}");
    let index = PathIndex::build(tmp.path()).unwrap();

    assert!(index.lookup(&LogicalPath::new("Models/Foo.vmt")).is_some());
}

#[test]
fn test_shared_material_parsed_once_across_models() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "models/a.mdl", b"\0materials/shared.vmt\0");
    write(tmp.path(), "models/b.mdl", b"\0materials/shared.vmt\0");
    write(tmp.path(), "materials/shared.vmt", b"x { $basetexture shared }");
    write(tmp.path(), "materials/shared.vtf", b"");
    let index = PathIndex::build(tmp.path()).unwrap();
    let mut collector = DependencyCollector::new(&index);

    let a = collector.collect(&LogicalPath::new("models/a.mdl")).unwrap();
    let b = collector.collect(&LogicalPath::new("models/b.mdl")).unwrap();
    assert_eq!(collector.cache().len(), 1);
    assert!(a.contains("materials/shared.vtf"));
    assert!(b.contains("materials/shared.vtf"));
    assert!(!b.contains("models/a.mdl"));
}

#[test]
fn test_resolver_two_level_cycle() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "materials/ping.vmt",
        b"x { include \"materials/pong.vmt\" }",
    );
    write(
        tmp.path(),
        "materials/pong.vmt",
        b"x { include \"materials/ping.vmt\" $detail \"noise\" }",
    );
    write(tmp.path(), "materials/noise.vtf", b"");
    let index = PathIndex::build(tmp.path()).unwrap();
    let parser = MaterialParser::default();
    let mut cache = MaterialCache::new();
    let mut resolver = MaterialResolver::new(&index, &parser, &mut cache, "materials");

    let closure = resolver.resolve(
        &LogicalPath::new("materials/ping.vmt"),
        &LogicalPath::new("models/x.mdl"),
    );
    assert_eq!(closure.materials.len(), 2);
    assert!(closure.has_texture("materials/noise.vtf"));
    assert!(closure.missing.is_empty());
}
