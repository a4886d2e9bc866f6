//! Integration tests for evidence resolution over a real directory tree

use std::fs;
use std::path::{Path, PathBuf};

use cep_domain::{Category, OrgPath};
use cep_resolver::{Evidence, LayoutConfig, ResourceResolver};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

fn create_img(path: &Path) -> PathBuf {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"\xff\xd8\xff\xe0\x00\x10JFIF").unwrap();
    path.to_path_buf()
}

fn resolver(root: &Path) -> ResourceResolver {
    ResourceResolver::new(LayoutConfig::with_root(root)).unwrap()
}

#[test]
fn test_speech_always_uses_shared_default() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    create_img(&root.join("国旗下讲话/福清一中/高一/八班/wrong.jpg"));
    let correct = create_img(&root.join("国旗下讲话/福清一中/默认/correct.jpg"));

    let org = OrgPath::new("福清一中", "高一", "八班");
    let picked = resolver(root).resolve_image(Category::PublicSpeech, &org, None).unwrap();
    assert_eq!(picked, correct);

    let evidence = resolver(root).resolve(Category::PublicSpeech, &org, Some("国旗下讲话")).unwrap();
    assert!(evidence.folder().ends_with("福清一中/默认"));
}

#[test]
fn test_speech_ignores_section_even_when_shared_missing() {
    let dir = TempDir::new().unwrap();
    create_img(&dir.path().join("国旗下讲话/福清一中/高一/八班/only.jpg"));
    let org = OrgPath::new("福清一中", "高一", "八班");
    assert!(resolver(dir.path()).resolve(Category::PublicSpeech, &org, None).is_none());
}

#[test]
fn test_labor_hierarchy_with_fallback() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    let org = OrgPath::new("福清一中", "高一", "高一八班");

    let fallback = create_img(&root.join("劳动/福清一中/默认/fallback.jpg"));
    let picked = resolver(root).resolve_image(Category::Labor, &org, None).unwrap();
    assert_eq!(picked, fallback);

    let specific = create_img(&root.join("劳动/福清一中/高一/八班/specific.jpg"));
    let picked = resolver(root).resolve_image(Category::Labor, &org, None).unwrap();
    assert_eq!(picked, specific);
}

#[test]
fn test_theme_session_package_matching() {
    let dir = TempDir::new().unwrap();
    let section = dir.path().join("主题班会/测试学校/高一/1班");
    create_img(&section.join("无关文件夹/photo.jpg"));
    create_img(&section.join("2025.10.13 其他活动/photo.jpg"));
    let target = section.join("2025.10.13 高一(1)班 “法制教育” 主题班会");
    create_img(&target.join("photo1.jpg"));
    fs::write(target.join("记录.xlsx"), b"placeholder").unwrap();

    let org = OrgPath::new("测试学校", "高一", "1班");
    let evidence = resolver(dir.path())
        .resolve(Category::ThemeSession, &org, Some("2025.10.13 开展“法制教育”主题班会活动"))
        .unwrap();
    assert_eq!(evidence, Evidence::Package(target));
}

#[test]
fn test_empty_packages_are_not_candidates() {
    let dir = TempDir::new().unwrap();
    let section = dir.path().join("主题班会/S/高一/2班");
    fs::create_dir_all(section.join("《消防安全》")).unwrap();
    create_img(&section.join("《法制教育》/a.jpg"));

    let org = OrgPath::new("S", "高一", "2班");
    let evidence = resolver(dir.path())
        .resolve(Category::ThemeSession, &org, Some("《消防安全》"))
        .unwrap();
    assert!(evidence.path().ends_with("《法制教育》"));
}

#[test]
fn test_seeded_resolve_image_is_stable() {
    let dir = TempDir::new().unwrap();
    for name in ["a.jpg", "b.jpg", "c.jpg"] {
        create_img(&dir.path().join("军训/X/初二/3班").join(name));
    }
    let org = OrgPath::new("X", "初二", "3班");
    let r = resolver(dir.path());
    let first = r.resolve_image_with(&mut StdRng::seed_from_u64(42), Category::Military, &org, None);
    let second = r.resolve_image_with(&mut StdRng::seed_from_u64(42), Category::Military, &org, None);
    assert_eq!(first, second);
}
