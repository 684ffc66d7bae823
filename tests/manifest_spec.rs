use std::fs;
use std::path::{Path, PathBuf};

use solution_scaffold::manifest::{self, ManifestError};
use solution_scaffold::models::*;
use speculate2::speculate;
use xmltree::{Element, XMLNode};

const PROJECT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFramework>net8.0</TargetFramework>
    <Nullable>enable</Nullable>
  </PropertyGroup>
  <ItemGroup>
    <PackageReference Include="Microsoft.EntityFrameworkCore" Version="8.0.0" />
    <ProjectReference Include="..\MyApp.Orders.Domain\MyApp.Orders.Domain.csproj" />
  </ItemGroup>
</Project>
"#;

const TEMPLATE: &str = "namespace MyApp.XXXs.Infrastructure.Data;\n\npublic class XXXsDbContext : DbContext\n{\n}\n";

fn write_project(dir: &Path, name: &str) -> PathBuf {
    let project_dir = dir.join(name);
    fs::create_dir_all(&project_dir).expect("Failed to create project dir");
    let path = project_dir.join(format!("{}.csproj", name));
    fs::write(&path, PROJECT).expect("Failed to write manifest");
    path
}

fn load(path: &Path) -> Element {
    let text = fs::read_to_string(path).expect("Failed to read manifest");
    manifest::parse_manifest(&text).expect("Failed to parse manifest")
}

fn count_named(element: &Element, name: &str) -> usize {
    let own = usize::from(element.name == name);
    own + element
        .children
        .iter()
        .filter_map(XMLNode::as_element)
        .map(|child| count_named(child, name))
        .sum::<usize>()
}

speculate! {
    before {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let templates = tempfile::tempdir().expect("Failed to create template dir");
        let packages = PackageSpec::ef_core_defaults();
    }

    describe "patch_manifest" {
        it "adds the missing packages and skips existing ones" {
            let path = write_project(dir.path(), "MyApp.Orders.Infrastructure");

            let report = manifest::patch_manifest(&path, templates.path(), &packages)
                .expect("Failed to patch");

            assert_eq!(report.added.len(), 5);
            assert_eq!(report.skipped, vec!["Microsoft.EntityFrameworkCore"]);

            let root = load(&path);
            let names = manifest::existing_packages(&root);
            for package in &packages {
                assert!(names.contains(&package.include), "missing {}", package.include);
            }
        }

        it "does not duplicate packages when run twice" {
            let path = write_project(dir.path(), "MyApp.Orders.Infrastructure");

            manifest::patch_manifest(&path, templates.path(), &packages).expect("Failed to patch");
            let second = manifest::patch_manifest(&path, templates.path(), &packages)
                .expect("Failed to patch");

            assert!(second.added.is_empty());
            assert_eq!(second.skipped.len(), 6);

            let root = load(&path);
            assert_eq!(count_named(&root, "PackageReference"), 6);
            assert_eq!(count_named(&root, "ItemGroup"), 2);
        }

        it "keeps unrelated content" {
            let path = write_project(dir.path(), "MyApp.Orders.Infrastructure");
            manifest::patch_manifest(&path, templates.path(), &packages).expect("Failed to patch");

            let root = load(&path);
            assert_eq!(root.attributes.get("Sdk").map(String::as_str), Some("Microsoft.NET.Sdk"));
            assert_eq!(count_named(&root, "ProjectReference"), 1);
            let framework = root
                .get_child("PropertyGroup")
                .and_then(|group| group.get_child("TargetFramework"))
                .and_then(|e| e.get_text())
                .expect("TargetFramework missing");
            assert_eq!(framework, "net8.0");
        }

        it "writes design-time asset elements" {
            let path = write_project(dir.path(), "MyApp.Orders.Infrastructure");
            manifest::patch_manifest(&path, templates.path(), &packages).expect("Failed to patch");

            let text = fs::read_to_string(&path).expect("Failed to read");
            assert!(text.starts_with("<?xml"));
            assert_eq!(text.matches("<PrivateAssets>all</PrivateAssets>").count(), 2);
        }

        it "rejects a file without the csproj extension" {
            let path = dir.path().join("project.xml");
            fs::write(&path, PROJECT).expect("Failed to write");

            let err = manifest::patch_manifest(&path, templates.path(), &packages).unwrap_err();
            assert!(matches!(err, ManifestError::InvalidExtension(_)));
        }

        it "rejects a missing manifest" {
            let path = dir.path().join("Missing.Infrastructure.csproj");

            let err = manifest::patch_manifest(&path, templates.path(), &packages).unwrap_err();
            assert!(matches!(err, ManifestError::NotFound(_)));
        }

        it "fails on malformed markup and leaves the file untouched" {
            let path = dir.path().join("Broken.Infrastructure.csproj");
            fs::write(&path, "<Project><ItemGroup></Project>").expect("Failed to write");

            let err = manifest::patch_manifest(&path, templates.path(), &packages).unwrap_err();
            assert!(matches!(err, ManifestError::Parse(_)));
            assert_eq!(fs::read_to_string(&path).unwrap(), "<Project><ItemGroup></Project>");
        }
    }

    describe "context template" {
        it "copies and renames the template next to the manifest" {
            fs::write(templates.path().join("XXXDbContext.cs"), TEMPLATE).expect("Failed to write");
            let path = write_project(dir.path(), "MyApp.Orders.Infrastructure");

            manifest::patch_manifest(&path, templates.path(), &packages).expect("Failed to patch");

            let copied = dir.path()
                .join("MyApp.Orders.Infrastructure")
                .join("Data")
                .join("OrderDbContext.cs");
            let content = fs::read_to_string(&copied).expect("Template was not copied");
            assert!(content.contains("public class OrdersDbContext : DbContext"));
            assert!(content.contains("namespace MyApp.Orders.Infrastructure.Data;"));
            assert!(!content.contains("XXX"));
        }

        it "still patches when the manifest name has no usable segment" {
            fs::write(templates.path().join("XXXDbContext.cs"), TEMPLATE).expect("Failed to write");
            let path = write_project(dir.path(), "Orders");

            let report = manifest::patch_manifest(&path, templates.path(), &packages)
                .expect("Failed to patch");

            assert_eq!(report.added.len(), 5);
            assert!(!dir.path().join("Orders").join("Data").join("OrderDbContext.cs").exists());
        }

        it "finds templates in name order" {
            fs::write(templates.path().join("YYYDbContext.cs"), TEMPLATE).expect("Failed to write");
            fs::write(templates.path().join("XXXDbContext.cs"), TEMPLATE).expect("Failed to write");
            fs::write(templates.path().join("Notes.cs"), "").expect("Failed to write");

            let found = manifest::template::find_context_template(templates.path())
                .expect("Lookup failed")
                .expect("No template found");
            assert_eq!(found.file_name().unwrap(), "XXXDbContext.cs");
        }

        it "finds nothing in an empty directory" {
            let found = manifest::template::find_context_template(templates.path())
                .expect("Lookup failed");
            assert!(found.is_none());
        }
    }
}
