//! End-to-end build pipeline tests against a real generated-files
//! directory.

use std::path::{Path, PathBuf};

use oasdocs_plugin::{
    ApiDocsPlugin, DataDir, HostActions, PLUGIN_NAME, PluginOptions, PluginOptionsOverrides,
    RouteDescriptor, SIDEBAR_ID, SitePlugin, run_build,
};
use oasdocs_spec::ApiItem;
use pretty_assertions::assert_eq;

const PETSTORE_YAML: &str = r#"
openapi: "3.0.0"
info:
  title: Petstore
tags:
  - name: pets
  - name: store
paths:
  /pets:
    get:
      tags: [pets]
      operationId: listPets
      summary: List all pets
      description: |
        Returns every pet in the store, paginated.
    post:
      tags: [pets]
      operationId: createPet
      summary: Create a pet
  /pets/{petId}:
    get:
      tags: [pets]
      operationId: getPet
      summary: Get a pet
  /orders:
    get:
      tags: [store]
      operationId: listOrders
      summary: List orders
      deprecated: true
"#;

fn write_spec(dir: &Path) -> PathBuf {
    let spec_path = dir.join("openapi.yaml");
    std::fs::write(&spec_path, PETSTORE_YAML).unwrap();
    spec_path
}

fn build_plugin(spec_path: PathBuf) -> ApiDocsPlugin {
    let options = PluginOptions::merged(PluginOptionsOverrides {
        spec_path: Some(spec_path),
        ..PluginOptionsOverrides::default()
    })
    .unwrap();
    ApiDocsPlugin::new(options).unwrap()
}

#[test]
fn test_full_build_writes_artifacts_and_routes() {
    let tmp = tempfile::tempdir().unwrap();
    let plugin = build_plugin(write_spec(tmp.path()));
    let generated = tmp.path().join("generated").join(PLUGIN_NAME);
    let mut actions = DataDir::new(&generated).unwrap();

    let summary = run_build(&plugin, &mut actions).unwrap();

    // 2 sections (pets: 3 items, store: 1 item)
    assert_eq!(summary.sections, 2);
    assert_eq!(summary.items, 4);
    assert_eq!(summary.artifacts, 4 * 2 + 1);

    // Every artifact referenced by a route exists on disk
    let aggregate = &summary.routes[0];
    assert_eq!(aggregate.path, "/api");
    assert_eq!(aggregate.routes.len(), 4);
    for route in std::iter::once(aggregate).chain(&aggregate.routes) {
        for artifact in route.modules.values() {
            assert!(artifact.exists(), "missing artifact {}", artifact.display());
            assert!(artifact.starts_with(&generated));
        }
    }

    // Sidebar order follows tag declaration order
    assert_eq!(summary.sidebar[0].label, "pets");
    assert_eq!(summary.sidebar[0].items.len(), 3);
    assert_eq!(summary.sidebar[1].label, "store");
    assert_eq!(summary.sidebar[1].items.len(), 1);
    assert!(summary.sidebar[1].items[0].deprecated);
}

#[test]
fn test_item_record_matches_description_artifact() {
    let tmp = tempfile::tempdir().unwrap();
    let plugin = build_plugin(write_spec(tmp.path()));
    let mut actions = DataDir::new(tmp.path().join("generated")).unwrap();

    let summary = run_build(&plugin, &mut actions).unwrap();

    for route in &summary.routes[0].routes {
        let record_path = route.modules.get("content").unwrap();
        let record: ApiItem =
            serde_json::from_str(&std::fs::read_to_string(record_path).unwrap()).unwrap();
        assert_eq!(record.permalink, route.path);

        let description_path = route.modules.get("description").unwrap();
        let description = std::fs::read_to_string(description_path).unwrap();
        assert_eq!(description, record.description);
    }
}

#[test]
fn test_permalink_lookup_covers_every_item_route() {
    let tmp = tempfile::tempdir().unwrap();
    let plugin = build_plugin(write_spec(tmp.path()));
    let mut actions = DataDir::new(tmp.path().join("generated")).unwrap();

    let summary = run_build(&plugin, &mut actions).unwrap();

    let metadata_path = summary.routes[0].modules.get("metadata").unwrap();
    let metadata: oasdocs_plugin::ApiPageMetadata =
        serde_json::from_str(&std::fs::read_to_string(metadata_path).unwrap()).unwrap();

    assert_eq!(
        metadata.permalink_to_sidebar.len(),
        summary.routes[0].routes.len()
    );
    for route in &summary.routes[0].routes {
        assert_eq!(
            metadata.permalink_to_sidebar.get(&route.path).map(String::as_str),
            Some(SIDEBAR_ID)
        );
    }
}

#[test]
fn test_home_collision_resolved_against_foreign_route() {
    let tmp = tempfile::tempdir().unwrap();
    let plugin = build_plugin(write_spec(tmp.path()));
    let mut actions = DataDir::new(tmp.path().join("generated")).unwrap();

    // A competing home-page route registered by another plugin
    actions.add_route(RouteDescriptor {
        path: "/api".to_owned(),
        component: "@theme/HomePage".to_owned(),
        exact: true,
        modules: std::collections::BTreeMap::new(),
        routes: Vec::new(),
    });

    let summary = run_build(&plugin, &mut actions).unwrap();

    let claimants: Vec<_> = summary.routes.iter().filter(|r| r.path == "/api").collect();
    assert_eq!(claimants.len(), 1);
    assert_eq!(claimants[0].component, "@theme/HomePage");
}

#[test]
fn test_missing_spec_produces_nothing_on_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let plugin = build_plugin(tmp.path().join("does-not-exist.yaml"));
    let generated = tmp.path().join("generated");
    let mut actions = DataDir::new(&generated).unwrap();

    let summary = run_build(&plugin, &mut actions).unwrap();

    assert!(summary.is_empty());
    assert_eq!(std::fs::read_dir(&generated).unwrap().count(), 0);
}

#[test]
fn test_bundler_config_points_at_generated_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let plugin = build_plugin(write_spec(tmp.path()));
    let generated = tmp.path().join("generated");
    let actions = DataDir::new(&generated).unwrap();

    let config = plugin.configure_bundler(actions.dir());

    assert_eq!(config.aliases.get("~api"), Some(&generated));
    assert_eq!(config.rules[0].include, generated);
}
