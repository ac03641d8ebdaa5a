//! Source index scans and single-model analysis without a project tree.

use std::path::{Path, PathBuf};

use rbsgen_analysis::expansion::ExpansionStats;
use rbsgen_analysis::parsers::NamespaceKind;
use rbsgen_analysis::{model_source_path, ConstantRegistry, ModelAnalyzer, SourceIndex, StaticRegistry};
use rbsgen_core::config::{ExpansionConfig, RegistryConfig};
use rbsgen_core::RbsgenConfig;

fn write(root: &Path, rel: &str, source: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, source).unwrap();
}

// ---- Source index ----

#[test]
fn indexes_classes_modules_and_concerns() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "app/models/concerns/taggable.rb",
        "module Taggable\n  extend ActiveSupport::Concern\nend\n",
    );
    write(
        root,
        "app/models/concerns/rooted.rb",
        "module Rooted\n  extend ::ActiveSupport::Concern\nend\n",
    );
    write(root, "app/models/helpers.rb", "module Helpers\n  extend Forwardable\nend\n");
    write(
        root,
        "app/models/shop/order.rb",
        "module Shop\n  class Order < ApplicationRecord\n  end\nend\n",
    );
    write(root, "lib/outside.rb", "module Outside\nend\n");

    let registry = SourceIndex::scan(root, &RegistryConfig::default(), &ExpansionConfig::default());

    let taggable = registry.lookup("Taggable").unwrap();
    assert!(registry.is_concern(&taggable));
    assert!(registry.is_concern(&registry.lookup("Rooted").unwrap()));
    assert!(!registry.is_concern(&registry.lookup("Helpers").unwrap()));
    assert_eq!(registry.get("Shop::Order").unwrap().kind, NamespaceKind::Class);
    assert!(registry
        .source_location("Shop::Order")
        .unwrap()
        .ends_with("app/models/shop/order.rb"));
    assert!(!registry.contains("Outside"));
}

#[test]
fn extra_ignore_and_custom_markers() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "app/models/generated/skip.rb", "module Skip\nend\n");
    write(root, "app/models/kept.rb", "module Kept\n  extend MyConcern\nend\n");

    let registry_config = RegistryConfig {
        extra_ignore: vec!["generated/**".into()],
        ..Default::default()
    };
    let expansion_config = ExpansionConfig {
        concern_markers: vec!["MyConcern".into()],
        ..Default::default()
    };
    let registry = SourceIndex::scan(root, &registry_config, &expansion_config);

    assert!(!registry.contains("Skip"));
    assert!(registry.is_concern(&registry.lookup("Kept").unwrap()));
}

#[test]
fn first_definition_in_path_order_wins() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "app/models/a.rb", "module Shared\nend\n");
    write(root, "app/models/b.rb", "module Shared\nend\n");

    let registry = SourceIndex::scan(root, &RegistryConfig::default(), &ExpansionConfig::default());
    assert!(registry.source_location("Shared").unwrap().ends_with("a.rb"));
}

// ---- Analyzer ----

#[test]
fn conventional_model_paths() {
    let root = Path::new("/app");
    assert_eq!(
        model_source_path(root, "Foo"),
        PathBuf::from("/app/app/models/foo.rb")
    );
    assert_eq!(
        model_source_path(root, "Shop::LineItem"),
        PathBuf::from("/app/app/models/shop/line_item.rb")
    );
}

#[test]
fn analyses_inline_source_without_includes() {
    let analyzer = ModelAnalyzer::new(StaticRegistry::new(), RbsgenConfig::default());
    let analysis = analyzer
        .analyze_source("::Foo", "class Foo\n  enum :kind, %i[a b]\nend\n")
        .unwrap();
    assert_eq!(analysis.class_name, "Foo");
    assert_eq!(analysis.facts.enums[0].method_names(), vec!["a", "b"]);
    assert_eq!(analysis.expansion, ExpansionStats::default());
}
