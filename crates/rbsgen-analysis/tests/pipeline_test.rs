//! End-to-end: project tree on disk → source index → model analysis.

use std::path::Path;

use rbsgen_analysis::facts::ScopeParameter;
use rbsgen_analysis::{ModelAnalyzer, Value};
use rbsgen_core::config::ExpansionConfig;
use rbsgen_core::RbsgenConfig;

const FOO: &str = r#"# frozen_string_literal: true

class Foo < ActiveRecord::Base
  attribute :status, :integer

  delegated_type :entryable, types: %w[Message Comment]

  enum :status, %i[active archived]

  scope :active, -> { where(active: true) }

  has_many :bars

  has_secure_password
end
"#;

const BAR: &str = r#"# frozen_string_literal: true

require_relative "enum_concern"

class Bar < ActiveRecord::Base
  include EnumConcern
end
"#;

const ENUM_CONCERN: &str = r#"# frozen_string_literal: true

module EnumConcern
  extend ActiveSupport::Concern

  included do
    enum :status, %i[active archived]
  end
end
"#;

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let models = dir.path().join("app/models");
    std::fs::create_dir_all(models.join("concerns")).unwrap();
    std::fs::write(models.join("foo.rb"), FOO).unwrap();
    std::fs::write(models.join("bar.rb"), BAR).unwrap();
    std::fs::write(models.join("concerns/enum_concern.rb"), ENUM_CONCERN).unwrap();
    dir
}

fn analyzer(root: &Path, config: RbsgenConfig) -> ModelAnalyzer<rbsgen_analysis::StaticRegistry> {
    ModelAnalyzer::for_project(root, config)
}

#[test]
fn foo_model_facts() {
    let dir = project();
    let analyzer = analyzer(dir.path(), RbsgenConfig::default());
    let analysis = analyzer.analyze_model(dir.path(), "Foo").unwrap();
    let facts = &analysis.facts;

    assert_eq!(facts.enums.len(), 1);
    let status = &facts.enums[0];
    assert_eq!(status.name, "status");
    assert_eq!(status.method_names(), vec!["active", "archived"]);
    assert_eq!(status.line, 8);

    let active = facts.scope("active").unwrap();
    assert_eq!(active.parameters, Some(Vec::<ScopeParameter>::new()));

    assert_eq!(facts.delegated_types[0].role, "entryable");
    assert_eq!(facts.delegated_types[0].types, vec!["Message", "Comment"]);
    assert_eq!(facts.secure_passwords[0].attribute, "password");

    let names: Vec<&str> = analysis
        .declarations
        .get("Foo")
        .unwrap()
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["attribute", "delegated_type", "enum", "scope", "has_many", "has_secure_password"]
    );
}

#[test]
fn bar_model_gets_enum_from_concern() {
    let dir = project();
    let analyzer = analyzer(dir.path(), RbsgenConfig::default());
    let analysis = analyzer.analyze_model(dir.path(), "Bar").unwrap();

    assert_eq!(analysis.expansion.includes, 1);
    let status = analysis.facts.enum_named("status").unwrap();
    assert_eq!(
        status.values,
        vec![Value::Symbol("active".into()), Value::Symbol("archived".into())]
    );
    assert!(analysis.facts.to_json().unwrap().contains("\"archived\""));
}

#[test]
fn disabled_expansion_keeps_include() {
    let dir = project();
    let config = RbsgenConfig {
        expansion: ExpansionConfig {
            enabled: Some(false),
            ..Default::default()
        },
        ..Default::default()
    };
    let analyzer = analyzer(dir.path(), config);
    let analysis = analyzer.analyze_model(dir.path(), "Bar").unwrap();

    assert!(analysis.facts.is_empty());
    assert_eq!(analysis.declarations.get("Bar").unwrap()[0].name, "include");
}

#[test]
fn index_knows_every_constant() {
    let dir = project();
    let analyzer = analyzer(dir.path(), RbsgenConfig::default());
    let registry = analyzer.registry();

    assert!(registry.contains("Foo"));
    assert!(registry.contains("Bar"));
    assert!(registry.get("EnumConcern").unwrap().concern);
}

#[test]
fn missing_model_file_is_an_error() {
    let dir = project();
    let analyzer = analyzer(dir.path(), RbsgenConfig::default());
    assert!(analyzer.analyze_model(dir.path(), "Missing").is_err());
}
