//! Integration tests for lookup and completion:
//! exact resolution, include navigation, browsing, ranking, context.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use sage_indexer::{
    BehaviorSchema, CandidateKind, CompletionRequest, IndexService, LookupService, Resolution,
    SymbolKind,
};
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

const SCHEMA_JSON: &str = r#"{
    "SlowDeathBehavior": {
        "DestructionDelay": "UnsignedInt",
        "SinkRate": "Real",
        "DeathTypes": "DeathTypeFlags"
    },
    "AutoHealBehavior": {
        "HealingAmount": "Int",
        "HealingDelay": "UnsignedInt"
    }
}"#;

fn create_file(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut file = File::create(path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
}

fn lookup_for(root: &Path) -> LookupService {
    let service = Arc::new(IndexService::new());
    service.rebuild(&[root.to_path_buf()]);
    let schema = Arc::new(BehaviorSchema::parse(SCHEMA_JSON).unwrap());
    LookupService::new(service, schema)
}

/// A request with no useful surroundings, for pure-prefix queries.
fn bare_request<'a>(prefix: &'a str, line: &'a str) -> CompletionRequest<'a> {
    CompletionRequest {
        prefix,
        line,
        text: "",
        offset: 0,
    }
}

// ============================================================================
// Exact resolution
// ============================================================================

#[test]
fn test_resolve_symbol_case_sensitive() {
    let temp_dir = TempDir::new().unwrap();
    create_file(temp_dir.path(), "w.ini", "Weapon Uruk_Sword\n");
    let lookup = lookup_for(temp_dir.path());

    match lookup.resolve("Uruk_Sword") {
        Resolution::Symbol { kind, sites, .. } => {
            assert_eq!(kind, SymbolKind::Weapon);
            assert_eq!(sites.len(), 1);
            assert_eq!(sites[0].line, 1);
        }
        other => panic!("expected symbol, got {:?}", other),
    }

    assert!(matches!(
        lookup.resolve("uruk_sword"),
        Resolution::NotFound
    ));
}

#[test]
fn test_resolve_multi_site_returns_ordered_list() {
    let temp_dir = TempDir::new().unwrap();
    create_file(
        temp_dir.path(),
        "w.ini",
        "Weapon Twice\n; \nWeapon Twice\n",
    );
    let lookup = lookup_for(temp_dir.path());

    match lookup.resolve("Twice") {
        Resolution::Symbol { sites, .. } => {
            let lines: Vec<u32> = sites.iter().map(|s| s.line).collect();
            assert_eq!(lines, vec![1, 3]);
        }
        other => panic!("expected symbol, got {:?}", other),
    }
}

#[test]
fn test_resolve_macro_carries_values() {
    let temp_dir = TempDir::new().unwrap();
    create_file(temp_dir.path(), "c.inc", "#define MAX_HP 500\n");
    let lookup = lookup_for(temp_dir.path());

    match lookup.resolve("MAX_HP") {
        Resolution::Symbol { kind, values, .. } => {
            assert_eq!(kind, SymbolKind::Macro);
            assert_eq!(values, vec!["500"]);
        }
        other => panic!("expected macro, got {:?}", other),
    }
}

#[test]
fn test_resolve_falls_back_to_strings_case_insensitively() {
    let temp_dir = TempDir::new().unwrap();
    create_file(temp_dir.path(), "lotr.csv", "HELLO_STRING;Hello there\n");
    let lookup = lookup_for(temp_dir.path());

    match lookup.resolve("Hello_String") {
        Resolution::String { key, site } => {
            assert_eq!(key, "hello_string");
            assert_eq!(site.line, 1);
        }
        other => panic!("expected string, got {:?}", other),
    }
}

#[test]
fn test_resolve_miss_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    create_file(temp_dir.path(), "w.ini", "Weapon A\n");
    let lookup = lookup_for(temp_dir.path());

    assert!(matches!(lookup.resolve("Missing"), Resolution::NotFound));
}

#[test]
fn test_index_match_shadows_string_match() {
    let temp_dir = TempDir::new().unwrap();
    create_file(temp_dir.path(), "w.ini", "Weapon Shared\n");
    create_file(temp_dir.path(), "lotr.csv", "shared;text\n");
    let lookup = lookup_for(temp_dir.path());

    assert!(matches!(
        lookup.resolve("Shared"),
        Resolution::Symbol { .. }
    ));
    // Different case misses the index and reaches the string table.
    assert!(matches!(
        lookup.resolve("SHARED"),
        Resolution::String { .. }
    ));
}

// ============================================================================
// Include resolution
// ============================================================================

#[test]
fn test_resolve_include_normalizes_backslashes() {
    let temp_dir = TempDir::new().unwrap();
    create_file(temp_dir.path(), "inc/common.inc", "#define A 1\n");
    create_file(temp_dir.path(), "ini/object.ini", "");
    let lookup = lookup_for(temp_dir.path());

    let current = temp_dir.path().join("ini/object.ini");
    let target = lookup
        .resolve_include(&current, "#include \"..\\inc\\common.inc\"")
        .unwrap();

    assert!(target.exists);
    assert_eq!(target.path, temp_dir.path().join("inc/common.inc"));
}

#[test]
fn test_resolve_include_missing_file_reported() {
    let temp_dir = TempDir::new().unwrap();
    create_file(temp_dir.path(), "object.ini", "");
    let lookup = lookup_for(temp_dir.path());

    let current = temp_dir.path().join("object.ini");
    let target = lookup
        .resolve_include(&current, "#include \"\\gone.inc\"")
        .unwrap();

    assert!(!target.exists);
    assert_eq!(target.path, temp_dir.path().join("gone.inc"));
}

#[test]
fn test_resolve_include_ignores_plain_lines() {
    let temp_dir = TempDir::new().unwrap();
    let lookup = lookup_for(temp_dir.path());

    assert!(lookup
        .resolve_include(Path::new("a.ini"), "Weapon Uruk_Sword")
        .is_none());
}

// ============================================================================
// Browsing
// ============================================================================

#[test]
fn test_browse_all_is_sorted_and_complete() {
    let temp_dir = TempDir::new().unwrap();
    create_file(
        temp_dir.path(),
        "w.ini",
        "Weapon Zeta\nObject alpha\n#define MID 1\n",
    );
    create_file(temp_dir.path(), "lotr.csv", "bravo;text\n");
    let lookup = lookup_for(temp_dir.path());

    let items = lookup.browse_all();
    let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();

    assert_eq!(items.len(), 4);
    assert_eq!(
        labels,
        vec![
            "alpha [object]",
            "bravo [string]",
            "MID [macro]",
            "Zeta [weapon]"
        ]
    );
}

#[test]
fn test_browse_multi_site_entries_expand_per_site() {
    let temp_dir = TempDir::new().unwrap();
    create_file(temp_dir.path(), "w.ini", "Weapon Dup\nWeapon Dup\n");
    let lookup = lookup_for(temp_dir.path());

    let items = lookup.browse_all();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.label.starts_with("Dup [weapon]")));
    assert!(items.iter().any(|i| i.line == 1));
    assert!(items.iter().any(|i| i.line == 2));
}

// ============================================================================
// Completion
// ============================================================================

#[test]
fn test_ranking_exact_then_prefix_then_fallback() {
    let temp_dir = TempDir::new().unwrap();
    create_file(
        temp_dir.path(),
        "w.ini",
        "Weapon Wea\nWeapon Weapon_Sword\nWeapon Uruk_Wea_Blade\n",
    );
    let lookup = lookup_for(temp_dir.path());

    let items = lookup.complete(&bare_request("Wea", "  Weapon = "));
    let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();

    assert_eq!(labels, vec!["Wea", "Weapon_Sword", "Uruk_Wea_Blade"]);
}

#[test]
fn test_completion_capped_at_100() {
    let temp_dir = TempDir::new().unwrap();
    let mut content = String::new();
    for i in 0..150 {
        content.push_str(&format!("Weapon Weapon_{:03}\n", i));
    }
    create_file(temp_dir.path(), "w.ini", &content);
    let lookup = lookup_for(temp_dir.path());

    let items = lookup.complete(&bare_request("", "  Weapon = "));
    assert_eq!(items.len(), 100);
}

#[test]
fn test_kind_filter_narrows_candidates() {
    let temp_dir = TempDir::new().unwrap();
    create_file(
        temp_dir.path(),
        "w.ini",
        "Weapon Uruk_Sword\nArmor Uruk_Armor\n#define Uruk_Macro 1\n",
    );
    let lookup = lookup_for(temp_dir.path());

    let items = lookup.complete(&bare_request("Uruk", "  Weapon = PRIMARY "));
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].label, "Uruk_Sword");
    assert_eq!(items[0].kind, CandidateKind::Symbol(SymbolKind::Weapon));
}

#[test]
fn test_command_filter_admits_both_kinds() {
    let temp_dir = TempDir::new().unwrap();
    create_file(
        temp_dir.path(),
        "c.ini",
        "CommandSet SetA\nCommandButton ButtonA\nWeapon WeaponA\n",
    );
    let lookup = lookup_for(temp_dir.path());

    let items = lookup.complete(&bare_request("", "  CommandSet = "));
    let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["ButtonA", "SetA"]);
}

#[test]
fn test_no_filter_includes_macros_and_strings() {
    let temp_dir = TempDir::new().unwrap();
    create_file(temp_dir.path(), "w.ini", "Weapon Uruk_Sword\n#define Uruk_HP 5\n");
    create_file(temp_dir.path(), "lotr.csv", "uruk_name;Uruk\n");
    let lookup = lookup_for(temp_dir.path());

    let items = lookup.complete(&bare_request("Uruk", "  Side = "));
    let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();

    assert!(labels.contains(&"Uruk_Sword"));
    assert!(labels.contains(&"Uruk_HP"));
    assert!(labels.contains(&"uruk_name"));
}

#[test]
fn test_label_line_admits_strings_despite_filter() {
    let temp_dir = TempDir::new().unwrap();
    create_file(temp_dir.path(), "w.ini", "Weapon Uruk_Sword\n");
    create_file(temp_dir.path(), "lotr.csv", "uruk_description;text\n");
    let lookup = lookup_for(temp_dir.path());

    // "weapon" derives a kind filter; "description" still admits strings.
    let items = lookup.complete(&bare_request("uruk", "  WeaponDescription = "));
    let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();

    assert!(labels.contains(&"Uruk_Sword"));
    assert!(labels.contains(&"uruk_description"));
}

#[test]
fn test_behavior_names_offered_on_declaration_line() {
    let temp_dir = TempDir::new().unwrap();
    create_file(temp_dir.path(), "o.ini", "Object A\n");
    let lookup = lookup_for(temp_dir.path());

    let text = "Object A\n  Behavior = \n";
    let request = CompletionRequest {
        prefix: "Slo",
        line: "  Behavior = ",
        text,
        offset: text.find("Behavior").unwrap(),
    };
    let items = lookup.complete(&request);

    assert!(items
        .iter()
        .any(|i| i.label == "SlowDeathBehavior" && i.kind == CandidateKind::Behavior));
}

#[test]
fn test_parameters_offered_inside_behavior_block() {
    let temp_dir = TempDir::new().unwrap();
    create_file(temp_dir.path(), "o.ini", "Object A\n");
    let lookup = lookup_for(temp_dir.path());

    let text = "Object A\n  Behavior = SlowDeathBehavior ModuleTag_01\n    Dest\n";
    let request = CompletionRequest {
        prefix: "Dest",
        line: "    Dest",
        text,
        offset: text.find("Dest").unwrap(),
    };
    let items = lookup.complete(&request);

    let param = items
        .iter()
        .find(|i| i.kind == CandidateKind::Parameter)
        .expect("parameter candidate");
    assert_eq!(param.label, "DestructionDelay");
    assert_eq!(param.detail, "UnsignedInt");
}

#[test]
fn test_no_parameters_outside_known_behavior() {
    let temp_dir = TempDir::new().unwrap();
    create_file(temp_dir.path(), "o.ini", "Object A\n");
    let lookup = lookup_for(temp_dir.path());

    let text = "Object A\n  Unknown = Mystery ModuleTag_01\n    Dest\n";
    let request = CompletionRequest {
        prefix: "Dest",
        line: "    Dest",
        text,
        offset: text.find("Dest").unwrap(),
    };
    let items = lookup.complete(&request);

    assert!(items.iter().all(|i| i.kind != CandidateKind::Parameter));
}

#[test]
fn test_ties_break_alphabetically_case_insensitive() {
    let temp_dir = TempDir::new().unwrap();
    create_file(
        temp_dir.path(),
        "w.ini",
        "Weapon Wb_Late\nWeapon wa_early\nWeapon WC_Last\n",
    );
    let lookup = lookup_for(temp_dir.path());

    let items = lookup.complete(&bare_request("w", "  Weapon = "));
    let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["wa_early", "Wb_Late", "WC_Last"]);
}
