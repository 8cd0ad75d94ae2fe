//! Integration tests for the fixpoint CLI.

use fixpoint_cli::pipeline::COMMAND_LINE_PIPELINE;
use fixpoint_cli::utils::{module_name, write_default_config};
use fixpoint_cli::{Config, Optimized, optimize, parse_module, resolve_pipeline};
use fixpoint_core::Error;
use fixpoint_ir::Module;
use fixpoint_utils::{CONFIG_FILE, PipelineConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PROGRAM: &str = "fn main(x) {
    let a = 2 * 3;
    let b = a + 0;
    let c = x * 1;
    print b + c;
    return;
}
";

const DEAD_CHAIN: &str = "fn main() {
    let a = 1;
    let b = a;
    let c = b;
    print 0;
}
";

fn parse(source: &str) -> Module {
    parse_module(source, "test.fp", "test").unwrap()
}

fn passes(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// The default pipeline, loaded from a config file the test controls.
fn default_pipeline(once: bool) -> PipelineConfig {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join(CONFIG_FILE);
    Config::default().save(&config_path).unwrap();

    resolve_pipeline(None, Some(config_path.as_path()), once, temp_dir.path()).unwrap()
}

#[test]
fn test_default_pipeline_reaches_fixed_point() {
    let mut module = parse(PROGRAM);

    let outcome = optimize(&mut module, &default_pipeline(false)).unwrap();

    assert_eq!(
        outcome,
        Optimized {
            changed: true,
            rounds: 3
        }
    );
    assert_eq!(
        module.to_string(),
        "fn main(x) {
    let c = x;
    print 6 + c;
    return;
}
"
    );
}

#[test]
fn test_default_config_matches_registry() {
    let pipeline = default_pipeline(false);
    let names: Vec<&str> = pipeline.passes.iter().map(|p| p.name.as_str()).collect();

    assert_eq!(pipeline.name, fixpoint_ir::optimizer::DEFAULT_PIPELINE);
    assert_eq!(names, fixpoint_ir::optimizer::AVAILABLE_PASSES);
}

#[test]
fn test_once_runs_a_single_round() {
    let mut module = parse(PROGRAM);

    let outcome = optimize(&mut module, &default_pipeline(true)).unwrap();

    assert_eq!(
        outcome,
        Optimized {
            changed: true,
            rounds: 1
        }
    );
    assert_eq!(
        module.to_string(),
        "fn main(x) {
    let a = 6;
    let b = a;
    let c = x;
    print b + c;
    return;
}
"
    );
}

#[test]
fn test_dead_chain_needs_fixed_point() {
    let empty = TempDir::new().unwrap();
    let names = passes(&["dead-code-elimination"]);

    let mut module = parse(DEAD_CHAIN);
    let pipeline = resolve_pipeline(Some(names.as_slice()), None, false, empty.path()).unwrap();
    let outcome = optimize(&mut module, &pipeline).unwrap();
    assert_eq!(outcome.rounds, 4);
    assert_eq!(module.to_string(), "fn main() {\n    print 0;\n}\n");

    let mut module = parse(DEAD_CHAIN);
    let pipeline = resolve_pipeline(Some(names.as_slice()), None, true, empty.path()).unwrap();
    optimize(&mut module, &pipeline).unwrap();
    assert_eq!(module.statement_count(), 3);
}

#[test]
fn test_already_optimal_module_is_unchanged() {
    let source = "fn main(x) {\n    print x;\n}\n";
    let mut module = parse(source);

    let outcome = optimize(&mut module, &default_pipeline(false)).unwrap();

    assert_eq!(
        outcome,
        Optimized {
            changed: false,
            rounds: 1
        }
    );
    assert_eq!(module.to_string(), source);
}

#[test]
fn test_pass_error_is_returned() {
    let mut module = parse("fn main() {\n    let zero = 0;\n    print 1 / zero;\n}\n");

    let err = optimize(&mut module, &default_pipeline(false)).unwrap_err();
    assert!(matches!(err, Error::Pass { ref pass, .. } if pass == "constant-folding"));
    assert!(err.to_string().contains("division by zero"));
}

#[test]
fn test_iteration_limit_from_configuration() {
    let empty = TempDir::new().unwrap();
    let names = passes(&["dead-code-elimination"]);
    let mut pipeline = resolve_pipeline(Some(names.as_slice()), None, false, empty.path()).unwrap();
    pipeline.max_iterations = Some(2);

    let mut module = parse(DEAD_CHAIN);
    let err = optimize(&mut module, &pipeline).unwrap_err();

    assert!(matches!(
        err,
        Error::IterationLimit { ref pass, limit: 2 } if pass == COMMAND_LINE_PIPELINE
    ));
    // Work done before the limit is kept.
    assert_eq!(module.statement_count(), 2);
}

#[test]
fn test_resolve_pipeline_precedence() {
    let project = TempDir::new().unwrap();
    let nested = project.path().join("src");
    fs::create_dir_all(&nested).unwrap();

    let mut config = Config::new("project");
    config.pipeline.passes.truncate(1);
    config.save(project.path().join(CONFIG_FILE)).unwrap();

    let found = resolve_pipeline(None, None, false, &nested).unwrap();
    assert_eq!(found.name, "project");
    assert_eq!(found.passes.len(), 1);

    let names = passes(&["constant-folding", "dead-code-elimination"]);
    let overridden = resolve_pipeline(Some(names.as_slice()), None, false, &nested).unwrap();
    assert_eq!(overridden.name, COMMAND_LINE_PIPELINE);
    assert_eq!(overridden.passes.len(), 2);

    let explicit_path = project.path().join("other.toml");
    Config::new("explicit").save(&explicit_path).unwrap();
    let explicit = resolve_pipeline(None, Some(explicit_path.as_path()), false, &nested).unwrap();
    assert_eq!(explicit.name, "explicit");
}

#[test]
fn test_once_clears_iteration_limit() {
    let project = TempDir::new().unwrap();
    let mut config = Config::new("bounded");
    config.pipeline.max_iterations = Some(5);
    config.save(project.path().join(CONFIG_FILE)).unwrap();

    let pipeline = resolve_pipeline(None, None, true, project.path()).unwrap();
    assert!(!pipeline.fixed_point);
    assert_eq!(pipeline.max_iterations, None);
}

#[test]
fn test_resolve_pipeline_rejects_unknown_pass() {
    let empty = TempDir::new().unwrap();
    let names = passes(&["constant-folding", "vectorize"]);

    let err = resolve_pipeline(Some(names.as_slice()), None, false, empty.path()).unwrap_err();
    assert!(err.to_string().contains("vectorize"));
}

#[test]
fn test_parse_errors_are_reported() {
    let err = parse_module("fn main() { print 1 }", "broken.fp", "broken").unwrap_err();
    assert_eq!(err.to_string(), "Parsing failed");

    let err = parse_module("fn main() { print #; }", "broken.fp", "broken").unwrap_err();
    assert_eq!(err.to_string(), "Lexical analysis failed");
}

#[test]
fn test_write_default_config() {
    let temp_dir = TempDir::new().unwrap();

    let path = write_default_config(temp_dir.path()).unwrap();
    assert_eq!(path, temp_dir.path().join(CONFIG_FILE));

    let loaded = Config::load(&path).unwrap();
    assert!(loaded.pipeline.fixed_point);
    assert_eq!(loaded.pipeline.passes.len(), 4);

    let err = write_default_config(temp_dir.path()).unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

#[test]
fn test_module_name_from_path() {
    assert_eq!(module_name(Path::new("src/program.fp")), "program");
    assert_eq!(module_name(Path::new("")), "module");
}
