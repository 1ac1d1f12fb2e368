use std::env;
use std::sync::{Mutex, OnceLock};

use replyr_cli::commands::{config, doctor, process};
use serde_json::Value;

// Every REPLYR_* variable any test touches, cleared between runs so state
// never leaks across the shared-process test harness.
const MANAGED_VARS: &[&str] = &[
    "REPLYR_LLM_API_KEY",
    "REPLYR_LLM_MODEL",
    "REPLYR_CRM_API_KEY",
    "REPLYR_CRM_LEAD_WORKFLOW_ID",
];

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn with_env(vars: &[(&str, &str)], test: impl FnOnce()) {
    let _guard = ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env lock");

    for var in MANAGED_VARS {
        env::remove_var(var);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(test));

    for var in MANAGED_VARS {
        env::remove_var(var);
    }

    if let Err(panic) = result {
        std::panic::resume_unwind(panic);
    }
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be JSON")
}

#[test]
fn doctor_fails_without_a_model_credential() {
    with_env(&[], || {
        let report = parse_payload(&doctor::run(true));

        assert_eq!(report["overall_status"], "fail");
        assert_eq!(report["checks"][0]["name"], "config_validation");
        assert_eq!(report["checks"][0]["status"], "fail");
        assert!(report["checks"][0]["details"]
            .as_str()
            .unwrap_or("")
            .contains("llm.api_key"));
        assert_eq!(report["checks"][1]["status"], "skipped");
    });
}

#[test]
fn doctor_passes_with_a_model_credential() {
    with_env(&[("REPLYR_LLM_API_KEY", "sk-test")], || {
        let report = parse_payload(&doctor::run(true));

        assert_eq!(report["overall_status"], "pass");
        assert_eq!(report["checks"][1]["name"], "model_credential_readiness");
        assert_eq!(report["checks"][1]["status"], "pass");
        assert!(report["checks"][2]["details"].as_str().unwrap_or("").contains("disabled"));
    });
}

#[test]
fn doctor_reports_armed_lead_workflow() {
    with_env(
        &[
            ("REPLYR_LLM_API_KEY", "sk-test"),
            ("REPLYR_CRM_API_KEY", "ghl-test"),
            ("REPLYR_CRM_LEAD_WORKFLOW_ID", "wf-42"),
        ],
        || {
            let report = parse_payload(&doctor::run(true));

            assert_eq!(report["overall_status"], "pass");
            let crm_details = report["checks"][2]["details"].as_str().unwrap_or("");
            assert!(crm_details.contains("connected"));
            assert!(crm_details.contains("wf-42"));
        },
    );
}

#[test]
fn doctor_human_output_lists_every_check() {
    with_env(&[("REPLYR_LLM_API_KEY", "sk-test")], || {
        let output = doctor::run(false);

        assert!(output.starts_with("doctor: all readiness checks passed"));
        assert!(output.contains("- config_validation: pass"));
        assert!(output.contains("- model_credential_readiness: pass"));
        assert!(output.contains("- crm_readiness: pass"));
    });
}

#[test]
fn config_attributes_sources_and_redacts_secrets() {
    with_env(
        &[("REPLYR_LLM_API_KEY", "sk-super-secret"), ("REPLYR_LLM_MODEL", "gpt-4o")],
        || {
            let output = config::run();

            assert!(!output.contains("sk-super-secret"), "secret must never be printed");
            assert!(output.contains("- llm.api_key = sk-*** (source: env (REPLYR_LLM_API_KEY))"));
            assert!(output.contains("- llm.model = gpt-4o (source: env (REPLYR_LLM_MODEL))"));
            assert!(output.contains("- crm.api_key = <unset> (source: default)"));
            assert!(output.contains("- server.port = 8080 (source: default)"));
        },
    );
}

#[test]
fn config_reports_validation_failure_without_a_credential() {
    with_env(&[], || {
        let output = config::run();
        assert!(output.starts_with("config validation failed:"));
        assert!(output.contains("llm.api_key"));
    });
}

#[test]
fn process_rejects_an_empty_comment_before_any_network_call() {
    with_env(&[("REPLYR_LLM_API_KEY", "sk-test")], || {
        let result = process::run("", None);

        assert_eq!(result.exit_code, 1, "invalid input maps to exit code 1");
        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "process");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "invalid_input");
    });
}

#[test]
fn process_fails_with_config_error_without_a_credential() {
    with_env(&[], || {
        let result = process::run("Great product!", None);

        assert_eq!(result.exit_code, 2, "config failure maps to exit code 2");
        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "config_validation");
        assert!(payload["message"].as_str().unwrap_or("").contains("llm.api_key"));
    });
}
