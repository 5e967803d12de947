//! In-process dispatch tests.
//!
//! Drives `CommandDispatcher::run_with_io` with a toolkit that records every
//! collaborator call before delegating to the reference analyzers.

use std::cell::{Cell, RefCell};
use std::io;

use pegasus_analyzers::{
    AnalyzerError, AnalyzerResult, DeviceTracking, FraudScreening, ImeiReport, NikAnalysis, NikReport,
    PersonaAnalysis, PersonaReport, PhoneAnalysis, PhoneFraudReport, PhoneReport, SlikReport,
    StandardToolkit, Toolkit, TrackingReport,
};
use pegasus_bridge::CommandDispatcher;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Call {
    operation: &'static str,
    args: Vec<Option<String>>,
    instance: usize,
}

#[derive(Default)]
struct RecordingToolkit {
    inner: StandardToolkit,
    calls: RefCell<Vec<Call>>,
    instances: Cell<usize>,
    failure: Option<AnalyzerError>,
}

impl RecordingToolkit {
    fn failing(failure: AnalyzerError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    fn recorder(&self) -> Box<Recorder<'_>> {
        let instance = self.instances.get() + 1;
        self.instances.set(instance);
        Box::new(Recorder {
            toolkit: self,
            instance,
        })
    }
}

struct Recorder<'a> {
    toolkit: &'a RecordingToolkit,
    instance: usize,
}

impl Recorder<'_> {
    fn record(&self, operation: &'static str, args: &[Option<&str>]) -> AnalyzerResult<()> {
        self.toolkit.calls.borrow_mut().push(Call {
            operation,
            args: args.iter().map(|a| a.map(str::to_string)).collect(),
            instance: self.instance,
        });
        match &self.toolkit.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }
}

impl NikAnalysis for Recorder<'_> {
    fn parse_nik(&self, nik: Option<&str>) -> AnalyzerResult<NikReport> {
        self.record("parse_nik", &[nik])?;
        self.toolkit.inner.nik_processor().parse_nik(nik)
    }

    fn check_slik_ojk(&self, nik: Option<&str>) -> AnalyzerResult<SlikReport> {
        self.record("check_slik_ojk", &[nik])?;
        self.toolkit.inner.nik_processor().check_slik_ojk(nik)
    }
}

impl PhoneAnalysis for Recorder<'_> {
    fn analyze_phone(&self, phone: Option<&str>) -> AnalyzerResult<PhoneReport> {
        self.record("analyze_phone", &[phone])?;
        self.toolkit.inner.phone_processor().analyze_phone(phone)
    }
}

impl FraudScreening for Recorder<'_> {
    fn check_imei_indonesia(&self, imei: Option<&str>) -> AnalyzerResult<ImeiReport> {
        self.record("check_imei_indonesia", &[imei])?;
        self.toolkit.inner.fraud_detector().check_imei_indonesia(imei)
    }

    fn analyze_phone_fraud_deep(&self, phone: Option<&str>) -> AnalyzerResult<PhoneFraudReport> {
        self.record("analyze_phone_fraud_deep", &[phone])?;
        self.toolkit.inner.fraud_detector().analyze_phone_fraud_deep(phone)
    }
}

impl PersonaAnalysis for Recorder<'_> {
    fn full_analysis_persona(
        &self,
        name: Option<&str>,
        phone: Option<&str>,
        nik: Option<&str>,
    ) -> AnalyzerResult<PersonaReport> {
        self.record("full_analysis_persona", &[name, phone, nik])?;
        self.toolkit
            .inner
            .persona_analyzer()
            .full_analysis_persona(name, phone, nik)
    }
}

impl DeviceTracking for Recorder<'_> {
    fn track_device(&self, phone: Option<&str>) -> AnalyzerResult<TrackingReport> {
        self.record("track_device", &[phone])?;
        self.toolkit.inner.device_tracker().track_device(phone)
    }
}

impl Toolkit for RecordingToolkit {
    fn nik_processor(&self) -> Box<dyn NikAnalysis + '_> {
        self.recorder()
    }

    fn phone_processor(&self) -> Box<dyn PhoneAnalysis + '_> {
        self.recorder()
    }

    fn fraud_detector(&self) -> Box<dyn FraudScreening + '_> {
        self.recorder()
    }

    fn persona_analyzer(&self) -> Box<dyn PersonaAnalysis + '_> {
        self.recorder()
    }

    fn device_tracker(&self) -> Box<dyn DeviceTracking + '_> {
        self.recorder()
    }
}

/// Run one request and return the parsed output line.
fn run(dispatcher: &CommandDispatcher<RecordingToolkit>, argument: Option<&str>) -> Value {
    let mut out = Vec::new();
    dispatcher
        .run_with_io(argument, &mut io::empty(), &mut out)
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.matches('\n').count(), 1, "exactly one line: {text:?}");
    assert!(text.ends_with('\n'));
    serde_json::from_str(&text).unwrap()
}

fn run_json(dispatcher: &CommandDispatcher<RecordingToolkit>, request: Value) -> Value {
    run(dispatcher, Some(&request.to_string()))
}

fn calls(dispatcher: &CommandDispatcher<RecordingToolkit>) -> Vec<Call> {
    dispatcher.toolkit().calls.borrow().clone()
}

// =============================================================================
// Routing
// =============================================================================

#[test]
fn test_analyze_phone_receives_sole_argument() {
    let dispatcher = CommandDispatcher::new(RecordingToolkit::default());
    let output = run_json(
        &dispatcher,
        json!({"command": "analyze_phone", "payload": {"phone": "081234567890"}}),
    );

    assert_eq!(
        calls(&dispatcher),
        vec![Call {
            operation: "analyze_phone",
            args: vec![Some("081234567890".to_string())],
            instance: 1,
        }]
    );

    let expected = StandardToolkit::default()
        .phone_processor()
        .analyze_phone(Some("081234567890"))
        .unwrap();
    assert_eq!(output, serde_json::to_value(&expected).unwrap());
    assert!(output.get("error").is_none());
}

#[test]
fn test_every_command_reaches_its_operation() {
    let cases = [
        ("analyze_nik", json!({"nik": "3171011505900001"}), "parse_nik"),
        ("check_slik", json!({"nik": "3171011505900001"}), "check_slik_ojk"),
        ("analyze_phone", json!({"phone": "0812"}), "analyze_phone"),
        ("fraud_check_imei", json!({"imei": "490154203237518"}), "check_imei_indonesia"),
        ("fraud_check_phone", json!({"phone": "0812"}), "analyze_phone_fraud_deep"),
        ("analyze_persona", json!({"name": "Budi"}), "full_analysis_persona"),
        ("track_device", json!({"phone": "0812"}), "track_device"),
    ];

    for (command, payload, operation) in cases {
        let dispatcher = CommandDispatcher::new(RecordingToolkit::default());
        run_json(&dispatcher, json!({"command": command, "payload": payload}));
        let recorded = calls(&dispatcher);
        assert_eq!(recorded.len(), 1, "{command}");
        assert_eq!(recorded[0].operation, operation, "{command}");
    }
}

#[test]
fn test_persona_arguments_in_binding_order() {
    let dispatcher = CommandDispatcher::new(RecordingToolkit::default());
    run_json(
        &dispatcher,
        json!({
            "command": "analyze_persona",
            "payload": {"nik": "3171011505900001", "phone": "081234567890", "name": "Budi"}
        }),
    );
    assert_eq!(
        calls(&dispatcher)[0].args,
        vec![
            Some("Budi".to_string()),
            Some("081234567890".to_string()),
            Some("3171011505900001".to_string()),
        ]
    );
}

#[test]
fn test_missing_fields_passed_as_absent() {
    let dispatcher = CommandDispatcher::new(RecordingToolkit::default());
    let output = run_json(&dispatcher, json!({"command": "analyze_persona", "payload": {}}));
    assert_eq!(calls(&dispatcher)[0].args, vec![None, None, None]);
    assert_eq!(output["target"], "Unknown");
}

#[test]
fn test_missing_payload_treated_as_empty() {
    let dispatcher = CommandDispatcher::new(RecordingToolkit::default());
    let output = run_json(&dispatcher, json!({"command": "track_device"}));
    assert_eq!(calls(&dispatcher)[0].args, vec![None]);
    assert_eq!(output, json!({"error": "Phone number required"}));
}

#[test]
fn test_unknown_command() {
    let dispatcher = CommandDispatcher::new(RecordingToolkit::default());
    let output = run_json(&dispatcher, json!({"command": "frobnicate"}));
    assert_eq!(output, json!({"error": "Unknown command: frobnicate"}));
    assert!(calls(&dispatcher).is_empty());
}

#[test]
fn test_missing_command() {
    let dispatcher = CommandDispatcher::new(RecordingToolkit::default());
    let output = run_json(&dispatcher, json!({"payload": {"phone": "0812"}}));
    assert_eq!(output, json!({"error": "Unknown command: None"}));
    assert!(calls(&dispatcher).is_empty());

    let output = run_json(&dispatcher, json!({"command": null, "payload": {}}));
    assert_eq!(output, json!({"error": "Unknown command: None"}));
}

#[test]
fn test_unknown_command_ignores_payload_shape() {
    let dispatcher = CommandDispatcher::new(RecordingToolkit::default());
    for payload in [json!("x"), json!([1]), json!(null), json!(7)] {
        let output = run_json(&dispatcher, json!({"command": "frobnicate", "payload": payload}));
        assert_eq!(output, json!({"error": "Unknown command: frobnicate"}));
    }
    assert!(calls(&dispatcher).is_empty());
}

#[test]
fn test_boolean_command_is_unknown() {
    let dispatcher = CommandDispatcher::new(RecordingToolkit::default());
    let output = run_json(&dispatcher, json!({"command": true}));
    assert_eq!(output, json!({"error": "Unknown command: True"}));
}

#[test]
fn test_non_string_command_is_unknown() {
    let dispatcher = CommandDispatcher::new(RecordingToolkit::default());
    let output = run_json(&dispatcher, json!({"command": 42}));
    assert_eq!(output, json!({"error": "Unknown command: 42"}));
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_no_input() {
    let dispatcher = CommandDispatcher::new(RecordingToolkit::default());
    assert_eq!(run(&dispatcher, None), json!({"error": "No input provided"}));
}

#[test]
fn test_malformed_json() {
    let dispatcher = CommandDispatcher::new(RecordingToolkit::default());
    let output = run(&dispatcher, Some("{\"command\": "));
    let error = output["error"].as_str().unwrap();
    assert!(error.starts_with("Execution Error: "), "{error}");
    assert!(calls(&dispatcher).is_empty());
}

#[test]
fn test_payload_not_object() {
    let dispatcher = CommandDispatcher::new(RecordingToolkit::default());
    let output = run_json(&dispatcher, json!({"command": "analyze_nik", "payload": "3171011505900001"}));
    let error = output["error"].as_str().unwrap();
    assert!(error.starts_with("Execution Error: "), "{error}");
}

#[test]
fn test_null_payload_is_execution_error() {
    let dispatcher = CommandDispatcher::new(RecordingToolkit::default());
    let output = run_json(&dispatcher, json!({"command": "analyze_nik", "payload": null}));
    let error = output["error"].as_str().unwrap();
    assert!(error.starts_with("Execution Error: "), "{error}");
    assert!(calls(&dispatcher).is_empty());
}

#[test]
fn test_structured_argument_is_execution_error() {
    let dispatcher = CommandDispatcher::new(RecordingToolkit::default());
    let output = run_json(&dispatcher, json!({"command": "analyze_phone", "payload": {"phone": ["0812"]}}));
    let error = output["error"].as_str().unwrap();
    assert!(error.starts_with("Execution Error: "), "{error}");
    assert!(error.contains("phone"), "{error}");
    assert!(calls(&dispatcher).is_empty());
}

#[test]
fn test_collaborator_fault_is_execution_error() {
    let dispatcher = CommandDispatcher::new(RecordingToolkit::failing(AnalyzerError::fault("registry offline")));
    let output = run_json(&dispatcher, json!({"command": "check_slik", "payload": {"nik": "3171011505900001"}}));
    assert_eq!(output, json!({"error": "Execution Error: registry offline"}));
}

#[test]
fn test_collaborator_rejection_passes_through() {
    let dispatcher = CommandDispatcher::new(RecordingToolkit::failing(AnalyzerError::rejected("Quota exceeded")));
    let output = run_json(&dispatcher, json!({"command": "fraud_check_imei", "payload": {"imei": "1"}}));
    assert_eq!(output, json!({"error": "Quota exceeded"}));
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_fresh_collaborator_per_call() {
    let dispatcher = CommandDispatcher::new(RecordingToolkit::default());
    let request = json!({"command": "analyze_nik", "payload": {"nik": "3171011505900001"}});
    run_json(&dispatcher, request.clone());
    run_json(&dispatcher, request);
    let instances: Vec<usize> = calls(&dispatcher).iter().map(|c| c.instance).collect();
    assert_eq!(instances, vec![1, 2]);
}

#[test]
fn test_idempotent_for_deterministic_collaborator() {
    let dispatcher = CommandDispatcher::new(RecordingToolkit::default());
    let request = json!({"command": "analyze_nik", "payload": {"nik": "3273024712050042"}});
    let first = run_json(&dispatcher, request.clone());
    let second = run_json(&dispatcher, request);
    assert_eq!(first, second);
    assert_eq!(first["gender"], "Female");
    assert_eq!(first["tanggal_lahir"], "07-12-2005");
}
