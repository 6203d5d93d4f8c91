//! In-memory store for the tests backend
//!
//! Collections are seeded from literals at startup and guarded by `RwLock`
//! so concurrent handlers serialize their mutations. Nothing is durable;
//! a restart loses everything.

use crate::error::{Result, ServiceError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::RwLock;
use uuid::Uuid;

/// A reusable multi-step test scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestScenario {
    pub id: String,
    pub name: String,
    pub description: String,
    pub steps: Vec<String>,
    pub duration: u64,
    pub created: String,
}

/// A saved test configuration template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub device_type: String,
    pub test_type: String,
    pub is_template: bool,
}

/// One executed (or configured) test in the history list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestHistoryEntry {
    pub id: String,
    pub name: String,
    pub device: String,
    pub result: String,
    pub date: String,
    pub duration: String,
}

/// Payload for starting a test from a menu option
#[derive(Debug, Deserialize)]
pub struct TestStartRequest {
    pub option: String,
    pub user: String,
    pub role: String,
}

fn empty_string() -> String {
    String::new()
}

/// Payload from the test configuration wizard
#[derive(Debug, Deserialize)]
pub struct TestConfigRequest {
    pub name: String,
    #[serde(default = "empty_string")]
    pub description: String,
    pub device: Value,
    pub test: Value,
    pub parameters: Value,
    #[serde(default)]
    pub save_as_template: bool,
}

/// Payload for creating a scenario
#[derive(Debug, Deserialize)]
pub struct ScenarioRequest {
    pub name: String,
    #[serde(default = "empty_string")]
    pub description: String,
    pub steps: Vec<String>,
    pub duration: u64,
}

/// Thread-safe in-memory store backing the tests backend
pub struct TestStore {
    scenarios: RwLock<Vec<TestScenario>>,
    templates: RwLock<Vec<TestTemplate>>,
    history: RwLock<Vec<TestHistoryEntry>>,
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TestStore {
    /// Create a store seeded with the factory data set
    pub fn new() -> Self {
        let scenarios = vec![
            TestScenario {
                id: "sc1".to_string(),
                name: "High Pressure Test".to_string(),
                description: "Test for high pressure environments".to_string(),
                steps: vec!["Init", "Pressure", "Hold", "Release"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                duration: 600,
                created: "2024-01-15".to_string(),
            },
            TestScenario {
                id: "sc2".to_string(),
                name: "Endurance Test".to_string(),
                description: "Long duration endurance testing".to_string(),
                steps: vec!["Init", "Cycle", "Monitor", "Report"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                duration: 3600,
                created: "2024-01-10".to_string(),
            },
        ];

        let templates = vec![
            TestTemplate {
                id: "tmpl_001".to_string(),
                name: "Standard FFP2 Test".to_string(),
                description: "Standard testing protocol for FFP2 masks".to_string(),
                device_type: "Respiratory Mask".to_string(),
                test_type: "Pressure Test".to_string(),
                is_template: true,
            },
            TestTemplate {
                id: "tmpl_002".to_string(),
                name: "Quick Filter Test".to_string(),
                description: "Quick efficiency test for filters".to_string(),
                device_type: "Filter".to_string(),
                test_type: "Efficiency Test".to_string(),
                is_template: true,
            },
        ];

        let history = vec![
            TestHistoryEntry {
                id: "test_001".to_string(),
                name: "Mask Pressure Test".to_string(),
                device: "FFP2 Mask".to_string(),
                result: "PASSED".to_string(),
                date: "2024-01-20T10:30:00Z".to_string(),
                duration: "00:05:30".to_string(),
            },
            TestHistoryEntry {
                id: "test_002".to_string(),
                name: "Filter Efficiency Test".to_string(),
                device: "FFP3 Filter".to_string(),
                result: "FAILED".to_string(),
                date: "2024-01-19T14:15:00Z".to_string(),
                duration: "00:08:45".to_string(),
            },
        ];

        Self {
            scenarios: RwLock::new(scenarios),
            templates: RwLock::new(templates),
            history: RwLock::new(history),
        }
    }

    /// Create an empty store (tests only)
    #[cfg(test)]
    pub fn empty() -> Self {
        Self {
            scenarios: RwLock::new(Vec::new()),
            templates: RwLock::new(Vec::new()),
            history: RwLock::new(Vec::new()),
        }
    }

    /// Start a test session: a generated id, a history entry, and the
    /// session record for the caller
    pub fn start_session(&self, request: &TestStartRequest) -> Value {
        let test_id = Uuid::new_v4().to_string();
        let created = Utc::now().to_rfc3339();

        let entry = TestHistoryEntry {
            id: test_id.clone(),
            name: format!("Test: {}", request.option),
            device: "Unassigned".to_string(),
            result: "STARTED".to_string(),
            date: created.clone(),
            duration: "00:00:00".to_string(),
        };
        self.history.write().unwrap().insert(0, entry);

        json!({
            "id": test_id,
            "option": request.option,
            "user": request.user,
            "role": request.role,
            "status": "started",
            "created": created,
            "next_step": "device_selection",
        })
    }

    /// Configure a test from wizard data; optionally clone it into the
    /// templates list. Returns (test id, configuration record).
    pub fn configure(&self, request: &TestConfigRequest) -> (String, Value) {
        let test_id = Uuid::new_v4().to_string();
        let created = Utc::now().to_rfc3339();

        let device_type = request
            .device
            .get("deviceType")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string();

        if request.save_as_template {
            let template = TestTemplate {
                id: format!("tmpl_{}", test_id),
                name: request.name.clone(),
                description: request.description.clone(),
                device_type: device_type.clone(),
                test_type: request
                    .test
                    .get("testType")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown")
                    .to_string(),
                is_template: true,
            };
            self.templates.write().unwrap().push(template);
        }

        let entry = TestHistoryEntry {
            id: test_id.clone(),
            name: request.name.clone(),
            device: device_type,
            result: "CONFIGURED".to_string(),
            date: created.clone(),
            duration: "00:00:00".to_string(),
        };
        self.history.write().unwrap().insert(0, entry);

        let config = json!({
            "id": test_id,
            "name": request.name,
            "description": request.description,
            "device": request.device,
            "test": request.test,
            "parameters": request.parameters,
            "created": created,
            "status": "configured",
        });

        (test_id, config)
    }

    /// All scenarios
    pub fn scenarios(&self) -> Vec<TestScenario> {
        self.scenarios.read().unwrap().clone()
    }

    /// Create a scenario with a generated id and timestamp
    pub fn add_scenario(&self, request: &ScenarioRequest) -> TestScenario {
        let scenario = TestScenario {
            id: Uuid::new_v4().to_string(),
            name: request.name.clone(),
            description: request.description.clone(),
            steps: request.steps.clone(),
            duration: request.duration,
            created: Utc::now().to_rfc3339(),
        };
        self.scenarios.write().unwrap().push(scenario.clone());
        scenario
    }

    /// All templates
    pub fn templates(&self) -> Vec<TestTemplate> {
        self.templates.read().unwrap().clone()
    }

    /// History entries, optionally filtered by result (case-insensitive).
    /// The literal filter "all" returns everything.
    pub fn history(&self, filter: &str) -> Vec<TestHistoryEntry> {
        let history = self.history.read().unwrap();
        if filter.eq_ignore_ascii_case("all") {
            return history.clone();
        }
        history
            .iter()
            .filter(|entry| entry.result.eq_ignore_ascii_case(filter))
            .cloned()
            .collect()
    }

    /// Snapshot of all collections for export
    pub fn export(&self, format: &str) -> Value {
        json!({
            "scenarios": self.scenarios.read().unwrap().clone(),
            "templates": self.templates.read().unwrap().clone(),
            "history": self.history.read().unwrap().clone(),
            "export_date": Utc::now().to_rfc3339(),
            "format": format,
        })
    }

    /// Aggregate counters over the current collections
    pub fn stats(&self) -> Value {
        let history = self.history.read().unwrap();
        let total_tests = history.len();
        let passed_tests = history.iter().filter(|t| t.result == "PASSED").count();
        let failed_tests = history.iter().filter(|t| t.result == "FAILED").count();
        let success_rate = if total_tests > 0 {
            passed_tests as f64 / total_tests as f64 * 100.0
        } else {
            0.0
        };

        json!({
            "total_tests": total_tests,
            "passed_tests": passed_tests,
            "failed_tests": failed_tests,
            "success_rate": success_rate,
            "total_scenarios": self.scenarios.read().unwrap().len(),
            "total_templates": self.templates.read().unwrap().len(),
        })
    }

    /// Remove one history entry by id. Absent ids leave the collection
    /// untouched and report not-found.
    pub fn delete_history(&self, test_id: &str) -> Result<()> {
        let mut history = self.history.write().unwrap();
        let original_length = history.len();
        history.retain(|entry| entry.id != test_id);

        if history.len() < original_length {
            Ok(())
        } else {
            Err(ServiceError::not_found(format!(
                "Test {} not found",
                test_id
            )))
        }
    }
}
