//! In-memory system module registry and simulated process control
//!
//! Modules are logical subsystems tracked only as status flags. Restart and
//! shutdown flip the status field and nothing else; no process control
//! occurs.

use crate::error::{Result, ServiceError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::RwLock;
use uuid::Uuid;

/// A named, independently toggleable logical subsystem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemModule {
    pub name: String,
    pub version: String,
    pub status: String,
    pub description: String,
    pub last_updated: String,
}

/// Mutable system-level status record
#[derive(Debug, Clone, Serialize)]
struct SystemStatus {
    name: String,
    version: String,
    status: String,
    startup_time: String,
    restart_count: u32,
}

/// Registry of system modules plus the overall status record
pub struct ModuleRegistry {
    modules: RwLock<Vec<SystemModule>>,
    status: RwLock<SystemStatus>,
}

fn seed_module(name: &str, status: &str, description: &str) -> SystemModule {
    SystemModule {
        name: name.to_string(),
        version: "0.1.0".to_string(),
        status: status.to_string(),
        description: description.to_string(),
        last_updated: "2024-01-20T10:00:00Z".to_string(),
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleRegistry {
    pub fn new() -> Self {
        let modules = vec![
            seed_module(
                "Authentication",
                "active",
                "User authentication and authorization module",
            ),
            seed_module("Testing", "active", "Device testing and validation module"),
            seed_module(
                "Reports",
                "active",
                "Report generation and management module",
            ),
            seed_module(
                "Dashboard",
                "active",
                "Main dashboard and navigation module",
            ),
            seed_module(
                "Devices",
                "pending",
                "Device management and configuration module",
            ),
        ];

        let status = SystemStatus {
            name: "MASKTRONIC C20".to_string(),
            version: crate::VERSION.to_string(),
            status: "online".to_string(),
            startup_time: Utc::now().to_rfc3339(),
            restart_count: 0,
        };

        Self {
            modules: RwLock::new(modules),
            status: RwLock::new(status),
        }
    }

    /// All registered modules
    pub fn list(&self) -> Vec<SystemModule> {
        self.modules.read().unwrap().clone()
    }

    /// Names of modules currently active
    pub fn active_module_names(&self) -> Vec<String> {
        self.modules
            .read()
            .unwrap()
            .iter()
            .filter(|module| module.status == "active")
            .map(|module| module.name.clone())
            .collect()
    }

    /// Flip a module between active and inactive, refreshing its timestamp
    pub fn toggle(&self, name: &str) -> Result<SystemModule> {
        let mut modules = self.modules.write().unwrap();
        let module = modules
            .iter_mut()
            .find(|module| module.name == name)
            .ok_or_else(|| ServiceError::not_found("Module not found"))?;

        module.status = if module.status == "active" {
            "inactive".to_string()
        } else {
            "active".to_string()
        };
        module.last_updated = Utc::now().to_rfc3339();

        Ok(module.clone())
    }

    /// Overall status string ("online", "restarting", "shutting_down")
    pub fn current_status(&self) -> String {
        self.status.read().unwrap().status.clone()
    }

    /// System display name
    pub fn system_name(&self) -> String {
        self.status.read().unwrap().name.clone()
    }

    /// Simulated restart: bump the counter, flip the status flag
    pub fn restart(&self, reason: &str, delay_seconds: u64) -> Value {
        let mut status = self.status.write().unwrap();
        status.restart_count += 1;
        status.status = "restarting".to_string();

        json!({
            "message": "System restart initiated",
            "restart_id": Uuid::new_v4().to_string(),
            "reason": reason,
            "delay_seconds": delay_seconds,
            "estimated_completion": Utc::now().to_rfc3339(),
        })
    }

    /// Simulated shutdown: flip the status flag
    pub fn shutdown(&self) -> Value {
        let mut status = self.status.write().unwrap();
        status.status = "shutting_down".to_string();

        json!({
            "message": "System shutdown initiated",
            "timestamp": Utc::now().to_rfc3339(),
            "final_status": "offline",
        })
    }

    /// Status record plus module counts
    pub fn status_snapshot(&self) -> Value {
        let status = self.status.read().unwrap();
        let modules = self.modules.read().unwrap();
        let active = modules.iter().filter(|m| m.status == "active").count();

        json!({
            "name": status.name,
            "version": status.version,
            "status": status.status,
            "startup_time": status.startup_time,
            "restart_count": status.restart_count,
            "current_time": Utc::now().to_rfc3339(),
            "active_modules": active,
            "total_modules": modules.len(),
        })
    }
}
