//! Static role-scoped menu catalog
//!
//! Built once at first use from literals; read-only at runtime. Item order
//! within a role is the display order.

use crate::auth::Role;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A static, role-scoped navigation entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub icon: String,
    pub label: String,
    pub description: String,
    pub path: String,
}

fn item(id: &str, icon: &str, label: &str, description: &str, path: &str) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        icon: icon.to_string(),
        label: label.to_string(),
        description: description.to_string(),
        path: path.to_string(),
    }
}

static MENU_CATALOG: Lazy<HashMap<Role, Vec<MenuItem>>> = Lazy::new(|| {
    let mut catalog = HashMap::new();

    catalog.insert(
        Role::Operator,
        vec![
            item("test_menu", "🧪", "Test Menu", "Rozpocznij testy urządzeń", "/page/tests/js/0.1.0/"),
            item("device_select", "🛡️", "Device Selection", "Wybierz urządzenie do testów", "/page/devices/js/0.1.0/"),
            item("user_data", "👤", "User Data", "Dane użytkownika", "/page/settings/js/0.1.0/"),
            item("device_data", "📊", "Device Data", "Dane urządzenia", "/page/devices/js/0.1.0/"),
            item("test_reports", "📋", "Test Reports", "Raporty testów", "/page/reports/js/0.1.0/"),
            item("realtime_sensors", "📡", "Real-time Sensors", "Czujniki w czasie rzeczywistym", "/page/devices/js/0.1.0/"),
            item("device_history", "📈", "Device History", "Historia urządzenia", "/page/devices/js/0.1.0/"),
        ],
    );

    catalog.insert(
        Role::Admin,
        vec![
            item("test_menu", "🧪", "Test Menu", "Zarządzanie testami", "/page/tests/js/0.1.0/"),
            item("user_data", "👤", "User Data", "Dane użytkownika", "/page/settings/js/0.1.0/"),
            item("users", "👥", "Users Management", "Zarządzanie użytkownikami", "/page/settings/js/0.1.0/"),
            item("reports_view", "📊", "Reports View", "Przeglądanie raportów", "/page/reports/js/0.1.0/"),
            item("reports_batch", "📋", "Batch Reports", "Raporty zbiorcze", "/page/reports/js/0.1.0/"),
            item("reports_schedule", "⏰", "Reports Schedule", "Harmonogram raportów", "/page/reports/js/0.1.0/"),
            item("device_history", "📈", "Device History", "Historia urządzeń", "/page/devices/js/0.1.0/"),
            item("workshop", "🔧", "Workshop", "Warsztat serwisowy", "/page/workshop/js/0.1.0/"),
            item("settings_system", "⚙️", "System Settings", "Ustawienia systemu", "/page/system/js/0.1.0/"),
        ],
    );

    catalog.insert(
        Role::Superuser,
        vec![
            item("test_menu", "🧪", "Test Menu", "Kompletne zarządzanie testami", "/page/tests/js/0.1.0/"),
            item("user_data", "👤", "User Data", "Dane użytkownika", "/page/settings/js/0.1.0/"),
            item("users", "👥", "Users Management", "Zarządzanie wszystkimi użytkownikami", "/page/settings/js/0.1.0/"),
            item("reports_view", "📊", "Reports View", "Wszystkie raporty", "/page/reports/js/0.1.0/"),
            item("reports_batch", "📋", "Batch Reports", "Raporty zbiorcze", "/page/reports/js/0.1.0/"),
            item("reports_schedule", "⏰", "Reports Schedule", "Zaawansowany harmonogram", "/page/reports/js/0.1.0/"),
            item("device_history", "📈", "Device History", "Pełna historia urządzeń", "/page/devices/js/0.1.0/"),
            item("workshop", "🔧", "Workshop", "Zarządzanie warsztatem", "/page/workshop/js/0.1.0/"),
            item("settings_system", "⚙️", "System Settings", "Zaawansowane ustawienia", "/page/system/js/0.1.0/"),
            item("settings_integration", "🔗", "Integrations", "Integracje zewnętrzne", "/page/system/js/0.1.0/"),
            item("settings_standards", "📏", "Standards", "Standardy i normy", "/page/system/js/0.1.0/"),
            item("settings_scenarios", "🎯", "Scenarios", "Scenariusze testowe", "/page/system/js/0.1.0/"),
            item("service_menu", "🛠️", "Service Menu", "Menu serwisowe", "/page/service/js/0.1.0/"),
            item("advanced_diagnostics", "🔍", "Advanced Diagnostics", "Zaawansowana diagnostyka", "/page/system/js/0.1.0/"),
        ],
    );

    catalog.insert(
        Role::Serviceuser,
        vec![
            item("test_menu", "🧪", "Test Menu", "Menu testów serwisowych", "/page/tests/js/0.1.0/"),
            item("user_data", "👤", "User Data", "Dane serviceusera", "/page/settings/js/0.1.0/"),
            item("device_data", "📊", "Device Data", "Dane urządzenia", "/page/devices/js/0.1.0/"),
            item("test_reports", "📋", "Test Reports", "Raporty serwisowe", "/page/reports/js/0.1.0/"),
            item("realtime_sensors", "📡", "Real-time Sensors", "Monitoring czujników", "/page/devices/js/0.1.0/"),
            item("device_history", "📈", "Device History", "Historia serwisowania", "/page/devices/js/0.1.0/"),
            item("workshop_parts", "🔩", "Workshop Parts", "Części zamienne", "/page/workshop/js/0.1.0/"),
            item("workshop_maintenance", "🔧", "Maintenance", "Harmonogram konserwacji", "/page/workshop/js/0.1.0/"),
            item("workshop_tools", "🛠️", "Tools", "Narzędzia serwisowe", "/page/workshop/js/0.1.0/"),
            item("workshop_inventory", "📦", "Inventory", "Inwentarz warsztatowy", "/page/workshop/js/0.1.0/"),
            item("service_menu", "⚙️", "Service Menu", "Menu serwisowe", "/page/service/js/0.1.0/"),
            item("advanced_diagnostics", "🔍", "Advanced Diagnostics", "Diagnostyka zaawansowana", "/page/system/js/0.1.0/"),
        ],
    );

    catalog
});

/// Ordered menu entries for a role
pub fn menu_for(role: Role) -> &'static [MenuItem] {
    MENU_CATALOG
        .get(&role)
        .map(|items| items.as_slice())
        .unwrap_or(&[])
}
