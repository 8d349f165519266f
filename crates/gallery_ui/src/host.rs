//! Browser services the components reach outside the page tree.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

/// A synthesized POST form handed to the host for submission, which navigates
/// away from the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub action: String,
    pub fields: Vec<(String, String)>,
}

impl FormSubmission {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Per-tab string store with `sessionStorage` semantics.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    entries: HashMap<String, String>,
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

pub trait Host {
    /// Blocking text prompt; `None` when the user cancels.
    fn prompt(&mut self, message: &str, default: &str) -> Option<String>;
    /// Blocking notice.
    fn alert(&mut self, message: &str);
    fn submit_form(&mut self, form: FormSubmission);
    fn scroll_y(&self) -> i64;
    fn scroll_to(&mut self, y: i64);
    fn session(&mut self) -> &mut dyn SessionStore;

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
