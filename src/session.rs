//! Session and opaque handle management
//!
//! A session is the Rust-side mirror of one logged-in account in the host
//! application. It is exposed to the host as an opaque pointer through FFI.
//! The host pushes server-driven state into the session (credentials,
//! realm-emoji map); the picker and downloader units only ever read it.

use crate::error::{Error, ErrorCode, Result};
use crate::types::{Auth, RealmEmojiMap};
use std::collections::HashMap;
use std::os::raw::c_void;

/// Log levels for callbacks
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
}

/// Callback function type for logging
/// Parameters: level, message, user_data
pub type LogCallback = extern "C" fn(LogLevel, *const std::os::raw::c_char, *mut c_void);

/// A session for one account on one realm
///
/// This is a Rust struct that will be exposed as an opaque handle through FFI
pub struct Session {
    /// User-defined identifier for this session
    pub id: String,
    /// Configuration options
    pub config: HashMap<String, String>,
    /// Credentials for the account, injected by the host
    auth: Option<Auth>,
    /// Realm-custom emoji, keyed by name; injected by the host, read-only here
    realm_emoji: RealmEmojiMap,
    /// Internal state
    initialized: bool,
    /// Optional log callback
    log_callback: Option<LogCallback>,
    /// User data passed to callbacks
    user_data: *mut c_void,
}

impl Session {
    /// Create a new session
    pub fn new(id: impl Into<String>) -> Self {
        Session {
            id: id.into(),
            config: HashMap::new(),
            auth: None,
            realm_emoji: RealmEmojiMap::new(),
            initialized: false,
            log_callback: None,
            user_data: std::ptr::null_mut(),
        }
    }

    /// Set a log callback
    pub fn set_log_callback(&mut self, callback: LogCallback, user_data: *mut c_void) {
        self.log_callback = Some(callback);
        self.user_data = user_data;
    }

    /// Clear the log callback
    pub fn clear_log_callback(&mut self) {
        self.log_callback = None;
        self.user_data = std::ptr::null_mut();
    }

    /// Log a message (internal helper)
    pub(crate) fn log(&self, level: LogLevel, message: &str) {
        if let Some(callback) = self.log_callback {
            if let Ok(c_string) = std::ffi::CString::new(message) {
                callback(level, c_string.as_ptr(), self.user_data);
            }
        }
    }

    /// Initialize the session
    pub fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            return Err(Error::new(
                ErrorCode::InvalidState,
                "Session already initialized",
            ));
        }
        self.log(
            LogLevel::Info,
            &format!("Initializing session '{}'", self.id),
        );
        self.initialized = true;
        self.log(LogLevel::Info, "Session initialized successfully");
        Ok(())
    }

    /// Check if the session is initialized
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Inject credentials for the account
    pub fn set_auth(&mut self, auth: Auth) {
        self.log(
            LogLevel::Debug,
            &format!("Credentials set for realm '{}'", auth.realm),
        );
        self.auth = Some(auth);
    }

    /// Get the injected credentials, if any
    pub fn auth(&self) -> Option<&Auth> {
        self.auth.as_ref()
    }

    /// Replace the realm-emoji map with fresh server state
    pub fn set_realm_emoji(&mut self, realm_emoji: RealmEmojiMap) {
        self.log(
            LogLevel::Debug,
            &format!("Realm emoji state updated ({} entries)", realm_emoji.len()),
        );
        self.realm_emoji = realm_emoji;
    }

    /// Get the current realm-emoji map
    pub fn realm_emoji(&self) -> &RealmEmojiMap {
        &self.realm_emoji
    }

    /// Set a configuration value
    pub fn set_config(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.config.insert(key.into(), value.into());
    }

    /// Get a configuration value
    pub fn get_config(&self, key: &str) -> Option<&String> {
        self.config.get(key)
    }

    /// Shutdown the session
    pub fn shutdown(&mut self) -> Result<()> {
        if !self.initialized {
            return Err(Error::new(
                ErrorCode::InvalidState,
                "Session not initialized",
            ));
        }
        self.log(LogLevel::Info, "Shutting down session");
        self.initialized = false;
        self.auth = None;
        self.realm_emoji.clear();
        self.config.clear();
        self.log(LogLevel::Info, "Session shutdown complete");
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // Ensure cleanup happens even if shutdown wasn't called
        if self.initialized {
            let _ = self.shutdown();
        }
    }
}
