use std::ffi::CString;
use std::os::raw::{c_char, c_void};

// Core modules
pub mod api;
pub mod emoji;
pub mod error;
pub mod media;
pub mod runtime;
pub mod session;
pub mod types;

// Re-exports for convenience
pub use api::{ApiClient, USER_AGENT};
pub use emoji::{filter_emoji_list, EmojiPicker, Navigator, ReactionSink};
pub use error::{Error, ErrorCode, Result};
pub use media::{
    DownloadManagerGateway, ImageDownloader, PermissionStatus, PhotoLibrary, PhotoLibraryGateway,
    StorageGateway, StoragePermission,
};
pub use session::{LogCallback, LogLevel, Session};
pub use types::{Auth, DownloadJob, RealmEmoji, RealmEmojiMap, ReactionRequest, ReactionType, SaveOutcome};

// Library version information
pub const VERSION_MAJOR: u32 = 0;
pub const VERSION_MINOR: u32 = 1;
pub const VERSION_PATCH: u32 = 0;
pub const VERSION_STRING: &str = concat!(env!("CARGO_PKG_VERSION"), " (libchatcore)");

/// FFI function: Free a string allocated by this library
#[no_mangle]
pub extern "C" fn chatcore_free_string(s: *mut c_char) {
    if !s.is_null() {
        unsafe {
            let _ = CString::from_raw(s);
        }
    }
}

// ============================================================================
// Library Initialization Pattern
// ============================================================================

/// FFI function: Initialize the library
/// This should be called once before using any other library functions
/// Returns ErrorCode indicating success or failure
#[no_mangle]
pub extern "C" fn chatcore_init() -> ErrorCode {
    error::clear_last_error();

    // Initialize the async runtime
    match runtime::init_runtime() {
        Ok(()) => ErrorCode::Success,
        Err(e) => {
            let code = e.code;
            error::set_last_error(e);
            code
        }
    }
}

/// FFI function: Cleanup the library
/// This should be called once when done using the library
/// Frees any global resources allocated by the library
#[no_mangle]
pub extern "C" fn chatcore_cleanup() {
    error::clear_last_error();

    // Shutdown the async runtime
    runtime::shutdown_runtime();
}

// ============================================================================
// Version Information
// ============================================================================

/// FFI function: Get the library version string
/// Returns a static string, do NOT free this pointer
#[no_mangle]
pub extern "C" fn chatcore_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), " (libchatcore)\0").as_ptr() as *const c_char
}

/// FFI function: Get the major version number
#[no_mangle]
pub extern "C" fn chatcore_version_major() -> u32 {
    VERSION_MAJOR
}

/// FFI function: Get the minor version number
#[no_mangle]
pub extern "C" fn chatcore_version_minor() -> u32 {
    VERSION_MINOR
}

/// FFI function: Get the patch version number
#[no_mangle]
pub extern "C" fn chatcore_version_patch() -> u32 {
    VERSION_PATCH
}

// ============================================================================
// Error Handling FFI
// ============================================================================

/// FFI function: Get the error code of the last error
/// Returns ErrorCode::Success (0) if no error has occurred
#[no_mangle]
pub extern "C" fn chatcore_last_error_code() -> ErrorCode {
    error::get_last_error()
        .map(|e| e.code)
        .unwrap_or(ErrorCode::Success)
}

/// FFI function: Get the error message of the last error
/// Returns a dynamically allocated string that must be freed with chatcore_free_string()
/// Returns NULL if no error has occurred
#[no_mangle]
pub extern "C" fn chatcore_last_error_message() -> *mut c_char {
    let error = match error::get_last_error() {
        Some(e) => e,
        None => return std::ptr::null_mut(),
    };

    match CString::new(error.message) {
        Ok(c_string) => c_string.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// FFI function: Get a human-readable description of an error code
/// Returns a static string, do NOT free this pointer
#[no_mangle]
pub extern "C" fn chatcore_error_code_string(code: ErrorCode) -> *const c_char {
    let s = match code {
        ErrorCode::Success => "Success\0",
        ErrorCode::Unknown => "Unknown error\0",
        ErrorCode::InvalidArgument => "Invalid argument\0",
        ErrorCode::NullPointer => "Null pointer\0",
        ErrorCode::OutOfMemory => "Out of memory\0",
        ErrorCode::InvalidUtf8 => "Invalid UTF-8 string\0",
        ErrorCode::NetworkError => "Network error\0",
        ErrorCode::AuthenticationFailed => "Authentication failed\0",
        ErrorCode::NotFound => "Not found\0",
        ErrorCode::PermissionDenied => "Permission denied\0",
        ErrorCode::Timeout => "Timeout\0",
        ErrorCode::InvalidState => "Invalid state\0",
    };
    s.as_ptr() as *const c_char
}

/// FFI function: Clear the last error
#[no_mangle]
pub extern "C" fn chatcore_clear_error() {
    error::clear_last_error();
}

// ============================================================================
// Opaque Handle Pattern - Session Management
// ============================================================================

/// Opaque handle to a Session object
/// This is a pointer to a Rust-managed object
pub type SessionHandle = *mut Session;

/// FFI function: Create a new session
/// Returns an opaque handle to the session
/// The handle must be freed with chatcore_session_destroy()
/// Returns NULL on error
#[no_mangle]
pub extern "C" fn chatcore_session_create(id: *const c_char) -> SessionHandle {
    error::clear_last_error();

    if id.is_null() {
        error::set_last_error(Error::null_pointer());
        return std::ptr::null_mut();
    }

    let id_str = unsafe {
        match std::ffi::CStr::from_ptr(id).to_str() {
            Ok(s) => s,
            Err(_) => {
                error::set_last_error(Error::invalid_utf8());
                return std::ptr::null_mut();
            }
        }
    };

    let session = Box::new(Session::new(id_str));
    Box::into_raw(session)
}

/// FFI function: Initialize a session
/// Returns ErrorCode indicating success or failure
#[no_mangle]
pub extern "C" fn chatcore_session_initialize(handle: SessionHandle) -> ErrorCode {
    error::clear_last_error();

    if handle.is_null() {
        error::set_last_error(Error::null_pointer());
        return ErrorCode::NullPointer;
    }

    let session = unsafe { &mut *handle };

    match session.initialize() {
        Ok(()) => ErrorCode::Success,
        Err(e) => {
            let code = e.code;
            error::set_last_error(e);
            code
        }
    }
}

/// FFI function: Check if a session is initialized
/// Returns 1 if initialized, 0 if not, -1 on error
#[no_mangle]
pub extern "C" fn chatcore_session_is_initialized(handle: SessionHandle) -> i32 {
    error::clear_last_error();

    if handle.is_null() {
        error::set_last_error(Error::null_pointer());
        return -1;
    }

    let session = unsafe { &*handle };
    if session.is_initialized() { 1 } else { 0 }
}

/// FFI function: Set the account credentials on a session
/// auth_json: JSON string with format:
/// {
///   "realm": "https://chat.example.com",
///   "email": "user@example.com",
///   "api_key": "xxx"
/// }
/// Returns ErrorCode indicating success or failure
#[no_mangle]
pub extern "C" fn chatcore_session_set_auth(
    handle: SessionHandle,
    auth_json: *const c_char,
) -> ErrorCode {
    error::clear_last_error();

    if handle.is_null() || auth_json.is_null() {
        error::set_last_error(Error::null_pointer());
        return ErrorCode::NullPointer;
    }

    let auth_str = unsafe {
        match std::ffi::CStr::from_ptr(auth_json).to_str() {
            Ok(s) => s,
            Err(_) => {
                error::set_last_error(Error::invalid_utf8());
                return ErrorCode::InvalidUtf8;
            }
        }
    };

    let auth: Auth = match serde_json::from_str(auth_str) {
        Ok(a) => a,
        Err(e) => {
            error::set_last_error(Error::new(
                ErrorCode::InvalidArgument,
                format!("Invalid auth JSON: {e}"),
            ));
            return ErrorCode::InvalidArgument;
        }
    };

    let session = unsafe { &mut *handle };
    session.set_auth(auth);
    ErrorCode::Success
}

/// FFI function: Replace the realm-emoji state on a session
/// emoji_json: JSON object keyed by emoji name, e.g.
/// {
///   "company_logo": { "id": 42, "name": "company_logo" },
///   "old_logo": { "id": 7, "name": "old_logo", "deactivated": true }
/// }
/// Returns ErrorCode indicating success or failure
#[no_mangle]
pub extern "C" fn chatcore_session_load_realm_emoji(
    handle: SessionHandle,
    emoji_json: *const c_char,
) -> ErrorCode {
    error::clear_last_error();

    if handle.is_null() || emoji_json.is_null() {
        error::set_last_error(Error::null_pointer());
        return ErrorCode::NullPointer;
    }

    let emoji_str = unsafe {
        match std::ffi::CStr::from_ptr(emoji_json).to_str() {
            Ok(s) => s,
            Err(_) => {
                error::set_last_error(Error::invalid_utf8());
                return ErrorCode::InvalidUtf8;
            }
        }
    };

    let realm_emoji: RealmEmojiMap = match serde_json::from_str(emoji_str) {
        Ok(m) => m,
        Err(e) => {
            error::set_last_error(Error::new(
                ErrorCode::InvalidArgument,
                format!("Invalid realm-emoji JSON: {e}"),
            ));
            return ErrorCode::InvalidArgument;
        }
    };

    let session = unsafe { &mut *handle };
    session.set_realm_emoji(realm_emoji);
    ErrorCode::Success
}

/// FFI function: Set a configuration value on a session
/// Returns ErrorCode indicating success or failure
#[no_mangle]
pub extern "C" fn chatcore_session_set_config(
    handle: SessionHandle,
    key: *const c_char,
    value: *const c_char,
) -> ErrorCode {
    error::clear_last_error();

    if handle.is_null() || key.is_null() || value.is_null() {
        error::set_last_error(Error::null_pointer());
        return ErrorCode::NullPointer;
    }

    let key_str = unsafe {
        match std::ffi::CStr::from_ptr(key).to_str() {
            Ok(s) => s,
            Err(_) => {
                error::set_last_error(Error::invalid_utf8());
                return ErrorCode::InvalidUtf8;
            }
        }
    };

    let value_str = unsafe {
        match std::ffi::CStr::from_ptr(value).to_str() {
            Ok(s) => s,
            Err(_) => {
                error::set_last_error(Error::invalid_utf8());
                return ErrorCode::InvalidUtf8;
            }
        }
    };

    let session = unsafe { &mut *handle };
    session.set_config(key_str, value_str);
    ErrorCode::Success
}

/// FFI function: Get a configuration value from a session
/// Returns a dynamically allocated string that must be freed with chatcore_free_string()
/// Returns NULL if the key doesn't exist or on error
#[no_mangle]
pub extern "C" fn chatcore_session_get_config(
    handle: SessionHandle,
    key: *const c_char,
) -> *mut c_char {
    error::clear_last_error();

    if handle.is_null() || key.is_null() {
        error::set_last_error(Error::null_pointer());
        return std::ptr::null_mut();
    }

    let key_str = unsafe {
        match std::ffi::CStr::from_ptr(key).to_str() {
            Ok(s) => s,
            Err(_) => {
                error::set_last_error(Error::invalid_utf8());
                return std::ptr::null_mut();
            }
        }
    };

    let session = unsafe { &*handle };

    match session.get_config(key_str) {
        Some(value) => match CString::new(value.as_str()) {
            Ok(c_string) => c_string.into_raw(),
            Err(_) => {
                error::set_last_error(Error::new(
                    ErrorCode::OutOfMemory,
                    "Failed to allocate string",
                ));
                std::ptr::null_mut()
            }
        },
        None => {
            error::set_last_error(Error::new(ErrorCode::NotFound, "Key not found"));
            std::ptr::null_mut()
        }
    }
}

/// FFI function: Set a log callback on a session
/// The callback will be called for logging events
/// user_data is an opaque pointer passed back to the callback
#[no_mangle]
pub extern "C" fn chatcore_session_set_log_callback(
    handle: SessionHandle,
    callback: LogCallback,
    user_data: *mut c_void,
) -> ErrorCode {
    error::clear_last_error();

    if handle.is_null() {
        error::set_last_error(Error::null_pointer());
        return ErrorCode::NullPointer;
    }

    let session = unsafe { &mut *handle };
    session.set_log_callback(callback, user_data);
    ErrorCode::Success
}

/// FFI function: Clear the log callback on a session
#[no_mangle]
pub extern "C" fn chatcore_session_clear_log_callback(handle: SessionHandle) -> ErrorCode {
    error::clear_last_error();

    if handle.is_null() {
        error::set_last_error(Error::null_pointer());
        return ErrorCode::NullPointer;
    }

    let session = unsafe { &mut *handle };
    session.clear_log_callback();
    ErrorCode::Success
}

/// FFI function: Shutdown a session
/// Returns ErrorCode indicating success or failure
#[no_mangle]
pub extern "C" fn chatcore_session_shutdown(handle: SessionHandle) -> ErrorCode {
    error::clear_last_error();

    if handle.is_null() {
        error::set_last_error(Error::null_pointer());
        return ErrorCode::NullPointer;
    }

    let session = unsafe { &mut *handle };

    match session.shutdown() {
        Ok(()) => ErrorCode::Success,
        Err(e) => {
            let code = e.code;
            error::set_last_error(e);
            code
        }
    }
}

/// FFI function: Destroy a session and free its memory
/// After calling this, the handle is invalid and must not be used
#[no_mangle]
pub extern "C" fn chatcore_session_destroy(handle: SessionHandle) {
    if !handle.is_null() {
        unsafe {
            let _ = Box::from_raw(handle);
        }
    }
}

// ============================================================================
// Callback Pattern - Host Capabilities
// ============================================================================

/// Callback function type for the navigate-back signal
/// Parameters: user_data
pub type NavigateBackCallback = extern "C" fn(*mut c_void);

/// Callback function type for saving a URL into the photo library
/// Parameters: url, user_data
/// Returns 0 on success, nonzero on failure
pub type SaveToLibraryCallback = extern "C" fn(*const c_char, *mut c_void) -> i32;

/// Callback function type for checking storage-write permission
/// Parameters: user_data
/// Returns 1 if granted, 0 if not
pub type PermissionCheckCallback = extern "C" fn(*mut c_void) -> i32;

/// Callback function type for prompting the user for storage-write permission
/// Parameters: user_data
/// Returns 0 = granted, 1 = denied, 2 = denied permanently
pub type PermissionRequestCallback = extern "C" fn(*mut c_void) -> i32;

/// Opaque user-data pointer handed back to host callbacks
///
/// The host guarantees the pointer stays valid for the lifetime of the
/// handle it was registered on; calls may happen from runtime threads.
struct HostData(*mut c_void);

unsafe impl Send for HostData {}
unsafe impl Sync for HostData {}

/// Navigator backed by a host callback
struct CallbackNavigator {
    callback: Option<NavigateBackCallback>,
    user_data: HostData,
}

impl Navigator for CallbackNavigator {
    fn navigate_back(&self) {
        if let Some(callback) = self.callback {
            callback(self.user_data.0);
        }
    }
}

/// Photo-library capability backed by a host callback
struct CallbackPhotoLibrary {
    callback: SaveToLibraryCallback,
    user_data: HostData,
}

#[async_trait::async_trait]
impl PhotoLibrary for CallbackPhotoLibrary {
    async fn save(&self, url: &str) -> Result<String> {
        let c_url = CString::new(url)
            .map_err(|_| Error::invalid_argument("URL contains interior NUL byte"))?;

        let status = (self.callback)(c_url.as_ptr(), self.user_data.0);
        if status == 0 {
            // The host reports only success or failure; echo the URL back
            // as the asset reference.
            Ok(url.to_string())
        } else {
            Err(Error::new(
                ErrorCode::Unknown,
                format!("Photo library save failed with status {status}"),
            ))
        }
    }
}

/// Storage-permission capability backed by host callbacks
struct CallbackStoragePermission {
    check_callback: PermissionCheckCallback,
    request_callback: PermissionRequestCallback,
    user_data: HostData,
}

#[async_trait::async_trait]
impl StoragePermission for CallbackStoragePermission {
    async fn check(&self) -> Result<bool> {
        Ok((self.check_callback)(self.user_data.0) == 1)
    }

    async fn request(&self) -> Result<PermissionStatus> {
        match (self.request_callback)(self.user_data.0) {
            0 => Ok(PermissionStatus::Granted),
            2 => Ok(PermissionStatus::DeniedPermanently),
            _ => Ok(PermissionStatus::Denied),
        }
    }
}

// ============================================================================
// Emoji Picker FFI - Opaque Handle Pattern
// ============================================================================

/// An emoji picker bound to a snapshot of session state
///
/// The realm-emoji map and credentials are captured when the picker is
/// created; the session may move on independently while the screen is up.
pub struct PickerSession {
    picker: EmojiPicker,
    realm_emoji: RealmEmojiMap,
    client: ApiClient,
    navigate_callback: Option<NavigateBackCallback>,
    nav_user_data: HostData,
}

/// Opaque handle to a PickerSession object
pub type PickerHandle = *mut PickerSession;

/// FFI function: Create an emoji picker for a message
/// The session must have credentials set; its realm-emoji state is
/// snapshotted into the picker.
/// The handle must be freed with chatcore_picker_destroy()
/// Returns NULL on error
#[no_mangle]
pub extern "C" fn chatcore_picker_create(
    session: SessionHandle,
    message_id: i64,
) -> PickerHandle {
    error::clear_last_error();

    if session.is_null() {
        error::set_last_error(Error::null_pointer());
        return std::ptr::null_mut();
    }

    let session = unsafe { &*session };

    let auth = match session.auth() {
        Some(a) => a.clone(),
        None => {
            error::set_last_error(Error::new(
                ErrorCode::InvalidState,
                "No credentials set on session",
            ));
            return std::ptr::null_mut();
        }
    };

    let client = match ApiClient::new(auth) {
        Ok(c) => c,
        Err(e) => {
            error::set_last_error(e);
            return std::ptr::null_mut();
        }
    };

    session.log(
        LogLevel::Debug,
        &format!("Creating emoji picker for message {message_id}"),
    );

    let picker = Box::new(PickerSession {
        picker: EmojiPicker::new(message_id),
        realm_emoji: session.realm_emoji().clone(),
        client,
        navigate_callback: None,
        nav_user_data: HostData(std::ptr::null_mut()),
    });
    Box::into_raw(picker)
}

/// FFI function: Set the navigate-back callback on a picker
/// The callback fires once per selection, after the reaction is submitted
#[no_mangle]
pub extern "C" fn chatcore_picker_set_navigate_callback(
    handle: PickerHandle,
    callback: NavigateBackCallback,
    user_data: *mut c_void,
) -> ErrorCode {
    error::clear_last_error();

    if handle.is_null() {
        error::set_last_error(Error::null_pointer());
        return ErrorCode::NullPointer;
    }

    let picker = unsafe { &mut *handle };
    picker.navigate_callback = Some(callback);
    picker.nav_user_data = HostData(user_data);
    ErrorCode::Success
}

/// FFI function: Update the picker's filter from user text input
/// Returns ErrorCode indicating success or failure
#[no_mangle]
pub extern "C" fn chatcore_picker_set_filter(
    handle: PickerHandle,
    text: *const c_char,
) -> ErrorCode {
    error::clear_last_error();

    if handle.is_null() || text.is_null() {
        error::set_last_error(Error::null_pointer());
        return ErrorCode::NullPointer;
    }

    let text_str = unsafe {
        match std::ffi::CStr::from_ptr(text).to_str() {
            Ok(s) => s,
            Err(_) => {
                error::set_last_error(Error::invalid_utf8());
                return ErrorCode::InvalidUtf8;
            }
        }
    };

    let picker = unsafe { &mut *handle };
    picker.picker.set_filter(text_str);
    ErrorCode::Success
}

/// FFI function: Get the currently visible emoji names
/// Returns a JSON array string of names matching the current filter
/// The caller must free the returned string using chatcore_free_string()
/// Returns NULL on error
#[no_mangle]
pub extern "C" fn chatcore_picker_visible_emoji(handle: PickerHandle) -> *mut c_char {
    error::clear_last_error();

    if handle.is_null() {
        error::set_last_error(Error::null_pointer());
        return std::ptr::null_mut();
    }

    let picker = unsafe { &*handle };
    let names = picker.picker.visible_emoji(&picker.realm_emoji);

    match serde_json::to_string(&names) {
        Ok(json) => match CString::new(json) {
            Ok(c_string) => c_string.into_raw(),
            Err(_) => {
                error::set_last_error(Error::new(
                    ErrorCode::OutOfMemory,
                    "Failed to allocate string",
                ));
                std::ptr::null_mut()
            }
        },
        Err(e) => {
            error::set_last_error(Error::new(
                ErrorCode::Unknown,
                format!("Failed to serialize emoji list: {e}"),
            ));
            std::ptr::null_mut()
        }
    }
}

/// FFI function: Select an emoji by name
/// Submits the reaction (fire-and-forget) and fires the navigate-back
/// callback exactly once, regardless of how the submission fared.
/// Returns ErrorCode indicating success or failure
#[no_mangle]
pub extern "C" fn chatcore_picker_select(
    handle: PickerHandle,
    name: *const c_char,
) -> ErrorCode {
    error::clear_last_error();

    if handle.is_null() || name.is_null() {
        error::set_last_error(Error::null_pointer());
        return ErrorCode::NullPointer;
    }

    let name_str = unsafe {
        match std::ffi::CStr::from_ptr(name).to_str() {
            Ok(s) => s,
            Err(_) => {
                error::set_last_error(Error::invalid_utf8());
                return ErrorCode::InvalidUtf8;
            }
        }
    };

    let picker = unsafe { &*handle };
    let navigator = CallbackNavigator {
        callback: picker.navigate_callback,
        user_data: HostData(picker.nav_user_data.0),
    };

    match runtime::block_on(picker.picker.select_emoji(
        name_str,
        &picker.realm_emoji,
        &picker.client,
        &navigator,
    )) {
        Ok(()) => ErrorCode::Success,
        Err(e) => {
            let code = e.code;
            error::set_last_error(e);
            code
        }
    }
}

/// FFI function: Destroy a picker and free its memory
/// After calling this, the handle is invalid and must not be used
#[no_mangle]
pub extern "C" fn chatcore_picker_destroy(handle: PickerHandle) {
    if !handle.is_null() {
        unsafe {
            let _ = Box::from_raw(handle);
        }
    }
}

// ============================================================================
// Image Downloader FFI - Opaque Handle Pattern
// ============================================================================

/// A configured downloader plus the credentials it downloads with
pub struct DownloaderSession {
    downloader: ImageDownloader,
    auth: Auth,
}

/// Opaque handle to a DownloaderSession object
pub type DownloaderHandle = *mut DownloaderSession;

/// FFI function: Create a downloader backed by the platform photo library
/// save_callback is invoked with the fully resolved, api-key-authenticated
/// URL; the host performs the actual save.
/// The handle must be freed with chatcore_downloader_destroy()
/// Returns NULL on error
#[no_mangle]
pub extern "C" fn chatcore_downloader_create_photo_library(
    session: SessionHandle,
    save_callback: SaveToLibraryCallback,
    user_data: *mut c_void,
) -> DownloaderHandle {
    error::clear_last_error();

    if session.is_null() {
        error::set_last_error(Error::null_pointer());
        return std::ptr::null_mut();
    }

    let session = unsafe { &*session };

    let auth = match session.auth() {
        Some(a) => a.clone(),
        None => {
            error::set_last_error(Error::new(
                ErrorCode::InvalidState,
                "No credentials set on session",
            ));
            return std::ptr::null_mut();
        }
    };

    let library = CallbackPhotoLibrary {
        callback: save_callback,
        user_data: HostData(user_data),
    };
    let gateway = PhotoLibraryGateway::new(Box::new(library));

    let downloader = Box::new(DownloaderSession {
        downloader: ImageDownloader::new(Box::new(gateway)),
        auth,
    });
    Box::into_raw(downloader)
}

/// FFI function: Create a downloader backed by a managed download directory
/// The permission callbacks implement the platform's check/prompt pair;
/// download_dir is the absolute path of the device download directory.
/// The handle must be freed with chatcore_downloader_destroy()
/// Returns NULL on error
#[no_mangle]
pub extern "C" fn chatcore_downloader_create_download_manager(
    session: SessionHandle,
    download_dir: *const c_char,
    check_callback: PermissionCheckCallback,
    request_callback: PermissionRequestCallback,
    user_data: *mut c_void,
) -> DownloaderHandle {
    error::clear_last_error();

    if session.is_null() || download_dir.is_null() {
        error::set_last_error(Error::null_pointer());
        return std::ptr::null_mut();
    }

    let dir_str = unsafe {
        match std::ffi::CStr::from_ptr(download_dir).to_str() {
            Ok(s) => s,
            Err(_) => {
                error::set_last_error(Error::invalid_utf8());
                return std::ptr::null_mut();
            }
        }
    };

    let session = unsafe { &*session };

    let auth = match session.auth() {
        Some(a) => a.clone(),
        None => {
            error::set_last_error(Error::new(
                ErrorCode::InvalidState,
                "No credentials set on session",
            ));
            return std::ptr::null_mut();
        }
    };

    let permissions = CallbackStoragePermission {
        check_callback,
        request_callback,
        user_data: HostData(user_data),
    };

    let gateway = match DownloadManagerGateway::new(Box::new(permissions), dir_str) {
        Ok(g) => g,
        Err(e) => {
            error::set_last_error(e);
            return std::ptr::null_mut();
        }
    };

    let downloader = Box::new(DownloaderSession {
        downloader: ImageDownloader::new(Box::new(gateway)),
        auth,
    });
    Box::into_raw(downloader)
}

/// FFI function: Download an image reference to device storage
/// src may be absolute or relative to the session's realm.
/// Returns a JSON string describing the outcome (photo-library URI or
/// scheduled download job)
/// The caller must free the returned string using chatcore_free_string()
/// Returns NULL on error
#[no_mangle]
pub extern "C" fn chatcore_downloader_download(
    handle: DownloaderHandle,
    src: *const c_char,
) -> *mut c_char {
    error::clear_last_error();

    if handle.is_null() || src.is_null() {
        error::set_last_error(Error::null_pointer());
        return std::ptr::null_mut();
    }

    let src_str = unsafe {
        match std::ffi::CStr::from_ptr(src).to_str() {
            Ok(s) => s,
            Err(_) => {
                error::set_last_error(Error::invalid_utf8());
                return std::ptr::null_mut();
            }
        }
    };

    let downloader = unsafe { &*handle };

    match runtime::block_on(downloader.downloader.download(src_str, &downloader.auth)) {
        Ok(outcome) => match serde_json::to_string(&outcome) {
            Ok(json) => match CString::new(json) {
                Ok(c_string) => c_string.into_raw(),
                Err(_) => {
                    error::set_last_error(Error::new(
                        ErrorCode::OutOfMemory,
                        "Failed to allocate string",
                    ));
                    std::ptr::null_mut()
                }
            },
            Err(e) => {
                error::set_last_error(Error::new(
                    ErrorCode::Unknown,
                    format!("Failed to serialize outcome: {e}"),
                ));
                std::ptr::null_mut()
            }
        },
        Err(e) => {
            error::set_last_error(e);
            std::ptr::null_mut()
        }
    }
}

/// FFI function: Destroy a downloader and free its memory
/// After calling this, the handle is invalid and must not be used
#[no_mangle]
pub extern "C" fn chatcore_downloader_destroy(handle: DownloaderHandle) {
    if !handle.is_null() {
        unsafe {
            let _ = Box::from_raw(handle);
        }
    }
}
