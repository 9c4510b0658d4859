//! Upload dialog with per-file browser timers
//!
//! Each accepted file gets its own `setInterval` that ticks it through the
//! simulator until it settles. Timer callbacks reach the shared file set
//! through a weak reference, so dropping the dialog frees everything.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use dashboard_core::upload::SelectionReport;
use dashboard_core::{
    DashboardConfig, SelectedFile, SimulatedTransport, TickOutcome, UploadConfig, UploadEntry,
    UploadQueue,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// A running `setInterval` and the closure it calls
struct Interval {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

struct DialogState {
    queue: UploadQueue,
    transport: SimulatedTransport,
    timers: HashMap<String, Interval>,
    /// Stopped timers whose closure may still be on the stack
    retired: Vec<Interval>,
    is_dragging: bool,
    on_change: Option<js_sys::Function>,
}

impl DialogState {
    fn stop_timer(&mut self, id: &str) {
        if let Some(timer) = self.timers.remove(id) {
            clear_interval(timer.handle);
            self.retired.push(timer);
        }
    }

    /// Closures are retired rather than dropped: this can run from inside
    /// the change callback, while one of them is executing.
    fn stop_all(&mut self) {
        for (_, timer) in self.timers.drain() {
            clear_interval(timer.handle);
            self.retired.push(timer);
        }
    }
}

impl Drop for DialogState {
    fn drop(&mut self) {
        self.stop_all();
    }
}

fn clear_interval(handle: i32) {
    if let Some(window) = web_sys::window() {
        window.clear_interval_with_handle(handle);
    }
}

/// Advance one file; stops its timer once it settles and notifies JS
fn tick_file(state: &Rc<RefCell<DialogState>>, id: &str) -> TickOutcome {
    let (outcome, on_change) = {
        let mut guard = state.borrow_mut();
        let dialog = &mut *guard;
        // Safe to free now: none of these is the closure currently running
        dialog.retired.clear();

        let outcome = dialog.queue.tick(id, &mut dialog.transport);
        if outcome.is_finished() {
            dialog.stop_timer(id);
        }
        (outcome, dialog.on_change.clone())
    };

    // Outside the borrow so the callback can read the file list back
    if let Some(callback) = on_change {
        if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(id)) {
            crate::log(&format!(
                "Upload change callback failed: {}",
                crate::storage::describe(&err)
            ));
        }
    }
    outcome
}

#[wasm_bindgen]
pub struct UploadDialog {
    state: Rc<RefCell<DialogState>>,
}

impl UploadDialog {
    fn with_transport(config: UploadConfig, transport: SimulatedTransport) -> Self {
        Self {
            state: Rc::new(RefCell::new(DialogState {
                queue: UploadQueue::new(config),
                transport,
                timers: HashMap::new(),
                retired: Vec::new(),
                is_dragging: false,
                on_change: None,
            })),
        }
    }

    fn from_config(config: UploadConfig) -> Result<Self, String> {
        let transport = SimulatedTransport::from_entropy(&config).map_err(|e| e.to_string())?;
        Ok(Self::with_transport(config, transport))
    }

    /// Add files to the set without starting timers (testable without JsValue)
    fn select_internal(&self, files: Vec<SelectedFile>) -> SelectionReport {
        self.state.borrow_mut().queue.add_files(files)
    }

    fn tick_internal(&self, id: &str) -> TickOutcome {
        let mut guard = self.state.borrow_mut();
        let dialog = &mut *guard;
        dialog.queue.tick(id, &mut dialog.transport)
    }

    fn entries_internal(&self) -> Vec<UploadEntry> {
        self.state.borrow().queue.entries()
    }

    fn start_timer(&self, id: &str) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let interval_ms = self.state.borrow().queue.config().tick_interval_ms;

        let weak: Weak<RefCell<DialogState>> = Rc::downgrade(&self.state);
        let file_id = id.to_string();
        let callback = Closure::wrap(Box::new(move || {
            if let Some(state) = weak.upgrade() {
                tick_file(&state, &file_id);
            }
        }) as Box<dyn FnMut()>);

        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            i32::try_from(interval_ms).unwrap_or(i32::MAX),
        )?;

        self.state.borrow_mut().timers.insert(
            id.to_string(),
            Interval {
                handle,
                _callback: callback,
            },
        );
        Ok(())
    }

    fn add_selected(&self, files: Vec<SelectedFile>) -> Result<JsValue, JsValue> {
        let report = self.select_internal(files);
        for rejected in &report.rejected {
            crate::log(&format!("Rejected {}: {}", rejected.name, rejected.reason));
        }
        for (started, id) in report.accepted.iter().enumerate() {
            if let Err(err) = self.start_timer(id) {
                // Roll back the whole batch so no file is left without a timer
                let mut dialog = self.state.borrow_mut();
                for id in &report.accepted[..started] {
                    dialog.stop_timer(id);
                }
                for id in &report.accepted {
                    dialog.queue.remove(id);
                }
                crate::log(&format!(
                    "Could not start upload timers: {}",
                    crate::storage::describe(&err)
                ));
                return Err(err);
            }
        }
        crate::to_js(&report)
    }
}

#[wasm_bindgen]
impl UploadDialog {
    /// Dialog with the default upload settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<UploadDialog, JsValue> {
        Self::from_config(UploadConfig::default()).map_err(|e| JsValue::from_str(&e))
    }

    /// Dialog using the `upload` section of a dashboard config document
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<UploadDialog, JsValue> {
        let config =
            DashboardConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::from_config(config.upload).map_err(|e| JsValue::from_str(&e))
    }

    /// Called with the file id after every tick
    #[wasm_bindgen(js_name = setChangeCallback)]
    pub fn set_change_callback(&self, callback: js_sys::Function) {
        self.state.borrow_mut().on_change = Some(callback);
    }

    /// Value for the picker's `accept` attribute
    #[wasm_bindgen(getter, js_name = acceptAttribute)]
    pub fn accept_attribute(&self) -> String {
        self.state.borrow().queue.config().accept_attribute()
    }

    /// Add picked files. Returns `{ accepted: [ids], rejected: [{name, reason}] }`.
    #[wasm_bindgen(js_name = addFiles)]
    pub fn add_files(&self, files: web_sys::FileList) -> Result<JsValue, JsValue> {
        let selected = (0..files.length())
            .filter_map(|i| files.get(i))
            .map(|file| SelectedFile::new(file.name(), file.size().max(0.0) as u64))
            .collect();
        self.add_selected(selected)
    }

    /// Add files dropped onto the drop zone; also ends the drag state
    #[wasm_bindgen(js_name = handleDrop)]
    pub fn handle_drop(&self, event: web_sys::DragEvent) -> Result<JsValue, JsValue> {
        event.prevent_default();
        self.set_dragging(false);

        match event.data_transfer().and_then(|dt| dt.files()) {
            Some(files) => self.add_files(files),
            None => crate::to_js(&SelectionReport::default()),
        }
    }

    /// Add a single file by name and size, for callers without a `FileList`
    #[wasm_bindgen(js_name = addFile)]
    pub fn add_file(&self, name: &str, size: f64) -> Result<JsValue, JsValue> {
        self.add_selected(vec![SelectedFile::new(name, size.max(0.0) as u64)])
    }

    /// Drag-over sets, drag-leave clears
    #[wasm_bindgen(js_name = setDragging)]
    pub fn set_dragging(&self, dragging: bool) {
        self.state.borrow_mut().is_dragging = dragging;
    }

    #[wasm_bindgen(getter, js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.state.borrow().is_dragging
    }

    /// Files with progress, status label and size label
    #[wasm_bindgen(js_name = getFiles)]
    pub fn get_files(&self) -> Result<JsValue, JsValue> {
        crate::to_js(&self.entries_internal())
    }

    /// "Process files" is only offered once something was selected
    #[wasm_bindgen(getter, js_name = canProcess)]
    pub fn can_process(&self) -> bool {
        !self.state.borrow().queue.is_empty()
    }

    /// Stop every timer and forget all files
    pub fn close(&self) {
        let mut dialog = self.state.borrow_mut();
        dialog.stop_all();
        dialog.queue.reset();
        dialog.is_dragging = false;
    }

    /// Log the file set, then close. Nothing is sent anywhere.
    pub fn process(&self) -> bool {
        let files = {
            let mut dialog = self.state.borrow_mut();
            if dialog.queue.is_empty() {
                return false;
            }
            dialog.stop_all();
            dialog.queue.take_for_processing()
        };

        for file in &files {
            crate::log(&format!(
                "Processing {} ({}): {}",
                file.name,
                dashboard_core::format_file_size(file.size),
                file.status.as_str()
            ));
        }
        self.close();
        true
    }
}


// Timers need a browser window, so these only run under wasm-bindgen-test
#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use contract_types::UploadStatus;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn dialog() -> UploadDialog {
        let config = UploadConfig {
            success_rate: 1.0,
            ..UploadConfig::default()
        };
        let transport = SimulatedTransport::seeded(&config, 5).unwrap();
        UploadDialog::with_transport(config, transport)
    }

    fn timer_count(dialog: &UploadDialog) -> usize {
        dialog.state.borrow().timers.len()
    }

    #[wasm_bindgen_test]
    fn test_settled_file_stops_its_timer() {
        let dialog = dialog();
        dialog.add_file("a.pdf", 10.0).unwrap();
        let id = dialog.state.borrow().queue.files()[0].id.clone();
        assert_eq!(timer_count(&dialog), 1);

        let mut outcome = TickOutcome::Idle;
        for _ in 0..1_000 {
            outcome = tick_file(&dialog.state, &id);
            if outcome.is_finished() {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::Completed(UploadStatus::Success));
        assert_eq!(timer_count(&dialog), 0);

        // The next tick frees the retired closure
        assert_eq!(tick_file(&dialog.state, &id), TickOutcome::Idle);
        assert!(dialog.state.borrow().retired.is_empty());
    }

    #[wasm_bindgen_test]
    fn test_close_discards_running_timers() {
        let dialog = dialog();
        dialog.add_file("a.pdf", 10.0).unwrap();
        dialog.add_file("b.docx", 20.0).unwrap();
        assert_eq!(timer_count(&dialog), 2);

        dialog.close();
        assert_eq!(timer_count(&dialog), 0);
        assert!(dialog.state.borrow().queue.is_empty());
        assert!(!dialog.can_process());
    }

    #[wasm_bindgen_test]
    fn test_rejected_file_gets_no_timer() {
        let dialog = dialog();
        dialog.add_file("notes.txt", 10.0).unwrap();
        assert_eq!(timer_count(&dialog), 0);
        assert!(!dialog.can_process());
    }
}
