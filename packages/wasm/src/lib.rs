use pagesmith_editor::{palette, Command, Editor, EditorError, ElementKind};
use pagesmith_model::{DocumentSnapshot, SequentialIds};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// One editing session, driven from JavaScript with JSON strings
#[wasm_bindgen]
pub struct EditorHandle {
    editor: Editor,
}

#[wasm_bindgen]
impl EditorHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> EditorHandle {
        EditorHandle {
            editor: Editor::new(),
        }
    }

    /// Session with reproducible ids seeded from the document name
    #[wasm_bindgen(js_name = withSequentialIds)]
    pub fn with_sequential_ids(document_name: &str) -> EditorHandle {
        EditorHandle {
            editor: Editor::with_id_source(Box::new(SequentialIds::new(document_name))),
        }
    }

    /// Load a stored document (element array or `{ elements }` body)
    #[wasm_bindgen(js_name = loadDocument)]
    pub fn load_document(&mut self, json: &str) -> Result<u64, JsValue> {
        self.load_json(json).map_err(to_js)
    }

    /// Apply a `{ type, payload }` command and return the new state.
    /// Structural edits are refused while preview or live mode is on.
    pub fn dispatch(&mut self, command_json: &str) -> Result<String, JsValue> {
        self.dispatch_json(command_json).map_err(to_js)
    }

    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<String, JsValue> {
        self.state_json().map_err(to_js)
    }

    /// `{ "elements": [...] }` for the storage API
    #[wasm_bindgen(js_name = saveBody)]
    pub fn save_body(&self) -> Result<String, JsValue> {
        self.save_body_json().map_err(to_js)
    }

    #[wasm_bindgen(js_name = markSaved)]
    pub fn mark_saved(&mut self) {
        self.editor.mark_saved();
    }

    #[wasm_bindgen(js_name = isDirty)]
    pub fn is_dirty(&self) -> bool {
        self.editor.is_dirty()
    }

    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    /// Default palette template for a type tag, as JSON
    pub fn template(kind: &str) -> Result<String, JsValue> {
        template_json(kind).map_err(|e| JsValue::from_str(&e))
    }
}

impl Default for EditorHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorHandle {
    fn load_json(&mut self, json: &str) -> Result<u64, EditorError> {
        let snapshot = DocumentSnapshot::from_json(json)?;
        self.editor.load_document(snapshot)
    }

    fn dispatch_json(&mut self, command_json: &str) -> Result<String, EditorError> {
        let command: Command = serde_json::from_str(command_json)?;
        self.editor.guarded_dispatch(command)?;
        self.state_json()
    }

    fn state_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string(self.editor.state())?)
    }

    fn save_body_json(&self) -> Result<String, EditorError> {
        let body = self.editor.snapshot()?.to_save_body()?;
        Ok(serde_json::to_string(&body)?)
    }
}

fn template_json(kind: &str) -> Result<String, String> {
    let kind: ElementKind = kind.parse().map_err(|e| format!("{}", e))?;
    let template = palette::template(kind).ok_or_else(|| format!("No template for {}", kind))?;
    serde_json::to_string(&template).map_err(|e| format!("Serialization error: {}", e))
}

fn to_js(err: EditorError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
