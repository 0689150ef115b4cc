//! Note saving placeholder

use super::Tool;

pub struct SaveNoteTool;

impl Tool for SaveNoteTool {
    fn name(&self) -> &'static str {
        "save_note"
    }

    fn description(&self) -> &'static str {
        "Save a note for later, written as 'title | content'."
    }

    // Nothing is persisted; the full input is echoed back
    fn run(&self, input: &str) -> String {
        format!("MOCK SAVE: Note '{}' saved successfully", input.trim())
    }
}
