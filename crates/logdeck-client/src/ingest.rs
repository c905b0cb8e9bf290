use std::path::PathBuf;

use crate::error::IngestError;

/// Which input the ingest panel is collecting
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum IngestMode {
    #[default]
    File,
    Paste,
}

impl IngestMode {
    /// Switch to the other mode
    pub fn toggle(&self) -> Self {
        match self {
            Self::File => Self::Paste,
            Self::Paste => Self::File,
        }
    }

    /// Tab label
    pub fn label(&self) -> &'static str {
        match self {
            Self::File => "Upload File",
            Self::Paste => "Paste Logs",
        }
    }
}

/// What a validated submission carries to the backend
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IngestPayload {
    File(PathBuf),
    Text(String),
}

/// Ingest input as edited by the user. Both fields are kept when the mode
/// switches; only the active one is submitted.
#[derive(Clone, Debug, Default)]
pub struct IngestForm {
    pub mode: IngestMode,
    pub file_path: String,
    pub pasted: String,
}

impl IngestForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// A form in file mode with the path filled in
    pub fn with_file(path: impl Into<String>) -> Self {
        Self {
            mode: IngestMode::File,
            file_path: path.into(),
            pasted: String::new(),
        }
    }

    /// Validate the active mode's input
    pub fn payload(&self) -> Result<IngestPayload, IngestError> {
        match self.mode {
            IngestMode::File => {
                let path = self.file_path.trim();
                if path.is_empty() {
                    Err(IngestError::MissingFile)
                } else {
                    Ok(IngestPayload::File(PathBuf::from(path)))
                }
            }
            IngestMode::Paste => {
                if self.pasted.trim().is_empty() {
                    Err(IngestError::EmptyPaste)
                } else {
                    Ok(IngestPayload::Text(self.pasted.clone()))
                }
            }
        }
    }

    /// The text buffer of the active mode
    pub fn active_input(&self) -> &str {
        match self.mode {
            IngestMode::File => &self.file_path,
            IngestMode::Paste => &self.pasted,
        }
    }

    pub fn active_input_mut(&mut self) -> &mut String {
        match self.mode {
            IngestMode::File => &mut self.file_path,
            IngestMode::Paste => &mut self.pasted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_mode_requires_path() {
        let form = IngestForm::new();
        assert_eq!(form.payload(), Err(IngestError::MissingFile));

        let form = IngestForm::with_file("  ");
        assert_eq!(form.payload(), Err(IngestError::MissingFile));

        let form = IngestForm::with_file("/var/log/app.log");
        assert_eq!(
            form.payload(),
            Ok(IngestPayload::File(PathBuf::from("/var/log/app.log")))
        );
    }

    #[test]
    fn test_paste_mode_rejects_whitespace() {
        let mut form = IngestForm::new();
        form.mode = IngestMode::Paste;
        form.pasted = " \n\t ".to_string();
        assert_eq!(form.payload(), Err(IngestError::EmptyPaste));
    }

    #[test]
    fn test_paste_mode_keeps_text_verbatim() {
        let mut form = IngestForm::new();
        form.mode = IngestMode::Paste;
        form.pasted = "  2024-01-01 INFO up\n".to_string();
        assert_eq!(
            form.payload(),
            Ok(IngestPayload::Text("  2024-01-01 INFO up\n".to_string()))
        );
    }

    #[test]
    fn test_only_active_mode_is_validated() {
        let mut form = IngestForm::with_file("app.log");
        form.mode = form.mode.toggle();
        assert_eq!(form.mode, IngestMode::Paste);
        assert_eq!(form.payload(), Err(IngestError::EmptyPaste));

        form.active_input_mut().push_str("line");
        assert_eq!(form.active_input(), "line");
        assert_eq!(form.file_path, "app.log");
    }
}
