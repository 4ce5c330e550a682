/// Text shown around a command's request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub title: String,
    pub success: String,
    pub failure: String,
    pub confirmation: String,
}

impl Messages {
    pub fn new(title: impl Into<String>, success: impl Into<String>, failure: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            success: success.into(),
            failure: failure.into(),
            confirmation: "Do you really want to execute this command?".to_string(),
        }
    }

    pub fn with_confirmation(mut self, confirmation: impl Into<String>) -> Self {
        self.confirmation = confirmation.into();
        self
    }
}
