// Dialogue data model
//
// Choices carry tagged action ids instead of callbacks; whatever layer
// presents the dialogue owns the table that gives each id a meaning.

/// Tagged action attached to a dialogue choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogueAction {
    FeelingGood,
    FeelingBad,
}

/// One selectable answer in a dialogue node
#[derive(Debug, Clone)]
pub struct DialogueChoice {
    pub text: String,
    pub action: DialogueAction,
}

impl DialogueChoice {
    pub fn new(text: &str, action: DialogueAction) -> Self {
        Self {
            text: text.to_string(),
            action,
        }
    }
}

/// A spoken line plus its ordered choices
#[derive(Debug, Clone, Default)]
pub struct DialogueNode {
    pub text: String,
    pub choices: Vec<DialogueChoice>,
}

impl DialogueNode {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            choices: Vec::new(),
        }
    }

    pub fn with_choice(mut self, choice: DialogueChoice) -> Self {
        self.choices.push(choice);
        self
    }

    pub fn add_choice(&mut self, choice: DialogueChoice) {
        self.choices.push(choice);
    }
}
