use super::knowledge::KnowledgeProfile;

const FACTS_REQUEST: &str = "While you are generating, always provide useful informations as \
    much as possible, such as founded date, location, etc if they are provided before.";

/// A labelled piece of evidence about the company.
#[derive(Debug, Clone, PartialEq)]
pub enum EvidenceBlock {
    GoogleSearch(KnowledgeProfile),
    Website(String),
    LinkedIn(String),
    OfficialWebsite(String),
}

impl EvidenceBlock {
    pub fn render(&self) -> String {
        match self {
            EvidenceBlock::GoogleSearch(profile) => format!(
                "This is the company information from google search.\n###\n{}\n###",
                profile.to_json()
            ),
            EvidenceBlock::Website(text) => format!(
                "This is the company information from the company's website\n###\n{}\n###",
                text
            ),
            EvidenceBlock::LinkedIn(sentence) => {
                format!("This is the Linkedin profile of the company.\n{}", sentence)
            }
            EvidenceBlock::OfficialWebsite(text) => format!(
                "This is the content from the official website of company. \n{}",
                text
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        PromptMessage {
            role: Role::System,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PromptMessages {
    pub messages: Vec<PromptMessage>,
}

impl PromptMessages {
    /// Preamble, then one message per evidence block in the given order, then the instructions.
    pub fn assemble(preamble: String, evidence: &[EvidenceBlock], instructions: String) -> Self {
        let mut messages = vec![PromptMessage::system(preamble)];

        messages.extend(
            evidence
                .iter()
                .map(|block| PromptMessage::system(block.render())),
        );
        messages.push(PromptMessage::system(instructions));

        PromptMessages { messages }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Sheet template with the facts request on a line of its own.
pub fn search_instructions(prompt_template: &str) -> String {
    format!("{}\n{}\n", prompt_template, FACTS_REQUEST)
}

/// Sheet template with the facts request appended as is.
pub fn linkedin_instructions(prompt_template: &str) -> String {
    format!("{}{}", prompt_template, FACTS_REQUEST)
}

pub fn search_preamble(company_name: &str, website: &str) -> String {
    format!(
        "
I want you to act as a helpful assistant to write the overview about companies.
The company to write about is {}
And the company's website is {}

I will provide you some useful informations about company,
",
        company_name, website
    )
}

pub fn linkedin_preamble(company_name: &str) -> String {
    format!(
        "
I want you to act as a helpful assistant to write the overview about companies.
The company to write about is {}

I will provide you some useful informations about company.
",
        company_name
    )
}
