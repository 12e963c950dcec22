//! Intelligence artifacts extracted from a single document.
//!
//! Field names follow the camelCase keys of the extraction schema so the
//! provider output deserializes directly.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const UNASSIGNED: &str = "Unassigned";
pub const NO_DUE_DATE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub decision: String,
    pub date: String,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub task: String,
    pub assignee: String,
    pub due_date: String,
}

fn unassigned() -> String {
    UNASSIGNED.to_string()
}

fn no_due_date() -> String {
    NO_DUE_DATE.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineKind {
    Decision,
    Milestone,
    Meeting,
    Upload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub date: String,
    pub event: String,
    #[serde(rename = "type")]
    pub kind: TimelineKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonProfile {
    pub name: String,
    pub expertise: Vec<String>,
    pub mentioned_in: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub url: String,
    pub description: String,
}

/// Everything extracted from one document. Every list is required in the
/// provider output, even when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntelligenceArtifacts {
    pub decisions: Vec<Decision>,
    pub action_items: Vec<ActionItem>,
    pub timeline_events: Vec<TimelineEvent>,
    pub people: Vec<PersonProfile>,
    pub glossary: Vec<GlossaryTerm>,
    pub qa_pairs: Vec<QaPair>,
    pub references: Vec<Reference>,
}

impl IntelligenceArtifacts {
    /// Fill blank assignees and due dates with their placeholders.
    pub fn normalize(&mut self) {
        for item in &mut self.action_items {
            if item.assignee.trim().is_empty() {
                item.assignee = unassigned();
            }
            if item.due_date.trim().is_empty() {
                item.due_date = no_due_date();
            }
        }
    }

    /// Append `other` after `self`, list by list.
    pub fn extend_from(&mut self, other: &IntelligenceArtifacts) {
        self.decisions.extend_from_slice(&other.decisions);
        self.action_items.extend_from_slice(&other.action_items);
        self.timeline_events.extend_from_slice(&other.timeline_events);
        self.people.extend_from_slice(&other.people);
        self.glossary.extend_from_slice(&other.glossary);
        self.qa_pairs.extend_from_slice(&other.qa_pairs);
        self.references.extend_from_slice(&other.references);
    }

    pub fn tab(&self, tab: ArtifactTab) -> TabContent<'_> {
        match tab {
            ArtifactTab::Timeline => TabContent::Timeline(&self.timeline_events),
            ArtifactTab::Decisions => TabContent::Decisions(&self.decisions),
            ArtifactTab::ActionItems => TabContent::ActionItems(&self.action_items),
            ArtifactTab::Experts => TabContent::Experts(&self.people),
            ArtifactTab::Glossary => TabContent::Glossary(&self.glossary),
            ArtifactTab::Faq => TabContent::Faq(&self.qa_pairs),
            ArtifactTab::References => TabContent::References(&self.references),
        }
    }
}

/// The views a project's combined artifacts are browsed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactTab {
    Timeline,
    Decisions,
    ActionItems,
    Experts,
    Glossary,
    Faq,
    References,
}

impl ArtifactTab {
    pub const ALL: [ArtifactTab; 7] = [
        ArtifactTab::Timeline,
        ArtifactTab::Decisions,
        ArtifactTab::ActionItems,
        ArtifactTab::Experts,
        ArtifactTab::Glossary,
        ArtifactTab::Faq,
        ArtifactTab::References,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ArtifactTab::Timeline => "timeline",
            ArtifactTab::Decisions => "decisions",
            ArtifactTab::ActionItems => "action-items",
            ArtifactTab::Experts => "experts",
            ArtifactTab::Glossary => "glossary",
            ArtifactTab::Faq => "faq",
            ArtifactTab::References => "references",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ArtifactTab::Timeline => "Timeline",
            ArtifactTab::Decisions => "Decisions",
            ArtifactTab::ActionItems => "Action Items",
            ArtifactTab::Experts => "Experts",
            ArtifactTab::Glossary => "Glossary",
            ArtifactTab::Faq => "FAQ",
            ArtifactTab::References => "References",
        }
    }
}

impl FromStr for ArtifactTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArtifactTab::ALL
            .into_iter()
            .find(|tab| tab.slug() == s.to_lowercase())
            .ok_or_else(|| format!("Unknown artifact tab: {}", s))
    }
}

/// Borrowed contents of one tab.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TabContent<'a> {
    Timeline(&'a [TimelineEvent]),
    Decisions(&'a [Decision]),
    ActionItems(&'a [ActionItem]),
    Experts(&'a [PersonProfile]),
    Glossary(&'a [GlossaryTerm]),
    Faq(&'a [QaPair]),
    References(&'a [Reference]),
}

impl TabContent<'_> {
    pub fn len(&self) -> usize {
        match self {
            TabContent::Timeline(items) => items.len(),
            TabContent::Decisions(items) => items.len(),
            TabContent::ActionItems(items) => items.len(),
            TabContent::Experts(items) => items.len(),
            TabContent::Glossary(items) => items.len(),
            TabContent::Faq(items) => items.len(),
            TabContent::References(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
