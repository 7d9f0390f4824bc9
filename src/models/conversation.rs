use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::destination::{Coordinates, Destination};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStep {
    #[default]
    Initial,
    Budget,
    Destinations,
    Generating,
    Itinerary,
}

impl ConversationStep {
    /// Placeholder for the chat input box.
    pub fn placeholder(&self) -> &'static str {
        match self {
            ConversationStep::Initial => {
                "Describe your dream trip (e.g., 'I love mountains, want something peaceful')"
            }
            ConversationStep::Budget => "Enter your budget (e.g., '2000' or '$2000')",
            ConversationStep::Destinations => {
                "Ask questions about the destinations or say 'show more options'"
            }
            ConversationStep::Itinerary => "Ask about your itinerary or request modifications",
            ConversationStep::Generating => "Type your message...",
        }
    }

    /// Caption shown under the chat header.
    pub fn caption(&self) -> &'static str {
        match self {
            ConversationStep::Initial => "Tell me about your dream escape...",
            ConversationStep::Budget => "What budget are you thinking?",
            ConversationStep::Destinations => "Explore ideal locations.",
            ConversationStep::Generating => "",
            ConversationStep::Itinerary => "Here's your tailored plan!",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationState {
    #[serde(default)]
    pub step: ConversationStep,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_wish: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_location: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_destination: Option<Destination>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct BudgetSuggestion {
    pub label: &'static str,
    pub amount: u64,
}

pub const BUDGET_SUGGESTIONS: [BudgetSuggestion; 4] = [
    BudgetSuggestion { label: "Budget Trip", amount: 1000 },
    BudgetSuggestion { label: "Mid-Range", amount: 2500 },
    BudgetSuggestion { label: "Luxury", amount: 5000 },
    BudgetSuggestion { label: "Ultra Luxury", amount: 10000 },
];
