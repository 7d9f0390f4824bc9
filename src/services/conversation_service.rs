use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use crate::config::AppConfig;
use crate::db::TravelStore;
use crate::error::StoreError;
use crate::models::conversation::{
    BudgetSuggestion, ConversationState, ConversationStep, Message, BUDGET_SUGGESTIONS,
};
use crate::models::destination::Destination;
use crate::models::travel_plan::TravelPlan;
use crate::services::destination_scoring::DestinationScorer;

const SELECTION_BUDGET: u64 = 2000;

const APOLOGY: &str =
    "I apologize, but I'm having trouble processing your request right now. Please try again!";
const NEED_NUMERIC_BUDGET: &str = "I need a numeric budget to help you better. Please enter your budget as a number (e.g., 2000 for $2,000).";
const EXPLORING_DESTINATIONS: &str = "I can see you're exploring the destination options! Feel free to click on any destination card to select it and see your personalized itinerary. Each destination has been carefully matched to your preferences and budget.";
const ITINERARY_READY: &str = "Your itinerary looks amazing! You can explore the interactive 3D map to see all your planned activities. Feel free to ask me any questions about your trip, or if you'd like to modify anything!";
const WELCOME: &str = "I'm here to help you plan your perfect trip! Tell me about your travel preferences to get started.";

/// One exchange of the scripted chat: the messages to append, the new state
/// and whatever the right-hand panel should show.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub messages: Vec<Message>,
    pub state: ConversationState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destinations: Option<Vec<Destination>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<TravelPlan>,
    pub placeholder: &'static str,
    pub caption: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub budget_suggestions: Vec<BudgetSuggestion>,
}

impl Turn {
    fn new(user: Message, reply: impl Into<String>, state: ConversationState) -> Self {
        let step = state.step;
        Self {
            messages: vec![user, Message::assistant(reply)],
            state,
            destinations: None,
            plan: None,
            placeholder: step.placeholder(),
            caption: step.caption(),
            budget_suggestions: if step == ConversationStep::Budget {
                BUDGET_SUGGESTIONS.to_vec()
            } else {
                Vec::new()
            },
        }
    }
}

fn leading_integer() -> &'static Regex {
    static LEADING: OnceLock<Regex> = OnceLock::new();
    LEADING.get_or_init(|| Regex::new(r"^\s*\+?(\d+)").expect("budget pattern is valid"))
}

/// Reads a budget the way a browser `parseInt` would after dropping `$`
/// and `,`: leading digits count, anything after them is ignored.
/// Negative or unreadable input yields `None`; digit runs too long for
/// `u64` saturate.
pub fn parse_budget(text: &str) -> Option<u64> {
    let cleaned = text.replace(['$', ','], "");
    leading_integer()
        .captures(&cleaned)
        .and_then(|caps| caps.get(1))
        .map(|digits| digits.as_str().parse().unwrap_or(u64::MAX))
}

/// `2500` -> `"2,500"`
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone)]
pub struct ConversationService {
    scorer: DestinationScorer,
    recommendation_count: usize,
    fallback_destination_id: String,
}

impl ConversationService {
    pub fn new(config: &AppConfig, scorer: DestinationScorer) -> Self {
        Self {
            scorer,
            recommendation_count: config.recommendation_count,
            fallback_destination_id: config.fallback_destination_id.clone(),
        }
    }

    /// Advance the conversation by one user message.
    pub async fn respond(
        &self,
        state: ConversationState,
        text: &str,
        store: &dyn TravelStore,
    ) -> Turn {
        let user = Message::user(text);

        match state.step {
            ConversationStep::Initial => {
                let reply = format!(
                    "Perfect! I can see you're interested in \"{}\". To create the best recommendations for you, what's your travel budget? This will help me suggest destinations that match both your preferences and financial comfort zone.",
                    text
                );
                let next = ConversationState {
                    step: ConversationStep::Budget,
                    travel_wish: Some(text.to_string()),
                    ..state
                };
                Turn::new(user, reply, next)
            }
            ConversationStep::Budget => {
                let Some(budget) = parse_budget(text) else {
                    return Turn::new(user, NEED_NUMERIC_BUDGET, state);
                };

                let wish = state.travel_wish.clone().unwrap_or_default();
                let destinations = match self.recommend(&wish, budget, store).await {
                    Ok(destinations) => destinations,
                    Err(err) => {
                        log::error!("Error recommending destinations: {}", err);
                        return Turn::new(user, APOLOGY, state);
                    }
                };

                let reply = format!(
                    "Excellent! With a budget of ${}, I've found {} amazing destinations that match your preferences for \"{}\". Each destination is scored based on how well it matches your interests. Check out the recommendations on the right and click on your favorite to see the detailed itinerary!",
                    format_thousands(budget),
                    destinations.len(),
                    wish
                );
                let next = ConversationState {
                    step: ConversationStep::Destinations,
                    budget: Some(budget),
                    ..state
                };
                let mut turn = Turn::new(user, reply, next);
                turn.destinations = Some(destinations);
                turn
            }
            ConversationStep::Destinations => Turn::new(user, EXPLORING_DESTINATIONS, state),
            ConversationStep::Itinerary => Turn::new(user, ITINERARY_READY, state),
            ConversationStep::Generating => Turn::new(user, WELCOME, state),
        }
    }

    /// The user picked a destination card: load its plan, or the fallback
    /// plan when none is stored for it.
    pub async fn select(
        &self,
        state: ConversationState,
        destination: Destination,
        store: &dyn TravelStore,
    ) -> Turn {
        let user = Message::user(format!(
            "I choose {}, {}!",
            destination.name, destination.country
        ));

        let plan = match self.plan_for(&destination, store).await {
            Ok(Some(plan)) => plan,
            Ok(None) => {
                log::error!(
                    "No travel plan for '{}' and no fallback '{}'",
                    destination.key(),
                    self.fallback_destination_id
                );
                return Turn::new(user, APOLOGY, state);
            }
            Err(err) => {
                log::error!("Error generating itinerary: {}", err);
                return Turn::new(user, APOLOGY, state);
            }
        };

        let budget = state.budget.unwrap_or(SELECTION_BUDGET);
        let reply = format!(
            "Fantastic choice! {} is perfect for your preferences. I've created a detailed {}-day itinerary with a 3D interactive map showing all your activities. Your trip includes {} carefully selected experiences within your ${} budget. Explore the 3D map to see your journey come to life!",
            destination.name,
            plan.duration,
            plan.activity_count(),
            format_thousands(budget)
        );

        let next = ConversationState {
            step: ConversationStep::Itinerary,
            selected_destination: Some(destination),
            ..state
        };
        let mut turn = Turn::new(user, reply, next);
        turn.plan = Some(plan);
        turn
    }

    pub async fn recommend(
        &self,
        travel_wish: &str,
        budget: u64,
        store: &dyn TravelStore,
    ) -> Result<Vec<Destination>, StoreError> {
        let catalogue = store.list_destinations().await?;
        Ok(self
            .scorer
            .recommend(travel_wish, budget as f64, self.recommendation_count, catalogue))
    }

    async fn plan_for(
        &self,
        destination: &Destination,
        store: &dyn TravelStore,
    ) -> Result<Option<TravelPlan>, StoreError> {
        let key = destination.key();
        match store.find_travel_plan(&key).await {
            Ok(Some(plan)) => return Ok(Some(plan)),
            Ok(None) => log::warn!("No stored itinerary for '{}', using fallback", key),
            Err(err) => log::warn!("Error fetching itinerary '{}', using fallback: {}", key, err),
        }
        store.find_travel_plan(&self.fallback_destination_id).await
    }
}
