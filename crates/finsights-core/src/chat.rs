//! Conversational context builder
//!
//! Builds the system prompt that primes the chat assistant with one
//! customer's financial profile, bounds conversation history, and supplies
//! the deterministic fallback texts used when the LLM client fails.

use crate::categorize::Category;
use crate::llm::ChatMessage;
use crate::models::{ChatTurn, DashboardSnapshot, SpendingInsight};

/// Maximum prior turns forwarded to the LLM
pub const HISTORY_LIMIT: usize = 10;

/// Canned reply for general chat when the LLM call fails
pub const CHAT_FALLBACK: &str = "I'm having trouble connecting to my AI assistant right now. Please try again in a moment, or feel free to ask about your spending patterns, budgeting tips, or any financial questions you have!";

/// Build the system prompt priming the assistant with the customer's
/// financial profile and the behavioral guidelines. The three highlighted
/// categories report zero when absent from the spending data.
pub fn build_system_prompt(snapshot: &DashboardSnapshot, context: &str) -> String {
    let spending = &snapshot.spending_data;
    let food = spending.category_amount(Category::FoodDining.as_str());
    let transport = spending.category_amount(Category::Transportation.as_str());
    let entertainment = spending.category_amount(Category::Entertainment.as_str());

    format!(
        "You are a helpful financial advisor AI assistant for college students. You have access to the user's financial data and can provide personalized advice.

User Information:
- Name: {} {}
- Total Monthly Spending: ${:.2}
- Food & Dining: ${:.2}
- Transportation: ${:.2}
- Entertainment: ${:.2}

Context: {}

Guidelines:
1. Be friendly, encouraging, and supportive
2. Focus on practical, actionable advice for college students
3. Suggest specific money-saving strategies
4. Use the user's actual spending data to give personalized recommendations
5. Keep responses concise but helpful
6. If asked about specific insights, provide detailed explanations with actionable tips
7. IMPORTANT: Reference previous conversation context to avoid repetition
8. If you've already discussed a topic, acknowledge it briefly and provide new insights
9. Build on previous advice rather than repeating the same information
10. Use clear, readable formatting - avoid excessive markdown formatting like **bold** text

Remember: This user is a college student, so focus on budget-friendly solutions and student-specific financial tips.",
        snapshot.customer.first_name,
        snapshot.customer.last_name,
        spending.total_monthly_spend,
        food,
        transport,
        entertainment,
        context
    )
}

/// Keep only the most recent `limit` turns, preserving order
pub fn truncate_history(history: &[ChatTurn], limit: usize) -> &[ChatTurn] {
    if history.len() > limit {
        &history[history.len() - limit..]
    } else {
        history
    }
}

/// Assemble the outbound message list: system prompt, bounded history,
/// current user message.
pub fn build_messages(
    snapshot: &DashboardSnapshot,
    context: &str,
    history: &[ChatTurn],
    user_message: &str,
) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage {
        role: "system".to_string(),
        content: build_system_prompt(snapshot, context),
    }];

    for turn in truncate_history(history, HISTORY_LIMIT) {
        messages.push(ChatMessage {
            role: turn.role.clone(),
            content: turn.content.clone(),
        });
    }

    messages.push(ChatMessage {
        role: "user".to_string(),
        content: user_message.to_string(),
    });

    messages
}

/// Conversation-starter context for an insight-detail chat
pub fn insight_context(insight: &SpendingInsight) -> String {
    format!(
        "The user clicked on an insight: '{}' - {}. They want to learn more about this specific financial advice.",
        insight.title, insight.description
    )
}

/// The user-side question injected for an insight-detail chat
pub fn insight_question(insight: &SpendingInsight) -> String {
    format!(
        "Can you tell me more about this insight: {}. {} What should I do about it?",
        insight.title, insight.description
    )
}

/// Deterministic insight-detail reply synthesized from the insight's own
/// fields. Requires no network access.
pub fn insight_fallback(insight: &SpendingInsight) -> String {
    format!(
        "Here's more about your {} insight: {}. {}",
        insight.category, insight.description, insight.tip
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, CategorySpend, Customer, SpendingData};

    fn snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            customer: Customer {
                id: "demo1".to_string(),
                username: "sarah".to_string(),
                first_name: "Sarah".to_string(),
                last_name: "Johnson".to_string(),
                address: Address::default(),
                created_date: None,
            },
            accounts: vec![],
            transactions: vec![],
            spending_data: SpendingData {
                monthly_spending: vec![],
                category_spending: vec![
                    CategorySpend {
                        category: "Food & Dining".to_string(),
                        amount: 350.0,
                        color: "#ef4444".to_string(),
                    },
                    CategorySpend {
                        category: "Transportation".to_string(),
                        amount: 180.0,
                        color: "#3b82f6".to_string(),
                    },
                ],
                recent_transactions: vec![],
                total_monthly_spend: 530.0,
            },
        }
    }

    fn turns(n: usize) -> Vec<ChatTurn> {
        (0..n)
            .map(|i| ChatTurn {
                role: if i % 2 == 0 { "user" } else { "assistant" }.to_string(),
                content: format!("turn {}", i),
            })
            .collect()
    }

    #[test]
    fn test_prompt_embeds_profile() {
        let prompt = build_system_prompt(&snapshot(), "General financial advice");

        assert!(prompt.contains("Sarah Johnson"));
        assert!(prompt.contains("Total Monthly Spending: $530.00"));
        assert!(prompt.contains("Food & Dining: $350.00"));
        assert!(prompt.contains("Transportation: $180.00"));
        // Entertainment is absent from the spending data: reported as zero.
        assert!(prompt.contains("Entertainment: $0.00"));
        assert!(prompt.contains("Context: General financial advice"));
    }

    #[test]
    fn test_truncate_keeps_most_recent_in_order() {
        let history = turns(15);
        let kept = truncate_history(&history, 10);

        assert_eq!(kept.len(), 10);
        assert_eq!(kept[0].content, "turn 5");
        assert_eq!(kept[9].content, "turn 14");
    }

    #[test]
    fn test_truncate_short_history_unchanged() {
        let history = turns(4);
        let kept = truncate_history(&history, 10);
        assert_eq!(kept.len(), 4);
        assert_eq!(kept[0].content, "turn 0");
    }

    #[test]
    fn test_build_messages_shape() {
        let history = turns(15);
        let messages = build_messages(&snapshot(), "ctx", &history, "How am I doing?");

        // system + 10 history turns + user message
        assert_eq!(messages.len(), 12);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].content, "turn 5");
        assert_eq!(messages.last().unwrap().role, "user");
        assert_eq!(messages.last().unwrap().content, "How am I doing?");
    }

    #[test]
    fn test_insight_fallback_needs_no_network() {
        let insight = SpendingInsight {
            title: "Food Spending Alert".to_string(),
            description: "You've spent $350.00 on food this month.".to_string(),
            category: "Food & Dining".to_string(),
            amount: "$350.00".to_string(),
            tip: "Try meal prepping.".to_string(),
        };
        let reply = insight_fallback(&insight);
        assert!(reply.contains("Food & Dining"));
        assert!(reply.contains("You've spent $350.00 on food this month."));
        assert!(reply.contains("Try meal prepping."));
    }

    #[test]
    fn test_insight_question_mentions_title() {
        let insight = SpendingInsight {
            title: "Emergency Fund".to_string(),
            description: "Save more.".to_string(),
            category: "Savings".to_string(),
            amount: "$50-100".to_string(),
            tip: "Automate it.".to_string(),
        };
        assert!(insight_question(&insight).contains("Emergency Fund"));
        assert!(insight_context(&insight).contains("clicked on an insight"));
    }
}
