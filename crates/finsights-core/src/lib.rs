//! FinSights Core Library
//!
//! Shared functionality for the FinSights personal finance backend:
//! - Data models for customers, accounts, transactions, and spending analytics
//! - Keyword-based transaction categorization
//! - Spending aggregation (per-category, per-month, grand total)
//! - Budget insight engine (over/under/no-budget message templates)
//! - Conversational context builder for the AI assistant
//! - Bank data providers (in-memory fixtures, Nessie sandbox API)
//! - OpenAI-compatible LLM client with local fallbacks

pub mod categorize;
pub mod chat;
pub mod error;
pub mod insights;
pub mod llm;
pub mod models;
pub mod provider;
pub mod spending;

pub use categorize::{categorize, Category};
pub use chat::{
    build_messages, build_system_prompt, insight_context, insight_fallback, insight_question,
    truncate_history, CHAT_FALLBACK, HISTORY_LIMIT,
};
pub use error::{Error, Result};
pub use insights::generate_insights;
pub use llm::{ChatMessage, LlmClient};
pub use models::{
    Account, Address, BudgetMap, ChatTurn, Customer, DashboardSnapshot, Merchant, MonthlySpend,
    RecentTransaction, SpendingData, SpendingInsight, Transaction,
};
pub use provider::{BankDataProvider, DataProvider, MockProvider, NessieClient};
pub use spending::aggregate;
