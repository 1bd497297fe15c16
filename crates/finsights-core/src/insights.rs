//! Budget insight engine
//!
//! Turns aggregated category spend plus an optional budget map into an
//! ordered list of user-facing insights. Pure and deterministic: no I/O, no
//! LLM dependency. The surrounding handlers may try an LLM first and use
//! this engine as the fallback, but the engine itself stands alone.

use crate::categorize::Category;
use crate::models::{BudgetMap, CategorySpend, SpendingInsight};

/// Suggested-cut fractions when a category runs over budget. Policy
/// constants, not derived from the data.
const FOOD_CUT_FRACTION: f64 = 0.3;
const TRANSPORT_CUT_FRACTION: f64 = 0.4;
const ENTERTAINMENT_CUT_FRACTION: f64 = 0.5;

/// Fraction of under-budget savings to redirect toward the emergency fund
const SAVINGS_REDIRECT_FRACTION: f64 = 0.5;

/// Per-category message templates for the tracked categories
struct TrackedCategory {
    category: Category,
    /// Budget ceiling for this category, if the caller supplied one
    ceiling: fn(&BudgetMap) -> f64,
    cut_fraction: f64,
    cut_action: &'static str,
    generic_title: &'static str,
    generic_description: &'static str,
    generic_tip: &'static str,
}

/// Categories that get a dedicated insight, in fixed output order
const TRACKED: &[TrackedCategory] = &[
    TrackedCategory {
        category: Category::FoodDining,
        ceiling: |b| b.food_dining,
        cut_fraction: FOOD_CUT_FRACTION,
        cut_action: "cooking at home a few more nights this week",
        generic_title: "Food Spending Alert",
        generic_description: "You've spent ${amount} on food this month. Consider cooking more meals at home or using your campus dining plan.",
        generic_tip: "Try meal prepping on Sundays to save money and time during the week.",
    },
    TrackedCategory {
        category: Category::Transportation,
        ceiling: |b| b.transportation,
        cut_fraction: TRANSPORT_CUT_FRACTION,
        cut_action: "swapping a few rideshares for the bus or carpooling",
        generic_title: "Transportation Savings",
        generic_description: "Your transportation costs are ${amount} this month. Consider using campus shuttles or carpooling.",
        generic_tip: "Look into student bus passes or bike sharing programs on campus.",
    },
    TrackedCategory {
        category: Category::Entertainment,
        ceiling: |b| b.entertainment,
        cut_fraction: ENTERTAINMENT_CUT_FRACTION,
        cut_action: "picking free campus events over paid ones",
        generic_title: "Entertainment Budget",
        generic_description: "You've spent ${amount} on entertainment. Look for free campus events and activities.",
        generic_tip: "Check your campus calendar for free movie nights, concerts, and social events.",
    },
];

fn dollars(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Generate the ordered insight list for one customer's spending.
///
/// One insight per tracked category with non-zero spend, in fixed category
/// order, followed by exactly one overall insight. Never fails: missing
/// data produces fewer or more generic insights, not an error.
pub fn generate_insights(
    category_spend: &[CategorySpend],
    total_spend: f64,
    budget: Option<&BudgetMap>,
) -> Vec<SpendingInsight> {
    let mut insights = Vec::new();

    for tracked in TRACKED {
        let label = tracked.category.as_str();
        let spent = category_spend
            .iter()
            .find(|c| c.category == label)
            .map(|c| c.amount)
            .unwrap_or(0.0);
        if spent <= 0.0 {
            continue;
        }

        let ceiling = budget.map(tracked.ceiling).unwrap_or(0.0);
        if ceiling > 0.0 {
            insights.push(budget_insight(tracked, spent, ceiling));
        } else {
            insights.push(SpendingInsight {
                title: tracked.generic_title.to_string(),
                description: tracked
                    .generic_description
                    .replace("{amount}", &format!("{:.2}", spent)),
                category: label.to_string(),
                amount: dollars(spent),
                tip: tracked.generic_tip.to_string(),
            });
        }
    }

    insights.push(overall_insight(total_spend, budget));
    insights
}

/// Compare one category's spend against its budget ceiling
fn budget_insight(tracked: &TrackedCategory, spent: f64, ceiling: f64) -> SpendingInsight {
    let label = tracked.category.as_str();
    let delta = spent - ceiling;

    if delta > 0.0 {
        let suggested_cut = delta * tracked.cut_fraction;
        SpendingInsight {
            title: format!("{} Over Budget", label),
            description: format!(
                "You're {} over your {} budget this month: {} spent against a {} budget.",
                dollars(delta),
                label,
                dollars(spent),
                dollars(ceiling)
            ),
            category: label.to_string(),
            amount: dollars(delta),
            tip: format!(
                "Cutting back could save you about {}. Start by {}.",
                dollars(suggested_cut),
                tracked.cut_action
            ),
        }
    } else {
        let saved = ceiling - spent;
        SpendingInsight {
            title: format!("{} Budget Win", label),
            description: format!(
                "Nice work! You're {} under your {} budget: {} spent of {}.",
                dollars(saved),
                label,
                dollars(spent),
                dollars(ceiling)
            ),
            category: label.to_string(),
            amount: dollars(saved),
            tip: format!(
                "Move about {} of what you saved into your emergency fund, or put it toward something you've been wanting.",
                dollars(saved * SAVINGS_REDIRECT_FRACTION)
            ),
        }
    }
}

/// The single trailing insight comparing total spend to the total budget
fn overall_insight(total_spend: f64, budget: Option<&BudgetMap>) -> SpendingInsight {
    let total_budget = budget.map(|b| b.total()).unwrap_or(0.0);

    if total_budget <= 0.0 {
        // No budget data at all: the generic emergency-fund nudge.
        return SpendingInsight {
            title: "Emergency Fund".to_string(),
            description: format!(
                "With your current spending of ${:.2}, try to save at least $50-100 per month for emergencies.",
                total_spend
            ),
            category: "Savings".to_string(),
            amount: "$50-100".to_string(),
            tip: "Set up automatic transfers to a savings account each month, even if it's just $25.".to_string(),
        };
    }

    let delta = total_spend - total_budget;
    if delta > 0.0 {
        SpendingInsight {
            title: "Total Spending Over Budget".to_string(),
            description: format!(
                "Your total spending of {} is {} over your combined budget of {}.",
                dollars(total_spend),
                dollars(delta),
                dollars(total_budget)
            ),
            category: "Overall".to_string(),
            amount: dollars(delta),
            tip: "Try the 50/30/20 rule: 50% needs, 30% wants, 20% savings. Trimming the wants column is the fastest way back under budget.".to_string(),
        }
    } else {
        let saved = total_budget - total_spend;
        SpendingInsight {
            title: "Monthly Budget On Track".to_string(),
            description: format!(
                "You've spent {} of your {} combined budget, leaving {} unspent.",
                dollars(total_spend),
                dollars(total_budget),
                dollars(saved)
            ),
            category: "Overall".to_string(),
            amount: dollars(saved),
            tip: "Put 70% of what's left toward your emergency fund and keep 30% for something fun.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorize::Category;

    fn spend(entries: &[(&str, f64)]) -> Vec<CategorySpend> {
        entries
            .iter()
            .map(|(category, amount)| CategorySpend {
                category: category.to_string(),
                amount: *amount,
                color: Category::color_for(category).to_string(),
            })
            .collect()
    }

    #[test]
    fn test_over_budget_insight() {
        let categories = spend(&[("Food & Dining", 100.0)]);
        let budget = BudgetMap {
            food_dining: 80.0,
            ..Default::default()
        };
        let insights = generate_insights(&categories, 100.0, Some(&budget));

        // One tracked category plus the trailing overall insight.
        assert_eq!(insights.len(), 2);
        let food = &insights[0];
        assert_eq!(food.category, "Food & Dining");
        assert!(food.title.contains("Over Budget"));
        assert!(food.description.contains("$20.00"));
        assert!(food.description.contains("$100.00"));
        assert!(food.description.contains("$80.00"));
        assert_eq!(food.amount, "$20.00");
        assert!(!food.tip.is_empty());
        // 30% of the $20 overage
        assert!(food.tip.contains("$6.00"));
    }

    #[test]
    fn test_under_budget_insight() {
        let categories = spend(&[("Food & Dining", 60.0)]);
        let budget = BudgetMap {
            food_dining: 80.0,
            ..Default::default()
        };
        let insights = generate_insights(&categories, 60.0, Some(&budget));

        let food = &insights[0];
        assert!(food.title.contains("Budget Win"));
        assert!(food.description.contains("$20.00"));
        assert_eq!(food.amount, "$20.00");
        // Half the savings redirected
        assert!(food.tip.contains("$10.00"));
    }

    #[test]
    fn test_no_budget_generic_insight() {
        let categories = spend(&[("Food & Dining", 100.0)]);
        let insights = generate_insights(&categories, 100.0, None);

        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].title, "Food Spending Alert");
        assert!(insights[0].description.contains("$100.00"));
        assert_eq!(insights[0].amount, "$100.00");
        assert_eq!(insights[1].title, "Emergency Fund");
    }

    #[test]
    fn test_fixed_category_order() {
        // Input order is scrambled; output must follow the tracked order.
        let categories = spend(&[
            ("Entertainment", 50.0),
            ("Food & Dining", 200.0),
            ("Transportation", 80.0),
        ]);
        let insights = generate_insights(&categories, 330.0, None);

        assert_eq!(insights.len(), 4);
        assert_eq!(insights[0].category, "Food & Dining");
        assert_eq!(insights[1].category, "Transportation");
        assert_eq!(insights[2].category, "Entertainment");
        assert_eq!(insights[3].title, "Emergency Fund");
    }

    #[test]
    fn test_zero_spend_categories_skipped() {
        let categories = spend(&[("Food & Dining", 0.0), ("Transportation", 45.0)]);
        let insights = generate_insights(&categories, 45.0, None);

        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].category, "Transportation");
    }

    #[test]
    fn test_cut_fractions_per_category() {
        let categories = spend(&[
            ("Food & Dining", 110.0),
            ("Transportation", 110.0),
            ("Entertainment", 110.0),
        ]);
        let budget = BudgetMap {
            food_dining: 100.0,
            transportation: 100.0,
            entertainment: 100.0,
            ..Default::default()
        };
        let insights = generate_insights(&categories, 330.0, Some(&budget));

        // $10 overage each: 30%, 40%, 50% cuts respectively.
        assert!(insights[0].tip.contains("$3.00"));
        assert!(insights[1].tip.contains("$4.00"));
        assert!(insights[2].tip.contains("$5.00"));
    }

    #[test]
    fn test_overall_over_budget_uses_503020_rule() {
        let categories = spend(&[("Food & Dining", 900.0)]);
        let budget = BudgetMap {
            food_dining: 400.0,
            transportation: 200.0,
            ..Default::default()
        };
        let insights = generate_insights(&categories, 900.0, Some(&budget));

        let overall = insights.last().unwrap();
        assert_eq!(overall.title, "Total Spending Over Budget");
        assert!(overall.description.contains("$300.00"));
        assert!(overall.tip.contains("50/30/20"));
    }

    #[test]
    fn test_overall_under_budget_split_advice() {
        let categories = spend(&[("Food & Dining", 300.0)]);
        let budget = BudgetMap {
            food_dining: 400.0,
            transportation: 200.0,
            ..Default::default()
        };
        let insights = generate_insights(&categories, 300.0, Some(&budget));

        let overall = insights.last().unwrap();
        assert_eq!(overall.title, "Monthly Budget On Track");
        assert!(overall.tip.contains("70%"));
        assert!(overall.tip.contains("30%"));
    }

    #[test]
    fn test_empty_spending_still_yields_overall_insight() {
        let insights = generate_insights(&[], 0.0, None);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].title, "Emergency Fund");
    }

    #[test]
    fn test_deterministic_for_identical_inputs() {
        let categories = spend(&[("Food & Dining", 1200.0)]);
        let budget = BudgetMap {
            food_dining: 1000.0,
            ..Default::default()
        };
        let a = generate_insights(&categories, 1200.0, Some(&budget));
        let b = generate_insights(&categories, 1200.0, Some(&budget));
        assert_eq!(serde_json::to_value(&a).unwrap(), serde_json::to_value(&b).unwrap());
    }

    #[test]
    fn test_food_overage_formats_two_decimals() {
        // The end-to-end case from the dashboard: 1200 spent, 1000 budgeted.
        let categories = spend(&[("Food & Dining", 1200.0)]);
        let budget = BudgetMap {
            food_dining: 1000.0,
            ..Default::default()
        };
        let insights = generate_insights(&categories, 1200.0, Some(&budget));

        let first = &insights[0];
        assert_eq!(first.category, "Food & Dining");
        assert!(first.description.contains("$200.00"));
        assert!(first.amount.contains("200.00"));
    }
}
